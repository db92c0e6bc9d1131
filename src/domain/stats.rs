use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use super::classifier::Completeness;
use super::month::YearMonth;

/// Set counts per completeness tier, plus distinct players behind them.
///
/// Merging is a componentwise sum, so any folding order gives the same totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub entrants: u64,
    pub sets: u64,
    pub with_characters_and_stages: u64,
    pub with_stock_counts: u64,
    pub with_colors: u64,
}

impl Stats {
    pub fn merge(self, other: Stats) -> Stats {
        Stats {
            entrants: self.entrants + other.entrants,
            sets: self.sets + other.sets,
            with_characters_and_stages: self.with_characters_and_stages + other.with_characters_and_stages,
            with_stock_counts: self.with_stock_counts + other.with_stock_counts,
            with_colors: self.with_colors + other.with_colors,
        }
    }

    /// Count one classified set
    pub fn record(&mut self, tier: Completeness) {
        if tier >= Completeness::Played {
            self.sets += 1;
        }
        if tier >= Completeness::CharactersAndStages {
            self.with_characters_and_stages += 1;
        }
        if tier >= Completeness::StockCounts {
            self.with_stock_counts += 1;
        }
        if tier >= Completeness::Colors {
            self.with_colors += 1;
        }
    }

    pub fn from_tiers<I: IntoIterator<Item = Completeness>>(tiers: I) -> Stats {
        let mut stats = Stats::default();
        for tier in tiers {
            stats.record(tier);
        }
        stats
    }

    pub fn is_empty(&self) -> bool {
        self.sets == 0
    }
}

impl Add for Stats {
    type Output = Stats;

    fn add(self, rhs: Stats) -> Stats {
        self.merge(rhs)
    }
}

impl AddAssign for Stats {
    fn add_assign(&mut self, rhs: Stats) {
        *self = self.merge(rhs);
    }
}

impl Sum for Stats {
    fn sum<I: Iterator<Item = Stats>>(iter: I) -> Stats {
        iter.fold(Stats::default(), Stats::merge)
    }
}

/// Month-wide set of player ids; each id counts once however often it appears
#[derive(Debug, Default)]
pub struct PlayerRegistry {
    seen: HashSet<i64>,
}

impl PlayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` the first time `player_id` is seen
    pub fn record(&mut self, player_id: i64) -> bool {
        self.seen.insert(player_id)
    }

    /// Fold another registry in; ids already present are not counted again
    pub fn absorb(&mut self, other: PlayerRegistry) {
        self.seen.extend(other.seen);
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// One row of the summary log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyStats {
    pub year: i32,
    pub month: u32,
    pub tournaments: u64,
    pub entrants: u64,
    pub unique_players: u64,
    pub sets: u64,
    pub with_characters_and_stages: u64,
    pub with_stock_counts: u64,
    pub with_colors: u64,
}

impl MonthlyStats {
    pub fn month(&self) -> YearMonth {
        YearMonth::new(self.year, self.month)
    }
}

/// Folds per-tournament deltas for a single month
#[derive(Debug)]
pub struct MonthAccumulator {
    month: YearMonth,
    tournaments: u64,
    totals: Stats,
    players: PlayerRegistry,
}

impl MonthAccumulator {
    pub fn new(month: YearMonth) -> Self {
        Self {
            month,
            tournaments: 0,
            totals: Stats::default(),
            players: PlayerRegistry::new(),
        }
    }

    pub fn players_mut(&mut self) -> &mut PlayerRegistry {
        &mut self.players
    }

    /// Tournaments without a single eligible set do not count
    pub fn add_tournament(&mut self, delta: Stats) {
        if !delta.is_empty() {
            self.tournaments += 1;
        }
        self.totals += delta;
    }

    pub fn finish(self) -> MonthlyStats {
        MonthlyStats {
            year: self.month.year,
            month: self.month.month,
            tournaments: self.tournaments,
            entrants: self.totals.entrants,
            unique_players: self.players.len() as u64,
            sets: self.totals.sets,
            with_characters_and_stages: self.totals.with_characters_and_stages,
            with_stock_counts: self.totals.with_stock_counts,
            with_colors: self.totals.with_colors,
        }
    }
}
