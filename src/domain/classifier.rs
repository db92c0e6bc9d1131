//! Eligibility and data-completeness rules for sets.
//!
//! Tiers are nested: each is only tested once the previous one holds, so a set's
//! [`Completeness`] is the highest tier it reaches.

use std::ops::RangeInclusive;

use super::models::{ActivityState, Event, Game, MatchSet, PhaseGroup, TournamentNode};

pub const CHARACTER_IDS: RangeInclusive<i64> = 1..=26;
pub const STAGE_IDS: RangeInclusive<i64> = 1..=29;
/// Stock counts at or above this encode a costume color variant
pub const COLOR_STOCK_OFFSET: i64 = 100;
/// Score reported for an entrant that has not been scored yet
pub const UNSET_SCORE: i64 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Completeness {
    Ineligible,
    Played,
    CharactersAndStages,
    StockCounts,
    Colors,
}

pub fn classify(set: &MatchSet) -> Completeness {
    if !is_played(set) {
        Completeness::Ineligible
    } else if !has_characters_and_stages(set) {
        Completeness::Played
    } else if !has_stock_counts(set) {
        Completeness::CharactersAndStages
    } else if !has_colors(set) {
        Completeness::StockCounts
    } else {
        Completeness::Colors
    }
}

// --- Hierarchy filters ---

pub fn is_listed_tournament(node: &TournamentNode) -> bool {
    node.has_offline_events && ActivityState::is_under_way(node.state)
}

pub fn is_eligible_event(event: &Event, videogame_id: i64) -> bool {
    event.id.is_some()
        && event.videogame_id == Some(videogame_id)
        && ActivityState::is_under_way(event.state)
        && !event.is_online
}

pub fn is_eligible_group(group: &PhaseGroup) -> bool {
    group.id.is_some() && ActivityState::is_under_way(group.state)
}

// --- Set tiers ---

pub fn is_played(set: &MatchSet) -> bool {
    ActivityState::is_completed(set.state)
        && set.entrant1_id.is_some()
        && set.entrant2_id.is_some()
        && set.entrant1_score != Some(UNSET_SCORE)
        && set.entrant2_score != Some(UNSET_SCORE)
        && !set.unreachable
}

pub fn has_characters_and_stages(set: &MatchSet) -> bool {
    is_played(set)
        && valid_characters(&set.entrant1_character_ids)
        && valid_characters(&set.entrant2_character_ids)
        && non_empty_games(set).is_some_and(|games| games.iter().all(valid_stage))
}

/// Either side reporting stocks is enough
pub fn has_stock_counts(set: &MatchSet) -> bool {
    has_characters_and_stages(set)
        && games_of(set).iter().all(|game| {
            is_truthy_count(game.entrant1_p1_stocks) || is_truthy_count(game.entrant2_p1_stocks)
        })
}

pub fn has_colors(set: &MatchSet) -> bool {
    has_stock_counts(set)
        && games_of(set)
            .iter()
            .all(|game| encodes_color(game.entrant1_p1_stocks) && encodes_color(game.entrant2_p1_stocks))
}

fn valid_characters(ids: &Option<Vec<Option<i64>>>) -> bool {
    match ids {
        Some(ids) if !ids.is_empty() => ids
            .iter()
            .all(|id| id.is_some_and(|id| CHARACTER_IDS.contains(&id))),
        _ => false,
    }
}

fn valid_stage(game: &Game) -> bool {
    game.stage_id.is_some_and(|id| STAGE_IDS.contains(&id))
}

fn non_empty_games(set: &MatchSet) -> Option<&[Game]> {
    set.games.as_deref().filter(|games| !games.is_empty())
}

fn games_of(set: &MatchSet) -> &[Game] {
    set.games.as_deref().unwrap_or_default()
}

fn is_truthy_count(stocks: Option<i64>) -> bool {
    stocks.is_some_and(|n| n != 0)
}

fn encodes_color(stocks: Option<i64>) -> bool {
    stocks.is_some_and(|n| n >= COLOR_STOCK_OFFSET)
}
