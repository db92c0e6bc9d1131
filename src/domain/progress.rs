use log::info;

use super::month::YearMonth;
use super::stats::Stats;

const MILESTONE: usize = 50;

/// Running view of one month's walk: tournaments done, skipped, and sets seen so far
pub struct CrawlProgress {
    month: YearMonth,
    total: usize,
    walked: usize,
    skipped: Vec<String>,
    running: Stats,
}

impl CrawlProgress {
    pub fn new(month: YearMonth, total: usize) -> Self {
        Self {
            month,
            total,
            walked: 0,
            skipped: Vec::new(),
            running: Stats::default(),
        }
    }

    pub fn record_walked(&mut self, delta: &Stats) {
        self.walked += 1;
        self.running += *delta;
        self.log_progress();
    }

    pub fn record_skipped(&mut self, slug: &str) {
        self.skipped.push(slug.to_string());
        self.log_progress();
    }

    pub fn current_count(&self) -> usize {
        self.walked + self.skipped.len()
    }

    /// Slugs given up on under the skip policy, in walk order
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    fn log_progress(&self) {
        let current = self.current_count();
        if should_log(current, self.total) {
            info!("  → {}", self.describe());
        }
    }

    fn describe(&self) -> String {
        let mut line = format!(
            "{}: {}/{} tournaments, {} sets so far ({} with characters/stages)",
            self.month,
            self.current_count(),
            self.total,
            self.running.sets,
            self.running.with_characters_and_stages
        );
        if !self.skipped.is_empty() {
            line.push_str(&format!(", {} skipped", self.skipped.len()));
        }
        line
    }
}

fn should_log(current: usize, total: usize) -> bool {
    current % MILESTONE == 0 || current == total
}
