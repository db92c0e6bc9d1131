use crate::domain::YearMonth;
use crate::http::RetryPolicy;
use clap::ValueEnum;
use std::path::PathBuf;

use super::exclusions::ExclusionPolicy;

pub struct ApiSettings {
    pub api_base_url: &'static str,
    pub user_agent: &'static str,
    /// Whole-exchange timeout; `None` leaves it to the network stack
    pub timeout_secs: Option<u64>,
    /// start.gg videogame id being tracked (1 = Super Smash Bros. Melee)
    pub videogame_id: i64,
    pub page_size: u32,
    pub page_delay_ms: u64,
    /// Listing pages fetched per month at most; `None` follows `totalPages`
    pub max_pages: Option<usize>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.start.gg",
            user_agent: "MeleeCompleteness/0.1",
            timeout_secs: None,
            videogame_id: 1,
            page_size: 512,
            page_delay_ms: 1000, // 1 page/sec
            max_pages: None,
        }
    }
}

pub struct RetrySettings {
    pub initial_delay_ms: u64,
    pub max_attempts: Option<u32>,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            initial_delay_ms: 1000,
            max_attempts: None,
        }
    }
}

impl RetrySettings {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.initial_delay_ms, self.max_attempts)
    }
}

/// What to do when a tournament cannot be fetched mid-month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FailurePolicy {
    /// Stop the run; the month is retried from scratch next time
    #[default]
    Abort,
    /// Log the tournament and carry on; none of its sets or players reach the month row
    Skip,
}

pub struct CrawlSettings {
    pub results_path: PathBuf,
    pub output_dir: PathBuf,
    /// First month with usable data when no checkpoint exists
    pub epoch: YearMonth,
    pub failure_policy: FailurePolicy,
    pub event_warning_threshold: usize,
    pub group_warning_threshold: usize,
}

impl Default for CrawlSettings {
    fn default() -> Self {
        Self {
            results_path: PathBuf::from("results.csv"),
            output_dir: PathBuf::from("."),
            // Modern Melee history begins February 2019
            epoch: YearMonth::new(2019, 2),
            failure_policy: FailurePolicy::Abort,
            event_warning_threshold: 10,
            group_warning_threshold: 200,
        }
    }
}

impl CrawlSettings {
    pub fn snapshot_dir(&self) -> PathBuf {
        self.output_dir.join("tournaments")
    }
}

#[derive(Default)]
pub struct AppConfig {
    pub api: ApiSettings,
    pub retry: RetrySettings,
    pub crawl: CrawlSettings,
    pub exclusions: ExclusionPolicy,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }
}
