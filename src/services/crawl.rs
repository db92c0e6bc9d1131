use anyhow::{Context, Result};
use log::{error, info, warn};

use crate::api::StartGgClient;
use crate::cache::SnapshotStore;
use crate::checkpoint::{ResultsLog, ResumeController};
use crate::config::{AppConfig, FailurePolicy};
use crate::domain::{CrawlProgress, MonthAccumulator, MonthlyStats, PlayerRegistry, YearMonth};
use crate::errors::FetchError;
use crate::http::{FetchClient, ReqwestTransport, Transport};
use crate::pagination::{PaginationConfig, TournamentLister};

use super::walker::{HierarchyWalker, WarningThresholds};

/// Month-by-month backfill from the checkpoint up to the current month
pub struct CrawlService {
    config: AppConfig,
    client: StartGgClient,
    results: ResultsLog,
    snapshots: SnapshotStore,
}

impl CrawlService {
    pub fn new(config: AppConfig, api_key: &str) -> Result<Self> {
        let transport = ReqwestTransport::new(config.api.user_agent, config.api.timeout_secs)?;
        Ok(Self::with_transport(config, api_key, Box::new(transport)))
    }

    pub fn with_transport(config: AppConfig, api_key: &str, transport: Box<dyn Transport>) -> Self {
        let fetch = FetchClient::new(transport, config.retry.policy());
        let client = StartGgClient::new(fetch, &config.api, api_key);
        let results = ResultsLog::new(&config.crawl.results_path);
        let snapshots = SnapshotStore::new(config.crawl.snapshot_dir());

        Self {
            config,
            client,
            results,
            snapshots,
        }
    }

    /// Process every fully elapsed month after the checkpoint
    pub async fn run(&self) -> Result<usize> {
        self.run_until(YearMonth::current_utc()).await
    }

    /// Process months after the checkpoint that are strictly before `until`.
    /// Returns the number of months appended to the results log.
    pub async fn run_until(&self, until: YearMonth) -> Result<usize> {
        info!("=== Starting Crawl ===\n");

        let mut controller = ResumeController::from_log(&self.results, self.config.crawl.epoch, until)?;
        let mut completed = 0;

        while let Some(month) = controller.pending() {
            let stats = self
                .process_month(month)
                .await
                .with_context(|| format!("Failed to process month {}", month))?;

            self.results.append(&stats)?;
            log_month_summary(&stats);

            controller.complete(month);
            completed += 1;
        }

        info!("=== Crawl Complete: {} months appended ===", completed);
        Ok(completed)
    }

    /// List, walk and fold every tournament of `month`
    pub async fn process_month(&self, month: YearMonth) -> Result<MonthlyStats> {
        info!("Month {}:", month);

        let (after_s, before_s) = month.window()?;
        let slugs = self.lister().list_slugs(after_s, before_s).await?;
        info!("  → {} tournaments to fetch", slugs.len());

        let walker = self.walker();
        let snapshots = self.snapshots.for_month(month);
        let mut accumulator = MonthAccumulator::new(month);
        let mut progress = CrawlProgress::new(month, slugs.len());

        for slug in &slugs {
            // Players join the month only once their tournament walked cleanly
            let mut players = PlayerRegistry::new();
            let outcome = walker.walk(slug, &mut players, &snapshots).await;
            match outcome {
                Ok(delta) => {
                    accumulator.players_mut().absorb(players);
                    accumulator.add_tournament(delta);
                    progress.record_walked(&delta);
                }
                Err(e) => match self.config.crawl.failure_policy {
                    FailurePolicy::Abort => {
                        return Err(e.context(format!("Failed to walk tournament {}", slug)));
                    }
                    FailurePolicy::Skip => {
                        let kind = match e.downcast_ref::<FetchError>() {
                            Some(fetch) if fetch.is_permanent() => "rejected",
                            _ => "failed",
                        };
                        error!("  → Skipping tournament {} ({}): {:#}", slug, kind, e);
                        progress.record_skipped(slug);
                    }
                },
            }
        }

        if !progress.skipped().is_empty() {
            warn!("  → Skipped in {}: {}", month, progress.skipped().join(", "));
        }
        Ok(accumulator.finish())
    }

    // --- Helper Methods ---

    fn lister(&self) -> TournamentLister<'_> {
        let mut config = PaginationConfig::new(self.config.api.page_delay_ms);
        if let Some(max) = self.config.api.max_pages {
            config = config.with_max_pages(max);
        }
        TournamentLister::new(&self.client, config)
    }

    fn walker(&self) -> HierarchyWalker<'_> {
        let thresholds = WarningThresholds {
            events: self.config.crawl.event_warning_threshold,
            groups: self.config.crawl.group_warning_threshold,
        };
        HierarchyWalker::new(&self.client, &self.config.exclusions, thresholds)
    }
}

fn log_month_summary(stats: &MonthlyStats) {
    info!(
        "  → {}-{}: {} tournaments, {} players, {} sets ({} characters/stages, {} stocks, {} colors)\n",
        stats.year,
        stats.month,
        stats.tournaments,
        stats.unique_players,
        stats.sets,
        stats.with_characters_and_stages,
        stats.with_stock_counts,
        stats.with_colors
    );
}
