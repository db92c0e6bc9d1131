use anyhow::Result;
use log::{debug, info};

use crate::api::{StartGgClient, parsers};
use crate::rate_limiter::RateLimiter;

use super::config::PaginationConfig;
use super::iterator::PageIterator;

/// Lists the tournament slugs of a time window across every result page
pub struct TournamentLister<'a> {
    client: &'a StartGgClient,
    config: PaginationConfig,
}

impl<'a> TournamentLister<'a> {
    pub fn new(client: &'a StartGgClient, config: PaginationConfig) -> Self {
        Self { client, config }
    }

    /// Eligible slugs starting in `[after_s, before_s)`, in page order
    pub async fn list_slugs(&self, after_s: i64, before_s: i64) -> Result<Vec<String>> {
        let mut pages = PageIterator::new(self.config.clone());
        let mut rate_limiter = RateLimiter::from_config(&self.config);
        let mut slugs = Vec::new();

        loop {
            rate_limiter.wait_for_next_page().await;

            let page = self
                .client
                .fetch_tournament_page(after_s, before_s, pages.current_page())
                .await?;

            let page_slugs = parsers::listed_slugs(&page);
            debug!("  → Page {}: {} eligible tournaments", pages.current_page(), page_slugs.len());
            slugs.extend(page_slugs);

            pages.set_total_pages(parsers::total_pages(&page));
            if !pages.has_next() {
                break;
            }
            pages.advance();
        }

        info!(
            "  → Listed {} tournaments over {} pages",
            slugs.len(),
            rate_limiter.pages_requested()
        );
        Ok(slugs)
    }
}
