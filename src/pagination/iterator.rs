use super::config::PaginationConfig;

/// Cursor over the pages of a listing whose size is learned from the first response
pub struct PageIterator {
    current_page: usize,
    total_pages: usize,
    config: PaginationConfig,
}

impl PageIterator {
    pub fn new(config: PaginationConfig) -> Self {
        Self {
            current_page: 1,
            total_pages: 0,
            config,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn set_total_pages(&mut self, total: usize) {
        self.total_pages = total;
    }

    /// More pages remain and the configured cap has not been hit
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages && !self.cap_reached_after(self.current_page)
    }

    pub fn advance(&mut self) {
        self.current_page += 1;
    }

    fn cap_reached_after(&self, page: usize) -> bool {
        self.config.max_pages.is_some_and(|max| page >= max)
    }
}
