/// Configuration for paginated requests
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    pub max_pages: Option<usize>,
    pub page_delay_ms: u64,
}

impl PaginationConfig {
    pub fn new(page_delay_ms: u64) -> Self {
        Self {
            max_pages: None,
            page_delay_ms,
        }
    }

    pub fn with_max_pages(mut self, max: usize) -> Self {
        self.max_pages = Some(max);
        self
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self::new(1000)
    }
}
