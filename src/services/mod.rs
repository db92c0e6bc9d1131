pub mod crawl;
pub mod walker;

pub use crawl::CrawlService;
pub use walker::{HierarchyWalker, WarningThresholds};
