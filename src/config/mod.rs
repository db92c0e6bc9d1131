mod exclusions;
pub mod settings;

pub use exclusions::ExclusionPolicy;
pub use settings::{AppConfig, ApiSettings, CrawlSettings, FailurePolicy, RetrySettings};
