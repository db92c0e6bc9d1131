pub mod classifier;
mod lenient;
mod month;
pub mod models;
mod progress;
pub mod stats;

pub use classifier::Completeness;
pub use models::*;
pub use month::YearMonth;
pub use progress::CrawlProgress;
pub use stats::{MonthAccumulator, MonthlyStats, PlayerRegistry, Stats};
