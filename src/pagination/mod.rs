mod config;
mod iterator;
mod lister;

pub use config::PaginationConfig;
pub use iterator::PageIterator;
pub use lister::TournamentLister;
