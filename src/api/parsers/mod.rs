mod pagination;
mod tournament;

pub use pagination::total_pages;
pub use tournament::{canonical_slug, listed_slugs};
