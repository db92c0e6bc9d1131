pub mod parsers;
mod queries;
mod startgg_client;

pub use startgg_client::{Fetched, StartGgClient};
