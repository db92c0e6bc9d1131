mod client;
mod fetcher;
mod retry;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
pub use fetcher::FetchClient;
pub use retry::RetryPolicy;
