use thiserror::Error;

/// Failures surfaced by the upstream fetch layer
#[derive(Debug, Error)]
pub enum FetchError {
    /// Non-2xx, non-5xx response. Never retried.
    #[error("{status} {status_text}: {url}")]
    Permanent {
        url: String,
        status: u16,
        status_text: String,
    },

    /// 5xx response that outlived the retry policy's attempt cap
    #[error("{status} {status_text}: {url} (gave up after {attempts} attempts)")]
    RetriesExhausted {
        url: String,
        status: u16,
        status_text: String,
        attempts: u32,
    },

    /// GraphQL query-level error reported inside a 2xx body
    #[error("GraphQL error: {0}")]
    Graphql(String),

    /// Transport-level failure (DNS, connect, reset, ...)
    #[error("Network failure for {url}")]
    Network {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Response body was not the JSON we expected
    #[error("Malformed JSON from {url}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    pub fn is_permanent(&self) -> bool {
        matches!(self, FetchError::Permanent { .. } | FetchError::Graphql(_))
    }
}

/// Add context to fetch errors
pub fn fetch_context(url: &str) -> String {
    format!("Failed to fetch from: {}", url)
}

/// Add context to parse errors
pub fn parse_context(data_type: &str) -> String {
    format!("Failed to parse {}", data_type)
}

/// Add context to snapshot/log writes
pub fn write_context(path: &std::path::Path) -> String {
    format!("Failed to write {}", path.display())
}
