use crate::errors::FetchError;
use crate::http::client::{HttpRequest, HttpResponse, Transport};
use crate::http::retry::RetryPolicy;
use log::{debug, warn};
use serde_json::{Value, json};
use tokio::time::sleep;

/// JSON fetcher that classifies responses and retries 5xx per its [`RetryPolicy`]
pub struct FetchClient {
    transport: Box<dyn Transport>,
    policy: RetryPolicy,
}

impl FetchClient {
    pub fn new(transport: Box<dyn Transport>, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    /// Send `request` until it succeeds or fails permanently, returning the parsed body
    pub async fn fetch_json(&self, request: &HttpRequest) -> Result<Value, FetchError> {
        let mut attempts = 0;

        loop {
            attempts += 1;
            let response = self.transport.send(request).await?;

            if response.is_success() {
                debug!("{}: {}", response.status, request.url);
                return Self::parse_body(&request.url, &response);
            }

            if !response.is_server_error() {
                warn!("{}: {}", response.status, request.url);
                return Err(FetchError::Permanent {
                    url: request.url.clone(),
                    status: response.status,
                    status_text: response.status_text,
                });
            }

            if !self.policy.allows_another(attempts) {
                return Err(FetchError::RetriesExhausted {
                    url: request.url.clone(),
                    status: response.status,
                    status_text: response.status_text,
                    attempts,
                });
            }

            let delay = self.policy.delay_for_retry(attempts);
            warn!(
                "{}: {}, retrying in {}",
                response.status,
                request.url,
                delay.as_millis()
            );
            sleep(delay).await;
        }
    }

    /// POST a GraphQL query and return its `data` member
    pub async fn fetch_gql(
        &self,
        url: &str,
        api_key: &str,
        query: &str,
        variables: Value,
    ) -> Result<Value, FetchError> {
        let request = HttpRequest::post_json(url, json!({ "query": query, "variables": variables }))
            .with_header("Authorization", format!("Bearer {}", api_key));

        let mut body = self.fetch_json(&request).await?;

        if let Some(message) = Self::first_graphql_error(&body) {
            warn!("GraphQL error from {}: {}", url, message);
            return Err(FetchError::Graphql(message));
        }

        Ok(body.get_mut("data").map(Value::take).unwrap_or(Value::Null))
    }

    // --- Helper Methods ---

    fn parse_body(url: &str, response: &HttpResponse) -> Result<Value, FetchError> {
        serde_json::from_str(&response.body).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }

    fn first_graphql_error(body: &Value) -> Option<String> {
        let first = body.get("errors")?.as_array()?.first()?;
        let message = first
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("Unknown GraphQL error");
        Some(message.to_string())
    }
}
