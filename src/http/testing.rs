//! Transport doubles for unit tests.

use crate::errors::FetchError;
use crate::http::client::{HttpRequest, HttpResponse, Transport};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

type Scripted = Result<HttpResponse, String>;

/// Replays a fixed queue of responses and records every request with its send time
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    responses: Arc<Mutex<VecDeque<Scripted>>>,
    log: Arc<Mutex<Vec<(HttpRequest, Instant)>>>,
}

impl ScriptedTransport {
    pub fn new(responses: Vec<Scripted>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses.into())),
            log: Arc::default(),
        }
    }

    pub fn ok(body: &str) -> Scripted {
        Ok(HttpResponse {
            status: 200,
            status_text: "OK".to_string(),
            body: body.to_string(),
        })
    }

    pub fn status(status: u16, status_text: &str) -> Scripted {
        Ok(HttpResponse {
            status,
            status_text: status_text.to_string(),
            body: String::new(),
        })
    }

    pub fn network_failure() -> Scripted {
        Err("connection reset by peer".to_string())
    }

    pub fn request_count(&self) -> usize {
        self.log.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.log.lock().unwrap().iter().map(|(r, _)| r.clone()).collect()
    }

    /// Time elapsed between consecutive requests
    pub fn gaps(&self) -> Vec<Duration> {
        let log = self.log.lock().unwrap();
        log.windows(2).map(|w| w[1].1 - w[0].1).collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, FetchError> {
        self.log.lock().unwrap().push((request.clone(), Instant::now()));
        let next = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err("script exhausted".to_string()));
        next.map_err(|message| FetchError::Network {
            url: request.url.clone(),
            source: message.into(),
        })
    }
}

/// Answers by exact URL; unknown URLs get a 404
#[derive(Clone, Default)]
pub struct RoutedTransport {
    routes: Arc<Mutex<HashMap<String, String>>>,
    log: Arc<Mutex<Vec<String>>>,
}

impl RoutedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(self, url: &str, body: serde_json::Value) -> Self {
        self.routes.lock().unwrap().insert(url.to_string(), body.to_string());
        self
    }

    pub fn requested_urls(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for RoutedTransport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, FetchError> {
        self.log.lock().unwrap().push(request.url.clone());
        let response = match self.routes.lock().unwrap().get(&request.url) {
            Some(body) => HttpResponse {
                status: 200,
                status_text: "OK".to_string(),
                body: body.clone(),
            },
            None => HttpResponse {
                status: 404,
                status_text: "Not Found".to_string(),
                body: String::new(),
            },
        };
        Ok(response)
    }
}
