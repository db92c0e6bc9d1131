use crate::config::ApiSettings;
use crate::domain::{EventResponse, PhaseGroupResponse, TournamentResponse, TournamentsPage};
use crate::errors::{fetch_context, parse_context};
use crate::http::{FetchClient, HttpRequest};
use anyhow::{Context, Result};
use log::debug;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use super::queries::TOURNAMENTS_QUERY;

/// Raw payload alongside its typed view; the raw side is what gets snapshotted
pub struct Fetched<T> {
    pub raw: Value,
    pub parsed: T,
}

/// start.gg API client
pub struct StartGgClient {
    fetch: FetchClient,
    api_base_url: String,
    api_key: String,
    videogame_id: i64,
    page_size: u32,
}

impl StartGgClient {
    pub fn new(fetch: FetchClient, settings: &ApiSettings, api_key: impl Into<String>) -> Self {
        Self {
            fetch,
            api_base_url: settings.api_base_url.to_string(),
            api_key: api_key.into(),
            videogame_id: settings.videogame_id,
            page_size: settings.page_size,
        }
    }

    /// Fetch tournament details with its events and phases
    pub async fn fetch_tournament(&self, slug: &str) -> Result<Fetched<TournamentResponse>> {
        let url = self.build_tournament_url(slug);
        self.fetch_entity(&url, "tournament").await
    }

    /// Fetch event details with its phase groups
    pub async fn fetch_event(&self, event_id: i64) -> Result<Fetched<EventResponse>> {
        let url = self.build_event_url(event_id);
        self.fetch_entity(&url, "event").await
    }

    /// Fetch phase group details with its sets and entrants
    pub async fn fetch_phase_group(&self, group_id: i64) -> Result<Fetched<PhaseGroupResponse>> {
        let url = self.build_phase_group_url(group_id);
        self.fetch_entity(&url, "phase group").await
    }

    /// Fetch one page of the monthly tournament listing
    pub async fn fetch_tournament_page(
        &self,
        after_s: i64,
        before_s: i64,
        page_num: usize,
    ) -> Result<TournamentsPage> {
        let url = self.build_gql_url();
        let variables = json!({
            "afterS": after_s,
            "beforeS": before_s,
            "pageNum": page_num,
            "perPage": self.page_size,
            "videogameId": self.videogame_id,
        });

        debug!("Fetching tournament page {} for [{}, {})", page_num, after_s, before_s);
        let data = self
            .fetch
            .fetch_gql(&url, &self.api_key, TOURNAMENTS_QUERY, variables)
            .await
            .with_context(|| fetch_context(&url))?;

        TournamentsPage::deserialize(&data).with_context(|| parse_context("tournament listing"))
    }

    pub fn videogame_id(&self) -> i64 {
        self.videogame_id
    }

    // --- Helper Methods ---

    async fn fetch_entity<T: DeserializeOwned>(&self, url: &str, data_type: &str) -> Result<Fetched<T>> {
        let raw = self
            .fetch
            .fetch_json(&HttpRequest::get(url))
            .await
            .with_context(|| fetch_context(url))?;

        let parsed = T::deserialize(&raw).with_context(|| parse_context(data_type))?;
        Ok(Fetched { raw, parsed })
    }

    fn build_tournament_url(&self, slug: &str) -> String {
        format!(
            "{}/tournament/{}?expand[]=event&expand[]=phase",
            self.api_base_url,
            urlencoding::encode(slug)
        )
    }

    fn build_event_url(&self, event_id: i64) -> String {
        format!("{}/event/{}?expand[]=groups", self.api_base_url, event_id)
    }

    fn build_phase_group_url(&self, group_id: i64) -> String {
        format!(
            "{}/phase_group/{}?expand[]=sets&expand[]=entrants",
            self.api_base_url, group_id
        )
    }

    fn build_gql_url(&self) -> String {
        format!("{}/gql/alpha", self.api_base_url)
    }
}
