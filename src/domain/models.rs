use serde::Deserialize;

use super::lenient;

/// Upstream activity state codes shared by tournaments, events, groups and sets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityState {
    Created,
    Active,
    Completed,
    Other(i64),
}

impl ActivityState {
    pub fn from_code(code: Option<i64>) -> Option<Self> {
        code.map(|c| match c {
            1 => ActivityState::Created,
            2 => ActivityState::Active,
            3 => ActivityState::Completed,
            other => ActivityState::Other(other),
        })
    }

    /// In progress or finished
    pub fn is_under_way(code: Option<i64>) -> bool {
        matches!(
            Self::from_code(code),
            Some(ActivityState::Active | ActivityState::Completed)
        )
    }

    pub fn is_completed(code: Option<i64>) -> bool {
        Self::from_code(code) == Some(ActivityState::Completed)
    }
}

// --- Listing (GraphQL) ---

#[derive(Debug, Deserialize)]
pub struct TournamentsPage {
    pub tournaments: TournamentConnection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentConnection {
    pub page_info: PageInfo,
    #[serde(default, deserialize_with = "lenient::list")]
    pub nodes: Option<Vec<TournamentNode>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default, deserialize_with = "lenient::integer")]
    pub total_pages: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentNode {
    #[serde(default, deserialize_with = "lenient::truthy")]
    pub has_offline_events: bool,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub state: Option<i64>,
}

// --- Tournament (REST) ---

#[derive(Debug, Deserialize)]
pub struct TournamentResponse {
    pub entities: TournamentEntities,
}

#[derive(Debug, Deserialize)]
pub struct TournamentEntities {
    pub tournament: TournamentInfo,
    #[serde(default, deserialize_with = "lenient::list")]
    pub event: Option<Vec<Event>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentInfo {
    #[serde(default, deserialize_with = "lenient::integer")]
    pub owner_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(default, deserialize_with = "lenient::integer")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub videogame_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub state: Option<i64>,
    #[serde(default, deserialize_with = "lenient::truthy")]
    pub is_online: bool,
}

// --- Event (REST) ---

#[derive(Debug, Deserialize)]
pub struct EventResponse {
    #[serde(default)]
    pub entities: Option<EventEntities>,
}

#[derive(Debug, Deserialize)]
pub struct EventEntities {
    #[serde(default, deserialize_with = "lenient::list")]
    pub groups: Option<Vec<PhaseGroup>>,
}

#[derive(Debug, Deserialize)]
pub struct PhaseGroup {
    #[serde(default, deserialize_with = "lenient::integer")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub state: Option<i64>,
}

// --- Phase group (REST) ---

#[derive(Debug, Deserialize)]
pub struct PhaseGroupResponse {
    #[serde(default)]
    pub entities: Option<PhaseGroupEntities>,
}

#[derive(Debug, Deserialize)]
pub struct PhaseGroupEntities {
    #[serde(default, deserialize_with = "lenient::list")]
    pub entrants: Option<Vec<Entrant>>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub sets: Option<Vec<MatchSet>>,
}

#[derive(Debug, Deserialize)]
pub struct Entrant {
    #[serde(default, deserialize_with = "lenient::integer")]
    pub id: Option<i64>,
    #[serde(default)]
    pub mutations: EntrantMutations,
}

#[derive(Debug, Default, Deserialize)]
pub struct EntrantMutations {
    #[serde(default, deserialize_with = "lenient::members")]
    pub players: Vec<PlayerRef>,
}

#[derive(Debug, Deserialize)]
pub struct PlayerRef {
    #[serde(default, deserialize_with = "lenient::integer")]
    pub id: Option<i64>,
}

impl Entrant {
    /// Member player ids; a team entrant yields several
    pub fn player_ids(&self) -> Vec<i64> {
        self.mutations.players.iter().filter_map(|p| p.id).collect()
    }
}

/// A best-of-N match between two entrants
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSet {
    #[serde(default, deserialize_with = "lenient::integer")]
    pub entrant1_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub entrant2_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub entrant1_score: Option<i64>,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub entrant2_score: Option<i64>,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub state: Option<i64>,
    #[serde(default, deserialize_with = "lenient::truthy")]
    pub unreachable: bool,
    #[serde(default, deserialize_with = "lenient::integers")]
    pub entrant1_character_ids: Option<Vec<Option<i64>>>,
    #[serde(default, deserialize_with = "lenient::integers")]
    pub entrant2_character_ids: Option<Vec<Option<i64>>>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub games: Option<Vec<Game>>,
}

/// One game within a set
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    #[serde(default, deserialize_with = "lenient::integer")]
    pub stage_id: Option<i64>,
    #[serde(default, rename = "entrant1P1Stocks", deserialize_with = "lenient::integer")]
    pub entrant1_p1_stocks: Option<i64>,
    #[serde(default, rename = "entrant2P1Stocks", deserialize_with = "lenient::integer")]
    pub entrant2_p1_stocks: Option<i64>,
}
