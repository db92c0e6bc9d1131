use anyhow::Result;
use log::{debug, warn};
use std::collections::HashMap;

use crate::api::StartGgClient;
use crate::cache::MonthSnapshots;
use crate::config::ExclusionPolicy;
use crate::domain::classifier::{self, Completeness};
use crate::domain::{EventResponse, PhaseGroupEntities, PlayerRegistry, Stats, TournamentResponse};

/// Eligible-item counts above which a tournament looks like bulk brackets worth excluding
#[derive(Debug, Clone, Copy)]
pub struct WarningThresholds {
    pub events: usize,
    pub groups: usize,
}

/// Walks tournament → event → phase group → set for one tournament at a time
pub struct HierarchyWalker<'a> {
    client: &'a StartGgClient,
    exclusions: &'a ExclusionPolicy,
    thresholds: WarningThresholds,
}

impl<'a> HierarchyWalker<'a> {
    pub fn new(
        client: &'a StartGgClient,
        exclusions: &'a ExclusionPolicy,
        thresholds: WarningThresholds,
    ) -> Self {
        Self {
            client,
            exclusions,
            thresholds,
        }
    }

    /// Statistics for one tournament. Players of played sets are also added to
    /// `month_players`; raw responses of productive groups and tournaments are saved.
    pub async fn walk(
        &self,
        slug: &str,
        month_players: &mut PlayerRegistry,
        snapshots: &MonthSnapshots,
    ) -> Result<Stats> {
        if self.exclusions.excludes_slug(slug) {
            debug!("Skipping excluded tournament {}", slug);
            return Ok(Stats::default());
        }

        let tournament = self.client.fetch_tournament(slug).await?;
        let owner_id = tournament.parsed.entities.tournament.owner_id;
        if self.exclusions.excludes_owner(owner_id) {
            debug!("Skipping {} from excluded owner {:?}", slug, owner_id);
            return Ok(Stats::default());
        }

        let mut local_players = PlayerRegistry::new();
        let mut totals = Stats::default();

        let event_ids = self.eligible_event_ids(&tournament.parsed);
        if event_ids.len() > self.thresholds.events {
            warn!("{} {:?}: {} eligible events", slug, owner_id, event_ids.len());
        }

        for event_id in event_ids {
            let event = self.client.fetch_event(event_id).await?;

            let group_ids = eligible_group_ids(&event.parsed);
            if group_ids.len() > self.thresholds.groups {
                warn!("{} {:?}: {} eligible groups in event {}", slug, owner_id, group_ids.len(), event_id);
            }

            for group_id in group_ids {
                let group = self.client.fetch_phase_group(group_id).await?;

                let Some(entities) = group.parsed.entities.as_ref() else {
                    continue;
                };
                let Some(group_stats) = tally_group(entities, month_players, &mut local_players) else {
                    continue;
                };

                if !group_stats.is_empty() {
                    snapshots.save_group(slug, group_id, &group.raw)?;
                }
                totals += group_stats;
            }
        }

        if !totals.is_empty() {
            snapshots.save_tournament(slug, &tournament.raw)?;
        }

        totals.entrants = local_players.len() as u64;
        Ok(totals)
    }

    fn eligible_event_ids(&self, tournament: &TournamentResponse) -> Vec<i64> {
        let videogame_id = self.client.videogame_id();
        tournament
            .entities
            .event
            .iter()
            .flatten()
            .filter(|event| classifier::is_eligible_event(event, videogame_id))
            .filter_map(|event| event.id)
            .collect()
    }
}

fn eligible_group_ids(event: &EventResponse) -> Vec<i64> {
    event
        .entities
        .iter()
        .filter_map(|entities| entities.groups.as_ref())
        .flatten()
        .filter(|group| classifier::is_eligible_group(group))
        .filter_map(|group| group.id)
        .collect()
}

/// Classify a group's sets and attribute the players of every played set.
///
/// `None` when the payload lacks either the entrant or the set list.
pub fn tally_group(
    entities: &PhaseGroupEntities,
    month_players: &mut PlayerRegistry,
    local_players: &mut PlayerRegistry,
) -> Option<Stats> {
    let entrants = entities.entrants.as_ref()?;
    let sets = entities.sets.as_ref()?;

    let roster: HashMap<i64, Vec<i64>> = entrants
        .iter()
        .filter_map(|entrant| entrant.id.map(|id| (id, entrant.player_ids())))
        .collect();

    let mut stats = Stats::default();
    for set in sets {
        let tier = classifier::classify(set);
        if tier == Completeness::Ineligible {
            continue;
        }

        let sides = [set.entrant1_id, set.entrant2_id];
        for player_id in sides.iter().flatten().filter_map(|id| roster.get(id)).flatten() {
            local_players.record(*player_id);
            month_players.record(*player_id);
        }
        stats.record(tier);
    }

    Some(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::SnapshotStore;
    use crate::config::ApiSettings;
    use crate::domain::{PhaseGroupResponse, YearMonth};
    use crate::http::testing::RoutedTransport;
    use crate::http::{FetchClient, RetryPolicy};
    use serde_json::{Value, json};

    const TOURNAMENT_URL: &str = "https://api.start.gg/tournament/smash-fest?expand[]=event&expand[]=phase";
    const EVENT_URL: &str = "https://api.start.gg/event/100?expand[]=groups";
    const GROUP_URL: &str = "https://api.start.gg/phase_group/200?expand[]=sets&expand[]=entrants";

    const THRESHOLDS: WarningThresholds = WarningThresholds { events: 10, groups: 200 };

    fn tournament(owner_id: i64) -> Value {
        json!({"entities": {
            "tournament": {"ownerId": owner_id},
            "event": [
                {"id": 100, "videogameId": 1, "state": 3, "isOnline": false},
                {"id": 101, "videogameId": 1386, "state": 3, "isOnline": false},
                {"id": 102, "videogameId": 1, "state": 3, "isOnline": true},
                {"id": 103, "videogameId": 1, "state": 1, "isOnline": false}
            ]
        }})
    }

    fn event() -> Value {
        json!({"entities": {"groups": [
            {"id": 200, "state": 3},
            {"id": 201, "state": 1}
        ]}})
    }

    fn group(sets: Value) -> Value {
        json!({"entities": {
            "entrants": [
                {"id": 1, "mutations": {"players": {"11": {"id": 11}}}},
                {"id": 2, "mutations": {"players": {"21": {"id": 21}, "22": {"id": 22}}}}
            ],
            "sets": sets
        }})
    }

    fn characters_and_stages_set() -> Value {
        json!({
            "entrant1Id": 1, "entrant2Id": 2, "entrant1Score": 2, "entrant2Score": 0,
            "state": 3, "unreachable": false,
            "entrant1CharacterIds": [2], "entrant2CharacterIds": [20],
            "games": [{"stageId": 3}, {"stageId": 28}]
        })
    }

    fn client(transport: &RoutedTransport) -> StartGgClient {
        let fetch = FetchClient::new(Box::new(transport.clone()), RetryPolicy::default());
        StartGgClient::new(fetch, &ApiSettings::default(), "key")
    }

    #[tokio::test]
    async fn test_walk_counts_eligible_set() {
        let transport = RoutedTransport::new()
            .route(TOURNAMENT_URL, tournament(5))
            .route(EVENT_URL, event())
            .route(GROUP_URL, group(json!([characters_and_stages_set()])));
        let client = client(&transport);
        let exclusions = ExclusionPolicy::default();
        let temp = tempfile::tempdir().unwrap();
        let snapshots = SnapshotStore::new(temp.path()).for_month(YearMonth::new(2022, 7));
        let mut players = PlayerRegistry::new();

        let stats = HierarchyWalker::new(&client, &exclusions, THRESHOLDS)
            .walk("smash-fest", &mut players, &snapshots)
            .await
            .unwrap();

        assert_eq!(
            stats,
            Stats {
                entrants: 3,
                sets: 1,
                with_characters_and_stages: 1,
                with_stock_counts: 0,
                with_colors: 0,
            }
        );
        assert_eq!(players.len(), 3);
        assert_eq!(transport.requested_urls(), vec![TOURNAMENT_URL, EVENT_URL, GROUP_URL]);
        assert!(snapshots.dir().join("smash-fest").join("200.json").exists());
        assert!(snapshots.dir().join("smash-fest").join("smash-fest.json").exists());
    }

    #[tokio::test]
    async fn test_excluded_slug_makes_no_request() {
        let transport = RoutedTransport::new().route(TOURNAMENT_URL, tournament(5));
        let client = client(&transport);
        let exclusions = ExclusionPolicy::new(["smash-fest"], []);
        let temp = tempfile::tempdir().unwrap();
        let snapshots = SnapshotStore::new(temp.path()).for_month(YearMonth::new(2022, 7));
        let mut players = PlayerRegistry::new();

        let stats = HierarchyWalker::new(&client, &exclusions, THRESHOLDS)
            .walk("smash-fest", &mut players, &snapshots)
            .await
            .unwrap();

        assert_eq!(stats, Stats::default());
        assert!(transport.requested_urls().is_empty());
    }

    #[tokio::test]
    async fn test_excluded_owner_stops_after_tournament() {
        let transport = RoutedTransport::new()
            .route(TOURNAMENT_URL, tournament(906371))
            .route(EVENT_URL, event())
            .route(GROUP_URL, group(json!([characters_and_stages_set()])));
        let client = client(&transport);
        let exclusions = ExclusionPolicy::default();
        let temp = tempfile::tempdir().unwrap();
        let snapshots = SnapshotStore::new(temp.path()).for_month(YearMonth::new(2022, 7));
        let mut players = PlayerRegistry::new();

        let stats = HierarchyWalker::new(&client, &exclusions, THRESHOLDS)
            .walk("smash-fest", &mut players, &snapshots)
            .await
            .unwrap();

        assert_eq!(stats, Stats::default());
        assert_eq!(transport.requested_urls(), vec![TOURNAMENT_URL]);
        assert!(!snapshots.dir().exists());
    }

    #[tokio::test]
    async fn test_unplayed_group_writes_no_snapshot() {
        let unplayed = json!([{"entrant1Id": 1, "entrant2Id": 2, "state": 2}]);
        let transport = RoutedTransport::new()
            .route(TOURNAMENT_URL, tournament(5))
            .route(EVENT_URL, event())
            .route(GROUP_URL, group(unplayed));
        let client = client(&transport);
        let exclusions = ExclusionPolicy::default();
        let temp = tempfile::tempdir().unwrap();
        let snapshots = SnapshotStore::new(temp.path()).for_month(YearMonth::new(2022, 7));
        let mut players = PlayerRegistry::new();

        let stats = HierarchyWalker::new(&client, &exclusions, THRESHOLDS)
            .walk("smash-fest", &mut players, &snapshots)
            .await
            .unwrap();

        assert_eq!(stats, Stats::default());
        assert!(players.is_empty());
        assert!(!snapshots.dir().exists());
    }

    #[tokio::test]
    async fn test_fetch_failure_propagates() {
        // Group URL is not routed, so it answers 404
        let transport = RoutedTransport::new()
            .route(TOURNAMENT_URL, tournament(5))
            .route(EVENT_URL, event());
        let client = client(&transport);
        let exclusions = ExclusionPolicy::default();
        let temp = tempfile::tempdir().unwrap();
        let snapshots = SnapshotStore::new(temp.path()).for_month(YearMonth::new(2022, 7));
        let mut players = PlayerRegistry::new();

        let err = HierarchyWalker::new(&client, &exclusions, THRESHOLDS)
            .walk("smash-fest", &mut players, &snapshots)
            .await
            .unwrap_err();

        assert!(format!("{:#}", err).contains("404 Not Found"));
    }

    #[test]
    fn test_tally_group_deduplicates_across_sets() {
        let raw = group(json!([characters_and_stages_set(), characters_and_stages_set()]));
        let parsed: PhaseGroupResponse = serde_json::from_value(raw).unwrap();
        let mut month = PlayerRegistry::new();
        month.record(11);
        let mut local = PlayerRegistry::new();

        let stats = tally_group(parsed.entities.as_ref().unwrap(), &mut month, &mut local).unwrap();

        assert_eq!(stats.sets, 2);
        assert_eq!(local.len(), 3);
        assert_eq!(month.len(), 3);
    }

    #[test]
    fn test_tally_group_requires_both_lists() {
        let parsed: PhaseGroupResponse =
            serde_json::from_value(json!({"entities": {"sets": [characters_and_stages_set()]}})).unwrap();
        let mut month = PlayerRegistry::new();
        let mut local = PlayerRegistry::new();

        assert!(tally_group(parsed.entities.as_ref().unwrap(), &mut month, &mut local).is_none());
    }
}
