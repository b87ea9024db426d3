//! Accessors over the `bootstrap-static/` payload: players, teams, gameweeks, positions.

use serde_json::Value;
use std::sync::{Arc, Mutex, PoisonError};

use super::{
    client::FplClient,
    types::{records_from, Record, ResourceKind},
};
use crate::Result;

pub const BOOTSTRAP_ENDPOINT: &str = "bootstrap-static/";

/// First record whose `id` matches.
pub fn find_by_id(records: &[Record], id: i64) -> Option<Record> {
    records.iter().find(|r| r.id() == id).cloned()
}

/// Records whose `first_name second_name` contains `query`, case-insensitively,
/// in source order.
pub fn filter_by_name(records: &[Record], query: &str) -> Vec<Record> {
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|r| r.display_name().to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// First record with a truthy `flag` (e.g. `is_current`).
pub fn find_flagged(records: &[Record], flag: &str) -> Option<Record> {
    records.iter().find(|r| r.bool_field(flag)).cloned()
}

pub struct BootstrapApi {
    client: Arc<FplClient>,
    snapshot: Mutex<Option<Arc<Value>>>,
}

impl BootstrapApi {
    pub fn new(client: Arc<FplClient>) -> Self {
        Self {
            client,
            snapshot: Mutex::new(None),
        }
    }

    /// The whole bootstrap payload, fetched once and then reused.
    pub async fn data(&self, force_refresh: bool) -> Result<Arc<Value>> {
        if !force_refresh {
            let held = self
                .snapshot
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone();
            if let Some(data) = held {
                return Ok(data);
            }
        }

        let data = self
            .client
            .get(BOOTSTRAP_ENDPOINT, None, !force_refresh)
            .await?;
        *self.snapshot.lock().unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&data));
        Ok(data)
    }

    /// Drop the memoized payload so the next read goes back to the client.
    pub fn reset(&self) {
        *self.snapshot.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Records of a bootstrap-backed kind. Fixtures are not part of this
    /// payload and read as empty here.
    pub async fn all(&self, kind: ResourceKind) -> Result<Vec<Record>> {
        let Some(key) = kind.bootstrap_key() else {
            return Ok(Vec::new());
        };
        let data = self.data(false).await?;
        Ok(records_from(data.get(key)))
    }

    pub async fn players(&self) -> Result<Vec<Record>> {
        self.all(ResourceKind::Players).await
    }

    pub async fn teams(&self) -> Result<Vec<Record>> {
        self.all(ResourceKind::Teams).await
    }

    pub async fn gameweeks(&self) -> Result<Vec<Record>> {
        self.all(ResourceKind::Gameweeks).await
    }

    pub async fn positions(&self) -> Result<Vec<Record>> {
        self.all(ResourceKind::Positions).await
    }

    pub async fn by_id(&self, kind: ResourceKind, id: i64) -> Result<Option<Record>> {
        Ok(find_by_id(&self.all(kind).await?, id))
    }

    pub async fn player_by_id(&self, id: i64) -> Result<Option<Record>> {
        self.by_id(ResourceKind::Players, id).await
    }

    pub async fn team_by_id(&self, id: i64) -> Result<Option<Record>> {
        self.by_id(ResourceKind::Teams, id).await
    }

    pub async fn players_by_name(&self, query: &str) -> Result<Vec<Record>> {
        Ok(filter_by_name(&self.players().await?, query))
    }

    pub async fn current_gameweek(&self) -> Result<Option<Record>> {
        Ok(find_flagged(&self.gameweeks().await?, "is_current"))
    }

    pub async fn next_gameweek(&self) -> Result<Option<Record>> {
        Ok(find_flagged(&self.gameweeks().await?, "is_next"))
    }

    pub async fn game_settings(&self) -> Result<Record> {
        let data = self.data(false).await?;
        Ok(data.get("game_settings").map(Record::from_value).unwrap_or_default())
    }

    /// Number of registered FPL managers this season.
    pub async fn total_players(&self) -> Result<i64> {
        let data = self.data(false).await?;
        Ok(data.get("total_players").and_then(Value::as_i64).unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{bootstrap_fixture, TestHarness};
    use serde_json::json;

    fn api(harness: &TestHarness) -> BootstrapApi {
        BootstrapApi::new(Arc::clone(&harness.client))
    }

    #[tokio::test]
    async fn test_all_follows_source_order() {
        let harness = TestHarness::with_fixtures();
        let bootstrap = api(&harness);

        let ids: Vec<i64> = bootstrap.players().await.unwrap().iter().map(Record::id).collect();
        assert_eq!(ids, vec![308, 17, 401, 1, 5, 16]);
        assert_eq!(bootstrap.teams().await.unwrap().len(), 3);
        assert_eq!(bootstrap.gameweeks().await.unwrap().len(), 4);
        assert_eq!(bootstrap.positions().await.unwrap().len(), 4);
        assert!(bootstrap.all(ResourceKind::Fixtures).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_snapshot_fetched_once() {
        let harness = TestHarness::with_fixtures();
        let bootstrap = api(&harness);

        bootstrap.players().await.unwrap();
        bootstrap.teams().await.unwrap();
        bootstrap.current_gameweek().await.unwrap();

        assert_eq!(harness.transport.calls_to("bootstrap-static/"), 1);
    }

    #[tokio::test]
    async fn test_force_refresh_goes_to_network() {
        let harness = TestHarness::with_fixtures();
        let bootstrap = api(&harness);

        bootstrap.data(false).await.unwrap();
        bootstrap.data(true).await.unwrap();
        bootstrap.reset();
        bootstrap.data(false).await.unwrap();

        // reset falls back to the client cache, not the network
        assert_eq!(harness.transport.calls_to("bootstrap-static/"), 2);
    }

    #[tokio::test]
    async fn test_get_by_name_salah() {
        let harness = TestHarness::with_fixtures();
        let bootstrap = api(&harness);

        let found = bootstrap.players_by_name("Salah").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id(), 308);

        assert!(bootstrap
            .players_by_name("zzznotaplayer")
            .await
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_filter_by_name_is_case_insensitive_substring() {
        let players = records_from(bootstrap_fixture().get("elements"));

        let by_full = filter_by_name(&players, "mohamed salah");
        assert_eq!(by_full.len(), 1);

        // "sa" hits Salah, Saka and Saliba in source order
        let ids: Vec<i64> = filter_by_name(&players, "SA").iter().map(Record::id).collect();
        assert_eq!(ids, vec![308, 17, 5]);

        let unicode = filter_by_name(&players, "ødegaard");
        assert_eq!(unicode.len(), 1);
        assert_eq!(unicode[0].id(), 16);
    }

    #[tokio::test]
    async fn test_by_id_absent_is_none() {
        let harness = TestHarness::with_fixtures();
        let bootstrap = api(&harness);

        assert_eq!(
            bootstrap.team_by_id(12).await.unwrap().unwrap().str_field("short_name"),
            "LIV"
        );
        assert!(bootstrap.team_by_id(99).await.unwrap().is_none());
        assert!(bootstrap.player_by_id(-1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_current_and_next_gameweek() {
        let harness = TestHarness::with_fixtures();
        let bootstrap = api(&harness);

        assert_eq!(bootstrap.current_gameweek().await.unwrap().unwrap().id(), 2);
        assert_eq!(bootstrap.next_gameweek().await.unwrap().unwrap().id(), 3);
    }

    #[test]
    fn test_find_flagged_none_when_unflagged() {
        let events = records_from(Some(&json!([
            {"id": 38, "is_current": false, "is_next": false}
        ])));
        assert!(find_flagged(&events, "is_current").is_none());
        assert!(find_flagged(&events, "is_next").is_none());
    }

    #[tokio::test]
    async fn test_missing_collections_read_empty() {
        let harness = TestHarness::new(crate::core::RetryPolicy::no_delay(1), Default::default());
        harness.transport.route("bootstrap-static/", json!({}));
        let bootstrap = api(&harness);

        assert!(bootstrap.players().await.unwrap().is_empty());
        assert!(bootstrap.current_gameweek().await.unwrap().is_none());
        assert_eq!(bootstrap.total_players().await.unwrap(), 0);
        assert!(bootstrap.game_settings().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_game_settings_and_total_players() {
        let harness = TestHarness::with_fixtures();
        let bootstrap = api(&harness);

        assert_eq!(bootstrap.total_players().await.unwrap(), 10_500_000);
        assert_eq!(
            bootstrap.game_settings().await.unwrap().i64_field("squad_squadsize"),
            15
        );
    }
}
