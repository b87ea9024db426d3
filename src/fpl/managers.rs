//! Manager (entry) endpoints: profile, season history, transfers, picks.

use std::sync::Arc;

use super::{
    client::FplClient,
    types::{records_from, Record, TeamSummary},
};
use crate::{cli::types::ManagerId, Result};

pub struct ManagerApi {
    client: Arc<FplClient>,
}

impl ManagerApi {
    pub fn new(client: Arc<FplClient>) -> Self {
        Self { client }
    }

    /// Team name, manager name, points, rank and value.
    pub async fn info(&self, manager: ManagerId) -> Result<Record> {
        let data = self
            .client
            .get(&format!("entry/{manager}/"), None, true)
            .await?;
        Ok(Record::from_value(&data))
    }

    /// `current` gameweeks, `past` seasons and `chips` played.
    pub async fn history(&self, manager: ManagerId) -> Result<Record> {
        let data = self
            .client
            .get(&format!("entry/{manager}/history/"), None, true)
            .await?;
        Ok(Record::from_value(&data))
    }

    /// Every transfer this season, oldest first.
    pub async fn transfers(&self, manager: ManagerId) -> Result<Vec<Record>> {
        let data = self
            .client
            .get(&format!("entry/{manager}/transfers/"), None, true)
            .await?;
        Ok(records_from(Some(&data)))
    }

    /// Squad selection for one gameweek: `picks`, `entry_history`, `active_chip`.
    pub async fn picks(&self, manager: ManagerId, gameweek: i64) -> Result<Record> {
        let data = self
            .client
            .get(&format!("entry/{manager}/event/{gameweek}/picks/"), None, true)
            .await?;
        Ok(Record::from_value(&data))
    }

    pub async fn team_summary(&self, manager: ManagerId) -> Result<TeamSummary> {
        Ok(TeamSummary::from_entry(&self.info(manager).await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestHarness;
    use serde_json::json;

    const MANAGER: ManagerId = ManagerId(7798096);

    #[tokio::test]
    async fn test_team_summary_from_entry() {
        let harness = TestHarness::with_fixtures();
        harness.transport.route(
            "entry/7798096/",
            json!({
                "id": 7798096,
                "name": "Saka Potatoes",
                "player_first_name": "Ada",
                "player_last_name": "Lovelace",
                "summary_overall_points": 1500,
                "summary_overall_rank": 120000,
                "current_event": 10,
                "last_deadline_value": 1012,
                "last_deadline_bank": 13,
                "last_deadline_total_transfers": 9,
            }),
        );
        let api = ManagerApi::new(Arc::clone(&harness.client));

        let summary = api.team_summary(MANAGER).await.unwrap();
        assert_eq!(summary.team_name, "Saka Potatoes");
        assert!((summary.team_value - 101.2).abs() < 1e-9);
        assert!((summary.bank - 1.3).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_transfers_and_picks() {
        let harness = TestHarness::with_fixtures();
        harness.transport.route(
            "entry/7798096/transfers/",
            json!([
                {"element_in": 308, "element_out": 17, "element_in_cost": 130, "event": 2},
            ]),
        );
        harness.transport.route(
            "entry/7798096/event/2/picks/",
            json!({"picks": [{"element": 308, "position": 1}], "entry_history": {"bank": 5}}),
        );
        let api = ManagerApi::new(Arc::clone(&harness.client));

        let transfers = api.transfers(MANAGER).await.unwrap();
        assert_eq!(transfers.len(), 1);
        assert_eq!(transfers[0].i64_field("element_in"), 308);

        let picks = api.picks(MANAGER, 2).await.unwrap();
        assert_eq!(picks.records("picks").len(), 1);
        assert_eq!(picks.record("entry_history").i64_field("bank"), 5);
    }

    #[tokio::test]
    async fn test_history_sections() {
        let harness = TestHarness::with_fixtures();
        harness.transport.route(
            "entry/7798096/history/",
            json!({"current": [{"event": 1, "points": 60}], "past": [], "chips": []}),
        );
        let api = ManagerApi::new(Arc::clone(&harness.client));

        let history = api.history(MANAGER).await.unwrap();
        assert_eq!(history.records("current")[0].i64_field("points"), 60);
        assert!(history.records("past").is_empty());
    }

    #[tokio::test]
    async fn test_unknown_manager_is_error() {
        let harness = TestHarness::with_fixtures();
        let api = ManagerApi::new(Arc::clone(&harness.client));

        assert!(api.info(ManagerId(1)).await.is_err());
    }
}
