//! Fixture list accessors over `fixtures/`.

use std::{collections::BTreeSet, sync::Arc};

use super::{
    client::FplClient,
    types::{records_from, Record},
};
use crate::Result;

pub const FIXTURES_ENDPOINT: &str = "fixtures/";

pub fn in_gameweek(fixtures: &[Record], gameweek: i64) -> Vec<Record> {
    fixtures
        .iter()
        .filter(|f| f.opt_i64("event") == Some(gameweek))
        .cloned()
        .collect()
}

pub fn for_team(fixtures: &[Record], team_id: i64, upcoming_only: bool) -> Vec<Record> {
    fixtures
        .iter()
        .filter(|f| f.i64_field("team_h") == team_id || f.i64_field("team_a") == team_id)
        .filter(|f| !upcoming_only || !f.bool_field("finished"))
        .cloned()
        .collect()
}

/// Unfinished fixtures in the next `num_gameweeks` distinct scheduled gameweeks.
/// Fixtures without a gameweek (postponed) are skipped.
pub fn upcoming(fixtures: &[Record], num_gameweeks: usize) -> Vec<Record> {
    let unfinished: Vec<&Record> = fixtures.iter().filter(|f| !f.bool_field("finished")).collect();
    let gameweeks: BTreeSet<i64> = unfinished
        .iter()
        .filter_map(|f| f.opt_i64("event"))
        .filter(|gw| *gw > 0)
        .collect();
    let window: BTreeSet<i64> = gameweeks.into_iter().take(num_gameweeks).collect();

    unfinished
        .into_iter()
        .filter(|f| f.opt_i64("event").is_some_and(|gw| window.contains(&gw)))
        .cloned()
        .collect()
}

pub struct FixturesApi {
    client: Arc<FplClient>,
}

impl FixturesApi {
    pub fn new(client: Arc<FplClient>) -> Self {
        Self { client }
    }

    /// Every fixture of the season in source order.
    pub async fn all(&self) -> Result<Vec<Record>> {
        let data = self.client.get(FIXTURES_ENDPOINT, None, true).await?;
        Ok(records_from(Some(&data)))
    }

    pub async fn by_gameweek(&self, gameweek: i64) -> Result<Vec<Record>> {
        Ok(in_gameweek(&self.all().await?, gameweek))
    }

    pub async fn by_team(&self, team_id: i64, upcoming_only: bool) -> Result<Vec<Record>> {
        Ok(for_team(&self.all().await?, team_id, upcoming_only))
    }

    pub async fn upcoming(&self, num_gameweeks: usize) -> Result<Vec<Record>> {
        Ok(upcoming(&self.all().await?, num_gameweeks))
    }
}
