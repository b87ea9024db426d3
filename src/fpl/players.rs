//! Player detail endpoints: `element-summary/{id}/` and `event/{gw}/live/`.

use std::sync::Arc;

use super::{client::FplClient, types::Record};
use crate::Result;

const PHOTO_BASE_URL: &str = "https://resources.premierleague.com/premierleague25/photos/players/110x140";

pub struct PlayerApi {
    client: Arc<FplClient>,
}

impl PlayerApi {
    pub fn new(client: Arc<FplClient>) -> Self {
        Self { client }
    }

    /// Fixtures, gameweek history and past seasons for one player.
    pub async fn summary(&self, player_id: i64) -> Result<Record> {
        let data = self
            .client
            .get(&format!("element-summary/{player_id}/"), None, true)
            .await?;
        Ok(Record::from_value(&data))
    }

    /// Remaining fixtures.
    pub async fn fixtures(&self, player_id: i64) -> Result<Vec<Record>> {
        Ok(self.summary(player_id).await?.records("fixtures"))
    }

    /// Gameweek-by-gameweek performances this season.
    pub async fn history(&self, player_id: i64) -> Result<Vec<Record>> {
        Ok(self.summary(player_id).await?.records("history"))
    }

    pub async fn past_seasons(&self, player_id: i64) -> Result<Vec<Record>> {
        Ok(self.summary(player_id).await?.records("history_past"))
    }

    /// Live stats for every player in a gameweek. Never served from cache.
    pub async fn gameweek_live(&self, gameweek: i64) -> Result<Record> {
        let data = self
            .client
            .get(&format!("event/{gameweek}/live/"), None, false)
            .await?;
        Ok(Record::from_value(&data))
    }

    /// 110x140 PNG for a bootstrap player record; empty when it has no photo.
    pub fn photo_url(player: &Record) -> String {
        let photo = player.str_field("photo");
        if photo.is_empty() {
            return String::new();
        }
        let code = photo.split('.').next().unwrap_or(photo);
        format!("{PHOTO_BASE_URL}/{code}.png")
    }
}
