//! One shared client behind every accessor.

use std::sync::Arc;
use tracing::info;

use super::{
    bootstrap::BootstrapApi,
    client::FplClient,
    fixtures::FixturesApi,
    managers::ManagerApi,
    players::PlayerApi,
    types::{Record, ResourceKind},
};
use crate::{config::Settings, Result};

/// The accessors a tool call needs, all sharing one client and cache.
pub struct FplContext {
    pub client: Arc<FplClient>,
    pub bootstrap: BootstrapApi,
    pub players: PlayerApi,
    pub managers: ManagerApi,
    pub fixtures: FixturesApi,
}

impl FplContext {
    pub fn new(client: Arc<FplClient>) -> Self {
        Self {
            bootstrap: BootstrapApi::new(Arc::clone(&client)),
            players: PlayerApi::new(Arc::clone(&client)),
            managers: ManagerApi::new(Arc::clone(&client)),
            fixtures: FixturesApi::new(Arc::clone(&client)),
            client,
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self::new(Arc::new(FplClient::from_settings(settings)?)))
    }

    /// Every record of a kind, fixtures included.
    pub async fn get_all(&self, kind: ResourceKind) -> Result<Vec<Record>> {
        match kind {
            ResourceKind::Fixtures => self.fixtures.all().await,
            _ => self.bootstrap.all(kind).await,
        }
    }

    pub async fn get_by_id(&self, kind: ResourceKind, id: i64) -> Result<Option<Record>> {
        Ok(super::bootstrap::find_by_id(&self.get_all(kind).await?, id))
    }

    /// Forget every cached response and the bootstrap snapshot.
    pub fn clear(&self) {
        self.client.clear_cache();
        self.bootstrap.reset();
        info!("session state cleared");
    }
}
