//! Shared fakes and fixture payloads for unit tests.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::{
    collections::{HashMap, VecDeque},
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use crate::{
    config::Settings,
    core::{Clock, ManualClock, QueryParams, RetryPolicy, Transport},
    error::FplError,
    fpl::{FplClient, FplContext},
    Result,
};

pub const TEST_BASE_URL: &str = "https://fpl.test/api";

/// One scripted transport outcome.
#[derive(Debug, Clone)]
pub enum Scripted {
    Ok(Value),
    Status(u16),
    RateLimited,
}

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub url: String,
    pub params: Option<Vec<(String, String)>>,
    pub at: Instant,
}

/// In-memory transport. Scripted outcomes are consumed first, in order;
/// after that, routes are matched by URL suffix.
pub struct FakeTransport {
    clock: Arc<ManualClock>,
    script: Mutex<VecDeque<Scripted>>,
    routes: Mutex<HashMap<String, Value>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeTransport {
    pub fn new(clock: Arc<ManualClock>) -> Self {
        Self {
            clock,
            script: Mutex::new(VecDeque::new()),
            routes: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn script(&self, outcomes: impl IntoIterator<Item = Scripted>) {
        self.script.lock().unwrap().extend(outcomes);
    }

    pub fn route(&self, endpoint: &str, body: Value) {
        self.routes
            .lock()
            .unwrap()
            .insert(endpoint.trim_start_matches('/').to_string(), body);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls_to(&self, endpoint: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.url.ends_with(endpoint))
            .count()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn fetch(&self, url: &str, params: Option<&QueryParams>) -> Result<Value> {
        self.calls.lock().unwrap().push(RecordedCall {
            url: url.to_string(),
            params: params.map(|p| p.to_vec()),
            at: self.clock.now(),
        });

        let scripted = self.script.lock().unwrap().pop_front();
        match scripted {
            Some(Scripted::Ok(body)) => Ok(body),
            Some(Scripted::Status(status)) => Err(FplError::Status {
                status,
                url: url.to_string(),
            }),
            Some(Scripted::RateLimited) => Err(FplError::RateLimited {
                url: url.to_string(),
            }),
            None => {
                let routes = self.routes.lock().unwrap();
                routes
                    .iter()
                    .find(|(endpoint, _)| url.ends_with(endpoint.as_str()))
                    .map(|(_, body)| body.clone())
                    .ok_or_else(|| FplError::Status {
                        status: 404,
                        url: url.to_string(),
                    })
            }
        }
    }
}

/// A client over a fake transport with virtual time.
pub struct TestHarness {
    pub clock: Arc<ManualClock>,
    pub transport: Arc<FakeTransport>,
    pub client: Arc<FplClient>,
}

impl TestHarness {
    pub fn new(retry: RetryPolicy, min_interval: Duration) -> Self {
        let clock = Arc::new(ManualClock::new());
        let transport = Arc::new(FakeTransport::new(Arc::clone(&clock)));
        let client = FplClient::builder(transport.clone())
            .base_url(TEST_BASE_URL)
            .clock(clock.clone())
            .retry_policy(retry)
            .min_request_interval(min_interval)
            .rate_limit_cooldown(Duration::from_secs(5))
            .build();

        Self {
            clock,
            transport,
            client: Arc::new(client),
        }
    }

    /// Harness with every standard route mounted and no delays.
    pub fn with_fixtures() -> Self {
        let harness = Self::new(RetryPolicy::no_delay(1), Duration::ZERO);
        harness.transport.route("bootstrap-static/", bootstrap_fixture());
        harness.transport.route("fixtures/", fixtures_fixture());
        harness
    }

    pub fn context(&self) -> FplContext {
        FplContext::new(Arc::clone(&self.client))
    }
}

pub fn test_settings() -> Settings {
    Settings {
        base_url: TEST_BASE_URL.to_string(),
        ..Settings::default()
    }
}

#[allow(clippy::too_many_arguments)]
pub fn player(
    id: i64,
    first: &str,
    second: &str,
    team: i64,
    element_type: i64,
    now_cost: i64,
    total_points: i64,
    minutes: i64,
) -> Value {
    json!({
        "id": id,
        "first_name": first,
        "second_name": second,
        "web_name": second,
        "team": team,
        "element_type": element_type,
        "now_cost": now_cost,
        "total_points": total_points,
        "minutes": minutes,
        "form": "5.0",
        "points_per_game": "6.1",
        "selected_by_percent": "20.3",
        "goals_scored": 10,
        "assists": 7,
        "clean_sheets": 4,
        "ict_index": "150.2",
        "photo": format!("{id}00.jpg"),
    })
}

pub fn bootstrap_fixture() -> Value {
    json!({
        "elements": [
            player(308, "Mohamed", "Salah", 12, 3, 130, 210, 2800),
            player(17, "Bukayo", "Saka", 1, 3, 100, 180, 2600),
            player(401, "Erling", "Haaland", 13, 4, 145, 230, 2700),
            player(1, "David", "Raya Martin", 1, 1, 55, 120, 3000),
            player(5, "William", "Saliba", 1, 2, 60, 140, 3100),
            player(16, "Martin", "Ødegaard", 1, 3, 85, 95, 1900),
        ],
        "teams": [
            {"id": 1, "name": "Arsenal", "short_name": "ARS"},
            {"id": 12, "name": "Liverpool", "short_name": "LIV"},
            {"id": 13, "name": "Man City", "short_name": "MCI"},
        ],
        "events": [
            {"id": 1, "name": "Gameweek 1", "deadline_time": "2024-08-16T17:30:00Z", "finished": true,
             "is_current": false, "is_next": false, "average_entry_score": 57, "highest_score": 127},
            {"id": 2, "name": "Gameweek 2", "deadline_time": "2024-08-24T10:00:00Z", "finished": true,
             "is_current": true, "is_next": false, "average_entry_score": 48, "highest_score": 131},
            {"id": 3, "name": "Gameweek 3", "deadline_time": "2024-08-31T10:00:00Z", "finished": false,
             "is_current": false, "is_next": true, "average_entry_score": 0, "highest_score": null},
            {"id": 4, "name": "Gameweek 4", "deadline_time": "2024-09-14T10:00:00Z", "finished": false,
             "is_current": false, "is_next": false, "average_entry_score": 0, "highest_score": null},
        ],
        "element_types": [
            {"id": 1, "singular_name": "Goalkeeper", "singular_name_short": "GKP"},
            {"id": 2, "singular_name": "Defender", "singular_name_short": "DEF"},
            {"id": 3, "singular_name": "Midfielder", "singular_name_short": "MID"},
            {"id": 4, "singular_name": "Forward", "singular_name_short": "FWD"},
        ],
        "game_settings": {"squad_squadsize": 15},
        "total_players": 10_500_000,
    })
}

pub fn fixtures_fixture() -> Value {
    json!([
        {"id": 1, "event": 1, "team_h": 1, "team_a": 12, "finished": true},
        {"id": 2, "event": 2, "team_h": 13, "team_a": 1, "finished": true},
        {"id": 3, "event": 3, "team_h": 12, "team_a": 13, "finished": false},
        {"id": 4, "event": 4, "team_h": 1, "team_a": 13, "finished": false},
        {"id": 5, "event": 5, "team_h": 12, "team_a": 1, "finished": false},
        {"id": 6, "event": null, "team_h": 13, "team_a": 12, "finished": false},
    ])
}
