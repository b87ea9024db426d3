//! Shared helpers for integration tests: a wiremock FPL API and a client
//! pointed at it with virtual time.

#![allow(dead_code)]

use fpl_agent::{
    core::{HttpTransport, ManualClock, RetryPolicy},
    FplClient,
};
use serde_json::{json, Value};
use std::{sync::Arc, time::Duration};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

pub fn retry(max_attempts: u32) -> RetryPolicy {
    RetryPolicy {
        max_attempts,
        base_delay: Duration::from_secs(2),
        multiplier: 2.0,
        max_delay: Duration::from_secs(10),
    }
}

pub fn client(server: &MockServer, clock: Arc<ManualClock>, retry: RetryPolicy) -> FplClient {
    let transport = HttpTransport::new("fpl-agent-test/0.1", Duration::from_secs(5)).unwrap();
    FplClient::builder(Arc::new(transport))
        .base_url(format!("{}/api", server.uri()))
        .clock(clock)
        .retry_policy(retry)
        .min_request_interval(Duration::ZERO)
        .rate_limit_cooldown(Duration::from_secs(5))
        .build()
}

pub async fn mount_json(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/api/{}", route.trim_start_matches('/'))))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub fn player(
    id: i64,
    name: &str,
    element_type: i64,
    now_cost: i64,
    total_points: i64,
    minutes: i64,
) -> Value {
    json!({
        "id": id,
        "first_name": "",
        "second_name": name,
        "web_name": name,
        "team": 1,
        "element_type": element_type,
        "now_cost": now_cost,
        "total_points": total_points,
        "minutes": minutes,
        "form": "4.5",
        "selected_by_percent": "3.2",
    })
}

/// Bootstrap payload around `elements`, with gameweek 1 current.
pub fn bootstrap(elements: Vec<Value>) -> Value {
    json!({
        "elements": elements,
        "teams": [{"id": 1, "name": "Arsenal", "short_name": "ARS"}],
        "events": [
            {"id": 1, "name": "Gameweek 1", "deadline_time": "2025-08-15T17:30:00Z",
             "finished": false, "is_current": true, "is_next": false},
            {"id": 2, "name": "Gameweek 2", "deadline_time": "2025-08-22T17:30:00Z",
             "finished": false, "is_current": false, "is_next": true},
        ],
        "element_types": [
            {"id": 1, "singular_name": "Goalkeeper"},
            {"id": 2, "singular_name": "Defender"},
            {"id": 3, "singular_name": "Midfielder"},
            {"id": 4, "singular_name": "Forward"},
        ],
        "total_players": 11_000_000,
    })
}
