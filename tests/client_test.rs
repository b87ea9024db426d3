//! Access-layer behaviour over real HTTP.

mod common;

use common::{client, mount_json, retry};
use fpl_agent::{core::ManualClock, FplError};
use serde_json::json;
use std::{sync::Arc, time::Duration};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

#[tokio::test]
async fn test_server_error_is_retried_then_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/fixtures/"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_json(&server, "fixtures/", json!([{"id": 1}])).await;

    let clock = Arc::new(ManualClock::new());
    let client = client(&server, clock.clone(), retry(3));

    let value = client.get("fixtures/", None, true).await.unwrap();

    assert_eq!(*value, json!([{"id": 1}]));
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
    assert_eq!(clock.sleeps(), vec![Duration::from_secs(2)]);
}

#[tokio::test]
async fn test_rate_limit_cools_down_before_retrying() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_json(&server, "bootstrap-static/", json!({"events": []})).await;

    let clock = Arc::new(ManualClock::new());
    let client = client(&server, clock.clone(), retry(3));

    client.get("bootstrap-static/", None, true).await.unwrap();

    assert_eq!(
        clock.sleeps(),
        vec![Duration::from_secs(5), Duration::from_secs(2)]
    );
}

#[tokio::test]
async fn test_persistent_failure_exhausts_retries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let clock = Arc::new(ManualClock::new());
    let client = client(&server, clock.clone(), retry(2));

    let err = client.get("entry/1/", None, true).await.unwrap_err();

    assert!(matches!(
        err,
        FplError::RetriesExhausted { attempts: 2, .. }
    ));
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
    assert_eq!(client.cache_len(), 0);
}

#[tokio::test]
async fn test_repeat_gets_are_served_from_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/bootstrap-static/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total_players": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server, Arc::new(ManualClock::new()), retry(1));

    let first = client.get("bootstrap-static/", None, true).await.unwrap();
    let second = client.get("/bootstrap-static/", None, true).await.unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(client.cache_len(), 1);
}
