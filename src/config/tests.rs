use super::*;
use std::{collections::HashMap, fs};
use tempfile::tempdir;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_defaults() {
    let settings = Settings::default();

    assert_eq!(settings.base_url, DEFAULT_BASE_URL);
    assert!(settings.enable_cache);
    assert_eq!(settings.cache_ttl(), None);
    assert_eq!(settings.request_timeout(), Duration::from_secs(10));
    assert_eq!(settings.min_request_interval(), Duration::from_millis(500));
    assert_eq!(settings.max_attempts, 3);
    assert!(settings.validate().is_ok());
}

#[test]
fn test_retry_policy_from_settings() {
    let settings = Settings {
        max_attempts: 5,
        backoff_base_ms: 100,
        backoff_multiplier: 3.0,
        backoff_max_ms: 1_000,
        ..Settings::default()
    };

    let policy = settings.retry_policy();
    assert_eq!(policy.max_attempts, 5);
    assert_eq!(policy.base_delay, Duration::from_millis(100));
    assert_eq!(policy.max_delay, Duration::from_secs(1));
    assert_eq!(policy.multiplier, 3.0);
}

#[test]
fn test_partial_toml_keeps_defaults() {
    let settings = Settings::from_toml_str(
        r#"
        base_url = "http://localhost:9000/api"
        enable_cache = false
        cache_ttl_secs = 900
        "#,
    )
    .unwrap();

    assert_eq!(settings.base_url, "http://localhost:9000/api");
    assert!(!settings.enable_cache);
    assert_eq!(settings.cache_ttl(), Some(Duration::from_secs(900)));
    assert_eq!(settings.max_attempts, 3);
    assert_eq!(settings.user_agent, "FPL-Agent/1.0");
}

#[test]
fn test_malformed_toml_is_error() {
    let result = Settings::from_toml_str("max_attempts = \"lots\"");
    assert!(matches!(result, Err(FplError::Toml(_))));
}

#[test]
fn test_env_overrides() {
    let mut settings = Settings::default();
    settings
        .apply_env(lookup_from(&[
            ("FPL_BASE_URL", "http://127.0.0.1:1234"),
            ("FPL_ENABLE_CACHE", "false"),
            ("FPL_MAX_ATTEMPTS", "5"),
            ("FPL_BACKOFF_MULTIPLIER", "1.5"),
            ("FPL_MIN_REQUEST_INTERVAL_MS", "0"),
            ("FPL_LOG_LEVEL", "debug"),
        ]))
        .unwrap();

    assert_eq!(settings.base_url, "http://127.0.0.1:1234");
    assert!(!settings.enable_cache);
    assert_eq!(settings.max_attempts, 5);
    assert_eq!(settings.backoff_multiplier, 1.5);
    assert_eq!(settings.min_request_interval(), Duration::ZERO);
    assert_eq!(settings.log_level, "debug");
}

#[test]
fn test_zero_ttl_env_disables_expiry() {
    let mut settings = Settings {
        cache_ttl_secs: Some(60),
        ..Settings::default()
    };
    settings
        .apply_env(lookup_from(&[("FPL_CACHE_TTL_SECS", "0")]))
        .unwrap();

    assert_eq!(settings.cache_ttl(), None);
}

#[test]
fn test_zero_ttl_in_file_disables_expiry() {
    let settings = Settings::from_toml_str("cache_ttl_secs = 0").unwrap();
    assert_eq!(settings.cache_ttl_secs, None);
    assert_eq!(settings.cache_ttl(), None);

    let literal = Settings {
        cache_ttl_secs: Some(0),
        ..Settings::default()
    };
    assert_eq!(literal.cache_ttl(), None);
}

#[test]
fn test_invalid_env_value_names_variable() {
    let mut settings = Settings::default();
    let err = settings
        .apply_env(lookup_from(&[("FPL_MAX_ATTEMPTS", "three")]))
        .unwrap_err();

    match err {
        FplError::Config { message } => assert!(message.contains("FPL_MAX_ATTEMPTS")),
        other => panic!("Expected Config error, got {other:?}"),
    }
}

#[test]
fn test_validate_rejects_zero_attempts() {
    let settings = Settings {
        max_attempts: 0,
        ..Settings::default()
    };
    assert!(matches!(settings.validate(), Err(FplError::Config { .. })));
}

#[test]
fn test_validate_rejects_shrinking_backoff() {
    let settings = Settings {
        backoff_multiplier: 0.5,
        ..Settings::default()
    };
    assert!(settings.validate().is_err());
}

#[test]
fn test_load_explicit_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "request_timeout_secs = 3\nuser_agent = \"test-agent\"\n").unwrap();

    let settings = Settings::load(Some(&path)).unwrap();
    assert_eq!(settings.request_timeout(), Duration::from_secs(3));
    assert_eq!(settings.user_agent, "test-agent");
}

#[test]
fn test_load_missing_explicit_file_is_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing.toml");

    let err = Settings::load(Some(&path)).unwrap_err();
    assert!(err.to_string().contains("config file not found"));
}

#[test]
fn test_default_config_path() {
    let path = default_config_path();
    let path_str = path.to_string_lossy();

    assert!(path_str.contains("fpl-agent"));
    assert!(path_str.ends_with("config.toml"));
}
