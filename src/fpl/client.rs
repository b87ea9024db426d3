//! FPL API access layer: caching, retry with backoff, and a single-lane rate limiter.

use serde_json::Value;
use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::Mutex;
use tracing::{debug, error, info, trace, warn};

use crate::{
    config::Settings,
    core::{CacheKey, Clock, HttpTransport, QueryParams, ResponseCache, RetryPolicy, TokioClock, Transport},
    error::FplError,
    Result,
};


/// Read-only client for the FPL REST API.
///
/// All live requests go through one lane: the lane mutex holds the dispatch
/// time of the previous request, so consecutive requests from this client are
/// spaced by at least the minimum interval and a cache miss re-checks the
/// cache before fetching.
pub struct FplClient {
    base_url: String,
    transport: Arc<dyn Transport>,
    clock: Arc<dyn Clock>,
    cache: ResponseCache,
    cache_enabled: bool,
    retry: RetryPolicy,
    min_request_interval: Duration,
    rate_limit_cooldown: Duration,
    lane: Mutex<Option<Instant>>,
}

/// Fluent construction of an [`FplClient`] around any transport.
pub struct FplClientBuilder {
    base_url: String,
    transport: Arc<dyn Transport>,
    clock: Arc<dyn Clock>,
    cache_enabled: bool,
    cache_ttl: Option<Duration>,
    retry: RetryPolicy,
    min_request_interval: Duration,
    rate_limit_cooldown: Duration,
}

impl FplClientBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn cache_enabled(mut self, enabled: bool) -> Self {
        self.cache_enabled = enabled;
        self
    }

    pub fn cache_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn min_request_interval(mut self, interval: Duration) -> Self {
        self.min_request_interval = interval;
        self
    }

    pub fn rate_limit_cooldown(mut self, cooldown: Duration) -> Self {
        self.rate_limit_cooldown = cooldown;
        self
    }

    pub fn build(self) -> FplClient {
        FplClient {
            base_url: self.base_url.trim_end_matches('/').to_string(),
            transport: self.transport,
            clock: self.clock,
            cache: ResponseCache::new(self.cache_ttl),
            cache_enabled: self.cache_enabled,
            retry: self.retry,
            min_request_interval: self.min_request_interval,
            rate_limit_cooldown: self.rate_limit_cooldown,
            lane: Mutex::new(None),
        }
    }
}

impl FplClient {
    pub fn builder(transport: Arc<dyn Transport>) -> FplClientBuilder {
        let defaults = Settings::default();
        FplClientBuilder {
            base_url: defaults.base_url.clone(),
            transport,
            clock: Arc::new(TokioClock),
            cache_enabled: defaults.enable_cache,
            cache_ttl: defaults.cache_ttl(),
            retry: defaults.retry_policy(),
            min_request_interval: defaults.min_request_interval(),
            rate_limit_cooldown: defaults.rate_limit_cooldown(),
        }
    }

    /// Build a client talking HTTP to `settings.base_url`.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let transport = HttpTransport::new(&settings.user_agent, settings.request_timeout())?;
        Ok(Self::builder(Arc::new(transport))
            .base_url(settings.base_url.clone())
            .cache_enabled(settings.enable_cache)
            .cache_ttl(settings.cache_ttl())
            .retry_policy(settings.retry_policy())
            .min_request_interval(settings.min_request_interval())
            .rate_limit_cooldown(settings.rate_limit_cooldown())
            .build())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    /// GET `endpoint`, memoized by `(endpoint, params)` when `use_cache` is
    /// set and caching is enabled.
    pub async fn get(
        &self,
        endpoint: &str,
        params: Option<&QueryParams>,
        use_cache: bool,
    ) -> Result<Arc<Value>> {
        if !(use_cache && self.cache_enabled) {
            let mut last_request = self.lane.lock().await;
            return self
                .request(&mut last_request, endpoint, params)
                .await
                .map(Arc::new);
        }

        let key = CacheKey::new(endpoint, params);
        if let Some(hit) = self.cache.get(&key, self.clock.now()) {
            trace!(endpoint, "cache hit");
            return Ok(hit);
        }

        let mut last_request = self.lane.lock().await;
        // another caller may have filled it while we waited for the lane
        if let Some(hit) = self.cache.get(&key, self.clock.now()) {
            trace!(endpoint, "cache hit after waiting for lane");
            return Ok(hit);
        }

        trace!(endpoint, "cache miss");
        let value = Arc::new(self.request(&mut last_request, endpoint, params).await?);
        self.cache.put(key, Arc::clone(&value), self.clock.now());
        Ok(value)
    }

    /// Live request with retry. Caller must hold the lane.
    async fn request(
        &self,
        last_request: &mut Option<Instant>,
        endpoint: &str,
        params: Option<&QueryParams>,
    ) -> Result<Value> {
        let url = self.url_for(endpoint);
        let mut attempt = 1;

        loop {
            self.wait_for_slot(*last_request).await;
            *last_request = Some(self.clock.now());
            debug!(%url, attempt, "requesting");

            let err = match self.transport.fetch(&url, params).await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_retryable() => err,
                Err(err) => return Err(err),
            };

            if attempt >= self.retry.max_attempts {
                error!(%url, attempts = attempt, error = %err, "giving up");
                return Err(FplError::RetriesExhausted {
                    url,
                    attempts: attempt,
                    source: Box::new(err),
                });
            }

            if matches!(err, FplError::RateLimited { .. }) {
                warn!(%url, cooldown = ?self.rate_limit_cooldown, "rate limited; cooling down");
                self.clock.sleep(self.rate_limit_cooldown).await;
            }

            let delay = self.retry.delay_for(attempt);
            warn!(%url, attempt, error = %err, ?delay, "request failed; retrying");
            self.clock.sleep(delay).await;
            attempt += 1;
        }
    }

    async fn wait_for_slot(&self, last_request: Option<Instant>) {
        let Some(last) = last_request else {
            return;
        };
        let elapsed = self.clock.now().saturating_duration_since(last);
        if elapsed < self.min_request_interval {
            self.clock.sleep(self.min_request_interval - elapsed).await;
        }
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
        info!("cache cleared");
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    pub fn cache_enabled(&self) -> bool {
        self.cache_enabled
    }
}
