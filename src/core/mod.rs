//! Core request plumbing for the FPL agent
//!
//! - `cache`: in-memory response memoization keyed by request shape
//! - `clock`: time source and sleeper, swappable in tests
//! - `retry`: exponential backoff policy
//! - `http`: transport abstraction and the reqwest-backed implementation

pub mod cache;
pub mod clock;
pub mod http;
pub mod retry;

pub use cache::{CacheKey, ResponseCache};
pub use clock::{Clock, ManualClock, TokioClock};
pub use http::{HttpTransport, QueryParams, Transport};
pub use retry::RetryPolicy;
