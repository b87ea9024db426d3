//! Fantasy Premier League API: the caching client and its resource accessors.

pub mod bootstrap;
pub mod client;
pub mod context;
pub mod fixtures;
pub mod managers;
pub mod players;
pub mod types;

pub use client::{FplClient, FplClientBuilder};
pub use context::FplContext;
pub use types::{Position, Record, ResourceKind, TeamSummary};
