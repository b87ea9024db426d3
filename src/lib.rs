//! Fantasy Premier League Assistant Library
//!
//! Read-only access to the public Fantasy Premier League API, plus a set of
//! named tools that turn loosely-shaped input into readable answers about
//! players, gameweeks and a manager's own team.
//!
//! ## Features
//!
//! - **Resilient Access**: memoized GETs with retry, backoff and request spacing
//! - **Resource Accessors**: players, teams, gameweeks, fixtures and manager entries
//! - **Forgiving Tools**: bare values, JSON text or mappings are all accepted as input
//! - **Interactive Shell**: a session that remembers your team ID
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fpl_agent::{invoke_tool, FplContext, Settings, ToolInput, ToolName};
//!
//! # async fn example() -> fpl_agent::Result<()> {
//! let ctx = FplContext::from_settings(&Settings::load(None)?)?;
//! let answer = invoke_tool(
//!     &ctx,
//!     ToolName::FindBestPlayersByPosition,
//!     &ToolInput::text(r#"{"position": "midfielder", "max_price": 8.0}"#),
//! )
//! .await;
//! println!("{answer}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! Set your FPL team ID so team tools work without arguments:
//! ```bash
//! export FPL_TEAM_ID=1234567
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod fpl;
pub mod tools;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use cli::types::ManagerId;
pub use config::Settings;
pub use error::{FplError, Result};
pub use fpl::{FplClient, FplContext, Position, Record, ResourceKind};
pub use tools::{invoke_tool, ToolInput, ToolName};

pub const TEAM_ID_ENV_VAR: &str = "FPL_TEAM_ID";
