//! ID types for FPL entities.

use crate::error::{FplError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe wrapper for an FPL manager (entry) ID.
///
/// The number shown in the URL of a manager's "Points" page, e.g.
/// `https://fantasy.premierleague.com/entry/7798096/event/3`.
///
/// # Examples
///
/// ```rust
/// use fpl_agent::ManagerId;
///
/// let manager = ManagerId::new(7798096);
/// assert_eq!(manager.as_u64(), 7798096);
/// assert_eq!(manager.to_string(), "7798096");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ManagerId(pub u64);

impl ManagerId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ManagerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ManagerId {
    type Err = FplError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.trim().parse()?))
    }
}
