//! Record views over FPL API JSON.
//!
//! The API's entities (players, teams, gameweeks, fixtures, picks, transfers)
//! are passed through as [`Record`]s: the raw JSON object plus lenient typed
//! readers. Missing or mistyped fields read as zero, empty string or `false`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{fmt, str::FromStr};


/// Currency on the API is stored in tenths of a million.
pub const PRICE_SCALE: f64 = 10.0;

pub fn to_millions(tenths: i64) -> f64 {
    tenths as f64 / PRICE_SCALE
}

/// One API entity, unknown fields preserved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(pub Map<String, Value>);

impl Record {
    /// Wrap a JSON value; non-objects become an empty record.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self(map.clone()),
            _ => Self::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field).filter(|v| !v.is_null())
    }

    pub fn has(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn id(&self) -> i64 {
        self.i64_field("id")
    }

    /// Integer field; numeric strings and whole floats are accepted.
    pub fn i64_field(&self, field: &str) -> i64 {
        match self.get(field) {
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .unwrap_or(0),
            Some(Value::String(s)) => s.trim().parse::<f64>().map(|f| f as i64).unwrap_or(0),
            Some(Value::Bool(b)) => i64::from(*b),
            _ => 0,
        }
    }

    /// Optional integer: `None` when the field is absent or null.
    pub fn opt_i64(&self, field: &str) -> Option<i64> {
        self.get(field).map(|_| self.i64_field(field))
    }

    /// Float field; the API sends many decimals as strings (`"form": "5.2"`).
    pub fn f64_field(&self, field: &str) -> f64 {
        match self.get(field) {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
            _ => 0.0,
        }
    }

    pub fn str_field(&self, field: &str) -> &str {
        self.get(field).and_then(Value::as_str).unwrap_or("")
    }

    /// Field rendered for display regardless of JSON type, `"N/A"` when absent.
    pub fn display_field(&self, field: &str) -> String {
        match self.get(field) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => "N/A".to_string(),
        }
    }

    pub fn bool_field(&self, field: &str) -> bool {
        match self.get(field) {
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_i64().unwrap_or(0) != 0,
            _ => false,
        }
    }

    /// Array field as records; absent or non-array reads as empty.
    pub fn records(&self, field: &str) -> Vec<Record> {
        records_from(self.get(field))
    }

    /// Nested object field; absent reads as an empty record.
    pub fn record(&self, field: &str) -> Record {
        self.get(field).map(Record::from_value).unwrap_or_default()
    }

    /// `first_name second_name`, as players are searched and shown.
    pub fn display_name(&self) -> String {
        format!(
            "{} {}",
            self.str_field("first_name"),
            self.str_field("second_name")
        )
        .trim()
        .to_string()
    }

    /// `now_cost` in millions.
    pub fn price(&self) -> f64 {
        to_millions(self.i64_field("now_cost"))
    }

    /// Total points per million of price; zero for free players.
    pub fn points_per_million(&self) -> f64 {
        let price = self.price();
        if price > 0.0 {
            self.i64_field("total_points") as f64 / price
        } else {
            0.0
        }
    }
}

/// Collect array elements into records.
pub fn records_from(value: Option<&Value>) -> Vec<Record> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().map(Record::from_value).collect())
        .unwrap_or_default()
}

/// Collections exposed by the accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Players,
    Teams,
    Gameweeks,
    Positions,
    Fixtures,
}

impl ResourceKind {
    /// Key inside the bootstrap payload, or `None` for kinds with their own endpoint.
    pub fn bootstrap_key(&self) -> Option<&'static str> {
        match self {
            ResourceKind::Players => Some("elements"),
            ResourceKind::Teams => Some("teams"),
            ResourceKind::Gameweeks => Some("events"),
            ResourceKind::Positions => Some("element_types"),
            ResourceKind::Fixtures => None,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ResourceKind::Players => "players",
            ResourceKind::Teams => "teams",
            ResourceKind::Gameweeks => "gameweeks",
            ResourceKind::Positions => "positions",
            ResourceKind::Fixtures => "fixtures",
        };
        write!(f, "{}", s)
    }
}

/// FPL squad positions, keyed by `element_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Position {
    Goalkeeper = 1,
    Defender = 2,
    Midfielder = 3,
    Forward = 4,
}

impl Position {
    pub const ALL: [Position; 4] = [
        Position::Goalkeeper,
        Position::Defender,
        Position::Midfielder,
        Position::Forward,
    ];

    pub fn element_type(&self) -> i64 {
        *self as i64
    }

    pub fn from_element_type(element_type: i64) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.element_type() == element_type)
    }

    pub fn plural(&self) -> &'static str {
        match self {
            Position::Goalkeeper => "Goalkeepers",
            Position::Defender => "Defenders",
            Position::Midfielder => "Midfielders",
            Position::Forward => "Forwards",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Position::Goalkeeper => "Goalkeeper",
            Position::Defender => "Defender",
            Position::Midfielder => "Midfielder",
            Position::Forward => "Forward",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidPosition(pub String);

impl fmt::Display for InvalidPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid position '{}'. Use: Goalkeeper, Defender, Midfielder, or Forward",
            self.0
        )
    }
}

impl std::error::Error for InvalidPosition {}

impl FromStr for Position {
    type Err = InvalidPosition;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "goalkeeper" | "goalkeepers" | "gk" | "gkp" | "keeper" => Ok(Position::Goalkeeper),
            "defender" | "defenders" | "def" => Ok(Position::Defender),
            "midfielder" | "midfielders" | "mid" => Ok(Position::Midfielder),
            "forward" | "forwards" | "fwd" | "striker" | "strikers" => Ok(Position::Forward),
            _ => Err(InvalidPosition(s.to_string())),
        }
    }
}

/// Headline numbers for a manager's entry, currency in millions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamSummary {
    pub team_id: i64,
    pub team_name: String,
    pub manager_name: String,
    pub total_points: i64,
    pub overall_rank: i64,
    pub current_gameweek: i64,
    pub team_value: f64,
    pub bank: f64,
    pub total_transfers: i64,
}

impl TeamSummary {
    /// Reshape the `entry/{id}/` payload.
    pub fn from_entry(info: &Record) -> Self {
        Self {
            team_id: info.id(),
            team_name: info.str_field("name").to_string(),
            manager_name: format!(
                "{} {}",
                info.str_field("player_first_name"),
                info.str_field("player_last_name")
            )
            .trim()
            .to_string(),
            total_points: info.i64_field("summary_overall_points"),
            overall_rank: info.i64_field("summary_overall_rank"),
            current_gameweek: info.i64_field("current_event"),
            team_value: to_millions(info.i64_field("last_deadline_value")),
            bank: to_millions(info.i64_field("last_deadline_bank")),
            total_transfers: info.i64_field("last_deadline_total_transfers"),
        }
    }
}
