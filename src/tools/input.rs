//! Tool input normalization.
//!
//! Callers hand tools whatever they have: nothing, a bare scalar, a mapping,
//! or text that may itself be JSON. [`parse_tool_input`] folds all of these
//! into one validated parameter struct, or a displayable error message.

use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{Map, Value};

use crate::cli::types::ManagerId;

/// Raw tool input before normalization.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ToolInput {
    #[default]
    Empty,
    /// A number, boolean or other non-text JSON value.
    Scalar(Value),
    Mapping(Map<String, Value>),
    /// Free text; text opening with `{` or `[` is read as JSON.
    RawText(String),
}

impl ToolInput {
    pub fn text(text: impl Into<String>) -> Self {
        ToolInput::RawText(text.into())
    }
}

impl From<Value> for ToolInput {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => ToolInput::Empty,
            Value::Object(map) => ToolInput::Mapping(map),
            Value::String(text) => ToolInput::RawText(text),
            other => ToolInput::Scalar(other),
        }
    }
}

impl From<&str> for ToolInput {
    fn from(text: &str) -> Self {
        ToolInput::text(text)
    }
}

impl From<Option<String>> for ToolInput {
    fn from(text: Option<String>) -> Self {
        text.map(ToolInput::RawText).unwrap_or_default()
    }
}

/// Key scalars are wrapped under when a tool declares no primary field.
pub const FALLBACK_FIELD: &str = "value";

/// Canonical field name and the aliases accepted for it, in priority order.
pub type Aliases = &'static [(&'static str, &'static [&'static str])];

/// A parameter struct a tool validates its input into.
pub trait ToolParams: DeserializeOwned {
    /// Field a bare scalar or plain string is assigned to.
    const PRIMARY_FIELD: Option<&'static str>;
    const ALIASES: Aliases = &[];
    /// Shown under validation errors.
    const EXAMPLE: Option<&'static str> = None;
}

/// Normalize, resolve aliases, then validate.
pub fn parse_tool_input<T: ToolParams>(input: &ToolInput) -> Result<T, String> {
    let mut fields =
        normalize(input, T::PRIMARY_FIELD).map_err(|message| attach_example(message, T::EXAMPLE))?;
    apply_aliases(&mut fields, T::ALIASES);
    serde_path_to_error::deserialize(Value::Object(fields)).map_err(|err| {
        let field = err.path().to_string();
        validation_error(&field, &err.into_inner().to_string(), T::EXAMPLE)
    })
}

/// Fold any input shape into a key/value mapping.
pub fn normalize(input: &ToolInput, primary_field: Option<&str>) -> Result<Map<String, Value>, String> {
    let wrap = |value: Value| {
        let mut fields = Map::new();
        fields.insert(primary_field.unwrap_or(FALLBACK_FIELD).to_string(), value);
        fields
    };

    match input {
        ToolInput::Empty => Ok(Map::new()),
        ToolInput::Mapping(fields) => Ok(fields.clone()),
        ToolInput::Scalar(value @ (Value::Number(_) | Value::Bool(_))) => Ok(wrap(value.clone())),
        ToolInput::Scalar(Value::Null) => Ok(Map::new()),
        ToolInput::Scalar(Value::Object(fields)) => Ok(fields.clone()),
        ToolInput::Scalar(Value::String(text)) => normalize(&ToolInput::text(text.as_str()), primary_field),
        ToolInput::Scalar(Value::Array(_)) => Err(
            "❌ Unsupported input type. Please provide a JSON object, dictionary, or scalar \
             value (e.g., an ID or name)."
                .to_string(),
        ),
        ToolInput::RawText(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                Ok(Map::new())
            } else if trimmed.starts_with(['{', '[']) {
                match serde_json::from_str::<Value>(trimmed) {
                    Ok(Value::Object(fields)) => Ok(fields),
                    Ok(_) => Err(
                        "❌ Error parsing JSON input: expected an object with key/value pairs."
                            .to_string(),
                    ),
                    Err(err) => Err(json_error(&err)),
                }
            } else {
                Ok(wrap(Value::String(trimmed.to_string())))
            }
        }
    }
}

fn json_error(err: &serde_json::Error) -> String {
    let text = err.to_string();
    let reason = text.split(" at line ").next().unwrap_or(&text);
    format!(
        "❌ Error parsing JSON input: {} (line {}, column {}).",
        reason,
        err.line(),
        err.column()
    )
}

/// Move the first alias present onto its canonical name, unless the
/// canonical name is already set.
pub fn apply_aliases(fields: &mut Map<String, Value>, aliases: Aliases) {
    for (canonical, names) in aliases {
        if fields.contains_key(*canonical) {
            continue;
        }
        if let Some(value) = names.iter().find_map(|alias| fields.remove(*alias)) {
            fields.insert(canonical.to_string(), value);
        }
    }
}

/// `field` is the failing path, `.` when the error is about the whole input.
fn validation_error(field: &str, reason: &str, example: Option<&str>) -> String {
    let missing = reason
        .strip_prefix("missing field `")
        .and_then(|rest| rest.split('`').next());
    let issue = match (missing, field) {
        (Some(missing), _) => format!("• `{missing}` – Field required"),
        (None, ".") => format!("• `input` – {reason}"),
        (None, field) => format!("• `{field}` – {reason}"),
    };
    attach_example(
        format!("❌ Unable to process the provided input.\n\n**Issues detected:**\n{issue}"),
        example,
    )
}

fn attach_example(message: String, example: Option<&str>) -> String {
    match example {
        Some(example) => format!("{message}\n\n**Example Input:**\n```json\n{example}\n```"),
        None => message,
    }
}

/// Deserializers that accept numbers sent as strings (`"7798096"`, `"8.5"`).
pub mod lenient {
    use serde::{de::Error, Deserialize, Deserializer};
    use serde_json::Value;

    fn as_integer(value: &Value) -> Option<i64> {
        match value {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
            Value::String(s) => {
                let s = s.trim();
                s.parse::<i64>().ok().or_else(|| {
                    s.parse::<f64>()
                        .ok()
                        .filter(|f| f.fract() == 0.0)
                        .map(|f| f as i64)
                })
            }
            _ => None,
        }
    }

    fn to_integer<T: TryFrom<i64>, E: Error>(value: &Value) -> Result<T, E> {
        let n = as_integer(value)
            .ok_or_else(|| E::custom(format!("Input should be a valid integer, got {value}")))?;
        T::try_from(n).map_err(|_| E::custom(format!("Input should be a non-negative integer, got {n}")))
    }

    pub fn integer<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: TryFrom<i64>,
    {
        to_integer(&Value::deserialize(deserializer)?)
    }

    pub fn opt_integer<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: TryFrom<i64>,
    {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(None),
            value => to_integer(&value).map(Some),
        }
    }

    pub fn float<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let parsed = match &value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        parsed
            .filter(|f| f.is_finite())
            .ok_or_else(|| D::Error::custom(format!("Input should be a valid number, got {value}")))
    }
}

const PLAYER_ALIASES: &[&str] = &["player_name", "player"];
pub const TEAM_ID_ALIASES: Aliases = &[("team_id", &["manager_id", "entry_id"])];

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlayerSearchParams {
    pub name: String,
}

impl ToolParams for PlayerSearchParams {
    const PRIMARY_FIELD: Option<&'static str> = Some("name");
    const ALIASES: Aliases = &[("name", PLAYER_ALIASES)];
    const EXAMPLE: Option<&'static str> = Some(r#"{"name": "Bukayo Saka"}"#);
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlayerStatsParams {
    pub player_name: String,
}

impl ToolParams for PlayerStatsParams {
    const PRIMARY_FIELD: Option<&'static str> = Some("player_name");
    const ALIASES: Aliases = &[("player_name", &["name", "player"])];
    const EXAMPLE: Option<&'static str> = Some(r#"{"player_name": "Mohamed Salah"}"#);
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlayerComparisonParams {
    pub player1_name: String,
    pub player2_name: String,
}

impl ToolParams for PlayerComparisonParams {
    const PRIMARY_FIELD: Option<&'static str> = None;
    const ALIASES: Aliases = &[
        ("player1_name", &["player1", "first_player"]),
        ("player2_name", &["player2", "second_player"]),
    ];
    const EXAMPLE: Option<&'static str> =
        Some(r#"{"player1_name": "Mohamed Salah", "player2_name": "Bukayo Saka"}"#);
}

fn default_max_price() -> f64 {
    15.0
}

fn default_min_minutes() -> i64 {
    200
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BestPlayersParams {
    pub position: String,
    #[serde(default = "default_max_price", deserialize_with = "lenient::float")]
    pub max_price: f64,
    #[serde(default, deserialize_with = "lenient::float")]
    pub min_price: f64,
    #[serde(default = "default_min_minutes", deserialize_with = "lenient::integer")]
    pub min_minutes: i64,
}

impl ToolParams for BestPlayersParams {
    const PRIMARY_FIELD: Option<&'static str> = Some("position");
    const EXAMPLE: Option<&'static str> =
        Some(r#"{"position": "Midfielder", "max_price": 8.0, "min_minutes": 300}"#);
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GameweekLookupParams {
    #[serde(deserialize_with = "lenient::integer")]
    pub gameweek_number: i64,
}

impl ToolParams for GameweekLookupParams {
    const PRIMARY_FIELD: Option<&'static str> = Some("gameweek_number");
    const ALIASES: Aliases = &[("gameweek_number", &["gameweek", "gw", "number"])];
    const EXAMPLE: Option<&'static str> = Some(r#"{"gameweek_number": 10}"#);
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TeamIdParams {
    #[serde(deserialize_with = "lenient::integer")]
    pub team_id: u64,
}

impl TeamIdParams {
    pub fn manager(&self) -> ManagerId {
        ManagerId::new(self.team_id)
    }
}

impl ToolParams for TeamIdParams {
    const PRIMARY_FIELD: Option<&'static str> = Some("team_id");
    const ALIASES: Aliases = TEAM_ID_ALIASES;
    const EXAMPLE: Option<&'static str> = Some(r#"{"team_id": 7798096}"#);
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TeamIdGameweekParams {
    #[serde(deserialize_with = "lenient::integer")]
    pub team_id: u64,
    #[serde(default, deserialize_with = "lenient::opt_integer")]
    pub gameweek: Option<i64>,
}

impl ToolParams for TeamIdGameweekParams {
    const PRIMARY_FIELD: Option<&'static str> = Some("team_id");
    const ALIASES: Aliases = TEAM_ID_ALIASES;
    const EXAMPLE: Option<&'static str> = Some(r#"{"team_id": 7798096, "gameweek": 5}"#);
}

fn default_limit() -> usize {
    10
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TeamTransfersParams {
    #[serde(deserialize_with = "lenient::integer")]
    pub team_id: u64,
    #[serde(default = "default_limit", deserialize_with = "lenient::integer")]
    pub limit: usize,
}

impl ToolParams for TeamTransfersParams {
    const PRIMARY_FIELD: Option<&'static str> = Some("team_id");
    const ALIASES: Aliases = TEAM_ID_ALIASES;
    const EXAMPLE: Option<&'static str> = Some(r#"{"team_id": 7798096, "limit": 5}"#);
}

fn default_last_n_weeks() -> usize {
    5
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TeamPerformanceParams {
    #[serde(deserialize_with = "lenient::integer")]
    pub team_id: u64,
    #[serde(default = "default_last_n_weeks", deserialize_with = "lenient::integer")]
    pub last_n_weeks: usize,
}

impl ToolParams for TeamPerformanceParams {
    const PRIMARY_FIELD: Option<&'static str> = Some("team_id");
    const ALIASES: Aliases = TEAM_ID_ALIASES;
    const EXAMPLE: Option<&'static str> = Some(r#"{"team_id": 7798096, "last_n_weeks": 5}"#);
}
