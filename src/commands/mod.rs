//! Command implementations for the FPL agent CLI

pub mod list;
pub mod shell;
pub mod tool;


use serde_json::{json, Map, Value};

use crate::{
    cli::types::ManagerId,
    error::FplError,
    tools::{input::TEAM_ID_ALIASES, ToolInput, ToolName},
    Result, TEAM_ID_ENV_VAR,
};

/// Team ID from the flag, else from `FPL_TEAM_ID`.
pub fn resolve_team_id(team_id: Option<ManagerId>) -> Result<ManagerId> {
    resolve_team_id_with(team_id, |key| std::env::var(key).ok())
}

pub(crate) fn resolve_team_id_with<F>(team_id: Option<ManagerId>, lookup: F) -> Result<ManagerId>
where
    F: Fn(&str) -> Option<String>,
{
    team_id
        .or_else(|| lookup(TEAM_ID_ENV_VAR).and_then(|s| s.parse::<ManagerId>().ok()))
        .ok_or_else(|| FplError::MissingTeamId {
            env_var: TEAM_ID_ENV_VAR.to_string(),
        })
}

/// Build a tool's input. Team tools fall back to `team_id` when given
/// nothing, or a JSON object that names no team.
pub fn tool_input(tool: ToolName, raw: Option<&str>, team_id: Option<ManagerId>) -> ToolInput {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty());
    let default_team = team_id.filter(|_| tool.takes_team_id());
    match (raw, default_team) {
        (None, Some(id)) => json!({ "team_id": id.as_u64() }).into(),
        (None, None) => ToolInput::Empty,
        (Some(text), Some(id)) => match serde_json::from_str::<Map<String, Value>>(text) {
            Ok(mut fields) if !names_team(&fields) => {
                fields.insert("team_id".to_string(), json!(id.as_u64()));
                ToolInput::Mapping(fields)
            }
            _ => ToolInput::text(text),
        },
        (Some(text), None) => ToolInput::text(text),
    }
}

fn names_team(fields: &Map<String, Value>) -> bool {
    TEAM_ID_ALIASES.iter().any(|(canonical, aliases)| {
        fields.contains_key(*canonical) || aliases.iter().any(|alias| fields.contains_key(*alias))
    })
}
