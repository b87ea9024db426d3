//! Text helpers shared by tool renderers.

use std::collections::HashMap;

use crate::fpl::{Position, Record};

/// `1234567` -> `1,234,567`.
pub fn thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if n < 0 {
        out.insert(0, '-');
    }
    out
}

/// Whole-unit currency, one decimal: `£13.0m`.
pub fn money(millions: f64) -> String {
    format!("£{millions:.1}m")
}

pub fn position_name(element_type: i64) -> String {
    Position::from_element_type(element_type)
        .map(|p| p.to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

pub fn position_emoji(position: Position) -> &'static str {
    match position {
        Position::Goalkeeper => "🥅",
        Position::Defender => "🛡️",
        Position::Midfielder => "⚽",
        Position::Forward => "⚡",
    }
}

/// Records keyed by `id`.
pub fn index_by_id(records: Vec<Record>) -> HashMap<i64, Record> {
    records.into_iter().map(|r| (r.id(), r)).collect()
}

/// Short club code (`ARS`), `UNK` when the team is not known.
pub fn team_short_name(teams: &HashMap<i64, Record>, team_id: i64) -> String {
    teams
        .get(&team_id)
        .map(|t| t.str_field("short_name"))
        .filter(|name| !name.is_empty())
        .unwrap_or("UNK")
        .to_string()
}

pub fn team_name(teams: &HashMap<i64, Record>, team_id: i64) -> String {
    teams
        .get(&team_id)
        .map(|t| t.str_field("name").to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| format!("Team {team_id}"))
}

/// Arithmetic mean, zero for an empty slice.
pub fn mean(values: &[i64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<i64>() as f64 / values.len() as f64
    }
}

/// Last `n` items, oldest first.
pub fn last_n<T>(items: &[T], n: usize) -> &[T] {
    &items[items.len().saturating_sub(n)..]
}
