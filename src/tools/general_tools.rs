//! Gameweek and season information.

use super::{
    failure,
    format::thousands,
    input::{parse_tool_input, GameweekLookupParams, ToolInput},
};
use crate::fpl::{bootstrap::find_flagged, FplContext, Record};

fn deadline(gameweek: &Record) -> String {
    gameweek.display_field("deadline_time")
}

pub async fn get_current_gameweek_info(ctx: &FplContext) -> String {
    let current = match ctx.bootstrap.current_gameweek().await {
        Ok(Some(gw)) => gw,
        Ok(None) => {
            return "No current gameweek found. The season may not have started or may be finished."
                .to_string()
        }
        Err(err) => return failure("fetching the current gameweek", &err),
    };

    let average = current.i64_field("average_entry_score");
    let status = if current.bool_field("finished") {
        "Finished"
    } else if average > 0 {
        "In Progress"
    } else {
        "Upcoming"
    };

    let mut lines = vec![
        format!("**Current Gameweek: {}**", current.id()),
        format!("- Name: {}", current.display_field("name")),
        format!("- Deadline: {}", deadline(&current)),
        format!("- Status: {status}"),
    ];
    if average > 0 {
        lines.push(format!("- Average Score: {average} points"));
        lines.push(format!(
            "- Highest Score: {} points",
            current.i64_field("highest_score")
        ));
    }
    lines.join("\n")
}

pub async fn get_next_gameweek_info(ctx: &FplContext) -> String {
    match ctx.bootstrap.next_gameweek().await {
        Ok(Some(next)) => [
            format!("**Next Gameweek: {}**", next.id()),
            format!("- Name: {}", next.display_field("name")),
            format!("- Deadline: {}", deadline(&next)),
            "- Status: Upcoming".to_string(),
        ]
        .join("\n"),
        Ok(None) => "No next gameweek found. This may be the end of the season.".to_string(),
        Err(err) => failure("fetching the next gameweek", &err),
    }
}

pub async fn get_gameweek_by_number(ctx: &FplContext, input: &ToolInput) -> String {
    let params = match parse_tool_input::<GameweekLookupParams>(input) {
        Ok(params) => params,
        Err(message) => return message,
    };
    let gameweek = match ctx.bootstrap.gameweeks().await {
        Ok(gameweeks) => gameweeks
            .into_iter()
            .find(|gw| gw.id() == params.gameweek_number),
        Err(err) => return failure("fetching gameweeks", &err),
    };
    let Some(gw) = gameweek else {
        return format!(
            "Gameweek {} not found. Valid gameweeks are 1-38.",
            params.gameweek_number
        );
    };

    let status = if gw.bool_field("is_current") {
        "Current"
    } else if gw.bool_field("is_next") {
        "Next"
    } else if gw.bool_field("finished") {
        "Finished"
    } else {
        "Upcoming"
    };
    let mut lines = vec![
        format!("**Gameweek {}: {}**", gw.id(), gw.display_field("name")),
        format!("- Deadline: {}", deadline(&gw)),
        format!("- Status: {status}"),
    ];
    let average = gw.i64_field("average_entry_score");
    if gw.bool_field("finished") && average > 0 {
        lines.push(String::new());
        lines.push("**Statistics:**".to_string());
        lines.push(format!("- Average Score: {average} points"));
        lines.push(format!(
            "- Highest Score: {} points",
            gw.i64_field("highest_score")
        ));
    }
    lines.join("\n")
}

pub async fn get_season_overview(ctx: &FplContext) -> String {
    let gameweeks = match ctx.bootstrap.gameweeks().await {
        Ok(gameweeks) => gameweeks,
        Err(err) => return failure("fetching the season overview", &err),
    };
    let current = find_flagged(&gameweeks, "is_current")
        .map(|gw| gw.id())
        .unwrap_or(0);

    let total = gameweeks.len() as i64;
    let finished = gameweeks.iter().filter(|gw| gw.bool_field("finished")).count();
    let remaining = if current > 0 { total - current } else { total };
    let percent = if total > 0 { current * 100 / total } else { 0 };

    let mut lines = vec![
        "**FPL Season Overview**".to_string(),
        format!("- Total Gameweeks: {total}"),
        format!("- Current Gameweek: {current}"),
        format!("- Gameweeks Finished: {finished}"),
        format!("- Gameweeks Remaining: {remaining}"),
        format!("- Progress: {current}/{total} ({percent}% complete)"),
    ];
    if let Ok(managers) = ctx.bootstrap.total_players().await {
        if managers > 0 {
            lines.push(format!("- Registered Managers: {}", thousands(managers)));
        }
    }
    lines.join("\n")
}
