//! Tool catalogue.

use crate::tools::ToolName;

pub fn tool_listing() -> String {
    let width = ToolName::ALL
        .iter()
        .map(|tool| tool.as_str().len())
        .max()
        .unwrap_or(0);

    ToolName::ALL
        .iter()
        .map(|tool| {
            let marker = if tool.takes_team_id() { " [team]" } else { "" };
            format!(
                "{:<width$}  {}{}",
                tool.as_str(),
                tool.description(),
                marker
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn handle_list_tools() {
    println!("{}", tool_listing());
}
