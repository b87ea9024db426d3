//! One-shot tool invocation.

use tracing::debug;

use super::{resolve_team_id, tool_input};
use crate::{
    cli::types::ManagerId,
    fpl::FplContext,
    tools::{invoke_tool, ToolName},
    Result,
};

pub async fn handle_tool(
    ctx: &FplContext,
    tool: ToolName,
    input: Option<String>,
    team_id: Option<ManagerId>,
) -> Result<()> {
    let team_id = match (tool.takes_team_id(), &input) {
        (true, None) => Some(resolve_team_id(team_id)?),
        (true, Some(_)) => resolve_team_id(team_id).ok(),
        (false, _) => None,
    };

    let input = tool_input(tool, input.as_deref(), team_id);
    let output = invoke_tool(ctx, tool, &input).await;
    debug!(%tool, cached = ctx.client.cache_len(), "tool finished");
    println!("{output}");
    Ok(())
}
