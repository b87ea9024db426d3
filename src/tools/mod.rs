//! Named tools an agent can call with loosely-shaped input.
//!
//! Every tool returns display text. Input problems, missing records and
//! network failures all come back as text too, so a caller can always
//! continue the conversation.

pub mod format;
pub mod general_tools;
pub mod input;
pub mod player_tools;
pub mod team_tools;

use std::{fmt, str::FromStr};
use tracing::{debug, warn};

use crate::{error::FplError, fpl::FplContext};
pub use input::ToolInput;

/// `❌ Error <doing>: <cause>`.
pub fn failure(doing: &str, err: &FplError) -> String {
    warn!(error = %err, "tool failed while {doing}");
    format!("❌ Error {doing}: {err}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    SearchPlayerByName,
    GetPlayerDetailedStats,
    CompareTwoPlayers,
    FindBestPlayersByPosition,
    GetCurrentGameweekInfo,
    GetNextGameweekInfo,
    GetGameweekByNumber,
    GetSeasonOverview,
    GetMyTeam,
    GetMyTeamSummary,
    GetMyTransfers,
    AnalyzeMyTeamPerformance,
    GetTeamValueBreakdown,
}

impl ToolName {
    pub const ALL: [ToolName; 13] = [
        ToolName::SearchPlayerByName,
        ToolName::GetPlayerDetailedStats,
        ToolName::CompareTwoPlayers,
        ToolName::FindBestPlayersByPosition,
        ToolName::GetCurrentGameweekInfo,
        ToolName::GetNextGameweekInfo,
        ToolName::GetGameweekByNumber,
        ToolName::GetSeasonOverview,
        ToolName::GetMyTeam,
        ToolName::GetMyTeamSummary,
        ToolName::GetMyTransfers,
        ToolName::AnalyzeMyTeamPerformance,
        ToolName::GetTeamValueBreakdown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolName::SearchPlayerByName => "search_player_by_name",
            ToolName::GetPlayerDetailedStats => "get_player_detailed_stats",
            ToolName::CompareTwoPlayers => "compare_two_players",
            ToolName::FindBestPlayersByPosition => "find_best_players_by_position",
            ToolName::GetCurrentGameweekInfo => "get_current_gameweek_info",
            ToolName::GetNextGameweekInfo => "get_next_gameweek_info",
            ToolName::GetGameweekByNumber => "get_gameweek_by_number",
            ToolName::GetSeasonOverview => "get_season_overview",
            ToolName::GetMyTeam => "get_my_team",
            ToolName::GetMyTeamSummary => "get_my_team_summary",
            ToolName::GetMyTransfers => "get_my_transfers",
            ToolName::AnalyzeMyTeamPerformance => "analyze_my_team_performance",
            ToolName::GetTeamValueBreakdown => "get_team_value_breakdown",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ToolName::SearchPlayerByName => {
                "Search for players by name (partial match) to find IDs and basic info"
            }
            ToolName::GetPlayerDetailedStats => {
                "Form, recent gameweeks, upcoming fixtures and value metrics for one player"
            }
            ToolName::CompareTwoPlayers => "Side-by-side comparison of two players",
            ToolName::FindBestPlayersByPosition => {
                "Best value players in a position within a price band"
            }
            ToolName::GetCurrentGameweekInfo => "Current gameweek, deadline, status and scores",
            ToolName::GetNextGameweekInfo => "Next gameweek and its deadline",
            ToolName::GetGameweekByNumber => "Details for a specific gameweek (1-38)",
            ToolName::GetSeasonOverview => "Season progress: gameweeks finished and remaining",
            ToolName::GetMyTeam => "Your squad for a gameweek: formation, captaincy, bench",
            ToolName::GetMyTeamSummary => "Your rank, points, value and recent form",
            ToolName::GetMyTransfers => "Your most recent transfers, newest first",
            ToolName::AnalyzeMyTeamPerformance => {
                "Trends over your last N gameweeks against the average"
            }
            ToolName::GetTeamValueBreakdown => "Squad value split by position",
        }
    }

    /// Whether the tool is keyed by a manager's team id.
    pub fn takes_team_id(&self) -> bool {
        matches!(
            self,
            ToolName::GetMyTeam
                | ToolName::GetMyTeamSummary
                | ToolName::GetMyTransfers
                | ToolName::AnalyzeMyTeamPerformance
                | ToolName::GetTeamValueBreakdown
        )
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolName {
    type Err = FplError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        ToolName::ALL
            .into_iter()
            .find(|tool| tool.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| FplError::UnknownTool {
                name: name.to_string(),
            })
    }
}

/// Run one tool to completion.
pub async fn invoke_tool(ctx: &FplContext, tool: ToolName, input: &ToolInput) -> String {
    debug!(%tool, ?input, "invoking tool");
    match tool {
        ToolName::SearchPlayerByName => player_tools::search_player_by_name(ctx, input).await,
        ToolName::GetPlayerDetailedStats => {
            player_tools::get_player_detailed_stats(ctx, input).await
        }
        ToolName::CompareTwoPlayers => player_tools::compare_two_players(ctx, input).await,
        ToolName::FindBestPlayersByPosition => {
            player_tools::find_best_players_by_position(ctx, input).await
        }
        ToolName::GetCurrentGameweekInfo => general_tools::get_current_gameweek_info(ctx).await,
        ToolName::GetNextGameweekInfo => general_tools::get_next_gameweek_info(ctx).await,
        ToolName::GetGameweekByNumber => general_tools::get_gameweek_by_number(ctx, input).await,
        ToolName::GetSeasonOverview => general_tools::get_season_overview(ctx).await,
        ToolName::GetMyTeam => team_tools::get_my_team(ctx, input).await,
        ToolName::GetMyTeamSummary => team_tools::get_my_team_summary(ctx, input).await,
        ToolName::GetMyTransfers => team_tools::get_my_transfers(ctx, input).await,
        ToolName::AnalyzeMyTeamPerformance => {
            team_tools::analyze_my_team_performance(ctx, input).await
        }
        ToolName::GetTeamValueBreakdown => team_tools::get_team_value_breakdown(ctx, input).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestHarness;

    #[test]
    fn test_tool_names_round_trip() {
        for tool in ToolName::ALL {
            assert_eq!(tool.as_str().parse::<ToolName>().unwrap(), tool);
            assert!(!tool.description().is_empty());
        }
        assert_eq!(
            " Get_My_Team ".parse::<ToolName>().unwrap(),
            ToolName::GetMyTeam
        );
    }

    #[test]
    fn test_unknown_tool() {
        let err = "get_lineup".parse::<ToolName>().unwrap_err();
        assert!(matches!(err, FplError::UnknownTool { ref name } if name == "get_lineup"));
    }

    #[test]
    fn test_team_id_tools() {
        let keyed: Vec<ToolName> = ToolName::ALL
            .into_iter()
            .filter(ToolName::takes_team_id)
            .collect();
        assert_eq!(keyed.len(), 5);
        assert!(!ToolName::SearchPlayerByName.takes_team_id());
    }

    #[tokio::test]
    async fn test_invoke_ignores_input_for_parameterless_tools() {
        let harness = TestHarness::with_fixtures();
        let ctx = harness.context();

        let out = invoke_tool(
            &ctx,
            ToolName::GetNextGameweekInfo,
            &ToolInput::text("whatever"),
        )
        .await;

        assert!(out.starts_with("**Next Gameweek: 3**"));
    }

    #[test]
    fn test_failure_text() {
        let err = FplError::Status {
            status: 503,
            url: "https://fpl.test/api/fixtures/".to_string(),
        };
        assert_eq!(
            failure("fetching fixtures", &err),
            "❌ Error fetching fixtures: FPL API returned HTTP 503 for https://fpl.test/api/fixtures/"
        );
    }
}
