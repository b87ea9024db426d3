//! CLI argument definitions and parsing.

pub mod types;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use types::ManagerId;

use crate::tools::ToolName;

/// Overrides applied on top of the loaded settings.
#[derive(Debug, Default, Args)]
pub struct GlobalOpts {
    /// Settings file (default: `<config dir>/fpl-agent/config.toml`).
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,

    /// FPL API base URL.
    #[clap(long, global = true)]
    pub base_url: Option<String>,

    /// Always hit the network; nothing is memoized.
    #[clap(long, global = true)]
    pub no_cache: bool,
}

#[derive(Debug, Parser)]
#[clap(
    name = "fpl-agent",
    version,
    about = "Fantasy Premier League assistant tools"
)]
pub struct FplAgent {
    #[clap(flatten)]
    pub global: GlobalOpts,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run a single tool and print its output.
    ///
    /// INPUT may be a bare value (`Salah`, `12`) or a JSON object
    /// (`{"position": "midfielder", "max_price": 8.0}`).
    Tool {
        /// Tool name, e.g. `search_player_by_name`.
        name: ToolName,

        /// Tool input.
        input: Option<String>,

        /// Team ID for team tools run without input (or set `FPL_TEAM_ID` env var).
        #[clap(long, short)]
        team_id: Option<ManagerId>,
    },

    /// List the available tools.
    Tools,

    /// Interactive session: type `<tool> [input]` or a `/command`.
    Shell {
        /// Team ID used by team tools when no input is given (or set `FPL_TEAM_ID` env var).
        #[clap(long, short)]
        team_id: Option<ManagerId>,
    },
}
