//! Interactive session over stdin.
//!
//! Each line is either a `/command` or `<tool> [input]`. The session keeps a
//! team ID that team tools fall back to when called without input.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info};

use super::{list::tool_listing, tool_input};
use crate::{
    cli::types::ManagerId,
    fpl::FplContext,
    tools::{failure, invoke_tool, ToolName},
    Result,
};

const PROMPT: &str = "fpl> ";

const HELP: &str = "\
Commands:
  /team [id]  Show or set your FPL team ID
  /help       Show this help
  /clear      Drop cached responses and session state
  /usage      Show tool calls and cache size for this session
  /exit       Leave the session

Anything else is `<tool> [input]`, e.g. `search_player_by_name Salah`.";

#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Blank,
    Team(Option<String>),
    Help,
    Clear,
    Usage,
    Exit,
    Invoke {
        tool: ToolName,
        input: Option<String>,
    },
    /// Unparseable line, with the message to show.
    Invalid(String),
}

impl ShellCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return ShellCommand::Blank;
        }

        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, Some(rest.trim().to_string())),
            None => (line, None),
        };
        let rest = rest.filter(|r| !r.is_empty());

        if let Some(command) = head.strip_prefix('/') {
            return match command.to_ascii_lowercase().as_str() {
                "team" => ShellCommand::Team(rest),
                "help" => ShellCommand::Help,
                "clear" => ShellCommand::Clear,
                "usage" => ShellCommand::Usage,
                "exit" | "quit" => ShellCommand::Exit,
                _ => ShellCommand::Invalid(format!(
                    "Unknown command: /{command}. Type /help for commands."
                )),
            };
        }

        match head.parse::<ToolName>() {
            Ok(tool) => ShellCommand::Invoke { tool, input: rest },
            Err(err) => ShellCommand::Invalid(format!("❌ {err}. Type /help for commands.")),
        }
    }
}

/// What a processed line asks of the loop.
#[derive(Debug, PartialEq)]
pub enum Flow {
    Continue(String),
    Exit,
}

#[derive(Debug, Default)]
pub struct ShellSession {
    pub team_id: Option<ManagerId>,
    pub tool_calls: usize,
}

impl ShellSession {
    pub fn new(team_id: Option<ManagerId>) -> Self {
        Self {
            team_id,
            tool_calls: 0,
        }
    }

    pub async fn execute(&mut self, ctx: &FplContext, command: ShellCommand) -> Flow {
        let output = match command {
            ShellCommand::Blank => String::new(),
            ShellCommand::Exit => return Flow::Exit,
            ShellCommand::Help => format!("{HELP}\n\nTools:\n{}", tool_listing()),
            ShellCommand::Team(None) => match self.team_id {
                Some(id) => format!("Current Team ID: {id}"),
                None => "No team ID set. Use /team <id>.".to_string(),
            },
            ShellCommand::Team(Some(raw)) => self.set_team(ctx, &raw).await,
            ShellCommand::Clear => {
                ctx.clear();
                self.tool_calls = 0;
                "🧹 Session cleared.".to_string()
            }
            ShellCommand::Usage => format!(
                "📊 Tool calls this session: {}\n📦 Cached responses: {}",
                self.tool_calls,
                ctx.client.cache_len()
            ),
            ShellCommand::Invoke { tool, input } => {
                self.tool_calls += 1;
                let input = tool_input(tool, input.as_deref(), self.team_id);
                invoke_tool(ctx, tool, &input).await
            }
            ShellCommand::Invalid(message) => message,
        };
        Flow::Continue(output)
    }

    /// Validate against the API before accepting the id.
    async fn set_team(&mut self, ctx: &FplContext, raw: &str) -> String {
        let id = match raw.parse::<ManagerId>() {
            Ok(id) => id,
            Err(_) => return "❌ Invalid Team ID. Please enter a number.".to_string(),
        };

        match ctx.managers.team_summary(id).await {
            Ok(summary) => {
                info!(team_id = %id, "team id set");
                self.team_id = Some(id);
                format!(
                    "✅ Team ID set: {id}\n• Team: {}\n• Manager: {}",
                    summary.team_name, summary.manager_name
                )
            }
            Err(err) => failure(&format!("validating Team ID {id}"), &err),
        }
    }
}

/// Drive a session until `/exit` or end of input.
pub async fn run_shell<R, W>(
    ctx: &FplContext,
    session: &mut ShellSession,
    reader: R,
    mut writer: W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    loop {
        writer.write_all(PROMPT.as_bytes()).await?;
        writer.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let command = ShellCommand::parse(&line);
        debug!(?command, "shell command");

        match session.execute(ctx, command).await {
            Flow::Exit => break,
            Flow::Continue(output) if output.is_empty() => {}
            Flow::Continue(output) => {
                writer.write_all(output.as_bytes()).await?;
                writer.write_all(b"\n\n").await?;
            }
        }
    }
    writer.write_all(b"Goodbye!\n").await?;
    writer.flush().await?;
    Ok(())
}

pub async fn handle_shell(ctx: &FplContext, team_id: Option<ManagerId>) -> Result<()> {
    let team_id = team_id.or_else(|| super::resolve_team_id(None).ok());
    let mut session = ShellSession::new(team_id);

    println!("🏆 FPL Agent. Type /help for commands.\n");
    run_shell(
        ctx,
        &mut session,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    )
    .await
}
