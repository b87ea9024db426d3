//! Entry point: parse CLI and dispatch to command handlers.

use anyhow::Context;
use clap::Parser;
use fpl_agent::{
    cli::{Commands, FplAgent, GlobalOpts},
    commands::{list::handle_list_tools, shell::handle_shell, tool::handle_tool},
    FplContext, Settings,
};
use tracing_subscriber::EnvFilter;

fn load_settings(global: &GlobalOpts) -> fpl_agent::Result<Settings> {
    let mut settings = Settings::load(global.config.as_deref())?;
    if let Some(base_url) = &global.base_url {
        settings.base_url = base_url.clone();
    }
    if global.no_cache {
        settings.enable_cache = false;
    }
    settings.validate()?;
    Ok(settings)
}

/// `RUST_LOG` wins over the configured level. Logs go to stderr.
fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Run the CLI.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app = FplAgent::parse();
    let settings = load_settings(&app.global).context("loading settings")?;
    init_tracing(&settings);

    match app.command {
        Commands::Tools => handle_list_tools(),
        Commands::Tool {
            name,
            input,
            team_id,
        } => {
            let ctx = FplContext::from_settings(&settings)?;
            handle_tool(&ctx, name, input, team_id).await?
        }
        Commands::Shell { team_id } => {
            let ctx = FplContext::from_settings(&settings)?;
            handle_shell(&ctx, team_id).await?
        }
    }

    Ok(())
}
