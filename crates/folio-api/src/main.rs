//! Folio CLI entry point.
//!
//! Binary name: `folio`
//!
//! Parses CLI arguments, loads configuration and profile content, then
//! dispatches to the terminal view, the chat loop, or a one-shot command.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    folio_observe::tracing_setup::init_tracing(cli.log_filter(), cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "folio", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init(&cli.overrides()).await?;

    let result = match cli.command {
        Commands::Terminal => cli::terminal::run_terminal(&state).await,
        Commands::Chat => cli::chat::loop_runner::run_chat_loop(&state).await,
        Commands::Usage => cli::usage::show_usage(&state, cli.json).await,
        Commands::Completions { .. } => unreachable!("handled above"),
    };

    folio_observe::tracing_setup::shutdown_tracing();
    result
}
