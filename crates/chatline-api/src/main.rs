//! chatline entry point.
//!
//! Binary name: `chatline`
//!
//! Resolves configuration from the config file, environment and flags, sets
//! up logging, builds the chat engine and runs the interactive session.

mod cli;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use chatline_core::config::ConfigResolver;
use chatline_core::console::Console;
use chatline_core::indicator::BusyIndicator;
use chatline_core::session::{SessionExit, SessionLoop};
use chatline_infra::{FsConfigStore, ProcessEnv, create_engine};
use chatline_observe::tracing_setup::{TracingOptions, init_tracing};

use cli::Cli;
use cli::chat::console::TerminalConsole;
use cli::chat::input::ChatInput;
use cli::chat::renderer::ChatRenderer;
use cli::chat::spinner::SpinnerSurface;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e:#}", console::style("error:").red().bold());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<SessionExit> {
    let resolver = ConfigResolver::new(FsConfigStore, ProcessEnv);
    let config = resolver
        .resolve(&cli.flag_values(), cli.config.as_deref())
        .context("failed to load configuration")?;

    init_tracing(&TracingOptions {
        debug: config.debug_mode,
        log_path: config.log_path().map(PathBuf::from),
    })
    .context("failed to initialize logging")?;

    let engine = create_engine(&config).context("failed to create chat engine")?;
    let renderer = ChatRenderer::new().context("failed to prepare markdown rendering")?;
    let (input, writer) = ChatInput::new().context("failed to initialize terminal input")?;

    let console: Arc<dyn Console> = Arc::new(TerminalConsole::new(writer, renderer));
    let indicator = Arc::new(BusyIndicator::new(Arc::new(SpinnerSurface)));

    let exit = SessionLoop::new(engine, input, console, indicator)
        .run()
        .await
        .context("chat session ended with an error")?;

    info!(?exit, "session finished");
    Ok(exit)
}
