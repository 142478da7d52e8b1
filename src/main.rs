//! jrobo - Joomla browser-test provisioning
//!
//! CLI entry point that dispatches to subcommands. Fatal conditions
//! surface here as errors; this is the only place the exit status is
//! decided.

use clap::Parser;
use console::style;
use jrobo::cli::{commands, Cli, Commands};
use jrobo::config::{self, LocalConfig};
use jrobo::error::JroboResult;
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> JroboResult<()> {
    let cli = Cli::parse();

    // Initialize logging: 0 = info (notices), 1 = debug, 2+ = trace
    let filter = match cli.verbose {
        0 => EnvFilter::new("jrobo=info"),
        1 => EnvFilter::new("jrobo=debug"),
        _ => EnvFilter::new("jrobo=trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    // Load once, pass down; no process-wide mutable state
    let local_config = LocalConfig::load(Path::new(config::CONFIG_FILE));
    let cms_path = config::resolve_testing_path(local_config.as_ref());

    match cli.command {
        Commands::CreateTestingSite(args) => {
            commands::create(args, local_config.as_ref(), &cms_path).await
        }
        Commands::RunSelenium => commands::selenium().await,
        Commands::Screenshots(args) => commands::screenshots(args, local_config.as_ref()).await,
        Commands::ScreenshotsNoinstall(args) => commands::screenshots_noinstall(args).await,
        Commands::GetWebdriver => commands::webdriver().await,
    }
}
