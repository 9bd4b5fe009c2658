//! Binary entry point: parse the CLI, wire up logging, dispatch the command.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use friends_api::cli::{Cli, Commands};
use friends_api::commands;
use friends_api::config::Config;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::from_env();
    tracing::debug!(?config, "configuration loaded");

    let outcome = match cli.command {
        Commands::Serve(args) => commands::serve::execute(args, config).await,
    };

    if let Err(error) = outcome {
        tracing::error!("command failed: {}", error);
        std::process::exit(1);
    }
}

/// `--verbose` forces debug-level output; otherwise `RUST_LOG` decides,
/// defaulting to info.
fn init_tracing(verbose: bool) {
    let directives = if verbose {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(directives))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
