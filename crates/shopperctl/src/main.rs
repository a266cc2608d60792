//! shopperctl - CLI for Shopper Intent
//!
//! Predicts purchase intent locally from the model artifacts, or through a
//! running shopperd.

use anyhow::Result;
use clap::Parser;
use shopperctl::cli::{Cli, Commands};
use shopperctl::commands::{self, GlobalOpts};
use shopperctl::errors::EXIT_GENERAL_ERROR;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("debug"))
            .with_writer(std::io::stderr)
            .without_time()
            .init();
    }

    let opts = GlobalOpts {
        config: cli.config,
        artifacts: cli.artifacts,
    };

    let code = match cli.command {
        Commands::Predict(args) => match commands::predict(&opts, args).await {
            Ok(code) => code,
            Err(e) => {
                eprintln!("Error: {:#}", e);
                EXIT_GENERAL_ERROR
            }
        },
        Commands::Check => commands::check(&opts),
        Commands::Columns => commands::columns(),
    };

    std::process::exit(code);
}
