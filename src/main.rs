//
//  tonicpow
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tonicpow::cli::{exit_code, Cli, Commands};
use tonicpow::exit_codes;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    init_logging();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Execute command
    let result = run(cli).await;

    // Handle result and exit
    match result {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_code(&e));
        }
    }
}

/// Initialize logging based on environment
fn init_logging() {
    let filter = EnvFilter::try_from_env("TONICPOW_DEBUG")
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Main command dispatcher
async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Campaign(cmd) => cmd.run(&cli.global).await,
        Commands::Advertiser(cmd) => cmd.run(&cli.global).await,
        Commands::Goal(cmd) => cmd.run(&cli.global).await,
        Commands::Link(cmd) => cmd.run(&cli.global).await,
        Commands::Conversion(cmd) => cmd.run(&cli.global).await,
        Commands::Rate(cmd) => cmd.run(&cli.global).await,
        Commands::Config(cmd) => cmd.run(&cli.global).await,
        Commands::Version => {
            println!("{} version {}", tonicpow::APP_NAME, tonicpow::VERSION);
            Ok(())
        }
    }
}
