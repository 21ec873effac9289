// envject - container configuration injector
// Copyright (c) 2025 Envject Contributors
// Licensed under the MIT License

use clap::Parser;
use envject::cli::{Cli, Commands};
use envject::config::{load_config, EnvjectConfig};
use envject::domain::EXIT_FATAL;
use envject::logging::init_logging;
use std::process;

fn main() {
    let cli = Cli::parse();

    // `init` must work before any configuration exists
    let config = match &cli.command {
        Commands::Init(_) => Ok(EnvjectConfig::default()),
        _ => load_config(cli.config.as_deref()),
    };

    let mut config = match config {
        Ok(c) => c,
        Err(e) => {
            eprintln!("❌ {e}");
            process::exit(e.exit_code());
        }
    };

    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }

    let _guard = match init_logging(&config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(EXIT_FATAL);
        }
    };

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "envject starting");

    let exit_code = match execute_command(&cli, config) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e:#}");
            EXIT_FATAL
        }
    };

    // process::exit skips destructors, so flush file logs first
    drop(_guard);
    process::exit(exit_code);
}

/// Execute the CLI command
fn execute_command(cli: &Cli, config: EnvjectConfig) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Generate(args) => args.execute(config),
        Commands::Check(args) => args.execute(config),
        Commands::Init(args) => args.execute(),
    }
}
