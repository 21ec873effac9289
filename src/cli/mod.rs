//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for envject using clap.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// envject - inject container secrets and environment into a browser runtime
#[derive(Parser, Debug)]
#[command(name = "envject")]
#[command(version, about, long_about = None)]
#[command(author = "Envject Contributors")]
pub struct Cli {
    /// Path to configuration file [default: envject.toml if present]
    #[arg(short, long, env = "ENVJECT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "ENVJECT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve every manifest key and write the artifact
    Generate(commands::generate::GenerateArgs),

    /// Report where each manifest key would come from, without writing anything
    Check(commands::check::CheckArgs),

    /// Create a sample configuration file and manifest
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_generate() {
        let cli = Cli::parse_from(["envject", "generate"]);
        assert!(cli.config.is_none());
        assert!(matches!(cli.command, Commands::Generate(_)));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["envject", "--config", "custom.toml", "generate"]);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["envject", "--log-level", "debug", "check"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_generate_flags() {
        let cli = Cli::parse_from([
            "envject",
            "generate",
            "--manifest",
            "app/secrets.yml",
            "--secrets-dir",
            "/mnt/secrets",
            "--output",
            "/srv/www/env.js",
            "--format",
            "json",
            "--dry-run",
        ]);
        match cli.command {
            Commands::Generate(args) => {
                assert_eq!(args.sources.manifest, Some(PathBuf::from("app/secrets.yml")));
                assert_eq!(args.sources.secrets_dir, Some(PathBuf::from("/mnt/secrets")));
                assert_eq!(args.output, Some(PathBuf::from("/srv/www/env.js")));
                assert_eq!(args.format, Some(crate::config::ArtifactFormat::Json));
                assert!(args.dry_run);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_check() {
        let cli = Cli::parse_from(["envject", "check", "--json"]);
        assert!(matches!(cli.command, Commands::Check(ref a) if a.json));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["envject", "init", "--force"]);
        assert!(matches!(cli.command, Commands::Init(ref a) if a.force));
    }
}
