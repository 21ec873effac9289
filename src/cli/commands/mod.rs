//! CLI command implementations
//!
//! Commands return `anyhow::Result<i32>`: the `i32` is the process exit
//! code for expected failures, `Err` is reserved for the unexpected.

pub mod check;
pub mod generate;
pub mod init;

use crate::config::EnvjectConfig;
use clap::Args;
use std::path::PathBuf;

/// Flags shared by commands that read the manifest and sources
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Manifest listing the required keys
    #[arg(short, long)]
    pub manifest: Option<PathBuf>,

    /// Secret-mount root (one file per key)
    #[arg(short, long)]
    pub secrets_dir: Option<PathBuf>,
}

impl SourceArgs {
    /// Overrides config values with any flags given
    pub fn apply(&self, config: &mut EnvjectConfig) {
        if let Some(ref manifest) = self.manifest {
            config.manifest.path = manifest.clone();
        }
        if let Some(ref secrets_dir) = self.secrets_dir {
            config.sources.secrets_dir = secrets_dir.clone();
        }
    }
}
