//! Init command implementation
//!
//! Writes a commented `envject.toml` and a starter manifest so a new
//! project has something to edit.

use crate::config::DEFAULT_CONFIG_FILE;
use crate::domain::{EXIT_FATAL, EXIT_SUCCESS};
use clap::Args;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

const SAMPLE_CONFIG: &str = r#"# envject configuration
# Every value below is the default; delete what you do not change.
# ${VAR} references are substituted from the environment when loaded.

[manifest]
# YAML, JSON or TOML document listing the required keys
path = "secrets.yaml"

[sources]
# One file per key, checked before the environment
secrets_dir = "/run/secrets"

[artifact]
path = "/usr/share/nginx/html/env-config.js"
format = "script"          # script | json
namespace = "process"      # window.process
sub_namespace = "env"      # window.process.env

[logging]
level = "info"             # trace | debug | info | warn | error
format = "pretty"          # pretty | json
local_enabled = false
local_path = "/var/log/envject"
local_rotation = "daily"   # daily | hourly | never
"#;

const SAMPLE_MANIFEST: &str = r#"# Keys the frontend reads from process.env.
# Each is resolved from /run/secrets/<KEY>, then from the environment.
secrets:
  - APP_NAME
  - API_URL
"#;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to create the files in
    #[arg(short, long, default_value = ".")]
    pub dir: PathBuf,

    /// Overwrite existing files
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        let stdout = std::io::stdout();
        self.run(&mut stdout.lock())
    }

    pub fn run(&self, out: &mut dyn Write) -> anyhow::Result<i32> {
        let config_path = self.dir.join(DEFAULT_CONFIG_FILE);
        let manifest_path = self.dir.join("secrets.yaml");
        tracing::info!(dir = %self.dir.display(), "Initializing configuration");

        writeln!(out, "📝 Initializing envject configuration")?;
        writeln!(out)?;

        if !self.force {
            for path in [&config_path, &manifest_path] {
                if path.exists() {
                    writeln!(out, "❌ File already exists: {}", path.display())?;
                    writeln!(out, "   Use --force to overwrite")?;
                    return Ok(EXIT_FATAL);
                }
            }
        }

        for (path, contents) in [(&config_path, SAMPLE_CONFIG), (&manifest_path, SAMPLE_MANIFEST)] {
            if let Err(e) = fs::create_dir_all(&self.dir).and_then(|_| fs::write(path, contents)) {
                writeln!(out, "❌ Failed to write {}", path.display())?;
                writeln!(out, "   Error: {e}")?;
                return Ok(EXIT_FATAL);
            }
            writeln!(out, "✅ Created {}", path.display())?;
        }

        writeln!(out)?;
        writeln!(out, "Next steps:")?;
        writeln!(out, "  1. List your keys in {}", manifest_path.display())?;
        writeln!(out, "  2. Adjust artifact.path in {}", config_path.display())?;
        writeln!(out, "  3. Check sources: envject check")?;
        writeln!(out, "  4. Run on container start: envject generate")?;
        Ok(EXIT_SUCCESS)
    }
}
