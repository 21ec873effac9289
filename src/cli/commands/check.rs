//! Check command implementation
//!
//! Audits every manifest key against the sources without stopping at the
//! first miss and without writing an artifact. Values are never shown.

use super::SourceArgs;
use crate::config::EnvjectConfig;
use crate::core::manifest::load_manifest;
use crate::core::resolver::{KeyAudit, Resolver};
use crate::domain::{EXIT_FATAL, EXIT_SUCCESS, EXIT_UNRESOLVED};
use anyhow::Context;
use clap::Args;
use serde::Serialize;
use std::io::Write;

/// Arguments for the check command
#[derive(Args, Debug, Default)]
pub struct CheckArgs {
    #[command(flatten)]
    pub sources: SourceArgs,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct KeyReport<'a> {
    key: &'a str,
    source: Option<crate::domain::SourceKind>,
}

impl CheckArgs {
    /// Execute the check command
    pub fn execute(&self, config: EnvjectConfig) -> anyhow::Result<i32> {
        let stdout = std::io::stdout();
        self.run(config, &mut stdout.lock())
    }

    /// Runs the command against the process environment, reporting to `out`
    pub fn run(&self, mut config: EnvjectConfig, out: &mut dyn Write) -> anyhow::Result<i32> {
        self.sources.apply(&mut config);
        if let Err(e) = config.validate() {
            writeln!(out, "❌ Invalid configuration\n   Error: {e}")?;
            return Ok(EXIT_FATAL);
        }

        tracing::info!(
            manifest = %config.manifest.path.display(),
            secrets_dir = %config.sources.secrets_dir.display(),
            "Checking key sources"
        );

        let manifest = match load_manifest(&config.manifest.path) {
            Ok(m) => m,
            Err(e) => {
                writeln!(out, "❌ {e}")?;
                return Ok(e.exit_code());
            }
        };

        let resolver = Resolver::from_process(&config.sources.secrets_dir);
        let audit = resolver.audit(&manifest);
        let missing = audit.iter().filter(|a| a.source.is_none()).count();

        if self.json {
            write_json(out, &audit)?;
        } else {
            write_table(out, &audit, &resolver, manifest.path())?;
        }

        if missing == 0 {
            Ok(EXIT_SUCCESS)
        } else {
            tracing::warn!(missing, total = audit.len(), "Unresolved keys");
            Ok(EXIT_UNRESOLVED)
        }
    }
}

fn write_json(out: &mut dyn Write, audit: &[KeyAudit]) -> anyhow::Result<()> {
    let report: Vec<KeyReport<'_>> = audit
        .iter()
        .map(|a| KeyReport {
            key: a.key.as_str(),
            source: a.source,
        })
        .collect();
    serde_json::to_writer_pretty(&mut *out, &report).context("Failed to write report")?;
    writeln!(out)?;
    Ok(())
}

fn write_table(
    out: &mut dyn Write,
    audit: &[KeyAudit],
    resolver: &Resolver,
    manifest_path: &std::path::Path,
) -> anyhow::Result<()> {
    let width = audit.iter().map(|a| a.key.as_str().len()).max().unwrap_or(0);

    writeln!(
        out,
        "🔍 {} keys declared in {}",
        audit.len(),
        manifest_path.display()
    )?;
    writeln!(out)?;

    for entry in audit {
        match entry.source {
            Some(source) => writeln!(out, "  ✅ {:<width$}  {}", entry.key.as_str(), source)?,
            None => writeln!(
                out,
                "  ❌ {:<width$}  missing: mount {} or set ${}",
                entry.key.as_str(),
                resolver.secrets_dir().join(entry.key.as_str()).display(),
                entry.key
            )?,
        }
    }

    let missing = audit.iter().filter(|a| a.source.is_none()).count();
    writeln!(out)?;
    if missing == 0 {
        writeln!(out, "✅ All keys resolve")?;
    } else {
        writeln!(out, "❌ {} of {} keys unresolved", missing, audit.len())?;
    }
    Ok(())
}
