//! Generate command implementation
//!
//! This is what the container entrypoint runs on every start: resolve each
//! manifest key and write the artifact, or exit non-zero and write nothing.

use super::SourceArgs;
use crate::config::{ArtifactFormat, EnvjectConfig};
use crate::core::diagnostics::Diagnostics;
use crate::core::pipeline::{run, RunPlan};
use crate::domain::{EXIT_FATAL, EXIT_SUCCESS};
use anyhow::Context;
use clap::Args;
use std::io::Write;
use std::path::PathBuf;

/// Arguments for the generate command
#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub sources: SourceArgs,

    /// Artifact path to write
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Artifact format (script, json)
    #[arg(short, long)]
    pub format: Option<ArtifactFormat>,

    /// Global property that holds the configuration namespace
    #[arg(long)]
    pub namespace: Option<String>,

    /// Property of the namespace that receives the keys
    #[arg(long)]
    pub sub_namespace: Option<String>,

    /// Print the artifact to stdout instead of writing it
    #[arg(long)]
    pub dry_run: bool,

    /// Load variables from a dotenv file first (existing variables win)
    #[arg(long)]
    pub env_file: Option<PathBuf>,
}

impl GenerateArgs {
    /// Execute the generate command
    pub fn execute(&self, config: EnvjectConfig) -> anyhow::Result<i32> {
        let stdout = std::io::stdout();
        self.run(config, &mut Diagnostics::stderr(), &mut stdout.lock())
    }

    /// Runs the command with explicit output streams
    pub fn run(
        &self,
        mut config: EnvjectConfig,
        diagnostics: &mut Diagnostics,
        stdout: &mut dyn Write,
    ) -> anyhow::Result<i32> {
        self.apply(&mut config);
        if let Err(e) = config.validate() {
            diagnostics.note("❌ Invalid configuration");
            diagnostics.note(&format!("   Error: {e}"));
            return Ok(EXIT_FATAL);
        }

        if let Some(ref env_file) = self.env_file {
            match dotenvy::from_path(env_file) {
                Ok(()) => tracing::info!(path = %env_file.display(), "Loaded env file"),
                Err(e) => {
                    diagnostics.note(&format!(
                        "❌ Failed to load env file {}: {e}",
                        env_file.display()
                    ));
                    return Ok(EXIT_FATAL);
                }
            }
        }

        let mut plan = RunPlan::from(&config);
        plan.dry_run = self.dry_run;

        tracing::info!(
            manifest = %plan.manifest_path.display(),
            secrets_dir = %plan.secrets_dir.display(),
            artifact = %plan.artifact_path.display(),
            dry_run = plan.dry_run,
            "Generating artifact"
        );
        diagnostics.note(&format!(
            "🔧 Resolving keys declared in {}",
            plan.manifest_path.display()
        ));

        match run(&plan, diagnostics) {
            Ok(report) => {
                if report.written {
                    diagnostics.note(&format!(
                        "✅ Wrote {} keys to {} ({} from secret files, {} from environment)",
                        report.keys(),
                        report.artifact_path.display(),
                        report.from_secret_files,
                        report.from_environment
                    ));
                } else {
                    stdout
                        .write_all(report.artifact.contents().as_bytes())
                        .and_then(|_| stdout.flush())
                        .context("Failed to print artifact")?;
                    diagnostics.note(&format!(
                        "🧪 Dry run: {} keys resolved, {} not written",
                        report.keys(),
                        report.artifact_path.display()
                    ));
                }
                Ok(EXIT_SUCCESS)
            }
            Err(e) => {
                tracing::error!(error = %e, "Generate failed");
                diagnostics.note(&format!("❌ {e}"));
                Ok(e.exit_code())
            }
        }
    }

    fn apply(&self, config: &mut EnvjectConfig) {
        self.sources.apply(config);
        if let Some(ref output) = self.output {
            config.artifact.path = output.clone();
        }
        if let Some(format) = self.format {
            config.artifact.format = format;
        }
        if let Some(ref namespace) = self.namespace {
            config.artifact.namespace = namespace.clone();
        }
        if let Some(ref sub_namespace) = self.sub_namespace {
            config.artifact.sub_namespace = sub_namespace.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::diagnostics::testing::Captured;
    use crate::domain::{EXIT_MANIFEST, EXIT_UNRESOLVED};
    use tempfile::TempDir;

    struct Setup {
        dir: TempDir,
        args: GenerateArgs,
    }

    fn setup(manifest: &str, secrets: &[(&str, &str)]) -> Setup {
        let dir = TempDir::new().unwrap();
        let secrets_dir = dir.path().join("secrets");
        std::fs::create_dir(&secrets_dir).unwrap();
        for (key, value) in secrets {
            std::fs::write(secrets_dir.join(key), value).unwrap();
        }
        let manifest_path = dir.path().join("secrets.yaml");
        std::fs::write(&manifest_path, manifest).unwrap();

        let args = GenerateArgs {
            sources: SourceArgs {
                manifest: Some(manifest_path),
                secrets_dir: Some(secrets_dir),
            },
            output: Some(dir.path().join("env-config.js")),
            ..GenerateArgs::default()
        };
        Setup { dir, args }
    }

    #[test]
    fn test_generate_writes_artifact() {
        let s = setup(
            "secrets: [ENVJECT_GEN_TEST_NAME]\n",
            &[("ENVJECT_GEN_TEST_NAME", "Acme\n")],
        );
        let captured = Captured::default();
        let mut stdout: Vec<u8> = Vec::new();

        let code = s
            .args
            .run(
                EnvjectConfig::default(),
                &mut Diagnostics::new(captured.clone()),
                &mut stdout,
            )
            .unwrap();

        assert_eq!(code, EXIT_SUCCESS);
        assert!(stdout.is_empty());
        let artifact = std::fs::read_to_string(s.dir.path().join("env-config.js")).unwrap();
        assert!(artifact.contains("env[\"ENVJECT_GEN_TEST_NAME\"] = \"Acme\";"));
        assert!(captured
            .text()
            .contains("ENVJECT_GEN_TEST_NAME: resolved from secret file"));
    }

    #[test]
    fn test_dry_run_prints_instead_of_writing() {
        let mut s = setup(
            "secrets: [ENVJECT_GEN_TEST_DRY]\n",
            &[("ENVJECT_GEN_TEST_DRY", "x")],
        );
        s.args.dry_run = true;
        s.args.format = Some(ArtifactFormat::Json);
        let mut stdout: Vec<u8> = Vec::new();

        let code = s
            .args
            .run(EnvjectConfig::default(), &mut Diagnostics::discard(), &mut stdout)
            .unwrap();

        assert_eq!(code, EXIT_SUCCESS);
        let printed: serde_json::Value = serde_json::from_slice(&stdout).unwrap();
        assert_eq!(printed["ENVJECT_GEN_TEST_DRY"], "x");
        assert!(!s.dir.path().join("env-config.js").exists());
    }

    #[test]
    fn test_unresolved_key_exit_code() {
        let s = setup("secrets: [ENVJECT_GEN_TEST_MISSING_KEY]\n", &[]);
        let captured = Captured::default();

        let code = s
            .args
            .run(
                EnvjectConfig::default(),
                &mut Diagnostics::new(captured.clone()),
                &mut std::io::sink(),
            )
            .unwrap();

        assert_eq!(code, EXIT_UNRESOLVED);
        assert!(!s.dir.path().join("env-config.js").exists());
        assert!(captured.text().contains("ENVJECT_GEN_TEST_MISSING_KEY"));
    }

    #[test]
    fn test_malformed_manifest_exit_code() {
        let s = setup("secrets: []\n", &[]);
        let code = s
            .args
            .run(EnvjectConfig::default(), &mut Diagnostics::discard(), &mut std::io::sink())
            .unwrap();
        assert_eq!(code, EXIT_MANIFEST);
    }

    #[test]
    fn test_invalid_namespace_flag() {
        let mut s = setup("secrets: [A]\n", &[("A", "1")]);
        s.args.namespace = Some("not valid".to_string());
        let code = s
            .args
            .run(EnvjectConfig::default(), &mut Diagnostics::discard(), &mut std::io::sink())
            .unwrap();
        assert_eq!(code, EXIT_FATAL);
    }

    #[test]
    fn test_missing_env_file() {
        let mut s = setup("secrets: [A]\n", &[("A", "1")]);
        s.args.env_file = Some(s.dir.path().join("missing.env"));
        let code = s
            .args
            .run(EnvjectConfig::default(), &mut Diagnostics::discard(), &mut std::io::sink())
            .unwrap();
        assert_eq!(code, EXIT_FATAL);
    }
}
