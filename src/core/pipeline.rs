//! One run of the engine
//!
//! `LoadManifest -> ResolveAll -> Render -> WriteArtifact`. Each stage
//! either hands a complete value to the next or ends the run; the target
//! path is only touched in the last stage, after everything else has
//! succeeded.

use crate::config::EnvjectConfig;
use crate::core::artifact::{self, Artifact, RenderOptions};
use crate::core::diagnostics::Diagnostics;
use crate::core::manifest::load_manifest;
use crate::core::resolver::Resolver;
use crate::domain::{Result, SourceKind};
use std::fmt;
use std::path::PathBuf;
use std::time::Instant;

/// Stages of a run, for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    LoadManifest,
    ResolveAll,
    Render,
    WriteArtifact,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::LoadManifest => "load_manifest",
            Self::ResolveAll => "resolve_all",
            Self::Render => "render",
            Self::WriteArtifact => "write_artifact",
        };
        f.write_str(name)
    }
}

/// Everything a run needs to know
#[derive(Debug, Clone)]
pub struct RunPlan {
    pub manifest_path: PathBuf,
    pub secrets_dir: PathBuf,
    pub artifact_path: PathBuf,
    pub render: RenderOptions,
    /// Render but do not write
    pub dry_run: bool,
}

impl From<&EnvjectConfig> for RunPlan {
    fn from(config: &EnvjectConfig) -> Self {
        Self {
            manifest_path: config.manifest.path.clone(),
            secrets_dir: config.sources.secrets_dir.clone(),
            artifact_path: config.artifact.path.clone(),
            render: RenderOptions::from(&config.artifact),
            dry_run: false,
        }
    }
}

/// What a successful run did
#[derive(Debug, Clone)]
pub struct RunReport {
    pub artifact_path: PathBuf,
    pub artifact: Artifact,
    pub from_secret_files: usize,
    pub from_environment: usize,
    /// False for dry runs
    pub written: bool,
}

impl RunReport {
    pub fn keys(&self) -> usize {
        self.artifact.entries()
    }
}

/// Runs against the secret directory of `plan` and the process environment
pub fn run(plan: &RunPlan, diagnostics: &mut Diagnostics) -> Result<RunReport> {
    let resolver = Resolver::from_process(&plan.secrets_dir);
    run_with(plan, &resolver, diagnostics)
}

/// Runs with an explicit resolver
pub fn run_with(
    plan: &RunPlan,
    resolver: &Resolver,
    diagnostics: &mut Diagnostics,
) -> Result<RunReport> {
    let started = Instant::now();
    tracing::debug!(stage = %Stage::LoadManifest, path = %plan.manifest_path.display(), "Run stage");
    let manifest = load_manifest(&plan.manifest_path)?;

    tracing::debug!(stage = %Stage::ResolveAll, keys = manifest.len(), "Run stage");
    let resolution = resolver.resolve_all(&manifest, diagnostics)?;

    tracing::debug!(stage = %Stage::Render, format = %plan.render.format, "Run stage");
    let artifact = artifact::render(&resolution, &plan.render)?;

    let written = if plan.dry_run {
        tracing::info!(path = %plan.artifact_path.display(), "Dry run, artifact not written");
        false
    } else {
        tracing::debug!(stage = %Stage::WriteArtifact, path = %plan.artifact_path.display(), "Run stage");
        artifact::write_artifact(&plan.artifact_path, &artifact)?;
        true
    };

    tracing::info!(
        keys = artifact.entries(),
        duration_ms = started.elapsed().as_millis() as u64,
        "Run complete"
    );

    Ok(RunReport {
        artifact_path: plan.artifact_path.clone(),
        from_secret_files: resolution.count_by(SourceKind::SecretFile),
        from_environment: resolution.count_by(SourceKind::EnvironmentVariable),
        artifact,
        written,
    })
}
