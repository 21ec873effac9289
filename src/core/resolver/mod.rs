//! Key resolution
//!
//! Every key goes through the same chain, first match wins:
//!
//! 1. secret file `<secrets_dir>/<key>`
//! 2. environment variable `<key>` (non-empty)
//!
//! There is no default tier. [`Resolver::resolve_all`] stops at the first
//! key nothing satisfies, and a [`Resolution`] only exists once every key
//! of the manifest has a value, so a partial result can never reach the
//! artifact writer.

pub mod sources;

pub use sources::{EnvironmentSource, SecretFileSource, ValueSource};

use crate::core::diagnostics::Diagnostics;
use crate::core::manifest::Manifest;
use crate::domain::{ConfigKey, EnvjectError, ResolvedValue, Result, SourceKind};

/// Resolves manifest keys against the secret-file and environment sources
#[derive(Debug)]
pub struct Resolver {
    secrets: SecretFileSource,
    environment: EnvironmentSource,
}

impl Resolver {
    pub fn new(secrets: SecretFileSource, environment: EnvironmentSource) -> Self {
        Self {
            secrets,
            environment,
        }
    }

    /// Secret files under `secrets_dir`, then the live process environment
    pub fn from_process(secrets_dir: impl Into<std::path::PathBuf>) -> Self {
        Self::new(
            SecretFileSource::new(secrets_dir),
            EnvironmentSource::process(),
        )
    }

    /// Sources in priority order
    fn chain(&self) -> [&dyn ValueSource; 2] {
        [&self.secrets, &self.environment]
    }

    /// Resolves a single key, or `None` if no source has it
    pub fn resolve(&self, key: &ConfigKey) -> Option<ResolvedValue> {
        self.chain().into_iter().find_map(|source| {
            source
                .lookup(key)
                .map(|value| ResolvedValue::new(key.clone(), value, source.kind()))
        })
    }

    /// Resolves every key of `manifest`, aborting on the first miss
    ///
    /// # Errors
    ///
    /// [`EnvjectError::ConfigKeyUnresolved`] naming the first key that no
    /// source satisfied.
    pub fn resolve_all(
        &self,
        manifest: &Manifest,
        diagnostics: &mut Diagnostics,
    ) -> Result<Resolution> {
        let mut values = Vec::with_capacity(manifest.len());

        for key in manifest.iter() {
            match self.resolve(key) {
                Some(resolved) => {
                    diagnostics.resolved(key, resolved.source());
                    values.push(resolved);
                }
                None => {
                    diagnostics.unresolved(key, self.secrets.root());
                    return Err(EnvjectError::ConfigKeyUnresolved {
                        key: key.to_string(),
                        secrets_dir: self.secrets.root().to_path_buf(),
                    });
                }
            }
        }

        tracing::info!(keys = values.len(), "All keys resolved");
        Ok(Resolution { values })
    }

    /// Reports the winning source of every key without stopping at misses
    pub fn audit(&self, manifest: &Manifest) -> Vec<KeyAudit> {
        manifest
            .iter()
            .map(|key| KeyAudit {
                key: key.clone(),
                source: self.resolve(key).map(|r| r.source()),
            })
            .collect()
    }

    pub fn secrets_dir(&self) -> &std::path::Path {
        self.secrets.root()
    }
}

/// A complete set of resolved values, in manifest order
#[derive(Debug, Clone)]
pub struct Resolution {
    values: Vec<ResolvedValue>,
}

impl Resolution {
    pub fn values(&self) -> &[ResolvedValue] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolvedValue> {
        self.values.iter()
    }

    /// Number of keys satisfied by each source kind
    pub fn count_by(&self, kind: SourceKind) -> usize {
        self.values.iter().filter(|v| v.source() == kind).count()
    }
}

/// Outcome of auditing one key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyAudit {
    pub key: ConfigKey,
    pub source: Option<SourceKind>,
}
