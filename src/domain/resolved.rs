//! Resolved configuration values and where they came from

use super::key::ConfigKey;
use crate::config::SecretString;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The source that satisfied a configuration key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// A file under the secret-mount root named after the key
    SecretFile,
    /// A process environment variable named after the key
    EnvironmentVariable,
}

impl SourceKind {
    /// Short label used in diagnostics and logs
    pub fn label(&self) -> &'static str {
        match self {
            Self::SecretFile => "secret file",
            Self::EnvironmentVariable => "environment variable",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A key, its value and the source that won
///
/// The value stays wrapped in a [`SecretString`] so it is redacted from
/// `Debug` output and zeroized on drop.
#[derive(Debug, Clone)]
pub struct ResolvedValue {
    key: ConfigKey,
    value: SecretString,
    source: SourceKind,
}

impl ResolvedValue {
    pub fn new(key: ConfigKey, value: SecretString, source: SourceKind) -> Self {
        Self { key, value, source }
    }

    pub fn key(&self) -> &ConfigKey {
        &self.key
    }

    pub fn source(&self) -> SourceKind {
        self.source
    }

    /// Exposes the plaintext value. Only the artifact renderer should need this.
    pub fn expose_value(&self) -> &str {
        self.value.expose_secret().as_ref()
    }
}
