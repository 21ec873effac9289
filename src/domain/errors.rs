//! Domain error types
//!
//! This module defines the error hierarchy for envject. Every failure that
//! aborts a run maps to exactly one variant, and every variant maps to a
//! process exit code so the orchestration layer can tell them apart.

use std::path::PathBuf;
use thiserror::Error;

/// Exit code for a successful run
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for a missing or malformed manifest
pub const EXIT_MANIFEST: i32 = 2;

/// Exit code for a declared key that no source satisfied
pub const EXIT_UNRESOLVED: i32 = 3;

/// Exit code for a failed artifact write
pub const EXIT_ARTIFACT: i32 = 4;

/// Exit code for any other fatal error
pub const EXIT_FATAL: i32 = 5;

/// Main envject error type
///
/// This is the primary error type used throughout the library.
#[derive(Debug, Error)]
pub enum EnvjectError {
    /// The manifest document does not exist at the expected path
    #[error("Manifest not found: {}", .0.display())]
    ManifestNotFound(PathBuf),

    /// The manifest exists but cannot be parsed or declares no keys
    #[error("Malformed manifest {}: {reason}", path.display())]
    ManifestMalformed { path: PathBuf, reason: String },

    /// No secret file or environment variable satisfied a declared key
    #[error(
        "Configuration key '{key}' is unresolved: mount a secret file at {} or set the environment variable {key}",
        secrets_dir.join(key).display()
    )]
    ConfigKeyUnresolved { key: String, secrets_dir: PathBuf },

    /// The artifact could not be written to its target path
    #[error("Failed to write artifact {}: {reason}", path.display())]
    ArtifactWrite { path: PathBuf, reason: String },

    /// Tool configuration errors (config file, overrides, CLI flags)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// I/O errors outside of manifest loading and artifact writing
    #[error("I/O error: {0}")]
    Io(String),
}

impl EnvjectError {
    /// Creates a malformed-manifest error
    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ManifestMalformed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Creates an artifact write error
    pub fn artifact_write(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::ArtifactWrite {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ManifestNotFound(_) | Self::ManifestMalformed { .. } => EXIT_MANIFEST,
            Self::ConfigKeyUnresolved { .. } => EXIT_UNRESOLVED,
            Self::ArtifactWrite { .. } => EXIT_ARTIFACT,
            Self::Configuration(_) | Self::Io(_) => EXIT_FATAL,
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for EnvjectError {
    fn from(err: std::io::Error) -> Self {
        EnvjectError::Io(err.to_string())
    }
}

// Conversion from toml parse errors (tool configuration only; manifest
// parse errors carry their path and are mapped explicitly)
impl From<toml::de::Error> for EnvjectError {
    fn from(err: toml::de::Error) -> Self {
        EnvjectError::Configuration(format!("TOML parse error: {err}"))
    }
}
