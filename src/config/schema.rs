//! Configuration schema types
//!
//! This module defines the shape of `envject.toml`. Every section is
//! optional: an absent file yields the defaults below, which match the
//! conventional container layout (Swarm secrets under `/run/secrets`, an
//! nginx web root serving `env-config.js`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Output format of the generated artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactFormat {
    /// JavaScript that populates `<namespace>.<sub_namespace>` on the global object
    #[default]
    Script,
    /// Plain JSON object mapping keys to values
    Json,
}

impl fmt::Display for ArtifactFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Script => write!(f, "script"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl FromStr for ArtifactFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "script" | "js" => Ok(Self::Script),
            "json" => Ok(Self::Json),
            other => Err(format!(
                "Invalid artifact format '{other}'. Must be one of: script, json"
            )),
        }
    }
}

/// Console log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!(
                "Invalid log format '{other}'. Must be one of: pretty, json"
            )),
        }
    }
}

/// Main envject configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnvjectConfig {
    /// Where the key manifest lives
    #[serde(default)]
    pub manifest: ManifestConfig,

    /// Value sources
    #[serde(default)]
    pub sources: SourcesConfig,

    /// Generated artifact settings
    #[serde(default)]
    pub artifact: ArtifactConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl EnvjectConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.manifest.validate()?;
        self.sources.validate()?;
        self.artifact.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Manifest location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestConfig {
    /// Path to the manifest document (YAML, JSON or TOML)
    #[serde(default = "default_manifest_path")]
    pub path: PathBuf,
}

impl ManifestConfig {
    fn validate(&self) -> Result<(), String> {
        if self.path.as_os_str().is_empty() {
            return Err("manifest.path cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            path: default_manifest_path(),
        }
    }
}

/// Value source settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// Secret-mount root; the secret for key `K` is read from `<secrets_dir>/K`
    #[serde(default = "default_secrets_dir")]
    pub secrets_dir: PathBuf,
}

impl SourcesConfig {
    fn validate(&self) -> Result<(), String> {
        if self.secrets_dir.as_os_str().is_empty() {
            return Err("sources.secrets_dir cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            secrets_dir: default_secrets_dir(),
        }
    }
}

/// Artifact settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactConfig {
    /// Target path, overwritten on every run
    #[serde(default = "default_artifact_path")]
    pub path: PathBuf,

    /// Output format
    #[serde(default)]
    pub format: ArtifactFormat,

    /// Property created on the global object
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Property created on the namespace that receives the keys
    #[serde(default = "default_sub_namespace")]
    pub sub_namespace: String,
}

impl ArtifactConfig {
    fn validate(&self) -> Result<(), String> {
        if self.path.as_os_str().is_empty() {
            return Err("artifact.path cannot be empty".to_string());
        }
        if self.path.file_name().is_none() {
            return Err(format!(
                "artifact.path '{}' must name a file",
                self.path.display()
            ));
        }
        for (field, value) in [
            ("artifact.namespace", &self.namespace),
            ("artifact.sub_namespace", &self.sub_namespace),
        ] {
            if !is_js_identifier(value) {
                return Err(format!(
                    "Invalid {field} '{value}'. Must be a JavaScript identifier"
                ));
            }
        }
        Ok(())
    }
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            path: default_artifact_path(),
            format: ArtifactFormat::default(),
            namespace: default_namespace(),
            sub_namespace: default_sub_namespace(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Console output format
    #[serde(default)]
    pub format: LogFormat,

    /// Also write JSON logs to a rolling file
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for the rolling log file
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Rotation policy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.level.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid logging.level '{}'. Must be one of: {}",
                self.level,
                valid_levels.join(", ")
            ));
        }

        if self.local_enabled {
            if self.local_path.is_empty() {
                return Err("logging.local_path cannot be empty when local_enabled = true".to_string());
            }
            let valid_rotations = ["daily", "hourly", "never"];
            if !valid_rotations.contains(&self.local_rotation.as_str()) {
                return Err(format!(
                    "Invalid logging.local_rotation '{}'. Must be one of: {}",
                    self.local_rotation,
                    valid_rotations.join(", ")
                ));
            }
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

/// `[A-Za-z_$][A-Za-z0-9_$]*`
fn is_js_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

// Default value functions
fn default_manifest_path() -> PathBuf {
    PathBuf::from("secrets.yaml")
}

fn default_secrets_dir() -> PathBuf {
    PathBuf::from("/run/secrets")
}

fn default_artifact_path() -> PathBuf {
    PathBuf::from("/usr/share/nginx/html/env-config.js")
}

fn default_namespace() -> String {
    "process".to_string()
}

fn default_sub_namespace() -> String {
    "env".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_local_path() -> String {
    "/var/log/envject".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_defaults_are_valid() {
        let config = EnvjectConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.sources.secrets_dir, PathBuf::from("/run/secrets"));
        assert_eq!(config.artifact.namespace, "process");
        assert_eq!(config.artifact.sub_namespace, "env");
        assert_eq!(config.artifact.format, ArtifactFormat::Script);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: EnvjectConfig = toml::from_str("").unwrap();
        assert_eq!(config.manifest.path, PathBuf::from("secrets.yaml"));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_section() {
        let config: EnvjectConfig = toml::from_str(
            r#"
[artifact]
format = "json"
"#,
        )
        .unwrap();
        assert_eq!(config.artifact.format, ArtifactFormat::Json);
        assert_eq!(config.artifact.namespace, "process");
    }

    #[test_case("process", true ; "plain")]
    #[test_case("_env", true ; "underscore")]
    #[test_case("$cfg", true ; "dollar")]
    #[test_case("__RUNTIME_CONFIG__", true ; "dunder")]
    #[test_case("", false ; "empty")]
    #[test_case("1env", false ; "leading digit")]
    #[test_case("my-env", false ; "dash")]
    #[test_case("a.b", false ; "dot")]
    fn test_js_identifier(input: &str, expected: bool) {
        assert_eq!(is_js_identifier(input), expected);
    }

    #[test]
    fn test_invalid_namespace_rejected() {
        let mut config = EnvjectConfig::default();
        config.artifact.sub_namespace = "not valid".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.contains("artifact.sub_namespace"));
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let mut config = EnvjectConfig::default();
        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rotation_checked_only_when_file_logging_enabled() {
        let mut config = EnvjectConfig::default();
        config.logging.local_rotation = "weekly".to_string();
        assert!(config.validate().is_ok());
        config.logging.local_enabled = true;
        assert!(config.validate().is_err());
    }

    #[test_case("script", ArtifactFormat::Script)]
    #[test_case("JS", ArtifactFormat::Script)]
    #[test_case("json", ArtifactFormat::Json)]
    fn test_artifact_format_from_str(input: &str, expected: ArtifactFormat) {
        assert_eq!(input.parse::<ArtifactFormat>().unwrap(), expected);
    }

    #[test]
    fn test_artifact_format_from_str_invalid() {
        assert!("yaml".parse::<ArtifactFormat>().is_err());
    }
}
