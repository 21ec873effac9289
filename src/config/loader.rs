//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{ArtifactFormat, EnvjectConfig, LogFormat};
use crate::domain::errors::EnvjectError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "envject.toml";

/// Loads the tool configuration
///
/// This function:
/// 1. Reads the TOML file (`path`, or `envject.toml` if present)
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into EnvjectConfig
/// 4. Applies environment variable overrides (ENVJECT_* prefix)
/// 5. Validates the configuration
///
/// An explicit `path` must exist. Without one, a missing default file
/// simply means "use the defaults".
///
/// # Examples
///
/// ```no_run
/// use envject::config::loader::load_config;
/// use std::path::Path;
///
/// let config = load_config(Some(Path::new("envject.toml"))).expect("Failed to load config");
/// ```
pub fn load_config(path: Option<&Path>) -> Result<EnvjectConfig> {
    let env = |name: &str| std::env::var(name).ok();

    let (path, required) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };

    let mut config = if path.exists() {
        let contents = fs::read_to_string(&path).map_err(|e| {
            EnvjectError::Configuration(format!(
                "Failed to read configuration file {}: {}",
                path.display(),
                e
            ))
        })?;
        let contents = substitute_env_vars(&contents, env)?;
        let config: EnvjectConfig = toml::from_str(&contents).map_err(|e| {
            EnvjectError::Configuration(format!(
                "Failed to parse {}: {}",
                path.display(),
                e
            ))
        })?;
        tracing::debug!(path = %path.display(), "Loaded configuration file");
        config
    } else if required {
        return Err(EnvjectError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    } else {
        EnvjectConfig::default()
    };

    apply_env_overrides(&mut config, env)?;

    config.validate().map_err(|e| {
        EnvjectError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched. Every missing variable is reported at once.
fn substitute_env_vars(input: &str, env: impl Fn(&str) -> Option<String>) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}")
        .map_err(|e| EnvjectError::Configuration(e.to_string()))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let processed = re.replace_all(line, |caps: &regex::Captures| {
            let var_name = &caps[1];
            match env(var_name) {
                Some(value) => value,
                None => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                    caps[0].to_string()
                }
            }
        });
        result.push_str(&processed);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(EnvjectError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the ENVJECT_* prefix
///
/// Variables follow the pattern ENVJECT_<SECTION>_<FIELD>, for example
/// ENVJECT_ARTIFACT_PATH or ENVJECT_SOURCES_SECRETS_DIR.
fn apply_env_overrides(
    config: &mut EnvjectConfig,
    env: impl Fn(&str) -> Option<String>,
) -> Result<()> {
    let invalid = |name: &str, e: String| EnvjectError::Configuration(format!("{name}: {e}"));

    if let Some(val) = env("ENVJECT_MANIFEST_PATH") {
        config.manifest.path = PathBuf::from(val);
    }

    if let Some(val) = env("ENVJECT_SOURCES_SECRETS_DIR") {
        config.sources.secrets_dir = PathBuf::from(val);
    }

    if let Some(val) = env("ENVJECT_ARTIFACT_PATH") {
        config.artifact.path = PathBuf::from(val);
    }
    if let Some(val) = env("ENVJECT_ARTIFACT_FORMAT") {
        config.artifact.format = val
            .parse::<ArtifactFormat>()
            .map_err(|e| invalid("ENVJECT_ARTIFACT_FORMAT", e))?;
    }
    if let Some(val) = env("ENVJECT_ARTIFACT_NAMESPACE") {
        config.artifact.namespace = val;
    }
    if let Some(val) = env("ENVJECT_ARTIFACT_SUB_NAMESPACE") {
        config.artifact.sub_namespace = val;
    }

    if let Some(val) = env("ENVJECT_LOGGING_LEVEL") {
        config.logging.level = val;
    }
    if let Some(val) = env("ENVJECT_LOGGING_FORMAT") {
        config.logging.format = val
            .parse::<LogFormat>()
            .map_err(|e| invalid("ENVJECT_LOGGING_FORMAT", e))?;
    }
    if let Some(val) = env("ENVJECT_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().map_err(|_| {
            invalid(
                "ENVJECT_LOGGING_LOCAL_ENABLED",
                format!("expected true or false, got '{val}'"),
            )
        })?;
    }
    if let Some(val) = env("ENVJECT_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Some(val) = env("ENVJECT_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}
