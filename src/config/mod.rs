//! Configuration management for envject.
//!
//! This is the configuration of the tool itself (where the manifest is,
//! where secrets are mounted, where the artifact goes). It is unrelated to
//! the application configuration values the tool resolves.
//!
//! # Sources, lowest to highest precedence
//!
//! 1. Built-in defaults
//! 2. `envject.toml` (or the file given with `--config`), with `${VAR}`
//!    substitution from the environment
//! 3. `ENVJECT_<SECTION>_<FIELD>` environment variables
//! 4. Command-line flags
//!
//! # Example Configuration
//!
//! ```toml
//! [manifest]
//! path = "secrets.yaml"
//!
//! [sources]
//! secrets_dir = "/run/secrets"
//!
//! [artifact]
//! path = "${WEB_ROOT}/env-config.js"
//! format = "script"
//! namespace = "process"
//! sub_namespace = "env"
//!
//! [logging]
//! level = "info"
//! format = "json"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, DEFAULT_CONFIG_FILE};
pub use schema::{
    ArtifactConfig, ArtifactFormat, EnvjectConfig, LogFormat, LoggingConfig, ManifestConfig,
    SourcesConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
