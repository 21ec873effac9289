//! Domain models and types for envject.
//!
//! The domain layer provides:
//! - **Validated keys** ([`ConfigKey`])
//! - **Resolution results** ([`ResolvedValue`], [`SourceKind`])
//! - **Error types** ([`EnvjectError`]) and their exit codes
//! - **Result type alias** ([`Result`])
//!
//! ```rust
//! use envject::domain::{ConfigKey, EnvjectError, Result};
//!
//! fn parse(raw: &str) -> Result<ConfigKey> {
//!     ConfigKey::new(raw).map_err(|reason| EnvjectError::malformed("secrets.yaml", reason))
//! }
//!
//! assert!(parse("API_URL").is_ok());
//! assert!(parse("").is_err());
//! ```

pub mod errors;
pub mod key;
pub mod resolved;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{
    EnvjectError, EXIT_ARTIFACT, EXIT_FATAL, EXIT_MANIFEST, EXIT_SUCCESS, EXIT_UNRESOLVED,
};
pub use key::ConfigKey;
pub use resolved::{ResolvedValue, SourceKind};
pub use result::Result;
