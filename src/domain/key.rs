//! Configuration key identifier with validation
//!
//! A key is used twice: joined onto the secret-mount root as a file name,
//! and looked up verbatim as an environment variable name. Validation
//! rejects anything that is unsafe for either use.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Configuration key newtype wrapper
///
/// # Examples
///
/// ```
/// use envject::domain::ConfigKey;
/// use std::str::FromStr;
///
/// let key = ConfigKey::from_str("VITE_API_URL").unwrap();
/// assert_eq!(key.as_str(), "VITE_API_URL");
///
/// assert!(ConfigKey::new("../etc/passwd").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ConfigKey(String);

impl ConfigKey {
    /// Creates a new ConfigKey from a string
    ///
    /// Surrounding whitespace is trimmed before validation.
    ///
    /// # Returns
    ///
    /// Returns `Ok(ConfigKey)` if the key is valid, `Err` with a reason otherwise
    pub fn new(key: impl Into<String>) -> Result<Self, String> {
        let key = key.into();
        let key = key.trim();

        if key.is_empty() {
            return Err("configuration key cannot be empty".to_string());
        }
        if key == "." || key == ".." {
            return Err(format!("configuration key '{key}' is not a valid file name"));
        }
        if let Some(bad) = key
            .chars()
            .find(|c| matches!(c, '/' | '\\' | '=' | '\0') || c.is_whitespace())
        {
            return Err(format!(
                "configuration key '{}' contains forbidden character {:?}",
                key.escape_debug(),
                bad
            ));
        }

        Ok(Self(key.to_string()))
    }

    /// Returns the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ConfigKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ConfigKey {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ConfigKey> for String {
    fn from(key: ConfigKey) -> Self {
        key.0
    }
}

impl AsRef<str> for ConfigKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
