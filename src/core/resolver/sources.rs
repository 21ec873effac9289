//! Value sources
//!
//! A source answers one question for one key: do you have a value? Sources
//! are consulted in a fixed order by the [`Resolver`](super::Resolver);
//! neither source knows about the other.

use crate::config::{secret_string, SecretString};
use crate::domain::{ConfigKey, SourceKind};
use std::collections::HashMap;
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// A place a configuration value can come from
pub trait ValueSource: std::fmt::Debug {
    /// Which kind of source this is
    fn kind(&self) -> SourceKind;

    /// Looks up `key`. `None` means "not here, try the next source".
    fn lookup(&self, key: &ConfigKey) -> Option<SecretString>;
}

/// Reads `<root>/<key>` files, as mounted by Docker/Swarm secrets
#[derive(Debug, Clone)]
pub struct SecretFileSource {
    root: PathBuf,
}

impl SecretFileSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where the secret for `key` is expected
    pub fn path_for(&self, key: &ConfigKey) -> PathBuf {
        self.root.join(key.as_str())
    }
}

impl ValueSource for SecretFileSource {
    fn kind(&self) -> SourceKind {
        SourceKind::SecretFile
    }

    fn lookup(&self, key: &ConfigKey) -> Option<SecretString> {
        let path = self.path_for(key);

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                // Present but unreadable (permissions, a directory, ...)
                tracing::warn!(
                    key = %key,
                    path = %path.display(),
                    error = %e,
                    "Secret file exists but is not readable, falling back"
                );
                return None;
            }
        };

        match String::from_utf8(bytes) {
            Ok(mut contents) => {
                strip_line_terminator(&mut contents);
                Some(secret_string(contents))
            }
            Err(_) => {
                tracing::warn!(
                    key = %key,
                    path = %path.display(),
                    "Secret file is not valid UTF-8, falling back"
                );
                None
            }
        }
    }
}

/// Removes exactly one trailing `\n` or `\r\n`
fn strip_line_terminator(s: &mut String) {
    if s.ends_with('\n') {
        s.pop();
        if s.ends_with('\r') {
            s.pop();
        }
    }
}

/// Where environment variables are read from
#[derive(Debug, Clone)]
enum Environment {
    Process,
    Fixed(HashMap<String, String>),
}

/// Reads process environment variables named exactly like the key
///
/// Unset, empty and non-Unicode variables all count as absent.
#[derive(Debug, Clone)]
pub struct EnvironmentSource {
    env: Environment,
}

impl EnvironmentSource {
    /// Reads the live process environment
    pub fn process() -> Self {
        Self {
            env: Environment::Process,
        }
    }

    /// Reads from a fixed set of variables instead of the process environment
    pub fn from_vars<K, V>(vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            env: Environment::Fixed(
                vars.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    fn var(&self, name: &str) -> Option<String> {
        match &self.env {
            Environment::Process => match std::env::var_os(name).map(OsString::into_string) {
                Some(Ok(value)) => Some(value),
                Some(Err(_)) => {
                    tracing::warn!(key = %name, "Environment variable is not valid Unicode, ignoring");
                    None
                }
                None => None,
            },
            Environment::Fixed(vars) => vars.get(name).cloned(),
        }
    }
}

impl ValueSource for EnvironmentSource {
    fn kind(&self) -> SourceKind {
        SourceKind::EnvironmentVariable
    }

    fn lookup(&self, key: &ConfigKey) -> Option<SecretString> {
        self.var(key.as_str())
            .filter(|value| !value.is_empty())
            .map(secret_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use tempfile::TempDir;
    use test_case::test_case;

    fn key(name: &str) -> ConfigKey {
        ConfigKey::new(name).unwrap()
    }

    #[test_case("Acme\n", "Acme" ; "single newline")]
    #[test_case("Acme\r\n", "Acme" ; "crlf")]
    #[test_case("Acme\n\n", "Acme\n" ; "only one newline removed")]
    #[test_case("Acme", "Acme" ; "no newline")]
    #[test_case("  Acme  \n", "  Acme  " ; "spaces kept")]
    #[test_case("", "" ; "empty")]
    #[test_case("\n", "" ; "newline only")]
    #[test_case("line1\nline2\n", "line1\nline2" ; "multi line")]
    fn test_strip_line_terminator(input: &str, expected: &str) {
        let mut s = input.to_string();
        strip_line_terminator(&mut s);
        assert_eq!(s, expected);
    }

    #[test]
    fn test_secret_file_found() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("APP_NAME"), "Acme\n").unwrap();

        let source = SecretFileSource::new(dir.path());
        let value = source.lookup(&key("APP_NAME")).unwrap();
        assert_eq!(value.expose_secret(), "Acme");
        assert_eq!(source.kind(), SourceKind::SecretFile);
    }

    #[test]
    fn test_secret_file_missing() {
        let dir = TempDir::new().unwrap();
        let source = SecretFileSource::new(dir.path());
        assert!(source.lookup(&key("APP_NAME")).is_none());
    }

    #[test]
    fn test_empty_secret_file_is_a_value() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("FEATURE_FLAGS"), "").unwrap();

        let source = SecretFileSource::new(dir.path());
        let value = source.lookup(&key("FEATURE_FLAGS")).unwrap();
        assert!(value.expose_secret().is_empty());
    }

    #[test]
    fn test_secret_directory_is_not_a_value() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("APP_NAME")).unwrap();

        let source = SecretFileSource::new(dir.path());
        assert!(source.lookup(&key("APP_NAME")).is_none());
    }

    #[test]
    fn test_secret_file_invalid_utf8_is_skipped() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("BLOB"), [0xff, 0xfe, 0x00]).unwrap();

        let source = SecretFileSource::new(dir.path());
        assert!(source.lookup(&key("BLOB")).is_none());
    }

    #[test]
    fn test_path_for() {
        let source = SecretFileSource::new("/run/secrets");
        assert_eq!(
            source.path_for(&key("API_URL")),
            PathBuf::from("/run/secrets/API_URL")
        );
    }

    #[test]
    fn test_env_value_used_verbatim() {
        let source = EnvironmentSource::from_vars([("API_URL", " https://api.example.com\n")]);
        let value = source.lookup(&key("API_URL")).unwrap();
        assert_eq!(value.expose_secret(), " https://api.example.com\n");
        assert_eq!(source.kind(), SourceKind::EnvironmentVariable);
    }

    #[test]
    fn test_empty_env_value_is_absent() {
        let source = EnvironmentSource::from_vars([("API_URL", "")]);
        assert!(source.lookup(&key("API_URL")).is_none());
    }

    #[test]
    fn test_env_name_is_case_sensitive() {
        let source = EnvironmentSource::from_vars([("api_url", "x")]);
        assert!(source.lookup(&key("API_URL")).is_none());
    }

    #[test]
    fn test_process_environment() {
        std::env::set_var("ENVJECT_SOURCES_TEST_PROCESS_VAR", "from-process");
        let source = EnvironmentSource::process();
        let value = source
            .lookup(&key("ENVJECT_SOURCES_TEST_PROCESS_VAR"))
            .unwrap();
        assert_eq!(value.expose_secret(), "from-process");
        std::env::remove_var("ENVJECT_SOURCES_TEST_PROCESS_VAR");
    }
}
