//! Manifest loading
//!
//! The manifest declares which configuration keys a deployment must
//! supply. It is a YAML, JSON or TOML document holding either a bare list
//! of key names or a mapping whose list-valued fields hold them:
//!
//! ```yaml
//! secrets:
//!   - APP_NAME
//!   - API_URL
//! ```
//!
//! Field names such as `secrets` only label the list and are never keys.
//! Keys keep their first-occurrence order so the artifact is deterministic.

use crate::domain::{ConfigKey, EnvjectError, Result};
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Document syntax, picked from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Yaml,
    Json,
    Toml,
}

impl ManifestFormat {
    /// `.toml` and `.json` are recognised; everything else is read as YAML
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("toml") => Self::Toml,
            Some("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

/// Ordered, duplicate-free set of keys a deployment must supply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    path: PathBuf,
    keys: Vec<ConfigKey>,
}

impl Manifest {
    /// Builds a manifest from keys in declaration order.
    ///
    /// Later duplicates are dropped. An empty key set is malformed.
    pub fn from_keys(
        path: impl Into<PathBuf>,
        keys: impl IntoIterator<Item = ConfigKey>,
    ) -> Result<Self> {
        let path = path.into();
        let mut seen = HashSet::new();
        let mut unique = Vec::new();

        for key in keys {
            if seen.insert(key.clone()) {
                unique.push(key);
            } else {
                tracing::warn!(key = %key, path = %path.display(), "Duplicate key in manifest ignored");
            }
        }

        if unique.is_empty() {
            return Err(EnvjectError::malformed(path, "manifest declares no keys"));
        }

        Ok(Self { path, keys: unique })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn keys(&self) -> &[ConfigKey] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConfigKey> {
        self.keys.iter()
    }
}

/// Reads and parses the manifest at `path`
///
/// # Errors
///
/// - [`EnvjectError::ManifestNotFound`] if nothing exists at `path`
/// - [`EnvjectError::ManifestMalformed`] if it cannot be read or parsed,
///   contains a non-string or invalid key, or declares no keys
pub fn load_manifest(path: impl AsRef<Path>) -> Result<Manifest> {
    let path = path.as_ref();

    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(EnvjectError::ManifestNotFound(path.to_path_buf()))
        }
        Err(e) => return Err(EnvjectError::malformed(path, format!("cannot read: {e}"))),
    };

    let manifest = parse_manifest(path, &contents, ManifestFormat::from_path(path))?;
    tracing::info!(
        path = %path.display(),
        keys = manifest.len(),
        "Manifest loaded"
    );
    Ok(manifest)
}

/// Parses manifest text. `path` is only used for error reporting.
pub fn parse_manifest(path: &Path, contents: &str, format: ManifestFormat) -> Result<Manifest> {
    let document: Value = match format {
        ManifestFormat::Yaml => serde_yaml::from_str(contents).map_err(|e| e.to_string()),
        ManifestFormat::Json => serde_json::from_str(contents).map_err(|e| e.to_string()),
        ManifestFormat::Toml => toml::from_str(contents).map_err(|e| e.to_string()),
    }
    .map_err(|reason| EnvjectError::malformed(path, format!("parse error: {reason}")))?;

    let keys = extract_keys(path, &document)?;
    Manifest::from_keys(path, keys)
}

fn extract_keys(path: &Path, document: &Value) -> Result<Vec<ConfigKey>> {
    let mut keys = Vec::new();

    match document {
        Value::Array(items) => collect_list(path, None, items, &mut keys)?,
        Value::Object(fields) => {
            for (field, value) in fields {
                match value {
                    Value::Array(items) => collect_list(path, Some(field), items, &mut keys)?,
                    _ => tracing::debug!(field = %field, "Ignoring non-list manifest field"),
                }
            }
        }
        Value::Null => {}
        _ => {
            return Err(EnvjectError::malformed(
                path,
                "expected a list of keys or a mapping of key lists",
            ))
        }
    }

    Ok(keys)
}

fn collect_list(
    path: &Path,
    field: Option<&str>,
    items: &[Value],
    keys: &mut Vec<ConfigKey>,
) -> Result<()> {
    let location = |index: usize| match field {
        Some(f) => format!("{f}[{index}]"),
        None => format!("[{index}]"),
    };

    for (index, item) in items.iter().enumerate() {
        let raw = item.as_str().ok_or_else(|| {
            EnvjectError::malformed(
                path,
                format!("{} must be a string, found {}", location(index), item),
            )
        })?;
        let key = ConfigKey::new(raw)
            .map_err(|reason| EnvjectError::malformed(path, format!("{}: {reason}", location(index))))?;
        keys.push(key);
    }

    Ok(())
}
