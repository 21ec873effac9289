//! Artifact rendering and writing
//!
//! The script format defines the contract with the browser runtime: after
//! the file runs, `globalThis[namespace][sub_namespace][KEY]` holds every
//! resolved value as a string. Existing namespace objects are reused so
//! values set by other scripts survive; anything that is not an object is
//! replaced.
//!
//! Keys and values are emitted as JSON string literals, which are also
//! valid JavaScript string literals. On top of JSON's escaping, `<`,
//! U+2028 and U+2029 are written as `\uXXXX` so the output stays safe when
//! inlined into an HTML `<script>` element and on pre-ES2019 engines.

use crate::config::{ArtifactConfig, ArtifactFormat};
use crate::core::resolver::Resolution;
use crate::domain::{EnvjectError, Result};
use sha2::{Digest, Sha256};
use std::fmt::Write as _;
use std::fs;
use std::io::Write as _;
use std::path::Path;

const SCRIPT_HEADER: &str =
    "// Generated by envject. Do not edit: this file is rewritten on every start.\n";

const GLOBAL_OBJECT: &str = "typeof globalThis !== \"undefined\" ? globalThis : \
typeof window !== \"undefined\" ? window : this";

/// Rendering options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub format: ArtifactFormat,
    pub namespace: String,
    pub sub_namespace: String,
}

impl From<&ArtifactConfig> for RenderOptions {
    fn from(config: &ArtifactConfig) -> Self {
        Self {
            format: config.format,
            namespace: config.namespace.clone(),
            sub_namespace: config.sub_namespace.clone(),
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from(&ArtifactConfig::default())
    }
}

/// A fully rendered artifact, ready to be written
#[derive(Clone)]
pub struct Artifact {
    format: ArtifactFormat,
    contents: String,
    entries: usize,
}

impl Artifact {
    pub fn format(&self) -> ArtifactFormat {
        self.format
    }

    /// Rendered text. Contains plaintext secrets.
    pub fn contents(&self) -> &str {
        &self.contents
    }

    /// Number of keys embedded
    pub fn entries(&self) -> usize {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// Lowercase hex SHA-256 of the contents
    pub fn sha256(&self) -> String {
        let digest = Sha256::digest(self.contents.as_bytes());
        format!("{digest:x}")
    }
}

impl std::fmt::Debug for Artifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Artifact")
            .field("format", &self.format)
            .field("entries", &self.entries)
            .field("bytes", &self.contents.len())
            .finish()
    }
}

/// Renders a resolution into an artifact
pub fn render(resolution: &Resolution, options: &RenderOptions) -> Result<Artifact> {
    let contents = match options.format {
        ArtifactFormat::Script => render_script(resolution, options)?,
        ArtifactFormat::Json => render_json(resolution)?,
    };

    Ok(Artifact {
        format: options.format,
        contents,
        entries: resolution.len(),
    })
}

fn render_script(resolution: &Resolution, options: &RenderOptions) -> Result<String> {
    let ns = js_string(&options.namespace)?;
    let sub = js_string(&options.sub_namespace)?;

    let mut out = String::with_capacity(256 + resolution.len() * 64);
    out.push_str(SCRIPT_HEADER);
    out.push_str("(function (root) {\n");
    let _ = writeln!(out, "  var ns = root[{ns}];");
    out.push_str("  if (ns === null || typeof ns !== \"object\") {\n");
    out.push_str("    ns = {};\n");
    let _ = writeln!(out, "    root[{ns}] = ns;");
    out.push_str("  }\n");
    let _ = writeln!(out, "  var env = ns[{sub}];");
    out.push_str("  if (env === null || typeof env !== \"object\") {\n");
    out.push_str("    env = {};\n");
    let _ = writeln!(out, "    ns[{sub}] = env;");
    out.push_str("  }\n");

    for resolved in resolution.iter() {
        let key = js_string(resolved.key().as_str())?;
        let value = js_string(resolved.expose_value())?;
        let _ = writeln!(out, "  env[{key}] = {value};");
    }

    let _ = writeln!(out, "}})({GLOBAL_OBJECT});");
    Ok(out)
}

fn render_json(resolution: &Resolution) -> Result<String> {
    let map: serde_json::Map<String, serde_json::Value> = resolution
        .iter()
        .map(|r| {
            (
                r.key().to_string(),
                serde_json::Value::String(r.expose_value().to_string()),
            )
        })
        .collect();

    let mut out = serde_json::to_string_pretty(&map)
        .map_err(|e| EnvjectError::Io(format!("Failed to serialize artifact: {e}")))?;
    out.push('\n');
    Ok(js_safe(out))
}

/// Encodes `s` as a double-quoted literal valid in both JSON and JavaScript
pub fn js_string(s: &str) -> Result<String> {
    let literal = serde_json::to_string(s)
        .map_err(|e| EnvjectError::Io(format!("Failed to encode string literal: {e}")))?;
    Ok(js_safe(literal))
}

/// Escapes the characters JSON leaves alone but script embedding does not
/// tolerate. Only valid on text where they can appear inside string literals.
fn js_safe(json: String) -> String {
    if !json.contains(['<', '\u{2028}', '\u{2029}']) {
        return json;
    }
    json.replace('<', "\\u003c")
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029")
}

/// Writes `artifact` to `path` atomically
///
/// The contents go to a temporary file in the same directory, are synced,
/// and then renamed over `path`, so readers see either the previous file or
/// the complete new one. Missing parent directories are created. On Unix the
/// result is world-readable (0644) since a web server serves it.
pub fn write_artifact(path: &Path, artifact: &Artifact) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => std::path::PathBuf::from("."),
    };

    fs::create_dir_all(&parent).map_err(|e| EnvjectError::artifact_write(path, e))?;

    let mut temp = tempfile::Builder::new()
        .prefix(".envject-")
        .suffix(".tmp")
        .tempfile_in(&parent)
        .map_err(|e| EnvjectError::artifact_write(path, e))?;

    temp.write_all(artifact.contents().as_bytes())
        .map_err(|e| EnvjectError::artifact_write(path, e))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| EnvjectError::artifact_write(path, e))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        temp.as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))
            .map_err(|e| EnvjectError::artifact_write(path, e))?;
    }

    temp.persist(path)
        .map_err(|e| EnvjectError::artifact_write(path, e.error))?;

    tracing::info!(
        path = %path.display(),
        entries = artifact.entries(),
        bytes = artifact.len(),
        sha256 = %artifact.sha256(),
        "Artifact written"
    );
    Ok(())
}
