//! Human-facing audit trail
//!
//! One line per key saying which source satisfied it, and on failure which
//! key is missing and how to provide it. The stream is for people reading
//! container logs; nothing parses it, and a failed write never changes the
//! outcome of a run. Values are never written here.

use crate::domain::{ConfigKey, SourceKind};
use std::io::{self, Write};
use std::path::Path;

/// Writer for diagnostic lines (stderr unless redirected)
pub struct Diagnostics {
    out: Box<dyn Write + Send>,
}

impl Diagnostics {
    /// Diagnostics on standard error
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }

    /// Diagnostics that go nowhere
    pub fn discard() -> Self {
        Self::new(io::sink())
    }

    pub fn new(out: impl Write + Send + 'static) -> Self {
        Self { out: Box::new(out) }
    }

    /// Records that `key` was satisfied by `source`
    pub fn resolved(&mut self, key: &ConfigKey, source: SourceKind) {
        tracing::debug!(key = %key, source = %source, "Key resolved");
        self.line(format_args!("✅ {key}: resolved from {source}"));
    }

    /// Records that no source satisfied `key`, with both ways to fix it
    pub fn unresolved(&mut self, key: &ConfigKey, secrets_dir: &Path) {
        tracing::error!(key = %key, "Key unresolved");
        self.line(format_args!("❌ {key}: no value found"));
        self.line(format_args!(
            "   Mount a secret file at {}",
            secrets_dir.join(key.as_str()).display()
        ));
        self.line(format_args!("   or set the environment variable {key}"));
    }

    /// Free-form line
    pub fn note(&mut self, message: &str) {
        self.line(format_args!("{message}"));
    }

    fn line(&mut self, args: std::fmt::Arguments<'_>) {
        // Write errors are deliberately dropped
        let _ = self.out.write_fmt(args).and_then(|_| self.out.write_all(b"\n"));
    }
}

impl std::fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Diagnostics").finish_non_exhaustive()
    }
}


#[cfg(test)]
mod tests {
    use super::testing::Captured;
    use super::*;

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_resolved_line() {
        let captured = Captured::default();
        let mut diagnostics = Diagnostics::new(captured.clone());
        diagnostics.resolved(&ConfigKey::new("APP_NAME").unwrap(), SourceKind::SecretFile);
        assert_eq!(captured.text(), "✅ APP_NAME: resolved from secret file\n");
    }

    #[test]
    fn test_unresolved_lines_include_hints() {
        let captured = Captured::default();
        let mut diagnostics = Diagnostics::new(captured.clone());
        diagnostics.unresolved(&ConfigKey::new("APP_NAME").unwrap(), Path::new("/run/secrets"));

        let text = captured.text();
        assert!(text.contains("APP_NAME: no value found"));
        assert!(text.contains("/run/secrets/APP_NAME"));
        assert!(text.contains("environment variable APP_NAME"));
    }

    #[test]
    fn test_write_failures_are_ignored() {
        let mut diagnostics = Diagnostics::new(Broken);
        diagnostics.resolved(&ConfigKey::new("K").unwrap(), SourceKind::EnvironmentVariable);
        diagnostics.note("still fine");
    }
}
