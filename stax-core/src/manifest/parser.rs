//! Stack manifest parser.
//!
//! Parses `deploy.yml` manifests and validates their shape.

use super::types::Manifest;
use crate::error::{Result, StaxError};
use std::path::Path;
use tracing::instrument;

/// Parser for `deploy.yml` manifests.
pub struct ManifestParser;

impl ManifestParser {
    /// Parse a manifest from a string.
    ///
    /// The top level may contain only the keys `depends` and `deploy`, each a
    /// mapping from target name to a list of strings. Any other shape fails
    /// with `ManifestParseError`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The YAML is invalid
    /// - The document contains keys other than `depends` / `deploy`
    /// - A section value or list entry has the wrong type
    /// - A target name is empty, or an entry is not a valid stack name or
    ///   fragment reference
    #[instrument(skip(content))]
    pub fn parse(content: &str) -> Result<Manifest> {
        let manifest: Manifest = serde_yaml::from_str(content)
            .map_err(|e| StaxError::ManifestParseError { reason: e.to_string() })?;

        Self::validate(&manifest)?;

        Ok(manifest)
    }

    /// Parse a manifest from a file path.
    #[instrument]
    pub fn parse_file<P: AsRef<Path> + std::fmt::Debug>(path: P) -> Result<Manifest> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| StaxError::Io { path: path.to_path_buf(), source: e })?;

        Self::parse(&content)
    }

    /// Validate what serde's shape checks cannot express: target names must
    /// be non-empty, and dependency entries must be plain stack names.
    fn validate(manifest: &Manifest) -> Result<()> {
        for target in manifest.depends.keys().chain(manifest.deploy.keys()) {
            if target.is_empty() {
                return Err(StaxError::ManifestParseError {
                    reason: "empty target name".to_string(),
                });
            }
        }

        for (target, dependencies) in &manifest.depends {
            for dependency in dependencies {
                if dependency.is_empty() || dependency.contains('/') {
                    return Err(StaxError::ManifestParseError {
                        reason: format!(
                            "invalid stack name '{}' under depends.{}",
                            dependency, target
                        ),
                    });
                }
            }
        }

        Ok(())
    }
}
