//! Stack registry: lazy, per-run loading and caching of stack manifests.
//!
//! The registry is handed the common root directory explicitly; stack names
//! resolve to `<root>/<name>`. Entries are cached for the lifetime of one
//! invocation and never evicted or persisted.

use crate::error::{Result, StaxError};
use crate::manifest::{Manifest, ManifestParser};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Manifest file name expected inside each stack directory.
pub const MANIFEST_FILE: &str = "deploy.yml";

/// Subdirectory of a stack holding its fragment files.
pub const FRAGMENT_DIR: &str = "stack.d";

/// One resolved stack: its directories and parsed manifest.
#[derive(Debug, Clone)]
pub struct StackEntry {
    name: String,
    dir: PathBuf,
    fragment_dir: PathBuf,
    manifest: Manifest,
}

impl StackEntry {
    /// Stack name (directory name under the root).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stack directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Directory holding this stack's fragment files.
    pub fn fragment_dir(&self) -> &Path {
        &self.fragment_dir
    }

    /// Parsed manifest.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }
}

/// Registry of stacks under a common root directory.
#[derive(Debug)]
pub struct StackRegistry {
    root: PathBuf,
    cache: HashMap<String, StackEntry>,
}

impl StackRegistry {
    /// Create a registry for stacks under `root`.
    ///
    /// Resolved paths are absolute whenever `root` is; callers that need
    /// absolute fragment paths should hand in a canonicalized root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into(), cache: HashMap::new() }
    }

    /// The common root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a stack by name, loading and caching its manifest on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `<root>/<name>` is not a directory (`StackNotFound`)
    /// - the directory has no `deploy.yml` (`ManifestMissing`)
    /// - the manifest fails to parse (`InvalidManifest`, tagged with the
    ///   stack name)
    pub fn resolve(&mut self, name: &str) -> Result<&StackEntry> {
        if self.cache.contains_key(name) {
            return Ok(&self.cache[name]);
        }

        let entry = self.load(name)?;
        debug!(stack = %name, dir = %entry.dir.display(), "Loaded stack manifest");
        Ok(self.cache.entry(name.to_string()).or_insert(entry))
    }

    fn load(&self, name: &str) -> Result<StackEntry> {
        let dir = self.root.join(name);
        if !dir.is_dir() {
            return Err(StaxError::StackNotFound { path: dir });
        }

        let manifest_path = dir.join(MANIFEST_FILE);
        if !manifest_path.is_file() {
            return Err(StaxError::ManifestMissing { path: manifest_path });
        }

        let manifest = ManifestParser::parse_file(&manifest_path).map_err(|e| match e {
            StaxError::ManifestParseError { reason } => {
                StaxError::InvalidManifest { stack: name.to_string(), reason }
            }
            other => other,
        })?;

        Ok(StackEntry {
            name: name.to_string(),
            fragment_dir: dir.join(FRAGMENT_DIR),
            dir,
            manifest,
        })
    }
}
