//! Shared helpers for building stack trees in tests.

use crate::deploy::DeployInvoker;
use crate::error::Result;
use crate::plan::DeploymentUnit;
use crate::registry::{FRAGMENT_DIR, MANIFEST_FILE};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Fresh temporary root directory for a stack tree.
pub fn root() -> TempDir {
    tempfile::tempdir().expect("create temp root")
}

/// Create `<root>/<name>` with a `stack.d` directory and the given manifest.
pub fn write_stack(root: &Path, name: &str, manifest: &str) -> PathBuf {
    let dir = root.join(name);
    fs::create_dir_all(dir.join(FRAGMENT_DIR)).expect("create stack dirs");
    fs::write(dir.join(MANIFEST_FILE), manifest).expect("write manifest");
    dir
}

/// Create a fragment file inside a stack's `stack.d` directory.
pub fn write_fragment(root: &Path, stack: &str, file: &str) -> PathBuf {
    let path = root.join(stack).join(FRAGMENT_DIR).join(file);
    fs::write(&path, "services: {}\n").expect("write fragment");
    path
}

/// Invoker that records the stacks it was asked to deploy.
#[derive(Default)]
pub struct RecordingInvoker {
    pub calls: RefCell<Vec<String>>,
}

impl DeployInvoker for RecordingInvoker {
    fn deploy(&self, unit: &DeploymentUnit, _dry_run: bool) -> Result<()> {
        self.calls.borrow_mut().push(unit.stack.clone());
        Ok(())
    }
}
