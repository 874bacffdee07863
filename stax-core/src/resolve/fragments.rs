//! Fragment-list resolution.

use crate::error::{Result, StaxError};
use crate::registry::StackRegistry;
use std::path::PathBuf;
use tracing::{debug, instrument};

/// Resolve a stack's fragment list for `target` into ordered file paths.
///
/// Each reference resolves against its owning stack's fragment directory
/// (the current stack for unqualified references). Manifest order is
/// preserved exactly and duplicates are kept: fragment order carries
/// override semantics, so a fragment listed twice is passed twice.
///
/// # Errors
///
/// Returns an error if:
/// - The stack (or a referenced owner stack) cannot be resolved
/// - The target key is entirely absent from `deploy` (`NoSuchTarget`);
///   a present-but-empty list is legal and yields an empty sequence
/// - A resolved fragment file does not exist (`FragmentNotFound`)
#[instrument(skip(registry))]
pub fn resolve_fragments(
    registry: &mut StackRegistry,
    stack: &str,
    target: &str,
) -> Result<Vec<PathBuf>> {
    let refs = match registry.resolve(stack)?.manifest().deploy_for(target) {
        Some(refs) => refs.to_vec(),
        None => {
            return Err(StaxError::NoSuchTarget {
                stack: stack.to_string(),
                target: target.to_string(),
            });
        }
    };

    let mut paths = Vec::with_capacity(refs.len());
    for fragment in &refs {
        let owner = fragment.stack().unwrap_or(stack);
        let path = registry.resolve(owner)?.fragment_dir().join(fragment.file());
        if !path.is_file() {
            return Err(StaxError::FragmentNotFound { path });
        }
        debug!(stack = %stack, fragment = %fragment, path = %path.display(), "Resolved fragment");
        paths.push(path);
    }

    Ok(paths)
}
