//! Dependency-order resolution.

use crate::error::{Result, StaxError};
use crate::registry::StackRegistry;
use tracing::{debug, instrument};

/// Compute the ordered, de-duplicated sequence of stacks to deploy.
///
/// Dependencies come before their dependents; a stack reachable through
/// several paths is emitted once, at its first occurrence. With
/// `include_deps` false the result is just `[root]` and no manifest's
/// `depends` section is consulted.
///
/// # Errors
///
/// Returns an error if:
/// - The root stack cannot be resolved
/// - A dependency names a stack that does not exist (`MissingDependency`)
/// - The dependency graph contains a cycle (`CircularDependency`)
#[instrument(skip(registry))]
pub fn resolution_order(
    registry: &mut StackRegistry,
    root: &str,
    target: &str,
    include_deps: bool,
) -> Result<Vec<String>> {
    if !include_deps {
        return Ok(vec![root.to_string()]);
    }

    let mut order = Vec::new();
    let mut chain = Vec::new();
    visit(registry, root, target, &mut chain, &mut order)?;
    debug!(stacks = order.len(), "Resolved deployment order");
    Ok(order)
}

fn visit(
    registry: &mut StackRegistry,
    name: &str,
    target: &str,
    chain: &mut Vec<String>,
    order: &mut Vec<String>,
) -> Result<()> {
    // Already emitted earlier in the walk (diamond dependency).
    if order.iter().any(|s| s == name) {
        return Ok(());
    }

    // Still on the active path: a true cycle, not a diamond.
    if chain.iter().any(|s| s == name) {
        let mut cycle = chain.clone();
        cycle.push(name.to_string());
        return Err(StaxError::CircularDependency {
            stack: name.to_string(),
            chain: cycle.join(" -> "),
        });
    }

    chain.push(name.to_string());

    let dependencies = registry.resolve(name)?.manifest().depends_for(target).to_vec();
    for dependency in dependencies {
        match visit(registry, &dependency, target, chain, order) {
            Err(StaxError::StackNotFound { .. }) => {
                return Err(StaxError::MissingDependency {
                    stack: name.to_string(),
                    dependency,
                });
            }
            other => other?,
        }
    }

    chain.pop();
    order.push(name.to_string());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{root, write_stack};

    #[test]
    fn test_chain_order() {
        let temp = root();
        write_stack(temp.path(), "a", "depends:\n  prod:\n    - b\n");
        write_stack(temp.path(), "b", "depends:\n  prod:\n    - c\n");
        write_stack(temp.path(), "c", "{}");

        let mut registry = StackRegistry::new(temp.path());
        let order = resolution_order(&mut registry, "a", "prod", true).unwrap();
        assert_eq!(order, ["c", "b", "a"]);
    }

    #[test]
    fn test_diamond_deduplicated() {
        let temp = root();
        write_stack(temp.path(), "a", "depends:\n  prod:\n    - b\n    - c\n");
        write_stack(temp.path(), "b", "depends:\n  prod:\n    - d\n");
        write_stack(temp.path(), "c", "depends:\n  prod:\n    - d\n");
        write_stack(temp.path(), "d", "{}");

        let mut registry = StackRegistry::new(temp.path());
        let order = resolution_order(&mut registry, "a", "prod", true).unwrap();
        assert_eq!(order, ["d", "b", "c", "a"]);
        assert_eq!(order.iter().filter(|s| *s == "d").count(), 1);
    }

    #[test]
    fn test_duplicate_dependency_deduplicated() {
        let temp = root();
        write_stack(temp.path(), "a", "depends:\n  prod:\n    - b\n    - b\n");
        write_stack(temp.path(), "b", "{}");

        let mut registry = StackRegistry::new(temp.path());
        let order = resolution_order(&mut registry, "a", "prod", true).unwrap();
        assert_eq!(order, ["b", "a"]);
    }

    #[test]
    fn test_cycle_detected() {
        let temp = root();
        write_stack(temp.path(), "a", "depends:\n  prod:\n    - b\n");
        write_stack(temp.path(), "b", "depends:\n  prod:\n    - a\n");

        let mut registry = StackRegistry::new(temp.path());
        match resolution_order(&mut registry, "a", "prod", true).unwrap_err() {
            StaxError::CircularDependency { stack, chain } => {
                assert_eq!(stack, "a");
                assert_eq!(chain, "a -> b -> a");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_self_dependency_is_a_cycle() {
        let temp = root();
        write_stack(temp.path(), "a", "depends:\n  prod:\n    - a\n");

        let mut registry = StackRegistry::new(temp.path());
        match resolution_order(&mut registry, "a", "prod", true).unwrap_err() {
            StaxError::CircularDependency { chain, .. } => {
                assert_eq!(chain, "a -> a");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_no_deps_skips_manifests_entirely() {
        let temp = root();
        // No stacks on disk at all: with include_deps off, nothing is read.
        let mut registry = StackRegistry::new(temp.path());
        let order = resolution_order(&mut registry, "ghost", "prod", false).unwrap();
        assert_eq!(order, ["ghost"]);
    }

    #[test]
    fn test_missing_dependency() {
        let temp = root();
        write_stack(temp.path(), "a", "depends:\n  prod:\n    - ghost\n");

        let mut registry = StackRegistry::new(temp.path());
        match resolution_order(&mut registry, "a", "prod", true).unwrap_err() {
            StaxError::MissingDependency { stack, dependency } => {
                assert_eq!(stack, "a");
                assert_eq!(dependency, "ghost");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_missing_root_stack() {
        let temp = root();
        let mut registry = StackRegistry::new(temp.path());
        match resolution_order(&mut registry, "ghost", "prod", true).unwrap_err() {
            StaxError::StackNotFound { .. } => {}
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_absent_target_means_no_dependencies() {
        let temp = root();
        write_stack(temp.path(), "a", "depends:\n  dev:\n    - b\n");
        write_stack(temp.path(), "b", "{}");

        let mut registry = StackRegistry::new(temp.path());
        let order = resolution_order(&mut registry, "a", "prod", true).unwrap();
        assert_eq!(order, ["a"]);
    }
}
