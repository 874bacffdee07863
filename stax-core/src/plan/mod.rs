//! Deployment plan construction.
//!
//! A plan is built in full before anything is handed to an invoker: a
//! resolution failure anywhere means no stack gets deployed at all.

use crate::error::Result;
use crate::registry::StackRegistry;
use crate::resolve::{resolution_order, resolve_fragments};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, instrument};

/// One stack ready to deploy: its name and resolved fragment paths in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentUnit {
    /// Stack name, passed to `docker stack deploy` as the stack argument.
    pub stack: String,

    /// Fragment paths in manifest order, one `-c` flag each.
    pub fragments: Vec<PathBuf>,
}

impl DeploymentUnit {
    /// Argument vector of the deploy command for this unit.
    pub fn command_line(&self) -> Vec<String> {
        let mut argv = vec!["docker".to_string(), "stack".to_string(), "deploy".to_string()];
        for fragment in &self.fragments {
            argv.push("-c".to_string());
            argv.push(fragment.display().to_string());
        }
        argv.push(self.stack.clone());
        argv
    }
}

/// Ordered deployment plan: dependencies first, no stack repeated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentPlan {
    pub units: Vec<DeploymentUnit>,
}

impl DeploymentPlan {
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Stack names in deployment order.
    pub fn stacks(&self) -> impl Iterator<Item = &str> + '_ {
        self.units.iter().map(|unit| unit.stack.as_str())
    }
}

/// Build the full deployment plan for a stack and target.
///
/// Resolves the dependency order, then each stack's fragments for `target`,
/// in that order. Fails on the first error with no partial plan.
#[instrument(skip(registry))]
pub fn plan(
    registry: &mut StackRegistry,
    root: &str,
    target: &str,
    include_deps: bool,
) -> Result<DeploymentPlan> {
    let order = resolution_order(registry, root, target, include_deps)?;

    let mut units = Vec::with_capacity(order.len());
    for stack in order {
        let fragments = resolve_fragments(registry, &stack, target)?;
        units.push(DeploymentUnit { stack, fragments });
    }

    info!(stacks = units.len(), target = %target, "Deployment plan ready");
    Ok(DeploymentPlan { units })
}
