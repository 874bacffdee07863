//! Plan execution via `docker stack deploy`.

use crate::error::{Result, StaxError};
use crate::plan::{DeploymentPlan, DeploymentUnit};
use std::process::Command;
use tracing::info;

/// Hands one deployment unit to the orchestration platform.
///
/// The seam exists so plan execution can be exercised without Docker.
pub trait DeployInvoker {
    /// Deploy a single unit. With `dry_run` set, only report what would run.
    fn deploy(&self, unit: &DeploymentUnit, dry_run: bool) -> Result<()>;
}

/// Invoker that shells out to `docker stack deploy`.
pub struct DockerStackDeploy;

impl DeployInvoker for DockerStackDeploy {
    fn deploy(&self, unit: &DeploymentUnit, dry_run: bool) -> Result<()> {
        println!("-- {}", unit.command_line().join(" "));
        if dry_run {
            return Ok(());
        }

        info!(stack = %unit.stack, fragments = unit.fragments.len(), "Invoking docker stack deploy");

        let mut cmd = Command::new("docker");
        cmd.args(["stack", "deploy"]);
        for fragment in &unit.fragments {
            cmd.arg("-c").arg(fragment);
        }
        cmd.arg(&unit.stack);

        let status = cmd
            .status()
            .map_err(|e| StaxError::InvokerSpawn { stack: unit.stack.clone(), source: e })?;

        if !status.success() {
            return Err(StaxError::DeployFailed {
                stack: unit.stack.clone(),
                code: status.code().unwrap_or(-1),
            });
        }

        Ok(())
    }
}

/// Deploy every unit of a fully resolved plan, in order, stopping at the
/// first failure.
pub fn execute(plan: &DeploymentPlan, invoker: &dyn DeployInvoker, dry_run: bool) -> Result<()> {
    for unit in &plan.units {
        invoker.deploy(unit, dry_run)?;
    }
    Ok(())
}
