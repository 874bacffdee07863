//! Deploy command: resolve a stack tree into a plan and run it.

use anyhow::{Context, Result};
use colored::Colorize;
use stax_core::{docker, execute, plan, DeploymentPlan, DockerStackDeploy, StackRegistry};
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};

/// Plan and deploy a stack for a target.
pub fn run(stack_path: &str, target: &str, no_deps: bool, dry_run: bool) -> Result<()> {
    // Plan construction only touches the filesystem; dry runs work without Docker.
    if !dry_run {
        docker::check_docker()?;
    }

    let (root, stack) = locate_stack(Path::new(stack_path))?;

    let mut registry = StackRegistry::new(&root);
    let plan = plan(&mut registry, &stack, target, !no_deps)
        .with_context(|| format!("Failed to plan deployment of stack '{}'", stack))?;

    println!(
        "{} Deploying {} stack(s): {}",
        "→".cyan().bold(),
        plan.len(),
        plan.stacks().collect::<Vec<_>>().join(", ").dimmed()
    );
    println!();
    print_plan(&plan, &root);
    println!();

    execute(&plan, &DockerStackDeploy, dry_run)?;

    println!();
    if dry_run {
        println!("{}", "Dry run; nothing was deployed".dimmed());
    } else {
        println!("{} Deployed {} stack(s)", "✓".green().bold(), plan.len());
    }

    Ok(())
}

/// Split a stack directory path into the common root and the stack name.
///
/// The stack argument is a path to the stack directory; every stack it
/// depends on must live beside it under the same parent directory.
fn locate_stack(path: &Path) -> Result<(PathBuf, String)> {
    let dir = path
        .canonicalize()
        .with_context(|| format!("No such stack: {}", path.display()))?;

    let name = dir
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .with_context(|| format!("Not a stack directory: {}", dir.display()))?;

    let root = dir
        .parent()
        .map(Path::to_path_buf)
        .with_context(|| format!("Stack directory has no parent: {}", dir.display()))?;

    Ok((root, name))
}

/// Render the plan as a table, fragments shown relative to the root.
fn print_plan(plan: &DeploymentPlan, root: &Path) {
    #[derive(Tabled)]
    struct UnitRow {
        #[tabled(rename = "STACK")]
        stack: String,
        #[tabled(rename = "FRAGMENTS")]
        fragments: String,
    }

    let rows: Vec<UnitRow> = plan
        .units
        .iter()
        .map(|unit| UnitRow {
            stack: unit.stack.clone(),
            fragments: unit
                .fragments
                .iter()
                .map(|fragment| {
                    fragment
                        .strip_prefix(root)
                        .unwrap_or(fragment)
                        .display()
                        .to_string()
                })
                .collect::<Vec<_>>()
                .join(", "),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_locate_stack() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("app");
        std::fs::create_dir(&dir).unwrap();

        let (root, name) = locate_stack(&dir).unwrap();
        assert_eq!(name, "app");
        assert_eq!(root, temp.path().canonicalize().unwrap());
    }

    #[test]
    fn test_locate_stack_trailing_slash() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("app");
        std::fs::create_dir(&dir).unwrap();

        // A trailing slash must not change the derived name.
        let (_, name) = locate_stack(&temp.path().join("app/")).unwrap();
        assert_eq!(name, "app");
    }

    #[test]
    fn test_locate_stack_missing() {
        assert!(locate_stack(Path::new("/definitely/not/here")).is_err());
    }
}
