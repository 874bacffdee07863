//! stax core library
//!
//! Dependency resolution and deployment-plan construction for interdependent
//! Docker Swarm stacks composed from YAML fragments.

pub mod deploy;
pub mod docker;
pub mod error;
pub mod manifest;
pub mod plan;
pub mod registry;
pub mod resolve;

// Re-export commonly used items
pub use deploy::{execute, DeployInvoker, DockerStackDeploy};
pub use error::{Result, StaxError};
pub use manifest::{FragmentRef, Manifest, ManifestParser};
pub use plan::{plan, DeploymentPlan, DeploymentUnit};
pub use registry::{StackEntry, StackRegistry, FRAGMENT_DIR, MANIFEST_FILE};
pub use resolve::{resolution_order, resolve_fragments};

#[cfg(test)]
pub(crate) mod testutil;
