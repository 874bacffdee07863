//! Error types for stax.
//!
//! All errors use `thiserror` for ergonomic error handling and proper error chains.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for stax operations.
pub type Result<T> = std::result::Result<T, StaxError>;

/// Main error type for stax.
///
/// Every variant is a terminal configuration or environment error; nothing is
/// retried, everything propagates to the invocation boundary.
#[derive(Error, Debug)]
pub enum StaxError {
    // Manifest errors
    #[error("Manifest parse error: {reason}")]
    ManifestParseError { reason: String },

    #[error("Invalid manifest for stack '{stack}': {reason}")]
    InvalidManifest { stack: String, reason: String },

    // Stack lookup errors
    #[error("Stack not found: {path:?}")]
    StackNotFound { path: PathBuf },

    #[error("No stack manifest at {path:?}")]
    ManifestMissing { path: PathBuf },

    // Dependency resolution errors
    #[error("Circular dependency on stack '{stack}'. Dependency chain: {chain}")]
    CircularDependency { stack: String, chain: String },

    #[error("Missing dependency: stack '{stack}' depends on '{dependency}' which does not exist")]
    MissingDependency { stack: String, dependency: String },

    // Fragment errors
    #[error("No target '{target}' for stack '{stack}'")]
    NoSuchTarget { stack: String, target: String },

    #[error("No such fragment: {path:?}")]
    FragmentNotFound { path: PathBuf },

    // Deploy invocation errors
    #[error("Failed to invoke docker for stack '{stack}': {source}")]
    InvokerSpawn {
        stack: String,
        #[source]
        source: std::io::Error,
    },

    #[error("docker stack deploy failed for stack '{stack}' (exit code {code})")]
    DeployFailed { stack: String, code: i32 },

    // Docker preflight errors
    #[error("Docker is required but was not found on PATH")]
    DockerMissing,

    #[error("Docker is unavailable: {reason}")]
    DockerUnavailable { reason: String },

    #[error("Docker {component} API version {version} is not supported; must be >= 1.25")]
    UnsupportedDockerApi { component: String, version: String },

    // File system errors
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
