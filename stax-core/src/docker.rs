//! Docker preflight checks.
//!
//! `docker stack deploy` needs an API new enough for swarm-mode stacks on
//! both sides of the socket, so the version report is checked up front.

use crate::error::{Result, StaxError};
use serde::Deserialize;
use std::io;
use std::process::Command;
use tracing::debug;

/// Minimum Docker API version with full `docker stack deploy` support.
pub const MIN_API_VERSION: f64 = 1.25;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct VersionReport {
    client: ClientVersion,
    #[serde(default)]
    server: Option<ServerVersion>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ClientVersion {
    api_version: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ServerVersion {
    #[serde(default)]
    components: Vec<Component>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Component {
    name: String,
    #[serde(default)]
    details: ComponentDetails,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ComponentDetails {
    #[serde(default)]
    api_version: Option<String>,
}

/// Verify that Docker is installed and both the client and the server engine
/// speak a supported API version.
///
/// # Errors
///
/// Returns an error if:
/// - The `docker` binary is not on PATH (`DockerMissing`)
/// - `docker version` fails or prints something unparseable (`DockerUnavailable`)
/// - Either API version is below [`MIN_API_VERSION`] (`UnsupportedDockerApi`)
pub fn check_docker() -> Result<()> {
    let output = Command::new("docker")
        .args(["version", "--format", "{{json .}}"])
        .output()
        .map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => StaxError::DockerMissing,
            _ => StaxError::DockerUnavailable { reason: e.to_string() },
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(StaxError::DockerUnavailable { reason: stderr.trim().to_string() });
    }

    let report: VersionReport = serde_json::from_slice(&output.stdout).map_err(|e| {
        StaxError::DockerUnavailable {
            reason: format!("unexpected `docker version` output: {}", e),
        }
    })?;

    check_api_version("Client", &report.client.api_version)?;

    if let Some(server) = &report.server {
        for component in &server.components {
            if component.name == "Engine" {
                if let Some(version) = &component.details.api_version {
                    check_api_version("Engine", version)?;
                }
            }
        }
    }

    debug!("Docker preflight passed");
    Ok(())
}

fn check_api_version(component: &str, version: &str) -> Result<()> {
    let parsed: f64 = version.parse().map_err(|_| StaxError::DockerUnavailable {
        reason: format!("unparseable {} API version: {}", component, version),
    })?;

    if parsed < MIN_API_VERSION {
        return Err(StaxError::UnsupportedDockerApi {
            component: component.to_string(),
            version: version.to_string(),
        });
    }

    Ok(())
}
