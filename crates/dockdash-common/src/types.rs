//! Domain primitive types used across the dockdash workspace.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier of a container, as assigned by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContainerId(String);

impl ContainerId {
    /// Creates a new container ID from a string value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ContainerId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ContainerId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Returns whether an engine status string denotes a running container.
///
/// The engine reports running containers as `Up <duration>`, so the check
/// is a case-insensitive search for `up`.
#[must_use]
pub fn is_running_status(status: &str) -> bool {
    status.to_lowercase().contains("up")
}

/// A container as reported by the engine listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerSummary {
    /// Engine identifier.
    pub id: ContainerId,
    /// Primary name without the leading slash.
    pub name: String,
    /// Human-readable status text (`Up 2 minutes`, `Exited (0) ...`).
    pub status: String,
    /// Image reference the container was created from.
    pub image: String,
}

impl ContainerSummary {
    /// Returns whether the engine reports this container as running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        is_running_status(&self.status)
    }
}

/// A container row as served by `GET /api/containers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerOverview {
    /// Engine identifier.
    pub id: ContainerId,
    /// Primary name without the leading slash.
    pub name: String,
    /// Human-readable status text.
    pub status: String,
    /// Image reference.
    pub image: String,
    /// Seconds left before auto-stop, `None` when no timer is tracked.
    pub remaining_time: Option<u64>,
}

impl ContainerOverview {
    /// Combines an engine summary with the remaining auto-stop time.
    #[must_use]
    pub fn from_summary(summary: ContainerSummary, remaining_time: Option<u64>) -> Self {
        Self {
            id: summary.id,
            name: summary.name,
            status: summary.status,
            image: summary.image,
            remaining_time,
        }
    }

    /// Returns whether the engine reports this container as running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        is_running_status(&self.status)
    }
}

/// Body returned by the start and stop endpoints on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Confirmation text.
    pub message: String,
}

/// Body returned by the logs endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogsResponse {
    /// Newline-joined log lines.
    pub logs: String,
}

/// Body returned by the settings endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsResponse {
    /// Idle budget in whole seconds; the full length of every countdown.
    pub idle_budget: u64,
}

/// Body returned by any endpoint on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Generic error description.
    pub error: String,
}
