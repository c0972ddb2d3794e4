//! Unified error types for the dockdash workspace.
//!
//! Every engine-facing failure is expressed as a [`DashError`]. The HTTP
//! layer flattens these into a uniform error body, so the variants exist for
//! logging and for callers that want to branch on the cause.

use std::net::SocketAddr;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum DashError {
    /// The container engine could not be reached at all.
    #[error("container engine unavailable: {message}")]
    EngineUnavailable {
        /// Description of the transport failure.
        message: String,
    },

    /// The container engine rejected or failed an operation.
    #[error("engine {operation} failed for {id}: {message}")]
    EngineOperation {
        /// Operation that failed (`start`, `stop`, `list`, `logs`).
        operation: &'static str,
        /// Container the operation targeted, or `*` for listings.
        id: String,
        /// Message reported by the engine.
        message: String,
    },

    /// A required resource was not found.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Type of the missing resource.
        kind: &'static str,
        /// Identifier of the missing resource.
        id: String,
    },

    /// A configuration value is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// The HTTP listener could not be bound or failed while serving.
    #[error("network error on {addr}: {source}")]
    Network {
        /// Address the server was bound or binding to.
        addr: SocketAddr,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Serialization or deserialization failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}

impl DashError {
    /// Builds an [`DashError::EngineOperation`] for the given container.
    #[must_use]
    pub fn operation(
        operation: &'static str,
        id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::EngineOperation {
            operation,
            id: id.into(),
            message: message.into(),
        }
    }

    /// Builds a [`DashError::NotFound`] for an unknown container.
    #[must_use]
    pub fn unknown_container(id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "container",
            id: id.into(),
        }
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, DashError>;
