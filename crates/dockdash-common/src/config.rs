//! Global configuration model for the dashboard server.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{DashError, Result};

/// Root configuration for a dashboard server process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Address the HTTP listener binds to.
    pub bind_addr: IpAddr,
    /// TCP port the HTTP listener binds to.
    pub port: u16,
    /// Seconds a started container may run before it is stopped.
    pub idle_budget_secs: u64,
    /// Directory holding the single-page UI bundle.
    pub static_dir: PathBuf,
    /// Number of trailing log lines returned per request.
    pub log_tail: usize,
}

impl DashboardConfig {
    /// Returns the idle budget as a [`Duration`].
    #[must_use]
    pub const fn idle_budget(&self) -> Duration {
        Duration::from_secs(self.idle_budget_secs)
    }

    /// Returns the socket address the server should listen on.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }

    /// Checks that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns [`DashError::Config`] if the idle budget or the log tail is zero.
    pub fn validate(&self) -> Result<()> {
        if self.idle_budget_secs == 0 {
            return Err(DashError::Config {
                message: "idle budget must be at least one second".to_string(),
            });
        }
        if self.log_tail == 0 {
            return Err(DashError::Config {
                message: "log tail must be at least one line".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            bind_addr: crate::constants::DEFAULT_BIND_ADDR
                .parse()
                .unwrap_or(IpAddr::from([0, 0, 0, 0])),
            port: crate::constants::DEFAULT_PORT,
            idle_budget_secs: crate::constants::DEFAULT_IDLE_BUDGET_SECS,
            static_dir: PathBuf::from(crate::constants::DEFAULT_STATIC_DIR),
            log_tail: crate::constants::DEFAULT_LOG_TAIL,
        }
    }
}
