//! System-wide constants and defaults.

/// Default TCP port the dashboard listens on.
pub const DEFAULT_PORT: u16 = 3001;

/// Default bind address for the dashboard listener.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0";

/// Default idle budget, in seconds, before a started container is stopped.
pub const DEFAULT_IDLE_BUDGET_SECS: u64 = 5 * 60;

/// Number of log lines returned by the logs endpoint.
pub const DEFAULT_LOG_TAIL: usize = 100;

/// Directory the single-page UI is served from.
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Base URL the CLI client commands talk to.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:3001";

/// Prefix shared by every JSON API route.
pub const API_PREFIX: &str = "/api";

/// Binary name for the CLI.
pub const BIN_NAME: &str = "dockdash";
