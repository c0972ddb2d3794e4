//! Formatted output helpers for CLI commands.

use std::fmt::Write;

use dockdash_common::types::ContainerOverview;

/// Number of id characters shown in tables, as the engine CLI does.
const SHORT_ID_LEN: usize = 12;

/// Formats remaining auto-stop seconds as `m:ss`, or `-` when untracked.
#[must_use]
pub fn format_remaining(seconds: Option<u64>) -> String {
    seconds.map_or_else(
        || "-".to_string(),
        |s| format!("{}:{:02}", s / 60, s % 60),
    )
}

/// Truncates an engine id for display.
#[must_use]
pub fn short_id(id: &str) -> &str {
    id.get(..SHORT_ID_LEN).unwrap_or(id)
}

/// Renders containers as a fixed-width table, header included.
#[must_use]
pub fn container_table(containers: &[ContainerOverview]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<14} {:<20} {:<28} {:<10} {:<24}",
        "CONTAINER ID", "NAME", "STATUS", "AUTO-STOP", "IMAGE"
    );
    for c in containers {
        let _ = writeln!(
            out,
            "{:<14} {:<20} {:<28} {:<10} {:<24}",
            short_id(c.id.as_str()),
            c.name,
            c.status,
            format_remaining(c.remaining_time),
            c.image
        );
    }
    out
}
