//! Container backends and idle auto-stop management for dockdash.
//!
//! - [`backend`]: the engine seam, with Docker and in-memory implementations.
//! - [`autostop`]: the registry that stops idle containers.
//! - [`engine`]: the operations the HTTP facade exposes.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod autostop;
pub mod backend;
pub mod engine;
pub mod logs;
pub mod timer;
