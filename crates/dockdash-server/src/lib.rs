//! # dockdash-server
//!
//! HTTP facade for the container dashboard.
//!
//! Serves the JSON API under `/api/containers` and the single-page UI from
//! a static directory. Every engine failure is turned into a uniform
//! `500 {"error": ...}` response by [`error::ApiError`].

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod api;
pub mod error;
pub mod handlers;
pub mod server;

pub use api::{AppState, create_router};
pub use server::DashboardServer;
