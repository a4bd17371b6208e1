//! Golden Crumb Storefront - JSON API server library.
//!
//! The binary in `main.rs` wires configuration, tracing, and Sentry around
//! [`app::build_router`]. The library is split out so the CLI can reuse the
//! database layer and integration tests can drive the router in-process.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

pub use app::build_router;
pub use config::StorefrontConfig;
pub use state::AppState;
