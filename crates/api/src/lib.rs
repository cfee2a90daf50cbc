//! Inkmap API library.
//!
//! JSON handlers for the tattoo artist and shop directory, exposed as a
//! library so the binary, the operator CLI and the integration tests share
//! one router and one store abstraction.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

pub use app::build_app;
pub use state::AppState;
