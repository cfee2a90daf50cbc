//! Inkmap Core - Shared domain types for the tattoo directory.
//!
//! This crate provides the types and pure logic used across all Inkmap
//! components:
//! - `api` - JSON HTTP service for artists, shops and locations
//! - `cli` - Command-line tools for migrations and maintenance
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype ids, slugs, handles, statuses, patch values and pagination
//! - [`shape`] - Flattening of nested relational records into listing rows

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod shape;
pub mod types;

pub use types::*;
