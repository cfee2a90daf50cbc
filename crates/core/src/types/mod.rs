//! Core types for Inkmap.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod handle;
pub mod id;
pub mod node;
pub mod page;
pub mod patch;
pub mod related;
pub mod slug;
pub mod status;

pub use handle::InstagramHandle;
pub use id::*;
pub use node::*;
pub use page::PageRequest;
pub use patch::Patch;
pub use related::Related;
pub use slug::Slug;
pub use status::*;
