//! Business logic shared by handlers and the operator CLI.

pub mod slugs;
