//! Contact Book Core - Shared types library.
//!
//! This crate provides the types used across all Contact Book components:
//! - `web` - Server-rendered contact management site
//! - `cli` - Command-line tools for database setup and inspection
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no database
//! access, no HTTP. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Contact record, validated drafts, and the type-safe contact ID

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
