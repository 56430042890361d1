//! Core types for Contact Book.

pub mod contact;
pub mod id;

pub use contact::{Contact, ContactDraft, ContactError};
pub use id::*;
