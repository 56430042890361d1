//! Contact record and validated input.

use serde::{Deserialize, Serialize};

use super::id::ContactId;

/// Errors that can occur when building a [`ContactDraft`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactError {
    /// The name field is missing or empty.
    #[error("name is required")]
    MissingName,
    /// The phone field is missing or empty.
    #[error("phone is required")]
    MissingPhone,
}

/// A persisted contact.
///
/// Constructed only at the storage boundary; `id` is assigned by the
/// database on insert and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Storage-assigned identifier.
    pub id: ContactId,
    /// Display name.
    pub name: String,
    /// Phone number, stored as entered.
    pub phone: String,
}

/// Name and phone that passed presence validation.
///
/// Values are kept exactly as submitted. No trimming is applied, so a
/// whitespace-only name is accepted while an empty one is not.
///
/// ```
/// use contactbook_core::{ContactDraft, ContactError};
///
/// assert!(ContactDraft::new("Alice", "555-1111").is_ok());
/// assert_eq!(ContactDraft::new("", "555-1111"), Err(ContactError::MissingName));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDraft {
    name: String,
    phone: String,
}

impl ContactDraft {
    /// Validate that both fields are present.
    ///
    /// # Errors
    ///
    /// Returns `ContactError::MissingName` if `name` is empty, otherwise
    /// `ContactError::MissingPhone` if `phone` is empty.
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Result<Self, ContactError> {
        let name = name.into();
        let phone = phone.into();

        if name.is_empty() {
            return Err(ContactError::MissingName);
        }
        if phone.is_empty() {
            return Err(ContactError::MissingPhone);
        }

        Ok(Self { name, phone })
    }

    /// Returns the validated name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the validated phone number.
    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }
}
