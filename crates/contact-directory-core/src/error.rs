//! Failure signals raised by store operations.

use thiserror::Error;

/// Message returned when a create request lacks a first name or email.
pub const MSG_CREATE_REQUIRED: &str = "First Name and Email are required.";

/// Message returned when an update request carries no usable field.
pub const MSG_UPDATE_REQUIRED: &str = "At least one field is required for update.";

/// Message returned when a referenced contact does not exist.
pub const MSG_NOT_FOUND: &str = "Contact not found.";

/// Message returned when the id counter cannot advance any further.
pub const MSG_IDS_EXHAUSTED: &str = "No contact ids left to assign.";

/// The ways a store operation can fail.
///
/// The `Display` output is the exact text served to HTTP clients, so the
/// transport layer can forward it verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Malformed or incomplete input. Nothing was mutated.
    #[error("{0}")]
    Validation(String),

    /// No contact carries the referenced id.
    #[error("Contact not found.")]
    NotFound(i64),

    /// The last id `i64` can hold has been assigned. Nothing was mutated.
    #[error("No contact ids left to assign.")]
    IdsExhausted,
}

impl StoreError {
    /// Create was missing its first name or email.
    pub fn create_required() -> Self {
        Self::Validation(MSG_CREATE_REQUIRED.to_string())
    }

    /// Update carried no non-empty field.
    pub fn update_required() -> Self {
        Self::Validation(MSG_UPDATE_REQUIRED.to_string())
    }
}
