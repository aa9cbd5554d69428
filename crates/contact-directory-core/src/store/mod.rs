//! Storage abstraction for Contact Directory.
//!
//! The [`ContactStore`] trait is the full contract the transport layer
//! depends on. The in-memory implementation in [`memory`] is the only
//! backend; a persistent adapter would implement the same trait rather than
//! extend the in-memory one.
//!
//! Implementations must be `Send + Sync` to be shared across request
//! handlers.

pub mod memory;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::{Contact, ContactPatch, NewContact};
use crate::search::filter_contacts;

/// Abstract contact repository.
///
/// # Operations
///
/// | Method | Purpose |
/// |--------|---------|
/// | [`list_all`](ContactStore::list_all) | Every contact, insertion order |
/// | [`search`](ContactStore::search) | Case-insensitive multi-field filter |
/// | [`get_by_id`](ContactStore::get_by_id) | One contact or `NotFound` |
/// | [`create`](ContactStore::create) | Validate, assign next id, append |
/// | [`update`](ContactStore::update) | Partial update in place |
/// | [`delete_by_id`](ContactStore::delete_by_id) | Remove or `NotFound` |
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// All contacts in insertion order.
    async fn list_all(&self) -> Result<Vec<Contact>, StoreError>;

    /// Contacts matching `query`; the empty query behaves like
    /// [`list_all`](ContactStore::list_all).
    async fn search(&self, query: &str) -> Result<Vec<Contact>, StoreError> {
        Ok(filter_contacts(self.list_all().await?, query))
    }

    /// The contact with `id`, or [`StoreError::NotFound`].
    async fn get_by_id(&self, id: i64) -> Result<Contact, StoreError>;

    /// Validates `new`, assigns the next id, and appends the record.
    ///
    /// A failed validation leaves both the collection and the id counter
    /// untouched.
    async fn create(&self, new: NewContact) -> Result<Contact, StoreError>;

    /// Applies the non-empty fields of `patch` to the contact with `id`.
    ///
    /// Fails with [`StoreError::NotFound`] for an unknown id, then with
    /// [`StoreError::Validation`] when the patch has no usable field.
    async fn update(&self, id: i64, patch: ContactPatch) -> Result<Contact, StoreError>;

    /// Removes the contact with `id`. Its id is never reissued.
    async fn delete_by_id(&self, id: i64) -> Result<(), StoreError>;
}
