//! In-memory [`ContactStore`] implementation.
//!
//! The contact list and the id counter live together behind one `RwLock`,
//! so concurrent creates never share an id and readers always observe a
//! consistent snapshot. Every mutation validates before it writes, which
//! keeps the guarded data consistent even if a holder panics; a poisoned
//! lock is therefore recovered rather than propagated.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::{Contact, ContactPatch, NewContact};

use super::ContactStore;

struct Inner {
    contacts: Vec<Contact>,
    /// `None` once `i64::MAX` has been handed out.
    next_id: Option<i64>,
}

/// Memory-only contact store, seeded once at construction.
pub struct InMemoryContactStore {
    inner: RwLock<Inner>,
}

impl InMemoryContactStore {
    /// An empty store whose first id is 1.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                contacts: Vec::new(),
                next_id: Some(1),
            }),
        }
    }

    /// A store pre-loaded with `seed`, in the given order.
    ///
    /// The id counter starts one above the highest seeded id. A seed holding
    /// `i64::MAX` leaves the counter exhausted, so every create fails with
    /// [`StoreError::IdsExhausted`]. Seeds are otherwise trusted as-is;
    /// callers validate them (see the application's config loader).
    pub fn with_seed(seed: Vec<Contact>) -> Self {
        let next_id = match seed.iter().map(|c| c.id).max() {
            Some(max) => max.checked_add(1),
            None => Some(1),
        };
        Self {
            inner: RwLock::new(Inner {
                contacts: seed,
                next_id,
            }),
        }
    }

    /// The id the next successful create will receive, or `None` when
    /// ids are exhausted.
    pub fn next_id(&self) -> Option<i64> {
        self.read().next_id
    }

    /// Number of stored contacts.
    pub fn len(&self) -> usize {
        self.read().contacts.len()
    }

    /// True when the store holds no contacts.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for InMemoryContactStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContactStore for InMemoryContactStore {
    async fn list_all(&self) -> Result<Vec<Contact>, StoreError> {
        Ok(self.read().contacts.clone())
    }

    async fn get_by_id(&self, id: i64) -> Result<Contact, StoreError> {
        self.read()
            .contacts
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn create(&self, new: NewContact) -> Result<Contact, StoreError> {
        let mut inner = self.write();
        let id = inner.next_id.ok_or(StoreError::IdsExhausted)?;
        let contact = Contact::from_new(id, new)?;
        inner.next_id = id.checked_add(1);
        inner.contacts.push(contact.clone());
        Ok(contact)
    }

    async fn update(&self, id: i64, patch: ContactPatch) -> Result<Contact, StoreError> {
        let mut inner = self.write();
        let contact = inner
            .contacts
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(StoreError::NotFound(id))?;
        if patch.is_empty() {
            return Err(StoreError::update_required());
        }
        patch.apply_to(contact);
        Ok(contact.clone())
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), StoreError> {
        let mut inner = self.write();
        let before = inner.contacts.len();
        inner.contacts.retain(|c| c.id != id);
        if inner.contacts.len() == before {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}
