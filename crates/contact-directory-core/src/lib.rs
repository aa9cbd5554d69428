//! # Contact Directory Core
//!
//! Transport-free logic for Contact Directory: the contact model, the
//! [`store::ContactStore`] abstraction with its in-memory implementation,
//! field validation, and the multi-field search engine.
//!
//! This crate contains no tokio, axum, or filesystem I/O. Every operation
//! is synchronous under the hood; the store trait is async only so that
//! future storage adapters can plug in behind the same contract.

pub mod error;
pub mod models;
pub mod search;
pub mod store;

pub use error::StoreError;
pub use models::{Contact, ContactPatch, NewContact, DEFAULT_TAG};
pub use store::memory::InMemoryContactStore;
pub use store::ContactStore;
