//! Multi-field, case-insensitive substring search.
//!
//! A contact matches a query when at least one of `firstName`, `lastName`,
//! `email`, or `tag` contains the query as a substring after both sides are
//! lowercased. `phone` is not searched. The empty query matches everything,
//! so searching with `""` is identical to listing.
//!
//! These functions are storage-agnostic: the default
//! [`ContactStore::search`](crate::store::ContactStore::search) delegates to
//! [`filter_contacts`] so every backend shares the same semantics.

use crate::models::Contact;

/// Returns true if `contact` matches `query`.
pub fn matches_query(contact: &Contact, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    matches_lowered(contact, &query.to_lowercase())
}

/// Keeps the contacts matching `query`, preserving their order.
pub fn filter_contacts<I>(contacts: I, query: &str) -> Vec<Contact>
where
    I: IntoIterator<Item = Contact>,
{
    if query.is_empty() {
        return contacts.into_iter().collect();
    }
    let needle = query.to_lowercase();
    contacts
        .into_iter()
        .filter(|c| matches_lowered(c, &needle))
        .collect()
}

fn matches_lowered(contact: &Contact, needle: &str) -> bool {
    [
        &contact.first_name,
        &contact.last_name,
        &contact.email,
        &contact.tag,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(needle))
}
