//! Contact data types.
//!
//! [`Contact`] is the stored record and the JSON shape served to clients.
//! [`NewContact`] and [`ContactPatch`] are the loosely-typed request shapes
//! for create and update: every field is optional, and an empty string is
//! treated exactly like an omitted field.

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Tag assigned to contacts created without one.
pub const DEFAULT_TAG: &str = "General";

/// A contact record.
///
/// Serialized with camelCase keys:
/// `{id, firstName, lastName, email, phone, tag}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub tag: String,
}

impl Contact {
    /// Builds a record with the given id from create-style input.
    ///
    /// Fails with [`StoreError::Validation`] when `firstName` or `email` is
    /// missing or empty. Optional fields fall back to `""` (`lastName`,
    /// `phone`) and [`DEFAULT_TAG`] (`tag`).
    pub fn from_new(id: i64, new: NewContact) -> Result<Self, StoreError> {
        let NewContact {
            first_name,
            last_name,
            email,
            phone,
            tag,
        } = new;

        let (first_name, email) = match (non_empty(first_name), non_empty(email)) {
            (Some(f), Some(e)) => (f, e),
            _ => return Err(StoreError::create_required()),
        };

        Ok(Self {
            id,
            first_name,
            last_name: non_empty(last_name).unwrap_or_default(),
            email,
            phone: non_empty(phone).unwrap_or_default(),
            tag: non_empty(tag).unwrap_or_else(|| DEFAULT_TAG.to_string()),
        })
    }
}

/// Request body for creating a contact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContact {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
}

impl NewContact {
    /// Shorthand for the two required fields.
    pub fn new(first_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            first_name: Some(first_name.into()),
            email: Some(email.into()),
            ..Self::default()
        }
    }
}

/// Request body for a partial update.
///
/// Fields that are `None` or `Some("")` leave the stored value untouched,
/// so a patch can never clear a field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPatch {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
}

impl ContactPatch {
    /// Patch that only changes the tag.
    pub fn tag(tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            ..Self::default()
        }
    }

    /// True when no field carries a non-empty value.
    pub fn is_empty(&self) -> bool {
        [
            &self.first_name,
            &self.last_name,
            &self.email,
            &self.phone,
            &self.tag,
        ]
        .iter()
        .all(|f| f.as_deref().map_or(true, str::is_empty))
    }

    /// Overwrites every field of `contact` for which the patch has a
    /// non-empty value. The id is never touched.
    pub fn apply_to(self, contact: &mut Contact) {
        let targets = [
            (self.first_name, &mut contact.first_name),
            (self.last_name, &mut contact.last_name),
            (self.email, &mut contact.email),
            (self.phone, &mut contact.phone),
            (self.tag, &mut contact.tag),
        ];
        for (incoming, slot) in targets {
            if let Some(value) = non_empty(incoming) {
                *slot = value;
            }
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alan() -> Contact {
        Contact {
            id: 1,
            first_name: "Alan".to_string(),
            last_name: "Turing".to_string(),
            email: "alan.turing@auring.com".to_string(),
            phone: "1234567890".to_string(),
            tag: "Work".to_string(),
        }
    }

    #[test]
    fn test_from_new_fills_defaults() {
        let c = Contact::from_new(7, NewContact::new("Grace", "grace@navy.mil")).unwrap();
        assert_eq!(c.id, 7);
        assert_eq!(c.first_name, "Grace");
        assert_eq!(c.last_name, "");
        assert_eq!(c.email, "grace@navy.mil");
        assert_eq!(c.phone, "");
        assert_eq!(c.tag, DEFAULT_TAG);
    }

    #[test]
    fn test_from_new_empty_optional_fields_use_defaults() {
        let new = NewContact {
            tag: Some(String::new()),
            phone: Some(String::new()),
            ..NewContact::new("Grace", "grace@navy.mil")
        };
        let c = Contact::from_new(1, new).unwrap();
        assert_eq!(c.tag, "General");
        assert_eq!(c.phone, "");
    }

    #[test]
    fn test_from_new_requires_first_name_and_email() {
        let missing_email = NewContact {
            first_name: Some("Grace".into()),
            ..NewContact::default()
        };
        assert_eq!(
            Contact::from_new(1, missing_email),
            Err(StoreError::create_required())
        );
        assert_eq!(
            Contact::from_new(1, NewContact::new("", "grace@navy.mil")),
            Err(StoreError::create_required())
        );
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(ContactPatch::default().is_empty());
        let blanks = ContactPatch {
            first_name: Some(String::new()),
            email: Some(String::new()),
            ..ContactPatch::default()
        };
        assert!(blanks.is_empty());
        assert!(!ContactPatch::tag("Navy").is_empty());
    }

    #[test]
    fn test_patch_ignores_empty_strings() {
        let mut c = alan();
        let patch = ContactPatch {
            last_name: Some(String::new()),
            phone: Some("555".into()),
            ..ContactPatch::default()
        };
        patch.apply_to(&mut c);
        assert_eq!(c.last_name, "Turing");
        assert_eq!(c.phone, "555");
        assert_eq!(c.id, 1);
    }

    #[test]
    fn test_contact_json_shape() {
        let json = serde_json::to_value(alan()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 1,
                "firstName": "Alan",
                "lastName": "Turing",
                "email": "alan.turing@auring.com",
                "phone": "1234567890",
                "tag": "Work"
            })
        );
    }

    #[test]
    fn test_new_contact_accepts_partial_json() {
        let new: NewContact =
            serde_json::from_str(r#"{"firstName":"Grace","email":"grace@navy.mil"}"#).unwrap();
        assert_eq!(new, NewContact::new("Grace", "grace@navy.mil"));
    }
}
