//! TOML configuration.
//!
//! ```toml
//! [server]
//! bind = "127.0.0.1:3000"
//!
//! [[contacts]]
//! id = 1
//! firstName = "Alan"
//! lastName = "Turing"
//! email = "alan.turing@auring.com"
//! phone = "1234567890"
//! tag = "Work"
//! ```
//!
//! Every section is optional. Without `[[contacts]]` the store is seeded
//! with the built-in record above; `contacts = []` starts it empty.

use anyhow::{bail, Context, Result};
use contact_directory_core::{Contact, NewContact};
use serde::Deserialize;
use std::collections::HashSet;
use std::net::SocketAddr;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default = "default_seed")]
    pub contacts: Vec<SeedContact>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            contacts: default_seed(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

/// A contact loaded into the store at startup.
///
/// Same fields and defaults as a create request, plus an explicit id.
#[derive(Debug, Deserialize, Clone)]
pub struct SeedContact {
    pub id: i64,
    #[serde(flatten)]
    pub fields: NewContact,
}

fn default_seed() -> Vec<SeedContact> {
    vec![SeedContact {
        id: 1,
        fields: NewContact {
            first_name: Some("Alan".to_string()),
            last_name: Some("Turing".to_string()),
            email: Some("alan.turing@auring.com".to_string()),
            phone: Some("1234567890".to_string()),
            tag: Some("Work".to_string()),
        },
    }]
}

impl Config {
    /// Builds the seed records, rejecting non-positive, maximal or duplicate
    /// ids and records without a first name or email.
    pub fn seed_contacts(&self) -> Result<Vec<Contact>> {
        let mut seen = HashSet::new();
        let mut contacts = Vec::with_capacity(self.contacts.len());

        for seed in &self.contacts {
            if seed.id < 1 {
                bail!("contacts: id must be >= 1 (got {})", seed.id);
            }
            if seed.id == i64::MAX {
                bail!("contacts: id {} leaves no room for new contacts", seed.id);
            }
            if !seen.insert(seed.id) {
                bail!("contacts: duplicate id {}", seed.id);
            }
            let contact = Contact::from_new(seed.id, seed.fields.clone())
                .with_context(|| format!("contacts: invalid seed contact {}", seed.id))?;
            contacts.push(contact);
        }

        Ok(contacts)
    }

    /// The configured bind address, parsed.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.server
            .bind
            .parse()
            .with_context(|| format!("server.bind is not a socket address: {}", self.server.bind))
    }

    /// Checks everything that can be checked without binding a socket.
    pub fn validate(&self) -> Result<()> {
        self.bind_addr()?;
        self.seed_contacts()?;
        Ok(())
    }
}

/// Parses and validates configuration from a TOML string.
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse config file")?;
    config.validate()?;
    Ok(config)
}

/// Reads, parses, and validates a config file.
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.server.bind, "127.0.0.1:3000");
        let seed = cfg.seed_contacts().unwrap();
        assert_eq!(seed.len(), 1);
        assert_eq!(seed[0].first_name, "Alan");
        assert_eq!(seed[0].tag, "Work");
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let cfg = parse_config("").unwrap();
        assert_eq!(cfg.server.bind, "127.0.0.1:3000");
        assert_eq!(cfg.contacts.len(), 1);
    }

    #[test]
    fn test_empty_contacts_array() {
        let cfg = parse_config("contacts = []\n").unwrap();
        assert!(cfg.seed_contacts().unwrap().is_empty());
    }

    #[test]
    fn test_seed_defaults_applied() {
        let cfg = parse_config(
            r#"
[server]
bind = "0.0.0.0:8080"

[[contacts]]
id = 5
firstName = "Grace"
email = "grace@navy.mil"
"#,
        )
        .unwrap();
        let seed = cfg.seed_contacts().unwrap();
        assert_eq!(seed[0].id, 5);
        assert_eq!(seed[0].last_name, "");
        assert_eq!(seed[0].tag, "General");
        assert_eq!(cfg.bind_addr().unwrap().port(), 8080);
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let err = parse_config(
            r#"
[[contacts]]
id = 1
firstName = "A"
email = "a@x"

[[contacts]]
id = 1
firstName = "B"
email = "b@x"
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate id 1"));
    }

    #[test]
    fn test_rejects_seed_without_email() {
        let err = parse_config(
            r#"
[[contacts]]
id = 2
firstName = "A"
"#,
        )
        .unwrap_err();
        assert!(format!("{:#}", err).contains("First Name and Email are required."));
    }

    #[test]
    fn test_rejects_non_positive_id() {
        let err = parse_config("[[contacts]]\nid = 0\nfirstName = \"A\"\nemail = \"a@x\"\n")
            .unwrap_err();
        assert!(err.to_string().contains("id must be >= 1"));
    }

    #[test]
    fn test_example_config_parses() {
        let cfg = parse_config(include_str!("../config/contacts.example.toml")).unwrap();
        let seed = cfg.seed_contacts().unwrap();
        assert_eq!(seed.len(), 2);
        assert_eq!(seed[1].tag, "General");
    }

    #[test]
    fn test_rejects_max_id() {
        let err = parse_config(&format!(
            "[[contacts]]\nid = {}\nfirstName = \"A\"\nemail = \"a@x\"\n",
            i64::MAX
        ))
        .unwrap_err();
        assert!(err.to_string().contains("leaves no room"), "{}", err);

        let cfg = parse_config(&format!(
            "[[contacts]]\nid = {}\nfirstName = \"A\"\nemail = \"a@x\"\n",
            i64::MAX - 1
        ))
        .unwrap();
        assert_eq!(cfg.seed_contacts().unwrap()[0].id, i64::MAX - 1);
    }

    #[test]
    fn test_rejects_bad_bind() {
        let err = parse_config("[server]\nbind = \"localhost\"\n").unwrap_err();
        assert!(err.to_string().contains("server.bind"));
    }
}
