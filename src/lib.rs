//! # Contact Directory
//!
//! A small contact-directory service: create, read, update, delete, and
//! substring-search contact records over HTTP/JSON, with an OpenAPI
//! description generated from the route annotations.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────────┐   ┌────────────────────────┐
//! │  HTTP client │──▶│ server (axum)    │──▶│ ContactStore (core)    │
//! └──────────────┘   │ parse / map errs │   │ in-memory, one RwLock  │
//!                    └────────┬─────────┘   └────────────────────────┘
//!                             ▼
//!                    ┌──────────────────┐
//!                    │ api_docs         │
//!                    │ OpenAPI + HTML   │
//!                    └──────────────────┘
//! ```
//!
//! The store, validation and search rules live in the
//! `contact-directory-core` crate; this crate adds configuration, the HTTP
//! transport and the `contacts` CLI.
//!
//! ## Quick Start
//!
//! ```bash
//! contacts serve                          # built-in seed, 127.0.0.1:3000
//! contacts --config ./contacts.toml serve --bind 0.0.0.0:8080
//! contacts openapi > openapi.json
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration and seed contacts |
//! | [`server`] | HTTP routes and error mapping |
//! | [`api_docs`] | Endpoint annotations, OpenAPI and HTML rendering |

pub mod api_docs;
pub mod config;
pub mod server;
