//! Staff Portal Core - Shared domain library.
//!
//! This crate provides the domain types used across all Staff Portal components:
//! - `portal` - The web application (router, session, views)
//! - `cli` - Command-line tools for seeding, migrating and managing the store
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no storage
//! access, no HTTP. Reading and writing the persisted document is the portal's
//! job; this crate only knows what the document looks like and how to upgrade
//! older shapes of it.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for emails, ids, roles, statuses and edit intents
//! - [`models`] - Accounts, departments, employees and supply requests
//! - [`store`] - The persisted aggregate and its seed data
//! - [`schema`] - Versioned document migration

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod models;
pub mod schema;
pub mod store;
pub mod types;

pub use models::*;
pub use schema::{CURRENT_VERSION, SchemaError, migrate};
pub use store::{SEED_ADMIN_EMAIL, SEED_ADMIN_PASSWORD, Store};
pub use types::*;
