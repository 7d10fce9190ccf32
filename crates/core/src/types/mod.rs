//! Core types for the Staff Portal.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod intent;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use intent::EditIntent;
pub use status::*;
