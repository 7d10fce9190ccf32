//! Versioned document migration.
//!
//! The persisted document carries a `version` field. Documents written before
//! versioning existed have no such field and are treated as version 0. Each
//! step rewrites the raw JSON one version forward; only after the last step is
//! the document deserialized into a [`Store`].
//!
//! # Versions
//!
//! - **0** - unversioned shape: no `version`, departments without ids, request
//!   item quantities stored as strings, any collection possibly missing.
//! - **1** - `version` field, numeric department ids, unique non-blank
//!   employee ids, numeric quantities, all four collections present.

use std::collections::HashSet;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::Store;

/// Schema version written by this build.
pub const CURRENT_VERSION: u32 = 1;

/// Collections every current document carries.
const COLLECTIONS: [&str; 4] = ["accounts", "departments", "employees", "requests"];

/// Errors that can occur while upgrading a persisted document.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The document is not a JSON object.
    #[error("store document must be a JSON object")]
    NotAnObject,

    /// The `version` field is present but not a non-negative integer.
    #[error("invalid schema version field: {0}")]
    InvalidVersion(Value),

    /// The document was written by a newer build.
    #[error("store schema version {found} is newer than supported version {supported}")]
    UnsupportedVersion {
        /// Version found in the document.
        found: u64,
        /// Highest version this build understands.
        supported: u32,
    },

    /// The upgraded document does not match the current shape.
    #[error("store document does not match schema: {0}")]
    Shape(#[from] serde_json::Error),
}

/// Upgrade a raw persisted document to the current schema.
///
/// # Errors
///
/// Returns [`SchemaError`] if the document is not an object, carries an
/// unknown or newer version, or does not deserialize once upgraded.
pub fn migrate(document: Value) -> Result<Store, SchemaError> {
    let Value::Object(mut doc) = document else {
        return Err(SchemaError::NotAnObject);
    };

    let version = match doc.get("version") {
        None | Some(Value::Null) => 0,
        Some(v) => v
            .as_u64()
            .ok_or_else(|| SchemaError::InvalidVersion(v.clone()))?,
    };

    if version > u64::from(CURRENT_VERSION) {
        return Err(SchemaError::UnsupportedVersion {
            found: version,
            supported: CURRENT_VERSION,
        });
    }

    if version == 0 {
        v0_to_v1(&mut doc);
    }

    backfill_collections(&mut doc);
    Ok(serde_json::from_value(Value::Object(doc))?)
}

/// Version 0 to 1: assign department ids, unique employee ids, numeric
/// quantities.
fn v0_to_v1(doc: &mut Map<String, Value>) {
    backfill_collections(doc);

    if let Some(Value::Array(departments)) = doc.get_mut("departments") {
        let mut next_id: u64 = 1;
        for department in departments.iter().filter_map(Value::as_object) {
            if let Some(id) = department.get("id").and_then(Value::as_u64) {
                next_id = next_id.max(id.saturating_add(1));
            }
        }
        for department in departments.iter_mut().filter_map(Value::as_object_mut) {
            if department.get("id").and_then(Value::as_u64).is_none() {
                department.insert("id".to_owned(), Value::from(next_id));
                next_id = next_id.saturating_add(1);
            }
        }
    }

    if let Some(Value::Array(employees)) = doc.get_mut("employees") {
        dedupe_employee_ids(employees);
    }

    if let Some(Value::Array(requests)) = doc.get_mut("requests") {
        for request in requests.iter_mut().filter_map(Value::as_object_mut) {
            if let Some(Value::Array(items)) = request.get_mut("items") {
                for item in items.iter_mut().filter_map(Value::as_object_mut) {
                    let qty = item.get("qty").map_or(1, normalize_qty);
                    item.insert("qty".to_owned(), Value::from(qty));
                }
            }
            // Version 0 documents may omit the status
            request
                .entry("status")
                .or_insert_with(|| Value::from("Pending"));
        }
    }

    doc.insert("version".to_owned(), Value::from(1));
}

/// Make every legacy employee id non-blank and unique.
///
/// The first holder of an id keeps it. Later duplicates become `<id>-<n>`
/// and blank ids become `EMP-<n>`, with `n` the lowest suffix not in use.
fn dedupe_employee_ids(employees: &mut [Value]) {
    let raw_id = |employee: &Map<String, Value>| match employee.get("id") {
        Some(Value::String(s)) => s.trim().to_owned(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    };

    let mut in_use: HashSet<String> = employees
        .iter()
        .filter_map(Value::as_object)
        .map(raw_id)
        .filter(|id| !id.is_empty())
        .collect();
    let mut claimed = HashSet::new();

    for employee in employees.iter_mut().filter_map(Value::as_object_mut) {
        let id = raw_id(employee);
        let id = if !id.is_empty() && claimed.insert(id.clone()) {
            id
        } else {
            let base = if id.is_empty() { "EMP" } else { id.as_str() };
            let fresh = (1_u32..)
                .map(|n| format!("{base}-{n}"))
                .find(|candidate| !in_use.contains(candidate))
                .unwrap_or_default();
            in_use.insert(fresh.clone());
            claimed.insert(fresh.clone());
            fresh
        };
        employee.insert("id".to_owned(), Value::from(id));
    }
}

/// Quantity from a legacy value: numbers and numeric strings are kept,
/// anything unusable (or below 1) becomes 1.
fn normalize_qty(value: &Value) -> u64 {
    let parsed = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    parsed
        .filter(|q| (1..=u64::from(u32::MAX)).contains(q))
        .unwrap_or(1)
}

/// Insert an empty array for every missing (or null) collection.
fn backfill_collections(doc: &mut Map<String, Value>) {
    for key in COLLECTIONS {
        let entry = doc.entry(key).or_insert(Value::Null);
        if entry.is_null() {
            *entry = Value::Array(Vec::new());
        }
    }
}
