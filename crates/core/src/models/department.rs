//! Department domain type.

use serde::{Deserialize, Serialize};

use crate::DepartmentId;

/// An organisational department.
///
/// Names are free text and may repeat; `id` is the identity used by edit and
/// delete actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
    pub description: String,
}
