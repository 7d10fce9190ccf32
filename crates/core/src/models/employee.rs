//! Employee domain type.

use serde::{Deserialize, Serialize};

use crate::EmployeeId;

/// An employee record.
///
/// Independent of [`Account`](crate::Account): `email` is not required to
/// match any account, and `department` is the department's name as typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub email: String,
    pub position: String,
    pub department: String,
    /// Hire date as entered (`YYYY-MM-DD` from a date input).
    pub date: String,
}
