//! Domain models persisted in the [`Store`](crate::Store).
//!
//! Field names serialize in camelCase, which is the shape of the persisted
//! document (`firstName`, `employeeEmail`, ...).

pub mod account;
pub mod department;
pub mod employee;
pub mod request;

pub use account::Account;
pub use department::Department;
pub use employee::Employee;
pub use request::{RequestItem, SupplyRequest};
