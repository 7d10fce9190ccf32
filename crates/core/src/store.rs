//! The persisted aggregate.
//!
//! [`Store`] owns every collection of the portal and is read and written as a
//! single document. Lookups are linear scans; the collections are small and
//! local.

use serde::{Deserialize, Serialize};

use crate::schema::CURRENT_VERSION;
use crate::{
    Account, Department, DepartmentId, Email, Employee, EmployeeId, RequestId, Role,
    SupplyRequest,
};

/// Email of the seeded administrator.
pub const SEED_ADMIN_EMAIL: &str = "ucadmin@gmail.com";

/// Password of the seeded administrator.
pub const SEED_ADMIN_PASSWORD: &str = "waypassword";

/// Every persisted collection plus the schema version of the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    pub version: u32,
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub departments: Vec<Department>,
    #[serde(default)]
    pub employees: Vec<Employee>,
    #[serde(default)]
    pub requests: Vec<SupplyRequest>,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION,
            accounts: Vec::new(),
            departments: Vec::new(),
            employees: Vec::new(),
            requests: Vec::new(),
        }
    }
}

impl Store {
    /// The content materialized when no prior state exists: one verified
    /// administrator and two departments.
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            accounts: vec![Account {
                first_name: "Admin".to_owned(),
                last_name: "User".to_owned(),
                email: Email::from_static(SEED_ADMIN_EMAIL),
                password: SEED_ADMIN_PASSWORD.to_owned(),
                role: Role::Admin,
                verified: true,
            }],
            departments: vec![
                Department {
                    id: DepartmentId::new(1),
                    name: "Engineering".to_owned(),
                    description: "Software team".to_owned(),
                },
                Department {
                    id: DepartmentId::new(2),
                    name: "HR".to_owned(),
                    description: "Human Resources".to_owned(),
                },
            ],
            ..Self::default()
        }
    }

    // =========================================================================
    // Accounts
    // =========================================================================

    /// Find an account by exact email.
    #[must_use]
    pub fn account(&self, email: &Email) -> Option<&Account> {
        self.accounts.iter().find(|a| a.email == *email)
    }

    /// Find an account by exact email, mutably.
    pub fn account_mut(&mut self, email: &Email) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|a| a.email == *email)
    }

    /// Whether any account uses `email`.
    #[must_use]
    pub fn has_account(&self, email: &Email) -> bool {
        self.account(email).is_some()
    }

    /// Remove the account with `email`, returning it.
    pub fn remove_account(&mut self, email: &Email) -> Option<Account> {
        let pos = self.accounts.iter().position(|a| a.email == *email)?;
        Some(self.accounts.remove(pos))
    }

    // =========================================================================
    // Departments
    // =========================================================================

    /// Find a department by id.
    #[must_use]
    pub fn department(&self, id: DepartmentId) -> Option<&Department> {
        self.departments.iter().find(|d| d.id == id)
    }

    /// Find a department by id, mutably.
    pub fn department_mut(&mut self, id: DepartmentId) -> Option<&mut Department> {
        self.departments.iter_mut().find(|d| d.id == id)
    }

    /// One past the highest department id in use.
    #[must_use]
    pub fn next_department_id(&self) -> DepartmentId {
        let highest = self.departments.iter().map(|d| d.id.get()).max().unwrap_or(0);
        DepartmentId::new(highest.saturating_add(1))
    }

    /// Remove the department with `id`, returning it.
    pub fn remove_department(&mut self, id: DepartmentId) -> Option<Department> {
        let pos = self.departments.iter().position(|d| d.id == id)?;
        Some(self.departments.remove(pos))
    }

    // =========================================================================
    // Employees
    // =========================================================================

    /// Find an employee by id.
    #[must_use]
    pub fn employee(&self, id: &EmployeeId) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == *id)
    }

    /// Find an employee by id, mutably.
    pub fn employee_mut(&mut self, id: &EmployeeId) -> Option<&mut Employee> {
        self.employees.iter_mut().find(|e| e.id == *id)
    }

    /// Remove the employee with `id`, returning it.
    pub fn remove_employee(&mut self, id: &EmployeeId) -> Option<Employee> {
        let pos = self.employees.iter().position(|e| e.id == *id)?;
        Some(self.employees.remove(pos))
    }

    // =========================================================================
    // Requests
    // =========================================================================

    /// Requests submitted by `email`, in submission order.
    pub fn requests_from<'a>(
        &'a self,
        email: &'a Email,
    ) -> impl Iterator<Item = &'a SupplyRequest> + 'a {
        self.requests.iter().filter(move |r| r.is_from(email))
    }

    /// Find a request by id, mutably.
    pub fn request_mut(&mut self, id: RequestId) -> Option<&mut SupplyRequest> {
        self.requests.iter_mut().find(|r| r.id == id)
    }

    /// Highest request id in use, if any.
    #[must_use]
    pub fn highest_request_id(&self) -> Option<RequestId> {
        self.requests.iter().map(|r| r.id).max()
    }
}
