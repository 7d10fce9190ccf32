//! Administrator CRUD over accounts, employees and departments.
//!
//! Every operation re-checks that the session belongs to an administrator,
//! then goes through [`PortalContext::mutate`] so the store is saved before
//! the caller renders anything.

use staff_portal_core::{
    Account, Department, DepartmentId, EditIntent, Email, EmailError, Employee, EmployeeId, Role,
};
use thiserror::Error;

use crate::context::PortalContext;
use crate::notice::Notice;
use crate::persistence::PersistenceError;
use crate::services::{MIN_PASSWORD_LENGTH, UserFacing, required};

/// Errors from admin operations.
#[derive(Debug, Error)]
pub enum AdminError {
    /// The session is missing or not an administrator.
    #[error("administrator session required")]
    Forbidden,

    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("email already in use: {0}")]
    DuplicateEmail(Email),

    #[error("employee id already in use: {0}")]
    DuplicateEmployee(EmployeeId),

    #[error("password shorter than {MIN_PASSWORD_LENGTH} characters")]
    PasswordTooShort,

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The record being edited or deleted does not exist.
    #[error("{0} not found")]
    NotFound(String),

    #[error("persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

impl UserFacing for AdminError {
    fn notice(&self) -> Option<Notice> {
        match self {
            Self::Forbidden => Some(Notice::AdminsOnly),
            Self::InvalidEmail(_) => Some(Notice::InvalidEmail),
            Self::DuplicateEmail(_) => Some(Notice::EmailExists),
            Self::DuplicateEmployee(_) => Some(Notice::DuplicateEmployee),
            Self::PasswordTooShort => Some(Notice::PasswordTooShort),
            Self::MissingField(_) => Some(Notice::MissingField),
            Self::NotFound(_) => Some(Notice::NotFound),
            Self::Persistence(_) => None,
        }
    }
}

/// Account form data.
#[derive(Debug, Clone)]
pub struct AccountDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    /// Blank on edit keeps the current password.
    pub password: String,
    pub role: Role,
}

/// Employee form data.
#[derive(Debug, Clone)]
pub struct EmployeeDraft {
    pub id: EmployeeId,
    pub email: String,
    pub position: String,
    pub department: String,
    pub date: String,
}

/// Department form data.
#[derive(Debug, Clone)]
pub struct DepartmentDraft {
    pub name: String,
    pub description: String,
}

/// Admin service.
pub struct AdminService<'a> {
    ctx: &'a mut PortalContext,
}

impl<'a> AdminService<'a> {
    /// Create a new admin service.
    #[must_use]
    pub const fn new(ctx: &'a mut PortalContext) -> Self {
        Self { ctx }
    }

    fn require_admin(&self) -> Result<(), AdminError> {
        match self.ctx.current_account() {
            Some(account) if account.is_admin() => Ok(()),
            _ => Err(AdminError::Forbidden),
        }
    }

    // =========================================================================
    // Accounts
    // =========================================================================

    /// Create an account, or replace the one at `intent`'s email.
    ///
    /// Accounts saved here are always verified. If the edited account is the
    /// session account and its email changes, the session follows it.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::DuplicateEmail` if the email belongs to another
    /// account, `AdminError::PasswordTooShort` for a short new password,
    /// `AdminError::NotFound` if the edited account is gone, or a
    /// persistence error.
    pub fn save_account(
        &mut self,
        intent: EditIntent<Email>,
        draft: AccountDraft,
    ) -> Result<Account, AdminError> {
        self.require_admin()?;
        let first_name = required(&draft.first_name).ok_or(AdminError::MissingField("first name"))?;
        let last_name = required(&draft.last_name).ok_or(AdminError::MissingField("last name"))?;

        match intent {
            EditIntent::Create => {
                check_password(&draft.password)?;
                let account = Account {
                    first_name,
                    last_name,
                    email: draft.email,
                    password: draft.password,
                    role: draft.role,
                    verified: true,
                };
                self.ctx.mutate(|store| {
                    if store.has_account(&account.email) {
                        return Err(AdminError::DuplicateEmail(account.email.clone()));
                    }
                    store.accounts.push(account.clone());
                    Ok(account)
                })
            }
            EditIntent::EditExisting(original) => {
                if !draft.password.is_empty() {
                    check_password(&draft.password)?;
                }
                let new_email = draft.email.clone();
                self.ctx.mutate_renaming(&original, &new_email, |store| {
                    if new_email != original && store.has_account(&new_email) {
                        return Err(AdminError::DuplicateEmail(new_email.clone()));
                    }
                    let account = store
                        .account_mut(&original)
                        .ok_or_else(|| AdminError::NotFound(format!("account {original}")))?;
                    let password = if draft.password.is_empty() {
                        std::mem::take(&mut account.password)
                    } else {
                        draft.password
                    };
                    *account = Account {
                        first_name,
                        last_name,
                        email: draft.email,
                        password,
                        role: draft.role,
                        verified: true,
                    };
                    Ok(account.clone())
                })
            }
        }
    }

    /// Replace an account's password.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::PasswordTooShort` below the minimum length,
    /// `AdminError::NotFound` for an unknown email, or a persistence error.
    pub fn reset_password(&mut self, email: &Email, password: &str) -> Result<(), AdminError> {
        self.require_admin()?;
        check_password(password)?;

        self.ctx.mutate(|store| {
            let account = store
                .account_mut(email)
                .ok_or_else(|| AdminError::NotFound(format!("account {email}")))?;
            password.clone_into(&mut account.password);
            Ok::<_, AdminError>(())
        })?;
        tracing::info!(%email, "Password reset by administrator");
        Ok(())
    }

    /// Delete an account. Deleting the session account logs the session out.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::NotFound` for an unknown email, or a persistence
    /// error.
    pub fn delete_account(&mut self, email: &Email) -> Result<Account, AdminError> {
        self.require_admin()?;
        let removed = self.ctx.mutate(|store| {
            store
                .remove_account(email)
                .ok_or_else(|| AdminError::NotFound(format!("account {email}")))
        })?;
        tracing::info!(%email, "Account deleted");
        Ok(removed)
    }

    // =========================================================================
    // Employees
    // =========================================================================

    /// Create an employee, or replace the one at `intent`'s id.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::DuplicateEmployee` if the id belongs to another
    /// employee, `AdminError::MissingField` for a blank id, email or
    /// position, `AdminError::NotFound` if the edited employee is gone, or a
    /// persistence error.
    pub fn save_employee(
        &mut self,
        intent: EditIntent<EmployeeId>,
        draft: EmployeeDraft,
    ) -> Result<Employee, AdminError> {
        self.require_admin()?;
        if draft.id.is_empty() {
            return Err(AdminError::MissingField("employee id"));
        }
        let employee = Employee {
            email: required(&draft.email).ok_or(AdminError::MissingField("email"))?,
            position: required(&draft.position).ok_or(AdminError::MissingField("position"))?,
            department: draft.department.trim().to_owned(),
            date: draft.date.trim().to_owned(),
            id: draft.id,
        };

        self.ctx.mutate(|store| {
            match intent {
                EditIntent::Create => {
                    if store.employee(&employee.id).is_some() {
                        return Err(AdminError::DuplicateEmployee(employee.id.clone()));
                    }
                    store.employees.push(employee.clone());
                }
                EditIntent::EditExisting(original) => {
                    if employee.id != original && store.employee(&employee.id).is_some() {
                        return Err(AdminError::DuplicateEmployee(employee.id.clone()));
                    }
                    let slot = store
                        .employee_mut(&original)
                        .ok_or_else(|| AdminError::NotFound(format!("employee {original}")))?;
                    *slot = employee.clone();
                }
            }
            Ok(employee)
        })
    }

    /// Delete an employee.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::NotFound` for an unknown id, or a persistence
    /// error.
    pub fn delete_employee(&mut self, id: &EmployeeId) -> Result<Employee, AdminError> {
        self.require_admin()?;
        self.ctx.mutate(|store| {
            store
                .remove_employee(id)
                .ok_or_else(|| AdminError::NotFound(format!("employee {id}")))
        })
    }

    // =========================================================================
    // Departments
    // =========================================================================

    /// Create a department with the next free id, or replace the one at
    /// `intent`'s id.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::MissingField` for a blank name,
    /// `AdminError::NotFound` if the edited department is gone, or a
    /// persistence error.
    pub fn save_department(
        &mut self,
        intent: EditIntent<DepartmentId>,
        draft: DepartmentDraft,
    ) -> Result<Department, AdminError> {
        self.require_admin()?;
        let name = required(&draft.name).ok_or(AdminError::MissingField("name"))?;
        let description = draft.description.trim().to_owned();

        self.ctx.mutate(|store| match intent {
            EditIntent::Create => {
                let department = Department {
                    id: store.next_department_id(),
                    name,
                    description,
                };
                store.departments.push(department.clone());
                Ok(department)
            }
            EditIntent::EditExisting(id) => {
                let department = store
                    .department_mut(id)
                    .ok_or_else(|| AdminError::NotFound(format!("department {id}")))?;
                department.name = name;
                department.description = description;
                Ok(department.clone())
            }
        })
    }

    /// Delete a department.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::NotFound` for an unknown id, or a persistence
    /// error.
    pub fn delete_department(&mut self, id: DepartmentId) -> Result<Department, AdminError> {
        self.require_admin()?;
        self.ctx.mutate(|store| {
            store
                .remove_department(id)
                .ok_or_else(|| AdminError::NotFound(format!("department {id}")))
        })
    }
}

fn check_password(password: &str) -> Result<(), AdminError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        Err(AdminError::PasswordTooShort)
    } else {
        Ok(())
    }
}
