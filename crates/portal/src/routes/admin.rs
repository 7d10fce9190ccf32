//! Admin route handlers: accounts, employees and departments.
//!
//! Handlers require an admin session through [`RequireAdmin`] and redirect
//! back to the list view. The services check the role again, so a session
//! that changes between the guard and the lock is still refused.

use axum::{
    Form,
    extract::{Path, State},
    response::Redirect,
};
use serde::Deserialize;
use staff_portal_core::{DepartmentId, EditIntent, Email, EmployeeId, Role};

use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::notice::Notice;
use crate::router::View;
use crate::routes::{see_other, settle};
use crate::services::admin::{
    AccountDraft, AdminError, AdminService, DepartmentDraft, EmployeeDraft,
};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Account form data.
#[derive(Debug, Deserialize)]
pub struct AccountForm {
    /// Blank to create, otherwise the email of the account being edited.
    #[serde(default)]
    pub intent: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub role: String,
}

/// Password reset form data.
#[derive(Debug, Deserialize)]
pub struct PasswordForm {
    pub password: String,
}

/// Employee form data.
#[derive(Debug, Deserialize)]
pub struct EmployeeForm {
    #[serde(default)]
    pub intent: String,
    pub id: String,
    pub email: String,
    pub position: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub date: String,
}

/// Department form data.
#[derive(Debug, Deserialize)]
pub struct DepartmentForm {
    #[serde(default)]
    pub intent: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

// =============================================================================
// Accounts
// =============================================================================

/// Create or edit an account.
pub async fn save_account(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Form(form): Form<AccountForm>,
) -> Result<Redirect> {
    let role: Role = form.role.parse().map_err(AppError::BadRequest)?;

    let mut ctx = state.context()?;
    let result = account_draft(&form, role).and_then(|(intent, draft)| {
        AdminService::new(&mut ctx).save_account(intent, draft)
    });
    settle(result, View::Accounts, |account| {
        tracing::info!(email = %account.email, role = %account.role, "Account saved");
        see_other(View::Accounts, Some(Notice::AccountSaved))
    })
}

fn account_draft(
    form: &AccountForm,
    role: Role,
) -> std::result::Result<(EditIntent<Email>, AccountDraft), AdminError> {
    let intent = EditIntent::from_field(Some(form.intent.as_str()), Email::parse)?;
    let draft = AccountDraft {
        first_name: form.first_name.clone(),
        last_name: form.last_name.clone(),
        email: Email::parse(form.email.trim())?,
        password: form.password.clone(),
        role,
    };
    Ok((intent, draft))
}

/// Reset an account's password.
pub async fn reset_password(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(email): Path<String>,
    Form(form): Form<PasswordForm>,
) -> Result<Redirect> {
    let mut ctx = state.context()?;
    let result = Email::parse(&email)
        .map_err(AdminError::from)
        .and_then(|email| AdminService::new(&mut ctx).reset_password(&email, &form.password));
    settle(result, View::Accounts, |()| {
        see_other(View::Accounts, Some(Notice::PasswordUpdated))
    })
}

/// Delete an account.
///
/// Deleting the session's own account logs the session out, so the redirect
/// then lands on the login page.
pub async fn delete_account(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(email): Path<String>,
) -> Result<Redirect> {
    let mut ctx = state.context()?;
    let result = Email::parse(&email)
        .map_err(AdminError::from)
        .and_then(|email| AdminService::new(&mut ctx).delete_account(&email));
    settle(result, View::Accounts, |account| {
        tracing::info!(email = %account.email, "Account deleted");
        see_other(View::Accounts, Some(Notice::AccountDeleted))
    })
}

// =============================================================================
// Employees
// =============================================================================

/// Create or edit an employee.
pub async fn save_employee(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Form(form): Form<EmployeeForm>,
) -> Result<Redirect> {
    let Ok(intent) = EditIntent::from_field(Some(form.intent.as_str()), |key| {
        Ok::<_, std::convert::Infallible>(EmployeeId::new(key))
    });
    let draft = EmployeeDraft {
        id: EmployeeId::new(&form.id),
        email: form.email,
        position: form.position,
        department: form.department,
        date: form.date,
    };

    let mut ctx = state.context()?;
    let result = AdminService::new(&mut ctx).save_employee(intent, draft);
    settle(result, View::Employees, |employee| {
        tracing::info!(employee_id = %employee.id, "Employee saved");
        see_other(View::Employees, Some(Notice::EmployeeSaved))
    })
}

/// Delete an employee.
pub async fn delete_employee(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<String>,
) -> Result<Redirect> {
    let mut ctx = state.context()?;
    let result = AdminService::new(&mut ctx).delete_employee(&EmployeeId::new(&id));
    settle(result, View::Employees, |employee| {
        tracing::info!(employee_id = %employee.id, "Employee deleted");
        see_other(View::Employees, Some(Notice::EmployeeDeleted))
    })
}

// =============================================================================
// Departments
// =============================================================================

/// Create or edit a department.
pub async fn save_department(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Form(form): Form<DepartmentForm>,
) -> Result<Redirect> {
    let intent: EditIntent<DepartmentId> =
        EditIntent::from_field(Some(form.intent.as_str()), str::parse)
            .map_err(|e| AppError::BadRequest(format!("invalid department id: {e}")))?;
    let draft = DepartmentDraft {
        name: form.name,
        description: form.description,
    };

    let mut ctx = state.context()?;
    let result = AdminService::new(&mut ctx).save_department(intent, draft);
    settle(result, View::Departments, |department| {
        tracing::info!(
            department_id = %department.id,
            name = %department.name,
            "Department saved"
        );
        see_other(View::Departments, Some(Notice::DepartmentSaved))
    })
}

/// Delete a department.
pub async fn delete_department(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DepartmentId>,
) -> Result<Redirect> {
    let mut ctx = state.context()?;
    let result = AdminService::new(&mut ctx).delete_department(id);
    settle(result, View::Departments, |department| {
        tracing::info!(department_id = %department.id, "Department deleted");
        see_other(View::Departments, Some(Notice::DepartmentDeleted))
    })
}
