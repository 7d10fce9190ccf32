//! Admin pages: accounts, employees and departments.
//!
//! Each page lists its collection and carries one form. With `?edit=<key>`
//! the form is prefilled from that record and its hidden `intent` field
//! holds the key; otherwise it creates.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::{IntoResponse, Response};
use staff_portal_core::{Department, DepartmentId, Email, Employee, EmployeeId, Role};

use super::{Layout, RenderContext};
use crate::filters;
use crate::services::MIN_PASSWORD_LENGTH;

/// An `<option>` in a select.
#[derive(Debug, Clone)]
pub struct SelectOption {
    pub value: String,
    pub selected: bool,
}

fn options<'a>(values: impl IntoIterator<Item = &'a str>, current: &str) -> Vec<SelectOption> {
    values
        .into_iter()
        .map(|value| SelectOption {
            selected: value == current,
            value: value.to_owned(),
        })
        .collect()
}

// =============================================================================
// Accounts
// =============================================================================

#[derive(Debug, Clone)]
pub struct AccountRow {
    pub full_name: String,
    pub email: String,
    pub role: &'static str,
    pub verified: bool,
}

#[derive(Debug, Clone, Default)]
pub struct AccountForm {
    pub editing: bool,
    pub intent: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: &'static str,
}

/// Accounts page template.
#[derive(Template, WebTemplate)]
#[template(path = "accounts.html")]
pub struct AccountsTemplate {
    pub layout: Layout,
    pub rows: Vec<AccountRow>,
    pub form: AccountForm,
    pub role_options: Vec<SelectOption>,
    pub min_password_length: usize,
}

pub fn render_accounts(ctx: &RenderContext<'_>) -> Response {
    let store = ctx.portal.store();

    let rows = store
        .accounts
        .iter()
        .map(|account| AccountRow {
            full_name: account.full_name(),
            email: account.email.to_string(),
            role: account.role.as_str(),
            verified: account.verified,
        })
        .collect();

    let editing = ctx
        .edit
        .and_then(|key| Email::parse(key).ok())
        .and_then(|email| store.account(&email));
    let form = editing.map_or_else(
        || AccountForm {
            role: Role::User.as_str(),
            ..AccountForm::default()
        },
        |account| AccountForm {
            editing: true,
            intent: account.email.to_string(),
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            email: account.email.to_string(),
            role: account.role.as_str(),
        },
    );
    let role_options = options([Role::User.as_str(), Role::Admin.as_str()], form.role);

    AccountsTemplate {
        layout: ctx.layout(),
        rows,
        form,
        role_options,
        min_password_length: MIN_PASSWORD_LENGTH,
    }
    .into_response()
}

// =============================================================================
// Employees
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct EmployeeForm {
    pub editing: bool,
    pub intent: String,
    pub id: String,
    pub email: String,
    pub position: String,
    pub department: String,
    pub date: String,
}

impl From<&Employee> for EmployeeForm {
    fn from(employee: &Employee) -> Self {
        Self {
            editing: true,
            intent: employee.id.to_string(),
            id: employee.id.to_string(),
            email: employee.email.clone(),
            position: employee.position.clone(),
            department: employee.department.clone(),
            date: employee.date.clone(),
        }
    }
}

/// Employees page template.
#[derive(Template, WebTemplate)]
#[template(path = "employees.html")]
pub struct EmployeesTemplate {
    pub layout: Layout,
    pub rows: Vec<Employee>,
    pub form: EmployeeForm,
    pub department_options: Vec<SelectOption>,
}

pub fn render_employees(ctx: &RenderContext<'_>) -> Response {
    let store = ctx.portal.store();

    let form = ctx
        .edit
        .and_then(|key| store.employee(&EmployeeId::new(key)))
        .map(EmployeeForm::from)
        .unwrap_or_default();

    let mut names: Vec<&str> = store.departments.iter().map(|d| d.name.as_str()).collect();
    // Keep a department that was renamed or deleted selectable while editing
    if !form.department.is_empty() && !names.contains(&form.department.as_str()) {
        names.push(form.department.as_str());
    }
    let department_options = options(names, &form.department);

    EmployeesTemplate {
        layout: ctx.layout(),
        rows: store.employees.clone(),
        department_options,
        form,
    }
    .into_response()
}

// =============================================================================
// Departments
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct DepartmentForm {
    pub editing: bool,
    pub intent: String,
    pub name: String,
    pub description: String,
}

/// Departments page template.
#[derive(Template, WebTemplate)]
#[template(path = "departments.html")]
pub struct DepartmentsTemplate {
    pub layout: Layout,
    pub rows: Vec<Department>,
    pub form: DepartmentForm,
}

pub fn render_departments(ctx: &RenderContext<'_>) -> Response {
    let store = ctx.portal.store();

    let form = ctx
        .edit
        .and_then(|key| key.parse::<DepartmentId>().ok())
        .and_then(|id| store.department(id))
        .map(|department| DepartmentForm {
            editing: true,
            intent: department.id.to_string(),
            name: department.name.clone(),
            description: department.description.clone(),
        })
        .unwrap_or_default();

    DepartmentsTemplate {
        layout: ctx.layout(),
        rows: store.departments.clone(),
        form,
    }
    .into_response()
}
