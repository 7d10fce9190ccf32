//! Admin management of accounts, employees and departments over HTTP.

use axum::http::StatusCode;
use staff_portal_core::{DepartmentId, Email, EmployeeId, Role, SEED_ADMIN_EMAIL, SEED_ADMIN_PASSWORD};
use staff_portal_integration_tests::TestContext;

fn email(raw: &str) -> Email {
    Email::parse(raw).expect("valid test email")
}

async fn admin_context() -> TestContext {
    let ctx = TestContext::new();
    ctx.login(SEED_ADMIN_EMAIL, SEED_ADMIN_PASSWORD).await;
    ctx
}

// =============================================================================
// Accounts
// =============================================================================

#[tokio::test]
async fn test_create_edit_and_delete_account() {
    let ctx = admin_context().await;

    let response = ctx
        .post(
            "/accounts",
            &[
                ("intent", ""),
                ("first_name", "Sam"),
                ("last_name", "Stone"),
                ("email", "sam@example.com"),
                ("password", "secret1"),
                ("role", "User"),
            ],
        )
        .await;
    assert_eq!(response.redirect_target(), "/accounts?notice=account-saved");
    let sam = ctx.persisted_store().account(&email("sam@example.com")).cloned();
    let sam = sam.expect("account created");
    assert!(sam.verified);
    assert_eq!(sam.role, Role::User);

    // The edit form is prefilled
    let page = ctx.get("/accounts?edit=sam%40example.com").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Edit Account"));
    assert!(page.body.contains("value=\"Sam\""));

    // Edit with a blank password keeps the old one and can rename the email
    let response = ctx
        .post(
            "/accounts",
            &[
                ("intent", "sam@example.com"),
                ("first_name", "Samuel"),
                ("last_name", "Stone"),
                ("email", "samuel@example.com"),
                ("password", ""),
                ("role", "Admin"),
            ],
        )
        .await;
    assert_eq!(response.redirect_target(), "/accounts?notice=account-saved");
    let store = ctx.persisted_store();
    assert!(!store.has_account(&email("sam@example.com")));
    let samuel = store.account(&email("samuel@example.com")).expect("renamed");
    assert_eq!(samuel.password, "secret1");
    assert_eq!(samuel.role, Role::Admin);

    let response = ctx.post("/accounts/samuel%40example.com/delete", &[]).await;
    assert_eq!(response.redirect_target(), "/accounts?notice=account-deleted");
    assert!(!ctx.persisted_store().has_account(&email("samuel@example.com")));
}

#[tokio::test]
async fn test_account_validation() {
    let ctx = admin_context().await;
    let before = ctx.persisted_store();

    let create = |address: &'static str, password: &'static str| {
        [
            ("intent", ""),
            ("first_name", "Sam"),
            ("last_name", "Stone"),
            ("email", address),
            ("password", password),
            ("role", "User"),
        ]
    };

    let response = ctx.post("/accounts", &create(SEED_ADMIN_EMAIL, "secret1")).await;
    assert_eq!(response.redirect_target(), "/accounts?notice=email-exists");

    let response = ctx.post("/accounts", &create("new@example.com", "short")).await;
    assert_eq!(response.redirect_target(), "/accounts?notice=password-too-short");

    let response = ctx.post("/accounts", &create("nope", "secret1")).await;
    assert_eq!(response.redirect_target(), "/accounts?notice=invalid-email");

    let response = ctx.post("/accounts/ghost%40example.com/delete", &[]).await;
    assert_eq!(response.redirect_target(), "/accounts?notice=not-found");

    assert_eq!(ctx.persisted_store(), before);
}

#[tokio::test]
async fn test_reset_password() {
    let ctx = admin_context().await;
    let path = format!("/accounts/{SEED_ADMIN_EMAIL}/password");

    let response = ctx.post(&path, &[("password", "abc")]).await;
    assert_eq!(response.redirect_target(), "/accounts?notice=password-too-short");

    let response = ctx.post(&path, &[("password", "newpassword")]).await;
    assert_eq!(response.redirect_target(), "/accounts?notice=password-updated");

    ctx.post("/logout", &[]).await;
    let response = ctx
        .post("/login", &[("email", SEED_ADMIN_EMAIL), ("password", SEED_ADMIN_PASSWORD)])
        .await;
    assert_eq!(response.redirect_target(), "/login?notice=credentials");
    ctx.login(SEED_ADMIN_EMAIL, "newpassword").await;
}

#[tokio::test]
async fn test_deleting_own_account_logs_out() {
    let ctx = admin_context().await;

    let path = format!("/accounts/{SEED_ADMIN_EMAIL}/delete");
    let response = ctx.post(&path, &[]).await;
    assert_eq!(response.redirect_target(), "/accounts?notice=account-deleted");

    // The session went with the account
    assert_eq!(ctx.get("/accounts").await.redirect_target(), "/login");
    assert_eq!(ctx.reload().get("/profile").await.redirect_target(), "/login");
}

#[tokio::test]
async fn test_renaming_own_account_keeps_session() {
    let ctx = admin_context().await;

    let response = ctx
        .post(
            "/accounts",
            &[
                ("intent", SEED_ADMIN_EMAIL),
                ("first_name", "Admin"),
                ("last_name", "User"),
                ("email", "boss@example.com"),
                ("password", ""),
                ("role", "Admin"),
            ],
        )
        .await;
    assert_eq!(response.redirect_target(), "/accounts?notice=account-saved");

    let page = ctx.get("/accounts").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(ctx.reload().get("/profile").await.body.contains("boss@example.com"));
}

// =============================================================================
// Employees
// =============================================================================

#[tokio::test]
async fn test_employee_lifecycle() {
    let ctx = admin_context().await;
    let form = |intent: &'static str, position: &'static str| {
        [
            ("intent", intent),
            ("id", "EMP-001"),
            ("email", "emp@example.com"),
            ("position", position),
            ("department", "Engineering"),
            ("date", "2026-01-05"),
        ]
    };

    let response = ctx.post("/employees", &form("", "Developer")).await;
    assert_eq!(response.redirect_target(), "/employees?notice=employee-saved");

    let response = ctx.post("/employees", &form("", "Developer")).await;
    assert_eq!(response.redirect_target(), "/employees?notice=employee-exists");

    let response = ctx.post("/employees", &form("EMP-001", "Lead")).await;
    assert_eq!(response.redirect_target(), "/employees?notice=employee-saved");

    let id = EmployeeId::new("EMP-001");
    let employee = ctx.persisted_store().employee(&id).cloned().expect("saved");
    assert_eq!(employee.position, "Lead");
    assert_eq!(employee.department, "Engineering");

    let page = ctx.get("/employees").await;
    assert!(page.body.contains("EMP-001"));
    assert!(page.body.contains("Lead"));

    let response = ctx.post("/employees/EMP-001/delete", &[]).await;
    assert_eq!(response.redirect_target(), "/employees?notice=employee-deleted");
    assert!(ctx.persisted_store().employees.is_empty());
}

// =============================================================================
// Departments
// =============================================================================

#[tokio::test]
async fn test_department_lifecycle() {
    let ctx = admin_context().await;

    let response = ctx
        .post("/departments", &[("intent", ""), ("name", "Finance"), ("description", "Money")])
        .await;
    assert_eq!(response.redirect_target(), "/departments?notice=department-saved");

    let store = ctx.persisted_store();
    let finance = store.department(DepartmentId::new(3)).expect("next id assigned");
    assert_eq!(finance.name, "Finance");

    let response = ctx
        .post("/departments", &[("intent", "3"), ("name", "Finance & Ops"), ("description", "")])
        .await;
    assert_eq!(response.redirect_target(), "/departments?notice=department-saved");
    let store = ctx.persisted_store();
    let renamed = store.department(DepartmentId::new(3)).expect("edited in place");
    assert_eq!(renamed.name, "Finance & Ops");
    let page = ctx.get("/departments").await;
    assert!(page.body.contains("Finance &#38; Ops"));

    let response = ctx.post("/departments/3/delete", &[]).await;
    assert_eq!(response.redirect_target(), "/departments?notice=department-deleted");

    let response = ctx.post("/departments/3/delete", &[]).await;
    assert_eq!(response.redirect_target(), "/departments?notice=not-found");

    let names: Vec<_> = ctx
        .persisted_store()
        .departments
        .into_iter()
        .map(|d| d.name)
        .collect();
    assert_eq!(names, ["Engineering", "HR"]);
}
