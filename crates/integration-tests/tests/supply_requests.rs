//! Supply request submission and review over HTTP.

use staff_portal_core::{RequestStatus, SEED_ADMIN_EMAIL, SEED_ADMIN_PASSWORD};
use staff_portal_integration_tests::TestContext;

async fn register_and_login(ctx: &TestContext, email: &str) {
    ctx.post(
        "/register",
        &[
            ("first_name", "Req"),
            ("last_name", "User"),
            ("email", email),
            ("password", "pw123456"),
        ],
    )
    .await;
    ctx.post("/verify-email", &[]).await;
    ctx.login(email, "pw123456").await;
}

#[tokio::test]
async fn test_submit_and_review_request() {
    let ctx = TestContext::new();
    register_and_login(&ctx, "req@example.com").await;

    let response = ctx
        .post(
            "/requests",
            &[
                ("type", "Office"),
                ("item_name", "Pens"),
                ("item_qty", "3"),
                ("item_name", ""),
                ("item_qty", "1"),
                ("item_name", "Stapler"),
                ("item_qty", "1"),
            ],
        )
        .await;
    assert_eq!(response.redirect_target(), "/requests?notice=request-submitted");

    let requests = ctx.persisted_store().requests;
    assert_eq!(requests.len(), 1);
    let request = requests.first().expect("one request").clone();
    assert_eq!(request.status, RequestStatus::Pending);
    assert_eq!(request.items_summary(), "3x Pens, 1x Stapler");
    assert_eq!(request.employee_email.as_str(), "req@example.com");

    let page = ctx.get("/requests").await;
    assert!(page.body.contains("3x Pens, 1x Stapler"));
    assert!(!page.body.contains("All Requests"));

    // A plain user cannot decide
    let status_path = format!("/requests/{}/status", request.id);
    let response = ctx.post(&status_path, &[("status", "Approved")]).await;
    assert_eq!(response.redirect_target(), "/?notice=access-denied");

    ctx.post("/logout", &[]).await;
    ctx.login(SEED_ADMIN_EMAIL, SEED_ADMIN_PASSWORD).await;

    let page = ctx.get("/requests").await;
    assert!(page.body.contains("All Requests"));
    assert!(page.body.contains("req@example.com"));

    let response = ctx.post(&status_path, &[("status", "Approved")]).await;
    assert_eq!(response.redirect_target(), "/requests?notice=request-updated");

    // Decided requests are final
    let response = ctx.post(&status_path, &[("status", "Rejected")]).await;
    assert_eq!(response.redirect_target(), "/requests?notice=invalid-transition");

    let stored = ctx.persisted_store().requests;
    assert_eq!(stored.first().map(|r| r.status), Some(RequestStatus::Approved));
}

#[tokio::test]
async fn test_request_validation() {
    let ctx = TestContext::new();
    register_and_login(&ctx, "req@example.com").await;

    let response = ctx
        .post("/requests", &[("type", "Office"), ("item_name", " "), ("item_qty", "1")])
        .await;
    assert_eq!(response.redirect_target(), "/requests?notice=request-empty");

    let response = ctx
        .post("/requests", &[("type", "Office"), ("item_name", "Pens"), ("item_qty", "0")])
        .await;
    assert_eq!(response.redirect_target(), "/requests?notice=invalid-quantity");

    let response = ctx
        .post("/requests", &[("type", "Office"), ("item_name", "Pens"), ("item_qty", "many")])
        .await;
    assert_eq!(response.redirect_target(), "/requests?notice=invalid-quantity");

    assert!(ctx.persisted_store().requests.is_empty());
}

#[tokio::test]
async fn test_request_outlives_its_account() {
    let ctx = TestContext::new();
    register_and_login(&ctx, "req@example.com").await;
    ctx.post(
        "/requests",
        &[("type", "Equipment"), ("item_name", "Monitor"), ("item_qty", "2")],
    )
    .await;
    ctx.post("/logout", &[]).await;

    ctx.login(SEED_ADMIN_EMAIL, SEED_ADMIN_PASSWORD).await;
    let response = ctx.post("/accounts/req%40example.com/delete", &[]).await;
    assert_eq!(response.redirect_target(), "/accounts?notice=account-deleted");

    assert_eq!(ctx.persisted_store().requests.len(), 1);
    assert!(ctx.get("/requests").await.body.contains("2x Monitor"));
}
