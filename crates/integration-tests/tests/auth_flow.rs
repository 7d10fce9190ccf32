//! Registration, verification, login and logout over HTTP.

use axum::http::StatusCode;
use staff_portal::persistence::keys;
use staff_portal::storage::KeyValueStorage;
use staff_portal_core::{Email, Role, SEED_ADMIN_EMAIL, SEED_ADMIN_PASSWORD};
use staff_portal_integration_tests::TestContext;

fn email(raw: &str) -> Email {
    Email::parse(raw).expect("valid test email")
}

async fn register(ctx: &TestContext, address: &str, password: &str) -> String {
    ctx.post(
        "/register",
        &[
            ("first_name", "Ann"),
            ("last_name", "Bee"),
            ("email", address),
            ("password", password),
        ],
    )
    .await
    .redirect_target()
    .to_owned()
}

#[tokio::test]
async fn test_seeded_admin_sees_accounts() {
    let ctx = TestContext::new();

    // Unauthenticated: redirected to login
    assert_eq!(ctx.get("/accounts").await.redirect_target(), "/login");

    ctx.login(SEED_ADMIN_EMAIL, SEED_ADMIN_PASSWORD).await;

    let page = ctx.get("/accounts").await;
    assert_eq!(page.status, StatusCode::OK);
    for account in &ctx.persisted_store().accounts {
        assert!(page.body.contains(account.email.as_str()));
    }
    assert!(page.body.contains("Admin User"));
}

#[tokio::test]
async fn test_register_verify_login_survives_reload() {
    let ctx = TestContext::new();

    assert_eq!(
        register(&ctx, "a@b.com", "pw123456").await,
        "/verify-email?notice=verification-sent"
    );
    let account = ctx.persisted_store().account(&email("a@b.com")).cloned();
    let account = account.expect("registered account is persisted");
    assert!(!account.verified);
    assert_eq!(account.role, Role::User);

    // Unverified login is refused
    let response = ctx
        .post("/login", &[("email", "a@b.com"), ("password", "pw123456")])
        .await;
    assert_eq!(response.redirect_target(), "/login?notice=unverified");
    assert!(
        ctx.get("/login?notice=unverified")
            .await
            .body
            .contains("Please verify email.")
    );

    // The verify page names the pending address
    assert!(ctx.get("/verify-email").await.body.contains("a@b.com"));
    let response = ctx.post("/verify-email", &[]).await;
    assert_eq!(response.redirect_target(), "/login?notice=email-verified");
    assert!(
        ctx.storage()
            .get(keys::UNVERIFIED_EMAIL)
            .expect("storage readable")
            .is_none()
    );

    ctx.login("a@b.com", "pw123456").await;
    let profile = ctx.get("/profile").await;
    assert_eq!(profile.status, StatusCode::OK);
    assert!(profile.body.contains("Ann Bee"));

    // A new application over the same storage is still logged in
    let reloaded = ctx.reload();
    let profile = reloaded.get("/profile").await;
    assert_eq!(profile.status, StatusCode::OK);
    assert!(profile.body.contains("a@b.com"));
}

#[tokio::test]
async fn test_duplicate_registration_leaves_accounts_unchanged() {
    let ctx = TestContext::new();
    let before = ctx.persisted_store().accounts;

    assert_eq!(
        register(&ctx, SEED_ADMIN_EMAIL, "pw123456").await,
        "/register?notice=email-exists"
    );
    assert_eq!(ctx.persisted_store().accounts, before);
    assert!(
        ctx.get("/register?notice=email-exists")
            .await
            .body
            .contains("Email already exists!")
    );
}

#[tokio::test]
async fn test_registration_validation() {
    let ctx = TestContext::new();
    let before = ctx.persisted_store();

    assert_eq!(
        register(&ctx, "c@d.com", "short").await,
        "/register?notice=weak-password"
    );
    assert_eq!(
        register(&ctx, "not-an-email", "pw123456").await,
        "/register?notice=invalid-email"
    );
    assert_eq!(ctx.persisted_store(), before);
}

#[tokio::test]
async fn test_bad_credentials_are_generic() {
    let ctx = TestContext::new();

    for (address, password) in [
        (SEED_ADMIN_EMAIL, "wrong-password"),
        ("nobody@example.com", SEED_ADMIN_PASSWORD),
        ("not-an-email", SEED_ADMIN_PASSWORD),
    ] {
        let response = ctx
            .post("/login", &[("email", address), ("password", password)])
            .await;
        assert_eq!(response.redirect_target(), "/login?notice=credentials");
    }
    assert_eq!(ctx.get("/profile").await.redirect_target(), "/login");
}

#[tokio::test]
async fn test_verify_with_nothing_pending() {
    let ctx = TestContext::new();
    let response = ctx.post("/verify-email", &[]).await;
    assert_eq!(response.redirect_target(), "/login?notice=nothing-to-verify");
}

#[tokio::test]
async fn test_logout_ends_session_across_reload() {
    let ctx = TestContext::new();
    ctx.login(SEED_ADMIN_EMAIL, SEED_ADMIN_PASSWORD).await;

    let response = ctx.post("/logout", &[]).await;
    assert_eq!(response.redirect_target(), "/?notice=logged-out");
    assert_eq!(ctx.get("/profile").await.redirect_target(), "/login");
    assert_eq!(ctx.reload().get("/profile").await.redirect_target(), "/login");
}

#[tokio::test]
async fn test_profile_update_changes_display_name() {
    let ctx = TestContext::new();
    ctx.login(SEED_ADMIN_EMAIL, SEED_ADMIN_PASSWORD).await;

    let response = ctx
        .post("/profile", &[("first_name", "Grace"), ("last_name", "Hopper")])
        .await;
    assert_eq!(response.redirect_target(), "/profile?notice=profile-updated");

    let profile = ctx.get("/profile").await;
    assert!(profile.body.contains("Grace Hopper"));
    assert!(profile.body.contains("Profile updated!"));

    let admin = ctx.persisted_store().account(&email(SEED_ADMIN_EMAIL)).cloned();
    assert_eq!(admin.map(|a| a.first_name).as_deref(), Some("Grace"));

    let response = ctx
        .post("/profile", &[("first_name", " "), ("last_name", "Hopper")])
        .await;
    assert_eq!(response.redirect_target(), "/profile?notice=missing-field");
}
