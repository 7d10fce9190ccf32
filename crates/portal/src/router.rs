//! View routing and guards.
//!
//! A location (`#/accounts`, `/accounts`, `accounts/`) is normalized to a
//! bare view name, classified by the access it needs, and either activated
//! or turned into a redirect. Guards run before any view is activated.

use staff_portal_core::Account;

use crate::notice::Notice;

/// Access level a view requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Anyone.
    Public,
    /// Any logged-in account.
    Protected,
    /// Logged-in administrators.
    Admin,
}

/// Every page the portal can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Home,
    Login,
    Register,
    VerifyEmail,
    Profile,
    Requests,
    Employees,
    Accounts,
    Departments,
    NotFound,
}

impl View {
    pub const ALL: [Self; 10] = [
        Self::Home,
        Self::Login,
        Self::Register,
        Self::VerifyEmail,
        Self::Profile,
        Self::Requests,
        Self::Employees,
        Self::Accounts,
        Self::Departments,
        Self::NotFound,
    ];

    /// Name used in locations.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Login => "login",
            Self::Register => "register",
            Self::VerifyEmail => "verify-email",
            Self::Profile => "profile",
            Self::Requests => "requests",
            Self::Employees => "employees",
            Self::Accounts => "accounts",
            Self::Departments => "departments",
            Self::NotFound => "not-found",
        }
    }

    /// Request path serving the view.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
            Self::Register => "/register",
            Self::VerifyEmail => "/verify-email",
            Self::Profile => "/profile",
            Self::Requests => "/requests",
            Self::Employees => "/employees",
            Self::Accounts => "/accounts",
            Self::Departments => "/departments",
            Self::NotFound => "/not-found",
        }
    }

    /// Page heading.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Login => "Login",
            Self::Register => "Register",
            Self::VerifyEmail => "Verify Email",
            Self::Profile => "My Profile",
            Self::Requests => "My Requests",
            Self::Employees => "Employees",
            Self::Accounts => "Accounts",
            Self::Departments => "Departments",
            Self::NotFound => "Page Not Found",
        }
    }

    #[must_use]
    pub const fn access(self) -> Access {
        match self {
            Self::Profile | Self::Requests => Access::Protected,
            Self::Employees | Self::Accounts | Self::Departments => Access::Admin,
            Self::Home | Self::Login | Self::Register | Self::VerifyEmail | Self::NotFound => {
                Access::Public
            }
        }
    }

    /// Look up a view by its normalized name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|view| view.name() == name)
    }
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of routing a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Show this view.
    Activate(View),
    /// Go somewhere else instead, optionally with a notice.
    Redirect { to: View, notice: Option<Notice> },
}

impl Transition {
    #[must_use]
    pub const fn redirect(to: View, notice: Notice) -> Self {
        Self::Redirect {
            to,
            notice: Some(notice),
        }
    }

    /// The view that ends up on screen.
    #[must_use]
    pub const fn view(self) -> View {
        match self {
            Self::Activate(view) | Self::Redirect { to: view, .. } => view,
        }
    }
}

/// Reduce a location to a bare view name.
///
/// Strips a leading `#`, then leading and trailing slashes. An empty result
/// is `home`.
#[must_use]
pub fn normalize(location: &str) -> &str {
    let name = location
        .strip_prefix('#')
        .unwrap_or(location)
        .trim_start_matches('/')
        .trim_end_matches('/');
    if name.is_empty() { View::Home.name() } else { name }
}

/// Check `access` against the session account.
///
/// # Errors
///
/// Returns the redirect to perform when the guard fails: anonymous users go
/// to the login page, non-admins on admin views go home with a notice.
pub fn guard(access: Access, account: Option<&Account>) -> Result<(), Transition> {
    match (access, account) {
        (Access::Public, _) => Ok(()),
        (Access::Protected | Access::Admin, None) => Err(Transition::Redirect {
            to: View::Login,
            notice: None,
        }),
        (Access::Admin, Some(account)) if !account.is_admin() => {
            Err(Transition::redirect(View::Home, Notice::AdminsOnly))
        }
        (Access::Protected | Access::Admin, Some(_)) => Ok(()),
    }
}

/// Route `location` for the given session account.
#[must_use]
pub fn resolve(location: &str, account: Option<&Account>) -> Transition {
    let view = View::from_name(normalize(location)).unwrap_or(View::NotFound);
    match guard(view.access(), account) {
        Ok(()) => Transition::Activate(view),
        Err(redirect) => {
            tracing::debug!(requested = %view, to = %redirect.view(), "Route guard redirect");
            redirect
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use staff_portal_core::{Email, Role};

    use super::*;

    fn account(role: Role) -> Account {
        Account {
            first_name: "Test".to_owned(),
            last_name: "User".to_owned(),
            email: Email::parse("test@example.com").unwrap(),
            password: "password".to_owned(),
            role,
            verified: true,
        }
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(""), "home");
        assert_eq!(normalize("#"), "home");
        assert_eq!(normalize("#/"), "home");
        assert_eq!(normalize("/"), "home");
        assert_eq!(normalize("#/accounts"), "accounts");
        assert_eq!(normalize("/accounts/"), "accounts");
        assert_eq!(normalize("accounts"), "accounts");
        assert_eq!(normalize("#/verify-email"), "verify-email");
    }

    #[test]
    fn test_view_names_roundtrip() {
        for view in View::ALL {
            assert_eq!(View::from_name(view.name()), Some(view));
            assert_eq!(normalize(view.path()), view.name());
        }
    }

    #[test]
    fn test_admin_routes_without_session_go_to_login() {
        for location in ["#/employees", "#/accounts", "#/departments"] {
            assert_eq!(
                resolve(location, None),
                Transition::Redirect {
                    to: View::Login,
                    notice: None
                },
                "{location}"
            );
        }
    }

    #[test]
    fn test_protected_routes_without_session_go_to_login() {
        for location in ["#/profile", "#/requests"] {
            assert_eq!(resolve(location, None).view(), View::Login, "{location}");
        }
    }

    #[test]
    fn test_admin_routes_deny_users() {
        let user = account(Role::User);
        for location in ["#/employees", "#/accounts", "#/departments"] {
            assert_eq!(
                resolve(location, Some(&user)),
                Transition::redirect(View::Home, Notice::AdminsOnly),
                "{location}"
            );
        }
    }

    #[test]
    fn test_admin_reaches_everything() {
        let admin = account(Role::Admin);
        for view in View::ALL {
            assert_eq!(
                resolve(view.name(), Some(&admin)),
                Transition::Activate(view)
            );
        }
    }

    #[test]
    fn test_user_reaches_protected_routes() {
        let user = account(Role::User);
        assert_eq!(
            resolve("#/profile", Some(&user)),
            Transition::Activate(View::Profile)
        );
        assert_eq!(
            resolve("#/requests", Some(&user)),
            Transition::Activate(View::Requests)
        );
    }

    #[test]
    fn test_public_routes_need_no_session() {
        for location in ["", "#/home", "#/login", "#/register", "#/verify-email"] {
            assert!(matches!(resolve(location, None), Transition::Activate(_)));
        }
    }

    #[test]
    fn test_unknown_location_is_not_found() {
        assert_eq!(
            resolve("#/nowhere", None),
            Transition::Activate(View::NotFound)
        );
        assert_eq!(
            resolve("/accounts/extra", None),
            Transition::Activate(View::NotFound)
        );
    }
}
