//! One-shot user notices.
//!
//! A notice travels as a short code in the `?notice=` query parameter of the
//! redirect that follows a form submission, and is rendered once above the
//! page content.

/// Severity of a notice, mapped to an alert style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Danger,
}

impl NoticeLevel {
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Success => "alert-success",
            Self::Info => "alert-info",
            Self::Warning => "alert-warning",
            Self::Danger => "alert-danger",
        }
    }
}

/// Every message the portal can show after a redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    AdminsOnly,
    EmailExists,
    WeakPassword,
    InvalidEmail,
    VerificationSent,
    NothingToVerify,
    EmailVerified,
    PleaseVerify,
    InvalidCredentials,
    LoggedOut,
    ProfileUpdated,
    AccountSaved,
    AccountDeleted,
    PasswordUpdated,
    PasswordTooShort,
    EmployeeSaved,
    EmployeeDeleted,
    DuplicateEmployee,
    DepartmentSaved,
    DepartmentDeleted,
    RequestSubmitted,
    RequestEmpty,
    InvalidQuantity,
    RequestUpdated,
    InvalidTransition,
    NotFound,
    MissingField,
}

impl Notice {
    pub const ALL: [Self; 27] = [
        Self::AdminsOnly,
        Self::EmailExists,
        Self::WeakPassword,
        Self::InvalidEmail,
        Self::VerificationSent,
        Self::NothingToVerify,
        Self::EmailVerified,
        Self::PleaseVerify,
        Self::InvalidCredentials,
        Self::LoggedOut,
        Self::ProfileUpdated,
        Self::AccountSaved,
        Self::AccountDeleted,
        Self::PasswordUpdated,
        Self::PasswordTooShort,
        Self::EmployeeSaved,
        Self::EmployeeDeleted,
        Self::DuplicateEmployee,
        Self::DepartmentSaved,
        Self::DepartmentDeleted,
        Self::RequestSubmitted,
        Self::RequestEmpty,
        Self::InvalidQuantity,
        Self::RequestUpdated,
        Self::InvalidTransition,
        Self::NotFound,
        Self::MissingField,
    ];

    /// Code carried in the query string.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::AdminsOnly => "access-denied",
            Self::EmailExists => "email-exists",
            Self::WeakPassword => "weak-password",
            Self::InvalidEmail => "invalid-email",
            Self::VerificationSent => "verification-sent",
            Self::NothingToVerify => "nothing-to-verify",
            Self::EmailVerified => "email-verified",
            Self::PleaseVerify => "unverified",
            Self::InvalidCredentials => "credentials",
            Self::LoggedOut => "logged-out",
            Self::ProfileUpdated => "profile-updated",
            Self::AccountSaved => "account-saved",
            Self::AccountDeleted => "account-deleted",
            Self::PasswordUpdated => "password-updated",
            Self::PasswordTooShort => "password-too-short",
            Self::EmployeeSaved => "employee-saved",
            Self::EmployeeDeleted => "employee-deleted",
            Self::DuplicateEmployee => "employee-exists",
            Self::DepartmentSaved => "department-saved",
            Self::DepartmentDeleted => "department-deleted",
            Self::RequestSubmitted => "request-submitted",
            Self::RequestEmpty => "request-empty",
            Self::InvalidQuantity => "invalid-quantity",
            Self::RequestUpdated => "request-updated",
            Self::InvalidTransition => "invalid-transition",
            Self::NotFound => "not-found",
            Self::MissingField => "missing-field",
        }
    }

    /// Text shown to the user.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::AdminsOnly => "Access Denied: Admins only.",
            Self::EmailExists => "Email already exists!",
            Self::WeakPassword => "Password must be at least 6 characters.",
            Self::InvalidEmail => "Please enter a valid email address.",
            Self::VerificationSent => "Account created. A verification email has been sent.",
            Self::NothingToVerify => "There is no email waiting for verification.",
            Self::EmailVerified => "Email Verified! Please Login.",
            Self::PleaseVerify => "Please verify email.",
            Self::InvalidCredentials => "Invalid credentials.",
            Self::LoggedOut => "You have been logged out.",
            Self::ProfileUpdated => "Profile updated!",
            Self::AccountSaved => "Account saved.",
            Self::AccountDeleted => "Account deleted.",
            Self::PasswordUpdated => "Password updated!",
            Self::PasswordTooShort => "Password too short.",
            Self::EmployeeSaved => "Employee saved.",
            Self::EmployeeDeleted => "Employee removed.",
            Self::DuplicateEmployee => "An employee with this ID already exists.",
            Self::DepartmentSaved => "Department saved.",
            Self::DepartmentDeleted => "Department deleted.",
            Self::RequestSubmitted => "Request submitted.",
            Self::RequestEmpty => "Add at least one item to the request.",
            Self::InvalidQuantity => "Quantities must be whole numbers of at least 1.",
            Self::RequestUpdated => "Request status updated.",
            Self::InvalidTransition => "Only pending requests can be approved or rejected.",
            Self::NotFound => "That record no longer exists.",
            Self::MissingField => "Please fill in all required fields.",
        }
    }

    #[must_use]
    pub const fn level(self) -> NoticeLevel {
        match self {
            Self::EmailVerified
            | Self::ProfileUpdated
            | Self::AccountSaved
            | Self::AccountDeleted
            | Self::PasswordUpdated
            | Self::EmployeeSaved
            | Self::EmployeeDeleted
            | Self::DepartmentSaved
            | Self::DepartmentDeleted
            | Self::RequestSubmitted
            | Self::RequestUpdated => NoticeLevel::Success,
            Self::VerificationSent | Self::NothingToVerify | Self::LoggedOut => NoticeLevel::Info,
            Self::PleaseVerify => NoticeLevel::Warning,
            Self::AdminsOnly
            | Self::EmailExists
            | Self::WeakPassword
            | Self::InvalidEmail
            | Self::InvalidCredentials
            | Self::PasswordTooShort
            | Self::DuplicateEmployee
            | Self::RequestEmpty
            | Self::InvalidQuantity
            | Self::InvalidTransition
            | Self::NotFound
            | Self::MissingField => NoticeLevel::Danger,
        }
    }

    /// Alert class for templates.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        self.level().css_class()
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl std::str::FromStr for Notice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|n| n.code() == s)
            .ok_or_else(|| format!("unknown notice code: {s}"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_codes_are_unique_and_parse_back() {
        let mut seen = HashSet::new();
        for notice in Notice::ALL {
            assert!(seen.insert(notice.code()), "duplicate code {}", notice.code());
            assert_eq!(notice.code().parse::<Notice>().unwrap(), notice);
        }
    }

    #[test]
    fn test_unknown_code() {
        assert!("shrug".parse::<Notice>().is_err());
    }

    #[test]
    fn test_user_facing_messages() {
        assert_eq!(Notice::AdminsOnly.message(), "Access Denied: Admins only.");
        assert_eq!(Notice::EmailVerified.message(), "Email Verified! Please Login.");
        assert_eq!(Notice::PleaseVerify.message(), "Please verify email.");
        assert_eq!(Notice::PasswordTooShort.message(), "Password too short.");
    }

    #[test]
    fn test_css_class() {
        assert_eq!(Notice::AdminsOnly.css_class(), "alert-danger");
        assert_eq!(Notice::EmailVerified.css_class(), "alert-success");
    }
}
