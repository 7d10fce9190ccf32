//! Account email, the natural key of every account.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Why a submitted email was refused.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    #[error("email cannot be empty")]
    Empty,
    #[error("email must be at most {max} characters")]
    TooLong { max: usize },
    #[error("email must not contain whitespace")]
    Whitespace,
    #[error("email must contain exactly one @ symbol")]
    AtSymbol,
    #[error("email needs text before the @")]
    EmptyLocalPart,
    #[error("email needs a domain after the @")]
    EmptyDomain,
}

/// An account email.
///
/// [`Email::parse`] is the check form handlers run before a value reaches the
/// services; surrounding whitespace from the form field is dropped. Stored
/// values deserialize as-is, and equality is exact, so `User@x.com` and
/// `user@x.com` are two different accounts.
///
/// ```
/// use staff_portal_core::Email;
///
/// assert_eq!(Email::parse(" jo@b.com ").unwrap().as_str(), "jo@b.com");
/// assert!(Email::parse("jo@@b.com").is_err());
/// assert!(Email::parse("jo b@c.com").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Longest address accepted from a form (RFC 5321 path limit).
    pub const MAX_LENGTH: usize = 254;

    /// Validate a submitted email.
    ///
    /// # Errors
    ///
    /// Returns [`EmailError`] for a blank or over-long value, inner
    /// whitespace, anything other than a single `@`, or an empty side.
    pub fn parse(raw: &str) -> Result<Self, EmailError> {
        let s = raw.trim();
        if s.is_empty() {
            return Err(EmailError::Empty);
        }
        if s.len() > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }
        if s.chars().any(char::is_whitespace) {
            return Err(EmailError::Whitespace);
        }

        let (local, domain) = s.split_once('@').ok_or(EmailError::AtSymbol)?;
        if domain.contains('@') {
            return Err(EmailError::AtSymbol);
        }
        if local.is_empty() {
            return Err(EmailError::EmptyLocalPart);
        }
        if domain.is_empty() {
            return Err(EmailError::EmptyDomain);
        }

        Ok(Self(s.to_owned()))
    }

    /// Seed data literal, not validated.
    pub(crate) fn from_static(s: &'static str) -> Self {
        Self(s.to_owned())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_form_values() {
        for raw in ["ucadmin@gmail.com", "first.last+hr@corp.example", "a@b"] {
            assert_eq!(Email::parse(raw).unwrap().as_str(), raw);
        }
    }

    #[test]
    fn test_surrounding_whitespace_is_dropped() {
        let email = Email::parse("  jo@b.com\n").unwrap();
        assert_eq!(email.as_str(), "jo@b.com");
    }

    #[test]
    fn test_rejections() {
        let cases = [
            ("", EmailError::Empty),
            ("   ", EmailError::Empty),
            ("jo b@c.com", EmailError::Whitespace),
            ("no-at-symbol", EmailError::AtSymbol),
            ("jo@@b.com", EmailError::AtSymbol),
            ("@b.com", EmailError::EmptyLocalPart),
            ("jo@", EmailError::EmptyDomain),
        ];
        for (raw, expected) in cases {
            assert_eq!(Email::parse(raw).unwrap_err(), expected, "{raw:?}");
        }

        let long = format!("{}@corp.example", "x".repeat(250));
        assert!(matches!(Email::parse(&long), Err(EmailError::TooLong { max: 254 })));
    }

    #[test]
    fn test_equality_is_case_sensitive() {
        assert_ne!(
            Email::parse("jo@b.com").unwrap(),
            Email::parse("Jo@b.com").unwrap()
        );
    }

    #[test]
    fn test_stored_values_are_not_revalidated() {
        let email: Email = serde_json::from_str("\"legacy-value\"").unwrap();
        assert_eq!(email.to_string(), "legacy-value");
        assert_eq!(serde_json::to_string(&email).unwrap(), "\"legacy-value\"");
    }
}
