//! Business logic services.
//!
//! Each service borrows the [`PortalContext`](crate::context::PortalContext)
//! for the duration of one operation. Validation failures come back as
//! typed errors; [`UserFacing`] maps the ones a user can fix to the notice
//! shown after the redirect.

pub mod admin;
pub mod auth;
pub mod requests;

use crate::notice::Notice;

/// Errors that can be shown to the user as a notice.
pub trait UserFacing {
    /// The notice for this error, or `None` for server-side failures.
    fn notice(&self) -> Option<Notice>;
}

/// Minimum password length for registration, admin creation and resets.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Trimmed copy of a required text field, or `None` if it is blank.
fn required(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
