//! Supply request submission and review.

use chrono::{DateTime, Utc};
use staff_portal_core::{RequestId, RequestItem, RequestStatus, SupplyRequest};
use thiserror::Error;

use crate::context::PortalContext;
use crate::notice::Notice;
use crate::persistence::PersistenceError;
use crate::services::{UserFacing, required};

/// Errors from request operations.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("not authenticated")]
    NotAuthenticated,

    #[error("administrator session required")]
    Forbidden,

    #[error("request type is required")]
    MissingType,

    /// No item with a name was submitted.
    #[error("request has no items")]
    Empty,

    #[error("invalid quantity for '{item}': {value:?}")]
    InvalidQuantity { item: String, value: String },

    #[error("request {0} not found")]
    NotFound(RequestId),

    #[error("cannot move request from {from} to {to}")]
    InvalidTransition {
        from: RequestStatus,
        to: RequestStatus,
    },

    #[error("persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

impl UserFacing for RequestError {
    fn notice(&self) -> Option<Notice> {
        match self {
            Self::NotAuthenticated => Some(Notice::InvalidCredentials),
            Self::Forbidden => Some(Notice::AdminsOnly),
            Self::MissingType => Some(Notice::MissingField),
            Self::Empty => Some(Notice::RequestEmpty),
            Self::InvalidQuantity { .. } => Some(Notice::InvalidQuantity),
            Self::NotFound(_) => Some(Notice::NotFound),
            Self::InvalidTransition { .. } => Some(Notice::InvalidTransition),
            Self::Persistence(_) => None,
        }
    }
}

/// One item row as submitted, before validation.
#[derive(Debug, Clone, Default)]
pub struct ItemDraft {
    pub name: String,
    pub qty: String,
}

/// Request service.
pub struct RequestService<'a> {
    ctx: &'a mut PortalContext,
}

impl<'a> RequestService<'a> {
    /// Create a new request service.
    #[must_use]
    pub const fn new(ctx: &'a mut PortalContext) -> Self {
        Self { ctx }
    }

    /// Submit a pending request for the session account.
    ///
    /// Rows with a blank name are ignored. The id is derived from `now`
    /// (milliseconds) and the date is `now`'s UTC calendar date.
    ///
    /// # Errors
    ///
    /// Returns `RequestError::Empty` if no named item remains,
    /// `RequestError::InvalidQuantity` if a quantity is not a whole number
    /// of at least 1, `RequestError::NotAuthenticated` without a session, or
    /// a persistence error.
    pub fn submit(
        &mut self,
        request_type: &str,
        items: Vec<ItemDraft>,
        now: DateTime<Utc>,
    ) -> Result<SupplyRequest, RequestError> {
        let employee_email = self
            .ctx
            .session()
            .email()
            .cloned()
            .ok_or(RequestError::NotAuthenticated)?;
        let request_type = required(request_type).ok_or(RequestError::MissingType)?;
        let items = parse_items(items)?;

        let request = self.ctx.mutate(|store| {
            let request = SupplyRequest {
                id: RequestId::from_timestamp(now.timestamp_millis(), store.highest_request_id()),
                request_type,
                items,
                status: RequestStatus::Pending,
                date: now.format("%Y-%m-%d").to_string(),
                employee_email,
            };
            store.requests.push(request.clone());
            Ok::<_, RequestError>(request)
        })?;

        tracing::info!(
            request_id = %request.id,
            email = %request.employee_email,
            items = request.items.len(),
            "Supply request submitted"
        );
        Ok(request)
    }

    /// Approve or reject a pending request.
    ///
    /// # Errors
    ///
    /// Returns `RequestError::Forbidden` unless the session is an
    /// administrator, `RequestError::NotFound` for an unknown id,
    /// `RequestError::InvalidTransition` unless the request is pending and
    /// `status` is a decision, or a persistence error.
    pub fn set_status(
        &mut self,
        id: RequestId,
        status: RequestStatus,
    ) -> Result<SupplyRequest, RequestError> {
        match self.ctx.current_account() {
            Some(account) if account.is_admin() => {}
            Some(_) => return Err(RequestError::Forbidden),
            None => return Err(RequestError::NotAuthenticated),
        }

        let updated = self.ctx.mutate(|store| {
            let request = store.request_mut(id).ok_or(RequestError::NotFound(id))?;
            if !request.status.can_transition_to(status) {
                return Err(RequestError::InvalidTransition {
                    from: request.status,
                    to: status,
                });
            }
            request.status = status;
            Ok(request.clone())
        })?;

        tracing::info!(request_id = %id, %status, "Supply request reviewed");
        Ok(updated)
    }
}

/// Drop unnamed rows and parse quantities.
fn parse_items(drafts: Vec<ItemDraft>) -> Result<Vec<RequestItem>, RequestError> {
    let items = drafts
        .into_iter()
        .filter_map(|draft| required(&draft.name).map(|name| (name, draft.qty)))
        .map(|(name, raw_qty)| match raw_qty.trim().parse::<u32>() {
            Ok(qty) if qty >= 1 => Ok(RequestItem { name, qty }),
            _ => Err(RequestError::InvalidQuantity {
                item: name,
                value: raw_qty,
            }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    if items.is_empty() {
        return Err(RequestError::Empty);
    }
    Ok(items)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::sync::Arc;

    use chrono::TimeZone;
    use staff_portal_core::{Email, SEED_ADMIN_EMAIL};

    use super::*;
    use crate::services::admin::{AccountDraft, AdminService};
    use crate::storage::MemoryStorage;

    fn item(name: &str, qty: &str) -> ItemDraft {
        ItemDraft {
            name: name.to_owned(),
            qty: qty.to_owned(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap()
    }

    fn admin_context() -> PortalContext {
        let mut ctx = PortalContext::open(Arc::new(MemoryStorage::new())).unwrap();
        ctx.begin_session(&Email::parse(SEED_ADMIN_EMAIL).unwrap())
            .unwrap();
        ctx
    }

    #[test]
    fn test_parse_items_drops_blank_names() {
        let items = parse_items(vec![
            item("Monitor", "2"),
            item("   ", "abc"),
            item("Keyboard", " 1 "),
        ])
        .unwrap();

        assert_eq!(
            items,
            [
                RequestItem {
                    name: "Monitor".to_owned(),
                    qty: 2
                },
                RequestItem {
                    name: "Keyboard".to_owned(),
                    qty: 1
                },
            ]
        );
    }

    #[test]
    fn test_parse_items_rejects_bad_quantities() {
        for qty in ["0", "-1", "", "two", "1.5"] {
            assert!(
                matches!(
                    parse_items(vec![item("Pens", qty)]),
                    Err(RequestError::InvalidQuantity { .. })
                ),
                "{qty:?}"
            );
        }
    }

    #[test]
    fn test_parse_items_requires_one_item() {
        assert!(matches!(parse_items(vec![]), Err(RequestError::Empty)));
        assert!(matches!(
            parse_items(vec![item("", "1")]),
            Err(RequestError::Empty)
        ));
    }

    #[test]
    fn test_submit_creates_pending_request() {
        let mut ctx = admin_context();
        let request = RequestService::new(&mut ctx)
            .submit("Equipment", vec![item("Monitor", "2")], now())
            .unwrap();

        assert_eq!(request.status, RequestStatus::Pending);
        assert_eq!(request.date, "2026-10-18");
        assert_eq!(request.id.get(), now().timestamp_millis());
        assert_eq!(request.employee_email.as_str(), SEED_ADMIN_EMAIL);
        assert_eq!(ctx.store().requests.len(), 1);
    }

    #[test]
    fn test_submit_same_millisecond_gets_unique_ids() {
        let mut ctx = admin_context();
        let mut service = RequestService::new(&mut ctx);
        let first = service.submit("Office", vec![item("Pens", "1")], now()).unwrap();
        let second = service.submit("Office", vec![item("Ink", "1")], now()).unwrap();

        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_submit_requires_session() {
        let mut ctx = PortalContext::open(Arc::new(MemoryStorage::new())).unwrap();
        let result = RequestService::new(&mut ctx).submit("Office", vec![item("Pens", "1")], now());
        assert!(matches!(result, Err(RequestError::NotAuthenticated)));
    }

    #[test]
    fn test_status_transitions() {
        let mut ctx = admin_context();
        let mut service = RequestService::new(&mut ctx);
        let request = service.submit("Office", vec![item("Pens", "1")], now()).unwrap();

        let approved = service.set_status(request.id, RequestStatus::Approved).unwrap();
        assert_eq!(approved.status, RequestStatus::Approved);

        assert!(matches!(
            service.set_status(request.id, RequestStatus::Rejected),
            Err(RequestError::InvalidTransition { .. })
        ));
        assert!(matches!(
            service.set_status(RequestId::new(1), RequestStatus::Approved),
            Err(RequestError::NotFound(_))
        ));
    }

    #[test]
    fn test_users_cannot_review() {
        let mut ctx = admin_context();
        AdminService::new(&mut ctx)
            .save_account(
                staff_portal_core::EditIntent::Create,
                AccountDraft {
                    first_name: "Jo".to_owned(),
                    last_name: "Doe".to_owned(),
                    email: Email::parse("jo@b.com").unwrap(),
                    password: "secret1".to_owned(),
                    role: staff_portal_core::Role::User,
                },
            )
            .unwrap();
        ctx.begin_session(&Email::parse("jo@b.com").unwrap()).unwrap();

        let mut service = RequestService::new(&mut ctx);
        let request = service.submit("Office", vec![item("Pens", "1")], now()).unwrap();
        assert!(matches!(
            service.set_status(request.id, RequestStatus::Approved),
            Err(RequestError::Forbidden)
        ));
    }
}
