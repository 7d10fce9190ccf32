//! Supply request domain types.

use serde::{Deserialize, Serialize};

use crate::{Email, RequestId, RequestStatus};

/// One line of a supply request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestItem {
    pub name: String,
    pub qty: u32,
}

/// A supply request submitted by a logged-in user.
///
/// `employee_email` is a back-reference to the submitting account, not
/// ownership: the request survives the account's deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplyRequest {
    pub id: RequestId,
    #[serde(rename = "type")]
    pub request_type: String,
    pub items: Vec<RequestItem>,
    pub status: RequestStatus,
    pub date: String,
    pub employee_email: Email,
}

impl SupplyRequest {
    /// Items rendered as `"2x Pens, 1x Stapler"`.
    #[must_use]
    pub fn items_summary(&self) -> String {
        self.items
            .iter()
            .map(|item| format!("{}x {}", item.qty, item.name))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Whether the request was submitted by `email`.
    #[must_use]
    pub fn is_from(&self, email: &Email) -> bool {
        self.employee_email == *email
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn request() -> SupplyRequest {
        SupplyRequest {
            id: RequestId::new(1_700_000_000_000),
            request_type: "Equipment".to_owned(),
            items: vec![
                RequestItem {
                    name: "Monitor".to_owned(),
                    qty: 2,
                },
                RequestItem {
                    name: "Keyboard".to_owned(),
                    qty: 1,
                },
            ],
            status: RequestStatus::Pending,
            date: "2026-10-18".to_owned(),
            employee_email: Email::parse("a@b.com").unwrap(),
        }
    }

    #[test]
    fn test_items_summary() {
        assert_eq!(request().items_summary(), "2x Monitor, 1x Keyboard");
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(request()).unwrap();
        assert_eq!(json["type"], "Equipment");
        assert_eq!(json["employeeEmail"], "a@b.com");
        assert_eq!(json["status"], "Pending");
        assert_eq!(json["items"][0]["qty"], 2);
        assert_eq!(json["id"], 1_700_000_000_000_i64);
    }
}
