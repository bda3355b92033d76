//! API surfaces.

mod message;
mod notification;
mod user;

pub use message::{MessageApi, SendMessageBuilder};
pub use notification::NotificationApi;
pub use user::RosterApi;

use crate::error::{Error, Result};

/// Unwrap a list payload.
///
/// List endpoints return either a bare JSON array or a paginated
/// envelope `{"results": [...]}`.
pub(crate) fn list_items(value: serde_json::Value) -> Result<Vec<serde_json::Value>> {
    match value {
        serde_json::Value::Array(items) => Ok(items),
        serde_json::Value::Object(mut map) => match map.remove("results") {
            Some(serde_json::Value::Array(items)) => Ok(items),
            _ => Err(Error::validation("expected a list response")),
        },
        _ => Err(Error::validation("expected a list response")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_items_bare_array() {
        let items = list_items(serde_json::json!([1, 2])).unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_list_items_paginated() {
        let items = list_items(serde_json::json!({"count": 1, "results": [{"id": "1"}]})).unwrap();
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_list_items_rejects_scalar() {
        assert!(list_items(serde_json::json!(3)).is_err());
        assert!(list_items(serde_json::json!({"detail": "x"})).is_err());
    }
}
