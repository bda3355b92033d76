//! Notification API.

use std::sync::Arc;

use crate::{
    client::ClientInner,
    error::{Error, Result},
    models::{Notification, NotificationId},
};

use super::list_items;

/// API for notification operations.
pub struct NotificationApi {
    client: Arc<ClientInner>,
}

impl NotificationApi {
    pub(crate) fn new(client: Arc<ClientInner>) -> Self {
        Self { client }
    }

    /// Fetch all notifications for the current user.
    pub async fn list(&self) -> Result<Vec<Notification>> {
        let value = self.client.get_authed("notifications/", &[]).await?;

        let mut notifications = Vec::new();
        for item in list_items(value)? {
            notifications.push(serde_json::from_value(item).map_err(Error::Json)?);
        }
        Ok(notifications)
    }

    /// Mark a notification as read on the server.
    pub async fn mark_read(&self, id: &NotificationId) -> Result<()> {
        let path = format!("notifications/{}/", id);
        self.client
            .patch_authed(&path, &serde_json::json!({ "is_read": true }))
            .await?;

        Ok(())
    }

    /// Delete a notification on the server.
    pub async fn delete(&self, id: &NotificationId) -> Result<()> {
        let path = format!("notifications/{}/", id);
        self.client.delete_authed(&path).await?;

        Ok(())
    }
}
