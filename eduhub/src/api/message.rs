//! Message API.

use std::sync::Arc;

use crate::{
    client::ClientInner,
    error::{Error, Result},
    models::{CourseId, Message, MessageId, Priority, UserId},
};

use super::list_items;

/// API for direct message operations.
pub struct MessageApi {
    client: Arc<ClientInner>,
}

impl MessageApi {
    pub(crate) fn new(client: Arc<ClientInner>) -> Self {
        Self { client }
    }

    /// Fetch the current user's messages via the role-scoped route.
    pub async fn list(&self) -> Result<Vec<Message>> {
        let path = format!("{}/messages/", self.client.config.role.route_prefix());
        let value = self.client.get_authed(&path, &[]).await?;

        let mut messages = Vec::new();
        for item in list_items(value)? {
            messages.push(serde_json::from_value(item).map_err(Error::Json)?);
        }
        Ok(messages)
    }

    /// Mark a message as read on the server.
    pub async fn mark_read(&self, id: &MessageId) -> Result<()> {
        let path = format!("messages/{}/read/", id);
        self.client.patch_authed(&path, &serde_json::json!({})).await?;

        Ok(())
    }

    /// Start composing a new message.
    pub fn send(&self) -> SendMessageBuilder {
        SendMessageBuilder {
            client: self.client.clone(),
            to: None,
            subject: String::new(),
            content: String::new(),
            priority: Priority::Normal,
            course: None,
        }
    }
}

/// Builder for sending messages.
pub struct SendMessageBuilder {
    client: Arc<ClientInner>,
    to: Option<UserId>,
    subject: String,
    content: String,
    priority: Priority,
    course: Option<CourseId>,
}

impl SendMessageBuilder {
    /// Set the recipient.
    pub fn to(mut self, recipient: impl Into<UserId>) -> Self {
        self.to = Some(recipient.into());
        self
    }

    /// Set the subject line.
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    /// Set the message body.
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Set the priority.
    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Attach a course context.
    pub fn course(mut self, course: impl Into<CourseId>) -> Self {
        self.course = Some(course.into());
        self
    }

    /// Execute the request, returning the created message.
    pub async fn execute(self) -> Result<Message> {
        if self.content.trim().is_empty() {
            return Err(Error::validation("Message content cannot be empty"));
        }

        let to = match &self.to {
            Some(to) if !to.is_empty() => to,
            _ => return Err(Error::validation("Recipient is required")),
        };

        let mut body = serde_json::json!({
            "recipient": to.as_str(),
            "subject": self.subject,
            "content": self.content,
            "priority": self.priority.param(),
        });
        if let Some(course) = &self.course {
            body["course"] = serde_json::Value::String(course.as_str().to_owned());
        }

        let value = self.client.post_authed("messages/", &body).await?;
        serde_json::from_value(value).map_err(Error::Json)
    }
}
