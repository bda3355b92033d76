//! Message models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CourseId, MessageId, Priority, UserId};

/// A direct message between two platform users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Message ID.
    pub id: MessageId,
    /// Sender user ID.
    pub sender: UserId,
    /// Recipient user ID.
    pub recipient: UserId,
    /// Sender display name as denormalized by the server.
    #[serde(default)]
    pub sender_name: String,
    /// Sender email as denormalized by the server.
    #[serde(default)]
    pub sender_email: Option<String>,
    /// Subject line.
    #[serde(default)]
    pub subject: String,
    /// Message body.
    pub content: String,
    /// Priority level.
    #[serde(default)]
    pub priority: Priority,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Whether the message has been read.
    #[serde(default)]
    pub is_read: bool,
    /// Course context, if the message relates to one.
    #[serde(default)]
    pub course_id: Option<CourseId>,
}

impl Message {
    /// The participant on the other side of this message.
    ///
    /// Messages sent by the current user key on the recipient,
    /// everything else on the sender.
    pub fn counterpart(&self, current_user: &UserId) -> &UserId {
        if &self.sender == current_user {
            &self.recipient
        } else {
            &self.sender
        }
    }

    /// Whether the current user sent this message.
    pub fn is_mine(&self, current_user: &UserId) -> bool {
        &self.sender == current_user
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(sender: &str, recipient: &str) -> Message {
        Message {
            id: MessageId::new("m1"),
            sender: UserId::new(sender),
            recipient: UserId::new(recipient),
            sender_name: String::new(),
            sender_email: None,
            subject: "hi".into(),
            content: "hello".into(),
            priority: Priority::Normal,
            created_at: Utc::now(),
            is_read: false,
            course_id: None,
        }
    }

    #[test]
    fn test_counterpart() {
        let me = UserId::new("me");

        let inbound = sample("a", "me");
        assert_eq!(inbound.counterpart(&me).as_str(), "a");
        assert!(!inbound.is_mine(&me));

        let outbound = sample("me", "a");
        assert_eq!(outbound.counterpart(&me).as_str(), "a");
        assert!(outbound.is_mine(&me));
    }
}
