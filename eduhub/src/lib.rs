//! Rust client library for the EduHub education platform's
//! notification and messaging APIs.

pub mod api;
pub mod cache;
pub mod client;
pub mod error;
pub mod models;
pub mod store;

// Re-export main types
pub use client::{AuthTokens, EduClient, EduClientBuilder, HttpConfig, Role};
pub use error::{Error, Result};

// Re-export commonly used models
pub use models::{
    AssignmentId, CourseId, Message, MessageId, Notification, NotificationId, NotificationKind,
    Participant, Priority, Roster, UserId,
};

// Re-export store types
pub use store::{
    badge_label, group_by_participant, Conversation, ConversationFilter, NotificationFilter,
    NotificationPoller, NotificationStore, ReadBucket, ReadStatus, RecentSearches,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builder() {
        let client = EduClient::builder().build();
        assert!(client.is_ok());

        let client = client.unwrap();
        assert!(!client.is_authenticated());
    }

    #[tokio::test]
    async fn test_client_cache_backs_recent_searches() {
        use std::sync::Arc;

        let client = EduClient::builder()
            .cache(Arc::new(cache::MemoryCache::new()))
            .build()
            .unwrap();

        let recent = client.recent_searches().expect("cache configured");
        recent.push("algebra").await.unwrap();
        assert_eq!(recent.all().await, vec!["algebra"]);

        let without_cache = EduClient::builder().build().unwrap();
        assert!(without_cache.cache().is_none());
        assert!(without_cache.recent_searches().is_none());
    }

    #[test]
    fn test_client_with_auth() {
        let client = EduClient::builder()
            .auth("test_token", "12345")
            .role(Role::Tutor)
            .build()
            .unwrap();

        assert!(client.is_authenticated());
        assert_eq!(client.current_uid(), Some("12345"));
        assert_eq!(client.role(), Role::Tutor);
    }
}
