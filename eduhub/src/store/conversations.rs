//! Conversation aggregation.
//!
//! Conversations are derived, never persisted: every recomputation
//! rebuilds them from the full message list. Each message belongs to
//! exactly one conversation, keyed by the participant who is not the
//! current user.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{Message, Participant, Roster, UserId};

/// A message thread with one counterpart participant.
#[derive(Debug, Clone, Serialize)]
pub struct Conversation {
    /// The counterpart's user ID.
    pub key: UserId,
    /// Denormalized counterpart profile.
    pub participant: Participant,
    /// Messages in this thread, in input order.
    pub messages: Vec<Message>,
    /// Count of messages with `is_read == false`.
    pub unread_count: usize,
    /// Timestamp of the most recent message.
    pub last_activity: DateTime<Utc>,
}

impl Conversation {
    /// The most recent message in the thread.
    pub fn last_message(&self) -> &Message {
        // Grouping guarantees at least one message per thread.
        self.messages
            .iter()
            .max_by_key(|m| m.created_at)
            .expect("conversation holds at least one message")
    }
}

/// Group a flat message list into per-counterpart conversations.
///
/// Single pass over `messages`; participants missing from the roster
/// get a placeholder built from the message's denormalized sender
/// fields (empty last name, email from `sender_email`) instead of
/// being dropped. Output is sorted descending by last activity
/// (stable, so equal timestamps keep first-seen order).
pub fn group_by_participant(
    messages: &[Message],
    current_user: &UserId,
    roster: &Roster,
) -> Vec<Conversation> {
    let mut index: HashMap<UserId, usize> = HashMap::new();
    let mut conversations: Vec<Conversation> = Vec::new();

    for message in messages {
        let key = message.counterpart(current_user).clone();

        let slot = *index.entry(key.clone()).or_insert_with(|| {
            let participant = roster
                .get(&key)
                .cloned()
                .unwrap_or_else(|| placeholder_participant(&key, message));
            conversations.push(Conversation {
                key: key.clone(),
                participant,
                messages: Vec::new(),
                unread_count: 0,
                last_activity: message.created_at,
            });
            conversations.len() - 1
        });

        let conversation = &mut conversations[slot];
        if !message.is_read {
            conversation.unread_count += 1;
        }
        if message.created_at > conversation.last_activity {
            conversation.last_activity = message.created_at;
        }
        conversation.messages.push(message.clone());
    }

    conversations.sort_by(|a, b| b.last_activity.cmp(&a.last_activity));
    conversations
}

fn placeholder_participant(key: &UserId, message: &Message) -> Participant {
    Participant {
        id: key.clone(),
        first_name: message.sender_name.clone(),
        last_name: String::new(),
        email: message.sender_email.clone().unwrap_or_default(),
    }
}

/// Read-state bucket for conversation filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadBucket {
    #[default]
    All,
    /// Threads with at least one unread message.
    Unread,
    /// Threads with no unread messages.
    Read,
    /// Declared in the message-center UI but no `favorited` field
    /// exists on the wire; matches every thread.
    Favorited,
}

impl ReadBucket {
    /// Parse from a loose user-facing string.
    pub fn parse(bucket: &str) -> Self {
        match bucket.to_lowercase().as_str() {
            "unread" => ReadBucket::Unread,
            "read" => ReadBucket::Read,
            "favorited" | "favorites" => ReadBucket::Favorited,
            _ => ReadBucket::All,
        }
    }
}

/// Post-hoc filter over aggregated conversations.
#[derive(Debug, Clone, Default)]
pub struct ConversationFilter {
    /// Free-text match against participant name/email and message
    /// subjects/content. `None` or empty matches everything.
    pub query: Option<String>,
    /// Read-state bucket.
    pub bucket: ReadBucket,
}

impl ConversationFilter {
    /// Whether a conversation matches.
    pub fn matches(&self, conversation: &Conversation) -> bool {
        match self.bucket {
            ReadBucket::Unread if conversation.unread_count == 0 => return false,
            ReadBucket::Read if conversation.unread_count > 0 => return false,
            _ => {}
        }

        let Some(query) = self.query.as_deref().map(str::trim).filter(|q| !q.is_empty()) else {
            return true;
        };
        let query = query.to_lowercase();

        if conversation
            .participant
            .full_name()
            .to_lowercase()
            .contains(&query)
            || conversation.participant.email.to_lowercase().contains(&query)
        {
            return true;
        }

        conversation.messages.iter().any(|m| {
            m.subject.to_lowercase().contains(&query) || m.content.to_lowercase().contains(&query)
        })
    }

    /// Project the subset of `conversations` matching this filter.
    pub fn apply(&self, conversations: &[Conversation]) -> Vec<Conversation> {
        conversations
            .iter()
            .filter(|c| self.matches(c))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MessageId, Priority};
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, 9, minute, 0).unwrap()
    }

    fn message(id: &str, sender: &str, recipient: &str, minute: u32, is_read: bool) -> Message {
        Message {
            id: MessageId::new(id),
            sender: UserId::new(sender),
            recipient: UserId::new(recipient),
            sender_name: format!("User {sender}"),
            sender_email: Some(format!("{sender}@example.edu")),
            subject: "Homework question".into(),
            content: format!("message {id}"),
            priority: Priority::Normal,
            created_at: at(minute),
            is_read,
            course_id: None,
        }
    }

    fn roster() -> Roster {
        Roster::new([
            Participant {
                id: UserId::new("a"),
                first_name: "Alice".into(),
                last_name: "Nguyen".into(),
                email: "alice@example.edu".into(),
            },
            Participant {
                id: UserId::new("b"),
                first_name: "Bo".into(),
                last_name: "Ekwueme".into(),
                email: "bo@example.edu".into(),
            },
        ])
    }

    #[test]
    fn test_grouping_keys_on_counterpart() {
        let me = UserId::new("me");
        let messages = vec![
            message("1", "a", "me", 1, true),
            message("2", "me", "a", 2, true),
            message("3", "b", "me", 3, false),
        ];

        let conversations = group_by_participant(&messages, &me, &roster());

        assert_eq!(conversations.len(), 2);
        // "b" is last-active, so it sorts first.
        assert_eq!(conversations[0].key.as_str(), "b");
        assert_eq!(conversations[1].key.as_str(), "a");

        let with_a = &conversations[1];
        let ids: Vec<&str> = with_a.messages.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert_eq!(with_a.participant.full_name(), "Alice Nguyen");
    }

    #[test]
    fn test_grouping_is_a_partition() {
        let me = UserId::new("me");
        let messages: Vec<Message> = (0..12)
            .map(|i| {
                let other = ["a", "b", "c"][i % 3];
                if i % 2 == 0 {
                    message(&i.to_string(), other, "me", i as u32, i % 4 == 0)
                } else {
                    message(&i.to_string(), "me", other, i as u32, true)
                }
            })
            .collect();

        let conversations = group_by_participant(&messages, &me, &roster());

        let mut seen: Vec<&str> = conversations
            .iter()
            .flat_map(|c| c.messages.iter().map(|m| m.id.as_str()))
            .collect();
        assert_eq!(seen.len(), messages.len());
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), messages.len());

        for conversation in &conversations {
            for m in &conversation.messages {
                assert_eq!(m.counterpart(&me), &conversation.key);
            }
        }
    }

    #[test]
    fn test_ordering_descending_by_last_activity() {
        let me = UserId::new("me");
        let messages = vec![
            message("1", "a", "me", 5, true),
            message("2", "b", "me", 9, true),
            message("3", "c", "me", 1, true),
            message("4", "a", "me", 30, true),
        ];

        let conversations = group_by_participant(&messages, &me, &roster());

        for pair in conversations.windows(2) {
            assert!(pair[0].last_activity >= pair[1].last_activity);
        }
        assert_eq!(conversations[0].key.as_str(), "a");
        assert_eq!(conversations[0].last_message().id.as_str(), "4");
    }

    #[test]
    fn test_unread_count_per_thread() {
        let me = UserId::new("me");
        let messages = vec![
            message("1", "a", "me", 1, false),
            message("2", "a", "me", 2, false),
            message("3", "a", "me", 3, true),
        ];

        let conversations = group_by_participant(&messages, &me, &roster());
        assert_eq!(conversations[0].unread_count, 2);
    }

    #[test]
    fn test_unresolved_participant_gets_placeholder() {
        let me = UserId::new("me");
        let messages = vec![message("1", "ghost", "me", 1, false)];

        let conversations = group_by_participant(&messages, &me, &roster());

        let participant = &conversations[0].participant;
        assert_eq!(participant.id.as_str(), "ghost");
        assert_eq!(participant.first_name, "User ghost");
        assert_eq!(participant.last_name, "");
        assert_eq!(participant.email, "ghost@example.edu");
    }

    #[test]
    fn test_filter_query_matches_name_email_content() {
        let me = UserId::new("me");
        let conversations = group_by_participant(
            &[
                message("1", "a", "me", 1, false),
                message("2", "b", "me", 2, false),
            ],
            &me,
            &roster(),
        );

        let by_name = ConversationFilter {
            query: Some("alice".into()),
            ..Default::default()
        };
        assert_eq!(by_name.apply(&conversations).len(), 1);

        let by_email = ConversationFilter {
            query: Some("bo@example".into()),
            ..Default::default()
        };
        assert_eq!(by_email.apply(&conversations).len(), 1);

        let by_content = ConversationFilter {
            query: Some("message 2".into()),
            ..Default::default()
        };
        assert_eq!(by_content.apply(&conversations)[0].key.as_str(), "b");

        let no_match = ConversationFilter {
            query: Some("zzz".into()),
            ..Default::default()
        };
        assert!(no_match.apply(&conversations).is_empty());
    }

    #[test]
    fn test_filter_buckets() {
        let me = UserId::new("me");
        let conversations = group_by_participant(
            &[
                message("1", "a", "me", 1, false),
                message("2", "b", "me", 2, true),
            ],
            &me,
            &roster(),
        );

        let unread = ConversationFilter {
            bucket: ReadBucket::Unread,
            ..Default::default()
        };
        assert_eq!(unread.apply(&conversations)[0].key.as_str(), "a");

        let read = ConversationFilter {
            bucket: ReadBucket::Read,
            ..Default::default()
        };
        assert_eq!(read.apply(&conversations)[0].key.as_str(), "b");

        // Favorited is a no-op bucket.
        let favorited = ConversationFilter {
            bucket: ReadBucket::Favorited,
            ..Default::default()
        };
        assert_eq!(favorited.apply(&conversations).len(), 2);
    }

    #[test]
    fn test_bucket_parse() {
        assert_eq!(ReadBucket::parse("unread"), ReadBucket::Unread);
        assert_eq!(ReadBucket::parse("Favorites"), ReadBucket::Favorited);
        assert_eq!(ReadBucket::parse("all"), ReadBucket::All);
        assert_eq!(ReadBucket::parse("anything"), ReadBucket::All);
    }
}
