//! Notification models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AssignmentId, CourseId, NotificationId};

/// A notification for the current user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// Notification ID.
    pub id: NotificationId,
    /// Short title.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Kind of notification.
    #[serde(rename = "type", default)]
    pub kind: NotificationKind,
    /// Priority level.
    #[serde(default)]
    pub priority: Priority,
    /// Whether the notification has been read.
    #[serde(default)]
    pub is_read: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Optional navigation target.
    #[serde(default)]
    pub related_url: Option<String>,
}

impl Notification {
    /// Extract course/assignment IDs from the related URL, if any.
    pub fn related_ids(&self) -> (Option<CourseId>, Option<AssignmentId>) {
        match &self.related_url {
            Some(url) => extract_ids_from_url(url),
            None => (None, None),
        }
    }
}

/// Kind of notification.
///
/// The server treats this as an open set; unknown values map to
/// [`NotificationKind::Other`] and render with a generic icon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// New or updated assignment.
    Assignment,
    /// Grade posted.
    Grade,
    /// Course or platform announcement.
    Announcement,
    /// Direct message received.
    Message,
    /// Platform/system notice.
    System,
    /// Unknown kind.
    #[default]
    #[serde(other)]
    Other,
}

impl NotificationKind {
    /// Parse from a loose user-facing string.
    pub fn parse(kind: &str) -> Self {
        match kind.to_lowercase().as_str() {
            "assignment" | "assignments" => NotificationKind::Assignment,
            "grade" | "grades" => NotificationKind::Grade,
            "announcement" | "announcements" => NotificationKind::Announcement,
            "message" | "messages" => NotificationKind::Message,
            "system" => NotificationKind::System,
            _ => NotificationKind::Other,
        }
    }

    /// Wire value for this kind.
    pub fn param(&self) -> &'static str {
        match self {
            NotificationKind::Assignment => "assignment",
            NotificationKind::Grade => "grade",
            NotificationKind::Announcement => "announcement",
            NotificationKind::Message => "message",
            NotificationKind::System => "system",
            NotificationKind::Other => "",
        }
    }
}

/// Notification or message priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
    Urgent,
}

impl Priority {
    /// Parse from a loose user-facing string.
    pub fn parse(priority: &str) -> Self {
        match priority.to_lowercase().as_str() {
            "low" => Priority::Low,
            "high" => Priority::High,
            "urgent" => Priority::Urgent,
            _ => Priority::Normal,
        }
    }

    /// Wire value for this priority.
    pub fn param(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Normal => "normal",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }
}

fn extract_ids_from_url(url: &str) -> (Option<CourseId>, Option<AssignmentId>) {
    use lazy_static::lazy_static;
    use regex::Regex;

    lazy_static! {
        static ref COURSE_RE: Regex = Regex::new(r"courses/(\d+)").unwrap();
        static ref ASSIGNMENT_RE: Regex = Regex::new(r"assignments/(\d+)").unwrap();
    }

    let course_id = COURSE_RE
        .captures(url)
        .and_then(|c| c.get(1))
        .map(|m| CourseId::new(m.as_str()));

    let assignment_id = ASSIGNMENT_RE
        .captures(url)
        .and_then(|c| c.get(1))
        .map(|m| AssignmentId::new(m.as_str()));

    (course_id, assignment_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_ids_from_url() {
        let url = "/courses/12/assignments/340";
        let (course, assignment) = extract_ids_from_url(url);

        assert_eq!(course.unwrap().as_str(), "12");
        assert_eq!(assignment.unwrap().as_str(), "340");

        let (course, assignment) = extract_ids_from_url("/dashboard");
        assert!(course.is_none());
        assert!(assignment.is_none());
    }

    #[test]
    fn test_kind_open_set() {
        let n: Notification = serde_json::from_str(
            r#"{"id":"1","title":"t","message":"m","type":"webinar","created_at":"2026-02-01T10:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(n.kind, NotificationKind::Other);
        assert_eq!(n.priority, Priority::Normal);
        assert!(!n.is_read);
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!(NotificationKind::parse("Grades"), NotificationKind::Grade);
        assert_eq!(NotificationKind::parse("system"), NotificationKind::System);
        assert_eq!(NotificationKind::parse("unknown"), NotificationKind::Other);
    }

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::Urgent > Priority::High);
        assert!(Priority::High > Priority::Normal);
        assert!(Priority::Normal > Priority::Low);
    }
}
