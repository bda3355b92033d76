//! Notification filter view.

use serde::{Deserialize, Serialize};

use crate::models::{Notification, NotificationKind, Priority};

/// Read-status bucket for notification filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadStatus {
    Read,
    Unread,
}

impl ReadStatus {
    /// Parse from a loose user-facing string; `"all"` and anything
    /// unrecognized mean no status constraint.
    pub fn parse(status: &str) -> Option<Self> {
        match status.to_lowercase().as_str() {
            "read" => Some(ReadStatus::Read),
            "unread" => Some(ReadStatus::Unread),
            _ => None,
        }
    }
}

/// Filter criteria over a notification list.
///
/// Each criterion is ANDed; `None` is the "all" sentinel matching
/// everything. Applying a filter is a pure synchronous projection
/// recomputed whenever the source list or the criteria change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationFilter {
    /// Kind constraint, `None` = all kinds.
    pub kind: Option<NotificationKind>,
    /// Priority constraint, `None` = all priorities.
    pub priority: Option<Priority>,
    /// Read-status constraint, `None` = all.
    pub status: Option<ReadStatus>,
}

impl NotificationFilter {
    /// Build a filter from user-facing strings, treating `"all"` (or
    /// anything unrecognized for status) as no constraint.
    pub fn from_args(kind: &str, priority: &str, status: &str) -> Self {
        Self {
            kind: match kind.to_lowercase().as_str() {
                "all" | "" => None,
                other => Some(NotificationKind::parse(other)),
            },
            priority: match priority.to_lowercase().as_str() {
                "all" | "" => None,
                other => Some(Priority::parse(other)),
            },
            status: ReadStatus::parse(status),
        }
    }

    /// Whether a notification matches all criteria.
    pub fn matches(&self, n: &Notification) -> bool {
        if let Some(kind) = self.kind {
            if n.kind != kind {
                return false;
            }
        }
        if let Some(priority) = self.priority {
            if n.priority != priority {
                return false;
            }
        }
        match self.status {
            Some(ReadStatus::Read) if !n.is_read => return false,
            Some(ReadStatus::Unread) if n.is_read => return false,
            _ => {}
        }
        true
    }

    /// Project the subset of `notifications` matching this filter.
    pub fn apply(&self, notifications: &[Notification]) -> Vec<Notification> {
        notifications
            .iter()
            .filter(|n| self.matches(n))
            .cloned()
            .collect()
    }
}
