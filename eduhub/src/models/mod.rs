//! Data models for EduHub entities.

mod ids;
mod message;
mod notification;
mod user;

pub use ids::{AssignmentId, CourseId, MessageId, NotificationId, UserId};
pub use message::Message;
pub use notification::{Notification, NotificationKind, Priority};
pub use user::{Participant, Roster};
