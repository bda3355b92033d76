//! Client-side state: notification cache, derived conversation and
//! filter views, badge presentation, polling, recent searches.

mod badge;
mod conversations;
mod filter;
mod notification;
mod poll;
mod recent;

pub use badge::badge_label;
pub use conversations::{
    group_by_participant, Conversation, ConversationFilter, ReadBucket,
};
pub use filter::{NotificationFilter, ReadStatus};
pub use notification::{sample_notifications, NotificationStore};
pub use poll::{NotificationPoller, POLL_INTERVAL};
pub use recent::RecentSearches;
