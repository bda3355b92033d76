//! Notification store.
//!
//! Owns the client-side notification cache and its unread count.
//! Network failures never propagate out of the store: they are
//! logged, and the store degrades to previously cached data or a
//! built-in sample set. Local mutations (mark-read, delete) are
//! applied optimistically and are not rolled back when the matching
//! API call fails; local state is the source of truth for the UI
//! until the next fetch reconciles it with the server.

use std::sync::RwLock;

use chrono::{Duration, Utc};
use log::{debug, warn};

use crate::api::NotificationApi;
use crate::client::EduClient;
use crate::models::{Notification, NotificationId, NotificationKind, Priority};

use super::{badge_label, NotificationFilter};

/// Client-side cache of the current user's notifications.
pub struct NotificationStore {
    api: NotificationApi,
    state: RwLock<State>,
}

#[derive(Default)]
struct State {
    notifications: Vec<Notification>,
    unread_count: usize,
}

impl State {
    /// Recompute the unread count from the list.
    ///
    /// Invariant: `unread_count == |{n : !n.is_read}|` after every
    /// change to `notifications`.
    fn recount(&mut self) {
        self.unread_count = self.notifications.iter().filter(|n| !n.is_read).count();
    }
}

impl NotificationStore {
    /// Create a store backed by the given client.
    pub fn new(client: &EduClient) -> Self {
        Self {
            api: client.notifications(),
            state: RwLock::new(State::default()),
        }
    }

    /// Fetch notifications from the server, replacing the local list.
    ///
    /// On failure the store keeps whatever it already has; if it has
    /// nothing yet it installs the built-in sample set so consumers
    /// always have something to render.
    pub async fn fetch(&self) {
        match self.api.list().await {
            Ok(notifications) => {
                debug!("fetched {} notifications", notifications.len());
                let mut state = self.state.write().unwrap();
                state.notifications = notifications;
                state.recount();
            }
            Err(e) => {
                warn!("notification fetch failed, using fallback data: {e}");
                let mut state = self.state.write().unwrap();
                if state.notifications.is_empty() {
                    state.notifications = sample_notifications();
                    state.recount();
                }
            }
        }
    }

    /// Reload from the server. Alias for [`fetch`](Self::fetch), used
    /// by manual reloads and the poller.
    pub async fn refresh(&self) {
        self.fetch().await;
    }

    /// Replace the local list with externally supplied notifications
    /// (server push or test seeding).
    pub fn ingest(&self, notifications: Vec<Notification>) {
        let mut state = self.state.write().unwrap();
        state.notifications = notifications;
        state.recount();
    }

    /// Mark a notification as read.
    ///
    /// The local record is updated first; the API call is
    /// fire-and-forget-tolerant and a failure is only logged.
    pub async fn mark_as_read(&self, id: &NotificationId) {
        {
            let mut state = self.state.write().unwrap();
            if let Some(n) = state.notifications.iter_mut().find(|n| &n.id == id) {
                n.is_read = true;
            }
            state.recount();
        }

        if let Err(e) = self.api.mark_read(id).await {
            warn!("mark-read for {id} failed on server, keeping local state: {e}");
        }
    }

    /// Mark every notification as read.
    ///
    /// Local-only: the platform has no bulk mark-all endpoint, so
    /// server state may diverge until the next fetch reconciles it.
    pub async fn mark_all_as_read(&self) {
        let mut state = self.state.write().unwrap();
        for n in state.notifications.iter_mut() {
            n.is_read = true;
        }
        state.recount();
    }

    /// Delete a notification.
    ///
    /// The record is removed locally regardless of the API outcome,
    /// same policy as [`mark_as_read`](Self::mark_as_read).
    pub async fn delete(&self, id: &NotificationId) {
        {
            let mut state = self.state.write().unwrap();
            state.notifications.retain(|n| &n.id != id);
            state.recount();
        }

        if let Err(e) = self.api.delete(id).await {
            warn!("delete for {id} failed on server, keeping local removal: {e}");
        }
    }

    /// Snapshot of the current notification list.
    pub fn notifications(&self) -> Vec<Notification> {
        self.state.read().unwrap().notifications.clone()
    }

    /// Snapshot of the list after applying a filter.
    pub fn filtered(&self, filter: &NotificationFilter) -> Vec<Notification> {
        filter.apply(&self.state.read().unwrap().notifications)
    }

    /// Current unread count.
    pub fn unread_count(&self) -> usize {
        self.state.read().unwrap().unread_count
    }

    /// Badge label for the current unread count.
    pub fn badge(&self) -> Option<String> {
        badge_label(self.unread_count())
    }

    /// Number of cached notifications.
    pub fn len(&self) -> usize {
        self.state.read().unwrap().notifications.len()
    }

    /// Whether the store holds no notifications.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Built-in fallback dataset used when the first fetch fails.
pub fn sample_notifications() -> Vec<Notification> {
    let now = Utc::now();
    vec![
        Notification {
            id: NotificationId::new("sample-1"),
            title: "New assignment posted".into(),
            message: "Problem Set 3 is due Friday.".into(),
            kind: NotificationKind::Assignment,
            priority: Priority::High,
            is_read: false,
            created_at: now - Duration::hours(1),
            related_url: Some("/courses/101/assignments/3".into()),
        },
        Notification {
            id: NotificationId::new("sample-2"),
            title: "Grade posted".into(),
            message: "Your grade for Problem Set 2 is available.".into(),
            kind: NotificationKind::Grade,
            priority: Priority::Normal,
            is_read: false,
            created_at: now - Duration::hours(5),
            related_url: Some("/courses/101/assignments/2".into()),
        },
        Notification {
            id: NotificationId::new("sample-3"),
            title: "Welcome to EduHub".into(),
            message: "Take a tour of your dashboard to get started.".into(),
            kind: NotificationKind::Announcement,
            priority: Priority::Low,
            is_read: true,
            created_at: now - Duration::days(2),
            related_url: None,
        },
        Notification {
            id: NotificationId::new("sample-4"),
            title: "Scheduled maintenance".into(),
            message: "The platform will be unavailable Sunday 02:00-03:00 UTC.".into(),
            kind: NotificationKind::System,
            priority: Priority::Normal,
            is_read: false,
            created_at: now - Duration::days(1),
            related_url: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // Port 9 (discard) refuses connections immediately, so every API
    // call exercises the soft-failure path without network access.
    fn offline_store() -> NotificationStore {
        let client = EduClient::builder()
            .base_url("http://127.0.0.1:9/api/")
            .auth("token", "me")
            .build()
            .unwrap();
        NotificationStore::new(&client)
    }

    fn notification(id: &str, is_read: bool) -> Notification {
        Notification {
            id: NotificationId::new(id),
            title: format!("n{id}"),
            message: "body".into(),
            kind: NotificationKind::Announcement,
            priority: Priority::Normal,
            is_read,
            created_at: Utc::now(),
            related_url: None,
        }
    }

    #[test]
    fn test_ingest_recounts_unread() {
        let store = offline_store();
        store.ingest(vec![
            notification("1", false),
            notification("2", true),
            notification("3", false),
        ]);
        assert_eq!(store.unread_count(), 2);
        assert_eq!(store.len(), 3);
    }

    #[tokio::test]
    async fn test_mark_as_read_is_optimistic() {
        let store = offline_store();
        store.ingest(vec![
            notification("1", false),
            notification("2", true),
            notification("3", false),
        ]);

        // The server call fails (connection refused) but the local
        // mutation sticks.
        store.mark_as_read(&NotificationId::new("1")).await;

        assert_eq!(store.unread_count(), 1);
        let n1 = store
            .notifications()
            .into_iter()
            .find(|n| n.id.as_str() == "1")
            .unwrap();
        assert!(n1.is_read);
    }

    #[tokio::test]
    async fn test_mark_as_read_is_idempotent() {
        let store = offline_store();
        store.ingest(vec![notification("1", false)]);

        store.mark_as_read(&NotificationId::new("1")).await;
        store.mark_as_read(&NotificationId::new("1")).await;
        assert_eq!(store.unread_count(), 0);

        // Unknown IDs leave the count untouched.
        store.mark_as_read(&NotificationId::new("nope")).await;
        assert_eq!(store.unread_count(), 0);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_mark_all_as_read() {
        let store = offline_store();
        store.ingest(vec![
            notification("1", false),
            notification("2", false),
            notification("3", true),
        ]);

        store.mark_all_as_read().await;

        assert_eq!(store.unread_count(), 0);
        assert!(store.notifications().iter().all(|n| n.is_read));
    }

    #[tokio::test]
    async fn test_delete_adjusts_unread_only_for_unread() {
        let store = offline_store();
        store.ingest(vec![notification("1", false), notification("2", true)]);

        store.delete(&NotificationId::new("2")).await;
        assert_eq!(store.len(), 1);
        assert_eq!(store.unread_count(), 1);

        store.delete(&NotificationId::new("1")).await;
        assert_eq!(store.len(), 0);
        assert_eq!(store.unread_count(), 0);
    }

    #[tokio::test]
    async fn test_fetch_falls_back_to_sample_data() {
        let store = offline_store();
        store.fetch().await;

        let samples = store.notifications();
        assert_eq!(samples.len(), 4);
        assert_eq!(store.unread_count(), 3);
    }

    #[tokio::test]
    async fn test_fetch_failure_keeps_cached_data() {
        let store = offline_store();
        store.ingest(vec![notification("1", false)]);

        store.refresh().await;

        // Cached data survives the failed refresh; no sample swap.
        assert_eq!(store.len(), 1);
        assert_eq!(store.notifications()[0].id.as_str(), "1");
    }

    #[tokio::test]
    async fn test_unread_invariant_across_operations() {
        let store = offline_store();
        store.ingest(vec![
            notification("1", false),
            notification("2", true),
            notification("3", false),
            notification("4", false),
        ]);

        let check = |store: &NotificationStore| {
            let expected = store.notifications().iter().filter(|n| !n.is_read).count();
            assert_eq!(store.unread_count(), expected);
        };

        check(&store);
        store.mark_as_read(&NotificationId::new("3")).await;
        check(&store);
        store.delete(&NotificationId::new("1")).await;
        check(&store);
        store.mark_all_as_read().await;
        check(&store);
    }

    #[test]
    fn test_badge_passthrough() {
        let store = offline_store();
        assert_eq!(store.badge(), None);

        store.ingest(vec![notification("1", false)]);
        assert_eq!(store.badge().as_deref(), Some("1"));
    }
}
