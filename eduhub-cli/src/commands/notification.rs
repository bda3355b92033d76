//! Notification commands.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use eduhub::{badge_label, NotificationFilter, NotificationId, NotificationPoller, NotificationStore};

use crate::config::build_authed_client;
use crate::output::{print_table, NotificationRow, OutputFormat};

#[derive(Subcommand)]
pub enum NotificationAction {
    /// List notifications
    #[command(alias = "ls")]
    List {
        /// Type: assignment, grade, announcement, message, system, all
        #[arg(short, long, default_value = "all")]
        kind: String,
        /// Priority: low, normal, high, urgent, all
        #[arg(short, long, default_value = "all")]
        priority: String,
        /// Status: read, unread, all
        #[arg(short, long, default_value = "all")]
        status: String,
    },

    /// Show the unread badge
    Badge,

    /// Mark a notification as read
    Read {
        /// Notification ID
        id: String,
    },

    /// Mark all notifications as read
    ReadAll,

    /// Delete a notification
    #[command(alias = "rm")]
    Delete {
        /// Notification ID
        id: String,
    },

    /// Poll for new notifications and print the unread count
    Watch {
        /// Polling period in seconds
        #[arg(short, long, default_value = "30")]
        interval: u64,
    },
}

pub async fn handle(action: NotificationAction, format: OutputFormat, _verbose: bool) -> Result<()> {
    match action {
        NotificationAction::List {
            kind,
            priority,
            status,
        } => list_notifications(&kind, &priority, &status, format).await,
        NotificationAction::Badge => show_badge().await,
        NotificationAction::Read { id } => mark_read(&id).await,
        NotificationAction::ReadAll => mark_all_read().await,
        NotificationAction::Delete { id } => delete(&id).await,
        NotificationAction::Watch { interval } => watch(interval).await,
    }
}

async fn build_store() -> Result<Arc<NotificationStore>> {
    let client = build_authed_client()?;
    let store = Arc::new(NotificationStore::new(&client));
    store.fetch().await;
    Ok(store)
}

async fn list_notifications(
    kind: &str,
    priority: &str,
    status: &str,
    format: OutputFormat,
) -> Result<()> {
    let store = build_store().await?;
    let filter = NotificationFilter::from_args(kind, priority, status);

    let notifications = store.filtered(&filter);

    if matches!(format, OutputFormat::Plain) {
        println!(
            "{} notifications, {} unread\n",
            store.len(),
            store.unread_count()
        );
    }

    let rows: Vec<NotificationRow> = notifications.iter().map(NotificationRow::from).collect();
    print_table(rows, format);

    Ok(())
}

async fn show_badge() -> Result<()> {
    let store = build_store().await?;

    match badge_label(store.unread_count()) {
        Some(label) => println!("{}", label.red().bold()),
        None => println!("{}", "no unread notifications".dimmed()),
    }

    Ok(())
}

async fn mark_read(id: &str) -> Result<()> {
    let store = build_store().await?;
    store.mark_as_read(&NotificationId::new(id)).await;

    println!("{} Marked notification {} as read", "✓".green(), id);

    Ok(())
}

async fn mark_all_read() -> Result<()> {
    let store = build_store().await?;
    store.mark_all_as_read().await;

    println!("{} Marked all notifications as read", "✓".green());

    Ok(())
}

async fn delete(id: &str) -> Result<()> {
    let store = build_store().await?;
    store.delete(&NotificationId::new(id)).await;

    println!("{} Deleted notification {}", "✓".green(), id);

    Ok(())
}

async fn watch(interval: u64) -> Result<()> {
    let store = build_store().await?;
    let _poller = NotificationPoller::with_interval(store.clone(), Duration::from_secs(interval));

    println!("Watching notifications (Ctrl-C to stop)\n");

    let mut last_unread = usize::MAX;
    loop {
        let unread = store.unread_count();
        if unread != last_unread {
            match badge_label(unread) {
                Some(label) => println!("unread: {}", label.red().bold()),
                None => println!("unread: {}", "0".dimmed()),
            }
            last_unread = unread;
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }
}
