//! Output formatting.

use chrono::{DateTime, Local, Utc};
use clap::ValueEnum;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use eduhub::{Conversation, Message, Notification, UserId};
use serde::Serialize;

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table format
    Table,
    /// JSON format
    Json,
    /// Plain text format
    #[default]
    Plain,
}

/// Trait for plain text output.
pub trait PlainPrint {
    /// Print as plain text with formatting.
    fn plain_print(&self);
}

/// Trait for table row generation.
pub trait TableRow {
    /// Get table headers.
    fn headers() -> Vec<&'static str>;
    /// Get row data as strings.
    fn row(&self) -> Vec<String>;
}

/// Print items in plain text format.
pub fn print_plain<T: PlainPrint>(items: &[T]) {
    if items.is_empty() {
        println!("No results");
        return;
    }
    for item in items {
        item.plain_print();
    }
}

/// Format a UTC timestamp for display in local time.
pub fn format_time(time: DateTime<Utc>) -> String {
    time.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

/// Format a relative time for display.
pub fn format_relative_time(time: DateTime<Utc>) -> String {
    let diff = Utc::now().signed_duration_since(time).num_seconds();

    if diff < 0 {
        return format_time(time);
    }
    if diff < 60 {
        format!("{}s ago", diff)
    } else if diff < 3600 {
        format!("{}m ago", diff / 60)
    } else if diff < 86400 {
        format!("{}h {}m ago", diff / 3600, (diff % 3600) / 60)
    } else if diff < 2592000 {
        format!("{}d {}h ago", diff / 86400, (diff % 86400) / 3600)
    } else {
        format_time(time)
    }
}

/// Print a table of items with proper formatting for each output mode.
pub fn print_table<T: TableRow + Serialize + PlainPrint>(items: Vec<T>, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&items).unwrap_or_default());
        }
        OutputFormat::Table => {
            if items.is_empty() {
                println!("No results");
                return;
            }
            let mut table = Table::new();
            table.load_preset(UTF8_FULL_CONDENSED);
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(T::headers());
            for item in &items {
                table.add_row(item.row());
            }
            println!("{table}");
        }
        OutputFormat::Plain => {
            print_plain(&items);
        }
    }
}

// ============================================================================
// Display implementations for models
// ============================================================================

/// Row for notification display.
#[derive(Serialize)]
pub struct NotificationRow {
    pub id: String,
    pub kind: String,
    pub priority: String,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub time: String,
    pub related_url: String,
}

impl From<&Notification> for NotificationRow {
    fn from(n: &Notification) -> Self {
        Self {
            id: n.id.to_string(),
            kind: format!("{:?}", n.kind),
            priority: n.priority.param().to_owned(),
            title: n.title.clone(),
            message: n.message.clone(),
            is_read: n.is_read,
            time: format_relative_time(n.created_at),
            related_url: n.related_url.clone().unwrap_or_default(),
        }
    }
}

impl TableRow for NotificationRow {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "Type", "Priority", "Title", "Read", "Time"]
    }
    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.kind.clone(),
            self.priority.clone(),
            self.title.clone(),
            if self.is_read { "".into() } else { "●".into() },
            self.time.clone(),
        ]
    }
}

impl PlainPrint for NotificationRow {
    fn plain_print(&self) {
        let unread_marker = if self.is_read {
            String::new()
        } else {
            "● ".red().to_string()
        };
        let priority_display = match self.priority.as_str() {
            "urgent" => self.priority.red().to_string(),
            "high" => self.priority.yellow().to_string(),
            _ => self.priority.dimmed().to_string(),
        };
        println!(
            "{}[{}] {} ({}) {}",
            unread_marker,
            self.kind.cyan(),
            self.title.bold(),
            priority_display,
            self.time.dimmed()
        );
        if !self.message.is_empty() {
            for line in self.message.lines() {
                if !line.trim().is_empty() {
                    println!("   {}", line);
                }
            }
        }
        if !self.related_url.is_empty() {
            println!("   {}", self.related_url.underline().dimmed());
        }
    }
}

/// Row for conversation list display.
#[derive(Serialize)]
pub struct ConversationRow {
    pub with: String,
    pub with_uid: String,
    pub email: String,
    pub messages: usize,
    pub unread: usize,
    pub last_subject: String,
    pub last_time: String,
}

impl From<&Conversation> for ConversationRow {
    fn from(c: &Conversation) -> Self {
        Self {
            with: c.participant.full_name(),
            with_uid: c.key.to_string(),
            email: c.participant.email.clone(),
            messages: c.messages.len(),
            unread: c.unread_count,
            last_subject: c.last_message().subject.clone(),
            last_time: format_relative_time(c.last_activity),
        }
    }
}

impl TableRow for ConversationRow {
    fn headers() -> Vec<&'static str> {
        vec!["With", "UID", "Messages", "Unread", "Last Subject", "Last"]
    }
    fn row(&self) -> Vec<String> {
        vec![
            self.with.clone(),
            self.with_uid.clone(),
            self.messages.to_string(),
            self.unread.to_string(),
            self.last_subject.clone(),
            self.last_time.clone(),
        ]
    }
}

impl PlainPrint for ConversationRow {
    fn plain_print(&self) {
        let unread_marker = if self.unread > 0 {
            format!("{} ", format!("({})", self.unread).red())
        } else {
            String::new()
        };
        println!(
            "{}{} {} {}",
            unread_marker,
            self.with.green().bold(),
            format!("[{}]", self.with_uid).dimmed(),
            self.last_time.dimmed()
        );
        println!("   {}", self.last_subject);
    }
}

/// Row for thread message display.
#[derive(Serialize)]
pub struct ThreadMessageRow {
    pub id: String,
    pub from: String,
    pub is_mine: bool,
    pub subject: String,
    pub content: String,
    pub is_read: bool,
    pub time: String,
}

impl ThreadMessageRow {
    /// Build a row, resolving "You" for messages the current user sent.
    pub fn new(message: &Message, current_user: &UserId) -> Self {
        let is_mine = message.is_mine(current_user);
        Self {
            id: message.id.to_string(),
            from: if is_mine {
                "You".to_owned()
            } else if message.sender_name.is_empty() {
                message.sender.to_string()
            } else {
                message.sender_name.clone()
            },
            is_mine,
            subject: message.subject.clone(),
            content: message.content.clone(),
            is_read: message.is_read,
            time: format_relative_time(message.created_at),
        }
    }
}

impl TableRow for ThreadMessageRow {
    fn headers() -> Vec<&'static str> {
        vec!["From", "Content", "Read", "Time"]
    }
    fn row(&self) -> Vec<String> {
        vec![
            self.from.clone(),
            self.content.clone(),
            if self.is_read { "".into() } else { "●".into() },
            self.time.clone(),
        ]
    }
}

impl PlainPrint for ThreadMessageRow {
    fn plain_print(&self) {
        let from_display = if self.is_mine {
            self.from.green().to_string()
        } else {
            self.from.clone()
        };
        let unread_marker = if self.is_read {
            String::new()
        } else {
            " ●".red().to_string()
        };
        println!("{} {}{}", from_display, self.time.dimmed(), unread_marker);
        for line in self.content.lines() {
            if !line.trim().is_empty() {
                println!("   {}", line);
            }
        }
        println!();
    }
}
