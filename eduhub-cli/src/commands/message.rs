//! Message center commands.

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use eduhub::{
    group_by_participant, Conversation, ConversationFilter, EduClient, Priority, ReadBucket,
    UserId,
};

use crate::config::build_authed_client;
use crate::output::{print_table, ConversationRow, OutputFormat, ThreadMessageRow};

#[derive(Subcommand)]
pub enum MessageAction {
    /// List conversations
    #[command(alias = "ls")]
    List {
        /// Free-text search over participants and message content
        #[arg(short, long)]
        query: Option<String>,
        /// Bucket: all, unread, read, favorited
        #[arg(short, long, default_value = "all")]
        bucket: String,
    },

    /// View the conversation with a participant
    Read {
        /// Participant user ID
        uid: String,
        /// Mark the thread's messages as read
        #[arg(long)]
        mark_read: bool,
    },

    /// Show or clear recent search terms
    Searches {
        /// Clear the recent search history
        #[arg(long)]
        clear: bool,
    },

    /// Send a new message
    Send {
        /// Recipient user ID
        #[arg(short, long)]
        to: String,
        /// Message subject
        #[arg(short, long, default_value = "")]
        subject: String,
        /// Priority: low, normal, high, urgent
        #[arg(short, long, default_value = "normal")]
        priority: String,
        /// Course context ID
        #[arg(short, long)]
        course: Option<String>,
        /// Message content
        content: String,
    },
}

pub async fn handle(action: MessageAction, format: OutputFormat, _verbose: bool) -> Result<()> {
    match action {
        MessageAction::List { query, bucket } => list_conversations(query, &bucket, format).await,
        MessageAction::Read { uid, mark_read } => read_conversation(&uid, mark_read, format).await,
        MessageAction::Searches { clear } => show_searches(clear).await,
        MessageAction::Send {
            to,
            subject,
            priority,
            course,
            content,
        } => send_message(&to, &subject, &priority, course.as_deref(), &content).await,
    }
}

/// Fetch messages and roster, then aggregate into conversations.
async fn load_conversations(client: &EduClient) -> Result<Vec<Conversation>> {
    let current_user = UserId::new(client.current_uid().unwrap_or_default());
    let messages = client.messages().list().await?;
    let roster = client.roster().list().await?;

    Ok(group_by_participant(&messages, &current_user, &roster))
}

async fn list_conversations(query: Option<String>, bucket: &str, format: OutputFormat) -> Result<()> {
    let client = build_authed_client()?;
    let conversations = load_conversations(&client).await?;

    if let (Some(term), Some(recent)) = (query.as_deref(), client.recent_searches()) {
        if let Err(e) = recent.push(term).await {
            log::warn!("failed to record search term: {e}");
        }
    }

    let filter = ConversationFilter {
        query,
        bucket: ReadBucket::parse(bucket),
    };
    let filtered = filter.apply(&conversations);

    if matches!(format, OutputFormat::Plain) {
        let unread_threads = filtered.iter().filter(|c| c.unread_count > 0).count();
        println!(
            "{} conversations, {} with unread messages\n",
            filtered.len(),
            unread_threads
        );
    }

    let rows: Vec<ConversationRow> = filtered.iter().map(ConversationRow::from).collect();
    print_table(rows, format);

    Ok(())
}

async fn read_conversation(uid: &str, mark_read: bool, format: OutputFormat) -> Result<()> {
    let client = build_authed_client()?;
    let conversations = load_conversations(&client).await?;

    let key = UserId::new(uid);
    let Some(conversation) = conversations.into_iter().find(|c| c.key == key) else {
        println!("No conversation with {uid}");
        return Ok(());
    };

    if matches!(format, OutputFormat::Plain) {
        println!(
            "Conversation with {} ({} messages, {} unread)\n",
            conversation.participant.full_name().green(),
            conversation.messages.len(),
            conversation.unread_count
        );
    }

    let current_user = UserId::new(client.current_uid().unwrap_or_default());
    let rows: Vec<ThreadMessageRow> = conversation
        .messages
        .iter()
        .map(|m| ThreadMessageRow::new(m, &current_user))
        .collect();
    print_table(rows, format);

    if mark_read {
        let api = client.messages();
        for message in conversation.messages.iter().filter(|m| !m.is_read) {
            api.mark_read(&message.id).await?;
        }
        println!("{} Marked thread as read", "✓".green());
    }

    Ok(())
}

async fn show_searches(clear: bool) -> Result<()> {
    let client = build_authed_client()?;
    let Some(recent) = client.recent_searches() else {
        println!("No search history available");
        return Ok(());
    };

    if clear {
        recent.clear().await;
        println!("{} Cleared search history", "✓".green());
        return Ok(());
    }

    let terms = recent.all().await;
    if terms.is_empty() {
        println!("No recent searches");
    } else {
        for term in terms {
            println!("{term}");
        }
    }
    Ok(())
}

async fn send_message(
    to: &str,
    subject: &str,
    priority: &str,
    course: Option<&str>,
    content: &str,
) -> Result<()> {
    let client = build_authed_client()?;

    let mut builder = client
        .messages()
        .send()
        .to(to)
        .subject(subject)
        .content(content)
        .priority(Priority::parse(priority));
    if let Some(course) = course {
        builder = builder.course(course);
    }

    let message = builder.execute().await?;

    println!("{} Message {} sent to {}", "✓".green(), message.id, to);
    Ok(())
}
