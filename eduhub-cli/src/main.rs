//! EduHub notification and message center CLI.

mod commands;
mod config;
mod output;
mod storage;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{message, notification};

/// EduHub notification and message center
#[derive(Parser)]
#[command(name = "eduhub")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Output format
    #[arg(short, long, global = true, default_value = "plain")]
    format: output::OutputFormat,

    /// Show verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage authentication
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },

    /// Notification operations
    #[command(alias = "n")]
    Notification {
        #[command(subcommand)]
        action: notification::NotificationAction,
    },

    /// Message center operations
    #[command(alias = "m")]
    Message {
        #[command(subcommand)]
        action: message::MessageAction,
    },

    /// Show current configuration
    Config,
}

#[derive(Subcommand)]
enum AuthAction {
    /// Login with tokens and uid
    Login {
        /// Bearer access token
        #[arg(short, long)]
        token: String,
        /// Refresh token
        #[arg(short, long)]
        refresh: Option<String>,
        /// User ID
        #[arg(short, long)]
        uid: String,
        /// Session role: student, tutor, admin
        #[arg(long, default_value = "student")]
        role: String,
    },
    /// Logout
    Logout,
    /// Show current auth status
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
            .init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    match cli.command {
        Commands::Auth { action } => handle_auth(action).await,
        Commands::Notification { action } => {
            notification::handle(action, cli.format, cli.verbose).await
        }
        Commands::Message { action } => message::handle(action, cli.format, cli.verbose).await,
        Commands::Config => {
            let cfg = config::load_config()?;
            println!("Config file: {}", config::config_path()?.display());
            println!("Authenticated: {}", cfg.auth.is_some());
            if let Some(auth) = &cfg.auth {
                println!("User ID: {}", auth.uid);
                println!("Role: {}", auth.role);
            }
            if let Some(base_url) = &cfg.base_url {
                println!("Base URL: {}", base_url);
            }
            Ok(())
        }
    }
}

async fn handle_auth(action: AuthAction) -> Result<()> {
    match action {
        AuthAction::Login {
            token,
            refresh,
            uid,
            role,
        } => {
            // Validate the role before persisting it.
            let _: eduhub::Role = role.parse().map_err(|e| anyhow::anyhow!("{e}"))?;

            let mut cfg = config::load_config()?;
            cfg.auth = Some(config::AuthConfig {
                access_token: token,
                refresh_token: refresh,
                uid: uid.clone(),
                role,
            });
            config::save_config(&cfg)?;
            println!("Logged in as {}", uid);
            Ok(())
        }
        AuthAction::Logout => {
            let mut cfg = config::load_config()?;
            cfg.auth = None;
            config::save_config(&cfg)?;
            println!("Logged out");
            Ok(())
        }
        AuthAction::Status => {
            let cfg = config::load_config()?;
            if let Some(auth) = &cfg.auth {
                println!("Logged in as {} ({})", auth.uid, auth.role);
            } else {
                println!("Not logged in");
            }
            Ok(())
        }
    }
}
