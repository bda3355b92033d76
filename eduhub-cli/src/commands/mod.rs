//! CLI subcommands.

pub mod message;
pub mod notification;
