//! CLI module
//!
//! Command-line interface for the bot.
//!
//! # Commands
//!
//! - `check` - Verify the configured credentials
//! - `twitter`, `tsearch`, `trends`, `woeid`, `ratelimits` - One-shot lookups
//! - `shell` - Serve `<channel> <command>` lines from stdin

mod commands;
mod runner;

pub use commands::{BotCommand, BotLine, Cli, Commands};
pub use runner::{dispatch, parse_line, reply_lines, Runner};
