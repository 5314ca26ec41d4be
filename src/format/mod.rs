//! Presentation helpers
//!
//! Everything here is pure string construction: IRC control codes, HTML
//! entity decoding, relative timestamps and the tweet/user display lines.

pub mod irc;
mod text;
mod time;
mod tweet;

pub use text::{colorize_urls, unescape};
pub use time::{format_elapsed, parse_created_at, relative_time, relative_time_at};
pub use tweet::{render_tweet, render_user, DisplayOptions, TweetRecord, UserRecord};
