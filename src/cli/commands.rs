//! CLI commands and argument parsing

use crate::types::SearchType;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Twitter lookups for chat channels
#[derive(Parser, Debug)]
#[command(name = "tweety")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true, default_value = "tweety.yaml")]
    pub config: PathBuf,

    /// Cursor state file (JSON); overrides `state_file` from the config
    #[arg(short, long, global = true)]
    pub state: Option<PathBuf>,

    /// Channel whose settings and cursors one-shot commands use
    #[arg(long, global = true, default_value = "console")]
    pub channel: String,

    /// Keep IRC formatting codes in printed replies
    #[arg(long, global = true)]
    pub irc: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Verify the configured credentials
    Check,

    #[command(flatten)]
    Bot(BotCommand),

    /// Read `<channel> <command> [args..]` lines from stdin
    Shell {
        /// Seconds between cursor flushes (defaults to the config value)
        #[arg(long)]
        flush_interval: Option<u64>,
    },
}

/// Commands a channel can issue
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum BotCommand {
    /// Latest tweets from a user, a single tweet, or a user profile
    Twitter {
        /// Number of tweets to show
        #[arg(long, allow_hyphen_values = true)]
        num: Option<i64>,

        /// Leave out retweets
        #[arg(long)]
        nort: bool,

        /// Leave out replies
        #[arg(long)]
        noreply: bool,

        /// Only tweets newer than the last lookup; stay quiet otherwise
        #[arg(long)]
        new: bool,

        /// Treat the target as a tweet id
        #[arg(long, conflicts_with = "info")]
        id: bool,

        /// Show the user's profile instead of tweets
        #[arg(long)]
        info: bool,

        /// Screen name, or tweet id with `--id`
        target: String,
    },

    /// Search recent tweets
    Tsearch {
        /// Number of results to show
        #[arg(long, allow_hyphen_values = true)]
        num: Option<i64>,

        /// Result ordering
        #[arg(long, value_enum)]
        searchtype: Option<SearchType>,

        /// Language code (default: en)
        #[arg(long)]
        lang: Option<String>,

        /// Leave out retweets
        #[arg(long)]
        nort: bool,

        /// Only results newer than the last search; stay quiet otherwise
        #[arg(long)]
        new: bool,

        /// Search terms
        #[arg(required = true, num_args = 1..)]
        term: Vec<String>,
    },

    /// Top trends for a location (place name, WOEID or "world")
    Trends {
        /// Leave out hashtags
        #[arg(long)]
        exclude: bool,

        /// Location; the channel default when omitted
        location: Vec<String>,
    },

    /// Look up the WOEID of a place
    Woeid {
        /// Place name
        #[arg(required = true, num_args = 1..)]
        location: Vec<String>,
    },

    /// Remaining API calls per command
    Ratelimits,
}

/// One shell line after its channel name
#[derive(Parser, Debug)]
#[command(name = "tweety", no_binary_name = true, disable_version_flag = true)]
pub struct BotLine {
    #[command(subcommand)]
    pub command: BotCommand,
}

impl BotLine {
    /// Parse whitespace-separated words into a command
    pub fn parse_words<'a>(words: impl IntoIterator<Item = &'a str>) -> Result<Self, clap::Error> {
        Self::try_parse_from(words)
    }
}
