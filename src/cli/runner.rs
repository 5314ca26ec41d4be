//! CLI runner - executes commands

use crate::cli::commands::{BotCommand, BotLine, Cli, Commands};
use crate::config::Config;
use crate::error::Result;
use crate::format::irc;
use crate::state::CursorStore;
use crate::twitter::{SearchRequest, TimelineRequest, TrendsRequest, TwitterClient};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;
use tracing::{debug, error, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let config = Config::from_file(&self.cli.config)?;
        let client = self.connect(config).await?;

        match &self.cli.command {
            Commands::Check => self.check(&client),
            Commands::Bot(command) => {
                let lines = reply_lines(dispatch(&client, &self.cli.channel, command).await);
                self.print(None, &lines);
                client.cursors().flush().await
            }
            Commands::Shell { flush_interval } => {
                let interval = flush_interval.map_or_else(
                    || client.config().flush_interval(),
                    |secs| Duration::from_secs(secs.max(1)),
                );
                self.shell(Arc::new(client), interval).await
            }
        }
    }

    /// Open the cursor store and verify credentials
    ///
    /// A cursor file that exists but cannot be parsed aborts startup so it
    /// is never overwritten with an empty document.
    async fn connect(&self, config: Config) -> Result<TwitterClient> {
        let state_path = self.state_path(&config);
        debug!("Loading cursors from {}", state_path.display());
        let cursors = CursorStore::from_file(&state_path).await?;
        TwitterClient::connect(config, cursors).await
    }

    fn state_path(&self, config: &Config) -> PathBuf {
        self.cli
            .state
            .clone()
            .unwrap_or_else(|| config.state_file.clone())
    }

    fn check(&self, client: &TwitterClient) -> Result<()> {
        let line = if client.is_authorized() {
            match client.account() {
                Some(account) => format!("Authorized as @{account}"),
                None => "Authorized".to_string(),
            }
        } else {
            format!("ERROR: {}", crate::error::Error::Unauthorized)
        };
        self.print(None, &[line]);
        Ok(())
    }

    /// Serve channel command lines from stdin until EOF or Ctrl-C
    async fn shell(&self, client: Arc<TwitterClient>, flush_interval: Duration) -> Result<()> {
        let (stop_flush, flusher) = client.cursors().spawn_periodic_flush(flush_interval);
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut tasks = JoinSet::new();
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        info!("Shell ready; flushing cursors every {}s", flush_interval.as_secs());

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let line = match line {
                        Ok(Some(line)) => line,
                        Ok(None) => break,
                        Err(e) => {
                            error!("Failed to read stdin: {e}");
                            break;
                        }
                    };

                    let Some((channel, command)) = parse_line(&line) else {
                        continue;
                    };
                    let command = match command {
                        Ok(command) => command,
                        Err(message) => {
                            self.print(Some(&channel), &[format!("ERROR: {message}")]);
                            continue;
                        }
                    };

                    let client = Arc::clone(&client);
                    let raw = self.cli.irc;
                    tasks.spawn(async move {
                        let lines = reply_lines(dispatch(&client, &channel, &command).await);
                        print_lines(raw, Some(&channel), &lines);
                    });
                }
                Some(joined) = tasks.join_next(), if !tasks.is_empty() => {
                    if let Err(e) = joined {
                        error!("Command task failed: {e}");
                    }
                }
                _ = &mut ctrl_c => {
                    info!("Interrupted");
                    break;
                }
            }
        }

        info!("Waiting for {} in-flight command(s)", tasks.len());
        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                error!("Command task failed: {e}");
            }
        }

        let _ = stop_flush.send(true);
        if let Err(e) = flusher.await {
            error!("Cursor flusher failed: {e}");
        }
        client.cursors().flush().await
    }

    fn print(&self, channel: Option<&str>, lines: &[String]) {
        print_lines(self.cli.irc, channel, lines);
    }
}

/// Run one channel command against the client
pub async fn dispatch(
    client: &TwitterClient,
    channel: &str,
    command: &BotCommand,
) -> Result<Vec<String>> {
    match command {
        BotCommand::Twitter {
            num,
            nort,
            noreply,
            new,
            id,
            info,
            target,
        } => {
            if *id {
                client.tweet(channel, target).await
            } else if *info {
                client.user_info(channel, target).await
            } else {
                let req = TimelineRequest {
                    nick: target.clone(),
                    num: *num,
                    no_retweets: *nort,
                    no_replies: *noreply,
                    new: *new,
                };
                client.timeline(channel, req).await
            }
        }
        BotCommand::Tsearch {
            num,
            searchtype,
            lang,
            nort,
            new,
            term,
        } => {
            let req = SearchRequest {
                term: term.join(" "),
                num: *num,
                result_type: *searchtype,
                lang: lang.clone(),
                no_retweets: *nort,
                new: *new,
            };
            client.search(channel, req).await
        }
        BotCommand::Trends { exclude, location } => {
            let req = TrendsRequest {
                location: (!location.is_empty()).then(|| location.join(" ")),
                exclude_hashtags: *exclude,
            };
            client.trends(channel, req).await
        }
        BotCommand::Woeid { location } => client.woeid_lookup(&location.join(" ")).await,
        BotCommand::Ratelimits => client.rate_limits().await,
    }
}

/// Reply lines for a command result; errors become a single `ERROR:` line
pub fn reply_lines(result: Result<Vec<String>>) -> Vec<String> {
    match result {
        Ok(lines) => lines,
        Err(e) => {
            if !e.is_local() {
                debug!("Command failed: {e:?}");
            }
            vec![format!("ERROR: {e}")]
        }
    }
}

/// Split a shell line into its channel and parsed command
///
/// Blank lines yield `None`; parse failures carry clap's first message line.
pub fn parse_line(line: &str) -> Option<(String, std::result::Result<BotCommand, String>)> {
    let mut words = line.split_whitespace();
    let channel = words.next()?.to_string();
    let parsed = BotLine::parse_words(words)
        .map(|line| line.command)
        .map_err(|e| {
            let rendered = e.to_string();
            rendered
                .lines()
                .next()
                .unwrap_or_default()
                .trim_start_matches("error: ")
                .to_string()
        });
    Some((channel, parsed))
}

fn print_lines(raw: bool, channel: Option<&str>, lines: &[String]) {
    for line in lines {
        let line = if raw { line.clone() } else { irc::strip(line) };
        match channel {
            Some(channel) => println!("[{channel}] {line}"),
            None => println!("{line}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_reply_lines() {
        assert_eq!(reply_lines(Ok(vec!["a".to_string()])), vec!["a"]);
        assert_eq!(
            reply_lines(Err(Error::Unauthorized)),
            vec!["ERROR: Twitter is not authorized. Please check logs before running this command."]
        );
    }

    #[test]
    fn test_parse_line() {
        assert!(parse_line("   ").is_none());

        let (channel, command) = parse_line("#rust woeid new york").unwrap();
        assert_eq!(channel, "#rust");
        assert_eq!(
            command.unwrap(),
            BotCommand::Woeid {
                location: vec!["new".to_string(), "york".to_string()]
            }
        );

        let (_, command) = parse_line("#rust frobnicate").unwrap();
        assert!(command.unwrap_err().contains("frobnicate"));
    }

    #[tokio::test]
    async fn test_dispatch_unauthorized() {
        let client = TwitterClient::connect(Config::default(), CursorStore::in_memory())
            .await
            .unwrap();
        let result = dispatch(&client, "#rust", &BotCommand::Ratelimits).await;
        assert!(matches!(result, Err(Error::Unauthorized)));
    }
}
