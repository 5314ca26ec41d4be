//! Display lines for tweets and user profiles

use super::irc::{self, Color};
use super::text::colorize_urls;
use crate::config::ChannelSettings;

/// Presentation toggles for a tweet line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayOptions {
    /// Omit the author's display name
    pub hide_real_name: bool,
    /// Colour the handle blue instead of bold-underlining it
    pub color_tweets: bool,
    /// Append shortened status links
    pub add_short_url: bool,
    /// Colour URLs inside the text
    pub color_urls: bool,
}

impl From<&ChannelSettings> for DisplayOptions {
    fn from(settings: &ChannelSettings) -> Self {
        Self {
            hide_real_name: settings.hide_real_name,
            color_tweets: settings.output_color_tweets,
            add_short_url: settings.add_short_url,
            color_urls: settings.color_tweet_urls,
        }
    }
}

/// A tweet reduced to the fields that get displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TweetRecord {
    pub nick: String,
    pub name: String,
    pub verified: bool,
    pub text: String,
    /// Already rendered, e.g. "5m ago"
    pub time: String,
    pub tweet_id: String,
    /// Id of the reshared status, if this is a retweet
    pub retweet_id: Option<String>,
}

impl TweetRecord {
    /// Public link to this status
    pub fn status_url(&self) -> String {
        format!("https://twitter.com/{}/status/{}", self.nick, self.tweet_id)
    }

    /// Public link to the reshared status, when it differs from this one
    pub fn retweet_url(&self) -> Option<String> {
        self.retweet_id
            .as_deref()
            .filter(|id| *id != self.tweet_id)
            .map(|id| format!("https://twitter.com/{}/status/{id}", self.nick))
    }

    /// Links to shorten when `add_short_url` is on
    pub fn links(&self) -> Vec<String> {
        std::iter::once(self.status_url())
            .chain(self.retweet_url())
            .collect()
    }
}

/// Build the display line for a tweet
///
/// `short_links` are appended to the text in order; shortening happens
/// before this call so rendering stays side-effect free.
pub fn render_tweet(record: &TweetRecord, opts: &DisplayOptions, short_links: &[String]) -> String {
    let mut out = if opts.color_tweets {
        format!("@{}", irc::underline(irc::color(&record.nick, Color::Blue)))
    } else {
        format!("@{}", irc::bold_underline(&record.nick))
    };

    if record.verified {
        out.push_str(&irc::bold(irc::color_bg("✓", Color::White, Color::Blue)));
    }

    if !opts.hide_real_name {
        out.push_str(&format!(" ({})", record.name));
    }

    let mut text = record.text.clone();
    if opts.add_short_url {
        for link in short_links {
            text.push(' ');
            text.push_str(link);
        }
    }
    if opts.color_urls {
        text = colorize_urls(&text);
    }

    out.push_str(&format!(": {text} ({})", irc::bold(&record.time)));
    out
}

/// A user profile reduced to the fields that get displayed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserRecord {
    pub screen_name: String,
    pub name: String,
    pub protected: bool,
    pub url: Option<String>,
    pub description: Option<String>,
    pub friends: u64,
    pub statuses: u64,
    pub followers: u64,
    /// Already rendered, e.g. "3d ago"
    pub signup: String,
    pub location: Option<String>,
}

/// Build the display line for a user profile
pub fn render_user(user: &UserRecord) -> String {
    let mut out = irc::bold_underline(format!("@{}", user.screen_name));
    out.push_str(&format!(" ({})", user.name));

    if user.protected {
        out.push_str(&format!(" [{}]:", irc::bold_underline("LOCKED")));
    } else {
        out.push(':');
    }

    if let Some(url) = user.url.as_deref().filter(|u| !u.is_empty()) {
        out.push_str(&format!(" {}", irc::underline(url)));
    }
    if let Some(description) = user.description.as_deref().filter(|d| !d.is_empty()) {
        out.push_str(&format!(" {description}"));
    }

    out.push_str(&format!(
        " [{} friends, {} tweets, {} followers, signup: {}",
        irc::bold(user.friends),
        irc::bold(user.statuses),
        irc::bold(user.followers),
        irc::bold(&user.signup)
    ));

    match user.location.as_deref().filter(|l| !l.is_empty()) {
        Some(location) => out.push_str(&format!(" Location: {}]", irc::bold(location))),
        None => out.push(']'),
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::irc::strip;
    use pretty_assertions::assert_eq;

    fn record() -> TweetRecord {
        TweetRecord {
            nick: "rustlang".to_string(),
            name: "Rust Language".to_string(),
            verified: false,
            text: "Rust 1.0 is out https://blog.rust-lang.org".to_string(),
            time: "5s ago".to_string(),
            tweet_id: "100".to_string(),
            retweet_id: None,
        }
    }

    #[test]
    fn test_default_line() {
        let line = render_tweet(&record(), &DisplayOptions::default(), &[]);
        assert_eq!(
            line,
            "@\x02\x1frustlang\x1f\x02 (Rust Language): Rust 1.0 is out https://blog.rust-lang.org (\x025s ago\x02)"
        );
    }

    #[test]
    fn test_hide_name_and_verified_badge() {
        let mut rec = record();
        rec.verified = true;
        let opts = DisplayOptions {
            hide_real_name: true,
            ..DisplayOptions::default()
        };
        let line = render_tweet(&rec, &opts, &[]);
        assert_eq!(
            strip(&line),
            "@rustlang✓: Rust 1.0 is out https://blog.rust-lang.org (5s ago)"
        );
        assert!(line.contains("\x0300,02✓\x03"));
    }

    #[test]
    fn test_color_handle_and_urls() {
        let opts = DisplayOptions {
            color_tweets: true,
            color_urls: true,
            ..DisplayOptions::default()
        };
        let line = render_tweet(&record(), &opts, &[]);
        assert!(line.starts_with("@\x1f\x0302rustlang\x03\x1f"));
        assert!(line.contains("\x0304https://blog.rust-lang.org\x03"));
    }

    #[test]
    fn test_short_links_only_when_enabled() {
        let links = vec!["https://tinyurl.com/a".to_string()];

        let off = render_tweet(&record(), &DisplayOptions::default(), &links);
        assert!(!off.contains("tinyurl"));

        let opts = DisplayOptions {
            add_short_url: true,
            ..DisplayOptions::default()
        };
        let on = render_tweet(&record(), &opts, &links);
        assert!(strip(&on).contains("rust-lang.org https://tinyurl.com/a (5s ago)"));
    }

    #[test]
    fn test_links_skip_self_retweet() {
        let mut rec = record();
        assert_eq!(rec.links(), vec!["https://twitter.com/rustlang/status/100"]);

        rec.retweet_id = Some("100".to_string());
        assert_eq!(rec.links().len(), 1);

        rec.retweet_id = Some("99".to_string());
        assert_eq!(
            rec.links(),
            vec![
                "https://twitter.com/rustlang/status/100",
                "https://twitter.com/rustlang/status/99"
            ]
        );
    }

    #[test]
    fn test_render_user() {
        let user = UserRecord {
            screen_name: "rustlang".to_string(),
            name: "Rust".to_string(),
            protected: true,
            url: Some("https://rust-lang.org".to_string()),
            description: Some("A language".to_string()),
            friends: 1,
            statuses: 2,
            followers: 3,
            signup: "100d ago".to_string(),
            location: Some("Internet".to_string()),
        };
        assert_eq!(
            strip(&render_user(&user)),
            "@rustlang (Rust) [LOCKED]: https://rust-lang.org A language [1 friends, 2 tweets, 3 followers, signup: 100d ago Location: Internet]"
        );

        let open = UserRecord {
            protected: false,
            url: None,
            description: None,
            location: None,
            ..user
        };
        assert_eq!(
            strip(&render_user(&open)),
            "@rustlang (Rust): [1 friends, 2 tweets, 3 followers, signup: 100d ago]"
        );
    }
}
