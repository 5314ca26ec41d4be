//! Channel-facing Twitter service

use super::models::{
    provider_error, AvailableLocation, RateLimitStatus, SearchResponse, TrendPlace, Tweet, User,
};
use super::requests::{format_reset, resolve_count, SearchRequest, TimelineRequest, TrendsRequest};
use crate::auth::{Credentials, OAuthSigner};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::{irc, render_tweet, render_user, DisplayOptions, TweetRecord};
use crate::http::{ApiClient, ApiClientConfig, UrlShortener};
use crate::state::CursorStore;
use crate::types::{ItemId, Params};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{error, info};

/// Commands listed by `rate_limits`: display name, resource family, endpoint
const RATE_LIMITED_COMMANDS: [(&str, &str, &str); 5] = [
    ("trends", "trends", "/trends/place"),
    ("tsearch", "search", "/search/tweets"),
    ("twitter --id", "statuses", "/statuses/show/:id"),
    ("twitter --info", "users", "/users/show/:id"),
    ("twitter timeline", "statuses", "/statuses/user_timeline"),
];

/// Verified provider access plus the per-channel cursor store
///
/// Shared across concurrently running command handlers (wrap in `Arc`).
#[derive(Debug)]
pub struct TwitterClient {
    api: Option<ApiClient>,
    account: Option<String>,
    shortener: UrlShortener,
    config: Config,
    cursors: CursorStore,
}

impl TwitterClient {
    /// Build the client and verify its credentials
    ///
    /// Missing credentials or a failed identity check leave the client
    /// unauthorized (logged, not returned as an error); every command will
    /// then answer with `Error::Unauthorized` without calling the provider.
    pub async fn connect(config: Config, cursors: CursorStore) -> Result<Self> {
        let shortener = UrlShortener::from_settings(&config.api)?;

        let mut client = Self {
            api: None,
            account: None,
            shortener,
            config,
            cursors,
        };

        let credentials = match Credentials::from_config(&client.config.credentials) {
            Ok(credentials) => credentials,
            Err(e) => {
                error!("ERROR getting keys: {e}");
                return Ok(client);
            }
        };

        info!("Got all 4 keys. Now trying to auth up with Twitter.");
        let api = ApiClient::new(
            ApiClientConfig::from(&client.config.api),
            OAuthSigner::new(credentials),
        )?;

        let verified = api
            .call("account/verify_credentials", &[])
            .await
            .and_then(|body| serde_json::from_str::<Value>(&body).ok());

        match verified {
            Some(account) => {
                client.account = account
                    .get("screen_name")
                    .and_then(Value::as_str)
                    .map(String::from);
                info!("Successfully authorized with Twitter using the configured credentials");
                client.api = Some(api);
            }
            None => error!("ERROR. I could not log in using your credentials."),
        }

        Ok(client)
    }

    /// Whether the credential check succeeded
    pub fn is_authorized(&self) -> bool {
        self.api.is_some()
    }

    /// Screen name reported by the identity check, if any
    pub fn account(&self) -> Option<&str> {
        self.account.as_deref()
    }

    /// The shared cursor store
    pub fn cursors(&self) -> &CursorStore {
        &self.cursors
    }

    /// The loaded configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    // ========================================================================
    // Commands
    // ========================================================================

    /// Latest tweets from a user's timeline
    pub async fn timeline(&self, channel: &str, req: TimelineRequest) -> Result<Vec<String>> {
        let api = self.api()?;
        let settings = self.config.channel(channel);
        let nick = req.nick.replace('@', "");
        let count = resolve_count(req.num, settings.default_results, settings.max_results)?;

        self.cursors.touch(channel, &nick).await;

        let mut params = query(&[
            ("screen_name", nick.as_str()),
            ("count", &count.to_string()),
            ("tweet_mode", "extended"),
            ("include_rts", if req.no_retweets { "false" } else { "true" }),
            ("exclude_replies", if req.no_replies { "true" } else { "false" }),
        ]);
        if req.new {
            if let Some(since) = self.cursors.get(channel, &nick).await {
                params.push(("since_id".to_string(), since.to_string()));
            }
        }

        let lookup_failed = format!("Failed to lookup Twitter for '{nick}'");
        let result = self
            .fetch(api, "statuses/user_timeline", &params, &lookup_failed)
            .await
            .and_then(|value| {
                check_provider(&value, || format!("Twitter user '{nick}' not found."))?;
                parse::<Vec<Tweet>>(value, &lookup_failed)
            })
            .and_then(|tweets| {
                if tweets.is_empty() {
                    Err(Error::no_data(format!("'{nick}' has not tweeted yet.")))
                } else {
                    Ok(tweets)
                }
            });

        let Some(tweets) = quiet_if_new(req.new, result)? else {
            return Ok(Vec::new());
        };

        self.cursors
            .set(channel, &nick, ItemId::from(tweets[0].id))
            .await;

        let opts = DisplayOptions::from(&settings);
        let mut lines = Vec::with_capacity(tweets.len());
        for tweet in &tweets {
            lines.push(self.render(&tweet.to_record(true), &opts).await);
        }
        Ok(lines)
    }

    /// A single tweet by id
    pub async fn tweet(&self, channel: &str, id: &str) -> Result<Vec<String>> {
        let api = self.api()?;
        let id = id.trim();
        if id.is_empty() || !id.chars().all(|c| c.is_ascii_digit()) {
            return Err(Error::InvalidOption {
                option: "--id".to_string(),
                value: id.to_string(),
                message: "tweet ids are numeric".to_string(),
            });
        }
        let settings = self.config.channel(channel);

        let params = query(&[
            ("id", id),
            ("include_entities", "false"),
            ("tweet_mode", "extended"),
        ]);

        let lookup_failed = format!("Failed to lookup Twitter for '{id}'");
        let value = self
            .fetch(api, "statuses/show", &params, &lookup_failed)
            .await?;
        check_provider(&value, || format!("Tweet ID '{id}' not found."))?;
        let tweet: Tweet = parse(value, &lookup_failed)?;

        let opts = DisplayOptions::from(&settings);
        Ok(vec![self.render(&tweet.to_record(true), &opts).await])
    }

    /// Profile summary for a user
    pub async fn user_info(&self, _channel: &str, nick: &str) -> Result<Vec<String>> {
        let api = self.api()?;
        let nick = nick.replace('@', "");

        let params = query(&[("screen_name", nick.as_str()), ("include_entities", "false")]);

        let lookup_failed = format!("Failed to lookup Twitter for '{nick}'");
        let value = self.fetch(api, "users/show", &params, &lookup_failed).await?;
        check_provider(&value, || format!("Twitter user '{nick}' not found."))?;
        let user: User = parse(value, &lookup_failed)?;

        Ok(vec![render_user(&user.to_record())])
    }

    /// Search recent tweets
    pub async fn search(&self, channel: &str, req: SearchRequest) -> Result<Vec<String>> {
        let api = self.api()?;
        let settings = self.config.channel(channel);
        let count = resolve_count(
            req.num,
            settings.default_search_results,
            settings.max_search_results,
        )?;
        let lang = req.lang.as_deref().unwrap_or("en");
        if lang.is_empty() || lang.chars().any(char::is_whitespace) {
            return Err(Error::InvalidOption {
                option: "--lang".to_string(),
                value: lang.to_string(),
                message: "expected a language code such as 'en'".to_string(),
            });
        }
        let term = req.term.trim().to_string();

        self.cursors.touch(channel, &term).await;

        let q = if req.no_retweets {
            format!("{term} -filter:retweets")
        } else {
            term.clone()
        };
        let mut params = query(&[
            ("include_entities", "false"),
            ("tweet_mode", "extended"),
            ("count", &count.to_string()),
            ("lang", lang),
            ("q", &q),
        ]);
        if let Some(result_type) = req.result_type {
            params.push(("result_type".to_string(), result_type.as_str().to_string()));
        }
        if req.new {
            if let Some(since) = self.cursors.get(channel, &term).await {
                params.push(("since_id".to_string(), since.to_string()));
            }
        }

        let search_failed = "Something went wrong trying to search Twitter.";
        let no_results = format!("No Twitter Search results found for '{term}'");
        let result = self
            .fetch(api, "search/tweets", &params, search_failed)
            .await
            .and_then(|value| {
                check_provider(&value, || no_results.clone())?;
                parse::<SearchResponse>(value, search_failed)
            })
            .and_then(|response| {
                if response.statuses.is_empty() {
                    Err(Error::no_data(no_results.clone()))
                } else {
                    Ok(response.statuses)
                }
            });

        let Some(statuses) = quiet_if_new(req.new, result)? else {
            return Ok(Vec::new());
        };

        self.cursors
            .set(channel, &term, ItemId::from(statuses[0].id))
            .await;

        let opts = DisplayOptions::from(&settings);
        let mut lines = Vec::new();
        for tweet in statuses.iter().take(count as usize) {
            lines.push(self.render(&tweet.to_record(false), &opts).await);
        }
        Ok(lines)
    }

    /// Top trends for a location
    pub async fn trends(&self, channel: &str, req: TrendsRequest) -> Result<Vec<String>> {
        let api = self.api()?;
        let settings = self.config.channel(channel);
        let location = req
            .location
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty());

        let woeid = match location {
            None => settings.woeid.to_string(),
            Some(loc) if loc.to_lowercase().starts_with("world") => "1".to_string(),
            Some(loc) if loc.chars().all(|c| c.is_ascii_digit()) => loc.to_string(),
            Some(loc) => match self.find_woeid(api, loc).await {
                Ok(Some(id)) => id.to_string(),
                _ => {
                    return Err(Error::not_found(format!(
                        "I could not lookup location: {loc}. Try a different location."
                    )))
                }
            },
        };

        let mut params = query(&[("id", woeid.as_str())]);
        if req.exclude_hashtags || settings.hide_hashtags_trends {
            params.push(("exclude".to_string(), "hashtags".to_string()));
        }

        let trends_failed = "failed to lookup trends on Twitter";
        let value = self
            .fetch(api, "trends/place", &params, trends_failed)
            .await?;
        let label = location.unwrap_or(woeid.as_str());
        check_provider(&value, || format!("I do not have any trends for: {label}"))?;

        let places: Vec<TrendPlace> = parse(value, trends_failed)?;
        let place = places
            .first()
            .ok_or_else(|| Error::no_data(format!("I do not have any trends for: {label}")))?;
        let place_name = place
            .locations
            .first()
            .map_or_else(|| label.to_string(), |l| l.name.clone());
        let names = place
            .trends
            .iter()
            .map(|t| t.name.as_str())
            .collect::<Vec<_>>()
            .join(" | ");

        Ok(vec![format!(
            "Top Twitter Trends in {} :: {names}",
            irc::bold(place_name)
        )])
    }

    /// Look up the WOEID of a place
    pub async fn woeid_lookup(&self, location: &str) -> Result<Vec<String>> {
        let api = self.api()?;
        let location = location.trim();

        match self.find_woeid(api, location).await? {
            Some(woeid) => Ok(vec![format!(
                "WOEID: {} for '{location}'",
                irc::bold(woeid)
            )]),
            None => Err(Error::not_found(format!(
                "Something broke trying to find a WOEID for '{location}'"
            ))),
        }
    }

    /// Remaining requests and reset time for each command's endpoint
    pub async fn rate_limits(&self) -> Result<Vec<String>> {
        let api = self.api()?;

        let params = query(&[("resources", "trends,search,statuses,users")]);
        let lookup_failed = "Failed to lookup ratelimit data.";
        let value = self
            .fetch(api, "application/rate_limit_status", &params, lookup_failed)
            .await?;
        check_provider(&value, || lookup_failed.to_string())?;
        let status: RateLimitStatus = parse(value, lookup_failed).map_err(|_| {
            Error::no_data(
                "Failed to fetch application rate limit status. Something could be wrong with Twitter.",
            )
        })?;

        let now = Utc::now().timestamp();
        Ok(RATE_LIMITED_COMMANDS
            .iter()
            .map(|(name, family, endpoint)| {
                let detail = status.window(family, endpoint).map_or_else(
                    || "unavailable".to_string(),
                    |w| {
                        format!(
                            "Reset in: {}  Remaining: {}",
                            format_reset(w.reset, now),
                            w.remaining
                        )
                    },
                );
                format!("{} :: {detail}", irc::bold(name))
            })
            .collect())
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn api(&self) -> Result<&ApiClient> {
        self.api.as_ref().ok_or(Error::Unauthorized)
    }

    async fn fetch(
        &self,
        api: &ApiClient,
        endpoint: &str,
        params: &[(String, String)],
        failure: &str,
    ) -> Result<Value> {
        let body = match api.try_call(endpoint, params).await {
            Ok(body) => body,
            // Error payloads arrive with a non-2xx status; keep them for mapping
            Err(Error::HttpStatus { status, body }) => {
                match serde_json::from_str::<Value>(&body) {
                    Ok(value) if provider_error(&value).is_some() => return Ok(value),
                    _ => {
                        info!("error connecting to Twitter API on retry: HTTP {status}");
                        return Err(Error::no_data(failure));
                    }
                }
            }
            Err(e) => {
                info!("error connecting to Twitter API on retry: {e}");
                return Err(Error::no_data(failure));
            }
        };

        serde_json::from_str(&body).map_err(|e| {
            error!("Unexpected response from {endpoint}: {e}");
            Error::no_data(failure)
        })
    }

    async fn find_woeid(&self, api: &ApiClient, location: &str) -> Result<Option<u64>> {
        let failed = format!("Something broke trying to find a WOEID for '{location}'");
        let value = self.fetch(api, "trends/available", &[], &failed).await?;
        check_provider(&value, || failed.clone())?;
        let places: Vec<AvailableLocation> = parse(value, &failed)?;

        let needle = location.to_lowercase();
        let found = places
            .iter()
            .find(|p| p.name.to_lowercase().contains(&needle))
            .map(|p| p.woeid);
        if found.is_none() {
            info!("No location results for {location}");
        }
        Ok(found)
    }

    async fn render(&self, record: &TweetRecord, opts: &DisplayOptions) -> String {
        let mut short_links = Vec::new();
        if opts.add_short_url {
            for link in record.links() {
                if let Some(short) = self.shortener.shorten(&link).await {
                    short_links.push(short);
                }
            }
        }
        render_tweet(record, opts, &short_links)
    }
}

fn query(pairs: &[(&str, &str)]) -> Params {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

/// Map a provider error payload to `NotFound` (code 34) or `Provider`
fn check_provider(value: &Value, not_found: impl FnOnce() -> String) -> Result<()> {
    match provider_error(value) {
        None => Ok(()),
        Some(e) if e.is_not_found() => Err(Error::not_found(not_found())),
        Some(e) => {
            error!("Twitter error {}: {}", e.code, e.message);
            Err(Error::provider(e.code, e.message))
        }
    }
}

fn parse<T: DeserializeOwned>(value: Value, failure: &str) -> Result<T> {
    serde_json::from_value(value).map_err(|e| {
        error!("{failure}: {e}");
        Error::no_data(failure)
    })
}

/// In `--new` mode only "not found" is reported; other failures stay quiet
fn quiet_if_new<T>(new: bool, result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if new && !matches!(e, Error::NotFound { .. }) => {
            info!("Nothing new: {e}");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
