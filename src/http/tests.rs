//! Tests for the HTTP module

use super::*;
use crate::auth::{Credentials, OAuthSigner};
use crate::config::ApiSettings;
use crate::types::BackoffType;
use std::time::Duration;
use wiremock::matchers::{header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn signer() -> OAuthSigner {
    OAuthSigner::new(Credentials::new("ck", "cs", "ak", "as").unwrap())
}

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(ApiClientConfig::with_base_url(server.uri()), signer()).unwrap()
}

// ============================================================================
// Retry Policy Tests
// ============================================================================

#[test]
fn test_retry_policy_default_is_single_flat_retry() {
    let policy = RetryPolicy::default();
    assert_eq!(policy.max_retries, 1);
    assert_eq!(policy.attempts(), 2);
    assert_eq!(policy.delay(0), Duration::ZERO);
}

#[test]
fn test_retry_policy_backoff() {
    let policy = RetryPolicy::with_backoff(
        4,
        BackoffType::Exponential,
        Duration::from_millis(100),
        Duration::from_millis(500),
    );
    assert_eq!(policy.delay(0), Duration::from_millis(100));
    assert_eq!(policy.delay(1), Duration::from_millis(200));
    assert_eq!(policy.delay(2), Duration::from_millis(400));
    assert_eq!(policy.delay(3), Duration::from_millis(500));

    let linear = RetryPolicy::with_backoff(
        2,
        BackoffType::Linear,
        Duration::from_millis(50),
        Duration::from_secs(1),
    );
    assert_eq!(linear.delay(2), Duration::from_millis(150));
}

// ============================================================================
// Config Tests
// ============================================================================

#[test]
fn test_client_config_from_settings() {
    let settings = ApiSettings {
        max_retries: 3,
        requests_per_second: Some(2),
        ..ApiSettings::default()
    };
    let config = ApiClientConfig::from(&settings);
    assert_eq!(config.timeout, Duration::from_secs(10));
    assert_eq!(config.retry.max_retries, 3);
    assert_eq!(config.rate_limit, Some(RateLimiterConfig::new(2, 2)));
    assert!(config.user_agent.starts_with("tweety/"));
}

#[test]
fn test_endpoint_url() {
    let client = ApiClient::new(
        ApiClientConfig::with_base_url("https://api.twitter.com/1.1/"),
        signer(),
    )
    .unwrap();
    assert_eq!(
        client.endpoint_url("statuses/show"),
        "https://api.twitter.com/1.1/statuses/show.json"
    );
    assert!(!client.has_rate_limiter());
}

// ============================================================================
// Call Tests
// ============================================================================

#[tokio::test]
async fn test_call_returns_body_and_signs() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/show.json"))
        .and(query_param("screen_name", "rustlang"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id": 1}"#))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let body = client
        .call(
            "users/show",
            &[("screen_name".to_string(), "rustlang".to_string())],
        )
        .await;

    assert_eq!(body.as_deref(), Some(r#"{"id": 1}"#));
}

#[tokio::test]
async fn test_call_encodes_spaces_in_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/tweets.json"))
        .and(query_param("q", "breaking news"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let body = client
        .call(
            "search/tweets",
            &[("q".to_string(), "breaking news".to_string())],
        )
        .await;
    assert!(body.is_some());
}

#[tokio::test]
async fn test_call_fails_twice_gives_none_after_two_attempts() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/statuses/user_timeline.json"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let body = client.call("statuses/user_timeline", &[]).await;

    assert!(body.is_none());
}

#[tokio::test]
async fn test_call_fails_once_then_succeeds() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/trends/place.json"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/trends/place.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let body = client.call("trends/place", &[]).await;

    assert_eq!(body.as_deref(), Some("[]"));
}

#[tokio::test]
async fn test_client_error_is_retried_too() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/account/verify_credentials.json"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad auth"))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .try_call("account/verify_credentials", &[])
        .await
        .unwrap_err();

    assert!(matches!(err, crate::Error::HttpStatus { status: 401, .. }));
}

#[tokio::test]
async fn test_no_retry_policy_makes_one_attempt() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let config = ApiClientConfig::with_base_url(server.uri()).retry(RetryPolicy::no_retry());
    let client = ApiClient::new(config, signer()).unwrap();

    assert!(client.call("statuses/show", &[]).await.is_none());
}

#[tokio::test]
async fn test_configured_retries_bound_attempts() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .expect(4)
        .mount(&server)
        .await;

    let config = ApiClientConfig::with_base_url(server.uri()).retry(RetryPolicy::with_backoff(
        3,
        BackoffType::Constant,
        Duration::from_millis(1),
        Duration::from_millis(5),
    ));
    let client = ApiClient::new(config, signer()).unwrap();

    assert!(client.call("statuses/show", &[]).await.is_none());
}

#[tokio::test]
async fn test_timeout_gives_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .expect(2)
        .mount(&server)
        .await;

    let config =
        ApiClientConfig::with_base_url(server.uri()).timeout(Duration::from_millis(50));
    let client = ApiClient::new(config, signer()).unwrap();

    let err = client.try_call("statuses/show", &[]).await.unwrap_err();
    assert!(matches!(err, crate::Error::Timeout { timeout_ms: 50 }));
}

#[tokio::test]
async fn test_transport_failure_gives_none() {
    // Nothing listens on port 9 in the test environment
    let config = ApiClientConfig::with_base_url("http://127.0.0.1:9");
    let client = ApiClient::new(config, signer()).unwrap();

    assert!(client.call("statuses/show", &[]).await.is_none());
}

// ============================================================================
// Shortener Tests
// ============================================================================

#[tokio::test]
async fn test_shortener_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api-create.php"))
        .and(query_param("url", "https://twitter.com/rustlang/status/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("https://tinyurl.com/abc\n"))
        .expect(1)
        .mount(&server)
        .await;

    let shortener = UrlShortener::from_settings(&ApiSettings::local(server.uri())).unwrap();
    let short = shortener
        .shorten("https://twitter.com/rustlang/status/1")
        .await;

    assert_eq!(short.as_deref(), Some("https://tinyurl.com/abc"));
}

#[tokio::test]
async fn test_shortener_failure_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api-create.php"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let shortener = UrlShortener::from_settings(&ApiSettings::local(server.uri())).unwrap();
    assert!(shortener.shorten("https://example.com").await.is_none());
}

#[test]
fn test_invalid_base_url_rejected() {
    let result = ApiClient::new(ApiClientConfig::with_base_url("not a url"), signer());
    assert!(matches!(result, Err(crate::Error::InvalidUrl(_))));
}
