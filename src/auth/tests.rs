//! Tests for the auth module

use super::*;

fn reference_signer() -> OAuthSigner {
    OAuthSigner::new(
        Credentials::new(
            "xvz1evFS4wEEPTGEFPHBog",
            "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw",
            "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb",
            "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE",
        )
        .unwrap(),
    )
}

#[test]
fn test_percent_encode() {
    assert_eq!(percent_encode("hello world"), "hello%20world");
    assert_eq!(percent_encode("foo=bar&baz"), "foo%3Dbar%26baz");
    assert_eq!(percent_encode("test-value_123.txt"), "test-value_123.txt");
    assert_eq!(percent_encode("~tilde"), "~tilde");
    assert_eq!(percent_encode("a+b!"), "a%2Bb%21");
    assert_eq!(percent_encode("☃"), "%E2%98%83");
}

#[test]
fn test_known_signature() {
    // Published reference request for statuses/update
    let params = vec![
        ("include_entities".to_string(), "true".to_string()),
        (
            "status".to_string(),
            "Hello Ladies + Gentlemen, a signed OAuth request!".to_string(),
        ),
    ];

    let header = reference_signer()
        .authorization_with(
            "POST",
            "https://api.twitter.com/1.1/statuses/update.json",
            &params,
            "1318622958",
            "kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg",
        )
        .unwrap();

    assert!(header.contains("oauth_signature=\"hCtSmYh%2BiHYCEqBWrE7C7hYmtUk%3D\""));
}

#[test]
fn test_header_shape() {
    let header = reference_signer()
        .authorization("GET", "https://api.twitter.com/1.1/account/verify_credentials.json", &[])
        .unwrap();

    assert!(header.starts_with("OAuth "));
    assert!(header.contains("oauth_consumer_key=\"xvz1evFS4wEEPTGEFPHBog\""));
    assert!(header.contains("oauth_signature_method=\"HMAC-SHA1\""));
    assert!(header.contains("oauth_version=\"1.0\""));
    assert!(header.contains("oauth_timestamp="));
    assert!(header.contains("oauth_nonce="));
    assert!(!header.contains("status="));
}

#[test]
fn test_signature_depends_on_params() {
    let signer = reference_signer();
    let url = "https://api.twitter.com/1.1/users/show.json";
    let a = signer
        .authorization_with(
            "GET",
            url,
            &[("screen_name".to_string(), "a".to_string())],
            "1",
            "n",
        )
        .unwrap();
    let b = signer
        .authorization_with(
            "GET",
            url,
            &[("screen_name".to_string(), "b".to_string())],
            "1",
            "n",
        )
        .unwrap();
    assert_ne!(a, b);

    // Deterministic for identical input
    let a2 = signer
        .authorization_with(
            "GET",
            url,
            &[("screen_name".to_string(), "a".to_string())],
            "1",
            "n",
        )
        .unwrap();
    assert_eq!(a, a2);
}
