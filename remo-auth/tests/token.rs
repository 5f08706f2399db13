use remo_auth::{header_token, sign_token, verify_token};
use remo_core::config::AuthConfig;
use remo_core::http::{header, HeaderMap, HeaderValue};
use remo_core::AuthClaims;

fn config(secret: &str) -> AuthConfig {
    AuthConfig {
        secret: secret.to_string(),
        ..AuthConfig::default()
    }
}

fn claims() -> AuthClaims {
    AuthClaims {
        id: "user-1".to_string(),
        username: "felix".to_string(),
        roles: vec!["user".to_string(), "admin".to_string()],
        providers: Vec::new(),
        owns: false,
    }
}

#[test]
fn signed_tokens_verify_back_to_the_same_identity() {
    let config = config("s3cret");
    let token = sign_token(&config, &claims()).unwrap();
    let verified = verify_token(&config, &token).unwrap();
    assert_eq!(verified.id, "user-1");
    assert_eq!(verified.username, "felix");
    assert_eq!(verified.roles, vec!["user", "admin"]);
    assert!(!verified.owns);
}

#[test]
fn wrong_secret_fails_verification() {
    let token = sign_token(&config("one"), &claims()).unwrap();
    assert!(verify_token(&config("two"), &token).is_none());
}

#[test]
fn garbage_tokens_fail_verification() {
    assert!(verify_token(&config("s3cret"), "not.a.token").is_none());
}

#[test]
fn header_token_requires_the_bearer_scheme() {
    let mut headers = HeaderMap::new();
    headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
    assert_eq!(header_token(&headers), Some("abc"));

    headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
    assert_eq!(header_token(&headers), None);

    headers.remove(header::AUTHORIZATION);
    assert_eq!(header_token(&headers), None);
}
