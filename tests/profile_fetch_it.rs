#![cfg(feature = "reqwest")]

// std
use std::sync::Arc;
// crates.io
use httpmock::prelude::*;
use url::Url;
// self
use oauth2_box::{
	config::StrategyConfig,
	error::ProfileError,
	http::ReqwestHttpClient,
	oauth::ReqwestTransportErrorMapper,
	profile::NormalizedProfile,
	reqwest::Client as ReqwestClient,
	strategy::{ReqwestStrategy, Strategy, Verification, VerifyFuture, VerifyProfile},
	token::TokenSet,
};

const ACCESS_TOKEN: &str = "token-abc";

struct ProfileIdentity;
impl VerifyProfile<NormalizedProfile> for ProfileIdentity {
	fn verify<'a>(
		&'a self,
		_tokens: &'a TokenSet,
		profile: NormalizedProfile,
	) -> VerifyFuture<'a, NormalizedProfile> {
		Box::pin(async move { Ok(Verification::Granted(profile)) })
	}
}

/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
/// `httpmock` during tests.
fn insecure_http_client() -> ReqwestHttpClient {
	let client = ReqwestClient::builder()
		.danger_accept_invalid_certs(true)
		.danger_accept_invalid_hostnames(true)
		.build()
		.expect("Failed to build insecure Reqwest client for tests.");

	ReqwestHttpClient::with_client(client)
}

fn build_strategy(profile_url: &str) -> ReqwestStrategy<NormalizedProfile> {
	let config = StrategyConfig::new("client-it", "secret-it").profile_url(
		Url::parse(profile_url).expect("Mock profile endpoint should parse successfully."),
	);

	Strategy::with_http_client(
		config,
		Arc::new(ProfileIdentity),
		insecure_http_client(),
		Arc::new(ReqwestTransportErrorMapper),
	)
	.expect("Strategy construction should succeed.")
}

#[tokio::test]
async fn fetch_normalizes_the_profile_and_sends_the_bearer_header() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/2.0/users/me")
				.header("authorization", format!("Bearer {ACCESS_TOKEN}"));
			then.status(200).header("content-type", "application/json").body(
				"{\"id\":\"42\",\"name\":\"Jane Q Public\",\"login\":\"jane@example.com\",\"avatar_url\":\"https://x/a.png\"}",
			);
		})
		.await;
	let strategy = build_strategy(&server.url("/2.0/users/me"));
	let profile = strategy
		.fetch_profile(ACCESS_TOKEN)
		.await
		.expect("Profile fetch should succeed against the mock endpoint.");

	mock.assert_async().await;

	assert_eq!(profile.provider, "box");
	assert_eq!(profile.id.as_deref(), Some("42"));
	assert_eq!(profile.display_name.as_deref(), Some("Jane Q Public"));
	assert_eq!(profile.name.given_name, "Jane");
	assert_eq!(profile.name.middle_name, "Q");
	assert_eq!(profile.name.family_name, "Public");
	assert_eq!(profile.emails.len(), 1);
	assert_eq!(profile.emails[0].value.as_deref(), Some("jane@example.com"));
	assert_eq!(profile.photos.len(), 1);
	assert_eq!(profile.photos[0].value.as_deref(), Some("https://x/a.png"));
	assert_eq!(profile.login.as_deref(), Some("jane@example.com"));
	assert_eq!(profile.parsed.id.as_deref(), Some("42"));
	assert!(profile.raw.contains("Jane Q Public"));
}

#[tokio::test]
async fn non_success_statuses_surface_as_endpoint_errors() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/2.0/users/me");
			then.status(401).body("unauthorized");
		})
		.await;
	let strategy = build_strategy(&server.url("/2.0/users/me"));
	let err = strategy
		.fetch_profile(ACCESS_TOKEN)
		.await
		.expect_err("Unauthorized responses should fail the fetch.");

	mock.assert_async().await;

	assert!(matches!(err, ProfileError::Endpoint { status: 401, ref body } if body == "unauthorized"));
}

#[tokio::test]
async fn non_json_bodies_surface_as_parse_errors_with_the_body_attached() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/2.0/users/me");
			then.status(200).header("content-type", "text/html").body("<html>nope</html>");
		})
		.await;
	let strategy = build_strategy(&server.url("/2.0/users/me"));
	let err = strategy
		.fetch_profile(ACCESS_TOKEN)
		.await
		.expect_err("Non-JSON bodies should fail the fetch.");

	mock.assert_async().await;

	match err {
		ProfileError::Parse { status, body, .. } => {
			assert_eq!(status, 200);
			assert_eq!(body, "<html>nope</html>");
		},
		other => panic!("Expected a parse error, got {other:?}."),
	}
}

#[tokio::test]
async fn transport_failures_surface_as_fetch_errors_never_parse_errors() {
	// Nothing listens on this port; the connection itself fails.
	let strategy = build_strategy("https://127.0.0.1:9/2.0/users/me");
	let err = strategy
		.fetch_profile(ACCESS_TOKEN)
		.await
		.expect_err("Unreachable endpoints should fail the fetch.");

	assert!(matches!(err, ProfileError::Fetch { .. }));
	assert!(!matches!(err, ProfileError::Parse { .. }));
}
