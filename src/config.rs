//! Strategy configuration: caller-supplied options plus fixed Box endpoint defaults.
//!
//! [`StrategyConfig`] is the input shape; [`StrategyConfig::resolve`] fills provider defaults
//! exactly once and validates the result into an immutable [`ResolvedConfig`]. Resolution is a
//! pure transformation with no side effects, so configuration failures always surface before
//! any network activity.

// self
use crate::{_prelude::*, error::ConfigError};

/// Default Box authorization endpoint.
pub const AUTHORIZATION_URL: &str = "https://api.box.com/oauth2/authorize";
/// Default Box "current user" profile endpoint.
pub const PROFILE_URL: &str = "https://api.box.com/2.0/users/me";
/// Registration name used for this integration unless overridden.
pub const STRATEGY_NAME: &str = "box";
/// Default Box token endpoint.
pub const TOKEN_URL: &str = "https://api.box.com/oauth2/token";

/// OAuth 2.0 grant types the strategy participates in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantType {
	#[default]
	/// Authorization Code grant; the only grant Box issues user tokens through.
	AuthorizationCode,
	/// Refresh Token grant for renewing an earlier authorization.
	RefreshToken,
}
impl GrantType {
	/// Returns the RFC 6749 identifier for the grant type.
	pub fn as_str(self) -> &'static str {
		match self {
			GrantType::AuthorizationCode => "authorization_code",
			GrantType::RefreshToken => "refresh_token",
		}
	}
}
impl Display for GrantType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Caller-supplied strategy options.
///
/// `client_id` and `client_secret` are required and must be non-empty; every other field has a
/// provider-specific default filled in by [`resolve`](Self::resolve).
#[derive(Clone, Debug)]
pub struct StrategyConfig {
	/// OAuth 2.0 client identifier issued by Box.
	pub client_id: String,
	/// OAuth 2.0 client secret issued by Box.
	pub client_secret: String,
	/// URL Box redirects the user to after granting authorization; optional when the Box
	/// application configuration already pins one.
	pub callback_url: Option<Url>,
	/// Override for the authorization endpoint.
	pub authorization_url: Option<Url>,
	/// Override for the token endpoint.
	pub token_url: Option<Url>,
	/// Override for the profile endpoint.
	pub profile_url: Option<Url>,
	/// Override for the grant type.
	pub grant_type: Option<GrantType>,
	/// Override for the registration name.
	pub name: Option<String>,
}
impl StrategyConfig {
	/// Creates a configuration holding only the required credentials.
	pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
		Self {
			client_id: client_id.into(),
			client_secret: client_secret.into(),
			callback_url: None,
			authorization_url: None,
			token_url: None,
			profile_url: None,
			grant_type: None,
			name: None,
		}
	}

	/// Sets the callback URL.
	pub fn callback_url(mut self, url: Url) -> Self {
		self.callback_url = Some(url);

		self
	}

	/// Overrides the authorization endpoint.
	pub fn authorization_url(mut self, url: Url) -> Self {
		self.authorization_url = Some(url);

		self
	}

	/// Overrides the token endpoint.
	pub fn token_url(mut self, url: Url) -> Self {
		self.token_url = Some(url);

		self
	}

	/// Overrides the profile endpoint.
	pub fn profile_url(mut self, url: Url) -> Self {
		self.profile_url = Some(url);

		self
	}

	/// Overrides the grant type.
	pub fn grant_type(mut self, grant: GrantType) -> Self {
		self.grant_type = Some(grant);

		self
	}

	/// Overrides the registration name.
	pub fn name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());

		self
	}

	/// Fills provider defaults and validates the configuration.
	///
	/// Defaults are computed exactly once here and never recomputed afterwards.
	pub fn resolve(self) -> Result<ResolvedConfig, ConfigError> {
		if self.client_id.trim().is_empty() {
			return Err(ConfigError::MissingClientId);
		}
		if self.client_secret.trim().is_empty() {
			return Err(ConfigError::MissingClientSecret);
		}

		let authorization =
			resolve_endpoint("authorization", self.authorization_url, AUTHORIZATION_URL)?;
		let token = resolve_endpoint("token", self.token_url, TOKEN_URL)?;
		let profile = resolve_endpoint("profile", self.profile_url, PROFILE_URL)?;

		// Provider endpoints must be HTTPS; the callback may be a loopback HTTP URL during
		// development, so it is deliberately not validated here.
		Ok(ResolvedConfig {
			client_id: self.client_id,
			client_secret: self.client_secret,
			callback_url: self.callback_url,
			endpoints: StrategyEndpoints { authorization, token, profile },
			grant_type: self.grant_type.unwrap_or_default(),
			name: self.name.unwrap_or_else(|| STRATEGY_NAME.into()),
		})
	}
}

/// Endpoint set the resolved strategy operates against.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyEndpoints {
	/// Authorization endpoint users are redirected to.
	pub authorization: Url,
	/// Token endpoint used for code and refresh exchanges.
	pub token: Url,
	/// "Current user" endpoint queried during the profile fetch.
	pub profile: Url,
}

/// Immutable configuration consumed by the strategy after defaulting and validation.
#[derive(Clone)]
pub struct ResolvedConfig {
	/// OAuth 2.0 client identifier used in every grant.
	pub client_id: String,
	/// OAuth 2.0 client secret used for confidential authentication.
	pub client_secret: String,
	/// Redirect target registered with Box, when supplied.
	pub callback_url: Option<Url>,
	/// Endpoint definitions for this integration.
	pub endpoints: StrategyEndpoints,
	/// Grant type declared for the token exchange.
	pub grant_type: GrantType,
	/// Name under which the strategy registers with the host authentication framework.
	pub name: String,
}
impl Debug for ResolvedConfig {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ResolvedConfig")
			.field("client_id", &self.client_id)
			.field("client_secret", &"<redacted>")
			.field("callback_url", &self.callback_url)
			.field("endpoints", &self.endpoints)
			.field("grant_type", &self.grant_type)
			.field("name", &self.name)
			.finish()
	}
}

fn resolve_endpoint(
	name: &'static str,
	supplied: Option<Url>,
	default: &str,
) -> Result<Url, ConfigError> {
	let url = match supplied {
		Some(url) => url,
		None => Url::parse(default)
			.map_err(|source| ConfigError::InvalidEndpoint { endpoint: name, source })?,
	};

	validate_endpoint(name, &url)?;

	Ok(url)
}

fn validate_endpoint(name: &'static str, url: &Url) -> Result<(), ConfigError> {
	if url.scheme() != "https" {
		Err(ConfigError::InsecureEndpoint { endpoint: name, url: url.to_string() })
	} else {
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn url(value: &str) -> Url {
		Url::parse(value).expect("Test URL should parse successfully.")
	}

	#[test]
	fn resolve_fills_provider_defaults() {
		let resolved = StrategyConfig::new("client-id", "client-secret")
			.resolve()
			.expect("Config with credentials should resolve successfully.");

		assert_eq!(resolved.endpoints.authorization.as_str(), AUTHORIZATION_URL);
		assert_eq!(resolved.endpoints.token.as_str(), TOKEN_URL);
		assert_eq!(resolved.endpoints.profile.as_str(), PROFILE_URL);
		assert_eq!(resolved.grant_type, GrantType::AuthorizationCode);
		assert_eq!(resolved.name, STRATEGY_NAME);
		assert!(resolved.callback_url.is_none());
	}

	#[test]
	fn resolve_preserves_overrides() {
		let resolved = StrategyConfig::new("client-id", "client-secret")
			.authorization_url(url("https://sso.example.com/authorize"))
			.token_url(url("https://sso.example.com/token"))
			.profile_url(url("https://sso.example.com/me"))
			.callback_url(url("https://app.example.com/auth/box/callback"))
			.grant_type(GrantType::RefreshToken)
			.name("box-enterprise")
			.resolve()
			.expect("Config with overrides should resolve successfully.");

		assert_eq!(resolved.endpoints.authorization.as_str(), "https://sso.example.com/authorize");
		assert_eq!(resolved.endpoints.token.as_str(), "https://sso.example.com/token");
		assert_eq!(resolved.endpoints.profile.as_str(), "https://sso.example.com/me");
		assert_eq!(
			resolved.callback_url.as_ref().map(Url::as_str),
			Some("https://app.example.com/auth/box/callback")
		);
		assert_eq!(resolved.grant_type, GrantType::RefreshToken);
		assert_eq!(resolved.name, "box-enterprise");
	}

	#[test]
	fn resolve_rejects_missing_credentials() {
		let err = StrategyConfig::new("", "client-secret")
			.resolve()
			.expect_err("Empty client identifier should be rejected.");

		assert!(matches!(err, ConfigError::MissingClientId));

		let err = StrategyConfig::new("client-id", "   ")
			.resolve()
			.expect_err("Blank client secret should be rejected.");

		assert!(matches!(err, ConfigError::MissingClientSecret));
	}

	#[test]
	fn resolve_rejects_insecure_endpoints() {
		let err = StrategyConfig::new("client-id", "client-secret")
			.token_url(url("http://sso.example.com/token"))
			.resolve()
			.expect_err("Plain HTTP endpoint overrides should be rejected.");

		assert!(matches!(err, ConfigError::InsecureEndpoint { endpoint: "token", .. }));
	}

	#[test]
	fn debug_redacts_client_secret() {
		let resolved = StrategyConfig::new("client-id", "client-secret")
			.resolve()
			.expect("Config with credentials should resolve successfully.");
		let rendered = format!("{resolved:?}");

		assert!(rendered.contains("<redacted>"));
		assert!(!rendered.contains("client-secret"));
	}
}
