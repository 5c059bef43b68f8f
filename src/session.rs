//! Authorization session handling and the session identity codec.
//!
//! [`AuthorizationSession`] carries the opaque `state` value issued for one browser redirect
//! and the fully-formed authorize URL. [`SessionCodec`] replaces ambient process-wide
//! serialize/deserialize registration with an explicit, injected capability.

// crates.io
use rand::{Rng, distr::Alphanumeric};
use serde::de::DeserializeOwned;
// self
use crate::{_prelude::*, config::ResolvedConfig};

const STATE_LEN: usize = 32;

/// Authorization handshake metadata returned by `Strategy::start_authorization`.
///
/// All per-attempt state lives here; the strategy itself holds none, so one strategy instance
/// serves any number of concurrent sessions.
#[derive(Clone)]
pub struct AuthorizationSession {
	/// Opaque state value that must round-trip via the redirect handler.
	pub state: String,
	/// Redirect URI the authorize URL was built with, when one was configured.
	pub redirect_uri: Option<Url>,
	/// Fully-formed HTTPS authorize URL that callers should send end-users to.
	pub authorize_url: Url,
}
impl AuthorizationSession {
	pub(crate) fn new(state: String, redirect_uri: Option<Url>, authorize_url: Url) -> Self {
		Self { state, redirect_uri, authorize_url }
	}

	/// Validates the returned `state` parameter after the authorization redirect.
	pub fn validate_state(&self, returned_state: &str) -> Result<()> {
		if returned_state == self.state {
			Ok(())
		} else {
			Err(Error::InvalidGrant { reason: "Authorization state mismatch.".into() })
		}
	}
}
impl Debug for AuthorizationSession {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthorizationSession")
			.field("state", &self.state)
			.field("redirect_uri", &self.redirect_uri)
			.field("authorize_url", &self.authorize_url)
			.finish()
	}
}

pub(crate) fn build_session(
	config: &ResolvedConfig,
	redirect_uri: Option<Url>,
) -> AuthorizationSession {
	let state = random_string(STATE_LEN);
	let authorize_url = build_authorize_url(config, redirect_uri.as_ref(), &state);

	AuthorizationSession::new(state, redirect_uri, authorize_url)
}

fn build_authorize_url(config: &ResolvedConfig, redirect_uri: Option<&Url>, state: &str) -> Url {
	let mut url = config.endpoints.authorization.clone();
	let mut pairs = url.query_pairs_mut();

	pairs.append_pair("response_type", "code");
	pairs.append_pair("client_id", &config.client_id);

	if let Some(redirect) = redirect_uri {
		pairs.append_pair("redirect_uri", redirect.as_str());
	}

	pairs.append_pair("state", state);

	drop(pairs);

	url
}

fn random_string(len: usize) -> String {
	rand::rng().sample_iter(Alphanumeric).take(len).map(char::from).collect()
}

/// Explicit session identity mapping capability.
///
/// Applications inject an implementation to persist the verified user into their session store
/// and restore it on subsequent requests; the strategy never touches session storage itself.
pub trait SessionCodec<U>: Send + Sync {
	/// Codec failure type.
	type Error: 'static + Send + Sync + StdError;

	/// Serializes a verified user into an opaque session token.
	fn serialize(&self, user: &U) -> Result<String, Self::Error>;

	/// Restores a user from a previously issued session token.
	fn deserialize(&self, token: &str) -> Result<U, Self::Error>;
}

/// JSON-backed [`SessionCodec`] suitable for applications without a user database, which stash
/// the entire profile in the session.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonSessionCodec;
impl<U> SessionCodec<U> for JsonSessionCodec
where
	U: Serialize + DeserializeOwned,
{
	type Error = serde_json::Error;

	fn serialize(&self, user: &U) -> Result<String, Self::Error> {
		serde_json::to_string(user)
	}

	fn deserialize(&self, token: &str) -> Result<U, Self::Error> {
		serde_json::from_str(token)
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::collections::HashMap;
	// self
	use super::*;
	use crate::config::StrategyConfig;

	fn resolved(callback: Option<&str>) -> ResolvedConfig {
		let mut config = StrategyConfig::new("client-id", "client-secret");

		if let Some(callback) = callback {
			config = config
				.callback_url(Url::parse(callback).expect("Callback URL should parse."));
		}

		config.resolve().expect("Config fixture should resolve successfully.")
	}

	#[test]
	fn authorize_url_carries_required_pairs() {
		let config = resolved(Some("https://app.example.com/auth/box/callback"));
		let session = build_session(&config, config.callback_url.clone());
		let pairs: HashMap<_, _> = session.authorize_url.query_pairs().into_owned().collect();

		assert_eq!(pairs.get("response_type"), Some(&"code".into()));
		assert_eq!(pairs.get("client_id"), Some(&"client-id".into()));
		assert_eq!(
			pairs.get("redirect_uri"),
			Some(&"https://app.example.com/auth/box/callback".into())
		);
		assert_eq!(pairs.get("state"), Some(&session.state));
		assert_eq!(session.state.len(), STATE_LEN);
	}

	#[test]
	fn authorize_url_omits_redirect_when_unset() {
		let config = resolved(None);
		let session = build_session(&config, None);
		let pairs: HashMap<_, _> = session.authorize_url.query_pairs().into_owned().collect();

		assert!(!pairs.contains_key("redirect_uri"));
		assert!(pairs.contains_key("state"));
	}

	#[test]
	fn state_validation_errors_on_mismatch() {
		let config = resolved(None);
		let session = build_session(&config, None);

		assert!(session.validate_state(session.state.as_str()).is_ok());

		let err = session.validate_state("other").expect_err("State mismatch should fail.");

		assert!(matches!(err, Error::InvalidGrant { .. }));
	}

	#[test]
	fn json_codec_round_trips_users() {
		#[derive(Debug, PartialEq, Serialize, Deserialize)]
		struct User {
			id: String,
			login: String,
		}

		let codec = JsonSessionCodec;
		let user = User { id: "42".into(), login: "jane@example.com".into() };
		let token =
			SessionCodec::serialize(&codec, &user).expect("User should serialize successfully.");
		let restored: User =
			SessionCodec::deserialize(&codec, &token).expect("Token should deserialize.");

		assert_eq!(restored, user);
		assert!(SessionCodec::<User>::deserialize(&codec, "not-json").is_err());
	}
}
