//! Token secrets and the token set handed to the verify hook.

// self
use crate::_prelude::*;

/// Redacted token secret wrapper keeping sensitive material out of logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSecret(String);
impl TokenSecret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner token value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for TokenSecret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("TokenSecret").field(&"<redacted>").finish()
	}
}
impl Display for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Tokens obtained from a successful exchange, owned by the caller's verify hook afterwards.
///
/// `expires_at` stays `None` when the provider omits `expires_in`; the strategy never caches
/// or refreshes tokens on its own, so expiry is advisory for the application.
#[derive(Clone, Serialize, Deserialize)]
pub struct TokenSet {
	/// Access token secret; callers must avoid logging it.
	pub access_token: TokenSecret,
	/// Refresh token secret, if the provider issued one.
	pub refresh_token: Option<TokenSecret>,
	/// Issued-at instant recorded from the provider response.
	pub issued_at: OffsetDateTime,
	/// Expiry instant derived from issued_at plus expires_in, when supplied.
	pub expires_at: Option<OffsetDateTime>,
}
impl TokenSet {
	/// Returns `true` if the set has expired at the provided instant.
	///
	/// Sets without an expiry instant never report themselves expired.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		self.expires_at.is_some_and(|expires_at| instant >= expires_at)
	}

	/// Convenience helper that checks expiry against the current UTC instant.
	pub fn is_expired(&self) -> bool {
		self.is_expired_at(OffsetDateTime::now_utc())
	}
}
impl Debug for TokenSet {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenSet")
			.field("access_token", &"<redacted>")
			.field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
			.field("issued_at", &self.issued_at)
			.field("expires_at", &self.expires_at)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros::datetime;
	// self
	use super::*;

	#[test]
	fn secret_formatters_redact() {
		let secret = TokenSecret::new("super-secret");

		assert_eq!(format!("{secret:?}"), "TokenSecret(\"<redacted>\")");
		assert_eq!(format!("{secret}"), "<redacted>");
	}

	#[test]
	fn expiry_helpers_respect_missing_expiry() {
		let issued = datetime!(2025-01-01 00:00 UTC);
		let set = TokenSet {
			access_token: TokenSecret::new("access"),
			refresh_token: None,
			issued_at: issued,
			expires_at: Some(issued + Duration::hours(1)),
		};

		assert!(!set.is_expired_at(issued + Duration::minutes(30)));
		assert!(set.is_expired_at(issued + Duration::hours(1)));

		let open_ended = TokenSet { expires_at: None, ..set };

		assert!(!open_ended.is_expired_at(issued + Duration::days(365)));
	}

	#[test]
	fn debug_redacts_both_secrets() {
		let set = TokenSet {
			access_token: TokenSecret::new("access-value"),
			refresh_token: Some(TokenSecret::new("refresh-value")),
			issued_at: OffsetDateTime::now_utc(),
			expires_at: None,
		};
		let rendered = format!("{set:?}");

		assert!(!rendered.contains("access-value"));
		assert!(!rendered.contains("refresh-value"));
	}
}
