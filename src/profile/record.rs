//! Profile data structures: the raw provider record and its normalized counterpart.

// self
use crate::_prelude::*;

/// Deserialized Box user object.
///
/// Every field is optional so malformed-but-parseable payloads degrade gracefully instead of
/// failing the fetch; the provider guarantees `id` uniqueness, this crate enforces nothing.
/// Unknown provider fields are preserved in `extra` for advanced consumers.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawUserRecord {
	/// Provider-unique identifier.
	pub id: Option<String>,
	/// Full display name, space-separated ("given [middle...] family").
	pub name: Option<String>,
	/// Provider account identifier, email-like.
	pub login: Option<String>,
	/// Avatar image URI, when the account has one.
	pub avatar_url: Option<String>,
	/// Remaining provider fields, passed through untouched.
	#[serde(flatten)]
	pub extra: BTreeMap<String, serde_json::Value>,
}

/// Structured decomposition of a display name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HumanName {
	/// First whitespace-separated token of the display name.
	pub given_name: String,
	/// Interior tokens joined by single spaces; empty for names of fewer than three tokens.
	pub middle_name: String,
	/// Last whitespace-separated token of the display name.
	pub family_name: String,
}

/// Single-valued entry used by the `emails` and `photos` sequences.
///
/// The wrapper exists even when the underlying value is absent, so consumers can rely on the
/// sequences always holding exactly one element.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileEntry {
	/// Wrapped value, absent when the provider omitted the source field.
	pub value: Option<String>,
}
impl ProfileEntry {
	/// Wraps an optional value.
	pub fn new(value: Option<String>) -> Self {
		Self { value }
	}
}

/// Provider-agnostic profile produced from a [`RawUserRecord`].
///
/// Constructed fresh on every successful fetch and never mutated or cached afterwards;
/// ownership passes straight to the application's verify hook.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NormalizedProfile {
	/// Constant literal identifying this integration (always `"box"`).
	pub provider: String,
	/// Provider-unique identifier, copied verbatim.
	pub id: Option<String>,
	/// Full display name, copied verbatim.
	pub display_name: Option<String>,
	/// Structured decomposition of `display_name`.
	pub name: HumanName,
	/// One-element sequence wrapping the provider login.
	pub emails: Vec<ProfileEntry>,
	/// One-element sequence wrapping the avatar URI, present even when the URI is absent.
	pub photos: Vec<ProfileEntry>,
	/// Raw provider login string, preserved for provider-specific consumers.
	pub login: Option<String>,
	/// Unparsed response body, preserved for audit/debugging.
	pub raw: String,
	/// Parsed provider record, preserved for advanced consumers.
	pub parsed: RawUserRecord,
}
