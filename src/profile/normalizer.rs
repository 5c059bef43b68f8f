//! Pure normalization of raw provider records into [`NormalizedProfile`] values.

// self
use crate::{
	config::STRATEGY_NAME,
	profile::record::{HumanName, NormalizedProfile, ProfileEntry, RawUserRecord},
};

/// Normalizes a parsed provider record into the provider-agnostic profile shape.
///
/// Pure and deterministic: no I/O, and no failure mode for malformed-but-present fields. A
/// single-word display name populates both `given_name` and `family_name` with that word,
/// leaving `middle_name` empty.
pub fn normalize(raw: RawUserRecord, body: impl Into<String>) -> NormalizedProfile {
	let name = split_display_name(raw.name.as_deref());

	NormalizedProfile {
		provider: STRATEGY_NAME.into(),
		id: raw.id.clone(),
		display_name: raw.name.clone(),
		name,
		emails: vec![ProfileEntry::new(raw.login.clone())],
		photos: vec![ProfileEntry::new(raw.avatar_url.clone())],
		login: raw.login.clone(),
		raw: body.into(),
		parsed: raw,
	}
}

fn split_display_name(display_name: Option<&str>) -> HumanName {
	let tokens: Vec<&str> = display_name.map(str::split_whitespace).into_iter().flatten().collect();

	match tokens.as_slice() {
		[] => HumanName::default(),
		[only] => HumanName {
			given_name: (*only).into(),
			middle_name: String::new(),
			family_name: (*only).into(),
		},
		[given, middle @ .., family] => HumanName {
			given_name: (*given).into(),
			middle_name: middle.join(" "),
			family_name: (*family).into(),
		},
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn record(name: Option<&str>) -> RawUserRecord {
		RawUserRecord {
			id: Some("42".into()),
			name: name.map(Into::into),
			login: Some("jane@example.com".into()),
			avatar_url: None,
			extra: Default::default(),
		}
	}

	#[test]
	fn three_token_names_split_into_given_middle_family() {
		let profile = normalize(record(Some("A B C")), "{}");

		assert_eq!(profile.name.given_name, "A");
		assert_eq!(profile.name.middle_name, "B");
		assert_eq!(profile.name.family_name, "C");
	}

	#[test]
	fn two_token_names_leave_middle_empty() {
		let profile = normalize(record(Some("A B")), "{}");

		assert_eq!(profile.name.given_name, "A");
		assert_eq!(profile.name.middle_name, "");
		assert_eq!(profile.name.family_name, "B");
	}

	#[test]
	fn long_names_join_interior_tokens() {
		let profile = normalize(record(Some("A B C D")), "{}");

		assert_eq!(profile.name.given_name, "A");
		assert_eq!(profile.name.middle_name, "B C");
		assert_eq!(profile.name.family_name, "D");
	}

	#[test]
	fn single_token_names_fill_given_and_family() {
		let profile = normalize(record(Some("Madonna")), "{}");

		assert_eq!(profile.name.given_name, "Madonna");
		assert_eq!(profile.name.middle_name, "");
		assert_eq!(profile.name.family_name, "Madonna");
	}

	#[test]
	fn absent_names_degrade_to_empty_decomposition() {
		let profile = normalize(record(None), "{}");

		assert_eq!(profile.name, HumanName::default());
		assert!(profile.display_name.is_none());
	}

	#[test]
	fn emails_wrap_the_login_exactly_once() {
		let profile = normalize(record(Some("Jane Q Public")), "{}");

		assert_eq!(profile.emails.len(), 1);
		assert_eq!(profile.emails[0].value.as_deref(), Some("jane@example.com"));
	}

	#[test]
	fn photos_stay_present_without_an_avatar() {
		let profile = normalize(record(Some("Jane Q Public")), "{}");

		assert_eq!(profile.photos.len(), 1);
		assert!(profile.photos[0].value.is_none());
	}

	#[test]
	fn provider_literal_is_fixed() {
		let profile = normalize(RawUserRecord::default(), "{}");

		assert_eq!(profile.provider, STRATEGY_NAME);
	}

	#[test]
	fn normalization_is_deterministic() {
		let raw = RawUserRecord {
			avatar_url: Some("https://x/a.png".into()),
			..record(Some("Jane Q Public"))
		};
		let body = r#"{"id":"42","name":"Jane Q Public"}"#;

		assert_eq!(normalize(raw.clone(), body), normalize(raw, body));
	}

	#[test]
	fn full_scenario_matches_the_expected_shape() {
		let body = r#"{"id":"42","name":"Jane Q Public","login":"jane@example.com","avatar_url":"https://x/a.png"}"#;
		let raw: RawUserRecord =
			serde_json::from_str(body).expect("Scenario payload should deserialize.");
		let profile = normalize(raw.clone(), body);

		assert_eq!(profile.provider, "box");
		assert_eq!(profile.id.as_deref(), Some("42"));
		assert_eq!(profile.display_name.as_deref(), Some("Jane Q Public"));
		assert_eq!(profile.name.given_name, "Jane");
		assert_eq!(profile.name.middle_name, "Q");
		assert_eq!(profile.name.family_name, "Public");
		assert_eq!(profile.emails[0].value.as_deref(), Some("jane@example.com"));
		assert_eq!(profile.photos[0].value.as_deref(), Some("https://x/a.png"));
		assert_eq!(profile.login.as_deref(), Some("jane@example.com"));
		assert_eq!(profile.raw, body);
		assert_eq!(profile.parsed, raw);
	}
}
