//! Fetches and normalizes the Box profile for an existing access token.
//!
//! Requires `BOX_ACCESS_TOKEN`; credentials are only needed for token exchanges, so placeholder
//! values satisfy the configuration here.

// std
use std::{env, sync::Arc};
// crates.io
use color_eyre::Result;
// self
use oauth2_box::{
	config::StrategyConfig,
	profile::NormalizedProfile,
	strategy::{ReqwestStrategy, Verification, VerifyFuture, VerifyProfile},
	token::TokenSet,
};

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

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let access_token = env::var("BOX_ACCESS_TOKEN")?;
	let strategy = <ReqwestStrategy<NormalizedProfile>>::new(
		StrategyConfig::new("unused-client-id", "unused-client-secret"),
		Arc::new(ProfileIdentity),
	)?;
	let profile = strategy.fetch_profile(&access_token).await?;

	println!("Provider: {}.", profile.provider);
	println!("Id: {:?}.", profile.id);
	println!("Display name: {:?}.", profile.display_name);
	println!(
		"Name: {} / {} / {}.",
		profile.name.given_name, profile.name.middle_name, profile.name.family_name
	);
	println!("Login: {:?}.", profile.login);

	for email in &profile.emails {
		println!("Email: {:?}.", email.value);
	}
	for photo in &profile.photos {
		println!("Photo: {:?}.", photo.value);
	}

	println!("Raw body: {} bytes.", profile.raw.len());

	Ok(())
}
