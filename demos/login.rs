//! Walks through the full Box login leg on the command line: print the authorize URL, paste the
//! `code` and `state` from the redirect back in, then exchange and verify.
//!
//! Requires `BOX_CLIENT_ID` and `BOX_CLIENT_SECRET`; `BOX_CALLBACK_URL` is optional and defaults
//! to a local loopback handler.

// std
use std::{
	env,
	io::{BufRead, Write, stdin, stdout},
	sync::Arc,
};
// crates.io
use color_eyre::Result;
use url::Url;
// self
use oauth2_box::{
	config::StrategyConfig,
	profile::NormalizedProfile,
	session::{JsonSessionCodec, SessionCodec},
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
		// No user database in this walkthrough; the normalized profile is the user.
		Box::pin(async move { Ok(Verification::Granted(profile)) })
	}
}

fn prompt(label: &str) -> Result<String> {
	print!("{label}: ");
	stdout().flush()?;

	let mut line = String::new();

	stdin().lock().read_line(&mut line)?;

	Ok(line.trim().to_owned())
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let client_id = env::var("BOX_CLIENT_ID")?;
	let client_secret = env::var("BOX_CLIENT_SECRET")?;
	let callback_url = env::var("BOX_CALLBACK_URL")
		.unwrap_or_else(|_| "http://127.0.0.1:3000/auth/box/callback".into());
	let strategy = <ReqwestStrategy<NormalizedProfile>>::new(
		StrategyConfig::new(client_id, client_secret).callback_url(Url::parse(&callback_url)?),
		Arc::new(ProfileIdentity),
	)?;
	let session = strategy.start_authorization();

	println!("Send your user to {}.", &session.authorize_url);
	println!("After approving, Box redirects to {callback_url} with `code` and `state`.");

	let code = prompt("code")?;
	let returned_state = prompt("state")?;

	match strategy.authenticate(&session, &returned_state, &code).await? {
		Verification::Granted(authenticated) => {
			let profile = &authenticated.user;

			println!("Authenticated as {} ({:?}).", profile.provider, profile.display_name);
			println!(
				"Name: {} / {} / {}.",
				profile.name.given_name, profile.name.middle_name, profile.name.family_name
			);

			// Stash the whole profile in the session, as applications without a user
			// database would.
			let codec = JsonSessionCodec;
			let token = SessionCodec::serialize(&codec, profile)?;
			let restored: NormalizedProfile = SessionCodec::deserialize(&codec, &token)?;

			println!("Session token round-trips {} bytes.", token.len());
			println!("Restored session user id: {:?}.", restored.id);
		},
		Verification::Denied => eprintln!("The verify hook rejected this login."),
	}

	Ok(())
}
