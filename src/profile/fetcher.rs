//! Profile fetcher: one authenticated GET, one parse, one normalization.

// self
use crate::{
	_prelude::*,
	error::ProfileError,
	http::{ProfileRequest, StrategyHttpClient},
	obs::{FlowKind, FlowSpan},
	profile::{
		normalizer,
		record::{NormalizedProfile, RawUserRecord},
	},
	token::TokenSecret,
};

/// Fetches the provider's "current user" endpoint and normalizes the response.
///
/// Stateless beyond its endpoint and transport handles; a single fetcher serves any number of
/// concurrent authentication attempts. No caching, no retries, no rate limiting.
pub struct ProfileFetcher<C>
where
	C: ?Sized + StrategyHttpClient,
{
	endpoint: Url,
	http_client: Arc<C>,
}
impl<C> ProfileFetcher<C>
where
	C: ?Sized + StrategyHttpClient,
{
	/// Creates a fetcher for the provided endpoint and transport.
	pub fn new(endpoint: Url, http_client: Arc<C>) -> Self {
		Self { endpoint, http_client }
	}

	/// Issues exactly one GET authenticated via the supplied access token and returns the
	/// normalized profile.
	///
	/// Transport failures map to [`ProfileError::Fetch`], non-success statuses to
	/// [`ProfileError::Endpoint`], and non-JSON bodies to [`ProfileError::Parse`]; the raw body
	/// stays attached to the parse failure for inspection.
	pub async fn fetch(&self, access_token: &str) -> Result<NormalizedProfile, ProfileError> {
		let span = FlowSpan::new(FlowKind::ProfileFetch, "fetch");
		let request = ProfileRequest {
			url: self.endpoint.clone(),
			access_token: TokenSecret::new(access_token),
		};
		let response = span
			.instrument(self.http_client.fetch_profile(request))
			.await
			.map_err(ProfileError::fetch)?;

		if !(200..300).contains(&response.status) {
			return Err(ProfileError::Endpoint { status: response.status, body: response.body });
		}

		let deserializer = &mut serde_json::Deserializer::from_str(&response.body);
		let raw: RawUserRecord =
			serde_path_to_error::deserialize(deserializer).map_err(|source| {
				ProfileError::Parse { source, status: response.status, body: response.body.clone() }
			})?;

		Ok(normalizer::normalize(raw, response.body))
	}
}
impl<C> Clone for ProfileFetcher<C>
where
	C: ?Sized + StrategyHttpClient,
{
	fn clone(&self) -> Self {
		Self { endpoint: self.endpoint.clone(), http_client: self.http_client.clone() }
	}
}
impl<C> Debug for ProfileFetcher<C>
where
	C: ?Sized + StrategyHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ProfileFetcher").field("endpoint", &self.endpoint).finish()
	}
}
