//! Strategy composition root: configuration resolution, the OAuth client facade, the profile
//! fetcher, and the application verify hook wired together.
//!
//! The strategy holds no per-attempt state; everything scoped to one browser session lives in
//! an [`AuthorizationSession`], so a single instance is safe to share across concurrent
//! authentication attempts.

// self
use crate::{
	_prelude::*,
	config::{ResolvedConfig, StrategyConfig},
	error::ProfileError,
	http::StrategyHttpClient,
	oauth::{TokenEndpoint, TransportErrorMapper},
	obs::{FlowKind, FlowSpan},
	profile::{NormalizedProfile, ProfileFetcher},
	session::{self, AuthorizationSession},
	token::TokenSet,
};
#[cfg(feature = "reqwest")]
use crate::{http::ReqwestHttpClient, oauth::ReqwestTransportErrorMapper};

#[cfg(feature = "reqwest")]
/// Strategy specialized for the crate's default reqwest transport stack.
pub type ReqwestStrategy<U> = Strategy<U, ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Boxed future returned by [`VerifyProfile`] implementations.
pub type VerifyFuture<'a, U> = Pin<Box<dyn Future<Output = Result<Verification<U>>> + 'a + Send>>;

/// Application-supplied hook mapping obtained tokens plus the normalized profile to an
/// application-defined identity.
///
/// Each authentication attempt resolves the hook exactly once: `Ok(Granted(user))` accepts the
/// login, `Ok(Denied)` signals invalid credentials, and `Err` signals an unrecoverable
/// verification failure (wrap application errors with [`Error::verification`]).
pub trait VerifyProfile<U>: Send + Sync {
	/// Resolves the authenticated identity for one successful token exchange.
	fn verify<'a>(
		&'a self,
		tokens: &'a TokenSet,
		profile: NormalizedProfile,
	) -> VerifyFuture<'a, U>;
}

/// Outcome of the application verify hook.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verification<U> {
	/// Credentials mapped to an application identity.
	Granted(U),
	/// Credentials are valid OAuth-wise but the application rejected them.
	Denied,
}

/// Verified identity together with the tokens that produced it.
#[derive(Clone, Debug)]
pub struct Authenticated<U> {
	/// Application identity resolved by the verify hook.
	pub user: U,
	/// Tokens obtained from the exchange; ownership now rests with the application.
	pub tokens: TokenSet,
}

/// Box authentication strategy delegating the OAuth 2.0 handshake to the configured client.
///
/// Composes the resolved configuration, the transport, and the verify hook; exposes nothing
/// beyond that composition. The strategy participates in the external delegation state machine
/// only between token exchange and profile fetch.
pub struct Strategy<U, C, M>
where
	C: ?Sized + StrategyHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Resolved configuration; defaults were filled exactly once at construction.
	pub config: ResolvedConfig,
	/// HTTP client wrapper used for every outbound provider request.
	pub http_client: Arc<C>,
	/// Mapper applied to transport-layer errors before surfacing them to callers.
	pub transport_mapper: Arc<M>,
	/// Application verify hook resolving profiles to identities.
	pub verify: Arc<dyn VerifyProfile<U>>,
}
impl<U, C, M> Strategy<U, C, M>
where
	C: ?Sized + StrategyHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a strategy that reuses the caller-provided transport + mapper pair.
	///
	/// Configuration resolves synchronously here, so missing credentials fail before any
	/// network activity occurs.
	pub fn with_http_client(
		config: StrategyConfig,
		verify: Arc<dyn VerifyProfile<U>>,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Result<Self> {
		Ok(Self {
			config: config.resolve()?,
			http_client: http_client.into(),
			transport_mapper: mapper.into(),
			verify,
		})
	}

	/// Name under which this integration registers with the host authentication framework.
	pub fn name(&self) -> &str {
		&self.config.name
	}

	/// Issues a fresh authorization session using the configured callback URL.
	pub fn start_authorization(&self) -> AuthorizationSession {
		let _guard = FlowSpan::new(FlowKind::Authorize, "start_authorization").entered();

		session::build_session(&self.config, self.config.callback_url.clone())
	}

	/// Issues a fresh authorization session redirecting back to `redirect_uri`.
	pub fn start_authorization_with_redirect(&self, redirect_uri: Url) -> AuthorizationSession {
		let _guard = FlowSpan::new(FlowKind::Authorize, "start_authorization").entered();

		session::build_session(&self.config, Some(redirect_uri))
	}

	/// Exchanges an authorization code for a token set.
	pub async fn exchange_code(&self, code: &str) -> Result<TokenSet> {
		let span = FlowSpan::new(FlowKind::TokenExchange, "exchange_code");
		let facade = self.token_endpoint()?;

		span.instrument(facade.exchange_code(code)).await
	}

	/// Exchanges a refresh token for a renewed token set.
	pub async fn exchange_refresh(&self, refresh_token: &str) -> Result<TokenSet> {
		let span = FlowSpan::new(FlowKind::TokenExchange, "exchange_refresh");
		let facade = self.token_endpoint()?;

		span.instrument(facade.exchange_refresh(refresh_token)).await
	}

	/// Fetches and normalizes the provider profile for an access token.
	pub async fn fetch_profile(&self, access_token: &str) -> Result<NormalizedProfile, ProfileError> {
		self.profile_fetcher().fetch(access_token).await
	}

	/// Runs the full callback leg: state validation, code exchange, profile fetch, and the
	/// application verify hook.
	///
	/// Errors from any stage propagate unchanged; a [`Verification::Denied`] outcome is not an
	/// error.
	pub async fn authenticate(
		&self,
		session: &AuthorizationSession,
		returned_state: &str,
		code: &str,
	) -> Result<Verification<Authenticated<U>>> {
		session.validate_state(returned_state)?;

		let tokens = self.exchange_code(code).await?;
		let profile = self.fetch_profile(tokens.access_token.expose()).await?;

		match self.verify.verify(&tokens, profile).await? {
			Verification::Granted(user) => Ok(Verification::Granted(Authenticated { user, tokens })),
			Verification::Denied => Ok(Verification::Denied),
		}
	}

	fn token_endpoint(&self) -> Result<TokenEndpoint<C, M>> {
		TokenEndpoint::from_config(
			&self.config,
			self.http_client.clone(),
			self.transport_mapper.clone(),
		)
	}

	fn profile_fetcher(&self) -> ProfileFetcher<C> {
		ProfileFetcher::new(self.config.endpoints.profile.clone(), self.http_client.clone())
	}
}
#[cfg(feature = "reqwest")]
impl<U> Strategy<U, ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Creates a new strategy for the provided configuration and verify hook.
	///
	/// The strategy provisions its own reqwest-backed transport so callers do not need to pass
	/// HTTP handles explicitly.
	pub fn new(config: StrategyConfig, verify: Arc<dyn VerifyProfile<U>>) -> Result<Self> {
		Self::with_http_client(
			config,
			verify,
			ReqwestHttpClient::default(),
			Arc::new(ReqwestTransportErrorMapper),
		)
	}
}
impl<U, C, M> Clone for Strategy<U, C, M>
where
	C: ?Sized + StrategyHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn clone(&self) -> Self {
		Self {
			config: self.config.clone(),
			http_client: self.http_client.clone(),
			transport_mapper: self.transport_mapper.clone(),
			verify: self.verify.clone(),
		}
	}
}
impl<U, C, M> Debug for Strategy<U, C, M>
where
	C: ?Sized + StrategyHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Strategy")
			.field("name", &self.config.name)
			.field("client_id", &self.config.client_id)
			.field("endpoints", &self.config.endpoints)
			.finish()
	}
}
