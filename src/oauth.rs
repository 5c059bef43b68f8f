//! Internal facade over the generic OAuth client.
//!
//! The strategy holds and configures an `oauth2` [`BasicClient`] instead of extending one;
//! everything provider-specific (endpoints, client auth placement, error classification) is
//! injected here from the resolved configuration.

pub use oauth2;

// crates.io
use oauth2::{
	AuthType, AuthUrl, AuthorizationCode, ClientId, ClientSecret, EndpointNotSet, EndpointSet,
	HttpClientError, RedirectUrl, RefreshToken, RequestTokenError, TokenResponse, TokenUrl,
	basic::{BasicClient, BasicErrorResponse, BasicRequestTokenError},
};
// self
use crate::{
	_prelude::*,
	config::ResolvedConfig,
	error::{ConfigError, TransientError, TransportError},
	http::{ResponseMetadata, ResponseMetadataSlot, StrategyHttpClient},
	token::{TokenSecret, TokenSet},
};

type ConfiguredBasicClient =
	BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;
type FacadeTokenResponse = oauth2::basic::BasicTokenResponse;

/// Maps HTTP transport failures into strategy [`Error`] values.
pub trait TransportErrorMapper<E>
where
	Self: 'static + Send + Sync,
	E: 'static + Send + Sync + StdError,
{
	/// Converts an [`HttpClientError`] emitted by the transport into a strategy error.
	fn map_transport_error(
		&self,
		metadata: Option<&ResponseMetadata>,
		error: HttpClientError<E>,
	) -> Error;
}

/// Default mapper for reqwest-backed transports.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransportErrorMapper;
#[cfg(feature = "reqwest")]
impl TransportErrorMapper<ReqwestError> for ReqwestTransportErrorMapper {
	fn map_transport_error(
		&self,
		meta: Option<&ResponseMetadata>,
		err: HttpClientError<ReqwestError>,
	) -> Error {
		match err {
			HttpClientError::Reqwest(inner) => map_reqwest_error(meta, *inner),
			HttpClientError::Http(inner) => ConfigError::from(inner).into(),
			HttpClientError::Io(inner) => TransportError::Io(inner).into(),
			HttpClientError::Other(message) => map_generic_transport_error(meta, message),
			_ => map_unknown_transport_error(meta),
		}
	}
}

/// Token endpoint facade binding the `oauth2` client to the strategy's transport and errors.
pub(crate) struct TokenEndpoint<C, M>
where
	C: ?Sized + StrategyHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	oauth_client: ConfiguredBasicClient,
	http_client: Arc<C>,
	error_mapper: Arc<M>,
}
impl<C, M> TokenEndpoint<C, M>
where
	C: ?Sized + StrategyHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Builds the facade from a resolved configuration.
	///
	/// Client credentials are sent in the request body (`AuthType::RequestBody`), matching how
	/// Box's token endpoint expects confidential clients to authenticate.
	pub(crate) fn from_config(
		config: &ResolvedConfig,
		http_client: impl Into<Arc<C>>,
		error_mapper: impl Into<Arc<M>>,
	) -> Result<Self> {
		let auth_url = AuthUrl::new(config.endpoints.authorization.to_string())
			.map_err(|source| ConfigError::InvalidEndpoint { endpoint: "authorization", source })?;
		let token_url = TokenUrl::new(config.endpoints.token.to_string())
			.map_err(|source| ConfigError::InvalidEndpoint { endpoint: "token", source })?;
		let mut oauth_client = BasicClient::new(ClientId::new(config.client_id.clone()))
			.set_client_secret(ClientSecret::new(config.client_secret.clone()))
			.set_auth_uri(auth_url)
			.set_token_uri(token_url)
			.set_auth_type(AuthType::RequestBody);

		if let Some(callback) = config.callback_url.as_ref() {
			let redirect_url = RedirectUrl::new(callback.to_string())
				.map_err(|source| ConfigError::InvalidCallback { source })?;

			oauth_client = oauth_client.set_redirect_uri(redirect_url);
		}

		Ok(Self {
			oauth_client,
			http_client: http_client.into(),
			error_mapper: error_mapper.into(),
		})
	}

	/// Exchanges an authorization code for a token set.
	pub(crate) async fn exchange_code(&self, code: &str) -> Result<TokenSet> {
		let meta = ResponseMetadataSlot::default();
		let handle = self.http_client.token_handle(meta.clone());
		let response = self
			.oauth_client
			.exchange_code(AuthorizationCode::new(code.to_owned()))
			.request_async(&handle)
			.await
			.map_err(|err| map_request_error(meta.take(), err, self.error_mapper.as_ref()))?;

		Ok(map_token_response(response))
	}

	/// Exchanges a refresh token for a renewed token set.
	pub(crate) async fn exchange_refresh(&self, refresh_token: &str) -> Result<TokenSet> {
		let meta = ResponseMetadataSlot::default();
		let handle = self.http_client.token_handle(meta.clone());
		let refresh_secret = RefreshToken::new(refresh_token.to_owned());
		let response = self
			.oauth_client
			.exchange_refresh_token(&refresh_secret)
			.request_async(&handle)
			.await
			.map_err(|err| map_request_error(meta.take(), err, self.error_mapper.as_ref()))?;

		Ok(map_token_response(response))
	}
}

fn map_token_response(response: FacadeTokenResponse) -> TokenSet {
	let issued_at = OffsetDateTime::now_utc();
	// Box always supplies expires_in; tolerate its absence rather than failing the exchange.
	let expires_at = response
		.expires_in()
		.and_then(|expires_in| i64::try_from(expires_in.as_secs()).ok())
		.map(|secs| issued_at + Duration::seconds(secs));

	TokenSet {
		access_token: TokenSecret::new(response.access_token().secret().to_owned()),
		refresh_token: response
			.refresh_token()
			.map(|token| TokenSecret::new(token.secret().to_owned())),
		issued_at,
		expires_at,
	}
}

fn map_request_error<E, M>(
	meta: Option<ResponseMetadata>,
	err: BasicRequestTokenError<HttpClientError<E>>,
	mapper: &M,
) -> Error
where
	E: 'static + Send + Sync + StdError,
	M: ?Sized + TransportErrorMapper<E>,
{
	let meta_ref = meta.as_ref();

	match err {
		RequestTokenError::ServerResponse(response) =>
			map_server_response_error(response, meta_ref),
		RequestTokenError::Request(error) => mapper.map_transport_error(meta_ref, error),
		RequestTokenError::Parse(error, _body) =>
			TransientError::TokenResponseParse { source: error, status: meta_status(meta_ref) }
				.into(),
		RequestTokenError::Other(message) => TransientError::TokenEndpoint {
			message: format!("Token endpoint returned an unexpected response: {message}."),
			status: meta_status(meta_ref),
			retry_after: meta_retry_after(meta_ref),
		}
		.into(),
	}
}

fn map_server_response_error(
	response: BasicErrorResponse,
	meta: Option<&ResponseMetadata>,
) -> Error {
	let oauth_error = response.error().as_ref();
	let message = if let Some(description) = response.error_description() {
		format!("Token endpoint returned an OAuth error: {description}.")
	} else {
		format!("Token endpoint returned an OAuth error: {oauth_error}.")
	};

	match classify_token_error(
		Some(oauth_error),
		response.error_description().map(String::as_str),
		meta_status(meta),
	) {
		TokenErrorKind::InvalidGrant => Error::InvalidGrant { reason: message },
		TokenErrorKind::InvalidClient => Error::InvalidClient { reason: message },
		TokenErrorKind::Transient => TransientError::TokenEndpoint {
			message,
			status: meta_status(meta),
			retry_after: meta_retry_after(meta),
		}
		.into(),
	}
}

/// Canonical token endpoint error categories after classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TokenErrorKind {
	InvalidGrant,
	InvalidClient,
	Transient,
}

/// Applies RFC-guided heuristics: structured OAuth fields first, then the HTTP status code.
fn classify_token_error(
	oauth_error: Option<&str>,
	error_description: Option<&str>,
	status: Option<u16>,
) -> TokenErrorKind {
	if let Some(kind) = oauth_error
		.and_then(match_exact_value)
		.or_else(|| error_description.and_then(match_exact_value))
	{
		return kind;
	}

	classify_status(status)
}

fn match_exact_value(value: &str) -> Option<TokenErrorKind> {
	if value.eq_ignore_ascii_case("invalid_grant") || value.eq_ignore_ascii_case("access_denied") {
		Some(TokenErrorKind::InvalidGrant)
	} else if value.eq_ignore_ascii_case("invalid_client")
		|| value.eq_ignore_ascii_case("unauthorized_client")
	{
		Some(TokenErrorKind::InvalidClient)
	} else if value.eq_ignore_ascii_case("temporarily_unavailable")
		|| value.eq_ignore_ascii_case("server_error")
	{
		Some(TokenErrorKind::Transient)
	} else {
		None
	}
}

fn classify_status(status: Option<u16>) -> TokenErrorKind {
	match status {
		Some(400 | 404 | 410) => TokenErrorKind::InvalidGrant,
		Some(401) => TokenErrorKind::InvalidClient,
		_ => TokenErrorKind::Transient,
	}
}

#[cfg(feature = "reqwest")]
fn map_reqwest_error(meta: Option<&ResponseMetadata>, err: ReqwestError) -> Error {
	if err.is_builder() {
		return ConfigError::from(err).into();
	}
	if err.is_timeout() {
		return TransientError::TokenEndpoint {
			message: "Request timed out while calling the token endpoint.".into(),
			status: meta_status(meta).or_else(|| err.status().map(|code| code.as_u16())),
			retry_after: meta_retry_after(meta),
		}
		.into();
	}

	TransportError::from(err).into()
}

fn map_generic_transport_error(meta: Option<&ResponseMetadata>, message: impl Display) -> Error {
	TransientError::TokenEndpoint {
		message: format!("HTTP client error occurred while calling the token endpoint: {message}."),
		status: meta_status(meta),
		retry_after: meta_retry_after(meta),
	}
	.into()
}

fn map_unknown_transport_error(meta: Option<&ResponseMetadata>) -> Error {
	TransientError::TokenEndpoint {
		message: "HTTP client error occurred while calling the token endpoint.".into(),
		status: meta_status(meta),
		retry_after: meta_retry_after(meta),
	}
	.into()
}

fn meta_status(meta: Option<&ResponseMetadata>) -> Option<u16> {
	meta.and_then(|value| value.status)
}

fn meta_retry_after(meta: Option<&ResponseMetadata>) -> Option<Duration> {
	meta.and_then(|value| value.retry_after)
}
