//! Strategy-level error types shared across configuration, token exchange, and profile fetching.

// self
use crate::_prelude::*;

/// Strategy-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical strategy error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Profile endpoint failure (transport, status, or parse).
	#[error(transparent)]
	Profile(#[from] ProfileError),
	/// Temporary upstream failure; retry with backoff.
	#[error(transparent)]
	Transient(#[from] TransientError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// Provider rejected the grant (e.g., bad code or mismatched state).
	#[error("Provider rejected the grant: {reason}.")]
	InvalidGrant {
		/// Provider- or strategy-supplied reason string.
		reason: String,
	},
	/// Client authentication failed or credentials are malformed.
	#[error("Client authentication failed: {reason}.")]
	InvalidClient {
		/// Provider- or strategy-supplied reason string.
		reason: String,
	},
	/// Application verify hook reported an unrecoverable failure.
	#[error("Verification failed.")]
	Verification {
		/// Application-supplied verification failure.
		#[source]
		source: BoxError,
	},
}
impl Error {
	/// Wraps an application verification failure.
	pub fn verification(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Verification { source: Box::new(src) }
	}
}

/// Configuration and validation failures raised at strategy construction time.
///
/// These surface synchronously, before any network activity occurs.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Client identifier was missing or empty.
	#[error("Client identifier is required and cannot be empty.")]
	MissingClientId,
	/// Client secret was missing or empty.
	#[error("Client secret is required and cannot be empty.")]
	MissingClientSecret,
	/// An endpoint override could not be parsed as a URL.
	#[error("The {endpoint} endpoint URL is invalid.")]
	InvalidEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Endpoints must use HTTPS.
	#[error("The {endpoint} endpoint must use HTTPS: {url}.")]
	InsecureEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// Callback URL cannot be parsed by the OAuth client.
	#[error("Callback URL is invalid.")]
	InvalidCallback {
		/// Underlying parsing failure.
		#[source]
		source: oauth2::url::ParseError,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Failures raised while fetching or decoding the provider's user profile.
///
/// The variants mirror the fetch/parse split of the profile pipeline: [`Fetch`](Self::Fetch) and
/// [`Endpoint`](Self::Endpoint) are transport-class failures while [`Parse`](Self::Parse) means
/// the endpoint answered with a body that is not valid JSON. Malformed-but-parseable profile
/// data is never an error; the normalizer degrades field by field instead.
#[derive(Debug, ThisError)]
pub enum ProfileError {
	/// Transport-level failure reaching the profile endpoint.
	#[error("Failed to fetch the user profile.")]
	Fetch {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Profile endpoint answered with a non-success status.
	#[error("Profile endpoint returned HTTP {status}.")]
	Endpoint {
		/// HTTP status code returned by the endpoint.
		status: u16,
		/// Response body, preserved for inspection.
		body: String,
	},
	/// Profile endpoint returned a body that is not valid JSON.
	#[error("Profile endpoint returned malformed JSON.")]
	Parse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the response.
		status: u16,
		/// Raw response body; the failure path keeps it for inspection.
		body: String,
	},
}
impl ProfileError {
	/// Wraps a transport-specific network error.
	pub fn fetch(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Fetch { source: Box::new(src) }
	}
}

/// Temporary failure variants (safe to retry by the caller; this crate never retries).
#[derive(Debug, ThisError)]
pub enum TransientError {
	/// Token endpoint returned an unexpected but non-fatal response.
	#[error("Token endpoint returned an unexpected response: {message}.")]
	TokenEndpoint {
		/// Provider- or strategy-supplied message summarizing the failure.
		message: String,
		/// HTTP status code, when available.
		status: Option<u16>,
		/// Retry-After hint from upstream, if supplied.
		retry_after: Option<Duration>,
	},
	/// Token endpoint responded with malformed JSON that could not be parsed.
	#[error("Token endpoint returned malformed JSON.")]
	TokenResponseParse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the token endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the token endpoint.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
