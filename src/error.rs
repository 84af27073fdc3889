//! Client-level error types shared across the gateway, account calls, and stores.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
///
/// Every failure is reported to the caller as a distinguishable outcome; none of them is
/// fatal to the process. Use [`Error::requires_login`] to decide whether the user must be
/// sent back to the login entry point.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Storage-layer failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration or request-construction problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS); no response was received.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// A success response carried a body that did not match the expected shape.
	#[error(transparent)]
	Decode(#[from] DecodeError),

	/// Authorization failed while another caller was already refreshing the session.
	///
	/// The caller should not retry on its own; the in-flight refresh decides the outcome.
	#[error("Authorization failed while a session refresh is already in progress.")]
	AuthorizationPending,
	/// The refresh token was rejected or could not be used; the session has been cleared.
	#[error("Session expired: {reason}.")]
	SessionExpired {
		/// Short description of why the refresh failed.
		reason: String,
	},
	/// No session is available to authenticate the request.
	#[error("No active session; log in first.")]
	Unauthenticated,
	/// Backend answered with a non-success status.
	#[error("Request failed with HTTP {status}: {detail}")]
	RequestFailed {
		/// HTTP status code returned by the backend.
		status: u16,
		/// Backend-provided detail message, or the HTTP status text.
		detail: String,
	},
	/// Client-side input validation failed before any request was made.
	#[error("Invalid {field}: {reason}.")]
	Validation {
		/// Name of the offending input field.
		field: &'static str,
		/// Human-readable explanation.
		reason: String,
	},
}
impl Error {
	/// Returns `true` when the caller must force a logout and navigate to login.
	pub fn requires_login(&self) -> bool {
		matches!(self, Self::SessionExpired { .. } | Self::Unauthenticated)
	}

	/// HTTP status associated with the failure, when the backend answered at all.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::RequestFailed { status, .. } => Some(*status),
			Self::Decode(e) => Some(e.status),
			_ => None,
		}
	}
}

/// Configuration and request-construction failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] ::http::Error),
	/// A token or header value contains bytes that are not valid in an HTTP header.
	#[error("Header value is invalid.")]
	InvalidHeader(#[from] ::http::header::InvalidHeaderValue),
	/// Request body could not be serialized to JSON.
	#[error("Request body could not be serialized.")]
	SerializeBody(#[source] serde_json::Error),
	/// Backend descriptor is invalid.
	#[error(transparent)]
	Descriptor(#[from] crate::backend::BackendDescriptorError),
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

/// Transport-level failures; no response was received.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the backend.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
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

/// Backend responded with JSON that could not be parsed into the expected type.
#[derive(Debug, ThisError)]
#[error("Backend returned malformed JSON (HTTP {status}).")]
pub struct DecodeError {
	/// Structured parsing failure, including the JSON path that failed.
	#[source]
	pub source: serde_path_to_error::Error<serde_json::Error>,
	/// HTTP status code of the response being decoded.
	pub status: u16,
}
