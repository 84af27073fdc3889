//! Transport primitives for backend calls.
//!
//! The module exposes [`ApiHttpClient`], the client's only dependency on an HTTP stack,
//! together with [`ApiRequest`], the reusable description of one logical request. The
//! gateway turns an [`ApiRequest`] into a fresh [`HttpRequest`] for every attempt so a
//! retry can carry a different bearer token than the original call.

// crates.io
use ::http::{
	HeaderMap, HeaderValue, Method, StatusCode,
	header::{AUTHORIZATION, CONTENT_TYPE, HeaderName},
};
#[cfg(feature = "reqwest")] use std::ops::Deref;
// self
use crate::{_prelude::*, auth::TokenSecret, error::ConfigError};

/// Outgoing request handed to an [`ApiHttpClient`].
pub type HttpRequest = ::http::Request<Vec<u8>>;
/// Fully buffered response returned by an [`ApiHttpClient`].
pub type HttpResponse = ::http::Response<Vec<u8>>;
/// Boxed future returned by [`ApiHttpClient::execute`].
pub type HttpFuture<'a, E> = Pin<Box<dyn Future<Output = Result<HttpResponse, E>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of executing backend calls.
///
/// Implementations must be `Send + Sync + 'static` so one transport can be shared by
/// several clients behind an `Arc`. A transport only moves bytes: it must return every
/// response it receives, whatever the status, and report an error only when no response
/// arrived at all.
pub trait ApiHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Sends `request` and buffers the full response body.
	fn execute(&self, request: HttpRequest) -> HttpFuture<'_, Self::TransportError>;
}

/// Description of one logical backend request, independent of the token used to send it.
#[derive(Clone, Debug)]
pub struct ApiRequest {
	/// HTTP method.
	pub method: Method,
	/// Absolute target URL.
	pub url: Url,
	/// Caller-supplied headers; `Authorization` is always overwritten per attempt.
	pub headers: HeaderMap,
	/// Optional request body.
	pub body: Option<Vec<u8>>,
}
impl ApiRequest {
	/// Creates a request with no headers and no body.
	pub fn new(method: Method, url: Url) -> Self {
		Self { method, url, headers: HeaderMap::new(), body: None }
	}

	/// Shorthand for a `GET` request.
	pub fn get(url: Url) -> Self {
		Self::new(Method::GET, url)
	}

	/// Shorthand for a `POST` request.
	pub fn post(url: Url) -> Self {
		Self::new(Method::POST, url)
	}

	/// Shorthand for a `PATCH` request.
	pub fn patch(url: Url) -> Self {
		Self::new(Method::PATCH, url)
	}

	/// Shorthand for a `PUT` request.
	pub fn put(url: Url) -> Self {
		Self::new(Method::PUT, url)
	}

	/// Adds or replaces a header.
	pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
		self.headers.insert(name, value);

		self
	}

	/// Sets a raw body.
	pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
		self.body = Some(body.into());

		self
	}

	/// Serializes `body` as JSON and sets the matching content type.
	pub fn json<T>(self, body: &T) -> Result<Self>
	where
		T: ?Sized + Serialize,
	{
		let bytes = serde_json::to_vec(body).map_err(ConfigError::SerializeBody)?;

		Ok(self.header(CONTENT_TYPE, HeaderValue::from_static("application/json")).body(bytes))
	}

	/// Sets a `multipart/form-data` body holding a single file part named `field`.
	///
	/// The body is fully buffered so every attempt, including a retry, resends it unchanged.
	pub fn multipart_file(
		self,
		field: &str,
		file_name: &str,
		content_type: &str,
		bytes: &[u8],
	) -> Result<Self> {
		let boundary = multipart_boundary(bytes);
		let content_type_header = HeaderValue::from_str(&format!(
			"multipart/form-data; boundary={boundary}"
		))
		.map_err(ConfigError::from)?;
		let mut body = format!(
			"--{boundary}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
			 Content-Type: {content_type}\r\n\r\n",
			quote_disposition(field),
			quote_disposition(file_name),
		)
		.into_bytes();

		body.extend_from_slice(bytes);
		body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

		Ok(self.header(CONTENT_TYPE, content_type_header).body(body))
	}

	/// Builds the concrete HTTP request for one attempt, optionally with a bearer token.
	pub fn to_http(&self, bearer: Option<&TokenSecret>) -> Result<HttpRequest> {
		let mut builder =
			::http::Request::builder().method(self.method.clone()).uri(self.url.as_str());

		if let Some(headers) = builder.headers_mut() {
			headers.extend(self.headers.clone());

			match bearer {
				Some(token) => {
					headers.insert(AUTHORIZATION, bearer_header(token)?);
				},
				None => {
					headers.remove(AUTHORIZATION);
				},
			}
		}

		builder.body(self.body.clone().unwrap_or_default()).map_err(|e| ConfigError::from(e).into())
	}
}

/// Returns `true` when the response signals a missing, expired, or invalid access token.
pub fn is_unauthorized(response: &HttpResponse) -> bool {
	response.status() == StatusCode::UNAUTHORIZED
}

// Picks a boundary that does not occur inside the payload.
fn multipart_boundary(payload: &[u8]) -> String {
	let seed = OffsetDateTime::now_utc().unix_timestamp_nanos().unsigned_abs();

	(0_u128..)
		.map(|n| format!("levelup-{:032x}", seed.wrapping_add(n)))
		.find(|candidate| !payload.windows(candidate.len()).any(|w| w == candidate.as_bytes()))
		.unwrap_or_default()
}

fn quote_disposition(value: &str) -> String {
	value.replace(['"', '\r', '\n'], "_")
}

fn bearer_header(token: &TokenSecret) -> Result<HeaderValue> {
	let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose()))
		.map_err(ConfigError::from)?;

	value.set_sensitive(true);

	Ok(value)
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ApiHttpClient for ReqwestHttpClient {
	type TransportError = ReqwestError;

	fn execute(&self, request: HttpRequest) -> HttpFuture<'_, Self::TransportError> {
		let client = self.0.clone();

		Box::pin(async move {
			let response = client.execute(reqwest::Request::try_from(request)?).await?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let mut response_new = HttpResponse::new(response.bytes().await?.to_vec());

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}
