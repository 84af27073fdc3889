//! Authenticated request gateway: bearer attachment, single-flight refresh, one retry.
//!
//! [`Client::send`] issues a protected request with the current access token. On `401` it
//! takes the session's refresh guard without waiting. A caller that finds the guard held
//! fails fast with [`Error::AuthorizationPending`] and lets the in-flight refresh decide the
//! session's fate. The guard holder refreshes (or reuses a token another caller just
//! obtained) and retries the original request exactly once.

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	backend::Endpoint,
	client::Client,
	error::{DecodeError, TransportError},
	http::{ApiHttpClient, ApiRequest, HttpRequest, HttpResponse, is_unauthorized},
	model::{RefreshRequest, RefreshResponse, response_detail},
	obs::{self, Operation, Outcome, RequestSpan},
	session::RefreshGuard,
};

impl<C> Client<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Sends a protected request, refreshing the access token and retrying once on `401`.
	///
	/// Non-success responses become [`Error::RequestFailed`], including a retry that is
	/// still unauthorized. A failed refresh clears the session and yields
	/// [`Error::SessionExpired`].
	pub async fn send(&self, request: ApiRequest) -> Result<HttpResponse> {
		const OPERATION: Operation = Operation::Protected;

		let span = RequestSpan::new(OPERATION, "send");

		span.record_user(self.current_user_id());
		obs::record_outcome(OPERATION, Outcome::Attempt);

		let result = span.instrument(self.send_with_retry(&request)).await;

		obs::record_outcome(OPERATION, Outcome::of(&result));

		result
	}

	/// Sends a protected request and decodes the JSON success body into `T`.
	pub async fn send_json<T>(&self, request: ApiRequest) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let response = self.send(request).await?;

		decode_json(&response)
	}

	/// Exchanges the stored refresh token for a new access token.
	///
	/// Fails with [`Error::AuthorizationPending`] when another caller is already refreshing.
	/// Any refresh failure clears the session and yields [`Error::SessionExpired`].
	pub async fn refresh_access_token(&self) -> Result<TokenSecret> {
		let Some(guard) = self.session.try_begin_refresh() else {
			self.metrics.record_pending();

			return Err(Error::AuthorizationPending);
		};

		self.refresh_locked(&guard).await
	}

	async fn send_with_retry(&self, request: &ApiRequest) -> Result<HttpResponse> {
		let token = self.session.access_token().ok_or(Error::Unauthenticated)?;

		self.metrics.record_attempt();

		let response = self.dispatch(request.to_http(Some(&token))?).await?;

		if !is_unauthorized(&response) {
			return ensure_success(response);
		}

		let fresh = {
			let Some(guard) = self.session.try_begin_refresh() else {
				self.metrics.record_pending();

				return Err(Error::AuthorizationPending);
			};

			match self.session.access_token() {
				// Someone else refreshed between our attempt and taking the guard.
				Some(current) if current != token => current,
				_ => self.refresh_locked(&guard).await?,
			}
		};

		if !self.session.is_active() {
			return Err(Error::SessionExpired { reason: "session ended before the retry".into() });
		}

		self.metrics.record_retry();

		let retried = self.dispatch(request.to_http(Some(&fresh))?).await?;

		ensure_success(retried)
	}

	async fn refresh_locked(&self, _guard: &RefreshGuard<'_>) -> Result<TokenSecret> {
		const OPERATION: Operation = Operation::Refresh;

		let span = RequestSpan::new(OPERATION, "refresh_locked");

		obs::record_outcome(OPERATION, Outcome::Attempt);

		let result = span
			.instrument(async {
				let Some(refresh) = self.session.refresh_token() else {
					return self.expire("no refresh token is stored".into()).await;
				};

				self.metrics.record_refresh();

				match self.exchange_refresh(&refresh).await {
					Ok(body) => {
						let session = self.session.rotate(body.access, body.refresh).await?;

						obs::session_event(OPERATION, "access token refreshed");

						Ok(session.access)
					},
					Err(e) => self.expire(e.to_string()).await,
				}
			})
			.await;

		obs::record_outcome(OPERATION, Outcome::of(&result));

		result
	}

	async fn exchange_refresh(&self, refresh: &TokenSecret) -> Result<RefreshResponse> {
		let request = ApiRequest::post(self.descriptor.endpoint(Endpoint::TokenRefresh))
			.json(&RefreshRequest { refresh: refresh.expose() })?;
		let response = ensure_success(self.dispatch(request.to_http(None)?).await?)?;

		decode_json(&response)
	}

	async fn expire<T>(&self, reason: String) -> Result<T> {
		self.metrics.record_expired();

		obs::session_warning(Operation::Refresh, "session expired", &reason);

		if let Err(e) = self.session.invalidate().await {
			obs::session_warning(Operation::Refresh, "clearing the stored session failed", &e);
		}

		Err(Error::SessionExpired { reason })
	}

	/// Hands one request to the transport, mapping transport failures.
	pub(crate) async fn dispatch(&self, request: HttpRequest) -> Result<HttpResponse> {
		self.http_client.execute(request).await.map_err(|e| TransportError::network(e).into())
	}
}

/// Passes success responses through; anything else becomes [`Error::RequestFailed`].
pub(crate) fn ensure_success(response: HttpResponse) -> Result<HttpResponse> {
	if response.status().is_success() {
		return Ok(response);
	}

	Err(Error::RequestFailed {
		status: response.status().as_u16(),
		detail: response_detail(&response, &[]),
	})
}

/// Decodes a JSON body, reporting the failing path on mismatch.
pub(crate) fn decode_json<T>(response: &HttpResponse) -> Result<T>
where
	T: DeserializeOwned,
{
	let mut deserializer = serde_json::Deserializer::from_slice(response.body());

	serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| DecodeError { source, status: response.status().as_u16() }.into())
}
