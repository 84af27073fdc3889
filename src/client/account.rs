//! Login, registration, logout, and session restore.
//!
//! None of these calls go through the refresh-and-retry path: credentials are exchanged
//! anonymously and logout is best effort.

// self
use crate::{
	_prelude::*,
	auth::Session,
	backend::Endpoint,
	client::{
		Client,
		gateway::{decode_json, ensure_success},
	},
	http::{ApiHttpClient, ApiRequest},
	model::{
		LoginRequest, LogoutRequest, RegisterRequest, RegisteredUser, TokenPair,
		response_description, response_detail,
	},
	obs::{self, Operation, Outcome, RequestSpan},
};

impl<C> Client<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Exchanges credentials for a token pair and installs it as the current session.
	///
	/// Re-login replaces any existing session. On rejection the error detail is the
	/// backend's `detail`, else the first `username` or `password` message.
	pub async fn login(&self, username: &str, password: &str) -> Result<Session> {
		const OPERATION: Operation = Operation::Login;

		let span = RequestSpan::new(OPERATION, "login");

		obs::record_outcome(OPERATION, Outcome::Attempt);

		let result = span
			.instrument(async {
				let request = ApiRequest::post(self.descriptor.endpoint(Endpoint::Token))
					.json(&LoginRequest { username, password })?;
				let response = self.dispatch(request.to_http(None)?).await?;

				if !response.status().is_success() {
					return Err(Error::RequestFailed {
						status: response.status().as_u16(),
						detail: response_detail(&response, &["username", "password"]),
					});
				}

				let pair: TokenPair = decode_json(&response)?;
				let session = Session { access: pair.access, refresh: pair.refresh };

				self.session.establish(session.clone()).await?;

				obs::session_event(OPERATION, "session established");

				Ok(session)
			})
			.await;

		obs::record_outcome(OPERATION, Outcome::of(&result));

		result
	}

	/// Creates an account. Inputs are validated locally first; invalid input never reaches
	/// the network.
	pub async fn register(&self, registration: &RegisterRequest) -> Result<RegisteredUser> {
		const OPERATION: Operation = Operation::Register;

		let span = RequestSpan::new(OPERATION, "register");

		obs::record_outcome(OPERATION, Outcome::Attempt);

		let result = span
			.instrument(async {
				registration.validate()?;

				let request = ApiRequest::post(self.descriptor.endpoint(Endpoint::Register))
					.json(registration)?;
				let response = self.dispatch(request.to_http(None)?).await?;

				if !response.status().is_success() {
					return Err(Error::RequestFailed {
						status: response.status().as_u16(),
						detail: response_description(&response),
					});
				}

				decode_json(&response)
			})
			.await;

		obs::record_outcome(OPERATION, Outcome::of(&result));

		result
	}

	/// Ends the session.
	///
	/// With a session present the backend is asked to blacklist the refresh token; that call
	/// is best effort and its failure is only logged. Local state is cleared either way.
	/// Without a session no request is sent.
	pub async fn logout(&self) -> Result<()> {
		const OPERATION: Operation = Operation::Logout;

		let span = RequestSpan::new(OPERATION, "logout");

		obs::record_outcome(OPERATION, Outcome::Attempt);

		let result = span
			.instrument(async {
				if let Some(session) = self.session.snapshot() {
					if let Err(e) = self.server_logout(&session).await {
						obs::session_warning(OPERATION, "server logout failed", &e);
					}
				}

				self.session.invalidate().await?;

				obs::session_event(OPERATION, "session cleared");

				Ok(())
			})
			.await;

		obs::record_outcome(OPERATION, Outcome::of(&result));

		result
	}

	/// Loads a persisted session into memory, e.g. after a restart.
	pub async fn restore(&self) -> Result<Option<Session>> {
		let restored = self.session.restore().await?;

		if restored.is_some() {
			obs::session_event(Operation::Login, "session restored");
		}

		Ok(restored)
	}

	async fn server_logout(&self, session: &Session) -> Result<()> {
		let request = ApiRequest::post(self.descriptor.endpoint(Endpoint::Logout))
			.json(&LogoutRequest::new(&session.refresh))?;
		let response = self.dispatch(request.to_http(Some(&session.access))?).await?;

		ensure_success(response).map(drop)
	}
}
