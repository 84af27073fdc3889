//! Client facade for the LevelUp! backend.
//!
//! [`Client`] owns the transport, the backend descriptor, and a shared [`SessionContext`].
//! Every protected call goes through [`Client::send`], which attaches the bearer token,
//! refreshes it once on `401`, and retries the original request with the new token. Account
//! calls (login, registration, logout) and the typed resource calls live in submodules as
//! further `impl` blocks on the same type.

/// Gateway activity counters.
pub mod metrics;

mod account;
mod courses;
mod gateway;
mod profile;

pub use metrics::GatewayMetrics;

// self
use crate::{
	_prelude::*,
	backend::BackendDescriptor,
	http::ApiHttpClient,
	session::SessionContext,
};
#[cfg(feature = "reqwest")] use crate::{http::ReqwestHttpClient, store::SessionStore};

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestApiClient = Client<ReqwestHttpClient>;

/// Session-aware client for one backend.
///
/// Clients built over clones of the same `Arc<SessionContext>` share one session and one
/// in-progress-refresh guard, so a burst of `401`s across them triggers a single refresh.
pub struct Client<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// HTTP client wrapper used for every outbound backend request.
	pub http_client: Arc<C>,
	/// Backend base URL and resolved endpoints.
	pub descriptor: BackendDescriptor,
	/// Session state, its persistent mirror, and the shared refresh guard.
	pub session: Arc<SessionContext>,
	/// In-process counters for the gateway.
	pub metrics: Arc<GatewayMetrics>,
}
impl<C> Client<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates a client that reuses the caller-provided transport and session context.
	pub fn with_http_client(
		descriptor: BackendDescriptor,
		session: Arc<SessionContext>,
		http_client: impl Into<Arc<C>>,
	) -> Self {
		Self {
			http_client: http_client.into(),
			descriptor,
			session,
			metrics: Default::default(),
		}
	}

	/// Returns `true` while a session is held in memory.
	pub fn is_authenticated(&self) -> bool {
		self.session.is_active()
	}

	/// User id carried in the current access token's claims, if the token is a JWT.
	pub fn current_user_id(&self) -> Option<i64> {
		self.session.snapshot()?.access_claims()?.user_id
	}
}
#[cfg(feature = "reqwest")]
impl Client<ReqwestHttpClient> {
	/// Creates a client with its own reqwest transport and a fresh session context over
	/// `store`.
	///
	/// Call [`Client::restore`] afterwards to resume a previously persisted session.
	pub fn new(descriptor: BackendDescriptor, store: Arc<dyn SessionStore>) -> Self {
		Self::with_http_client(
			descriptor,
			Arc::new(SessionContext::new(store)),
			ReqwestHttpClient::default(),
		)
	}
}
impl<C> Clone for Client<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn clone(&self) -> Self {
		Self {
			http_client: self.http_client.clone(),
			descriptor: self.descriptor.clone(),
			session: self.session.clone(),
			metrics: self.metrics.clone(),
		}
	}
}
impl<C> Debug for Client<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client")
			.field("descriptor", &self.descriptor)
			.field("session", &self.session)
			.field("metrics", &self.metrics)
			.finish()
	}
}
