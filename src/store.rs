//! Storage contracts and built-in store implementations for the persisted session.
//!
//! A store mirrors a browser local-storage layout: two string values under the fixed keys
//! [`ACCESS_TOKEN_KEY`] and [`REFRESH_TOKEN_KEY`], written together and cleared together. A
//! store holding only one of them reads as "no session".

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

// self
use crate::{_prelude::*, auth::Session};

/// Key under which the access token is persisted.
pub const ACCESS_TOKEN_KEY: &str = "authToken";
/// Key under which the refresh token is persisted.
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";

/// Boxed future returned by [`SessionStore`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Flat key/value snapshot as persisted by the stores.
pub type StoreEntries = BTreeMap<String, String>;

/// Storage backend contract implemented by session stores.
pub trait SessionStore
where
	Self: Send + Sync,
{
	/// Loads the persisted session, if both tokens are present.
	fn load(&self) -> StoreFuture<'_, Option<Session>>;

	/// Persists or replaces both tokens.
	fn save(&self, session: Session) -> StoreFuture<'_, ()>;

	/// Removes both tokens. Clearing an empty store is a no-op.
	fn clear(&self) -> StoreFuture<'_, ()>;
}

/// Error type produced by [`SessionStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

pub(crate) fn session_from_entries(entries: &StoreEntries) -> Option<Session> {
	let access = entries.get(ACCESS_TOKEN_KEY)?;
	let refresh = entries.get(REFRESH_TOKEN_KEY)?;

	Some(Session::new(access.as_str(), refresh.as_str()))
}

pub(crate) fn write_session(entries: &mut StoreEntries, session: Session) {
	entries.insert(ACCESS_TOKEN_KEY.into(), session.access.expose().to_owned());
	entries.insert(REFRESH_TOKEN_KEY.into(), session.refresh.expose().to_owned());
}

pub(crate) fn remove_session(entries: &mut StoreEntries) -> bool {
	let access = entries.remove(ACCESS_TOKEN_KEY).is_some();
	let refresh = entries.remove(REFRESH_TOKEN_KEY).is_some();

	access || refresh
}
