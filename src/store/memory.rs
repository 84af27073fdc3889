//! Thread-safe in-memory [`SessionStore`] implementation for local development and tests.

// self
use crate::{
	_prelude::*,
	auth::Session,
	store::{self, SessionStore, StoreEntries, StoreFuture},
};

type StoreMap = Arc<RwLock<StoreEntries>>;

/// Thread-safe storage backend that keeps the session in-process for tests and demos.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(StoreMap);
impl MemoryStore {
	/// Reads a raw value, mirroring `localStorage.getItem`.
	pub fn get_item(&self, key: &str) -> Option<String> {
		self.0.read().get(key).cloned()
	}

	/// Returns `true` when nothing at all is stored.
	pub fn is_empty(&self) -> bool {
		self.0.read().is_empty()
	}
}
impl SessionStore for MemoryStore {
	fn load(&self) -> StoreFuture<'_, Option<Session>> {
		let map = self.0.clone();

		Box::pin(async move { Ok(store::session_from_entries(&map.read())) })
	}

	fn save(&self, session: Session) -> StoreFuture<'_, ()> {
		let map = self.0.clone();

		Box::pin(async move {
			store::write_session(&mut map.write(), session);

			Ok(())
		})
	}

	fn clear(&self) -> StoreFuture<'_, ()> {
		let map = self.0.clone();

		Box::pin(async move {
			store::remove_session(&mut map.write());

			Ok(())
		})
	}
}
