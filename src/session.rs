//! Injectable session-and-lock object shared by every client of one user session.
//!
//! [`SessionContext`] owns the in-memory [`Session`], mirrors every change into a
//! [`SessionStore`], and carries the single in-progress-refresh guard. Clients that must not
//! issue concurrent refresh calls against the same refresh token share one
//! `Arc<SessionContext>`; independent contexts (e.g. under test) never interfere.
//!
//! Every write (establish, rotate, invalidate, restore) holds one async write lock across both
//! the in-memory update and the store call, so writers never interleave.

// self
use crate::{
	_prelude::*,
	auth::{Session, TokenSecret},
	store::SessionStore,
};

/// Guard proving the holder is the only caller refreshing the session.
pub type RefreshGuard<'a> = async_lock::MutexGuard<'a, ()>;

/// In-memory session state, its persistent mirror, and the shared refresh guard.
pub struct SessionContext {
	store: Arc<dyn SessionStore>,
	current: RwLock<Option<Session>>,
	refresh_guard: AsyncMutex<()>,
	writes: AsyncMutex<()>,
}
impl SessionContext {
	/// Creates an empty context backed by `store`. Call [`SessionContext::restore`] to pick up
	/// a previously persisted session.
	pub fn new(store: Arc<dyn SessionStore>) -> Self {
		Self {
			store,
			current: RwLock::new(None),
			refresh_guard: AsyncMutex::new(()),
			writes: AsyncMutex::new(()),
		}
	}

	/// Loads the persisted session into memory, replacing whatever was held before.
	pub async fn restore(&self) -> Result<Option<Session>> {
		let _writes = self.writes.lock().await;
		let loaded = self.store.load().await?;

		*self.current.write() = loaded.clone();

		Ok(loaded)
	}

	/// Installs a freshly issued session and persists it.
	pub async fn establish(&self, session: Session) -> Result<()> {
		let _writes = self.writes.lock().await;

		self.store.save(session.clone()).await?;

		*self.current.write() = Some(session);

		Ok(())
	}

	/// Returns a copy of the current session, if any.
	pub fn snapshot(&self) -> Option<Session> {
		self.current.read().clone()
	}

	/// Returns `true` while a session is held in memory.
	pub fn is_active(&self) -> bool {
		self.current.read().is_some()
	}

	/// Current access token, if a session exists.
	pub fn access_token(&self) -> Option<TokenSecret> {
		self.current.read().as_ref().map(|session| session.access.clone())
	}

	/// Current refresh token, if a session exists.
	pub fn refresh_token(&self) -> Option<TokenSecret> {
		self.current.read().as_ref().map(|session| session.refresh.clone())
	}

	/// Takes the refresh guard without waiting; `None` means a refresh is already in flight.
	pub fn try_begin_refresh(&self) -> Option<RefreshGuard<'_>> {
		self.refresh_guard.try_lock()
	}

	/// Applies a refresh result and persists it.
	///
	/// Fails with [`Error::SessionExpired`] when the session was destroyed while the refresh
	/// was in flight, so a concurrent logout is never undone.
	pub(crate) async fn rotate(
		&self,
		access: TokenSecret,
		refresh: Option<TokenSecret>,
	) -> Result<Session> {
		let _writes = self.writes.lock().await;
		let Some(updated) = self.snapshot().map(|session| session.rotated(access, refresh)) else {
			return Err(Error::SessionExpired {
				reason: "session ended while the refresh was in flight".into(),
			});
		};

		self.store.save(updated.clone()).await?;

		*self.current.write() = Some(updated.clone());

		Ok(updated)
	}

	/// Drops the in-memory session and clears the persisted tokens.
	pub async fn invalidate(&self) -> Result<()> {
		let _writes = self.writes.lock().await;

		self.current.write().take();
		self.store.clear().await?;

		Ok(())
	}
}
impl Debug for SessionContext {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SessionContext")
			.field("active", &self.is_active())
			.field("refreshing", &self.refresh_guard.try_lock().is_none())
			.finish()
	}
}
