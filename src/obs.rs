//! Optional observability helpers for client operations.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `levelup_client.request` with the
//!   `operation` and `stage` (call site) fields. Protected calls also record `user_id`.
//! - Enable `metrics` to increment the `levelup_client_request_total` counter for every
//!   attempt and outcome, labeled by `operation` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Client operations observed by the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
	/// Bearer-authenticated call through the gateway.
	Protected,
	/// Credential exchange at the token endpoint.
	Login,
	/// Access token refresh.
	Refresh,
	/// Server-side logout.
	Logout,
	/// Account registration.
	Register,
}
impl Operation {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Operation::Protected => "protected",
			Operation::Login => "login",
			Operation::Refresh => "refresh",
			Operation::Logout => "logout",
			Operation::Register => "register",
		}
	}
}
impl Display for Operation {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
	/// Entry to a client operation.
	Attempt,
	/// Successful completion.
	Success,
	/// A 401 arrived while another caller was refreshing.
	PendingRetry,
	/// The refresh failed and the session was cleared.
	SessionExpired,
	/// Any other failure propagated back to the caller.
	Failure,
}
impl Outcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Outcome::Attempt => "attempt",
			Outcome::Success => "success",
			Outcome::PendingRetry => "pending_retry",
			Outcome::SessionExpired => "session_expired",
			Outcome::Failure => "failure",
		}
	}

	/// Classifies a finished operation.
	pub fn of<T>(result: &Result<T>) -> Self {
		match result {
			Ok(_) => Outcome::Success,
			Err(Error::AuthorizationPending) => Outcome::PendingRetry,
			Err(Error::SessionExpired { .. }) => Outcome::SessionExpired,
			Err(_) => Outcome::Failure,
		}
	}
}
impl Display for Outcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
