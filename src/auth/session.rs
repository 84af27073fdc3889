//! The access/refresh token pair issued at login.

// self
use crate::{
	_prelude::*,
	auth::{AccessClaims, TokenSecret},
};

/// Credentials for one logged-in user.
///
/// A session is created on login, replaced wholesale on re-login, and updated in place when
/// a refresh yields a new access token (and, with rotating backends, a new refresh token).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
	/// Short-lived credential presented as a bearer token.
	pub access: TokenSecret,
	/// Longer-lived credential used solely to obtain a new access token.
	pub refresh: TokenSecret,
}
impl Session {
	/// Creates a session from raw token strings.
	pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
		Self { access: TokenSecret::new(access), refresh: TokenSecret::new(refresh) }
	}

	/// Returns a copy with a new access token and, when supplied, a rotated refresh token.
	pub fn rotated(&self, access: TokenSecret, refresh: Option<TokenSecret>) -> Self {
		Self { access, refresh: refresh.unwrap_or_else(|| self.refresh.clone()) }
	}

	/// Decodes the access token's JWT claims, if it is a JWT.
	pub fn access_claims(&self) -> Option<AccessClaims> {
		AccessClaims::decode(&self.access)
	}
}
impl Debug for Session {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Session")
			.field("access", &self.access)
			.field("refresh", &self.refresh)
			.finish()
	}
}
