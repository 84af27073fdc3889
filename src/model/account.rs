//! Token issuance, refresh, logout, and registration bodies.

// self
use crate::{_prelude::*, auth::TokenSecret};

/// `POST api/token/` request body.
#[derive(Clone, Serialize)]
pub struct LoginRequest<'a> {
	/// Account username.
	pub username: &'a str,
	/// Account password.
	pub password: &'a str,
}
impl Debug for LoginRequest<'_> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("LoginRequest")
			.field("username", &self.username)
			.field("password", &"<redacted>")
			.finish()
	}
}

/// `POST api/token/` success body.
#[derive(Clone, Debug, Deserialize)]
pub struct TokenPair {
	/// Newly issued access token.
	pub access: TokenSecret,
	/// Newly issued refresh token.
	pub refresh: TokenSecret,
}

/// `POST api/token/refresh/` request body.
#[derive(Clone, Debug, Serialize)]
pub struct RefreshRequest<'a> {
	/// Refresh token being exchanged.
	pub refresh: &'a str,
}

/// `POST api/token/refresh/` success body.
#[derive(Clone, Debug, Deserialize)]
pub struct RefreshResponse {
	/// Newly issued access token.
	pub access: TokenSecret,
	/// Rotated refresh token, when the backend rotates refresh tokens.
	#[serde(default)]
	pub refresh: Option<TokenSecret>,
}

/// `POST api/usuarios/logout/` request body.
///
/// The refresh token is sent under both `refresh` and `refresh_token` so either naming used
/// by the backend's logout view is satisfied.
#[derive(Clone, Debug, Serialize)]
pub struct LogoutRequest<'a> {
	/// Refresh token to blacklist.
	pub refresh: &'a str,
	/// Same token under the legacy key.
	pub refresh_token: &'a str,
}
impl<'a> LogoutRequest<'a> {
	/// Builds the body for `refresh`.
	pub fn new(refresh: &'a TokenSecret) -> Self {
		Self { refresh: refresh.expose(), refresh_token: refresh.expose() }
	}
}

/// `POST api/usuarios/register/` request body.
#[derive(Clone, Default, Serialize)]
pub struct RegisterRequest {
	/// Desired username.
	pub username: String,
	/// Contact e-mail.
	pub email: String,
	/// Password.
	pub password: String,
	/// Password confirmation; must equal `password`.
	pub password2: String,
	/// Given name.
	pub first_name: String,
	/// Family name.
	pub last_name: String,
}
impl RegisterRequest {
	/// Checks the inputs the backend would reject, without a network call.
	pub fn validate(&self) -> Result<()> {
		for (field, value) in [
			("username", &self.username),
			("email", &self.email),
			("password", &self.password),
		] {
			if value.trim().is_empty() {
				return Err(Error::Validation { field, reason: "this field is required".into() });
			}
		}
		if !self.email.contains('@') {
			return Err(Error::Validation {
				field: "email",
				reason: "enter a valid e-mail address".into(),
			});
		}
		if self.password != self.password2 {
			return Err(Error::Validation {
				field: "password2",
				reason: "passwords do not match".into(),
			});
		}

		Ok(())
	}
}
impl Debug for RegisterRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RegisterRequest")
			.field("username", &self.username)
			.field("email", &self.email)
			.field("first_name", &self.first_name)
			.field("last_name", &self.last_name)
			.finish_non_exhaustive()
	}
}

/// Public account fields echoed by the backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
	/// Backend user id, when included.
	#[serde(default)]
	pub id: Option<i64>,
	/// Username.
	pub username: String,
	/// Contact e-mail.
	#[serde(default)]
	pub email: String,
	/// Given name.
	#[serde(default)]
	pub first_name: String,
	/// Family name.
	#[serde(default)]
	pub last_name: String,
}

/// `POST api/usuarios/register/` success body.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct RegisteredUser {
	/// The created account.
	pub user: UserSummary,
	/// Backend confirmation message.
	#[serde(default)]
	pub message: Option<String>,
}
