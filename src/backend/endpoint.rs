// self
use crate::_prelude::*;

/// Endpoints the client knows by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
	/// `api/token/`.
	Token,
	/// `api/token/refresh/`.
	TokenRefresh,
	/// `api/usuarios/logout/`.
	Logout,
	/// `api/usuarios/register/`.
	Register,
	/// `api/usuarios/mi-perfil/`.
	Profile,
	/// `api/usuarios/mi-perfil/avatar/`.
	Avatar,
	/// `api/cursos/`.
	Courses,
}
impl Endpoint {
	/// All named endpoints, in declaration order.
	pub const ALL: [Endpoint; 7] = [
		Endpoint::Token,
		Endpoint::TokenRefresh,
		Endpoint::Logout,
		Endpoint::Register,
		Endpoint::Profile,
		Endpoint::Avatar,
		Endpoint::Courses,
	];

	/// Returns a stable label suitable for errors and logs.
	pub const fn as_str(self) -> &'static str {
		match self {
			Endpoint::Token => "token",
			Endpoint::TokenRefresh => "token_refresh",
			Endpoint::Logout => "logout",
			Endpoint::Register => "register",
			Endpoint::Profile => "profile",
			Endpoint::Avatar => "avatar",
			Endpoint::Courses => "courses",
		}
	}

	/// Path used when the builder is not given an override.
	pub const fn default_path(self) -> &'static str {
		match self {
			Endpoint::Token => "api/token/",
			Endpoint::TokenRefresh => "api/token/refresh/",
			Endpoint::Logout => "api/usuarios/logout/",
			Endpoint::Register => "api/usuarios/register/",
			Endpoint::Profile => "api/usuarios/mi-perfil/",
			Endpoint::Avatar => "api/usuarios/mi-perfil/avatar/",
			Endpoint::Courses => "api/cursos/",
		}
	}
}
impl Display for Endpoint {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
