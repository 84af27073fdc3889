//! Backend descriptor: validated base URL plus the resolved endpoint set.
//!
//! Every URL the client calls is derived from a [`BackendDescriptor`], so pointing the
//! client at another deployment is a matter of building a different descriptor.

/// Builder API for assembling backend descriptors.
pub mod builder;
/// Named backend endpoints.
pub mod endpoint;

pub use builder::*;
pub use endpoint::*;

// self
use crate::_prelude::*;
use builder::join_path;

/// Base URL of the backend's local development server.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Resolved endpoint URLs declared by a backend descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendEndpoints {
	/// Token pair issuance (`username`/`password` login).
	pub token: Url,
	/// Access token refresh.
	pub token_refresh: Url,
	/// Server-side refresh token invalidation.
	pub logout: Url,
	/// Account registration.
	pub register: Url,
	/// The authenticated user's own profile.
	pub profile: Url,
	/// Avatar upload for the authenticated user.
	pub avatar: Url,
	/// Course catalogue.
	pub courses: Url,
}
impl BackendEndpoints {
	/// Returns the URL for a named endpoint.
	pub fn get(&self, endpoint: Endpoint) -> &Url {
		match endpoint {
			Endpoint::Token => &self.token,
			Endpoint::TokenRefresh => &self.token_refresh,
			Endpoint::Logout => &self.logout,
			Endpoint::Register => &self.register,
			Endpoint::Profile => &self.profile,
			Endpoint::Avatar => &self.avatar,
			Endpoint::Courses => &self.courses,
		}
	}
}

/// Immutable backend descriptor consumed by the client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendDescriptor {
	/// Base URL, always ending in `/`.
	pub base_url: Url,
	/// Endpoint definitions resolved against [`BackendDescriptor::base_url`].
	pub endpoints: BackendEndpoints,
}
impl BackendDescriptor {
	/// Creates a new builder for the provided base URL.
	pub fn builder(base_url: impl Into<String>) -> BackendDescriptorBuilder {
		BackendDescriptorBuilder::new(base_url)
	}

	/// Descriptor for the local development backend with default paths.
	pub fn local() -> Result<Self, BackendDescriptorError> {
		Self::builder(DEFAULT_BASE_URL).build()
	}

	/// Returns the URL for a named endpoint.
	pub fn endpoint(&self, endpoint: Endpoint) -> Url {
		self.endpoints.get(endpoint).clone()
	}

	/// Resolves an arbitrary backend path (e.g. another protected resource).
	pub fn resolve(&self, path: &str) -> Result<Url, BackendDescriptorError> {
		join_path(&self.base_url, "custom", path)
	}
}
