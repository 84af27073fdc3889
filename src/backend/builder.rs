// self
use crate::{
	_prelude::*,
	backend::{BackendDescriptor, BackendEndpoints, Endpoint},
};

/// Errors raised while constructing or using descriptors.
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum BackendDescriptorError {
	/// Base URL cannot be parsed.
	#[error("Base URL `{url}` is invalid.")]
	InvalidBaseUrl {
		/// Base URL as supplied.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Base URL must use HTTP or HTTPS.
	#[error("Base URL must use http or https: {url}.")]
	UnsupportedScheme {
		/// Base URL that failed validation.
		url: String,
	},
	/// An endpoint path cannot be joined onto the base URL.
	#[error("The {endpoint} path `{path}` is invalid.")]
	InvalidPath {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Path as supplied.
		path: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
}

/// Builder for [`BackendDescriptor`] values.
#[derive(Debug)]
pub struct BackendDescriptorBuilder {
	/// Base URL as supplied by the caller.
	pub base_url: String,
	/// Path overrides; later entries win.
	pub path_overrides: Vec<(Endpoint, String)>,
}
impl BackendDescriptorBuilder {
	/// Creates a new builder seeded with the provided base URL.
	pub fn new(base_url: impl Into<String>) -> Self {
		Self { base_url: base_url.into(), path_overrides: Vec::new() }
	}

	/// Overrides the path of a single endpoint, relative to the base URL.
	pub fn path(mut self, endpoint: Endpoint, path: impl Into<String>) -> Self {
		self.path_overrides.push((endpoint, path.into()));

		self
	}

	/// Consumes the builder and validates the resulting descriptor.
	pub fn build(self) -> Result<BackendDescriptor, BackendDescriptorError> {
		let base_url = normalize_base(&self.base_url)?;
		let resolve = |endpoint: Endpoint| {
			let path = self
				.path_overrides
				.iter()
				.rev()
				.find(|(candidate, _)| *candidate == endpoint)
				.map(|(_, path)| path.as_str())
				.unwrap_or(endpoint.default_path());

			join_path(&base_url, endpoint.as_str(), path)
		};
		let endpoints = BackendEndpoints {
			token: resolve(Endpoint::Token)?,
			token_refresh: resolve(Endpoint::TokenRefresh)?,
			logout: resolve(Endpoint::Logout)?,
			register: resolve(Endpoint::Register)?,
			profile: resolve(Endpoint::Profile)?,
			avatar: resolve(Endpoint::Avatar)?,
			courses: resolve(Endpoint::Courses)?,
		};

		Ok(BackendDescriptor { base_url, endpoints })
	}
}

fn normalize_base(raw: &str) -> Result<Url, BackendDescriptorError> {
	let mut url = Url::parse(raw.trim()).map_err(|source| BackendDescriptorError::InvalidBaseUrl {
		url: raw.to_owned(),
		source,
	})?;

	if !matches!(url.scheme(), "http" | "https") {
		return Err(BackendDescriptorError::UnsupportedScheme { url: url.to_string() });
	}

	url.set_query(None);
	url.set_fragment(None);

	if !url.path().ends_with('/') {
		let path = format!("{}/", url.path());

		url.set_path(&path);
	}

	Ok(url)
}

/// Joins `path` onto `base`, keeping any path prefix `base` carries.
pub(crate) fn join_path(
	base: &Url,
	endpoint: &'static str,
	path: &str,
) -> Result<Url, BackendDescriptorError> {
	base.join(path.trim_start_matches('/')).map_err(|source| BackendDescriptorError::InvalidPath {
		endpoint,
		path: path.to_owned(),
		source,
	})
}
