//! Unverified peek at the JWT payload of an access token.
//!
//! The backend issues JWT access tokens carrying `exp` and `user_id`. The client never
//! trusts these claims for authorization (the backend still decides with a 401), it only
//! reads them for display and bookkeeping.

// crates.io
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::Deserializer;
// self
use crate::{_prelude::*, auth::TokenSecret};

/// Subset of claims found in the backend's access tokens.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct AccessClaims {
	/// Expiry as a Unix timestamp in seconds.
	#[serde(default)]
	pub exp: Option<i64>,
	/// Identifier of the authenticated user.
	#[serde(default, deserialize_with = "user_id")]
	pub user_id: Option<i64>,
	/// Token kind, `access` for access tokens.
	#[serde(default)]
	pub token_type: Option<String>,
	/// Unique token identifier.
	#[serde(default)]
	pub jti: Option<String>,
}
impl AccessClaims {
	/// Decodes the payload segment of `token`; returns `None` for anything that is not a JWT.
	pub fn decode(token: &TokenSecret) -> Option<Self> {
		let mut segments = token.expose().split('.');
		let (_header, payload, _signature) = (segments.next()?, segments.next()?, segments.next()?);

		if segments.next().is_some() {
			return None;
		}

		let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;

		serde_json::from_slice(&bytes).ok()
	}

	/// Expiry instant, when the token declares one.
	pub fn expires_at(&self) -> Option<OffsetDateTime> {
		OffsetDateTime::from_unix_timestamp(self.exp?).ok()
	}

	/// Returns `true` if the token declares an expiry at or before `instant`.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		self.expires_at().is_some_and(|expiry| instant >= expiry)
	}
}

// Accepts both numeric and string user ids.
fn user_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
	D: Deserializer<'de>,
{
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum Raw {
		Number(i64),
		Text(String),
	}

	Ok(match Option::<Raw>::deserialize(deserializer)? {
		Some(Raw::Number(id)) => Some(id),
		Some(Raw::Text(text)) => text.parse().ok(),
		None => None,
	})
}
