//! Error bodies returned by the backend on non-success responses.

// crates.io
use serde_json::Value;
// self
use crate::{_prelude::*, http::HttpResponse};

/// One field's validation messages; the backend sends either a list or a bare string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldMessages {
	/// Single message.
	One(String),
	/// Message list, most relevant first.
	Many(Vec<String>),
}
impl FieldMessages {
	/// First message, if any.
	pub fn first(&self) -> Option<&str> {
		match self {
			Self::One(message) => Some(message),
			Self::Many(messages) => messages.first().map(String::as_str),
		}
	}
}

/// Shapes of backend error bodies.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BackendErrorBody {
	/// `{ "detail": "..." }`, optionally with extra fields such as `code`.
	Detail {
		/// Human-readable reason.
		detail: String,
	},
	/// Per-field validation errors, e.g. `{ "username": ["..."] }`.
	Fields(BTreeMap<String, FieldMessages>),
	/// Any other JSON value.
	Other(Value),
}
impl BackendErrorBody {
	/// Parses a response body; `None` when it is empty or not JSON.
	pub fn parse(body: &[u8]) -> Option<Self> {
		serde_json::from_slice(body).ok()
	}

	/// Picks the most relevant message.
	///
	/// `detail` wins; otherwise the first message of the first field named in `preferred`,
	/// then the first message of any field.
	pub fn message(&self, preferred: &[&str]) -> Option<String> {
		match self {
			Self::Detail { detail } => Some(detail.clone()),
			Self::Fields(fields) => preferred
				.iter()
				.find_map(|name| fields.get(*name).and_then(FieldMessages::first))
				.or_else(|| fields.values().find_map(FieldMessages::first))
				.map(str::to_owned),
			Self::Other(Value::String(message)) => Some(message.clone()),
			Self::Other(_) => None,
		}
	}

	/// `detail` when present, otherwise the whole body as compact JSON.
	pub fn describe(&self) -> String {
		match self {
			Self::Detail { detail } => detail.clone(),
			other => serde_json::to_string(other).unwrap_or_default(),
		}
	}
}

/// Best message for a failed response, falling back to the HTTP status text.
pub fn response_detail(response: &HttpResponse, preferred: &[&str]) -> String {
	BackendErrorBody::parse(response.body())
		.and_then(|body| body.message(preferred))
		.unwrap_or_else(|| status_text(response))
}

/// Like [`response_detail`] but reports unrecognized bodies verbatim as JSON.
pub fn response_description(response: &HttpResponse) -> String {
	match BackendErrorBody::parse(response.body()) {
		Some(body) => body.describe(),
		None => status_text(response),
	}
}

fn status_text(response: &HttpResponse) -> String {
	let status = response.status();

	status.canonical_reason().map(str::to_owned).unwrap_or_else(|| status.as_str().to_owned())
}

#[cfg(test)]
mod tests {
	// crates.io
	use ::http::StatusCode;
	// self
	use super::*;

	fn response(status: u16, body: &str) -> HttpResponse {
		let mut response = HttpResponse::new(body.as_bytes().to_vec());

		*response.status_mut() =
			StatusCode::from_u16(status).expect("Status fixture should be a valid code.");

		response
	}

	#[test]
	fn detail_is_preferred_over_fields() {
		let body = BackendErrorBody::parse(
			br#"{"detail":"Given token not valid for any token type","code":"token_not_valid"}"#,
		)
		.expect("Detail body should parse.");

		assert!(matches!(body, BackendErrorBody::Detail { .. }));
		assert_eq!(
			body.message(&["username"]).as_deref(),
			Some("Given token not valid for any token type")
		);
	}

	#[test]
	fn field_messages_follow_the_preferred_order() {
		let body = BackendErrorBody::parse(
			br#"{"password":["This field may not be blank."],"username":"Required."}"#,
		)
		.expect("Field body should parse.");

		assert_eq!(body.message(&["username", "password"]).as_deref(), Some("Required."));
		assert_eq!(
			body.message(&["email"]).as_deref(),
			Some("This field may not be blank.")
		);
	}

	#[test]
	fn unusable_bodies_fall_back_to_status_text() {
		assert_eq!(response_detail(&response(500, "<html>oops</html>"), &[]), "Internal Server Error");
		assert_eq!(response_detail(&response(404, ""), &[]), "Not Found");
		assert_eq!(response_detail(&response(599, "[1,2]"), &[]), "599");
	}

	#[test]
	fn description_serializes_unrecognized_bodies() {
		let detail = response(400, r#"{"email":{"unique":["Taken."]}}"#);

		assert_eq!(response_description(&detail), r#"{"email":{"unique":["Taken."]}}"#);
		assert_eq!(response_description(&response(400, r#"{"detail":"Nope."}"#)), "Nope.");
		assert_eq!(response_description(&response(502, "")), "Bad Gateway");
	}
}
