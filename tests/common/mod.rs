//! Helpers shared by the integration tests.

#![allow(dead_code)]

pub use std::sync::Arc;

pub use httpmock::prelude::*;
pub use serde_json::json;

pub use levelup_client::{
	auth::Session,
	backend::BackendDescriptor,
	client::{Client, ReqwestApiClient},
	error::Error,
	http::ReqwestHttpClient,
	reqwest::Client as ReqwestClient,
	session::SessionContext,
	store::{ACCESS_TOKEN_KEY, MemoryStore, REFRESH_TOKEN_KEY, SessionStore},
};

/// Reqwest transport that talks to the local mock server directly.
pub fn test_reqwest_http_client() -> ReqwestHttpClient {
	let client = ReqwestClient::builder()
		.no_proxy()
		.build()
		.expect("Failed to build Reqwest client for tests.");

	ReqwestHttpClient::with_client(client)
}

/// Descriptor pointing every endpoint at `server`.
pub fn descriptor(server: &MockServer) -> BackendDescriptor {
	BackendDescriptor::builder(server.base_url())
		.build()
		.expect("Mock server descriptor should build successfully.")
}

/// Client over an in-memory store, optionally seeded with `session`.
pub async fn build_test_client(
	server: &MockServer,
	session: Option<Session>,
) -> (ReqwestApiClient, Arc<MemoryStore>) {
	let backend = Arc::new(MemoryStore::default());
	let store: Arc<dyn SessionStore> = backend.clone();
	let context = Arc::new(SessionContext::new(store));

	if let Some(session) = session {
		context.establish(session).await.expect("Seeding the session should succeed.");
	}

	let client = Client::with_http_client(descriptor(server), context, test_reqwest_http_client());

	(client, backend)
}

/// Stored `(access, refresh)` pair, if both keys are present.
pub fn stored_tokens(store: &MemoryStore) -> Option<(String, String)> {
	Some((store.get_item(ACCESS_TOKEN_KEY)?, store.get_item(REFRESH_TOKEN_KEY)?))
}
