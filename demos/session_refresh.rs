//! Logs in against a mock backend, persists the session to a file, and lets the gateway
//! refresh an expired access token transparently on the next protected call.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use serde_json::json;
// self
use levelup_client::{
	backend::BackendDescriptor,
	client::Client,
	http::ReqwestHttpClient,
	reqwest::Client as ReqwestClient,
	session::SessionContext,
	store::{FileStore, SessionStore},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let login_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/token/");
			then.status(200).json_body(json!({ "access": "expiredABC", "refresh": "validXYZ" }));
		})
		.await;
	let expired_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/cursos/").header("authorization", "Bearer expiredABC");
			then.status(401).json_body(json!({ "detail": "Given token not valid for any token type" }));
		})
		.await;
	let refresh_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/token/refresh/");
			then.status(200).json_body(json!({ "access": "freshDEF" }));
		})
		.await;
	let courses_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/cursos/").header("authorization", "Bearer freshDEF");
			then.status(200).json_body(json!([
				{ "id_curso": 1, "nombre": "Alfabeto", "nivel": "básico" },
				{ "id_curso": 2, "nombre": "Saludos", "nivel": "básico" }
			]));
		})
		.await;
	let path = std::env::temp_dir().join("levelup-demo-session.json");
	let store: Arc<dyn SessionStore> = Arc::new(FileStore::open(&path)?);
	let descriptor = BackendDescriptor::builder(server.base_url()).build()?;
	let http_client = ReqwestHttpClient::with_client(ReqwestClient::builder().no_proxy().build()?);
	let client = <Client<ReqwestHttpClient>>::with_http_client(
		descriptor,
		Arc::new(SessionContext::new(store)),
		http_client,
	);

	client.login("ana", "señas-2025").await?;

	println!("Session persisted to {}.", path.display());

	for course in client.courses().await? {
		println!("Course {}: {} ({}).", course.id, course.name, course.level);
	}

	println!("Refresh calls: {}.", client.metrics.refreshes());

	client.logout().await?;

	login_mock.assert_async().await;
	expired_mock.assert_async().await;
	refresh_mock.assert_async().await;
	courses_mock.assert_async().await;

	Ok(())
}
