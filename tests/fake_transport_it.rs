//! Gateway behavior over a scripted in-process transport.

// std
use std::{collections::VecDeque, sync::Arc};
// crates.io
use http::{StatusCode, header::AUTHORIZATION};
use parking_lot::Mutex;
// self
use levelup_client::{
	auth::Session,
	backend::BackendDescriptor,
	client::Client,
	error::{Error, TransportError},
	http::{ApiHttpClient, HttpFuture, HttpRequest, HttpResponse},
	session::SessionContext,
	store::{ACCESS_TOKEN_KEY, MemoryStore, SessionStore},
};

#[derive(Debug, thiserror::Error)]
#[error("Connection refused.")]
struct Refused;

/// Replays canned outcomes in order and records what was sent.
#[derive(Default)]
struct ScriptedTransport {
	script: Mutex<VecDeque<Result<HttpResponse, Refused>>>,
	sent: Mutex<Vec<(String, Option<String>)>>,
	interleave: Mutex<Option<Interleave>>,
	bodies: Mutex<Vec<Vec<u8>>>,
}

/// Session change applied by "another caller" while the given request (0-based) is in flight.
struct Interleave {
	at: usize,
	context: Arc<SessionContext>,
	replacement: Option<Session>,
}
impl ScriptedTransport {
	fn new(script: impl IntoIterator<Item = Result<HttpResponse, Refused>>) -> Self {
		Self { script: Mutex::new(script.into_iter().collect()), ..Default::default() }
	}

	fn sent(&self) -> Vec<(String, Option<String>)> {
		self.sent.lock().clone()
	}
}
impl ApiHttpClient for ScriptedTransport {
	type TransportError = Refused;

	fn execute(&self, request: HttpRequest) -> HttpFuture<'_, Self::TransportError> {
		let authorization = request
			.headers()
			.get(AUTHORIZATION)
			.and_then(|value| value.to_str().ok())
			.map(str::to_owned);

		let index = {
			let mut sent = self.sent.lock();

			sent.push((request.uri().path().to_owned(), authorization));

			sent.len() - 1
		};

		self.bodies.lock().push(request.body().clone());

		let next = self.script.lock().pop_front().unwrap_or(Err(Refused));
		let interleave = {
			let mut slot = self.interleave.lock();

			if slot.as_ref().is_some_and(|hook| hook.at == index) { slot.take() } else { None }
		};

		Box::pin(async move {
			if let Some(Interleave { context, replacement, .. }) = interleave {
				match replacement {
					Some(session) => context
						.establish(session)
						.await
						.expect("Interleaved session should install."),
					None => context.invalidate().await.expect("Interleaved logout should succeed."),
				}
			}

			next
		})
	}
}

fn reply(status: u16, body: &str) -> Result<HttpResponse, Refused> {
	let mut response = HttpResponse::new(body.as_bytes().to_vec());

	*response.status_mut() =
		StatusCode::from_u16(status).expect("Status fixture should be a valid code.");

	Ok(response)
}

async fn build_client(
	transport: ScriptedTransport,
) -> (Client<ScriptedTransport>, Arc<ScriptedTransport>, Arc<MemoryStore>) {
	let backend = Arc::new(MemoryStore::default());
	let store: Arc<dyn SessionStore> = backend.clone();
	let context = Arc::new(SessionContext::new(store));

	context
		.establish(Session::new("expiredABC", "validXYZ"))
		.await
		.expect("Seeding the session should succeed.");

	let transport = Arc::new(transport);
	let descriptor = BackendDescriptor::local().expect("Local descriptor should build.");
	let client = Client::with_http_client(descriptor, context, transport.clone());

	(client, transport, backend)
}

#[tokio::test]
async fn refresh_cycle_runs_original_then_refresh_then_retry() {
	let (client, transport, _) = build_client(ScriptedTransport::new([
		reply(401, ""),
		reply(200, r#"{"access":"freshDEF"}"#),
		reply(200, r#"[]"#),
	]))
	.await;
	let courses = client.courses().await.expect("Refresh cycle should succeed.");

	assert!(courses.is_empty());
	assert_eq!(
		transport.sent(),
		vec![
			("/api/cursos/".to_owned(), Some("Bearer expiredABC".to_owned())),
			("/api/token/refresh/".to_owned(), None),
			("/api/cursos/".to_owned(), Some("Bearer freshDEF".to_owned())),
		]
	);
}

#[tokio::test]
async fn network_failure_during_refresh_expires_the_session() {
	let (client, transport, store) =
		build_client(ScriptedTransport::new([reply(401, ""), Err(Refused)])).await;
	let err = client.courses().await.expect_err("Refresh should fail.");

	assert!(matches!(err, Error::SessionExpired { .. }), "Unexpected error: {err:?}.");
	assert!(store.is_empty());
	assert_eq!(transport.sent().len(), 2);
}

#[tokio::test]
async fn undecodable_refresh_body_expires_the_session() {
	let (client, _, store) =
		build_client(ScriptedTransport::new([reply(401, ""), reply(200, "<html></html>")])).await;
	let err = client.courses().await.expect_err("Refresh should fail.");

	assert!(matches!(err, Error::SessionExpired { .. }));
	assert!(store.is_empty());
}

#[tokio::test]
async fn network_failure_on_first_attempt_is_a_transport_error() {
	let (client, transport, store) = build_client(ScriptedTransport::new([Err(Refused)])).await;
	let err = client.courses().await.expect_err("Transport should fail.");

	assert!(matches!(err, Error::Transport(TransportError::Network { .. })));
	assert!(!err.requires_login());
	assert_eq!(transport.sent().len(), 1);
	assert!(!store.is_empty());
}

#[tokio::test]
async fn network_failure_on_retry_is_not_retried_again() {
	let (client, transport, store) = build_client(ScriptedTransport::new([
		reply(401, ""),
		reply(200, r#"{"access":"freshDEF"}"#),
		Err(Refused),
	]))
	.await;
	let err = client.courses().await.expect_err("Retry transport should fail.");

	assert!(matches!(err, Error::Transport(_)));
	assert_eq!(transport.sent().len(), 3);
	assert_eq!(client.metrics.retries(), 1);
	assert!(!store.is_empty());
}

#[tokio::test]
async fn held_refresh_guard_reports_pending_without_refreshing() {
	let (client, transport, store) = build_client(ScriptedTransport::new([reply(401, "")])).await;
	let guard = client.session.try_begin_refresh().expect("Guard should be free.");
	let err = client.courses().await.expect_err("Refresh in flight should fail fast.");

	drop(guard);

	assert!(matches!(err, Error::AuthorizationPending));
	assert!(!err.requires_login());
	assert_eq!(transport.sent().len(), 1);
	assert!(!store.is_empty());
}

#[tokio::test]
async fn token_refreshed_by_another_caller_is_reused() {
	let (client, transport, store) =
		build_client(ScriptedTransport::new([reply(401, ""), reply(200, "[]")])).await;

	// Another caller completes a refresh while the first attempt is in flight.
	*transport.interleave.lock() = Some(Interleave {
		at: 0,
		context: client.session.clone(),
		replacement: Some(Session::new("freshDEF", "validXYZ")),
	});

	client.courses().await.expect("Retry with the other caller's token should succeed.");

	assert_eq!(
		transport.sent(),
		vec![
			("/api/cursos/".to_owned(), Some("Bearer expiredABC".to_owned())),
			("/api/cursos/".to_owned(), Some("Bearer freshDEF".to_owned())),
		]
	);
	assert_eq!(client.metrics.refreshes(), 0);
	assert_eq!(store.get_item(ACCESS_TOKEN_KEY).as_deref(), Some("freshDEF"));
}

#[tokio::test]
async fn logout_while_refresh_is_pending_wins() {
	let (client, transport, store) = build_client(ScriptedTransport::new([
		reply(401, ""),
		reply(200, r#"{"access":"freshDEF","refresh":"nextXYZ"}"#),
		reply(200, "[]"),
	]))
	.await;

	// The user logs out while the refresh response is still on its way.
	*transport.interleave.lock() =
		Some(Interleave { at: 1, context: client.session.clone(), replacement: None });

	let err =
		client.courses().await.expect_err("Refresh after logout must not revive the session.");

	assert!(matches!(err, Error::SessionExpired { .. }), "Unexpected error: {err:?}.");
	assert_eq!(transport.sent().len(), 2);
	assert_eq!(client.metrics.retries(), 0);
	assert!(store.is_empty());
	assert!(!client.is_authenticated());
	assert!(client.restore().await.expect("Restore should succeed.").is_none());
}

#[tokio::test]
async fn avatar_retry_resends_the_same_multipart_body() {
	let (client, transport, _) = build_client(ScriptedTransport::new([
		reply(401, ""),
		reply(200, r#"{"access":"freshDEF"}"#),
		reply(200, r#"{"avatar":"/media/avatars/ana.png"}"#),
	]))
	.await;
	let update = client
		.upload_avatar("ana.png", b"\x89PNG", "image/png")
		.await
		.expect("Avatar upload should succeed after the refresh.");
	let bodies = transport.bodies.lock().clone();

	assert_eq!(update.avatar.as_deref(), Some("/media/avatars/ana.png"));
	assert_eq!(transport.sent()[2].0, "/api/usuarios/mi-perfil/avatar/");
	assert_eq!(bodies[0], bodies[2]);
	assert!(bodies[0].windows(4).any(|window| window == b"\x89PNG"));
}
