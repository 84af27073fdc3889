#![cfg(feature = "reqwest")]

mod common;

// self
use common::*;
use levelup_client::model::{AccessibilityPreferences, FontSize, ProfileUpdate};

const AVATAR: &str = "/api/usuarios/mi-perfil/avatar/";
const PROFILE: &str = "/api/usuarios/mi-perfil/";

fn profile_body(first_name: &str, high_contrast: bool) -> serde_json::Value {
	json!({
		"id": 7,
		"username": "ana",
		"email": "ana@example.com",
		"first_name": first_name,
		"last_name": "Pérez",
		"avatar": null,
		"fecha_nacimiento": "2001-04-12",
		"telefono": null,
		"biografia": "Aprendiendo LSC.",
		"genero": "F",
		"pais": "Colombia",
		"ciudad": "Medellín",
		"idioma_preferido": "es-co",
		"nivel_educativo": "universitario",
		"ocupacion": null,
		"preferencias_accesibilidad": {
			"transcripciones_activas": true,
			"tamano_fuente": "grande",
			"contraste_alto": high_contrast
		}
	})
}

#[tokio::test]
async fn my_profile_decodes_the_backend_fields() {
	let server = MockServer::start_async().await;
	let (client, _) = build_test_client(&server, Some(Session::new("validAAA", "validXYZ"))).await;
	let body = profile_body("Ana", false);
	let profile = server
		.mock_async(|when, then| {
			when.method(GET).path(PROFILE).header("authorization", "Bearer validAAA");
			then.status(200).json_body(body.clone());
		})
		.await;
	let me = client.my_profile().await.expect("Profile should load.");

	profile.assert_async().await;
	assert_eq!(me.id, 7);
	assert_eq!(me.display_name(), "Ana Pérez");
	assert_eq!(me.city.as_deref(), Some("Medellín"));
	assert_eq!(me.accessibility.font_size, FontSize::Large);
}

#[tokio::test]
async fn update_profile_patches_only_changed_fields() {
	let server = MockServer::start_async().await;
	let (client, _) = build_test_client(&server, Some(Session::new("validAAA", "validXYZ"))).await;
	let body = profile_body("Ana María", true);
	let patch = server
		.mock_async(|when, then| {
			when.method(PATCH).path(PROFILE).json_body(json!({
				"first_name": "Ana María",
				"preferencias_accesibilidad": {
					"transcripciones_activas": true,
					"tamano_fuente": "grande",
					"contraste_alto": true
				}
			}));
			then.status(200).json_body(body.clone());
		})
		.await;
	let update = ProfileUpdate {
		first_name: Some("Ana María".into()),
		accessibility: Some(AccessibilityPreferences {
			transcriptions: true,
			font_size: FontSize::Large,
			high_contrast: true,
		}),
		..Default::default()
	};
	let me = client.update_profile(&update).await.expect("Profile update should succeed.");

	patch.assert_async().await;
	assert_eq!(me.first_name, "Ana María");
	assert!(me.accessibility.high_contrast);
}

#[tokio::test]
async fn malformed_resource_bodies_are_decode_errors() {
	let server = MockServer::start_async().await;
	let (client, store) =
		build_test_client(&server, Some(Session::new("validAAA", "validXYZ"))).await;
	let _courses = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/cursos/");
			then.status(200).json_body(json!({ "results": [] }));
		})
		.await;
	let err = client.courses().await.expect_err("An object is not a course list.");

	assert!(matches!(err, Error::Decode(_)), "Unexpected error: {err:?}.");
	assert_eq!(err.status(), Some(200));
	assert!(stored_tokens(&store).is_some());
}

#[tokio::test]
async fn avatar_upload_goes_through_the_refresh_path() {
	let server = MockServer::start_async().await;
	let (client, _) =
		build_test_client(&server, Some(Session::new("expiredABC", "validXYZ"))).await;
	let rejected = server
		.mock_async(|when, then| {
			when.method(PUT).path(AVATAR).header("authorization", "Bearer expiredABC");
			then.status(401);
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/token/refresh/");
			then.status(200).json_body(json!({ "access": "freshDEF" }));
		})
		.await;
	let accepted = server
		.mock_async(|when, then| {
			when.method(PUT).path(AVATAR).header("authorization", "Bearer freshDEF");
			then.status(200)
				.json_body(json!({ "avatar": "http://127.0.0.1:8000/media/avatars/ana.png" }));
		})
		.await;
	let update = client
		.upload_avatar("ana.png", b"\x89PNG\r\n", "image/png")
		.await
		.expect("Avatar upload should succeed after the refresh.");

	rejected.assert_calls_async(1).await;
	refresh.assert_calls_async(1).await;
	accepted.assert_calls_async(1).await;
	assert_eq!(update.avatar.as_deref(), Some("http://127.0.0.1:8000/media/avatars/ana.png"));
}
