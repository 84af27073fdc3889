//! Course catalogue entries (`api/cursos/`).

// self
use crate::_prelude::*;

/// One course of the catalogue.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
	/// Backend course id.
	#[serde(rename = "id_curso")]
	pub id: i64,
	/// Course title.
	#[serde(rename = "nombre")]
	pub name: String,
	/// Course description.
	#[serde(rename = "descripcion", default)]
	pub description: String,
	/// Difficulty level label.
	#[serde(rename = "nivel", default)]
	pub level: String,
	/// Cover image URL.
	#[serde(rename = "imagen_url", default)]
	pub image_url: Option<String>,
	/// Whether the course is open for enrollment.
	#[serde(rename = "activo", default = "active")]
	pub active: bool,
}

fn active() -> bool {
	true
}
