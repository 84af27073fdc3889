//! The authenticated user's own profile (`api/usuarios/mi-perfil/`).

// self
use crate::_prelude::*;

/// Font size choices offered by the accessibility preferences.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontSize {
	/// `pequeño`.
	#[serde(rename = "pequeño")]
	Small,
	/// `mediano`.
	#[default]
	#[serde(rename = "mediano")]
	Medium,
	/// `grande`.
	#[serde(rename = "grande")]
	Large,
}

/// Accessibility preferences attached to every profile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessibilityPreferences {
	/// Show transcriptions alongside sign videos.
	#[serde(rename = "transcripciones_activas", default = "enabled")]
	pub transcriptions: bool,
	/// Interface font size.
	#[serde(rename = "tamano_fuente", default)]
	pub font_size: FontSize,
	/// High-contrast theme.
	#[serde(rename = "contraste_alto", default)]
	pub high_contrast: bool,
}
impl Default for AccessibilityPreferences {
	fn default() -> Self {
		Self { transcriptions: true, font_size: FontSize::default(), high_contrast: false }
	}
}

fn enabled() -> bool {
	true
}

/// Profile as returned by the backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
	/// Backend user id.
	pub id: i64,
	/// Username.
	#[serde(default)]
	pub username: String,
	/// Contact e-mail.
	#[serde(default)]
	pub email: String,
	/// Given name.
	#[serde(default)]
	pub first_name: String,
	/// Family name.
	#[serde(default)]
	pub last_name: String,
	/// Avatar image URL.
	#[serde(default)]
	pub avatar: Option<String>,
	/// Date of birth (`YYYY-MM-DD`).
	#[serde(rename = "fecha_nacimiento", default)]
	pub birth_date: Option<String>,
	/// Phone number.
	#[serde(rename = "telefono", default)]
	pub phone: Option<String>,
	/// Free-form biography.
	#[serde(rename = "biografia", default)]
	pub biography: Option<String>,
	/// Gender choice key.
	#[serde(rename = "genero", default)]
	pub gender: Option<String>,
	/// Country.
	#[serde(rename = "pais", default)]
	pub country: Option<String>,
	/// City.
	#[serde(rename = "ciudad", default)]
	pub city: Option<String>,
	/// Preferred interface language (`es-co`, `es`, `en`).
	#[serde(rename = "idioma_preferido", default)]
	pub preferred_language: Option<String>,
	/// Education level choice key.
	#[serde(rename = "nivel_educativo", default)]
	pub education_level: Option<String>,
	/// Occupation.
	#[serde(rename = "ocupacion", default)]
	pub occupation: Option<String>,
	/// Accessibility preferences.
	#[serde(rename = "preferencias_accesibilidad", default)]
	pub accessibility: AccessibilityPreferences,
}
impl UserProfile {
	/// Given and family name joined, falling back to the username.
	pub fn display_name(&self) -> String {
		let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
		let full = full.trim();

		if full.is_empty() { self.username.clone() } else { full.to_owned() }
	}
}

/// Partial profile update sent with `PATCH`; unset fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
	/// New username.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub username: Option<String>,
	/// New e-mail.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
	/// New given name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub first_name: Option<String>,
	/// New family name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub last_name: Option<String>,
	/// New biography.
	#[serde(rename = "biografia", skip_serializing_if = "Option::is_none")]
	pub biography: Option<String>,
	/// New country.
	#[serde(rename = "pais", skip_serializing_if = "Option::is_none")]
	pub country: Option<String>,
	/// New city.
	#[serde(rename = "ciudad", skip_serializing_if = "Option::is_none")]
	pub city: Option<String>,
	/// New preferred language.
	#[serde(rename = "idioma_preferido", skip_serializing_if = "Option::is_none")]
	pub preferred_language: Option<String>,
	/// New accessibility preferences.
	#[serde(rename = "preferencias_accesibilidad", skip_serializing_if = "Option::is_none")]
	pub accessibility: Option<AccessibilityPreferences>,
}
impl ProfileUpdate {
	/// Returns `true` when the update would not change anything.
	pub fn is_empty(&self) -> bool {
		*self == Self::default()
	}
}

/// `PUT api/usuarios/mi-perfil/avatar/` success body.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct AvatarUpdate {
	/// URL of the stored avatar image.
	#[serde(default)]
	pub avatar: Option<String>,
}
