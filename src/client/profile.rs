//! The authenticated user's own profile.

// self
use crate::{
	_prelude::*,
	backend::Endpoint,
	client::Client,
	http::{ApiHttpClient, ApiRequest},
	model::{AvatarUpdate, ProfileUpdate, UserProfile},
};

impl<C> Client<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Fetches the current user's profile.
	pub async fn my_profile(&self) -> Result<UserProfile> {
		self.send_json(ApiRequest::get(self.descriptor.endpoint(Endpoint::Profile))).await
	}

	/// Applies a partial update and returns the stored profile.
	pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile> {
		let request = ApiRequest::patch(self.descriptor.endpoint(Endpoint::Profile)).json(update)?;

		self.send_json(request).await
	}

	/// Replaces the current user's avatar and returns the new image URL.
	///
	/// The image goes out as the `avatar` part of a `multipart/form-data` body.
	pub async fn upload_avatar(
		&self,
		file_name: &str,
		bytes: &[u8],
		content_type: &str,
	) -> Result<AvatarUpdate> {
		let request = ApiRequest::put(self.descriptor.endpoint(Endpoint::Avatar))
			.multipart_file("avatar", file_name, content_type, bytes)?;

		self.send_json(request).await
	}
}
