// self
use crate::{
	_prelude::*,
	backend::Endpoint,
	client::Client,
	http::{ApiHttpClient, ApiRequest},
	model::Course,
};

impl<C> Client<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Lists the course catalogue.
	pub async fn courses(&self) -> Result<Vec<Course>> {
		self.send_json(ApiRequest::get(self.descriptor.endpoint(Endpoint::Courses))).await
	}
}
