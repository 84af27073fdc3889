// self
use crate::{_prelude::*, obs::Operation};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type Instrumented<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type Instrumented<F> = F;

/// Span wrapping one client operation.
///
/// Protected calls also carry the `user_id` taken from the access token, when it has one.
#[derive(Clone, Debug)]
pub struct RequestSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl RequestSpan {
	/// Creates a new span tagged with the provided operation + stage.
	pub fn new(operation: Operation, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"levelup_client.request",
				operation = operation.as_str(),
				stage,
				user_id = tracing::field::Empty,
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (operation, stage);

			Self {}
		}
	}

	/// Tags the span with the session owner. `None` leaves the field empty.
	pub fn record_user(&self, user_id: Option<i64>) {
		#[cfg(feature = "tracing")]
		{
			if let Some(user_id) = user_id {
				self.span.record("user_id", user_id);
			}
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = user_id;
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> Instrumented<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Emits a `debug` event for a session transition (login, refresh, logout).
pub fn session_event(operation: Operation, event: &'static str) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(operation = operation.as_str(), "{event}");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (operation, event);
	}
}

/// Emits a `warn` event for a failure that is handled internally.
pub fn session_warning(operation: Operation, event: &'static str, reason: &dyn Display) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(operation = operation.as_str(), reason = %reason, "{event}");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (operation, event, reason);
	}
}
