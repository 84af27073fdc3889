//! Atomic counters describing what the gateway did.

// std
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters for gateway activity.
#[derive(Debug, Default)]
pub struct GatewayMetrics {
	attempts: AtomicU64,
	refreshes: AtomicU64,
	retries: AtomicU64,
	pending: AtomicU64,
	expired: AtomicU64,
}
impl GatewayMetrics {
	/// Returns the number of protected requests issued (first attempts only).
	pub fn attempts(&self) -> u64 {
		self.attempts.load(Ordering::Relaxed)
	}

	/// Returns the number of refresh calls sent to the backend.
	pub fn refreshes(&self) -> u64 {
		self.refreshes.load(Ordering::Relaxed)
	}

	/// Returns the number of requests retried with a new access token.
	pub fn retries(&self) -> u64 {
		self.retries.load(Ordering::Relaxed)
	}

	/// Returns the number of `401`s that found a refresh already in flight.
	pub fn pending(&self) -> u64 {
		self.pending.load(Ordering::Relaxed)
	}

	/// Returns the number of sessions cleared after a failed refresh.
	pub fn expired(&self) -> u64 {
		self.expired.load(Ordering::Relaxed)
	}

	pub(crate) fn record_attempt(&self) {
		self.attempts.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_refresh(&self) {
		self.refreshes.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_retry(&self) {
		self.retries.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_pending(&self) {
		self.pending.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_expired(&self) {
		self.expired.fetch_add(1, Ordering::Relaxed);
	}
}
