//! Shared fixtures for deep-link router tests.

#![allow(dead_code)]

use std::sync::Arc;

use parking_lot::Mutex;
use rstest::*;
use zhip_deeplink::{AnalyticsEvent, DeepLinkRouter, RouterConfig, Tracker};

pub const SEND_LINK: &str = "zhip://send?to=0x1a2b3c&amount=1337";
pub const OTHER_SEND_LINK: &str = "zhip://send?to=0xdeadbeef&amount=42";
pub const FOREIGN_LINK: &str = "https://example.com/not-a-real-scheme";

/// Tracker that keeps every event in memory.
#[derive(Clone, Default)]
pub struct RecordingTracker {
	events: Arc<Mutex<Vec<AnalyticsEvent>>>,
}

impl RecordingTracker {
	pub fn events(&self) -> Vec<AnalyticsEvent> {
		self.events.lock().clone()
	}

	pub fn clear(&self) {
		self.events.lock().clear();
	}
}

impl Tracker for RecordingTracker {
	fn track(&self, event: &AnalyticsEvent) {
		self.events.lock().push(event.clone());
	}
}

/// Router wired to a recording tracker.
pub struct TrackedRouter {
	pub router: Arc<DeepLinkRouter>,
	pub tracker: RecordingTracker,
}

#[fixture]
pub fn tracked_router() -> TrackedRouter {
	init_tracing();
	let tracker = RecordingTracker::default();
	let router = DeepLinkRouter::new(RouterConfig::default()).with_tracker(tracker.clone());
	TrackedRouter {
		router: Arc::new(router),
		tracker,
	}
}

pub fn init_tracing() {
	let _ = tracing_subscriber::fmt()
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
		.with_test_writer()
		.try_init();
}
