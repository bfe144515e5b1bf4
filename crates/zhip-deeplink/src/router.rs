//! Deep-link router: parses incoming links and forwards or buffers them
//! depending on whether the app is PIN-locked.
//!
//! ```text
//!            handle(link)
//!                 │
//!        parse ───┴─── failure ──▶ FailedToParseLink, false
//!          │
//!       locked? ── yes ──▶ buffer = link (overwrite)
//!          │                        │
//!          no               unlock_and_flush()
//!          │                        │
//!          └──────▶ navigation ◀────┘
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use crate::DeepLinkResult;
use crate::analytics::{AnalyticsEvent, Tracker, TracingTracker};
use crate::config::RouterConfig;
use crate::destination::DeepLink;
use crate::navigator::{NavigationStream, Navigator};

/// Routes parsed deep links to navigation subscribers.
///
/// One instance is expected per process; share it with `Arc`.
///
/// # Examples
///
/// ```
/// use zhip_deeplink::{DeepLinkRouter, RouterConfig};
///
/// let router = DeepLinkRouter::new(RouterConfig::default());
/// let mut navigation = router.navigation();
///
/// router.lock_buffering();
/// assert!(router.handle("zhip://send?to=0x1a2b3c&amount=1337", None));
/// assert!(navigation.try_next().is_none());
///
/// router.unlock_and_flush();
/// assert!(navigation.try_next().is_some());
/// ```
pub struct DeepLinkRouter {
	config: RouterConfig,
	tracker: Arc<dyn Tracker>,
	/// Most recent link received while locked. Also serializes lock transitions.
	buffer: Mutex<Option<DeepLink>>,
	/// Written only while `buffer` is held; read lock-free by the navigator gate.
	locked: Arc<AtomicBool>,
	navigator: Navigator<DeepLink>,
}

impl DeepLinkRouter {
	/// Creates a router reporting analytics through [`TracingTracker`].
	pub fn new(config: RouterConfig) -> Self {
		let locked = Arc::new(AtomicBool::new(config.start_locked));
		Self {
			config,
			tracker: Arc::new(TracingTracker),
			buffer: Mutex::new(None),
			navigator: Navigator::gated(Arc::clone(&locked)),
			locked,
		}
	}

	/// Replaces the analytics tracker.
	pub fn with_tracker<T>(mut self, tracker: T) -> Self
	where
		T: Tracker + 'static,
	{
		self.tracker = Arc::new(tracker);
		self
	}

	pub fn config(&self) -> &RouterConfig {
		&self.config
	}

	/// Handles an incoming link, returning whether it was recognised.
	///
	/// `sender_id` identifies the application that opened the link; blank
	/// values are ignored.
	pub fn handle(&self, raw_link: &str, sender_id: Option<&str>) -> bool {
		self.handle_detailed(raw_link, sender_id).is_ok()
	}

	/// Same as [`handle`](Self::handle) but returns the destination or the parse error.
	pub fn handle_detailed(
		&self,
		raw_link: &str,
		sender_id: Option<&str>,
	) -> DeepLinkResult<DeepLink> {
		self.track(AnalyticsEvent::HandlingIncomingLink);

		if let Some(sender_id) = sender_id.map(str::trim).filter(|id| !id.is_empty()) {
			self.track(AnalyticsEvent::SourceOfLink {
				sender_id: sender_id.to_string(),
			});
		}

		let destination = match DeepLink::parse_with(raw_link, &self.config) {
			Ok(destination) => destination,
			Err(error) => {
				tracing::debug!(%error, length = raw_link.len(), "failed to parse deep link");
				self.track(AnalyticsEvent::FailedToParseLink);
				return Err(error);
			}
		};

		self.route(destination.clone());
		Ok(destination)
	}

	/// Marks the app as locked. Links handled from now on are buffered.
	pub fn lock_buffering(&self) {
		let _buffer = self.buffer.lock();
		if !self.locked.swap(true, Ordering::AcqRel) {
			tracing::debug!("deep link buffering enabled");
		}
	}

	/// Marks the app as unlocked and forwards the buffered link, if any.
	///
	/// The buffer is emptied before forwarding, so a link is never replayed twice.
	pub fn unlock_and_flush(&self) {
		let mut buffer = self.buffer.lock();
		self.locked.store(false, Ordering::Release);

		if let Some(destination) = buffer.take() {
			let delivered = self.navigator.next(destination);
			tracing::debug!(delivered, "flushed buffered deep link");
		}
	}

	/// Subscribes to destinations forwarded from now on.
	pub fn navigation(&self) -> NavigationStream<DeepLink> {
		self.navigator.subscribe()
	}

	pub fn is_locked(&self) -> bool {
		self.locked.load(Ordering::Acquire)
	}

	/// Copy of the link waiting for unlock.
	pub fn buffered(&self) -> Option<DeepLink> {
		self.buffer.lock().clone()
	}

	fn route(&self, destination: DeepLink) {
		let mut buffer = self.buffer.lock();
		if self.locked.load(Ordering::Acquire) {
			if buffer.replace(destination).is_some() {
				tracing::debug!("replaced previously buffered deep link");
			} else {
				tracing::debug!("app is locked, buffering deep link");
			}
		} else {
			let delivered = self.navigator.next(destination);
			tracing::debug!(delivered, "forwarded deep link");
		}
	}

	fn track(&self, event: AnalyticsEvent) {
		self.tracker.track(&event);
	}
}

impl Default for DeepLinkRouter {
	fn default() -> Self {
		Self::new(RouterConfig::default())
	}
}
