//! Analytics events reported while handling incoming links.

use std::fmt;

/// Event emitted by [`DeepLinkRouter::handle`](crate::DeepLinkRouter::handle).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AnalyticsEvent {
	/// Always emitted first, before the link is looked at.
	HandlingIncomingLink,
	/// Identifier of the application that opened the link.
	SourceOfLink { sender_id: String },
	/// The link did not match the deep-link grammar.
	FailedToParseLink,
}

impl AnalyticsEvent {
	/// Stable name reported to the analytics backend.
	pub fn event_name(&self) -> String {
		match self {
			Self::HandlingIncomingLink => "handlingIncomingDeeplink".to_string(),
			Self::SourceOfLink { sender_id } => format!("sourceOfDeepLink: {}", sender_id),
			Self::FailedToParseLink => "failedToParseLink".to_string(),
		}
	}
}

impl fmt::Display for AnalyticsEvent {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.event_name())
	}
}

/// Receiver of analytics events.
///
/// Tracking is fire-and-forget: implementations must not block and have no
/// way to report failure back to the router.
pub trait Tracker: Send + Sync {
	fn track(&self, event: &AnalyticsEvent);
}

impl<F> Tracker for F
where
	F: Fn(&AnalyticsEvent) + Send + Sync,
{
	fn track(&self, event: &AnalyticsEvent) {
		self(event)
	}
}

/// Tracker that records events as `tracing` events on the `zhip::analytics` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingTracker;

impl Tracker for TracingTracker {
	fn track(&self, event: &AnalyticsEvent) {
		tracing::info!(target: "zhip::analytics", event = %event, "track");
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case(AnalyticsEvent::HandlingIncomingLink, "handlingIncomingDeeplink")]
	#[case(
		AnalyticsEvent::SourceOfLink { sender_id: "com.apple.mobilesafari".to_string() },
		"sourceOfDeepLink: com.apple.mobilesafari"
	)]
	#[case(AnalyticsEvent::FailedToParseLink, "failedToParseLink")]
	fn test_event_name(#[case] event: AnalyticsEvent, #[case] expected: &str) {
		assert_eq!(event.event_name(), expected);
		assert_eq!(event.to_string(), expected);
	}
}
