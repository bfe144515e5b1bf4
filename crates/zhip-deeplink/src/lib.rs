//! Deep-link handling for the Zhip wallet.
//!
//! This crate turns external URLs such as `zhip://send?to=0x1a2b3c&amount=1337`
//! into typed navigation destinations and decides when they reach the UI:
//!
//! - **Parsing**: [`DeepLink::parse`] validates scheme, destination and query
//!   parameters
//! - **Buffering**: while the app is PIN-locked only the most recent link is
//!   kept, and it is replayed once on unlock
//! - **Dispatch**: [`DeepLinkRouter::navigation`] hands out live subscriber
//!   streams
//! - **Analytics**: every attempt is reported to a [`Tracker`]
//!
//! # Quick Start
//!
//! ```rust
//! use zhip_deeplink::{AnalyticsEvent, DeepLink, DeepLinkRouter, RouterConfig};
//!
//! let router = DeepLinkRouter::new(RouterConfig::default())
//!     .with_tracker(|event: &AnalyticsEvent| println!("{event}"));
//! let mut navigation = router.navigation();
//!
//! assert!(router.handle("zhip://send?to=0x1a2b3c&amount=1337", Some("com.apple.mobilesafari")));
//! assert!(matches!(navigation.try_next(), Some(DeepLink::Send(_))));
//!
//! assert!(!router.handle("https://example.com/not-a-real-scheme", None));
//! ```

pub mod analytics;
pub mod config;
pub mod destination;
pub mod error;
pub mod navigator;
pub mod router;

// Re-export main types for convenience
pub use analytics::{AnalyticsEvent, Tracker, TracingTracker};
pub use config::{ConfigResult, RouterConfig, RouterConfigBuilder};
pub use destination::{Address, Amount, DeepLink, Transaction};
pub use error::{ConfigError, DeepLinkError, validate_address, validate_scheme};
pub use navigator::{NavigationStream, Navigator};
pub use router::DeepLinkRouter;

/// Result type for deep-link parsing.
pub type DeepLinkResult<T> = Result<T, DeepLinkError>;
