//! Deep-link module.
//!
//! This module turns incoming `zhip://` links into navigation destinations.
//!
//! # Examples
//!
//! ```rust,no_run
//! use zhip::deeplink::{DeepLink, DeepLinkRouter, RouterConfig};
//! ```

#[cfg(feature = "deeplink")]
pub use zhip_deeplink::*;
