//! # Zhip
//!
//! Client-side navigation core of the Zhip wallet.
//!
//! ## Feature Flags
//!
//! - `deeplink` (default) - Deep-link parsing, PIN-lock buffering and navigation dispatch
//!
//! ## Quick Example
//!
//! ```rust
//! use zhip::deeplink::DeepLinkRouter;
//!
//! let router = DeepLinkRouter::default();
//! assert!(router.handle("zhip://send?to=0x1a2b3c", None));
//! ```

pub mod deeplink;
