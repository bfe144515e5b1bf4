//! Router configuration.
//!
//! ```toml
//! scheme = "zhip"
//! max_link_length = 2048
//! start_locked = false
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, validate_scheme};

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Default URL scheme the wallet is registered for.
pub const DEFAULT_SCHEME: &str = "zhip";

/// Default upper bound on the byte length of an incoming link.
pub const DEFAULT_MAX_LINK_LENGTH: usize = 2048;

/// Configuration for [`DeepLinkRouter`](crate::DeepLinkRouter) and link parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RouterConfig {
	/// URL scheme accepted by the parser (compared case-insensitively)
	pub scheme: String,

	/// Links longer than this many bytes are rejected without parsing
	pub max_link_length: usize,

	/// Whether the router starts in the locked state
	pub start_locked: bool,
}

impl Default for RouterConfig {
	fn default() -> Self {
		Self {
			scheme: String::from(DEFAULT_SCHEME),
			max_link_length: DEFAULT_MAX_LINK_LENGTH,
			start_locked: false,
		}
	}
}

impl RouterConfig {
	/// Creates a new builder.
	///
	/// # Examples
	///
	/// ```
	/// use zhip_deeplink::RouterConfig;
	///
	/// let config = RouterConfig::builder()
	///     .scheme("zhip")
	///     .max_link_length(1024)
	///     .start_locked(true)
	///     .build()
	///     .unwrap();
	/// assert!(config.start_locked);
	/// ```
	pub fn builder() -> RouterConfigBuilder {
		RouterConfigBuilder::default()
	}

	/// Parses and validates a TOML document. Missing keys take their defaults.
	pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
		let config: Self = toml::from_str(source)?;
		config.validate()?;
		Ok(config)
	}

	/// Reads, parses and validates a TOML file.
	pub fn from_toml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
		let path = path.as_ref();
		let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
			path: path.display().to_string(),
			source,
		})?;
		let config = Self::from_toml_str(&source)?;
		tracing::debug!(
			path = %path.display(),
			scheme = %config.scheme,
			"loaded deep link router configuration"
		);
		Ok(config)
	}

	/// Checks invariants that deserialization cannot express.
	///
	/// # Errors
	///
	/// - `ConfigError::InvalidScheme` if the scheme is not a valid URL scheme
	/// - `ConfigError::InvalidMaxLinkLength` if the length limit is zero
	pub fn validate(&self) -> ConfigResult<()> {
		validate_scheme(&self.scheme)?;
		if self.max_link_length == 0 {
			return Err(ConfigError::InvalidMaxLinkLength);
		}
		Ok(())
	}
}

/// Builder for [`RouterConfig`].
#[derive(Debug, Default)]
pub struct RouterConfigBuilder {
	scheme: Option<String>,
	max_link_length: Option<usize>,
	start_locked: Option<bool>,
}

impl RouterConfigBuilder {
	pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
		self.scheme = Some(scheme.into());
		self
	}

	pub fn max_link_length(mut self, max: usize) -> Self {
		self.max_link_length = Some(max);
		self
	}

	pub fn start_locked(mut self, locked: bool) -> Self {
		self.start_locked = Some(locked);
		self
	}

	/// Builds and validates the configuration.
	pub fn build(self) -> ConfigResult<RouterConfig> {
		let defaults = RouterConfig::default();
		let config = RouterConfig {
			scheme: self.scheme.unwrap_or(defaults.scheme),
			max_link_length: self.max_link_length.unwrap_or(defaults.max_link_length),
			start_locked: self.start_locked.unwrap_or(defaults.start_locked),
		};
		config.validate()?;
		Ok(config)
	}
}
