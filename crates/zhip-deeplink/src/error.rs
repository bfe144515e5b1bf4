//! Error types for deep-link parsing and router configuration.

use bech32::Bech32;
use bech32::primitives::decode::CheckedHrpstring;
use thiserror::Error;

/// Maximum number of hex digits in a hex encoded recipient address.
pub const MAX_HEX_ADDRESS_DIGITS: usize = 40;

/// Number of bytes carried by a bech32 encoded recipient.
pub const BECH32_PAYLOAD_BYTES: usize = 20;

const BECH32_HRP: &str = "zil";

/// Reasons an incoming link could not be turned into a destination.
///
/// All variants are parse failures: they are reported to analytics and
/// translated into a `false` result by the router, never propagated further.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeepLinkError {
	/// The raw link exceeds the configured maximum length.
	#[error("link is {length} bytes long, maximum accepted is {max}")]
	TooLong { length: usize, max: usize },

	/// The raw link is not a syntactically valid URL.
	#[error("invalid URL: {0}")]
	InvalidUrl(#[from] url::ParseError),

	/// The URL uses a scheme other than the one the app is registered for.
	#[error("unsupported URL scheme: {found}, expected {expected}")]
	UnsupportedScheme { found: String, expected: String },

	/// The host or path does not name a known destination.
	#[error("unknown deep link destination: {0:?}")]
	UnknownDestination(String),

	/// The destination was recognised but the URL has trailing path segments.
	#[error("unexpected path after destination: {0}")]
	UnexpectedPath(String),

	/// A required query parameter is absent.
	#[error("missing required query parameter: {0}")]
	MissingParameter(&'static str),

	/// A query parameter that must be unique occurs more than once.
	#[error("query parameter given more than once: {0}")]
	DuplicateParameter(&'static str),

	/// The recipient address is not hex or bech32 encoded.
	#[error("invalid recipient address: {0}")]
	InvalidAddress(String),

	/// The amount is not a non-negative decimal number.
	#[error("invalid amount: {0}")]
	InvalidAmount(String),
}

/// Errors raised while loading or validating a [`RouterConfig`](crate::RouterConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
	/// The configuration file could not be read.
	#[error("failed to read configuration file {path}")]
	Io {
		path: String,
		#[source]
		source: std::io::Error,
	},

	/// The configuration is not valid TOML or has the wrong shape.
	#[error("failed to parse configuration: {0}")]
	Parse(#[from] toml::de::Error),

	/// The scheme is empty or contains characters not allowed in a URL scheme.
	#[error("invalid URL scheme in configuration: {0:?}")]
	InvalidScheme(String),

	/// The maximum link length must be positive.
	#[error("max_link_length must be greater than zero")]
	InvalidMaxLinkLength,
}

/// Validates a recipient address.
///
/// Accepted forms:
/// - hex: optional `0x`/`0X` prefix followed by 1 to 40 hex digits
/// - bech32: `zil` human readable part, valid bech32 checksum and a
///   20 byte payload, either all lowercase or all uppercase
///
/// # Errors
///
/// Returns `DeepLinkError::InvalidAddress` if the format is invalid.
pub fn validate_address(address: &str) -> Result<(), DeepLinkError> {
	if is_bech32_address(address) || is_hex_address(address) {
		return Ok(());
	}
	Err(DeepLinkError::InvalidAddress(address.to_string()))
}

/// Validates a URL scheme as used in [`RouterConfig`](crate::RouterConfig).
///
/// A scheme starts with an ASCII letter followed by letters, digits, `+`, `-` or `.`.
///
/// # Errors
///
/// Returns `ConfigError::InvalidScheme` if the scheme is malformed.
pub fn validate_scheme(scheme: &str) -> Result<(), ConfigError> {
	let mut chars = scheme.chars();
	let starts_with_letter = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
	let rest_valid = chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
	if starts_with_letter && rest_valid {
		Ok(())
	} else {
		Err(ConfigError::InvalidScheme(scheme.to_string()))
	}
}

fn is_hex_address(address: &str) -> bool {
	let digits = address
		.strip_prefix("0x")
		.or_else(|| address.strip_prefix("0X"))
		.unwrap_or(address);
	!digits.is_empty()
		&& digits.len() <= MAX_HEX_ADDRESS_DIGITS
		&& digits.chars().all(|c| c.is_ascii_hexdigit())
}

fn is_bech32_address(address: &str) -> bool {
	let has_lower = address.bytes().any(|b| b.is_ascii_lowercase());
	let has_upper = address.bytes().any(|b| b.is_ascii_uppercase());
	if has_lower && has_upper {
		return false;
	}
	match CheckedHrpstring::new::<Bech32>(address) {
		Ok(checked) => {
			checked.hrp().to_lowercase() == BECH32_HRP
				&& checked.byte_iter().count() == BECH32_PAYLOAD_BYTES
		}
		Err(_) => false,
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case("0x1a2b3c", true)]
	#[case("1a2b3c", true)]
	#[case("0X1A2B3C", true)]
	#[case("0x7Bb3b0E8A59f3f61d9Bff038f4AeB42cAE2ECce8", true)]
	#[case("zil10wemp699nulkrkdl7qu0ft459jhzan8g6r5lh7", true)]
	#[case("ZIL10WEMP699NULKRKDL7QU0FT459JHZAN8G6R5LH7", true)]
	#[case("", false)]
	#[case("0x", false)]
	#[case("0xZZ", false)]
	#[case("0x7Bb3b0E8A59f3f61d9Bff038f4AeB42cAE2ECce8a", false)]
	#[case("zil10wemp699nulkrkdl7qu0ft459jhzan8g6r5lh", false)]
	#[case("zil10wemp699nulkrkdl7qu0ft459jhzan8g6r5lh8", false)]
	#[case("Zil10wemp699nulkrkdl7qu0ft459jhzan8g6r5lh7", false)]
	#[case("zil1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqq", false)]
	#[case("zil1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqq6a5ydc", false)]
	#[case("bc10wemp699nulkrkdl7qu0ft459jhzan8gy8zzqm", false)]
	#[case("zil1bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb", false)]
	fn test_validate_address(#[case] address: &str, #[case] expected_valid: bool) {
		let result = validate_address(address);
		assert_eq!(result.is_ok(), expected_valid, "address: {}", address);
	}

	#[rstest]
	#[case("zhip", true)]
	#[case("zhip-dev", true)]
	#[case("z1.beta+x", true)]
	#[case("", false)]
	#[case("1zhip", false)]
	#[case("zh ip", false)]
	#[case("zhip://", false)]
	fn test_validate_scheme(#[case] scheme: &str, #[case] expected_valid: bool) {
		let result = validate_scheme(scheme);
		assert_eq!(result.is_ok(), expected_valid, "scheme: {}", scheme);
	}
}
