//! Typed deep-link destinations and the URL grammar that produces them.
//!
//! Grammar: `<scheme>://<destination>[/]?key=value&...`, where the destination
//! may also be given as the first path segment (`<scheme>:///send?...`).
//! The only destination currently recognised is `send`:
//!
//! | key      | required | value                                  |
//! |----------|----------|----------------------------------------|
//! | `to`     | yes      | recipient [`Address`]                  |
//! | `amount` | no       | non-negative decimal [`Amount`]        |
//!
//! Unknown query keys are ignored. Userinfo and ports are rejected.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use url::{Position, Url};

use crate::DeepLinkResult;
use crate::config::RouterConfig;
use crate::error::{DeepLinkError, validate_address};

const SEND: &str = "send";
const PARAM_TO: &str = "to";
const PARAM_AMOUNT: &str = "amount";

/// A parsed navigation target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "destination", rename_all = "snake_case")]
pub enum DeepLink {
	/// Open the send scene prefilled with a transaction.
	Send(Transaction),
}

/// Payment prefilled by a `send` deep link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
	pub recipient: Address,
	pub amount: Option<Amount>,
}

/// Recipient address in hex or bech32 form, stored as received.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

/// Non-negative amount of ZIL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Amount(Decimal);

impl DeepLink {
	/// Parses a raw link using the default [`RouterConfig`].
	///
	/// # Examples
	///
	/// ```
	/// use zhip_deeplink::DeepLink;
	///
	/// let link = DeepLink::parse("zhip://send?to=0x1a2b3c&amount=1337").unwrap();
	/// let DeepLink::Send(tx) = link;
	/// assert_eq!(tx.recipient.as_str(), "0x1a2b3c");
	/// assert_eq!(tx.amount.unwrap().to_string(), "1337");
	/// ```
	pub fn parse(raw: &str) -> DeepLinkResult<Self> {
		Self::parse_with(raw, &RouterConfig::default())
	}

	/// Parses a raw link, accepting only the scheme and length limit of `config`.
	pub fn parse_with(raw: &str, config: &RouterConfig) -> DeepLinkResult<Self> {
		if raw.len() > config.max_link_length {
			return Err(DeepLinkError::TooLong {
				length: raw.len(),
				max: config.max_link_length,
			});
		}
		let url = Url::parse(raw)?;
		Self::from_url(&url, config)
	}

	/// Maps an already parsed URL to a destination.
	pub fn from_url(url: &Url, config: &RouterConfig) -> DeepLinkResult<Self> {
		if !url.scheme().eq_ignore_ascii_case(&config.scheme) {
			return Err(DeepLinkError::UnsupportedScheme {
				found: url.scheme().to_string(),
				expected: config.scheme.clone(),
			});
		}

		let host = url.host_str().unwrap_or_default();
		if !url.username().is_empty() || url.password().is_some() {
			let authority = &url[Position::BeforeUsername..Position::AfterPort];
			return Err(DeepLinkError::UnknownDestination(authority.to_string()));
		}
		if let Some(port) = url.port() {
			return Err(DeepLinkError::UnexpectedPath(format!("{host}:{port}")));
		}

		let mut segments = url.path().split('/').filter(|s| !s.is_empty());
		let name = if host.is_empty() {
			segments.next().unwrap_or_default()
		} else {
			host
		};

		if !name.eq_ignore_ascii_case(SEND) {
			return Err(DeepLinkError::UnknownDestination(name.to_string()));
		}

		let rest: Vec<&str> = segments.collect();
		if !rest.is_empty() {
			return Err(DeepLinkError::UnexpectedPath(rest.join("/")));
		}

		Transaction::from_query(url).map(DeepLink::Send)
	}

	/// Renders the canonical link for this destination.
	///
	/// Parsing the result with the same configuration yields an equal value.
	pub fn to_url(&self, config: &RouterConfig) -> String {
		match self {
			DeepLink::Send(tx) => {
				let mut query = url::form_urlencoded::Serializer::new(String::new());
				query.append_pair(PARAM_TO, tx.recipient.as_str());
				if let Some(amount) = &tx.amount {
					query.append_pair(PARAM_AMOUNT, &amount.to_string());
				}
				format!("{}://{}?{}", config.scheme, SEND, query.finish())
			}
		}
	}
}

impl FromStr for DeepLink {
	type Err = DeepLinkError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}

impl TryFrom<&Url> for DeepLink {
	type Error = DeepLinkError;

	fn try_from(url: &Url) -> Result<Self, Self::Error> {
		Self::from_url(url, &RouterConfig::default())
	}
}

impl Transaction {
	pub fn new(recipient: Address, amount: Option<Amount>) -> Self {
		Self { recipient, amount }
	}

	fn from_query(url: &Url) -> DeepLinkResult<Self> {
		let mut to = None;
		let mut amount = None;

		for (key, value) in url.query_pairs() {
			let slot = match &*key {
				PARAM_TO => (&mut to, PARAM_TO),
				PARAM_AMOUNT => (&mut amount, PARAM_AMOUNT),
				_ => continue,
			};
			if slot.0.replace(value.into_owned()).is_some() {
				return Err(DeepLinkError::DuplicateParameter(slot.1));
			}
		}

		let recipient = to
			.ok_or(DeepLinkError::MissingParameter(PARAM_TO))
			.and_then(Address::new)?;
		let amount = match amount {
			Some(raw) if !raw.is_empty() => Some(raw.parse::<Amount>()?),
			_ => None,
		};

		Ok(Self { recipient, amount })
	}
}

impl Address {
	/// Creates a validated address.
	///
	/// # Errors
	///
	/// Returns `DeepLinkError::InvalidAddress` if `address` is neither hex nor bech32.
	pub fn new(address: impl Into<String>) -> DeepLinkResult<Self> {
		let address = address.into();
		validate_address(&address)?;
		Ok(Self(address))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for Address {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl TryFrom<String> for Address {
	type Error = DeepLinkError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}

impl From<Address> for String {
	fn from(address: Address) -> Self {
		address.0
	}
}

impl Amount {
	/// Creates an amount, rejecting negative values.
	pub fn new(value: Decimal) -> DeepLinkResult<Self> {
		if value.is_sign_negative() {
			return Err(DeepLinkError::InvalidAmount(value.to_string()));
		}
		Ok(Self(value))
	}

	pub fn as_decimal(&self) -> Decimal {
		self.0
	}
}

impl FromStr for Amount {
	type Err = DeepLinkError;

	/// Accepts plain decimal notation only: digits with at most one `.`,
	/// no sign, exponent or digit separators. Fractions that `Decimal`
	/// cannot hold exactly are rejected instead of rounded.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let invalid = || DeepLinkError::InvalidAmount(s.to_string());
		if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit() || c == '.') {
			return Err(invalid());
		}
		let value = Decimal::from_str(s).map_err(|_| invalid())?;
		let fraction_digits = s.split_once('.').map_or(0, |(_, fraction)| fraction.len());
		if fraction_digits > value.scale() as usize {
			return Err(invalid());
		}
		Self::new(value)
	}
}

impl fmt::Display for Amount {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Display::fmt(&self.0, f)
	}
}

impl TryFrom<String> for Amount {
	type Error = DeepLinkError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

impl From<Amount> for String {
	fn from(amount: Amount) -> Self {
		amount.to_string()
	}
}
