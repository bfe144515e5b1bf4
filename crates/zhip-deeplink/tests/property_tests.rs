//! Property-based tests for link handling.
//!
//! - Arbitrary input never panics and only well-formed links are accepted
//! - Rejected links never change lock state or the buffer
//! - Well-formed send links always produce exactly one emission or buffer

use proptest::prelude::*;
use zhip_deeplink::{DeepLink, DeepLinkRouter, RouterConfig};

fn hex_address() -> impl Strategy<Value = String> {
	("(0x)?", "[0-9a-fA-F]{1,40}").prop_map(|(prefix, digits)| format!("{prefix}{digits}"))
}

fn amount() -> impl Strategy<Value = Option<String>> {
	proptest::option::of("[0-9]{1,12}(\\.[0-9]{1,6})?")
}

proptest! {
	#[test]
	fn arbitrary_input_never_mutates_state_when_rejected(raw in ".*", locked in any::<bool>()) {
		let router = DeepLinkRouter::default();
		let mut navigation = router.navigation();
		if locked {
			router.lock_buffering();
		}

		let handled = router.handle(&raw, None);

		prop_assert_eq!(handled, DeepLink::parse(&raw).is_ok());
		if !handled {
			prop_assert_eq!(router.is_locked(), locked);
			prop_assert!(router.buffered().is_none());
			prop_assert!(navigation.try_next().is_none());
		}
	}

	#[test]
	fn scheme_prefixed_garbage_never_panics(rest in "[ -~]{0,64}") {
		let router = DeepLinkRouter::default();
		let _ = router.handle(&format!("zhip://{rest}"), Some(rest.as_str()));
	}

	#[test]
	fn well_formed_send_is_emitted_or_buffered(
		to in hex_address(),
		amount in amount(),
		locked in any::<bool>(),
	) {
		let raw = match &amount {
			Some(amount) => format!("zhip://send?to={to}&amount={amount}"),
			None => format!("zhip://send?to={to}"),
		};
		let router = DeepLinkRouter::new(RouterConfig::default());
		let mut navigation = router.navigation();
		if locked {
			router.lock_buffering();
		}

		prop_assert!(router.handle(&raw, None));

		let DeepLink::Send(expected) = DeepLink::parse(&raw).unwrap();
		prop_assert_eq!(expected.recipient.as_str(), to.as_str());
		if locked {
			prop_assert!(navigation.try_next().is_none());
			prop_assert_eq!(router.buffered(), Some(DeepLink::Send(expected)));
		} else {
			prop_assert_eq!(navigation.drain(), vec![DeepLink::Send(expected)]);
			prop_assert!(router.buffered().is_none());
		}
	}

	#[test]
	fn canonical_url_reparses(to in hex_address(), amount in amount()) {
		let config = RouterConfig::default();
		let raw = match &amount {
			Some(amount) => format!("zhip://send?to={to}&amount={amount}"),
			None => format!("zhip://send?to={to}"),
		};
		let link = DeepLink::parse_with(&raw, &config).unwrap();
		prop_assert_eq!(DeepLink::parse_with(&link.to_url(&config), &config).unwrap(), link);
	}
}
