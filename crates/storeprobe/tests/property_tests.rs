//! Property-based tests for storeprobe.
//!
//! Uses proptest to check the decoder, the form encoder and the consent
//! poller's budget arithmetic over arbitrary inputs.

use std::sync::Arc;
use std::time::Duration;

use proptest::prelude::*;
use serde_json::{Map, Value};
use storeprobe::prelude::*;
use storeprobe::{embedded_span, FakeClock};

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
        "[ -~]{0,12}".prop_map(Value::from),
        Just(Value::Null),
    ]
}

fn json_object() -> impl Strategy<Value = Map<String, Value>> {
    prop::collection::btree_map("[a-zA-Z_]{1,8}", scalar(), 0..6)
        .prop_map(|m| m.into_iter().collect())
}

// === Decoder Property Tests ===

proptest! {
    /// Serialized JSON decodes to itself on the strict path.
    #[test]
    fn prop_strict_roundtrip(object in json_object()) {
        let text = serde_json::to_string(&object).unwrap();
        let decoded = decode_with_source(&text);
        prop_assert_eq!(decoded.source_label(), "strict");
        prop_assert_eq!(decoded.into_value(), Some(Value::Object(object)));
    }

    /// JSON wrapped in brace-free markup is recovered intact.
    #[test]
    fn prop_wrapped_object_recovered(
        object in json_object(),
        prefix in "[^{}]{0,40}",
        suffix in "[^{}]{0,40}",
    ) {
        let text = serde_json::to_string(&object).unwrap();
        let body = format!("{prefix}{text}{suffix}");
        prop_assert_eq!(embedded_span(&body), Some(text.as_str()));
        prop_assert_eq!(decode_body(&body), Some(Value::Object(object)));
    }

    /// Bodies without an opening brace never yield an object.
    #[test]
    fn prop_braceless_body_has_no_object(body in "[^{\\[]{0,80}") {
        let decoded = decode_body(&body);
        prop_assert!(!matches!(decoded, Some(Value::Object(_))));
    }

    /// The decoder never panics.
    #[test]
    fn prop_decode_total(body in "\\PC{0,200}") {
        let _ = decode_with_source(&body);
    }
}

// === Form Encoder Property Tests ===

proptest! {
    /// Encoded bodies parse back to the same surviving pairs, in order.
    #[test]
    fn prop_form_roundtrip(
        fields in prop::collection::vec(("[a-z_]{1,10}", prop::option::of("\\PC{0,20}")), 0..8)
    ) {
        let body: FormBody = fields.iter().cloned().collect();
        let encoded = body.encode();

        let parsed: Vec<(String, String)> = url::form_urlencoded::parse(encoded.as_bytes())
            .into_owned()
            .collect();
        let expected: Vec<(String, String)> = fields
            .into_iter()
            .filter_map(|(k, v)| v.map(|v| (k, v)))
            .collect();
        prop_assert_eq!(parsed, expected);
    }

    /// Separators inside values are always escaped.
    #[test]
    fn prop_form_separators_escaped(value in "[&=+ a-z]{1,20}") {
        let encoded = FormBody::new().field("k", value.as_str()).encode();
        prop_assert_eq!(encoded.matches('&').count(), 0);
        prop_assert_eq!(encoded.matches('=').count(), 1);
        prop_assert!(!encoded.contains(' '));
    }

    /// Loose maps with only scalars always encode.
    #[test]
    fn prop_scalar_maps_encode(object in json_object()) {
        prop_assert!(to_form_urlencoded(&object).is_ok());
    }
}

// === Consent Budget Property Tests ===

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Without an overlay, the poller spends exactly its budget.
    #[test]
    fn prop_absent_overlay_spends_budget(budget_ms in 0_u64..5_000, backoff_ms in 1_u64..1_000) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        let clock = Arc::new(FakeClock::new());
        let poller = ConsentPoller::with_clock(
            ConsentOptions::new()
                .with_budget_ms(budget_ms)
                .with_backoff_ms(backoff_ms),
            clock.clone(),
        )
        .unwrap();
        let page = MockRoot::new("page");

        let outcome = runtime.block_on(poller.run(&page));

        prop_assert_eq!(outcome.state, ConsentState::TimedOut);
        prop_assert_eq!(outcome.elapsed, Duration::from_millis(budget_ms));
        prop_assert_eq!(u64::from(outcome.attempts), budget_ms.div_ceil(backoff_ms));
        prop_assert_eq!(page.keys().len(), outcome.attempts as usize);
    }
}
