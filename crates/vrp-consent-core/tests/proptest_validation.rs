// crates/vrp-consent-core/tests/proptest_validation.rs
// ============================================================================
// Module: Validation Property-Based Tests
// Description: Property tests for validator totality and determinism.
// Purpose: Detect panics and unstable outcomes across arbitrary documents.
// ============================================================================

//! Property-based tests for payload validation invariants.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

mod common;

use common::first_limit;
use common::valid_payload;
use proptest::prelude::*;
use serde_json::Value;
use serde_json::json;
use vrp_consent_core::DocumentNode;
use vrp_consent_core::ErrorCode;
use vrp_consent_core::ValidationOptions;
use vrp_consent_core::validate_period_type;
use vrp_consent_core::validate_vrp_payload;
use vrp_consent_core::validate_vrp_payload_str;
use vrp_consent_core::validate_vrp_payload_with;

const PERIOD_TYPES: [&str; 6] = ["Day", "Week", "Fortnight", "Month", "Half-year", "Year"];

fn json_value_strategy(max_depth: u32) -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|v| Value::Number(v.into())),
        ".*".prop_map(Value::String),
    ];

    leaf.prop_recursive(max_depth, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0 .. 4).prop_map(Value::Array),
            prop::collection::btree_map(
                prop_oneof![
                    Just("Data".to_string()),
                    Just("Risk".to_string()),
                    Just("Initiation".to_string()),
                    Just("ControlParameters".to_string()),
                    "[A-Za-z]{1,6}",
                ],
                inner,
                0 .. 4
            )
            .prop_map(|map| Value::Object(map.into_iter().collect())),
        ]
    })
}

proptest! {
    #[test]
    fn listed_period_types_are_accepted(index in 0usize .. PERIOD_TYPES.len()) {
        let limit = DocumentNode::from(json!({"PeriodType": PERIOD_TYPES[index]}));
        prop_assert!(validate_period_type(&limit).is_valid());
    }

    #[test]
    fn other_period_types_are_invalid(period in "[A-Za-z-]{1,12}") {
        prop_assume!(!PERIOD_TYPES.contains(&period.as_str()));
        let limit = DocumentNode::from(json!({"PeriodType": period}));
        prop_assert_eq!(validate_period_type(&limit).error_code(), Some(ErrorCode::InvalidPeriodType));
    }

    #[test]
    fn payload_period_type_follows_enum(index in 0usize .. PERIOD_TYPES.len()) {
        let mut payload = valid_payload();
        first_limit(&mut payload)["PeriodType"] = json!(PERIOD_TYPES[index]);
        prop_assert!(validate_vrp_payload(&DocumentNode::from(&payload)).is_valid());
    }

    #[test]
    fn validation_never_panics_and_is_deterministic(value in json_value_strategy(4)) {
        let node = DocumentNode::from(&value);
        let first = validate_vrp_payload(&node);
        let second = validate_vrp_payload(&node);
        prop_assert_eq!(&first, &second);
        let strict = validate_vrp_payload_with(&node, &ValidationOptions::strict());
        prop_assert!(!strict.is_valid() || first.is_valid());
    }

    #[test]
    fn non_object_roots_report_format_error(value in json_value_strategy(2)) {
        prop_assume!(!value.is_object());
        let outcome = validate_vrp_payload(&DocumentNode::from(&value));
        prop_assert_eq!(outcome.error_code(), Some(ErrorCode::PayloadFormatError));
    }

    #[test]
    fn arbitrary_text_never_panics(raw in ".{0,64}") {
        let outcome = validate_vrp_payload_str(&raw);
        prop_assert_eq!(outcome.clone(), validate_vrp_payload_str(&raw));
    }
}
