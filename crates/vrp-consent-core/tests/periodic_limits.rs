// crates/vrp-consent-core/tests/periodic_limits.rs
// ============================================================================
// Module: Periodic Limit Rule Tests
// Description: Section-level checks for periodic limits and period enums.
// Purpose: Pin the null-versus-missing distinction and enum membership.
// ============================================================================

//! ## Overview
//! Exercises the periodic limit validators directly, without the orchestrator.

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
    reason = "Test-only output and panic-based assertions are permitted."
)]

use serde_json::json;
use vrp_consent_core::DocumentNode;
use vrp_consent_core::ErrorCode;
use vrp_consent_core::ValidationOutcome;
use vrp_consent_core::validate_control_parameters;
use vrp_consent_core::validate_maximum_individual_amount;
use vrp_consent_core::validate_period_alignment;
use vrp_consent_core::validate_period_type;
use vrp_consent_core::validate_periodic_limit_field;
use vrp_consent_core::validate_periodic_limits;

fn node(value: serde_json::Value) -> DocumentNode {
    DocumentNode::from(value)
}

fn message(outcome: &ValidationOutcome) -> &str {
    outcome.error().unwrap().message()
}

#[test]
fn empty_array_passes_currency_rule() {
    let limits = node(json!([]));
    assert!(validate_periodic_limit_field(Some(&limits), Some("Currency")).is_valid());
}

#[test]
fn null_array_reports_null_parameter() {
    let outcome = validate_periodic_limit_field(None, Some("Currency"));
    assert_eq!(outcome.error_code(), Some(ErrorCode::InvalidParameter));
    assert_eq!(message(&outcome), "parameter passed in is null");

    let null = node(json!(null));
    let outcome = validate_periodic_limit_field(Some(&null), Some("Currency"));
    assert_eq!(message(&outcome), "parameter passed in is null");
}

#[test]
fn first_entry_missing_key_reports_missing_parameter() {
    let limits = node(json!([{"Amount": "10.00"}, {"Currency": "GBP"}]));
    let outcome = validate_periodic_limit_field(Some(&limits), Some("Currency"));
    assert_eq!(outcome.error_code(), Some(ErrorCode::MissingParameter));
    assert_eq!(message(&outcome), "Mandatory parameter 'Currency' is not present in payload");
}

#[test]
fn later_entry_failure_is_reported() {
    let limits = node(json!([{"Currency": "GBP"}, {"Currency": " "}]));
    let outcome = validate_periodic_limit_field(Some(&limits), Some("Currency"));
    assert_eq!(outcome.error_code(), Some(ErrorCode::EmptyParameter));

    let limits = node(json!([{"Currency": 826}]));
    let outcome = validate_periodic_limit_field(Some(&limits), Some("Currency"));
    assert_eq!(outcome.error_code(), Some(ErrorCode::InvalidParameterType));
}

#[test]
fn absent_key_passes_without_inspecting_entries() {
    let limits = node(json!([{"Amount": "10.00"}]));
    assert!(validate_periodic_limit_field(Some(&limits), None).is_valid());
    let not_array = node(json!("invalid-format"));
    assert!(validate_periodic_limit_field(Some(&not_array), None).is_valid());
}

#[test]
fn periodic_limits_structure() {
    let missing = node(json!({}));
    assert_eq!(
        validate_periodic_limits(&missing).error_code(),
        Some(ErrorCode::MissingPeriodLimits)
    );
    let wrong = node(json!({"PeriodicLimits": {"Currency": "GBP"}}));
    assert_eq!(
        validate_periodic_limits(&wrong).error_code(),
        Some(ErrorCode::InvalidParameterPeriodicLimits)
    );
    let empty = node(json!({"PeriodicLimits": []}));
    assert!(validate_periodic_limits(&empty).is_valid());
}

#[test]
fn period_types_split_missing_from_invalid() {
    for period in ["Day", "Week", "Fortnight", "Month", "Half-year", "Year"] {
        assert!(validate_period_type(&node(json!({"PeriodType": period}))).is_valid(), "{period}");
    }
    let invalid = validate_period_type(&node(json!({"PeriodType": "month"})));
    assert_eq!(invalid.error_code(), Some(ErrorCode::InvalidPeriodType));
    for missing in [json!({}), json!({"PeriodType": ""}), json!({"PeriodType": 7})] {
        let outcome = validate_period_type(&node(missing));
        assert_eq!(outcome.error_code(), Some(ErrorCode::MissingPeriodType));
        assert_eq!(message(&outcome), "Missing required parameter Period type");
    }
}

#[test]
fn period_alignments_split_missing_from_invalid() {
    for alignment in ["Consent", "Day"] {
        let limit = node(json!({"PeriodAlignment": alignment}));
        assert!(validate_period_alignment(&limit).is_valid());
    }
    let invalid = validate_period_alignment(&node(json!({"PeriodAlignment": "Calendar"})));
    assert_eq!(invalid.error_code(), Some(ErrorCode::InvalidPeriodAlignment));
    let missing = validate_period_alignment(&node(json!({"PeriodAlignment": null})));
    assert_eq!(missing.error_code(), Some(ErrorCode::MissingPeriodAlignment));
}

#[test]
fn maximum_individual_amount_requires_non_empty_object() {
    for value in [json!(null), json!({}), json!("100"), json!([])] {
        let control = node(json!({"MaximumIndividualAmount": value}));
        assert_eq!(
            validate_maximum_individual_amount(&control).error_code(),
            Some(ErrorCode::MissingMaximumIndividualAmount)
        );
    }
    let control = node(json!({"MaximumIndividualAmount": {"Amount": "1", "Currency": "EUR"}}));
    assert!(validate_maximum_individual_amount(&control).is_valid());
}

#[test]
fn control_parameters_composite_reports_first_failure() {
    assert_eq!(
        validate_control_parameters(None).error_code(),
        Some(ErrorCode::MissingMaximumIndividualAmount)
    );
    let control = node(json!({
        "MaximumIndividualAmount": {"Amount": "1", "Currency": "EUR"},
        "PeriodicLimits": [{"Currency": "EUR", "PeriodType": "Year"}],
        "ValidToDateTime": "garbage"
    }));
    assert_eq!(
        validate_control_parameters(Some(&control)).error_code(),
        Some(ErrorCode::MissingPeriodAlignment)
    );
}
