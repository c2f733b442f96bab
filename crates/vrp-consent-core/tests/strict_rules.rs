// crates/vrp-consent-core/tests/strict_rules.rs
// ============================================================================
// Module: Strict Rule Set Tests
// Description: Checks for the opt-in account, amount, and window rules.
// Purpose: Ensure extended rules run after, and never mask, baseline rules.
// ============================================================================

//! ## Overview
//! Validates payloads with [`ValidationOptions`] variants.

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

mod common;

use common::control_parameters;
use common::first_limit;
use common::remove_key;
use common::valid_payload;
use common::validate;
use serde_json::Value;
use serde_json::json;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use vrp_consent_core::AccountRole;
use vrp_consent_core::DocumentNode;
use vrp_consent_core::ErrorCode;
use vrp_consent_core::ValidationOptions;
use vrp_consent_core::validate_account;
use vrp_consent_core::validate_vrp_payload_with;

fn strict_code(payload: &Value) -> Option<ErrorCode> {
    validate_vrp_payload_with(&DocumentNode::from(payload), &ValidationOptions::strict())
        .error_code()
}

fn instant(text: &str) -> OffsetDateTime {
    OffsetDateTime::parse(text, &Rfc3339).unwrap()
}

#[test]
fn well_formed_payload_passes_strict_rules() {
    assert_eq!(strict_code(&valid_payload()), None);
}

#[test]
fn unknown_scheme_name_fails_only_in_strict_mode() {
    let mut payload = valid_payload();
    payload["Data"]["Initiation"]["DebtorAccount"]["SchemeName"] = json!("Bogus.Scheme");
    assert!(validate(&payload).is_valid());
    assert_eq!(
        strict_code(&payload),
        Some(ErrorCode::InvalidAccountSchemeName(AccountRole::Debtor))
    );
}

#[test]
fn over_long_fields_are_rejected() {
    let mut payload = valid_payload();
    payload["Data"]["Initiation"]["CreditorAccount"]["Name"] = json!("n".repeat(351));
    assert_eq!(strict_code(&payload), Some(ErrorCode::InvalidAccountName(AccountRole::Creditor)));

    let mut payload = valid_payload();
    payload["Data"]["Initiation"]["DebtorAccount"]["SecondaryIdentification"] =
        json!("s".repeat(35));
    assert_eq!(
        strict_code(&payload),
        Some(ErrorCode::InvalidAccountSecondaryIdentification(AccountRole::Debtor))
    );

    let mut payload = valid_payload();
    payload["Data"]["Initiation"]["DebtorAccount"]["SchemeName"] = json!("x".repeat(257));
    assert_eq!(
        strict_code(&payload),
        Some(ErrorCode::InvalidAccountSchemeNameLength(AccountRole::Debtor))
    );
}

#[test]
fn sort_code_identification_must_be_fourteen_digits() {
    let mut payload = valid_payload();
    payload["Data"]["Initiation"]["CreditorAccount"]["Identification"] = json!("3094933000001X");
    assert_eq!(strict_code(&payload), Some(ErrorCode::InvalidSortCodeIdentification));

    let mut payload = valid_payload();
    payload["Data"]["Initiation"]["CreditorAccount"]["SchemeName"] = json!("OB.IBAN");
    payload["Data"]["Initiation"]["CreditorAccount"]["Identification"] =
        json!("GB29NWBK60161331926819");
    assert_eq!(strict_code(&payload), None);
}

#[test]
fn strict_rules_never_mask_baseline_failures() {
    let mut payload = valid_payload();
    remove_key(&mut payload, "/Data/Initiation/DebtorAccount", "SchemeName");
    payload["Data"]["Initiation"]["DebtorAccount"]["Name"] = json!("n".repeat(400));
    assert_eq!(
        strict_code(&payload),
        Some(ErrorCode::MissingAccountSchemeName(AccountRole::Debtor))
    );
}

#[test]
fn account_validator_honours_options() {
    let account = DocumentNode::from(json!({
        "SchemeName": "OB.SortCodeAccountNumber",
        "Identification": "12-34-56"
    }));
    let options = ValidationOptions {
        strict_accounts: true,
        ..ValidationOptions::default()
    };
    assert!(validate_account(Some(&account), AccountRole::Debtor, &ValidationOptions::default())
        .is_valid());
    assert_eq!(
        validate_account(Some(&account), AccountRole::Debtor, &options).error_code(),
        Some(ErrorCode::InvalidSortCodeIdentification)
    );
}

#[test]
fn amounts_must_match_decimal_format() {
    let mut payload = valid_payload();
    control_parameters(&mut payload)["MaximumIndividualAmount"]["Amount"] = json!("1.123456");
    assert_eq!(strict_code(&payload), Some(ErrorCode::PayloadFormatErrorMaximumIndividualAmount));

    let mut payload = valid_payload();
    remove_key(&mut payload, "/Data/ControlParameters/MaximumIndividualAmount", "Amount");
    assert_eq!(strict_code(&payload), Some(ErrorCode::PayloadFormatErrorMaximumIndividualAmount));

    let mut payload = valid_payload();
    first_limit(&mut payload)["Amount"] = json!("ten");
    assert!(validate(&payload).is_valid());
    assert_eq!(strict_code(&payload), Some(ErrorCode::InvalidPeriodicLimitAmount));
}

#[test]
fn window_order_rejects_start_after_end() {
    let mut payload = valid_payload();
    control_parameters(&mut payload)["ValidFromDateTime"] = json!("2035-01-01T00:00:00Z");
    assert_eq!(strict_code(&payload), Some(ErrorCode::InvalidDateTimeRange));
}

#[test]
fn reference_time_rejects_expired_window() {
    let node = DocumentNode::from(valid_payload());
    let before = ValidationOptions::default().with_reference_time(instant("2025-06-01T00:00:00Z"));
    assert!(validate_vrp_payload_with(&node, &before).is_valid());
    let after = ValidationOptions::default().with_reference_time(instant("2031-06-01T00:00:00Z"));
    assert_eq!(
        validate_vrp_payload_with(&node, &after).error_code(),
        Some(ErrorCode::ExpiredValidToDateTime)
    );
}

#[test]
fn periodic_limit_count_is_capped() {
    let mut payload = valid_payload();
    let entry = first_limit(&mut payload).clone();
    control_parameters(&mut payload)["PeriodicLimits"] = json!([entry.clone(), entry]);
    let options = ValidationOptions {
        max_periodic_limits: Some(1),
        ..ValidationOptions::default()
    };
    assert_eq!(
        validate_vrp_payload_with(&DocumentNode::from(&payload), &options).error_code(),
        Some(ErrorCode::TooManyPeriodicLimits)
    );
}
