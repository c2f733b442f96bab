// crates/vrp-consent-cli/src/tests.rs
// ============================================================================
// Module: CLI Main Helpers Tests
// Description: Unit tests for bounded reads, settings, and exit codes.
// Purpose: Ensure CLI helpers fail closed and honor configuration.
// Dependencies: vrp-consent-cli main helpers
// ============================================================================

//! ## Overview
//! Validates `read_bytes_with_limit` enforces size limits, `--strict` keeps
//! the configured periodic limit cap, and outcomes map to exit codes.

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

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::process::ExitCode;

use vrp_consent_config::VrpConsentConfig;
use vrp_consent_core::ErrorCode;
use vrp_consent_core::ValidationOutcome;

use super::MAX_PAYLOAD_INPUT_BYTES;
use super::ReadLimitError;
use super::load_config_or_default;
use super::outcome_exit_code;
use super::read_bytes_with_limit;
use super::read_payload;
use super::read_reader_with_limit;
use super::validate_settings;

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn read_bytes_with_limit_allows_small_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("small.json");
    fs::write(&path, b"{}").expect("write small file");

    let bytes = read_bytes_with_limit(&path, 16).expect("read small file");
    assert_eq!(bytes, b"{}");
}

#[test]
fn read_bytes_with_limit_rejects_large_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("large.json");
    let limit = 8_usize;
    fs::write(&path, vec![b' '; limit + 1]).expect("write large file");

    let err = read_bytes_with_limit(&path, limit).expect_err("expected size limit failure");
    match err {
        ReadLimitError::TooLarge {
            size,
            limit: reported,
        } => {
            assert_eq!(size, 9);
            assert_eq!(reported, limit);
        }
        ReadLimitError::Io(err) => panic!("unexpected IO error: {err}"),
    }
}

#[test]
fn read_bytes_with_limit_reports_missing_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = read_bytes_with_limit(&dir.path().join("absent.json"), 16).expect_err("missing");
    assert!(matches!(err, ReadLimitError::Io(_)));
}

#[test]
fn read_reader_with_limit_caps_streams() {
    let bytes = read_reader_with_limit(&b"abc"[..], 3).expect("exact limit");
    assert_eq!(bytes, b"abc");
    let err = read_reader_with_limit(&b"abcd"[..], 3).expect_err("over limit");
    assert!(matches!(err, ReadLimitError::TooLarge { size: 4, limit: 3 }));
}

#[test]
fn input_cap_admits_largest_configurable_payload() {
    assert!(MAX_PAYLOAD_INPUT_BYTES > 10 * 1024 * 1024);
}

#[test]
fn strict_flag_enables_rules_and_keeps_limit_cap() {
    let config =
        VrpConsentConfig::from_toml("[limits]\nmax_periodic_limits = 3\n").expect("config");
    let baseline = validate_settings(&config, false);
    assert!(!baseline.validation.strict_accounts);
    assert_eq!(baseline.validation.max_periodic_limits, None);

    let strict = validate_settings(&config, true);
    assert!(strict.validation.strict_accounts);
    assert!(strict.validation.strict_amounts);
    assert!(strict.validation.check_window_order);
    assert_eq!(strict.validation.max_periodic_limits, Some(3));
    assert_eq!(strict.max_payload_bytes, baseline.max_payload_bytes);
}

#[test]
fn explicit_missing_config_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = load_config_or_default(Some(&dir.path().join("absent.toml")))
        .expect_err("explicit path must load");
    assert!(err.to_string().contains("config io error"));
}

#[test]
fn outcomes_map_to_exit_codes() {
    assert_eq!(outcome_exit_code(&ValidationOutcome::valid()), ExitCode::SUCCESS);
    let invalid = ValidationOutcome::invalid(ErrorCode::PayloadFormatErrorRisk.descriptor());
    assert_eq!(outcome_exit_code(&invalid), ExitCode::from(2));
}

#[test]
fn read_payload_reports_missing_file_with_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.json");
    let err = read_payload(&path).unwrap_err().to_string();
    let expected = format!("Failed to read payload from {}: ", path.display());
    assert!(err.starts_with(&expected), "{err}");
}
