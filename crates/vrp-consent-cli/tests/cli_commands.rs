// crates/vrp-consent-cli/tests/cli_commands.rs
// ============================================================================
// Module: CLI Command Tests
// Description: Integration tests for the `vrp-consent` binary.
// Purpose: Ensure commands print outcome JSON and use the documented exit codes.
// Dependencies: vrp-consent-cli binary
// ============================================================================
//! ## Overview
//! Runs the compiled binary against payload and config files in a temporary
//! directory. Audit output is disabled through a config file so stderr only
//! carries command errors.

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
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::Output;
use std::process::Stdio;

use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn vrp_consent_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_vrp-consent"))
}

fn valid_payload() -> Value {
    json!({
        "Data": {
            "ControlParameters": {
                "ValidFromDateTime": "2023-03-01T00:00:00+05:30",
                "ValidToDateTime": "2030-12-31T23:59:59+05:30",
                "MaximumIndividualAmount": { "Amount": "100.00", "Currency": "GBP" },
                "PeriodicLimits": [
                    {
                        "Amount": "200.00",
                        "Currency": "GBP",
                        "PeriodAlignment": "Consent",
                        "PeriodType": "Week"
                    }
                ]
            },
            "Initiation": {
                "DebtorAccount": {
                    "SchemeName": "OB.SortCodeAccountNumber",
                    "Identification": "30080012343456"
                },
                "CreditorAccount": {
                    "SchemeName": "OB.SortCodeAccountNumber",
                    "Identification": "30949330000010"
                }
            }
        },
        "Risk": { "PaymentContextCode": "TransferToThirdParty" }
    })
}

fn write_json(dir: &Path, name: &str, value: &Value) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, serde_json::to_vec(value).unwrap()).expect("write payload");
    path
}

fn quiet_config(dir: &Path) -> PathBuf {
    let path = dir.join("vrp-consent.toml");
    fs::write(&path, "[audit]\nsink = \"none\"\n").expect("write config");
    path
}

fn run(args: &[&str]) -> Output {
    Command::new(vrp_consent_bin())
        .args(args)
        .env_remove("VRP_CONSENT_CONFIG")
        .output()
        .expect("run vrp-consent")
}

fn stdout_json(output: &Output) -> Value {
    let text = String::from_utf8(output.stdout.clone()).expect("utf-8 stdout");
    serde_json::from_str(text.trim()).expect("stdout json")
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn validate_accepts_valid_payload() {
    let dir = tempfile::tempdir().expect("temp dir");
    let payload = write_json(dir.path(), "payload.json", &valid_payload());
    let config = quiet_config(dir.path());
    let output = run(&[
        "validate",
        "--payload",
        payload.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout_json(&output), json!({ "valid": true }));
}

#[test]
fn validate_rejects_missing_risk_with_exit_code_two() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut value = valid_payload();
    value.as_object_mut().unwrap().remove("Risk");
    let payload = write_json(dir.path(), "payload.json", &value);
    let config = quiet_config(dir.path());
    let output = run(&[
        "validate",
        "--payload",
        payload.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ]);
    assert_eq!(output.status.code(), Some(2));
    let outcome = stdout_json(&output);
    assert_eq!(outcome["valid"], false);
    assert_eq!(outcome["errorCode"], "PAYLOAD_FORMAT_ERROR_RISK");
}

#[test]
fn validate_strict_flag_applies_account_rules() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut value = valid_payload();
    value["Data"]["Initiation"]["DebtorAccount"]["Identification"] = json!("12-34-56");
    let payload = write_json(dir.path(), "payload.json", &value);
    let config = quiet_config(dir.path());
    let config = config.to_str().unwrap();
    let payload = payload.to_str().unwrap();

    let baseline = run(&["validate", "--payload", payload, "--config", config]);
    assert_eq!(baseline.status.code(), Some(0));

    let strict = run(&["validate", "--payload", payload, "--config", config, "--strict"]);
    assert_eq!(strict.status.code(), Some(2));
    assert_eq!(stdout_json(&strict)["valid"], false);
}

#[test]
fn validate_reads_payload_from_stdin() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = quiet_config(dir.path());
    let mut child = Command::new(vrp_consent_bin())
        .args(["validate", "--payload", "-", "--config", config.to_str().unwrap()])
        .env_remove("VRP_CONSENT_CONFIG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn vrp-consent");
    {
        let mut stdin = child.stdin.take().expect("stdin");
        stdin.write_all(b"[1, 2, 3]").expect("write stdin");
    }
    let output = child.wait_with_output().expect("wait");
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(stdout_json(&output)["errorCode"], "PAYLOAD_FORMAT_ERROR");
}

#[test]
fn validate_missing_payload_file_fails_with_exit_code_one() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = quiet_config(dir.path());
    let missing = dir.path().join("absent.json");
    let output = run(&[
        "validate",
        "--payload",
        missing.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Failed to read payload"));
}

#[test]
fn initiate_prints_consent_and_attributes() {
    let dir = tempfile::tempdir().expect("temp dir");
    let payload = write_json(dir.path(), "payload.json", &valid_payload());
    let config = quiet_config(dir.path());
    let output = run(&[
        "initiate",
        "--payload",
        payload.to_str().unwrap(),
        "--client-id",
        "tpp-client",
        "--idempotency-key",
        "key-0001",
        "--config",
        config.to_str().unwrap(),
    ]);
    assert_eq!(output.status.code(), Some(0));
    let created = stdout_json(&output);
    assert_eq!(created["consent"]["clientId"], "tpp-client");
    assert_eq!(created["consent"]["consentId"].as_str().unwrap().len(), 36);
    assert_eq!(created["attributes"]["IdempotencyKey"], "key-0001");
    assert_eq!(created["attributes"]["PeriodType"], "Week");
    assert_eq!(created["replayed"], false);
}

#[test]
fn initiate_requires_idempotency_key_by_default() {
    let dir = tempfile::tempdir().expect("temp dir");
    let payload = write_json(dir.path(), "payload.json", &valid_payload());
    let config = quiet_config(dir.path());
    let output = run(&[
        "initiate",
        "--payload",
        payload.to_str().unwrap(),
        "--client-id",
        "tpp-client",
        "--config",
        config.to_str().unwrap(),
    ]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Idempotency related details should be submitted"));
}

#[test]
fn config_validate_reports_ok_and_failures() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = quiet_config(dir.path());
    let ok = run(&["config", "validate", "--config", config.to_str().unwrap()]);
    assert_eq!(ok.status.code(), Some(0));
    assert!(String::from_utf8(ok.stdout).unwrap().contains("Config valid."));

    let bad = dir.path().join("bad.toml");
    fs::write(&bad, "[limits]\nmax_payload_bytes = 0\n").expect("write bad config");
    let failed = run(&["config", "validate", "--config", bad.to_str().unwrap()]);
    assert_eq!(failed.status.code(), Some(1));
    assert!(String::from_utf8(failed.stderr).unwrap().contains("max_payload_bytes"));
}
