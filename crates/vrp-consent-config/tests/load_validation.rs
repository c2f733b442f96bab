//! Config load validation tests for vrp-consent-config.
// crates/vrp-consent-config/tests/load_validation.rs
// =============================================================================
// Module: Config Load Validation Tests
// Description: Validate config loading guards (path, size, encoding).
// Purpose: Ensure config input handling is strict and fail-closed.
// =============================================================================

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use vrp_consent_config::ConfigError;
use vrp_consent_config::VrpConsentConfig;

type TestResult = Result<(), String>;

fn assert_invalid(result: Result<VrpConsentConfig, ConfigError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(_) => Err("expected invalid config load".to_string()),
    }
}

#[test]
fn load_rejects_path_too_long() -> TestResult {
    let long_path = "a".repeat(5_000);
    let path = Path::new(&long_path);
    assert_invalid(VrpConsentConfig::load(Some(path)), "config path exceeds max length")?;
    Ok(())
}

#[test]
fn load_rejects_path_component_too_long() -> TestResult {
    let long_component = "a".repeat(300);
    let path = Path::new(&long_component);
    assert_invalid(VrpConsentConfig::load(Some(path)), "config path component too long")?;
    Ok(())
}

#[test]
fn load_rejects_oversized_file() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    let payload = vec![b'#'; 1_048_577];
    file.write_all(&payload).map_err(|err| err.to_string())?;
    assert_invalid(VrpConsentConfig::load(Some(file.path())), "config file exceeds size limit")?;
    Ok(())
}

#[test]
fn load_rejects_sparse_oversized_file_from_metadata() -> TestResult {
    let file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.as_file().set_len(256 * 1024 * 1024).map_err(|err| err.to_string())?;
    assert_invalid(VrpConsentConfig::load(Some(file.path())), "config file exceeds size limit")?;
    Ok(())
}

#[test]
fn load_accepts_file_at_size_limit() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    let mut payload = vec![b'#'; 1_048_576];
    payload[1_048_575] = b'\n';
    file.write_all(&payload).map_err(|err| err.to_string())?;
    VrpConsentConfig::load(Some(file.path())).map_err(|err| err.to_string())?;
    Ok(())
}

#[test]
fn load_rejects_non_utf8_file() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(&[0xFF, 0xFE, 0xFF]).map_err(|err| err.to_string())?;
    assert_invalid(VrpConsentConfig::load(Some(file.path())), "config file must be utf-8")?;
    Ok(())
}

#[test]
fn load_reports_missing_file_as_io_error() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("absent.toml");
    assert_invalid(VrpConsentConfig::load(Some(&path)), "config io error")?;
    Ok(())
}

#[test]
fn load_reports_malformed_toml_as_parse_error() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(b"[validation\nstrict_accounts = true\n").map_err(|err| err.to_string())?;
    assert_invalid(VrpConsentConfig::load(Some(file.path())), "config parse error")?;
    Ok(())
}

#[test]
fn load_accepts_empty_file_with_defaults() -> TestResult {
    let file = NamedTempFile::new().map_err(|err| err.to_string())?;
    let config = VrpConsentConfig::load(Some(file.path())).map_err(|err| err.to_string())?;
    if !config.idempotency.required {
        return Err("idempotency keys should be required by default".to_string());
    }
    if config.limits.max_payload_bytes != 1024 * 1024 {
        return Err(format!("unexpected payload limit {}", config.limits.max_payload_bytes));
    }
    Ok(())
}
