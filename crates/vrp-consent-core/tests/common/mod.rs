// crates/vrp-consent-core/tests/common/mod.rs
// ============================================================================
// Module: Common Test Fixtures
// Description: Shared payload fixtures for VRP consent tests.
// Purpose: Provide one well-formed payload and helpers to break it.
// Dependencies: vrp-consent-core, serde_json
// ============================================================================

//! ## Overview
//! Tests start from [`valid_payload`] and mutate a single field so that each
//! case isolates exactly one rule.

#![allow(dead_code, reason = "Shared test helpers may be unused in some cases.")]
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::unwrap_in_result,
    reason = "Test fixtures favor direct unwraps for setup clarity."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use serde_json::json;
use vrp_consent_core::DocumentNode;
use vrp_consent_core::ErrorCode;
use vrp_consent_core::ValidationOutcome;
use vrp_consent_core::validate_vrp_payload;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

/// Returns a payload that passes the baseline and strict rule sets.
pub fn valid_payload() -> Value {
    json!({
        "Data": {
            "ReadRefundAccount": "Yes",
            "ControlParameters": {
                "ValidFromDateTime": "2023-03-01T00:00:00+05:30",
                "ValidToDateTime": "2030-12-31T23:59:59+05:30",
                "MaximumIndividualAmount": {
                    "Amount": "100.00",
                    "Currency": "GBP"
                },
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
                    "Identification": "30080012343456",
                    "Name": "Marcus Sweepimus",
                    "SecondaryIdentification": "30080012343456"
                },
                "CreditorAccount": {
                    "SchemeName": "OB.SortCodeAccountNumber",
                    "Identification": "30949330000010",
                    "SecondaryIdentification": "Roll 90210",
                    "Name": "Marcus Sweepimus"
                },
                "RemittanceInformation": {
                    "Reference": "Sweepco"
                }
            }
        },
        "Risk": {
            "PaymentContextCode": "TransferToThirdParty"
        }
    })
}

/// Returns the control parameters block of `payload` for mutation.
pub fn control_parameters(payload: &mut Value) -> &mut Value {
    &mut payload["Data"]["ControlParameters"]
}

/// Returns the first periodic limit entry of `payload` for mutation.
pub fn first_limit(payload: &mut Value) -> &mut Value {
    &mut payload["Data"]["ControlParameters"]["PeriodicLimits"][0]
}

/// Removes `key` from the object at `pointer`.
pub fn remove_key(payload: &mut Value, pointer: &str, key: &str) {
    payload.pointer_mut(pointer).unwrap().as_object_mut().unwrap().remove(key);
}

/// Validates a JSON value with the baseline rule set.
pub fn validate(payload: &Value) -> ValidationOutcome {
    validate_vrp_payload(&DocumentNode::from(payload))
}

/// Validates a JSON value and returns the failing code.
pub fn error_code(payload: &Value) -> Option<ErrorCode> {
    validate(payload).error_code()
}

/// Returns the failure message of an outcome.
pub fn error_message(outcome: &ValidationOutcome) -> String {
    outcome.error().unwrap().message().to_string()
}
