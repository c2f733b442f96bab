// crates/vrp-consent-core/src/validation/payload.rs
// ============================================================================
// Module: VRP Payload Orchestrator
// Description: Entry points validating a whole consent-initiation payload.
// Purpose: Thread a payload through every section in fixed precedence order.
// Dependencies: crate::core, crate::validation
// ============================================================================

//! ## Overview
//! [`validate_vrp_payload`] checks, in order: the top-level shape (`Data`
//! must be an object), `Data.Initiation`, `Data.ControlParameters`, and the
//! top-level `Risk` block. It returns the first failure or a passing outcome.
//!
//! ## Invariants
//! - Validation is a pure function of its input; repeated calls on the same
//!   payload return identical outcomes.
//! - `Risk` is only looked up at the top level. A `Risk` block nested under
//!   `Data` does not satisfy the rule.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::DocumentNode;
use crate::core::ErrorCode;
use crate::core::RuleResult;
use crate::core::ValidationOutcome;
use crate::validation::control::check_control_parameters;
use crate::validation::initiation::check_initiation;
use crate::validation::keys::CONTROL_PARAMETERS;
use crate::validation::keys::DATA;
use crate::validation::keys::RISK;
use crate::validation::options::ValidationOptions;

// ============================================================================
// SECTION: Entry Points
// ============================================================================

/// Validates a consent-initiation payload with the baseline rule set.
#[must_use]
pub fn validate_vrp_payload(payload: &DocumentNode) -> ValidationOutcome {
    validate_vrp_payload_with(payload, &ValidationOptions::default())
}

/// Validates a consent-initiation payload with an explicit rule set.
#[must_use]
pub fn validate_vrp_payload_with(
    payload: &DocumentNode,
    options: &ValidationOptions,
) -> ValidationOutcome {
    check_payload(payload, options).into()
}

/// Parses raw payload text and validates it with the baseline rule set.
#[must_use]
pub fn validate_vrp_payload_str(raw: &str) -> ValidationOutcome {
    validate_vrp_payload(&DocumentNode::parse(raw))
}

/// Validates the top-level `Risk` block of a payload.
#[must_use]
pub fn validate_risk(payload: &DocumentNode) -> ValidationOutcome {
    check_risk(payload).into()
}

// ============================================================================
// SECTION: Rules
// ============================================================================

/// Runs every section in precedence order.
fn check_payload(payload: &DocumentNode, options: &ValidationOptions) -> RuleResult {
    let Some(data) = payload.object_at(DATA) else {
        return Err(ErrorCode::PayloadFormatError.descriptor());
    };
    check_initiation(data, options)?;
    check_control_parameters(data.get(CONTROL_PARAMETERS), options)?;
    check_risk(payload)
}

/// Checks that the top-level `Risk` key holds an object.
pub(crate) fn check_risk(payload: &DocumentNode) -> RuleResult {
    if payload.object_at(RISK).is_some() {
        Ok(())
    } else {
        Err(ErrorCode::PayloadFormatErrorRisk.descriptor())
    }
}
