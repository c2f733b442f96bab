// crates/vrp-consent-core/src/validation/submission.rs
// ============================================================================
// Module: VRP Submission Validators
// Description: Checks a VRP payment submission against its consent receipt.
// Purpose: Refuse payments that drift from what the account holder authorised.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! [`validate_vrp_submission`] compares a payment submission with the stored
//! consent it draws on. The consent must be authorised and named by
//! `Data.ConsentId`. The submitted `Initiation` must repeat the consented
//! accounts and remittance information. The `Instruction` must carry string
//! identifiers, an instructed amount, the consented creditor account, and the
//! consented remittance information. `Risk.PaymentContextCode` must match.
//!
//! Checks run in that order and the first failure is reported.
//!
//! ## Comparison Rules
//! - `SchemeName` and `Identification` must be non-empty and equal.
//! - Optional strings (`Name`, `SecondaryIdentification`, remittance fields,
//!   `PaymentContextCode`) match when both sides are blank or both are equal.
//!   A value that is absent or not a string counts as blank.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::AccountRole;
use crate::core::ConsentResource;
use crate::core::ConsentStatus;
use crate::core::DocumentNode;
use crate::core::ErrorCode;
use crate::core::RuleResult;
use crate::core::ValidationOutcome;
use crate::validation::keys::CONSENT_ID;
use crate::validation::keys::DATA;
use crate::validation::keys::END_TO_END_IDENTIFICATION;
use crate::validation::keys::IDENTIFICATION;
use crate::validation::keys::INITIATION;
use crate::validation::keys::INSTRUCTED_AMOUNT;
use crate::validation::keys::INSTRUCTION;
use crate::validation::keys::INSTRUCTION_IDENTIFICATION;
use crate::validation::keys::NAME;
use crate::validation::keys::PAYMENT_CONTEXT_CODE;
use crate::validation::keys::REFERENCE;
use crate::validation::keys::REMITTANCE_INFORMATION;
use crate::validation::keys::RISK;
use crate::validation::keys::SCHEME_NAME;
use crate::validation::keys::SECONDARY_IDENTIFICATION;
use crate::validation::keys::UNSTRUCTURED;
use crate::validation::payload::check_risk;
use crate::validation::rules::invalid_parameter_message;

// ============================================================================
// SECTION: Public Validators
// ============================================================================

/// Validates a VRP payment submission against the consent it references.
#[must_use]
pub fn validate_vrp_submission(
    submission: &DocumentNode,
    consent: &ConsentResource,
) -> ValidationOutcome {
    check_submission(submission, consent).into()
}

// ============================================================================
// SECTION: Composite
// ============================================================================

/// Runs the submission checks in order.
fn check_submission(submission: &DocumentNode, consent: &ConsentResource) -> RuleResult {
    if consent.status != ConsentStatus::Authorised {
        return Err(ErrorCode::InvalidConsentStatus.descriptor());
    }
    let Some(data) = submission.object_at(DATA) else {
        return Err(ErrorCode::PayloadFormatError.descriptor());
    };
    let Some(initiation) = data.object_at(INITIATION) else {
        return Err(ErrorCode::PayloadFormatErrorInitiation.descriptor());
    };
    let Some(instruction) = data.object_at(INSTRUCTION) else {
        return Err(ErrorCode::PayloadFormatErrorInstruction.descriptor());
    };
    if data.str_at(CONSENT_ID) != Some(consent.consent_id.as_str()) {
        return Err(ErrorCode::ConsentIdMismatch.descriptor());
    }

    let receipt = DocumentNode::from(&consent.receipt);
    let Some(consented) = receipt.object_at(DATA).and_then(|data| data.object_at(INITIATION))
    else {
        return Err(ErrorCode::PayloadFormatErrorInitiation
            .with_message("Consent receipt holds no Initiation object"));
    };
    check_initiation_matches(initiation, consented)?;
    check_instruction(instruction, consented)?;
    check_risk(submission)?;
    let consented_risk = receipt.object_at(RISK);
    let submitted_risk = submission.object_at(RISK);
    if !optional_matches(
        submitted_risk.and_then(|risk| risk.str_at(PAYMENT_CONTEXT_CODE)),
        consented_risk.and_then(|risk| risk.str_at(PAYMENT_CONTEXT_CODE)),
    ) {
        return Err(ErrorCode::RiskMismatch.descriptor());
    }
    Ok(())
}

// ============================================================================
// SECTION: Section Rules
// ============================================================================

/// Compares the submitted `Initiation` with the consented one.
fn check_initiation_matches(submitted: &DocumentNode, consented: &DocumentNode) -> RuleResult {
    check_creditor_account(
        submitted,
        consented,
        ErrorCode::PayloadFormatErrorAccount(AccountRole::Creditor),
    )?;

    let role = AccountRole::Debtor;
    match (submitted.get(role.payload_key()), consented.get(role.payload_key())) {
        (None, None) => {}
        (Some(_), None) | (None, Some(_)) => {
            return Err(ErrorCode::DebtorAccountMismatch.descriptor());
        }
        (Some(sub), Some(init)) if sub.is_object() && init.is_object() => {
            check_account_matches(sub, init, role)?;
        }
        (Some(_), Some(_)) => {
            return Err(ErrorCode::PayloadFormatErrorAccount(role)
                .with_message(invalid_parameter_message(role.label(), "JSONObject")));
        }
    }

    check_remittance(submitted, consented)
}

/// Checks the submitted `Instruction` against the consented initiation.
fn check_instruction(instruction: &DocumentNode, consented: &DocumentNode) -> RuleResult {
    require_string(
        instruction,
        INSTRUCTION_IDENTIFICATION,
        ErrorCode::MissingInstructionIdentification,
        ErrorCode::InvalidInstructionIdentification,
    )?;
    require_string(
        instruction,
        END_TO_END_IDENTIFICATION,
        ErrorCode::MissingEndToEndIdentification,
        ErrorCode::InvalidEndToEndIdentification,
    )?;
    check_creditor_account(instruction, consented, ErrorCode::PayloadFormatErrorInstruction)?;
    if !instruction.has_key(INSTRUCTED_AMOUNT) {
        return Err(ErrorCode::MissingInstructedAmount.descriptor());
    }
    check_remittance(instruction, consented)
}

/// Requires the creditor account on both sides and compares it.
///
/// `absent` is reported when either side lacks a creditor account object.
fn check_creditor_account(
    submitted: &DocumentNode,
    consented: &DocumentNode,
    absent: ErrorCode,
) -> RuleResult {
    let role = AccountRole::Creditor;
    match (submitted.object_at(role.payload_key()), consented.object_at(role.payload_key())) {
        (Some(sub), Some(init)) => check_account_matches(sub, init, role),
        _ => Err(absent.with_message(invalid_parameter_message(role.label(), "JSONObject"))),
    }
}

/// Requires `RemittanceInformation` objects on both sides and compares them.
fn check_remittance(submitted: &DocumentNode, consented: &DocumentNode) -> RuleResult {
    let (Some(sub), Some(init)) =
        (submitted.object_at(REMITTANCE_INFORMATION), consented.object_at(REMITTANCE_INFORMATION))
    else {
        return Err(ErrorCode::PayloadFormatErrorRemittanceInformation.descriptor());
    };
    if !optional_matches(sub.str_at(REFERENCE), init.str_at(REFERENCE)) {
        return Err(ErrorCode::RemittanceReferenceMismatch.descriptor());
    }
    if !optional_matches(sub.str_at(UNSTRUCTURED), init.str_at(UNSTRUCTURED)) {
        return Err(ErrorCode::RemittanceUnstructuredMismatch.descriptor());
    }
    Ok(())
}

// ============================================================================
// SECTION: Field Rules
// ============================================================================

/// Compares one party account field by field.
fn check_account_matches(
    submitted: &DocumentNode,
    consented: &DocumentNode,
    role: AccountRole,
) -> RuleResult {
    if !mandatory_matches(submitted.str_at(SCHEME_NAME), consented.str_at(SCHEME_NAME)) {
        return Err(ErrorCode::AccountSchemeNameMismatch(role).descriptor());
    }
    if !mandatory_matches(submitted.str_at(IDENTIFICATION), consented.str_at(IDENTIFICATION)) {
        return Err(ErrorCode::AccountIdentificationMismatch(role).descriptor());
    }
    if !optional_matches(submitted.str_at(NAME), consented.str_at(NAME)) {
        return Err(ErrorCode::AccountNameMismatch(role).descriptor());
    }
    if !optional_matches(
        submitted.str_at(SECONDARY_IDENTIFICATION),
        consented.str_at(SECONDARY_IDENTIFICATION),
    ) {
        return Err(ErrorCode::AccountSecondaryIdentificationMismatch(role).descriptor());
    }
    Ok(())
}

/// Requires `key` to hold a string.
fn require_string(
    node: &DocumentNode,
    key: &str,
    missing: ErrorCode,
    wrong_type: ErrorCode,
) -> RuleResult {
    match node.get(key) {
        None => Err(missing.descriptor()),
        Some(value) if value.as_str().is_some() => Ok(()),
        Some(_) => Err(wrong_type.descriptor()),
    }
}

/// True when the submitted value is non-empty and equals the consented one.
fn mandatory_matches(submitted: Option<&str>, consented: Option<&str>) -> bool {
    submitted.is_some_and(|value| !value.is_empty()) && submitted == consented
}

/// True when both values are blank or both are present and equal.
fn optional_matches(submitted: Option<&str>, consented: Option<&str>) -> bool {
    let submitted = submitted.filter(|value| !value.trim().is_empty());
    let consented = consented.filter(|value| !value.trim().is_empty());
    submitted == consented
}
