// crates/vrp-consent-core/src/validation/initiation.rs
// ============================================================================
// Module: VRP Initiation Validators
// Description: Section validators for Data.Initiation and its party accounts.
// Purpose: Enforce debtor and creditor account rules before control parameters.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! [`validate_initiation`] requires the `Initiation` object and then checks
//! the debtor account followed by the creditor account. The baseline account
//! rule only requires non-empty `SchemeName` and `Identification` strings;
//! the strict account rule set adds scheme membership, field lengths, and
//! the sort-code format, in that order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::AccountRole;
use crate::core::DocumentNode;
use crate::core::ErrorCode;
use crate::core::RuleResult;
use crate::core::ValidationOutcome;
use crate::validation::keys::ACCOUNT_SCHEME_NAMES;
use crate::validation::keys::IDENTIFICATION;
use crate::validation::keys::INITIATION;
use crate::validation::keys::MAX_IDENTIFICATION_LENGTH;
use crate::validation::keys::MAX_NAME_LENGTH;
use crate::validation::keys::MAX_SCHEME_NAME_LENGTH;
use crate::validation::keys::MAX_SECONDARY_IDENTIFICATION_LENGTH;
use crate::validation::keys::NAME;
use crate::validation::keys::SCHEME_NAME;
use crate::validation::keys::SECONDARY_IDENTIFICATION;
use crate::validation::keys::SORT_CODE_IDENTIFICATION_LENGTH;
use crate::validation::keys::SORT_CODE_SCHEMES;
use crate::validation::options::ValidationOptions;
use crate::validation::rules::invalid_parameter_message;

// ============================================================================
// SECTION: Public Validators
// ============================================================================

/// Validates `Data.Initiation.DebtorAccount` with the baseline rule set.
#[must_use]
pub fn validate_debtor_account(account: Option<&DocumentNode>) -> ValidationOutcome {
    check_account(account, AccountRole::Debtor, &ValidationOptions::default()).into()
}

/// Validates `Data.Initiation.CreditorAccount` with the baseline rule set.
#[must_use]
pub fn validate_creditor_account(account: Option<&DocumentNode>) -> ValidationOutcome {
    check_account(account, AccountRole::Creditor, &ValidationOptions::default()).into()
}

/// Validates a party account with an explicit rule set.
#[must_use]
pub fn validate_account(
    account: Option<&DocumentNode>,
    role: AccountRole,
    options: &ValidationOptions,
) -> ValidationOutcome {
    check_account(account, role, options).into()
}

/// Validates the `Initiation` block of a `Data` node with the baseline rule set.
#[must_use]
pub fn validate_initiation(data: &DocumentNode) -> ValidationOutcome {
    check_initiation(data, &ValidationOptions::default()).into()
}

// ============================================================================
// SECTION: Composite
// ============================================================================

/// Checks the initiation block, then debtor, then creditor.
pub(crate) fn check_initiation(data: &DocumentNode, options: &ValidationOptions) -> RuleResult {
    let Some(initiation) = data.object_at(INITIATION) else {
        return Err(ErrorCode::PayloadFormatErrorInitiation.descriptor());
    };
    for role in [AccountRole::Debtor, AccountRole::Creditor] {
        check_account(initiation.get(role.payload_key()), role, options)?;
    }
    Ok(())
}

// ============================================================================
// SECTION: Account Rules
// ============================================================================

/// Checks one party account.
fn check_account(
    account: Option<&DocumentNode>,
    role: AccountRole,
    options: &ValidationOptions,
) -> RuleResult {
    let Some(account) = account.filter(|node| node.is_non_empty_object()) else {
        return Err(ErrorCode::PayloadFormatErrorAccount(role)
            .with_message(invalid_parameter_message(role.label(), "JSONObject")));
    };
    let Some(scheme_name) = account.non_empty_str_at(SCHEME_NAME) else {
        return Err(ErrorCode::MissingAccountSchemeName(role).descriptor());
    };
    let Some(identification) = account.non_empty_str_at(IDENTIFICATION) else {
        return Err(ErrorCode::MissingAccountIdentification(role).descriptor());
    };
    if options.strict_accounts {
        check_account_details(account, role, scheme_name, identification)?;
    }
    Ok(())
}

/// Applies the strict account rules after the presence checks pass.
fn check_account_details(
    account: &DocumentNode,
    role: AccountRole,
    scheme_name: &str,
    identification: &str,
) -> RuleResult {
    if scheme_name.chars().count() > MAX_SCHEME_NAME_LENGTH {
        return Err(ErrorCode::InvalidAccountSchemeNameLength(role).descriptor());
    }
    if !ACCOUNT_SCHEME_NAMES.contains(&scheme_name) {
        return Err(ErrorCode::InvalidAccountSchemeName(role).descriptor());
    }
    if identification.chars().count() > MAX_IDENTIFICATION_LENGTH {
        return Err(ErrorCode::InvalidAccountIdentification(role).descriptor());
    }
    if exceeds(account.str_at(NAME), MAX_NAME_LENGTH) {
        return Err(ErrorCode::InvalidAccountName(role).descriptor());
    }
    if exceeds(account.str_at(SECONDARY_IDENTIFICATION), MAX_SECONDARY_IDENTIFICATION_LENGTH) {
        return Err(ErrorCode::InvalidAccountSecondaryIdentification(role).descriptor());
    }
    if SORT_CODE_SCHEMES.contains(&scheme_name) && !is_sort_code_identification(identification) {
        return Err(ErrorCode::InvalidSortCodeIdentification.descriptor());
    }
    Ok(())
}

/// Returns true when an optional string is longer than `max` characters.
fn exceeds(value: Option<&str>, max: usize) -> bool {
    value.is_some_and(|text| text.chars().count() > max)
}

/// Returns true for a 6-digit sort code followed by an 8-digit account number.
fn is_sort_code_identification(identification: &str) -> bool {
    identification.len() == SORT_CODE_IDENTIFICATION_LENGTH
        && identification.bytes().all(|byte| byte.is_ascii_digit())
}
