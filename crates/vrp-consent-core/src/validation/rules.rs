// crates/vrp-consent-core/src/validation/rules.rs
// ============================================================================
// Module: VRP Field Rule Primitives
// Description: Reusable key-presence, string, and enumeration checks.
// Purpose: Give section validators short, total building blocks.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Primitives take the containing node as an `Option` so that "container is
//! absent or null" and "container exists but lacks the key" stay distinct:
//! the former reports `"parameter passed in is null"`, the latter
//! `"Mandatory parameter '<key>' is not present in payload"`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::DocumentNode;
use crate::core::ErrorCode;
use crate::core::ErrorDescriptor;
use crate::core::RuleResult;
use crate::validation::keys::MAX_AMOUNT_FRACTION_DIGITS;
use crate::validation::keys::MAX_AMOUNT_INTEGER_DIGITS;

// ============================================================================
// SECTION: Messages
// ============================================================================

/// Message for a rule applied to an absent or null container.
pub const NULL_PARAMETER_MESSAGE: &str = "parameter passed in is null";

/// Builds the message for a container lacking `key`.
#[must_use]
pub fn missing_key_message(key: &str) -> String {
    format!("Mandatory parameter '{key}' is not present in payload")
}

/// Builds the message for a value of the wrong type.
#[must_use]
pub fn wrong_type_message(key: &str, expected: &str) -> String {
    format!("The value of '{key}' is not of type {expected}")
}

/// Builds the message for a string that is empty after trimming.
#[must_use]
pub fn empty_value_message(key: &str) -> String {
    format!("The value of '{key}' is empty")
}

/// Builds the message for a parameter that is null, empty, or of the wrong type.
#[must_use]
pub fn invalid_parameter_message(label: &str, expected: &str) -> String {
    format!("Parameter '{label}' passed in is null, empty, or not a {expected}")
}

// ============================================================================
// SECTION: Primitives
// ============================================================================

/// Requires `node` to be an object holding `key`, returning the child.
///
/// # Errors
///
/// Returns [`ErrorCode::InvalidParameter`] when `node` is absent or null, and
/// [`ErrorCode::MissingParameter`] when it is not an object or lacks `key`.
pub fn require_key<'a>(node: Option<&'a DocumentNode>, key: &str) -> RuleResult<&'a DocumentNode> {
    let Some(node) = node.filter(|node| !node.is_null()) else {
        return Err(null_parameter());
    };
    node.get(key).ok_or_else(|| ErrorCode::MissingParameter.with_message(missing_key_message(key)))
}

/// Requires `node[key]` to be a string that is non-empty after trimming.
///
/// # Errors
///
/// Returns the [`require_key`] errors, [`ErrorCode::InvalidParameterType`]
/// when the value is not a string, and [`ErrorCode::EmptyParameter`] when it
/// is blank.
pub fn require_non_empty_string<'a>(
    node: Option<&'a DocumentNode>,
    key: &str,
) -> RuleResult<&'a str> {
    let value = require_key(node, key)?;
    let Some(text) = value.as_str() else {
        return Err(ErrorCode::InvalidParameterType.with_message(wrong_type_message(key, "String")));
    };
    if text.trim().is_empty() {
        return Err(ErrorCode::EmptyParameter.with_message(empty_value_message(key)));
    }
    Ok(text)
}

/// Requires `node[key]` to be a non-empty string drawn from `allowed`.
///
/// # Errors
///
/// Returns `missing` when the value is absent, empty, or not a string, and
/// `invalid` when it is a string outside `allowed`.
pub fn require_enum<'a>(
    node: Option<&'a DocumentNode>,
    key: &str,
    allowed: &[&str],
    missing: ErrorCode,
    invalid: ErrorCode,
) -> RuleResult<&'a str> {
    let Some(value) = node.and_then(|node| node.non_empty_str_at(key)) else {
        return Err(missing.descriptor());
    };
    if allowed.contains(&value) { Ok(value) } else { Err(invalid.descriptor()) }
}

/// Returns the descriptor for an absent or null container.
#[must_use]
pub fn null_parameter() -> ErrorDescriptor {
    ErrorCode::InvalidParameter.with_message(NULL_PARAMETER_MESSAGE)
}

// ============================================================================
// SECTION: Value Formats
// ============================================================================

/// Returns true when `value` is an Open Banking amount: up to 13 digits,
/// optionally followed by a point and 1 to 5 digits.
#[must_use]
pub fn is_ob_amount(value: &str) -> bool {
    let (integer, fraction) = match value.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (value, None),
    };
    let digits = |part: &str, max: usize| {
        !part.is_empty() && part.len() <= max && part.bytes().all(|byte| byte.is_ascii_digit())
    };
    digits(integer, MAX_AMOUNT_INTEGER_DIGITS)
        && fraction.is_none_or(|fraction| digits(fraction, MAX_AMOUNT_FRACTION_DIGITS))
}

// ============================================================================
// SECTION: Tests
// ============================================================================
