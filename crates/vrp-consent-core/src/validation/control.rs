// crates/vrp-consent-core/src/validation/control.rs
// ============================================================================
// Module: VRP Control Parameter Validators
// Description: Section validators for amounts, periodic limits, and windows.
// Purpose: Enforce the Data.ControlParameters rules in fixed precedence order.
// Dependencies: crate::core, time
// ============================================================================

//! ## Overview
//! The composite [`validate_control_parameters`] runs, in order: maximum
//! individual amount, periodic limits (structure, then currency per entry),
//! period type per entry, period alignment per entry, and the validity
//! window. The first failure wins.
//!
//! ## Invariants
//! - A missing or non-object `ControlParameters` block reports
//!   `MISSING_MAXIMUM_INDIVIDUAL_AMOUNT`, the first rule of the composite.
//! - An empty `PeriodicLimits` array passes every per-entry rule.

// ============================================================================
// SECTION: Imports
// ============================================================================

use time::OffsetDateTime;
use time::format_description;
use time::format_description::well_known::Rfc3339;

use crate::core::DocumentNode;
use crate::core::ErrorCode;
use crate::core::RuleResult;
use crate::core::ValidationOutcome;
use crate::validation::keys::AMOUNT;
use crate::validation::keys::CURRENCY;
use crate::validation::keys::MAXIMUM_INDIVIDUAL_AMOUNT;
use crate::validation::keys::PERIOD_ALIGNMENT;
use crate::validation::keys::PERIOD_ALIGNMENTS;
use crate::validation::keys::PERIOD_TYPE;
use crate::validation::keys::PERIOD_TYPES;
use crate::validation::keys::PERIODIC_LIMITS;
use crate::validation::keys::VALID_FROM_DATE_TIME;
use crate::validation::keys::VALID_TO_DATE_TIME;
use crate::validation::options::ValidationOptions;
use crate::validation::rules::invalid_parameter_message;
use crate::validation::rules::is_ob_amount;
use crate::validation::rules::null_parameter;
use crate::validation::rules::require_enum;
use crate::validation::rules::require_non_empty_string;

// ============================================================================
// SECTION: Public Validators
// ============================================================================

/// Validates `MaximumIndividualAmount` inside a `ControlParameters` node.
#[must_use]
pub fn validate_maximum_individual_amount(control_parameters: &DocumentNode) -> ValidationOutcome {
    check_maximum_individual_amount(control_parameters, &ValidationOptions::default()).into()
}

/// Validates that `PeriodicLimits` is present and is an array.
#[must_use]
pub fn validate_periodic_limits(control_parameters: &DocumentNode) -> ValidationOutcome {
    check_periodic_limits(control_parameters).map(|_| ()).into()
}

/// Validates that every periodic limit entry carries a non-empty string `key`.
///
/// This is the per-entry currency rule when `key` is `Some("Currency")`. An
/// absent or null array reports `"parameter passed in is null"`; an absent
/// key passes without inspecting the entries.
#[must_use]
pub fn validate_periodic_limit_field(
    limits: Option<&DocumentNode>,
    key: Option<&str>,
) -> ValidationOutcome {
    check_periodic_limit_field(limits, key).into()
}

/// Validates `PeriodType` of one periodic limit entry.
#[must_use]
pub fn validate_period_type(limit: &DocumentNode) -> ValidationOutcome {
    check_period_type(limit).into()
}

/// Validates `PeriodAlignment` of one periodic limit entry.
#[must_use]
pub fn validate_period_alignment(limit: &DocumentNode) -> ValidationOutcome {
    check_period_alignment(limit).into()
}

/// Validates the `ValidFromDateTime` / `ValidToDateTime` window.
#[must_use]
pub fn validate_date_time_window(control_parameters: &DocumentNode) -> ValidationOutcome {
    check_date_time_window(control_parameters, &ValidationOptions::default()).into()
}

/// Validates a `ControlParameters` node with the baseline rule set.
#[must_use]
pub fn validate_control_parameters(control_parameters: Option<&DocumentNode>) -> ValidationOutcome {
    check_control_parameters(control_parameters, &ValidationOptions::default()).into()
}

// ============================================================================
// SECTION: Composite
// ============================================================================

/// Runs every control-parameter rule in precedence order.
pub(crate) fn check_control_parameters(
    control_parameters: Option<&DocumentNode>,
    options: &ValidationOptions,
) -> RuleResult {
    let Some(control_parameters) = control_parameters.filter(|node| node.is_object()) else {
        return Err(ErrorCode::MissingMaximumIndividualAmount.descriptor());
    };
    check_maximum_individual_amount(control_parameters, options)?;
    let limits = check_periodic_limits(control_parameters)?;
    check_periodic_limit_field(control_parameters.get(PERIODIC_LIMITS), Some(CURRENCY))?;
    if let Some(max) = options.max_periodic_limits
        && limits.len() > max
    {
        return Err(ErrorCode::TooManyPeriodicLimits.descriptor());
    }
    if options.strict_amounts {
        for limit in limits {
            if !limit.non_empty_str_at(AMOUNT).is_some_and(is_ob_amount) {
                return Err(ErrorCode::InvalidPeriodicLimitAmount.descriptor());
            }
        }
    }
    for limit in limits {
        check_period_type(limit)?;
    }
    for limit in limits {
        check_period_alignment(limit)?;
    }
    check_date_time_window(control_parameters, options)
}

// ============================================================================
// SECTION: Section Rules
// ============================================================================

/// Checks the maximum individual amount object and its currency.
fn check_maximum_individual_amount(
    control_parameters: &DocumentNode,
    options: &ValidationOptions,
) -> RuleResult {
    let Some(amount) =
        control_parameters.get(MAXIMUM_INDIVIDUAL_AMOUNT).filter(|node| node.is_non_empty_object())
    else {
        return Err(ErrorCode::MissingMaximumIndividualAmount
            .with_message(invalid_parameter_message("maximum individual amount", "JSONObject")));
    };
    require_non_empty_string(Some(amount), CURRENCY)?;
    if options.strict_amounts && !amount.non_empty_str_at(AMOUNT).is_some_and(is_ob_amount) {
        return Err(ErrorCode::PayloadFormatErrorMaximumIndividualAmount.descriptor());
    }
    Ok(())
}

/// Checks that `PeriodicLimits` exists and is an array, returning its entries.
fn check_periodic_limits(control_parameters: &DocumentNode) -> RuleResult<&[DocumentNode]> {
    let Some(limits) = control_parameters.get(PERIODIC_LIMITS) else {
        return Err(ErrorCode::MissingPeriodLimits.descriptor());
    };
    limits.as_array().ok_or_else(|| ErrorCode::InvalidParameterPeriodicLimits.descriptor())
}

/// Checks one string field across every periodic limit entry.
fn check_periodic_limit_field(limits: Option<&DocumentNode>, key: Option<&str>) -> RuleResult {
    let Some(limits) = limits.filter(|node| !node.is_null()) else {
        return Err(null_parameter());
    };
    let Some(key) = key else {
        return Ok(());
    };
    let Some(entries) = limits.as_array() else {
        return Err(ErrorCode::InvalidParameterPeriodicLimits.descriptor());
    };
    for entry in entries {
        require_non_empty_string(Some(entry), key)?;
    }
    Ok(())
}

/// Checks the period type of one entry.
fn check_period_type(limit: &DocumentNode) -> RuleResult {
    require_enum(
        Some(limit),
        PERIOD_TYPE,
        PERIOD_TYPES,
        ErrorCode::MissingPeriodType,
        ErrorCode::InvalidPeriodType,
    )
    .map(|_| ())
}

/// Checks the period alignment of one entry.
fn check_period_alignment(limit: &DocumentNode) -> RuleResult {
    require_enum(
        Some(limit),
        PERIOD_ALIGNMENT,
        PERIOD_ALIGNMENTS,
        ErrorCode::MissingPeriodAlignment,
        ErrorCode::InvalidPeriodAlignment,
    )
    .map(|_| ())
}

/// Checks the validity window bounds.
///
/// The end bound is checked first. A start bound that is present but not
/// parseable reports `MISSING_VALID_TO_DATE_TIME`, matching the established
/// error contract for this rule.
fn check_date_time_window(
    control_parameters: &DocumentNode,
    options: &ValidationOptions,
) -> RuleResult {
    let Some(valid_to) = control_parameters.get(VALID_TO_DATE_TIME) else {
        return Err(ErrorCode::MissingValidToDateTime.descriptor());
    };
    let valid_to =
        parse_date_time(valid_to)?.ok_or_else(|| ErrorCode::MissingValidToDateTime.descriptor())?;
    let Some(valid_from) = control_parameters.get(VALID_FROM_DATE_TIME) else {
        return Err(ErrorCode::MissingDateTimeFormat.descriptor());
    };
    let valid_from =
        parse_date_time(valid_from)?.ok_or_else(|| ErrorCode::MissingValidToDateTime.descriptor())?;

    if options.check_window_order && valid_from > valid_to {
        return Err(ErrorCode::InvalidDateTimeRange.descriptor());
    }
    if let Some(now) = options.reference_time
        && valid_to < now
    {
        return Err(ErrorCode::ExpiredValidToDateTime.descriptor());
    }
    Ok(())
}

/// ISO 8601 extended offset date-time with optional seconds and fraction.
///
/// A trailing `Z` is rewritten to `+00:00` before this layout is applied.
const OFFSET_DATE_TIME_LAYOUT: &str = "[year]-[month]-[day]T[hour]:[minute]\
     [optional [:[second][optional [.[subsecond]]]]]\
     [offset_hour sign:mandatory]:[offset_minute]";

/// Parses a date-time node.
///
/// Returns `Err(MISSING_DATE_TIME_FORMAT)` for empty or non-string values and
/// `Ok(None)` for strings that are not offset date-times.
fn parse_date_time(node: &DocumentNode) -> RuleResult<Option<OffsetDateTime>> {
    let Some(text) = node.as_str().filter(|text| !text.trim().is_empty()) else {
        return Err(ErrorCode::MissingDateTimeFormat.descriptor());
    };
    Ok(parse_offset_date_time(text.trim()))
}

/// Parses RFC 3339 text, falling back to ISO 8601 forms that omit seconds.
///
/// A UTC offset is always required.
fn parse_offset_date_time(text: &str) -> Option<OffsetDateTime> {
    if let Ok(value) = OffsetDateTime::parse(text, &Rfc3339) {
        return Some(value);
    }
    let layout = format_description::parse(OFFSET_DATE_TIME_LAYOUT).ok()?;
    let normalized = match text.strip_suffix(['Z', 'z']) {
        Some(head) => format!("{head}+00:00"),
        None => text.to_string(),
    };
    OffsetDateTime::parse(&normalized, &layout).ok()
}
