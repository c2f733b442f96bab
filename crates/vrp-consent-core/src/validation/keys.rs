// crates/vrp-consent-core/src/validation/keys.rs
// ============================================================================
// Module: VRP Payload Keys
// Description: Payload field names, allowed values, and length limits.
// Purpose: Keep every literal the validators match against in one place.
// Dependencies: none
// ============================================================================

//! ## Overview
//! Field names follow the Open Banking VRP consent payload.

// ============================================================================
// SECTION: Field Names
// ============================================================================

/// Top-level data block.
pub const DATA: &str = "Data";
/// Top-level risk block (sibling of `Data`).
pub const RISK: &str = "Risk";
/// Initiation block under `Data`.
pub const INITIATION: &str = "Initiation";
/// Control parameters block under `Data`.
pub const CONTROL_PARAMETERS: &str = "ControlParameters";
/// Maximum individual amount object under `ControlParameters`.
pub const MAXIMUM_INDIVIDUAL_AMOUNT: &str = "MaximumIndividualAmount";
/// Periodic limits array under `ControlParameters`.
pub const PERIODIC_LIMITS: &str = "PeriodicLimits";
/// Amount field of an amount/currency pair.
pub const AMOUNT: &str = "Amount";
/// Currency field of an amount/currency pair.
pub const CURRENCY: &str = "Currency";
/// Period type field of a periodic limit.
pub const PERIOD_TYPE: &str = "PeriodType";
/// Period alignment field of a periodic limit.
pub const PERIOD_ALIGNMENT: &str = "PeriodAlignment";
/// Start of the consent validity window.
pub const VALID_FROM_DATE_TIME: &str = "ValidFromDateTime";
/// End of the consent validity window.
pub const VALID_TO_DATE_TIME: &str = "ValidToDateTime";
/// Account scheme name.
pub const SCHEME_NAME: &str = "SchemeName";
/// Account identification.
pub const IDENTIFICATION: &str = "Identification";
/// Account holder name.
pub const NAME: &str = "Name";
/// Account secondary identification.
pub const SECONDARY_IDENTIFICATION: &str = "SecondaryIdentification";
/// Consent reference carried by a payment submission under `Data`.
pub const CONSENT_ID: &str = "ConsentId";
/// Instruction block of a payment submission under `Data`.
pub const INSTRUCTION: &str = "Instruction";
/// Instructing party's reference for one payment.
pub const INSTRUCTION_IDENTIFICATION: &str = "InstructionIdentification";
/// End-to-end reference for one payment.
pub const END_TO_END_IDENTIFICATION: &str = "EndToEndIdentification";
/// Amount object of one payment instruction.
pub const INSTRUCTED_AMOUNT: &str = "InstructedAmount";
/// Remittance information object.
pub const REMITTANCE_INFORMATION: &str = "RemittanceInformation";
/// Structured remittance reference.
pub const REFERENCE: &str = "Reference";
/// Free-text remittance information.
pub const UNSTRUCTURED: &str = "Unstructured";
/// Payment context code under `Risk`.
pub const PAYMENT_CONTEXT_CODE: &str = "PaymentContextCode";

// ============================================================================
// SECTION: Allowed Values
// ============================================================================

/// Accepted `PeriodType` values.
pub const PERIOD_TYPES: &[&str] = &["Day", "Week", "Fortnight", "Month", "Half-year", "Year"];

/// Accepted `PeriodAlignment` values.
pub const PERIOD_ALIGNMENTS: &[&str] = &["Consent", "Day"];

/// Accepted account `SchemeName` values.
pub const ACCOUNT_SCHEME_NAMES: &[&str] =
    &["OB.BBAN", "OB.IBAN", "OB.PAN", "OB.Paym", "OB.SortCodeAccountNumber"];

/// Scheme names that carry a sort code plus account number.
pub const SORT_CODE_SCHEMES: &[&str] = &["SortCodeAccountNumber", "OB.SortCodeAccountNumber"];

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum `SchemeName` length.
pub const MAX_SCHEME_NAME_LENGTH: usize = 256;
/// Maximum `Identification` length.
pub const MAX_IDENTIFICATION_LENGTH: usize = 256;
/// Maximum `Name` length.
pub const MAX_NAME_LENGTH: usize = 350;
/// Maximum `SecondaryIdentification` length.
pub const MAX_SECONDARY_IDENTIFICATION_LENGTH: usize = 34;
/// Exact length of a sort code (6 digits) plus account number (8 digits).
pub const SORT_CODE_IDENTIFICATION_LENGTH: usize = 14;
/// Maximum digits before the decimal point in an amount.
pub const MAX_AMOUNT_INTEGER_DIGITS: usize = 13;
/// Maximum digits after the decimal point in an amount.
pub const MAX_AMOUNT_FRACTION_DIGITS: usize = 5;
