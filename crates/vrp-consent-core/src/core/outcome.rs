// crates/vrp-consent-core/src/core/outcome.rs
// ============================================================================
// Module: VRP Validation Outcomes
// Description: Error catalogue, error descriptors, and validation outcomes.
// Purpose: Report exactly one stable error per rejected consent payload.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Every rule in the validator produces a [`ValidationOutcome`]. An outcome is
//! either valid with no error or invalid with exactly one [`ErrorDescriptor`].
//! Descriptors carry an [`ErrorCode`] from a fixed catalogue plus message text;
//! callers compare codes, the message is documentation for API clients.
//!
//! Rules are written against [`RuleResult`] so that `?` short-circuits on the
//! first failure; the result converts into an outcome at the public boundary.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Serialize;
use serde::Serializer;

// ============================================================================
// SECTION: Account Roles
// ============================================================================

/// Which party account in the initiation block a rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AccountRole {
    /// `Data.Initiation.DebtorAccount`.
    Debtor,
    /// `Data.Initiation.CreditorAccount`.
    Creditor,
}

impl AccountRole {
    /// Returns the payload key holding this account.
    #[must_use]
    pub const fn payload_key(self) -> &'static str {
        match self {
            Self::Debtor => "DebtorAccount",
            Self::Creditor => "CreditorAccount",
        }
    }

    /// Returns the lowercase label used in parameter messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Debtor => "debtor account",
            Self::Creditor => "creditor account",
        }
    }
}

// ============================================================================
// SECTION: Error Categories
// ============================================================================

/// Open Banking error category reported alongside each code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// A required field is absent.
    FieldMissing,
    /// A field is present but carries an unacceptable value.
    FieldInvalid,
    /// The request body is not in the expected format.
    ResourceInvalidFormat,
    /// A payment submission disagrees with its consent.
    ResourceConsentMismatch,
    /// The consent is not in a state that permits the request.
    ResourceInvalidConsentStatus,
}

impl ErrorCategory {
    /// Returns the Open Banking error code string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FieldMissing => "OB.Field.Missing",
            Self::FieldInvalid => "OB.Field.Invalid",
            Self::ResourceInvalidFormat => "OB.Resource.InvalidFormat",
            Self::ResourceConsentMismatch => "OB.Resource.ConsentMismatch",
            Self::ResourceInvalidConsentStatus => "OB.Resource.InvalidConsentStatus",
        }
    }
}

impl Serialize for ErrorCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Error Catalogue
// ============================================================================

/// Fixed catalogue of validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// The payload is not an object or lacks a `Data` object.
    PayloadFormatError,
    /// A rule was applied to an absent or null container.
    InvalidParameter,
    /// A container lacks a required key.
    MissingParameter,
    /// A value exists but has the wrong type.
    InvalidParameterType,
    /// A string value is empty after trimming.
    EmptyParameter,
    /// `Data.Initiation` is absent or not an object.
    PayloadFormatErrorInitiation,
    /// Top-level `Risk` is absent or not an object.
    PayloadFormatErrorRisk,
    /// A party account object is absent, empty, or not an object.
    PayloadFormatErrorAccount(AccountRole),
    /// A party account lacks a non-empty `SchemeName`.
    MissingAccountSchemeName(AccountRole),
    /// A party account lacks a non-empty `Identification`.
    MissingAccountIdentification(AccountRole),
    /// A party account `SchemeName` is not a recognised scheme.
    InvalidAccountSchemeName(AccountRole),
    /// A party account `SchemeName` exceeds the length limit.
    InvalidAccountSchemeNameLength(AccountRole),
    /// A party account `Identification` exceeds the length limit.
    InvalidAccountIdentification(AccountRole),
    /// A party account `Name` exceeds the length limit.
    InvalidAccountName(AccountRole),
    /// A party account `SecondaryIdentification` exceeds the length limit.
    InvalidAccountSecondaryIdentification(AccountRole),
    /// A sort-code account number is not 14 digits.
    InvalidSortCodeIdentification,
    /// `MaximumIndividualAmount` (or its parent block) is absent or malformed.
    MissingMaximumIndividualAmount,
    /// `MaximumIndividualAmount.Amount` is not a valid amount.
    PayloadFormatErrorMaximumIndividualAmount,
    /// `PeriodicLimits` is present but not an array.
    InvalidParameterPeriodicLimits,
    /// `PeriodicLimits` is absent.
    MissingPeriodLimits,
    /// A periodic limit `Amount` is not a valid amount.
    InvalidPeriodicLimitAmount,
    /// `PeriodicLimits` holds more entries than allowed.
    TooManyPeriodicLimits,
    /// `PeriodType` is absent, empty, or not a string.
    MissingPeriodType,
    /// `PeriodType` is not a recognised period.
    InvalidPeriodType,
    /// `PeriodAlignment` is absent, empty, or not a string.
    MissingPeriodAlignment,
    /// `PeriodAlignment` is not a recognised alignment.
    InvalidPeriodAlignment,
    /// A date-time value is empty or not a string, or `ValidFromDateTime` is absent.
    MissingDateTimeFormat,
    /// `ValidToDateTime` is absent or unparseable, or `ValidFromDateTime` is unparseable.
    MissingValidToDateTime,
    /// `ValidFromDateTime` is later than `ValidToDateTime`.
    InvalidDateTimeRange,
    /// `ValidToDateTime` is earlier than the reference time.
    ExpiredValidToDateTime,
    /// A payment was submitted against a consent that is not authorised.
    InvalidConsentStatus,
    /// `Data.ConsentId` is absent, not a string, or names another consent.
    ConsentIdMismatch,
    /// `Data.Instruction` of a submission is absent or not an object.
    PayloadFormatErrorInstruction,
    /// `InstructionIdentification` is absent from the instruction.
    MissingInstructionIdentification,
    /// `InstructionIdentification` is not a string.
    InvalidInstructionIdentification,
    /// `EndToEndIdentification` is absent from the instruction.
    MissingEndToEndIdentification,
    /// `EndToEndIdentification` is not a string.
    InvalidEndToEndIdentification,
    /// `InstructedAmount` is absent from the instruction.
    MissingInstructedAmount,
    /// The debtor account is present on only one of submission and consent.
    DebtorAccountMismatch,
    /// A submitted account `SchemeName` is empty or differs from the consent.
    AccountSchemeNameMismatch(AccountRole),
    /// A submitted account `Identification` is empty or differs from the consent.
    AccountIdentificationMismatch(AccountRole),
    /// A submitted account `Name` differs from the consent.
    AccountNameMismatch(AccountRole),
    /// A submitted account `SecondaryIdentification` differs from the consent.
    AccountSecondaryIdentificationMismatch(AccountRole),
    /// `RemittanceInformation` is absent or not an object on either side.
    PayloadFormatErrorRemittanceInformation,
    /// `RemittanceInformation.Reference` differs from the consent.
    RemittanceReferenceMismatch,
    /// `RemittanceInformation.Unstructured` differs from the consent.
    RemittanceUnstructuredMismatch,
    /// `Risk.PaymentContextCode` differs from the consent.
    RiskMismatch,
}

impl ErrorCode {
    /// Returns the stable identifier for this code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PayloadFormatError => "PAYLOAD_FORMAT_ERROR",
            Self::InvalidParameter => "INVALID_PARAMETER",
            Self::MissingParameter => "MISSING_PARAMETER",
            Self::InvalidParameterType => "INVALID_PARAMETER_TYPE",
            Self::EmptyParameter => "EMPTY_PARAMETER",
            Self::PayloadFormatErrorInitiation => "PAYLOAD_FORMAT_ERROR_INITIATION",
            Self::PayloadFormatErrorRisk => "PAYLOAD_FORMAT_ERROR_RISK",
            Self::PayloadFormatErrorAccount(AccountRole::Debtor) => {
                "PAYLOAD_FORMAT_ERROR_DEBTOR_ACC"
            }
            Self::PayloadFormatErrorAccount(AccountRole::Creditor) => {
                "PAYLOAD_FORMAT_ERROR_CREDITOR_ACC"
            }
            Self::MissingAccountSchemeName(AccountRole::Debtor) => "MISSING_DEBTOR_ACC_SCHEME_NAME",
            Self::MissingAccountSchemeName(AccountRole::Creditor) => {
                "MISSING_CREDITOR_ACC_SCHEME_NAME"
            }
            Self::MissingAccountIdentification(AccountRole::Debtor) => {
                "MISSING_DEBTOR_ACC_IDENTIFICATION"
            }
            Self::MissingAccountIdentification(AccountRole::Creditor) => {
                "MISSING_CREDITOR_ACC_IDENTIFICATION"
            }
            Self::InvalidAccountSchemeName(AccountRole::Debtor) => "INVALID_DEBTOR_ACC_SCHEME_NAME",
            Self::InvalidAccountSchemeName(AccountRole::Creditor) => {
                "INVALID_CREDITOR_ACC_SCHEME_NAME"
            }
            Self::InvalidAccountSchemeNameLength(AccountRole::Debtor) => {
                "INVALID_DEBTOR_ACC_SCHEME_NAME_LENGTH"
            }
            Self::InvalidAccountSchemeNameLength(AccountRole::Creditor) => {
                "INVALID_CREDITOR_ACC_SCHEME_NAME_LENGTH"
            }
            Self::InvalidAccountIdentification(AccountRole::Debtor) => {
                "INVALID_DEBTOR_ACC_IDENTIFICATION"
            }
            Self::InvalidAccountIdentification(AccountRole::Creditor) => {
                "INVALID_CREDITOR_ACC_IDENTIFICATION"
            }
            Self::InvalidAccountName(AccountRole::Debtor) => "INVALID_DEBTOR_ACC_NAME",
            Self::InvalidAccountName(AccountRole::Creditor) => "INVALID_CREDITOR_ACC_NAME",
            Self::InvalidAccountSecondaryIdentification(AccountRole::Debtor) => {
                "INVALID_DEBTOR_ACC_SEC_IDENTIFICATION"
            }
            Self::InvalidAccountSecondaryIdentification(AccountRole::Creditor) => {
                "INVALID_CREDITOR_ACC_SEC_IDENTIFICATION"
            }
            Self::InvalidSortCodeIdentification => "INVALID_IDENTIFICATION",
            Self::MissingMaximumIndividualAmount => "MISSING_MAXIMUM_INDIVIDUAL_AMOUNT",
            Self::PayloadFormatErrorMaximumIndividualAmount => {
                "PAYLOAD_FORMAT_ERROR_MAXIMUM_INDIVIDUAL_AMOUNT"
            }
            Self::InvalidParameterPeriodicLimits => "INVALID_PARAMETER_PERIODIC_LIMITS",
            Self::MissingPeriodLimits => "MISSING_PERIOD_LIMITS",
            Self::InvalidPeriodicLimitAmount => "INVALID_PERIODIC_LIMIT_AMOUNT",
            Self::TooManyPeriodicLimits => "TOO_MANY_PERIODIC_LIMITS",
            Self::MissingPeriodType => "MISSING_PERIOD_TYPE",
            Self::InvalidPeriodType => "INVALID_PERIOD_TYPE",
            Self::MissingPeriodAlignment => "MISSING_PERIOD_ALIGNMENT",
            Self::InvalidPeriodAlignment => "INVALID_PERIOD_ALIGNMENT",
            Self::MissingDateTimeFormat => "MISSING_DATE_TIME_FORMAT",
            Self::MissingValidToDateTime => "MISSING_VALID_TO_DATE_TIME",
            Self::InvalidDateTimeRange => "INVALID_DATE_TIME_RANGE",
            Self::ExpiredValidToDateTime => "EXPIRED_VALID_TO_DATE_TIME",
            Self::InvalidConsentStatus => "INVALID_CONSENT_STATUS",
            Self::ConsentIdMismatch => "CONSENT_ID_MISMATCH",
            Self::PayloadFormatErrorInstruction => "PAYLOAD_FORMAT_ERROR_INSTRUCTION",
            Self::MissingInstructionIdentification => "MISSING_INSTRUCTION_IDENTIFICATION",
            Self::InvalidInstructionIdentification => "INVALID_INSTRUCTION_IDENTIFICATION",
            Self::MissingEndToEndIdentification => "MISSING_END_TO_END_IDENTIFICATION",
            Self::InvalidEndToEndIdentification => "INVALID_END_TO_END_IDENTIFICATION",
            Self::MissingInstructedAmount => "MISSING_INSTRUCTED_AMOUNT",
            Self::DebtorAccountMismatch => "DEBTOR_ACC_MISMATCH",
            Self::AccountSchemeNameMismatch(AccountRole::Debtor) => {
                "DEBTOR_ACC_SCHEME_NAME_MISMATCH"
            }
            Self::AccountSchemeNameMismatch(AccountRole::Creditor) => {
                "CREDITOR_ACC_SCHEME_NAME_MISMATCH"
            }
            Self::AccountIdentificationMismatch(AccountRole::Debtor) => {
                "DEBTOR_ACC_IDENTIFICATION_MISMATCH"
            }
            Self::AccountIdentificationMismatch(AccountRole::Creditor) => {
                "CREDITOR_ACC_IDENTIFICATION_MISMATCH"
            }
            Self::AccountNameMismatch(AccountRole::Debtor) => "DEBTOR_ACC_NAME_MISMATCH",
            Self::AccountNameMismatch(AccountRole::Creditor) => "CREDITOR_ACC_NAME_MISMATCH",
            Self::AccountSecondaryIdentificationMismatch(AccountRole::Debtor) => {
                "DEBTOR_ACC_SEC_IDENTIFICATION_MISMATCH"
            }
            Self::AccountSecondaryIdentificationMismatch(AccountRole::Creditor) => {
                "CREDITOR_ACC_SEC_IDENTIFICATION_MISMATCH"
            }
            Self::PayloadFormatErrorRemittanceInformation => "PAYLOAD_FORMAT_ERROR_REMITTANCE_INFO",
            Self::RemittanceReferenceMismatch => "REMITTANCE_INFO_MISMATCH",
            Self::RemittanceUnstructuredMismatch => "REMITTANCE_UNSTRUCTURED_MISMATCH",
            Self::RiskMismatch => "RISK_MISMATCH",
        }
    }

    /// Returns the catalogue message for this code.
    ///
    /// Rules that name a specific key build their own message and only reuse
    /// the code.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::PayloadFormatError => "Request Payload is not in correct JSON format",
            Self::InvalidParameter => "parameter passed in is null",
            Self::MissingParameter => "Mandatory parameter is not present in payload",
            Self::InvalidParameterType => "The value is not of the expected type",
            Self::EmptyParameter => "The value is empty",
            Self::PayloadFormatErrorInitiation => {
                "Missing mandatory parameter Initiation in the payload"
            }
            Self::PayloadFormatErrorRisk => "Mandatory parameter Risk does not exists in the payload",
            Self::PayloadFormatErrorAccount(AccountRole::Debtor) => {
                "Parameter Debtor Account does not exists"
            }
            Self::PayloadFormatErrorAccount(AccountRole::Creditor) => {
                "Parameter Creditor Account does not exists"
            }
            Self::MissingAccountSchemeName(AccountRole::Debtor) => {
                "Mandatory parameter Debtor Account Scheme Name does not exists"
            }
            Self::MissingAccountSchemeName(AccountRole::Creditor) => {
                "Mandatory parameter Creditor Account Scheme Name does not exists"
            }
            Self::MissingAccountIdentification(AccountRole::Debtor) => {
                "Mandatory parameter Debtor Account Identification does not exists"
            }
            Self::MissingAccountIdentification(AccountRole::Creditor) => {
                "Mandatory parameter Creditor Account Identification does not exists"
            }
            Self::InvalidAccountSchemeName(AccountRole::Debtor) => {
                "Debtor Account Scheme Name does not match with the Scheme Names defined in the \
                 OB standard"
            }
            Self::InvalidAccountSchemeName(AccountRole::Creditor) => {
                "Creditor Account Scheme Name does not match with the Scheme Names defined in the \
                 OB standard"
            }
            Self::InvalidAccountSchemeNameLength(AccountRole::Debtor) => {
                "Debtor Account Scheme Name length does not match with the length defined in the \
                 OB standard"
            }
            Self::InvalidAccountSchemeNameLength(AccountRole::Creditor) => {
                "Creditor Account Scheme Name length does not match with the length defined in the \
                 OB standard"
            }
            Self::InvalidAccountIdentification(AccountRole::Debtor) => {
                "Debtor Account Identification should not exceed the max length of 256 characters \
                 defined in the OB standard"
            }
            Self::InvalidAccountIdentification(AccountRole::Creditor) => {
                "Creditor Account Identification should not exceed the max length of 256 \
                 characters defined in the OB standard"
            }
            Self::InvalidAccountName(AccountRole::Debtor) => {
                "Debtor Account Name should not exceed the max length of 350 characters defined in \
                 the OB standard"
            }
            Self::InvalidAccountName(AccountRole::Creditor) => {
                "Creditor Account Name should not exceed the max length of 350 characters defined \
                 in the OB standard"
            }
            Self::InvalidAccountSecondaryIdentification(AccountRole::Debtor) => {
                "Debtor Account Secondary Identification should not exceed the max length of 34 \
                 characters defined in the OB standard"
            }
            Self::InvalidAccountSecondaryIdentification(AccountRole::Creditor) => {
                "Creditor Account Secondary Identification should not exceed the max length of 34 \
                 characters defined in the OB standard"
            }
            Self::InvalidSortCodeIdentification => {
                "Identification validation for SortCodeNumber Scheme failed."
            }
            Self::MissingMaximumIndividualAmount => {
                "Missing mandatory parameter Maximum Individual Amount"
            }
            Self::PayloadFormatErrorMaximumIndividualAmount => "Invalid maximum individual amount",
            Self::InvalidParameterPeriodicLimits => {
                "Parameter passed in is null, empty or not a JSONArray"
            }
            Self::MissingPeriodLimits => {
                "Mandatory parameter periodic limits is missing in the payload"
            }
            Self::InvalidPeriodicLimitAmount => "Invalid amount in PeriodicLimits",
            Self::TooManyPeriodicLimits => "PeriodicLimits holds more entries than allowed",
            Self::MissingPeriodType => "Missing required parameter Period type",
            Self::InvalidPeriodType => "Invalid value for period type in PeriodicLimits",
            Self::MissingPeriodAlignment => "Missing periodic alignment in periodic limits",
            Self::InvalidPeriodAlignment => "Invalid value for period alignment in PeriodicLimits",
            Self::MissingDateTimeFormat => "The value is empty or the value is not a string",
            Self::MissingValidToDateTime => "Missing parameter ValidToDateTime",
            Self::InvalidDateTimeRange => "Invalid date-time range for ValidToDateTime",
            Self::ExpiredValidToDateTime => "ValidToDateTime is earlier than the current date-time",
            Self::InvalidConsentStatus => "Payment validation failed due to invalid consent state.",
            Self::ConsentIdMismatch => {
                "The consent-Id is not present in the request or it is not a String instance or \
                 there is a consentId mismatch"
            }
            Self::PayloadFormatErrorInstruction => {
                "Missing mandatory parameter Instruction in the payload"
            }
            Self::MissingInstructionIdentification => {
                "Instruction Identification isn't present in the request"
            }
            Self::InvalidInstructionIdentification => {
                "Value associated with InstructionIdentification key is not a String instance"
            }
            Self::MissingEndToEndIdentification => {
                "End to End Identification isn't present in the request"
            }
            Self::InvalidEndToEndIdentification => {
                "Value associated with EndToEndIdentification key is not a String instance"
            }
            Self::MissingInstructedAmount => "Instructed Amount isn't present in the payload",
            Self::DebtorAccountMismatch => "Debtor Account mismatch",
            Self::AccountSchemeNameMismatch(AccountRole::Debtor) => {
                "Debtor Account Scheme Name does not match"
            }
            Self::AccountSchemeNameMismatch(AccountRole::Creditor) => {
                "Creditor Account Scheme Name does not match"
            }
            Self::AccountIdentificationMismatch(AccountRole::Debtor) => {
                "Debtor Account Identification does not match"
            }
            Self::AccountIdentificationMismatch(AccountRole::Creditor) => {
                "Creditor Account Identification does not match"
            }
            Self::AccountNameMismatch(AccountRole::Debtor) => "Debtor Account Name does not match",
            Self::AccountNameMismatch(AccountRole::Creditor) => {
                "Creditor Account Name does not match"
            }
            Self::AccountSecondaryIdentificationMismatch(AccountRole::Debtor) => {
                "Debtor Account Secondary Identification does not match"
            }
            Self::AccountSecondaryIdentificationMismatch(AccountRole::Creditor) => {
                "Creditor Account Secondary Identification does not match"
            }
            Self::PayloadFormatErrorRemittanceInformation => {
                "Remittance information isn't present in the correct JSON format"
            }
            Self::RemittanceReferenceMismatch => "Remittance info does not match",
            Self::RemittanceUnstructuredMismatch => {
                "Remittance Information Unstructured does not match"
            }
            Self::RiskMismatch => "Risk does not match",
        }
    }

    /// Returns the Open Banking category for this code.
    #[must_use]
    pub const fn category(self) -> ErrorCategory {
        match self {
            Self::PayloadFormatError => ErrorCategory::ResourceInvalidFormat,
            Self::MissingParameter
            | Self::PayloadFormatErrorInitiation
            | Self::PayloadFormatErrorRisk
            | Self::PayloadFormatErrorAccount(_)
            | Self::MissingAccountSchemeName(_)
            | Self::MissingAccountIdentification(_)
            | Self::MissingMaximumIndividualAmount
            | Self::MissingPeriodLimits
            | Self::MissingPeriodType
            | Self::MissingPeriodAlignment
            | Self::MissingValidToDateTime
            | Self::PayloadFormatErrorInstruction
            | Self::MissingInstructionIdentification
            | Self::MissingEndToEndIdentification
            | Self::MissingInstructedAmount
            | Self::PayloadFormatErrorRemittanceInformation => ErrorCategory::FieldMissing,
            Self::InvalidParameter
            | Self::InvalidParameterType
            | Self::EmptyParameter
            | Self::InvalidAccountSchemeName(_)
            | Self::InvalidAccountSchemeNameLength(_)
            | Self::InvalidAccountIdentification(_)
            | Self::InvalidAccountName(_)
            | Self::InvalidAccountSecondaryIdentification(_)
            | Self::InvalidSortCodeIdentification
            | Self::PayloadFormatErrorMaximumIndividualAmount
            | Self::InvalidParameterPeriodicLimits
            | Self::InvalidPeriodicLimitAmount
            | Self::TooManyPeriodicLimits
            | Self::InvalidPeriodType
            | Self::InvalidPeriodAlignment
            | Self::MissingDateTimeFormat
            | Self::InvalidDateTimeRange
            | Self::ExpiredValidToDateTime
            | Self::InvalidInstructionIdentification
            | Self::InvalidEndToEndIdentification => ErrorCategory::FieldInvalid,
            Self::ConsentIdMismatch
            | Self::DebtorAccountMismatch
            | Self::AccountSchemeNameMismatch(_)
            | Self::AccountIdentificationMismatch(_)
            | Self::AccountNameMismatch(_)
            | Self::AccountSecondaryIdentificationMismatch(_)
            | Self::RemittanceReferenceMismatch
            | Self::RemittanceUnstructuredMismatch
            | Self::RiskMismatch => ErrorCategory::ResourceConsentMismatch,
            Self::InvalidConsentStatus => ErrorCategory::ResourceInvalidConsentStatus,
        }
    }

    /// Returns the payload path the code refers to, when it names one field.
    #[must_use]
    pub const fn path(self) -> Option<&'static str> {
        match self {
            Self::PayloadFormatError => Some("Payload.Body"),
            Self::PayloadFormatErrorInitiation => Some("Data.Initiation"),
            Self::PayloadFormatErrorRisk => Some("Risk"),
            Self::PayloadFormatErrorAccount(AccountRole::Debtor) => {
                Some("Data.Initiation.DebtorAccount")
            }
            Self::PayloadFormatErrorAccount(AccountRole::Creditor) => {
                Some("Data.Initiation.CreditorAccount")
            }
            Self::MissingAccountSchemeName(AccountRole::Debtor)
            | Self::InvalidAccountSchemeName(AccountRole::Debtor)
            | Self::InvalidAccountSchemeNameLength(AccountRole::Debtor) => {
                Some("Data.Initiation.DebtorAccount.SchemeName")
            }
            Self::MissingAccountSchemeName(AccountRole::Creditor)
            | Self::InvalidAccountSchemeName(AccountRole::Creditor)
            | Self::InvalidAccountSchemeNameLength(AccountRole::Creditor) => {
                Some("Data.Initiation.CreditorAccount.SchemeName")
            }
            Self::MissingAccountIdentification(AccountRole::Debtor)
            | Self::InvalidAccountIdentification(AccountRole::Debtor) => {
                Some("Data.Initiation.DebtorAccount.Identification")
            }
            Self::MissingAccountIdentification(AccountRole::Creditor)
            | Self::InvalidAccountIdentification(AccountRole::Creditor) => {
                Some("Data.Initiation.CreditorAccount.Identification")
            }
            Self::InvalidAccountName(AccountRole::Debtor) => Some("Data.Initiation.DebtorAccount.Name"),
            Self::InvalidAccountName(AccountRole::Creditor) => {
                Some("Data.Initiation.CreditorAccount.Name")
            }
            Self::InvalidAccountSecondaryIdentification(AccountRole::Debtor) => {
                Some("Data.Initiation.DebtorAccount.SecondaryIdentification")
            }
            Self::InvalidAccountSecondaryIdentification(AccountRole::Creditor) => {
                Some("Data.Initiation.CreditorAccount.SecondaryIdentification")
            }
            Self::MissingMaximumIndividualAmount | Self::PayloadFormatErrorMaximumIndividualAmount => {
                Some("Data.ControlParameters.MaximumIndividualAmount")
            }
            Self::InvalidParameterPeriodicLimits
            | Self::MissingPeriodLimits
            | Self::TooManyPeriodicLimits => Some("Data.ControlParameters.PeriodicLimits"),
            Self::InvalidPeriodicLimitAmount => Some("Data.ControlParameters.PeriodicLimits.Amount"),
            Self::MissingPeriodType | Self::InvalidPeriodType => {
                Some("Data.ControlParameters.PeriodicLimits.PeriodType")
            }
            Self::MissingPeriodAlignment | Self::InvalidPeriodAlignment => {
                Some("Data.ControlParameters.PeriodicLimits.PeriodAlignment")
            }
            Self::MissingValidToDateTime
            | Self::InvalidDateTimeRange
            | Self::ExpiredValidToDateTime => Some("Data.ControlParameters.ValidToDateTime"),
            Self::ConsentIdMismatch => Some("Data.ConsentId"),
            Self::PayloadFormatErrorInstruction => Some("Data.Instruction"),
            Self::MissingInstructionIdentification | Self::InvalidInstructionIdentification => {
                Some("Data.Instruction.InstructionIdentification")
            }
            Self::MissingEndToEndIdentification | Self::InvalidEndToEndIdentification => {
                Some("Data.Instruction.EndToEndIdentification")
            }
            Self::MissingInstructedAmount => Some("Data.Instruction.InstructedAmount"),
            Self::DebtorAccountMismatch => Some("Data.Initiation.DebtorAccount"),
            Self::RiskMismatch => Some("Risk.PaymentContextCode"),
            Self::InvalidParameter
            | Self::MissingParameter
            | Self::InvalidParameterType
            | Self::EmptyParameter
            | Self::InvalidSortCodeIdentification
            | Self::MissingDateTimeFormat
            | Self::InvalidConsentStatus
            | Self::AccountSchemeNameMismatch(_)
            | Self::AccountIdentificationMismatch(_)
            | Self::AccountNameMismatch(_)
            | Self::AccountSecondaryIdentificationMismatch(_)
            | Self::PayloadFormatErrorRemittanceInformation
            | Self::RemittanceReferenceMismatch
            | Self::RemittanceUnstructuredMismatch => None,
        }
    }

    /// Builds a descriptor carrying the catalogue message.
    #[must_use]
    pub fn descriptor(self) -> ErrorDescriptor {
        ErrorDescriptor::new(self, self.message())
    }

    /// Builds a descriptor carrying a rule-specific message.
    #[must_use]
    pub fn with_message(self, message: impl Into<String>) -> ErrorDescriptor {
        ErrorDescriptor::new(self, message)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Error Descriptor
// ============================================================================

/// A single validation failure: a catalogue code plus message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDescriptor {
    /// Catalogue code identifying the failure.
    code: ErrorCode,
    /// Human-readable message.
    message: String,
}

impl ErrorDescriptor {
    /// Creates a descriptor from a code and message.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Returns the catalogue code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Returns the message text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ErrorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// Result of a rule that either passes with a value or fails with one descriptor.
pub type RuleResult<T = ()> = Result<T, ErrorDescriptor>;

// ============================================================================
// SECTION: Validation Outcome
// ============================================================================

/// Pass/fail result of a rule or composite rule.
///
/// # Invariants
/// - A valid outcome has no error; an invalid outcome has exactly one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    /// Failure descriptor; `None` when valid.
    error: Option<ErrorDescriptor>,
}

impl ValidationOutcome {
    /// Returns a passing outcome.
    #[must_use]
    pub const fn valid() -> Self {
        Self {
            error: None,
        }
    }

    /// Returns a failing outcome with the given descriptor.
    #[must_use]
    pub const fn invalid(error: ErrorDescriptor) -> Self {
        Self {
            error: Some(error),
        }
    }

    /// Returns true when the outcome passed.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    /// Returns the failure descriptor, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&ErrorDescriptor> {
        self.error.as_ref()
    }

    /// Returns the failure code, if any.
    #[must_use]
    pub fn error_code(&self) -> Option<ErrorCode> {
        self.error.as_ref().map(ErrorDescriptor::code)
    }
}

impl<T> From<RuleResult<T>> for ValidationOutcome {
    fn from(result: RuleResult<T>) -> Self {
        match result {
            Ok(_) => Self::valid(),
            Err(error) => Self::invalid(error),
        }
    }
}

/// Wire form of an outcome: `{valid, errorCode, errorMessage, ...}`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OutcomeWire<'a> {
    /// Whether the payload passed.
    valid: bool,
    /// Catalogue code when invalid.
    #[serde(skip_serializing_if = "Option::is_none")]
    error_code: Option<ErrorCode>,
    /// Message text when invalid.
    #[serde(skip_serializing_if = "Option::is_none")]
    error_message: Option<&'a str>,
    /// Open Banking category when invalid.
    #[serde(skip_serializing_if = "Option::is_none")]
    error_category: Option<ErrorCategory>,
    /// Payload path when the code names one field.
    #[serde(skip_serializing_if = "Option::is_none")]
    error_path: Option<&'static str>,
}

impl Serialize for ValidationOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let code = self.error_code();
        OutcomeWire {
            valid: self.is_valid(),
            error_code: code,
            error_message: self.error.as_ref().map(ErrorDescriptor::message),
            error_category: code.map(ErrorCode::category),
            error_path: code.and_then(ErrorCode::path),
        }
        .serialize(serializer)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
