// crates/vrp-consent-core/src/core/consent.rs
// ============================================================================
// Module: VRP Consent Records
// Description: Durable consent resource and attribute types.
// Purpose: Describe what is persisted once a payload passes validation.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! A [`ConsentResource`] is created only after a consent-initiation payload
//! validates. Its receipt is the original payload JSON. Per-consent attributes
//! are flat string pairs derived from the payload and used later when
//! payments are made against the consent.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::core::identifiers::ClientId;
use crate::core::identifiers::ConsentId;

// ============================================================================
// SECTION: Attribute Keys
// ============================================================================

/// Attribute key holding the idempotency key used at creation.
pub const ATTR_IDEMPOTENCY_KEY: &str = "IdempotencyKey";
/// Attribute key holding the maximum individual payment amount.
pub const ATTR_MAXIMUM_INDIVIDUAL_AMOUNT: &str = "MaximumIndividualAmount";
/// Attribute key holding the first periodic limit's period type.
pub const ATTR_PERIOD_TYPE: &str = "PeriodType";
/// Attribute key holding the first periodic limit's amount.
pub const ATTR_PERIOD_AMOUNT: &str = "PeriodAmount";
/// Attribute key tracking the amount already paid in the current period.
pub const ATTR_PAID_AMOUNT: &str = "PaidAmount";
/// Attribute key tracking the date of the last payment.
pub const ATTR_LAST_PAYMENT_DATE: &str = "LastPaymentDate";

// ============================================================================
// SECTION: Types
// ============================================================================

/// Consent type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsentType {
    /// Variable recurring payment consent.
    Vrp,
}

/// Lifecycle status of a consent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConsentStatus {
    /// Created and waiting for the account holder to authorise it.
    AwaitingAuthorisation,
    /// Authorised by the account holder.
    Authorised,
    /// Rejected by the account holder.
    Rejected,
    /// Revoked after authorisation.
    Revoked,
}

/// Durable consent resource created from a validated payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentResource {
    /// Consent identifier.
    pub consent_id: ConsentId,
    /// Owning API client.
    pub client_id: ClientId,
    /// Original consent-initiation payload.
    pub receipt: Value,
    /// Consent type.
    pub consent_type: ConsentType,
    /// Current status.
    pub status: ConsentStatus,
    /// Creation time in milliseconds since the Unix epoch.
    pub created_at_ms: u128,
}

/// Flat string attributes stored against a consent.
pub type ConsentAttributes = BTreeMap<String, String>;
