// crates/vrp-consent-core/src/lib.rs
// ============================================================================
// Module: VRP Consent Core Library
// Description: Validation and initiation of Variable Recurring Payment consents.
// Purpose: Decide whether an initiation payload may create a consent, and create it.
// Dependencies: serde, serde_json, thiserror, time, uuid
// ============================================================================

//! ## Overview
//! VRP consent core validates Open Banking Variable Recurring Payment consent
//! initiation payloads and creates consent resources from the ones that pass.
//!
//! Validation is a pure function from a [`DocumentNode`] to a
//! [`ValidationOutcome`]: the first failing rule in a fixed precedence order
//! determines the reported error. Business-rule violations are values, never
//! Rust errors. [`validate_vrp_submission`] applies the same model to payment
//! submissions, comparing each one with the receipt of an authorised consent.
//!
//! The runtime layer composes validation with idempotency handling, consent
//! storage, and structured audit events.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod core;
pub mod interfaces;
pub mod runtime;
pub mod validation;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::ConsentAuditEvent;
pub use audit::ConsentAuditKind;
pub use audit::ConsentAuditParams;
pub use audit::ConsentAuditSink;
pub use audit::FileAuditSink;
pub use audit::NoopAuditSink;
pub use audit::StderrAuditSink;
pub use audit::ValidationAuditEvent;
pub use crate::core::*;
pub use interfaces::AccountMetadataStore;
pub use interfaces::ConsentStore;
pub use interfaces::CreateOutcome;
pub use interfaces::StoreError;
pub use runtime::ConsentInitiationService;
pub use runtime::DEFAULT_MAX_IDEMPOTENCY_KEY_LENGTH;
pub use runtime::DEFAULT_MAX_PAYLOAD_BYTES;
pub use runtime::InMemoryAccountMetadataStore;
pub use runtime::InMemoryConsentStore;
pub use runtime::InitiationError;
pub use runtime::InitiationResult;
pub use runtime::InitiationSettings;
pub use runtime::IdempotencyKeyRejection;
pub use runtime::sanitize_idempotency_key;
pub use validation::ValidationOptions;
pub use validation::validate_account;
pub use validation::validate_control_parameters;
pub use validation::validate_creditor_account;
pub use validation::validate_date_time_window;
pub use validation::validate_debtor_account;
pub use validation::validate_initiation;
pub use validation::validate_maximum_individual_amount;
pub use validation::validate_period_alignment;
pub use validation::validate_period_type;
pub use validation::validate_periodic_limit_field;
pub use validation::validate_periodic_limits;
pub use validation::validate_risk;
pub use validation::validate_vrp_payload;
pub use validation::validate_vrp_payload_str;
pub use validation::validate_vrp_payload_with;
pub use validation::validate_vrp_submission;
