// crates/vrp-consent-core/src/validation/mod.rs
// ============================================================================
// Module: VRP Payload Validation
// Description: Rule primitives, section validators, and the orchestrator.
// Purpose: Decide whether a consent payload or payment submission is acceptable.
// Dependencies: crate::core, time
// ============================================================================

//! ## Overview
//! Validators are pure, synchronous functions of a [`crate::DocumentNode`].
//! They hold no state and perform no I/O, so concurrent calls need no
//! coordination.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod control;
pub mod initiation;
pub mod keys;
pub mod options;
pub mod payload;
pub mod rules;
pub mod submission;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use control::validate_control_parameters;
pub use control::validate_date_time_window;
pub use control::validate_maximum_individual_amount;
pub use control::validate_period_alignment;
pub use control::validate_period_type;
pub use control::validate_periodic_limit_field;
pub use control::validate_periodic_limits;
pub use initiation::validate_account;
pub use initiation::validate_creditor_account;
pub use initiation::validate_debtor_account;
pub use initiation::validate_initiation;
pub use options::ValidationOptions;
pub use payload::validate_risk;
pub use payload::validate_vrp_payload;
pub use payload::validate_vrp_payload_str;
pub use payload::validate_vrp_payload_with;
pub use rules::require_enum;
pub use rules::require_key;
pub use rules::require_non_empty_string;
pub use submission::validate_vrp_submission;
