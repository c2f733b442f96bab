// crates/vrp-consent-core/src/core/mod.rs
// ============================================================================
// Module: VRP Consent Core Types
// Description: Document tree, outcomes, identifiers, and consent records.
// Purpose: Group the data types shared by validators and the runtime.
// Dependencies: serde, serde_json, uuid
// ============================================================================

//! ## Overview
//! Core data types: the payload [`DocumentNode`], the validation outcome and
//! error catalogue, consent identifiers, and consent records.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod consent;
pub mod document;
pub mod identifiers;
pub mod outcome;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use consent::*;
pub use document::DocumentNode;
pub use document::NodeKind;
pub use identifiers::ClientId;
pub use identifiers::ConsentId;
pub use identifiers::IdempotencyKey;
pub use outcome::AccountRole;
pub use outcome::ErrorCategory;
pub use outcome::ErrorCode;
pub use outcome::ErrorDescriptor;
pub use outcome::RuleResult;
pub use outcome::ValidationOutcome;
