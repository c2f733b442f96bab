// crates/vrp-consent-core/src/runtime/mod.rs
// ============================================================================
// Module: VRP Consent Runtime
// Description: Initiation service, idempotency policy, and in-memory stores.
// Purpose: Turn validated payloads into stored consent resources.
// Dependencies: crate::{audit, core, interfaces, validation}
// ============================================================================

//! ## Overview
//! The runtime wires the pure validators to storage and audit. It is
//! synchronous; stores guard their own state.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod idempotency;
pub mod initiation;
pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use idempotency::DEFAULT_MAX_IDEMPOTENCY_KEY_LENGTH;
pub use idempotency::IdempotencyKeyRejection;
pub use idempotency::sanitize_idempotency_key;
pub use initiation::ConsentInitiationService;
pub use initiation::DEFAULT_MAX_PAYLOAD_BYTES;
pub use initiation::InitiationError;
pub use initiation::InitiationResult;
pub use initiation::InitiationSettings;
pub use store::InMemoryAccountMetadataStore;
pub use store::InMemoryConsentStore;
