// crates/vrp-consent-cli/src/lib.rs
// ============================================================================
// Module: VRP Consent CLI Library
// Description: Shared helpers for the `vrp-consent` binary.
// Purpose: Expose the message catalogue to the binary and its tests.
// Dependencies: Standard library only.
// ============================================================================

//! ## Overview
//! The CLI library hosts the message catalogue and the [`msg!`] macro used
//! by the `vrp-consent` binary. Command dispatch lives in the binary target.

pub mod messages;
