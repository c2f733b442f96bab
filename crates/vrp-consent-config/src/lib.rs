// crates/vrp-consent-config/src/lib.rs
// ============================================================================
// Module: VRP Consent Config Library
// Description: Canonical config model and validation.
// Purpose: Single source of truth for vrp-consent.toml semantics.
// Dependencies: vrp-consent-core, serde, toml
// ============================================================================

//! ## Overview
//! `vrp-consent-config` defines the configuration model for the VRP consent
//! tooling. Loading is strict and fail-closed: oversized, non-UTF-8, or
//! unknown-key input is rejected before any setting takes effect.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
