// crates/vrp-consent-core/src/validation/options.rs
// ============================================================================
// Module: VRP Validation Options
// Description: Opt-in rule sets layered on top of the baseline validator.
// Purpose: Enable stricter account, amount, and window checks per deployment.
// Dependencies: time
// ============================================================================

//! ## Overview
//! [`ValidationOptions::default`] selects the baseline rule set. Each flag adds
//! rules that run after the baseline rules of the same section, so enabling
//! a flag never changes which error a baseline failure reports.

// ============================================================================
// SECTION: Imports
// ============================================================================

use time::OffsetDateTime;

// ============================================================================
// SECTION: Options
// ============================================================================

/// Extra rule sets applied by [`crate::validation::validate_vrp_payload_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Enforce scheme-name membership, field lengths, and sort-code format.
    pub strict_accounts: bool,
    /// Enforce presence and decimal format of every `Amount`.
    pub strict_amounts: bool,
    /// Reject windows whose start is later than their end.
    pub check_window_order: bool,
    /// Reject windows ending before this instant.
    pub reference_time: Option<OffsetDateTime>,
    /// Maximum number of periodic limit entries.
    pub max_periodic_limits: Option<usize>,
}

impl ValidationOptions {
    /// Returns options with every static rule set enabled.
    ///
    /// No reference time or entry cap is set.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            strict_accounts: true,
            strict_amounts: true,
            check_window_order: true,
            reference_time: None,
            max_periodic_limits: None,
        }
    }

    /// Returns a copy that rejects windows ending before `now`.
    #[must_use]
    pub const fn with_reference_time(mut self, now: OffsetDateTime) -> Self {
        self.reference_time = Some(now);
        self
    }
}
