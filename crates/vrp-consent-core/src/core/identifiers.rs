// crates/vrp-consent-core/src/core/identifiers.rs
// ============================================================================
// Module: VRP Consent Identifiers
// Description: Opaque identifiers for consents, clients, and idempotency keys.
// Purpose: Provide strongly typed, serializable IDs with stable string forms.
// Dependencies: serde, uuid
// ============================================================================

//! ## Overview
//! Identifiers serialize as plain strings. Consent identifiers are random
//! UUID v4 values; client identifiers are opaque. Idempotency keys are
//! untrusted input and are only constructed through
//! [`crate::runtime::sanitize_idempotency_key`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Length of a hyphenated UUID string.
pub const CONSENT_ID_LENGTH: usize = 36;

// ============================================================================
// SECTION: Consent Identifier
// ============================================================================

/// Consent identifier in hyphenated UUID form.
///
/// Deserialization runs the same format check as [`ConsentId::parse`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ConsentId(String);

impl ConsentId {
    /// Generates a new random (version 4) consent identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().hyphenated().to_string())
    }

    /// Parses a consent identifier, accepting only hyphenated UUID strings.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        if value.len() != CONSENT_ID_LENGTH {
            return None;
        }
        let uuid = Uuid::try_parse(value).ok()?;
        Some(Self(uuid.hyphenated().to_string()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ConsentId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("invalid consent id: {value}"))
    }
}

impl From<ConsentId> for String {
    fn from(value: ConsentId) -> Self {
        value.0
    }
}

impl fmt::Display for ConsentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// SECTION: Client Identifier
// ============================================================================

/// Identifier of the API client (third-party provider) creating consents.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(String);

impl ClientId {
    /// Creates a new client identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for ClientId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ClientId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

// ============================================================================
// SECTION: Idempotency Key
// ============================================================================

/// Sanitized idempotency key supplied with a consent-creation request.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdempotencyKey(String);

impl IdempotencyKey {
    /// Wraps an already-sanitized key.
    pub(crate) const fn from_sanitized(value: String) -> Self {
        Self(value)
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdempotencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
