// crates/vrp-consent-core/src/runtime/idempotency.rs
// ============================================================================
// Module: Idempotency Key Policy
// Description: Sanitization of client-supplied idempotency keys.
// Purpose: Admit only bounded, header-safe keys into the consent index.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Idempotency keys arrive as untrusted request headers. A key is trimmed and
//! must then be non-empty, bounded in length, and composed only of HTTP token
//! characters. Any other input is rejected with a stable reason label.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use crate::core::IdempotencyKey;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default maximum key length in bytes.
pub const DEFAULT_MAX_IDEMPOTENCY_KEY_LENGTH: usize = 128;

// ============================================================================
// SECTION: Rejections
// ============================================================================

/// Typed rejection reason for invalid idempotency keys.
///
/// # Invariants
/// - Variants are stable for audit labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdempotencyKeyRejection {
    /// No key was supplied.
    Missing,
    /// Input was empty after trimming.
    EmptyAfterTrim,
    /// Input exceeded the maximum length.
    TooLong,
    /// Input contained non-ASCII characters.
    NonAscii,
    /// Input contained whitespace after trimming.
    ContainsWhitespace,
    /// Input contained control characters.
    ContainsControlChar,
    /// Input contained disallowed ASCII characters.
    ContainsDisallowedChar,
}

impl IdempotencyKeyRejection {
    /// Returns a stable label for this rejection reason.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::EmptyAfterTrim => "empty_after_trim",
            Self::TooLong => "too_long",
            Self::NonAscii => "non_ascii",
            Self::ContainsWhitespace => "contains_whitespace",
            Self::ContainsControlChar => "contains_control_char",
            Self::ContainsDisallowedChar => "contains_disallowed_char",
        }
    }
}

impl fmt::Display for IdempotencyKeyRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// SECTION: Sanitization
// ============================================================================

/// Sanitizes a client idempotency key using strict token rules.
///
/// # Errors
/// Returns [`IdempotencyKeyRejection`] when the key is absent, empty, longer
/// than `max_length` bytes, or contains disallowed characters.
pub fn sanitize_idempotency_key(
    value: Option<&str>,
    max_length: usize,
) -> Result<IdempotencyKey, IdempotencyKeyRejection> {
    let Some(value) = value else {
        return Err(IdempotencyKeyRejection::Missing);
    };
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(IdempotencyKeyRejection::EmptyAfterTrim);
    }
    if trimmed.len() > max_length {
        return Err(IdempotencyKeyRejection::TooLong);
    }
    for ch in trimmed.chars() {
        if !ch.is_ascii() {
            return Err(IdempotencyKeyRejection::NonAscii);
        }
        if ch.is_ascii_whitespace() {
            return Err(IdempotencyKeyRejection::ContainsWhitespace);
        }
        if ch.is_control() {
            return Err(IdempotencyKeyRejection::ContainsControlChar);
        }
        if !is_tchar(ch) {
            return Err(IdempotencyKeyRejection::ContainsDisallowedChar);
        }
    }
    Ok(IdempotencyKey::from_sanitized(trimmed.to_string()))
}

/// Returns true when the character is a valid HTTP token character.
const fn is_tchar(ch: char) -> bool {
    ch.is_ascii_alphanumeric()
        || matches!(
            ch,
            '!' | '#' | '$' | '%' | '&' | '\'' | '*' | '+' | '-' | '.' | '^' | '_' | '`' | '|' | '~'
        )
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test fixtures use explicit asserts and unwraps for clarity."
    )]

    use super::*;

    #[test]
    fn accepts_uuid_style_keys_and_trims() {
        let key = sanitize_idempotency_key(Some("  7f1c-44aa_01.b  "), 128).unwrap();
        assert_eq!(key.as_str(), "7f1c-44aa_01.b");
    }

    #[test]
    fn rejects_missing_and_blank_keys() {
        assert_eq!(sanitize_idempotency_key(None, 128), Err(IdempotencyKeyRejection::Missing));
        assert_eq!(
            sanitize_idempotency_key(Some("   "), 128),
            Err(IdempotencyKeyRejection::EmptyAfterTrim)
        );
    }

    #[test]
    fn enforces_length_limit_in_bytes() {
        let exact = "a".repeat(16);
        assert!(sanitize_idempotency_key(Some(&exact), 16).is_ok());
        let over = "a".repeat(17);
        assert_eq!(
            sanitize_idempotency_key(Some(&over), 16),
            Err(IdempotencyKeyRejection::TooLong)
        );
    }

    #[test]
    fn rejects_disallowed_characters() {
        assert_eq!(
            sanitize_idempotency_key(Some("key one"), 128),
            Err(IdempotencyKeyRejection::ContainsWhitespace)
        );
        assert_eq!(
            sanitize_idempotency_key(Some("key\u{7}"), 128),
            Err(IdempotencyKeyRejection::ContainsControlChar)
        );
        assert_eq!(
            sanitize_idempotency_key(Some("clé"), 128),
            Err(IdempotencyKeyRejection::NonAscii)
        );
        assert_eq!(
            sanitize_idempotency_key(Some("key/1"), 128),
            Err(IdempotencyKeyRejection::ContainsDisallowedChar)
        );
    }

    #[test]
    fn labels_are_stable() {
        assert_eq!(IdempotencyKeyRejection::TooLong.to_string(), "too_long");
        assert_eq!(IdempotencyKeyRejection::Missing.label(), "missing");
    }
}
