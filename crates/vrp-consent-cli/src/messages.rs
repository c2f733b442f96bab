// crates/vrp-consent-cli/src/messages.rs
// ============================================================================
// Module: CLI Message Catalogue
// Description: Keyed templates for the human-readable lines the CLI prints.
// Purpose: Keep operator-facing wording in one table.
// Dependencies: Standard library only.
// ============================================================================

//! ## Overview
//! Status lines and error messages printed by `vrp-consent` are templates in
//! [`CATALOG`], looked up by dotted key and rendered through [`msg!`]. JSON
//! outcomes written to stdout never pass through the catalogue.
//!
//! ## Invariants
//! - Unknown keys render as the key itself.
//! - Placeholders are written `{name}` and substituted in argument order.

// ============================================================================
// SECTION: Catalogue
// ============================================================================

/// Message templates keyed by dotted name.
pub const CATALOG: &[(&str, &str)] = &[
    ("version", "vrp-consent {version}"),
    ("output.write_failed", "Failed to write to {stream}: {error}"),
    ("output.json_failed", "Failed to serialize output: {error}"),
    (
        "payload.read_too_large",
        "Refusing to read payload from {path} because it is {size} bytes (limit {limit}).",
    ),
    ("payload.read_failed", "Failed to read payload from {path}: {error}"),
    ("config.load_failed", "Failed to load config: {error}"),
    ("config.validate.ok", "Config valid."),
    ("audit.init_failed", "Failed to initialize audit sink: {error}"),
    ("initiate.client_id_empty", "Client id must be non-empty."),
    ("initiate.failed", "Consent initiation failed: {error}"),
    ("initiate.attributes_failed", "Failed to load consent attributes: {error}"),
];

/// Returns the template registered under `key`.
#[must_use]
pub fn template(key: &str) -> Option<&'static str> {
    CATALOG.iter().find_map(|(name, text)| (*name == key).then_some(*text))
}

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Renders the template for `key`, replacing each `{name}` with its value.
#[must_use]
pub fn render(key: &str, args: &[(&str, String)]) -> String {
    let Some(template) = template(key) else {
        return key.to_string();
    };
    args.iter().fold(template.to_string(), |text, (name, value)| {
        text.replace(&format!("{{{name}}}"), value)
    })
}

/// Renders a catalogue message from a key and named arguments.
///
/// ```
/// let line = vrp_consent_cli::msg!("config.load_failed", error = "missing file");
/// assert_eq!(line, "Failed to load config: missing file");
/// ```
#[macro_export]
macro_rules! msg {
    ($key:literal $(, $name:ident = $value:expr )* $(,)?) => {
        $crate::messages::render($key, &[$( (stringify!($name), $value.to_string()) ),*])
    };
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
#[path = "tests/messages.rs"]
mod tests;
