// crates/vrp-consent-core/src/audit.rs
// ============================================================================
// Module: VRP Consent Audit Logging
// Description: Structured audit events for payload validation and consents.
// Purpose: Emit JSON-line audit records without logging payload content.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Audit events are serialized as one JSON object per line. Validation events
//! record the outcome, the failing code, and the payload size; consent events
//! record identifiers and the rejection label. Payload bodies are never
//! written to a sink.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::core::ClientId;
use crate::core::ConsentId;
use crate::core::IdempotencyKey;
use crate::core::ValidationOutcome;

// ============================================================================
// SECTION: Audit Events
// ============================================================================

/// Audit event emitted for every payload validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Timestamp in milliseconds since epoch.
    pub timestamp_ms: u128,
    /// Requesting client, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    /// `valid` or `invalid`.
    pub outcome: &'static str,
    /// Error code when invalid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<&'static str>,
    /// Error category when invalid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_category: Option<&'static str>,
    /// Payload size in bytes.
    pub payload_bytes: usize,
}

impl ValidationAuditEvent {
    /// Builds a validation audit event from an outcome.
    #[must_use]
    pub fn new(
        client_id: Option<&ClientId>,
        outcome: &ValidationOutcome,
        payload_bytes: usize,
    ) -> Self {
        let code = outcome.error_code();
        Self {
            event: "vrp_payload_validated",
            timestamp_ms: now_ms(),
            client_id: client_id.map(ToString::to_string),
            outcome: if outcome.is_valid() { "valid" } else { "invalid" },
            error_code: code.map(|code| code.as_str()),
            error_category: code.map(|code| code.category().as_str()),
            payload_bytes,
        }
    }
}

/// Kinds of consent audit events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentAuditKind {
    /// A new consent was created.
    Created,
    /// An idempotent retry returned an existing consent.
    Replayed,
    /// The request was refused.
    Rejected,
}

impl ConsentAuditKind {
    /// Returns the event identifier.
    #[must_use]
    pub const fn event_name(self) -> &'static str {
        match self {
            Self::Created => "vrp_consent_created",
            Self::Replayed => "vrp_consent_replayed",
            Self::Rejected => "vrp_consent_rejected",
        }
    }
}

/// Inputs for [`ConsentAuditEvent::new`].
#[derive(Debug, Clone, Copy)]
pub struct ConsentAuditParams<'a> {
    /// Event kind.
    pub kind: ConsentAuditKind,
    /// Requesting client.
    pub client_id: &'a ClientId,
    /// Consent identifier, when one exists.
    pub consent_id: Option<&'a ConsentId>,
    /// Sanitized idempotency key, when accepted.
    pub idempotency_key: Option<&'a IdempotencyKey>,
    /// Stable rejection label for refused requests.
    pub reason: Option<&'a str>,
}

/// Audit event emitted for consent creation, replay, and rejection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsentAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Timestamp in milliseconds since epoch.
    pub timestamp_ms: u128,
    /// Requesting client.
    pub client_id: String,
    /// Consent identifier, when one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consent_id: Option<String>,
    /// Sanitized idempotency key, when accepted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idempotency_key: Option<String>,
    /// Stable rejection label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ConsentAuditEvent {
    /// Builds a consent audit event.
    #[must_use]
    pub fn new(params: ConsentAuditParams<'_>) -> Self {
        Self {
            event: params.kind.event_name(),
            timestamp_ms: now_ms(),
            client_id: params.client_id.to_string(),
            consent_id: params.consent_id.map(ToString::to_string),
            idempotency_key: params.idempotency_key.map(ToString::to_string),
            reason: params.reason.map(ToString::to_string),
        }
    }
}

// ============================================================================
// SECTION: Audit Sinks
// ============================================================================

/// Audit sink for consent events.
pub trait ConsentAuditSink: Send + Sync {
    /// Records a payload validation event.
    fn record_validation(&self, event: &ValidationAuditEvent);

    /// Records a consent lifecycle event.
    fn record_consent(&self, _event: &ConsentAuditEvent) {}
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl ConsentAuditSink for StderrAuditSink {
    fn record_validation(&self, event: &ValidationAuditEvent) {
        write_stderr_line(event);
    }

    fn record_consent(&self, event: &ConsentAuditEvent) {
        write_stderr_line(event);
    }
}

/// Audit sink that appends JSON lines to a file.
pub struct FileAuditSink {
    /// Open file handle for appending audit events.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens or creates the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns [`std::io::Error`] when the file cannot be opened.
    pub fn new(path: &Path) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }

    /// Appends one serialized event.
    fn append<T: Serialize>(&self, event: &T) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

impl ConsentAuditSink for FileAuditSink {
    fn record_validation(&self, event: &ValidationAuditEvent) {
        self.append(event);
    }

    fn record_consent(&self, event: &ConsentAuditEvent) {
        self.append(event);
    }
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl ConsentAuditSink for NoopAuditSink {
    fn record_validation(&self, _event: &ValidationAuditEvent) {}
}

/// Writes one serialized event to stderr.
fn write_stderr_line<T: Serialize>(event: &T) {
    if let Ok(payload) = serde_json::to_string(event) {
        let _ = writeln!(std::io::stderr(), "{payload}");
    }
}

/// Returns the current time in milliseconds since epoch.
fn now_ms() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis()
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

    use serde_json::Value;

    use super::*;
    use crate::core::ErrorCode;

    #[test]
    fn validation_event_omits_error_fields_when_valid() {
        let event = ValidationAuditEvent::new(None, &ValidationOutcome::valid(), 42);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "vrp_payload_validated");
        assert_eq!(json["outcome"], "valid");
        assert_eq!(json["payload_bytes"], 42);
        assert!(json.get("error_code").is_none());
        assert!(json.get("client_id").is_none());
    }

    #[test]
    fn validation_event_carries_code_and_category() {
        let outcome = ValidationOutcome::invalid(ErrorCode::MissingPeriodType.descriptor());
        let client = ClientId::new("tpp-1");
        let event = ValidationAuditEvent::new(Some(&client), &outcome, 10);
        assert_eq!(event.outcome, "invalid");
        assert_eq!(event.error_code, Some(ErrorCode::MissingPeriodType.as_str()));
        assert_eq!(event.error_category, Some(ErrorCode::MissingPeriodType.category().as_str()));
        assert_eq!(event.client_id.as_deref(), Some("tpp-1"));
    }

    #[test]
    fn file_sink_appends_json_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.log");
        let sink = FileAuditSink::new(&path).unwrap();
        let client = ClientId::new("tpp-1");
        sink.record_validation(&ValidationAuditEvent::new(
            Some(&client),
            &ValidationOutcome::valid(),
            1,
        ));
        sink.record_consent(&ConsentAuditEvent::new(ConsentAuditParams {
            kind: ConsentAuditKind::Rejected,
            client_id: &client,
            consent_id: None,
            idempotency_key: None,
            reason: Some("missing"),
        }));
        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<Value> =
            contents.lines().map(|line| serde_json::from_str(line).unwrap()).collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1]["event"], "vrp_consent_rejected");
        assert_eq!(lines[1]["reason"], "missing");
    }
}
