// crates/vrp-consent-core/src/runtime/initiation.rs
// ============================================================================
// Module: VRP Consent Initiation Service
// Description: Validates initiation payloads and creates consent resources.
// Purpose: Compose validation, idempotency, storage, and audit into one flow.
// Dependencies: crate::{audit, core, interfaces, validation}, thiserror, time
// ============================================================================

//! ## Overview
//! [`ConsentInitiationService::initiate`] runs a request through a fixed
//! sequence: size limit, parse and validate, idempotency key, replay lookup,
//! then one atomic store call that writes the consent, its attributes, and
//! its idempotency entry. Every exit path records an audit event.
//!
//! ## Invariants
//! - A consent is created only from a payload that passed validation.
//! - A client reusing an idempotency key with an identical payload gets the
//!   original consent back; a different payload is refused.
//! - Concurrent requests sharing a client and key create at most one consent.
//! - Consents are only ever returned to the client that created them.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde_json::Value;
use thiserror::Error;
use time::OffsetDateTime;

use crate::audit::ConsentAuditEvent;
use crate::audit::ConsentAuditKind;
use crate::audit::ConsentAuditParams;
use crate::audit::ConsentAuditSink;
use crate::audit::ValidationAuditEvent;
use crate::core::ATTR_IDEMPOTENCY_KEY;
use crate::core::ATTR_LAST_PAYMENT_DATE;
use crate::core::ATTR_MAXIMUM_INDIVIDUAL_AMOUNT;
use crate::core::ATTR_PAID_AMOUNT;
use crate::core::ATTR_PERIOD_AMOUNT;
use crate::core::ATTR_PERIOD_TYPE;
use crate::core::ClientId;
use crate::core::ConsentAttributes;
use crate::core::ConsentId;
use crate::core::ConsentResource;
use crate::core::ConsentStatus;
use crate::core::ConsentType;
use crate::core::DocumentNode;
use crate::core::ErrorCode;
use crate::core::IdempotencyKey;
use crate::core::ValidationOutcome;
use crate::interfaces::ConsentStore;
use crate::interfaces::CreateOutcome;
use crate::interfaces::StoreError;
use crate::runtime::idempotency::DEFAULT_MAX_IDEMPOTENCY_KEY_LENGTH;
use crate::runtime::idempotency::IdempotencyKeyRejection;
use crate::runtime::idempotency::sanitize_idempotency_key;
use crate::validation::ValidationOptions;
use crate::validation::keys::AMOUNT;
use crate::validation::keys::CONTROL_PARAMETERS;
use crate::validation::keys::DATA;
use crate::validation::keys::MAXIMUM_INDIVIDUAL_AMOUNT;
use crate::validation::keys::PERIOD_TYPE;
use crate::validation::keys::PERIODIC_LIMITS;
use crate::validation::validate_vrp_payload_with;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default maximum accepted payload size in bytes.
pub const DEFAULT_MAX_PAYLOAD_BYTES: usize = 1024 * 1024;
/// Initial value of the paid-amount and last-payment-date attributes.
const INITIAL_PAYMENT_ATTRIBUTE: &str = "0";

// ============================================================================
// SECTION: Settings
// ============================================================================

/// Runtime settings for [`ConsentInitiationService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitiationSettings {
    /// Rule sets applied to every payload.
    pub validation: ValidationOptions,
    /// Reject windows whose end is already in the past.
    pub reject_expired: bool,
    /// Maximum accepted payload size in bytes.
    pub max_payload_bytes: usize,
    /// Require an idempotency key on every request.
    pub idempotency_required: bool,
    /// Maximum idempotency key length in bytes.
    pub max_idempotency_key_length: usize,
}

impl Default for InitiationSettings {
    fn default() -> Self {
        Self {
            validation: ValidationOptions::default(),
            reject_expired: false,
            max_payload_bytes: DEFAULT_MAX_PAYLOAD_BYTES,
            idempotency_required: true,
            max_idempotency_key_length: DEFAULT_MAX_IDEMPOTENCY_KEY_LENGTH,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Consent initiation failures.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum InitiationError {
    /// The payload failed validation.
    #[error("Consent validation failed due to invalid initiation payload")]
    InvalidPayload(ValidationOutcome),
    /// No idempotency key was supplied.
    #[error("Idempotency related details should be submitted in order to proceed.")]
    MissingIdempotencyKey,
    /// The idempotency key failed sanitization.
    #[error("invalid idempotency key: {0}")]
    InvalidIdempotencyKey(IdempotencyKeyRejection),
    /// The idempotency key was already used with a different payload.
    #[error("idempotency key {0} was already used with a different payload")]
    IdempotencyConflict(String),
    /// The consent id is not a well-formed identifier.
    #[error("Invalid Consent Id found in the request")]
    InvalidConsentId,
    /// No consent exists for the client and id.
    #[error("No valid consent found for given information")]
    ConsentNotFound,
    /// The backing store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl InitiationError {
    /// Returns a stable label for audit records.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::InvalidPayload(_) => "invalid_payload",
            Self::MissingIdempotencyKey => "missing_idempotency_key",
            Self::InvalidIdempotencyKey(rejection) => rejection.label(),
            Self::IdempotencyConflict(_) => "idempotency_conflict",
            Self::InvalidConsentId => "invalid_consent_id",
            Self::ConsentNotFound => "consent_not_found",
            Self::Store(_) => "store_error",
        }
    }

    /// Returns the validation outcome for payload failures.
    #[must_use]
    pub const fn outcome(&self) -> Option<&ValidationOutcome> {
        match self {
            Self::InvalidPayload(outcome) => Some(outcome),
            _ => None,
        }
    }
}

// ============================================================================
// SECTION: Results
// ============================================================================

/// Successful initiation result.
#[derive(Debug, Clone, PartialEq)]
pub struct InitiationResult {
    /// Created or replayed consent.
    pub consent: ConsentResource,
    /// Accepted idempotency key, when one was supplied.
    pub idempotency_key: Option<IdempotencyKey>,
    /// True when an idempotent retry returned an existing consent.
    pub replayed: bool,
}

// ============================================================================
// SECTION: Service
// ============================================================================

/// Consent initiation service over a consent store.
pub struct ConsentInitiationService<S> {
    /// Consent persistence.
    store: S,
    /// Audit sink for every outcome.
    audit: Arc<dyn ConsentAuditSink>,
    /// Runtime settings.
    settings: InitiationSettings,
}

impl<S: ConsentStore> ConsentInitiationService<S> {
    /// Creates a service.
    #[must_use]
    pub fn new(store: S, audit: Arc<dyn ConsentAuditSink>, settings: InitiationSettings) -> Self {
        Self {
            store,
            audit,
            settings,
        }
    }

    /// Returns the backing store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Returns the runtime settings.
    #[must_use]
    pub const fn settings(&self) -> &InitiationSettings {
        &self.settings
    }

    /// Checks the size limit, parses, and validates a raw payload.
    ///
    /// A validation audit event is recorded for the outcome.
    #[must_use]
    pub fn validate(&self, client_id: Option<&ClientId>, raw: &[u8]) -> ValidationOutcome {
        self.check_payload(client_id, raw).1
    }

    /// Creates a consent from a raw initiation payload.
    ///
    /// # Errors
    ///
    /// Returns [`InitiationError`] when the payload is invalid, the
    /// idempotency key is missing or malformed, the key was used with a
    /// different payload, or the store fails.
    pub fn initiate(
        &self,
        client_id: &ClientId,
        idempotency_key: Option<&str>,
        raw: &[u8],
    ) -> Result<InitiationResult, InitiationError> {
        let result = self.run_initiation(client_id, idempotency_key, raw);
        match &result {
            Ok(outcome) => {
                let kind = if outcome.replayed {
                    ConsentAuditKind::Replayed
                } else {
                    ConsentAuditKind::Created
                };
                self.audit.record_consent(&ConsentAuditEvent::new(ConsentAuditParams {
                    kind,
                    client_id,
                    consent_id: Some(&outcome.consent.consent_id),
                    idempotency_key: outcome.idempotency_key.as_ref(),
                    reason: None,
                }));
            }
            Err(err) => {
                self.audit.record_consent(&ConsentAuditEvent::new(ConsentAuditParams {
                    kind: ConsentAuditKind::Rejected,
                    client_id,
                    consent_id: None,
                    idempotency_key: None,
                    reason: Some(err.label()),
                }));
            }
        }
        result
    }

    /// Returns a consent owned by `client_id`.
    ///
    /// # Errors
    ///
    /// Returns [`InitiationError::InvalidConsentId`] for malformed ids,
    /// [`InitiationError::ConsentNotFound`] when the consent is absent or
    /// owned by another client, and [`InitiationError::Store`] on store
    /// failures.
    pub fn retrieve_consent(
        &self,
        client_id: &ClientId,
        consent_id: &str,
    ) -> Result<ConsentResource, InitiationError> {
        let consent_id = ConsentId::parse(consent_id).ok_or(InitiationError::InvalidConsentId)?;
        match self.store.load(&consent_id)? {
            Some(consent) if &consent.client_id == client_id => Ok(consent),
            _ => Err(InitiationError::ConsentNotFound),
        }
    }

    /// Runs the initiation steps without audit bookkeeping.
    fn run_initiation(
        &self,
        client_id: &ClientId,
        idempotency_key: Option<&str>,
        raw: &[u8],
    ) -> Result<InitiationResult, InitiationError> {
        let (payload, outcome) = self.check_payload(Some(client_id), raw);
        if !outcome.is_valid() {
            return Err(InitiationError::InvalidPayload(outcome));
        }
        let key = self.accept_idempotency_key(idempotency_key)?;
        let receipt = payload.to_value();
        if let Some(key) = &key
            && let Some(existing) = self.find_replay(client_id, key, &receipt)?
        {
            return Ok(InitiationResult {
                consent: existing,
                idempotency_key: Some(key.clone()),
                replayed: true,
            });
        }

        let consent = ConsentResource {
            consent_id: ConsentId::generate(),
            client_id: client_id.clone(),
            receipt,
            consent_type: ConsentType::Vrp,
            status: ConsentStatus::AwaitingAuthorisation,
            created_at_ms: now_ms(),
        };
        let attributes = consent_attributes(&payload, key.as_ref());
        match self.store.create_with_attributes(&consent, &attributes, key.as_ref())? {
            CreateOutcome::Created => Ok(InitiationResult {
                consent,
                idempotency_key: key,
                replayed: false,
            }),
            CreateOutcome::Existing(consent_id) => {
                // A concurrent request with the same key stored its consent first.
                let Some(key) = key else {
                    return Err(StoreError::Invalid(format!(
                        "store reported existing consent {consent_id} for a keyless request"
                    ))
                    .into());
                };
                let existing = self.load_replay(&consent_id, &key, &consent.receipt)?;
                Ok(InitiationResult {
                    consent: existing,
                    idempotency_key: Some(key),
                    replayed: true,
                })
            }
        }
    }

    /// Applies the size limit, parses, validates, and audits.
    fn check_payload(
        &self,
        client_id: Option<&ClientId>,
        raw: &[u8],
    ) -> (DocumentNode, ValidationOutcome) {
        let (payload, outcome) = if raw.len() > self.settings.max_payload_bytes {
            let message = format!(
                "Payload exceeds the maximum size of {} bytes",
                self.settings.max_payload_bytes
            );
            (
                DocumentNode::Invalid,
                ValidationOutcome::invalid(ErrorCode::PayloadFormatError.with_message(message)),
            )
        } else {
            let payload = DocumentNode::parse_bytes(raw);
            let outcome = validate_vrp_payload_with(&payload, &self.validation_options());
            (payload, outcome)
        };
        self.audit.record_validation(&ValidationAuditEvent::new(client_id, &outcome, raw.len()));
        (payload, outcome)
    }

    /// Returns the rule set for this request.
    fn validation_options(&self) -> ValidationOptions {
        if self.settings.reject_expired {
            self.settings.validation.with_reference_time(OffsetDateTime::now_utc())
        } else {
            self.settings.validation
        }
    }

    /// Sanitizes the idempotency key according to the settings.
    fn accept_idempotency_key(
        &self,
        value: Option<&str>,
    ) -> Result<Option<IdempotencyKey>, InitiationError> {
        match sanitize_idempotency_key(value, self.settings.max_idempotency_key_length) {
            Ok(key) => Ok(Some(key)),
            Err(IdempotencyKeyRejection::Missing) if self.settings.idempotency_required => {
                Err(InitiationError::MissingIdempotencyKey)
            }
            Err(IdempotencyKeyRejection::Missing) => Ok(None),
            Err(rejection) => Err(InitiationError::InvalidIdempotencyKey(rejection)),
        }
    }

    /// Returns the consent a previous request created with the same key.
    fn find_replay(
        &self,
        client_id: &ClientId,
        key: &IdempotencyKey,
        receipt: &Value,
    ) -> Result<Option<ConsentResource>, InitiationError> {
        let Some(consent_id) = self.store.find_by_idempotency_key(client_id, key)? else {
            return Ok(None);
        };
        self.load_replay(&consent_id, key, receipt).map(Some)
    }

    /// Loads the consent behind an idempotency key and checks the payload matches.
    fn load_replay(
        &self,
        consent_id: &ConsentId,
        key: &IdempotencyKey,
        receipt: &Value,
    ) -> Result<ConsentResource, InitiationError> {
        let Some(existing) = self.store.load(consent_id)? else {
            return Err(StoreError::Invalid(format!(
                "idempotency index references missing consent {consent_id}"
            ))
            .into());
        };
        if &existing.receipt == receipt {
            Ok(existing)
        } else {
            Err(InitiationError::IdempotencyConflict(key.to_string()))
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Derives the stored attributes of a validated payload.
fn consent_attributes(payload: &DocumentNode, key: Option<&IdempotencyKey>) -> ConsentAttributes {
    let mut attributes = ConsentAttributes::new();
    if let Some(key) = key {
        attributes.insert(ATTR_IDEMPOTENCY_KEY.to_string(), key.to_string());
    }
    let control = payload.object_at(DATA).and_then(|data| data.object_at(CONTROL_PARAMETERS));
    if let Some(amount) = control
        .and_then(|cp| cp.object_at(MAXIMUM_INDIVIDUAL_AMOUNT))
        .and_then(|max| max.str_at(AMOUNT))
    {
        attributes.insert(ATTR_MAXIMUM_INDIVIDUAL_AMOUNT.to_string(), amount.to_string());
    }
    if let Some(limit) =
        control.and_then(|cp| cp.array_at(PERIODIC_LIMITS)).and_then(|limits| limits.first())
    {
        if let Some(period_type) = limit.str_at(PERIOD_TYPE) {
            attributes.insert(ATTR_PERIOD_TYPE.to_string(), period_type.to_string());
        }
        if let Some(amount) = limit.str_at(AMOUNT) {
            attributes.insert(ATTR_PERIOD_AMOUNT.to_string(), amount.to_string());
        }
    }
    attributes.insert(ATTR_PAID_AMOUNT.to_string(), INITIAL_PAYMENT_ATTRIBUTE.to_string());
    attributes.insert(ATTR_LAST_PAYMENT_DATE.to_string(), INITIAL_PAYMENT_ATTRIBUTE.to_string());
    attributes
}

/// Returns the current time in milliseconds since epoch.
fn now_ms() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis()
}
