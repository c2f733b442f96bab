// crates/vrp-consent-core/src/interfaces/mod.rs
// ============================================================================
// Module: VRP Consent Interfaces
// Description: Backend-agnostic storage contracts for consents and metadata.
// Purpose: Define the persistence surfaces used by the initiation runtime.
// Dependencies: crate::core, thiserror
// ============================================================================

//! ## Overview
//! Interfaces describe how consents, consent attributes, and account metadata
//! are persisted without embedding backend-specific details. Implementations
//! must fail closed: a backend error is reported, never treated as "absent".

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use thiserror::Error;

use crate::core::ClientId;
use crate::core::ConsentAttributes;
use crate::core::ConsentId;
use crate::core::ConsentResource;
use crate::core::IdempotencyKey;

// ============================================================================
// SECTION: Store Errors
// ============================================================================

/// Consent and metadata store errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store I/O error.
    #[error("consent store io error: {0}")]
    Io(String),
    /// Caller supplied data the store refuses to persist.
    #[error("consent store invalid data: {0}")]
    Invalid(String),
    /// A record with the same identity already exists.
    #[error("consent store conflict: {0}")]
    Conflict(String),
    /// Store reported an error.
    #[error("consent store error: {0}")]
    Store(String),
}

// ============================================================================
// SECTION: Consent Store
// ============================================================================

/// Result of [`ConsentStore::create_with_attributes`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// The consent, its attributes, and its idempotency entry were stored.
    Created,
    /// The client already holds a consent under the idempotency key; nothing
    /// was stored.
    Existing(ConsentId),
}

/// Persistence for consent resources and their attributes.
pub trait ConsentStore {
    /// Persists a newly created consent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Conflict`] when the consent id already exists, or
    /// another [`StoreError`] when saving fails.
    fn create(&self, consent: &ConsentResource) -> Result<(), StoreError>;

    /// Persists a new consent together with its attributes in one step.
    ///
    /// When `idempotency_key` is supplied, the (client id, key) index is
    /// checked and written under the same critical section as the consent,
    /// so concurrent requests sharing a key create at most one consent. A
    /// key already indexed for the consent's client yields
    /// [`CreateOutcome::Existing`] and leaves the store unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Conflict`] when the consent id already exists, or
    /// another [`StoreError`] when saving fails.
    fn create_with_attributes(
        &self,
        consent: &ConsentResource,
        attributes: &ConsentAttributes,
        idempotency_key: Option<&IdempotencyKey>,
    ) -> Result<CreateOutcome, StoreError>;

    /// Loads a consent by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when loading fails.
    fn load(&self, consent_id: &ConsentId) -> Result<Option<ConsentResource>, StoreError>;

    /// Finds the consent a client created with the given idempotency key.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the lookup fails.
    fn find_by_idempotency_key(
        &self,
        client_id: &ClientId,
        key: &IdempotencyKey,
    ) -> Result<Option<ConsentId>, StoreError>;

    /// Merges attributes into the attribute set of a consent.
    ///
    /// An idempotency key attribute is indexed only when the (client, key)
    /// pair is not indexed yet.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Invalid`] when the consent does not exist, or
    /// another [`StoreError`] when saving fails.
    fn store_attributes(
        &self,
        consent_id: &ConsentId,
        attributes: &ConsentAttributes,
    ) -> Result<(), StoreError>;

    /// Loads every attribute recorded for a consent.
    ///
    /// Unknown consents yield an empty set.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when loading fails.
    fn load_attributes(&self, consent_id: &ConsentId) -> Result<ConsentAttributes, StoreError>;

    /// Reports store readiness.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store is unavailable.
    fn readiness(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

// ============================================================================
// SECTION: Account Metadata Store
// ============================================================================

/// Key/value metadata scoped to an (account, user) pair.
///
/// # Invariants
/// - Account ids, user ids, metadata keys, and metadata values are non-blank.
pub trait AccountMetadataStore {
    /// Inserts or replaces metadata entries for an account and user.
    ///
    /// Returns the number of entries written.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Invalid`] when an identifier is blank, the map is
    /// empty, or any key or value is blank.
    fn store_metadata(
        &self,
        account_id: &str,
        user_id: &str,
        metadata: &BTreeMap<String, String>,
    ) -> Result<usize, StoreError>;

    /// Returns one metadata value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Invalid`] when an identifier or the key is blank.
    fn get_metadata(
        &self,
        account_id: &str,
        user_id: &str,
        key: &str,
    ) -> Result<Option<String>, StoreError>;

    /// Returns every metadata entry for an account and user.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Invalid`] when an identifier is blank.
    fn get_all_metadata(
        &self,
        account_id: &str,
        user_id: &str,
    ) -> Result<BTreeMap<String, String>, StoreError>;

    /// Deletes one metadata entry, returning whether it existed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Invalid`] when an identifier or the key is blank.
    fn delete_metadata(&self, account_id: &str, user_id: &str, key: &str)
    -> Result<bool, StoreError>;

    /// Deletes every metadata entry for an account and user, returning the
    /// number removed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Invalid`] when an identifier is blank.
    fn delete_all_metadata(&self, account_id: &str, user_id: &str) -> Result<usize, StoreError>;

    /// Deletes one metadata key for every user of an account, returning the
    /// number removed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Invalid`] when the account id or key is blank.
    fn delete_metadata_for_all_users(&self, account_id: &str, key: &str)
    -> Result<usize, StoreError>;
}
