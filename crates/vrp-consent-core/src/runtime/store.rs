// crates/vrp-consent-core/src/runtime/store.rs
// ============================================================================
// Module: VRP Consent In-Memory Stores
// Description: Mutex-guarded map implementations of the store interfaces.
// Purpose: Back the initiation runtime in tests and single-process tools.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! [`InMemoryConsentStore`] and [`InMemoryAccountMetadataStore`] keep their
//! records in ordered maps behind a shared mutex. Clones share the same
//! underlying maps. A poisoned mutex surfaces as [`StoreError::Store`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use crate::core::ATTR_IDEMPOTENCY_KEY;
use crate::core::ClientId;
use crate::core::ConsentAttributes;
use crate::core::ConsentId;
use crate::core::ConsentResource;
use crate::core::IdempotencyKey;
use crate::interfaces::AccountMetadataStore;
use crate::interfaces::ConsentStore;
use crate::interfaces::CreateOutcome;
use crate::interfaces::StoreError;

// ============================================================================
// SECTION: Consent Store
// ============================================================================

/// Records held by [`InMemoryConsentStore`].
#[derive(Debug, Default)]
struct ConsentTables {
    /// Consents keyed by id.
    consents: BTreeMap<ConsentId, ConsentResource>,
    /// Attributes keyed by consent id.
    attributes: BTreeMap<ConsentId, ConsentAttributes>,
    /// Idempotency index keyed by (client id, key).
    idempotency: BTreeMap<(ClientId, IdempotencyKey), ConsentId>,
}

/// In-memory consent store.
#[derive(Debug, Default, Clone)]
pub struct InMemoryConsentStore {
    /// Shared consent tables.
    tables: Arc<Mutex<ConsentTables>>,
}

impl InMemoryConsentStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored consents.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store mutex is poisoned.
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.lock()?.consents.len())
    }

    /// Returns true when no consent is stored.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store mutex is poisoned.
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.lock()?.consents.is_empty())
    }

    /// Acquires the table lock.
    fn lock(&self) -> Result<MutexGuard<'_, ConsentTables>, StoreError> {
        self.tables
            .lock()
            .map_err(|_| StoreError::Store("consent store mutex poisoned".to_string()))
    }
}

impl ConsentStore for InMemoryConsentStore {
    fn create(&self, consent: &ConsentResource) -> Result<(), StoreError> {
        let mut tables = self.lock()?;
        if tables.consents.contains_key(&consent.consent_id) {
            return Err(StoreError::Conflict(format!(
                "consent {} already exists",
                consent.consent_id
            )));
        }
        tables.consents.insert(consent.consent_id.clone(), consent.clone());
        Ok(())
    }

    fn create_with_attributes(
        &self,
        consent: &ConsentResource,
        attributes: &ConsentAttributes,
        idempotency_key: Option<&IdempotencyKey>,
    ) -> Result<CreateOutcome, StoreError> {
        let mut tables = self.lock()?;
        let index_key = idempotency_key.map(|key| (consent.client_id.clone(), key.clone()));
        if let Some(existing) = index_key.as_ref().and_then(|k| tables.idempotency.get(k)) {
            return Ok(CreateOutcome::Existing(existing.clone()));
        }
        if tables.consents.contains_key(&consent.consent_id) {
            return Err(StoreError::Conflict(format!(
                "consent {} already exists",
                consent.consent_id
            )));
        }
        let consent_id = consent.consent_id.clone();
        tables.consents.insert(consent_id.clone(), consent.clone());
        tables.attributes.insert(consent_id.clone(), attributes.clone());
        if let Some(index_key) = index_key {
            tables.idempotency.insert(index_key, consent_id);
        }
        Ok(CreateOutcome::Created)
    }

    fn load(&self, consent_id: &ConsentId) -> Result<Option<ConsentResource>, StoreError> {
        Ok(self.lock()?.consents.get(consent_id).cloned())
    }

    fn find_by_idempotency_key(
        &self,
        client_id: &ClientId,
        key: &IdempotencyKey,
    ) -> Result<Option<ConsentId>, StoreError> {
        let tables = self.lock()?;
        Ok(tables.idempotency.get(&(client_id.clone(), key.clone())).cloned())
    }

    fn store_attributes(
        &self,
        consent_id: &ConsentId,
        attributes: &ConsentAttributes,
    ) -> Result<(), StoreError> {
        let mut tables = self.lock()?;
        let Some(client_id) = tables.consents.get(consent_id).map(|c| c.client_id.clone()) else {
            return Err(StoreError::Invalid(format!("unknown consent {consent_id}")));
        };
        if let Some(key) = attributes.get(ATTR_IDEMPOTENCY_KEY) {
            let index_key = (client_id, IdempotencyKey::from_sanitized(key.clone()));
            tables.idempotency.entry(index_key).or_insert_with(|| consent_id.clone());
        }
        tables
            .attributes
            .entry(consent_id.clone())
            .or_default()
            .extend(attributes.iter().map(|(k, v)| (k.clone(), v.clone())));
        Ok(())
    }

    fn load_attributes(&self, consent_id: &ConsentId) -> Result<ConsentAttributes, StoreError> {
        Ok(self.lock()?.attributes.get(consent_id).cloned().unwrap_or_default())
    }

    fn readiness(&self) -> Result<(), StoreError> {
        self.lock().map(|_| ())
    }
}

// ============================================================================
// SECTION: Account Metadata Store
// ============================================================================

/// Metadata entry key: (account id, user id, metadata key).
type MetadataKey = (String, String, String);

/// In-memory account metadata store.
#[derive(Debug, Default, Clone)]
pub struct InMemoryAccountMetadataStore {
    /// Shared metadata entries.
    entries: Arc<Mutex<BTreeMap<MetadataKey, String>>>,
}

impl InMemoryAccountMetadataStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the entry lock.
    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<MetadataKey, String>>, StoreError> {
        self.entries
            .lock()
            .map_err(|_| StoreError::Store("account metadata store mutex poisoned".to_string()))
    }
}

impl AccountMetadataStore for InMemoryAccountMetadataStore {
    fn store_metadata(
        &self,
        account_id: &str,
        user_id: &str,
        metadata: &BTreeMap<String, String>,
    ) -> Result<usize, StoreError> {
        require_owner(account_id, user_id)?;
        if metadata.is_empty() {
            return Err(StoreError::Invalid("account metadata map is empty".to_string()));
        }
        for (key, value) in metadata {
            require_key(key)?;
            if value.trim().is_empty() {
                return Err(StoreError::Invalid(format!("metadata value for {key} is blank")));
            }
        }
        let mut entries = self.lock()?;
        for (key, value) in metadata {
            entries.insert(entry_key(account_id, user_id, key), value.clone());
        }
        Ok(metadata.len())
    }

    fn get_metadata(
        &self,
        account_id: &str,
        user_id: &str,
        key: &str,
    ) -> Result<Option<String>, StoreError> {
        require_owner(account_id, user_id)?;
        require_key(key)?;
        Ok(self.lock()?.get(&entry_key(account_id, user_id, key)).cloned())
    }

    fn get_all_metadata(
        &self,
        account_id: &str,
        user_id: &str,
    ) -> Result<BTreeMap<String, String>, StoreError> {
        require_owner(account_id, user_id)?;
        let entries = self.lock()?;
        Ok(entries
            .iter()
            .filter(|((account, user, _), _)| account == account_id && user == user_id)
            .map(|((_, _, key), value)| (key.clone(), value.clone()))
            .collect())
    }

    fn delete_metadata(
        &self,
        account_id: &str,
        user_id: &str,
        key: &str,
    ) -> Result<bool, StoreError> {
        require_owner(account_id, user_id)?;
        require_key(key)?;
        Ok(self.lock()?.remove(&entry_key(account_id, user_id, key)).is_some())
    }

    fn delete_all_metadata(&self, account_id: &str, user_id: &str) -> Result<usize, StoreError> {
        require_owner(account_id, user_id)?;
        let mut entries = self.lock()?;
        let before = entries.len();
        entries.retain(|(account, user, _), _| !(account == account_id && user == user_id));
        Ok(before - entries.len())
    }

    fn delete_metadata_for_all_users(
        &self,
        account_id: &str,
        key: &str,
    ) -> Result<usize, StoreError> {
        if account_id.trim().is_empty() {
            return Err(StoreError::Invalid("account id is blank".to_string()));
        }
        require_key(key)?;
        let mut entries = self.lock()?;
        let before = entries.len();
        entries.retain(|(account, _, entry), _| !(account == account_id && entry == key));
        Ok(before - entries.len())
    }
}

/// Builds a map key for one metadata entry.
fn entry_key(account_id: &str, user_id: &str, key: &str) -> MetadataKey {
    (account_id.to_string(), user_id.to_string(), key.to_string())
}

/// Rejects blank account or user identifiers.
fn require_owner(account_id: &str, user_id: &str) -> Result<(), StoreError> {
    if account_id.trim().is_empty() || user_id.trim().is_empty() {
        return Err(StoreError::Invalid("account id and user id are required".to_string()));
    }
    Ok(())
}

/// Rejects blank metadata keys.
fn require_key(key: &str) -> Result<(), StoreError> {
    if key.trim().is_empty() {
        return Err(StoreError::Invalid("metadata key is blank".to_string()));
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
