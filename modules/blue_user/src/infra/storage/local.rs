use std::sync::Arc;

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::contract::model::UserResource;
use crate::domain::error::DomainError;
use crate::domain::links::LinkBuilder;
use crate::domain::projection::{non_blank, IdentityRecord, UserProjection, LOCAL_SOURCE};
use crate::domain::repo::IdentitySource;
use crate::infra::error::SourceError;

/// Local user accounts keyed by user id.
///
/// A record stored under `key` must carry `key` as its id, or no id at all;
/// the latter stays addressable so lookups report it as missing its identifier.
#[derive(Debug, Default)]
pub struct LocalAccountStore {
    accounts: DashMap<String, IdentityRecord>,
}

impl LocalAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load seed records. Records rejected by [`insert`](Self::insert) are skipped with a warning.
    pub fn from_records<I, K>(records: I) -> Self
    where
        I: IntoIterator<Item = (K, IdentityRecord)>,
        K: Into<String>,
    {
        let store = Self::new();
        for (key, record) in records {
            if let Err(e) = store.insert(key, record) {
                tracing::warn!(error = %e, "Skipping local account");
            }
        }
        store
    }

    /// Add a new record; fails if `key` is taken or disagrees with the record id.
    pub fn insert(
        &self,
        key: impl Into<String>,
        record: IdentityRecord,
    ) -> Result<(), SourceError> {
        let key = key.into();
        check_key(&key, &record)?;
        match self.accounts.entry(key) {
            Entry::Occupied(e) => Err(SourceError::DuplicateKey {
                source_name: LOCAL_SOURCE,
                key: e.key().clone(),
            }),
            Entry::Vacant(e) => {
                e.insert(record);
                Ok(())
            }
        }
    }

    /// Insert or replace the record stored under `key`.
    pub fn upsert(
        &self,
        key: impl Into<String>,
        record: IdentityRecord,
    ) -> Result<Option<IdentityRecord>, SourceError> {
        let key = key.into();
        check_key(&key, &record)?;
        Ok(self.accounts.insert(key, record))
    }

    pub fn remove(&self, key: &str) -> Option<IdentityRecord> {
        self.accounts.remove(key).map(|(_, record)| record)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Keys currently stored, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.accounts.iter().map(|e| e.key().clone()).collect();
        keys.sort();
        keys
    }
}

fn check_key(key: &str, record: &IdentityRecord) -> Result<(), SourceError> {
    match non_blank(record.id.as_deref()) {
        Some(id) if id != key => Err(SourceError::KeyMismatch {
            source_name: LOCAL_SOURCE,
            key: key.to_string(),
            id: id.to_string(),
        }),
        _ => Ok(()),
    }
}

#[async_trait]
impl IdentitySource for LocalAccountStore {
    fn name(&self) -> &'static str {
        LOCAL_SOURCE
    }

    async fn resolve(
        &self,
        id: &str,
        links: &LinkBuilder,
    ) -> Result<Option<Arc<dyn UserResource>>, DomainError> {
        // Release the shard guard before projecting.
        let Some(record) = self.accounts.get(id).map(|r| r.value().clone()) else {
            return Ok(None);
        };
        let user = UserProjection::from_record(id, &record, links)?;
        Ok(Some(Arc::new(user)))
    }
}
