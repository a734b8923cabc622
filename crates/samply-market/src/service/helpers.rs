//! # Service Helpers
//!
//! Collection loading/encoding and actor resolution shared by the API impls.

use super::*;
use crate::domain::{
    Account, AccountRecord, MarketError, SerializationError, Session, StorageKey, Submission,
    Survey,
};
use crate::ports::outbound::BatchOperation;
use serde::de::DeserializeOwned;
use serde::Serialize;

impl<KV, TS, IG> MarketplaceService<KV, TS, IG>
where
    KV: KeyValueStore,
    TS: TimeSource,
    IG: IdGenerator,
{
    /// Load a JSON collection; an absent key is an empty collection.
    pub(crate) fn load_collection<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Vec<T>, MarketError> {
        match self.kv_store.get(key)? {
            None => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(&raw).map_err(|e| {
                MarketError::from(SerializationError {
                    key: key.to_string(),
                    message: e.to_string(),
                })
            }),
        }
    }

    pub(crate) fn load_accounts(&self) -> Result<Vec<AccountRecord>, MarketError> {
        self.load_collection(StorageKey::ACCOUNTS)
    }

    pub(crate) fn load_surveys(&self) -> Result<Vec<Survey>, MarketError> {
        self.load_collection(StorageKey::SURVEYS)
    }

    pub(crate) fn load_submissions(&self) -> Result<Vec<Submission>, MarketError> {
        self.load_collection(StorageKey::SUBMISSIONS)
    }

    /// Resolve the session's account.
    pub(crate) fn actor(&self, session: &Session) -> Result<Account, MarketError> {
        self.load_accounts()?
            .into_iter()
            .find(|r| r.account.id == session.account_id)
            .map(|r| r.account)
            .ok_or_else(|| MarketError::account_not_found(&session.account_id))
    }
}

/// Encode a value as a Put for `key`.
pub(crate) fn put_json<T: Serialize + ?Sized>(
    key: &str,
    value: &T,
) -> Result<BatchOperation, MarketError> {
    let raw = serde_json::to_string(value).map_err(|e| SerializationError {
        key: key.to_string(),
        message: e.to_string(),
    })?;
    Ok(BatchOperation::put(key, raw))
}

pub(crate) fn account_index(records: &[AccountRecord], id: &str) -> Option<usize> {
    records.iter().position(|r| r.account.id == id)
}

pub(crate) fn survey_index(surveys: &[Survey], id: &str) -> Result<usize, MarketError> {
    surveys
        .iter()
        .position(|s| s.id == id)
        .ok_or_else(|| MarketError::survey_not_found(id))
}

pub(crate) fn submission_index(submissions: &[Submission], id: &str) -> Result<usize, MarketError> {
    submissions
        .iter()
        .position(|s| s.id == id)
        .ok_or_else(|| MarketError::submission_not_found(id))
}
