//! # Account API Implementation
//!
//! Registration, login and profile edits. The active session is persisted as
//! a reference to an account; the current user is always read back through
//! the account collection.

use super::helpers::{account_index, put_json};
use super::*;
use crate::domain::{
    invariant_unique_email, validate_registration, Account, AccountRecord, ActiveSession,
    Credential, MarketError, ProfilePatch, Registration, SerializationError, Session, StorageKey,
};
use crate::ports::inbound::AccountApi;
use crate::ports::outbound::BatchOperation;
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

impl<KV, TS, IG> MarketplaceService<KV, TS, IG>
where
    KV: KeyValueStore,
    TS: TimeSource,
    IG: IdGenerator,
{
    fn session_record(&self, account_id: &str) -> Result<BatchOperation, MarketError> {
        put_json(
            StorageKey::ACTIVE_SESSION,
            &ActiveSession {
                account_id: account_id.to_string(),
                started_at: self.time_source.now(),
            },
        )
    }

    /// Apply `edit` to the session's account and persist it.
    fn edit_account<F>(&mut self, session: &Session, edit: F) -> Result<Option<Account>, MarketError>
    where
        F: FnOnce(&mut Account),
    {
        let mut records = self.load_accounts()?;
        let Some(index) = account_index(&records, &session.account_id) else {
            debug!(
                "[samply] No account for session {}, edit ignored",
                session.account_id
            );
            return Ok(None);
        };

        edit(&mut records[index].account);
        let updated = records[index].account.clone();

        self.kv_store
            .atomic_batch_write(vec![put_json(StorageKey::ACCOUNTS, &records)?])?;
        Ok(Some(updated))
    }
}

impl<KV, TS, IG> AccountApi for MarketplaceService<KV, TS, IG>
where
    KV: KeyValueStore,
    TS: TimeSource,
    IG: IdGenerator,
{
    fn register(&mut self, registration: Registration) -> Result<Session, MarketError> {
        validate_registration(&registration)?;

        let mut records = self.load_accounts()?;
        invariant_unique_email(&records, &registration.email)?;

        let account = Account {
            id: self.ids.next_id("user"),
            name: registration.name,
            email: registration.email,
            role: registration.role,
            institution: registration.institution,
            points: self.config.starting_points(registration.role),
            selected_topics: BTreeSet::new(),
        };
        let session = Session::new(account.id.clone());

        info!(
            "[samply] 👤 Registered {} {} with {} points",
            account.role, account.id, account.points
        );

        records.push(AccountRecord {
            account,
            credential: Credential::new(&registration.password),
        });

        self.kv_store.atomic_batch_write(vec![
            put_json(StorageKey::ACCOUNTS, &records)?,
            self.session_record(&session.account_id)?,
        ])?;

        Ok(session)
    }

    fn login(&mut self, email: &str, password: &str) -> Result<Session, MarketError> {
        let session = self
            .load_accounts()?
            .into_iter()
            .find(|r| r.account.email == email && r.credential.verify(password))
            .map(|r| Session::new(r.account.id))
            .ok_or_else(|| {
                warn!("[samply] Failed login for {}", email);
                MarketError::InvalidCredentials
            })?;

        self.kv_store
            .atomic_batch_write(vec![self.session_record(&session.account_id)?])?;

        info!("[samply] 🔑 {} logged in", session.account_id);
        Ok(session)
    }

    fn logout(&mut self, session: &Session) -> Result<(), MarketError> {
        // A stale handle must not end someone else's session
        if self.active_session()?.as_ref() == Some(session) {
            self.kv_store.delete(StorageKey::ACTIVE_SESSION)?;
            info!("[samply] {} logged out", session.account_id);
        }
        Ok(())
    }

    fn active_session(&self) -> Result<Option<Session>, MarketError> {
        let Some(raw) = self.kv_store.get(StorageKey::ACTIVE_SESSION)? else {
            return Ok(None);
        };
        let active: ActiveSession = serde_json::from_str(&raw).map_err(|e| SerializationError {
            key: StorageKey::ACTIVE_SESSION.to_string(),
            message: e.to_string(),
        })?;
        Ok(Some(Session::new(active.account_id)))
    }

    fn current_user(&self, session: &Session) -> Result<Account, MarketError> {
        self.actor(session)
    }

    fn update_profile(
        &mut self,
        session: &Session,
        patch: ProfilePatch,
    ) -> Result<Option<Account>, MarketError> {
        self.edit_account(session, |account| patch.apply_to(account))
    }

    fn update_points(
        &mut self,
        session: &Session,
        new_balance: u64,
    ) -> Result<Option<Account>, MarketError> {
        self.edit_account(session, |account| account.points = new_balance)
    }
}
