//! # Marketplace Service
//!
//! The application service implementing the marketplace API.
//!
//! ## Architecture
//!
//! This service:
//! 1. Implements `AccountApi` for registration, login and profile edits
//! 2. Implements `SurveyLifecycleApi` for creation, expiry, intake and settlement
//! 3. Implements `MarketQueryApi` for the dashboard projections
//! 4. Uses dependency injection for the store, the clock and the id source
//!
//! Every mutation loads the collections it touches, checks the domain
//! invariants, and lands all of its writes in one `atomic_batch_write`.
//! A failed check writes nothing.

mod accounts;
mod helpers;
mod lifecycle;
mod queries;

use crate::adapters::InMemoryKVStore;
use crate::domain::MarketConfig;
use crate::ports::outbound::{
    IdGenerator, KeyValueStore, SystemTimeSource, TimeSource, UuidIdGenerator,
};

/// The Marketplace Service.
pub struct MarketplaceService<KV, TS, IG>
where
    KV: KeyValueStore,
    TS: TimeSource,
    IG: IdGenerator,
{
    /// Key-value store holding the collections.
    pub(crate) kv_store: KV,
    /// Time source for stamps and the deadline sweep.
    pub(crate) time_source: TS,
    /// Record id source.
    pub(crate) ids: IG,
    /// Engine configuration.
    pub(crate) config: MarketConfig,
}

/// Dependencies for MarketplaceService
pub struct MarketDependencies<KV, TS, IG> {
    pub kv_store: KV,
    pub time_source: TS,
    pub ids: IG,
}

impl<KV, TS, IG> MarketplaceService<KV, TS, IG>
where
    KV: KeyValueStore,
    TS: TimeSource,
    IG: IdGenerator,
{
    /// Create a new Marketplace Service with the given dependencies.
    pub fn new(deps: MarketDependencies<KV, TS, IG>, config: MarketConfig) -> Self {
        Self {
            kv_store: deps.kv_store,
            time_source: deps.time_source,
            ids: deps.ids,
            config,
        }
    }

    /// Engine configuration.
    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    /// Underlying store, for inspection.
    pub fn store(&self) -> &KV {
        &self.kv_store
    }
}

/// Service over an in-memory store with the system clock.
pub type InMemoryMarketplace = MarketplaceService<InMemoryKVStore, SystemTimeSource, UuidIdGenerator>;

impl InMemoryMarketplace {
    /// Create a service backed by a fresh in-memory store.
    pub fn new_in_memory(config: MarketConfig) -> Self {
        Self::new(
            MarketDependencies {
                kv_store: InMemoryKVStore::new(),
                time_source: SystemTimeSource,
                ids: UuidIdGenerator,
            },
            config,
        )
    }
}
