//! # Samply Runtime
//!
//! Hosts the marketplace engine over the file-backed store.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (defaults, then environment)
//! 2. Install logging
//! 3. Open the data file
//! 4. Start the deadline sweeper
//! 5. Wait for Ctrl-C, then stop the sweeper

pub mod config;
pub mod sweeper;

use parking_lot::Mutex;
use samply_market::{
    FileBackedKVStore, KVStoreError, MarketDependencies, MarketplaceService, SystemTimeSource,
    UuidIdGenerator,
};
use std::sync::Arc;

pub use config::{load_config, RuntimeConfig};
pub use sweeper::{SharedMarket, Sweeper};

/// The production service: file store, wall clock, uuid ids.
pub type FileMarketplace = MarketplaceService<FileBackedKVStore, SystemTimeSource, UuidIdGenerator>;

/// Open the configured data file and wrap the service for sharing.
pub fn open_market(
    config: &RuntimeConfig,
) -> Result<SharedMarket<FileBackedKVStore, SystemTimeSource, UuidIdGenerator>, KVStoreError> {
    let store = FileBackedKVStore::open(&config.data_path)?;
    let market: FileMarketplace = MarketplaceService::new(
        MarketDependencies {
            kv_store: store,
            time_source: SystemTimeSource,
            ids: UuidIdGenerator,
        },
        config.market.clone(),
    );
    Ok(Arc::new(Mutex::new(market)))
}
