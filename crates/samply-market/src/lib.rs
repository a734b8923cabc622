//! # Survey Marketplace Engine
//!
//! Researchers publish surveys funded from their point balance; respondents
//! complete them and are credited once the author approves the submission.
//!
//! ## Lifecycle
//!
//! ```text
//! Researcher ──create_survey──→ [open] ──close / deadline──→ [closed]
//!                                 │
//! Respondent ──────submit───────→ [pending] ──approve──→ [approved]  +points
//!                                     └──────reject───→ [rejected]
//! ```
//!
//! ## Domain Invariants
//!
//! | # | Invariant | Description |
//! |---|-----------|-------------|
//! | 1 | Unique Email | One account per email address |
//! | 2 | Funded Surveys | Creation debits the author's points; balance never negative |
//! | 3 | One Submission | At most one submission per (survey, respondent) |
//! | 4 | Single Review | Only `pending` submissions are approved or rejected |
//! | 5 | Close Once | A closed survey never reopens; its count is frozen |
//! | 6 | Ownership | Only the author closes a survey or reviews its submissions |
//! | 7 | Atomic Writes | Each operation lands in one batch or not at all |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Entities, state machines, validation and browse projections
//! - `ports/` - Inbound API traits, outbound store/clock/id traits
//! - `adapters/` - In-memory and file-backed stores, manual clock, sequential ids
//! - `service/` - Application service implementing the API
//!
//! ## Usage
//!
//! ```ignore
//! use samply_market::{AccountApi, InMemoryMarketplace, MarketConfig, SurveyLifecycleApi};
//!
//! let mut market = InMemoryMarketplace::new_in_memory(MarketConfig::default());
//! let researcher = market.register(registration)?;
//! let survey = market.create_survey(&researcher, draft)?;
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export key types for convenience
pub use adapters::{FileBackedKVStore, InMemoryKVStore, ManualTimeSource, SequentialIdGenerator};
pub use domain::errors::{KVStoreError, MarketError, SerializationError};
pub use domain::value_objects::{
    MarketConfig, Role, StorageKey, SubmissionStatus, SurveyStatus, Timestamp, AVAILABLE_TOPICS,
};
pub use domain::{
    Account, ProfilePatch, Registration, Session, Settlement, Submission, Survey, SurveyDraft,
};
pub use ports::inbound::{AccountApi, MarketQueryApi, SurveyLifecycleApi};
pub use ports::outbound::{
    BatchOperation, IdGenerator, KeyValueStore, SystemTimeSource, TimeSource, UuidIdGenerator,
};
pub use service::{InMemoryMarketplace, MarketDependencies, MarketplaceService};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
