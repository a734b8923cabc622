//! # Domain Module
//!
//! Core domain types for the marketplace: accounts, surveys, submissions,
//! their state machines and the rules guarding them.

pub mod browse;
pub mod credentials;
pub mod entities;
pub mod errors;
pub mod invariants;
pub mod value_objects;

pub use credentials::Credential;
pub use entities::*;
pub use errors::*;
pub use invariants::*;
pub use value_objects::*;
