//! Infrastructure adapters: deterministic clock and id sources.

mod ids;
mod time;

pub use ids::SequentialIdGenerator;
pub use time::ManualTimeSource;
