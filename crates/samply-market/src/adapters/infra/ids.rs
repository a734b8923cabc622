use crate::ports::outbound::IdGenerator;
use std::sync::atomic::{AtomicU64, Ordering};

/// Predictable ids: `survey_1`, `submission_2`, ...
///
/// One counter is shared across prefixes.
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self, prefix: &str) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}_{}", prefix, n)
    }
}
