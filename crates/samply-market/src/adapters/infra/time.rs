use crate::domain::Timestamp;
use crate::ports::outbound::TimeSource;
use parking_lot::RwLock;
use std::sync::Arc;

/// Manually driven clock.
///
/// Clones share the same instant, so a test can keep one handle and move
/// time under a service that owns another.
#[derive(Clone, Debug)]
pub struct ManualTimeSource {
    current: Arc<RwLock<Timestamp>>,
}

impl ManualTimeSource {
    /// Create a clock stopped at `start`.
    pub fn new(start: Timestamp) -> Self {
        Self {
            current: Arc::new(RwLock::new(start)),
        }
    }

    /// Set current time.
    pub fn set(&self, time: Timestamp) {
        *self.current.write() = time;
    }

    /// Advance time.
    pub fn advance(&self, by: chrono::Duration) {
        let mut current = self.current.write();
        *current += by;
    }
}

impl TimeSource for ManualTimeSource {
    fn now(&self) -> Timestamp {
        *self.current.read()
    }
}
