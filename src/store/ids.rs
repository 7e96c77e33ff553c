use std::str::FromStr;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdStrategy {
    /// Milliseconds since the epoch, bumped past the last issued value.
    #[default]
    Timestamp,
    Uuid,
}

impl FromStr for IdStrategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "timestamp" => Ok(IdStrategy::Timestamp),
            "uuid" => Ok(IdStrategy::Uuid),
            other => Err(anyhow::anyhow!(
                "unknown id strategy '{other}', expected 'timestamp' or 'uuid'"
            )),
        }
    }
}

/// Issues record ids for one collection.
///
/// The timestamp strategy keeps a high-water mark so two calls within the same
/// millisecond still get distinct, increasing ids.
#[derive(Debug, Default)]
pub struct IdGenerator {
    strategy: IdStrategy,
    last_millis: AtomicI64,
}

impl IdGenerator {
    pub fn new(strategy: IdStrategy) -> Self {
        Self {
            strategy,
            last_millis: AtomicI64::new(0),
        }
    }

    pub fn strategy(&self) -> IdStrategy {
        self.strategy
    }

    pub fn fresh_id(&self) -> String {
        match self.strategy {
            IdStrategy::Timestamp => self.next_millis().to_string(),
            IdStrategy::Uuid => Uuid::new_v4().to_string(),
        }
    }

    /// Returns a fresh id that `taken` does not already contain.
    pub fn fresh_id_unless(&self, taken: impl Fn(&str) -> bool) -> String {
        loop {
            let id = self.fresh_id();
            if !taken(&id) {
                return id;
            }
            tracing::debug!(id = %id, "generated id already in use, retrying");
        }
    }

    fn next_millis(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let mut last = self.last_millis.load(Ordering::Relaxed);
        loop {
            let next = now.max(last + 1);
            match self.last_millis.compare_exchange_weak(
                last,
                next,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => return next,
                Err(actual) => last = actual,
            }
        }
    }
}
