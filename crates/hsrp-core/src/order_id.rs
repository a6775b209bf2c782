use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

pub const ORDER_ID_PREFIX: &str = "HSRP-";

/// Issues human-facing order ids of the form `HSRP-<millis>`.
///
/// The millisecond clock alone can repeat under burst creation, so the
/// generator clamps each issued value to be strictly greater than the
/// previous one. Uniqueness across processes is enforced by the store's
/// unique index, with the orchestrator regenerating on conflict.
pub struct OrderIdGenerator {
    last: AtomicI64,
}

impl OrderIdGenerator {
    pub fn new() -> Self {
        Self {
            last: AtomicI64::new(0),
        }
    }

    pub fn next(&self) -> String {
        let now = Utc::now().timestamp_millis();
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(prev + 1);
            match self.last.compare_exchange_weak(
                prev,
                candidate,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return format!("{ORDER_ID_PREFIX}{candidate}"),
                Err(actual) => prev = actual,
            }
        }
    }
}

impl Default for OrderIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
