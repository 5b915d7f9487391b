use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};

/// Source of the current time. Swapped out in tests so that deadlines like
/// the cancellation cutoff can be exercised.
pub trait ISys: Send + Sync {
    /// The current timestamp in millis
    fn get_timestamp_millis(&self) -> i64;
}

/// System that gets the real time and is used when not testing
pub struct RealSys {}
impl ISys for RealSys {
    fn get_timestamp_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Controllable clock. Every read advances it by one milli so that
/// consecutive registrations always get distinct timestamps.
pub struct MockSys {
    now: AtomicI64,
}

impl MockSys {
    pub fn new(now: i64) -> Self {
        Self {
            now: AtomicI64::new(now),
        }
    }

    pub fn set(&self, now: i64) {
        self.now.store(now, Ordering::SeqCst);
    }

    pub fn advance(&self, millis: i64) {
        self.now.fetch_add(millis, Ordering::SeqCst);
    }
}

impl ISys for MockSys {
    fn get_timestamp_millis(&self) -> i64 {
        self.now.fetch_add(1, Ordering::SeqCst)
    }
}
