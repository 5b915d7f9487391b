use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use trustkeeper_domain::ID;

/// Serializes the capacity changing actions of a single `Meetup`.
///
/// Registering, cancelling and answering a waitlist offer each read the
/// occupancy of the meetup and then write based on it. Holding the guard of
/// the meetup for the whole sequence keeps two concurrent requests from
/// both taking the last slot or both promoting the same participant.
/// Only requests served by this process are serialized.
///
/// Locks are created on first use and removed again once nobody holds or
/// waits for them.
#[derive(Default)]
pub struct MeetupLocks {
    locks: Mutex<HashMap<ID, Arc<AsyncMutex<()>>>>,
}

impl MeetupLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, meetup_id: &ID) -> MeetupGuard<'_> {
        let lock = {
            let mut locks = self.locks.lock().unwrap();
            locks
                .entry(*meetup_id)
                .or_insert_with(|| Arc::new(AsyncMutex::new(())))
                .clone()
        };
        MeetupGuard {
            guard: Some(lock.lock_owned().await),
            meetup_id: *meetup_id,
            locks: self,
        }
    }

    fn release(&self, meetup_id: &ID) {
        let mut locks = match self.locks.lock() {
            Ok(locks) => locks,
            Err(poisoned) => poisoned.into_inner(),
        };
        // Only the map holds the lock, every clone is handed out under the map mutex
        if locks
            .get(meetup_id)
            .map(|lock| Arc::strong_count(lock) == 1)
            .unwrap_or(false)
        {
            locks.remove(meetup_id);
        }
    }
}

/// Held for as long as the actions on the meetup must not interleave
pub struct MeetupGuard<'a> {
    guard: Option<OwnedMutexGuard<()>>,
    meetup_id: ID,
    locks: &'a MeetupLocks,
}

impl Drop for MeetupGuard<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());
        self.locks.release(&self.meetup_id);
    }
}
