//! Trailing-edge debounce gate, keyed per owner, with a caller-driven clock.
//!
//! There are no timers or background threads here: the host records each
//! call with [`Debouncer::submit`] and polls [`Debouncer::due`] with its own
//! notion of "now." Resubmitting before the delay elapses resets the window
//! and replaces the pending arguments, so only the last call in a burst
//! fires.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::owner::OwnerId;
use crate::value::Value;

#[derive(Debug)]
struct Pending {
    due_at: Instant,
    args: Vec<Value>,
}

#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: HashMap<OwnerId, Pending>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: HashMap::new(),
        }
    }

    /// Records a call for `owner`, resetting any pending window.
    pub fn submit(&mut self, owner: OwnerId, now: Instant, args: Vec<Value>) {
        self.pending.insert(
            owner,
            Pending {
                due_at: now + self.delay,
                args,
            },
        );
    }

    /// Releases the pending call for `owner` once its delay has elapsed.
    pub fn due(&mut self, owner: OwnerId, now: Instant) -> Option<Vec<Value>> {
        let fires = matches!(self.pending.get(&owner), Some(pending) if now >= pending.due_at);
        if fires {
            self.pending.remove(&owner).map(|pending| pending.args)
        } else {
            None
        }
    }

    /// Drops the pending call for `owner`, reporting whether one existed.
    pub fn cancel(&mut self, owner: OwnerId) -> bool {
        self.pending.remove(&owner).is_some()
    }

    pub fn is_pending(&self, owner: OwnerId) -> bool {
        self.pending.contains_key(&owner)
    }
}
