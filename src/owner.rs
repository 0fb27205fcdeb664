//! Process-unique identity for a call target, replacing garbage-collected
//! weak keys with explicit ownership.

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_OWNER: AtomicU64 = AtomicU64::new(1);

/// Identifies the owner of a wrapped call (the "this" of the original
/// decorators). Allocate one per target and keep it alongside the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OwnerId(u64);

impl OwnerId {
    pub fn next() -> Self {
        OwnerId(NEXT_OWNER.fetch_add(1, Ordering::Relaxed))
    }
}
