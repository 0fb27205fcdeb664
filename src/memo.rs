//! Memoization keyed by (owner identity, argument tuple), with explicit
//! eviction instead of weak references.

use std::collections::HashMap;

use crate::owner::OwnerId;
use crate::value::Value;

/// An explicit `(owner, argument tuple) -> result` cache. Argument tuples
/// are keyed by their canonical JSON encoding.
#[derive(Debug, Default)]
pub struct MemoCache {
    entries: HashMap<(OwnerId, String), Value>,
}

impl MemoCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, owner: OwnerId, args: &[Value]) -> Option<&Value> {
        self.entries.get(&(owner, arg_key(args)))
    }

    pub fn insert(&mut self, owner: OwnerId, args: &[Value], result: Value) {
        self.entries.insert((owner, arg_key(args)), result);
    }

    /// Returns the cached result for `(owner, args)`, computing and storing
    /// it on a miss.
    pub fn get_or_insert_with(
        &mut self,
        owner: OwnerId,
        args: &[Value],
        compute: impl FnOnce(&[Value]) -> Value,
    ) -> Value {
        self.entries
            .entry((owner, arg_key(args)))
            .or_insert_with(|| compute(args))
            .clone()
    }

    /// Drops every cached result belonging to `owner`.
    pub fn evict(&mut self, owner: OwnerId) {
        self.entries.retain(|(entry_owner, _), _| *entry_owner != owner);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn arg_key(args: &[Value]) -> String {
    // Non-finite numbers serialize as null; the fallback covers anything
    // serde_json refuses outright.
    serde_json::to_string(args).unwrap_or_else(|_| format!("{args:?}"))
}
