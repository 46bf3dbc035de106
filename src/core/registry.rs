//! # Pending-submission registry.
//!
//! [`PendingMap`] maps each key to **at most one** [`Pending`] entry: the most
//! recently submitted, not-yet-superseded task for that key. All mutations are
//! atomic per key; unrelated keys live in independent shards and are never
//! serialized against each other.
//!
//! ## Rules
//! - [`replace`](PendingMap::replace) is an atomic put-and-return-previous:
//!   no observer can see the slot empty between the swap and the supersede
//!   cancellation that follows, and the displaced entry is handed back as part
//!   of the same operation.
//! - [`remove_if_current`](PendingMap::remove_if_current) only removes the
//!   entry when its submission id still matches. A timer task releasing its
//!   own slot can therefore never evict a newer entry that was installed while
//!   it was waking up.
//! - Entries hold the cancellation handle, not the task itself; join-on-
//!   shutdown is the tracker's job (`core/debouncer.rs`).

use std::hash::Hash;

use dashmap::DashMap;
use tokio_util::sync::CancellationToken;

/// One scheduled-but-not-yet-released submission for a key.
pub(crate) struct Pending {
    /// Process-unique submission sequence number; identifies this entry for
    /// the guarded remove-if-current check.
    pub id: u64,
    /// Cancellation handle for the submission's timer task. Cancelling it
    /// suppresses a not-yet-started action; for a started action it is
    /// advisory only.
    pub cancel: CancellationToken,
}

/// Concurrent key → [`Pending`] map with per-key atomic swap semantics.
pub(crate) struct PendingMap<K>
where
    K: Eq + Hash,
{
    inner: DashMap<K, Pending>,
}

impl<K> PendingMap<K>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            inner: DashMap::new(),
        }
    }

    /// Atomically installs `entry` at `key` and returns whatever entry, if
    /// any, previously occupied that slot.
    pub fn replace(&self, key: K, entry: Pending) -> Option<Pending> {
        self.inner.insert(key, entry)
    }

    /// Removes the entry at `key` only if its submission id equals `id`.
    ///
    /// Returns `true` if an entry was removed. Stale ids (the entry was
    /// already replaced or removed) are a no-op.
    pub fn remove_if_current(&self, key: &K, id: u64) -> bool {
        self.inner.remove_if(key, |_, p| p.id == id).is_some()
    }

    /// Number of keys with a pending entry.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// True when no key has a pending entry.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending(id: u64) -> Pending {
        Pending {
            id,
            cancel: CancellationToken::new(),
        }
    }

    #[test]
    fn replace_returns_displaced_entry() {
        let map: PendingMap<&str> = PendingMap::new();

        assert!(map.replace("k", pending(1)).is_none());
        let prev = map.replace("k", pending(2)).expect("first entry displaced");
        assert_eq!(prev.id, 1);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn remove_if_current_ignores_stale_id() {
        let map: PendingMap<&str> = PendingMap::new();

        map.replace("k", pending(1));
        map.replace("k", pending(2));

        // The superseded task waking up must not evict the newer entry.
        assert!(!map.remove_if_current(&"k", 1));
        assert_eq!(map.len(), 1);

        assert!(map.remove_if_current(&"k", 2));
        assert!(map.is_empty());
    }

    #[test]
    fn remove_if_current_on_absent_key_is_noop() {
        let map: PendingMap<&str> = PendingMap::new();
        assert!(!map.remove_if_current(&"missing", 7));
    }

    #[test]
    fn keys_are_independent() {
        let map: PendingMap<String> = PendingMap::new();

        map.replace("a".into(), pending(1));
        map.replace("b".into(), pending(2));
        assert_eq!(map.len(), 2);

        assert!(map.remove_if_current(&"a".into(), 1));
        assert_eq!(map.len(), 1);
        assert!(map.remove_if_current(&"b".into(), 2));
        assert!(map.is_empty());
    }
}
