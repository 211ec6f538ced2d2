//! In-memory reply cache.

use std::collections::{HashMap, VecDeque};

use parking_lot::Mutex;
use tracing::debug;

#[derive(Debug, Default)]
struct Entries {
    replies: HashMap<String, String>,
    /// Insertion order, for eviction.
    order: VecDeque<String>,
}

/// Fingerprint to reply mapping, shared by every request task.
///
/// Unbounded unless a capacity is given, in which case the oldest entry is
/// evicted first. Writing an existing key overwrites the reply.
#[derive(Debug, Default)]
pub struct ReplyCache {
    entries: Mutex<Entries>,
    max_entries: Option<usize>,
}

impl ReplyCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A cache holding at most `max_entries` replies; `None` is unbounded.
    pub fn with_capacity(max_entries: Option<usize>) -> Self {
        Self {
            entries: Mutex::new(Entries::default()),
            max_entries: max_entries.filter(|&max| max > 0),
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().replies.get(key).cloned()
    }

    pub fn insert(&self, key: impl Into<String>, reply: impl Into<String>) {
        let key = key.into();
        let mut entries = self.entries.lock();
        if entries.replies.insert(key.clone(), reply.into()).is_none() {
            entries.order.push_back(key);
        }

        if let Some(max) = self.max_entries {
            while entries.order.len() > max {
                if let Some(oldest) = entries.order.pop_front() {
                    entries.replies.remove(&oldest);
                    debug!(key = %oldest, "Evicted cached reply");
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().replies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        let mut entries = self.entries.lock();
        entries.replies.clear();
        entries.order.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_overwrite() {
        let cache = ReplyCache::new();
        assert!(cache.get("k").is_none());
        cache.insert("k", "first");
        cache.insert("k", "second");
        assert_eq!(cache.get("k").as_deref(), Some("second"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_unbounded_by_default() {
        let cache = ReplyCache::new();
        for i in 0..500 {
            cache.insert(format!("k{}", i), "r");
        }
        assert_eq!(cache.len(), 500);
    }

    #[test]
    fn test_fifo_eviction() {
        let cache = ReplyCache::with_capacity(Some(2));
        cache.insert("a", "1");
        cache.insert("b", "2");
        cache.insert("a", "1b");
        cache.insert("c", "3");

        assert!(cache.get("a").is_none());
        assert_eq!(cache.get("b").as_deref(), Some("2"));
        assert_eq!(cache.get("c").as_deref(), Some("3"));
    }

    #[test]
    fn test_zero_capacity_is_unbounded() {
        let cache = ReplyCache::with_capacity(Some(0));
        cache.insert("a", "1");
        assert_eq!(cache.len(), 1);
        cache.clear();
        assert!(cache.is_empty());
    }
}
