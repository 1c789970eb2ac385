use std::num::NonZeroUsize;

use lru::LruCache;

pub const DEFAULT_PROCESSED_EVENT_CAPACITY: usize = 1024;

/// Bounded, insertion-ordered set of recently seen event ids.
///
/// Only suppresses duplicate deliveries; once an id is evicted the same event
/// would be processed again. Lookups go through `contains`, which leaves the
/// recency order alone, so eviction is oldest-inserted first.
#[derive(Debug)]
pub struct ProcessedEventCache {
    seen: LruCache<String, ()>,
}

impl ProcessedEventCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            seen: LruCache::new(capacity),
        }
    }

    pub fn contains(&self, event_id: &str) -> bool {
        self.seen.contains(event_id)
    }

    /// Records `event_id`. Returns `false` when it was already present.
    pub fn check_and_insert(&mut self, event_id: &str) -> bool {
        if self.seen.contains(event_id) {
            return false;
        }
        self.seen.put(event_id.to_string(), ());
        true
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.seen.cap().get()
    }
}

impl Default for ProcessedEventCache {
    fn default() -> Self {
        Self::new(DEFAULT_PROCESSED_EVENT_CAPACITY)
    }
}
