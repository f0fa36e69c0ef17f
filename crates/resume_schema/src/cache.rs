use std::hash::Hash;
use std::num::NonZeroUsize;

use lru::LruCache;

/// Capacity-bounded least-recently-used cache. `get` and `set` are O(1).
pub struct BoundedCache<K: Hash + Eq, V> {
    inner: LruCache<K, V>,
}

impl<K: Hash + Eq, V> BoundedCache<K, V> {
    /// Returns `None` for a zero capacity.
    pub fn new(capacity: usize) -> Option<Self> {
        NonZeroUsize::new(capacity).map(|cap| Self {
            inner: LruCache::new(cap),
        })
    }

    /// Looks up `key`, marking it most recently used.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        self.inner.get(key)
    }

    /// Inserts or replaces `key`. Inserting a new key at capacity evicts the
    /// least recently used entry, which is returned.
    pub fn set(&mut self, key: K, value: V) -> Option<(K, V)> {
        match self.inner.push(key, value) {
            // `push` also hands back the old pair when the key was already present.
            Some((evicted, old)) if !self.inner.contains(&evicted) => Some((evicted, old)),
            _ => None,
        }
    }

    /// Checks membership without touching recency.
    pub fn contains(&self, key: &K) -> bool {
        self.inner.contains(key)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.cap().get()
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(BoundedCache::<String, u32>::new(0).is_none());
    }

    #[test]
    fn test_evicts_least_recently_inserted() {
        let mut cache = BoundedCache::new(2).unwrap();
        cache.set("a", 1);
        cache.set("b", 2);
        let evicted = cache.set("c", 3);
        assert_eq!(evicted, Some(("a", 1)));
        assert_eq!(cache.get(&"a"), None);
        assert_eq!(cache.get(&"b"), Some(&2));
        assert_eq!(cache.get(&"c"), Some(&3));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_get_refreshes_recency() {
        let mut cache = BoundedCache::new(3).unwrap();
        cache.set(1, "one");
        cache.set(2, "two");
        cache.set(3, "three");
        assert_eq!(cache.get(&1), Some(&"one"));

        cache.set(4, "four");
        assert!(!cache.contains(&2), "2 was least recently accessed");
        assert!(cache.contains(&1));
        assert!(cache.contains(&3));
        assert!(cache.contains(&4));
    }

    #[test]
    fn test_overwrite_does_not_evict() {
        let mut cache = BoundedCache::new(2).unwrap();
        cache.set("a", 1);
        cache.set("b", 2);
        assert_eq!(cache.set("a", 10), None);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&"a"), Some(&10));
        assert_eq!(cache.get(&"b"), Some(&2));
    }

    #[test]
    fn test_clear_empties_cache() {
        let mut cache = BoundedCache::new(2).unwrap();
        cache.set("a", 1);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.capacity(), 2);
    }
}
