// Copyright 2025 the Spanline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

/// A lookup key is distinct from the ID type. This allows the lookup key
/// to not require ownership of the underlying ID data, which could require
/// allocations.
pub(crate) trait LookupKey<ID> {
    fn eq(&self, other: &ID) -> bool;
    fn to_id(self) -> ID;
}

/// An entry in the cache.
struct Entry<ID, T> {
    epoch: u64,
    id: ID,
    data: T,
}

/// A least-recently-used cache. This cache uses a linear scan of its entries
/// to find a given entry - it is optimised for a low number of entries. Preferably
/// keep `max_entries` low in the order of tens.
pub(crate) struct LruCache<ID, T> {
    entries: Vec<Entry<ID, T>>,
    epoch: u64,
    max_entries: usize,
}

impl<ID, T> LruCache<ID, T> {
    pub(crate) fn new(max_entries: usize) -> Self {
        debug_assert!(max_entries > 0, "an LRU cache needs room for one entry");
        Self {
            entries: Vec::new(),
            epoch: 0,
            max_entries,
        }
    }

    /// Returns a reference to the entry with the given ID. If the entry is not
    /// found, it is created with `make_data`. Nothing is stored if `make_data` fails.
    pub(crate) fn try_entry<E>(
        &mut self,
        id: impl LookupKey<ID>,
        make_data: impl FnOnce() -> Result<T, E>,
    ) -> Result<&T, E> {
        self.epoch += 1;
        let epoch = self.epoch;
        if let Some(index) = self.entries.iter().position(|entry| id.eq(&entry.id)) {
            let entry = &mut self.entries[index];
            entry.epoch = epoch;
            return Ok(&entry.data);
        }
        let data = make_data()?;
        let index = if self.entries.len() < self.max_entries {
            self.entries.push(Entry {
                epoch,
                id: id.to_id(),
                data,
            });
            self.entries.len() - 1
        } else {
            let (index, _) = self
                .entries
                .iter()
                .enumerate()
                .min_by_key(|(_, entry)| entry.epoch)
                .expect("cache is full, so it has entries");
            self.entries[index] = Entry {
                epoch,
                id: id.to_id(),
                data,
            };
            index
        };
        Ok(&self.entries[index].data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::{String, ToString};

    // Simple ID type for testing
    #[derive(Debug, Clone, PartialEq)]
    struct TestId(String);

    // LookupKey implementation that allows &str to lookup TestId
    struct TestLookupKey<'a>(&'a str);

    impl LookupKey<TestId> for TestLookupKey<'_> {
        fn eq(&self, other: &TestId) -> bool {
            self.0 == other.0.as_str()
        }

        fn to_id(self) -> TestId {
            TestId(self.0.to_string())
        }
    }

    fn ok(value: i32) -> impl FnOnce() -> Result<i32, ()> {
        move || Ok(value)
    }

    #[test]
    fn retrieve_existing_entry() {
        let mut cache = LruCache::new(3);

        let value1 = *cache.try_entry(TestLookupKey("key1"), ok(42)).unwrap();
        assert_eq!(value1, 42);

        // Retrieve the same entry - make_data should not be called
        let value2 = *cache
            .try_entry(TestLookupKey("key1"), || -> Result<i32, ()> {
                panic!("Should not create new data")
            })
            .unwrap();
        assert_eq!(value2, 42);
        assert_eq!(cache.entries.len(), 1);
    }

    #[test]
    fn failures_are_not_stored() {
        let mut cache = LruCache::<TestId, i32>::new(3);
        assert!(cache.try_entry(TestLookupKey("key1"), || Err(())).is_err());
        assert!(cache.entries.is_empty());
        assert_eq!(*cache.try_entry(TestLookupKey("key1"), ok(1)).unwrap(), 1);
    }

    #[test]
    fn lru_eviction() {
        let mut cache = LruCache::new(3);

        // Add three entries
        cache.try_entry(TestLookupKey("key1"), ok(1)).unwrap();
        cache.try_entry(TestLookupKey("key2"), ok(2)).unwrap();
        cache.try_entry(TestLookupKey("key3"), ok(3)).unwrap();

        // Access key1 to update its epoch
        cache
            .try_entry(TestLookupKey("key1"), || -> Result<i32, ()> {
                panic!("Should not create")
            })
            .unwrap();

        // Add key4 - should evict key2 (oldest untouched)
        cache.try_entry(TestLookupKey("key4"), ok(4)).unwrap();

        let value1 = *cache
            .try_entry(TestLookupKey("key1"), || -> Result<i32, ()> {
                panic!("key1 should still be present")
            })
            .unwrap();
        assert_eq!(value1, 1);

        // Verify key2 was evicted
        let mut was_created = false;
        cache
            .try_entry(TestLookupKey("key2"), || {
                was_created = true;
                Ok::<_, ()>(20)
            })
            .unwrap();
        assert!(was_created, "key2 should have been evicted");
    }
}
