use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{vote_count, KeyValueStore, StoreError};

#[derive(Default)]
struct Inner {
    strings: HashMap<String, String>,
    hashes: HashMap<String, BTreeMap<String, i64>>,
    sets: HashMap<String, HashSet<String>>,
}

/// In-process store. Every operation runs under one mutex, so compound
/// operations are trivially atomic.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every mutating call fail with a backend error until reset.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Make every read fail with a backend error until reset.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    fn check_write(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("memory store: writes disabled".into()));
        }
        Ok(())
    }

    fn check_read(&self) -> Result<(), StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("memory store: reads disabled".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.check_read()?;
        Ok(self.inner.lock().strings.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.check_write()?;
        self.inner
            .lock()
            .strings
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn set_many(&self, entries: &[(String, String)]) -> Result<(), StoreError> {
        self.check_write()?;
        let mut inner = self.inner.lock();
        for (key, value) in entries {
            inner.strings.insert(key.clone(), value.clone());
        }
        Ok(())
    }

    async fn delete(&self, keys: &[String]) -> Result<(), StoreError> {
        self.check_write()?;
        let mut inner = self.inner.lock();
        for key in keys {
            inner.strings.remove(key);
            inner.hashes.remove(key);
            inner.sets.remove(key);
        }
        Ok(())
    }

    async fn hash_increment(&self, hash_key: &str, field: &str) -> Result<i64, StoreError> {
        self.check_write()?;
        let mut inner = self.inner.lock();
        let count = inner
            .hashes
            .entry(hash_key.to_string())
            .or_default()
            .entry(field.to_string())
            .or_insert(0);
        *count += 1;
        Ok(*count)
    }

    async fn hash_entries(&self, hash_key: &str) -> Result<BTreeMap<String, u32>, StoreError> {
        self.check_read()?;
        let inner = self.inner.lock();
        let Some(hash) = inner.hashes.get(hash_key) else {
            return Ok(BTreeMap::new());
        };
        hash.iter()
            .map(|(field, raw)| Ok((field.clone(), vote_count(hash_key, field, *raw)?)))
            .collect()
    }

    async fn add_member(&self, set_key: &str, member: &str) -> Result<bool, StoreError> {
        self.check_write()?;
        Ok(self
            .inner
            .lock()
            .sets
            .entry(set_key.to_string())
            .or_default()
            .insert(member.to_string()))
    }

    async fn is_member(&self, set_key: &str, member: &str) -> Result<bool, StoreError> {
        self.check_read()?;
        Ok(self
            .inner
            .lock()
            .sets
            .get(set_key)
            .is_some_and(|set| set.contains(member)))
    }

    async fn record_vote(
        &self,
        voters_key: &str,
        member: &str,
        tally_key: &str,
        field: &str,
    ) -> Result<Option<i64>, StoreError> {
        self.check_write()?;
        let mut inner = self.inner.lock();
        let added = inner
            .sets
            .entry(voters_key.to_string())
            .or_default()
            .insert(member.to_string());
        if !added {
            return Ok(None);
        }
        let count = inner
            .hashes
            .entry(tally_key.to_string())
            .or_default()
            .entry(field.to_string())
            .or_insert(0);
        *count += 1;
        Ok(Some(*count))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_read()
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[tokio::test]
    async fn strings_round_trip_and_delete() {
        let store = MemoryStore::new();
        assert_eq!(store.get("fen").await.unwrap(), None);
        store.set("fen", "x").await.unwrap();
        store
            .set_many(&[
                ("current_round".into(), "3".into()),
                ("window_start".into(), "1000".into()),
            ])
            .await
            .unwrap();
        assert_eq!(store.get("fen").await.unwrap().as_deref(), Some("x"));
        assert_eq!(store.get("current_round").await.unwrap().as_deref(), Some("3"));

        store.delete(&["fen".to_string()]).await.unwrap();
        assert_eq!(store.get("fen").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_membership_is_test_and_add() {
        let store = MemoryStore::new();
        assert!(store.add_member("voters", "a").await.unwrap());
        assert!(!store.add_member("voters", "a").await.unwrap());
        assert!(store.is_member("voters", "a").await.unwrap());
        assert!(!store.is_member("voters", "b").await.unwrap());
    }

    #[tokio::test]
    async fn record_vote_counts_each_member_once() {
        let store = MemoryStore::new();
        assert_eq!(
            store.record_vote("v", "alice", "t", "e2e4").await.unwrap(),
            Some(1)
        );
        assert_eq!(
            store.record_vote("v", "bob", "t", "e2e4").await.unwrap(),
            Some(2)
        );
        assert_eq!(store.record_vote("v", "alice", "t", "d2d4").await.unwrap(), None);

        let tally = store.hash_entries("t").await.unwrap();
        assert_eq!(tally.get("e2e4"), Some(&2));
        assert_eq!(tally.get("d2d4"), None);
    }

    #[tokio::test]
    async fn concurrent_record_vote_admits_one() {
        let store = Arc::new(MemoryStore::new());
        let handles: Vec<_> = (0..32)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.record_vote("v", "same", "t", "e2e4").await })
            })
            .collect();

        let mut admitted = 0;
        for handle in handles {
            if handle.await.unwrap().unwrap().is_some() {
                admitted += 1;
            }
        }
        assert_eq!(admitted, 1);
        assert_eq!(store.hash_entries("t").await.unwrap().get("e2e4"), Some(&1));
    }

    #[tokio::test]
    async fn injected_failures_surface_as_backend_errors() {
        let store = MemoryStore::new();
        store.fail_writes(true);
        assert!(matches!(
            store.set("k", "v").await,
            Err(StoreError::Backend(_))
        ));
        assert!(store.record_vote("v", "a", "t", "e2e4").await.is_err());
        store.fail_writes(false);
        store.set("k", "v").await.unwrap();

        store.fail_reads(true);
        assert!(store.ping().await.is_err());
    }

    #[tokio::test]
    async fn hash_increment_accumulates() {
        let store = MemoryStore::new();
        assert_eq!(store.hash_increment("t", "e2e4").await.unwrap(), 1);
        assert_eq!(store.hash_increment("t", "e2e4").await.unwrap(), 2);
        assert_eq!(store.hash_increment("t", "g1f3").await.unwrap(), 1);
        let tally = store.hash_entries("t").await.unwrap();
        assert_eq!(tally.values().sum::<u32>(), 3);
    }
}
