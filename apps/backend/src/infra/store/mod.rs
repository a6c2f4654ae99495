//! Persistence substrate for game and round state.
//!
//! The game flow service talks to storage only through [`KeyValueStore`], a
//! Redis-shaped surface: plain string keys, counter hashes and membership
//! sets. [`RedisStore`] is the production backend; [`MemoryStore`] serves
//! local runs without Redis and the test suite.

use std::collections::BTreeMap;

use async_trait::async_trait;
use thiserror::Error;

use crate::errors::domain::DomainError;

mod memory;
mod redis_store;

pub use self::memory::MemoryStore;
pub use self::redis_store::RedisStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store backend error: {0}")]
    Backend(String),
    #[error("malformed value under '{key}': {detail}")]
    Malformed { key: String, detail: String },
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Backend(detail) => DomainError::store_unavailable(detail),
            err @ StoreError::Malformed { .. } => DomainError::data_corruption(err.to_string()),
        }
    }
}

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Write every entry or none of them.
    async fn set_many(&self, entries: &[(String, String)]) -> Result<(), StoreError>;

    async fn delete(&self, keys: &[String]) -> Result<(), StoreError>;

    /// Atomically add one to `field` of `hash_key`, returning the new count.
    ///
    /// Votes never go through this directly; see [`KeyValueStore::record_vote`].
    async fn hash_increment(&self, hash_key: &str, field: &str) -> Result<i64, StoreError>;

    async fn hash_entries(&self, hash_key: &str) -> Result<BTreeMap<String, u32>, StoreError>;

    /// Atomic test-and-add. `true` when `member` was not yet present.
    /// Production votes use `record_vote`, which pairs this with the increment.
    async fn add_member(&self, set_key: &str, member: &str) -> Result<bool, StoreError>;

    async fn is_member(&self, set_key: &str, member: &str) -> Result<bool, StoreError>;

    /// Add `member` to `voters_key` and, only if it was absent, increment
    /// `field` of `tally_key`, as one indivisible step.
    ///
    /// Returns the new count, or `None` when `member` was already present.
    async fn record_vote(
        &self,
        voters_key: &str,
        member: &str,
        tally_key: &str,
        field: &str,
    ) -> Result<Option<i64>, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;

    fn backend_name(&self) -> &'static str;
}

/// Narrow a stored counter to a vote count.
pub(crate) fn vote_count(key: &str, field: &str, raw: i64) -> Result<u32, StoreError> {
    u32::try_from(raw).map_err(|_| StoreError::Malformed {
        key: key.to_string(),
        detail: format!("count {raw} for '{field}' out of range"),
    })
}
