use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, RedisError, Script};
use tracing::info;

use super::{vote_count, KeyValueStore, StoreError};

/// SADD the voter; only when it was new, HINCRBY the tally. Returns the new
/// count or -1 for a repeat voter.
const RECORD_VOTE_LUA: &str = r"
if redis.call('SADD', KEYS[1], ARGV[1]) == 1 then
    return redis.call('HINCRBY', KEYS[2], ARGV[2], 1)
end
return -1
";

impl From<RedisError> for StoreError {
    fn from(err: RedisError) -> Self {
        StoreError::Backend(err.to_string())
    }
}

/// Redis-backed store sharing one auto-reconnecting connection manager.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
    record_vote: Script,
}

impl RedisStore {
    pub async fn connect(redis_url: &str) -> Result<Self, StoreError> {
        let client = Client::open(redis_url)
            .map_err(|err| StoreError::Backend(format!("invalid REDIS_URL: {err}")))?;
        let conn = ConnectionManager::new(client).await?;
        info!(backend = "redis", "Connected to store");
        Ok(Self {
            conn,
            record_vote: Script::new(RECORD_VOTE_LUA),
        })
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        let _: () = conn.set(key, value).await?;
        Ok(())
    }

    async fn set_many(&self, entries: &[(String, String)]) -> Result<(), StoreError> {
        if entries.is_empty() {
            return Ok(());
        }
        let mut conn = self.conn.clone();
        let mut pipe = redis::pipe();
        pipe.atomic();
        for (key, value) in entries {
            pipe.set(key, value).ignore();
        }
        let _: () = pipe.query_async(&mut conn).await?;
        Ok(())
    }

    async fn delete(&self, keys: &[String]) -> Result<(), StoreError> {
        if keys.is_empty() {
            return Ok(());
        }
        let mut conn = self.conn.clone();
        let _: () = conn.del(keys).await?;
        Ok(())
    }

    async fn hash_increment(&self, hash_key: &str, field: &str) -> Result<i64, StoreError> {
        let mut conn = self.conn.clone();
        let count: i64 = conn.hincr(hash_key, field, 1).await?;
        Ok(count)
    }

    async fn hash_entries(&self, hash_key: &str) -> Result<BTreeMap<String, u32>, StoreError> {
        let mut conn = self.conn.clone();
        let raw: HashMap<String, i64> = conn.hgetall(hash_key).await?;
        raw.into_iter()
            .map(|(field, count)| {
                let votes = vote_count(hash_key, &field, count)?;
                Ok((field, votes))
            })
            .collect()
    }

    async fn add_member(&self, set_key: &str, member: &str) -> Result<bool, StoreError> {
        let mut conn = self.conn.clone();
        let added: i64 = conn.sadd(set_key, member).await?;
        Ok(added == 1)
    }

    async fn is_member(&self, set_key: &str, member: &str) -> Result<bool, StoreError> {
        let mut conn = self.conn.clone();
        let present: bool = conn.sismember(set_key, member).await?;
        Ok(present)
    }

    async fn record_vote(
        &self,
        voters_key: &str,
        member: &str,
        tally_key: &str,
        field: &str,
    ) -> Result<Option<i64>, StoreError> {
        let mut conn = self.conn.clone();
        let mut invocation = self.record_vote.key(voters_key);
        invocation.key(tally_key).arg(member).arg(field);
        let count: i64 = invocation.invoke_async(&mut conn).await?;
        Ok((count >= 0).then_some(count))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}
