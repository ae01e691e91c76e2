use redis::{aio::ConnectionManager, AsyncCommands, Client};

use crate::{error::AppResult, services::request_counter::RequestCounter};

/// Redis key holding the process-wide request count
pub const REQUEST_COUNT_KEY: &str = "request_count";

/// Creates a Redis client
pub fn create_redis_client(redis_url: &str) -> anyhow::Result<Client> {
    let client = Client::open(redis_url)?;
    Ok(client)
}

/// [`RequestCounter`] stored under a single Redis key.
///
/// `INCR` is atomic on the server and treats a missing key as 0, so
/// increments from several processes sharing the key are not lost. A reset is
/// a plain `SET` and races freely with in-flight increments.
#[derive(Clone)]
pub struct RedisCounter {
    conn: ConnectionManager,
    key: String,
}

impl RedisCounter {
    /// Connects to Redis, reconnecting automatically on failure
    pub async fn connect(client: Client) -> AppResult<Self> {
        Self::with_key(client, REQUEST_COUNT_KEY).await
    }

    pub async fn with_key(client: Client, key: &str) -> AppResult<Self> {
        let conn = ConnectionManager::new(client).await?;
        Ok(Self {
            conn,
            key: key.to_string(),
        })
    }
}

#[async_trait::async_trait]
impl RequestCounter for RedisCounter {
    async fn increment(&self) -> AppResult<u64> {
        let mut conn = self.conn.clone();
        let value: u64 = conn.incr(&self.key, 1).await?;
        Ok(value)
    }

    async fn read(&self) -> AppResult<u64> {
        let mut conn = self.conn.clone();
        let value: Option<u64> = conn.get(&self.key).await?;
        Ok(value.unwrap_or(0))
    }

    async fn reset(&self) -> AppResult<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.set(&self.key, 0).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_counter() -> RedisCounter {
        let redis_url =
            std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());

        let client = create_redis_client(&redis_url).unwrap();
        let key = format!("request_count_test:{}", uuid::Uuid::new_v4());
        RedisCounter::with_key(client, &key).await.unwrap()
    }

    #[tokio::test]
    #[ignore = "requires a running Redis instance"]
    async fn test_missing_key_reads_zero() {
        let counter = test_counter().await;
        assert_eq!(counter.read().await.unwrap(), 0);
    }

    #[tokio::test]
    #[ignore = "requires a running Redis instance"]
    async fn test_increment_then_reset() {
        let counter = test_counter().await;

        counter.increment().await.unwrap();
        counter.increment().await.unwrap();
        assert_eq!(counter.read().await.unwrap(), 2);

        counter.reset().await.unwrap();
        assert_eq!(counter.read().await.unwrap(), 0);

        let mut conn = counter.conn.clone();
        let _: () = conn.del(&counter.key).await.unwrap();
    }
}
