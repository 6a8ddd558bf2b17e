use async_trait::async_trait;
use redis::{Script, aio::ConnectionManager};

use crate::app_error::{AppError, AppResult};
use crate::infra::error::InfraError;

#[async_trait]
pub trait RateLimiterTrait: Send + Sync {
    /// Check the per-IP window, and the per-caller window when the request
    /// carries a verified identity. Ok(()) while within limits,
    /// Err(AppError::RateLimited) once exceeded.
    async fn check(&self, ip: &str, caller: Option<&str>) -> AppResult<()>;
}

/// Atomic increment with TTL. A fresh key gets the window TTL; a key that
/// somehow lost its TTL gets it re-armed instead of living forever.
const INCR_WITH_TTL_SCRIPT: &str = r#"
local current = redis.call('INCR', KEYS[1])
if current == 1 then
    redis.call('EXPIRE', KEYS[1], ARGV[1])
elseif redis.call('TTL', KEYS[1]) == -1 then
    redis.call('EXPIRE', KEYS[1], ARGV[1])
end
return current
"#;

/// Redis-backed fixed-window limiter.
#[derive(Clone)]
pub struct RedisRateLimiter {
    manager: ConnectionManager,
    window_secs: u64,
    max_per_ip: u64,
    max_per_caller: u64,
    script: Script,
}

impl RedisRateLimiter {
    pub async fn new(
        redis_url: &str,
        window_secs: u64,
        max_per_ip: u64,
        max_per_caller: u64,
    ) -> Result<Self, InfraError> {
        let client = redis::Client::open(redis_url).map_err(InfraError::RedisConnection)?;
        let manager = ConnectionManager::new(client)
            .await
            .map_err(InfraError::RedisConnection)?;
        let script = Script::new(INCR_WITH_TTL_SCRIPT);
        Ok(Self {
            manager,
            window_secs,
            max_per_ip,
            max_per_caller,
            script,
        })
    }

    async fn bump(&self, conn: &mut ConnectionManager, key: &str, limit: u64) -> AppResult<()> {
        let current: u64 = self
            .script
            .key(key)
            .arg(self.window_secs)
            .invoke_async(conn)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;

        if current > limit {
            return Err(AppError::RateLimited);
        }

        Ok(())
    }
}

#[async_trait]
impl RateLimiterTrait for RedisRateLimiter {
    async fn check(&self, ip: &str, caller: Option<&str>) -> AppResult<()> {
        let mut conn = self.manager.clone();
        self.bump(&mut conn, &format!("rl:ip:{ip}"), self.max_per_ip)
            .await?;

        if let Some(caller) = caller {
            self.bump(&mut conn, &format!("rl:caller:{caller}"), self.max_per_caller)
                .await?;
        }
        Ok(())
    }
}
