use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, Transaction, migrate::Migrator};

use crate::cache::CacheService;

/// Ledger schema shipped with this crate, applied by the worker at startup.
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Storage handle shared by the block handlers and the event worker.
///
/// Cloning is cheap: the pool and the cache backend are reference counted.
#[derive(Clone, Debug)]
pub struct Database {
    pool: PgPool,
    cache: CacheService,
}

impl Database {
    /// Wrap a pool with caching disabled.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            cache: CacheService::disabled("ludifica:prod"),
        }
    }

    /// Wrap a pool together with an already configured cache service.
    pub fn with_cache(pool: PgPool, cache: CacheService) -> Self {
        Self { pool, cache }
    }

    /// Open a Postgres pool for `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect(database_url)
            .await?;

        Ok(pool)
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn cache(&self) -> &CacheService {
        &self.cache
    }

    /// Start a transaction for ledger mutations that must move together.
    pub async fn begin(&self) -> anyhow::Result<Transaction<'static, Postgres>> {
        Ok(self.pool.begin().await?)
    }
}
