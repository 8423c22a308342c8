pub mod catalog;
pub mod postgres;
pub mod redis;
pub mod summary_store;

pub use catalog::CatalogStore;
pub use postgres::{create_pool, PgCatalogStore, PgSummaryStore};
pub use self::redis::{create_redis_client, Cache, CacheWriterHandle, RedisSummaryStore};
pub use summary_store::{MemorySummaryStore, SummaryStore};
