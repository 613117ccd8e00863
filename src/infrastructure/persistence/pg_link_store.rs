//! PostgreSQL implementation of the link store.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::NewLink;
use crate::domain::errors::StoreError;
use crate::domain::repositories::LinkStore;
use crate::utils::db_error::is_unique_violation_on_code;

/// PostgreSQL store for mappings.
///
/// Uniqueness is enforced by the `shortened_urls_domain_code_key` constraint,
/// so concurrent inserts of the same pair are serialized by the database.
pub struct PgLinkStore {
    pool: Arc<PgPool>,
}

impl PgLinkStore {
    /// Creates a new store with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Opens a connection pool and verifies it with a round trip.
    ///
    /// The caller is expected to bound this with its own startup timeout.
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .connect(database_url)
            .await?;

        sqlx::query("SELECT 1").execute(&pool).await?;

        Ok(Self::new(Arc::new(pool)))
    }

    /// Creates the `shortened_urls` table if it does not exist.
    pub async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS shortened_urls (
                id BIGSERIAL PRIMARY KEY,
                domain VARCHAR(255) NOT NULL,
                code VARCHAR(9) NOT NULL,
                original_url TEXT NOT NULL,
                CONSTRAINT shortened_urls_domain_code_key UNIQUE (domain, code)
            )
            "#,
        )
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    /// Counts all stored mappings.
    pub async fn count(&self) -> Result<i64, StoreError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM shortened_urls")
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(unavailable)
    }

    /// Mapping counts per domain, largest first.
    pub async fn count_by_domain(&self, limit: i64) -> Result<Vec<(String, i64)>, StoreError> {
        sqlx::query_as::<_, (String, i64)>(
            r#"
            SELECT domain, COUNT(*)
            FROM shortened_urls
            GROUP BY domain
            ORDER BY COUNT(*) DESC, domain
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await
        .map_err(unavailable)
    }

    pub fn pool(&self) -> &PgPool {
        self.pool.as_ref()
    }
}

#[async_trait]
impl LinkStore for PgLinkStore {
    async fn insert_unique(&self, new_link: &NewLink) -> Result<(), StoreError> {
        let result = sqlx::query(
            "INSERT INTO shortened_urls (domain, code, original_url) VALUES ($1, $2, $3)",
        )
        .bind(&new_link.domain)
        .bind(&new_link.code)
        .bind(&new_link.original_url)
        .execute(self.pool.as_ref())
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation_on_code(&e) => Err(StoreError::Collision),
            Err(e) => Err(unavailable(e)),
        }
    }

    async fn find(&self, domain: &str, code: &str) -> Result<Option<String>, StoreError> {
        sqlx::query_scalar::<_, String>(
            "SELECT original_url FROM shortened_urls WHERE domain = $1 AND code = $2",
        )
        .bind(domain)
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(unavailable)
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .is_ok()
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}

fn unavailable(e: sqlx::Error) -> StoreError {
    StoreError::Unavailable(e.to_string())
}
