//! PostgreSQL repository implementations.

pub mod audit;
pub mod project;
pub mod task;
pub mod tenant;
pub mod user;

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use taskhub_core::error::{AppError, ErrorKind};
use taskhub_core::result::AppResult;

use crate::repositories::HealthProbe;

pub use audit::PgAuditLogRepository;
pub use project::PgProjectRepository;
pub use task::PgTaskRepository;
pub use tenant::PgTenantRepository;
pub use user::PgUserRepository;

/// Open a read-only REPEATABLE READ transaction so a list page and its
/// total count observe the same snapshot.
pub(crate) async fn snapshot(pool: &PgPool) -> AppResult<Transaction<'static, Postgres>> {
    let mut tx = pool.begin().await.map_err(|e| {
        AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
    })?;
    sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to set isolation level", e)
        })?;
    Ok(tx)
}

/// `%term%` for ILIKE, or `None` when no search was given. Wildcards in
/// the term match literally, using the default `\` escape.
pub(crate) fn like_pattern(search: Option<&str>) -> Option<String> {
    search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            let escaped = s
                .replace('\\', "\\\\")
                .replace('%', "\\%")
                .replace('_', "\\_");
            format!("%{escaped}%")
        })
}

/// Connectivity check backed by `SELECT 1`.
#[derive(Debug, Clone)]
pub struct PgHealthProbe {
    pool: PgPool,
}

impl PgHealthProbe {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HealthProbe for PgHealthProbe {
    async fn ping(&self) -> AppResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern() {
        assert_eq!(like_pattern(Some("acme")), Some("%acme%".to_string()));
        assert_eq!(like_pattern(Some("  ")), None);
        assert_eq!(like_pattern(None), None);
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern(Some("50%")), Some(r"%50\%%".to_string()));
        assert_eq!(like_pattern(Some("a_b")), Some(r"%a\_b%".to_string()));
        assert_eq!(like_pattern(Some(r"c:\x")), Some(r"%c:\\x%".to_string()));
    }
}
