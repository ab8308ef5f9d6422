//! Store connectivity probe.

use async_trait::async_trait;

use taskhub_core::result::AppResult;

/// Reports whether the backing store is reachable.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn ping(&self) -> AppResult<()>;
}
