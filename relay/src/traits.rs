//! Service trait definitions for dependency injection

use async_trait::async_trait;

use shared::{ResultDraft, ResultId, ResultRecord};

use crate::error::RelayResult;

/// Document store holding the authoritative results collection
#[mockall::automock]
#[async_trait]
pub trait ResultRepository: Send + Sync {
    /// All records in insertion order
    async fn list(&self) -> RelayResult<Vec<ResultRecord>>;

    /// Store a new record under a fresh id
    async fn insert(&self, draft: ResultDraft) -> RelayResult<ResultRecord>;

    /// Replace an existing record wholesale; `None` when the id is unknown
    async fn replace(&self, id: &ResultId, draft: ResultDraft) -> RelayResult<Option<ResultRecord>>;

    /// Delete a record; `false` when the id is unknown
    async fn delete(&self, id: &ResultId) -> RelayResult<bool>;
}
