//! In-memory document store

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use shared::{ResultDraft, ResultId, ResultRecord};

use crate::error::RelayResult;
use crate::traits::ResultRepository;

/// Real in-memory implementation of `ResultRepository`
#[derive(Clone, Default)]
pub struct RealResultRepository {
    records: Arc<RwLock<Vec<ResultRecord>>>,
}

impl RealResultRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository preloaded with existing records
    pub fn with_records(records: Vec<ResultRecord>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }

    fn next_id() -> ResultId {
        ResultId::new(Uuid::new_v4().simple().to_string())
    }
}

#[async_trait]
impl ResultRepository for RealResultRepository {
    async fn list(&self) -> RelayResult<Vec<ResultRecord>> {
        Ok(self.records.read().await.clone())
    }

    async fn insert(&self, draft: ResultDraft) -> RelayResult<ResultRecord> {
        draft.validate()?;
        let record = draft.into_record(Self::next_id());
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn replace(&self, id: &ResultId, draft: ResultDraft) -> RelayResult<Option<ResultRecord>> {
        draft.validate()?;
        let mut records = self.records.write().await;
        let Some(slot) = records.iter_mut().find(|record| &record.id == id) else {
            return Ok(None);
        };

        *slot = draft.into_record(id.clone());
        Ok(Some(slot.clone()))
    }

    async fn delete(&self, id: &ResultId) -> RelayResult<bool> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|record| &record.id != id);
        Ok(records.len() != before)
    }
}
