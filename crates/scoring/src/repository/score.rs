use std::sync::RwLock;

use uuid::Uuid;

use crate::error::{Result, ScoringError};
use crate::models::{ScoreKey, ScoreRecord};

/// Persistence contract used around score calculation.
///
/// `upsert` replaces any record stored under the same [`ScoreKey`]; a
/// resubmission never produces a second record.
pub trait ScoreStore: Send + Sync {
    fn find_by_key(&self, key: &ScoreKey) -> Result<Option<ScoreRecord>>;

    fn upsert(&self, record: ScoreRecord) -> Result<ScoreRecord>;

    fn list_for_event(&self, event_id: Uuid) -> Result<Vec<ScoreRecord>>;
}

/// Score store kept in memory, in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryScoreStore {
    records: RwLock<Vec<ScoreRecord>>,
}

impl InMemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads existing records; later duplicates of a key replace earlier ones.
    pub fn from_records(records: Vec<ScoreRecord>) -> Result<Self> {
        let store = Self::new();
        for record in records {
            store.upsert(record)?;
        }
        Ok(store)
    }

    pub fn snapshot(&self) -> Result<Vec<ScoreRecord>> {
        Ok(self.read()?.clone())
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Vec<ScoreRecord>>> {
        self.records
            .read()
            .map_err(|_| ScoringError::Storage("score store lock poisoned".to_string()))
    }
}

impl ScoreStore for InMemoryScoreStore {
    fn find_by_key(&self, key: &ScoreKey) -> Result<Option<ScoreRecord>> {
        Ok(self
            .read()?
            .iter()
            .find(|record| record.key == *key)
            .cloned())
    }

    fn upsert(&self, record: ScoreRecord) -> Result<ScoreRecord> {
        let mut records = self
            .records
            .write()
            .map_err(|_| ScoringError::Storage("score store lock poisoned".to_string()))?;

        match records.iter_mut().find(|existing| existing.key == record.key) {
            Some(existing) => *existing = record.clone(),
            None => records.push(record.clone()),
        }

        Ok(record)
    }

    fn list_for_event(&self, event_id: Uuid) -> Result<Vec<ScoreRecord>> {
        Ok(self
            .read()?
            .iter()
            .filter(|record| record.key.event_id == event_id)
            .cloned()
            .collect())
    }
}
