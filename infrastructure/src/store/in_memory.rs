//! In-memory document store with optional JSON snapshot persistence.

use super::ids::IdGenerator;
use async_trait::async_trait;
use catalog_application::ports::document_store::{DocumentStore, StoreError};
use catalog_domain::{
    AggregateGroup, CatalogAggregation, NewQuestion, Question, QuestionChanges, QuestionId,
    QuestionPredicate, UpdateResult,
};
use chrono::Utc;
use std::collections::HashSet;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{OwnedRwLockWriteGuard, RwLock};
use tracing::{debug, info};

/// Question collection held in memory, in insertion order.
///
/// Each operation takes the collection lock once, so single-document
/// operations are atomic. When a snapshot file is configured, every mutation
/// is applied to a copy, written out, and only then made visible; a failed
/// write leaves the collection unchanged. The operation timeout bounds reads
/// and the wait for the write lock, never a snapshot write in progress.
pub struct InMemoryDocumentStore {
    records: Arc<RwLock<Vec<Question>>>,
    ids: IdGenerator,
    snapshot: Option<PathBuf>,
    operation_timeout: Option<Duration>,
}

impl InMemoryDocumentStore {
    /// Empty, memory-only store.
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
            ids: IdGenerator::new(),
            snapshot: None,
            operation_timeout: None,
        }
    }

    /// Store persisted to `path`. Existing records are loaded if the file exists.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let records = load_snapshot(&path).await?;
        info!(
            "Opened question store {} ({} records)",
            path.display(),
            records.len()
        );

        Ok(Self {
            records: Arc::new(RwLock::new(records)),
            ids: IdGenerator::new(),
            snapshot: Some(path),
            operation_timeout: None,
        })
    }

    /// Fail operations that take longer than `timeout` with [`StoreError::Timeout`].
    pub fn with_operation_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.operation_timeout = timeout;
        self
    }

    pub fn snapshot_path(&self) -> Option<&Path> {
        self.snapshot.as_deref()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Bound a read by the operation timeout.
    async fn timed<T, F>(&self, op: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>> + Send,
    {
        match self.operation_timeout {
            Some(limit) => tokio::time::timeout(limit, op)
                .await
                .map_err(|_| StoreError::Timeout(limit))?,
            None => op.await,
        }
    }

    /// Take the write lock. Only the wait is bounded by the operation timeout.
    async fn write_lock(&self) -> Result<OwnedRwLockWriteGuard<Vec<Question>>, StoreError> {
        let lock = Arc::clone(&self.records).write_owned();
        match self.operation_timeout {
            Some(limit) => tokio::time::timeout(limit, lock)
                .await
                .map_err(|_| StoreError::Timeout(limit)),
            None => Ok(lock.await),
        }
    }

    /// Apply a mutation under the write lock.
    ///
    /// `apply` returns its result and whether anything changed; unchanged
    /// collections are not rewritten to the snapshot. Once the lock is held,
    /// persisting and swapping run in their own task and always complete, so
    /// the caller either sees an error and an unchanged collection or the
    /// change in both memory and the snapshot.
    async fn mutate<T, F>(&self, apply: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut Vec<Question>) -> (T, bool) + Send,
        T: Send,
    {
        let mut records = self.write_lock().await?;
        let Some(path) = self.snapshot.clone() else {
            return Ok(apply(&mut records).0);
        };

        let mut next = records.clone();
        let (result, dirty) = apply(&mut next);
        if dirty {
            tokio::spawn(async move {
                write_snapshot(&path, &next).await?;
                *records = next;
                Ok::<_, StoreError>(())
            })
            .await
            .map_err(|e| StoreError::Persistence(format!("snapshot task failed: {}", e)))??;
        }
        Ok(result)
    }

    fn fresh_id(&self, records: &[Question]) -> QuestionId {
        let mut id = self.ids.next_id();
        while records.iter().any(|q| q.id == id) {
            id = self.ids.next_id();
        }
        id
    }
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn insert_one(&self, question: NewQuestion) -> Result<Question, StoreError> {
        self.mutate(|records| {
            let created = Question::from_new(self.fresh_id(records), question, Utc::now());
            records.push(created.clone());
            (created, true)
        })
        .await
    }

    async fn insert_many(&self, questions: Vec<NewQuestion>) -> Vec<Result<Question, StoreError>> {
        if questions.is_empty() {
            return Vec::new();
        }
        let count = questions.len();
        let inserted = self
            .mutate(|records| {
                let now = Utc::now();
                let mut created = Vec::with_capacity(count);
                for question in questions {
                    let record = Question::from_new(self.fresh_id(records), question, now);
                    records.push(record.clone());
                    created.push(record);
                }
                (created, true)
            })
            .await;

        match inserted {
            Ok(created) => created.into_iter().map(Ok).collect(),
            Err(e) => vec![Err(e); count],
        }
    }

    async fn find(&self, predicate: &QuestionPredicate) -> Result<Vec<Question>, StoreError> {
        self.timed(async {
            let records = self.records.read().await;
            let found: Vec<Question> = records
                .iter()
                .filter(|q| predicate.matches(q))
                .cloned()
                .collect();
            debug!("find matched {} of {} records", found.len(), records.len());
            Ok(found)
        })
        .await
    }

    async fn update_one(
        &self,
        id: &QuestionId,
        changes: &QuestionChanges,
    ) -> Result<UpdateResult, StoreError> {
        self.mutate(|records| match records.iter_mut().find(|q| &q.id == id) {
            Some(question) => {
                let modified = question.apply(changes, Utc::now());
                (UpdateResult::matched(modified), modified)
            }
            None => (UpdateResult::not_found(), false),
        })
        .await
    }

    async fn delete_many(&self, ids: &[QuestionId]) -> Result<u64, StoreError> {
        let wanted: HashSet<&QuestionId> = ids.iter().collect();
        self.mutate(|records| {
            let before = records.len();
            records.retain(|q| !wanted.contains(&q.id));
            let deleted = (before - records.len()) as u64;
            (deleted, deleted > 0)
        })
        .await
    }

    async fn aggregate_groups(&self) -> Result<Vec<AggregateGroup>, StoreError> {
        self.timed(async {
            let records = self.records.read().await;
            Ok(CatalogAggregation::from_questions(records.iter()).into_groups())
        })
        .await
    }
}

async fn load_snapshot(path: &Path) -> Result<Vec<Question>, StoreError> {
    match tokio::fs::read(path).await {
        Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Vec::new()),
        Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
            StoreError::Persistence(format!("{} is not a question snapshot: {}", path.display(), e))
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(StoreError::Persistence(format!(
            "cannot read {}: {}",
            path.display(),
            e
        ))),
    }
}

async fn write_snapshot(path: &Path, records: &[Question]) -> Result<(), StoreError> {
    let persist_err = |e: std::io::Error| {
        StoreError::Persistence(format!("cannot write {}: {}", path.display(), e))
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await.map_err(persist_err)?;
    }

    let json =
        serde_json::to_vec_pretty(records).map_err(|e| StoreError::Persistence(e.to_string()))?;
    let tmp = path.with_extension("tmp");
    tokio::fs::write(&tmp, json).await.map_err(persist_err)?;
    tokio::fs::rename(&tmp, path).await.map_err(persist_err)?;
    Ok(())
}
