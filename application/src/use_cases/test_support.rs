//! In-process store double shared by the use case tests.

use crate::ports::audit_logger::{AuditEvent, AuditLogger};
use crate::ports::document_store::{DocumentStore, StoreError};
use async_trait::async_trait;
use catalog_domain::{
    NewQuestion, Question, QuestionChanges, QuestionId, QuestionPredicate, UpdateResult,
};
use chrono::Utc;
use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Default)]
pub(crate) struct MockStore {
    questions: Mutex<Vec<Question>>,
    next_id: AtomicUsize,
    calls: AtomicUsize,
    batch_inserts: AtomicUsize,
    failing_texts: Mutex<HashSet<String>>,
    failing_ids: Mutex<HashSet<String>>,
    max_concurrent: AtomicUsize,
    in_flight: AtomicUsize,
}

impl MockStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Inserts of a question with this text fail at the store.
    pub(crate) fn fail_insert_of(&self, text: &str) {
        self.failing_texts.lock().unwrap().insert(text.to_string());
    }

    /// Updates of this id fail at the store.
    pub(crate) fn fail_update_of(&self, id: &QuestionId) {
        self.failing_ids.lock().unwrap().insert(id.to_string());
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn batch_inserts(&self) -> usize {
        self.batch_inserts.load(Ordering::SeqCst)
    }

    pub(crate) fn max_concurrent(&self) -> usize {
        self.max_concurrent.load(Ordering::SeqCst)
    }

    pub(crate) fn len(&self) -> usize {
        self.questions.lock().unwrap().len()
    }

    pub(crate) fn get(&self, id: &QuestionId) -> Option<Question> {
        self.questions
            .lock()
            .unwrap()
            .iter()
            .find(|q| &q.id == id)
            .cloned()
    }

    /// Insert directly, bypassing the call counter.
    pub(crate) fn seed(&self, new: NewQuestion) -> Question {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let question = Question::from_new(QuestionId::new(format!("q{}", id)), new, Utc::now());
        self.questions.lock().unwrap().push(question.clone());
        question
    }

    async fn enter(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_concurrent.fetch_max(now, Ordering::SeqCst);
        tokio::task::yield_now().await;
    }

    fn leave(&self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl DocumentStore for MockStore {
    async fn insert_one(&self, question: NewQuestion) -> Result<Question, StoreError> {
        self.enter().await;
        let result = if self
            .failing_texts
            .lock()
            .unwrap()
            .contains(&question.question_text)
        {
            Err(StoreError::WriteFailed(format!(
                "duplicate key: {}",
                question.question_text
            )))
        } else {
            Ok(self.seed(question))
        };
        self.leave();
        result
    }

    async fn insert_many(&self, questions: Vec<NewQuestion>) -> Vec<Result<Question, StoreError>> {
        self.batch_inserts.fetch_add(1, Ordering::SeqCst);
        let mut results = Vec::with_capacity(questions.len());
        for question in questions {
            results.push(self.insert_one(question).await);
        }
        results
    }

    async fn find(&self, predicate: &QuestionPredicate) -> Result<Vec<Question>, StoreError> {
        self.enter().await;
        let found = self
            .questions
            .lock()
            .unwrap()
            .iter()
            .filter(|q| predicate.matches(q))
            .cloned()
            .collect();
        self.leave();
        Ok(found)
    }

    async fn update_one(
        &self,
        id: &QuestionId,
        changes: &QuestionChanges,
    ) -> Result<UpdateResult, StoreError> {
        self.enter().await;
        let result = if self.failing_ids.lock().unwrap().contains(id.as_str()) {
            Err(StoreError::Unavailable("connection reset".to_string()))
        } else {
            let mut questions = self.questions.lock().unwrap();
            Ok(match questions.iter_mut().find(|q| &q.id == id) {
                Some(question) => UpdateResult::matched(question.apply(changes, Utc::now())),
                None => UpdateResult::not_found(),
            })
        };
        self.leave();
        result
    }

    async fn delete_many(&self, ids: &[QuestionId]) -> Result<u64, StoreError> {
        self.enter().await;
        let mut questions = self.questions.lock().unwrap();
        let before = questions.len();
        questions.retain(|q| !ids.contains(&q.id));
        let deleted = (before - questions.len()) as u64;
        drop(questions);
        self.leave();
        Ok(deleted)
    }
}

/// Audit logger that keeps every event type it receives.
#[derive(Default)]
pub(crate) struct RecordingAuditLogger {
    pub(crate) events: Mutex<Vec<(&'static str, serde_json::Value)>>,
}

impl AuditLogger for RecordingAuditLogger {
    fn log(&self, event: AuditEvent) {
        self.events
            .lock()
            .unwrap()
            .push((event.event_type, event.payload));
    }
}
