//! In-memory quiz service for tests
//!
//! Responses are configured per operation and every call is counted, so tests
//! can assert how often the network would have been hit.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::constants::REFERENCE_DOMAIN;
use crate::error::{QuizError, Result};
use crate::models::{HistoryItem, QuizDetail, QuizId};
use crate::network::QuizApi;
use crate::validate::validate_article_url;

#[derive(Default)]
pub struct MockApi {
    pub generated: Mutex<Option<Result<QuizDetail>>>,
    pub history: Mutex<Vec<HistoryItem>>,
    pub details: Mutex<HashMap<QuizId, QuizDetail>>,
    /// Error returned by every call while set
    pub failure: Mutex<Option<QuizError>>,
    pub generate_calls: AtomicUsize,
    pub history_calls: AtomicUsize,
    pub detail_calls: AtomicUsize,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_generated(self, result: Result<QuizDetail>) -> Self {
        *self.generated.lock().unwrap() = Some(result);
        self
    }

    pub fn with_detail(self, id: QuizId, detail: QuizDetail) -> Self {
        self.details.lock().unwrap().insert(id, detail);
        self
    }

    pub fn set_history(&self, items: Vec<HistoryItem>) {
        *self.history.lock().unwrap() = items;
    }

    pub fn set_failure(&self, failure: Option<QuizError>) {
        *self.failure.lock().unwrap() = failure;
    }

    pub fn generate_count(&self) -> usize {
        self.generate_calls.load(Ordering::SeqCst)
    }

    pub fn history_count(&self) -> usize {
        self.history_calls.load(Ordering::SeqCst)
    }

    pub fn detail_count(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }

    fn check_failure(&self) -> Result<()> {
        match self.failure.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl QuizApi for MockApi {
    async fn generate_quiz(&self, url: &str) -> Result<QuizDetail> {
        validate_article_url(url, REFERENCE_DOMAIN)?;
        self.generate_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        self.generated
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Err(QuizError::Transport("no generated quiz configured".into())))
    }

    async fn fetch_history_list(&self) -> Result<Vec<HistoryItem>> {
        self.history_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        Ok(self.history.lock().unwrap().clone())
    }

    async fn fetch_quiz_detail(&self, id: QuizId) -> Result<QuizDetail> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        self.details
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or(QuizError::NotFound(id))
    }
}
