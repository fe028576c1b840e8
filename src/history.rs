use std::collections::HashMap;
use std::sync::Arc;

use crate::error::Result;
use crate::models::{HistoryItem, QuizDetail, QuizId};
use crate::network::QuizApi;

/// Caches the history list and memoizes quiz details fetched through the gateway.
///
/// The list is replaced wholesale on every load. Details are keyed by id,
/// never expire, and a failed fetch leaves no entry behind.
pub struct HistoryStore<A: ?Sized> {
    api: Arc<A>,
    items: Vec<HistoryItem>,
    details: HashMap<QuizId, Arc<QuizDetail>>,
}

impl<A: QuizApi + ?Sized> HistoryStore<A> {
    pub fn new(api: Arc<A>) -> Self {
        HistoryStore {
            api,
            items: Vec::new(),
            details: HashMap::new(),
        }
    }

    /// Fetch the history list and replace the cached one
    pub async fn load(&mut self) -> Result<Vec<HistoryItem>> {
        let items = self.api.fetch_history_list().await?;
        self.replace_items(items.clone());
        Ok(items)
    }

    /// Return the cached detail for `id`, fetching it on first use
    pub async fn get_detail(&mut self, id: QuizId) -> Result<Arc<QuizDetail>> {
        if let Some(detail) = self.cached(id) {
            tracing::debug!(id, "Quiz detail served from cache");
            return Ok(detail);
        }
        let detail = self.api.fetch_quiz_detail(id).await?;
        Ok(self.insert(id, detail))
    }

    /// Replace the list with a freshly fetched one
    pub fn replace_items(&mut self, items: Vec<HistoryItem>) {
        self.items = items;
    }

    /// Store a fetched detail; a later insert for the same id wins
    pub fn insert(&mut self, id: QuizId, detail: QuizDetail) -> Arc<QuizDetail> {
        let detail = Arc::new(detail);
        self.details.insert(id, Arc::clone(&detail));
        detail
    }

    pub fn cached(&self, id: QuizId) -> Option<Arc<QuizDetail>> {
        self.details.get(&id).cloned()
    }

    pub fn items(&self) -> &[HistoryItem] {
        &self.items
    }

    pub fn get_item(&self, index: usize) -> Option<&HistoryItem> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn api(&self) -> &Arc<A> {
        &self.api
    }
}
