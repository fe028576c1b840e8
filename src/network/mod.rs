//! Network layer - the typed gateway to the quiz service
//!
//! The Network actor receives gateway commands, runs them as tasks and sends
//! back responses. Callers that can await directly use [`QuizApi`] instead.

pub mod actor;
pub mod client;
#[cfg(test)]
pub mod mock;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{HistoryItem, QuizDetail, QuizId};

pub use actor::NetworkActor;
pub use client::ApiGateway;

/// Operations offered by the remote quiz service.
///
/// Every call is single-shot: no retries, no session or cookie state.
#[async_trait]
pub trait QuizApi: Send + Sync {
    /// Generate a quiz for a reference article URL
    async fn generate_quiz(&self, url: &str) -> Result<QuizDetail>;

    /// List previously generated quizzes, newest first
    async fn fetch_history_list(&self) -> Result<Vec<HistoryItem>>;

    /// Fetch one persisted quiz
    async fn fetch_quiz_detail(&self, id: QuizId) -> Result<QuizDetail>;
}
