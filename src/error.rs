//! Error types for the quiz client

use thiserror::Error;

use crate::models::QuizId;

pub type Result<T> = std::result::Result<T, QuizError>;

/// Every failure the quiz client can surface.
///
/// Errors are `Clone` so they can travel back from the network actor
/// over a channel.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    /// Bad input, rejected either locally or by the remote service
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Quiz {0} not found")]
    NotFound(QuizId),

    #[error("Request timed out after {0}ms")]
    Timeout(u64),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid quiz: {0}")]
    InvalidSubject(String),
}

impl QuizError {
    /// Message shown to the user in the presentation layer
    pub fn user_message(&self) -> String {
        let message = match self {
            QuizError::Validation(detail) => detail.clone(),
            QuizError::NotFound(_) => String::from("That quiz no longer exists."),
            QuizError::Timeout(_) => String::from("The quiz service took too long to respond."),
            QuizError::Transport(_) => String::from("Failed to reach the quiz service."),
            QuizError::InvalidSubject(reason) => format!("This quiz cannot be taken: {}", reason),
        };
        if self.is_retryable() {
            format!("{} Please try again.", message)
        } else {
            message
        }
    }

    /// True for failures worth retrying unchanged
    pub fn is_retryable(&self) -> bool {
        matches!(self, QuizError::Timeout(_) | QuizError::Transport(_))
    }
}
