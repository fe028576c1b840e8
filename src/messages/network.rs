//! Network messages - communication between App and Network layers

use crate::controller::Ticket;
use crate::error::Result;
use crate::models::{HistoryItem, QuizDetail, QuizId};

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Generate a quiz for an already validated article URL
    GenerateQuiz { ticket: Ticket, url: String },
    /// Refresh the history list
    FetchHistory,
    /// Fetch one persisted quiz
    FetchDetail { ticket: Ticket, id: QuizId },
    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    QuizGenerated {
        ticket: Ticket,
        result: Result<QuizDetail>,
    },
    HistoryLoaded(Result<Vec<HistoryItem>>),
    DetailLoaded {
        ticket: Ticket,
        id: QuizId,
        result: Result<QuizDetail>,
    },
}

