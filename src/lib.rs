//! # WikiQuiz TUI
//!
//! A terminal client that turns a Wikipedia article into a multiple-choice quiz.
//!
//! ## Features
//! - Generate a quiz from an article URL
//! - Take it with navigation, answer capture and scoring
//! - Explanations, difficulty and related topics after submission
//! - Browse and reopen previously generated quizzes
//!
//! ## Architecture
//! Quiz engine:
//! - [`network::QuizApi`] - typed gateway to the quiz service
//! - [`history::HistoryStore`] - history list and memoized quiz details
//! - [`session::QuizSession`] - navigation/answer/scoring state machine
//! - [`controller::SessionController`] - wires results into the session
//!
//! Actor-based presentation with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime)

pub mod app;
pub mod config;
pub mod constants;
pub mod controller;
pub mod error;
pub mod history;
pub mod messages;
pub mod models;
pub mod network;
pub mod session;
pub mod ui;
pub mod validate;

// Re-export commonly used types
pub use models::{Article, HistoryItem, Question, Quiz, QuizDetail, QuizId, QuizOption, Score};
pub use error::{QuizError, Result};
pub use controller::{Opening, SessionController, Ticket};
pub use history::HistoryStore;
pub use session::{Phase, QuizSession, SessionState};
pub use messages::{UiEvent, NetworkCommand, NetworkResponse, RenderState};
pub use app::{AppState, AppActor};
pub use network::{ApiGateway, NetworkActor, QuizApi};
