//! Render state - data structure sent from App layer to UI for rendering

use crate::messages::ui_events::{AppTab, InputMode};
use crate::models::{HistoryItem, Score};
use crate::session::OptionMark;

/// Summary card for the latest generated quiz
#[derive(Debug, Clone, PartialEq)]
pub struct QuizCard {
    pub title: String,
    pub url: String,
    pub summary: String,
    pub question_count: usize,
}

/// Snapshot of the running quiz session
#[derive(Debug, Clone, PartialEq)]
pub struct QuizView {
    pub article_title: String,
    pub index: usize,
    pub total: usize,
    pub question: String,
    pub difficulty: Option<String>,
    pub options: Vec<(String, OptionMark)>,
    pub answered: usize,
    pub submitted: bool,
    /// Present once submitted
    pub score: Option<Score>,
    pub explanation: Option<String>,
    pub related_topics: Vec<String>,
}

/// Complete state needed by the UI to render
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    pub active_tab: AppTab,
    pub input_mode: InputMode,

    // Generate tab
    pub url_input: String,
    pub cursor_position: usize,
    pub is_generating: bool,
    pub latest: Option<QuizCard>,

    // History tab
    pub history: Vec<HistoryItem>,
    pub selected_history: usize,
    pub is_loading_history: bool,
    pub is_opening: bool,

    // Last user-facing error
    pub error: Option<String>,

    pub quiz: Option<QuizView>,
    pub show_help: bool,
}

impl RenderState {
    pub fn is_busy(&self) -> bool {
        self.is_generating || self.is_loading_history || self.is_opening
    }
}
