//! App state - pure data structure with no I/O logic

use std::sync::Arc;

use crate::config::Config;
use crate::controller::{SessionController, Ticket};
use crate::messages::render::{QuizCard, QuizView};
use crate::messages::ui_events::{AppTab, InputMode};
use crate::messages::RenderState;
use crate::network::QuizApi;
use crate::session::Phase;

/// Main application state - pure data, no I/O
pub struct AppState {
    pub active_tab: AppTab,
    pub input_mode: InputMode,

    // Generate tab
    pub url_input: String,
    pub cursor_position: usize,

    // History tab
    pub selected_history: usize,

    // In-flight requests, by the ticket they were issued with
    pub pending_generate: Option<Ticket>,
    pub pending_detail: Option<Ticket>,
    pub is_loading_history: bool,

    pub error: Option<String>,
    pub show_help: bool,

    /// Quiz engine: session, history cache and ticketing
    pub controller: SessionController<dyn QuizApi>,
}

impl AppState {
    pub fn new(api: Arc<dyn QuizApi>, config: &Config) -> Self {
        AppState {
            active_tab: AppTab::Generate,
            input_mode: InputMode::Normal,
            url_input: String::new(),
            cursor_position: 0,
            selected_history: 0,
            pending_generate: None,
            pending_detail: None,
            is_loading_history: false,
            error: None,
            show_help: false,
            controller: SessionController::new(api, config),
        }
    }

    pub fn quiz_open(&self) -> bool {
        self.controller.session().phase() != Phase::Idle
    }

    fn quiz_view(&self) -> Option<QuizView> {
        let session = self.controller.session();
        let subject = session.subject()?;
        let question = session.current_question()?;
        let submitted = session.phase() == Phase::Submitted;

        Some(QuizView {
            article_title: subject.article.title.clone(),
            index: session.current_index(),
            total: session.question_count(),
            question: question.text.clone(),
            difficulty: question.difficulty.clone(),
            options: question
                .options
                .iter()
                .map(|o| (o.text.clone(), session.option_mark(&o.text)))
                .collect(),
            answered: session.answered_count(),
            submitted,
            score: submitted.then(|| session.score()),
            explanation: submitted.then(|| question.explanation_or_default().to_string()),
            related_topics: subject.related_topics.clone(),
        })
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            active_tab: self.active_tab,
            input_mode: self.input_mode,
            url_input: self.url_input.clone(),
            cursor_position: self.cursor_position,
            is_generating: self.pending_generate.is_some(),
            latest: self.controller.latest().map(|d| QuizCard {
                title: d.article.title.clone(),
                url: d.article.url.clone(),
                summary: d.article.summary_or_default().to_string(),
                question_count: d.quiz.len(),
            }),
            history: self.controller.history().items().to_vec(),
            selected_history: self.selected_history,
            is_loading_history: self.is_loading_history,
            is_opening: self.pending_detail.is_some(),
            error: self.error.clone(),
            quiz: self.quiz_view(),
            show_help: self.show_help,
        }
    }
}
