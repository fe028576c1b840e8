//! Command handlers - business logic for processing UI events

use crate::app::AppState;
use crate::controller::Opening;
use crate::error::QuizError;
use crate::messages::ui_events::{AppTab, InputMode};
use crate::messages::{NetworkCommand, NetworkResponse};

impl AppState {
    // ========================
    // Navigation
    // ========================

    pub fn switch_tab(&mut self, tab: AppTab) {
        self.active_tab = tab;
        self.input_mode = InputMode::Normal;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    // ========================
    // URL input editing
    // ========================

    pub fn start_editing(&mut self) {
        self.input_mode = InputMode::Editing;
        self.cursor_position = self.url_input.len();
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position = self.url_input[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.url_input.len() {
            self.cursor_position = self.url_input[self.cursor_position..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_position + i)
                .unwrap_or(self.url_input.len());
        }
    }

    pub fn enter_char(&mut self, c: char) {
        if self.cursor_position <= self.url_input.len() {
            self.url_input.insert(self.cursor_position, c);
            self.cursor_position += c.len_utf8();
        }
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let prev_pos = self.url_input[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.url_input.remove(prev_pos);
            self.cursor_position = prev_pos;
        }
    }

    // ========================
    // Generation
    // ========================

    /// Validate the URL input and build the generate command
    pub fn generate_quiz(&mut self) -> Option<NetworkCommand> {
        self.stop_editing();
        match self.controller.begin_generate(&self.url_input) {
            Ok((ticket, url)) => {
                self.error = None;
                self.pending_generate = Some(ticket);
                Some(NetworkCommand::GenerateQuiz {
                    ticket,
                    url: url.to_string(),
                })
            }
            Err(e) => {
                self.report(e);
                None
            }
        }
    }

    pub fn open_latest(&mut self) {
        if let Err(e) = self.controller.retake_latest() {
            self.report(e);
        }
    }

    // ========================
    // History
    // ========================

    pub fn reload_history(&mut self) -> Option<NetworkCommand> {
        if self.is_loading_history {
            return None;
        }
        self.is_loading_history = true;
        Some(NetworkCommand::FetchHistory)
    }

    pub fn next_history_item(&mut self) {
        let len = self.controller.history().len();
        if len > 0 && self.selected_history + 1 < len {
            self.selected_history += 1;
        }
    }

    pub fn prev_history_item(&mut self) {
        self.selected_history = self.selected_history.saturating_sub(1);
    }

    pub fn open_history_item(&mut self) -> Option<NetworkCommand> {
        let id = self.controller.history().get_item(self.selected_history)?.id;
        self.error = None;
        match self.controller.begin_open(id) {
            Ok(Opening::Started) => None,
            Ok(Opening::Fetch(ticket)) => {
                self.pending_detail = Some(ticket);
                Some(NetworkCommand::FetchDetail { ticket, id })
            }
            Err(e) => {
                self.report(e);
                None
            }
        }
    }

    // ========================
    // Quiz session
    // ========================

    pub fn quiz_next(&mut self) {
        self.controller.session_mut().next();
    }

    pub fn quiz_prev(&mut self) {
        self.controller.session_mut().prev();
    }

    pub fn quiz_select(&mut self, option_index: usize) {
        self.controller.session_mut().select_option(option_index);
    }

    pub fn quiz_submit(&mut self) {
        self.controller.session_mut().submit();
    }

    pub fn quiz_close(&mut self) {
        self.controller.close();
        self.pending_detail = None;
    }

    // ========================
    // Network responses
    // ========================

    pub fn handle_response(&mut self, response: NetworkResponse) {
        match response {
            NetworkResponse::QuizGenerated { ticket, result } => {
                if self.pending_generate == Some(ticket) {
                    self.pending_generate = None;
                }
                match self.controller.complete(ticket, result) {
                    Ok(true) => self.error = None,
                    Ok(false) => {}
                    Err(e) => self.report(e),
                }
            }
            NetworkResponse::HistoryLoaded(result) => {
                self.is_loading_history = false;
                match result {
                    Ok(items) => {
                        self.controller.history_mut().replace_items(items);
                        let len = self.controller.history().len();
                        self.selected_history = self.selected_history.min(len.saturating_sub(1));
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to load history");
                        self.error = Some(String::from("Failed to load history."));
                    }
                }
            }
            NetworkResponse::DetailLoaded { ticket, id, result } => {
                if self.pending_detail == Some(ticket) {
                    self.pending_detail = None;
                }
                if let Err(e) = self.controller.complete_detail(ticket, id, result) {
                    tracing::warn!(id, error = %e, "Failed to load quiz details");
                    self.error = Some(match e {
                        QuizError::InvalidSubject(_) => e.user_message(),
                        _ => String::from("Failed to load quiz details."),
                    });
                }
            }
        }
    }

    fn report(&mut self, error: QuizError) {
        tracing::warn!(error = %error, "Operation failed");
        self.error = Some(error.user_message());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::fixtures::detail;
    use crate::models::HistoryItem;
    use crate::network::mock::MockApi;
    use crate::session::Phase;
    use chrono::Utc;
    use std::sync::Arc;

    fn state() -> AppState {
        AppState::new(Arc::new(MockApi::new()), &Config::default())
    }

    fn typed(state: &mut AppState, text: &str) {
        state.start_editing();
        for c in text.chars() {
            state.enter_char(c);
        }
    }

    fn history_item(id: i64) -> HistoryItem {
        HistoryItem {
            id,
            article_id: None,
            article_title: format!("Article {}", id),
            article_url: format!("https://en.wikipedia.org/wiki/{}", id),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_invalid_url_sets_error_without_command() {
        let mut state = state();
        typed(&mut state, "https://example.com/x");
        assert!(state.generate_quiz().is_none());
        assert_eq!(
            state.error.as_deref(),
            Some("Please enter a valid Wikipedia article URL.")
        );
        assert!(state.pending_generate.is_none());
    }

    #[test]
    fn test_generate_flow_opens_quiz() {
        let mut state = state();
        typed(&mut state, "https://en.wikipedia.org/wiki/Alan_Turing");
        let Some(NetworkCommand::GenerateQuiz { ticket, url }) = state.generate_quiz() else {
            panic!("expected generate command");
        };
        assert_eq!(url, "https://en.wikipedia.org/wiki/Alan_Turing");
        assert!(state.to_render_state().is_generating);

        state.handle_response(NetworkResponse::QuizGenerated {
            ticket,
            result: Ok(detail(Some(1))),
        });
        let render = state.to_render_state();
        assert!(!render.is_generating);
        assert_eq!(render.quiz.unwrap().total, 3);
        assert_eq!(render.latest.unwrap().summary, "No summary available.");
    }

    #[test]
    fn test_generation_error_shows_detail() {
        let mut state = state();
        typed(&mut state, "https://en.wikipedia.org/wiki/Stub");
        let Some(NetworkCommand::GenerateQuiz { ticket, .. }) = state.generate_quiz() else {
            panic!("expected generate command");
        };
        state.handle_response(NetworkResponse::QuizGenerated {
            ticket,
            result: Err(QuizError::Validation("Article too short".into())),
        });
        assert_eq!(state.error.as_deref(), Some("Article too short"));
        assert!(!state.quiz_open());
    }

    #[test]
    fn test_detail_arriving_after_close_is_ignored() {
        let mut state = state();
        state.handle_response(NetworkResponse::HistoryLoaded(Ok(vec![history_item(8)])));
        let Some(NetworkCommand::FetchDetail { ticket, id }) = state.open_history_item() else {
            panic!("expected fetch");
        };
        state.quiz_close();
        state.handle_response(NetworkResponse::DetailLoaded {
            ticket,
            id,
            result: Ok(detail(Some(8))),
        });
        assert!(!state.quiz_open());

        // Cached now, so reopening needs no request
        assert!(state.open_history_item().is_none());
        assert_eq!(state.controller.session().phase(), Phase::Active);
    }

    #[test]
    fn test_quiz_interaction_and_score() {
        let mut state = state();
        state.controller.history_mut().insert(1, detail(Some(1)));
        state.handle_response(NetworkResponse::HistoryLoaded(Ok(vec![history_item(1)])));
        assert!(state.open_history_item().is_none());

        state.quiz_select(0);
        state.quiz_next();
        state.quiz_select(0);
        state.quiz_submit();

        let view = state.to_render_state().quiz.unwrap();
        assert!(view.submitted);
        assert_eq!(view.score.unwrap().correct, 1);
        assert_eq!(view.explanation.as_deref(), Some("Because B."));
    }

    #[test]
    fn test_history_selection_is_clamped() {
        let mut state = state();
        state.handle_response(NetworkResponse::HistoryLoaded(Ok(vec![history_item(1), history_item(2)])));
        state.next_history_item();
        state.next_history_item();
        assert_eq!(state.selected_history, 1);

        state.handle_response(NetworkResponse::HistoryLoaded(Ok(vec![history_item(3)])));
        assert_eq!(state.selected_history, 0);
    }

    #[test]
    fn test_history_failure_message() {
        let mut state = state();
        assert!(state.reload_history().is_some());
        assert!(state.reload_history().is_none());
        state.handle_response(NetworkResponse::HistoryLoaded(Err(QuizError::Timeout(15_000))));
        assert_eq!(state.error.as_deref(), Some("Failed to load history."));
        assert!(!state.is_loading_history);
    }

    #[test]
    fn test_cursor_editing_multibyte() {
        let mut state = state();
        typed(&mut state, "aé");
        state.move_cursor_left();
        state.enter_char('x');
        assert_eq!(state.url_input, "axé");
        state.move_cursor_right();
        state.delete_char();
        assert_eq!(state.url_input, "ax");
    }
}
