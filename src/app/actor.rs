//! App actor - message loop processing UI events and network responses

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// App actor that processes UI events and network responses
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        state: AppState,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state,
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        // History is listed as soon as the app starts
        let cmd = self.state.reload_history();
        self.send(cmd);
        let _ = self.render_tx.send(self.state.to_render_state());

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(response) = net_rx.recv() => {
                    self.state.handle_response(response);
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                else => break,
            }
        }
    }

    fn send(&self, command: Option<NetworkCommand>) {
        if let Some(cmd) = command {
            let _ = self.network_tx.send(cmd);
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            UiEvent::SwitchTab(tab) => self.state.switch_tab(tab),

            // URL input
            UiEvent::StartEditing => self.state.start_editing(),
            UiEvent::StopEditing => self.state.stop_editing(),
            UiEvent::CharInput(c) => self.state.enter_char(c),
            UiEvent::Backspace => self.state.delete_char(),
            UiEvent::CursorLeft => self.state.move_cursor_left(),
            UiEvent::CursorRight => self.state.move_cursor_right(),

            // Generate
            UiEvent::GenerateQuiz => {
                let cmd = self.state.generate_quiz();
                self.send(cmd);
            }
            UiEvent::OpenLatest => self.state.open_latest(),

            // History
            UiEvent::ReloadHistory => {
                let cmd = self.state.reload_history();
                self.send(cmd);
            }
            UiEvent::NextHistoryItem => self.state.next_history_item(),
            UiEvent::PrevHistoryItem => self.state.prev_history_item(),
            UiEvent::OpenHistoryItem => {
                let cmd = self.state.open_history_item();
                self.send(cmd);
            }

            // Quiz
            UiEvent::QuizNext => self.state.quiz_next(),
            UiEvent::QuizPrev => self.state.quiz_prev(),
            UiEvent::QuizSelect(i) => self.state.quiz_select(i),
            UiEvent::QuizSubmit => self.state.quiz_submit(),
            UiEvent::QuizClose => self.state.quiz_close(),

            // Popups
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),

            UiEvent::Quit => return true,
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::fixtures::detail;
    use crate::network::mock::MockApi;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_startup_requests_history_and_quit_shuts_down_network() {
        let api = Arc::new(MockApi::new().with_generated(Ok(detail(None))));
        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        let (_net_resp_tx, net_resp_rx) = mpsc::unbounded_channel();
        let (net_cmd_tx, mut net_cmd_rx) = mpsc::unbounded_channel();
        let (render_tx, mut render_rx) = mpsc::unbounded_channel();

        let actor = AppActor::new(AppState::new(api, &Config::default()), net_cmd_tx, render_tx);
        let handle = tokio::spawn(actor.run(ui_rx, net_resp_rx));

        assert!(matches!(net_cmd_rx.recv().await, Some(NetworkCommand::FetchHistory)));
        assert!(render_rx.recv().await.unwrap().is_loading_history);

        ui_tx.send(UiEvent::Quit).unwrap();
        assert!(matches!(net_cmd_rx.recv().await, Some(NetworkCommand::Shutdown)));
        handle.await.unwrap();
    }
}
