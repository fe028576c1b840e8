//! Network actor - runs quiz service calls in the Tokio async runtime

use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::QuizApi;

/// Network actor that turns commands into gateway calls.
///
/// Requests are never cancelled or coalesced; every command produces exactly
/// one response and the App layer decides whether it is still wanted.
pub struct NetworkActor {
    api: Arc<dyn QuizApi>,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(api: Arc<dyn QuizApi>, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            api,
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::GenerateQuiz { ticket, url }) => {
                            let api = Arc::clone(&self.api);
                            let response_tx = self.response_tx.clone();
                            self.active_requests.spawn(async move {
                                tracing::info!(?ticket, %url, "Executing generate request");
                                let result = api.generate_quiz(&url).await;
                                let _ = response_tx.send(NetworkResponse::QuizGenerated { ticket, result });
                            });
                        }

                        Some(NetworkCommand::FetchHistory) => {
                            let api = Arc::clone(&self.api);
                            let response_tx = self.response_tx.clone();
                            self.active_requests.spawn(async move {
                                let result = api.fetch_history_list().await;
                                let _ = response_tx.send(NetworkResponse::HistoryLoaded(result));
                            });
                        }

                        Some(NetworkCommand::FetchDetail { ticket, id }) => {
                            let api = Arc::clone(&self.api);
                            let response_tx = self.response_tx.clone();
                            self.active_requests.spawn(async move {
                                tracing::info!(?ticket, id, "Fetching quiz detail");
                                let result = api.fetch_quiz_detail(id).await;
                                let _ = response_tx.send(NetworkResponse::DetailLoaded { ticket, id, result });
                            });
                        }

                        Some(NetworkCommand::Shutdown) | None => {
                            self.active_requests.abort_all();
                            break;
                        }
                    }
                }

                // Reap completed tasks
                Some(result) = self.active_requests.join_next() => {
                    if let Err(e) = result {
                        if e.is_panic() {
                            tracing::error!("Network task panicked: {}", e);
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::controller::SessionController;
    use crate::error::QuizError;
    use crate::models::fixtures::detail;
    use crate::network::mock::MockApi;

    fn spawn(api: Arc<MockApi>) -> (
        mpsc::UnboundedSender<NetworkCommand>,
        mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (resp_tx, resp_rx) = mpsc::unbounded_channel();
        tokio::spawn(NetworkActor::new(api, resp_tx).run(cmd_rx));
        (cmd_tx, resp_rx)
    }

    #[tokio::test]
    async fn test_detail_round_trip() {
        let api = Arc::new(MockApi::new().with_detail(4, detail(Some(4))));
        let mut ctl: SessionController<MockApi> = SessionController::new(Arc::clone(&api), &Config::default());
        let (cmd_tx, mut resp_rx) = spawn(api);

        let ticket = match ctl.begin_open(4).unwrap() {
            crate::controller::Opening::Fetch(ticket) => ticket,
            other => panic!("unexpected {:?}", other),
        };
        cmd_tx.send(NetworkCommand::FetchDetail { ticket, id: 4 }).unwrap();

        match resp_rx.recv().await.unwrap() {
            NetworkResponse::DetailLoaded { ticket: t, id, result } => {
                assert_eq!(t, ticket);
                assert_eq!(id, 4);
                assert_eq!(result.unwrap().id, Some(4));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_history_failure_is_reported() {
        let api = Arc::new(MockApi::new());
        api.set_failure(Some(QuizError::Transport("down".into())));
        let (cmd_tx, mut resp_rx) = spawn(api);

        cmd_tx.send(NetworkCommand::FetchHistory).unwrap();
        match resp_rx.recv().await.unwrap() {
            NetworkResponse::HistoryLoaded(result) => {
                assert_eq!(result.unwrap_err(), QuizError::Transport("down".into()));
            }
            other => panic!("unexpected {:?}", other),
        }
        cmd_tx.send(NetworkCommand::Shutdown).unwrap();
    }
}
