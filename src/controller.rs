//! Session controller - composition root for the quiz engine
//!
//! Wires generation results and history selections into the [`QuizSession`].
//! Loads can be awaited in one call (`generate_and_start`, `open_from_history`)
//! or split into `begin_*` / `complete*` when the network call runs elsewhere.
//! Each begin hands out a [`Ticket`]; closing the session or beginning another
//! load supersedes it, and a superseded result is dropped instead of applied.

use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::history::HistoryStore;
use crate::models::{HistoryItem, QuizDetail, QuizId};
use crate::network::QuizApi;
use crate::session::QuizSession;
use crate::validate::validate_article_url;
use reqwest::Url;

/// Proof that a load was requested while a given session epoch was current
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

/// Outcome of asking to open a history entry
#[derive(Debug, PartialEq, Eq)]
pub enum Opening {
    /// Served from cache; the session is already running
    Started,
    /// Detail must be fetched, then passed to `complete_detail`
    Fetch(Ticket),
}

pub struct SessionController<A: ?Sized> {
    history: HistoryStore<A>,
    session: QuizSession,
    reference_domain: String,
    epoch: u64,
    /// Latest freshly generated quiz, kept for the "latest quiz" card
    latest: Option<Arc<QuizDetail>>,
}

impl<A: QuizApi + ?Sized> SessionController<A> {
    pub fn new(api: Arc<A>, config: &Config) -> Self {
        SessionController {
            history: HistoryStore::new(api),
            session: QuizSession::new(),
            reference_domain: config.reference_domain.clone(),
            epoch: 0,
            latest: None,
        }
    }

    fn issue_ticket(&mut self) -> Ticket {
        self.epoch += 1;
        Ticket(self.epoch)
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.epoch
    }

    // ========================
    // Awaiting API
    // ========================

    /// Validate `url`, generate a quiz and start it
    pub async fn generate_and_start(&mut self, url: &str) -> Result<()> {
        let (ticket, url) = self.begin_generate(url)?;
        let result = self.history.api().generate_quiz(url.as_str()).await;
        self.complete(ticket, result).map(|_| ())
    }

    /// Start the quiz behind a history entry, fetching it if not cached
    pub async fn open_from_history(&mut self, id: QuizId) -> Result<()> {
        let ticket = self.issue_ticket();
        let detail = self.history.get_detail(id).await?;
        self.start_if_current(ticket, detail).map(|_| ())
    }

    pub async fn load_history(&mut self) -> Result<Vec<HistoryItem>> {
        self.history.load().await
    }

    // ========================
    // Split API
    // ========================

    /// Validate `url` and reserve a ticket for the generation result
    pub fn begin_generate(&mut self, url: &str) -> Result<(Ticket, Url)> {
        let url = validate_article_url(url, &self.reference_domain)?;
        Ok((self.issue_ticket(), url))
    }

    /// Start from cache when possible, otherwise ask for a fetch
    pub fn begin_open(&mut self, id: QuizId) -> Result<Opening> {
        let ticket = self.issue_ticket();
        match self.history.cached(id) {
            Some(detail) => {
                tracing::debug!(id, "Opening quiz from cache");
                self.start_if_current(ticket, detail)?;
                Ok(Opening::Started)
            }
            None => Ok(Opening::Fetch(ticket)),
        }
    }

    /// Apply a generation result. Returns `Ok(false)` if the ticket was superseded.
    pub fn complete(&mut self, ticket: Ticket, result: Result<QuizDetail>) -> Result<bool> {
        let detail = Arc::new(result?);
        if let Some(id) = detail.id {
            self.history.insert(id, QuizDetail::clone(&detail));
        }
        if !self.start_if_current(ticket, Arc::clone(&detail))? {
            return Ok(false);
        }
        self.latest = Some(detail);
        Ok(true)
    }

    /// Apply a fetched history detail, caching it even if the ticket is stale
    pub fn complete_detail(
        &mut self,
        ticket: Ticket,
        id: QuizId,
        result: Result<QuizDetail>,
    ) -> Result<bool> {
        let detail = self.history.insert(id, result?);
        self.start_if_current(ticket, detail)
    }

    fn start_if_current(&mut self, ticket: Ticket, detail: Arc<QuizDetail>) -> Result<bool> {
        if !self.is_current(ticket) {
            tracing::info!(ticket = ticket.0, epoch = self.epoch, "Discarding stale quiz result");
            return Ok(false);
        }
        self.session.start(detail)?;
        Ok(true)
    }

    /// Close the session and supersede any outstanding ticket
    pub fn close(&mut self) {
        self.epoch += 1;
        self.session.close();
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut QuizSession {
        &mut self.session
    }

    pub fn history(&self) -> &HistoryStore<A> {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut HistoryStore<A> {
        &mut self.history
    }

    pub fn latest(&self) -> Option<&Arc<QuizDetail>> {
        self.latest.as_ref()
    }

    /// Restart the latest generated quiz
    pub fn retake_latest(&mut self) -> Result<bool> {
        match self.latest.clone() {
            Some(detail) => {
                let ticket = self.issue_ticket();
                self.start_if_current(ticket, detail)
            }
            None => Ok(false),
        }
    }
}
