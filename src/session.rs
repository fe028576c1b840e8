//! Quiz session - the state machine for taking one quiz
//!
//! [`SessionState`] is a plain value with pure transitions: each consumes the
//! current state and returns the next one. [`QuizSession`] wraps it for callers
//! that hold the state behind `&mut`.
//!
//! ```text
//! Idle --start--> Active --submit--> Submitted
//!   ^                |                   |
//!   +------close-----+-------close-------+
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::{QuizError, Result};
use crate::models::{Question, QuizDetail, Score};

/// Coarse lifecycle stage of a session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Active,
    Submitted,
}

/// One pass through a quiz: subject, cursor and captured answers
#[derive(Clone, Debug, PartialEq)]
pub struct Attempt {
    subject: Arc<QuizDetail>,
    current_index: usize,
    answers: BTreeMap<usize, String>,
}

impl Attempt {
    fn new(subject: Arc<QuizDetail>) -> Self {
        Attempt {
            subject,
            current_index: 0,
            answers: BTreeMap::new(),
        }
    }

    fn question_count(&self) -> usize {
        self.subject.quiz.len()
    }

    fn moved_by(mut self, forward: bool) -> Self {
        if forward {
            if self.current_index + 1 < self.question_count() {
                self.current_index += 1;
            }
        } else {
            self.current_index = self.current_index.saturating_sub(1);
        }
        self
    }

    fn grade(&self) -> Score {
        let correct = self
            .subject
            .quiz
            .questions
            .iter()
            .enumerate()
            .filter(|(i, q)| self.answers.get(i).is_some_and(|a| q.is_correct(a)))
            .count();
        Score {
            correct,
            total: self.question_count(),
        }
    }

    pub fn subject(&self) -> &Arc<QuizDetail> {
        &self.subject
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }
}

/// How an option should be presented
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionMark {
    Plain,
    Selected,
    Correct,
    Incorrect,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum SessionState {
    #[default]
    Idle,
    Active(Attempt),
    /// Answers are frozen; the score is computed once on entry
    Submitted { attempt: Attempt, score: Score },
}

impl SessionState {
    /// Begin a fresh attempt at `subject`, from any state
    pub fn start(subject: Arc<QuizDetail>) -> Result<Self> {
        subject.check().map_err(QuizError::InvalidSubject)?;
        Ok(SessionState::Active(Attempt::new(subject)))
    }

    /// Record an answer for the current question. Ignored unless active.
    pub fn select_answer(self, option_text: impl Into<String>) -> Self {
        match self {
            SessionState::Active(mut attempt) => {
                attempt.answers.insert(attempt.current_index, option_text.into());
                SessionState::Active(attempt)
            }
            other => other,
        }
    }

    pub fn next(self) -> Self {
        self.navigate(true)
    }

    pub fn prev(self) -> Self {
        self.navigate(false)
    }

    fn navigate(self, forward: bool) -> Self {
        match self {
            SessionState::Idle => SessionState::Idle,
            SessionState::Active(attempt) => SessionState::Active(attempt.moved_by(forward)),
            SessionState::Submitted { attempt, score } => SessionState::Submitted {
                attempt: attempt.moved_by(forward),
                score,
            },
        }
    }

    /// Freeze answers and grade. Repeated calls keep the first result.
    pub fn submit(self) -> Self {
        match self {
            SessionState::Active(attempt) => {
                let score = attempt.grade();
                SessionState::Submitted { attempt, score }
            }
            other => other,
        }
    }

    pub fn close(self) -> Self {
        SessionState::Idle
    }

    pub fn phase(&self) -> Phase {
        match self {
            SessionState::Idle => Phase::Idle,
            SessionState::Active(_) => Phase::Active,
            SessionState::Submitted { .. } => Phase::Submitted,
        }
    }

    pub fn attempt(&self) -> Option<&Attempt> {
        match self {
            SessionState::Idle => None,
            SessionState::Active(attempt) | SessionState::Submitted { attempt, .. } => Some(attempt),
        }
    }

    /// Graded score once submitted, `{0, total}` before that
    pub fn score(&self) -> Score {
        match self {
            SessionState::Submitted { score, .. } => *score,
            SessionState::Active(attempt) => Score {
                correct: 0,
                total: attempt.question_count(),
            },
            SessionState::Idle => Score::default(),
        }
    }
}

/// Mutable handle over [`SessionState`]
#[derive(Debug, Default)]
pub struct QuizSession {
    state: SessionState,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    fn apply(&mut self, transition: impl FnOnce(SessionState) -> SessionState) {
        let state = std::mem::take(&mut self.state);
        self.state = transition(state);
    }

    /// Load `subject` and reset progress. On error the current state is kept.
    pub fn start(&mut self, subject: impl Into<Arc<QuizDetail>>) -> Result<()> {
        self.state = SessionState::start(subject.into())?;
        Ok(())
    }

    pub fn select_answer(&mut self, option_text: impl Into<String>) {
        let option_text = option_text.into();
        self.apply(|s| s.select_answer(option_text));
    }

    /// Select the option at `option_index` of the current question
    pub fn select_option(&mut self, option_index: usize) {
        let text = self
            .current_question()
            .and_then(|q| q.options.get(option_index))
            .map(|o| o.text.clone());
        if let Some(text) = text {
            self.select_answer(text);
        }
    }

    pub fn next(&mut self) {
        self.apply(SessionState::next);
    }

    pub fn prev(&mut self) {
        self.apply(SessionState::prev);
    }

    pub fn submit(&mut self) {
        self.apply(SessionState::submit);
    }

    pub fn close(&mut self) {
        self.apply(SessionState::close);
    }

    pub fn score(&self) -> Score {
        self.state.score()
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn subject(&self) -> Option<&Arc<QuizDetail>> {
        self.state.attempt().map(Attempt::subject)
    }

    pub fn current_index(&self) -> usize {
        self.state.attempt().map_or(0, Attempt::current_index)
    }

    pub fn question_count(&self) -> usize {
        self.state.attempt().map_or(0, Attempt::question_count)
    }

    pub fn current_question(&self) -> Option<&Question> {
        let attempt = self.state.attempt()?;
        attempt.subject.quiz.questions.get(attempt.current_index)
    }

    pub fn answer_for(&self, question_index: usize) -> Option<&str> {
        self.state
            .attempt()?
            .answers
            .get(&question_index)
            .map(String::as_str)
    }

    pub fn answered_count(&self) -> usize {
        self.state.attempt().map_or(0, |a| a.answers.len())
    }

    /// Presentation mark for an option of the current question
    pub fn option_mark(&self, option_text: &str) -> OptionMark {
        let Some(question) = self.current_question() else {
            return OptionMark::Plain;
        };
        let selected = self.answer_for(self.current_index()) == Some(option_text);
        match self.phase() {
            Phase::Submitted if question.is_correct(option_text) => OptionMark::Correct,
            Phase::Submitted if selected => OptionMark::Incorrect,
            Phase::Active if selected => OptionMark::Selected,
            _ => OptionMark::Plain,
        }
    }
}
