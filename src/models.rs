use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Identifier of a quiz persisted by the remote service
pub type QuizId = i64;

/// Reference article a quiz was generated from
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub summary: Option<String>,
}

impl Article {
    pub fn summary_or_default(&self) -> &str {
        match self.summary.as_deref() {
            Some(s) if !s.trim().is_empty() => s,
            _ => "No summary available.",
        }
    }
}

/// A single answer choice
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuizOption {
    pub text: String,
}

impl QuizOption {
    pub fn new(text: impl Into<String>) -> Self {
        QuizOption { text: text.into() }
    }
}

/// Multiple-choice question
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "question")]
    pub text: String,
    pub options: Vec<QuizOption>,
    pub correct_answer: String,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
}

impl Question {
    pub fn explanation_or_default(&self) -> &str {
        match self.explanation.as_deref() {
            Some(s) if !s.trim().is_empty() => s,
            _ => "No explanation provided.",
        }
    }

    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct_answer == answer
    }

    /// Checks the option invariants, returning the first violation
    pub fn check(&self) -> Result<(), String> {
        if self.options.is_empty() {
            return Err(format!("question \"{}\" has no options", self.text));
        }
        let mut seen = HashSet::new();
        for option in &self.options {
            if !seen.insert(option.text.as_str()) {
                return Err(format!(
                    "question \"{}\" repeats option \"{}\"",
                    self.text, option.text
                ));
            }
        }
        if !seen.contains(self.correct_answer.as_str()) {
            return Err(format!(
                "question \"{}\" has no option matching its correct answer",
                self.text
            ));
        }
        Ok(())
    }
}

/// Ordered set of questions
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    pub questions: Vec<Question>,
}

impl Quiz {
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Full quiz as returned by generation or history lookup
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuizDetail {
    pub article: Article,
    pub quiz: Quiz,
    /// Present only for persisted quizzes
    #[serde(default)]
    pub id: Option<QuizId>,
    #[serde(default)]
    pub related_topics: Vec<String>,
}

impl QuizDetail {
    /// Validates that this detail can be taken as a quiz
    pub fn check(&self) -> Result<(), String> {
        if self.quiz.is_empty() {
            return Err(String::from("quiz has no questions"));
        }
        self.quiz.questions.iter().try_for_each(Question::check)
    }
}

/// Lightweight history entry, detail is fetched lazily
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub id: QuizId,
    #[serde(default)]
    pub article_id: Option<i64>,
    pub article_title: String,
    pub article_url: String,
    pub created_at: DateTime<Utc>,
}

/// Result of grading a submitted attempt
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn question(text: &str, options: &[&str], correct: &str) -> Question {
        Question {
            text: text.to_string(),
            options: options.iter().map(|o| QuizOption::new(*o)).collect(),
            correct_answer: correct.to_string(),
            explanation: Some(format!("Because {}.", correct)),
            difficulty: Some("easy".to_string()),
        }
    }

    /// Three questions whose correct answers are "A", "B" and "C"
    pub fn detail(id: Option<QuizId>) -> QuizDetail {
        QuizDetail {
            article: Article {
                title: "Alan Turing".to_string(),
                url: "https://en.wikipedia.org/wiki/Alan_Turing".to_string(),
                summary: None,
            },
            quiz: Quiz {
                questions: vec![
                    question("Q1", &["A", "B", "C"], "A"),
                    question("Q2", &["A", "B", "C"], "B"),
                    question("Q3", &["A", "B", "C"], "C"),
                ],
            },
            id,
            related_topics: vec!["Enigma".to_string()],
        }
    }

    pub fn empty_detail() -> QuizDetail {
        QuizDetail {
            quiz: Quiz { questions: Vec::new() },
            ..detail(None)
        }
    }
}
