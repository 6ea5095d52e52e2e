//! Engine error types.
//!
//! `QuizError` is returned by weight lookups and session transitions.
//! `DefinitionError` covers structural problems found while assembling a
//! weight table or quiz definition. Both indicate programming or
//! configuration mistakes and are never retried.

use thiserror::Error;

use crate::model::QuestionId;

/// Errors raised by the weight table and the quiz session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuizError {
    /// The role exists but has no weights for the question.
    #[error("no weights for role '{role}' on question {question_id}")]
    Lookup {
        role: String,
        question_id: QuestionId,
    },

    /// The role is not declared in the weight table.
    #[error("unknown role: {0}")]
    UnknownRole(String),

    /// An answer was submitted after the session completed.
    #[error("session already complete after {answered} answers")]
    InvalidState { answered: usize },

    /// Adding an answer's weight would overflow a role's total.
    #[error("score overflow for role '{role}' on question {question_id}")]
    ScoreOverflow {
        role: String,
        question_id: QuestionId,
    },

    /// A result was requested before every question was answered.
    #[error("session incomplete: {answered} of {total} questions answered")]
    Incomplete { answered: usize, total: usize },
}

impl QuizError {
    /// Returns `true` if this error comes from a missing weight-table entry.
    pub fn is_lookup(&self) -> bool {
        matches!(self, QuizError::Lookup { .. } | QuizError::UnknownRole(_))
    }
}

/// Errors raised while building a weight table or quiz definition.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DefinitionError {
    /// The same role was declared twice.
    #[error("duplicate role: {0}")]
    DuplicateRole(String),

    /// A weight key could not be read as a question id.
    #[error("role '{role}': invalid question id '{key}'")]
    InvalidQuestionKey { role: String, key: String },

    /// Two weight keys of one role name the same question, e.g. `1` and `01`.
    #[error("role '{role}': duplicate weights for question {question_id}")]
    DuplicateQuestionKey { role: String, question_id: QuestionId },
}
