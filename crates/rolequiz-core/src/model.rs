//! Core data model types for rolequiz.
//!
//! These are the fundamental types that the engine, the quiz file parser,
//! and the CLI share: roles, questions, answers, and answer events.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use crate::weights::WeightTable;

/// Stable identifier of a question.
///
/// Identifiers are 1-based in the reference data and need not match the
/// question's position in the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub u32);

impl QuestionId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for QuestionId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// An outcome category the quiz can select (e.g. `pilot`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(String);

impl Role {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human-readable name: `ground_crew` becomes `Ground Crew`.
    pub fn display_name(&self) -> String {
        self.0
            .split(['_', '-'])
            .filter(|word| !word.is_empty())
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Role {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Role {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for Role {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A yes/no question presented to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Stable identifier used to look up weights.
    pub id: QuestionId,
    /// Display text. Opaque to the engine.
    #[serde(default)]
    pub text: String,
    /// Disabled questions are kept in the definition but never asked.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Question {
    pub fn new(id: u32, text: impl Into<String>) -> Self {
        Self {
            id: QuestionId(id),
            text: text.into(),
            enabled: true,
        }
    }

    /// The prompt line shown to the user, e.g. `3: Do you like maps?`.
    pub fn label(&self) -> String {
        format!("{}: {}", self.id, self.text)
    }
}

fn default_true() -> bool {
    true
}

/// A normalised binary answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Answer {
    No,
    Yes,
}

impl Answer {
    /// The 0/1 index of this answer.
    pub fn index(self) -> u8 {
        match self {
            Answer::No => 0,
            Answer::Yes => 1,
        }
    }

    /// Normalise an arbitrary JSON value by truthiness.
    ///
    /// `null`, `false`, `0` and the empty string are falsy; the words
    /// accepted by [`FromStr`] map to their meaning; anything else is truthy.
    pub fn from_json(value: &serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Answer::No,
            Value::Bool(b) => Answer::from(*b),
            Value::Number(n) => match n.as_f64() {
                Some(f) if f != 0.0 && !f.is_nan() => Answer::Yes,
                _ => Answer::No,
            },
            Value::String(s) => s
                .parse()
                .unwrap_or_else(|_| Answer::from(!s.is_empty())),
            Value::Array(_) | Value::Object(_) => Answer::Yes,
        }
    }
}

impl From<bool> for Answer {
    fn from(yes: bool) -> Self {
        if yes {
            Answer::Yes
        } else {
            Answer::No
        }
    }
}

impl From<i64> for Answer {
    fn from(value: i64) -> Self {
        Answer::from(value != 0)
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::No => write!(f, "no"),
            Answer::Yes => write!(f, "yes"),
        }
    }
}

impl FromStr for Answer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "y" | "yes" | "true" | "1" => Ok(Answer::Yes),
            "n" | "no" | "false" | "0" => Ok(Answer::No),
            other => Err(format!("unrecognised answer: {other}")),
        }
    }
}

/// A raw answer event from the presentation layer.
///
/// Events without a `question_id` have no recognisable target and are
/// ignored by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerEvent {
    #[serde(default)]
    pub question_id: Option<QuestionId>,
    pub answer: Answer,
}

impl AnswerEvent {
    pub fn new(question_id: u32, answer: impl Into<Answer>) -> Self {
        Self {
            question_id: Some(QuestionId(question_id)),
            answer: answer.into(),
        }
    }

    /// An event that carries no target (e.g. a click outside any answer).
    pub fn untargeted(answer: impl Into<Answer>) -> Self {
        Self {
            question_id: None,
            answer: answer.into(),
        }
    }
}

/// An answer accepted by a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question_id: QuestionId,
    pub answer: Answer,
}

/// A complete quiz: metadata, questions, and the weight table.
#[derive(Debug, Clone)]
pub struct QuizDefinition {
    /// Unique identifier for this quiz.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Description of this quiz.
    pub description: String,
    /// All questions in presentation order, including disabled ones.
    pub questions: Vec<Question>,
    /// Role weights, in declaration order.
    pub weights: WeightTable,
}

impl QuizDefinition {
    /// The questions a session will ask, in order.
    pub fn enabled_questions(&self) -> Vec<Question> {
        self.questions.iter().filter(|q| q.enabled).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn answer_parse() {
        assert_eq!("y".parse::<Answer>().unwrap(), Answer::Yes);
        assert_eq!("YES".parse::<Answer>().unwrap(), Answer::Yes);
        assert_eq!(" 0 ".parse::<Answer>().unwrap(), Answer::No);
        assert_eq!("false".parse::<Answer>().unwrap(), Answer::No);
        assert!("maybe".parse::<Answer>().is_err());
    }

    #[test]
    fn answer_truthiness() {
        assert_eq!(Answer::from(3_i64), Answer::Yes);
        assert_eq!(Answer::from(-1_i64), Answer::Yes);
        assert_eq!(Answer::from(0_i64), Answer::No);
        assert_eq!(Answer::from_json(&json!(null)), Answer::No);
        assert_eq!(Answer::from_json(&json!(1)), Answer::Yes);
        assert_eq!(Answer::from_json(&json!(0.0)), Answer::No);
        assert_eq!(Answer::from_json(&json!("no")), Answer::No);
        assert_eq!(Answer::from_json(&json!("")), Answer::No);
        assert_eq!(Answer::from_json(&json!("sure")), Answer::Yes);
        assert_eq!(Answer::from_json(&json!([])), Answer::Yes);
    }

    #[test]
    fn role_display_name() {
        assert_eq!(Role::new("ground_crew").display_name(), "Ground Crew");
        assert_eq!(Role::new("pilot").display_name(), "Pilot");
        assert_eq!(Role::new("a__b").display_name(), "A B");
    }

    #[test]
    fn question_label_uses_id() {
        let q = Question::new(3, "Do you like maps?");
        assert_eq!(q.label(), "3: Do you like maps?");
        assert!(q.enabled);
    }

    #[test]
    fn answer_event_serde_without_target() {
        let event: AnswerEvent = serde_json::from_str(r#"{"answer":"yes"}"#).unwrap();
        assert_eq!(event, AnswerEvent::untargeted(Answer::Yes));
    }
}
