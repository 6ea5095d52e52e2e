//! Session reports with JSON persistence.
//!
//! A report is the hand-off from a finished session to whatever keeps
//! results around: the chosen role, the final board, and the answers given.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::QuizError;
use crate::model::{AnswerRecord, QuizDefinition, Role};
use crate::selection::tied_leaders;
use crate::session::{QuizSession, ScoreBoard};

/// A completed quiz session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Summary of the quiz.
    pub quiz: QuizSummary,
    /// Accepted answers in order.
    pub answers: Vec<AnswerRecord>,
    /// Final totals per role, in declaration order.
    pub scores: ScoreBoard,
    /// The selected role; `null` when no role scored above zero.
    pub winner: Option<Role>,
    /// Roles that shared the top total, when more than one did.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tied: Vec<Role>,
}

/// Summary of a quiz (without questions or weights).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSummary {
    pub id: String,
    pub name: String,
    pub question_count: usize,
}

impl SessionReport {
    /// Build a report from a completed session.
    pub fn from_session(
        quiz: &QuizDefinition,
        session: &QuizSession,
    ) -> Result<Self, QuizError> {
        let result = session.result().ok_or(QuizError::Incomplete {
            answered: session.answered(),
            total: session.questions().len(),
        })?;

        let tied = tied_leaders(&result.scores);

        Ok(Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            quiz: QuizSummary {
                id: quiz.id.clone(),
                name: quiz.name.clone(),
                question_count: session.questions().len(),
            },
            answers: session.answers().to_vec(),
            scores: result.scores.clone(),
            winner: result.winner.clone(),
            tied: if tied.len() > 1 { tied } else { Vec::new() },
        })
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: SessionReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Answer, QuestionId};
    use crate::reference;

    fn finished(answers: &[Answer]) -> (QuizDefinition, QuizSession) {
        let quiz = reference::quiz();
        let mut session = QuizSession::for_quiz(&quiz);
        for (i, a) in answers.iter().enumerate() {
            session.submit_answer(QuestionId(i as u32 + 1), *a).unwrap();
        }
        (quiz, session)
    }

    #[test]
    fn report_requires_completion() {
        let (quiz, session) = finished(&[Answer::Yes, Answer::No]);
        let err = SessionReport::from_session(&quiz, &session).unwrap_err();
        assert_eq!(
            err,
            QuizError::Incomplete {
                answered: 2,
                total: 8
            }
        );
    }

    #[test]
    fn save_and_load_json() {
        let (quiz, session) = finished(&[Answer::No; 8]);
        let report = SessionReport::from_session(&quiz, &session).unwrap();
        assert_eq!(report.answers.len(), 8);
        assert_eq!(report.quiz.question_count, 8);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports/session.json");
        report.save_json(&path).unwrap();

        let loaded = SessionReport::load_json(&path).unwrap();
        assert_eq!(loaded.id, report.id);
        assert_eq!(loaded.winner, report.winner);
        assert_eq!(loaded.scores, report.scores);

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"role\": \"pilot\""));
    }

    #[test]
    fn load_missing_file_names_path() {
        let err = SessionReport::load_json(Path::new("no/such/report.json")).unwrap_err();
        assert!(err.to_string().contains("no/such/report.json"));
    }
}
