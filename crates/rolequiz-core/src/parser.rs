//! TOML quiz parser.
//!
//! Loads quiz definitions from TOML files and directories, renders them back
//! to TOML, and lints them for authoring mistakes.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::DefinitionError;
use crate::model::{Question, QuestionId, QuizDefinition};
use crate::weights::{AnswerWeights, WeightTable};

/// Intermediate TOML structure for quiz files.
#[derive(Debug, Serialize, Deserialize)]
struct TomlQuizFile {
    quiz: TomlQuizHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
    #[serde(default)]
    roles: Vec<TomlRole>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TomlQuizHeader {
    id: String,
    name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    description: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct TomlQuestion {
    id: u32,
    #[serde(default)]
    text: String,
    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    enabled: bool,
}

fn default_true() -> bool {
    true
}

fn is_true(value: &bool) -> bool {
    *value
}

/// Roles are an array of tables so declaration order survives parsing.
#[derive(Debug, Serialize, Deserialize)]
struct TomlRole {
    id: String,
    /// Keyed by question id; TOML keys are always strings.
    #[serde(default)]
    weights: BTreeMap<String, AnswerWeights>,
}

/// Parse a single TOML file into a `QuizDefinition`.
pub fn parse_quiz(path: &Path) -> Result<QuizDefinition> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read quiz file: {}", path.display()))?;

    parse_quiz_str(&content, path)
}

/// Parse a TOML string into a `QuizDefinition` (useful for testing).
pub fn parse_quiz_str(content: &str, source_path: &Path) -> Result<QuizDefinition> {
    let parsed: TomlQuizFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .map(|q| Question {
            id: QuestionId(q.id),
            text: q.text,
            enabled: q.enabled,
        })
        .collect();

    let mut weights = WeightTable::new();
    for role in parsed.roles {
        let entries = role
            .weights
            .into_iter()
            .map(|(key, w)| {
                key.trim()
                    .parse::<u32>()
                    .map(|id| (id, w))
                    .map_err(|_| DefinitionError::InvalidQuestionKey {
                        role: role.id.clone(),
                        key,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        weights = weights.with_role(role.id, entries)?;
    }

    Ok(QuizDefinition {
        id: parsed.quiz.id,
        name: parsed.quiz.name,
        description: parsed.quiz.description,
        questions,
        weights,
    })
}

/// Render a quiz definition as TOML that [`parse_quiz_str`] reads back.
pub fn render_quiz(quiz: &QuizDefinition) -> Result<String> {
    let file = TomlQuizFile {
        quiz: TomlQuizHeader {
            id: quiz.id.clone(),
            name: quiz.name.clone(),
            description: quiz.description.clone(),
        },
        questions: quiz
            .questions
            .iter()
            .map(|q| TomlQuestion {
                id: q.id.get(),
                text: q.text.clone(),
                enabled: q.enabled,
            })
            .collect(),
        roles: quiz
            .weights
            .entries()
            .iter()
            .map(|r| TomlRole {
                id: r.role.to_string(),
                weights: r
                    .weights
                    .iter()
                    .map(|(id, w)| (id.to_string(), *w))
                    .collect(),
            })
            .collect(),
    };

    toml::to_string_pretty(&file).context("failed to serialize quiz")
}

/// Recursively load all `.toml` quiz files from a directory.
pub fn load_quiz_directory(dir: &Path) -> Result<Vec<QuizDefinition>> {
    let mut quizzes = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut paths = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    paths.sort();

    for path in paths {
        if path.is_dir() {
            quizzes.extend(load_quiz_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_quiz(&path) {
                Ok(quiz) => quizzes.push(quiz),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(quizzes)
}

/// A warning from quiz validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The role concerned (if applicable).
    pub role: Option<String>,
    /// The question concerned (if applicable).
    pub question_id: Option<QuestionId>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn quiz(message: impl Into<String>) -> Self {
        Self {
            role: None,
            question_id: None,
            message: message.into(),
        }
    }
}

/// Lint a quiz for authoring mistakes.
///
/// Sessions never run this themselves; a role missing weights for an asked
/// question only surfaces as a lookup error when that question is answered.
pub fn validate_quiz(quiz: &QuizDefinition) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let asked = quiz.enabled_questions();

    if asked.is_empty() {
        warnings.push(ValidationWarning::quiz(
            "quiz has no enabled questions; sessions complete immediately with no role",
        ));
    }
    if quiz.weights.is_empty() {
        warnings.push(ValidationWarning::quiz("quiz declares no roles"));
    }

    // Check for duplicate question IDs
    let mut seen_ids = HashSet::new();
    for q in &quiz.questions {
        if !seen_ids.insert(q.id) {
            warnings.push(ValidationWarning {
                role: None,
                question_id: Some(q.id),
                message: format!("duplicate question ID: {}", q.id),
            });
        }
    }

    // Check for empty question text
    for q in &asked {
        if q.text.trim().is_empty() {
            warnings.push(ValidationWarning {
                role: None,
                question_id: Some(q.id),
                message: "question text is empty".into(),
            });
        }
    }

    let known: HashSet<QuestionId> = quiz.questions.iter().map(|q| q.id).collect();
    for entry in quiz.weights.entries() {
        for q in &asked {
            if !entry.weights.contains_key(&q.id) {
                warnings.push(ValidationWarning {
                    role: Some(entry.role.to_string()),
                    question_id: Some(q.id),
                    message: format!(
                        "role '{}' has no weights for question {}",
                        entry.role, q.id
                    ),
                });
            }
        }

        let mut unknown: Vec<_> = entry
            .weights
            .keys()
            .filter(|id| !known.contains(id))
            .copied()
            .collect();
        unknown.sort();
        for id in unknown {
            warnings.push(ValidationWarning {
                role: Some(entry.role.to_string()),
                question_id: Some(id),
                message: format!(
                    "role '{}' has weights for unknown question {}",
                    entry.role, id
                ),
            });
        }
    }

    // Every session ends with no role when no role can get above zero.
    if !asked.is_empty() && !quiz.weights.is_empty() {
        let reachable = quiz.weights.entries().iter().any(|entry| {
            let best: i64 = asked
                .iter()
                .filter_map(|q| entry.weights.get(&q.id))
                .map(|w| w.no.max(w.yes))
                .fold(0_i64, i64::saturating_add);
            best > 0
        });
        if !reachable {
            warnings.push(ValidationWarning::quiz(
                "no role can reach a positive total; every session ends with no role selected",
            ));
        }
    }

    warnings
}
