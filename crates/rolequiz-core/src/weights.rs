//! The weight table: `role -> question -> (no, yes)` score contributions.
//!
//! Roles keep the order they were declared in. That order is the
//! enumeration order used by the score board and the tie-break in
//! [`crate::selection::choose_role`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{DefinitionError, QuizError};
use crate::model::{Answer, QuestionId, Role};

/// Score contributions of one question for one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerWeights {
    pub no: i64,
    pub yes: i64,
}

impl AnswerWeights {
    pub const fn new(no: i64, yes: i64) -> Self {
        Self { no, yes }
    }

    pub fn for_answer(self, answer: Answer) -> i64 {
        match answer {
            Answer::No => self.no,
            Answer::Yes => self.yes,
        }
    }
}

/// The per-question weights of a single role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleWeights {
    pub role: Role,
    pub weights: HashMap<QuestionId, AnswerWeights>,
}

/// Read-only weight table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeightTable {
    roles: Vec<RoleWeights>,
}

impl WeightTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a role with its weights. Declaration order is significant.
    pub fn with_role<I>(
        mut self,
        role: impl Into<Role>,
        weights: I,
    ) -> Result<Self, DefinitionError>
    where
        I: IntoIterator<Item = (u32, AnswerWeights)>,
    {
        let role = role.into();
        if self.role_weights(role.as_str()).is_some() {
            return Err(DefinitionError::DuplicateRole(role.to_string()));
        }
        let mut by_question = HashMap::new();
        for (q, w) in weights {
            let question_id = QuestionId(q);
            if by_question.insert(question_id, w).is_some() {
                return Err(DefinitionError::DuplicateQuestionKey {
                    role: role.to_string(),
                    question_id,
                });
            }
        }
        let weights = by_question;
        self.roles.push(RoleWeights { role, weights });
        Ok(self)
    }

    /// Look up the score contribution of `answer` to `question_id` for `role`.
    pub fn weight_for(
        &self,
        role: &str,
        question_id: QuestionId,
        answer: Answer,
    ) -> Result<i64, QuizError> {
        let entry = self
            .role_weights(role)
            .ok_or_else(|| QuizError::UnknownRole(role.to_string()))?;
        entry
            .weights
            .get(&question_id)
            .map(|w| w.for_answer(answer))
            .ok_or_else(|| QuizError::Lookup {
                role: role.to_string(),
                question_id,
            })
    }

    /// Roles in declaration order.
    pub fn roles(&self) -> impl Iterator<Item = &Role> {
        self.roles.iter().map(|r| &r.role)
    }

    /// Per-role weights in declaration order.
    pub fn entries(&self) -> &[RoleWeights] {
        &self.roles
    }

    pub fn role_weights(&self, role: &str) -> Option<&RoleWeights> {
        self.roles.iter().find(|r| r.role.as_str() == role)
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}
