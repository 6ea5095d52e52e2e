//! The quiz session state machine.
//!
//! A session walks an ordered list of questions. Each accepted answer adds
//! the looked-up weight to every role's total, then either asks for the next
//! question or completes the session and selects a role. Events addressed to
//! anything other than the pending question are ignored.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::QuizError;
use crate::model::{
    Answer, AnswerEvent, AnswerRecord, Question, QuestionId, QuizDefinition, Role,
};
use crate::selection::choose_role;
use crate::weights::WeightTable;

/// One role's running total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub role: Role,
    pub score: i64,
}

/// Per-role totals in weight-table declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreBoard {
    entries: Vec<ScoreEntry>,
}

impl ScoreBoard {
    /// A board with every role of `table` at zero.
    pub fn zeroed(table: &WeightTable) -> Self {
        Self::from_scores(table.roles().map(|r| (r.clone(), 0)))
    }

    pub fn from_scores(scores: impl IntoIterator<Item = (Role, i64)>) -> Self {
        Self {
            entries: scores
                .into_iter()
                .map(|(role, score)| ScoreEntry { role, score })
                .collect(),
        }
    }

    pub fn get(&self, role: &str) -> Option<i64> {
        self.entries
            .iter()
            .find(|e| e.role.as_str() == role)
            .map(|e| e.score)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScoreEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The board with one contribution added per entry, positionally.
    ///
    /// Fails without building a board if any total would overflow.
    fn add(&self, question_id: QuestionId, contributions: &[i64]) -> Result<Self, QuizError> {
        let entries = self
            .entries
            .iter()
            .zip(contributions)
            .map(|(entry, &delta)| {
                entry
                    .score
                    .checked_add(delta)
                    .map(|score| ScoreEntry {
                        role: entry.role.clone(),
                        score,
                    })
                    .ok_or_else(|| QuizError::ScoreOverflow {
                        role: entry.role.to_string(),
                        question_id,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }
}

/// Where a session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for the answer to the question at this index.
    AwaitingAnswer(usize),
    Complete,
}

/// The final outcome of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResult {
    /// The selected role, or `None` when no role scored above zero.
    pub winner: Option<Role>,
    /// Final totals for every role.
    pub scores: ScoreBoard,
}

/// What a call to [`QuizSession::submit_answer`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The event was not addressed to the pending question; nothing changed.
    Ignored,
    /// The answer was recorded; present `question` next.
    Next { index: usize, question: Question },
    /// The last answer was recorded and a role was selected.
    Complete(SessionResult),
}

/// Receives presentation requests and the final result of a session.
pub trait QuizObserver {
    fn on_question(&mut self, index: usize, question: &Question);
    fn on_ignored(&mut self, event: &AnswerEvent);
    fn on_complete(&mut self, result: &SessionResult);
}

/// No-op observer.
pub struct NoopObserver;

impl QuizObserver for NoopObserver {
    fn on_question(&mut self, _: usize, _: &Question) {}
    fn on_ignored(&mut self, _: &AnswerEvent) {}
    fn on_complete(&mut self, _: &SessionResult) {}
}

/// Adapts a completion callback into an observer.
pub struct OnComplete<F>(pub F);

impl<F: FnMut(&SessionResult)> QuizObserver for OnComplete<F> {
    fn on_question(&mut self, _: usize, _: &Question) {}
    fn on_ignored(&mut self, _: &AnswerEvent) {}
    fn on_complete(&mut self, result: &SessionResult) {
        (self.0)(result)
    }
}

/// One run of a question sequence, from the first question to role selection.
pub struct QuizSession {
    questions: Vec<Question>,
    weights: Arc<WeightTable>,
    scores: ScoreBoard,
    answers: Vec<AnswerRecord>,
    result: Option<SessionResult>,
    observer: Box<dyn QuizObserver>,
}

impl QuizSession {
    /// Create a session. With no questions the session starts complete, with
    /// an all-zero board and no winner.
    pub fn new(questions: Vec<Question>, weights: impl Into<Arc<WeightTable>>) -> Self {
        let weights = weights.into();
        let scores = ScoreBoard::zeroed(&weights);
        let result = questions.is_empty().then(|| SessionResult {
            winner: None,
            scores: scores.clone(),
        });

        Self {
            questions,
            weights,
            scores,
            answers: Vec::new(),
            result,
            observer: Box::new(NoopObserver),
        }
    }

    /// Create a session over the enabled questions of a quiz definition.
    pub fn for_quiz(quiz: &QuizDefinition) -> Self {
        Self::new(quiz.enabled_questions(), quiz.weights.clone())
    }

    pub fn with_observer(mut self, observer: impl QuizObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    /// Register a callback fired once with the final result.
    pub fn on_complete(self, callback: impl FnMut(&SessionResult) + 'static) -> Self {
        self.with_observer(OnComplete(callback))
    }

    /// Request presentation of the first question, if any.
    pub fn start(&mut self) -> Option<&Question> {
        if self.result.is_some() {
            return None;
        }
        let index = self.answers.len();
        let question = &self.questions[index];
        self.observer.on_question(index, question);
        Some(question)
    }

    /// Dispatch a raw answer event. Events without a target are ignored.
    pub fn handle_event(&mut self, event: &AnswerEvent) -> Result<Transition, QuizError> {
        match event.question_id {
            Some(question_id) => self.submit_answer(question_id, event.answer),
            None => {
                tracing::debug!("ignoring answer event without a target");
                self.observer.on_ignored(event);
                Ok(Transition::Ignored)
            }
        }
    }

    /// Record the answer to the pending question.
    ///
    /// Answers for any other question are ignored. Fails with
    /// [`QuizError::InvalidState`] once the session is complete and with a
    /// lookup error if the weight table has no entry. A total that would
    /// overflow fails with [`QuizError::ScoreOverflow`]. In every error case
    /// the score board is left untouched.
    pub fn submit_answer(
        &mut self,
        question_id: QuestionId,
        answer: impl Into<Answer>,
    ) -> Result<Transition, QuizError> {
        let answer = answer.into();
        let answered = self.answers.len();

        if self.result.is_some() {
            return Err(QuizError::InvalidState { answered });
        }

        let expected = self.questions[answered].id;
        if question_id != expected {
            tracing::debug!(
                %question_id,
                %expected,
                "ignoring answer for a question that is not pending"
            );
            self.observer.on_ignored(&AnswerEvent {
                question_id: Some(question_id),
                answer,
            });
            return Ok(Transition::Ignored);
        }

        // Resolve every weight before touching the board.
        let contributions = self
            .weights
            .roles()
            .map(|role| self.weights.weight_for(role.as_str(), question_id, answer))
            .collect::<Result<Vec<_>, _>>()?;

        self.scores = self.scores.add(question_id, &contributions)?;
        self.answers.push(AnswerRecord {
            question_id,
            answer,
        });
        tracing::debug!(%question_id, %answer, scores = ?self.scores, "score updated");

        let index = self.answers.len();
        if index == self.questions.len() {
            let result = SessionResult {
                winner: choose_role(&self.scores),
                scores: self.scores.clone(),
            };
            match &result.winner {
                Some(role) => tracing::info!(%role, "quiz complete"),
                None => tracing::info!("quiz complete with no role scoring above zero"),
            }
            self.observer.on_complete(&result);
            self.result = Some(result.clone());
            return Ok(Transition::Complete(result));
        }

        let question = &self.questions[index];
        self.observer.on_question(index, question);
        Ok(Transition::Next {
            index,
            question: question.clone(),
        })
    }

    pub fn state(&self) -> SessionState {
        if self.result.is_some() {
            SessionState::Complete
        } else {
            SessionState::AwaitingAnswer(self.answers.len())
        }
    }

    pub fn is_complete(&self) -> bool {
        self.result.is_some()
    }

    /// The question waiting for an answer, if the session is not complete.
    pub fn current_question(&self) -> Option<&Question> {
        match self.state() {
            SessionState::AwaitingAnswer(index) => self.questions.get(index),
            SessionState::Complete => None,
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answered(&self) -> usize {
        self.answers.len()
    }

    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    /// Running totals. Read-only; only [`Self::submit_answer`] changes them.
    pub fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    pub fn result(&self) -> Option<&SessionResult> {
        self.result.as_ref()
    }

    /// Consume the session, returning its result if it completed.
    pub fn into_result(self) -> Result<SessionResult, QuizError> {
        let total = self.questions.len();
        let answered = self.answers.len();
        self.result.ok_or(QuizError::Incomplete { answered, total })
    }
}

impl std::fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuizSession")
            .field("questions", &self.questions.len())
            .field("state", &self.state())
            .field("scores", &self.scores)
            .finish()
    }
}
