//! rolequiz-core: weighted role quiz engine.
//!
//! This crate defines the data model, the weight table, the quiz session
//! state machine, and role selection that the rolequiz CLI builds on.

pub mod error;
pub mod model;
pub mod parser;
pub mod reference;
pub mod report;
pub mod selection;
pub mod session;
pub mod weights;

pub use error::{DefinitionError, QuizError};
pub use model::{Answer, AnswerEvent, AnswerRecord, Question, QuestionId, QuizDefinition, Role};
pub use selection::choose_role;
pub use session::{
    NoopObserver, QuizObserver, QuizSession, ScoreBoard, ScoreEntry, SessionResult, SessionState,
    Transition,
};
pub use weights::{AnswerWeights, WeightTable};
