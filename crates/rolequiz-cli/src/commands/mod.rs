pub mod init;
pub mod run;
pub mod validate;
pub mod weights;

use std::path::Path;

use anyhow::Result;

use rolequiz_core::{parser, reference, QuizDefinition};

/// Load the quiz at `path`, or the built-in reference quiz.
fn load_quiz(path: Option<&Path>) -> Result<QuizDefinition> {
    match path {
        Some(path) => parser::parse_quiz(path),
        None => Ok(reference::quiz()),
    }
}
