//! The `rolequiz validate` command.

use std::path::PathBuf;

use anyhow::Result;

use rolequiz_core::parser;

pub fn execute(quiz_path: PathBuf) -> Result<()> {
    let quizzes = if quiz_path.is_dir() {
        parser::load_quiz_directory(&quiz_path)?
    } else {
        vec![parser::parse_quiz(&quiz_path)?]
    };

    let mut total_warnings = 0;

    for quiz in &quizzes {
        println!(
            "Quiz: {} ({} questions, {} roles)",
            quiz.name,
            quiz.enabled_questions().len(),
            quiz.weights.len()
        );

        let warnings = parser::validate_quiz(quiz);
        for w in &warnings {
            let prefix = match (&w.role, w.question_id) {
                (Some(role), Some(id)) => format!("  [{role} q{id}]"),
                (Some(role), None) => format!("  [{role}]"),
                (None, Some(id)) => format!("  [q{id}]"),
                (None, None) => "  ".to_string(),
            };
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All quizzes valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
