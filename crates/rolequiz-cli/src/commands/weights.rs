//! The `rolequiz weights` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use rolequiz_core::Answer;

pub fn execute(quiz_path: Option<PathBuf>) -> Result<()> {
    let quiz = super::load_quiz(quiz_path.as_deref())?;

    let mut header = vec![Cell::new("Question")];
    header.extend(quiz.weights.roles().map(|r| Cell::new(r.display_name())));

    let mut table = Table::new();
    table.set_header(header);

    for question in &quiz.questions {
        let mut row = vec![Cell::new(question.label())];
        for role in quiz.weights.roles() {
            let no = quiz.weights.weight_for(role.as_str(), question.id, Answer::No);
            let yes = quiz.weights.weight_for(role.as_str(), question.id, Answer::Yes);
            let cell = match (no, yes) {
                (Ok(no), Ok(yes)) => format!("{no} / {yes}"),
                _ => "-".to_string(),
            };
            row.push(Cell::new(cell));
        }
        table.add_row(row);
    }

    println!("{}\n", quiz.name);
    println!("{table}");
    println!("\nCells show the weight added for no / yes.");

    Ok(())
}
