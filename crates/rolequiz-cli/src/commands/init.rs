//! The `rolequiz init` command.

use std::path::Path;

use anyhow::{Context, Result};

use rolequiz_core::{parser, reference};

pub fn execute() -> Result<()> {
    std::fs::create_dir_all("quizzes")?;
    let path = Path::new("quizzes/reference.toml");
    if path.exists() {
        println!("quizzes/reference.toml already exists, skipping.");
    } else {
        let rendered = parser::render_quiz(&reference::quiz())?;
        std::fs::write(path, rendered)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Created quizzes/reference.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit quizzes/reference.toml with your own questions and weights");
    println!("  2. Run: rolequiz validate --quiz quizzes/reference.toml");
    println!("  3. Run: rolequiz run --quiz quizzes/reference.toml");

    Ok(())
}
