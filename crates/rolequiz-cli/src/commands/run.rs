//! The `rolequiz run` command.

use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use rolequiz_core::report::SessionReport;
use rolequiz_core::selection::tied_leaders;
use rolequiz_core::{
    Answer, AnswerEvent, Question, QuestionId, QuizObserver, QuizSession, SessionResult,
};

/// Prints each question as the session asks for it.
struct ConsoleObserver;

impl QuizObserver for ConsoleObserver {
    fn on_question(&mut self, _index: usize, question: &Question) {
        println!("Question {}", question.label());
    }

    fn on_ignored(&mut self, event: &AnswerEvent) {
        match event.question_id {
            Some(id) => eprintln!("  Ignored answer for question {id} (not the current question)"),
            None => eprintln!("  Ignored answer with no question"),
        }
    }

    fn on_complete(&mut self, result: &SessionResult) {
        print_summary(result);
    }
}

pub fn execute(
    quiz_path: Option<PathBuf>,
    answers: Option<String>,
    events: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<()> {
    let quiz = super::load_quiz(quiz_path.as_deref())?;
    let mut session = QuizSession::for_quiz(&quiz).with_observer(ConsoleObserver);

    let total = session.questions().len();
    eprintln!("{} ({} questions)\n", quiz.name, total);
    if session.start().is_none() {
        // Nothing to ask; the observer never fires for an empty quiz.
        if let Some(result) = session.result() {
            print_summary(result);
        }
    } else if let Some(answers) = &answers {
        feed_answers(&mut session, answers)?;
    } else if let Some(events) = &events {
        feed_events(&mut session, events)?;
    } else {
        feed_stdin(&mut session)?;
    }

    anyhow::ensure!(
        session.is_complete(),
        "ran out of answers after {} of {} questions",
        session.answered(),
        total
    );

    if let Some(dir) = &output {
        let report = SessionReport::from_session(&quiz, &session)?;
        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");
        let path = dir.join(format!("session-{timestamp}.json"));
        report.save_json(&path)?;
        eprintln!("Report saved to: {}", path.display());
    }

    Ok(())
}

/// Answer the pending questions in order from a comma-separated list.
fn feed_answers(session: &mut QuizSession, answers: &str) -> Result<()> {
    let parsed = answers
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<Answer>().map_err(|e| anyhow::anyhow!("{}", e)))
        .collect::<Result<Vec<_>>>()?;

    let mut parsed = parsed.into_iter();
    while let Some(question_id) = pending_id(session) {
        let Some(answer) = parsed.next() else {
            break;
        };
        session.submit_answer(question_id, answer)?;
    }

    let extra = parsed.count();
    if extra > 0 {
        eprintln!("Warning: {extra} answer(s) left over after the last question");
    }
    Ok(())
}

/// Replay a JSON lines file of answer events until the session completes.
///
/// Each line is an object with an optional `question_id` and an `answer`
/// normalised by truthiness. Blank lines are skipped.
fn feed_events(session: &mut QuizSession, path: &Path) -> Result<()> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open events file: {}", path.display()))?;

    for (number, line) in BufReader::new(file).lines().enumerate() {
        if session.is_complete() {
            break;
        }
        let line = line.with_context(|| format!("failed to read {}", path.display()))?;
        if line.trim().is_empty() {
            continue;
        }
        let event = parse_event(&line)
            .with_context(|| format!("{}:{}: invalid event", path.display(), number + 1))?;
        session.handle_event(&event)?;
    }
    Ok(())
}

fn parse_event(line: &str) -> Result<AnswerEvent> {
    let value: serde_json::Value = serde_json::from_str(line).context("not valid JSON")?;
    let question_id = match value.get("question_id") {
        None | Some(serde_json::Value::Null) => None,
        Some(id) => {
            let id = id
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| anyhow::anyhow!("question_id must be a non-negative integer"))?;
            Some(QuestionId(id))
        }
    };
    let answer = value
        .get("answer")
        .map(Answer::from_json)
        .unwrap_or(Answer::No);

    Ok(AnswerEvent {
        question_id,
        answer,
    })
}

/// Read answers interactively; unrecognised input is ignored.
fn feed_stdin(session: &mut QuizSession) -> Result<()> {
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read answer from stdin")?;
        let Some(question_id) = pending_id(session) else {
            break;
        };
        match line.parse::<Answer>() {
            Ok(answer) => {
                session.submit_answer(question_id, answer)?;
            }
            Err(_) => {
                tracing::debug!(input = %line.trim(), "unrecognised answer");
                eprintln!("  Please answer yes or no");
            }
        }
        if session.is_complete() {
            break;
        }
    }
    Ok(())
}

fn pending_id(session: &QuizSession) -> Option<QuestionId> {
    session.current_question().map(|q| q.id)
}

fn print_summary(result: &SessionResult) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Role", "Score"]);
    for entry in result.scores.iter() {
        table.add_row(vec![
            Cell::new(entry.role.display_name()),
            Cell::new(entry.score),
        ]);
    }
    println!("\n{table}");

    match &result.winner {
        Some(role) => {
            println!("Your role: {} ({})", role.display_name(), role);
            let tied: Vec<String> = tied_leaders(&result.scores)
                .iter()
                .filter(|r| *r != role)
                .map(|r| r.display_name())
                .collect();
            if !tied.is_empty() {
                println!("Tied with: {}", tied.join(", "));
            }
        }
        None => println!("No role selected: no role scored above zero."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_event_with_target() {
        let event = parse_event(r#"{"question_id": 3, "answer": 1}"#).unwrap();
        assert_eq!(event, AnswerEvent::new(3, Answer::Yes));
    }

    #[test]
    fn parse_event_without_target_or_answer() {
        let event = parse_event(r#"{"answer": "yes"}"#).unwrap();
        assert_eq!(event.question_id, None);

        let event = parse_event(r#"{"question_id": 2}"#).unwrap();
        assert_eq!(event, AnswerEvent::new(2, Answer::No));
    }

    #[test]
    fn parse_event_rejects_bad_ids() {
        assert!(parse_event(r#"{"question_id": -1, "answer": true}"#).is_err());
        assert!(parse_event(r#"{"question_id": "one", "answer": true}"#).is_err());
        assert!(parse_event("not json").is_err());
    }
}
