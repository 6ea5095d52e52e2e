//! Built-in reference quiz: eight wartime roles, eight questions.
//!
//! Each row lists `(no, yes)` weights for questions 1 through 8.

use crate::model::{Question, QuizDefinition};
use crate::weights::{AnswerWeights, WeightTable};

pub const QUIZ_ID: &str = "choose-your-role";

const ROLES: [(&str, [(i64, i64); 8]); 8] = [
    (
        "pilot",
        [(7, 1), (1, 7), (5, 3), (7, 1), (2, 6), (6, 2), (4, 4), (3, 5)],
    ),
    (
        "ground_crew",
        [(6, 2), (2, 6), (4, 4), (1, 7), (6, 2), (3, 5), (6, 2), (1, 7)],
    ),
    (
        "fighter_plotter",
        [(5, 3), (3, 5), (2, 6), (7, 1), (6, 2), (1, 7), (2, 6), (7, 1)],
    ),
    (
        "intelligence_officer",
        [(4, 4), (6, 2), (1, 7), (6, 2), (2, 6), (4, 4), (2, 6), (5, 3)],
    ),
    (
        "communications_officer",
        [(6, 2), (4, 4), (1, 7), (5, 3), (3, 5), (2, 6), (3, 5), (7, 1)],
    ),
    (
        "deputy_controller",
        [(4, 4), (3, 5), (5, 3), (7, 1), (1, 7), (2, 6), (1, 7), (6, 2)],
    ),
    (
        "observer_corps",
        [(6, 2), (3, 5), (7, 1), (4, 4), (3, 5), (1, 7), (5, 3), (2, 6)],
    ),
    (
        "army_corporal",
        [(1, 7), (6, 2), (4, 4), (2, 6), (5, 3), (2, 6), (7, 1), (1, 7)],
    ),
];

const QUESTIONS: [&str; 8] = [
    "Would you rather work on the ground than in the air?",
    "Do you stay calm when things happen very quickly?",
    "Do you enjoy solving puzzles and codes?",
    "Are you happy getting your hands dirty fixing machines?",
    "Do you like telling other people what to do?",
    "Can you concentrate on a map or a table for hours?",
    "Do you prefer working indoors?",
    "Would you volunteer to stand watch through the night?",
];

/// The reference weight table, roles in their declared order.
pub fn weight_table() -> WeightTable {
    let table = ROLES
        .iter()
        .try_fold(WeightTable::new(), |table, (role, rows)| {
            let weights = (1_u32..)
                .zip(rows.iter())
                .map(|(id, &(no, yes))| (id, AnswerWeights::new(no, yes)));
            table.with_role(*role, weights)
        });
    debug_assert!(table.is_ok(), "reference weight table is malformed: {table:?}");
    table.unwrap_or_default()
}

/// The reference questions, ids 1 through 8.
pub fn questions() -> Vec<Question> {
    (1_u32..)
        .zip(QUESTIONS)
        .map(|(id, text)| Question::new(id, text))
        .collect()
}

/// The complete reference quiz.
pub fn quiz() -> QuizDefinition {
    QuizDefinition {
        id: QUIZ_ID.to_string(),
        name: "Choose Your Role".to_string(),
        description: "Answer yes or no to find the role that suits you best.".to_string(),
        questions: questions(),
        weights: weight_table(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Answer, QuestionId};
    use crate::parser::validate_quiz;

    #[test]
    fn table_has_every_role_in_order() {
        let table = weight_table();
        let roles: Vec<&str> = table.roles().map(|r| r.as_str()).collect();
        assert_eq!(
            roles,
            vec![
                "pilot",
                "ground_crew",
                "fighter_plotter",
                "intelligence_officer",
                "communications_officer",
                "deputy_controller",
                "observer_corps",
                "army_corporal",
            ]
        );
    }

    #[test]
    fn spot_check_weights() {
        let table = weight_table();
        assert_eq!(table.weight_for("pilot", QuestionId(1), Answer::No), Ok(7));
        assert_eq!(
            table.weight_for("army_corporal", QuestionId(8), Answer::Yes),
            Ok(7)
        );
        assert_eq!(
            table.weight_for("observer_corps", QuestionId(3), Answer::Yes),
            Ok(1)
        );
    }

    #[test]
    fn every_answer_pair_sums_to_eight() {
        for entry in weight_table().entries() {
            assert_eq!(entry.weights.len(), 8);
            for w in entry.weights.values() {
                assert_eq!(w.no + w.yes, 8, "role {}", entry.role);
            }
        }
    }

    #[test]
    fn reference_quiz_is_clean() {
        assert!(validate_quiz(&quiz()).is_empty());
    }
}
