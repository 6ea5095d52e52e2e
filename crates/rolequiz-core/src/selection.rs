//! Choosing the winning role from a score board.

use crate::model::Role;
use crate::session::ScoreBoard;

/// Return the role with the strictly greatest total, or `None`.
///
/// Roles are scanned in declaration order and the running best starts at 0.
/// A later role only takes the lead with a strictly greater total, so ties go
/// to the earlier role, and a board where every total is `<= 0` has no winner.
///
/// Ties are not reported separately; callers that need to detect them can
/// inspect the board.
pub fn choose_role(board: &ScoreBoard) -> Option<Role> {
    let mut chosen = None;
    let mut highest = 0_i64;

    for entry in board.iter() {
        if entry.score > highest {
            highest = entry.score;
            chosen = Some(&entry.role);
        }
    }

    chosen.cloned()
}

/// Roles sharing the top total, in declaration order.
///
/// Empty when there is no winner. Used for tie diagnostics only; it does not
/// change which role [`choose_role`] picks.
pub fn tied_leaders(board: &ScoreBoard) -> Vec<Role> {
    let Some(best) = board.iter().map(|e| e.score).max() else {
        return Vec::new();
    };
    if best <= 0 {
        return Vec::new();
    }
    board
        .iter()
        .filter(|e| e.score == best)
        .map(|e| e.role.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(scores: &[(&str, i64)]) -> ScoreBoard {
        ScoreBoard::from_scores(scores.iter().map(|(r, s)| (Role::new(*r), *s)))
    }

    #[test]
    fn highest_total_wins() {
        let b = board(&[("pilot", 12), ("ground_crew", 14), ("observer_corps", 3)]);
        assert_eq!(choose_role(&b), Some(Role::new("ground_crew")));
    }

    #[test]
    fn ties_favour_earlier_role() {
        let b = board(&[("pilot", 8), ("ground_crew", 8)]);
        assert_eq!(choose_role(&b), Some(Role::new("pilot")));

        let b = board(&[("ground_crew", 8), ("pilot", 8)]);
        assert_eq!(choose_role(&b), Some(Role::new("ground_crew")));
    }

    #[test]
    fn non_positive_totals_have_no_winner() {
        assert_eq!(choose_role(&board(&[("pilot", 0), ("ground_crew", 0)])), None);
        assert_eq!(choose_role(&board(&[("pilot", -3), ("ground_crew", -1)])), None);
        assert_eq!(choose_role(&board(&[])), None);
    }

    #[test]
    fn positive_role_after_negative_ones_wins() {
        let b = board(&[("pilot", -5), ("ground_crew", 1)]);
        assert_eq!(choose_role(&b), Some(Role::new("ground_crew")));
    }

    #[test]
    fn tied_leaders_lists_every_tied_role() {
        let b = board(&[("pilot", 8), ("ground_crew", 3), ("army_corporal", 8)]);
        assert_eq!(
            tied_leaders(&b),
            vec![Role::new("pilot"), Role::new("army_corporal")]
        );
        assert!(tied_leaders(&board(&[("pilot", 0)])).is_empty());
    }
}
