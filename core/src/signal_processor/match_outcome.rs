//! End-of-match detection.

use whot_types::MatchStatus;

use crate::events::{CauseKey, GameSignal};
use crate::state::Tracked;

#[derive(Debug, Clone)]
pub struct MatchOutcomeInput<'a> {
    pub previous: Tracked<MatchStatus>,
    pub current: MatchStatus,
    pub winner: Option<usize>,
    pub local_seat: Option<usize>,
    pub winner_name: &'a str,
}

/// Fires on the transition into `Finished` when a winner is named.
pub fn detect_match_outcome(input: &MatchOutcomeInput<'_>) -> Option<GameSignal> {
    let previous = input.previous.get()?;
    if previous == MatchStatus::Finished || input.current != MatchStatus::Finished {
        return None;
    }
    let winner = input.winner?;

    Some(GameSignal::MatchFinished {
        won: input.local_seat == Some(winner),
        winner: input.winner_name.to_string(),
        cause: CauseKey::Winner(winner),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use MatchStatus::{Finished, InProgress};

    fn input(
        previous: Option<MatchStatus>,
        current: MatchStatus,
        winner: Option<usize>,
    ) -> MatchOutcomeInput<'static> {
        MatchOutcomeInput {
            previous: previous.into(),
            current,
            winner,
            local_seat: Some(1),
            winner_name: "ada",
        }
    }

    #[test]
    fn local_win() {
        let signal = detect_match_outcome(&input(Some(InProgress), Finished, Some(1)));
        assert!(matches!(signal, Some(GameSignal::MatchFinished { won: true, .. })));
    }

    #[test]
    fn opponent_win() {
        let signal = detect_match_outcome(&input(Some(InProgress), Finished, Some(0)));
        assert_eq!(signal.unwrap().message(), "ada won the match.");
    }

    #[test]
    fn only_on_transition() {
        assert!(detect_match_outcome(&input(Some(Finished), Finished, Some(0))).is_none());
        assert!(detect_match_outcome(&input(None, Finished, Some(0))).is_none());
        assert!(detect_match_outcome(&input(Some(InProgress), InProgress, None)).is_none());
    }

    #[test]
    fn finished_without_winner_is_quiet() {
        assert!(detect_match_outcome(&input(Some(InProgress), Finished, None)).is_none());
    }
}
