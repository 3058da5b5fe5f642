use std::fmt;

use whot_types::formatting::{cards, possessive};
use whot_types::{Card, EventKind};

/// Identity of the game fact behind a signal.
///
/// Two signals with the same kind and cause describe the same fact, however
/// many snapshots repeat it. Distinct from a notification's display id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CauseKey {
    /// Penalty counter moved `from -> to` with `card` on the discard pile.
    Penalty { from: u32, to: u32, card: Option<Card> },
    /// Acting seat moved `from -> to` with `card` on the discard pile.
    Seat { from: usize, to: usize, card: Option<Card> },
    /// A specific discard-pile card.
    Card(Card),
    /// Opponent slot hand size moved `from -> to`.
    Hand { slot: usize, from: u32, to: u32 },
    /// The `episode`-th time an opponent slot reached one card.
    LastCard { slot: usize, episode: u32 },
    /// Match won by `seat`.
    Winner(usize),
}

/// Recognized penalty stacking progressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PenaltyFamily {
    /// 2, 4, 6, 8, ...
    PickTwo,
    /// 3, 6, 9, 12, ...
    PickThree,
}

impl PenaltyFamily {
    /// Classify a stack of `delta` onto an outstanding `previous` penalty.
    /// Returns `None` for any pair outside the known progressions.
    pub fn classify(previous: u32, delta: u32) -> Option<Self> {
        match delta {
            2 if previous >= 2 && previous % 2 == 0 => Some(PenaltyFamily::PickTwo),
            3 if previous >= 3 && previous % 3 == 0 => Some(PenaltyFamily::PickThree),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PenaltyFamily::PickTwo => "Pick 2",
            PenaltyFamily::PickThree => "Pick 3",
        }
    }
}

/// A stack played on top of an outstanding penalty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stack {
    pub previous: u32,
    pub delta: u32,
    pub family: Option<PenaltyFamily>,
}

/// Outcomes inferred from a snapshot transition.
///
/// Every detector reports through this one closed enum so the notification
/// center can treat them uniformly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameSignal {
    /// The local player played a penalty card (fresh or stacked).
    PenaltyIssued {
        total: u32,
        stack: Option<Stack>,
        target: String,
        cause: CauseKey,
    },
    /// The local player drew an outstanding penalty.
    PenaltyCleared {
        drawn: u32,
        issuer: String,
        cause: CauseKey,
    },
    /// The local player's turn was skipped.
    TurnSkipped { by: String, cause: CauseKey },
    /// An opponent played General Market.
    GeneralMarket {
        by: String,
        card: Card,
        cause: CauseKey,
    },
    /// An opponent drew from the deck.
    Draw {
        opponent: String,
        drawn: u32,
        hand: u32,
        cause: CauseKey,
    },
    /// An opponent is down to one card.
    LastCard { opponent: String, cause: CauseKey },
    /// The match ended.
    MatchFinished {
        won: bool,
        winner: String,
        cause: CauseKey,
    },
}

impl GameSignal {
    pub fn kind(&self) -> EventKind {
        match self {
            GameSignal::PenaltyIssued { .. } => EventKind::PenaltyIssued,
            GameSignal::PenaltyCleared { .. } => EventKind::PenaltyCleared,
            GameSignal::TurnSkipped { .. } => EventKind::TurnSkipped,
            GameSignal::GeneralMarket { .. } => EventKind::GeneralMarket,
            GameSignal::Draw { .. } => EventKind::Draw,
            GameSignal::LastCard { .. } => EventKind::LastCard,
            GameSignal::MatchFinished { .. } => EventKind::MatchFinished,
        }
    }

    pub fn cause(&self) -> CauseKey {
        match self {
            GameSignal::PenaltyIssued { cause, .. }
            | GameSignal::PenaltyCleared { cause, .. }
            | GameSignal::TurnSkipped { cause, .. }
            | GameSignal::GeneralMarket { cause, .. }
            | GameSignal::Draw { cause, .. }
            | GameSignal::LastCard { cause, .. }
            | GameSignal::MatchFinished { cause, .. } => *cause,
        }
    }

    /// Player-facing text.
    pub fn message(&self) -> String {
        match self {
            GameSignal::PenaltyIssued {
                total,
                stack: None,
                target,
                ..
            } => match total {
                2 | 3 => format!(
                    "Pick {total} sent! {target} must draw {total} cards \
                     or block with another Pick {total}."
                ),
                n => format!("Penalty sent! {target} must draw {} or block.", cards(*n)),
            },
            GameSignal::PenaltyIssued {
                total,
                stack: Some(stack),
                target,
                ..
            } => match stack.family {
                Some(family) => format!(
                    "You blocked with {}! {target} now faces {} total!",
                    family.label(),
                    cards(*total)
                ),
                None => format!(
                    "You stacked +{}! {target} now faces {} total!",
                    stack.delta,
                    cards(*total)
                ),
            },
            GameSignal::PenaltyCleared { drawn, issuer, .. } => match drawn {
                2 => format!("You drew 2 cards from {} Pick 2.", possessive(issuer)),
                3 => format!("You drew 3 cards from {} Pick 3.", possessive(issuer)),
                4 => "You drew 4 cards from stacked Pick 2's! (2+2)".to_string(),
                6 => "You drew 6 cards from stacked Pick 3's! (3+3)".to_string(),
                n => format!("You drew {} from stacked penalties!", cards(*n)),
            },
            GameSignal::TurnSkipped { by, .. } => {
                format!("Hold On! {by} skipped your turn.")
            }
            GameSignal::GeneralMarket { by, card, .. } => format!(
                "{by} played {} for General Market so you get one extra card added",
                card.rank
            ),
            GameSignal::Draw {
                opponent,
                drawn,
                hand,
                ..
            } => format!(
                "{opponent} drew {} from deck. Current hand: {}",
                cards(*drawn),
                cards(*hand)
            ),
            GameSignal::LastCard { opponent, .. } => {
                format!("{opponent} has only 1 card left! Be careful, they're about to win!")
            }
            GameSignal::MatchFinished { won: true, .. } => "You won the match!".to_string(),
            GameSignal::MatchFinished { winner, .. } => format!("{winner} won the match."),
        }
    }
}

impl fmt::Display for GameSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind(), self.message())
    }
}
