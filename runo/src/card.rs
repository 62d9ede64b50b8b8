use core::fmt;
use std::fmt::Display;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumCount as EnumCountMacro, EnumIter, EnumString};

use crate::constants::{ACTION_CARD_POINTS, WILD_CARD_POINTS};
use crate::snapshot::CardRecord;

#[derive(
    Clone,
    Copy,
    Debug,
    Display,
    EnumString,
    EnumCountMacro,
    EnumIter,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum CardColor {
    Red,
    Green,
    Blue,
    Yellow,
}

#[derive(Clone, Copy, Debug, EnumIter, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Skip,
    Reverse,
    DrawTwo,
}

impl Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::Skip => write!(f, "Skip"),
            ActionKind::Reverse => write!(f, "Reverse"),
            ActionKind::DrawTwo => write!(f, "Draw Two"),
        }
    }
}

/// A single UNO card.
///
/// Colored and colorless cards are separate variants, so a wild card can never
/// carry a color of its own. The color chosen when a wild is played lives on the
/// round, not on the card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "CardRecord", into = "CardRecord")]
pub enum Card {
    Numbered { color: CardColor, number: u8 },
    Action { kind: ActionKind, color: CardColor },
    Wild,
    WildDrawFour,
}

impl Card {
    pub fn numbered(color: CardColor, number: u8) -> Self {
        debug_assert!(number <= 9);
        Card::Numbered { color, number }
    }

    pub fn action(kind: ActionKind, color: CardColor) -> Self {
        Card::Action { kind, color }
    }

    pub fn color(&self) -> Option<CardColor> {
        match self {
            Card::Numbered { color, .. } | Card::Action { color, .. } => Some(*color),
            Card::Wild | Card::WildDrawFour => None,
        }
    }

    pub fn is_wild(&self) -> bool {
        matches!(self, Card::Wild | Card::WildDrawFour)
    }

    /// Points this card is worth in the hand of a player who did not win the round.
    pub fn points(&self) -> u32 {
        match self {
            Card::Numbered { number, .. } => u32::from(*number),
            Card::Action { .. } => ACTION_CARD_POINTS,
            Card::Wild | Card::WildDrawFour => WILD_CARD_POINTS,
        }
    }

    /// Number of cards the next player must take when this card is played.
    pub(crate) fn draw_penalty(&self) -> usize {
        match self {
            Card::Action {
                kind: ActionKind::DrawTwo,
                ..
            } => 2,
            Card::WildDrawFour => 4,
            _ => 0,
        }
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Card::Numbered { color, number } => write!(f, "{color} {number}"),
            Card::Action { kind, color } => write!(f, "{color} {kind}"),
            Card::Wild => write!(f, "Wild"),
            Card::WildDrawFour => write!(f, "Wild Draw Four"),
        }
    }
}
