//! Plain data forms of rounds and games, for persistence and transport.
//!
//! Snapshots are validated when a [`Round`](crate::round::Round) or
//! [`Game`](crate::game::Game) is rebuilt from them; bad data is rejected,
//! never coerced.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::card::{ActionKind, Card, CardColor};
use crate::config::{check_cards_per_player, check_player_count};
use crate::constants::DEFAULT_CARDS_PER_PLAYER;
use crate::error::ValidationError;
use crate::pile::Pile;
use crate::turn::{Direction, UnoWindow};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    Numbered,
    Skip,
    Reverse,
    DrawTwo,
    Wild,
    WildDrawFour,
}

/// The serialized form of a [`Card`]: a type tag plus the fields that type needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CardRecord {
    #[serde(rename = "type")]
    pub kind: CardKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<CardColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u8>,
}

impl From<Card> for CardRecord {
    fn from(card: Card) -> Self {
        let (kind, color, number) = match card {
            Card::Numbered { color, number } => (CardKind::Numbered, Some(color), Some(number)),
            Card::Action { kind, color } => {
                let kind = match kind {
                    ActionKind::Skip => CardKind::Skip,
                    ActionKind::Reverse => CardKind::Reverse,
                    ActionKind::DrawTwo => CardKind::DrawTwo,
                };
                (kind, Some(color), None)
            }
            Card::Wild => (CardKind::Wild, None, None),
            Card::WildDrawFour => (CardKind::WildDrawFour, None, None),
        };
        CardRecord {
            kind,
            color,
            number,
        }
    }
}

impl TryFrom<CardRecord> for Card {
    type Error = ValidationError;

    fn try_from(record: CardRecord) -> Result<Self, Self::Error> {
        let action = |kind| match (record.color, record.number) {
            (Some(color), None) => Ok(Card::Action { kind, color }),
            (None, _) => Err(ValidationError::InvalidCard("action card without color")),
            (Some(_), Some(_)) => Err(ValidationError::InvalidCard("action card with number")),
        };

        match record.kind {
            CardKind::Numbered => match (record.color, record.number) {
                (Some(color), Some(number)) if number <= 9 => Ok(Card::Numbered { color, number }),
                (Some(_), Some(number)) => Err(ValidationError::InvalidCardNumber(number)),
                (None, _) => Err(ValidationError::InvalidCard("numbered card without color")),
                (Some(_), None) => Err(ValidationError::InvalidCard("numbered card without number")),
            },
            CardKind::Skip => action(ActionKind::Skip),
            CardKind::Reverse => action(ActionKind::Reverse),
            CardKind::DrawTwo => action(ActionKind::DrawTwo),
            CardKind::Wild | CardKind::WildDrawFour => {
                if record.color.is_some() || record.number.is_some() {
                    return Err(ValidationError::InvalidCard("wild card with color or number"));
                }
                if record.kind == CardKind::Wild {
                    Ok(Card::Wild)
                } else {
                    Ok(Card::WildDrawFour)
                }
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub players: Vec<String>,
    pub hands: Vec<Vec<Card>>,
    pub draw_pile: Vec<Card>,
    /// Top card first.
    pub discard_pile: Vec<Card>,
    pub current_color: CardColor,
    pub current_direction: Direction,
    pub dealer: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_in_turn: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uno_window: Option<UnoWindow>,
    /// Players who said UNO ahead of the play that leaves them with one card.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pre_announced: Vec<usize>,
}

impl RoundSnapshot {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let players = self.players.len();
        check_player_count(players)?;

        if self.hands.len() != players {
            return Err(ValidationError::HandCountMismatch {
                hands: self.hands.len(),
                players,
            });
        }
        if self.dealer >= players {
            return Err(ValidationError::InvalidDealer {
                dealer: self.dealer,
                players,
            });
        }
        if let Some(player) = self.player_in_turn.filter(|p| *p >= players) {
            return Err(ValidationError::InvalidPlayerInTurn { player, players });
        }

        let top = self
            .discard_pile
            .first()
            .ok_or(ValidationError::EmptyDiscardPile)?;

        let ended = match self.hands.iter().filter(|hand| hand.is_empty()).count() {
            0 => false,
            1 => true,
            _ => return Err(ValidationError::MultipleWinners),
        };
        match (ended, self.player_in_turn) {
            (false, None) => return Err(ValidationError::MissingPlayerInTurn),
            (true, Some(_)) => return Err(ValidationError::PlayerInTurnAfterEnd),
            _ => {}
        }

        if let Some(top_color) = top.color() {
            if top_color != self.current_color {
                return Err(ValidationError::ColorMismatch {
                    current: self.current_color,
                    top: top_color,
                });
            }
        }

        let cards = self
            .hands
            .iter()
            .flatten()
            .chain(&self.draw_pile)
            .chain(&self.discard_pile);
        if !is_standard_deck(cards) {
            return Err(ValidationError::DeckMismatch);
        }

        if let Some(UnoWindow { target, .. }) = self.uno_window {
            if ended || self.hands.get(target).map(Vec::len) != Some(1) {
                return Err(ValidationError::InvalidUnoWindow(target));
            }
        }

        for (index, &player) in self.pre_announced.iter().enumerate() {
            if self.player_in_turn != Some(player) || self.pre_announced[..index].contains(&player) {
                return Err(ValidationError::InvalidAnnouncement(player));
            }
        }

        Ok(())
    }
}

fn default_cards_per_player() -> usize {
    DEFAULT_CARDS_PER_PLAYER
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub players: Vec<String>,
    pub target_score: u32,
    pub scores: Vec<u32>,
    #[serde(default = "default_cards_per_player")]
    pub cards_per_player: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_round: Option<RoundSnapshot>,
}

impl GameSnapshot {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let players = self.players.len();
        check_player_count(players)?;

        if self.target_score == 0 {
            return Err(ValidationError::InvalidTargetScore);
        }
        if self.scores.len() != players {
            return Err(ValidationError::ScoreCountMismatch {
                scores: self.scores.len(),
                players,
            });
        }
        check_cards_per_player(self.cards_per_player, players)?;

        let winners = self
            .scores
            .iter()
            .filter(|score| **score >= self.target_score)
            .count();
        if winners > 1 {
            return Err(ValidationError::MultipleGameWinners);
        }

        match (&self.current_round, winners) {
            (None, 0) => Err(ValidationError::MissingRound),
            (Some(_), 1) => Err(ValidationError::RoundAfterGameEnd),
            (Some(round), _) if round.players != self.players => Err(ValidationError::PlayersMismatch),
            (Some(round), _) => {
                round.validate()?;
                if round.hands.iter().any(Vec::is_empty) {
                    return Err(ValidationError::EndedRoundInGame);
                }
                Ok(())
            }
            (None, _) => Ok(()),
        }
    }
}

fn is_standard_deck<'a>(cards: impl Iterator<Item = &'a Card>) -> bool {
    let mut counts: HashMap<Card, i32> = HashMap::new();
    for card in Pile::standard().iter() {
        *counts.entry(*card).or_default() += 1;
    }
    for card in cards {
        *counts.entry(*card).or_default() -= 1;
    }
    counts.values().all(|count| *count == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cards_serialize_as_tagged_records() {
        let json = serde_json::to_string(&Card::numbered(CardColor::Green, 4)).unwrap();
        assert_eq!(json, r#"{"type":"numbered","color":"green","number":4}"#);

        let json = serde_json::to_string(&Card::action(ActionKind::DrawTwo, CardColor::Red)).unwrap();
        assert_eq!(json, r#"{"type":"draw_two","color":"red"}"#);

        let json = serde_json::to_string(&Card::WildDrawFour).unwrap();
        assert_eq!(json, r#"{"type":"wild_draw_four"}"#);
    }

    #[test]
    fn malformed_card_records_are_rejected() {
        for json in [
            r#"{"type":"numbered","color":"green","number":10}"#,
            r#"{"type":"numbered","number":3}"#,
            r#"{"type":"skip"}"#,
            r#"{"type":"reverse","color":"blue","number":1}"#,
            r#"{"type":"wild","color":"red"}"#,
            r#"{"type":"joker"}"#,
            r#"{"type":"wild","flavor":"x"}"#,
        ] {
            assert!(serde_json::from_str::<Card>(json).is_err(), "{json} should be rejected");
        }
    }

    #[test]
    fn record_conversion_reports_the_problem() {
        let record = CardRecord {
            kind: CardKind::Numbered,
            color: Some(CardColor::Red),
            number: Some(12),
        };
        assert_eq!(Card::try_from(record), Err(ValidationError::InvalidCardNumber(12)));
    }

    #[test]
    fn standard_deck_check_counts_duplicates() {
        let deck = Pile::standard();
        assert!(is_standard_deck(deck.iter()));

        let mut cards = deck.to_snapshot();
        cards[0] = Card::Wild;
        assert!(!is_standard_deck(cards.iter()));
        assert!(!is_standard_deck(deck.iter().skip(1)));
    }
}
