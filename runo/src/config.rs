use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ValidationError;

fn default_cards_per_player() -> usize {
    DEFAULT_CARDS_PER_PLAYER
}

fn default_target_score() -> u32 {
    DEFAULT_TARGET_SCORE
}

/// Everything needed to deal a fresh round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundConfig {
    pub players: Vec<String>,
    pub dealer: usize,
    #[serde(default = "default_cards_per_player")]
    pub cards_per_player: usize,
}

impl RoundConfig {
    pub fn new(players: Vec<String>, dealer: usize) -> Self {
        Self {
            players,
            dealer,
            cards_per_player: DEFAULT_CARDS_PER_PLAYER,
        }
    }

    pub fn with_cards_per_player(mut self, cards_per_player: usize) -> Self {
        self.cards_per_player = cards_per_player;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let players = self.players.len();
        check_player_count(players)?;
        if self.dealer >= players {
            return Err(ValidationError::InvalidDealer {
                dealer: self.dealer,
                players,
            });
        }
        check_cards_per_player(self.cards_per_player, players)
    }
}

/// Settings for a whole match of consecutive rounds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub players: Vec<String>,
    #[serde(default = "default_target_score")]
    pub target_score: u32,
    #[serde(default = "default_cards_per_player")]
    pub cards_per_player: usize,
}

impl GameConfig {
    pub fn new(players: Vec<String>) -> Self {
        Self {
            players,
            target_score: DEFAULT_TARGET_SCORE,
            cards_per_player: DEFAULT_CARDS_PER_PLAYER,
        }
    }

    pub fn with_target_score(mut self, target_score: u32) -> Self {
        self.target_score = target_score;
        self
    }

    pub fn with_cards_per_player(mut self, cards_per_player: usize) -> Self {
        self.cards_per_player = cards_per_player;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_player_count(self.players.len())?;
        if self.target_score == 0 {
            return Err(ValidationError::InvalidTargetScore);
        }
        check_cards_per_player(self.cards_per_player, self.players.len())
    }

    pub(crate) fn round_config(&self, dealer: usize) -> RoundConfig {
        RoundConfig::new(self.players.clone(), dealer).with_cards_per_player(self.cards_per_player)
    }
}

pub(crate) fn check_player_count(players: usize) -> Result<(), ValidationError> {
    if players < MIN_PLAYERS {
        return Err(ValidationError::NotEnoughPlayers(players));
    }
    if players > MAX_PLAYERS {
        return Err(ValidationError::TooManyPlayers(players));
    }
    Ok(())
}

/// The deal must leave more cards than there are wilds in the deck, so a
/// colored starting card can always be found.
pub(crate) fn check_cards_per_player(
    cards_per_player: usize,
    players: usize,
) -> Result<(), ValidationError> {
    let reserved = cards_per_player
        .checked_mul(players)
        .and_then(|dealt| dealt.checked_add(WILD_FAMILY_CARDS_IN_DECK));
    match reserved {
        Some(reserved) if cards_per_player > 0 && reserved < TOTAL_CARDS_IN_DECK => Ok(()),
        _ => Err(ValidationError::InvalidCardsPerPlayer {
            cards_per_player,
            players,
        }),
    }
}
