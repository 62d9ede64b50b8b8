use std::fmt;

use tracing::info;

use crate::card::CardColor;
use crate::config::GameConfig;
use crate::error::{ActionError, Result, ValidationError};
use crate::random::{BoxedRandomizer, BoxedShuffler, Randomizer};
use crate::round::Round;
use crate::snapshot::GameSnapshot;
use crate::turn::{GameOutcome, RoundOutcome};

/// A match of consecutive rounds. The winner of each round scores the cards
/// left in the other hands; the first player to reach the target score wins.
pub struct Game {
    config: GameConfig,
    scores: Vec<u32>,
    round: Option<Round>,
    winner: Option<usize>,
    randomizer: BoxedRandomizer,
}

impl Game {
    pub fn new(
        config: GameConfig,
        mut randomizer: BoxedRandomizer,
        shuffler: Option<BoxedShuffler>,
    ) -> Result<Self, ValidationError> {
        config.validate()?;

        let dealer = pick_dealer(&mut *randomizer, config.players.len());
        let round = Round::new(&config.round_config(dealer), shuffler)?;
        info!(
            players = config.players.len(),
            target_score = config.target_score,
            dealer,
            "game started"
        );

        Ok(Game {
            scores: vec![0; config.players.len()],
            config,
            round: Some(round),
            winner: None,
            randomizer,
        })
    }

    pub fn from_snapshot(
        snapshot: GameSnapshot,
        randomizer: BoxedRandomizer,
        shuffler: Option<BoxedShuffler>,
    ) -> Result<Self, ValidationError> {
        snapshot.validate()?;

        let GameSnapshot {
            players,
            target_score,
            scores,
            cards_per_player,
            current_round,
        } = snapshot;

        let winner = scores.iter().position(|score| *score >= target_score);
        let round = current_round
            .map(|round| Round::from_snapshot(round, shuffler))
            .transpose()?;

        Ok(Game {
            config: GameConfig {
                players,
                target_score,
                cards_per_player,
            },
            scores,
            round,
            winner,
            randomizer,
        })
    }

    pub fn to_snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            players: self.config.players.clone(),
            target_score: self.config.target_score,
            scores: self.scores.clone(),
            cards_per_player: self.config.cards_per_player,
            current_round: self.round.as_ref().map(Round::to_snapshot),
        }
    }

    pub fn player_count(&self) -> usize {
        self.config.players.len()
    }

    pub fn player(&self, index: usize) -> Option<&str> {
        self.config.players.get(index).map(String::as_str)
    }

    pub fn score(&self, index: usize) -> Option<u32> {
        self.scores.get(index).copied()
    }

    pub fn scores(&self) -> &[u32] {
        &self.scores
    }

    pub fn target_score(&self) -> u32 {
        self.config.target_score
    }

    pub fn cards_per_player(&self) -> usize {
        self.config.cards_per_player
    }

    pub fn winner(&self) -> Option<usize> {
        self.winner
    }

    pub fn current_round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn play(&mut self, index: usize, chosen_color: Option<CardColor>) -> Result<GameOutcome> {
        let outcome = self.active_round()?.play(index, chosen_color)?;
        self.settle(outcome)
    }

    pub fn draw(&mut self) -> Result<GameOutcome> {
        let outcome = self.active_round()?.draw()?;
        self.settle(outcome)
    }

    pub fn say_uno(&mut self, player: usize) -> Result<()> {
        Ok(self.active_round()?.say_uno(player)?)
    }

    pub fn catch_uno_failure(&mut self, accuser: usize, accused: usize) -> Result<bool> {
        Ok(self.active_round()?.catch_uno_failure(accuser, accused)?)
    }

    fn active_round(&mut self) -> Result<&mut Round, ActionError> {
        self.round.as_mut().ok_or(ActionError::GameOver)
    }

    /// Credits a finished round and either deals the next one or ends the game.
    fn settle(&mut self, outcome: RoundOutcome) -> Result<GameOutcome> {
        let RoundOutcome::Ended { winner, score } = outcome else {
            return Ok(GameOutcome::Continues);
        };

        self.scores[winner] = self.scores[winner].saturating_add(score);
        let total = self.scores[winner];

        if total >= self.config.target_score {
            self.winner = Some(winner);
            self.round = None;
            info!(winner, score, total, "game won");
            return Ok(GameOutcome::GameEnded {
                winner,
                score,
                total,
            });
        }

        let shuffler = self.round.as_mut().and_then(Round::take_shuffler);
        let next_dealer = pick_dealer(&mut *self.randomizer, self.config.players.len());
        self.round = Some(Round::new(&self.config.round_config(next_dealer), shuffler)?);
        info!(winner, score, total, next_dealer, "next round dealt");

        Ok(GameOutcome::RoundEnded {
            winner,
            score,
            next_dealer,
        })
    }
}

fn pick_dealer(randomizer: &mut dyn Randomizer, players: usize) -> usize {
    randomizer.pick(players) % players
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("config", &self.config)
            .field("scores", &self.scores)
            .field("round", &self.round)
            .field("winner", &self.winner)
            .finish_non_exhaustive()
    }
}
