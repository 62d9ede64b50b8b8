//! Rules engine for UNO: dealing, play legality, turn order, special cards, the
//! UNO call and its accusation window, and scoring across rounds.
//!
//! A [`Game`] chains [`Round`]s until a player reaches the target score. Both
//! can be captured as snapshots and resumed later. Randomness is injected
//! through the [`Shuffler`] and [`Randomizer`] capabilities.

pub mod card;
pub mod config;
pub mod constants;
pub mod error;
pub mod game;
pub mod pile;
mod player;
pub mod random;
pub mod round;
pub mod snapshot;
pub mod turn;

pub use card::{ActionKind, Card, CardColor};
pub use config::{GameConfig, RoundConfig};
pub use error::{ActionError, Result, UnoError, ValidationError};
pub use game::Game;
pub use pile::Pile;
pub use random::{RandomDealer, RandomShuffler, Randomizer, Shuffler};
pub use round::Round;
pub use snapshot::{GameSnapshot, RoundSnapshot};
pub use turn::{Direction, GameOutcome, RoundOutcome, UnoWindow};
