use thiserror::Error;

use crate::card::CardColor;

/// Construction or snapshot data that cannot describe a legal round or game.
/// Nothing is built when one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Not enough players ({0})")]
    NotEnoughPlayers(usize),
    #[error("Too many players ({0})")]
    TooManyPlayers(usize),
    #[error("Dealer {dealer} is out of range for {players} players")]
    InvalidDealer { dealer: usize, players: usize },
    #[error("Player in turn {player} is out of range for {players} players")]
    InvalidPlayerInTurn { player: usize, players: usize },
    #[error("Cannot deal {cards_per_player} cards to each of {players} players")]
    InvalidCardsPerPlayer {
        cards_per_player: usize,
        players: usize,
    },
    #[error("A wild card was flipped and no shuffler is available")]
    MissingShuffler,
    #[error("{hands} hands for {players} players")]
    HandCountMismatch { hands: usize, players: usize },
    #[error("Discard pile is empty")]
    EmptyDiscardPile,
    #[error("More than one player has an empty hand")]
    MultipleWinners,
    #[error("No player in turn although the round has not ended")]
    MissingPlayerInTurn,
    #[error("A player is in turn although the round has ended")]
    PlayerInTurnAfterEnd,
    #[error("Current color {current} does not match the top card color {top}")]
    ColorMismatch { current: CardColor, top: CardColor },
    #[error("Cards do not form a standard deck")]
    DeckMismatch,
    #[error("UNO window target {0} is invalid")]
    InvalidUnoWindow(usize),
    #[error("UNO announcement for unknown player {0}")]
    InvalidAnnouncement(usize),
    #[error("Invalid card record: {0}")]
    InvalidCard(&'static str),
    #[error("Card number {0} is out of range")]
    InvalidCardNumber(u8),
    #[error("Target score must be positive")]
    InvalidTargetScore,
    #[error("{scores} scores for {players} players")]
    ScoreCountMismatch { scores: usize, players: usize },
    #[error("More than one player has reached the target score")]
    MultipleGameWinners,
    #[error("An unfinished game needs a current round")]
    MissingRound,
    #[error("A finished game cannot have a current round")]
    RoundAfterGameEnd,
    #[error("An unfinished game cannot hold a round that has already ended")]
    EndedRoundInGame,
    #[error("Round players do not match game players")]
    PlayersMismatch,
}

/// An action that is not allowed in the current state. The state is left
/// untouched, so the caller may retry with a legal action.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("Round has already ended")]
    RoundEnded,
    #[error("Game is over")]
    GameOver,
    #[error("Player index {0} is out of range")]
    InvalidPlayer(usize),
    #[error("Card index {0} is out of range")]
    InvalidCardIndex(usize),
    #[error("Card at index {0} cannot be played")]
    IllegalPlay(usize),
    #[error("A color must be chosen for a wild card")]
    MissingColor,
    #[error("A color can only be chosen for a wild card")]
    UnexpectedColor,
    #[error("There are no cards left to draw")]
    EmptyDrawPile,
    #[error("The draw pile must be rebuilt and no shuffler is available")]
    MissingShuffler,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnoError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Action(#[from] ActionError),
}

pub type Result<T, E = UnoError> = std::result::Result<T, E>;
