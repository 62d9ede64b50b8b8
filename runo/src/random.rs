//! Randomness is injected into the engine as capabilities so that every round
//! can be replayed deterministically. Any `FnMut(&mut [Card])` is a [`Shuffler`]
//! and any `FnMut(usize) -> usize` is a [`Randomizer`].

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::card::Card;

/// Reorders a sequence of cards in place.
pub trait Shuffler: Send {
    fn shuffle(&mut self, cards: &mut [Card]);
}

impl<F> Shuffler for F
where
    F: FnMut(&mut [Card]) + Send,
{
    fn shuffle(&mut self, cards: &mut [Card]) {
        self(cards)
    }
}

/// Picks a player index, used to choose the dealer of each round.
///
/// Implementations should return a value below `bound`; the game loop reduces
/// the result modulo `bound` before using it.
pub trait Randomizer: Send {
    fn pick(&mut self, bound: usize) -> usize;
}

impl<F> Randomizer for F
where
    F: FnMut(usize) -> usize + Send,
{
    fn pick(&mut self, bound: usize) -> usize {
        self(bound)
    }
}

pub type BoxedShuffler = Box<dyn Shuffler>;
pub type BoxedRandomizer = Box<dyn Randomizer>;

#[derive(Debug, Clone)]
pub struct RandomShuffler(StdRng);

impl RandomShuffler {
    pub fn new() -> Self {
        Self(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl Default for RandomShuffler {
    fn default() -> Self {
        Self::new()
    }
}

impl Shuffler for RandomShuffler {
    fn shuffle(&mut self, cards: &mut [Card]) {
        cards.shuffle(&mut self.0);
    }
}

#[derive(Debug, Clone)]
pub struct RandomDealer(StdRng);

impl RandomDealer {
    pub fn new() -> Self {
        Self(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl Default for RandomDealer {
    fn default() -> Self {
        Self::new()
    }
}

impl Randomizer for RandomDealer {
    fn pick(&mut self, bound: usize) -> usize {
        self.0.gen_range(0..bound)
    }
}
