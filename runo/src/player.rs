use crate::card::Card;

/// One seat at the table: the player's name, their hand and whether they have
/// announced UNO ahead of their next play.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Player {
    pub(crate) name: String,
    pub(crate) hand: Vec<Card>,
    pub(crate) uno_announced: bool,
}

impl Player {
    pub(crate) fn new(name: String, cards: Vec<Card>) -> Self {
        Self {
            name,
            hand: cards,
            uno_announced: false,
        }
    }

    pub(crate) fn cards_count(&self) -> usize {
        self.hand.len()
    }

    pub(crate) fn add_card(&mut self, card: Card) {
        self.hand.push(card);
        self.uno_announced = false;
    }

    pub(crate) fn remove_card(&mut self, index: usize) -> Card {
        self.hand.remove(index)
    }

    pub(crate) fn uno(&mut self) {
        self.uno_announced = true;
    }

    pub(crate) fn hand_points(&self) -> u32 {
        self.hand.iter().map(Card::points).sum()
    }
}
