use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::{
    card::{ActionKind, Card, CardColor},
    constants::*,
    random::Shuffler,
};

/// An ordered stack of cards. Index 0 is the top of the pile.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pile(Vec<Card>);

impl Pile {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// The full 108 card deck in its unshuffled order.
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(TOTAL_CARDS_IN_DECK);

        for color in CardColor::iter() {
            // Number Cards
            for number in NUMBER_CARDS_PER_COLOR {
                cards.push(Card::numbered(color, *number));
            }

            // Skip Cards
            for _ in 0..SKIP_CARDS_PER_COLOR {
                cards.push(Card::action(ActionKind::Skip, color));
            }

            // Reverse Cards
            for _ in 0..REVERSE_CARDS_PER_COLOR {
                cards.push(Card::action(ActionKind::Reverse, color));
            }

            // Draw Two Cards
            for _ in 0..DRAW_TWO_CARDS_PER_COLOR {
                cards.push(Card::action(ActionKind::DrawTwo, color));
            }
        }

        for _ in 0..WILD_CARDS_IN_DECK {
            cards.push(Card::Wild);
        }

        for _ in 0..WILD_DRAW_FOUR_CARDS_IN_DECK {
            cards.push(Card::WildDrawFour);
        }

        Self(cards)
    }

    pub fn shuffle(&mut self, shuffler: &mut dyn Shuffler) {
        shuffler.shuffle(&mut self.0);
    }

    /// Removes and returns the top card.
    pub fn deal(&mut self) -> Option<Card> {
        if self.0.is_empty() {
            None
        } else {
            Some(self.0.remove(0))
        }
    }

    pub fn peek(&self) -> Option<&Card> {
        self.0.first()
    }

    pub fn filter<P>(&self, mut predicate: P) -> Pile
    where
        P: FnMut(&Card) -> bool,
    {
        Pile(self.0.iter().filter(|card| predicate(card)).copied().collect())
    }

    pub fn push_top(&mut self, card: Card) {
        self.0.insert(0, card);
    }

    /// Removes the first colored card, leaving the relative order of the rest intact.
    pub(crate) fn deal_colored(&mut self) -> Option<Card> {
        self.0
            .iter()
            .position(|card| !card.is_wild())
            .map(|pos| self.0.remove(pos))
    }

    /// Drains every card below the top one, which stays in place.
    pub(crate) fn take_below_top(&mut self) -> Vec<Card> {
        if self.0.len() <= 1 {
            return Vec::new();
        }
        self.0.drain(1..).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.0
    }

    /// The pile as an ordered list of cards, top first.
    pub fn to_snapshot(&self) -> Vec<Card> {
        self.0.clone()
    }
}

impl From<Vec<Card>> for Pile {
    fn from(cards: Vec<Card>) -> Self {
        Self(cards)
    }
}

impl<'a> IntoIterator for &'a Pile {
    type Item = &'a Card;
    type IntoIter = std::slice::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_card_count_new_deck() {
        assert_eq!(Pile::standard().len(), TOTAL_CARDS_IN_DECK);
    }

    #[test]
    fn standard_deck_composition() {
        let deck = Pile::standard();

        let red = deck.filter(|card| card.color() == Some(CardColor::Red));
        assert_eq!(red.len(), 25);
        assert_eq!(deck.filter(|card| *card == Card::numbered(CardColor::Blue, 0)).len(), 1);
        assert_eq!(deck.filter(|card| *card == Card::numbered(CardColor::Blue, 7)).len(), 2);
        assert_eq!(deck.filter(|card| *card == Card::Wild).len(), 4);
        assert_eq!(deck.filter(|card| *card == Card::WildDrawFour).len(), 4);
        assert_eq!(deck.filter(Card::is_wild).len(), WILD_FAMILY_CARDS_IN_DECK);
    }

    #[test]
    fn deal_removes_the_top_card() {
        let mut pile = Pile::from(vec![Card::Wild, Card::numbered(CardColor::Red, 1)]);

        assert_eq!(pile.peek(), Some(&Card::Wild));
        assert_eq!(pile.deal(), Some(Card::Wild));
        assert_eq!(pile.deal(), Some(Card::numbered(CardColor::Red, 1)));
        assert_eq!(pile.deal(), None);
        assert!(pile.is_empty());
    }

    #[test]
    fn filter_keeps_order() {
        let pile = Pile::from(vec![
            Card::numbered(CardColor::Red, 3),
            Card::Wild,
            Card::numbered(CardColor::Red, 5),
        ]);

        let filtered = pile.filter(|card| !card.is_wild());

        assert_eq!(
            filtered.to_snapshot(),
            vec![
                Card::numbered(CardColor::Red, 3),
                Card::numbered(CardColor::Red, 5)
            ]
        );
        assert_eq!(pile.len(), 3);
    }

    #[test]
    fn shuffle_uses_the_given_shuffler() {
        let mut pile = Pile::from(vec![Card::Wild, Card::WildDrawFour]);
        pile.shuffle(&mut |cards: &mut [Card]| cards.reverse());
        assert_eq!(pile.peek(), Some(&Card::WildDrawFour));
    }

    #[test]
    fn take_below_top_keeps_the_top() {
        let mut pile = Pile::from(vec![
            Card::numbered(CardColor::Green, 1),
            Card::numbered(CardColor::Green, 2),
            Card::numbered(CardColor::Green, 3),
        ]);

        let rest = pile.take_below_top();

        assert_eq!(pile.to_snapshot(), vec![Card::numbered(CardColor::Green, 1)]);
        assert_eq!(rest.len(), 2);
        assert!(pile.take_below_top().is_empty());
    }

    #[test]
    fn deal_colored_skips_wild_cards() {
        let mut pile = Pile::from(vec![
            Card::Wild,
            Card::WildDrawFour,
            Card::numbered(CardColor::Yellow, 4),
        ]);

        assert_eq!(pile.deal_colored(), Some(Card::numbered(CardColor::Yellow, 4)));
        assert_eq!(pile.len(), 2);
        assert_eq!(pile.deal_colored(), None);
    }
}
