#![allow(dead_code)]

use runo::{Card, CardColor, Direction, Pile, Round, RoundSnapshot};

pub fn create_player_names(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("Player {}", i + 1)).collect()
}

pub fn identity(_: &mut [Card]) {}

pub fn red(number: u8) -> Card {
    Card::numbered(CardColor::Red, number)
}

pub fn blue(number: u8) -> Card {
    Card::numbered(CardColor::Blue, number)
}

pub fn green(number: u8) -> Card {
    Card::numbered(CardColor::Green, number)
}

/// A snapshot where the given hands and discard pile are in play and the rest
/// of the deck sits in the draw pile in standard order.
pub fn rigged_snapshot(
    hands: Vec<Vec<Card>>,
    discard: Vec<Card>,
    color: CardColor,
    player_in_turn: Option<usize>,
) -> RoundSnapshot {
    let mut rest = Pile::standard().to_snapshot();
    for card in hands.iter().flatten().chain(discard.iter()) {
        let pos = rest
            .iter()
            .position(|c| c == card)
            .expect("card is not left in the deck");
        rest.remove(pos);
    }

    RoundSnapshot {
        players: create_player_names(hands.len()),
        hands,
        draw_pile: rest,
        discard_pile: discard,
        current_color: color,
        current_direction: Direction::Clockwise,
        dealer: 0,
        player_in_turn,
        uno_window: None,
        pre_announced: vec![],
    }
}

pub fn rigged(hands: Vec<Vec<Card>>, discard: Vec<Card>, color: CardColor, player_in_turn: usize) -> Round {
    let snapshot = rigged_snapshot(hands, discard, color, Some(player_in_turn));
    Round::from_snapshot(snapshot, Some(Box::new(identity))).unwrap()
}

pub fn total_cards(round: &Round) -> usize {
    (0..round.player_count())
        .map(|i| round.player_hand(i).unwrap().len())
        .sum::<usize>()
        + round.draw_pile().len()
        + round.discard_pile().len()
}

pub fn hand_sizes(round: &Round) -> Vec<usize> {
    (0..round.player_count())
        .map(|i| round.player_hand(i).unwrap().len())
        .collect()
}
