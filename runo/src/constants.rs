use strum::EnumCount;

use crate::card::CardColor;

pub(crate) const NUMBER_CARDS_PER_COLOR: &[u8] =
    &[0, 1, 1, 2, 2, 3, 3, 4, 4, 5, 5, 6, 6, 7, 7, 8, 8, 9, 9];
pub(crate) const SKIP_CARDS_PER_COLOR: u8 = 2;
pub(crate) const REVERSE_CARDS_PER_COLOR: u8 = 2;
pub(crate) const DRAW_TWO_CARDS_PER_COLOR: u8 = 2;

pub(crate) const NUMBER_CARDS_IN_DECK: u8 = (NUMBER_CARDS_PER_COLOR.len() * CardColor::COUNT) as u8;
pub(crate) const SKIP_CARDS_IN_DECK: u8 = SKIP_CARDS_PER_COLOR * CardColor::COUNT as u8;
pub(crate) const REVERSE_CARDS_IN_DECK: u8 = REVERSE_CARDS_PER_COLOR * CardColor::COUNT as u8;
pub(crate) const DRAW_TWO_CARDS_IN_DECK: u8 = DRAW_TWO_CARDS_PER_COLOR * CardColor::COUNT as u8;

pub(crate) const WILD_CARDS_IN_DECK: u8 = 4;
pub(crate) const WILD_DRAW_FOUR_CARDS_IN_DECK: u8 = 4;

pub const TOTAL_CARDS_IN_DECK: usize = (NUMBER_CARDS_IN_DECK
    + SKIP_CARDS_IN_DECK
    + REVERSE_CARDS_IN_DECK
    + DRAW_TWO_CARDS_IN_DECK
    + WILD_CARDS_IN_DECK
    + WILD_DRAW_FOUR_CARDS_IN_DECK) as usize;

pub(crate) const WILD_FAMILY_CARDS_IN_DECK: usize =
    (WILD_CARDS_IN_DECK + WILD_DRAW_FOUR_CARDS_IN_DECK) as usize;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 10;
pub const DEFAULT_CARDS_PER_PLAYER: usize = 7;
pub const DEFAULT_TARGET_SCORE: u32 = 500;

pub(crate) const ACTION_CARD_POINTS: u32 = 20;
pub(crate) const WILD_CARD_POINTS: u32 = 50;
pub(crate) const UNO_PENALTY_CARDS: usize = 4;
