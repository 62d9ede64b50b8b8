use std::fmt;

use tracing::{debug, info, trace};

use crate::card::{ActionKind, Card, CardColor};
use crate::config::RoundConfig;
use crate::constants::UNO_PENALTY_CARDS;
use crate::error::{ActionError, ValidationError};
use crate::pile::Pile;
use crate::player::Player;
use crate::random::BoxedShuffler;
use crate::snapshot::RoundSnapshot;
use crate::turn::{Direction, RoundOutcome, UnoWindow};

/// One hand of UNO, from the deal until a player runs out of cards.
pub struct Round {
    players: Vec<Player>,
    dealer: usize,
    draw_pile: Pile,
    discard_pile: Pile,
    current_color: CardColor,
    direction: Direction,
    player_in_turn: Option<usize>,
    uno_window: Option<UnoWindow>,
    winner: Option<usize>,
    shuffler: Option<BoxedShuffler>,
}

impl Round {
    /// Deals a fresh round and applies the effect of the first discard.
    ///
    /// Without a shuffler the deck is dealt in its standard order.
    pub fn new(config: &RoundConfig, mut shuffler: Option<BoxedShuffler>) -> Result<Self, ValidationError> {
        config.validate()?;

        let mut deck = Pile::standard();
        if let Some(shuffler) = shuffler.as_mut() {
            deck.shuffle(&mut **shuffler);
        }

        let mut players = Vec::with_capacity(config.players.len());
        for name in &config.players {
            let cards = (0..config.cards_per_player)
                .filter_map(|_| deck.deal())
                .collect::<Vec<_>>();
            players.push(Player::new(name.clone(), cards));
        }

        let (first, current_color) = flip_starting_card(&mut deck, &mut shuffler, config)?;

        let mut round = Round {
            players,
            dealer: config.dealer,
            draw_pile: deck,
            discard_pile: Pile::from(vec![first]),
            current_color,
            direction: Direction::Clockwise,
            player_in_turn: None,
            uno_window: None,
            winner: None,
            shuffler,
        };

        let dealer = round.dealer;
        let player_in_turn = match first {
            Card::Action {
                kind: ActionKind::Reverse,
                ..
            } => {
                round.direction = Direction::CounterClockwise;
                round.step_from(dealer, 1)
            }
            Card::Action {
                kind: ActionKind::Skip,
                ..
            } => round.step_from(dealer, 2),
            Card::Action {
                kind: ActionKind::DrawTwo,
                ..
            } => {
                let victim = round.step_from(dealer, 1);
                round.give_cards(victim, 2);
                round.step_from(dealer, 2)
            }
            _ => round.step_from(dealer, 1),
        };
        round.player_in_turn = Some(player_in_turn);

        debug!(
            players = round.players.len(),
            dealer,
            first = %first,
            player_in_turn,
            "round dealt"
        );

        Ok(round)
    }

    /// Rebuilds a round from a snapshot after checking every invariant.
    pub fn from_snapshot(
        snapshot: RoundSnapshot,
        shuffler: Option<BoxedShuffler>,
    ) -> Result<Self, ValidationError> {
        snapshot.validate()?;

        let RoundSnapshot {
            players,
            hands,
            draw_pile,
            discard_pile,
            current_color,
            current_direction,
            dealer,
            player_in_turn,
            uno_window,
            pre_announced,
        } = snapshot;

        let winner = hands.iter().position(Vec::is_empty);
        let mut players = players
            .into_iter()
            .zip(hands)
            .map(|(name, hand)| Player::new(name, hand))
            .collect::<Vec<_>>();
        for index in pre_announced {
            players[index].uno();
        }

        Ok(Round {
            players,
            dealer,
            draw_pile: Pile::from(draw_pile),
            discard_pile: Pile::from(discard_pile),
            current_color,
            direction: current_direction,
            player_in_turn,
            uno_window,
            winner,
            shuffler,
        })
    }

    pub fn to_snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            players: self.players.iter().map(|p| p.name.clone()).collect(),
            hands: self.players.iter().map(|p| p.hand.clone()).collect(),
            draw_pile: self.draw_pile.to_snapshot(),
            discard_pile: self.discard_pile.to_snapshot(),
            current_color: self.current_color,
            current_direction: self.direction,
            dealer: self.dealer,
            player_in_turn: self.player_in_turn,
            uno_window: self.uno_window,
            pre_announced: self
                .players
                .iter()
                .enumerate()
                .filter(|(_, p)| p.uno_announced)
                .map(|(index, _)| index)
                .collect(),
        }
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn player(&self, index: usize) -> Option<&str> {
        self.players.get(index).map(|p| p.name.as_str())
    }

    pub fn player_hand(&self, index: usize) -> Option<&[Card]> {
        self.players.get(index).map(|p| p.hand.as_slice())
    }

    pub fn draw_pile(&self) -> &Pile {
        &self.draw_pile
    }

    pub fn discard_pile(&self) -> &Pile {
        &self.discard_pile
    }

    pub fn top_card(&self) -> Option<&Card> {
        self.discard_pile.peek()
    }

    pub fn current_color(&self) -> CardColor {
        self.current_color
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn player_in_turn(&self) -> Option<usize> {
        self.player_in_turn
    }

    pub fn dealer(&self) -> usize {
        self.dealer
    }

    pub fn has_ended(&self) -> bool {
        self.winner.is_some()
    }

    pub fn winner(&self) -> Option<usize> {
        self.winner
    }

    /// Points scored by the winner: the value of every card left in the other hands.
    pub fn score(&self) -> Option<u32> {
        self.winner.map(|winner| self.score_for(winner))
    }

    pub fn is_accusation_window_open(&self) -> bool {
        self.uno_window.is_some()
    }

    pub fn accusation_target(&self) -> Option<usize> {
        self.uno_window.map(|window| window.target)
    }

    pub fn has_called_uno(&self, player: usize) -> Option<bool> {
        let said_in_window = matches!(
            self.uno_window,
            Some(UnoWindow { target, said: true }) if target == player
        );
        self.players
            .get(player)
            .map(|p| p.uno_announced || said_in_window)
    }

    /// Hands the shuffler back, e.g. so it can be reused for the next round.
    pub fn take_shuffler(&mut self) -> Option<BoxedShuffler> {
        self.shuffler.take()
    }

    /// Whether the player in turn may play the card at `index` of their hand.
    pub fn can_play(&self, index: usize) -> bool {
        let Some(player) = self.player_in_turn else {
            return false;
        };
        let hand = &self.players[player].hand;
        let (Some(card), Some(top)) = (hand.get(index), self.discard_pile.peek()) else {
            return false;
        };

        match card {
            Card::Wild => true,
            Card::WildDrawFour => !hand
                .iter()
                .enumerate()
                .any(|(i, other)| i != index && other.color() == Some(self.current_color)),
            _ if top.is_wild() => card.color() == Some(self.current_color),
            Card::Numbered { color, number } => {
                *color == self.current_color
                    || matches!(top, Card::Numbered { number: top_number, .. } if top_number == number)
            }
            Card::Action { kind, color } => {
                *color == self.current_color
                    || matches!(top, Card::Action { kind: top_kind, .. } if top_kind == kind)
            }
        }
    }

    pub fn can_play_any(&self) -> bool {
        self.player_in_turn
            .map(|player| (0..self.players[player].cards_count()).any(|i| self.can_play(i)))
            .unwrap_or(false)
    }

    /// Plays the card at `index` from the hand of the player in turn.
    ///
    /// `chosen_color` is required for wild cards and rejected for every other card.
    pub fn play(
        &mut self,
        index: usize,
        chosen_color: Option<CardColor>,
    ) -> Result<RoundOutcome, ActionError> {
        let player = self.player_in_turn.ok_or(ActionError::RoundEnded)?;
        let card = *self.players[player]
            .hand
            .get(index)
            .ok_or(ActionError::InvalidCardIndex(index))?;
        if !self.can_play(index) {
            return Err(ActionError::IllegalPlay(index));
        }
        let color = match (card.color(), chosen_color) {
            (Some(own), None) => own,
            (Some(_), Some(_)) => return Err(ActionError::UnexpectedColor),
            (None, Some(chosen)) => chosen,
            (None, None) => return Err(ActionError::MissingColor),
        };
        let penalty = card.draw_penalty();
        if penalty > 0 {
            self.ensure_can_deal(penalty, self.discard_pile.len() + 1)?;
        }

        self.players[player].remove_card(index);
        self.discard_pile.push_top(card);
        self.current_color = color;
        debug!(player, card = %card, color = %color, "card played");

        let seat = &mut self.players[player];
        let announced = std::mem::take(&mut seat.uno_announced);
        self.uno_window = (seat.cards_count() == 1).then_some(UnoWindow {
            target: player,
            said: announced,
        });

        let next = match card {
            Card::Action {
                kind: ActionKind::Skip,
                ..
            } => self.step_from(player, 2),
            Card::Action {
                kind: ActionKind::Reverse,
                ..
            } if self.players.len() == 2 => self.step_from(player, 2),
            Card::Action {
                kind: ActionKind::Reverse,
                ..
            } => {
                self.direction = self.direction.reversed();
                self.step_from(player, 1)
            }
            _ if penalty > 0 => {
                let victim = self.step_from(player, 1);
                self.give_cards(victim, penalty);
                debug!(victim, cards = penalty, "penalty cards drawn");
                self.step_from(victim, 1)
            }
            _ => self.step_from(player, 1),
        };

        if self.players[player].hand.is_empty() {
            let score = self.score_for(player);
            self.player_in_turn = None;
            self.uno_window = None;
            self.winner = Some(player);
            info!(winner = player, score, "round ended");
            return Ok(RoundOutcome::Ended {
                winner: player,
                score,
            });
        }

        self.player_in_turn = Some(next);
        Ok(RoundOutcome::Continues)
    }

    /// Draws one card for the player in turn. The turn passes on unless the
    /// drawn card can be played right away.
    pub fn draw(&mut self) -> Result<RoundOutcome, ActionError> {
        let player = self.player_in_turn.ok_or(ActionError::RoundEnded)?;
        if self.draw_pile.is_empty() {
            if self.discard_pile.len() <= 1 {
                return Err(ActionError::EmptyDrawPile);
            }
            if self.shuffler.is_none() {
                return Err(ActionError::MissingShuffler);
            }
            self.rebuild_draw_pile();
        }

        self.uno_window = None;
        let card = self.draw_pile.deal().ok_or(ActionError::EmptyDrawPile)?;
        self.players[player].add_card(card);
        if self.draw_pile.is_empty() {
            self.rebuild_draw_pile();
        }

        let drawn = self.players[player].cards_count() - 1;
        let playable = self.can_play(drawn);
        if !playable {
            self.player_in_turn = Some(self.step_from(player, 1));
        }
        debug!(player, card = %card, playable, "card drawn");

        Ok(RoundOutcome::Continues)
    }

    /// Declares UNO for `player`.
    ///
    /// The player in turn announces ahead of the play that brings them down to
    /// one card. The target of an open accusation window protects themselves
    /// from being caught. Any other call changes nothing.
    pub fn say_uno(&mut self, player: usize) -> Result<(), ActionError> {
        if player >= self.players.len() {
            return Err(ActionError::InvalidPlayer(player));
        }
        if self.has_ended() {
            return Err(ActionError::RoundEnded);
        }

        let mut heard = false;
        if let Some(window) = self.uno_window.as_mut().filter(|w| w.target == player) {
            window.said = true;
            heard = true;
        }
        if self.player_in_turn == Some(player) {
            self.players[player].uno();
            heard = true;
        }

        if heard {
            debug!(player, "UNO said");
        } else {
            debug!(player, "UNO call ignored");
        }
        Ok(())
    }

    /// Accuses `accused` of not having said UNO. On success the accused draws
    /// four cards and the accusation window closes.
    pub fn catch_uno_failure(&mut self, accuser: usize, accused: usize) -> Result<bool, ActionError> {
        for index in [accuser, accused] {
            if index >= self.players.len() {
                return Err(ActionError::InvalidPlayer(index));
            }
        }

        match self.uno_window {
            Some(UnoWindow { target, said: false }) if target == accused => {}
            _ => return Ok(false),
        }
        self.ensure_can_deal(UNO_PENALTY_CARDS, self.discard_pile.len())?;

        self.give_cards(accused, UNO_PENALTY_CARDS);
        self.uno_window = None;
        self.players[accused].uno_announced = false;
        info!(accuser, accused, "missing UNO call caught");

        Ok(true)
    }

    fn step_from(&self, from: usize, steps: usize) -> usize {
        self.direction.step(from, steps, self.players.len())
    }

    fn score_for(&self, winner: usize) -> u32 {
        self.players
            .iter()
            .enumerate()
            .filter(|(index, _)| *index != winner)
            .map(|(_, p)| p.hand_points())
            .sum()
    }

    /// Fails when dealing `count` cards would need a rebuild of the draw pile
    /// that cannot happen for lack of a shuffler.
    fn ensure_can_deal(&self, count: usize, discard_len: usize) -> Result<(), ActionError> {
        if self.shuffler.is_none() && self.draw_pile.len() < count && discard_len > 1 {
            return Err(ActionError::MissingShuffler);
        }
        Ok(())
    }

    fn give_cards(&mut self, player: usize, count: usize) {
        for _ in 0..count {
            if self.draw_pile.is_empty() {
                self.rebuild_draw_pile();
            }
            match self.draw_pile.deal() {
                Some(card) => self.players[player].add_card(card),
                None => break,
            }
        }
    }

    /// Shuffles everything below the top discard back into the (empty) draw pile.
    fn rebuild_draw_pile(&mut self) {
        let Some(shuffler) = self.shuffler.as_mut() else {
            debug!("draw pile left empty, no shuffler to rebuild it");
            return;
        };
        let mut cards = self.discard_pile.take_below_top();
        if cards.is_empty() {
            return;
        }
        shuffler.shuffle(&mut cards);
        trace!(cards = cards.len(), "draw pile rebuilt from discard pile");
        cards.extend(self.draw_pile.iter().copied());
        self.draw_pile = Pile::from(cards);
    }
}

fn flip_starting_card(
    deck: &mut Pile,
    shuffler: &mut Option<BoxedShuffler>,
    config: &RoundConfig,
) -> Result<(Card, CardColor), ValidationError> {
    let first = match deck.deal() {
        Some(card) if card.is_wild() => {
            let Some(shuffler) = shuffler.as_mut() else {
                return Err(ValidationError::MissingShuffler);
            };
            deck.push_top(card);
            deck.shuffle(&mut **shuffler);
            deck.deal_colored()
        }
        other => other,
    };

    first
        .and_then(|card| card.color().map(|color| (card, color)))
        .ok_or(ValidationError::InvalidCardsPerPlayer {
            cards_per_player: config.cards_per_player,
            players: config.players.len(),
        })
}

impl fmt::Debug for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Round")
            .field("players", &self.players)
            .field("dealer", &self.dealer)
            .field("draw_pile", &self.draw_pile)
            .field("discard_pile", &self.discard_pile)
            .field("current_color", &self.current_color)
            .field("direction", &self.direction)
            .field("player_in_turn", &self.player_in_turn)
            .field("uno_window", &self.uno_window)
            .field("winner", &self.winner)
            .finish_non_exhaustive()
    }
}
