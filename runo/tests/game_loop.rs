mod common;

use common::*;
use runo::{
    ActionError, CardColor, Game, GameConfig, GameOutcome, GameSnapshot, UnoError, ValidationError,
};

/// A game two players into a round where the first player is about to
/// play their last card, worth 7 points to them.
fn about_to_win(scores: Vec<u32>, target_score: u32) -> GameSnapshot {
    GameSnapshot {
        players: create_player_names(2),
        target_score,
        scores,
        cards_per_player: 7,
        current_round: Some(rigged_snapshot(
            vec![vec![red(2)], vec![blue(3), blue(4)]],
            vec![red(1)],
            CardColor::Red,
            Some(0),
        )),
    }
}

fn resume(snapshot: GameSnapshot, dealer: usize) -> Game {
    Game::from_snapshot(snapshot, Box::new(move |_: usize| dealer), Some(Box::new(identity))).unwrap()
}

#[test]
fn new_game_deals_the_first_round() {
    let config = GameConfig::new(create_player_names(4)).with_target_score(200);
    let game = Game::new(config, Box::new(|_: usize| 3), Some(Box::new(identity))).unwrap();

    let round = game.current_round().unwrap();
    assert_eq!(round.dealer(), 3);
    assert_eq!(round.player_in_turn(), Some(0));
    assert_eq!(game.target_score(), 200);
    assert_eq!(game.cards_per_player(), 7);
    assert_eq!(game.scores(), &[0, 0, 0, 0]);
    assert_eq!(game.player_count(), 4);
}

#[test]
fn invalid_config_is_rejected() {
    let config = GameConfig::new(create_player_names(2)).with_target_score(0);
    let error = Game::new(config, Box::new(|_: usize| 0), None).unwrap_err();
    assert_eq!(error, ValidationError::InvalidTargetScore);

    let config = GameConfig::new(create_player_names(11));
    let error = Game::new(config, Box::new(|_: usize| 0), None).unwrap_err();
    assert_eq!(error, ValidationError::TooManyPlayers(11));

    let config = GameConfig::new(create_player_names(10)).with_cards_per_player(10);
    let error = Game::new(config, Box::new(|_: usize| 0), None).unwrap_err();
    assert_eq!(
        error,
        ValidationError::InvalidCardsPerPlayer {
            cards_per_player: 10,
            players: 10
        }
    );
}

#[test]
fn round_winner_is_credited_and_next_round_dealt() {
    let mut game = resume(about_to_win(vec![10, 40], 500), 1);

    let outcome = game.play(0, None).unwrap();

    assert_eq!(
        outcome,
        GameOutcome::RoundEnded {
            winner: 0,
            score: 7,
            next_dealer: 1
        }
    );
    assert_eq!(game.scores(), &[17, 40]);
    assert_eq!(game.winner(), None);

    let round = game.current_round().unwrap();
    assert!(!round.has_ended());
    assert_eq!(round.dealer(), 1);
    assert_eq!(round.player_in_turn(), Some(0));
    assert_eq!(round.player_hand(0).unwrap().len(), 7);
    assert_eq!(total_cards(round), 108);
}

#[test]
fn reaching_the_target_ends_the_game() {
    let mut game = resume(about_to_win(vec![495, 0], 500), 0);

    let outcome = game.play(0, None).unwrap();

    assert_eq!(
        outcome,
        GameOutcome::GameEnded {
            winner: 0,
            score: 7,
            total: 502
        }
    );
    assert_eq!(game.winner(), Some(0));
    assert_eq!(game.score(0), Some(502));
    assert!(game.current_round().is_none());
}

#[test]
fn score_saturates_instead_of_overflowing() {
    let mut game = resume(about_to_win(vec![u32::MAX - 1, 0], u32::MAX), 0);

    let outcome = game.play(0, None).unwrap();

    assert_eq!(
        outcome,
        GameOutcome::GameEnded {
            winner: 0,
            score: 7,
            total: u32::MAX
        }
    );
    assert_eq!(game.winner(), Some(0));
    assert_eq!(game.scores(), &[u32::MAX, 0]);
}

#[test]
fn finished_game_rejects_every_action() {
    let mut game = resume(about_to_win(vec![495, 0], 500), 0);
    game.play(0, None).unwrap();

    let game_over = UnoError::Action(ActionError::GameOver);
    assert_eq!(game.play(0, None), Err(game_over.clone()));
    assert_eq!(game.draw(), Err(game_over.clone()));
    assert_eq!(game.say_uno(1), Err(game_over.clone()));
    assert_eq!(game.catch_uno_failure(1, 0), Err(game_over));
    assert_eq!(game.scores(), &[502, 0]);
}

#[test]
fn finished_game_survives_a_round_trip() {
    let mut game = resume(about_to_win(vec![495, 0], 500), 0);
    game.play(0, None).unwrap();

    let snapshot = game.to_snapshot();
    assert_eq!(snapshot.current_round, None);

    let json = serde_json::to_string(&snapshot).unwrap();
    let restored = resume(serde_json::from_str(&json).unwrap(), 0);

    assert_eq!(restored.winner(), Some(0));
    assert_eq!(restored.to_snapshot(), snapshot);
}

#[test]
fn active_game_survives_a_round_trip() {
    let game = resume(about_to_win(vec![10, 40], 500), 0);
    let snapshot = game.to_snapshot();

    assert_eq!(resume(snapshot.clone(), 0).to_snapshot(), snapshot);
}

#[test]
fn round_errors_pass_through_unchanged() {
    let mut snapshot = about_to_win(vec![0, 0], 500);
    if let Some(round) = snapshot.current_round.as_mut() {
        round.player_in_turn = Some(1);
    }
    let mut game = resume(snapshot, 0);
    let before = game.to_snapshot();

    assert_eq!(
        game.play(0, None),
        Err(UnoError::Action(ActionError::IllegalPlay(0)))
    );
    assert_eq!(
        game.play(9, None),
        Err(UnoError::Action(ActionError::InvalidCardIndex(9)))
    );
    assert_eq!(
        game.say_uno(4),
        Err(UnoError::Action(ActionError::InvalidPlayer(4)))
    );
    assert_eq!(game.to_snapshot(), before);
}

#[test]
fn uno_calls_reach_the_round() {
    let mut snapshot = about_to_win(vec![0, 0], 500);
    snapshot.current_round = Some(rigged_snapshot(
        vec![vec![red(2), red(3)], vec![blue(3), blue(4)]],
        vec![red(1)],
        CardColor::Red,
        Some(0),
    ));
    let mut game = resume(snapshot, 0);

    assert_eq!(game.play(0, None), Ok(GameOutcome::Continues));
    assert_eq!(game.catch_uno_failure(1, 0), Ok(true));
    assert_eq!(game.current_round().unwrap().player_hand(0).unwrap().len(), 5);
}

#[test]
fn invalid_game_snapshot_is_rejected() {
    let snapshot = about_to_win(vec![0], 500);
    let error = Game::from_snapshot(snapshot, Box::new(|_: usize| 0), None).unwrap_err();

    assert_eq!(
        error,
        ValidationError::ScoreCountMismatch {
            scores: 1,
            players: 2
        }
    );
}

#[test]
fn unfinished_game_with_an_ended_round_is_rejected() {
    let mut snapshot = about_to_win(vec![0, 0], 500);
    snapshot.current_round = Some(rigged_snapshot(
        vec![vec![], vec![blue(3), blue(4)]],
        vec![red(2), red(1)],
        CardColor::Red,
        None,
    ));

    let error = Game::from_snapshot(snapshot, Box::new(|_: usize| 0), None).unwrap_err();

    assert_eq!(error, ValidationError::EndedRoundInGame);
}
