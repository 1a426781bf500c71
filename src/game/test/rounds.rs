//! Round and game lifecycle tests.

use super::test_utils::*;
use crate::game::{CardStatus, GameStatus};

#[test]
fn a_round_is_over_once_every_card_is_guessed() {
    let mut game = playing_game(4, 5);
    let ids = to_guess_ids(&game);
    game.play(&guess_all(&ids[..4])).unwrap();
    assert!(!game.is_round_over());
    assert_eq!(game.round(), 1);

    let remaining = to_guess_ids(&game);
    game.play(&guess_all(&remaining)).unwrap();
    assert_eq!(game.round(), 2);
}

#[test]
fn finishing_a_round_resets_the_deck() {
    let mut game = playing_game(4, 10);
    finish_round(&mut game);

    assert_eq!(game.round(), 2);
    assert_eq!(game.turn(), 1);
    for card in game.deck.cards() {
        assert_eq!(card.status, CardStatus::ToGuess);
        assert!(card.playing_time.is_none());
    }
    // History survives the reset.
    assert_eq!(game.history.len(), 1);
}

#[test]
fn turns_count_up_within_a_round_and_restart_at_one() {
    let mut game = playing_game(4, 10);
    let ids = to_guess_ids(&game);
    game.play(&guess_all(&ids[..3])).unwrap();
    assert_eq!(game.turn(), 2);
    let remaining = to_guess_ids(&game);
    game.play(&guess_all(&remaining[..3])).unwrap();
    assert_eq!(game.turn(), 3);

    let remaining = to_guess_ids(&game);
    game.play(&guess_all(&remaining)).unwrap();
    assert_eq!(game.round(), 2);
    assert_eq!(game.turn(), 1);
}

#[test]
fn round_scores_add_up_to_the_deck_size() {
    let mut game = playing_game(4, 10);
    let ids = to_guess_ids(&game);
    game.play(&guess_all(&ids[..3])).unwrap();
    let remaining = to_guess_ids(&game);
    game.play(&guess_all(&remaining[..3])).unwrap();
    let remaining = to_guess_ids(&game);
    game.play(&guess_all(&remaining)).unwrap();

    let round_total: u32 = game
        .history
        .iter()
        .filter(|entry| entry.round == 1)
        .map(|entry| entry.score)
        .sum();
    assert_eq!(round_total, 10);
}

#[test]
fn the_queue_keeps_rotating_across_round_boundaries() {
    let mut game = playing_game(4, 5);
    finish_round(&mut game);
    // Alice spoke for round 1's single turn; Bob opens round 2.
    assert_eq!(game.speaker, 1);
    finish_round(&mut game);
    assert_eq!(game.speaker, 2);
}

#[test]
fn completing_the_last_round_ends_the_game() {
    let game = finished_game(4, 40);
    assert_eq!(game.status(), GameStatus::Over);

    let summary = game.summary().unwrap();
    assert_eq!(summary.rounds.len(), 3);
    for round in &summary.rounds {
        let total: u32 = round.scores.iter().map(|score| score.score).sum();
        assert_eq!(total, 40);
    }
    assert!(summary.final_scores.is_some());
    assert!(summary.winners.is_some());
}

#[test]
fn counters_freeze_once_the_game_is_over() {
    let game = finished_game(4, 10);
    // Each round took one turn: Alice, then Bob, then Chloe. No rotation
    // happens after the final play.
    assert_eq!(game.round(), 3);
    assert_eq!(game.turn(), 1);
    assert_eq!(game.speaker, 2);
    assert_eq!(game.history.len(), 3);
}

#[test]
fn a_summary_round_is_pushed_as_each_round_closes() {
    let mut game = playing_game(4, 10);
    assert!(game.summary().is_none());

    finish_round(&mut game);
    let summary = game.summary().unwrap();
    assert_eq!(summary.rounds.len(), 1);
    assert_eq!(summary.rounds[0].number, 1);
    assert!(summary.final_scores.is_none());
    assert!(summary.winners.is_none());

    finish_round(&mut game);
    assert_eq!(game.summary().unwrap().rounds.len(), 2);
}
