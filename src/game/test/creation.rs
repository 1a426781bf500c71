//! Game creation, team assignment and name validation tests.

use super::test_utils::*;
use crate::error::GameError;
use crate::game::{CardStatus, Game, GameStatus};

#[test]
fn players_alternate_between_the_two_teams() {
    for count in [4, 5, 8] {
        let game = preparing_game(count, 10);
        for (i, player) in game.players.iter().enumerate() {
            assert_eq!(player.team, game.teams[i % 2].name);
        }
    }
}

#[test]
fn teams_are_fixed_at_creation() {
    let game = preparing_game(4, 10);
    assert_eq!(game.teams[0].name, "Bleue");
    assert_eq!(game.teams[0].color, "#07ABFF");
    assert_eq!(game.teams[1].name, "Jaune");
    assert_eq!(game.teams[1].color, "#FFE41D");
}

#[test]
fn new_game_starts_preparing_at_round_one() {
    let game = preparing_game(4, 10);
    assert_eq!(game.status(), GameStatus::Preparing);
    assert_eq!(game.round(), 1);
    assert_eq!(game.turn(), 1);
    assert!(game.history.is_empty());
    assert!(game.summary().is_none());
    assert!(game.guesser.is_none());
}

#[test]
fn initial_queue_seats_the_first_speaker() {
    // Alice and Chloe are Bleue, Bob and Dan are Jaune. Alice speaks first,
    // so after the initial rotation Jaune leads the queue.
    let game = preparing_game(4, 10);
    assert_eq!(game.speaker, 0);
    assert_eq!(
        queue_snapshot(&game),
        vec![
            ("Jaune".to_string(), vec![1, 3]),
            ("Bleue".to_string(), vec![2, 0]),
        ]
    );
}

#[test]
fn initial_queue_with_uneven_teams() {
    let game = preparing_game(5, 10);
    assert_eq!(game.speaker, 0);
    assert_eq!(
        queue_snapshot(&game),
        vec![
            ("Jaune".to_string(), vec![1, 3]),
            ("Bleue".to_string(), vec![2, 4, 0]),
        ]
    );
}

#[test]
fn player_counts_are_bounded() {
    let cards = dummy_cards(10);
    let options = options_with(10, 3);
    let too_few = Game::new(&names(3), cards.clone(), options.clone(), 0);
    assert_eq!(too_few.unwrap_err(), GameError::TooFewPlayers);
    let too_many = Game::new(&many_names(21), cards, options, 0);
    assert_eq!(too_many.unwrap_err(), GameError::TooManyPlayers);
}

#[test]
fn duplicate_names_are_rejected() {
    let mut players = names(4);
    players.push("Alice".to_string());
    let result = Game::new(&players, dummy_cards(10), options_with(10, 3), 0);
    assert_eq!(result.unwrap_err(), GameError::PlayersNameNotUnique);
}

#[test]
fn duplicate_detection_runs_on_sanitized_names() {
    let mut players = names(4);
    players.push("  <h1>   Alice </h1>  ".to_string());
    let result = Game::new(&players, dummy_cards(10), options_with(10, 3), 0);
    assert_eq!(result.unwrap_err(), GameError::PlayersNameNotUnique);
}

#[test]
fn names_are_sanitized() {
    let mut players = names(3);
    players.push(" <b> Jean   Michel </b>  ".to_string());
    let game = Game::new(&players, dummy_cards(10), options_with(10, 3), 0).unwrap();
    assert_eq!(game.players[3].name, "Jean Michel");
}

#[test]
fn blank_or_oversized_names_are_rejected() {
    let mut players = names(3);
    players.push("  <br/>  ".to_string());
    let result = Game::new(&players, dummy_cards(10), options_with(10, 3), 0);
    assert_eq!(result.unwrap_err(), GameError::InvalidPlayerName);

    let mut players = names(3);
    players.push("x".repeat(31));
    let result = Game::new(&players, dummy_cards(10), options_with(10, 3), 0);
    assert_eq!(result.unwrap_err(), GameError::InvalidPlayerName);
}

#[test]
fn deck_is_seeded_with_fresh_cards() {
    let game = preparing_game(4, 10);
    assert_eq!(game.deck.len(), 10);
    let mut ids = deck_ids(&game);
    ids.sort_unstable();
    assert_eq!(ids, (0..10).collect::<Vec<_>>());
    for card in game.deck.cards() {
        assert_eq!(card.status, CardStatus::ToGuess);
        assert!(card.playing_time.is_none());
    }
}

#[test]
fn out_of_range_options_are_rejected() {
    let result = Game::new(&names(4), dummy_cards(4), options_with(4, 3), 0);
    assert_eq!(result.unwrap_err(), GameError::InvalidGameOptions);

    let result = Game::new(&names(4), dummy_cards(10), options_with(10, 5), 0);
    assert_eq!(result.unwrap_err(), GameError::InvalidGameOptions);

    let mut options = options_with(10, 3);
    options.rounds.turns.time_limit = 5;
    let result = Game::new(&names(4), dummy_cards(10), options, 0);
    assert_eq!(result.unwrap_err(), GameError::InvalidGameOptions);

    let mut options = options_with(10, 3);
    options.cards.difficulties = vec![1, 4];
    let result = Game::new(&names(4), dummy_cards(10), options, 0);
    assert_eq!(result.unwrap_err(), GameError::InvalidGameOptions);
}
