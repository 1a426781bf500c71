//! Team reassignment tests.

use super::test_utils::*;
use crate::error::GameError;
use crate::game::{GameStatus, PlayerUpdate};

fn update(id: u32, team: &str) -> PlayerUpdate {
    PlayerUpdate {
        id,
        team: team.to_string(),
    }
}

#[test]
fn players_can_switch_teams_while_preparing() {
    let mut game = preparing_game(4, 10);
    game.update_players(&[update(0, "Jaune"), update(1, "Bleue")])
        .unwrap();
    assert_eq!(game.players[0].team, "Jaune");
    assert_eq!(game.players[1].team, "Bleue");
    assert_eq!(game.players[2].team, "Bleue");
    assert_eq!(game.players[3].team, "Jaune");
}

#[test]
fn updates_are_rejected_once_the_game_started() {
    let mut game = playing_game(4, 10);
    let result = game.update_players(&[update(0, "Jaune")]);
    assert_eq!(result.unwrap_err(), GameError::CantUpdatePlayers);
}

#[test]
fn unknown_players_are_rejected() {
    let mut game = preparing_game(4, 10);
    let result = game.update_players(&[update(9, "Jaune")]);
    assert_eq!(result.unwrap_err(), GameError::PlayerNotFound);
}

#[test]
fn unknown_teams_are_rejected() {
    let mut game = preparing_game(4, 10);
    let result = game.update_players(&[update(0, "Rouge")]);
    assert_eq!(result.unwrap_err(), GameError::UnknownTeam);
}

#[test]
fn teams_must_keep_at_least_two_players() {
    let mut game = preparing_game(4, 10);
    let result = game.update_players(&[update(0, "Jaune")]);
    assert_eq!(result.unwrap_err(), GameError::TeamTooSmall);
}

#[test]
fn a_rejected_batch_applies_nothing() {
    let mut game = preparing_game(6, 10);
    // The first move is fine on its own; the second starves Bleue.
    let result = game.update_players(&[update(0, "Jaune"), update(2, "Jaune"), update(4, "Jaune")]);
    assert_eq!(result.unwrap_err(), GameError::TeamTooSmall);
    for (i, player) in game.players.iter().enumerate() {
        assert_eq!(player.team, game.teams[i % 2].name);
    }
}

#[test]
fn a_batch_is_validated_as_a_whole() {
    // Swapping two players one at a time would leave a team too small in
    // between; as a batch the end state is what counts.
    let mut game = preparing_game(4, 10);
    game.update_players(&[update(0, "Jaune"), update(3, "Bleue")])
        .unwrap();
    assert_eq!(game.players[0].team, "Jaune");
    assert_eq!(game.players[3].team, "Bleue");
}

#[test]
fn the_queue_is_rebuilt_from_new_teams_at_start() {
    let mut game = preparing_game(4, 10);
    let queue_before = queue_snapshot(&game);
    game.update_players(&[update(0, "Jaune"), update(1, "Bleue")])
        .unwrap();
    // Reassignment alone leaves the queue alone.
    assert_eq!(queue_snapshot(&game), queue_before);

    game.set_status(GameStatus::Playing).unwrap();
    // Alice still opens, now for Jaune; Bleue is Bob then Chloe.
    assert_eq!(game.speaker, 0);
    assert_eq!(
        queue_snapshot(&game),
        vec![
            ("Bleue".to_string(), vec![1, 2]),
            ("Jaune".to_string(), vec![3, 0]),
        ]
    );
}
