//! Speaker queue rotation tests.

use super::test_utils::*;
use crate::game::queue;

#[test]
fn rotation_cycles_back_after_two_full_team_passes() {
    // With two teams of `n` players each, 2 × n rotations restore the queue.
    for players in [4, 8] {
        let game = preparing_game(players, 10);
        let original = queue_snapshot(&game);
        let mut queue = game.queue.clone();
        for _ in 0..players {
            queue::roll(&mut queue);
        }
        let rolled: Vec<(String, Vec<u32>)> = queue
            .iter()
            .map(|entry| (entry.team.clone(), entry.players.clone()))
            .collect();
        assert_eq!(rolled, original);
    }
}

#[test]
fn speakers_alternate_between_teams_every_turn() {
    let mut game = playing_game(4, 10);
    let mut speakers = vec![game.speaker];
    for _ in 0..4 {
        let next = to_guess_ids(&game)[0];
        game.play(&[guess(next)]).unwrap();
        speakers.push(game.speaker);
    }
    assert_eq!(speakers, vec![0, 1, 2, 3, 0]);
}

#[test]
fn uneven_teams_still_alternate() {
    let mut game = playing_game(5, 12);
    let mut speakers = vec![game.speaker];
    for _ in 0..5 {
        let next = to_guess_ids(&game)[0];
        game.play(&[guess(next)]).unwrap();
        speakers.push(game.speaker);
    }
    // Bleue is {Alice 0, Chloe 2, Eve 4}, Jaune is {Bob 1, Dan 3}; teams keep
    // alternating even though Jaune's players come around more often.
    assert_eq!(speakers, vec![0, 1, 2, 3, 4, 1]);
}

#[test]
fn head_of_queue_is_always_the_next_speaker() {
    let mut game = playing_game(4, 10);
    for _ in 0..3 {
        let expected = game.next_speaker();
        let next = to_guess_ids(&game)[0];
        game.play(&[guess(next)]).unwrap();
        assert_eq!(game.speaker, expected);
    }
}
