use super::player::Player;
use serde::{Deserialize, Serialize};

/// One team's rotation within the speaker queue.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct QueueEntry {
    pub team: String,
    pub players: Vec<u32>,
}

/// Groups players by team, preserving player order within a team and the
/// order in which teams first appear among the players.
pub fn first_queue(players: &[Player]) -> Vec<QueueEntry> {
    let mut queue: Vec<QueueEntry> = vec![];
    for player in players {
        match queue.iter_mut().find(|entry| entry.team == player.team) {
            Some(entry) => entry.players.push(player.id),
            None => queue.push(QueueEntry {
                team: player.team.clone(),
                players: vec![player.id],
            }),
        }
    }
    queue
}

/// Rotates the queue one step: the head entry's first player goes to the back
/// of that entry, then the head entry itself goes to the back of the queue,
/// so speaking alternates between teams turn after turn.
pub fn roll(queue: &mut Vec<QueueEntry>) {
    if queue.is_empty() {
        return;
    }
    let mut head = queue.remove(0);
    if !head.players.is_empty() {
        let first = head.players.remove(0);
        head.players.push(first);
    }
    queue.push(head);
}
