use super::card::CardStatus;
use serde::{Deserialize, Serialize};

/// Immutable record of one completed turn. Entries are kept most recent
/// first and are never mutated once appended.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct HistoryEntry {
    pub round: u32,
    pub turn: u32,
    /// Id of the player who spoke during this turn.
    pub speaker: u32,
    /// Id of the designated guesser, in non-team games.
    pub guesser: Option<u32>,
    pub cards: Vec<PlayedCard>,
    /// Number of cards guessed during the turn.
    pub score: u32,
}

/// Snapshot of a card as it was played, with the outcome the speaker
/// submitted. Unlike deck cards, the snapshot keeps the submitted playing
/// time whatever the outcome.
#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PlayedCard {
    pub id: u32,
    pub label: String,
    pub status: CardStatus,
    pub playing_time: f64,
}
