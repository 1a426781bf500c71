use serde::{Deserialize, Serialize};

/// Categories a card may belong to.
pub const CARD_CATEGORIES: &[&str] = &[
    "personality",
    "movie",
    "series",
    "book",
    "art",
    "animal",
    "nature",
    "object",
    "place",
    "activity",
    "sport",
    "brand",
];

/// A card embedded in a game's deck.
#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: u32,
    pub label: String,
    pub categories: Vec<String>,
    pub difficulty: u8,
    pub status: CardStatus,
    /// Seconds the speaker spent on this card; set only once it is guessed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playing_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Status of a card, in the deck or in a history snapshot.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
#[serde(rename_all = "kebab-case")]
pub enum CardStatus {
    ToGuess,
    Guessed,
    Discarded,
    Skipped,
}

/// Outcome a speaker may submit for a card. `to-guess` is not a playable
/// outcome, so submissions cannot express it.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
#[serde(rename_all = "kebab-case")]
pub enum PlayOutcome {
    Guessed,
    Discarded,
    Skipped,
}

impl PlayOutcome {
    pub fn as_status(self) -> CardStatus {
        match self {
            PlayOutcome::Guessed => CardStatus::Guessed,
            PlayOutcome::Discarded => CardStatus::Discarded,
            PlayOutcome::Skipped => CardStatus::Skipped,
        }
    }
}

/// One card outcome submitted as part of a play.
#[derive(Clone, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CardPlay {
    pub id: u32,
    pub status: PlayOutcome,
    /// Seconds spent on the card during the turn.
    pub playing_time: f64,
}
