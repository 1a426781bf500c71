use super::card::CARD_CATEGORIES;
use crate::error::GameError;
use serde::{Deserialize, Serialize};

/// Options for customising a game. Every field has a default matching the
/// official rules, so an empty request body yields a standard game.
#[derive(Clone, Serialize, Deserialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct GameOptions {
    pub players: PlayersOptions,
    pub cards: CardsOptions,
    pub rounds: RoundsOptions,
}

#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayersOptions {
    /// When true, players guess as two teams; when false, every player
    /// competes alone and a guesser is designated each turn.
    pub are_team_up: bool,
}

#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(default, rename_all = "camelCase")]
pub struct CardsOptions {
    /// Deck size drawn at creation.
    pub count: usize,
    /// Catalog categories cards may be drawn from.
    pub categories: Vec<String>,
    /// Catalog difficulties cards may be drawn from.
    pub difficulties: Vec<u8>,
    pub helpers: HelpersOptions,
}

#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(default, rename_all = "camelCase")]
pub struct HelpersOptions {
    /// Whether card descriptions and images may be shown to guessers.
    pub are_displayed: bool,
}

#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(default, rename_all = "camelCase")]
pub struct RoundsOptions {
    /// Number of rounds in the game.
    pub count: u32,
    pub turns: TurnsOptions,
}

#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(default, rename_all = "camelCase")]
pub struct TurnsOptions {
    /// Seconds allowed for one turn. Advisory: surfaced to clients, never
    /// enforced by the engine.
    pub time_limit: u32,
}

impl Default for PlayersOptions {
    fn default() -> Self {
        Self { are_team_up: true }
    }
}

impl Default for CardsOptions {
    fn default() -> Self {
        Self {
            count: 40,
            categories: CARD_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            difficulties: vec![1, 2, 3],
            helpers: HelpersOptions::default(),
        }
    }
}

impl Default for HelpersOptions {
    fn default() -> Self {
        Self {
            are_displayed: true,
        }
    }
}

impl Default for RoundsOptions {
    fn default() -> Self {
        Self {
            count: 3,
            turns: TurnsOptions::default(),
        }
    }
}

impl Default for TurnsOptions {
    fn default() -> Self {
        Self { time_limit: 30 }
    }
}

impl GameOptions {
    /// Checks every option against its allowed range.
    pub fn validate(&self) -> Result<(), GameError> {
        let cards = &self.cards;
        if !(5..=100).contains(&cards.count)
            || cards.categories.is_empty()
            || cards.difficulties.is_empty()
        {
            return Err(GameError::InvalidGameOptions);
        }
        if !cards
            .categories
            .iter()
            .all(|c| CARD_CATEGORIES.contains(&c.as_str()))
        {
            return Err(GameError::InvalidGameOptions);
        }
        if !cards.difficulties.iter().all(|d| (1..=3).contains(d)) {
            return Err(GameError::InvalidGameOptions);
        }
        if !(3..=4).contains(&self.rounds.count) {
            return Err(GameError::InvalidGameOptions);
        }
        if !(10..=120).contains(&self.rounds.turns.time_limit) {
            return Err(GameError::InvalidGameOptions);
        }
        Ok(())
    }
}
