use crate::game::{Card, CardStatus, CardsOptions};
use anyhow::Context;
use rand::prelude::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A card template from the catalog pool, before it joins a game's deck.
#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CatalogCard {
    pub label: String,
    pub categories: Vec<String>,
    pub difficulty: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl CatalogCard {
    /// Seeds a deck card from this template.
    pub fn into_card(self, id: u32) -> Card {
        Card {
            id,
            label: self.label,
            categories: self.categories,
            difficulty: self.difficulty,
            status: CardStatus::ToGuess,
            playing_time: None,
            description: self.description,
            image_url: self.image_url,
        }
    }
}

/// Read-only pool of guessable cards that games draw their decks from.
pub struct Catalog {
    cards: Vec<CatalogCard>,
}

impl Catalog {
    /// Loads the pool from the JSON file named by the `CARDS_FILE` environment
    /// variable, falling back to the built-in card set.
    pub fn load() -> anyhow::Result<Self> {
        let cards = match std::env::var("CARDS_FILE") {
            Ok(path) => {
                let data = std::fs::read_to_string(&path)
                    .with_context(|| format!("could not read cards file: {path}"))?;
                serde_json::from_str(&data)
                    .with_context(|| format!("invalid cards file: {path}"))?
            }
            Err(_) => builtin_cards(),
        };
        Ok(Self::new(cards))
    }

    pub fn new(cards: Vec<CatalogCard>) -> Self {
        log::info!("Card catalog holds {} cards", cards.len());
        Self { cards }
    }

    /// Draws up to `options.count` distinct cards matching the category and
    /// difficulty filters, in uniformly random order.
    pub fn draw(&self, options: &CardsOptions, rng: &mut impl Rng) -> Vec<CatalogCard> {
        let mut pool: Vec<&CatalogCard> = self
            .cards
            .iter()
            .filter(|card| options.difficulties.contains(&card.difficulty))
            .filter(|card| {
                card.categories
                    .iter()
                    .any(|category| options.categories.contains(category))
            })
            .collect();
        pool.shuffle(rng);
        if pool.len() < options.count {
            log::warn!(
                "Card pool holds {} matching cards but the deck wants {}",
                pool.len(),
                options.count
            );
        }
        pool.into_iter().take(options.count).cloned().collect()
    }
}

fn builtin_cards() -> Vec<CatalogCard> {
    BUILTIN_CARDS
        .iter()
        .map(|(label, categories, difficulty)| CatalogCard {
            label: (*label).to_string(),
            categories: categories.iter().map(|c| (*c).to_string()).collect(),
            difficulty: *difficulty,
            description: None,
            image_url: None,
        })
        .collect()
}

const BUILTIN_CARDS: &[(&str, &[&str], u8)] = &[
    ("Cleopatra", &["personality"], 2),
    ("Napoleon", &["personality"], 1),
    ("Frida Kahlo", &["personality", "art"], 2),
    ("Albert Einstein", &["personality"], 1),
    ("Marie Curie", &["personality"], 1),
    ("Charlie Chaplin", &["personality", "movie"], 1),
    ("Mozart", &["personality", "art"], 1),
    ("Serena Williams", &["personality", "sport"], 2),
    ("Usain Bolt", &["personality", "sport"], 1),
    ("Leonardo da Vinci", &["personality", "art"], 1),
    ("The Godfather", &["movie"], 2),
    ("Titanic", &["movie"], 1),
    ("Jurassic Park", &["movie"], 1),
    ("Pulp Fiction", &["movie"], 2),
    ("The Matrix", &["movie"], 1),
    ("Spirited Away", &["movie"], 3),
    ("Breaking Bad", &["series"], 1),
    ("Friends", &["series"], 1),
    ("The Office", &["series"], 2),
    ("Sherlock", &["series", "book"], 2),
    ("Don Quixote", &["book"], 3),
    ("Moby Dick", &["book"], 2),
    ("Peter Pan", &["book", "movie"], 1),
    ("The Little Prince", &["book"], 1),
    ("Hamlet", &["book", "art"], 2),
    ("The Mona Lisa", &["art"], 1),
    ("The Starry Night", &["art"], 2),
    ("Platypus", &["animal", "nature"], 2),
    ("Penguin", &["animal", "nature"], 1),
    ("Chameleon", &["animal", "nature"], 2),
    ("Axolotl", &["animal", "nature"], 3),
    ("Cat", &["animal", "nature"], 1),
    ("Aurora Borealis", &["nature"], 2),
    ("Volcano", &["nature"], 1),
    ("Amazon Rainforest", &["nature", "place"], 2),
    ("Corkscrew", &["object"], 2),
    ("Umbrella", &["object"], 1),
    ("Compass", &["object"], 2),
    ("Typewriter", &["object"], 2),
    ("Microscope", &["object"], 1),
    ("Hourglass", &["object"], 2),
    ("Eiffel Tower", &["place"], 1),
    ("Great Wall of China", &["place"], 1),
    ("Machu Picchu", &["place"], 2),
    ("Sahara Desert", &["place", "nature"], 1),
    ("Mount Everest", &["place", "nature"], 1),
    ("Scuba Diving", &["activity", "sport"], 2),
    ("Knitting", &["activity"], 1),
    ("Origami", &["activity", "art"], 2),
    ("Juggling", &["activity"], 1),
    ("Beekeeping", &["activity", "nature"], 3),
    ("Marathon", &["sport", "activity"], 1),
    ("Curling", &["sport"], 2),
    ("Fencing", &["sport"], 2),
    ("Lego", &["brand", "object"], 1),
    ("Polaroid", &["brand", "object"], 2),
    ("Vespa", &["brand", "object"], 2),
    ("Monopoly", &["brand", "activity"], 1),
    ("Tetris", &["brand", "activity"], 1),
    ("Rubik's Cube", &["brand", "object"], 1),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::CardsOptions;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn draw_respects_count_and_filters() {
        let catalog = Catalog::new(builtin_cards());
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let options = CardsOptions {
            count: 10,
            categories: vec!["object".to_string()],
            difficulties: vec![1, 2],
            ..CardsOptions::default()
        };
        let drawn = catalog.draw(&options, &mut rng);
        assert_eq!(drawn.len(), 10);
        for card in &drawn {
            assert!(card.categories.iter().any(|c| c == "object"));
            assert!((1..=2).contains(&card.difficulty));
        }
    }

    #[test]
    fn draw_is_capped_by_the_matching_pool() {
        let catalog = Catalog::new(builtin_cards());
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let options = CardsOptions {
            count: 100,
            categories: vec!["series".to_string()],
            difficulties: vec![1, 2, 3],
            ..CardsOptions::default()
        };
        let drawn = catalog.draw(&options, &mut rng);
        assert!(drawn.len() < 100);
        assert!(!drawn.is_empty());
    }

    #[test]
    fn draw_yields_distinct_labels() {
        let catalog = Catalog::new(builtin_cards());
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let drawn = catalog.draw(&CardsOptions::default(), &mut rng);
        assert_eq!(drawn.len(), 40);
        let mut labels: Vec<&str> = drawn.iter().map(|c| c.label.as_str()).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), 40);
    }
}
