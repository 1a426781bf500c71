use super::card::{Card, CardStatus};
use rand::prelude::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The ordered deck of cards in play for a game. Fixed membership after
/// creation; only order, statuses and playing times change.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Position of a card in the current deck order.
    pub fn position(&self, id: u32) -> Option<usize> {
        self.cards.iter().position(|card| card.id == id)
    }

    pub fn card(&self, id: u32) -> Option<&Card> {
        self.cards.iter().find(|card| card.id == id)
    }

    pub fn card_at(&self, position: usize) -> &Card {
        &self.cards[position]
    }

    pub fn card_at_mut(&mut self, position: usize) -> &mut Card {
        &mut self.cards[position]
    }

    /// A round is complete once every card has been guessed.
    pub fn all_guessed(&self) -> bool {
        self.cards
            .iter()
            .all(|card| card.status == CardStatus::Guessed)
    }

    /// Puts every card back to `to-guess` for the next round.
    pub fn reset_for_new_round(&mut self) {
        for card in &mut self.cards {
            card.status = CardStatus::ToGuess;
            card.playing_time = None;
        }
    }

    /// Fully randomizes the deck order.
    pub fn shuffle(&mut self, rng: &mut impl Rng) {
        self.cards.shuffle(rng);
    }

    /// Mid-round reshuffle: the next turn must open on a `to-guess` card the
    /// previous speaker was not shown. `seen` holds the ids of the cards
    /// played during the immediately-preceding turn; the first `to-guess`
    /// card outside that set (in current deck order) leads a freshly shuffled
    /// remainder. When every remaining card was seen, this falls back to a
    /// plain shuffle.
    pub fn shuffle_keeping_fresh_first(&mut self, seen: &HashSet<u32>, rng: &mut impl Rng) {
        let fresh = self
            .cards
            .iter()
            .position(|card| card.status == CardStatus::ToGuess && !seen.contains(&card.id));
        match fresh {
            Some(position) => {
                let first = self.cards.remove(position);
                self.cards.shuffle(rng);
                self.cards.insert(0, first);
            }
            None => self.shuffle(rng),
        }
    }
}
