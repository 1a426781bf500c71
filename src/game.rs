use self::deck::Deck;
use self::history::{HistoryEntry, PlayedCard};
use self::queue::QueueEntry;
use self::summary::GameSummary;
use crate::catalog::CatalogCard;
use crate::error::GameError;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub use self::card::{Card, CardPlay, CardStatus, PlayOutcome, CARD_CATEGORIES};
pub use self::options::{CardsOptions, GameOptions};
pub use self::player::{Player, Team, MAX_PLAYERS, MIN_PLAYERS};

mod card;
mod deck;
mod history;
mod json;
mod options;
mod player;
mod queue;
mod summary;
mod test;

/// A game of Time's Up: two teams take turns having one of their players make
/// the others guess cards from a shared deck, over a fixed number of rounds.
///
/// The aggregate exclusively owns its players, teams, cards, queue, history
/// and summary; collaborators refer to players and cards by id only.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Game {
    options: GameOptions,
    players: Vec<Player>,
    teams: [Team; 2],
    deck: Deck,
    status: GameStatus,
    round: u32,
    turn: u32,
    /// Id of the player currently speaking.
    speaker: u32,
    /// Id of the designated guesser, in non-team games.
    guesser: Option<u32>,
    queue: Vec<QueueEntry>,
    /// Completed turns, most recent first.
    history: Vec<HistoryEntry>,
    summary: Option<GameSummary>,
    rng: rand_chacha::ChaCha8Rng,
}

/// Lifecycle of a game. `Over` and `Canceled` are terminal: a game in either
/// state accepts no further mutation.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Preparing,
    Playing,
    Over,
    Canceled,
}

/// A requested team change for one player, applied while preparing.
#[derive(Clone, Deserialize, Debug)]
pub struct PlayerUpdate {
    pub id: u32,
    pub team: String,
}

impl Game {
    /// Creates a new game in `preparing` state. The whole initial state is
    /// built here, before anything is persisted: teams assigned, deck
    /// shuffled, queue seated, first speaker chosen.
    pub fn new(
        player_names: &[String],
        cards: Vec<CatalogCard>,
        options: GameOptions,
        seed: u64,
    ) -> Result<Self, GameError> {
        options.validate()?;
        let teams = player::default_teams();
        let players = player::assign_teams(player_names, &teams)?;
        let cards = cards
            .into_iter()
            .enumerate()
            .map(|(id, card)| card.into_card(id as u32))
            .collect();

        let mut game = Game {
            options,
            players,
            teams,
            deck: Deck::new(cards),
            status: GameStatus::Preparing,
            round: 1,
            turn: 1,
            speaker: 0,
            guesser: None,
            queue: vec![],
            history: vec![],
            summary: None,
            rng: rand_chacha::ChaCha8Rng::seed_from_u64(seed),
        };
        game.deck.shuffle(&mut game.rng);
        game.setup_queue();
        Ok(game)
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn summary(&self) -> Option<&GameSummary> {
        self.summary.as_ref()
    }

    /// The player about to speak: head of the head queue entry.
    pub fn next_speaker(&self) -> u32 {
        self.queue[0].players[0]
    }

    /// A round is over once every card in the deck has been guessed.
    pub fn is_round_over(&self) -> bool {
        self.deck.all_guessed()
    }

    /// The game is over once the final round completes.
    pub fn is_over(&self) -> bool {
        self.is_round_over() && self.round == self.options.rounds.count
    }

    /// Applies the outcome of one turn. Validates the whole play before
    /// mutating anything, so a rejected play leaves the game untouched.
    pub fn play(&mut self, plays: &[CardPlay]) -> Result<(), GameError> {
        if self.status != GameStatus::Playing {
            return Err(GameError::GameNotPlaying);
        }
        let mut positions = Vec::with_capacity(plays.len());
        for (i, play) in plays.iter().enumerate() {
            if plays[..i].iter().any(|other| other.id == play.id) {
                return Err(GameError::CantPlayCardTwice);
            }
            let position = self.deck.position(play.id).ok_or(GameError::CardNotInGame)?;
            if self.deck.card_at(position).status == CardStatus::Guessed {
                return Err(GameError::CardAlreadyGuessed);
            }
            if play.status == PlayOutcome::Skipped && self.round == 1 {
                return Err(GameError::CantSkipCard);
            }
            positions.push(position);
        }

        // Guessed cards stick; discarded and skipped cards go back to the
        // to-guess pile and stay winnable this round.
        let mut played = Vec::with_capacity(plays.len());
        for (play, &position) in plays.iter().zip(&positions) {
            let card = self.deck.card_at_mut(position);
            match play.status {
                PlayOutcome::Guessed => {
                    card.status = CardStatus::Guessed;
                    card.playing_time = Some(play.playing_time);
                }
                PlayOutcome::Discarded | PlayOutcome::Skipped => {
                    card.status = CardStatus::ToGuess;
                    card.playing_time = None;
                }
            }
            played.push(PlayedCard {
                id: card.id,
                label: card.label.clone(),
                status: play.status.as_status(),
                playing_time: play.playing_time,
            });
        }

        let score = plays
            .iter()
            .filter(|play| play.status == PlayOutcome::Guessed)
            .count() as u32;
        self.history.insert(
            0,
            HistoryEntry {
                round: self.round,
                turn: self.turn,
                speaker: self.speaker,
                guesser: self.guesser,
                cards: played,
                score,
            },
        );

        if self.is_round_over() {
            self.close_round();
        } else {
            self.turn += 1;
            let seen: HashSet<u32> = self.history[0].cards.iter().map(|card| card.id).collect();
            self.deck.shuffle_keeping_fresh_first(&seen, &mut self.rng);
        }

        if self.status != GameStatus::Over {
            self.set_next_speaker_and_roll_queue();
        }
        Ok(())
    }

    /// Folds the finished round into the summary, then either ends the game
    /// or resets the deck for the next round.
    fn close_round(&mut self) {
        let round_scores =
            summary::round_summary(self.round, &self.teams, &self.players, &self.history);
        let summary = self.summary.get_or_insert_with(GameSummary::default);
        summary.rounds.push(round_scores);

        if self.round == self.options.rounds.count {
            self.status = GameStatus::Over;
            let finals = summary::final_scores(&summary.rounds, &self.teams, &self.players);
            summary.winners = Some(summary::winners(&finals, &self.players));
            summary.final_scores = Some(finals);
        } else {
            self.round += 1;
            self.turn = 1;
            self.deck.reset_for_new_round();
            self.deck.shuffle(&mut self.rng);
        }
    }

    /// Reassigns players to teams, as one atomic batch. Only allowed while
    /// the game is preparing; the queue is rebuilt when the game starts.
    pub fn update_players(&mut self, updates: &[PlayerUpdate]) -> Result<(), GameError> {
        if self.status != GameStatus::Preparing {
            return Err(GameError::CantUpdatePlayers);
        }
        let mut teams: Vec<String> = self.players.iter().map(|p| p.team.clone()).collect();
        for update in updates {
            let index = self
                .players
                .iter()
                .position(|player| player.id == update.id)
                .ok_or(GameError::PlayerNotFound)?;
            if !self.teams.iter().any(|team| team.name == update.team) {
                return Err(GameError::UnknownTeam);
            }
            teams[index] = update.team.clone();
        }
        for team in &self.teams {
            if teams.iter().filter(|name| **name == team.name).count() < 2 {
                return Err(GameError::TeamTooSmall);
            }
        }
        for (player, team) in self.players.iter_mut().zip(teams) {
            player.team = team;
        }
        Ok(())
    }

    /// Explicit reshuffle requested by a player.
    pub fn shuffle_cards(&mut self) -> Result<(), GameError> {
        if !matches!(self.status, GameStatus::Preparing | GameStatus::Playing) {
            return Err(GameError::CantShuffleCards);
        }
        self.deck.shuffle(&mut self.rng);
        Ok(())
    }

    /// Explicit status transition requested by the owner. Only `playing` and
    /// `canceled` can be set from outside; terminal games reject everything.
    pub fn set_status(&mut self, status: GameStatus) -> Result<(), GameError> {
        if matches!(self.status, GameStatus::Over | GameStatus::Canceled) {
            return Err(GameError::GameNotUpdatable);
        }
        match status {
            GameStatus::Playing => {
                if self.status == GameStatus::Preparing {
                    self.start();
                }
                Ok(())
            }
            GameStatus::Canceled => {
                self.status = GameStatus::Canceled;
                Ok(())
            }
            GameStatus::Preparing | GameStatus::Over => Err(GameError::ForbiddenNewGameStatus),
        }
    }

    /// Moves a preparing game into play. The queue is rebuilt here so that
    /// team changes made while preparing take effect.
    fn start(&mut self) {
        self.setup_queue();
        self.status = GameStatus::Playing;
    }

    fn setup_queue(&mut self) {
        self.queue = queue::first_queue(&self.players);
        self.set_next_speaker_and_roll_queue();
    }

    fn set_next_speaker_and_roll_queue(&mut self) {
        self.speaker = self.next_speaker();
        queue::roll(&mut self.queue);
    }

    fn player(&self, id: u32) -> Option<&Player> {
        self.players.iter().find(|player| player.id == id)
    }
}
