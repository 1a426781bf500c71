use crate::catalog::Catalog;
use crate::error::GameError;
use crate::game::{Game, GameOptions, GameStatus};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// How long a finished or canceled game may sit untouched before its session
/// is evicted from memory. The persisted record is kept.
const IDLE_TTL: Duration = Duration::from_secs(3600);

/// The caller identity established by the transport layer. Opaque to the
/// engine: the admin may act on any game, a user only on their own.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Identity {
    Admin,
    User(String),
}

/// Manages every game session running on the server. All requests touching
/// one game are serialized through that game's session mutex.
pub struct SessionManager {
    sessions: DashMap<String, SessionHandle>,
    dbs: Dbs,
    catalog: Catalog,
}

/// The sled trees that games are persisted to.
#[derive(Clone)]
struct Dbs {
    db: sled::Db,
    game: sled::Tree,
    archive: sled::Tree,
}

/// A single game session.
pub struct Session {
    /// The game ID.
    id: String,
    /// The persisted game record.
    stored: StoredGame,
    /// The databases.
    dbs: Dbs,
    /// Timestamp of the last time this session was interacted with.
    last_ts: Instant,
}

pub type SessionHandle = Arc<Mutex<Session>>;

/// A game document as persisted: the aggregate plus server-side metadata.
#[derive(Serialize, Deserialize)]
struct StoredGame {
    game: Game,
    /// Identity of the creating user; `None` for admin-created games.
    owner: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    /// Whether this game has been archived.
    archived: bool,
}

impl SessionManager {
    /// Opens the session registry, rehydrating every persisted game.
    pub fn new(db: sled::Db, catalog: Catalog) -> anyhow::Result<Self> {
        let sessions = DashMap::new();
        let dbs = Dbs {
            db: db.clone(),
            game: db.open_tree("games")?,
            archive: db.open_tree("archive")?,
        };
        for entry in dbs.game.iter() {
            let (id, stored) = entry?;
            let id = String::from_utf8(id.to_vec())?;
            let Ok(stored) = serde_json::from_slice(&stored) else {
                log::warn!("Skipping unreadable game record: {}", id);
                continue;
            };
            let session = Session::hydrate(id.clone(), dbs.clone(), stored);
            sessions.insert(id, Arc::new(Mutex::new(session)));
        }
        log::info!("Restored {} game sessions", sessions.len());
        Ok(Self {
            sessions,
            dbs,
            catalog,
        })
    }

    /// Creates a new game owned by `identity`, drawing its deck from the
    /// catalog. Non-admin users may only hold one unfinished game at a time.
    pub fn create_game(
        &self,
        identity: &Identity,
        player_names: &[String],
        options: GameOptions,
        status: Option<GameStatus>,
    ) -> Result<SessionHandle, GameError> {
        if let Identity::User(owner) = identity {
            if self.has_ongoing_game(owner) {
                return Err(GameError::UserHasOnGoingGames);
            }
        }

        let mut rng = rand::thread_rng();
        let cards = self.catalog.draw(&options.cards, &mut rng);
        let mut game = Game::new(player_names, cards, options, rng.next_u64())?;
        match status {
            None | Some(GameStatus::Preparing) => {}
            Some(GameStatus::Playing) => game.set_status(GameStatus::Playing)?,
            Some(_) => return Err(GameError::ForbiddenNewGameStatus),
        }

        let id = loop {
            let id = Self::random_id();
            if !self.sessions.contains_key(&id) {
                break id;
            }
        };
        let owner = match identity {
            Identity::Admin => None,
            Identity::User(owner) => Some(owner.clone()),
        };
        let session = Session::new(id.clone(), self.dbs.clone(), game, owner);
        session.persist();
        let session = Arc::new(Mutex::new(session));
        self.sessions.insert(id, session.clone());
        Ok(session)
    }

    pub fn find_game(&self, game_id: &str) -> Result<SessionHandle, GameError> {
        self.sessions
            .get(game_id)
            .map(|session| session.clone())
            .ok_or(GameError::GameNotFound)
    }

    /// Removes a game from the registry and from disk.
    pub fn delete_game(&self, game_id: &str) -> Result<SessionHandle, GameError> {
        let (id, session) = self
            .sessions
            .remove(game_id)
            .ok_or(GameError::GameNotFound)?;
        if let Err(err) = self.dbs.game.remove(id.as_bytes()) {
            log::error!("Could not remove game record {}: {}", id, err);
        }
        Ok(session)
    }

    /// Client projections of every live session.
    pub fn games_json(&self) -> Vec<Value> {
        self.sessions
            .iter()
            .filter_map(|entry| entry.value().lock().ok().map(|session| session.game_json()))
            .collect()
    }

    pub fn num_games(&self) -> usize {
        self.sessions.len()
    }

    /// Evicts terminal sessions nobody has touched for a while. Their sled
    /// records stay, so they remain readable after a restart.
    pub fn purge_games(&self) {
        let mut expired = vec![];

        for entry in self.sessions.iter() {
            let game_id = entry.key();
            let Ok(session) = entry.value().lock() else {
                log::error!("Found poisoned session: {}", game_id);
                expired.push(game_id.clone());
                continue;
            };
            let terminal = matches!(
                session.stored.game.status(),
                GameStatus::Over | GameStatus::Canceled
            );
            if terminal && session.last_ts.elapsed() > IDLE_TTL {
                expired.push(game_id.clone());
            }
        }

        for game_id in expired {
            self.sessions.remove(&game_id);
        }
    }

    fn has_ongoing_game(&self, owner: &str) -> bool {
        self.sessions.iter().any(|entry| {
            entry
                .value()
                .lock()
                .map(|session| {
                    session.stored.owner.as_deref() == Some(owner)
                        && matches!(
                            session.stored.game.status(),
                            GameStatus::Preparing | GameStatus::Playing
                        )
                })
                .unwrap_or(false)
        })
    }

    fn random_id() -> String {
        let mut rng = rand::thread_rng();
        (0..6).map(|_| rng.gen_range('A'..='Z')).collect()
    }
}

impl Session {
    fn new(id: String, dbs: Dbs, game: Game, owner: Option<String>) -> Self {
        let now = Utc::now();
        Self::hydrate(
            id,
            dbs,
            StoredGame {
                game,
                owner,
                created_at: now,
                updated_at: now,
                archived: false,
            },
        )
    }

    fn hydrate(id: String, dbs: Dbs, stored: StoredGame) -> Self {
        Self {
            id,
            stored,
            dbs,
            last_ts: Instant::now(),
        }
    }

    /// Gets the unique game ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Verifies that `identity` may act on this game.
    pub fn check_owner(&self, identity: &Identity) -> Result<(), GameError> {
        match identity {
            Identity::Admin => Ok(()),
            Identity::User(owner) if self.stored.owner.as_deref() == Some(owner) => Ok(()),
            Identity::User(_) => Err(GameError::GameDoesntBelongToUser),
        }
    }

    /// Performs an action on the game, persisting the new state if the
    /// mutation succeeds. A failed mutation leaves no trace.
    pub fn mutate_game<F>(&mut self, mutation: F) -> Result<(), GameError>
    where
        F: FnOnce(&mut Game) -> Result<(), GameError>,
    {
        mutation(&mut self.stored.game)?;
        self.stored.updated_at = Utc::now();
        self.last_ts = Instant::now();
        self.persist();
        self.archive();
        Ok(())
    }

    /// Client projection of the stored game: the aggregate plus id, owner
    /// and timestamps.
    pub fn game_json(&self) -> Value {
        let mut value = self.stored.game.to_json();
        if let Some(map) = value.as_object_mut() {
            map.insert("_id".into(), json!(self.id));
            map.insert("createdAt".into(), json!(self.stored.created_at));
            map.insert("updatedAt".into(), json!(self.stored.updated_at));
            if let Some(owner) = &self.stored.owner {
                map.insert("owner".into(), json!(owner));
            }
        }
        value
    }

    /// Persists the game record, so it can be recovered upon server restart.
    fn persist(&self) {
        let record = match serde_json::to_vec(&self.stored) {
            Ok(record) => record,
            Err(err) => {
                log::error!("Could not encode game {}: {}", self.id, err);
                return;
            }
        };
        if let Err(err) = self.dbs.game.insert(self.id.as_bytes(), record) {
            log::error!("Could not persist game {}: {}", self.id, err);
        }
    }

    /// Writes an archive record once the game is over.
    fn archive(&mut self) {
        if self.stored.game.status() != GameStatus::Over || self.stored.archived {
            return;
        }
        let players: Vec<&str> = self
            .stored
            .game
            .players()
            .iter()
            .map(|player| player.name.as_str())
            .collect();
        let summary = self
            .stored
            .game
            .summary()
            .map(|summary| json!(summary))
            .unwrap_or(Value::Null);
        let record = json!({
            "gameId": self.id,
            "players": players,
            "summary": summary,
            "created": self.stored.created_at,
            "finished": Utc::now(),
        });
        let result = self
            .dbs
            .db
            .generate_id()
            .and_then(|key| {
                self.dbs
                    .archive
                    .insert(key.to_be_bytes(), record.to_string().as_bytes())
            });
        match result {
            Ok(_) => self.stored.archived = true,
            Err(err) => log::error!("Could not archive game {}: {}", self.id, err),
        }
    }
}
