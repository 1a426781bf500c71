use crate::error::GameError;
use serde::{Deserialize, Serialize};

pub const MIN_PLAYERS: usize = 4;
pub const MAX_PLAYERS: usize = 20;

const MAX_NAME_LEN: usize = 30;

/// A game player.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Player {
    pub id: u32,
    pub name: String,
    pub team: String,
}

/// One of the two fixed teams of a game.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Team {
    pub name: String,
    pub color: String,
}

/// The two teams every game is played with.
pub fn default_teams() -> [Team; 2] {
    [
        Team {
            name: "Bleue".to_string(),
            color: "#07ABFF".to_string(),
        },
        Team {
            name: "Jaune".to_string(),
            color: "#FFE41D".to_string(),
        },
    ]
}

/// Strips anything that looks like an HTML tag, trims, and collapses
/// whitespace runs to single spaces.
pub fn sanitize_name(name: &str) -> String {
    let mut stripped = String::with_capacity(name.len());
    let mut in_tag = false;
    for c in name.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => stripped.push(c),
            _ => {}
        }
    }
    let mut out = String::with_capacity(stripped.len());
    for word in stripped.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

/// Builds the player list from raw names, alternating team membership:
/// even indices join the first team, odd indices the second.
pub fn assign_teams(names: &[String], teams: &[Team; 2]) -> Result<Vec<Player>, GameError> {
    if names.len() < MIN_PLAYERS {
        return Err(GameError::TooFewPlayers);
    }
    if names.len() > MAX_PLAYERS {
        return Err(GameError::TooManyPlayers);
    }
    let names: Vec<String> = names.iter().map(|name| sanitize_name(name)).collect();
    if names
        .iter()
        .any(|name| name.is_empty() || name.chars().count() > MAX_NAME_LEN)
    {
        return Err(GameError::InvalidPlayerName);
    }
    for (i, name) in names.iter().enumerate() {
        if names[..i].contains(name) {
            return Err(GameError::PlayersNameNotUnique);
        }
    }
    Ok(names
        .into_iter()
        .enumerate()
        .map(|(i, name)| Player {
            id: i as u32,
            name,
            team: teams[i % 2].name.clone(),
        })
        .collect())
}
