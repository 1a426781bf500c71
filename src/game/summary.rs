use super::history::HistoryEntry;
use super::player::{Player, Team};
use serde::{Deserialize, Serialize};

/// Aggregated score of one team over one round or the whole game.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct TeamScore {
    pub team: String,
    /// Ids of the team's players.
    pub players: Vec<u32>,
    pub score: u32,
}

/// Scores of one finished round, one entry per team.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct SummaryRound {
    pub number: u32,
    pub scores: Vec<TeamScore>,
}

/// The winning side of a finished game; several teams on a tie.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Winners {
    pub teams: Vec<String>,
    /// Ids of every player belonging to a winning team.
    pub players: Vec<u32>,
}

/// Score sheet of a game, grown round by round and completed once the game
/// is over.
#[derive(Clone, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct GameSummary {
    pub rounds: Vec<SummaryRound>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_scores: Option<Vec<TeamScore>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winners: Option<Winners>,
}

fn members_of(team: &Team, players: &[Player]) -> Vec<u32> {
    players
        .iter()
        .filter(|player| player.team == team.name)
        .map(|player| player.id)
        .collect()
}

/// Sums every history entry of `round`, grouped by the speaker's team.
/// Teams without a single turn that round still appear with a zero score.
pub fn round_summary(
    round: u32,
    teams: &[Team],
    players: &[Player],
    history: &[HistoryEntry],
) -> SummaryRound {
    let scores = teams
        .iter()
        .map(|team| {
            let members = members_of(team, players);
            let score = history
                .iter()
                .filter(|entry| entry.round == round && members.contains(&entry.speaker))
                .map(|entry| entry.score)
                .sum();
            TeamScore {
                team: team.name.clone(),
                players: members,
                score,
            }
        })
        .collect();
    SummaryRound {
        number: round,
        scores,
    }
}

/// Adds up each team's per-round scores across the whole game.
pub fn final_scores(rounds: &[SummaryRound], teams: &[Team], players: &[Player]) -> Vec<TeamScore> {
    teams
        .iter()
        .map(|team| {
            let score = rounds
                .iter()
                .flat_map(|round| &round.scores)
                .filter(|entry| entry.team == team.name)
                .map(|entry| entry.score)
                .sum();
            TeamScore {
                team: team.name.clone(),
                players: members_of(team, players),
                score,
            }
        })
        .collect()
}

/// Every team sharing the highest final score wins, along with all of its
/// players.
pub fn winners(final_scores: &[TeamScore], players: &[Player]) -> Winners {
    let highest = final_scores
        .iter()
        .map(|entry| entry.score)
        .max()
        .unwrap_or(0);
    let teams: Vec<String> = final_scores
        .iter()
        .filter(|entry| entry.score == highest)
        .map(|entry| entry.team.clone())
        .collect();
    let players = players
        .iter()
        .filter(|player| teams.contains(&player.team))
        .map(|player| player.id)
        .collect();
    Winners { teams, players }
}
