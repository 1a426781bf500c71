use super::history::HistoryEntry;
use super::summary::{GameSummary, TeamScore, Winners};
use super::{Card, Game};
use serde_json::{json, Map, Value};

impl Game {
    /// Client-facing projection of the aggregate. Player and card ids are
    /// resolved to embedded objects; optional sections are omitted while
    /// empty, never sent as `null`.
    pub fn to_json(&self) -> Value {
        let mut game = Map::new();
        game.insert(
            "players".into(),
            Value::Array(self.players.iter().map(|p| json!(p)).collect()),
        );
        game.insert(
            "teams".into(),
            Value::Array(self.teams.iter().map(|t| json!(t)).collect()),
        );
        game.insert(
            "cards".into(),
            Value::Array(self.deck.cards().iter().map(|c| self.card_json(c)).collect()),
        );
        game.insert("status".into(), json!(self.status));
        game.insert("round".into(), json!(self.round));
        game.insert("turn".into(), json!(self.turn));
        game.insert("speaker".into(), self.player_json(self.speaker));
        if let Some(guesser) = self.guesser {
            game.insert("guesser".into(), self.player_json(guesser));
        }
        game.insert(
            "queue".into(),
            Value::Array(
                self.queue
                    .iter()
                    .map(|entry| {
                        json!({
                            "team": entry.team,
                            "players": entry.players.iter().map(|id| self.player_json(*id)).collect::<Vec<_>>(),
                        })
                    })
                    .collect(),
            ),
        );
        game.insert("options".into(), json!(self.options));
        if !self.history.is_empty() {
            game.insert(
                "history".into(),
                Value::Array(self.history.iter().map(|e| self.history_json(e)).collect()),
            );
        }
        if let Some(summary) = &self.summary {
            game.insert("summary".into(), self.summary_json(summary));
        }
        Value::Object(game)
    }

    fn player_json(&self, id: u32) -> Value {
        self.player(id).map(|p| json!(p)).unwrap_or(Value::Null)
    }

    fn card_json(&self, card: &Card) -> Value {
        let mut value = json!({
            "id": card.id,
            "label": card.label,
            "categories": card.categories,
            "difficulty": card.difficulty,
            "status": card.status,
        });
        if let Some(map) = value.as_object_mut() {
            if let Some(playing_time) = card.playing_time {
                map.insert("playingTime".into(), json!(playing_time));
            }
            if self.options.cards.helpers.are_displayed {
                if let Some(description) = &card.description {
                    map.insert("description".into(), json!(description));
                }
                if let Some(image_url) = &card.image_url {
                    map.insert("imageUrl".into(), json!(image_url));
                }
            }
        }
        value
    }

    fn history_json(&self, entry: &HistoryEntry) -> Value {
        let mut value = json!({
            "round": entry.round,
            "turn": entry.turn,
            "speaker": self.player_json(entry.speaker),
            "cards": entry.cards,
            "score": entry.score,
        });
        if let Some(guesser) = entry.guesser {
            if let Some(map) = value.as_object_mut() {
                map.insert("guesser".into(), self.player_json(guesser));
            }
        }
        value
    }

    fn summary_json(&self, summary: &GameSummary) -> Value {
        let mut value = json!({
            "rounds": summary
                .rounds
                .iter()
                .map(|round| {
                    json!({
                        "number": round.number,
                        "scores": round.scores.iter().map(|s| self.score_json(s)).collect::<Vec<_>>(),
                    })
                })
                .collect::<Vec<_>>(),
        });
        if let Some(map) = value.as_object_mut() {
            if let Some(finals) = &summary.final_scores {
                map.insert(
                    "finalScores".into(),
                    Value::Array(finals.iter().map(|s| self.score_json(s)).collect()),
                );
            }
            if let Some(winners) = &summary.winners {
                map.insert("winners".into(), self.winners_json(winners));
            }
        }
        value
    }

    fn score_json(&self, score: &TeamScore) -> Value {
        json!({
            "team": score.team,
            "players": score.players.iter().map(|id| self.player_json(*id)).collect::<Vec<_>>(),
            "score": score.score,
        })
    }

    fn winners_json(&self, winners: &Winners) -> Value {
        json!({
            "teams": winners.teams,
            "players": winners.players.iter().map(|id| self.player_json(*id)).collect::<Vec<_>>(),
        })
    }
}
