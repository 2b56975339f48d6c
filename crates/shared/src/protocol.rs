use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    domain::{MatchStats, ResetKind, Scores, ServePosition, Side},
    error::ErrorPayload,
};

pub const SNAPSHOT_KEY: &str = "shuttlestat_data";

/// The persisted subset of match state. The streak is deliberately absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSnapshot {
    pub match_stats: MatchStats,
    pub scores: Scores,
    pub server: Side,
    pub setup_complete: bool,
    pub starting_server: Side,
    pub user_side: Side,
}

/// A snapshot as read back from storage: every field is optional and applied on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialSnapshot {
    pub match_stats: Option<MatchStats>,
    pub scores: Option<Scores>,
    pub server: Option<Side>,
    pub setup_complete: Option<bool>,
    pub starting_server: Option<Side>,
    pub user_side: Option<Side>,
    /// Fields that were present but could not be decoded.
    pub rejected: Vec<&'static str>,
}

impl PartialSnapshot {
    /// Decodes a stored record field by field. Only a document that is not a JSON object
    /// fails as a whole; absent, `null`, or malformed fields are left as `None`.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let mut object: Map<String, Value> = serde_json::from_str(raw)?;
        let mut rejected = Vec::new();

        let match_stats = take_field::<MatchStats>(&mut object, "matchStats", &mut rejected)
            .and_then(|stats| {
                if stats.is_consistent() {
                    Some(stats)
                } else {
                    rejected.push("matchStats");
                    None
                }
            });

        Ok(Self {
            match_stats,
            scores: take_field(&mut object, "scores", &mut rejected),
            server: take_field(&mut object, "server", &mut rejected),
            setup_complete: take_field(&mut object, "setupComplete", &mut rejected),
            starting_server: take_field(&mut object, "startingServer", &mut rejected),
            user_side: take_field(&mut object, "userSide", &mut rejected),
            rejected,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.match_stats.is_none()
            && self.scores.is_none()
            && self.server.is_none()
            && self.setup_complete.is_none()
            && self.starting_server.is_none()
            && self.user_side.is_none()
    }
}

impl From<PersistedSnapshot> for PartialSnapshot {
    fn from(value: PersistedSnapshot) -> Self {
        Self {
            match_stats: Some(value.match_stats),
            scores: Some(value.scores),
            server: Some(value.server),
            setup_complete: Some(value.setup_complete),
            starting_server: Some(value.starting_server),
            user_side: Some(value.user_side),
            rejected: Vec::new(),
        }
    }
}

fn take_field<T: DeserializeOwned>(
    object: &mut Map<String, Value>,
    key: &'static str,
    rejected: &mut Vec<&'static str>,
) -> Option<T> {
    match object.remove(key) {
        None | Some(Value::Null) => None,
        Some(value) => match serde_json::from_value(value) {
            Ok(decoded) => Some(decoded),
            Err(_) => {
                rejected.push(key);
                None
            }
        },
    }
}

/// Events a presentation layer feeds into a match session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum PresentationInput {
    AppLaunching,
    LaunchChoice { resume: bool },
    ZoneTap { zone: usize },
    SetupChosen { server: usize },
    ResetRequested { kind: ResetKind },
    AppClosing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaunchPrompt {
    /// A set-up match exists; ask whether to resume it or start over.
    OfferResume,
    /// Nothing to resume; go straight to choosing the starting server.
    RequireSetup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakView {
    pub side: Option<Side>,
    pub count: u32,
    /// True once the run reaches the streak threshold.
    pub active: bool,
}

/// Read-only state handed to the presentation layer after every event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchView {
    pub scores: Scores,
    pub server: Side,
    pub serve: ServePosition,
    pub streak: StreakView,
    pub setup_complete: bool,
    pub needs_setup: bool,
    pub starting_server: Side,
    pub user_side: Side,
    pub match_stats: MatchStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOutput {
    pub view: MatchView,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point_scored: Option<Side>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<LaunchPrompt>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SessionReply {
    Ok(SessionOutput),
    Error(ErrorPayload),
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
