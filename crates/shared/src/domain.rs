use std::{
    fmt,
    ops::{Index, IndexMut},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::error::ScoringError;

/// One of the two competing parties. Side `B` is always the local user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Side {
    A,
    B,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::A, Side::B];

    pub fn from_index(index: usize) -> Result<Self, ScoringError> {
        match index {
            0 => Ok(Side::A),
            1 => Ok(Side::B),
            other => Err(ScoringError::InvalidSide(other)),
        }
    }

    pub fn index(self) -> usize {
        match self {
            Side::A => 0,
            Side::B => 1,
        }
    }

    pub fn other(self) -> Self {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

impl TryFrom<u8> for Side {
    type Error = ScoringError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Side::from_index(usize::from(value))
    }
}

impl From<Side> for u8 {
    fn from(value: Side) -> Self {
        match value {
            Side::A => 0,
            Side::B => 1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// Running point totals, indexed by [`Side`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scores([u32; 2]);

impl Scores {
    pub fn new(a: u32, b: u32) -> Self {
        Self([a, b])
    }

    pub fn increment(&mut self, side: Side) {
        let slot = &mut self.0[side.index()];
        *slot = slot.saturating_add(1);
    }

    pub fn clear(&mut self) {
        self.0 = [0, 0];
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0, 0]
    }

    pub fn as_array(&self) -> [u32; 2] {
        self.0
    }
}

impl Index<Side> for Scores {
    type Output = u32;

    fn index(&self, side: Side) -> &Self::Output {
        &self.0[side.index()]
    }
}

impl IndexMut<Side> for Scores {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        &mut self.0[side.index()]
    }
}

/// Consecutive points won by one side. `count` is at least 1 whenever `side` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Streak {
    side: Option<Side>,
    count: u32,
}

impl Streak {
    pub const NONE: Streak = Streak {
        side: None,
        count: 0,
    };

    pub fn side(&self) -> Option<Side> {
        self.side
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Extends the run if `winner` already holds it, otherwise starts a new run of one.
    pub fn extend(&mut self, winner: Side) {
        if self.side == Some(winner) {
            self.count = self.count.saturating_add(1);
        } else {
            self.side = Some(winner);
            self.count = 1;
        }
    }

    pub fn clear(&mut self) {
        *self = Streak::NONE;
    }
}

impl Default for Streak {
    fn default() -> Self {
        Streak::NONE
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchStats {
    pub matches: u32,
    pub wins: u32,
}

impl MatchStats {
    pub fn is_consistent(&self) -> bool {
        self.wins <= self.matches
    }

    /// Counts a finished match; only the user's side winning outright credits a win.
    pub fn record_finished(&mut self, scores: &Scores, user: Side) {
        self.matches = self.matches.saturating_add(1);
        if scores[user] > scores[user.other()] {
            self.wins = self.wins.saturating_add(1);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetKind {
    /// End the running match and credit it, keeping setup.
    New,
    /// Launch-time "new match": credit only a match that has points, then force setup.
    NewSetup,
    /// Zero the running game.
    Current,
    /// Factory reset, including cumulative stats.
    All,
}

impl ResetKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ResetKind::New => "new",
            ResetKind::NewSetup => "new_setup",
            ResetKind::Current => "current",
            ResetKind::All => "all",
        }
    }
}

impl FromStr for ResetKind {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "new" => Ok(ResetKind::New),
            "new_setup" => Ok(ResetKind::NewSetup),
            "current" => Ok(ResetKind::Current),
            "all" => Ok(ResetKind::All),
            other => Err(ScoringError::UnknownResetKind(other.to_string())),
        }
    }
}

impl fmt::Display for ResetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Service court relative to the serving side's own facing direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServeCourt {
    Right,
    Left,
}

/// Which end of the court a side occupies from the viewer's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourtEnd {
    Far,
    Near,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewColumn {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServePosition {
    pub server: Side,
    pub court: ServeCourt,
    pub end: CourtEnd,
    pub column: ViewColumn,
}
