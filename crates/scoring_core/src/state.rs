use shared::{
    domain::{MatchStats, Scores, Side, Streak},
    protocol::{PartialSnapshot, PersistedSnapshot},
};

/// The canonical match record. Read freely; mutate only through [`crate::MatchStateMachine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchState {
    pub(crate) scores: Scores,
    pub(crate) server: Side,
    pub(crate) streak: Streak,
    pub(crate) setup_complete: bool,
    pub(crate) starting_server: Side,
    pub(crate) match_stats: MatchStats,
    pub(crate) user_side: Side,
}

impl Default for MatchState {
    fn default() -> Self {
        Self {
            scores: Scores::default(),
            server: Side::A,
            streak: Streak::NONE,
            setup_complete: false,
            starting_server: Side::B,
            match_stats: MatchStats::default(),
            user_side: Side::B,
        }
    }
}

impl MatchState {
    pub fn scores(&self) -> Scores {
        self.scores
    }

    pub fn server(&self) -> Side {
        self.server
    }

    pub fn streak(&self) -> Streak {
        self.streak
    }

    pub fn setup_complete(&self) -> bool {
        self.setup_complete
    }

    pub fn starting_server(&self) -> Side {
        self.starting_server
    }

    pub fn match_stats(&self) -> MatchStats {
        self.match_stats
    }

    pub fn user_side(&self) -> Side {
        self.user_side
    }

    pub fn snapshot(&self) -> PersistedSnapshot {
        PersistedSnapshot {
            match_stats: self.match_stats,
            scores: self.scores,
            server: self.server,
            setup_complete: self.setup_complete,
            starting_server: self.starting_server,
            user_side: self.user_side,
        }
    }

    /// Overlays every field present in `partial`; absent fields keep their current value.
    pub(crate) fn apply_snapshot(&mut self, partial: &PartialSnapshot) {
        if let Some(match_stats) = partial.match_stats {
            self.match_stats = match_stats;
        }
        if let Some(scores) = partial.scores {
            self.scores = scores;
        }
        if let Some(server) = partial.server {
            self.server = server;
        }
        if let Some(setup_complete) = partial.setup_complete {
            self.setup_complete = setup_complete;
        }
        if let Some(starting_server) = partial.starting_server {
            self.starting_server = starting_server;
        }
        if let Some(user_side) = partial.user_side {
            self.user_side = user_side;
        }
    }
}
