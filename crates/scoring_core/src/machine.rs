use shared::{
    domain::{ResetKind, ServePosition, Side},
    protocol::{MatchView, StreakView},
};
use storage::{BlobStore, SnapshotStore};
use tracing::{debug, info};

use crate::{serve::derive_serve_court, state::MatchState, STREAK_THRESHOLD};

/// Owns the match record and applies every transition to it, flushing a snapshot after each.
///
/// Transitions are synchronous and run to completion. Callers sharing one machine across
/// threads must serialize access themselves (single owner or a mutex around it).
pub struct MatchStateMachine<S> {
    state: MatchState,
    snapshots: SnapshotStore<S>,
}

impl<S: BlobStore> MatchStateMachine<S> {
    /// A machine holding launch defaults. Storage is not read.
    pub fn new(store: S) -> Self {
        Self::with_snapshots(SnapshotStore::new(store))
    }

    pub fn with_snapshots(snapshots: SnapshotStore<S>) -> Self {
        Self {
            state: MatchState::default(),
            snapshots,
        }
    }

    /// Launch defaults overlaid with whatever snapshot the store holds.
    pub fn launch(store: S) -> Self {
        let mut machine = Self::new(store);
        machine.restore();
        machine
    }

    /// Rebuilds state as a fresh launch would: defaults, then the stored snapshot on top.
    /// The streak never survives this. Returns whether any stored field was applied.
    pub fn restore(&mut self) -> bool {
        self.state = MatchState::default();
        let Some(partial) = self.snapshots.load() else {
            return false;
        };
        self.state.apply_snapshot(&partial);
        info!(
            scores = ?self.state.scores.as_array(),
            server = %self.state.server,
            setup_complete = self.state.setup_complete,
            "match: state restored"
        );
        !partial.is_empty()
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Every point hands serve to its winner. Not gated on setup.
    pub fn record_point(&mut self, winner: Side) {
        self.state.streak.extend(winner);
        self.state.scores.increment(winner);
        self.state.server = winner;
        debug!(
            winner = %winner,
            scores = ?self.state.scores.as_array(),
            streak = self.state.streak.count(),
            "match: point recorded"
        );
        self.flush();
    }

    pub fn complete_setup(&mut self, chosen: Side) {
        self.state.server = chosen;
        self.state.starting_server = chosen;
        self.state.setup_complete = true;
        self.state.user_side = Side::B;
        info!(starting_server = %chosen, "match: setup complete");
        self.flush();
    }

    pub fn reset_match(&mut self, kind: ResetKind) {
        let state = &mut self.state;
        match kind {
            ResetKind::New => {
                state.match_stats.record_finished(&state.scores, Side::B);
                state.scores.clear();
                state.server = state.starting_server;
            }
            ResetKind::NewSetup => {
                if !state.scores.is_zero() {
                    state.match_stats.record_finished(&state.scores, Side::B);
                }
                state.scores.clear();
                state.streak.clear();
                state.setup_complete = false;
            }
            ResetKind::Current => {
                state.scores.clear();
                state.streak.clear();
                state.server = state.starting_server;
            }
            ResetKind::All => {
                state.match_stats = Default::default();
                state.scores.clear();
                state.streak.clear();
                state.setup_complete = false;
            }
        }
        info!(
            kind = %kind,
            matches = state.match_stats.matches,
            wins = state.match_stats.wins,
            "match: reset"
        );
        self.flush();
    }

    /// True once setup has been completed, even at 0-0.
    pub fn has_active_match(&self) -> bool {
        self.state.setup_complete
    }

    pub fn is_on_streak(&self, side: Side) -> bool {
        self.state.streak.side() == Some(side) && self.state.streak.count() >= STREAK_THRESHOLD
    }

    pub fn serve_position(&self) -> ServePosition {
        derive_serve_court(self.state.server, &self.state.scores)
    }

    pub fn view(&self) -> MatchView {
        let streak = self.state.streak;
        MatchView {
            scores: self.state.scores,
            server: self.state.server,
            serve: self.serve_position(),
            streak: StreakView {
                side: streak.side(),
                count: streak.count(),
                active: streak.side().is_some_and(|side| self.is_on_streak(side)),
            },
            setup_complete: self.state.setup_complete,
            needs_setup: !self.state.setup_complete,
            starting_server: self.state.starting_server,
            user_side: self.state.user_side,
            match_stats: self.state.match_stats,
        }
    }

    /// Writes the current snapshot. Failures are logged by the snapshot store and dropped.
    pub fn flush(&self) {
        self.snapshots.save(&self.state.snapshot());
    }
}

#[cfg(test)]
#[path = "tests/machine_tests.rs"]
mod tests;
