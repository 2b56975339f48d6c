use std::time::Duration;

use shared::{
    domain::{ResetKind, Side},
    error::ScoringError,
    protocol::{LaunchPrompt, PresentationInput, SessionOutput, SessionReply},
};
use storage::{BlobStore, SnapshotStore};
use tracing::{debug, warn};

use crate::{
    clock::Clock,
    config::Settings,
    debounce::{TapDebouncer, TapOutcome},
    machine::MatchStateMachine,
};

/// Routes presentation-layer events into the state machine and answers with a fresh view.
pub struct MatchSession<S, C> {
    machine: MatchStateMachine<S>,
    debouncer: TapDebouncer,
    clock: C,
}

impl<S: BlobStore, C: Clock> MatchSession<S, C> {
    pub fn new(machine: MatchStateMachine<S>, clock: C, tap_window: Duration) -> Self {
        Self {
            machine,
            debouncer: TapDebouncer::new(tap_window),
            clock,
        }
    }

    pub fn from_settings(store: S, clock: C, settings: &Settings) -> Self {
        let snapshots = SnapshotStore::with_key(store, settings.storage_key.clone());
        Self::new(
            MatchStateMachine::with_snapshots(snapshots),
            clock,
            settings.tap_window(),
        )
    }

    pub fn machine(&self) -> &MatchStateMachine<S> {
        &self.machine
    }

    pub fn debouncer(&self) -> &TapDebouncer {
        &self.debouncer
    }

    pub fn handle(&mut self, input: PresentationInput) -> Result<SessionOutput, ScoringError> {
        let mut point_scored = None;
        let mut prompt = None;

        match input {
            PresentationInput::AppLaunching => {
                self.machine.restore();
                self.debouncer.reset();
                prompt = Some(self.launch_prompt());
            }
            PresentationInput::LaunchChoice { resume } => {
                if !resume {
                    self.machine.reset_match(ResetKind::NewSetup);
                    prompt = Some(LaunchPrompt::RequireSetup);
                }
            }
            PresentationInput::ZoneTap { zone } => {
                let zone = Side::from_index(zone)?;
                let now_ms = self.clock.now_ms();
                match self.debouncer.tap(zone, now_ms) {
                    TapOutcome::Confirmed(winner) => {
                        self.machine.record_point(winner);
                        point_scored = Some(winner);
                    }
                    TapOutcome::Pending(zone) => {
                        debug!(zone = %zone, now_ms, "tap: awaiting confirmation");
                    }
                }
            }
            PresentationInput::SetupChosen { server } => {
                let server = Side::from_index(server)?;
                self.machine.complete_setup(server);
            }
            PresentationInput::ResetRequested { kind } => {
                self.machine.reset_match(kind);
                if matches!(kind, ResetKind::NewSetup | ResetKind::All) {
                    prompt = Some(LaunchPrompt::RequireSetup);
                }
            }
            PresentationInput::AppClosing => {
                self.machine.flush();
            }
        }

        Ok(SessionOutput {
            view: self.machine.view(),
            point_scored,
            prompt,
        })
    }

    /// Like [`Self::handle`], folding a rejected input into the reply for wire consumers.
    pub fn reply(&mut self, input: PresentationInput) -> SessionReply {
        match self.handle(input) {
            Ok(output) => SessionReply::Ok(output),
            Err(err) => {
                warn!("session: input rejected: {err}");
                SessionReply::Error(err.into())
            }
        }
    }

    fn launch_prompt(&mut self) -> LaunchPrompt {
        if self.machine.has_active_match() {
            LaunchPrompt::OfferResume
        } else {
            self.machine.reset_match(ResetKind::NewSetup);
            LaunchPrompt::RequireSetup
        }
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
