use std::{sync::Arc, time::Duration};

use scoring_core::{ManualClock, MatchSession, MatchStateMachine};
use shared::{
    domain::{MatchStats, ResetKind, Scores, Side, Streak},
    protocol::{LaunchPrompt, PresentationInput},
};
use storage::FileBlobStore;

fn session_over(
    dir: &std::path::Path,
    clock: Arc<ManualClock>,
) -> MatchSession<FileBlobStore, Arc<ManualClock>> {
    MatchSession::new(
        MatchStateMachine::new(FileBlobStore::new(dir)),
        clock,
        Duration::from_millis(400),
    )
}

fn double_tap(
    session: &mut MatchSession<FileBlobStore, Arc<ManualClock>>,
    clock: &ManualClock,
    zone: usize,
) {
    session
        .handle(PresentationInput::ZoneTap { zone })
        .expect("first tap");
    clock.advance(Duration::from_millis(120));
    let output = session
        .handle(PresentationInput::ZoneTap { zone })
        .expect("second tap");
    assert!(output.point_scored.is_some());
    clock.advance(Duration::from_millis(1_000));
}

#[test]
fn match_survives_relaunch_without_its_streak() {
    let dir = tempfile::tempdir().expect("tempdir");
    let clock = Arc::new(ManualClock::new(0));

    let mut first = session_over(dir.path(), clock.clone());
    let launched = first
        .handle(PresentationInput::AppLaunching)
        .expect("launch");
    assert_eq!(launched.prompt, Some(LaunchPrompt::RequireSetup));
    first
        .handle(PresentationInput::SetupChosen { server: 0 })
        .expect("setup");
    for zone in [1, 1, 0, 1, 1] {
        double_tap(&mut first, &clock, zone);
    }
    assert!(first.machine().is_on_streak(Side::B));
    first
        .handle(PresentationInput::AppClosing)
        .expect("closing");
    let before = first.machine().state().snapshot();
    drop(first);

    let mut second = session_over(dir.path(), clock.clone());
    let relaunched = second
        .handle(PresentationInput::AppLaunching)
        .expect("relaunch");
    assert_eq!(relaunched.prompt, Some(LaunchPrompt::OfferResume));
    assert_eq!(second.machine().state().snapshot(), before);
    assert_eq!(second.machine().state().streak(), Streak::NONE);
    assert_eq!(relaunched.view.scores, Scores::new(1, 4));
    assert_eq!(relaunched.view.server, Side::B);
    assert!(!relaunched.view.streak.active);
}

#[test]
fn finished_match_is_counted_across_relaunch() {
    let dir = tempfile::tempdir().expect("tempdir");
    let clock = Arc::new(ManualClock::new(0));

    let mut session = session_over(dir.path(), clock.clone());
    session
        .handle(PresentationInput::AppLaunching)
        .expect("launch");
    session
        .handle(PresentationInput::SetupChosen { server: 1 })
        .expect("setup");
    for zone in [0, 0, 1] {
        double_tap(&mut session, &clock, zone);
    }
    session
        .handle(PresentationInput::ResetRequested {
            kind: ResetKind::New,
        })
        .expect("new match");
    drop(session);

    let reopened = MatchStateMachine::launch(FileBlobStore::new(dir.path()));
    assert_eq!(
        reopened.state().match_stats(),
        MatchStats {
            matches: 1,
            wins: 0
        }
    );
    assert_eq!(reopened.state().scores(), Scores::new(0, 0));
    assert_eq!(reopened.state().server(), Side::B);
    assert!(reopened.has_active_match());
}

#[test]
fn corrupt_store_file_falls_back_to_setup() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("shuttlestat_data.json"), "{ truncated").expect("seed");

    let mut session = session_over(dir.path(), Arc::new(ManualClock::new(0)));
    let output = session
        .handle(PresentationInput::AppLaunching)
        .expect("launch");
    assert_eq!(output.prompt, Some(LaunchPrompt::RequireSetup));
    assert_eq!(output.view.match_stats, MatchStats::default());
}
