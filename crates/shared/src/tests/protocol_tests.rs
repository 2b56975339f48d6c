use super::*;

fn full_snapshot() -> PersistedSnapshot {
    PersistedSnapshot {
        match_stats: MatchStats {
            matches: 4,
            wins: 3,
        },
        scores: Scores::new(7, 9),
        server: Side::B,
        setup_complete: true,
        starting_server: Side::A,
        user_side: Side::B,
    }
}

#[test]
fn snapshot_serializes_exactly_the_persisted_fields() {
    let value = serde_json::to_value(full_snapshot()).expect("serialize");
    let object = value.as_object().expect("object");
    let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec![
            "matchStats",
            "scores",
            "server",
            "setupComplete",
            "startingServer",
            "userSide"
        ]
    );
    assert_eq!(value["scores"], serde_json::json!([7, 9]));
    assert_eq!(value["server"], serde_json::json!(1));
    assert_eq!(value["matchStats"], serde_json::json!({"matches": 4, "wins": 3}));
}

#[test]
fn full_record_decodes_every_field() {
    let raw = serde_json::to_string(&full_snapshot()).expect("serialize");
    let partial = PartialSnapshot::from_json(&raw).expect("decode");
    assert_eq!(partial, PartialSnapshot::from(full_snapshot()));
}

#[test]
fn partial_record_leaves_absent_fields_unset() {
    let partial =
        PartialSnapshot::from_json(r#"{"scores":[2,1],"setupComplete":true}"#).expect("decode");
    assert_eq!(partial.scores, Some(Scores::new(2, 1)));
    assert_eq!(partial.setup_complete, Some(true));
    assert_eq!(partial.server, None);
    assert_eq!(partial.match_stats, None);
    assert!(partial.rejected.is_empty());
}

#[test]
fn malformed_fields_are_rejected_individually() {
    let partial = PartialSnapshot::from_json(
        r#"{"scores":[-1,3],"server":7,"startingServer":0,"userSide":"me","setupComplete":null}"#,
    )
    .expect("decode");
    assert_eq!(partial.scores, None);
    assert_eq!(partial.server, None);
    assert_eq!(partial.user_side, None);
    assert_eq!(partial.setup_complete, None);
    assert_eq!(partial.starting_server, Some(Side::A));
    assert_eq!(partial.rejected, vec!["scores", "server", "userSide"]);
}

#[test]
fn stats_with_more_wins_than_matches_are_rejected() {
    let partial =
        PartialSnapshot::from_json(r#"{"matchStats":{"matches":1,"wins":2}}"#).expect("decode");
    assert_eq!(partial.match_stats, None);
    assert_eq!(partial.rejected, vec!["matchStats"]);
    assert!(partial.is_empty());
}

#[test]
fn non_object_documents_fail_to_decode() {
    assert!(PartialSnapshot::from_json("[1,2,3]").is_err());
    assert!(PartialSnapshot::from_json("not json").is_err());
}

#[test]
fn presentation_input_uses_tagged_wire_format() {
    let input: PresentationInput =
        serde_json::from_str(r#"{"type":"reset_requested","payload":{"kind":"new_setup"}}"#)
            .expect("decode");
    assert_eq!(
        input,
        PresentationInput::ResetRequested {
            kind: ResetKind::NewSetup
        }
    );

    let launching: PresentationInput =
        serde_json::from_str(r#"{"type":"app_launching"}"#).expect("decode");
    assert_eq!(launching, PresentationInput::AppLaunching);
}

#[test]
fn reset_kind_parses_wire_names() {
    assert_eq!("new".parse::<ResetKind>(), Ok(ResetKind::New));
    assert_eq!("all".parse::<ResetKind>(), Ok(ResetKind::All));
    assert_eq!(
        "factory".parse::<ResetKind>(),
        Err(crate::error::ScoringError::UnknownResetKind("factory".into()))
    );
}

#[test]
fn side_index_outside_range_is_an_error() {
    assert_eq!(Side::from_index(1), Ok(Side::B));
    assert_eq!(
        Side::from_index(2),
        Err(crate::error::ScoringError::InvalidSide(2))
    );
}
