use shared::{
    domain::{MatchStats, Scores, Side},
    protocol::{PartialSnapshot, PersistedSnapshot, SNAPSHOT_KEY},
};
use storage::{BlobStore, FileBlobStore, SnapshotStore};

#[test]
fn snapshot_written_by_one_store_is_read_by_a_fresh_one() {
    let dir = tempfile::tempdir().expect("tempdir");
    let snapshot = PersistedSnapshot {
        match_stats: MatchStats {
            matches: 9,
            wins: 5,
        },
        scores: Scores::new(20, 21),
        server: Side::B,
        setup_complete: true,
        starting_server: Side::A,
        user_side: Side::B,
    };

    SnapshotStore::new(FileBlobStore::new(dir.path())).save(&snapshot);

    let reopened = SnapshotStore::new(FileBlobStore::new(dir.path()));
    let loaded = reopened.load().expect("stored record");
    assert_eq!(loaded, PartialSnapshot::from(snapshot));
}

#[test]
fn hand_edited_legacy_record_is_applied_partially() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileBlobStore::new(dir.path());
    store
        .set(
            SNAPSHOT_KEY,
            r#"{"matchStats":{"matches":3,"wins":1},"scores":[4,2],"extra":"ignored"}"#,
        )
        .expect("seed record");

    let loaded = SnapshotStore::new(store).load().expect("record");
    assert_eq!(
        loaded.match_stats,
        Some(MatchStats {
            matches: 3,
            wins: 1
        })
    );
    assert_eq!(loaded.scores, Some(Scores::new(4, 2)));
    assert_eq!(loaded.server, None);
    assert_eq!(loaded.setup_complete, None);
    assert!(loaded.rejected.is_empty());
}

#[test]
fn unreadable_record_file_loads_as_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileBlobStore::new(dir.path());
    let path = store.path_for(SNAPSHOT_KEY).expect("path");
    std::fs::create_dir_all(path.join("not-a-file")).expect("make dir where file belongs");

    assert_eq!(SnapshotStore::new(store).load(), None);
}
