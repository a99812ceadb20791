// tests/class_state_test.rs
use repo_miner::domain::ClassState;
use repo_miner::vcs::ChangedFile;

fn change(path: &str, added: u64, deleted: u64, loc: u64) -> ChangedFile {
    ChangedFile {
        path: path.to_string(),
        added,
        deleted,
        loc,
    }
}

#[test]
fn test_cumulative_fields_are_monotone_across_revisions() {
    let revisions = [
        (10u64, 0u64, 10u64, "alice", 1usize, false),
        (5, 3, 12, "bob", 4, false),
        (0, 12, 0, "alice", 2, true),
        (7, 0, 7, "carol", 3, false),
    ];

    let mut state = ClassState::new("src/Journal.java");
    let mut prev = state.clone();

    for (added, deleted, loc, author, file_count, is_fix) in revisions {
        state.record_revision(
            &change("src/Journal.java", added, deleted, loc),
            author,
            file_count,
            is_fix,
        );

        assert!(state.touched_loc() >= prev.touched_loc());
        assert!(state.revisions() > prev.revisions());
        assert!(state.fixes() >= prev.fixes());
        assert!(state.authors() >= prev.authors());
        assert!(state.added_loc() >= prev.added_loc());
        assert!(state.max_added_loc() >= prev.max_added_loc());
        assert!(state.churn() >= prev.churn());
        assert!(state.max_churn() >= prev.max_churn());
        assert!(state.changed_file_set() >= prev.changed_file_set());

        // Averages are exact at every step, not just at the end
        assert_eq!(
            state.avg_added_loc(),
            state.added_loc() as f64 / state.revisions() as f64
        );
        assert_eq!(
            state.avg_churn(),
            state.churn() as f64 / state.revisions() as f64
        );

        prev = state.clone();
    }

    // loc is a snapshot, not cumulative: the file ended deleted then re-added
    assert_eq!(state.loc(), 7);
    assert_eq!(state.revisions(), 4);
    assert_eq!(state.fixes(), 1);
    assert_eq!(state.authors(), 3);
}

#[test]
fn test_age_counts_release_intervals_since_last_fix() {
    let mut state = ClassState::new("src/Journal.java");
    state.record_revision(&change("src/Journal.java", 10, 0, 10), "alice", 1, false);

    // Three quiet releases
    state.advance_release();
    state.advance_release();
    state.advance_release();
    assert_eq!(state.age(), 3);

    // A fix resets the clock; later intervals count from the fix
    state.record_revision(&change("src/Journal.java", 1, 1, 10), "alice", 1, true);
    assert_eq!(state.age(), 0);
    state.advance_release();
    assert_eq!(state.age(), 1);
}

#[test]
fn test_weighted_age_tracks_churn_distribution() {
    let mut state = ClassState::new("src/Journal.java");

    // All churn at age 0: weighted age stays 0
    state.record_revision(&change("src/Journal.java", 100, 0, 100), "alice", 1, false);
    assert_eq!(state.weighted_age(), 0.0);

    // Old file touched lightly much later: weighted age moves a little
    state.advance_release();
    state.advance_release();
    state.advance_release();
    state.advance_release();
    state.record_revision(&change("src/Journal.java", 10, 0, 110), "alice", 1, false);

    // (0*100 + 4*10) / 110
    let expected = 40.0 / 110.0;
    assert!((state.weighted_age() - expected).abs() < 1e-9);
    // Weighted age never exceeds plain age
    assert!(state.weighted_age() <= state.age() as f64);
}
