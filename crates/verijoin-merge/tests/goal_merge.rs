//! Test goal joins through the public merger API

use pretty_assertions::assert_eq;
use std::fs;
use verijoin_artifact::{ArtifactKind, DynArtifact};
use verijoin_merge::{ArtifactMerger, JoinOutcome, MergeError};
use verijoin_test_utils::{absent, sequential_merger, Workspace};

const GOAL: ArtifactKind = ArtifactKind::TestGoal;

#[test]
fn test_hello_world_concatenates_to_ten_bytes() -> anyhow::Result<()> {
    let ws = Workspace::new();
    let a = ws.dyn_goal("run-1/goal.txt", b"hello");
    let b = ws.dyn_goal("run-2/goal.txt", b"world");

    let merged = ArtifactMerger::default().merge(GOAL, a.clone(), b.clone())?;
    let path = merged.location.as_deref().expect("merged goal has a location");

    assert_ne!(Some(path), a.location.as_deref());
    assert_ne!(Some(path), b.location.as_deref());
    assert_eq!(fs::read(path)?, b"helloworld".to_vec());
    assert_eq!(fs::metadata(path)?.len(), 10);
    Ok(())
}

#[test]
fn test_merged_file_is_sibling_of_left() -> anyhow::Result<()> {
    let ws = Workspace::new();
    let a = ws.dyn_goal("run-1/goal.txt", b"a");
    let b = ws.dyn_goal("run-2/goal.txt", b"b");

    let merged = sequential_merger().merge(GOAL, a, b)?;
    assert_eq!(merged.location, Some(ws.root().join("run-1/merge-0.txt")));
    Ok(())
}

#[test]
fn test_identical_goals_create_nothing() -> anyhow::Result<()> {
    let ws = Workspace::new();
    let a = ws.dyn_goal("run-1/goal.txt", b"COVER( init(main()), FQL(COVER EDGES(@DECISIONEDGE)) )");
    let b = ws.dyn_goal("run-2/goal.txt", b"COVER( init(main()), FQL(COVER EDGES(@DECISIONEDGE)) )");
    let before = ws.snapshot();

    let joined = ArtifactMerger::default().join(GOAL, a.clone(), b)?;

    assert_eq!(joined.outcome, JoinOutcome::Identical);
    assert_eq!(joined.artifact, a);
    assert_eq!(ws.snapshot(), before);
    Ok(())
}

#[test]
fn test_absent_sides_return_other_side() -> anyhow::Result<()> {
    let ws = Workspace::new();
    let x = ws.dyn_goal("goal.txt", b"x");
    let merger = ArtifactMerger::default();

    assert_eq!(merger.merge(GOAL, absent(GOAL), x.clone())?, x);
    assert_eq!(merger.merge(GOAL, x.clone(), absent(GOAL))?, x);
    assert_eq!(merger.merge(GOAL, absent(GOAL), absent(GOAL))?, absent(GOAL));
    Ok(())
}

#[test]
fn test_both_absent_creates_nothing() {
    let ws = Workspace::new();
    let before = ws.snapshot();

    let merged = ArtifactMerger::default()
        .merge(GOAL, absent(GOAL), absent(GOAL))
        .unwrap();

    assert!(merged.location.is_none());
    assert_eq!(ws.snapshot(), before);
}

#[test]
fn test_kind_mismatch_writes_nothing() {
    let ws = Workspace::new();
    let goal = ws.dyn_goal("goal.txt", b"goal");
    let suite = ws.dyn_suite("suite", &[("t1.xml", "t1")]);
    let before = ws.snapshot();

    let err = ArtifactMerger::default()
        .merge(GOAL, goal, suite)
        .unwrap_err();

    assert!(matches!(
        err,
        MergeError::KindMismatch {
            expected: ArtifactKind::TestGoal,
            left: ArtifactKind::TestGoal,
            right: ArtifactKind::TestSuite,
        }
    ));
    assert_eq!(ws.snapshot(), before);
}

#[test]
fn test_inputs_untouched_after_concatenation() -> anyhow::Result<()> {
    let ws = Workspace::new();
    let a = ws.dyn_goal("a.txt", b"left");
    let b = ws.dyn_goal("b.txt", b"right");

    ArtifactMerger::default().merge(GOAL, a, b)?;

    assert_eq!(fs::read(ws.root().join("a.txt"))?, b"left".to_vec());
    assert_eq!(fs::read(ws.root().join("b.txt"))?, b"right".to_vec());
    Ok(())
}

#[test]
fn test_repeated_merges_use_fresh_paths() -> anyhow::Result<()> {
    let ws = Workspace::new();
    let a = ws.dyn_goal("a.txt", b"1");
    let b = ws.dyn_goal("b.txt", b"2");
    let merger = ArtifactMerger::default();

    let first = merger.merge(GOAL, a.clone(), b.clone())?;
    let second = merger.merge(GOAL, a, b)?;

    assert_ne!(first.location, second.location);
    assert_eq!(fs::read(first.location.unwrap())?, b"12".to_vec());
    assert_eq!(fs::read(second.location.unwrap())?, b"12".to_vec());
    Ok(())
}

#[test]
fn test_merge_all_folds_left() -> anyhow::Result<()> {
    let ws = Workspace::new();
    let a = ws.dyn_goal("a.txt", b"a");
    let b = ws.dyn_goal("b.txt", b"b");
    let c = ws.dyn_goal("c.txt", b"c");
    let merger = ArtifactMerger::default();

    let all = merger.merge_all(GOAL, vec![a.clone(), absent(GOAL), b.clone(), c.clone()])?;
    let pairwise = {
        let ab = merger.merge(GOAL, merger.merge(GOAL, a, absent(GOAL))?, b)?;
        merger.merge(GOAL, ab, c)?
    };

    assert_eq!(fs::read(all.location.unwrap())?, b"abc".to_vec());
    assert_eq!(fs::read(pairwise.location.unwrap())?, b"abc".to_vec());
    Ok(())
}

#[test]
fn test_merge_all_single_input_is_identity() -> anyhow::Result<()> {
    let ws = Workspace::new();
    let a = ws.dyn_goal("a.txt", b"only");

    let merged = ArtifactMerger::default().merge_all(GOAL, vec![a.clone()])?;
    assert_eq!(merged, a);
    Ok(())
}

#[test]
fn test_missing_goal_file_propagates_not_found() {
    let ws = Workspace::new();
    let a = ws.dyn_goal("a.txt", b"a");
    let gone = DynArtifact::present(GOAL, ws.root().join("vanished.txt"));

    let err = ArtifactMerger::default().merge(GOAL, a, gone).unwrap_err();
    assert!(!err.is_programming_error());
    assert_eq!(
        err.io_error().map(std::io::Error::kind),
        Some(std::io::ErrorKind::NotFound)
    );
}

#[test]
fn test_goal_fingerprint_tracks_content() -> anyhow::Result<()> {
    let ws = Workspace::new();
    let a = ws.goal("a.txt", b"same");
    let b = ws.goal("b.txt", b"same");
    let c = ws.goal("c.txt", b"other");

    assert_eq!(a.fingerprint()?, b.fingerprint()?);
    assert_ne!(a.fingerprint()?, c.fingerprint()?);
    Ok(())
}
