//! Testing utilities for verijoin workspace
//!
//! Shared fixtures, tree listings and a deterministic id generator.

#![allow(missing_docs)]

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};
use tempfile::TempDir;
use verijoin_artifact::{Artifact, ArtifactKind, DynArtifact, TestGoal, TestSuite};
use verijoin_merge::{ArtifactMerger, MergeConfig, MergeContext, UniqueIdGenerator};

/// Install a fmt subscriber honouring `RUST_LOG`; safe to call from every test
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Predictable ids (`merge-0`, `merge-1`, ...) for asserting on paths
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: AtomicUsize,
}

impl UniqueIdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        format!("merge-{}", self.next.fetch_add(1, Ordering::Relaxed))
    }
}

pub fn sequential_merger() -> ArtifactMerger {
    ArtifactMerger::new(MergeContext::with_ids(
        MergeConfig::default(),
        Arc::new(SequentialIds::default()),
    ))
}

/// Temporary directory standing in for the output area of verification runs
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        init_tracing();
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write a test goal file at `rel`
    pub fn goal(&self, rel: &str, bytes: &[u8]) -> Artifact<TestGoal> {
        Artifact::new(self.write(rel, bytes))
    }

    pub fn dyn_goal(&self, rel: &str, bytes: &[u8]) -> DynArtifact {
        self.goal(rel, bytes).into_dyn()
    }

    /// Create a test suite directory at `rel` holding `files` (relative path, content)
    pub fn suite(&self, rel: &str, files: &[(&str, &str)]) -> Artifact<TestSuite> {
        let dir = self.root().join(rel);
        fs::create_dir_all(&dir).unwrap();
        for (name, content) in files {
            self.write(&format!("{rel}/{name}"), content.as_bytes());
        }
        Artifact::new(dir)
    }

    pub fn dyn_suite(&self, rel: &str, files: &[(&str, &str)]) -> DynArtifact {
        self.suite(rel, files).into_dyn()
    }

    pub fn write(&self, rel: &str, bytes: &[u8]) -> PathBuf {
        let path = self.root().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, bytes).unwrap();
        path
    }

    /// Every path (files and directories) under the workspace
    pub fn snapshot(&self) -> BTreeSet<PathBuf> {
        list_entries(self.root())
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

pub fn absent(kind: ArtifactKind) -> DynArtifact {
    DynArtifact::absent(kind)
}

/// Relative paths of all regular files under `root`
pub fn list_files(root: &Path) -> BTreeSet<PathBuf> {
    list_entries(root)
        .into_iter()
        .filter(|rel| root.join(rel).is_file())
        .collect()
}

/// Relative paths of all entries under `root`
pub fn list_entries(root: &Path) -> BTreeSet<PathBuf> {
    let mut out = BTreeSet::new();
    collect(root, root, &mut out);
    out
}

fn collect(root: &Path, dir: &Path, out: &mut BTreeSet<PathBuf>) {
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        out.insert(path.strip_prefix(root).unwrap().to_path_buf());
        if path.is_dir() && !fs::symlink_metadata(&path).unwrap().file_type().is_symlink() {
            collect(root, &path, out);
        }
    }
}

/// Single-component subdirectories of `root`
pub fn subdirectories(root: &Path) -> Vec<PathBuf> {
    let mut dirs: Vec<_> = fs::read_dir(root)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p.is_dir())
        .collect();
    dirs.sort();
    dirs
}
