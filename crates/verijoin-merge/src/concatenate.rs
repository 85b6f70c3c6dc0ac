//! Test goal join
//!
//! Absent sides degenerate to the other side, identical content
//! short-circuits to the left input, and differing content is concatenated
//! into a fresh sibling file.

use crate::config::MergeContext;
use crate::error::MergeError;
use crate::strategy::{JoinOutcome, JoinStrategy, Joined};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use verijoin_artifact::compare::files_identical_chunked;
use verijoin_artifact::{Artifact, TestGoal};

/// Concatenating join for test goals
#[derive(Debug, Clone, Copy, Default)]
pub struct ConcatenateJoin;

impl ConcatenateJoin {
    /// Create new concatenating join
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Path for the merged file: a sibling of `left` named by a fresh token
    fn fresh_sibling(left: &Path, ctx: &MergeContext) -> PathBuf {
        let parent = match left.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut name = ctx.next_id();
        if ctx.config().keep_extension {
            if let Some(ext) = left.extension().and_then(|e| e.to_str()) {
                name.push('.');
                name.push_str(ext);
            }
        }
        parent.join(name)
    }

    /// Write `left` then `right` into `target`, which must not exist yet
    ///
    /// A partially written `target` is removed before the error is returned.
    fn write_concatenation(left: &Path, right: &Path, target: &Path) -> Result<u64, MergeError> {
        let out = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(target)
            .map_err(|e| MergeError::io(target, e))?;

        let result = Self::append_all(out, [left, right], target);
        if result.is_err() {
            if let Err(e) = fs::remove_file(target) {
                tracing::warn!(path = %target.display(), error = %e, "failed to remove partial merge output");
            }
        }
        result
    }

    /// Short content fingerprint for log fields
    fn fingerprint(goal: &Artifact<TestGoal>) -> String {
        match goal.fingerprint() {
            Ok(Some(hash)) => hash.short(),
            Ok(None) => "absent".to_string(),
            Err(e) => {
                tracing::trace!(error = %e, "fingerprint unavailable");
                "unreadable".to_string()
            }
        }
    }

    fn append_all(out: File, sources: [&Path; 2], target: &Path) -> Result<u64, MergeError> {
        let mut writer = BufWriter::new(out);
        let mut total = 0;
        for source in sources {
            let mut reader = File::open(source).map_err(|e| MergeError::io(source, e))?;
            total += io::copy(&mut reader, &mut writer).map_err(|e| MergeError::io(target, e))?;
        }
        writer
            .into_inner()
            .map_err(|e| MergeError::io(target, e.into_error()))?
            .sync_all()
            .map_err(|e| MergeError::io(target, e))?;
        Ok(total)
    }
}

impl JoinStrategy for ConcatenateJoin {
    type Target = TestGoal;

    fn join(
        &self,
        left: Artifact<TestGoal>,
        right: Artifact<TestGoal>,
        ctx: &MergeContext,
    ) -> Result<Joined<TestGoal>, MergeError> {
        let Some(left_path) = left.location().map(Path::to_path_buf) else {
            let outcome = if right.is_absent() {
                JoinOutcome::BothAbsent
            } else {
                JoinOutcome::TookRight
            };
            return Ok(Joined::new(right, outcome));
        };
        let Some(right_path) = right.location().map(Path::to_path_buf) else {
            return Ok(Joined::new(left, JoinOutcome::TookLeft));
        };

        left.validate()?;
        right.validate()?;

        let identical =
            files_identical_chunked(&left_path, &right_path, ctx.config().compare_chunk_size)
                .map_err(|e| MergeError::io(&left_path, e))?;
        if identical {
            if tracing::enabled!(tracing::Level::DEBUG) {
                tracing::debug!(
                    path = %left_path.display(),
                    fingerprint = %Self::fingerprint(&left),
                    "test goals identical, keeping left"
                );
            }
            return Ok(Joined::new(left, JoinOutcome::Identical));
        }

        let target = Self::fresh_sibling(&left_path, ctx);
        let bytes = Self::write_concatenation(&left_path, &right_path, &target)?;
        let merged = Artifact::new(&target);
        if tracing::enabled!(tracing::Level::DEBUG) {
            tracing::debug!(
                left = %left_path.display(),
                right = %right_path.display(),
                target = %target.display(),
                left_fingerprint = %Self::fingerprint(&left),
                right_fingerprint = %Self::fingerprint(&right),
                merged_fingerprint = %Self::fingerprint(&merged),
                bytes,
                "concatenated test goals"
            );
        }

        Ok(Joined::new(merged, JoinOutcome::Concatenated { path: target }))
    }

    fn name(&self) -> &'static str {
        "Concatenate"
    }
}
