//! Artifact merger
//!
//! Entry point used by orchestration code: checks kinds, then dispatches to
//! the [`JoinStrategy`] for that kind.

use crate::concatenate::ConcatenateJoin;
use crate::config::{MergeConfig, MergeContext};
use crate::error::MergeError;
use crate::nest::NestJoin;
use crate::strategy::{DynJoined, JoinStrategy, Joined};
use verijoin_artifact::{Artifact, ArtifactKind, DynArtifact, TestGoal, TestSuite};

/// Stateless merge service for verification artifacts
///
/// All dependencies live in the [`MergeContext`]; the merger itself holds no
/// mutable state and can be shared between threads.
#[derive(Debug, Clone, Default)]
pub struct ArtifactMerger {
    ctx: MergeContext,
    goals: ConcatenateJoin,
    suites: NestJoin,
}

impl ArtifactMerger {
    /// Create merger from a context
    #[inline]
    #[must_use]
    pub fn new(ctx: MergeContext) -> Self {
        Self {
            ctx,
            goals: ConcatenateJoin::new(),
            suites: NestJoin::new(),
        }
    }

    /// Create merger with UUID ids and the given configuration
    ///
    /// # Errors
    /// Returns `Config` if the configuration fails validation
    pub fn with_config(config: MergeConfig) -> Result<Self, MergeError> {
        config.validate()?;
        Ok(Self::new(MergeContext::new(config)))
    }

    /// Active context
    #[inline]
    #[must_use]
    pub fn context(&self) -> &MergeContext {
        &self.ctx
    }

    /// Merge two artifacts of `kind`
    ///
    /// # Errors
    /// - `KindMismatch` if either input is not of `kind` (no I/O performed)
    /// - `Io`/`Artifact` if the filesystem fails
    pub fn merge(
        &self,
        kind: ArtifactKind,
        left: DynArtifact,
        right: DynArtifact,
    ) -> Result<DynArtifact, MergeError> {
        self.join(kind, left, right).map(|joined| joined.artifact)
    }

    /// Merge two artifacts of `kind`, reporting which path was taken
    ///
    /// # Errors
    /// Same as [`ArtifactMerger::merge`]
    pub fn join(
        &self,
        kind: ArtifactKind,
        left: DynArtifact,
        right: DynArtifact,
    ) -> Result<DynJoined, MergeError> {
        if left.kind != kind || right.kind != kind {
            return Err(MergeError::KindMismatch {
                expected: kind,
                left: left.kind,
                right: right.kind,
            });
        }

        let joined = match kind {
            ArtifactKind::TestGoal => self
                .merge_test_goal(left.downcast()?, right.downcast()?)?
                .into_dyn(),
            ArtifactKind::TestSuite => self
                .merge_test_suite(left.downcast()?, right.downcast()?)?
                .into_dyn(),
        };

        tracing::info!(
            %kind,
            outcome = joined.outcome.label(),
            location = ?joined.artifact.location,
            "merged artifacts"
        );
        Ok(joined)
    }

    /// Join two test goals
    ///
    /// # Errors
    /// Returns `MergeError` if the filesystem fails
    pub fn merge_test_goal(
        &self,
        left: Artifact<TestGoal>,
        right: Artifact<TestGoal>,
    ) -> Result<Joined<TestGoal>, MergeError> {
        tracing::trace!(strategy = self.goals.name(), "joining test goals");
        self.goals.join(left, right, &self.ctx)
    }

    /// Join two test suites
    ///
    /// # Errors
    /// Returns `MergeError` if the filesystem fails
    pub fn merge_test_suite(
        &self,
        left: Artifact<TestSuite>,
        right: Artifact<TestSuite>,
    ) -> Result<Joined<TestSuite>, MergeError> {
        tracing::trace!(strategy = self.suites.name(), "joining test suites");
        self.suites.join(left, right, &self.ctx)
    }

    /// Left fold of [`ArtifactMerger::merge`] over any number of partial
    /// results; an empty input yields an absent artifact
    ///
    /// # Errors
    /// Stops at the first failing merge
    pub fn merge_all<I>(&self, kind: ArtifactKind, artifacts: I) -> Result<DynArtifact, MergeError>
    where
        I: IntoIterator<Item = DynArtifact>,
    {
        artifacts
            .into_iter()
            .try_fold(DynArtifact::absent(kind), |acc, next| self.merge(kind, acc, next))
    }

    /// Equality of two artifacts under their kind's semantics
    ///
    /// # Errors
    /// Returns `MergeError` if test goal content cannot be read
    pub fn equals(&self, left: &DynArtifact, right: &DynArtifact) -> Result<bool, MergeError> {
        Ok(left.equals(right)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::JoinOutcome;
    use std::fs;

    #[test]
    fn kind_mismatch_fails_before_io() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("suite");
        fs::create_dir(&dir).unwrap();

        let merger = ArtifactMerger::default();
        let err = merger
            .merge(
                ArtifactKind::TestSuite,
                DynArtifact::present(ArtifactKind::TestSuite, &dir),
                DynArtifact::absent(ArtifactKind::TestGoal),
            )
            .unwrap_err();
        assert!(err.is_programming_error());
        assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);
    }

    #[test]
    fn requested_kind_must_match_inputs() {
        let merger = ArtifactMerger::default();
        let err = merger
            .merge(
                ArtifactKind::TestGoal,
                DynArtifact::absent(ArtifactKind::TestSuite),
                DynArtifact::absent(ArtifactKind::TestSuite),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            MergeError::KindMismatch {
                expected: ArtifactKind::TestGoal,
                ..
            }
        ));
    }

    #[test]
    fn join_dispatches_on_kind() {
        let root = tempfile::tempdir().unwrap();
        let a = root.path().join("a.prp");
        let b = root.path().join("b.prp");
        fs::write(&a, b"x").unwrap();
        fs::write(&b, b"y").unwrap();

        let joined = ArtifactMerger::default()
            .join(
                ArtifactKind::TestGoal,
                DynArtifact::present(ArtifactKind::TestGoal, &a),
                DynArtifact::present(ArtifactKind::TestGoal, &b),
            )
            .unwrap();
        assert_eq!(joined.artifact.kind, ArtifactKind::TestGoal);
        assert!(matches!(joined.outcome, JoinOutcome::Concatenated { .. }));
    }

    #[test]
    fn with_config_rejects_zero_chunk_size() {
        let err = ArtifactMerger::with_config(MergeConfig::new().with_compare_chunk_size(0))
            .unwrap_err();
        assert!(matches!(err, MergeError::Config(_)));
        assert!(ArtifactMerger::with_config(MergeConfig::new()).is_ok());
    }

    #[test]
    fn merge_all_empty_is_absent() {
        let merged = ArtifactMerger::default()
            .merge_all(ArtifactKind::TestSuite, Vec::new())
            .unwrap();
        assert_eq!(merged, DynArtifact::absent(ArtifactKind::TestSuite));
    }

    #[test]
    fn merge_all_rejects_foreign_kind() {
        let result = ArtifactMerger::default().merge_all(
            ArtifactKind::TestGoal,
            vec![
                DynArtifact::absent(ArtifactKind::TestGoal),
                DynArtifact::absent(ArtifactKind::TestSuite),
            ],
        );
        assert!(matches!(result, Err(MergeError::KindMismatch { .. })));
    }

    #[test]
    fn equals_delegates_to_kind_semantics() {
        let merger = ArtifactMerger::default();
        let goal = DynArtifact::absent(ArtifactKind::TestGoal);
        assert!(merger.equals(&goal, &goal.clone()).unwrap());
        assert!(!merger
            .equals(&goal, &DynArtifact::absent(ArtifactKind::TestSuite))
            .unwrap());
    }
}
