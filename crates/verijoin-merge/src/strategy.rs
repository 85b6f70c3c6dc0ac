//! Join strategy trait and core types
//!
//! Provides the [`JoinStrategy`] trait implemented once per artifact kind.

use crate::config::MergeContext;
use crate::error::MergeError;
use std::path::PathBuf;
use verijoin_artifact::{Artifact, ArtifactType, DynArtifact};

/// Pairwise join of two same-kind artifacts
///
/// # Contract
/// - The result has the same kind as the inputs
/// - Input files and trees are never modified destructively
/// - An absent side is valid input, never an error
pub trait JoinStrategy: Send + Sync + std::fmt::Debug {
    /// Artifact type this strategy joins
    type Target: ArtifactType;

    /// Join `left` and `right`
    ///
    /// # Errors
    /// Returns `MergeError` if the filesystem fails
    fn join(
        &self,
        left: Artifact<Self::Target>,
        right: Artifact<Self::Target>,
        ctx: &MergeContext,
    ) -> Result<Joined<Self::Target>, MergeError>;

    /// Strategy name (for logging)
    fn name(&self) -> &'static str;
}

/// Which path a join took
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    /// Neither run produced content
    BothAbsent,

    /// Right side was absent; left returned as-is
    TookLeft,

    /// Left side was absent; right adopted
    TookRight,

    /// Byte-identical content; left returned as-is
    Identical,

    /// New file holding left's bytes followed by right's
    Concatenated {
        /// Freshly created file
        path: PathBuf,
    },

    /// Right tree copied under a new subdirectory of left
    Nested {
        /// Freshly created subdirectory
        subdirectory: PathBuf,
        /// Number of non-directory entries copied
        files_copied: usize,
    },
}

impl JoinOutcome {
    /// Check if the join created anything on disk
    #[inline]
    #[must_use]
    pub fn wrote(&self) -> bool {
        matches!(self, Self::Concatenated { .. } | Self::Nested { .. })
    }

    /// Short label for logs
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::BothAbsent => "both-absent",
            Self::TookLeft => "took-left",
            Self::TookRight => "took-right",
            Self::Identical => "identical",
            Self::Concatenated { .. } => "concatenated",
            Self::Nested { .. } => "nested",
        }
    }
}

/// Result of a typed join
#[derive(Debug, Clone)]
pub struct Joined<T: ArtifactType> {
    /// Merged artifact
    pub artifact: Artifact<T>,
    /// Decision taken
    pub outcome: JoinOutcome,
}

impl<T: ArtifactType> Joined<T> {
    /// Create from parts
    #[inline]
    #[must_use]
    pub fn new(artifact: Artifact<T>, outcome: JoinOutcome) -> Self {
        Self { artifact, outcome }
    }

    /// Discard the outcome
    #[inline]
    #[must_use]
    pub fn into_artifact(self) -> Artifact<T> {
        self.artifact
    }

    /// Type-erased view
    #[inline]
    #[must_use]
    pub fn into_dyn(self) -> DynJoined {
        DynJoined {
            artifact: self.artifact.into_dyn(),
            outcome: self.outcome,
        }
    }
}

/// Result of a join dispatched on a runtime kind
#[derive(Debug, Clone)]
pub struct DynJoined {
    /// Merged artifact
    pub artifact: DynArtifact,
    /// Decision taken
    pub outcome: JoinOutcome,
}
