//! Error types for artifact joining
//!
//! Kind mismatches are programming errors in the calling orchestration layer;
//! I/O failures are environmental. Neither is retried here.

use std::io;
use std::path::PathBuf;
use verijoin_artifact::{ArtifactError, ArtifactKind};

/// Main merge error type
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// Inputs were not produced by the same kind of verification step
    #[error("kind mismatch: expected {expected}, got {left} and {right}")]
    KindMismatch {
        /// Kind requested by the caller
        expected: ArtifactKind,
        /// Kind of the left input
        left: ArtifactKind,
        /// Kind of the right input
        right: ArtifactKind,
    },

    /// Filesystem operation failed
    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Native error
        #[source]
        source: io::Error,
    },

    /// Artifact inspection failed
    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    /// Invalid merge configuration
    #[error("configuration error: {0}")]
    Config(String),
}

impl MergeError {
    /// Wrap an I/O error with the path it occurred on
    #[inline]
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Check if error indicates a bug in the caller rather than the environment
    #[inline]
    #[must_use]
    pub fn is_programming_error(&self) -> bool {
        matches!(
            self,
            Self::KindMismatch { .. } | Self::Artifact(ArtifactError::KindMismatch { .. })
        )
    }

    /// Underlying I/O error, if this failure came from the filesystem
    #[must_use]
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            Self::Io { source, .. } | Self::Artifact(ArtifactError::Io { source, .. }) => {
                Some(source)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_mismatch_is_programming_error() {
        let err = MergeError::KindMismatch {
            expected: ArtifactKind::TestGoal,
            left: ArtifactKind::TestGoal,
            right: ArtifactKind::TestSuite,
        };
        assert!(err.is_programming_error());
        assert!(err.io_error().is_none());
        assert_eq!(
            err.to_string(),
            "kind mismatch: expected test-goal, got test-goal and test-suite"
        );
    }

    #[test]
    fn io_error_is_environmental() {
        let err = MergeError::io("/ro/goal", io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(!err.is_programming_error());
        assert_eq!(err.io_error().map(io::Error::kind), Some(io::ErrorKind::PermissionDenied));
    }

    #[test]
    fn artifact_io_error_is_exposed() {
        let err: MergeError =
            ArtifactError::io("/missing", io::Error::from(io::ErrorKind::NotFound)).into();
        assert_eq!(err.io_error().map(io::Error::kind), Some(io::ErrorKind::NotFound));
    }
}
