//! Artifact types
//!
//! Defines the sealed [`ArtifactType`] trait, the statically typed
//! [`Artifact<T>`] and its type-erased counterpart [`DynArtifact`].

use crate::compare;
use crate::hash::ContentHash;
use crate::kind::{ArtifactKind, Shape};
use std::fmt::Debug;
use std::io;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Trait for artifact types
///
/// Each implementor is a zero-sized marker tying an [`Artifact<T>`] to one
/// [`ArtifactKind`]. This trait is **sealed**: the set of kinds is closed.
pub trait ArtifactType: Send + Sync + 'static + Debug + private::Sealed {
    /// Kind tag shared by every artifact of this type
    const KIND: ArtifactKind;

    /// Equality of two optional locations under this type's semantics
    ///
    /// # Errors
    /// Returns error if backing content cannot be read
    fn locations_equal(left: Option<&Path>, right: Option<&Path>) -> Result<bool, ArtifactError>;
}

#[doc(hidden)]
pub mod private {
    /// Sealed trait marker
    pub trait Sealed {}
}

/// Test goal: a single file, compared by content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestGoal;

/// Test suite: a directory, compared by identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestSuite;

impl private::Sealed for TestGoal {}
impl private::Sealed for TestSuite {}

impl ArtifactType for TestGoal {
    const KIND: ArtifactKind = ArtifactKind::TestGoal;

    fn locations_equal(left: Option<&Path>, right: Option<&Path>) -> Result<bool, ArtifactError> {
        match (left, right) {
            (None, None) => Ok(true),
            (Some(l), Some(r)) => {
                compare::files_identical(l, r).map_err(|source| ArtifactError::io(l, source))
            }
            _ => Ok(false),
        }
    }
}

impl ArtifactType for TestSuite {
    const KIND: ArtifactKind = ArtifactKind::TestSuite;

    fn locations_equal(left: Option<&Path>, right: Option<&Path>) -> Result<bool, ArtifactError> {
        Ok(left == right)
    }
}

/// Errors related to artifact operations
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    /// Artifact carries a different kind than required
    #[error("kind mismatch: expected {expected}, got {actual}")]
    KindMismatch {
        expected: ArtifactKind,
        actual: ArtifactKind,
    },

    /// Unrecognised kind tag
    #[error("unknown artifact kind: {0}")]
    UnknownKind(String),

    /// Location exists but has the wrong shape for the kind
    #[error("{} is not a {expected:?} as required by {kind}", .path.display())]
    ShapeMismatch {
        path: PathBuf,
        kind: ArtifactKind,
        expected: Shape,
    },

    /// Filesystem access failed
    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ArtifactError {
    /// Wrap an I/O error with the path it occurred on
    #[inline]
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Statically typed artifact
///
/// # Invariants
/// - Kind is always `T::KIND`
/// - Immutable after construction; only [`Artifact::with_location`] yields
///   an artifact pointing elsewhere
#[derive(Debug, PartialEq, Eq)]
pub struct Artifact<T: ArtifactType> {
    location: Option<PathBuf>,
    _phantom: PhantomData<T>,
}

impl<T: ArtifactType> Clone for Artifact<T> {
    fn clone(&self) -> Self {
        Self {
            location: self.location.clone(),
            _phantom: PhantomData,
        }
    }
}

impl<T: ArtifactType> Artifact<T> {
    /// Artifact backed by content at `location`
    #[inline]
    #[must_use]
    pub fn new(location: impl Into<PathBuf>) -> Self {
        Self::from_location(Some(location.into()))
    }

    /// Artifact for a run that produced no content
    #[inline]
    #[must_use]
    pub fn absent() -> Self {
        Self::from_location(None)
    }

    /// Artifact from an optional location
    #[inline]
    #[must_use]
    pub fn from_location(location: Option<PathBuf>) -> Self {
        Self {
            location,
            _phantom: PhantomData,
        }
    }

    /// Backing location, if any
    #[inline]
    #[must_use]
    pub fn location(&self) -> Option<&Path> {
        self.location.as_deref()
    }

    /// Whether the producing run left no content
    #[inline]
    #[must_use]
    pub fn is_absent(&self) -> bool {
        self.location.is_none()
    }

    /// Same artifact redirected to `location`
    #[inline]
    #[must_use]
    pub fn with_location(mut self, location: Option<PathBuf>) -> Self {
        self.location = location;
        self
    }

    /// Kind tag
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ArtifactKind {
        T::KIND
    }

    /// Check that a present location has the shape its kind requires
    ///
    /// Absent artifacts are always valid.
    ///
    /// # Errors
    /// Returns `ShapeMismatch` for a wrong shape, `Io` if the location
    /// cannot be inspected
    pub fn validate(&self) -> Result<(), ArtifactError> {
        let Some(path) = self.location() else {
            return Ok(());
        };
        let meta = std::fs::metadata(path).map_err(|e| ArtifactError::io(path, e))?;
        let ok = match T::KIND.shape() {
            Shape::File => meta.is_file(),
            Shape::Directory => meta.is_dir(),
        };
        if ok {
            Ok(())
        } else {
            Err(ArtifactError::ShapeMismatch {
                path: path.to_path_buf(),
                kind: T::KIND,
                expected: T::KIND.shape(),
            })
        }
    }

    /// Equality under this kind's semantics
    ///
    /// # Errors
    /// Returns error if backing content cannot be read
    pub fn equals(&self, other: &Self) -> Result<bool, ArtifactError> {
        T::locations_equal(self.location(), other.location())
    }

    /// Type-erased view
    #[inline]
    #[must_use]
    pub fn into_dyn(self) -> DynArtifact {
        DynArtifact {
            kind: T::KIND,
            location: self.location,
        }
    }
}

impl Artifact<TestGoal> {
    /// Blake3 fingerprint of the goal file; `None` when absent
    ///
    /// # Errors
    /// Returns `Io` if the file cannot be read
    pub fn fingerprint(&self) -> Result<Option<ContentHash>, ArtifactError> {
        self.location()
            .map(|path| ContentHash::compute_file(path).map_err(|e| ArtifactError::io(path, e)))
            .transpose()
    }
}

/// Artifact of a kind known only at runtime
///
/// Used at the orchestration boundary where results of different steps
/// travel through the same channel.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DynArtifact {
    pub kind: ArtifactKind,
    pub location: Option<PathBuf>,
}

impl DynArtifact {
    /// Create from parts
    #[inline]
    #[must_use]
    pub fn new(kind: ArtifactKind, location: Option<PathBuf>) -> Self {
        Self { kind, location }
    }

    /// Artifact of `kind` with no content
    #[inline]
    #[must_use]
    pub fn absent(kind: ArtifactKind) -> Self {
        Self::new(kind, None)
    }

    /// Artifact of `kind` backed by `location`
    #[inline]
    #[must_use]
    pub fn present(kind: ArtifactKind, location: impl Into<PathBuf>) -> Self {
        Self::new(kind, Some(location.into()))
    }

    /// Recover the typed artifact
    ///
    /// # Errors
    /// Returns `KindMismatch` if `self.kind` is not `T::KIND`
    pub fn downcast<T: ArtifactType>(self) -> Result<Artifact<T>, ArtifactError> {
        if self.kind != T::KIND {
            return Err(ArtifactError::KindMismatch {
                expected: T::KIND,
                actual: self.kind,
            });
        }
        Ok(Artifact::from_location(self.location))
    }

    /// Equality under the kind's semantics; artifacts of different kinds
    /// are never equal
    ///
    /// # Errors
    /// Returns error if backing content cannot be read
    pub fn equals(&self, other: &Self) -> Result<bool, ArtifactError> {
        if self.kind != other.kind {
            return Ok(false);
        }
        let (l, r) = (self.location.as_deref(), other.location.as_deref());
        match self.kind {
            ArtifactKind::TestGoal => TestGoal::locations_equal(l, r),
            ArtifactKind::TestSuite => TestSuite::locations_equal(l, r),
        }
    }
}

impl<T: ArtifactType> From<Artifact<T>> for DynArtifact {
    fn from(artifact: Artifact<T>) -> Self {
        artifact.into_dyn()
    }
}

impl<T: ArtifactType> TryFrom<DynArtifact> for Artifact<T> {
    type Error = ArtifactError;

    fn try_from(value: DynArtifact) -> Result<Self, Self::Error> {
        value.downcast()
    }
}
