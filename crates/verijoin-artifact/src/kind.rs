//! Artifact kinds
//!
//! A closed tag set identifying which join semantics apply to an artifact.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::artifact::ArtifactError;

/// Kind tag of a verification artifact
///
/// The tag is the only thing a join looks at to decide how two results are
/// combined. It serializes as its kebab-case tag (`"test-goal"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactKind {
    /// Single file describing a coverage or test goal
    TestGoal,

    /// Directory holding an arbitrary set of test cases
    TestSuite,
}

/// On-disk shape backing an artifact of a given kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// A regular file
    File,

    /// A directory tree
    Directory,
}

impl ArtifactKind {
    /// All known kinds
    pub const ALL: [Self; 2] = [Self::TestGoal, Self::TestSuite];

    /// Stable tag used in reports and serialized artifacts
    #[inline]
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::TestGoal => "test-goal",
            Self::TestSuite => "test-suite",
        }
    }

    /// Shape of the content backing this kind
    #[inline]
    #[must_use]
    pub const fn shape(self) -> Shape {
        match self {
            Self::TestGoal => Shape::File,
            Self::TestSuite => Shape::Directory,
        }
    }
}

impl Display for ArtifactKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ArtifactKind {
    type Err = ArtifactError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.tag() == s)
            .ok_or_else(|| ArtifactError::UnknownKind(s.to_string()))
    }
}
