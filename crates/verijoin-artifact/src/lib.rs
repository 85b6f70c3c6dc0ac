//! verijoin Artifact System
//!
//! Typed, optionally file-backed evidence produced by verification runs.
//!
//! # Core Concepts
//!
//! - [`ArtifactKind`]: Closed tag set (`test-goal`, `test-suite`)
//! - [`Artifact<T>`]: Statically typed artifact with an optional location
//! - [`DynArtifact`]: Type-erased artifact for orchestration boundaries
//! - [`ContentHash`]: 32-byte Blake3 fingerprint of file content
//!
//! # Example
//!
//! ```rust,ignore
//! use verijoin_artifact::{Artifact, TestGoal};
//!
//! let left = Artifact::<TestGoal>::new("run-1/goal.prp");
//! let right = Artifact::<TestGoal>::absent();
//! assert!(!left.equals(&right)?);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod artifact;
pub mod compare;
mod hash;
mod kind;

#[doc(hidden)]
pub mod __private {
    pub use super::artifact::private::Sealed;
}
pub use artifact::{Artifact, ArtifactError, ArtifactType, DynArtifact, TestGoal, TestSuite};
pub use hash::{ContentHash, HashError};
pub use kind::{ArtifactKind, Shape};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
