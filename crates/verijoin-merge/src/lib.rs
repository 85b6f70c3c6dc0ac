//! verijoin Merge System
//!
//! Deterministic joining of two partial results produced by independent runs
//! of the same verification step.
//!
//! # Core Concepts
//!
//! - [`ArtifactMerger`]: Kind-checked entry point (`merge`, `merge_all`, `equals`)
//! - [`JoinStrategy`]: Core trait, one implementation per artifact kind
//! - [`ConcatenateJoin`]: Test goals (content short circuit, else concatenation)
//! - [`NestJoin`]: Test suites (right tree nested under left)
//! - [`MergeContext`]: Configuration plus unique-id generator
//!
//! # Example
//!
//! ```rust,ignore
//! use verijoin_artifact::{ArtifactKind, DynArtifact};
//! use verijoin_merge::ArtifactMerger;
//!
//! let merger = ArtifactMerger::default();
//! let merged = merger.merge(
//!     ArtifactKind::TestGoal,
//!     DynArtifact::present(ArtifactKind::TestGoal, "run-1/goal.prp"),
//!     DynArtifact::present(ArtifactKind::TestGoal, "run-2/goal.prp"),
//! )?;
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod concatenate;
mod config;
mod error;
mod id;
mod merger;
mod nest;
mod strategy;
mod tree;

pub use concatenate::ConcatenateJoin;
pub use config::{MergeConfig, MergeContext};
pub use error::MergeError;
pub use id::{UniqueIdGenerator, UuidGenerator};
pub use merger::ArtifactMerger;
pub use nest::NestJoin;
pub use strategy::{DynJoined, JoinOutcome, JoinStrategy, Joined};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
