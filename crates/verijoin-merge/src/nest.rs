//! Test suite join
//!
//! The right-hand tree is copied into a freshly named subdirectory of the
//! left-hand directory; the left-hand files stay where they are.

use crate::config::MergeContext;
use crate::error::MergeError;
use crate::strategy::{JoinOutcome, JoinStrategy, Joined};
use crate::tree::{copy_tree, CopyOptions};
use std::fs;
use std::path::Path;
use verijoin_artifact::{Artifact, TestSuite};

/// Nesting join for test suites
#[derive(Debug, Clone, Copy, Default)]
pub struct NestJoin;

impl NestJoin {
    /// Create new nesting join
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl JoinStrategy for NestJoin {
    type Target = TestSuite;

    fn join(
        &self,
        left: Artifact<TestSuite>,
        right: Artifact<TestSuite>,
        ctx: &MergeContext,
    ) -> Result<Joined<TestSuite>, MergeError> {
        let Some(left_dir) = left.location().map(Path::to_path_buf) else {
            let outcome = if right.is_absent() {
                JoinOutcome::BothAbsent
            } else {
                JoinOutcome::TookRight
            };
            let adopted = left.with_location(right.location().map(Path::to_path_buf));
            return Ok(Joined::new(adopted, outcome));
        };
        let Some(right_dir) = right.location().map(Path::to_path_buf) else {
            return Ok(Joined::new(left, JoinOutcome::TookLeft));
        };

        left.validate()?;
        right.validate()?;

        let subdirectory = left_dir.join(ctx.next_id());
        fs::create_dir(&subdirectory).map_err(|e| MergeError::io(&subdirectory, e))?;

        let opts = CopyOptions {
            preserve_symlinks: ctx.config().preserve_symlinks,
            skip: Some(
                fs::canonicalize(&subdirectory).map_err(|e| MergeError::io(&subdirectory, e))?,
            ),
        };
        let files_copied = copy_tree(&right_dir, &subdirectory, &opts)?;
        tracing::debug!(
            left = %left_dir.display(),
            right = %right_dir.display(),
            subdirectory = %subdirectory.display(),
            files_copied,
            "nested test suite"
        );

        Ok(Joined::new(
            left,
            JoinOutcome::Nested {
                subdirectory,
                files_copied,
            },
        ))
    }

    fn name(&self) -> &'static str {
        "Nest"
    }
}
