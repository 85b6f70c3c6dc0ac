//! Merge configuration and context
//!
//! [`MergeContext`] carries every dependency a join needs so strategies stay
//! stateless.

use crate::error::MergeError;
use crate::id::{UniqueIdGenerator, UuidGenerator};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use verijoin_artifact::compare::DEFAULT_CHUNK_SIZE;

/// Tunables for joining artifacts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Bytes read from each side per step of a content comparison
    pub compare_chunk_size: usize,
    /// Keep the left input's file extension on concatenated test goals
    pub keep_extension: bool,
    /// Recreate symlinks instead of copying their targets when nesting suites
    pub preserve_symlinks: bool,
}

impl MergeConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With comparison chunk size
    #[inline]
    #[must_use]
    pub fn with_compare_chunk_size(mut self, size: usize) -> Self {
        self.compare_chunk_size = size;
        self
    }

    /// With extension handling for concatenated goals
    #[inline]
    #[must_use]
    pub fn with_keep_extension(mut self, keep: bool) -> Self {
        self.keep_extension = keep;
        self
    }

    /// With symlink handling for nested suites
    #[inline]
    #[must_use]
    pub fn with_preserve_symlinks(mut self, preserve: bool) -> Self {
        self.preserve_symlinks = preserve;
        self
    }

    /// Parse and validate a TOML document; missing keys take defaults
    ///
    /// # Errors
    /// Returns `Config` if the document is malformed or fails validation
    pub fn from_toml_str(s: &str) -> Result<Self, MergeError> {
        let config: Self = toml::from_str(s).map_err(|e| MergeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    ///
    /// # Errors
    /// Returns `Config` describing the first invalid value
    pub fn validate(&self) -> Result<(), MergeError> {
        if self.compare_chunk_size == 0 {
            return Err(MergeError::Config(
                "compare_chunk_size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            compare_chunk_size: DEFAULT_CHUNK_SIZE,
            keep_extension: true,
            preserve_symlinks: false,
        }
    }
}

/// Dependencies shared by all joins
#[derive(Debug, Clone)]
pub struct MergeContext {
    config: MergeConfig,
    ids: Arc<dyn UniqueIdGenerator>,
}

impl MergeContext {
    /// Context with the given configuration and UUID-based ids
    #[must_use]
    pub fn new(config: MergeConfig) -> Self {
        Self::with_ids(config, Arc::new(UuidGenerator))
    }

    /// Context with an explicit id generator
    #[must_use]
    pub fn with_ids(config: MergeConfig, ids: Arc<dyn UniqueIdGenerator>) -> Self {
        Self { config, ids }
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    /// Fresh collision-resistant token for a new path component
    #[inline]
    #[must_use]
    pub fn next_id(&self) -> String {
        self.ids.next_id()
    }
}

impl Default for MergeContext {
    fn default() -> Self {
        Self::new(MergeConfig::default())
    }
}
