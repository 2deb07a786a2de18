//! Limits and constraints for schema table construction
//!
//! Schema tables can be extended from user configuration (vendor link
//! types, synthetic tables in tests). These limits bound the work the
//! builder accepts before a table is published.

use crate::error::{Error, Result};
use serde::Deserialize;

/// Global limits configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Maximum length of an element family `extends` chain
    pub max_family_depth: usize,

    /// Maximum number of entries in a single token vocabulary
    pub max_vocabulary_size: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_family_depth: 16,
            max_vocabulary_size: 1024,
        }
    }
}

impl Limits {
    /// Create a new Limits with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create strict limits (more restrictive)
    pub fn strict() -> Self {
        Self {
            max_family_depth: 4,
            max_vocabulary_size: 128,
        }
    }

    /// Create permissive limits (less restrictive, use with caution)
    pub fn permissive() -> Self {
        Self {
            max_family_depth: 256,
            max_vocabulary_size: 65536,
        }
    }

    /// Check if a family chain depth is within limits
    pub fn check_family_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_family_depth {
            Err(Error::LimitExceeded(format!(
                "family chain depth {} exceeds maximum {}",
                depth, self.max_family_depth
            )))
        } else {
            Ok(())
        }
    }

    /// Check if a vocabulary size is within limits
    pub fn check_vocabulary_size(&self, size: usize) -> Result<()> {
        if size > self.max_vocabulary_size {
            Err(Error::LimitExceeded(format!(
                "vocabulary size {} exceeds maximum {}",
                size, self.max_vocabulary_size
            )))
        } else {
            Ok(())
        }
    }
}
