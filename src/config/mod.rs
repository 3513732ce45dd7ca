//! Configuration and format constants for content identifier computation.
//!
//! - [`HasherConfig`] - Worker pool parallelism
//! - Page, block and chain constants fixed by the paged hash format
//!
//! # Example
//!
//! ```
//! use vsohash::HasherConfig;
//!
//! // Fixed parallelism
//! let config = HasherConfig::new(4)?;
//! assert_eq!(config.parallelism(), 4);
//!
//! // One worker per available core
//! let config = HasherConfig::default();
//! assert!(config.parallelism() >= 1);
//! # Ok::<(), vsohash::HashError>(())
//! ```

use std::num::NonZeroUsize;

use crate::error::HashError;

/// Size of a page, the unit of parallel hashing (64 KiB).
pub const PAGE_SIZE: usize = 64 * 1024;

/// Size of a block (2 MiB).
pub const BLOCK_SIZE: usize = 2 * 1024 * 1024;

/// Number of pages whose digests are combined into one block digest.
pub const PAGES_PER_BLOCK: usize = BLOCK_SIZE / PAGE_SIZE;

/// Size of the underlying SHA-256 digest in bytes.
pub const DIGEST_SIZE: usize = 32;

/// Seed written ahead of the first block digest in the chain.
pub const SEED: &[u8] = b"VSO Content Identifier Seed";

/// Chain marker for a round that was not the last block.
pub(crate) const ROUND_MORE: u8 = 0x00;

/// Chain marker for the final round.
pub(crate) const ROUND_LAST: u8 = 0x01;

/// Size of a content identifier: the final digest plus the tag byte.
pub const ID_SIZE: usize = DIGEST_SIZE + 1;

/// Trailing format tag of every content identifier.
pub const ID_TAG: u8 = 0x00;

/// Configuration for a [`Hasher`](crate::Hasher).
///
/// The only tunable is the number of worker threads hashing pages. The
/// identifier never depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HasherConfig {
    parallelism: usize,
}

impl HasherConfig {
    /// Creates a new configuration with the given number of workers.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::InvalidConfig`] if `parallelism` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use vsohash::HasherConfig;
    ///
    /// assert!(HasherConfig::new(0).is_err());
    /// assert_eq!(HasherConfig::new(2)?.parallelism(), 2);
    /// # Ok::<(), vsohash::HashError>(())
    /// ```
    pub fn new(parallelism: usize) -> Result<Self, HashError> {
        if parallelism == 0 {
            return Err(HashError::InvalidConfig {
                message: "parallelism must be at least 1",
            });
        }
        Ok(Self { parallelism })
    }

    /// Sets the number of workers.
    ///
    /// Note: This does not validate the configuration. Use [`HasherConfig::validate`]
    /// to check if the configuration is valid.
    pub fn with_parallelism(mut self, parallelism: usize) -> Self {
        self.parallelism = parallelism;
        self
    }

    /// Returns the number of workers.
    pub fn parallelism(&self) -> usize {
        self.parallelism
    }

    /// Validates the current configuration.
    pub fn validate(&self) -> Result<(), HashError> {
        Self::new(self.parallelism).map(|_| ())
    }
}

impl Default for HasherConfig {
    /// One worker per unit of available hardware parallelism.
    fn default() -> Self {
        let parallelism = std::thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1);
        Self { parallelism }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(PAGES_PER_BLOCK, 32);
        assert_eq!(BLOCK_SIZE, 2_097_152);
        assert_eq!(PAGE_SIZE, 65_536);
        assert_eq!(SEED.len(), 27);
        assert_ne!(ID_TAG, ROUND_LAST);
    }

    #[test]
    fn test_default_config() {
        let config = HasherConfig::default();
        assert!(config.parallelism() >= 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_config_zero_parallelism() {
        let err = HasherConfig::new(0).unwrap_err();
        assert!(matches!(err, HashError::InvalidConfig { .. }));
    }

    #[test]
    fn test_builder_pattern() {
        let config = HasherConfig::default().with_parallelism(3);
        assert_eq!(config.parallelism(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validate() {
        let config = HasherConfig::default().with_parallelism(0);
        assert!(config.validate().is_err());
    }
}
