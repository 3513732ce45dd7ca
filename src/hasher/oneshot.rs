//! One-shot helpers over [`Hasher`].

use bytes::Bytes;

use super::engine::Hasher;
use super::sequential::compute_sequential;
use crate::config::HasherConfig;
use crate::error::HashError;
use crate::id::ContentId;

/// Computes the content identifier of `data`.
///
/// Pages are hashed on one worker per available core. If the workers cannot
/// be started the identifier is computed on the calling thread instead; the
/// result is the same either way.
///
/// # Example
///
/// ```
/// let id = vsohash::compute(&[0u8]);
/// assert_eq!(
///     id.to_hex(),
///     "3da32150b5e69b54e7ad1765d9573bc5e6e05d3b6529556c1b4a436a76a511f400"
/// );
/// ```
pub fn compute(data: &[u8]) -> ContentId {
    match try_compute(data) {
        Ok(id) => id,
        Err(e) => {
            log::warn!("parallel hashing unavailable ({e}), hashing sequentially");
            compute_sequential(data)
        }
    }
}

/// Computes the content identifier of `data` with the default parallelism.
pub fn try_compute(data: &[u8]) -> Result<ContentId, HashError> {
    compute_with(data, &HasherConfig::default())
}

/// Computes the content identifier of `data` with an explicit configuration.
pub fn compute_with(data: &[u8], config: &HasherConfig) -> Result<ContentId, HashError> {
    let mut hasher = Hasher::with_config(*config)?;
    hasher.update(data)?;
    hasher.finalize()
}

/// Computes the content identifier of an owned buffer, slicing pages out of
/// it without copying.
pub fn compute_bytes(data: Bytes, config: &HasherConfig) -> Result<ContentId, HashError> {
    let mut hasher = Hasher::with_config(*config)?;
    hasher.update_bytes(data)?;
    hasher.finalize()
}
