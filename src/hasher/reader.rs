//! Hashing from a [`std::io::Read`] source.

use std::io::{ErrorKind, Read};

use super::engine::Hasher;
use crate::buffer::Buffer;
use crate::config::HasherConfig;
use crate::error::HashError;
use crate::id::ContentId;

/// Reads `reader` to the end and returns its content identifier.
///
/// Interrupted reads are retried; any other I/O error is returned as
/// [`HashError::Io`].
///
/// # Example
///
/// ```
/// use std::io::Cursor;
/// use vsohash::{HasherConfig, hash_reader};
///
/// let id = hash_reader(Cursor::new(b"hello world"), &HasherConfig::new(2)?)?;
/// assert_eq!(id, vsohash::compute(b"hello world"));
/// # Ok::<(), vsohash::HashError>(())
/// ```
pub fn hash_reader<R: Read>(mut reader: R, config: &HasherConfig) -> Result<ContentId, HashError> {
    let mut hasher = Hasher::with_config(*config)?;
    let mut buffer = Buffer::take();

    loop {
        let n = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        hasher.update(&buffer[..n])?;
    }

    hasher.finalize()
}
