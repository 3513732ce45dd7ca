//! The ContentId type - the 33-byte paged hash identifier.

use std::fmt;
use std::str::FromStr;

use super::Sha256Hash;
use crate::config::{DIGEST_SIZE, ID_SIZE, ID_TAG};
use crate::error::HashError;

/// A content identifier: the final chain digest followed by the format tag.
///
/// # Example
///
/// ```
/// use vsohash::ContentId;
///
/// let id = vsohash::compute(b"");
/// assert_eq!(
///     id.to_string(),
///     "1e57cf2792a900d06c1cdfb3c453f35bc86f72788aa9724c96c929d1cc6b456a00"
/// );
///
/// let parsed: ContentId = id.to_string().parse()?;
/// assert_eq!(parsed, id);
/// # Ok::<(), vsohash::HashError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContentId([u8; ID_SIZE]);

impl ContentId {
    /// The size of the identifier in bytes.
    pub const SIZE: usize = ID_SIZE;

    /// Builds the identifier from the final chain digest.
    pub(crate) fn from_digest(digest: Sha256Hash) -> Self {
        let mut bytes = [ID_TAG; ID_SIZE];
        bytes[..DIGEST_SIZE].copy_from_slice(digest.as_bytes());
        Self(bytes)
    }

    /// Computes the identifier on the calling thread, without a worker pool.
    ///
    /// This walks the same block and chain construction as [`Hasher`](crate::Hasher)
    /// with every page digested inline.
    pub fn sequential(data: &[u8]) -> Self {
        crate::hasher::compute_sequential(data)
    }

    /// Creates an identifier from a slice.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::InvalidContentId`] if the slice is not 33 bytes or
    /// does not end with the format tag.
    pub fn from_slice(slice: &[u8]) -> Result<Self, HashError> {
        let bytes: [u8; ID_SIZE] = slice.try_into().map_err(|_| HashError::InvalidContentId {
            message: "content id must be 33 bytes",
        })?;
        if bytes[DIGEST_SIZE] != ID_TAG {
            return Err(HashError::InvalidContentId {
                message: "unknown content id tag",
            });
        }
        Ok(Self(bytes))
    }

    /// Returns the identifier as a byte array.
    pub fn as_bytes(&self) -> &[u8; ID_SIZE] {
        &self.0
    }

    /// Returns the 32-byte digest part, without the tag.
    pub fn digest(&self) -> Sha256Hash {
        let mut bytes = [0u8; DIGEST_SIZE];
        bytes.copy_from_slice(&self.0[..DIGEST_SIZE]);
        Sha256Hash::new(bytes)
    }

    /// Returns the trailing format tag.
    pub fn tag(&self) -> u8 {
        self.0[DIGEST_SIZE]
    }

    /// Returns the identifier as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parses an identifier from a 66-character hex string.
    pub fn from_hex(hex_str: &str) -> Result<Self, HashError> {
        let bytes = hex::decode(hex_str).map_err(|_| HashError::InvalidContentId {
            message: "content id is not valid hex",
        })?;
        Self::from_slice(&bytes)
    }
}

impl AsRef<[u8]> for ContentId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<ContentId> for [u8; ID_SIZE] {
    fn from(id: ContentId) -> Self {
        id.0
    }
}

impl FromStr for ContentId {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
