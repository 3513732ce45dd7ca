//! SHA-256 via the `sha2` crate.

use sha2::{Digest, Sha256};

use crate::id::Sha256Hash;

/// An incremental SHA-256 hasher.
#[derive(Debug, Clone, Default)]
pub(crate) struct Sha256Hasher {
    state: Sha256,
}

impl Sha256Hasher {
    /// Creates a new hasher.
    pub(crate) fn new() -> Self {
        Self {
            state: Sha256::new(),
        }
    }

    /// Updates the hasher with more data.
    pub(crate) fn update(&mut self, data: &[u8]) {
        self.state.update(data);
    }

    /// Finalizes and returns the digest.
    pub(crate) fn finalize(self) -> Sha256Hash {
        Sha256Hash::new(self.state.finalize().into())
    }
}

/// Digests `data` in one shot.
pub(crate) fn digest(data: &[u8]) -> Sha256Hash {
    Sha256Hash::new(Sha256::digest(data).into())
}
