//! Rolling chain that folds block digests into the final identifier.
//!
//! The first block is written after the seed. Every later block first
//! collapses the chain to `sha256(chain || 0x00)`, then appends itself.
//! Finalization hashes `chain || 0x01`.

use crate::config::{DIGEST_SIZE, ROUND_LAST, ROUND_MORE, SEED};
use crate::hash::{self, Sha256Hasher};
use crate::id::{ContentId, Sha256Hash};

#[derive(Debug)]
pub(crate) struct ChainAccumulator {
    acc: Vec<u8>,
    blocks: u64,
    last_block: Option<Sha256Hash>,
}

impl ChainAccumulator {
    pub(crate) fn new() -> Self {
        Self {
            acc: Vec::with_capacity(SEED.len() + DIGEST_SIZE + 1),
            blocks: 0,
            last_block: None,
        }
    }

    /// Folds the next block digest into the chain.
    pub(crate) fn fold(&mut self, block: Sha256Hash) {
        if self.acc.is_empty() {
            self.acc.extend_from_slice(SEED);
        } else {
            // That was not the last block.
            self.acc.push(ROUND_MORE);
            let round = hash::digest(&self.acc);
            self.acc.clear();
            self.acc.extend_from_slice(round.as_bytes());
        }
        self.acc.extend_from_slice(block.as_bytes());

        log::trace!("folded block {} into chain", self.blocks);
        self.blocks += 1;
        self.last_block = Some(block);
    }

    /// Returns true until the first block has been folded.
    pub(crate) fn is_empty(&self) -> bool {
        self.acc.is_empty()
    }

    /// Number of blocks folded so far.
    pub(crate) fn blocks(&self) -> u64 {
        self.blocks
    }

    /// Digest of the most recently folded block.
    pub(crate) fn last_block(&self) -> Option<Sha256Hash> {
        self.last_block
    }

    /// Closes the chain with the final round marker.
    ///
    /// The chain itself is left untouched; callers fold at least one block
    /// before finishing.
    pub(crate) fn finish(&self) -> ContentId {
        let mut hasher = Sha256Hasher::new();
        hasher.update(&self.acc);
        hasher.update(&[ROUND_LAST]);
        ContentId::from_digest(hasher.finalize())
    }
}
