//! Single-threaded rendition of the paged construction.

use super::block::block_digest;
use super::chain::ChainAccumulator;
use crate::config::{BLOCK_SIZE, PAGE_SIZE};
use crate::hash;
use crate::id::ContentId;

/// Computes the identifier with every page digested on the calling thread.
pub(crate) fn compute_sequential(data: &[u8]) -> ContentId {
    let mut chain = ChainAccumulator::new();
    for block in data.chunks(BLOCK_SIZE) {
        chain.fold(block_digest(block.chunks(PAGE_SIZE).map(hash::digest)));
    }
    if chain.is_empty() {
        chain.fold(block_digest(None));
    }
    chain.finish()
}
