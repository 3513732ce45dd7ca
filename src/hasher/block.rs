//! Ordered reassembly of page digests into block digests.

use crate::config::PAGES_PER_BLOCK;
use crate::error::HashError;
use crate::hash::Sha256Hasher;
use crate::id::Sha256Hash;
use crate::pool::PageHandle;

/// Digest of a block: SHA-256 over its page digests, in order.
///
/// A block without pages digests the empty string.
pub(crate) fn block_digest<I>(pages: I) -> Sha256Hash
where
    I: IntoIterator<Item = Sha256Hash>,
{
    let mut hasher = Sha256Hasher::new();
    for page in pages {
        hasher.update(page.as_bytes());
    }
    hasher.finalize()
}

/// Collects page handles for the current block in submission order.
///
/// Handles are only ever resolved front to back, so a page that finishes
/// early still waits for its predecessors.
#[derive(Debug)]
pub(crate) struct BlockAggregator {
    pending: Vec<PageHandle>,
}

impl BlockAggregator {
    pub(crate) fn new() -> Self {
        Self {
            pending: Vec::with_capacity(PAGES_PER_BLOCK),
        }
    }

    /// Appends the next page of the block.
    ///
    /// Returns the block digest when this page completes the block.
    pub(crate) fn push(&mut self, page: PageHandle) -> Result<Option<Sha256Hash>, HashError> {
        self.pending.push(page);
        if self.pending.len() < PAGES_PER_BLOCK {
            return Ok(None);
        }
        self.finish_block().map(Some)
    }

    /// Whether any pages are waiting for the current block.
    pub(crate) fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Waits for every pending page, in order, and digests the block.
    pub(crate) fn finish_block(&mut self) -> Result<Sha256Hash, HashError> {
        let pages = self
            .pending
            .drain(..)
            .map(PageHandle::wait)
            .collect::<Result<Vec<_>, _>>()?;
        log::trace!("finished block of {} pages", pages.len());
        Ok(block_digest(pages))
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;
    use crate::hash;
    use crate::pool::WorkerPool;

    #[test]
    fn test_empty_block_is_digest_of_empty() {
        let mut blocks = BlockAggregator::new();
        assert!(!blocks.has_pending());
        assert_eq!(blocks.finish_block().unwrap(), hash::digest(b""));
        assert_eq!(block_digest(Vec::new()), hash::digest(b""));
    }

    #[test]
    fn test_block_digest_concatenates_pages() {
        let a = hash::digest(b"a");
        let b = hash::digest(b"b");
        let mut concat = Vec::new();
        concat.extend_from_slice(a.as_bytes());
        concat.extend_from_slice(b.as_bytes());
        assert_eq!(block_digest([a, b]), hash::digest(&concat));
    }

    #[test]
    fn test_full_block_finishes_on_push() {
        let pool = WorkerPool::new(4).unwrap();
        let mut blocks = BlockAggregator::new();
        let mut expected = Vec::new();

        for i in 0..PAGES_PER_BLOCK {
            let page = Bytes::from(vec![i as u8; 1024 * (i % 5 + 1)]);
            expected.push(hash::digest(&page));
            let done = blocks.push(pool.submit(page).unwrap()).unwrap();
            if i + 1 < PAGES_PER_BLOCK {
                assert!(done.is_none());
                assert!(blocks.has_pending());
            } else {
                assert_eq!(done, Some(block_digest(expected.clone())));
            }
        }
        assert!(!blocks.has_pending());
    }

    #[test]
    fn test_worker_failure_fails_block() {
        let mut pool = WorkerPool::new(1).unwrap();
        let mut blocks = BlockAggregator::new();
        blocks.push(pool.submit(Bytes::from_static(b"ok")).unwrap()).unwrap();

        // A handle whose producer is gone
        let (tx, rx) = flume::bounded(1);
        drop(tx);
        blocks.push(PageHandle::from_receiver(rx)).unwrap();

        assert!(matches!(blocks.finish_block(), Err(HashError::WorkerFailed)));
        assert!(!blocks.has_pending());
        pool.shutdown();
    }
}
