//! Streaming hasher - pages in, content identifier out.
//!
//! [`Hasher`] owns a worker pool and drives the page, block and chain state
//! on the calling thread. Only page digests run on the workers, and they are
//! folded back strictly in input order.
//!
//! # Example
//!
//! ```
//! use vsohash::Hasher;
//!
//! let mut hasher = Hasher::new(4)?;
//! hasher.update(b"hello ")?;
//! hasher.update(b"world")?;
//! let id = hasher.finish()?;
//!
//! assert_eq!(id, vsohash::compute(b"hello world"));
//! # Ok::<(), vsohash::HashError>(())
//! ```

use std::io;

use bytes::{Buf, Bytes};

use super::block::BlockAggregator;
use super::chain::ChainAccumulator;
use super::page::PageAccumulator;
use crate::config::HasherConfig;
use crate::error::HashError;
use crate::id::{ContentId, Sha256Hash};
use crate::pool::WorkerPool;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Writable,
    Finalized,
    /// A page digest was lost; nothing this hasher computes can be trusted.
    Poisoned,
}

/// An incremental paged hasher with parallel page digests.
///
/// # Lifecycle
///
/// A hasher accepts [`update`](Hasher::update) calls until
/// [`finish`](Hasher::finish) succeeds. After that every call fails with
/// [`HashError::Finalized`]; `finish` is single-use. Use
/// [`finalize`](Hasher::finalize) to consume the hasher instead.
///
/// # Determinism
///
/// The identifier depends only on the bytes written, never on:
/// - how the input is split across `update` calls
/// - the configured parallelism
/// - the order in which workers finish their pages
///
/// # Resources
///
/// The worker threads are started by the constructor and joined when the
/// hasher finishes, is shut down, or is dropped.
#[derive(Debug)]
pub struct Hasher {
    pages: PageAccumulator,
    blocks: BlockAggregator,
    chain: ChainAccumulator,
    pool: WorkerPool,
    parallelism: usize,
    written: u64,
    state: State,
}

impl Hasher {
    /// Creates a hasher with `parallelism` page workers.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::InvalidConfig`] if `parallelism` is zero.
    pub fn new(parallelism: usize) -> Result<Self, HashError> {
        Self::with_config(HasherConfig::new(parallelism)?)
    }

    /// Creates a hasher with one worker per unit of available parallelism.
    pub fn with_default_parallelism() -> Result<Self, HashError> {
        Self::with_config(HasherConfig::default())
    }

    /// Creates a hasher from a configuration.
    pub fn with_config(config: HasherConfig) -> Result<Self, HashError> {
        config.validate()?;
        let pool = WorkerPool::new(config.parallelism())?;
        Ok(Self {
            pages: PageAccumulator::new(),
            blocks: BlockAggregator::new(),
            chain: ChainAccumulator::new(),
            parallelism: pool.parallelism(),
            pool,
            written: 0,
            state: State::Writable,
        })
    }

    /// Feeds bytes into the hasher and returns how many were consumed.
    ///
    /// Every completed page is handed to the workers; this blocks while the
    /// worker queue is full, and while a completed block waits for its pages.
    pub fn update(&mut self, data: &[u8]) -> Result<usize, HashError> {
        self.ingest(data)
    }

    /// Like [`update`](Hasher::update), but full pages are sliced out of
    /// `data` without copying.
    pub fn update_bytes(&mut self, data: Bytes) -> Result<usize, HashError> {
        self.ingest(data)
    }

    fn ingest<B: Buf>(&mut self, data: B) -> Result<usize, HashError> {
        self.ensure_writable("update")?;
        let len = data.remaining();

        let Self {
            pages,
            blocks,
            chain,
            pool,
            ..
        } = self;
        let result = pages.push(data, |page| {
            if let Some(block) = blocks.push(pool.submit(page)?)? {
                chain.fold(block);
            }
            Ok(())
        });
        self.observe(result)?;

        self.written += len as u64;
        Ok(len)
    }

    /// Completes the identifier.
    ///
    /// Flushes the trailing partial page, closes the last block (an empty
    /// input still yields one empty block) and releases the worker pool.
    ///
    /// # Errors
    ///
    /// - [`HashError::Finalized`] if called a second time
    /// - [`HashError::WorkerFailed`] if a page digest was lost
    pub fn finish(&mut self) -> Result<ContentId, HashError> {
        self.ensure_writable("finish")?;
        let result = self.close_chain();
        let id = self.observe(result)?;

        self.state = State::Finalized;
        self.pool.shutdown();
        Ok(id)
    }

    /// Consumes the hasher and returns the identifier.
    pub fn finalize(mut self) -> Result<ContentId, HashError> {
        self.finish()
    }

    fn close_chain(&mut self) -> Result<ContentId, HashError> {
        if let Some(page) = self.pages.take_partial() {
            if let Some(block) = self.blocks.push(self.pool.submit(page)?)? {
                self.chain.fold(block);
            }
        }
        if self.blocks.has_pending() || self.chain.is_empty() {
            let block = self.blocks.finish_block()?;
            self.chain.fold(block);
        }
        log::debug!(
            "closing chain after {} bytes in {} blocks",
            self.written,
            self.chain.blocks()
        );
        Ok(self.chain.finish())
    }

    /// Stops the worker pool without producing an identifier.
    ///
    /// The hasher counts as finalized afterwards. Dropping the hasher does
    /// the same.
    pub fn shutdown(&mut self) {
        if self.state == State::Writable {
            self.state = State::Finalized;
        }
        self.pool.shutdown();
    }

    /// Returns true once [`finish`](Hasher::finish) or
    /// [`shutdown`](Hasher::shutdown) has been called.
    pub fn is_finalized(&self) -> bool {
        self.state == State::Finalized
    }

    /// Total number of bytes accepted so far.
    pub fn bytes_written(&self) -> u64 {
        self.written
    }

    /// Number of page workers.
    pub fn parallelism(&self) -> usize {
        self.parallelism
    }

    /// Digest of the most recently completed block, if any.
    ///
    /// After [`finish`](Hasher::finish) this is the digest of the final block.
    pub fn last_block(&self) -> Option<Sha256Hash> {
        self.chain.last_block()
    }

    fn ensure_writable(&self, operation: &'static str) -> Result<(), HashError> {
        match self.state {
            State::Writable => Ok(()),
            State::Finalized => Err(HashError::Finalized { operation }),
            State::Poisoned => Err(HashError::WorkerFailed),
        }
    }

    fn observe<T>(&mut self, result: Result<T, HashError>) -> Result<T, HashError> {
        if let Err(HashError::WorkerFailed) = result {
            log::warn!("poisoning hasher after lost page digest");
            self.state = State::Poisoned;
        }
        result
    }
}

impl io::Write for Hasher {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(self.update(buf)?)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::config::{BLOCK_SIZE, PAGE_SIZE};

    fn pattern(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i & 0xff) as u8).collect()
    }

    #[test]
    fn test_zero_parallelism_rejected() {
        assert!(matches!(
            Hasher::new(0),
            Err(HashError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_finish_is_single_use() {
        let mut hasher = Hasher::new(2).unwrap();
        hasher.update(b"data").unwrap();
        hasher.finish().unwrap();

        assert!(hasher.is_finalized());
        assert!(matches!(
            hasher.finish(),
            Err(HashError::Finalized {
                operation: "finish"
            })
        ));
        assert!(matches!(
            hasher.update(b"more"),
            Err(HashError::Finalized {
                operation: "update"
            })
        ));
    }

    #[test]
    fn test_shutdown_finalizes() {
        let mut hasher = Hasher::new(2).unwrap();
        hasher.update(&[0u8; 10]).unwrap();
        hasher.shutdown();
        assert!(hasher.is_finalized());
        assert!(hasher.finish().is_err());
    }

    #[test]
    fn test_lost_pool_poisons_hasher() {
        let mut hasher = Hasher::new(2).unwrap();
        hasher.pool.shutdown();

        // The first full page has nowhere to go
        assert!(matches!(
            hasher.update(&[7u8; PAGE_SIZE]),
            Err(HashError::WorkerFailed)
        ));
        assert!(matches!(
            hasher.update(b"more"),
            Err(HashError::WorkerFailed)
        ));
        assert!(matches!(hasher.finish(), Err(HashError::WorkerFailed)));
        assert!(!hasher.is_finalized());
        assert_eq!(hasher.bytes_written(), 0);
    }

    #[test]
    fn test_bytes_written() {
        let mut hasher = Hasher::new(1).unwrap();
        assert_eq!(hasher.update(&[1u8; 100]).unwrap(), 100);
        assert_eq!(
            hasher
                .update_bytes(Bytes::from(vec![2u8; PAGE_SIZE]))
                .unwrap(),
            PAGE_SIZE
        );
        assert_eq!(hasher.bytes_written(), 100 + PAGE_SIZE as u64);
        assert_eq!(hasher.parallelism(), 1);
    }

    #[test]
    fn test_io_write_reports_lifecycle_error() {
        let mut hasher = Hasher::new(1).unwrap();
        hasher.write_all(b"abc").unwrap();
        hasher.flush().unwrap();
        hasher.finish().unwrap();

        let err = hasher.write(b"late").unwrap_err();
        let inner = err.into_inner().unwrap();
        assert!(matches!(
            inner.downcast_ref::<HashError>(),
            Some(HashError::Finalized { .. })
        ));
    }

    // Published block digests of the final block for `i & 0xff` inputs.
    #[test]
    fn test_block_hashes_do_not_change() {
        let cases: [(usize, &str); 7] = [
            (0, "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"),
            (1, "1406e05881e299367766d313e26c05564ec91bf721d31726bd6e46e60689539a"),
            (PAGE_SIZE - 1, "12078762b8eda8a5499c46e9b5c7f8d37bab3a684571aefc2a7d3abcd56c093e"),
            (PAGE_SIZE, "b00be365b41949cf3571f69f8f5ad95514f6afdfe094aba614ecd34bd828272b"),
            (PAGE_SIZE + 1, "4a3e85babdd4243495a3617e9316bdf9cdc4526f97aa0e435a47226876c3d167"),
            (BLOCK_SIZE - 1, "3492b19ddcd76ea1ed5c07090a021705adc7e7d5c5aad4ff619fd12faeceb197"),
            (BLOCK_SIZE, "e8deef25ed53357d2a738d7156067e69892a7bdc190818cd2ad698a3a1f95e03"),
        ];

        for (len, expected) in cases {
            let mut hasher = Hasher::new(4).unwrap();
            hasher.update(&pattern(len)).unwrap();
            hasher.finish().unwrap();
            assert_eq!(
                hasher.last_block().unwrap().to_hex(),
                expected,
                "block hash for {len} bytes"
            );
        }
    }

    #[test]
    fn test_block_rollover_counts() {
        let mut hasher = Hasher::new(4).unwrap();
        hasher.update(&pattern(BLOCK_SIZE)).unwrap();
        // A full block is folded as soon as its last page is written
        assert_eq!(hasher.chain.blocks(), 1);
        hasher.finish().unwrap();
        assert_eq!(hasher.chain.blocks(), 1);

        let mut hasher = Hasher::new(4).unwrap();
        hasher.update(&pattern(BLOCK_SIZE + 1)).unwrap();
        hasher.finish().unwrap();
        assert_eq!(hasher.chain.blocks(), 2);
    }
}
