//! Fixed-size pool of page hashing threads.

use std::thread::{self, JoinHandle};

use bytes::Bytes;
use flume::{Receiver, Sender};

use crate::error::HashError;
use crate::hash;
use crate::id::Sha256Hash;

/// A page waiting to be digested, with the slot its digest goes into.
struct PageTask {
    page: Bytes,
    done: Sender<Sha256Hash>,
}

/// Completion handle for one submitted page.
///
/// Exactly one worker sends into it and exactly one owner waits on it.
#[derive(Debug)]
pub(crate) struct PageHandle {
    rx: Receiver<Sha256Hash>,
}

impl PageHandle {
    #[cfg(test)]
    pub(crate) fn from_receiver(rx: Receiver<Sha256Hash>) -> Self {
        Self { rx }
    }

    /// Blocks until the page digest is ready.
    ///
    /// Fails with [`HashError::WorkerFailed`] if the worker that took the page
    /// went away without delivering a digest.
    pub(crate) fn wait(self) -> Result<Sha256Hash, HashError> {
        self.rx.recv().map_err(|_| {
            log::warn!("page digest was never delivered");
            HashError::WorkerFailed
        })
    }
}

/// A fixed set of threads hashing pages pulled from a bounded queue.
///
/// The queue holds at most `parallelism` pages, so [`WorkerPool::submit`]
/// blocks once the workers fall that far behind.
#[derive(Debug)]
pub(crate) struct WorkerPool {
    tasks: Option<Sender<PageTask>>,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Starts `parallelism` workers.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::Io`] if a thread could not be spawned; workers
    /// that did start are shut down before returning.
    ///
    /// `parallelism` comes from a validated [`HasherConfig`](crate::HasherConfig)
    /// and is never zero.
    pub(crate) fn new(parallelism: usize) -> Result<Self, HashError> {
        debug_assert!(parallelism > 0, "worker pool needs at least one thread");

        let (tx, rx) = flume::bounded::<PageTask>(parallelism);
        let mut pool = Self {
            tasks: Some(tx),
            workers: Vec::with_capacity(parallelism),
        };

        for index in 0..parallelism {
            let rx = rx.clone();
            let handle = thread::Builder::new()
                .name(format!("vsohash-worker-{index}"))
                .spawn(move || run(rx))?;
            pool.workers.push(handle);
        }

        log::debug!("started page worker pool with {parallelism} threads");
        Ok(pool)
    }

    /// Queues a page for hashing and returns its completion handle.
    ///
    /// Blocks while the queue is full.
    pub(crate) fn submit(&self, page: Bytes) -> Result<PageHandle, HashError> {
        let tasks = self.tasks.as_ref().ok_or(HashError::WorkerFailed)?;
        let (done, rx) = flume::bounded(1);
        tasks
            .send(PageTask { page, done })
            .map_err(|_| HashError::WorkerFailed)?;
        Ok(PageHandle { rx })
    }

    /// Returns the number of worker threads.
    pub(crate) fn parallelism(&self) -> usize {
        self.workers.len()
    }

    /// Stops accepting pages, lets workers drain the queue, and joins them.
    ///
    /// Calling this more than once is a no-op.
    pub(crate) fn shutdown(&mut self) {
        let Some(tasks) = self.tasks.take() else {
            return;
        };
        drop(tasks);

        for worker in self.workers.drain(..) {
            if worker.join().is_err() {
                log::warn!("page worker panicked");
            }
        }
        log::debug!("page worker pool stopped");
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run(tasks: Receiver<PageTask>) {
    for task in tasks.iter() {
        // The owner may have dropped the handle; nothing to deliver then.
        let _ = task.done.send(hash::digest(&task.page));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "at least one thread")]
    fn test_zero_parallelism_is_a_bug() {
        let _ = WorkerPool::new(0);
    }

    #[test]
    fn test_submit_and_wait() {
        let pool = WorkerPool::new(2).unwrap();
        let handle = pool.submit(Bytes::from_static(b"page")).unwrap();
        assert_eq!(handle.wait().unwrap(), hash::digest(b"page"));
    }

    #[test]
    fn test_handles_resolve_in_submission_order() {
        let pool = WorkerPool::new(4).unwrap();
        // Mix large and tiny pages so completion order differs from submission order
        let pages: Vec<Bytes> = (0..16u8)
            .map(|i| {
                let len = if i % 2 == 0 { 256 * 1024 } else { 1 };
                Bytes::from(vec![i; len])
            })
            .collect();

        let handles: Vec<_> = pages
            .iter()
            .map(|p| pool.submit(p.clone()).unwrap())
            .collect();

        for (page, handle) in pages.iter().zip(handles) {
            assert_eq!(handle.wait().unwrap(), hash::digest(page));
        }
    }

    #[test]
    fn test_dropped_handle_does_not_stall_pool() {
        let pool = WorkerPool::new(1).unwrap();
        for _ in 0..8 {
            drop(pool.submit(Bytes::from_static(b"ignored")).unwrap());
        }
        let handle = pool.submit(Bytes::from_static(b"kept")).unwrap();
        assert_eq!(handle.wait().unwrap(), hash::digest(b"kept"));
    }

    #[test]
    fn test_shutdown_is_idempotent() {
        let mut pool = WorkerPool::new(3).unwrap();
        assert_eq!(pool.parallelism(), 3);
        let handle = pool.submit(Bytes::from_static(b"before")).unwrap();

        pool.shutdown();
        pool.shutdown();

        // Work queued before shutdown is drained
        assert_eq!(handle.wait().unwrap(), hash::digest(b"before"));
        assert!(matches!(
            pool.submit(Bytes::new()),
            Err(HashError::WorkerFailed)
        ));
    }
}
