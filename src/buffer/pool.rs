//! Thread-local pool of read buffers.

use std::cell::RefCell;
use std::ops::{Deref, DerefMut};

use crate::config::PAGE_SIZE;

/// Size of pooled read buffers: four pages per read.
pub const READ_BUFFER_SIZE: usize = 4 * PAGE_SIZE;

/// Maximum number of buffers to keep per thread.
pub const MAX_POOL_SIZE: usize = 4;

/// A reusable, fixed-size read buffer.
pub struct Buffer {
    data: Vec<u8>,
}

impl Buffer {
    /// Takes a buffer from the thread-local pool or creates a new one.
    pub fn take() -> Self {
        let data = THREAD_BUFFER_POOL
            .with(|pool| pool.borrow_mut().pop())
            .unwrap_or_else(|| vec![0u8; READ_BUFFER_SIZE]);
        Self { data }
    }
}

impl Deref for Buffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.data
    }
}

impl DerefMut for Buffer {
    fn deref_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl Drop for Buffer {
    fn drop(&mut self) {
        THREAD_BUFFER_POOL.with(|pool| {
            let mut pool = pool.borrow_mut();
            if pool.len() < MAX_POOL_SIZE {
                pool.push(std::mem::take(&mut self.data));
            }
        });
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::take()
    }
}

// Thread-local buffer pool
thread_local! {
    static THREAD_BUFFER_POOL: RefCell<Vec<Vec<u8>>> = const { RefCell::new(Vec::new()) };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_take() {
        let buf = Buffer::take();
        assert_eq!(buf.len(), READ_BUFFER_SIZE);
    }

    #[test]
    fn test_buffer_reuse() {
        let ptr = {
            let mut buf = Buffer::take();
            buf[0] = 42;
            buf.as_ptr()
        };

        // The buffer should be returned to the pool and handed out again
        let buf = Buffer::take();
        assert_eq!(buf.as_ptr(), ptr);
        assert_eq!(buf.len(), READ_BUFFER_SIZE);
    }
}
