//! Splits a byte stream into fixed-size pages.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::config::PAGE_SIZE;
use crate::error::HashError;

/// Buffers input until a full page is available.
///
/// At most one partial page is held. Input that completes a page is copied
/// into the buffer only up to the page boundary; further full pages are taken
/// from the input directly, which is zero-copy when the input is [`Bytes`].
#[derive(Debug)]
pub(crate) struct PageAccumulator {
    buf: BytesMut,
}

impl PageAccumulator {
    pub(crate) fn new() -> Self {
        Self {
            buf: BytesMut::with_capacity(PAGE_SIZE),
        }
    }

    /// Feeds `data`, calling `emit` with every page it completes, in order.
    pub(crate) fn push<B, F>(&mut self, mut data: B, mut emit: F) -> Result<(), HashError>
    where
        B: Buf,
        F: FnMut(Bytes) -> Result<(), HashError>,
    {
        loop {
            if self.buf.len() + data.remaining() < PAGE_SIZE {
                self.buf.put(data);
                return Ok(());
            }

            if !self.buf.is_empty() {
                let fill = PAGE_SIZE - self.buf.len();
                self.buf.put((&mut data).take(fill));
                let page = self.buf.split().freeze();
                self.buf.reserve(PAGE_SIZE);
                emit(page)?;
                continue;
            }

            emit(data.copy_to_bytes(PAGE_SIZE))?;
        }
    }

    /// Takes the buffered partial page, if any.
    pub(crate) fn take_partial(&mut self) -> Option<Bytes> {
        if self.buf.is_empty() {
            return None;
        }
        Some(self.buf.split().freeze())
    }

    /// Number of bytes waiting for the current page.
    #[cfg(test)]
    pub(crate) fn pending_len(&self) -> usize {
        self.buf.len()
    }
}
