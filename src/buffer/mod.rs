//! Internal buffer management for reader input.
//!
//! This module provides a thread-local pool of read buffers so repeated
//! [`hash_reader`](crate::hash_reader) calls do not reallocate. It is an
//! implementation detail and not part of the public API.

mod pool;

pub(crate) use pool::Buffer;
