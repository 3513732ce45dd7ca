//! Async reader support.
//!
//! This module computes content identifiers from a `futures-io::AsyncRead`
//! source, so it works with tokio, async-std, smol, and other runtimes.
//!
//! - [`hash_async`] - Creates a future resolving to the reader's identifier
//!
//! This module requires the `async-io` feature to be enabled.

mod future;

pub use future::{HashFuture, hash_async};
