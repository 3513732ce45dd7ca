//! vsohash
//!
//! Paged VSO content identifiers for Rust.
//!
//! `vsohash` turns a byte stream into the 33-byte identifier of the paged
//! SHA-256 construction used by BuildXL and Azure DevOps artifact stores:
//!
//! - the stream is cut into 64 KiB pages, each hashed on a worker thread
//! - every 32 page digests are hashed into a block digest, in input order
//! - block digests are folded into a seeded rolling chain
//! - the chain's final digest plus a `0x00` tag byte is the identifier
//!
//! Parallelism only changes how fast the identifier is computed, never its
//! value: pages may finish in any order, but they are always folded in the
//! order they were written.
//!
//! The crate intentionally:
//! - does NOT manage files or paths
//! - does NOT support other digest algorithms
//! - does NOT tune its own thread count
//!
//! # One-shot
//!
//! ```
//! let id = vsohash::compute(b"");
//! assert_eq!(
//!     id.to_hex(),
//!     "1e57cf2792a900d06c1cdfb3c453f35bc86f72788aa9724c96c929d1cc6b456a00"
//! );
//! ```
//!
//! # Streaming
//!
//! ```no_run
//! use std::fs::File;
//! use std::io;
//! use vsohash::{HashError, Hasher};
//!
//! fn main() -> Result<(), HashError> {
//!     let mut file = File::open("data.bin")?;
//!     let mut hasher = Hasher::new(8)?;
//!
//!     io::copy(&mut file, &mut hasher)?;
//!     println!("{}", hasher.finish()?);
//!     Ok(())
//! }
//! ```
//!
//! # Async (feature = "async-io")
//!
//! ```ignore
//! use vsohash::{hash_async, HasherConfig};
//! use futures_io::AsyncRead;
//!
//! async fn demo<R: AsyncRead>(reader: R) -> Result<(), vsohash::HashError> {
//!     let id = hash_async(reader, HasherConfig::default()).await?;
//!     println!("{id}");
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod hasher;
mod id;

mod buffer; // internal (thread-local reuse)
mod hash; // internal sha256 primitive
mod pool; // internal page workers

#[cfg(feature = "async-io")]
mod async_io;

//
// Public surface
//

pub use config::{
    BLOCK_SIZE, DIGEST_SIZE, HasherConfig, ID_SIZE, ID_TAG, PAGE_SIZE, PAGES_PER_BLOCK, SEED,
};
pub use error::HashError;
pub use hasher::{Hasher, compute, compute_bytes, compute_with, hash_reader, try_compute};
pub use id::{ContentId, Sha256Hash};

#[cfg(feature = "async-io")]
pub use async_io::{HashFuture, hash_async};
