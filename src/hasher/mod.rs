//! The paged hashing engine.
//!
//! - [`Hasher`] - incremental hasher with a page worker pool
//! - [`compute`] and friends - one-shot helpers
//! - [`hash_reader`] - hash a [`std::io::Read`] source
//!
//! Internally a byte stream flows through `page` (fixed-size pages),
//! the worker pool, `block` (ordered page digest reassembly) and
//! `chain` (rolling identifier).

mod block;
mod chain;
mod engine;
mod oneshot;
mod page;
mod reader;
mod sequential;

pub use engine::Hasher;
pub use oneshot::{compute, compute_bytes, compute_with, try_compute};
pub use reader::hash_reader;

pub(crate) use sequential::compute_sequential;
