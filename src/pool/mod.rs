//! Worker pool for parallel page hashing.
//!
//! This module is an implementation detail: `WorkerPool` owns the threads,
//! `PageHandle` is the one-shot slot each page digest is delivered into.

mod worker;

pub(crate) use worker::{PageHandle, WorkerPool};
