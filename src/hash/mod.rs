//! The SHA-256 digest primitive underneath the paged construction.
//!
//! - `Sha256Hasher` - incremental SHA-256 producing [`Sha256Hash`](crate::Sha256Hash)
//! - `digest` - one-shot SHA-256

mod sha256;

pub(crate) use sha256::{Sha256Hasher, digest};
