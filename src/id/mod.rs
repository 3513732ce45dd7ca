//! Identifier types.
//!
//! - [`Sha256Hash`] - 32-byte page, block and chain digest
//! - [`ContentId`] - 33-byte final content identifier

mod content_id;
mod digest;

pub use content_id::ContentId;
pub use digest::Sha256Hash;
