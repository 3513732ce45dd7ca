//! Future that hashes an async reader to completion.

use std::future::Future;
use std::io::ErrorKind;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::ready;
use futures_io::AsyncRead;
use pin_project_lite::pin_project;

use crate::buffer::Buffer;
use crate::config::HasherConfig;
use crate::error::HashError;
use crate::hasher::Hasher;
use crate::id::ContentId;

pin_project! {
    /// A future that reads an async reader to the end and resolves to its
    /// content identifier.
    ///
    /// Reading is asynchronous, but handing pages to the worker pool is not:
    /// a poll may block briefly while the pool's queue is full or a block
    /// waits for its page digests.
    pub struct HashFuture<R> {
        #[pin]
        reader: R,
        hasher: Option<Hasher>,
        error: Option<HashError>,
        buffer: Buffer,
    }
}

impl<R: AsyncRead> Future for HashFuture<R> {
    type Output = Result<ContentId, HashError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut this = self.project();

        if let Some(e) = this.error.take() {
            return Poll::Ready(Err(e));
        }

        loop {
            let Some(hasher) = this.hasher.as_mut() else {
                return Poll::Ready(Err(HashError::Finalized { operation: "poll" }));
            };

            let n = match ready!(this.reader.as_mut().poll_read(cx, &mut this.buffer[..])) {
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    this.hasher.take();
                    return Poll::Ready(Err(e.into()));
                }
            };

            if n == 0 {
                let result = match this.hasher.take() {
                    Some(hasher) => hasher.finalize(),
                    None => Err(HashError::Finalized { operation: "poll" }),
                };
                return Poll::Ready(result);
            }

            if let Err(e) = hasher.update(&this.buffer[..n]) {
                this.hasher.take();
                return Poll::Ready(Err(e));
            }
        }
    }
}

/// Creates a future computing the content identifier of an async reader.
///
/// Uses `futures_io::AsyncRead` for runtime-agnostic async I/O. For tokio
/// readers, convert with `tokio_util::compat`:
///
/// ```ignore
/// use tokio_util::compat::TokioAsyncReadCompatExt;
/// use vsohash::{HasherConfig, hash_async};
///
/// let file = tokio::fs::File::open("data.bin").await?;
/// let id = hash_async(file.compat(), HasherConfig::default()).await?;
/// ```
///
/// A configuration error is reported when the future is first polled.
pub fn hash_async<R: AsyncRead>(reader: R, config: HasherConfig) -> HashFuture<R> {
    let (hasher, error) = match Hasher::with_config(config) {
        Ok(hasher) => (Some(hasher), None),
        Err(e) => (None, Some(e)),
    };
    HashFuture {
        reader,
        hasher,
        error,
        buffer: Buffer::take(),
    }
}
