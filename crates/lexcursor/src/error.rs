use std::io;

use thiserror::Error;

/// The sticky error recorded by a [`Reader`](crate::Reader).
///
/// The first error observed from the underlying source is kept for the rest
/// of the reader's life and reported by [`Reader::err`](crate::Reader::err)
/// once [`Reader::next`](crate::Reader) has returned `None`.
///
/// Sources that are merely not ready (`WouldBlock`, `Interrupted`) never
/// produce a `ReadError`; in that case `err()` stays `None` and the caller
/// decides when to try again.
#[derive(Error, Debug)]
pub enum ReadError {
    /// The source is exhausted. This is the normal way for input to end.
    #[error("end of stream")]
    EndOfStream,
    /// The source failed. The error is passed through unchanged.
    #[error("source error: {0}")]
    Source(#[from] io::Error),
}

impl ReadError {
    /// Whether this is the clean end-of-stream marker rather than a fault.
    #[must_use]
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, ReadError::EndOfStream)
    }
}
