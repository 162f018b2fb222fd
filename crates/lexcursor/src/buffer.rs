//! The byte window underneath a [`Reader`](crate::Reader).
//!
//! Layout of `data`:
//!
//! ```text
//! 0        start      current        head              data.len()
//! |--------|==========|--------------|------------------|
//!  reusable  retained   unread input   free tail
//! ```
//!
//! `[start, current)` holds the pending token together with everything
//! backtracking may return to; `[current, head)` is read but not yet decoded.
//! Bytes before `start` are dead and get reclaimed by the next slide.
//!
//! Before each decode the reader calls [`Buffer::fill`], which makes sure a
//! whole scalar sits at `current` unless the source cannot supply one. Each
//! read round picks one of three strategies for finding a full chunk of free
//! space:
//!
//! - read in place when the tail already has room;
//! - double the allocation when the retained span is too large for a slide to
//!   free a chunk;
//! - otherwise slide `[start, head)` down to offset 0.
//!
//! Every byte is copied at most a constant number of times on average, so
//! buffering stays linear in the input size.

use std::io::{self, Read};

use tracing::{debug, trace};

use crate::{
    ReadError, ReaderOptions,
    decode::{UTF8_MAX, is_incomplete},
};

#[derive(Debug)]
pub(crate) struct Buffer<R> {
    source: R,
    data: Vec<u8>,
    start: usize,
    current: usize,
    head: usize,
    chunk_size: usize,
    initial_capacity: usize,
    err: Option<ReadError>,
}

impl<R: Read> Buffer<R> {
    pub(crate) fn new(source: R, options: ReaderOptions) -> Self {
        let options = options.normalized();
        Self {
            source,
            data: Vec::new(),
            start: 0,
            current: 0,
            head: 0,
            chunk_size: options.chunk_size,
            initial_capacity: options.initial_capacity,
            err: None,
        }
    }

    /// Ensures a complete scalar is buffered at `current`, unless the source
    /// is exhausted, failed, or has nothing to offer right now.
    ///
    /// Rounds are repeated only while the bytes ahead are a truncated UTF-8
    /// prefix, so a one-byte-per-read source never splits a scalar and an
    /// interactive source is never asked for more than the next rune.
    pub(crate) fn fill(&mut self) {
        loop {
            if self.err.is_some() || self.head - self.current >= UTF8_MAX {
                return;
            }
            if self.fill_round() == 0 || self.err.is_some() || !is_incomplete(self.ahead()) {
                return;
            }
        }
    }

    /// Makes room for one chunk and issues exactly one read. Returns the
    /// number of bytes read.
    ///
    /// # Panics
    ///
    /// Panics if the source claims to have read more bytes than it was given
    /// room for.
    fn fill_round(&mut self) -> usize {
        if self.data.is_empty() {
            self.data.resize(self.initial_capacity, 0);
        }

        if self.data.len() - self.head < self.chunk_size {
            if self.head - self.start > self.data.len() - self.chunk_size {
                self.grow();
            } else {
                self.slide();
            }
        }

        let region = &mut self.data[self.head..self.head + self.chunk_size];
        let requested = region.len();
        match self.source.read(region) {
            Ok(0) => {
                trace!("source exhausted");
                self.record(ReadError::EndOfStream);
                0
            }
            Ok(n) => {
                assert!(
                    n <= requested,
                    "lexcursor: bogus reader returned {n} bytes for a {requested}-byte read"
                );
                trace!(requested, read = n, "read chunk");
                self.head += n;
                n
            }
            Err(err)
                if matches!(
                    err.kind(),
                    io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted
                ) =>
            {
                trace!(kind = ?err.kind(), "source not ready");
                0
            }
            Err(err) => {
                self.record(ReadError::Source(err));
                0
            }
        }
    }

    fn grow(&mut self) {
        let capacity = self.data.len() * 2;
        debug!(
            from = self.data.len(),
            to = capacity,
            retained = self.head - self.start,
            "growing buffer"
        );
        self.data.resize(capacity, 0);
    }

    fn slide(&mut self) {
        let shift = self.start;
        debug!(shift, retained = self.head - self.start, "sliding buffer");
        self.data.copy_within(self.start..self.head, 0);
        self.head -= shift;
        self.current -= shift;
        self.start = 0;
    }

    fn record(&mut self, err: ReadError) {
        if self.err.is_none() {
            debug!(error = %err, "recording read error");
            self.err = Some(err);
        }
    }
}

impl<R> Buffer<R> {
    /// Unread bytes, `[current, head)`.
    #[inline]
    pub(crate) fn ahead(&self) -> &[u8] {
        &self.data[self.current..self.head]
    }

    /// Bytes of the pending token, `[start, current)`.
    #[inline]
    pub(crate) fn pending(&self) -> &[u8] {
        &self.data[self.start..self.current]
    }

    /// Moves `current` past `len` decoded bytes.
    #[inline]
    pub(crate) fn consume(&mut self, len: usize) {
        debug_assert!(self.current + len <= self.head);
        self.current += len;
    }

    /// Distance of `current` from `start`. Stays valid across slides.
    #[inline]
    pub(crate) fn offset(&self) -> usize {
        self.current - self.start
    }

    /// Moves `current` back to an offset previously returned by
    /// [`Buffer::offset`].
    #[inline]
    pub(crate) fn rewind(&mut self, offset: usize) {
        debug_assert!(self.start + offset <= self.current);
        self.current = self.start + offset;
    }

    /// Drops everything before `current` from the retained span.
    #[inline]
    pub(crate) fn mark_start(&mut self) {
        self.start = self.current;
    }

    pub(crate) fn err(&self) -> Option<&ReadError> {
        self.err.as_ref()
    }

    pub(crate) fn is_end_of_stream(&self) -> bool {
        matches!(self.err, Some(ReadError::EndOfStream))
    }

    pub(crate) fn source(&self) -> &R {
        &self.source
    }

    pub(crate) fn into_source(self) -> R {
        self.source
    }
}
