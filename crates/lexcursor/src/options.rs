use crate::decode::UTF8_MAX;

/// Bytes requested from the source per read.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Size of the first buffer allocation.
pub const DEFAULT_INITIAL_CAPACITY: usize = DEFAULT_CHUNK_SIZE * 2;

/// Buffer sizing for a [`Reader`](crate::Reader).
///
/// The defaults suit file and socket input. Small values are mostly useful in
/// tests, where they force the buffer through many grow and slide cycles.
///
/// # Examples
///
/// ```rust
/// use lexcursor::{Reader, ReaderOptions};
///
/// let options = ReaderOptions {
///     chunk_size: 64,
///     ..Default::default()
/// };
/// let mut reader = Reader::with_options(&b"let x = 1;"[..], options);
/// assert_eq!(reader.next(), Some('l'));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderOptions {
    /// Maximum number of bytes requested from the source in a single read.
    ///
    /// Values smaller than the widest UTF-8 scalar (4 bytes) are raised to 4.
    ///
    /// # Default
    ///
    /// `4096`
    pub chunk_size: usize,

    /// Length of the buffer allocated on the first read.
    ///
    /// The buffer doubles from here whenever the retained bytes leave no room
    /// for a full chunk. Values smaller than `chunk_size` are raised to it.
    ///
    /// # Default
    ///
    /// `8192`
    pub initial_capacity: usize,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
        }
    }
}

impl ReaderOptions {
    /// Returns the options with out-of-range sizes clamped.
    pub(crate) fn normalized(self) -> Self {
        let chunk_size = self.chunk_size.max(UTF8_MAX);
        Self {
            chunk_size,
            initial_capacity: self.initial_capacity.max(chunk_size),
        }
    }
}
