use core::fmt;
use std::io::Read;

use bstr::{BStr, BString, ByteSlice};

use crate::{
    Position, ReadError, ReaderOptions,
    buffer::Buffer,
    decode::{Decoded, decode_rune},
    history::{History, Snapshot},
};

/// A token's text together with the position of its first rune.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme {
    /// The raw bytes between the previous token boundary and the cursor.
    ///
    /// Usually valid UTF-8; malformed input is kept byte for byte.
    pub text: BString,
    /// Where the token's first rune was read.
    pub position: Position,
}

impl fmt::Display for Lexeme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} at {}", self.text, self.position)
    }
}

/// A buffered rune cursor over any [`Read`] source.
///
/// `Reader` yields one `char` per call to [`next`](Iterator::next), can undo
/// any number of those calls with [`backup`](Reader::backup) back to the last
/// token boundary, and hands out the text between that boundary and the
/// cursor via [`peek_token`](Reader::peek_token) and [`emit`](Reader::emit).
///
/// `next` returns `None` when no rune can be decoded right now. Check
/// [`err`](Reader::err) to find out why:
///
/// - `Some(ReadError::EndOfStream)`: the input is finished;
/// - `Some(ReadError::Source(_))`: the source failed;
/// - `None`: the source is not ready (it reported `WouldBlock` or
///   `Interrupted`) and a later call may succeed.
///
/// # Examples
///
/// ```rust
/// use lexcursor::{Position, Reader};
///
/// let mut reader = Reader::from_bytes(b"let x");
/// reader.accept_run_fn(char::is_alphabetic);
/// let keyword = reader.emit();
/// assert_eq!(keyword.text, "let");
/// assert_eq!(keyword.position, Position::new(1, 1));
///
/// reader.accept(" ");
/// reader.ignore();
/// assert_eq!(reader.next(), Some('x'));
/// assert_eq!(reader.next(), None);
/// assert!(reader.err().is_some_and(|err| err.is_end_of_stream()));
/// ```
#[derive(Debug)]
pub struct Reader<R> {
    buffer: Buffer<R>,
    history: History,
    position: Position,
    token_start: Position,
}

impl<'a> Reader<&'a [u8]> {
    /// Creates a reader over an in-memory byte slice.
    #[must_use]
    pub fn from_bytes<B: AsRef<[u8]> + ?Sized>(bytes: &'a B) -> Self {
        Self::new(bytes.as_ref())
    }
}

impl<R: Read> Reader<R> {
    /// Creates a reader with [`ReaderOptions::default`].
    ///
    /// Nothing is read until the first rune is requested.
    pub fn new(source: R) -> Self {
        Self::with_options(source, ReaderOptions::default())
    }

    /// Creates a reader with explicit buffer sizing.
    pub fn with_options(source: R, options: ReaderOptions) -> Self {
        Self {
            buffer: Buffer::new(source, options),
            history: History::default(),
            position: Position::START,
            token_start: Position::START,
        }
    }

    /// Returns the next rune without consuming it.
    ///
    /// May read from the source. Leaves the backup history unchanged.
    pub fn peek(&mut self) -> Option<char> {
        let ch = self.next()?;
        self.backup(1);
        Some(ch)
    }

    fn next_rune(&mut self) -> Option<char> {
        self.buffer.fill();

        let exhausted = self.buffer.err().is_some();
        let Decoded::Rune { ch, len } = decode_rune(self.buffer.ahead(), exhausted) else {
            return None;
        };

        self.history.push(Snapshot {
            offset: self.buffer.offset(),
            position: self.position,
        });
        self.buffer.consume(len);
        self.position = self.position.advance(ch);
        Some(ch)
    }
}

impl<R> Reader<R> {
    /// Undoes up to `n` of the most recent rune consumptions.
    ///
    /// Backing up stops at the last call to [`ignore`](Reader::ignore) or
    /// [`emit`](Reader::emit); asking for more than is available is not an
    /// error.
    pub fn backup(&mut self, n: usize) {
        if let Some(snapshot) = self.history.rewind(n) {
            self.buffer.rewind(snapshot.offset);
            self.position = snapshot.position;
        }
    }

    /// Discards the pending token and starts a new one at the cursor.
    ///
    /// Clears the backup history: runes consumed before this call can no
    /// longer be undone, and their bytes may be reclaimed.
    pub fn ignore(&mut self) {
        self.buffer.mark_start();
        self.token_start = self.position;
        self.history.clear();
    }

    /// Returns the text consumed since the last token boundary.
    #[must_use]
    pub fn peek_token(&self) -> &BStr {
        self.buffer.pending().as_bstr()
    }

    /// Returns the pending token and its start position, then starts a new
    /// token at the cursor as [`ignore`](Reader::ignore) does.
    pub fn emit(&mut self) -> Lexeme {
        let lexeme = Lexeme {
            text: BString::from(self.buffer.pending()),
            position: self.token_start,
        };
        self.ignore();
        lexeme
    }

    /// Returns the first error reported by the source, including the
    /// end-of-stream marker.
    ///
    /// Once set it never changes.
    #[must_use]
    pub fn err(&self) -> Option<&ReadError> {
        self.buffer.err()
    }

    /// Whether the source has ended and every byte has been consumed.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.buffer.is_end_of_stream() && self.buffer.ahead().is_empty()
    }

    /// Position of the next rune to be read.
    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Position of the first rune of the pending token.
    #[must_use]
    pub fn token_start(&self) -> Position {
        self.token_start
    }

    /// Number of runes [`backup`](Reader::backup) can currently undo.
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Returns a reference to the underlying source.
    pub fn get_ref(&self) -> &R {
        self.buffer.source()
    }

    /// Unwraps the reader, returning the underlying source.
    ///
    /// Bytes already buffered but not consumed are lost.
    pub fn into_inner(self) -> R {
        self.buffer.into_source()
    }
}

impl<R: Read> Iterator for Reader<R> {
    type Item = char;

    /// Consumes and returns the next rune.
    ///
    /// Malformed UTF-8 yields `U+FFFD` for each offending byte. `None` does
    /// not fuse the iterator; see [`Reader`] for how to interpret it.
    fn next(&mut self) -> Option<char> {
        self.next_rune()
    }
}
