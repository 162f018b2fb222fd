//! Buffered rune cursor for hand-written lexers.
//!
//! [`Reader`] wraps any [`std::io::Read`] and exposes the primitives a lexer
//! is built from: read a rune, look at the next one, back up any number of
//! runes to the last token boundary, and cut the text read so far into a
//! token with its line and column.
//!
//! Input is pulled in fixed-size chunks into a buffer that keeps only what
//! the pending token and backtracking can still reach, so memory stays
//! bounded by the longest token rather than by the input.
//!
//! ```rust
//! use lexcursor::{Position, Reader};
//!
//! let mut reader = Reader::from_bytes("x = 42 /* answer */");
//! let mut tokens = Vec::new();
//! loop {
//!     reader.accept_run(" \t\n");
//!     reader.ignore();
//!     if reader.accept_seq("/*") {
//!         reader.until_seq_inclusive("*/");
//!     } else if reader.accept_run_fn(char::is_alphanumeric) == 0 && !reader.accept("=") {
//!         break;
//!     }
//!     tokens.push(reader.emit());
//! }
//!
//! let texts: Vec<_> = tokens.iter().map(|t| t.text.to_string()).collect();
//! assert_eq!(texts, ["x", "=", "42", "/* answer */"]);
//! assert_eq!(tokens[2].position, Position::new(1, 5));
//! assert!(reader.err().is_some_and(|err| err.is_end_of_stream()));
//! ```

mod buffer;
mod combinators;
mod decode;
mod error;
mod history;
mod options;
mod position;
mod reader;

#[cfg(test)]
mod tests;

pub use combinators::RuneSet;
pub use error::ReadError;
pub use options::{DEFAULT_CHUNK_SIZE, DEFAULT_INITIAL_CAPACITY, ReaderOptions};
pub use position::Position;
pub use reader::{Lexeme, Reader};
