use core::fmt;

/// A line and column in the input, both starting at 1.
///
/// Columns count runes, not bytes: a four-byte emoji advances the column by
/// one, just like an ASCII letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Line number, incremented after every consumed `'\n'`.
    pub line: usize,
    /// Column within the line, reset to 1 after every consumed `'\n'`.
    pub column: usize,
}

impl Position {
    /// The position of the first rune of any input.
    pub const START: Position = Position { line: 1, column: 1 };

    /// Creates a position from a line and column.
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Returns the position that follows consuming `ch` here.
    #[inline]
    #[must_use]
    pub(crate) fn advance(self, ch: char) -> Self {
        if ch == '\n' {
            Self {
                line: self.line + 1,
                column: 1,
            }
        } else {
            Self {
                line: self.line,
                column: self.column + 1,
            }
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
