//! Accept/until helpers built on [`Reader::next`](Iterator::next) and
//! [`Reader::backup`].
//!
//! Nothing here looks at the buffer: every helper consumes runes one at a
//! time and undoes what it should not have taken, so they compose freely with
//! hand-written lexing code.

use core::ops::RangeInclusive;
use std::io::Read;

use crate::Reader;

/// A set of runes that [`Reader::accept`] and friends can test against.
///
/// A `&str` stands for the set of its chars, so `reader.accept("+-")` accepts
/// a sign. Single chars, char slices and arrays, and inclusive char ranges are
/// also sets.
pub trait RuneSet {
    /// Whether `ch` is a member of the set.
    fn contains_rune(&self, ch: char) -> bool;
}

impl RuneSet for str {
    #[inline]
    fn contains_rune(&self, ch: char) -> bool {
        self.contains(ch)
    }
}

impl RuneSet for char {
    #[inline]
    fn contains_rune(&self, ch: char) -> bool {
        *self == ch
    }
}

impl RuneSet for [char] {
    #[inline]
    fn contains_rune(&self, ch: char) -> bool {
        self.contains(&ch)
    }
}

impl<const N: usize> RuneSet for [char; N] {
    #[inline]
    fn contains_rune(&self, ch: char) -> bool {
        self.contains(&ch)
    }
}

impl RuneSet for RangeInclusive<char> {
    #[inline]
    fn contains_rune(&self, ch: char) -> bool {
        self.contains(&ch)
    }
}

impl<T: RuneSet + ?Sized> RuneSet for &T {
    #[inline]
    fn contains_rune(&self, ch: char) -> bool {
        (**self).contains_rune(ch)
    }
}

impl<R: Read> Reader<R> {
    /// Consumes the next rune if it is in `set`.
    pub fn accept(&mut self, set: impl RuneSet) -> bool {
        self.accept_fn(|ch| set.contains_rune(ch))
    }

    /// Consumes the next rune if `pred` holds for it.
    ///
    /// A rejected rune is backed up; at the end of input nothing is consumed.
    pub fn accept_fn(&mut self, mut pred: impl FnMut(char) -> bool) -> bool {
        match self.next() {
            Some(ch) if pred(ch) => true,
            Some(_) => {
                self.backup(1);
                false
            }
            None => false,
        }
    }

    /// Consumes runes while they are in `set`. Returns how many were
    /// consumed.
    pub fn accept_run(&mut self, set: impl RuneSet) -> usize {
        self.accept_run_fn(|ch| set.contains_rune(ch))
    }

    /// Consumes runes while `pred` holds. Returns how many were consumed.
    ///
    /// ```rust
    /// let mut reader = lexcursor::Reader::from_bytes("4096px");
    /// assert_eq!(reader.accept_run_fn(|ch| ch.is_ascii_digit()), 4);
    /// assert_eq!(reader.peek_token(), "4096");
    /// ```
    pub fn accept_run_fn(&mut self, mut pred: impl FnMut(char) -> bool) -> usize {
        let mut count = 0;
        while self.accept_fn(&mut pred) {
            count += 1;
        }
        count
    }

    /// Consumes runes up to, but not including, the first one in `set`.
    /// Returns how many were consumed.
    pub fn until(&mut self, set: impl RuneSet) -> usize {
        self.until_fn(|ch| set.contains_rune(ch))
    }

    /// Consumes runes up to, but not including, the first one for which
    /// `pred` holds, or to the end of input.
    pub fn until_fn(&mut self, mut pred: impl FnMut(char) -> bool) -> usize {
        self.accept_run_fn(|ch| !pred(ch))
    }

    /// Consumes `literal` if the input continues with it.
    ///
    /// All or nothing: on a mismatch, or if input ends early, the cursor is
    /// put back exactly where it was. An empty literal always matches.
    ///
    /// ```rust
    /// let mut reader = lexcursor::Reader::from_bytes("#defin");
    /// assert!(!reader.accept_seq("#define"));
    /// assert_eq!(reader.peek_token(), "");
    /// assert!(reader.accept_seq("#def"));
    /// ```
    pub fn accept_seq(&mut self, literal: &str) -> bool {
        let before = self.history_len();
        for expected in literal.chars() {
            if self.next() != Some(expected) {
                self.backup(self.history_len() - before);
                return false;
            }
        }
        true
    }

    /// Scans forward to the first occurrence of `literal` and consumes it.
    ///
    /// Returns the number of runes consumed, the match included, and whether
    /// the literal was found. When it is not, the cursor is left at the end
    /// of input.
    ///
    /// ```rust
    /// let mut reader = lexcursor::Reader::from_bytes("/* x */ y");
    /// assert_eq!(reader.until_seq_inclusive("*/"), (7, true));
    /// assert_eq!(reader.peek_token(), "/* x */");
    /// ```
    pub fn until_seq_inclusive(&mut self, literal: &str) -> (usize, bool) {
        let mut skipped = 0;
        loop {
            let before = self.history_len();
            if self.accept_seq(literal) {
                return (skipped + self.history_len() - before, true);
            }
            if self.next().is_none() {
                return (skipped, false);
            }
            skipped += 1;
        }
    }

    /// Scans forward to the first occurrence of `literal`, stopping in front
    /// of it.
    ///
    /// Returns the number of runes before the match and whether the literal
    /// was found. When it is not, every remaining rune is consumed.
    pub fn until_seq(&mut self, literal: &str) -> (usize, bool) {
        let (count, found) = self.until_seq_inclusive(literal);
        if !found {
            return (count, false);
        }
        let len = literal.chars().count();
        self.backup(len);
        (count - len, true)
    }
}
