use bstr::ByteSlice;
use quickcheck::{QuickCheck, TestResult};
use quickcheck_macros::quickcheck;

use super::sources::ChunkedSource;
use crate::{Position, Reader, ReaderOptions};

fn test_count() -> u64 {
    #[cfg(not(miri))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(miri)]
    let tests = 10;
    tests
}

/// Small buffers so that even short inputs grow and slide.
fn tiny_options(chunk: u8) -> ReaderOptions {
    ReaderOptions {
        chunk_size: 4 + usize::from(chunk % 13),
        initial_capacity: 0,
    }
}

fn read_sizes(sizes: &[u8]) -> Vec<usize> {
    sizes.iter().map(|s| usize::from(s % 7) + 1).collect()
}

/// Property: whatever the read sizes, stalls and token cuts, the runes read
/// and the tokens emitted both reproduce the input exactly.
#[test]
fn roundtrip_any_chunking_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(src: String, sizes: Vec<u8>, chunk: u8, stall: bool) -> bool {
        let mut source = ChunkedSource::new(src.as_bytes(), &read_sizes(&sizes));
        if stall {
            source = source.stalling();
        }
        let mut reader = Reader::with_options(source, tiny_options(chunk));

        let mut runes = String::new();
        let mut tokens = Vec::<u8>::new();
        loop {
            match reader.next() {
                Some(ch) => {
                    runes.push(ch);
                    if ch.is_whitespace() {
                        tokens.extend_from_slice(&reader.emit().text);
                    }
                }
                None if reader.err().is_none() => {}
                None => break,
            }
        }
        tokens.extend_from_slice(&reader.emit().text);

        runes == src && tokens == src.as_bytes() && reader.is_exhausted()
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(String, Vec<u8>, u8, bool) -> bool);
}

/// Property: columns count runes, and every newline starts a new line.
#[quickcheck]
fn positions_follow_lines_and_columns(src: String) -> bool {
    let mut reader = Reader::from_bytes(&src);
    let mut expected = Position::START;
    for ch in src.chars() {
        if reader.position() != expected || reader.next() != Some(ch) {
            return false;
        }
        expected = if ch == '\n' {
            Position::new(expected.line + 1, 1)
        } else {
            Position::new(expected.line, expected.column + 1)
        };
    }
    reader.position() == expected
}

/// Property: backing up `n` runes and reading them again replays the same
/// runes and positions; asking for more than the history holds is the same
/// as asking for all of it.
#[test]
fn backup_symmetry_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(src: String, n: usize, chunk: u8) -> bool {
        let mut reader = Reader::with_options(src.as_bytes(), tiny_options(chunk));
        let mut trail = Vec::new();
        while let Some(ch) = reader.next() {
            trail.push((ch, reader.position()));
        }
        let len = trail.len();
        let n = n % (len + 3);

        reader.backup(n);
        let undone = n.min(len);
        if reader.history_len() != len - undone {
            return false;
        }
        let replay: Vec<_> = (0..undone)
            .map_while(|_| reader.next().map(|ch| (ch, reader.position())))
            .collect();
        replay == trail[len - undone..]
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(String, usize, u8) -> bool);
}

/// Property: `accept_seq` either consumes exactly the literal or leaves the
/// cursor untouched.
#[quickcheck]
fn accept_seq_is_all_or_nothing(src: String, literal: String, skip: usize) -> TestResult {
    let mut reader = Reader::from_bytes(&src);
    let skip = skip % (src.chars().count() + 1);
    reader.by_ref().take(skip).for_each(drop);

    let before = (reader.position(), reader.history_len(), reader.peek_token().to_vec());
    let rest: String = src.chars().skip(skip).collect();
    let matched = reader.accept_seq(&literal);

    if matched != rest.starts_with(literal.as_str()) {
        return TestResult::failed();
    }
    if matched {
        let n = literal.chars().count();
        TestResult::from_bool(reader.history_len() == before.1 + n)
    } else {
        let after = (reader.position(), reader.history_len(), reader.peek_token().to_vec());
        TestResult::from_bool(after == before)
    }
}

/// Property: `until_seq` stops in front of the first occurrence that
/// `str::find` reports.
#[quickcheck]
fn until_seq_agrees_with_find(src: String, from: usize, len: usize, foreign: bool) -> TestResult {
    let chars: Vec<char> = src.chars().collect();
    let literal: String = if foreign || chars.is_empty() {
        "\u{E000}\u{E001}".into()
    } else {
        let from = from % chars.len();
        let len = 1 + len % (chars.len() - from);
        chars[from..from + len].iter().collect()
    };

    let mut reader = Reader::from_bytes(&src);
    let (count, found) = reader.until_seq(&literal);

    let expected = match src.find(literal.as_str()) {
        Some(idx) => (src[..idx].chars().count(), true),
        None => (chars.len(), false),
    };
    if (count, found) != expected {
        return TestResult::failed();
    }
    if found {
        return TestResult::from_bool(reader.accept_seq(&literal));
    }
    TestResult::from_bool(reader.next().is_none())
}

/// Property: arbitrary bytes never get lost or duplicated, valid or not.
#[quickcheck]
fn arbitrary_bytes_survive_emit(bytes: Vec<u8>, sizes: Vec<u8>) -> bool {
    let source = ChunkedSource::new(&bytes, &read_sizes(&sizes));
    let mut reader = Reader::with_options(source, tiny_options(0));
    let mut out = Vec::new();
    let mut runes = 0;
    while reader.next().is_some() {
        runes += 1;
        out.extend_from_slice(&reader.emit().text);
    }
    out == bytes && runes <= bytes.len()
}

#[test]
fn large_input_many_chunks_roundtrip() {
    let line = "fn main() { println!(\"héllo, 世界 🌍\"); }\n";
    let src = line.repeat(2_000);
    let options = ReaderOptions {
        chunk_size: 64,
        initial_capacity: 64,
    };
    let mut reader = Reader::with_options(src.as_bytes(), options);

    let mut lines = 0;
    let mut out = String::new();
    while reader.until("\n") > 0 || reader.peek().is_some() {
        reader.accept("\n");
        let token = reader.emit();
        assert_eq!(token.position, Position::new(lines + 1, 1));
        out.push_str(token.text.to_str().expect("valid UTF-8"));
        lines += 1;
    }
    assert_eq!(lines, 2_000);
    assert_eq!(out, src);
}
