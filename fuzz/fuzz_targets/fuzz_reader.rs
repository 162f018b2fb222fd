#![no_main]
use std::io::{self, Read};

use arbitrary::{Arbitrary, Unstructured};
use lexcursor::{Reader, ReaderOptions};
use libfuzzer_sys::fuzz_target;

/// One step a lexer might take.
#[derive(Debug, Arbitrary)]
enum Op {
    Next,
    Peek,
    Backup(u8),
    Accept(char),
    AcceptRun(Vec<char>),
    AcceptSeq(String),
    UntilSeq(String),
    Emit,
}

#[derive(Debug, Arbitrary)]
struct Input {
    payload: Vec<u8>,
    /// Sizes of successive reads; zero stands for `WouldBlock`.
    reads: Vec<u8>,
    chunk_size: u8,
    initial_capacity: u8,
    ops: Vec<Op>,
}

/// Replays `payload` in the read sizes chosen by the fuzzer.
struct Scripted<'a> {
    payload: &'a [u8],
    reads: std::iter::Cycle<std::slice::Iter<'a, u8>>,
}

impl Read for Scripted<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.reads.next().copied() {
            Some(0) if !self.payload.is_empty() => Err(io::ErrorKind::WouldBlock.into()),
            step => {
                let want = step.map_or(buf.len(), usize::from);
                let n = want.min(buf.len()).min(self.payload.len());
                buf[..n].copy_from_slice(&self.payload[..n]);
                self.payload = &self.payload[n..];
                Ok(n)
            }
        }
    }
}

fn run(input: &Input) {
    let source = Scripted {
        payload: &input.payload,
        reads: input.reads.iter().cycle(),
    };
    let options = ReaderOptions {
        chunk_size: usize::from(input.chunk_size),
        initial_capacity: usize::from(input.initial_capacity),
    };
    let mut reader = Reader::with_options(source, options);

    // Every op must leave the emitted bytes plus the pending token equal to a
    // prefix of the payload.
    let mut emitted = Vec::new();
    for op in &input.ops {
        let before = reader.history_len();
        match op {
            Op::Next => {
                reader.next();
            }
            Op::Peek => {
                reader.peek();
                assert_eq!(reader.history_len(), before);
            }
            Op::Backup(n) => reader.backup(usize::from(*n)),
            Op::Accept(ch) => {
                reader.accept(*ch);
            }
            Op::AcceptRun(set) => {
                reader.accept_run(set.as_slice());
            }
            Op::AcceptSeq(lit) => {
                if !reader.accept_seq(lit) {
                    assert_eq!(reader.history_len(), before);
                }
            }
            Op::UntilSeq(lit) => {
                reader.until_seq(lit);
            }
            Op::Emit => emitted.extend_from_slice(&reader.emit().text),
        }
        let pending = reader.peek_token();
        assert!(input.payload.starts_with(&emitted));
        assert!(input.payload[emitted.len()..].starts_with(pending));
    }

    // Drain the rest; a zero-sized read script must not stall forever.
    let mut stalls = 0;
    loop {
        if reader.next().is_some() {
            stalls = 0;
            continue;
        }
        if reader.err().is_some() || stalls > input.payload.len() + 8 {
            break;
        }
        stalls += 1;
    }
    emitted.extend_from_slice(&reader.emit().text);
    if reader.err().is_some_and(|err| err.is_end_of_stream()) {
        assert_eq!(emitted, input.payload);
    }
}

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = Input::arbitrary(&mut Unstructured::new(data)) {
        run(&input);
    }
});
