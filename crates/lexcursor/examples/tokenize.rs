//! Tokenizes a file (or stdin) with a small C-like lexer and prints one token
//! per line.
//!
//! Run with
//!
//! ```bash
//! cargo run -p lexcursor --example tokenize -- path/to/file.c
//! echo 'let x = 1;' | cargo run -p lexcursor --example tokenize
//! ```
//!
//! Set `RUST_LOG=lexcursor=trace` to watch the buffer being filled, grown and
//! slid as input arrives.

use std::{
    fs::File,
    io::{self, Read},
};

use lexcursor::{Reader, ReaderOptions};
use tracing_subscriber::EnvFilter;

const OPERATORS: &[&str] = &["==", "!=", "<=", ">=", "&&", "||", "->"];

fn lex<R: Read>(reader: &mut Reader<R>) {
    loop {
        reader.accept_run_fn(char::is_whitespace);
        reader.ignore();

        let Some(ch) = reader.peek() else {
            break;
        };
        let kind = if reader.accept_seq("//") {
            reader.until('\n');
            "comment"
        } else if reader.accept_seq("/*") {
            if reader.until_seq_inclusive("*/").1 { "comment" } else { "error" }
        } else if ch.is_alphabetic() || ch == '_' {
            reader.accept_run_fn(|c| c.is_alphanumeric() || c == '_');
            "ident"
        } else if ch.is_ascii_digit() {
            reader.accept_run_fn(|c| c.is_ascii_alphanumeric() || c == '.');
            "number"
        } else if ch == '"' || ch == '\'' {
            reader.next();
            let (_, closed) = reader.until_seq_inclusive(ch.encode_utf8(&mut [0; 4]));
            if closed { "string" } else { "error" }
        } else if OPERATORS.iter().any(|op| reader.accept_seq(op)) {
            "operator"
        } else {
            reader.next();
            "punct"
        };

        let token = reader.emit();
        println!("{:>8} {:<10} {}", token.position.to_string(), kind, token.text);
    }
}

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    // Small chunks make the buffer work visible in the trace output.
    let options = ReaderOptions {
        chunk_size: 64,
        initial_capacity: 128,
    };

    let source: Box<dyn Read> = match std::env::args().nth(1) {
        Some(path) => Box::new(File::open(path)?),
        None => Box::new(io::stdin().lock()),
    };
    let mut reader = Reader::with_options(source, options);
    lex(&mut reader);

    match reader.err() {
        Some(err) if !err.is_end_of_stream() => Err(io::Error::other(err.to_string())),
        _ => Ok(()),
    }
}
