#![allow(missing_docs)]
#![allow(dead_code)]

use std::io::Read;

use lexcursor::{Lexeme, Reader};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Ident,
    Keyword,
    Number,
    Str,
    Comment,
    Punct,
    Error,
}

pub const KEYWORDS: &[&str] = &["fn", "let", "return"];
pub const OPERATORS: &[&str] = &["->", "==", "=", "+", "-", "*", "/", "(", ")", "{", "}", ";", ","];

/// A tiny C-ish tokenizer, enough to drive every helper on [`Reader`].
pub fn tokenize<R: Read>(reader: &mut Reader<R>) -> Vec<(Kind, Lexeme)> {
    let mut tokens = Vec::new();
    loop {
        reader.accept_run_fn(char::is_whitespace);
        reader.ignore();

        let Some(ch) = reader.peek() else {
            break;
        };

        let kind = if reader.accept_seq("//") {
            reader.until("\n");
            Kind::Comment
        } else if reader.accept_seq("/*") {
            if reader.until_seq_inclusive("*/").1 {
                Kind::Comment
            } else {
                Kind::Error
            }
        } else if ch.is_alphabetic() || ch == '_' {
            reader.accept_run_fn(|c| c.is_alphanumeric() || c == '_');
            if KEYWORDS.iter().any(|kw| reader.peek_token() == *kw) {
                Kind::Keyword
            } else {
                Kind::Ident
            }
        } else if ch.is_ascii_digit() {
            number(reader);
            Kind::Number
        } else if ch == '"' {
            string(reader)
        } else if OPERATORS.iter().any(|op| reader.accept_seq(op)) {
            Kind::Punct
        } else {
            reader.next();
            Kind::Error
        };
        tokens.push((kind, reader.emit()));
    }
    tokens
}

fn number<R: Read>(reader: &mut Reader<R>) {
    if reader.accept_seq("0x") {
        reader.accept_run_fn(|c| c.is_ascii_hexdigit());
        return;
    }
    reader.accept_run('0'..='9');
    if reader.accept('.') {
        reader.accept_run('0'..='9');
    }
}

fn string<R: Read>(reader: &mut Reader<R>) -> Kind {
    reader.next();
    loop {
        reader.until("\"\\\n");
        match reader.next() {
            Some('"') => return Kind::Str,
            Some('\\') => {
                reader.next();
            }
            _ => return Kind::Error,
        }
    }
}

pub fn render(tokens: &[(Kind, Lexeme)]) -> String {
    tokens
        .iter()
        .map(|(kind, lexeme)| format!("{kind:?} {} `{}`", lexeme.position, lexeme.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Hands out one byte per read, the worst case for scalar boundaries.
pub struct OneByte<R>(pub R);

impl<R: Read> Read for OneByte<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let len = buf.len().min(1);
        self.0.read(&mut buf[..len])
    }
}
