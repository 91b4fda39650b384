// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Translating text to a flat token sequence. Nothing here knows
//! about nesting: open and close delimiters are just `SpecialChar`
//! tokens. See [read](../read/index.html) if interested in trees
//! rather than tokens.

use crate::pos::Pos;
use kstring::KString;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::Write;
use std::hash::{Hash, Hasher};

/// The lexical kinds, in the order of the alternatives in
/// [TOKEN_RE](static@TOKEN_RE).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Whitespace,
    /// `~@` and `#{`
    SpecialChars,
    /// One of `()[]{}'`~^@`
    SpecialChar,
    String,
    Comment,
    Number,
    Symbol,
}

const KINDS: [Kind; 7] = [
    Kind::Whitespace,
    Kind::SpecialChars,
    Kind::SpecialChar,
    Kind::String,
    Kind::Comment,
    Kind::Number,
    Kind::Symbol,
];

impl Kind {
    /// Whitespace and comments carry no meaning for the reader.
    pub fn is_ignorable(self) -> bool {
        matches!(self, Kind::Whitespace | Kind::Comment)
    }
}

// Whitespace and symbol use `+` so that no alternative can match the
// empty string; every input character is covered by some alternative.
pub static TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r#"([\s,]+)|"#,                  // Kind::Whitespace
        r#"(~@|#\{)|"#,                  // Kind::SpecialChars
        r#"([\[\]{}()'`~^@])|"#,         // Kind::SpecialChar
        r#"("(?:\\.|[^\\"])*"?)|"#,      // Kind::String
        r#"(;.*)|"#,                     // Kind::Comment
        r#"([0-9]+\.?[0-9]*)|"#,         // Kind::Number
        r#"([^\s\[\]{}('"`,;)]+)"#,      // Kind::Symbol
    ))
    .unwrap_or_else(|e| panic!("bug: invalid token pattern: {}", e))
});

/// The value a token carries after coercion at tokenize time.
#[derive(Debug, Clone)]
pub enum Scalar {
    Bool(bool),
    Char(char),
    Long(i64),
    Double(f64),
    /// Symbol text, string literal text, comment and whitespace
    /// text; also integer literals too large for `Long`.
    Str(KString),
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Scalar) -> bool {
        match (self, other) {
            (Scalar::Bool(a), Scalar::Bool(b)) => a == b,
            (Scalar::Char(a), Scalar::Char(b)) => a == b,
            (Scalar::Long(a), Scalar::Long(b)) => a == b,
            // Bitwise, to agree with `Hash`
            (Scalar::Double(a), Scalar::Double(b)) => a.to_bits() == b.to_bits(),
            (Scalar::Str(a), Scalar::Str(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Scalar {}

impl Hash for Scalar {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Scalar::Bool(b) => b.hash(state),
            Scalar::Char(c) => c.hash(state),
            Scalar::Long(n) => n.hash(state),
            Scalar::Double(x) => x.to_bits().hash(state),
            Scalar::Str(s) => s.as_str().hash(state),
        }
    }
}

/// A lexical unit. Equality and hashing look at `kind` and `value`
/// only, the position is informational.
#[derive(Debug, Clone)]
pub struct Token {
    pub value: Scalar,
    pub kind: Kind,
    pub pos: Pos,
}

impl PartialEq for Token {
    fn eq(&self, other: &Token) -> bool {
        self.kind == other.kind && self.value == other.value
    }
}

impl Eq for Token {}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.value.hash(state);
    }
}

impl Token {
    pub fn new(value: Scalar, kind: Kind, pos: Pos) -> Token {
        Token { value, kind, pos }
    }

    /// Easily create a symbol token
    pub fn symbol(name: &str, pos: Pos) -> Token {
        Token::new(Scalar::Str(KString::from_ref(name)), Kind::Symbol, pos)
    }

    /// The character of a `SpecialChar` token.
    pub fn special_char(&self) -> Option<char> {
        match (self.kind, &self.value) {
            (Kind::SpecialChar, Scalar::Char(c)) => Some(*c),
            _ => None,
        }
    }

    /// The text of a token holding a `Str` value.
    pub fn str_value(&self) -> Option<&str> {
        match &self.value {
            Scalar::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl std::fmt::Display for Token {
    /// Shows the kind and the raw value, for token dumps.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        f.write_fmt(format_args!("{:?} ", self.kind))?;
        match &self.value {
            Scalar::Bool(b) => f.write_str(if *b { "true" } else { "false" }),
            Scalar::Char(c) => f.write_char(*c),
            Scalar::Long(n) => f.write_fmt(format_args!("{}", n)),
            Scalar::Double(x) => f.write_fmt(format_args!("{:?}", x)),
            Scalar::Str(s) => f.write_fmt(format_args!("{:?}", s.as_str())),
        }
    }
}

fn coerce(s: &str, kind: Kind) -> Scalar {
    match kind {
        Kind::SpecialChar => {
            if let Some(c) = s.chars().next() {
                return Scalar::Char(c)
            }
        }
        Kind::Number => {
            if s.contains('.') {
                if let Ok(x) = s.parse::<f64>() {
                    return Scalar::Double(x)
                }
            } else if let Ok(n) = s.parse::<i64>() {
                return Scalar::Long(n)
            }
            // Out of range; keep the digits so they print back as is
        }
        Kind::Symbol => {
            match s {
                "true" => return Scalar::Bool(true),
                "false" => return Scalar::Bool(false),
                _ => {}
            }
        }
        _ => {}
    }
    Scalar::Str(KString::from_ref(s))
}

/// Split `input` into tokens, including whitespace and comments.
/// Never fails: unterminated strings are returned as String tokens
/// without the closing quote and left for the reader to report.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut line: u32 = 1;
    for caps in TOKEN_RE.captures_iter(input) {
        let found = caps.iter()
            .skip(1)
            .zip(KINDS)
            .find_map(|(m, kind)| {
                m.filter(|m| !m.as_str().is_empty()).map(|m| (m, kind))
            });
        if let Some((m, kind)) = found {
            let s = m.as_str();
            let pos = Pos { line, col: m.start() as u32 + 1 };
            tokens.push(Token::new(coerce(s, kind), kind, pos));
            line += s.matches('\n').count() as u32;
        }
    }
    tokens
}
