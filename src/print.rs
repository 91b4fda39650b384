// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Writing forms back out as text. Reading the output yields an equal
//! form again, except for float formatting and for the order of map
//! and set elements.

use crate::form::{Collkind, Form};
use crate::settings::{Format, DEFAULT_FORMAT};
use crate::token::{Kind, Scalar, Token};
use std::fmt::Write;

fn write_token(f: &mut impl Write, token: &Token, format: &Format)
               -> Result<(), std::fmt::Error> {
    match &token.value {
        Scalar::Bool(b) => f.write_str(if *b { "true" } else { "false" }),
        Scalar::Char(c) => f.write_char(*c),
        Scalar::Long(n) => f.write_fmt(format_args!("{}", n)),
        Scalar::Double(x) =>
            f.write_fmt(format_args!("{:.*}", format.float_precision, x)),
        Scalar::Str(s) => {
            if token.kind == Kind::String {
                f.write_fmt(format_args!("\"{}\"", s))
            } else {
                f.write_str(s)
            }
        }
    }
}

fn write_seq<'t>(
    f: &mut impl Write,
    kind: Collkind,
    items: impl Iterator<Item = &'t Form>,
    format: &Format,
) -> Result<(), std::fmt::Error> {
    f.write_str(kind.opening())?;
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_char(' ')?;
        }
        write_form(f, item, format)?;
    }
    f.write_char(kind.closing())
}

pub fn write_form(f: &mut impl Write, form: &Form, format: &Format)
                  -> Result<(), std::fmt::Error> {
    match form {
        Form::ReaderError(e) =>
            f.write_fmt(format_args!("#ReaderError \"{}\"", e.message())),
        Form::Token(t) => write_token(f, t, format),
        Form::List(v) => write_seq(f, Collkind::List, v.iter(), format),
        Form::Vector(v) => write_seq(f, Collkind::Vector, v.iter(), format),
        Form::Map(m) => write_seq(
            f,
            Collkind::Map,
            m.iter().flat_map(|(k, v)| [k, v]),
            format),
        Form::Set(s) => write_seq(f, Collkind::Set, s.iter(), format),
    }
}

pub fn pr_str(form: &Form, format: &Format) -> String {
    let mut s = String::new();
    // Writing to a String does not fail
    let _ = write_form(&mut s, form, format);
    s
}

/// One line per form, each terminated by a newline.
pub fn print_forms(forms: &[Form], format: &Format) -> String {
    let mut s = String::new();
    for form in forms {
        let _ = write_form(&mut s, form, format);
        s.push('\n');
    }
    s
}

impl std::fmt::Display for Form {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        write_form(f, self, &DEFAULT_FORMAT)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::read::read_str;
    use crate::settings::DEFAULT_MODES;

    fn roundtrip(input: &str) -> String {
        print_forms(&read_str(input, &DEFAULT_MODES), &DEFAULT_FORMAT)
    }

    #[test]
    fn scalars() {
        assert_eq!(roundtrip("1 2.5 true false foo \"a b\""),
                   "1\n2.500000\ntrue\nfalse\nfoo\n\"a b\"\n");
    }

    #[test]
    fn collections() {
        assert_eq!(roundtrip("(a [b c] {:k 1} #{x})"),
                   "(a [b c] {:k 1} #{x})\n");
        assert_eq!(roundtrip("()[]{}#{}"), "()\n[]\n{}\n#{}\n");
    }

    #[test]
    fn escapes_are_kept() {
        assert_eq!(roundtrip(r#""a\"b\\n""#), "\"a\\\"b\\\\n\"\n");
    }

    #[test]
    fn precision() {
        let forms = read_str("1.25", &DEFAULT_MODES);
        assert_eq!(pr_str(&forms[0], &Format { float_precision: 2 }), "1.25");
        assert_eq!(pr_str(&forms[0], &Format { float_precision: 0 }), "1");
    }

    #[test]
    fn error_form() {
        assert_eq!(roundtrip(")"), "#ReaderError \"Unmatched delimiter: )\"\n");
    }
}
