// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::coll;
use crate::context::{self, Context};
use crate::error::{ReadError, ReaderError};
use crate::form::{closing_char, Collkind, Form};
use crate::print::pr_str;
use crate::settings::{Format, Modes};
use crate::token::{tokenize, Kind, Scalar, Token};
use kstring::KString;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use thiserror::Error;

const WITH_META: &str = "with-meta";

/// The symbol a reader macro prefix expands to.
fn reader_macro(token: &Token) -> Option<&'static str> {
    match (token.kind, &token.value) {
        (Kind::SpecialChar, Scalar::Char(c)) => match c {
            '\'' => Some("quote"),
            '`' => Some("quasiquote"),
            '~' => Some("unquote"),
            '@' => Some("deref"),
            '^' => Some(WITH_META),
            _ => None,
        },
        (Kind::SpecialChars, Scalar::Str(s)) if s.as_str() == "~@" =>
            Some("splice-unquote"),
        _ => None,
    }
}

// `s` is the raw token text including the opening quote.
fn is_terminated_string(s: &str) -> bool {
    if s.len() < 2 || !s.ends_with('"') {
        return false
    }
    let body = &s[1..s.len() - 1];
    let backslashes = body.bytes().rev().take_while(|&b| b == b'\\').count();
    backslashes % 2 == 0
}

/// Recursive descent over a token slice. Positions are indices into
/// `tokens`; every read returns the form and the position after it.
struct Reader<'t> {
    tokens: &'t [Token],
}

impl<'t> Reader<'t> {
    /// Index of the next token at or after `i` that isn't whitespace
    /// or a comment.
    fn next_useful(&self, i: usize) -> Option<usize> {
        (i..self.tokens.len()).find(|&j| !self.tokens[j].kind.is_ignorable())
    }

    /// `i` must point to a useful token. `fuel` is the number of
    /// nesting levels still allowed.
    fn read(&self, i: usize, fuel: u32) -> (Form, usize) {
        let token = &self.tokens[i];
        if let Some(kind) = Collkind::opened_by(token) {
            if fuel == 0 {
                return (ReadError::NestingTooDeep.at(token).into(),
                        self.skip_form(i))
            }
            return self.read_coll(kind, i, fuel - 1)
        }
        if let Some(c) = closing_char(token) {
            return (ReadError::UnmatchedDelimiter(c).at(token).into(), i + 1)
        }
        if let Some(name) = reader_macro(token) {
            if fuel == 0 {
                return (ReadError::NestingTooDeep.at(token).into(),
                        self.skip_form(i))
            }
            return if name == WITH_META {
                self.expand_meta(token, i + 1, fuel - 1)
            } else {
                self.expand_quoted(name, token, i + 1, fuel - 1)
            }
        }
        if token.kind == Kind::String {
            let s = token.str_value().unwrap_or("");
            if !is_terminated_string(s) {
                return (ReadError::UnterminatedString.at(token).into(), i + 1)
            }
            let body = KString::from_ref(&s[1..s.len() - 1]);
            return (Token::new(Scalar::Str(body), Kind::String, token.pos).into(),
                    i + 1)
        }
        (token.clone().into(), i + 1)
    }

    // Children are collected list-shaped and only turned into the
    // target collection once the matching close delimiter shows up.
    // After a child error, reading goes on until that delimiter so
    // that the following forms are read in sync, but the first error
    // is what the whole collection turns into.
    fn read_coll(&self, kind: Collkind, opener_i: usize, fuel: u32) -> (Form, usize) {
        let opener = &self.tokens[opener_i];
        let mut forms = Vec::new();
        let mut first_err: Option<Form> = None;
        let mut i = opener_i + 1;
        while let Some(j) = self.next_useful(i) {
            if closing_char(&self.tokens[j]) == Some(kind.closing()) {
                let form = match first_err {
                    Some(e) => e,
                    None => coll::build(kind, forms, opener),
                };
                return (form, j + 1)
            }
            let (form, next) = self.read(j, fuel);
            if first_err.is_none() {
                if form.is_error() {
                    first_err = Some(form);
                } else {
                    forms.push(form);
                }
            }
            i = next;
        }
        let err = first_err.unwrap_or_else(|| {
            ReadError::UnterminatedCollection(kind.closing()).at(opener).into()
        });
        (err, self.tokens.len())
    }

    /// Read the form a reader macro applies to. `Err` carries the
    /// position to continue at if there is none: a close delimiter is
    /// left for the enclosing collection.
    fn read_operand(&self, i: usize, fuel: u32) -> Result<(Form, usize), usize> {
        match self.next_useful(i) {
            Some(j) if closing_char(&self.tokens[j]).is_none() => Ok(self.read(j, fuel)),
            Some(j) => Err(j),
            None => Err(self.tokens.len()),
        }
    }

    fn expand_quoted(&self, name: &str, prefix: &Token, i: usize, fuel: u32)
                     -> (Form, usize) {
        match self.read_operand(i, fuel) {
            Ok((form, next)) if form.is_error() => (form, next),
            Ok((form, next)) => {
                let head = Token::symbol(name, prefix.pos).into();
                (Form::List(vec![head, form]), next)
            }
            Err(next) => (ReadError::MissingQuotedForm.at(prefix).into(), next),
        }
    }

    // `^meta target` becomes `(with-meta target meta)`.
    fn expand_meta(&self, prefix: &Token, i: usize, fuel: u32) -> (Form, usize) {
        let (meta, i) = match self.read_operand(i, fuel) {
            Ok(r) => r,
            Err(next) => return (ReadError::MissingMetadata.at(prefix).into(), next),
        };
        if meta.is_error() {
            return (meta, i)
        }
        let (target, i) = match self.read_operand(i, fuel) {
            Ok(r) => r,
            Err(next) => return (ReadError::MissingMetaTarget.at(prefix).into(), next),
        };
        if target.is_error() {
            return (target, i)
        }
        let head = Token::symbol(WITH_META, prefix.pos).into();
        (Form::List(vec![head, target, meta]), i)
    }

    /// Position after the form starting at `i`, for forms nested too
    /// deeply to be read. Tracks the expected close delimiters on a
    /// stack instead of recursing; a close delimiter that doesn't
    /// match is passed over, as reading would make it an error form
    /// of its own.
    fn skip_form(&self, i: usize) -> usize {
        let mut pending: usize = 1; // forms still to pass outside any collection
        let mut closers: Vec<char> = Vec::new();
        let mut i = i;
        while let Some(j) = self.next_useful(i) {
            let token = &self.tokens[j];
            if let Some(kind) = Collkind::opened_by(token) {
                closers.push(kind.closing());
            } else if let Some(c) = closing_char(token) {
                match closers.last() {
                    None => return j,
                    Some(&expected) if expected == c => {
                        closers.pop();
                        if closers.is_empty() {
                            pending -= 1;
                        }
                    }
                    Some(_) => {}
                }
            } else if closers.is_empty() {
                match reader_macro(token) {
                    Some(WITH_META) => pending += 1,
                    Some(_) => {}
                    None => pending -= 1,
                }
            }
            i = j + 1;
            if pending == 0 {
                return i
            }
        }
        self.tokens.len()
    }
}

/// Read the form at the first useful token at or after `pos`.
/// Returns `None` if only whitespace and comments are left.
pub fn read_form(tokens: &[Token], pos: usize, modes: &Modes) -> Option<(Form, usize)> {
    let reader = Reader { tokens };
    let i = reader.next_useful(pos)?;
    Some(reader.read(i, modes.depth_fuel))
}

/// Read all top-level forms. An error in one form shows up as that
/// form's value and reading goes on with the next one.
pub fn read_forms(tokens: &[Token], modes: &Modes) -> Vec<Form> {
    let mut forms = Vec::new();
    let mut pos = 0;
    while let Some((form, next)) = read_form(tokens, pos, modes) {
        forms.push(form);
        pos = next;
    }
    forms
}

pub fn read_str(input: &str, modes: &Modes) -> Vec<Form> {
    read_forms(&tokenize(input), modes)
}


#[derive(Error, Debug)]
pub struct ReaderErrorWithContext {
    err: ReaderError,
    container: Box<dyn Context>,
}

impl Display for ReaderErrorWithContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        f.write_fmt(format_args!("{} ", self.err))?;
        if let Some(pos) = self.err.pos() {
            self.container.format_with_pos(pos, f)
        } else {
            f.write_str("in ")?;
            self.container.format_without_pos(f)
        }
    }
}

impl ReaderError {
    /// Attach the source the erroneous form was read from.
    pub fn in_context(self, container: Box<dyn Context>) -> ReaderErrorWithContext {
        ReaderErrorWithContext {
            err: self,
            container,
        }
    }
}

/// All reader errors at the top level of `forms` (errors replace the
/// collections they occur in, so there are no others after reading).
pub fn errors(forms: &[Form]) -> impl Iterator<Item = &ReaderError> {
    forms.iter().filter_map(Form::as_error)
}

#[derive(Error, Debug)]
pub enum ReadErrorWithContext {
    #[error("{}: {0}", .1.to_string_without_pos())]
    IO(std::io::Error, Box<dyn Context>)
}

#[derive(Error, Debug)]
pub enum ReadErrorWithLocation {
    #[error("{0}")]
    IO(Box<ReadErrorWithContext>)
}

// Transform an IO error without Pos context
fn io_add_file<T>(
    r: Result<T, std::io::Error>,
    path: &Path
) -> Result<T, ReadErrorWithLocation>
{
    r.map_err(|e| ReadErrorWithLocation::IO(Box::new(
        ReadErrorWithContext::IO(
            e,
            Box::new(context::FileContext { path: path.to_path_buf() })))))
}

pub fn read_all(
    fh: impl Read,
    modes: &Modes,
) -> Result<Vec<Form>, std::io::Error>
{
    let mut fh = fh;
    let mut input = String::new();
    fh.read_to_string(&mut input)?;
    Ok(read_str(&input, modes))
}

pub fn read_file(path: &Path, modes: &Modes) -> Result<Vec<Form>, ReadErrorWithLocation> {
    let fh = io_add_file(File::open(path), path)?;
    io_add_file(read_all(fh, modes), path)
}

/// Print each form on its own line.
pub fn write_all<'t>(
    out: impl Write,
    forms: impl IntoIterator<Item = &'t Form>,
    format: &Format,
) -> Result<(), std::io::Error> {
    let mut out = out; // for `File`
    for form in forms.into_iter() {
        writeln!(out, "{}", pr_str(form, format))?;
    }
    Ok(())
}
