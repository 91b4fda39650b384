// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The tree that reading produces.
//!
//! Lists and vectors own their children directly. Maps and sets sit
//! behind an `Rc` since they are used as keys of other maps and sets;
//! equality and hashing (see [hash](crate::hash)) look at the
//! contents, never at the pointer.

use crate::error::ReaderError;
use crate::hash::{FormMap, FormSet};
use crate::pos::Pos;
use crate::token::{Kind, Scalar, Token};
use kstring::KString;
use std::rc::Rc;

#[derive(Debug, Clone)]
pub enum Form {
    ReaderError(ReaderError),
    Token(Token),
    List(Vec<Form>),
    Vector(Vec<Form>),
    Map(Rc<FormMap>),
    Set(Rc<FormSet>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collkind {
    List,
    Vector,
    Map,
    Set,
}

impl Collkind {
    pub fn opening(self) -> &'static str {
        match self {
            Collkind::List => "(",
            Collkind::Vector => "[",
            Collkind::Map => "{",
            Collkind::Set => "#{",
        }
    }
    pub fn closing(self) -> char {
        match self {
            Collkind::List => ')',
            Collkind::Vector => ']',
            Collkind::Map | Collkind::Set => '}',
        }
    }

    /// The collection a token opens, if it is an open delimiter.
    pub fn opened_by(token: &Token) -> Option<Collkind> {
        match (token.kind, &token.value) {
            (Kind::SpecialChar, Scalar::Char('(')) => Some(Collkind::List),
            (Kind::SpecialChar, Scalar::Char('[')) => Some(Collkind::Vector),
            (Kind::SpecialChar, Scalar::Char('{')) => Some(Collkind::Map),
            (Kind::SpecialChars, Scalar::Str(s)) if s.as_str() == "#{" =>
                Some(Collkind::Set),
            _ => None,
        }
    }
}

/// The close delimiter character of a token, if it is one.
pub fn closing_char(token: &Token) -> Option<char> {
    match token.special_char() {
        Some(c @ (')' | ']' | '}')) => Some(c),
        _ => None,
    }
}

impl Form {
    /// Easily create a symbol
    pub fn symbol(name: &str) -> Form {
        Form::Token(Token::symbol(name, Pos::default()))
    }

    pub fn long(n: i64) -> Form {
        Form::Token(Token::new(Scalar::Long(n), Kind::Number, Pos::default()))
    }

    pub fn string(s: &str) -> Form {
        Form::Token(Token::new(Scalar::Str(KString::from_ref(s)), Kind::String,
                               Pos::default()))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Form::ReaderError(_))
    }

    pub fn as_error(&self) -> Option<&ReaderError> {
        match self {
            Form::ReaderError(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_token(&self) -> Option<&Token> {
        match self {
            Form::Token(t) => Some(t),
            _ => None,
        }
    }

    /// The children of a list or vector.
    pub fn as_seq(&self) -> Option<&[Form]> {
        match self {
            Form::List(v) | Form::Vector(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&FormMap> {
        match self {
            Form::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_set(&self) -> Option<&FormSet> {
        match self {
            Form::Set(s) => Some(s),
            _ => None,
        }
    }
}

impl From<Token> for Form {
    fn from(t: Token) -> Form {
        Form::Token(t)
    }
}

impl From<ReaderError> for Form {
    fn from(e: ReaderError) -> Form {
        Form::ReaderError(e)
    }
}
