// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Errors found while reading. These are not returned via `Err`,
//! they end up inside the form tree as
//! [Form::ReaderError](crate::form::Form::ReaderError), so that reading
//! always produces a result for every top-level form.

use crate::pos::Pos;
use crate::token::Token;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReadError {
    #[error("Unmatched delimiter: {0}")]
    UnmatchedDelimiter(char),
    #[error("EOF: no {0} found")]
    UnterminatedCollection(char),
    #[error("EOF: unbalanced quote")]
    UnterminatedString,
    #[error("Map must contain even number of forms")]
    MalformedMap,
    #[error("EOF: Nothing found after quote")]
    MissingQuotedForm,
    #[error("EOF: Nothing found after ^")]
    MissingMetadata,
    #[error("EOF: Nothing found after metadata")]
    MissingMetaTarget,
    #[error("nesting too deep")]
    NestingTooDeep,
    /// A failure reported by an evaluator, see [eval](crate::eval).
    #[error("{0}")]
    Evaluation(String),
}

/// A [ReadError] with the token that caused it, if there is one.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
#[error("{err}")]
pub struct ReaderError {
    pub err: ReadError,
    pub token: Option<Token>,
}

impl ReadError {
    pub fn at(self, token: &Token) -> ReaderError {
        ReaderError {
            err: self,
            token: Some(token.clone()),
        }
    }

    pub fn without_token(self) -> ReaderError {
        ReaderError {
            err: self,
            token: None,
        }
    }
}

impl ReaderError {
    pub fn message(&self) -> String {
        self.err.to_string()
    }

    pub fn pos(&self) -> Option<Pos> {
        self.token.as_ref().map(|t| t.pos)
    }
}
