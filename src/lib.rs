// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Reader and printer for a Clojure flavoured Lisp notation: symbols,
//! integers and floats, strings, booleans, lists, vectors, maps, sets,
//! and the reader macros `'`, `` ` ``, `~`, `~@`, `@` and `^`.
//!
//! * `zachlisp::token` turns text into a flat token sequence,
//!   `zachlisp::read` builds a tree of [Form](form::Form)s from that,
//!   `zachlisp::print` turns forms back into text.
//!
//! * Reading never fails. Malformed input becomes a
//!   [ReaderError](form::Form::ReaderError) form in place of the
//!   top-level form it occurred in, and reading goes on with the next
//!   one.
//!
//! * Maps and sets compare and hash structurally, independent of
//!   element order, so they can themselves be map keys or set
//!   elements.
//!
//! * Giving forms a meaning is left to an
//!   [Evaluator](eval::Evaluator); [eval::rep] runs read, evaluate and
//!   print over a chunk of input.
//!
//! ```
//! use zachlisp::read::read_str;
//! use zachlisp::settings::DEFAULT_MODES;
//!
//! let forms = read_str("#{1 2 3} #{3 2 1} 'a", &DEFAULT_MODES);
//! assert_eq!(forms[0], forms[1]);
//! assert_eq!(forms[2].to_string(), "(quote a)");
//! ```

pub mod coll;
pub mod context;
pub mod error;
pub mod eval;
pub mod form;
pub mod hash;
pub mod pos;
pub mod print;
pub mod read;
pub mod settings;
pub mod token;

#[cfg(test)]
mod tests;
