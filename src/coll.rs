// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Turning the children collected between an open and its close
//! delimiter into the final collection form.

use crate::error::ReadError;
use crate::form::{Collkind, Form};
use crate::hash::{FormMap, FormSet};
use crate::token::Token;
use std::rc::Rc;

/// `opener` is the open delimiter token, used as the offending token
/// if the children don't fit the collection kind.
pub fn build(kind: Collkind, forms: Vec<Form>, opener: &Token) -> Form {
    match kind {
        Collkind::List => Form::List(forms),
        Collkind::Vector => Form::Vector(forms),
        Collkind::Map => {
            if forms.len() % 2 != 0 {
                return ReadError::MalformedMap.at(opener).into()
            }
            let mut it = forms.into_iter();
            let mut pairs = Vec::new();
            while let (Some(k), Some(v)) = (it.next(), it.next()) {
                pairs.push((k, v));
            }
            Form::Map(Rc::new(FormMap::from_pairs(pairs)))
        }
        Collkind::Set => Form::Set(Rc::new(FormSet::from_forms(forms))),
    }
}
