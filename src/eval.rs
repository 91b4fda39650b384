// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The boundary to whatever gives forms a meaning. This crate only
//! reads and prints; an `Evaluator` turns each read form into a value
//! of its own and that value back into a form for printing.

use crate::error::ReadError;
use crate::form::Form;
use crate::print::print_forms;
use crate::read::read_str;
use crate::settings::Settings;
use std::convert::Infallible;
use std::fmt::Display;

pub trait Evaluator {
    type Value;
    type Error: Display;

    fn eval(&mut self, form: &Form) -> Result<Self::Value, Self::Error>;

    /// Reconstruct a form from a computed value.
    fn to_form(&mut self, value: Self::Value) -> Form;
}

/// Gives back what it was given.
#[derive(Debug, Default, Clone, Copy)]
pub struct Identity;

impl Evaluator for Identity {
    type Value = Form;
    type Error = Infallible;

    fn eval(&mut self, form: &Form) -> Result<Form, Infallible> {
        Ok(form.clone())
    }

    fn to_form(&mut self, value: Form) -> Form {
        value
    }
}

/// Evaluate each form. Forms that failed to read are passed through
/// untouched; evaluation failures become error forms, so the output
/// has one form per input form.
pub fn eval_forms<E: Evaluator>(evaluator: &mut E, forms: Vec<Form>) -> Vec<Form> {
    forms.into_iter().map(|form| {
        if form.is_error() {
            return form
        }
        match evaluator.eval(&form) {
            Ok(value) => evaluator.to_form(value),
            Err(e) => ReadError::Evaluation(e.to_string()).without_token().into(),
        }
    }).collect()
}

/// Read, evaluate and print one chunk of input.
pub fn rep<E: Evaluator>(input: &str, evaluator: &mut E, settings: &Settings) -> String {
    let forms = read_str(input, settings.modes);
    print_forms(&eval_forms(evaluator, forms), settings.format)
}
