// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Settings for both reading (parsing) and writing (serializing)
//! forms.

/// Influences how forms are written out.
#[derive(Debug)]
pub struct Format {
    /// Number of digits after the decimal point for floats; floats
    /// are always written in fixed notation.
    pub float_precision: usize,
}

pub const DEFAULT_FORMAT : Format = Format {
    float_precision: 6,
};

/// Influences how token sequences are read into forms.
#[derive(Debug)]
pub struct Modes {
    /// How many collections and reader macro prefixes may be nested
    /// inside each other before reading gives up on the form with a
    /// "nesting too deep" error.
    pub depth_fuel: u32,
}

pub const DEFAULT_MODES : Modes = Modes {
    depth_fuel: 500,
};

#[derive(Debug)]
pub struct Settings<'t> {
    pub format: &'t Format,
    pub modes: &'t Modes,
}

pub const DEFAULT_SETTINGS : Settings<'static> = Settings {
    format: &DEFAULT_FORMAT,
    modes: &DEFAULT_MODES,
};
