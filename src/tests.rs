//! Round trip checks on `Form` using quickcheck: printing a form and
//! reading the text back has to give an equal form with an equal
//! hash. Floats are picked so the fixed six digit output is exact.

use quickcheck::{Arbitrary, Gen, QuickCheck};
use quickcheck_macros::quickcheck;

use std::rc::Rc;

use crate::form::Form;
use crate::hash::{structural_hash, FormMap, FormSet};
use crate::pos::Pos;
use crate::print::pr_str;
use crate::read::read_str;
use crate::settings::{DEFAULT_FORMAT, DEFAULT_MODES};
use crate::token::{Kind, Scalar, Token};

enum FormKind {
    Long,
    Double,
    Bool,
    Symbol,
    String,
    List,
    Vector,
    Map,
    Set,
}

fn scalar(value: Scalar, kind: Kind) -> Form {
    Form::Token(Token::new(value, kind, Pos::default()))
}

fn gen_children(g: &mut Gen, depth: usize) -> Vec<Form> {
    let n = usize::arbitrary(g) % (g.size() + 1);
    (0..n).map(|_| gen_form(g, depth + 1)).collect()
}

fn gen_form(g: &mut Gen, depth: usize) -> Form {
    use FormKind::*;
    let choices = if depth >= g.size() {
        &[Long, Double, Bool, Symbol, String] as &[FormKind]
    } else {
        &[Long, Double, Bool, Symbol, String, List, Vector, Map, Set]
    };
    match g.choose(choices).unwrap() {
        Long => {
            let n: u32 = Arbitrary::arbitrary(g);
            Form::long(n.into())
        }
        Double => {
            let x = *g.choose(&[0.0, 0.5, 1.25, 3.0, 100.125]).unwrap();
            scalar(Scalar::Double(x), Kind::Number)
        }
        Bool => scalar(Scalar::Bool(Arbitrary::arbitrary(g)), Kind::Symbol),
        Symbol => {
            let choices = ["foo", "a-symbol", ":kw", "+", "-foo", "a@b", "nil", "#x"];
            Form::symbol(g.choose(&choices).unwrap())
        }
        String => {
            let choices = ["", "foo", "a b", "x\\\"y", "(not a list)", "; no comment"];
            Form::string(g.choose(&choices).unwrap())
        }
        List => Form::List(gen_children(g, depth)),
        Vector => Form::Vector(gen_children(g, depth)),
        Map => {
            let keys = gen_children(g, depth);
            let pairs: Vec<(Form, Form)> = keys.into_iter()
                .map(|k| (k, gen_form(g, depth + 1)))
                .collect();
            Form::Map(Rc::new(FormMap::from_pairs(pairs)))
        }
        Set => Form::Set(Rc::new(FormSet::from_forms(gen_children(g, depth)))),
    }
}

impl Arbitrary for Form {
    fn arbitrary(g: &mut Gen) -> Self {
        gen_form(g, 0)
    }
}

#[test]
fn print_read_roundtrip() {
    fn prop(input: Form) -> bool {
        let text = pr_str(&input, &DEFAULT_FORMAT);
        let output = read_str(&text, &DEFAULT_MODES);
        output.len() == 1
            && output[0] == input
            && structural_hash(&output[0]) == structural_hash(&input)
    }
    QuickCheck::new()
        .tests(1000)
        .max_tests(2000)
        .gen(Gen::new(4))
        .quickcheck(prop as fn(Form) -> bool);
}

#[quickcheck]
fn set_order_independent(xs: Vec<u32>) -> bool {
    let forward: Vec<String> = xs.iter().map(|x| x.to_string()).collect();
    let backward: Vec<String> = forward.iter().rev().cloned().collect();
    let a = read_str(&format!("#{{{}}}", forward.join(" ")), &DEFAULT_MODES);
    let b = read_str(&format!("#{{{}}}", backward.join(",")), &DEFAULT_MODES);
    a == b && structural_hash(&a[0]) == structural_hash(&b[0])
}

#[quickcheck]
fn nesting_never_crashes(depth: u16) -> bool {
    let depth = depth as usize;
    let input = format!("{}x{} 1", "(".repeat(depth), ")".repeat(depth));
    let forms = read_str(&input, &DEFAULT_MODES);
    let last_is_one = forms.len() == 2 && forms[1] == Form::long(1);
    if depth <= DEFAULT_MODES.depth_fuel as usize {
        last_is_one && !forms[0].is_error()
    } else {
        last_is_one && forms[0].as_error().map(|e| e.message())
            == Some("nesting too deep".to_string())
    }
}

#[quickcheck]
fn quote_chains_never_crash(depth: u16) -> bool {
    let depth = depth as usize;
    let input = format!("{}x 1", "'".repeat(depth));
    let forms = read_str(&input, &DEFAULT_MODES);
    forms.len() == 2
        && forms[1] == Form::long(1)
        && forms[0].is_error() == (depth > DEFAULT_MODES.depth_fuel as usize)
}
