// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Structural hashing and equality of forms, and the map and set
//! types that depend on them.
//!
//! Lists and vectors hash their children in order. Maps and sets
//! hash each element (or key/value pair) on its own, sort those
//! hashes, and hash the sorted sequence, so the result does not
//! depend on the order the elements were read in.
//!
//! Hashes only ever serve to narrow down candidates: two maps or
//! sets are equal when they have the same size and every element of
//! one has a structurally equal counterpart in the other. Colliding
//! hashes therefore never make different forms compare equal.

use crate::form::Form;
use indexmap::{IndexMap, IndexSet};
use std::collections::hash_map::DefaultHasher;
use std::hash::{BuildHasher, BuildHasherDefault, Hash, Hasher};
use std::rc::Rc;

/// Hasher used for the elements of maps and sets read from text.
/// `DefaultHasher::default()` uses fixed keys, so equal forms hash
/// the same in every map.
pub type FormHasher = BuildHasherDefault<DefaultHasher>;

fn hash_with<S: BuildHasher, T: Hash + ?Sized>(build: &S, x: &T) -> u64 {
    let mut h = build.build_hasher();
    x.hash(&mut h);
    h.finish()
}

/// Deterministic structural hash of a form.
pub fn structural_hash(form: &Form) -> u64 {
    hash_with(&FormHasher::default(), form)
}

fn combine_sorted(tag: u8, mut hashes: Vec<u64>) -> u64 {
    hashes.sort_unstable();
    let mut h = DefaultHasher::new();
    tag.hash(&mut h);
    hashes.hash(&mut h);
    h.finish()
}

impl Hash for Form {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Form::ReaderError(e) => e.hash(state),
            Form::Token(t) => t.hash(state),
            Form::List(v) | Form::Vector(v) => v.hash(state),
            Form::Map(m) => m.hash.hash(state),
            Form::Set(s) => s.hash.hash(state),
        }
    }
}

impl PartialEq for Form {
    fn eq(&self, other: &Form) -> bool {
        match (self, other) {
            (Form::ReaderError(a), Form::ReaderError(b)) => a == b,
            (Form::Token(a), Form::Token(b)) => a == b,
            (Form::List(a), Form::List(b)) => a == b,
            (Form::Vector(a), Form::Vector(b)) => a == b,
            (Form::Map(a), Form::Map(b)) => Rc::ptr_eq(a, b) || a == b,
            (Form::Set(a), Form::Set(b)) => Rc::ptr_eq(a, b) || a == b,
            _ => false,
        }
    }
}

impl Eq for Form {}


/// Map in insertion order. A key keeps the position of its first
/// occurrence and gets the value of its last one.
#[derive(Clone)]
pub struct FormMap<S = FormHasher> {
    entries: IndexMap<Form, Form, S>,
    /// Order independent hash over all entries, computed once.
    hash: u64,
}

impl FormMap {
    pub fn from_pairs(pairs: impl IntoIterator<Item = (Form, Form)>) -> FormMap {
        pairs.into_iter().collect()
    }
}

impl<S: BuildHasher + Default> FromIterator<(Form, Form)> for FormMap<S> {
    fn from_iter<I: IntoIterator<Item = (Form, Form)>>(pairs: I) -> Self {
        let mut entries = IndexMap::with_hasher(S::default());
        for (k, v) in pairs {
            entries.insert(k, v);
        }
        let hash = combine_sorted(
            b'm',
            entries.iter().map(|kv| hash_with(entries.hasher(), &kv)).collect());
        FormMap { entries, hash }
    }
}

impl<S: BuildHasher> FormMap<S> {
    pub fn get(&self, key: &Form) -> Option<&Form> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &Form) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Form, &Form)> {
        self.entries.iter()
    }
}

impl<S: BuildHasher> PartialEq for FormMap<S> {
    fn eq(&self, other: &FormMap<S>) -> bool {
        self.len() == other.len()
            && self.hash == other.hash
            && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<S: BuildHasher> Eq for FormMap<S> {}

impl<S> std::fmt::Debug for FormMap<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}


/// Set in insertion order. The first of several equal forms is the
/// one kept.
#[derive(Clone)]
pub struct FormSet<S = FormHasher> {
    items: IndexSet<Form, S>,
    hash: u64,
}

impl FormSet {
    pub fn from_forms(forms: impl IntoIterator<Item = Form>) -> FormSet {
        forms.into_iter().collect()
    }
}

impl<S: BuildHasher + Default> FromIterator<Form> for FormSet<S> {
    fn from_iter<I: IntoIterator<Item = Form>>(forms: I) -> Self {
        let mut items = IndexSet::with_hasher(S::default());
        for f in forms {
            items.insert(f);
        }
        let hash = combine_sorted(
            b's',
            items.iter().map(|f| hash_with(items.hasher(), f)).collect());
        FormSet { items, hash }
    }
}

impl<S: BuildHasher> FormSet<S> {
    pub fn contains(&self, form: &Form) -> bool {
        self.items.contains(form)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Form> {
        self.items.iter()
    }
}

impl<S: BuildHasher> PartialEq for FormSet<S> {
    fn eq(&self, other: &FormSet<S>) -> bool {
        self.len() == other.len()
            && self.hash == other.hash
            && self.iter().all(|f| other.contains(f))
    }
}

impl<S: BuildHasher> Eq for FormSet<S> {}

impl<S> std::fmt::Debug for FormSet<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.items.iter()).finish()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    /// Every form hashes to 0.
    #[derive(Clone, Default)]
    struct Colliding;

    struct Zero;

    impl Hasher for Zero {
        fn finish(&self) -> u64 {
            0
        }
        fn write(&mut self, _: &[u8]) {}
    }

    impl BuildHasher for Colliding {
        type Hasher = Zero;
        fn build_hasher(&self) -> Zero {
            Zero
        }
    }

    fn n(i: i64) -> Form {
        Form::long(i)
    }

    fn colliding_set(forms: Vec<Form>) -> FormSet<Colliding> {
        forms.into_iter().collect()
    }

    fn colliding_map(pairs: Vec<(Form, Form)>) -> FormMap<Colliding> {
        pairs.into_iter().collect()
    }

    #[test]
    fn set_order_does_not_matter() {
        let a = FormSet::from_forms(vec![n(1), n(2), n(3)]);
        let b = FormSet::from_forms(vec![n(3), n(1), n(2)]);
        assert_eq!(a, b);
        assert_eq!(structural_hash(&Form::Set(Rc::new(a))),
                   structural_hash(&Form::Set(Rc::new(b))));
    }

    #[test]
    fn set_keeps_first_of_duplicates() {
        let s = FormSet::from_forms(vec![n(2), n(1), n(2)]);
        assert_eq!(s.iter().cloned().collect::<Vec<_>>(), vec![n(2), n(1)]);
    }

    #[test]
    fn map_last_write_wins() {
        let m = FormMap::from_pairs(vec![
            (Form::symbol(":a"), n(1)),
            (Form::symbol(":b"), n(5)),
            (Form::symbol(":a"), n(2)),
        ]);
        assert_eq!(m.len(), 2);
        assert_eq!(m.get(&Form::symbol(":a")), Some(&n(2)));
        assert!(m.contains_key(&Form::symbol(":b")));
        assert!(!m.contains_key(&n(5)));
        assert_eq!(m.iter().next().map(|(k, _)| k.clone()),
                   Some(Form::symbol(":a")));
    }

    #[test]
    fn empty_collections() {
        let m = FormMap::from_pairs(vec![]);
        assert!(m.is_empty());
        assert!(!m.contains_key(&n(1)));
        assert!(!FormMap::from_pairs(vec![(n(1), n(2))]).is_empty());
        let s = FormSet::from_forms(vec![]);
        assert!(s.is_empty());
        assert!(!FormSet::from_forms(vec![n(1)]).is_empty());
        assert_ne!(Form::Map(Rc::new(m)), Form::Set(Rc::new(s)));
    }

    #[test]
    fn nested_sets_as_elements() {
        let inner1 = Form::Set(Rc::new(FormSet::from_forms(vec![n(1), n(2)])));
        let inner2 = Form::Set(Rc::new(FormSet::from_forms(vec![n(2), n(1)])));
        let outer = FormSet::from_forms(vec![inner1, inner2]);
        assert_eq!(outer.len(), 1);
    }

    #[test]
    fn map_as_key() {
        let k1 = Form::Map(Rc::new(FormMap::from_pairs(vec![(n(1), n(2)), (n(3), n(4))])));
        let k2 = Form::Map(Rc::new(FormMap::from_pairs(vec![(n(3), n(4)), (n(1), n(2))])));
        let m = FormMap::from_pairs(vec![(k1, n(10)), (k2.clone(), n(20))]);
        assert_eq!(m.len(), 1);
        assert_eq!(m.get(&k2), Some(&n(20)));
    }

    #[test]
    fn sets_equal_hash_but_different_content() {
        let a = colliding_set(vec![n(1), n(2)]);
        let b = colliding_set(vec![n(3), n(4)]);
        assert_eq!(a.hash, b.hash);
        assert_ne!(a, b);
        let c = colliding_set(vec![n(2), n(1)]);
        assert_eq!(a, c);
    }

    #[test]
    fn colliding_elements_are_not_merged() {
        let s = colliding_set(vec![n(1), n(2), n(1), n(3)]);
        assert_eq!(s.len(), 3);
        assert!(s.contains(&n(3)));
        assert!(!s.contains(&n(4)));
    }

    #[test]
    fn maps_equal_hash_but_different_content() {
        let a = colliding_map(vec![(n(1), n(2))]);
        let b = colliding_map(vec![(n(1), n(3))]);
        let c = colliding_map(vec![(n(5), n(2))]);
        assert_eq!(a.hash, b.hash);
        assert_ne!(a, b);
        assert_ne!(a, c);
        let m = colliding_map(vec![(n(1), n(1)), (n(2), n(2)), (n(1), n(9))]);
        assert_eq!(m.len(), 2);
        assert_eq!(m.get(&n(1)), Some(&n(9)));
        assert_eq!(m.get(&n(3)), None);
    }

    #[test]
    fn list_and_vector_differ() {
        assert_ne!(Form::List(vec![n(1)]), Form::Vector(vec![n(1)]));
        assert_ne!(Form::List(vec![n(1), n(2)]), Form::List(vec![n(2), n(1)]));
    }

    #[test]
    fn position_is_ignored() {
        use crate::pos::Pos;
        use crate::token::Token;
        let a = Form::Token(Token::symbol("x", Pos { line: 1, col: 1 }));
        let b = Form::Token(Token::symbol("x", Pos { line: 7, col: 40 }));
        assert_eq!(a, b);
        assert_eq!(structural_hash(&a), structural_hash(&b));
    }
}
