//! The abstract-domain protocol.
//!
//! An abstract domain is a lattice of immutable values that over-approximate
//! program facts. A fixpoint driver combines values from different program
//! points with [`join`][AbstractDomain::join] and
//! [`widen`][AbstractDomain::widen] until nothing changes; generic client
//! passes query and rebuild values through the dispatch families in
//! [`ops`][crate::ops] without knowing the concrete representation.
//!
//! # Lattice laws
//!
//! Every implementation must satisfy, for all `a`, `b`, `c`:
//!
//! - `join` and `meet` are commutative, associative and idempotent.
//! - `a.less_or_equal(b)` iff `a.join(b) == b`.
//! - `bottom()` is the unique least element, and `is_bottom` holds exactly
//!   for values equal to it.
//! - `prev.widen(i, next)` is an upper bound of both `prev` and `next`, and
//!   any sequence of widenings stabilizes.
//! - `a.subtract(a) == bottom()`.
//!
//! Values are never updated in place. Every operation returns a new value, or
//! one of its inputs when the result is provably identical to it.

use std::fmt;

use crate::ops::{Acc, Exists, Reduce};
use crate::part::{PartId, PartOf};

/// Abstract domain interface.
pub trait AbstractDomain: Clone + PartialEq + fmt::Debug + fmt::Display + Sized + 'static {
    /// A tagged fragment accepted by [`create`][AbstractDomain::create].
    type Fragment;

    /// The least element (⊥).
    fn bottom() -> Self;

    /// Check if the value is bottom.
    fn is_bottom(&self) -> bool;

    /// Join (`⊔`): least upper bound.
    fn join(&self, other: &Self) -> Self;

    /// Meet (`⊓`): greatest lower bound.
    fn meet(&self, other: &Self) -> Self;

    /// Widening (`∇`) of `self` (the previous iterate) with `next`.
    ///
    /// `iteration` is the fixpoint iteration count, so a domain may extrapolate
    /// more aggressively the longer a loop runs.
    fn widen(&self, iteration: usize, next: &Self) -> Self;

    /// Partial order: `self ⊑ right`.
    fn less_or_equal(&self, right: &Self) -> bool;

    /// Removes the information in `self` from `from`.
    ///
    /// Returns the greatest value whose join with `self` does not exceed
    /// `from` on the removed facts.
    fn subtract(&self, from: &Self) -> Self;

    /// Human-readable rendering.
    fn show(&self) -> String {
        self.to_string()
    }

    /// Writes [`show`][AbstractDomain::show] into `out`.
    fn pp(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        out.write_str(&self.show())
    }

    /// Reports every part this domain supports to `visitor`.
    fn visit_parts(visitor: &mut dyn FnMut(PartId));

    /// Short label describing the domain's structure, e.g. `Set(Taint)`.
    fn structure() -> String;

    /// Qualified label of one part, e.g. `Set(Taint).Element`.
    ///
    /// # Panics
    ///
    /// Panics if the domain does not support `part`.
    fn part_name(part: PartId) -> String;

    /// Builds a value from tagged fragments, folded left to right starting
    /// from [`bottom`][AbstractDomain::bottom].
    fn create<I>(fragments: I) -> Self
    where
        I: IntoIterator<Item = Self::Fragment>;

    /// Collects [`visit_parts`][AbstractDomain::visit_parts] into a vector.
    fn parts() -> Vec<PartId> {
        let mut parts = Vec::new();
        Self::visit_parts(&mut |part| parts.push(part));
        parts
    }

    /// Join multiple values.
    fn join_many<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        values.into_iter().fold(Self::bottom(), |acc, v| acc.join(&v))
    }

    /// Folds `f` over the part. Shorthand for reducing with [`Acc`].
    fn fold<P, B, F>(&self, part: P, init: B, f: F) -> B
    where
        P: PartOf<Self>,
        F: FnMut(&P::Value, B) -> B,
        Self: Reduce<P, Acc<F>, B>,
    {
        self.reduce(part, Acc(f), init)
    }

    /// Checks whether the predicate holds somewhere in the part. Shorthand for
    /// reducing with [`Exists`] from `false`.
    fn exists<P, F>(&self, part: P, f: F) -> bool
    where
        P: PartOf<Self>,
        F: FnMut(&P::Value) -> bool,
        Self: Reduce<P, Exists<F>, bool>,
    {
        self.reduce(part, Exists(f), false)
    }
}
