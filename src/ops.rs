//! Operation witnesses and the three generic dispatch families.
//!
//! Every family is a trait keyed by a part `P` and an operation witness `Op`
//! that carries the caller's function:
//!
//! | family        | witnesses                     | result          |
//! |---------------|-------------------------------|-----------------|
//! | [`Transform`] | [`Map`], [`Add`], [`Filter`]  | new value       |
//! | [`Reduce`]    | [`Acc`], [`Exists`]           | accumulator `B` |
//! | [`Partition`] | [`By`], [`ByFilter`]          | `BTreeMap<K, _>` |
//!
//! A domain implements a family once per (part, witness) pair it supports, and
//! the impl's bounds fix the shape of the function. A combination with no
//! impl is rejected by the compiler. The whole-value part [`SelfPart`] is
//! covered for every domain by the [`base`][crate::base] mix-in.
//!
//! ```
//! use abstract_domains::ops::{Acc, By, Filter, Map, Partition, Reduce, Transform};
//! use abstract_domains::set::SetDomain;
//!
//! type Ints = SetDomain<i32>;
//!
//! let v = Ints::of_list([1, 2, 3, 4]);
//! let doubled = v.transform(Ints::ELEMENT, Map(|x: &i32| x * 2));
//! assert_eq!(doubled.elements(), vec![2, 4, 6, 8]);
//!
//! let odd = v.transform(Ints::ELEMENT, Filter(|x: &i32| x % 2 == 1));
//! assert_eq!(odd.elements(), vec![1, 3]);
//!
//! let sum = v.reduce(Ints::ELEMENT, Acc(|x: &i32, acc: i32| acc + x), 0);
//! assert_eq!(sum, 10);
//!
//! let by_parity = v.partition(Ints::ELEMENT, By(|x: &i32| x % 2 == 0));
//! assert_eq!(by_parity[&true].elements(), vec![2, 4]);
//! ```
//!
//! [`SelfPart`]: crate::part::SelfPart

use std::collections::BTreeMap;

use crate::part::PartOf;

/// Replace the part by the function's result.
#[derive(Debug, Copy, Clone)]
pub struct Map<F>(pub F);

/// Insert the given payload into the part.
#[derive(Debug, Copy, Clone)]
pub struct Add<V>(pub V);

/// Keep the part only where the predicate holds.
#[derive(Debug, Copy, Clone)]
pub struct Filter<F>(pub F);

/// Fold the part into an accumulator.
#[derive(Debug, Copy, Clone)]
pub struct Acc<F>(pub F);

/// Short-circuiting disjunction over the part.
#[derive(Debug, Copy, Clone)]
pub struct Exists<F>(pub F);

/// Group the part by a total keying function.
#[derive(Debug, Copy, Clone)]
pub struct By<F>(pub F);

/// Group the part by a partial keying function. Payloads without a key are
/// dropped from every partition.
#[derive(Debug, Copy, Clone)]
pub struct ByFilter<F>(pub F);

/// Result of a [`Partition`]: one domain value per key.
pub type Partitions<K, D> = BTreeMap<K, D>;

/// Rebuild a value by applying `op` to the part `P`.
pub trait Transform<P: PartOf<Self>, Op>: Sized {
    fn transform(&self, part: P, op: Op) -> Self;
}

/// Collapse the part `P` into an accumulator of type `B`.
pub trait Reduce<P: PartOf<Self>, Op, B>: Sized {
    fn reduce(&self, part: P, using: Op, init: B) -> B;
}

/// Split a value into sub-values keyed by `K`, according to the part `P`.
pub trait Partition<P: PartOf<Self>, Op, K: Ord>: Sized {
    fn partition(&self, part: P, op: Op) -> Partitions<K, Self>;
}
