//! Set-based abstract domain.
//!
//! [`SetDomain<E>`] abstracts program facts as a finite set of [`Element`]s,
//! ordered by inclusion:
//!
//! - `⊥` is the empty set,
//! - `⊔` is union, `⊓` is intersection,
//! - `⊑` is the subset test,
//! - subtraction is set difference.
//!
//! Widening is plain join. This only terminates if the element universe has
//! bounded size; the domain does not check it, so a fixpoint driver using
//! this domain over an unbounded universe must enforce convergence itself.
//!
//! # Parts
//!
//! On top of the universal [`SelfPart`][crate::part::SelfPart], a set exposes:
//!
//! - [`ElementPart`]: one member at a time. Operations apply per member.
//! - [`SetPart`]: the sorted member list as a single unit. Operations apply
//!   once, to the whole list.
//!
//! ```
//! use abstract_domains::ops::{Filter, Transform};
//! use abstract_domains::set::SetDomain;
//!
//! type Ints = SetDomain<i32>;
//!
//! let v = Ints::of_list([1, 2, 3]);
//!
//! // Per member: keeps 2 and 3.
//! let big = v.transform(Ints::ELEMENT, Filter(|x: &i32| *x > 1));
//! assert_eq!(big.elements(), vec![2, 3]);
//!
//! // All or nothing: the list [1, 2, 3] is not longer than 5.
//! let long = v.transform(Ints::SET, Filter(|xs: &[i32]| xs.len() > 5));
//! assert!(long.is_empty());
//! ```
//!
//! # Sharing
//!
//! The members live behind an [`Arc`], so clones are cheap and values can be
//! shared across threads. Every lattice operator first checks whether its
//! operands are the same allocation, or trivially empty, and returns an input
//! unchanged when it can. These shortcuts never change a result.

use std::collections::btree_set;
use std::collections::BTreeSet;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use log::{debug, trace};

use crate::base::{self, BaseFragment};
use crate::domain::AbstractDomain;
use crate::element::Element;
use crate::ops::{Acc, Add, By, ByFilter, Exists, Filter, Map, Partition, Partitions, Reduce, Transform};
use crate::part::{Part, PartId, PartOf};

/// One member of a [`SetDomain<E>`].
pub struct ElementPart<E>(PhantomData<fn() -> E>);

/// The sorted member list of a [`SetDomain<E>`], taken as a whole.
pub struct SetPart<E>(PhantomData<fn() -> E>);

// Manual impls: derives would wrongly require `E: Copy`.
macro_rules! impl_marker {
    ($part:ident, $name:literal) => {
        impl<E> Clone for $part<E> {
            fn clone(&self) -> Self {
                *self
            }
        }

        impl<E> Copy for $part<E> {}

        impl<E> fmt::Debug for $part<E> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str($name)
            }
        }

        impl<E: Element> Part for $part<E> {
            const NAME: &'static str = $name;
        }
    };
}

impl_marker!(ElementPart, "Element");
impl_marker!(SetPart, "Set");

impl<E: Element> PartOf<SetDomain<E>> for ElementPart<E> {
    type Value = E;
}

impl<E: Element> PartOf<SetDomain<E>> for SetPart<E> {
    type Value = [E];
}

/// Creation fragment for [`SetDomain::create`][AbstractDomain::create].
#[derive(Debug, Clone, PartialEq)]
pub enum SetFragment<E: Element> {
    /// Unions the listed members in.
    Set(Vec<E>),
    /// Adds one member.
    Element(E),
    /// Handled by the base mix-in.
    Base(BaseFragment<SetDomain<E>>),
}

/// A finite, immutable set of elements.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SetDomain<E: Element> {
    set: Arc<BTreeSet<E>>,
}

impl<E: Element> SetDomain<E> {
    /// Addresses one member at a time.
    pub const ELEMENT: ElementPart<E> = ElementPart(PhantomData);

    /// Addresses the whole member list.
    pub const SET: SetPart<E> = SetPart(PhantomData);

    fn from_set(set: BTreeSet<E>) -> Self {
        SetDomain { set: Arc::new(set) }
    }

    /// A set with exactly one member.
    pub fn singleton(element: E) -> Self {
        Self::from_set(BTreeSet::from([element]))
    }

    /// A set of the given members. Duplicates collapse.
    pub fn of_list<I>(elements: I) -> Self
    where
        I: IntoIterator<Item = E>,
    {
        Self::from_set(elements.into_iter().collect())
    }

    /// Members in ascending order.
    pub fn elements(&self) -> Vec<E> {
        self.set.iter().cloned().collect()
    }

    /// Iterates over members in ascending order.
    pub fn iter(&self) -> btree_set::Iter<'_, E> {
        self.set.iter()
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    pub fn contains(&self, element: &E) -> bool {
        self.set.contains(element)
    }

    /// Returns a copy with `element` added.
    pub fn add(&self, element: E) -> Self {
        if self.set.contains(&element) {
            return self.clone();
        }
        let mut set = (*self.set).clone();
        set.insert(element);
        Self::from_set(set)
    }

    /// Returns a copy without `element`.
    pub fn remove(&self, element: &E) -> Self {
        if !self.set.contains(element) {
            return self.clone();
        }
        let mut set = (*self.set).clone();
        set.remove(element);
        Self::from_set(set)
    }

    /// Whether both values share one allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.set, &other.set)
    }

    /// Returns `self` if `set` has the same members, otherwise wraps `set`.
    ///
    /// Only valid when `set` is a subset of `self`.
    fn reuse_if_unchanged(&self, set: BTreeSet<E>) -> Self {
        if set.len() == self.set.len() {
            self.clone()
        } else {
            Self::from_set(set)
        }
    }
}

impl<E: Element> Default for SetDomain<E> {
    fn default() -> Self {
        Self::bottom()
    }
}

impl<E: Element> FromIterator<E> for SetDomain<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self::of_list(iter)
    }
}

impl<'a, E: Element> IntoIterator for &'a SetDomain<E> {
    type Item = &'a E;
    type IntoIter = btree_set::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<E: Element> fmt::Display for SetDomain<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, element) in self.set.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", element)?;
        }
        write!(f, "]")
    }
}

impl<E: Element> fmt::Debug for SetDomain<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::structure(), self)
    }
}

impl<E: Element> AbstractDomain for SetDomain<E> {
    type Fragment = SetFragment<E>;

    fn bottom() -> Self {
        Self::from_set(BTreeSet::new())
    }

    fn is_bottom(&self) -> bool {
        self.set.is_empty()
    }

    fn join(&self, other: &Self) -> Self {
        if self.ptr_eq(other) || other.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return other.clone();
        }
        let (big, small) = if self.len() >= other.len() { (self, other) } else { (other, self) };
        if small.set.is_subset(&big.set) {
            debug!("join: {} already covers {}", big, small);
            return big.clone();
        }
        let mut set = (*big.set).clone();
        set.extend(small.set.iter().cloned());
        Self::from_set(set)
    }

    fn meet(&self, other: &Self) -> Self {
        if self.ptr_eq(other) || self.is_empty() {
            return self.clone();
        }
        if other.is_empty() {
            return other.clone();
        }
        let set: BTreeSet<E> = self.set.intersection(&other.set).cloned().collect();
        self.reuse_if_unchanged(set)
    }

    fn widen(&self, iteration: usize, next: &Self) -> Self {
        trace!("widen(iteration = {}, prev = {}, next = {})", iteration, self, next);
        self.join(next)
    }

    fn less_or_equal(&self, right: &Self) -> bool {
        if self.ptr_eq(right) || self.is_empty() {
            return true;
        }
        if right.is_empty() {
            return false;
        }
        self.set.is_subset(&right.set)
    }

    fn subtract(&self, from: &Self) -> Self {
        if self.ptr_eq(from) {
            return Self::bottom();
        }
        if self.is_empty() || from.is_empty() {
            return from.clone();
        }
        let set: BTreeSet<E> = from.set.difference(&self.set).cloned().collect();
        from.reuse_if_unchanged(set)
    }

    fn visit_parts(visitor: &mut dyn FnMut(PartId)) {
        base::visit_parts(visitor);
        visitor(Self::ELEMENT.id());
        visitor(Self::SET.id());
    }

    fn structure() -> String {
        format!("Set({})", E::NAME)
    }

    fn part_name(part: PartId) -> String {
        if part == Self::ELEMENT.id() || part == Self::SET.id() {
            format!("{}.{}", Self::structure(), part.name())
        } else {
            base::part_name::<Self>(part)
        }
    }

    fn create<I>(fragments: I) -> Self
    where
        I: IntoIterator<Item = SetFragment<E>>,
    {
        fragments.into_iter().fold(Self::bottom(), |acc, fragment| {
            debug!("create: {:?} <- {:?}", acc, fragment);
            match fragment {
                SetFragment::Set(elements) => acc.join(&Self::of_list(elements)),
                SetFragment::Element(element) => acc.add(element),
                SetFragment::Base(fragment) => base::create(acc, fragment),
            }
        })
    }
}

// Element part: one member at a time.

impl<E, F> Transform<ElementPart<E>, Map<F>> for SetDomain<E>
where
    E: Element,
    F: FnMut(&E) -> E,
{
    fn transform(&self, _: ElementPart<E>, Map(f): Map<F>) -> Self {
        self.set.iter().map(f).collect()
    }
}

impl<E: Element> Transform<ElementPart<E>, Add<E>> for SetDomain<E> {
    fn transform(&self, _: ElementPart<E>, Add(element): Add<E>) -> Self {
        self.add(element)
    }
}

impl<E, F> Transform<ElementPart<E>, Filter<F>> for SetDomain<E>
where
    E: Element,
    F: FnMut(&E) -> bool,
{
    fn transform(&self, _: ElementPart<E>, Filter(mut f): Filter<F>) -> Self {
        let set: BTreeSet<E> = self.set.iter().filter(|&e| f(e)).cloned().collect();
        self.reuse_if_unchanged(set)
    }
}

impl<E, B, F> Reduce<ElementPart<E>, Acc<F>, B> for SetDomain<E>
where
    E: Element,
    F: FnMut(&E, B) -> B,
{
    fn reduce(&self, _: ElementPart<E>, Acc(mut f): Acc<F>, init: B) -> B {
        self.set.iter().fold(init, |acc, e| f(e, acc))
    }
}

impl<E, F> Reduce<ElementPart<E>, Exists<F>, bool> for SetDomain<E>
where
    E: Element,
    F: FnMut(&E) -> bool,
{
    fn reduce(&self, _: ElementPart<E>, Exists(f): Exists<F>, init: bool) -> bool {
        init || self.set.iter().any(f)
    }
}

impl<E, K, F> Partition<ElementPart<E>, By<F>, K> for SetDomain<E>
where
    E: Element,
    K: Ord,
    F: FnMut(&E) -> K,
{
    fn partition(&self, _: ElementPart<E>, By(mut f): By<F>) -> Partitions<K, Self> {
        group(self.set.iter().map(|e| (f(e), e.clone())))
    }
}

impl<E, K, F> Partition<ElementPart<E>, ByFilter<F>, K> for SetDomain<E>
where
    E: Element,
    K: Ord,
    F: FnMut(&E) -> Option<K>,
{
    fn partition(&self, _: ElementPart<E>, ByFilter(mut f): ByFilter<F>) -> Partitions<K, Self> {
        group(self.set.iter().filter_map(|e| f(e).map(|key| (key, e.clone()))))
    }
}

fn group<E, K, I>(pairs: I) -> Partitions<K, SetDomain<E>>
where
    E: Element,
    K: Ord,
    I: IntoIterator<Item = (K, E)>,
{
    let mut groups: Partitions<K, BTreeSet<E>> = Partitions::new();
    for (key, element) in pairs {
        groups.entry(key).or_default().insert(element);
    }
    groups.into_iter().map(|(key, set)| (key, SetDomain::from_set(set))).collect()
}

// Set part: the member list as one unit.

impl<E, F> Transform<SetPart<E>, Map<F>> for SetDomain<E>
where
    E: Element,
    F: FnOnce(&[E]) -> Vec<E>,
{
    fn transform(&self, _: SetPart<E>, Map(f): Map<F>) -> Self {
        Self::of_list(f(&self.elements()))
    }
}

impl<E: Element> Transform<SetPart<E>, Add<Vec<E>>> for SetDomain<E> {
    fn transform(&self, _: SetPart<E>, Add(elements): Add<Vec<E>>) -> Self {
        self.join(&Self::of_list(elements))
    }
}

impl<E, F> Transform<SetPart<E>, Filter<F>> for SetDomain<E>
where
    E: Element,
    F: FnOnce(&[E]) -> bool,
{
    fn transform(&self, _: SetPart<E>, Filter(f): Filter<F>) -> Self {
        if f(&self.elements()) {
            self.clone()
        } else {
            Self::bottom()
        }
    }
}

impl<E, B, F> Reduce<SetPart<E>, Acc<F>, B> for SetDomain<E>
where
    E: Element,
    F: FnOnce(&[E], B) -> B,
{
    fn reduce(&self, _: SetPart<E>, Acc(f): Acc<F>, init: B) -> B {
        f(&self.elements(), init)
    }
}

impl<E, F> Reduce<SetPart<E>, Exists<F>, bool> for SetDomain<E>
where
    E: Element,
    F: FnOnce(&[E]) -> bool,
{
    fn reduce(&self, _: SetPart<E>, Exists(f): Exists<F>, init: bool) -> bool {
        init || f(&self.elements())
    }
}

impl<E, K, F> Partition<SetPart<E>, By<F>, K> for SetDomain<E>
where
    E: Element,
    K: Ord,
    F: FnOnce(&[E]) -> K,
{
    fn partition(&self, _: SetPart<E>, By(f): By<F>) -> Partitions<K, Self> {
        Partitions::from([(f(&self.elements()), self.clone())])
    }
}

impl<E, K, F> Partition<SetPart<E>, ByFilter<F>, K> for SetDomain<E>
where
    E: Element,
    K: Ord,
    F: FnOnce(&[E]) -> Option<K>,
{
    fn partition(&self, _: SetPart<E>, ByFilter(f): ByFilter<F>) -> Partitions<K, Self> {
        f(&self.elements()).map(|key| (key, self.clone())).into_iter().collect()
    }
}
