//! Base mix-in: the whole-value part, shared by every domain.
//!
//! The dispatch families are implemented here once, for [`SelfPart`] on every
//! [`AbstractDomain`], so a concrete domain only writes impls for the parts it
//! introduces itself:
//!
//! | operation         | result                                      |
//! |-------------------|---------------------------------------------|
//! | `Map(f)`          | `f(v)`                                      |
//! | `Add(w)`          | `v ⊔ w`                                     |
//! | `Filter(p)`       | `v` if `p(v)`, else `⊥`                      |
//! | `Acc(f)`, `init`  | `f(v, init)`                                |
//! | `Exists(p)`, `init` | `init || p(v)`                            |
//! | `By(f)`           | `{ f(v) → v }`                              |
//! | `ByFilter(f)`     | `{ k → v }` if `f(v) = Some(k)`, else `{}`  |
//!
//! The free functions [`visit_parts`], [`part_name`] and [`create`] are the
//! tail of each domain's introspection and creation chain: a domain handles
//! its own parts and fragments, hands everything else to these, and they in
//! turn only know [`SelfPart`]. Anything left over is a broken contract
//! between a domain and its callers, reported through [`contract_violation`].

use std::fmt;

use log::error;

use crate::domain::AbstractDomain;
use crate::ops::{Acc, Add, By, ByFilter, Exists, Filter, Map, Partition, Partitions, Reduce, Transform};
use crate::part::{Part, PartId, SelfPart};

/// Creation fragment for the whole-value part.
#[derive(Debug, Clone, PartialEq)]
pub enum BaseFragment<D> {
    /// Joined into the value under construction.
    Whole(D),
}

/// Reports the parts every domain supports.
pub fn visit_parts(visitor: &mut dyn FnMut(PartId)) {
    visitor(SelfPart.id());
}

/// Names the parts every domain supports, as `<structure>.Self`.
///
/// # Panics
///
/// Panics with a contract violation for any other part.
#[track_caller]
pub fn part_name<D: AbstractDomain>(part: PartId) -> String {
    let structure = D::structure();
    if part.is::<SelfPart>() {
        format!("{}.{}", structure, SelfPart::NAME)
    } else {
        contract_violation(&structure, format_args!("unknown part `{}`", part))
    }
}

/// Applies one whole-value fragment to the value under construction.
pub fn create<D: AbstractDomain>(acc: D, fragment: BaseFragment<D>) -> D {
    match fragment {
        BaseFragment::Whole(value) => acc.join(&value),
    }
}

/// Aborts on a part or operation that a domain failed to support.
///
/// This is an internal programming error, never a user-facing failure.
#[track_caller]
pub fn contract_violation(domain: &str, detail: fmt::Arguments<'_>) -> ! {
    error!("{}: contract violation: {}", domain, detail);
    panic!("{}: contract violation: {}", domain, detail)
}

impl<D, F> Transform<SelfPart, Map<F>> for D
where
    D: AbstractDomain,
    F: FnOnce(&D) -> D,
{
    fn transform(&self, _: SelfPart, Map(f): Map<F>) -> D {
        f(self)
    }
}

impl<D> Transform<SelfPart, Add<D>> for D
where
    D: AbstractDomain,
{
    fn transform(&self, _: SelfPart, Add(value): Add<D>) -> D {
        self.join(&value)
    }
}

impl<D, F> Transform<SelfPart, Filter<F>> for D
where
    D: AbstractDomain,
    F: FnOnce(&D) -> bool,
{
    fn transform(&self, _: SelfPart, Filter(f): Filter<F>) -> D {
        if f(self) {
            self.clone()
        } else {
            D::bottom()
        }
    }
}

impl<D, B, F> Reduce<SelfPart, Acc<F>, B> for D
where
    D: AbstractDomain,
    F: FnOnce(&D, B) -> B,
{
    fn reduce(&self, _: SelfPart, Acc(f): Acc<F>, init: B) -> B {
        f(self, init)
    }
}

impl<D, F> Reduce<SelfPart, Exists<F>, bool> for D
where
    D: AbstractDomain,
    F: FnOnce(&D) -> bool,
{
    fn reduce(&self, _: SelfPart, Exists(f): Exists<F>, init: bool) -> bool {
        init || f(self)
    }
}

impl<D, K, F> Partition<SelfPart, By<F>, K> for D
where
    D: AbstractDomain,
    K: Ord,
    F: FnOnce(&D) -> K,
{
    fn partition(&self, _: SelfPart, By(f): By<F>) -> Partitions<K, D> {
        Partitions::from([(f(self), self.clone())])
    }
}

impl<D, K, F> Partition<SelfPart, ByFilter<F>, K> for D
where
    D: AbstractDomain,
    K: Ord,
    F: FnOnce(&D) -> Option<K>,
{
    fn partition(&self, _: SelfPart, ByFilter(f): ByFilter<F>) -> Partitions<K, D> {
        let mut partitions = Partitions::new();
        if let Some(key) = f(self) {
            partitions.insert(key, self.clone());
        }
        partitions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::set::SetDomain;

    use test_log::test;

    type Ints = SetDomain<i32>;

    #[derive(Debug, Copy, Clone)]
    struct Unknown;

    impl Part for Unknown {
        const NAME: &'static str = "Unknown";
    }

    #[test]
    fn test_self_map() {
        let v = Ints::of_list([1, 2]);
        let res = v.transform(SelfPart, Map(|d: &Ints| d.add(7)));
        assert_eq!(res, Ints::of_list([1, 2, 7]));
    }

    #[test]
    fn test_self_add() {
        let v = Ints::of_list([1, 2]);
        let res = v.transform(SelfPart, Add(Ints::of_list([2, 3])));
        assert_eq!(res, Ints::of_list([1, 2, 3]));
    }

    #[test]
    fn test_self_filter() {
        let v = Ints::of_list([1, 2]);
        let kept = v.transform(SelfPart, Filter(|d: &Ints| d.len() == 2));
        assert_eq!(kept, v);
        let dropped = v.transform(SelfPart, Filter(|d: &Ints| d.len() > 2));
        assert!(dropped.is_bottom());
    }

    #[test]
    fn test_self_reduce() {
        let v = Ints::of_list([1, 2, 3]);
        let total = v.reduce(SelfPart, Acc(|d: &Ints, acc: usize| acc + d.len()), 10);
        assert_eq!(total, 13);

        assert!(v.reduce(SelfPart, Exists(|d: &Ints| d.contains(&3)), false));
        assert!(!v.reduce(SelfPart, Exists(|d: &Ints| d.contains(&4)), false));
    }

    #[test]
    fn test_self_exists_short_circuits() {
        let v = Ints::of_list([1]);
        let res = v.reduce(SelfPart, Exists(|_: &Ints| -> bool { panic!("predicate evaluated") }), true);
        assert!(res);
    }

    #[test]
    fn test_self_partition() {
        let v = Ints::of_list([1, 2, 3]);
        let by = v.partition(SelfPart, By(|d: &Ints| d.len()));
        assert_eq!(by.len(), 1);
        assert_eq!(by[&3], v);

        let none = v.partition(SelfPart, ByFilter(|_: &Ints| None::<u8>));
        assert!(none.is_empty());
        let some = v.partition(SelfPart, ByFilter(|d: &Ints| d.iter().next().copied()));
        assert_eq!(some[&1], v);
    }

    #[test]
    fn test_create_whole_joins() {
        let acc = Ints::of_list([1]);
        let res = create(acc, BaseFragment::Whole(Ints::of_list([2])));
        assert_eq!(res, Ints::of_list([1, 2]));
    }

    #[test]
    fn test_part_name_self() {
        assert_eq!(part_name::<Ints>(SelfPart.id()), "Set(i32).Self");
    }

    #[test]
    #[should_panic(expected = "contract violation")]
    fn test_part_name_unknown() {
        part_name::<Ints>(Unknown.id());
    }
}
