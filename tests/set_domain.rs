//! Lattice laws and generic dispatch of the set domain, through the public API
//! only, with a caller-defined element type.

use std::fmt;

use abstract_domains::ops::{Acc, Add, By, ByFilter, Exists, Filter, Map, Partition, Reduce, Transform};
use abstract_domains::{AbstractDomain, Element, Part, SelfPart, SetDomain, SetFragment};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct Source(u8);

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

impl Element for Source {
    const NAME: &'static str = "Source";
}

type Sources = SetDomain<Source>;

fn s(ids: &[u8]) -> Sources {
    ids.iter().map(|&i| Source(i)).collect()
}

/// Every subset of {S1, S2, S3, S4}.
fn universe() -> Vec<Sources> {
    (0u8..16)
        .map(|mask| (1..=4).filter(|i| mask & (1 << (i - 1)) != 0).map(Source).collect())
        .collect()
}

// ─── Lattice Laws ──────────────────────────────────────────────────────────────

#[test]
fn join_meet_laws() {
    let all = universe();
    for a in &all {
        assert_eq!(a.join(a), *a);
        assert_eq!(a.meet(a), *a);
        for b in &all {
            assert_eq!(a.join(b), b.join(a));
            assert_eq!(a.meet(b), b.meet(a));
            for c in &all {
                assert_eq!(a.join(&b.join(c)), a.join(b).join(c));
                assert_eq!(a.meet(&b.meet(c)), a.meet(b).meet(c));
            }
        }
    }
}

#[test]
fn order_agrees_with_join() {
    let all = universe();
    for a in &all {
        for b in &all {
            assert_eq!(a.less_or_equal(b), a.join(b) == *b, "{} ⊑ {}", a, b);
        }
    }
}

#[test]
fn bottom_laws() {
    let bottom = Sources::bottom();
    assert!(bottom.is_bottom());
    for v in universe() {
        assert!(bottom.less_or_equal(&v));
        assert_eq!(v.less_or_equal(&bottom), v.is_bottom());
        assert_eq!(v.is_bottom(), v.is_empty());
    }
}

#[test]
fn subtract_self_is_bottom() {
    for v in universe() {
        assert!(v.subtract(&v).is_bottom());
        // Distinct allocation, same contents.
        assert!(v.subtract(&Sources::of_list(v.elements())).is_bottom());
    }
}

#[test]
fn widen_stabilizes() {
    // Ascending chain over a bounded universe reaches a fixpoint.
    let mut current = Sources::bottom();
    for i in 0.. {
        let next = current.join(&s(&[(i % 4) as u8 + 1]));
        let widened = current.widen(i, &next);
        if widened.less_or_equal(&current) {
            break;
        }
        current = widened;
        assert!(i < 10, "widening did not stabilize");
    }
    assert_eq!(current, s(&[1, 2, 3, 4]));
}

// ─── Construction ──────────────────────────────────────────────────────────────

#[test]
fn singleton_round_trip() {
    let x = Sources::singleton(Source(7));
    assert_eq!(Sources::of_list(x.elements()), x);
}

#[test]
fn of_list_normalizes() {
    let v = Sources::of_list([Source(3), Source(1), Source(3)]);
    assert_eq!(v.elements(), vec![Source(1), Source(3)]);
    assert_eq!(v.show(), "[S1, S3]");
}

#[test]
fn create_from_fragments() {
    let v = Sources::create([SetFragment::Set(vec![Source(1), Source(2)]), SetFragment::Element(Source(3))]);
    assert_eq!(v, s(&[1, 2, 3]));
}

// ─── Concrete Scenarios ────────────────────────────────────────────────────────

#[test]
fn scenario_join_meet() {
    let a = s(&[1, 2, 3]);
    let b = s(&[2, 3, 4]);
    assert_eq!(a.join(&b), s(&[1, 2, 3, 4]));
    assert_eq!(a.meet(&b), s(&[2, 3]));
    assert!(!a.less_or_equal(&b));
}

#[test]
fn scenario_partition_by_parity() {
    let v = s(&[1, 2, 3, 4]);
    let parity = v.partition(Sources::ELEMENT, By(|x: &Source| if x.0 % 2 == 0 { "even" } else { "odd" }));
    assert_eq!(parity.len(), 2);
    assert_eq!(parity["odd"], s(&[1, 3]));
    assert_eq!(parity["even"], s(&[2, 4]));
}

#[test]
fn scenario_set_filter_is_all_or_nothing() {
    let v = s(&[1, 2, 3]);
    let res = v.transform(Sources::SET, Filter(|xs: &[Source]| xs.len() > 5));
    assert!(res.is_bottom());

    // A per-member filter with a predicate that every member passes keeps all.
    let res = v.transform(Sources::ELEMENT, Filter(|x: &Source| x.0 < 5));
    assert_eq!(res, v);
}

// ─── Generic Dispatch ──────────────────────────────────────────────────────────

#[test]
fn map_then_fold_equals_composed_fold() {
    let shift = |x: &Source| Source(x.0 + 10);
    for v in universe() {
        let mapped = v.transform(Sources::ELEMENT, Map(shift));
        let folded = mapped.reduce(Sources::ELEMENT, Acc(|x: &Source, acc: u32| acc + x.0 as u32), 0);
        let direct = v.reduce(Sources::ELEMENT, Acc(|x: &Source, acc: u32| acc + shift(x).0 as u32), 0);
        assert_eq!(folded, direct);
    }
}

#[test]
fn element_and_set_parts_differ() {
    let v = s(&[1, 2]);

    let per_member = v.reduce(Sources::ELEMENT, Acc(|_: &Source, n: usize| n + 1), 0);
    let whole = v.reduce(Sources::SET, Acc(|_: &[Source], n: usize| n + 1), 0);
    assert_eq!(per_member, 2);
    assert_eq!(whole, 1);

    let grown = v.transform(Sources::SET, Add(vec![Source(9)]));
    assert_eq!(grown, s(&[1, 2, 9]));
    let grown = v.transform(Sources::ELEMENT, Add(Source(9)));
    assert_eq!(grown, s(&[1, 2, 9]));

    let sole = v.partition(Sources::SET, By(|xs: &[Source]| xs.len()));
    assert_eq!(sole[&2], v);
    let none = v.partition(Sources::SET, ByFilter(|xs: &[Source]| xs.iter().find(|x| x.0 > 5).copied()));
    assert!(none.is_empty());
}

#[test]
fn exists_across_parts() {
    let v = s(&[1, 2]);
    assert!(v.reduce(Sources::ELEMENT, Exists(|x: &Source| x.0 == 2), false));
    assert!(v.reduce(Sources::SET, Exists(|xs: &[Source]| xs.len() == 2), false));
    assert!(v.reduce(SelfPart, Exists(|d: &Sources| !d.is_bottom()), false));
    assert!(Sources::bottom().reduce(Sources::ELEMENT, Exists(|_: &Source| false), true));
}

#[test]
fn self_part_defaults() {
    let v = s(&[1]);
    assert_eq!(v.transform(SelfPart, Add(s(&[2]))), s(&[1, 2]));
    assert!(v.transform(SelfPart, Filter(|d: &Sources| d.len() > 1)).is_bottom());
    assert_eq!(v.transform(SelfPart, Map(|d: &Sources| d.add(Source(4)))), s(&[1, 4]));
    let parts = v.partition(SelfPart, ByFilter(|d: &Sources| d.iter().next().map(|x| x.0)));
    assert_eq!(parts[&1], v);
}

// ─── Introspection ─────────────────────────────────────────────────────────────

#[test]
fn introspection_names_every_part() {
    let names: Vec<String> = Sources::parts().into_iter().map(Sources::part_name).collect();
    assert_eq!(names, vec!["Set(Source).Self", "Set(Source).Element", "Set(Source).Set"]);
    assert_eq!(Sources::structure(), "Set(Source)");
    assert_eq!(Sources::ELEMENT.id().name(), "Element");
}

#[test]
#[should_panic(expected = "contract violation")]
fn unknown_part_is_fatal() {
    #[derive(Debug, Clone, Copy)]
    struct Foreign;

    impl Part for Foreign {
        const NAME: &'static str = "Foreign";
    }

    Sources::part_name(Foreign.id());
}
