//! # abstract-domains: lattice algebra for dataflow analyses
//!
//! **`abstract-domains`** provides the values a static-analysis fixpoint
//! iterates over: elements of a lattice, combined with join, meet and
//! widening, plus a small vocabulary of generic queries that work on *any*
//! domain without knowing its representation.
//!
//! ## What is an abstract domain?
//!
//! An abstract domain over-approximates the facts that may hold at a program
//! point: "this variable may carry taint from sources A or B", "this value is
//! an `int` or a `str`". Facts from different paths are merged with
//! [`join`][AbstractDomain::join], and the analysis stops once every program
//! point stops growing.
//!
//! ## Key Features
//!
//! - **One protocol**: every domain implements [`AbstractDomain`], giving
//!   drivers `bottom`, `join`, `meet`, `widen`, `less_or_equal` and `subtract`.
//! - **Parts**: a value exposes addressable facets (the whole value, one set
//!   member, the member list). Parts are per-domain marker types, so domains
//!   never clash over names.
//! - **Generic operations**: [`Transform`][ops::Transform] (map, add, filter),
//!   [`Reduce`][ops::Reduce] (fold, exists) and [`Partition`][ops::Partition]
//!   (group by key) are dispatched on a part and statically checked.
//! - **Immutable and shareable**: values are never updated in place, so they
//!   can be read from many threads at once.
//!
//! ## Basic Usage
//!
//! ```rust
//! use abstract_domains::{AbstractDomain, Element, SetDomain};
//! use abstract_domains::ops::{By, Partition};
//! use std::fmt;
//!
//! #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
//! enum Taint {
//!     UserInput,
//!     Cookie,
//!     Secret,
//! }
//!
//! impl fmt::Display for Taint {
//!     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
//!         write!(f, "{:?}", self)
//!     }
//! }
//!
//! impl Element for Taint {
//!     const NAME: &'static str = "Taint";
//! }
//!
//! type Taints = SetDomain<Taint>;
//!
//! // Two branches carry different taint...
//! let then_branch = Taints::singleton(Taint::UserInput);
//! let else_branch = Taints::of_list([Taint::Cookie, Taint::Secret]);
//!
//! // ...and the merge point sees both.
//! let merged = then_branch.join(&else_branch);
//! assert_eq!(merged.show(), "[UserInput, Cookie, Secret]");
//! assert!(then_branch.less_or_equal(&merged));
//!
//! // Split by whether the source is attacker-controlled.
//! let split = merged.partition(Taints::ELEMENT, By(|t: &Taint| *t != Taint::Secret));
//! assert_eq!(split[&true].len(), 2);
//! assert_eq!(split[&false].show(), "[Secret]");
//! ```
//!
//! ## Core Components
//!
//! - **[`domain`]**: the [`AbstractDomain`] protocol and its laws.
//! - **[`part`]**: part markers and their runtime [`PartId`]s.
//! - **[`ops`]**: operation witnesses and the three dispatch families.
//! - **[`base`]**: behaviour of the whole-value part shared by every domain.
//! - **[`set`]**: [`SetDomain`], a finite set of [`Element`]s.

pub mod base;
pub mod domain;
pub mod element;
pub mod ops;
pub mod part;
pub mod set;

pub use domain::AbstractDomain;
pub use element::Element;
pub use part::{Part, PartId, PartOf, SelfPart};
pub use set::{SetDomain, SetFragment};
