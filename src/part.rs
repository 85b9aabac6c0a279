//! Addressable facets of a domain value.
//!
//! A *part* names one facet of a value: the whole value, one member of a set,
//! the member collection as a unit, and so on. Parts are not drawn from a
//! shared enumeration. Each domain declares its own zero-sized marker types,
//! so unrelated domains can introduce same-named facets without colliding,
//! and a composite domain can address the parts of its components
//! unambiguously.
//!
//! Two views of a part exist:
//!
//! - **Static**: the marker type itself. [`PartOf<D>`] ties the part to the
//!   domain `D` and to the payload type its operations see. The dispatch
//!   traits in [`ops`][crate::ops] are keyed by this type, so an unsupported
//!   part is a compile error.
//! - **Dynamic**: a [`PartId`], obtained from [`Part::id`]. Introspection
//!   reports and resolves parts through ids, which lets generic tooling
//!   discover what a domain supports without knowing its type.
//!
//! The only part every domain supports is [`SelfPart`], the whole value.

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::domain::AbstractDomain;

/// Runtime identity of a part.
///
/// Two ids are equal iff they come from the same marker type. The name is
/// only a label and takes no part in equality.
#[derive(Copy, Clone)]
pub struct PartId {
    type_id: TypeId,
    name: &'static str,
}

impl PartId {
    /// Returns the id of the part `P`.
    pub fn of<P: Part>() -> Self {
        PartId {
            type_id: TypeId::of::<P>(),
            name: P::NAME,
        }
    }

    /// Short label of the part, e.g. `"Element"`.
    pub fn name(self) -> &'static str {
        self.name
    }

    /// Returns `true` if this id denotes the part `P`.
    pub fn is<P: Part>(self) -> bool {
        self.type_id == TypeId::of::<P>()
    }
}

impl PartialEq for PartId {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for PartId {}

impl Hash for PartId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for PartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PartId({})", self.name)
    }
}

impl fmt::Display for PartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A part marker type.
pub trait Part: Copy + fmt::Debug + 'static {
    /// Short label, unqualified by the domain.
    const NAME: &'static str;

    /// Runtime identity of this part.
    fn id(self) -> PartId {
        PartId::of::<Self>()
    }
}

/// A part addressable on values of the domain `D`.
///
/// `Value` is the payload the dispatch families hand to caller functions:
/// the domain itself for [`SelfPart`], a member for a set's element part,
/// and so on.
pub trait PartOf<D>: Part {
    type Value: ?Sized;
}

/// The whole value. Supported by every domain.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct SelfPart;

impl Part for SelfPart {
    const NAME: &'static str = "Self";
}

impl<D: AbstractDomain> PartOf<D> for SelfPart {
    type Value = D;
}
