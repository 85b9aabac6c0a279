//! The contract for atomic facts stored inside set-based domains.
//!
//! An [`Element`] is whatever the analysis author wants to track: a taint
//! source, a type constraint, a feature flag. The domain never mutates an
//! element; it only stores, compares and renders it.
//!
//! The ordering is taken on trust. A comparison that is not a total order
//! silently corrupts set semantics, and nothing here detects it.

use std::fmt;

/// An atomic fact usable inside a [`SetDomain`][crate::set::SetDomain].
///
/// - [`Ord`] is the total order used for membership and canonical ordering.
/// - [`Display`][fmt::Display] renders a single element.
/// - [`NAME`][Element::NAME] labels the element universe in diagnostics and
///   introspection (e.g. `Set(Taint)`).
pub trait Element: Clone + Ord + fmt::Debug + fmt::Display + 'static {
    /// Domain label used in diagnostics.
    const NAME: &'static str;
}

macro_rules! impl_element {
    ($($t:ty => $name:literal),* $(,)?) => {
        $(
            impl Element for $t {
                const NAME: &'static str = $name;
            }
        )*
    };
}

impl_element! {
    i8 => "i8",
    i16 => "i16",
    i32 => "i32",
    i64 => "i64",
    u8 => "u8",
    u16 => "u16",
    u32 => "u32",
    u64 => "u64",
    usize => "usize",
    char => "char",
    String => "String",
    &'static str => "str",
}
