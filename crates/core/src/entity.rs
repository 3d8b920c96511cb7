//! Entity trait: values that keep their identity while their attributes vary.

/// An object identified by an id rather than by its attribute values.
///
/// Two orders with identical lines and totals are still distinct orders if their
/// ids differ.
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;
}
