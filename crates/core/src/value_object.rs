//! Value object marker.

/// Marker for immutable values compared by their attributes.
///
/// `Money`, `Sku` and order line items are value objects: two line items for the
/// same sku and quantity are interchangeable. To "change" one, build a new one.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
