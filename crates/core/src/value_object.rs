//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity: two instances holding the same values are
/// the same value. Seat counts and money amounts are value objects; catalog
/// products are entities (see [`crate::Entity`]).
///
/// To "modify" a value object, construct a new one.
///
/// ```
/// use quotekit_core::ValueObject;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// struct Cents(u64);
///
/// impl ValueObject for Cents {}
///
/// assert_eq!(Cents(9_000), Cents(9_000));
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
