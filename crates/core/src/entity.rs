//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// A selected product stays "the same product" while its license type and seat
/// count change; identity is carried by the catalog id alone.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;

    /// Whether `other` refers to the same entity, regardless of its attributes.
    fn same_identity_as<O>(&self, other: &O) -> bool
    where
        O: Entity<Id = Self::Id> + ?Sized,
    {
        self.id() == other.id()
    }
}
