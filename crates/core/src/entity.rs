//! Entity trait: identity that survives state changes.

/// Entity marker + minimal interface.
///
/// A product whose stock moves is still the same product; ledgers key their
/// records by this id.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
