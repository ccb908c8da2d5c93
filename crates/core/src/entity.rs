//! Entity trait: identity + continuity across state changes.

/// Anything the registry stores by identity (schools, licensees, payments).
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Ord + Eq + core::hash::Hash + core::fmt::Debug + core::fmt::Display;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
