//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity and are compared by their attributes. To
/// "modify" one, build a new one. In this workspace `OverrideValue`, the
/// pricing block of the global configuration and the currency convention are
/// value objects; schools, licensees and payments are entities.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
