//! `franchise-core`: shared building blocks for the franchise domain crates.
//!
//! Identifiers, the domain error model and the small set of traits every
//! entity crate implements. No IO lives here.

pub mod aggregate;
pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use aggregate::{AggregateRoot, ExpectedVersion};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{EquipmentLineId, LicenseeId, PaymentId, SchoolId};
pub use value_object::ValueObject;
