//! School domain model.
//!
//! A school owns its equipment lines and its three-year projection by value.
//! Derived figures are wrapped in [`OverrideValue`] so a manual figure can
//! survive recomputation. The recomputation itself lives in
//! `franchise-finance`; this crate only defines the data and the sanctioned
//! ways to build and edit it.

pub mod draft;
pub mod edit;
pub mod equipment;
pub mod override_value;
pub mod projection;
pub mod school;

pub use draft::SchoolDraft;
pub use edit::SchoolEdit;
pub use equipment::SchoolEquipment;
pub use override_value::OverrideValue;
pub use projection::{ContractYear, FinancialYear, Projection, ProjectionField};
pub use school::{
    validate, ContractTerms, PricingField, ProgramType, School, SchoolPricing, SchoolProfile, SchoolStatus,
};
