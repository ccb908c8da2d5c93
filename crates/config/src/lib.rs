//! Global configuration: base pricing, default split and the equipment catalog.
//!
//! The configuration is read by the projection engine and by school creation.
//! It only changes through an explicit configuration edit (see the registry).

pub mod catalog;
pub mod global;
pub mod loader;

pub use catalog::{CatalogItemId, EquipmentCatalogItem};
pub use global::{GlobalConfig, Pricing};
pub use loader::{load_from_env, load_from_path, load_from_str, ConfigError, CONFIG_PATH_ENV};
