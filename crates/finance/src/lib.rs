//! Financial projection engine and currency formatting.
//!
//! [`recompute`] is a pure function from a school and the global
//! configuration to a school whose derived figures are all fresh. It performs
//! no IO and cannot fail, so callers may run it on every edit.

pub mod currency;
pub mod engine;

pub use currency::{format_currency, Currency, CurrencyFormat};
pub use engine::{equipment_base, recompute, LAB_REINVESTMENT_RATE};
