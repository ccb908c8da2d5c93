//! Payment records.
//!
//! Payments are freeform ledger entries kept by the caller. The projection
//! engine never creates them; reporting compares them against projected gross
//! revenue.

pub mod payment;

pub use payment::{validate, Payment, PaymentDraft, PaymentStatus, PaymentType};
