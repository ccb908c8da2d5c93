//! Licensees: the regional partners that operate schools under license.

pub mod licensee;

pub use licensee::{validate, Licensee, LicenseeDraft, LicenseeStatus};
