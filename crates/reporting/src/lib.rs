//! Read-only aggregations over schools and payments.
//!
//! Everything here reads `final` values, the figures the business actually
//! uses, and never modifies its inputs. Nothing is enforced: a school whose
//! collected payments exceed its projected gross simply shows a negative
//! pending amount.

pub mod licensee;
pub mod portfolio;
pub mod reconciliation;

pub use licensee::{licensee_summary, LicenseeSummary, YearTotals};
pub use portfolio::{portfolio_summary, PortfolioSummary, SchoolHighlight};
pub use reconciliation::{
    collected, late_payments, payments_for_licensee, payments_for_school, split_gaps,
    year_reconciliation, SplitGap, YearReconciliation, SPLIT_GAP_TOLERANCE,
};
