//! Projected revenue vs. recorded payments, per school and contract year.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use franchise_core::{LicenseeId, SchoolId};
use franchise_payments::Payment;
use franchise_schools::{ContractYear, School};

/// Split gaps smaller than half a cent are rounding noise.
pub const SPLIT_GAP_TOLERANCE: f64 = 0.005;

/// Amount due vs. collected for one school and year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearReconciliation {
    pub school_id: SchoolId,
    pub year: ContractYear,
    /// Projected gross revenue (`final`).
    pub due: f64,
    /// Sum of PAGADO payments for the school and year.
    pub collected: f64,
    /// `due − collected`; negative when more was collected than projected.
    pub pending: f64,
}

pub fn year_reconciliation(
    school: &School,
    year: ContractYear,
    payments: &[Payment],
) -> YearReconciliation {
    let due = school.projection[year].gross_revenue.final_value();
    let collected = collected(
        payments_for_school(payments, school.id).filter(|p| p.contract_year == Some(year)),
    );
    YearReconciliation {
        school_id: school.id,
        year,
        due,
        collected,
        pending: due - collected,
    }
}

/// Sum of the amounts of paid payments.
pub fn collected<'a>(payments: impl IntoIterator<Item = &'a Payment>) -> f64 {
    payments
        .into_iter()
        .filter(|p| p.is_paid())
        .map(|p| p.amount)
        .sum()
}

pub fn payments_for_school(
    payments: &[Payment],
    school_id: SchoolId,
) -> impl Iterator<Item = &Payment> {
    payments.iter().filter(move |p| p.belongs_to(school_id))
}

/// Pending payments scheduled before `today`, oldest first.
pub fn late_payments(payments: &[Payment], today: NaiveDate) -> Vec<&Payment> {
    let mut late: Vec<&Payment> = payments.iter().filter(|p| p.is_late(today)).collect();
    late.sort_by_key(|p| p.scheduled_date);
    late
}

/// Payments referencing any school of `licensee_id`.
pub fn payments_for_licensee<'a>(
    payments: &'a [Payment],
    schools: &'a [School],
    licensee_id: LicenseeId,
) -> impl Iterator<Item = &'a Payment> {
    payments.iter().filter(move |p| {
        p.reference_id.is_some_and(|school_id| {
            schools
                .iter()
                .any(|s| s.id == school_id && s.licensee_id == licensee_id)
        })
    })
}

/// A year where pinned splits no longer add up to net revenue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitGap {
    pub year: ContractYear,
    /// `net − (licensee + licensor)`, using `final` values.
    pub gap: f64,
}

pub fn split_gaps(school: &School) -> Vec<SplitGap> {
    school
        .projection
        .iter()
        .map(|(year, statement)| SplitGap {
            year,
            gap: statement.split_gap(),
        })
        .filter(|g| g.gap.abs() > SPLIT_GAP_TOLERANCE)
        .collect()
}
