//! Portfolio-wide dashboard figures.

use serde::{Deserialize, Serialize};

use franchise_core::{PaymentId, SchoolId};
use franchise_payments::Payment;
use franchise_schools::{ContractYear, ProjectionField, School, SchoolStatus};

use crate::reconciliation::collected;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchoolHighlight {
    pub school_id: SchoolId,
    pub name: String,
    pub status: SchoolStatus,
    /// Net revenue summed over the three contract years.
    pub three_year_net: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub school_count: usize,
    pub first_year_students: i64,
    pub first_year_gross: f64,
    /// Sum of every PAGADO payment.
    pub collected: f64,
    /// Payments still expected (PROGRAMADO, VENCIDO, PARCIAL).
    pub pending_payments: Vec<PaymentId>,
    pub pending_amount: f64,
    pub schools: Vec<SchoolHighlight>,
}

pub fn portfolio_summary(schools: &[School], payments: &[Payment]) -> PortfolioSummary {
    let pending: Vec<&Payment> = payments.iter().filter(|p| p.is_pending()).collect();

    PortfolioSummary {
        school_count: schools.len(),
        first_year_students: schools
            .iter()
            .map(|s| s.projection[ContractYear::First].students)
            .sum(),
        first_year_gross: schools
            .iter()
            .map(|s| s.projection[ContractYear::First].gross_revenue.final_value())
            .sum(),
        collected: collected(payments),
        pending_payments: pending.iter().map(|p| p.id).collect(),
        pending_amount: pending.iter().map(|p| p.amount).sum(),
        schools: schools
            .iter()
            .map(|s| SchoolHighlight {
                school_id: s.id,
                name: s.name().to_string(),
                status: s.status,
                three_year_net: s.projection.total(ProjectionField::NetRevenue),
            })
            .collect(),
    }
}
