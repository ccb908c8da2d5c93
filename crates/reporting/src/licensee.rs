//! Licensee financial summary over its active schools.

use serde::{Deserialize, Serialize};

use franchise_core::LicenseeId;
use franchise_schools::{ContractYear, FinancialYear, School};

/// Summed `final` figures for one contract year.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct YearTotals {
    pub gross_revenue: f64,
    pub management_cost: f64,
    pub lab_investment: f64,
    pub net_revenue: f64,
    /// Licensee share.
    pub licensee_benefit: f64,
}

impl YearTotals {
    fn add(&mut self, year: &FinancialYear) {
        self.gross_revenue += year.gross_revenue.final_value();
        self.management_cost += year.management_cost.final_value();
        self.lab_investment += year.lab_investment.final_value();
        self.net_revenue += year.net_revenue.final_value();
        self.licensee_benefit += year.licensee_split.final_value();
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LicenseeSummary {
    pub licensee_id: LicenseeId,
    /// Schools with status ACTIVA; only these are summed.
    pub active_schools: usize,
    /// Schools of the licensee in any other status.
    pub pending_schools: usize,
    years: [YearTotals; 3],
}

impl LicenseeSummary {
    pub fn year(&self, year: ContractYear) -> &YearTotals {
        &self.years[usize::from(year.number() - 1)]
    }

    pub fn total_gross(&self) -> f64 {
        self.years.iter().map(|y| y.gross_revenue).sum()
    }

    pub fn total_net(&self) -> f64 {
        self.years.iter().map(|y| y.net_revenue).sum()
    }

    pub fn total_benefit(&self) -> f64 {
        self.years.iter().map(|y| y.licensee_benefit).sum()
    }
}

pub fn licensee_summary(licensee_id: LicenseeId, schools: &[School]) -> LicenseeSummary {
    let mut summary = LicenseeSummary {
        licensee_id,
        active_schools: 0,
        pending_schools: 0,
        years: [YearTotals::default(); 3],
    };

    for school in schools.iter().filter(|s| s.licensee_id == licensee_id) {
        if !school.is_active() {
            summary.pending_schools += 1;
            continue;
        }
        summary.active_schools += 1;
        for (year, statement) in school.projection.iter() {
            summary.years[usize::from(year.number() - 1)].add(statement);
        }
    }

    summary
}
