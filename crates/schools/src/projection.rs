//! Three-year financial statement of a school.

use core::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::override_value::OverrideValue;

/// Contract year covered by the projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ContractYear {
    First,
    Second,
    Third,
}

impl ContractYear {
    pub const ALL: [ContractYear; 3] = [ContractYear::First, ContractYear::Second, ContractYear::Third];

    /// 1, 2 or 3.
    pub fn number(self) -> u8 {
        match self {
            ContractYear::First => 1,
            ContractYear::Second => 2,
            ContractYear::Third => 3,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(ContractYear::First),
            2 => Some(ContractYear::Second),
            3 => Some(ContractYear::Third),
            _ => None,
        }
    }

    fn index(self) -> usize {
        usize::from(self.number() - 1)
    }
}

impl TryFrom<u8> for ContractYear {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        ContractYear::from_number(value).ok_or_else(|| format!("contract year must be 1, 2 or 3 (got {value})"))
    }
}

impl From<ContractYear> for u8 {
    fn from(value: ContractYear) -> Self {
        value.number()
    }
}

impl core::fmt::Display for ContractYear {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "year {}", self.number())
    }
}

/// Selects one of the derived fields of a [`FinancialYear`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionField {
    GrossRevenue,
    ManagementCost,
    LabInvestment,
    NetRevenue,
    LicenseeSplit,
    LicensorSplit,
}

/// One year of a school's statement.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FinancialYear {
    /// Enrolled students; raw input, never overridden.
    pub students: i64,
    pub gross_revenue: OverrideValue<f64>,
    pub management_cost: OverrideValue<f64>,
    pub lab_investment: OverrideValue<f64>,
    pub net_revenue: OverrideValue<f64>,
    pub licensee_split: OverrideValue<f64>,
    pub licensor_split: OverrideValue<f64>,
}

impl FinancialYear {
    pub fn with_students(students: i64) -> Self {
        Self {
            students,
            ..Self::default()
        }
    }

    pub fn field(&self, field: ProjectionField) -> &OverrideValue<f64> {
        match field {
            ProjectionField::GrossRevenue => &self.gross_revenue,
            ProjectionField::ManagementCost => &self.management_cost,
            ProjectionField::LabInvestment => &self.lab_investment,
            ProjectionField::NetRevenue => &self.net_revenue,
            ProjectionField::LicenseeSplit => &self.licensee_split,
            ProjectionField::LicensorSplit => &self.licensor_split,
        }
    }

    pub fn field_mut(&mut self, field: ProjectionField) -> &mut OverrideValue<f64> {
        match field {
            ProjectionField::GrossRevenue => &mut self.gross_revenue,
            ProjectionField::ManagementCost => &mut self.management_cost,
            ProjectionField::LabInvestment => &mut self.lab_investment,
            ProjectionField::NetRevenue => &mut self.net_revenue,
            ProjectionField::LicenseeSplit => &mut self.licensee_split,
            ProjectionField::LicensorSplit => &mut self.licensor_split,
        }
    }

    /// `net.final − (licensee.final + licensor.final)`.
    ///
    /// Zero (up to rounding) unless one of the splits is pinned. A non-zero gap
    /// is allowed; it is reported, never corrected.
    pub fn split_gap(&self) -> f64 {
        self.net_revenue.final_value()
            - (self.licensee_split.final_value() + self.licensor_split.final_value())
    }
}

/// Exactly three financial years.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Projection([FinancialYear; 3]);

impl Projection {
    /// Empty statement with the given student counts for years 1–3.
    pub fn with_students(students: [i64; 3]) -> Self {
        Self(students.map(FinancialYear::with_students))
    }

    pub fn year(&self, year: ContractYear) -> &FinancialYear {
        &self.0[year.index()]
    }

    pub fn year_mut(&mut self, year: ContractYear) -> &mut FinancialYear {
        &mut self.0[year.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (ContractYear, &FinancialYear)> {
        ContractYear::ALL.into_iter().zip(self.0.iter())
    }

    /// Sum of a field's `final` over the three years.
    pub fn total(&self, field: ProjectionField) -> f64 {
        self.0.iter().map(|y| y.field(field).final_value()).sum()
    }
}

impl Index<ContractYear> for Projection {
    type Output = FinancialYear;

    fn index(&self, year: ContractYear) -> &Self::Output {
        self.year(year)
    }
}

impl IndexMut<ContractYear> for Projection {
    fn index_mut(&mut self, year: ContractYear) -> &mut Self::Output {
        self.year_mut(year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contract_years_map_to_one_based_numbers() {
        let numbers: Vec<u8> = ContractYear::ALL.iter().map(|y| y.number()).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(ContractYear::from_number(2), Some(ContractYear::Second));
        assert_eq!(ContractYear::from_number(0), None);
        assert_eq!(ContractYear::from_number(4), None);
    }

    #[test]
    fn contract_year_serializes_as_number() {
        assert_eq!(serde_json::to_string(&ContractYear::Third).unwrap(), "3");
        let year: ContractYear = serde_json::from_str("1").unwrap();
        assert_eq!(year, ContractYear::First);
        assert!(serde_json::from_str::<ContractYear>("7").is_err());
    }

    #[test]
    fn projection_is_indexed_by_year() {
        let mut projection = Projection::with_students([100, 120, 150]);
        assert_eq!(projection[ContractYear::Second].students, 120);
        projection[ContractYear::Third].students = 160;
        assert_eq!(projection.year(ContractYear::Third).students, 160);
    }

    #[test]
    fn total_sums_final_values() {
        let mut projection = Projection::default();
        for (value, year) in [10.0, 20.0, 30.0].into_iter().zip(ContractYear::ALL) {
            projection[year].net_revenue = OverrideValue::automatic(value);
        }
        projection[ContractYear::Third].net_revenue =
            projection[ContractYear::Third].net_revenue.with_manual(5.0);
        assert_eq!(projection.total(ProjectionField::NetRevenue), 35.0);
    }

    #[test]
    fn split_gap_reports_pinned_split_mismatch() {
        let mut year = FinancialYear::with_students(10);
        year.net_revenue = OverrideValue::automatic(1_000.0);
        year.licensee_split = OverrideValue::automatic(400.0);
        year.licensor_split = OverrideValue::pinned(600.0, 500.0);
        assert_eq!(year.split_gap(), 100.0);
    }
}
