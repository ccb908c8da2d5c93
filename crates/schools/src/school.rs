use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use franchise_core::{DomainError, DomainResult, Entity, LicenseeId, SchoolId};

use crate::equipment::SchoolEquipment;
use crate::override_value::OverrideValue;
use crate::projection::Projection;

/// Operational status of a school.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SchoolStatus {
    #[serde(rename = "ACTIVA")]
    Active,
    #[serde(rename = "ONBOARDING")]
    Onboarding,
    #[serde(rename = "RIESGO")]
    AtRisk,
    #[serde(rename = "INACTIVA")]
    Inactive,
}

/// Pricing mode of a school.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProgramType {
    /// Bundled per-student package covering every program.
    #[serde(rename = "BEST")]
    Best,
    /// Priced per program per student.
    #[serde(rename = "INDIVIDUAL")]
    Individual,
}

/// Descriptive and contact fields. None of these feed the projection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SchoolProfile {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    /// Education level, e.g. "Primaria/Secundaria".
    pub level: String,
    pub contact: String,
    pub email: String,
    pub phone: String,
    pub responsible_name: String,
    pub responsible_phone: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractTerms {
    pub start_date: NaiveDate,
    pub duration_years: u32,
}

/// Selects one of the four per-student pricing figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingField {
    BestPrice,
    BestManagementCost,
    IndividualPrice,
    IndividualManagementCost,
}

/// Per-student pricing of a school. Automatic values come from the global
/// configuration; any of them can be pinned per school.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SchoolPricing {
    pub best_price: OverrideValue<f64>,
    pub best_management_cost: OverrideValue<f64>,
    pub individual_price: OverrideValue<f64>,
    pub individual_management_cost: OverrideValue<f64>,
}

impl SchoolPricing {
    pub fn field(&self, field: PricingField) -> &OverrideValue<f64> {
        match field {
            PricingField::BestPrice => &self.best_price,
            PricingField::BestManagementCost => &self.best_management_cost,
            PricingField::IndividualPrice => &self.individual_price,
            PricingField::IndividualManagementCost => &self.individual_management_cost,
        }
    }

    pub fn field_mut(&mut self, field: PricingField) -> &mut OverrideValue<f64> {
        match field {
            PricingField::BestPrice => &mut self.best_price,
            PricingField::BestManagementCost => &mut self.best_management_cost,
            PricingField::IndividualPrice => &mut self.individual_price,
            PricingField::IndividualManagementCost => &mut self.individual_management_cost,
        }
    }
}

/// A franchised school.
///
/// Build new schools with [`crate::SchoolDraft`] and change them with
/// [`crate::SchoolEdit`]; both return complete values. Derived fields are only
/// trustworthy after the projection engine ran on the current inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct School {
    pub id: SchoolId,
    pub profile: SchoolProfile,
    /// Owning licensee (non-owning reference).
    pub licensee_id: LicenseeId,
    pub contract: ContractTerms,
    pub status: SchoolStatus,
    pub program: ProgramType,
    /// Number of programs sold per student under [`ProgramType::Individual`].
    pub individual_programs: u32,
    pub pricing: SchoolPricing,
    /// Licensee share of net revenue (0.0–1.0). The licensor gets the rest.
    pub licensee_split: f64,
    pub equipment: Vec<SchoolEquipment>,
    pub projection: Projection,
}

impl School {
    pub fn name(&self) -> &str {
        &self.profile.name
    }

    pub fn is_active(&self) -> bool {
        self.status == SchoolStatus::Active
    }
}

/// Input rules shared by drafts, edits and snapshot import.
pub fn validate(school: &School) -> DomainResult<()> {
    if school.profile.name.trim().is_empty() {
        return Err(DomainError::validation("school name is required"));
    }
    if !(0.0..=1.0).contains(&school.licensee_split) {
        return Err(DomainError::validation(
            "licensee split must be between 0 and 1",
        ));
    }
    if school.contract.duration_years == 0 {
        return Err(DomainError::validation(
            "contract duration must be at least one year",
        ));
    }
    if school.projection.iter().any(|(_, year)| year.students < 0) {
        return Err(DomainError::validation("student count cannot be negative"));
    }
    if school.equipment.iter().any(|line| line.quantity < 0) {
        return Err(DomainError::validation("equipment quantity cannot be negative"));
    }
    Ok(())
}

impl Entity for School {
    type Id = SchoolId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_and_program_use_source_tags() {
        assert_eq!(serde_json::to_string(&SchoolStatus::AtRisk).unwrap(), "\"RIESGO\"");
        assert_eq!(serde_json::to_string(&SchoolStatus::Active).unwrap(), "\"ACTIVA\"");
        assert_eq!(serde_json::to_string(&ProgramType::Individual).unwrap(), "\"INDIVIDUAL\"");
        let status: SchoolStatus = serde_json::from_str("\"INACTIVA\"").unwrap();
        assert_eq!(status, SchoolStatus::Inactive);
    }

    #[test]
    fn pricing_fields_are_addressable() {
        let mut pricing = SchoolPricing::default();
        *pricing.field_mut(PricingField::IndividualPrice) = OverrideValue::automatic(2_000.0);
        assert_eq!(pricing.individual_price.final_value(), 2_000.0);
        assert_eq!(pricing.field(PricingField::BestPrice).final_value(), 0.0);
    }
}
