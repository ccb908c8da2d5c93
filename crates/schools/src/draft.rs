//! Creating schools with defaults seeded from the global configuration.

use chrono::NaiveDate;

use franchise_config::{CatalogItemId, EquipmentCatalogItem, GlobalConfig};
use franchise_core::{DomainResult, EquipmentLineId, LicenseeId, SchoolId};

use crate::equipment::SchoolEquipment;
use crate::override_value::OverrideValue;
use crate::projection::{ContractYear, Projection};
use crate::school::{
    validate, ContractTerms, ProgramType, School, SchoolPricing, SchoolProfile, SchoolStatus,
};

/// Default contract length for new schools, in years.
pub const DEFAULT_CONTRACT_YEARS: u32 = 3;

/// Builder for a new [`School`].
///
/// Every field has a value from the moment the draft exists, so `build` can
/// only fail on validation.
#[derive(Debug, Clone, PartialEq)]
pub struct SchoolDraft {
    profile: SchoolProfile,
    licensee_id: LicenseeId,
    contract: ContractTerms,
    status: SchoolStatus,
    program: ProgramType,
    individual_programs: u32,
    pricing: SchoolPricing,
    licensee_split: f64,
    students: [i64; 3],
    equipment: Vec<SchoolEquipment>,
    /// Catalog the draft was seeded from; equipment is resolved against it.
    catalog: Vec<EquipmentCatalogItem>,
}

impl SchoolDraft {
    pub fn new(
        name: impl Into<String>,
        licensee_id: LicenseeId,
        start_date: NaiveDate,
        config: &GlobalConfig,
    ) -> Self {
        let prices = config.pricing;
        Self {
            profile: SchoolProfile {
                name: name.into(),
                country: "MEXICO".to_string(),
                level: "Primaria/Secundaria".to_string(),
                ..SchoolProfile::default()
            },
            licensee_id,
            contract: ContractTerms {
                start_date,
                duration_years: DEFAULT_CONTRACT_YEARS,
            },
            status: SchoolStatus::Onboarding,
            program: ProgramType::Best,
            individual_programs: 1,
            pricing: SchoolPricing {
                best_price: OverrideValue::automatic(prices.best_price),
                best_management_cost: OverrideValue::automatic(prices.best_management_cost),
                individual_price: OverrideValue::automatic(prices.individual_price),
                individual_management_cost: OverrideValue::automatic(
                    prices.individual_management_cost,
                ),
            },
            licensee_split: config.default_split,
            students: [0; 3],
            equipment: Vec::new(),
            catalog: config.catalog.clone(),
        }
    }

    /// Replace the descriptive fields. The name in `profile` wins.
    pub fn profile(mut self, profile: SchoolProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn duration_years(mut self, years: u32) -> Self {
        self.contract.duration_years = years;
        self
    }

    pub fn status(mut self, status: SchoolStatus) -> Self {
        self.status = status;
        self
    }

    pub fn program(mut self, program: ProgramType) -> Self {
        self.program = program;
        self
    }

    pub fn individual_programs(mut self, count: u32) -> Self {
        self.individual_programs = count;
        self
    }

    pub fn licensee_split(mut self, split: f64) -> Self {
        self.licensee_split = split;
        self
    }

    pub fn students(mut self, year: ContractYear, students: i64) -> Self {
        self.students[usize::from(year.number() - 1)] = students;
        self
    }

    /// Add a line for a catalog item. Unknown and inactive items are rejected.
    pub fn equipment(
        mut self,
        line_id: EquipmentLineId,
        item_id: &CatalogItemId,
        quantity: i64,
    ) -> DomainResult<Self> {
        let line = SchoolEquipment::for_catalog_item(line_id, &self.catalog, item_id, quantity)?;
        self.equipment.push(line);
        Ok(self)
    }

    /// Validate and produce the school. Derived figures are still unset; run
    /// the projection engine before storing it.
    pub fn build(self, id: SchoolId) -> DomainResult<School> {
        let school = School {
            id,
            profile: self.profile,
            licensee_id: self.licensee_id,
            contract: self.contract,
            status: self.status,
            program: self.program,
            individual_programs: self.individual_programs,
            pricing: self.pricing,
            licensee_split: self.licensee_split,
            equipment: self.equipment,
            projection: Projection::with_students(self.students),
        };
        validate(&school)?;
        Ok(school)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use franchise_core::DomainError;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 8, 1).unwrap()
    }

    #[test]
    fn new_school_is_seeded_from_config() {
        let config = GlobalConfig::default();
        let licensee_id = LicenseeId::new();
        let school = SchoolDraft::new("Colegio Americano", licensee_id, start(), &config)
            .build(SchoolId::new())
            .unwrap();

        assert_eq!(school.name(), "Colegio Americano");
        assert_eq!(school.licensee_id, licensee_id);
        assert_eq!(school.status, SchoolStatus::Onboarding);
        assert_eq!(school.program, ProgramType::Best);
        assert_eq!(school.individual_programs, 1);
        assert_eq!(school.contract.duration_years, 3);
        assert_eq!(school.licensee_split, 0.40);
        assert_eq!(school.pricing.best_price, OverrideValue::automatic(4_200.0));
        assert_eq!(
            school.pricing.individual_management_cost,
            OverrideValue::automatic(350.0)
        );
        assert!(school.equipment.is_empty());
        assert!(school.projection.iter().all(|(_, y)| y.students == 0));
    }

    #[test]
    fn blank_name_is_rejected() {
        let config = GlobalConfig::default();
        let err = SchoolDraft::new("   ", LicenseeId::new(), start(), &config)
            .build(SchoolId::new())
            .unwrap_err();
        assert_eq!(err, DomainError::validation("school name is required"));
    }

    #[test]
    fn split_above_one_is_rejected() {
        let config = GlobalConfig::default();
        let err = SchoolDraft::new("X", LicenseeId::new(), start(), &config)
            .licensee_split(1.2)
            .build(SchoolId::new())
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn inactive_catalog_items_cannot_be_added() {
        let mut config = GlobalConfig::default();
        config.catalog[0].active = false;
        let err = SchoolDraft::new("X", LicenseeId::new(), start(), &config)
            .equipment(EquipmentLineId::new(), &CatalogItemId::new("1"), 1)
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = SchoolDraft::new("X", LicenseeId::new(), start(), &config)
            .equipment(EquipmentLineId::new(), &CatalogItemId::new("99"), 1)
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[test]
    fn students_and_equipment_carry_into_the_school() {
        let config = GlobalConfig::default();
        let school = SchoolDraft::new("X", LicenseeId::new(), start(), &config)
            .students(ContractYear::First, 100)
            .students(ContractYear::Third, 150)
            .equipment(EquipmentLineId::new(), &CatalogItemId::new("1"), 4)
            .unwrap()
            .build(SchoolId::new())
            .unwrap();

        assert_eq!(school.projection[ContractYear::First].students, 100);
        assert_eq!(school.projection[ContractYear::Second].students, 0);
        assert_eq!(school.projection[ContractYear::Third].students, 150);
        assert_eq!(school.equipment.len(), 1);
        assert_eq!(school.equipment[0].quantity, 4);
    }
}
