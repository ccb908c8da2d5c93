//! Edits a caller can make to a stored school.
//!
//! Each edit produces a complete new [`School`]; the original is untouched.
//! Edits change raw inputs and override flags only. The caller must run the
//! projection engine on the result before persisting it. Equipment is added
//! by catalog id and resolved against the configuration passed in, so a line's
//! price always starts from the current catalog.

use serde::{Deserialize, Serialize};

use franchise_config::{CatalogItemId, GlobalConfig};
use franchise_core::{DomainError, DomainResult, EquipmentLineId, LicenseeId};

use crate::equipment::SchoolEquipment;
use crate::projection::{ContractYear, ProjectionField};
use crate::school::{ContractTerms, PricingField, ProgramType, School, SchoolProfile, SchoolStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SchoolEdit {
    UpdateProfile(SchoolProfile),
    AssignLicensee(LicenseeId),
    SetContract(ContractTerms),
    SetStatus(SchoolStatus),
    SetProgram(ProgramType),
    SetIndividualPrograms(u32),
    SetLicenseeSplit(f64),
    SetStudents {
        year: ContractYear,
        students: i64,
    },
    AddEquipment {
        line_id: EquipmentLineId,
        catalog_item_id: CatalogItemId,
        quantity: i64,
    },
    RemoveEquipment(EquipmentLineId),
    SetEquipmentQuantity {
        line_id: EquipmentLineId,
        quantity: i64,
    },
    OverrideEquipmentUnitPrice {
        line_id: EquipmentLineId,
        value: f64,
    },
    RestoreEquipmentUnitPrice(EquipmentLineId),
    OverrideEquipmentTotal {
        line_id: EquipmentLineId,
        value: f64,
    },
    RestoreEquipmentTotal(EquipmentLineId),
    OverridePricing {
        field: PricingField,
        value: f64,
    },
    RestorePricing(PricingField),
    OverrideProjection {
        year: ContractYear,
        field: ProjectionField,
        value: f64,
    },
    RestoreProjection {
        year: ContractYear,
        field: ProjectionField,
    },
}

impl School {
    /// Apply one edit, returning the edited copy.
    pub fn apply_edit(&self, edit: &SchoolEdit, config: &GlobalConfig) -> DomainResult<School> {
        let mut next = self.clone();
        match edit {
            SchoolEdit::UpdateProfile(profile) => {
                if profile.name.trim().is_empty() {
                    return Err(DomainError::validation("school name is required"));
                }
                next.profile = profile.clone();
            }
            SchoolEdit::AssignLicensee(licensee_id) => next.licensee_id = *licensee_id,
            SchoolEdit::SetContract(terms) => {
                if terms.duration_years == 0 {
                    return Err(DomainError::validation(
                        "contract duration must be at least one year",
                    ));
                }
                next.contract = *terms;
            }
            SchoolEdit::SetStatus(status) => next.status = *status,
            SchoolEdit::SetProgram(program) => next.program = *program,
            SchoolEdit::SetIndividualPrograms(count) => next.individual_programs = *count,
            SchoolEdit::SetLicenseeSplit(split) => {
                if !(0.0..=1.0).contains(split) {
                    return Err(DomainError::validation(
                        "licensee split must be between 0 and 1",
                    ));
                }
                next.licensee_split = *split;
            }
            SchoolEdit::SetStudents { year, students } => {
                if *students < 0 {
                    return Err(DomainError::validation("student count cannot be negative"));
                }
                next.projection[*year].students = *students;
            }
            SchoolEdit::AddEquipment {
                line_id,
                catalog_item_id,
                quantity,
            } => {
                if next.equipment.iter().any(|line| line.id == *line_id) {
                    return Err(DomainError::conflict(format!(
                        "equipment line {line_id} already exists"
                    )));
                }
                next.equipment.push(SchoolEquipment::for_catalog_item(
                    *line_id,
                    &config.catalog,
                    catalog_item_id,
                    *quantity,
                )?);
            }
            SchoolEdit::RemoveEquipment(line_id) => {
                let before = next.equipment.len();
                next.equipment.retain(|line| line.id != *line_id);
                if next.equipment.len() == before {
                    return Err(missing_line(*line_id));
                }
            }
            SchoolEdit::SetEquipmentQuantity { line_id, quantity } => {
                if *quantity < 0 {
                    return Err(DomainError::validation("equipment quantity cannot be negative"));
                }
                equipment_line(&mut next, *line_id)?.quantity = *quantity;
            }
            SchoolEdit::OverrideEquipmentUnitPrice { line_id, value } => {
                let value = finite(*value)?;
                let line = equipment_line(&mut next, *line_id)?;
                line.unit_price = line.unit_price.with_manual(value);
            }
            SchoolEdit::RestoreEquipmentUnitPrice(line_id) => {
                let line = equipment_line(&mut next, *line_id)?;
                line.unit_price = line.unit_price.restored();
            }
            SchoolEdit::OverrideEquipmentTotal { line_id, value } => {
                let value = finite(*value)?;
                let line = equipment_line(&mut next, *line_id)?;
                line.total = line.total.with_manual(value);
            }
            SchoolEdit::RestoreEquipmentTotal(line_id) => {
                let line = equipment_line(&mut next, *line_id)?;
                line.total = line.total.restored();
            }
            SchoolEdit::OverridePricing { field, value } => {
                let value = finite(*value)?;
                let slot = next.pricing.field_mut(*field);
                *slot = slot.with_manual(value);
            }
            SchoolEdit::RestorePricing(field) => {
                let slot = next.pricing.field_mut(*field);
                *slot = slot.restored();
            }
            SchoolEdit::OverrideProjection { year, field, value } => {
                let value = finite(*value)?;
                let slot = next.projection[*year].field_mut(*field);
                *slot = slot.with_manual(value);
            }
            SchoolEdit::RestoreProjection { year, field } => {
                let slot = next.projection[*year].field_mut(*field);
                *slot = slot.restored();
            }
        }
        Ok(next)
    }

    /// Apply edits in order; the first failure aborts the batch.
    pub fn apply_edits(&self, edits: &[SchoolEdit], config: &GlobalConfig) -> DomainResult<School> {
        edits
            .iter()
            .try_fold(self.clone(), |school, edit| school.apply_edit(edit, config))
    }
}

fn equipment_line(school: &mut School, line_id: EquipmentLineId) -> DomainResult<&mut SchoolEquipment> {
    school
        .equipment
        .iter_mut()
        .find(|line| line.id == line_id)
        .ok_or_else(|| missing_line(line_id))
}

fn missing_line(line_id: EquipmentLineId) -> DomainError {
    DomainError::not_found(format!("equipment line {line_id}"))
}

fn finite(value: f64) -> DomainResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DomainError::validation("manual value must be a finite number"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::SchoolDraft;
    use crate::OverrideValue;
    use chrono::NaiveDate;
    use franchise_core::SchoolId;

    fn school_with_one_line(config: &GlobalConfig) -> (School, EquipmentLineId) {
        let line_id = EquipmentLineId::new();
        let school = SchoolDraft::new(
            "Colegio Americano",
            LicenseeId::new(),
            NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(),
            config,
        )
        .equipment(line_id, &CatalogItemId::new("1"), 4)
        .unwrap()
        .build(SchoolId::new())
        .unwrap();
        (school, line_id)
    }

    #[test]
    fn edits_do_not_touch_the_original() {
        let config = GlobalConfig::default();
        let (school, _) = school_with_one_line(&config);
        let edited = school
            .apply_edit(&SchoolEdit::SetStatus(SchoolStatus::Active), &config)
            .unwrap();
        assert_eq!(edited.status, SchoolStatus::Active);
        assert_eq!(school.status, SchoolStatus::Onboarding);
    }

    #[test]
    fn overriding_pricing_pins_only_when_value_differs() {
        let config = GlobalConfig::default();
        let (school, _) = school_with_one_line(&config);
        let pin = |school: &School, value: f64| {
            school.apply_edit(
                &SchoolEdit::OverridePricing {
                    field: PricingField::BestPrice,
                    value,
                },
                &config,
            )
        };

        let pinned = pin(&school, 3_900.0).unwrap();
        assert!(pinned.pricing.best_price.is_override());
        assert_eq!(pinned.pricing.best_price.final_value(), 3_900.0);

        let same = pin(&pinned, 4_200.0).unwrap();
        assert_eq!(same.pricing.best_price, OverrideValue::automatic(4_200.0));
    }

    #[test]
    fn restore_projection_field_returns_to_calculated() {
        let config = GlobalConfig::default();
        let (school, _) = school_with_one_line(&config);
        let edited = school
            .apply_edits(
                &[
                    SchoolEdit::OverrideProjection {
                        year: ContractYear::First,
                        field: ProjectionField::NetRevenue,
                        value: 9_999.0,
                    },
                    SchoolEdit::RestoreProjection {
                        year: ContractYear::First,
                        field: ProjectionField::NetRevenue,
                    },
                ],
                &config,
            )
            .unwrap();
        let net = edited.projection[ContractYear::First].net_revenue;
        assert!(!net.is_override());
        assert_eq!(net.final_value(), net.calculated());
    }

    #[test]
    fn equipment_quantity_and_total_override() {
        let config = GlobalConfig::default();
        let (school, line_id) = school_with_one_line(&config);
        let edited = school
            .apply_edits(
                &[
                    SchoolEdit::SetEquipmentQuantity { line_id, quantity: 6 },
                    SchoolEdit::OverrideEquipmentTotal {
                        line_id,
                        value: 150_000.0,
                    },
                ],
                &config,
            )
            .unwrap();
        let line = &edited.equipment[0];
        assert_eq!(line.quantity, 6);
        assert!(line.total.is_override());
        assert_eq!(line.total.final_value(), 150_000.0);
    }

    #[test]
    fn unknown_equipment_line_is_not_found() {
        let config = GlobalConfig::default();
        let (school, _) = school_with_one_line(&config);
        let err = school
            .apply_edit(&SchoolEdit::RemoveEquipment(EquipmentLineId::new()), &config)
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[test]
    fn remove_equipment_drops_the_line() {
        let config = GlobalConfig::default();
        let (school, line_id) = school_with_one_line(&config);
        let edited = school
            .apply_edit(&SchoolEdit::RemoveEquipment(line_id), &config)
            .unwrap();
        assert!(edited.equipment.is_empty());
    }

    #[test]
    fn add_equipment_rejects_duplicate_line_ids() {
        let config = GlobalConfig::default();
        let (school, line_id) = school_with_one_line(&config);
        let err = school
            .apply_edit(
                &SchoolEdit::AddEquipment {
                    line_id,
                    catalog_item_id: CatalogItemId::new("2"),
                    quantity: 1,
                },
                &config,
            )
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn added_equipment_is_resolved_from_the_current_catalog() {
        let (school, _) = school_with_one_line(&GlobalConfig::default());
        let mut config = GlobalConfig::default();
        config.catalog[2].default_unit_price = 7_500.0;
        config.catalog[3].active = false;
        let add = |item: &str| {
            school.apply_edit(
                &SchoolEdit::AddEquipment {
                    line_id: EquipmentLineId::new(),
                    catalog_item_id: CatalogItemId::new(item),
                    quantity: 2,
                },
                &config,
            )
        };

        let edited = add("3").unwrap();
        let line = &edited.equipment[1];
        assert_eq!(line.name, "VR Meta Quest");
        assert_eq!(line.unit_price.final_value(), 7_500.0);
        assert_eq!(line.quantity, 2);

        assert!(matches!(add("4"), Err(DomainError::Validation(_))));
        assert!(matches!(add("missing"), Err(DomainError::NotFound(_))));
    }

    #[test]
    fn failing_edit_aborts_the_batch() {
        let config = GlobalConfig::default();
        let (school, _) = school_with_one_line(&config);
        let result = school.apply_edits(
            &[
                SchoolEdit::SetStatus(SchoolStatus::Active),
                SchoolEdit::SetLicenseeSplit(-0.1),
            ],
            &config,
        );
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn non_finite_manual_values_are_rejected() {
        let config = GlobalConfig::default();
        let (school, _) = school_with_one_line(&config);
        let err = school
            .apply_edit(
                &SchoolEdit::OverridePricing {
                    field: PricingField::IndividualPrice,
                    value: f64::NAN,
                },
                &config,
            )
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
