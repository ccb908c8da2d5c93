//! The top-level owner of all franchise state.
//!
//! Write path for schools:
//!
//! ```text
//! SchoolDraft / SchoolEdit
//!   ↓
//! validate (draft or edit rules, licensee reference)
//!   ↓
//! recompute against the current GlobalConfig
//!   ↓
//! store with version + 1
//! ```

use franchise_config::GlobalConfig;
use franchise_core::{
    AggregateRoot, DomainError, DomainResult, ExpectedVersion, LicenseeId, PaymentId, SchoolId,
};
use franchise_finance::recompute;
use franchise_licensees::{validate as validate_licensee, Licensee, LicenseeDraft};
use franchise_payments::{validate as validate_payment, Payment, PaymentDraft};
use franchise_schools::{validate as validate_school, School, SchoolDraft, SchoolEdit};

use crate::record::Versioned;
use crate::store::{InMemoryRecordStore, RecordStore};

/// In-memory registry. Mutations take `&mut self`, so writes are serialized
/// by the borrow checker.
#[derive(Debug)]
pub struct Registry {
    config: GlobalConfig,
    licensees: InMemoryRecordStore<LicenseeId, Licensee>,
    schools: InMemoryRecordStore<SchoolId, Versioned<School>>,
    payments: InMemoryRecordStore<PaymentId, Payment>,
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            config: GlobalConfig::default(),
            licensees: InMemoryRecordStore::new(),
            schools: InMemoryRecordStore::new(),
            payments: InMemoryRecordStore::new(),
        }
    }
}

impl Registry {
    pub fn new(config: GlobalConfig) -> DomainResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    pub fn config(&self) -> &GlobalConfig {
        &self.config
    }

    /// Replace the configuration and recompute every stored school against
    /// it. Prices are snapshots on each school, so a new config does not
    /// reprice anything; only schools whose figures actually change are
    /// stored again. Returns how many were.
    pub fn update_config(&mut self, config: GlobalConfig) -> DomainResult<usize> {
        config.validate()?;
        self.config = config;

        let mut changed = 0;
        for current in self.schools.list() {
            let next = recompute(current.record(), &self.config);
            if &next != current.record() {
                self.schools.upsert(next.id, current.next(next));
                changed += 1;
            }
        }

        tracing::info!(schools_changed = changed, "global configuration updated");
        Ok(changed)
    }

    pub fn add_licensee(&mut self, draft: LicenseeDraft) -> DomainResult<Licensee> {
        let licensee = draft.build(LicenseeId::new())?;
        self.licensees.upsert(licensee.id, licensee.clone());
        tracing::info!(licensee_id = %licensee.id, name = %licensee.commercial_name, "licensee added");
        Ok(licensee)
    }

    pub fn update_licensee(&mut self, licensee: Licensee) -> DomainResult<Licensee> {
        self.licensee(licensee.id)?;
        validate_licensee(&licensee)?;
        self.licensees.upsert(licensee.id, licensee.clone());
        Ok(licensee)
    }

    pub fn licensee(&self, id: LicenseeId) -> DomainResult<Licensee> {
        self.licensees
            .get(&id)
            .ok_or_else(|| DomainError::not_found(format!("licensee {id}")))
    }

    pub fn licensees(&self) -> Vec<Licensee> {
        self.licensees.list()
    }

    /// Remove a licensee. Refused while any school still points at it.
    pub fn delete_licensee(&mut self, id: LicenseeId) -> DomainResult<Licensee> {
        let referencing = self.schools_of(id).len();
        if referencing > 0 {
            return Err(DomainError::conflict(format!(
                "licensee {id} still has {referencing} school(s)"
            )));
        }
        let removed = self
            .licensees
            .remove(&id)
            .ok_or_else(|| DomainError::not_found(format!("licensee {id}")))?;
        tracing::info!(licensee_id = %id, "licensee deleted");
        Ok(removed)
    }

    /// Move every school of `from` to `to`. Returns how many moved.
    pub fn reassign_schools(&mut self, from: LicenseeId, to: LicenseeId) -> DomainResult<usize> {
        self.licensee(to)?;
        if from == to {
            return Ok(0);
        }

        let mut moved = 0;
        for current in self.schools.list() {
            if current.record().licensee_id != from {
                continue;
            }
            let next = current
                .record()
                .apply_edit(&SchoolEdit::AssignLicensee(to), &self.config)?;
            let next = recompute(&next, &self.config);
            self.schools.upsert(next.id, current.next(next));
            moved += 1;
        }

        tracing::info!(from = %from, to = %to, schools = moved, "schools reassigned");
        Ok(moved)
    }

    /// Validate, recompute and store a new school at version 1.
    pub fn create_school(&mut self, draft: SchoolDraft) -> DomainResult<Versioned<School>> {
        let school = draft.build(SchoolId::new())?;
        self.licensee(school.licensee_id)?;

        let stored = Versioned::first(recompute(&school, &self.config));
        self.schools.upsert(school.id, stored.clone());
        tracing::info!(school_id = %school.id, name = %school.name(), "school created");
        Ok(stored)
    }

    /// Apply `edits` in order as one change. Equipment is resolved against
    /// the current catalog. Nothing is stored if any edit fails or the stored
    /// version does not match `expected`.
    pub fn edit_school(
        &mut self,
        id: SchoolId,
        expected: ExpectedVersion,
        edits: &[SchoolEdit],
    ) -> DomainResult<Versioned<School>> {
        let current = self.school(id)?;
        expected.check(current.version())?;

        let edited = current.record().apply_edits(edits, &self.config)?;
        if edited.licensee_id != current.record().licensee_id {
            self.licensee(edited.licensee_id)?;
        }

        let stored = current.next(recompute(&edited, &self.config));
        self.schools.upsert(id, stored.clone());
        tracing::debug!(school_id = %id, version = stored.version(), edits = edits.len(), "school edited");
        Ok(stored)
    }

    pub fn school(&self, id: SchoolId) -> DomainResult<Versioned<School>> {
        self.schools
            .get(&id)
            .ok_or_else(|| DomainError::not_found(format!("school {id}")))
    }

    pub fn schools(&self) -> Vec<School> {
        self.schools
            .list()
            .into_iter()
            .map(Versioned::into_record)
            .collect()
    }

    pub fn schools_of(&self, licensee_id: LicenseeId) -> Vec<School> {
        self.schools()
            .into_iter()
            .filter(|s| s.licensee_id == licensee_id)
            .collect()
    }

    /// Remove a school together with every payment that references it.
    pub fn delete_school(&mut self, id: SchoolId) -> DomainResult<School> {
        let removed = self
            .schools
            .remove(&id)
            .ok_or_else(|| DomainError::not_found(format!("school {id}")))?;

        let orphaned: Vec<PaymentId> = self
            .payments
            .list()
            .iter()
            .filter(|p| p.belongs_to(id))
            .map(|p| p.id)
            .collect();
        for payment_id in &orphaned {
            self.payments.remove(payment_id);
        }

        tracing::info!(school_id = %id, payments = orphaned.len(), "school deleted");
        Ok(removed.into_record())
    }

    pub fn add_payment(&mut self, draft: PaymentDraft) -> DomainResult<Payment> {
        let payment = draft.build(PaymentId::new())?;
        self.check_payment_reference(&payment)?;
        self.payments.upsert(payment.id, payment.clone());
        tracing::info!(payment_id = %payment.id, amount = payment.amount, "payment recorded");
        Ok(payment)
    }

    pub fn update_payment(&mut self, payment: Payment) -> DomainResult<Payment> {
        self.payment(payment.id)?;
        validate_payment(&payment)?;
        self.check_payment_reference(&payment)?;
        self.payments.upsert(payment.id, payment.clone());
        Ok(payment)
    }

    pub fn payment(&self, id: PaymentId) -> DomainResult<Payment> {
        self.payments
            .get(&id)
            .ok_or_else(|| DomainError::not_found(format!("payment {id}")))
    }

    pub fn payments(&self) -> Vec<Payment> {
        self.payments.list()
    }

    pub fn delete_payment(&mut self, id: PaymentId) -> DomainResult<Payment> {
        self.payments
            .remove(&id)
            .ok_or_else(|| DomainError::not_found(format!("payment {id}")))
    }

    fn check_payment_reference(&self, payment: &Payment) -> DomainResult<()> {
        match payment.reference_id {
            Some(school_id) if !self.schools.contains(&school_id) => {
                Err(DomainError::not_found(format!("school {school_id}")))
            }
            _ => Ok(()),
        }
    }

    pub(crate) fn stored_schools(&self) -> Vec<Versioned<School>> {
        self.schools.list()
    }

    /// Rebuild a registry from raw parts, applying the same checks as the
    /// individual operations. Schools are recomputed against `config`.
    pub(crate) fn restore(
        config: GlobalConfig,
        licensees: Vec<Licensee>,
        schools: Vec<Versioned<School>>,
        payments: Vec<Payment>,
    ) -> DomainResult<Self> {
        let registry = Self::new(config)?;

        for licensee in licensees {
            validate_licensee(&licensee)?;
            if registry.licensees.contains(&licensee.id) {
                return Err(DomainError::conflict(format!(
                    "duplicate licensee {}",
                    licensee.id
                )));
            }
            registry.licensees.upsert(licensee.id, licensee);
        }

        for stored in schools {
            let school = stored.record();
            validate_school(school)?;
            registry.licensee(school.licensee_id)?;
            if registry.schools.contains(&school.id) {
                return Err(DomainError::conflict(format!("duplicate school {}", school.id)));
            }
            let version = stored.version();
            if version == 0 {
                return Err(DomainError::invariant(format!(
                    "school {} stored at version 0",
                    school.id
                )));
            }
            let recomputed = recompute(school, &registry.config);
            registry
                .schools
                .upsert(recomputed.id, Versioned::at(version, recomputed));
        }

        for payment in payments {
            validate_payment(&payment)?;
            registry.check_payment_reference(&payment)?;
            if registry.payments.contains(&payment.id) {
                return Err(DomainError::conflict(format!(
                    "duplicate payment {}",
                    payment.id
                )));
            }
            registry.payments.upsert(payment.id, payment);
        }

        tracing::info!(
            licensees = registry.licensees.list().len(),
            schools = registry.schools.list().len(),
            payments = registry.payments.list().len(),
            "registry restored"
        );
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn registry_with_licensee() -> (Registry, Licensee) {
        let mut registry = Registry::default();
        let licensee = registry
            .add_licensee(LicenseeDraft::new(
                "Epic Jalisco",
                date(2024, 1, 1),
                date(2026, 12, 31),
                0.4,
            ))
            .unwrap();
        (registry, licensee)
    }

    #[test]
    fn new_rejects_invalid_config() {
        let mut config = GlobalConfig::default();
        config.default_split = 1.5;
        assert!(matches!(Registry::new(config), Err(DomainError::Validation(_))));
    }

    #[test]
    fn school_requires_existing_licensee() {
        let mut registry = Registry::default();
        let draft = SchoolDraft::new(
            "Colegio",
            LicenseeId::new(),
            date(2024, 8, 1),
            registry.config(),
        );
        assert!(matches!(
            registry.create_school(draft),
            Err(DomainError::NotFound(_))
        ));
        assert!(registry.schools().is_empty());
    }

    #[test]
    fn stored_school_is_recomputed_at_version_one() {
        let (mut registry, licensee) = registry_with_licensee();
        let draft = SchoolDraft::new("Colegio", licensee.id, date(2024, 8, 1), registry.config())
            .students(franchise_schools::ContractYear::First, 10);

        let stored = registry.create_school(draft).unwrap();
        assert_eq!(stored.version(), 1);
        let first = &stored.record().projection[franchise_schools::ContractYear::First];
        assert_eq!(first.gross_revenue.final_value(), 42_000.0);
    }
}
