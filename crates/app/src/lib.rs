//! Demo portfolio used by the `franchise-report` binary.

use anyhow::Context;
use chrono::NaiveDate;

use franchise_config::CatalogItemId;
use franchise_core::{EquipmentLineId, LicenseeId, SchoolId};
use franchise_finance::Currency;
use franchise_licensees::{LicenseeDraft, LicenseeStatus};
use franchise_payments::{PaymentDraft, PaymentType};
use franchise_registry::Registry;
use franchise_reporting::{
    late_payments, licensee_summary, portfolio_summary, split_gaps, year_reconciliation,
};
use franchise_schools::{ContractYear, SchoolDraft, SchoolProfile, SchoolStatus};

/// Catalog code of "Mesa Grande" in the default catalog.
const MESA_GRANDE: &str = "1";

/// Identifiers of the seeded records.
#[derive(Debug, Clone, Copy)]
pub struct Demo {
    pub licensee_id: LicenseeId,
    pub school_id: SchoolId,
}

fn date(y: i32, m: u32, d: u32) -> anyhow::Result<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d).with_context(|| format!("invalid date {y}-{m}-{d}"))
}

/// Seed one licensee, one active school and its first lab payment.
pub fn seed_demo(registry: &mut Registry) -> anyhow::Result<Demo> {
    let licensee = registry.add_licensee(
        LicenseeDraft::new("Epic Jalisco", date(2024, 1, 1)?, date(2027, 1, 1)?, 0.40)
            .legal_name("Soluciones Educativas SA")
            .location("México", "Jalisco", "Guadalajara")
            .contact("Juan Pérez", "contacto@epicjalisco.com", "3312345678")
            .license_type("Master")
            .status(LicenseeStatus::Active)
            .notes("Licenciatario principal región occidente."),
    )?;

    let profile = SchoolProfile {
        name: "Colegio Americano".into(),
        address: "Av. Vallarta 1234, Col. Americana".into(),
        city: "Guadalajara".into(),
        state: "Jalisco".into(),
        country: "México".into(),
        level: "Primaria/Secundaria".into(),
        contact: "Ana Martínez".into(),
        email: "ana@americano.edu.mx".into(),
        phone: "3334445556".into(),
        responsible_name: "Dr. Roberto Gómez".into(),
        responsible_phone: "3334445557".into(),
    };
    let draft = SchoolDraft::new(&profile.name, licensee.id, date(2024, 8, 1)?, registry.config())
        .profile(profile)
        .status(SchoolStatus::Active)
        .licensee_split(0.40)
        .students(ContractYear::First, 100)
        .students(ContractYear::Second, 120)
        .students(ContractYear::Third, 150)
        .equipment(EquipmentLineId::new(), &CatalogItemId::new(MESA_GRANDE), 4)?;
    let school = registry.create_school(draft)?.into_record();

    registry.add_payment(
        PaymentDraft::new(
            PaymentType::SchoolCollection,
            "Pago Inicial Lab",
            25_000.0,
            date(2024, 2, 15)?,
        )
        .school(school.id, ContractYear::First)
        .paid_on(date(2024, 2, 14)?)
        .method("Transferencia"),
    )?;

    Ok(Demo {
        licensee_id: licensee.id,
        school_id: school.id,
    })
}

/// Log the catalog, dashboard, licensee and school figures for the seeded
/// records as of `today`.
pub fn log_report(registry: &Registry, demo: &Demo, today: NaiveDate) {
    let schools = registry.schools();
    let payments = registry.payments();

    for item in registry.config().active_catalog() {
        tracing::debug!(
            item = %item.id,
            name = %item.name,
            price = %Currency(item.default_unit_price),
            "catalog item"
        );
    }

    let portfolio = portfolio_summary(&schools, &payments);
    tracing::info!(
        schools = portfolio.school_count,
        students = portfolio.first_year_students,
        gross = %Currency(portfolio.first_year_gross),
        collected = %Currency(portfolio.collected),
        pending = %Currency(portfolio.pending_amount),
        "portfolio (year 1)"
    );

    if let Ok(licensee) = registry.licensee(demo.licensee_id) {
        tracing::info!(
            licensee = %licensee.commercial_name,
            contract_end = %licensee.end_date,
            in_contract = licensee.covers(today),
            "licensee contract"
        );
    }

    let licensee = licensee_summary(demo.licensee_id, &schools);
    for year in ContractYear::ALL {
        let totals = licensee.year(year);
        tracing::info!(
            %year,
            gross = %Currency(totals.gross_revenue),
            net = %Currency(totals.net_revenue),
            benefit = %Currency(totals.licensee_benefit),
            "licensee projection"
        );
    }
    tracing::info!(
        active_schools = licensee.active_schools,
        total_net = %Currency(licensee.total_net()),
        total_benefit = %Currency(licensee.total_benefit()),
        "licensee totals"
    );

    for school in schools.iter().filter(|s| s.id == demo.school_id) {
        for year in ContractYear::ALL {
            let rec = year_reconciliation(school, year, &payments);
            tracing::info!(
                school = %school.name(),
                %year,
                due = %Currency(rec.due),
                collected = %Currency(rec.collected),
                pending = %Currency(rec.pending),
                "school reconciliation"
            );
        }
        for gap in split_gaps(school) {
            tracing::warn!(school = %school.name(), year = %gap.year, gap = %Currency(gap.gap), "splits do not add up to net revenue");
        }
    }

    for payment in late_payments(&payments, today) {
        tracing::warn!(
            concept = %payment.concept,
            scheduled = %payment.scheduled_date,
            amount = %Currency(payment.amount),
            "payment is late"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_portfolio_matches_hand_computed_figures() {
        let mut registry = Registry::default();
        let demo = seed_demo(&mut registry).unwrap();

        let school = registry.school(demo.school_id).unwrap().into_record();
        assert_eq!(school.name(), "Colegio Americano");
        assert_eq!(school.profile.city, "Guadalajara");

        let summary = licensee_summary(demo.licensee_id, &registry.schools());
        assert_eq!(summary.active_schools, 1);
        assert_eq!(summary.year(ContractYear::First).net_revenue, 160_000.0);
        assert_eq!(summary.year(ContractYear::Second).net_revenue, 304_000.0);
        assert_eq!(summary.year(ContractYear::Third).net_revenue, 400_000.0);
        assert_eq!(Currency(summary.total_net()).to_string(), "$864,000.00");

        let rec = year_reconciliation(&school, ContractYear::First, &registry.payments());
        assert_eq!(rec.collected, 25_000.0);
        assert_eq!(Currency(rec.pending).to_string(), "$395,000.00");
    }

    #[test]
    fn report_logs_without_a_subscriber() {
        let mut registry = Registry::default();
        let demo = seed_demo(&mut registry).unwrap();
        log_report(&registry, &demo, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
    }
}
