//! School projection engine.
//!
//! Order of evaluation for one pass:
//!
//! 1. Equipment: `total = quantity × unit_price.final`; the equipment base is
//!    the sum of the effective (`final`) line totals.
//! 2. Each contract year, independently: gross revenue, management cost and
//!    lab investment, then net revenue, then the two splits.
//!
//! Prices are inputs. The four per-student figures and each line's unit price
//! are copied from the configuration when the school or line is created and
//! only change through edits; a pass never reads them from the config again.
//!
//! Every derived field goes through [`OverrideValue::refreshed`], so pinned
//! values keep their `final` while their `calculated` is brought up to date.

use franchise_config::GlobalConfig;
use franchise_schools::{
    ContractYear, FinancialYear, OverrideValue, ProgramType, School, SchoolEquipment,
};

/// Share of the equipment base re-invested in contract years 2 and 3.
///
/// Each of those years carries the same half; the reduction does not compound.
pub const LAB_REINVESTMENT_RATE: f64 = 0.5;

/// Recompute every derived figure of `school`.
///
/// Pure and total: any finite input yields a result (negative student counts
/// or prices simply produce negative figures), and running it twice with the
/// same override flags yields the same school. Override flags are never
/// changed here; only an explicit edit pins or releases a value.
///
/// `_config` is part of the engine contract; the current formulas take every
/// price from the school itself.
pub fn recompute(school: &School, _config: &GlobalConfig) -> School {
    let mut next = school.clone();

    next.equipment = school.equipment.iter().map(refresh_line_total).collect();

    let base = equipment_base(&next.equipment);
    for year in ContractYear::ALL {
        next.projection[year] = project_year(&next, year, base);
    }

    tracing::trace!(
        school_id = %next.id,
        equipment_base = base,
        "recomputed school projection"
    );
    next
}

/// Sum of the effective line totals (pinned totals included as pinned).
pub fn equipment_base(equipment: &[SchoolEquipment]) -> f64 {
    equipment.iter().map(|line| line.total.final_value()).sum()
}

fn refresh_line_total(line: &SchoolEquipment) -> SchoolEquipment {
    let total = line
        .total
        .refreshed(line.quantity as f64 * line.unit_price.final_value());
    SchoolEquipment {
        total,
        ..line.clone()
    }
}

fn project_year(school: &School, year: ContractYear, equipment_base: f64) -> FinancialYear {
    let current = school.projection[year];
    let students = current.students as f64;
    let pricing = &school.pricing;

    let (gross, management) = match school.program {
        ProgramType::Best => (
            students * pricing.best_price.final_value(),
            students * pricing.best_management_cost.final_value(),
        ),
        ProgramType::Individual => {
            let programs = f64::from(school.individual_programs);
            (
                students * (programs * pricing.individual_price.final_value()),
                students * (programs * pricing.individual_management_cost.final_value()),
            )
        }
    };

    let lab = match year {
        ContractYear::First => equipment_base,
        ContractYear::Second | ContractYear::Third => equipment_base * LAB_REINVESTMENT_RATE,
    };

    let gross_revenue = current.gross_revenue.refreshed(gross);
    let management_cost = current.management_cost.refreshed(management);
    let lab_investment = current.lab_investment.refreshed(lab);

    let net_revenue = current.net_revenue.refreshed(
        gross_revenue.final_value() - management_cost.final_value() - lab_investment.final_value(),
    );

    let split = school.licensee_split;
    let (licensee_split, licensor_split) = split_net(
        current.licensee_split,
        current.licensor_split,
        net_revenue,
        split,
    );

    FinancialYear {
        students: current.students,
        gross_revenue,
        management_cost,
        lab_investment,
        net_revenue,
        licensee_split,
        licensor_split,
    }
}

/// Both splits derive from the effective net; each may be pinned on its own,
/// in which case the pair no longer has to add up to net.
fn split_net(
    licensee: OverrideValue<f64>,
    licensor: OverrideValue<f64>,
    net_revenue: OverrideValue<f64>,
    split: f64,
) -> (OverrideValue<f64>, OverrideValue<f64>) {
    let net = net_revenue.final_value();
    (
        licensee.refreshed(net * split),
        licensor.refreshed(net * (1.0 - split)),
    )
}
