use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use franchise_config::GlobalConfig;
use franchise_core::{EquipmentLineId, LicenseeId, SchoolId};
use franchise_finance::{format_currency, recompute};
use franchise_schools::{ContractYear, School, SchoolDraft};

fn school_with_lines(config: &GlobalConfig, lines: usize) -> School {
    let mut draft = SchoolDraft::new(
        "Bench School",
        LicenseeId::new(),
        NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(),
        config,
    )
    .students(ContractYear::First, 100)
    .students(ContractYear::Second, 120)
    .students(ContractYear::Third, 150);
    for i in 0..lines {
        let item = &config.catalog[i % config.catalog.len()];
        draft = draft.equipment(EquipmentLineId::new(), &item.id, 2).unwrap();
    }
    draft.build(SchoolId::new()).unwrap()
}

fn bench_recompute(c: &mut Criterion) {
    let config = GlobalConfig::default();
    let mut group = c.benchmark_group("recompute");

    for lines in [0usize, 8, 64] {
        let school = school_with_lines(&config, lines);
        group.bench_function(format!("{lines}_equipment_lines"), |b| {
            b.iter(|| recompute(black_box(&school), black_box(&config)))
        });
    }

    group.finish();
}

fn bench_format_currency(c: &mut Criterion) {
    c.bench_function("format_currency", |b| {
        b.iter(|| format_currency(black_box(1_234_567.891)))
    });
}

criterion_group!(benches, bench_recompute, bench_format_currency);
criterion_main!(benches);
