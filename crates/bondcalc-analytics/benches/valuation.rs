//! Benchmarks for the valuation engine.
//!
//! Run with: cargo bench -p bondcalc-analytics

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use bondcalc_analytics::prelude::*;

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

fn create_test_bond(years: i64) -> BondSpec {
    let valuation = Date::from_ymd(2025, 3, 14).unwrap();
    BondSpec::new(1000.0, 0.045, 0.052, valuation + years * 365 + 97, valuation).unwrap()
}

fn create_test_requests(count: usize) -> Vec<ValuationRequest> {
    let coupons = [2.0, 2.5, 3.0, 3.5, 4.0, 4.5, 5.0];
    let maturities = [2026, 2027, 2028, 2030, 2032, 2035, 2040, 2045, 2055];

    (0..count)
        .map(|i| ValuationRequest {
            principal: 1000.0,
            coupon_rate_percent: coupons[i % coupons.len()],
            ytm_percent: 4.0 + (i % 10) as f64 * 0.1,
            maturity_date: format!("{}-06-15", maturities[i % maturities.len()]),
            valuation_date: Some("2025-03-14".to_string()),
        })
        .collect()
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_schedule(c: &mut Criterion) {
    let mut group = c.benchmark_group("schedule");

    for years in [1, 10, 30] {
        let spec = create_test_bond(years);
        group.bench_with_input(BenchmarkId::new("annual", years), &spec, |b, spec| {
            b.iter(|| {
                AnnualSchedule.build(black_box(spec.valuation_date()), black_box(spec.maturity_date()))
            });
        });
    }

    group.finish();
}

fn bench_valuation(c: &mut Criterion) {
    let mut group = c.benchmark_group("valuation");

    for years in [1, 10, 30] {
        let spec = create_test_bond(years);
        group.bench_with_input(BenchmarkId::new("result", years), &spec, |b, spec| {
            b.iter(|| BondValuation::new(black_box(*spec)).and_then(|bond| bond.result()));
        });
        group.bench_with_input(BenchmarkId::new("report", years), &spec, |b, spec| {
            b.iter(|| BondValuation::new(black_box(*spec)).and_then(|bond| bond.report()));
        });
    }

    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch");
    let default_date = Date::from_ymd(2025, 3, 14).unwrap();

    for size in [100, 1000] {
        let requests = create_test_requests(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("valuate_on", size), &requests, |b, requests| {
            b.iter(|| {
                requests
                    .iter()
                    .map(|r| valuate_on(black_box(r), default_date))
                    .filter(Result::is_ok)
                    .count()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_schedule, bench_valuation, bench_batch);
criterion_main!(benches);
