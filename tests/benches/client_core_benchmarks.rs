//! # Client Core Benchmarks
//!
//! | Path | Work per call |
//! |------|---------------|
//! | build | validate + map one request to a payload |
//! | layout | 5 × up to 30 glyph positions |
//! | decode | project one `KredithScore` into a `BusinessView` |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ld_01_transaction_builder::{build, ContractConfig, MutationRequest, Topping, ToppingCounts};
use ld_02_read_model::{pizza_layout, topping_positions, BusinessView, Projection};
use ld_tests::fixtures::business_object;
use shared_types::ObjectId;

fn bench_build(c: &mut Criterion) {
    let contract = ContractConfig::for_testing();
    let business = ObjectId::from_bytes([1; 32]);
    let mut group = c.benchmark_group("ld-01-build");

    group.bench_function("register", |b| {
        b.iter(|| {
            let request = MutationRequest::register("Kopi Senja", "F&B");
            let validated = request.validate().unwrap();
            black_box(build(&validated, &contract).unwrap())
        })
    });
    group.bench_function("record_revenue", |b| {
        b.iter(|| {
            let request = MutationRequest::record_revenue(business.clone(), 15_000_000, "Sales");
            let validated = request.validate().unwrap();
            black_box(build(&validated, &contract).unwrap())
        })
    });
    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("ld-02-layout");
    for count in [1u32, 10, 30] {
        group.bench_with_input(BenchmarkId::new("topping_positions", count), &count, |b, &n| {
            b.iter(|| black_box(topping_positions(n, 3)))
        });
    }

    let mut full = ToppingCounts::default();
    for topping in Topping::ALL {
        full.set(topping, 30);
    }
    group.bench_function("pizza_layout_full", |b| {
        b.iter(|| black_box(pizza_layout(&full)))
    });
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let object = business_object(&ObjectId::from_bytes([2; 32]), 7, "Kopi Senja", 15_000_000);
    c.bench_function("ld-02-decode-business", |b| {
        b.iter(|| black_box(BusinessView::decode(&object).unwrap()))
    });
}

criterion_group!(benches, bench_build, bench_layout, bench_decode);
criterion_main!(benches);
