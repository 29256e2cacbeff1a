// Advisor Benchmarks
//
// Run with: cargo bench --bench advisor

use aquarium_advisor::{AquariumAdvisor, Catalog, SpeciesRecord};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const GENERA: [&str; 8] = [
    "Tetra", "Barb", "Danio", "Rasbora", "Cichlid", "Gourami", "Pleco", "Loach",
];
const PREFIXES: [&str; 12] = [
    "Neon", "Cardinal", "Tiger", "Cherry", "Zebra", "Pearl", "Dwarf", "Golden",
    "Harlequin", "Bristlenose", "Kuhli", "Rummy-nose",
];

/// Deterministic catalog of GENERA x PREFIXES x variants species
fn synthetic_catalog(variants: usize) -> Catalog {
    let mut records = Vec::new();
    for (g, genus) in GENERA.iter().enumerate() {
        for (p, prefix) in PREFIXES.iter().enumerate() {
            for v in 0..variants {
                let base = (g * 3 + p + v) as f64;
                records.push(SpeciesRecord {
                    name: format!("{} {} {}", prefix, genus, v),
                    tank_size_liter: Some(20.0 + base * 7.5),
                    temperature_min: Some(18.0 + (base % 6.0)),
                    temperature_max: Some(24.0 + (base % 6.0)),
                    ph_min: Some(6.0 + (base % 3.0) * 0.2),
                    ph_max: Some(7.0 + (base % 3.0) * 0.3),
                    max_size_cm: Some(3.0 + base % 25.0),
                    ..Default::default()
                });
            }
        }
    }
    Catalog::from_records(records)
}

fn bench_lookup(c: &mut Criterion) {
    let advisor = AquariumAdvisor::new(synthetic_catalog(10));

    c.bench_function("lookup_exact", |b| {
        b.iter(|| advisor.lookup_species(black_box("Neon Tetra 3")))
    });
    c.bench_function("lookup_misspelled", |b| {
        b.iter(|| advisor.lookup_species(black_box("neon tetr 3")))
    });
}

fn bench_aggregate(c: &mut Criterion) {
    let advisor = AquariumAdvisor::new(synthetic_catalog(10));
    let names = [
        "cardnal tetra 1",
        "tiger barb 2",
        "zebra danio 4",
        "pearl gourami 0",
        "kuhli loach 7",
    ];

    c.bench_function("aggregate_five_names", |b| {
        b.iter(|| advisor.aggregate_environment(black_box(&names)))
    });
}

fn bench_stocking(c: &mut Criterion) {
    let advisor = AquariumAdvisor::new(synthetic_catalog(10));

    c.bench_function("recommend_stocking", |b| {
        b.iter(|| advisor.recommend_stocking(black_box(80.0), 35.0, 45.0, black_box(25.0)))
    });
}

criterion_group!(benches, bench_lookup, bench_aggregate, bench_stocking);
criterion_main!(benches);
