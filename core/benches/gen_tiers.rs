use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use flipsweep_core::*;

const TIERS: [(&str, Coord2, f64); 4] = [
    ("beginner", (9, 9), 0.123),
    ("intermediate", (16, 16), 0.156),
    ("expert", (30, 16), 0.206),
    ("huge", (255, 255), 0.2),
];

fn gen_tiers(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for (name, size, density) in TIERS {
        let config = GameConfig::new(size, density).expect("valid tier");
        group.bench_function(name, |b| {
            let mut seed = 0;
            b.iter(|| {
                seed += 1;
                black_box(RandomMinefieldGenerator::new(seed).generate(black_box(config)))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, gen_tiers);
criterion_main!(benches);
