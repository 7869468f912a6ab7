//! Benchmarks for layout construction and search.
//!
//! # Benchmarks
//!
//! - **`initial_layout`**: classification and greedy placement of a mixed
//!   36-item pool.
//! - **`evaluate`**: scoring of the initial layout.
//! - **`search_1000`**: 1000 hill-climbing steps from the initial layout, for
//!   each seed below.
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench solver
//! ```

use std::{hint, str::FromStr as _, time::Duration};

use criterion::{
    BatchSize, BenchmarkId, Criterion, PlottingBackend, criterion_group, criterion_main,
};
use sephiria_core::{
    Artifact, ArtifactFlags, CHALCEDONY_KEY, DEVOTION_BADGE, DirectionKey, DirectionValue, Item,
    Keyword, Offset, ScaleSide, Tablet,
};
use sephiria_solver::{LocalSearch, SearchLimits, SearchSeed, Solution, evaluate};

const CAPACITY: usize = 36;

const SEEDS: [&str; 3] = [
    "0f3a9c5e7b21d4486a0ce19f53b7d2a84c6e1f0937b5a2d8e4c7196f0a3b5d27",
    "7d52e81b4fa03c96e2b7054d8a1f6c3e9b20d47a5c8e13f6024b9d7e1a5c3f80",
    "b8e4162d9f0c5a73e1d8b24f6093c7a5d2e81f4b0c69a37e5d1f82b4c0a6e913",
];

fn pool() -> Vec<Item> {
    let mut items: Vec<Item> = Vec::new();
    for i in 0..12 {
        let offsets = [
            (DirectionKey::Offset(Offset::new(1, 0)), DirectionValue::Amount(i % 4 + 1)),
            (DirectionKey::Linear(-6), DirectionValue::Amount(1)),
        ];
        items.push(Tablet::new(format!("Arrow {i}"), offsets, i % 3 != 0).into());
    }
    items.push(
        Tablet::new(
            "Beam",
            [(DirectionKey::Keyword(Keyword::Row), DirectionValue::Unlock)],
            true,
        )
        .into(),
    );
    items.push(
        Artifact::new("Shining Hourglass", 3)
            .with_flags(ArtifactFlags::HOURGLASS)
            .into(),
    );
    items.push(Artifact::new("Tome", 3).with_flags(ArtifactFlags::SPELL).into());
    items.push(Artifact::new(DEVOTION_BADGE, 3).into());
    for i in 0..4 {
        items.push(
            Artifact::new(format!("Squire {i}"), 3)
                .with_flags(ArtifactFlags::UNIT | ArtifactFlags::DEVOTION)
                .into(),
        );
    }
    items.push(Artifact::new(CHALCEDONY_KEY, 5).with_combo(["ember"]).into());
    items.push(
        Artifact::new("Balance", 4)
            .with_scale(Some(ScaleSide::Right))
            .with_priority(true)
            .into(),
    );
    for i in 0..12 {
        items.push(Artifact::new(format!("Ring {i}"), 5).with_enchant(i % 6).into());
    }
    items
}

fn bench_initial_layout(c: &mut Criterion) {
    let items = pool();
    let topology = Solution::topology_for(CAPACITY);
    c.bench_function("initial_layout", |b| {
        b.iter(|| Solution::initial(CAPACITY, hint::black_box(&items), &topology));
    });
}

fn bench_evaluate(c: &mut Criterion) {
    let items = pool();
    let solution = Solution::initial(CAPACITY, &items, &Solution::topology_for(CAPACITY));
    c.bench_function("evaluate", |b| {
        b.iter(|| evaluate(hint::black_box(solution.grid()), &items));
    });
}

fn bench_search(c: &mut Criterion) {
    let items = pool();
    let topology = Solution::topology_for(CAPACITY);
    let initial = Solution::initial(CAPACITY, &items, &topology);
    let limits = SearchLimits::with_time(Duration::from_secs(60)).max_iterations(1_000);

    for (i, seed) in SEEDS.into_iter().enumerate() {
        let seed = SearchSeed::from_str(seed).unwrap();
        c.bench_with_input(
            BenchmarkId::new("search_1000", format!("seed_{i}")),
            &seed,
            |b, seed| {
                b.iter_batched(
                    || LocalSearch::from_solution(initial.clone(), &items, seed.rng_for(0)),
                    |search| search.run(limits),
                    BatchSize::SmallInput,
                );
            },
        );
    }
}

criterion_group!(
    name = benches;
    config =
        Criterion::default()
            .plotting_backend(PlottingBackend::Plotters);
    targets =
        bench_initial_layout,
        bench_evaluate,
        bench_search
);
criterion_main!(benches);
