//! Benchmarks for feature matrix construction
//!
//! Run with: cargo bench --package pipeline
//!
//! Uses a synthetic catalog the size of the fetched dataset (500 items).

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use data_loader::{CastMember, Catalog, Item};
use pipeline::{build_favorite_context, build_feature_matrix};

const WORDS: &[&str] = &[
    "robot", "espacio", "familia", "venganza", "ciudad", "guerra", "amor", "misterio",
    "detective", "dragón", "reino", "viaje", "tiempo", "planeta", "equipo", "secreto",
];

fn synthetic_catalog(size: u32) -> Catalog {
    let items = (0..size)
        .map(|id| {
            let mut item = Item::new(id, format!("Movie {}", id));
            item.overview = (0..30)
                .map(|w| WORDS[((id * 7 + w * 13) as usize) % WORDS.len()])
                .collect::<Vec<_>>()
                .join(" ");
            item.genre_ids = vec![28 + id % 5, 12 + id % 3];
            item.cast = (0..10)
                .map(|c| CastMember::new(format!("Actor{} Surname{}", (id + c) % 97, c)))
                .collect();
            item
        })
        .collect();
    Catalog::new(items)
}

fn bench_build_matrix(c: &mut Criterion) {
    let catalog = synthetic_catalog(500);

    c.bench_function("build_feature_matrix", |b| {
        b.iter(|| {
            let matrix = build_feature_matrix(black_box(&catalog));
            black_box(matrix)
        })
    });
}

fn bench_profile_similarities(c: &mut Criterion) {
    let catalog = synthetic_catalog(500);
    let matrix = build_feature_matrix(&catalog);
    let favorites: Vec<data_loader::Favorite> =
        [3, 40, 77].into_iter().map(data_loader::Favorite::new).collect();
    let context = build_favorite_context(&catalog, &favorites);

    c.bench_function("profile_similarities", |b| {
        b.iter(|| {
            let profile = matrix.profile(black_box(&context.positions)).unwrap();
            black_box(matrix.similarities(&profile))
        })
    });
}

criterion_group!(benches, bench_build_matrix, bench_profile_similarities);
criterion_main!(benches);
