//! Search filter benchmarks.
//!
//! The filter runs on every keystroke in a query bar and on every redraw, so
//! it has to stay well under a frame even for collections far larger than
//! the dashboard ever holds.
//!
//! # Groups
//!
//! | Group | What it measures |
//! |-------|-----------------|
//! | `users/query` | One query against 10k users at different hit rates |
//! | `users/scaling` | A fixed query as the collection grows from 100 to 100k |
//! | `notifications` | A full notification center per redraw |
//!
//! # Viewing results
//!
//! ```sh
//! cargo bench --bench filter_bench
//! open target/criterion/report/index.html
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dashdeck_core::{
    filter,
    types::{Role, User, UserStatus},
    NotificationCenter,
};
use std::hint::black_box;

/// `n` users; every tenth one is an editor named after a planet.
fn users(n: usize) -> Vec<User> {
    const PLANETS: &[&str] = &["Mercury", "Venus", "Mars", "Jupiter", "Saturn"];
    (0..n)
        .map(|i| {
            let editor = i % 10 == 0;
            let name = if editor {
                format!("{} {i}", PLANETS[(i / 10) % PLANETS.len()])
            } else {
                format!("User {i}")
            };
            User {
                id: (i + 1).to_string(),
                email: format!("user{i}@example.com"),
                name,
                role: if editor { Role::Editor } else { Role::Viewer },
                status: UserStatus::Active,
                last_active: "Never".to_string(),
            }
        })
        .collect()
}

fn query_bench(c: &mut Criterion) {
    let data = users(10_000);
    let mut group = c.benchmark_group("users/query");
    group.throughput(Throughput::Elements(data.len() as u64));

    for (label, query) in [
        ("empty", ""),
        ("all_hit", "example.com"),
        ("10pct_hit", "editor"),
        ("2pct_hit", "MARS"),
        ("no_hit", "zzzz"),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(label), &query, |b, q| {
            b.iter(|| filter(black_box(&data), black_box(q)).len())
        });
    }
    group.finish();
}

fn scaling_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("users/scaling");
    for n in [100, 1_000, 10_000, 100_000] {
        let data = users(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &data, |b, data| {
            b.iter(|| filter(black_box(data), black_box("editor")).len())
        });
    }
    group.finish();
}

fn notification_bench(c: &mut Criterion) {
    let mut center = NotificationCenter::new(10);
    for i in 0..10 {
        center.add(format!("New order received {i}"), format!("Order #{} has been placed", 1200 + i));
    }
    c.bench_function("notifications/redraw_query", |b| {
        b.iter(|| filter(center.iter(), black_box("#121")).len())
    });
}

criterion_group!(benches, query_bench, scaling_bench, notification_bench);
criterion_main!(benches);
