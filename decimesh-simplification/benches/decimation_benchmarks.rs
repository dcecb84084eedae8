//! Benchmarks for edge-collapse decimation with and without boundary closing

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use decimesh_core::primitives::grid;
use decimesh_core::TriangleMesh;
use decimesh_simplification::{decimate, DecimationConfig, DecimationSession, shortest_edge_and_midpoint};
use std::f64::consts::PI;

/// `size` x `size` vertex grid bent into one bump of height 2.
fn wave_grid(size: usize) -> TriangleMesh {
    let mut mesh = grid(size - 1, size - 1);
    let span = (size - 1) as f64;
    for v in &mut mesh.vertices {
        v.z = (v.x / span * PI).sin() * (v.y / span * PI).sin() * 2.0;
    }
    mesh
}

fn bench_decimation(c: &mut Criterion) {
    let sizes = [20, 50, 100];
    let ratios = [0.5, 0.1];

    let mut group = c.benchmark_group("decimation");

    for &size in &sizes {
        let mesh = wave_grid(size);
        let face_count = mesh.face_count();

        for &ratio in &ratios {
            for close_boundary in [false, true] {
                let name = if close_boundary { "closed" } else { "open" };
                let config = DecimationConfig::new()
                    .with_target_ratio(ratio)
                    .with_close_boundary(close_boundary);
                group.bench_with_input(
                    BenchmarkId::new(name, format!("{}f_r{}", face_count, (ratio * 100.0) as u32)),
                    &(&mesh, config),
                    |b, (mesh, config)| {
                        b.iter(|| {
                            let output = decimate(black_box(mesh), config).unwrap();
                            black_box(output);
                        });
                    },
                );
            }
        }
    }

    group.finish();
}

fn bench_seeding(c: &mut Criterion) {
    let mesh = wave_grid(200);
    let mut group = c.benchmark_group("seeding");

    for parallel in [false, true] {
        let name = if parallel { "parallel" } else { "sequential" };
        group.bench_function(BenchmarkId::new(name, mesh.face_count()), |b| {
            b.iter(|| {
                let mut session = DecimationSession::new(black_box(&mesh)).unwrap();
                session.seed(&shortest_edge_and_midpoint, parallel);
                black_box(session.queued());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_decimation, bench_seeding);
criterion_main!(benches);
