use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use femmesh_io::prelude::*;

/// Structured hex mesh of `n * n * n` cells with one boundary group.
fn build_hex_block(n: u64) -> FemMesh {
    let stride = n + 1;
    let node = |i: u64, j: u64, k: u64| 1 + i + j * stride + k * stride * stride;

    let mut mesh = FemMesh::new();
    for k in 0..=n {
        for j in 0..=n {
            for i in 0..=n {
                mesh.add_node(node(i, j, k), [i as f64, j as f64, k as f64]);
            }
        }
    }

    let mut next = 1u64;
    let mut bottom = Vec::new();
    for k in 0..n {
        for j in 0..n {
            for i in 0..n {
                let cell = vec![
                    node(i, j, k),
                    node(i + 1, j, k),
                    node(i + 1, j + 1, k),
                    node(i, j + 1, k),
                    node(i, j, k + 1),
                    node(i + 1, j, k + 1),
                    node(i + 1, j + 1, k + 1),
                    node(i, j + 1, k + 1),
                ];
                if k == 0 {
                    bottom.push(next);
                }
                mesh.add_volume(next, cell).expect("unique element id");
                next += 1;
            }
        }
    }
    mesh.add_group(0, MeshGroup::new("Bottom", bottom));
    mesh
}

fn bench_record(c: &mut Criterion) {
    let mut group = c.benchmark_group("record");
    let io = MeshIo::new(Capabilities::json_only());

    for &n in &[8u64, 16u64] {
        let mesh = build_hex_block(n);
        let record = mesh_to_record(&mesh).expect("hex mesh converts");
        let mut json = Vec::new();
        io.encode(MeshFormat::Json, &record, &mut json)
            .expect("encode json");

        group.bench_with_input(BenchmarkId::new("mesh_to_record", n), &n, |b, _| {
            b.iter(|| {
                let out = mesh_to_record(&mesh).expect("convert");
                black_box(out);
            });
        });

        group.bench_with_input(BenchmarkId::new("json_encode", n), &n, |b, _| {
            b.iter(|| {
                let mut out = Vec::with_capacity(json.len());
                io.encode(MeshFormat::Json, &record, &mut out).expect("encode");
                black_box(out);
            });
        });

        group.bench_with_input(BenchmarkId::new("json_decode", n), &n, |b, _| {
            b.iter(|| {
                let out = io.decode(MeshFormat::Json, json.as_slice()).expect("decode");
                black_box(out);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_record);
criterion_main!(benches);
