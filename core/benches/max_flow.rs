//! Benchmark suite for the maximum-flow solvers

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use flux_core::algorithm::flow::{dinic, push_relabel_max_flow, ResidualGraph};
use flux_core::Capacity;

/// Layered grid: source -> `depth` layers of `width` nodes -> sink, with
/// staggered capacities so augmentation cannot finish in one phase
fn layered_network(width: usize, depth: usize) -> (ResidualGraph, usize, usize) {
    let node_count = width * depth + 2;
    let source = 0;
    let sink = node_count - 1;
    let node = |layer: usize, lane: usize| 1 + layer * width + lane;

    let mut graph = ResidualGraph::new(node_count);
    for lane in 0..width {
        graph.add_edge(source, node(0, lane), (lane + 1) as Capacity).unwrap();
        graph
            .add_edge(node(depth - 1, lane), sink, (width - lane) as Capacity)
            .unwrap();
    }
    for layer in 0..depth - 1 {
        for lane in 0..width {
            for offset in 0..2 {
                let next_lane = (lane + offset) % width;
                graph
                    .add_edge(
                        node(layer, lane),
                        node(layer + 1, next_lane),
                        (1 + (lane + layer) % 4) as Capacity,
                    )
                    .unwrap();
            }
        }
    }
    (graph, source, sink)
}

fn dense_matrix(node_count: usize) -> Vec<Vec<Capacity>> {
    let mut matrix = vec![vec![0; node_count]; node_count];
    for from in 0..node_count {
        for to in from + 1..node_count {
            matrix[from][to] = ((from * 7 + to * 3) % 11 + 1) as Capacity;
        }
    }
    matrix
}

fn bench_dinic(c: &mut Criterion) {
    c.bench_function("dinic_layered_8x16", |b| {
        b.iter(|| {
            let (mut graph, source, sink) = layered_network(8, 16);
            dinic::max_flow(&mut graph, black_box(source), black_box(sink)).unwrap()
        });
    });
}

fn bench_push_relabel(c: &mut Criterion) {
    c.bench_function("push_relabel_dense_32", |b| {
        b.iter(|| {
            push_relabel_max_flow(black_box(dense_matrix(32)), &[0], &[31]).unwrap()
        });
    });
}

criterion_group!(benches, bench_dinic, bench_push_relabel);
criterion_main!(benches);
