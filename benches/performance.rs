//! 划分树性能基准测试
//!
//! 对比四叉树、八叉树、通用 N 维树以及线性扫描在插入和区域查询上的表现

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use orthtree::{NTree, Octree, Quadtree, SpatialTree};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const BENCHMARK_SIZE: usize = 50_000;
const QUERY_COUNT: usize = 1_000;
const EXTENT: f64 = 1000.0;

/// 性能测试配置
struct BenchConfig {
    size: usize,
    capacity: usize,
    max_depth: usize,
    seed: u64,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            size: BENCHMARK_SIZE,
            capacity: 16,
            max_depth: 12,
            seed: 42,
        }
    }
}

/// 生成测试数据：边长为 1 的小盒子
fn generate_boxes(count: usize, dims: usize, seed: u64) -> Vec<Vec<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let min: Vec<f64> = (0..dims).map(|_| rng.gen_range(0.0..EXTENT - 1.0)).collect();
            let max: Vec<f64> = min.iter().map(|v| v + 1.0).collect();
            [min, max].concat()
        })
        .collect()
}

/// 生成查询框，覆盖率为根空间体积的百分比
fn generate_queries(count: usize, dims: usize, coverage_percent: f64, seed: u64) -> Vec<Vec<f64>> {
    let mut rng = StdRng::seed_from_u64(seed + 1000);
    let side = EXTENT * (coverage_percent / 100.0).powf(1.0 / dims as f64);
    (0..count)
        .map(|_| {
            let min: Vec<f64> = (0..dims).map(|_| rng.gen_range(0.0..(EXTENT - side))).collect();
            let max: Vec<f64> = min.iter().map(|v| v + side).collect();
            [min, max].concat()
        })
        .collect()
}

fn root(dims: usize) -> Vec<f64> {
    [vec![0.0; dims], vec![EXTENT; dims]].concat()
}

fn build<S: SpatialTree<usize>>(mut tree: S, boxes: &[Vec<f64>]) -> S {
    for (i, b) in boxes.iter().enumerate() {
        tree.insert(i, b);
    }
    tree
}

/// 线性扫描，作为基线
fn brute_force(boxes: &[Vec<f64>], query: &[f64]) -> usize {
    let dims = query.len() / 2;
    boxes
        .iter()
        .filter(|b| (0..dims).all(|d| b[d] <= query[dims + d] && b[dims + d] >= query[d]))
        .count()
}

/// 插入性能测试
fn bench_insert(c: &mut Criterion) {
    let config = BenchConfig::default();
    let mut group = c.benchmark_group("insert");

    let boxes_2d = generate_boxes(config.size, 2, config.seed);
    group.bench_function("quadtree", |b| {
        b.iter(|| {
            let tree = Quadtree::<usize>::new(&root(2), config.capacity, config.max_depth).unwrap();
            build(tree, &boxes_2d)
        });
    });
    group.bench_function("ntree_2d", |b| {
        b.iter(|| {
            let tree = NTree::<usize>::new(&root(2), config.capacity, config.max_depth).unwrap();
            build(tree, &boxes_2d)
        });
    });

    let boxes_3d = generate_boxes(config.size, 3, config.seed);
    group.bench_function("octree", |b| {
        b.iter(|| {
            let tree = Octree::<usize>::new(&root(3), config.capacity, config.max_depth).unwrap();
            build(tree, &boxes_3d)
        });
    });
    group.bench_function("ntree_3d", |b| {
        b.iter(|| {
            let tree = NTree::<usize>::new(&root(3), config.capacity, config.max_depth).unwrap();
            build(tree, &boxes_3d)
        });
    });

    group.finish();
}

fn run_queries<S: SpatialTree<usize>>(tree: &S, queries: &[Vec<f64>]) -> usize {
    queries.iter().map(|q| tree.intersect(q).count()).sum()
}

/// 区域查询性能测试
fn bench_search_area(c: &mut Criterion) {
    let config = BenchConfig::default();

    let boxes_2d = generate_boxes(config.size, 2, config.seed);
    let quad = build(
        Quadtree::<usize>::new(&root(2), config.capacity, config.max_depth).unwrap(),
        &boxes_2d,
    );
    let generic_2d = build(
        NTree::<usize>::new(&root(2), config.capacity, config.max_depth).unwrap(),
        &boxes_2d,
    );

    let boxes_3d = generate_boxes(config.size, 3, config.seed);
    let oct = build(
        Octree::<usize>::new(&root(3), config.capacity, config.max_depth).unwrap(),
        &boxes_3d,
    );
    let generic_3d = build(
        NTree::<usize>::new(&root(3), config.capacity, config.max_depth).unwrap(),
        &boxes_3d,
    );

    let mut group = c.benchmark_group("search");
    for coverage in [0.1, 1.0, 10.0] {
        let queries_2d = generate_queries(QUERY_COUNT, 2, coverage, config.seed);
        let queries_3d = generate_queries(QUERY_COUNT, 3, coverage, config.seed);

        group.bench_with_input(BenchmarkId::new("quadtree", coverage), &queries_2d, |b, q| {
            b.iter(|| run_queries(&quad, black_box(q)));
        });
        group.bench_with_input(BenchmarkId::new("ntree_2d", coverage), &queries_2d, |b, q| {
            b.iter(|| run_queries(&generic_2d, black_box(q)));
        });
        group.bench_with_input(BenchmarkId::new("octree", coverage), &queries_3d, |b, q| {
            b.iter(|| run_queries(&oct, black_box(q)));
        });
        group.bench_with_input(BenchmarkId::new("ntree_3d", coverage), &queries_3d, |b, q| {
            b.iter(|| run_queries(&generic_3d, black_box(q)));
        });
        group.bench_with_input(BenchmarkId::new("linear_scan_2d", coverage), &queries_2d, |b, q| {
            b.iter(|| q.iter().map(|query| brute_force(&boxes_2d, query)).sum::<usize>());
        });
    }
    group.finish();
}

/// 全量遍历性能测试
fn bench_iter(c: &mut Criterion) {
    let config = BenchConfig::default();
    let boxes = generate_boxes(config.size, 2, config.seed);
    let quad = build(
        Quadtree::<usize>::new(&root(2), config.capacity, config.max_depth).unwrap(),
        &boxes,
    );

    c.bench_function("iter_all", |b| {
        b.iter(|| quad.iter().count());
    });
}

criterion_group!(benches, bench_insert, bench_search_area, bench_iter);
criterion_main!(benches);
