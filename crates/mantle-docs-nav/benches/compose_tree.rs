//! Benchmarks for navigation tree composition and queries.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use mantle_docs_nav::{CategoryDeclaration, PathStyle, build_path, compose_tree};

/// Declarations with `breadth` categories per level, nested `depth` levels.
fn create_declarations(depth: usize, breadth: usize) -> Vec<CategoryDeclaration> {
    fn create_level(current_depth: usize, max_depth: usize, breadth: usize) -> CategoryDeclaration {
        let mut category = CategoryDeclaration::new(format!("Section {current_depth}"))
            .slugs((0..breadth).map(|i| format!("page-{i}")));
        if current_depth < max_depth {
            for i in 0..breadth {
                category = category.category(
                    create_level(current_depth + 1, max_depth, breadth)
                        .section(format!("section-{current_depth}-{i}")),
                );
            }
        }
        category
    }

    (0..breadth)
        .map(|i| create_level(1, depth, breadth).section(format!("root-{i}")))
        .collect()
}

fn bench_compose(c: &mut Criterion) {
    let mut group = c.benchmark_group("compose_tree");

    for (depth, breadth) in [(1, 10), (3, 5), (4, 6)] {
        let declarations = create_declarations(depth, breadth);
        group.bench_with_input(
            BenchmarkId::new("depth_breadth", format!("{depth}x{breadth}")),
            &declarations,
            |b, declarations| b.iter(|| compose_tree(declarations, &PathStyle::Implicit).unwrap()),
        );
    }

    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let declarations = create_declarations(3, 5);
    let tree = compose_tree(&declarations, &PathStyle::Implicit).unwrap();
    let target = build_path("section-2-4", "page-4", &PathStyle::Implicit).unwrap();

    let mut group = c.benchmark_group("tree_queries");

    group.bench_function("leaves", |b| b.iter(|| tree.leaves()));
    group.bench_function("neighbors", |b| b.iter(|| tree.neighbors(&target)));
    group.bench_function("breadcrumbs", |b| b.iter(|| tree.breadcrumbs(&target)));
    group.bench_function("ensure_unique", |b| b.iter(|| tree.ensure_unique()));

    group.finish();
}

criterion_group!(benches, bench_compose, bench_queries);
criterion_main!(benches);
