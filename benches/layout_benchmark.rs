//! Performance benchmarks for the layout and rendering pipeline.
//!
//! Run with: cargo bench --bench layout_benchmark

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use recipe_viz::render::Surface;
use recipe_viz::tree::{Hierarchy, MAX_VISIBLE_DEPTH, TreeLayout, normalize};
use recipe_viz::{RecipeTree, Renderer};
use std::hint::black_box;

/// Full binary recipe tree of the given depth; leaves are base elements.
fn generate_binary_tree(depth: usize) -> RecipeTree {
    if depth == 0 {
        return RecipeTree::base("Water");
    }
    RecipeTree::new(format!("Element{depth}"))
        .with_ingredients([generate_binary_tree(depth - 1), generate_binary_tree(depth - 1)])
}

/// A single chain, much deeper than the visible limit.
fn generate_chain(depth: usize) -> RecipeTree {
    let mut tree = RecipeTree::base("Earth");
    for i in (0..depth).rev() {
        tree = RecipeTree::new(format!("Step{i}")).with_ingredients([tree]);
    }
    tree
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    for depth in [4, 8, 11] {
        let tree = generate_binary_tree(depth);
        group.bench_with_input(BenchmarkId::from_parameter(depth), &tree, |b, tree| {
            b.iter(|| {
                let mut hierarchy = Hierarchy::new(normalize(black_box(tree)));
                hierarchy.limit_depth(MAX_VISIBLE_DEPTH);
                TreeLayout::new(920.0, 440.0).apply(&mut hierarchy);
                black_box(hierarchy.len())
            });
        });
    }
    group.finish();
}

fn bench_deep_chain(c: &mut Criterion) {
    let tree = generate_chain(2_000);
    let renderer = Renderer::default();

    c.bench_function("render_chain_2000_levels", |b| {
        b.iter(|| {
            let mut surface = Surface::new(960.0);
            black_box(renderer.visualize_tree(black_box(&tree), &mut surface))
        })
    });
}

fn bench_render_svg(c: &mut Criterion) {
    let tree = generate_binary_tree(8);
    let renderer = Renderer::default();

    c.bench_function("render_svg_511_nodes", |b| {
        b.iter(|| {
            let mut surface = Surface::new(960.0);
            renderer.visualize_tree(black_box(&tree), &mut surface);
            black_box(surface.content().len())
        })
    });
}

criterion_group!(benches, bench_layout, bench_deep_chain, bench_render_svg);
criterion_main!(benches);
