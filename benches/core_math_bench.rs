use std::hint::black_box;
use std::rc::Rc;

use criterion::{Criterion, criterion_group, criterion_main};
use overlay_rs::api::{BubbleConfig, BubblePainter, Visualization, VisualizerContext};
use overlay_rs::core::{
    AnnotationResult, AxisProjection, AxisScale, DimRange, GammaCorrection, InMemoryDatabase,
    LinearRemap, NormalizeScale, ScaleChain, Viewport, project_range,
};
use overlay_rs::render::{Scene, render_document};
use overlay_rs::style::StyleRegistry;

fn projection(dimensionality: usize) -> AxisProjection {
    let scales = (0..dimensionality)
        .map(|i| AxisScale::new(-(i as f64) - 1.0, 100.0 + i as f64).expect("valid scale"))
        .collect();
    AxisProjection::new(scales, Viewport::new(1920.0, 1080.0)).expect("valid projection")
}

fn bench_scale_chain_10k(c: &mut Criterion) {
    let chain = ScaleChain::normalize_gamma_remap(
        NormalizeScale::new(0.0, 10_000.0).expect("bounds"),
        GammaCorrection::new(2.2).expect("gamma"),
        LinearRemap::new(1.0, 10.0).expect("remap"),
    );
    let values: Vec<f64> = (0..10_000).map(f64::from).collect();

    c.bench_function("scale_chain_10k", |b| {
        b.iter(|| {
            let total: f64 = black_box(&values).iter().map(|v| chain.apply(*v)).sum();
            black_box(total)
        })
    });
}

fn bench_project_range_16d(c: &mut Criterion) {
    let projection = projection(16);
    let ranges: Vec<Option<DimRange>> = (0..16)
        .map(|i| {
            (i % 3 != 0).then(|| DimRange::new(f64::from(i), f64::from(i) + 5.0).expect("range"))
        })
        .collect();

    c.bench_function("project_range_16d", |b| {
        b.iter(|| {
            let _ = project_range(black_box(&ranges), &projection, black_box(2), black_box(5))
                .expect("projection should succeed");
        })
    });
}

fn bench_bubble_redraw_5k(c: &mut Criterion) {
    let db = (0..5_000u32).fold(InMemoryDatabase::new(2).expect("db"), |db, i| {
        let t = f64::from(i);
        let label = if i % 4 == 0 { "outlier" } else { "inlier" };
        db.with_record(i, vec![t % 100.0, (t * 0.37) % 100.0], Some(label))
    });
    let annotation = (0..5_000u32).fold(AnnotationResult::new("score"), |a, i| {
        a.with_value(i, f64::from(i % 97))
    });
    let ctx = VisualizerContext::new(Rc::new(db));
    let painter = BubblePainter::new(
        &ctx,
        Rc::new(annotation),
        BubbleConfig::default()
            .with_gamma(2.0)
            .bind()
            .expect("bound config"),
    )
    .expect("painter");
    let styles = StyleRegistry::shared();
    let vis = Visualization::attach(&ctx, &styles, Rc::new(projection(2)), painter, 1, 2)
        .expect("attach");

    c.bench_function("bubble_redraw_5k", |b| {
        b.iter(|| black_box(ctx.request_redraw()))
    });

    let scene = Scene::new(Viewport::new(1920.0, 1080.0))
        .with_styles(&styles.borrow())
        .with_layer(vis.layer_snapshot());
    c.bench_function("svg_document_5k", |b| {
        b.iter(|| {
            let _ = render_document(black_box(&scene)).expect("svg should succeed");
        })
    });
}

criterion_group!(
    benches,
    bench_scale_chain_10k,
    bench_project_range_16d,
    bench_bubble_redraw_5k
);
criterion_main!(benches);
