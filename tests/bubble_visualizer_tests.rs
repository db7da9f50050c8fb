use std::rc::Rc;

use approx::assert_abs_diff_eq;

use overlay_rs::api::{
    BubbleConfig, BubblePainter, ContextEvent, Visualization, VisualizerContext,
};
use overlay_rs::core::{
    AnnotationResult, AxisProjection, AxisScale, Cluster, Clustering, InMemoryDatabase, RecordId,
    RecordStore, Viewport,
};
use overlay_rs::error::OverlayError;
use overlay_rs::render::{CirclePrimitive, Shape};
use overlay_rs::style::class::{FILL, FILL_OPACITY, STROKE_WIDTH};
use overlay_rs::style::{ColorPalette, StyleClass, StyleRegistry};

fn projection() -> Rc<AxisProjection> {
    Rc::new(
        AxisProjection::new(
            vec![
                AxisScale::new(0.0, 10.0).expect("d1"),
                AxisScale::new(0.0, 10.0).expect("d2"),
            ],
            Viewport::new(100.0, 100.0),
        )
        .expect("projection"),
    )
}

fn database() -> InMemoryDatabase {
    (1..=8).fold(InMemoryDatabase::new(2).expect("db"), |db, id| {
        let label = if id <= 3 { "small" } else { "large" };
        db.with_record(id, vec![f64::from(id), f64::from(id) / 2.0], Some(label))
    })
}

fn ids(raw: &[u32]) -> Vec<RecordId> {
    raw.iter().copied().map(RecordId::new).collect()
}

fn two_clusters() -> Clustering {
    Clustering::new(vec![
        Cluster::new(Some("first"), ids(&[1, 2, 3])),
        Cluster::new(Some("second"), ids(&[4, 5, 6, 7, 8])),
    ])
}

fn annotation() -> Rc<AnnotationResult> {
    Rc::new(
        (2..=8).fold(AnnotationResult::new("score").with_value(1, 25.0), |a, id| {
            a.with_value(id, f64::from(id) * 10.0)
        }),
    )
}

fn sized_config() -> BubbleConfig {
    BubbleConfig::default()
        .with_gamma(2.0)
        .with_normalization(0.0, 100.0)
        .with_radius_range(1.0, 10.0)
}

fn circles(vis: &Visualization) -> Vec<CirclePrimitive> {
    vis.layer()
        .children()
        .iter()
        .map(|shape| match shape {
            Shape::Circle(circle) => circle.clone(),
            Shape::Polygon(_) => panic!("bubble layer must only contain circles"),
        })
        .collect()
}

fn circle_for(circles: &[CirclePrimitive], id: u32) -> &CirclePrimitive {
    circles
        .iter()
        .find(|circle| circle.record == Some(RecordId::new(id)))
        .expect("circle for record")
}

#[test]
fn bubbles_are_sized_and_colored_per_cluster() {
    let ctx = VisualizerContext::new(Rc::new(database()));
    ctx.set_clustering(Some(two_clusters()));
    let styles = StyleRegistry::shared();
    let painter = BubblePainter::new(
        &ctx,
        annotation(),
        sized_config().bind().expect("bound config"),
    )
    .expect("painter");
    let vis = Visualization::attach(&ctx, &styles, projection(), painter, 1, 2).expect("attach");

    let circles = circles(&vis);
    assert_eq!(circles.len(), 8);

    let first = circle_for(&circles, 1);
    assert_abs_diff_eq!(first.radius, 5.5, epsilon = 1e-12);
    assert_eq!(first.style.as_str(), "bubble1");
    assert_abs_diff_eq!(first.center.x, 10.0, epsilon = 1e-9);
    assert_abs_diff_eq!(first.center.y, 95.0, epsilon = 1e-9);

    for id in 4..=8 {
        assert_eq!(circle_for(&circles, id).style.as_str(), "bubble2");
    }
    for id in 1..=3 {
        assert_eq!(circle_for(&circles, id).style.as_str(), "bubble1");
    }

    let registry = styles.borrow();
    assert_eq!(registry.len(), 2);
    for name in ["bubble1", "bubble2"] {
        let class = registry.get(name).expect("registered bubble class");
        assert_eq!(class.statement(FILL_OPACITY), Some("0.5"));
        assert_eq!(class.statement(STROKE_WIDTH), Some("0.001"));
    }
    assert_ne!(
        registry.get("bubble1").and_then(|c| c.statement(FILL)),
        registry.get("bubble2").and_then(|c| c.statement(FILL))
    );
}

#[test]
fn normalization_defaults_to_annotation_bounds() {
    let ctx = VisualizerContext::new(Rc::new(database()));
    let annotation = Rc::new(
        AnnotationResult::new("score")
            .with_value(1, 0.0)
            .with_value(2, 25.0)
            .with_value(3, 100.0)
            .with_value(4, f64::NAN),
    );
    let config = BubbleConfig::default().with_gamma(2.0).bind().expect("bound");
    let painter = BubblePainter::new(&ctx, annotation, config).expect("painter");

    assert_abs_diff_eq!(painter.scaled(0.0), 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(painter.scaled(25.0), 5.5, epsilon = 1e-12);
    assert_abs_diff_eq!(painter.scaled(100.0), 10.0, epsilon = 1e-12);
    assert_eq!(
        painter.chain().labels(),
        vec!["normalize", "gamma", "linear-remap"]
    );
}

#[test]
fn records_are_grouped_by_label_without_clustering() {
    let ctx = VisualizerContext::new(Rc::new(database()));
    let painter = BubblePainter::new(
        &ctx,
        annotation(),
        BubbleConfig::default().bind().expect("bound"),
    )
    .expect("painter");

    let clustering = painter.clustering();
    assert_eq!(clustering.len(), 2);
    assert_eq!(clustering.clusters()[0].name.as_deref(), Some("small"));
    assert_eq!(clustering.clusters()[0].ids, ids(&[1, 2, 3]));
    assert_eq!(clustering.clusters()[1].ids, ids(&[4, 5, 6, 7, 8]));
}

#[test]
fn records_without_annotation_value_are_skipped() {
    let ctx = VisualizerContext::new(Rc::new(database()));
    ctx.set_clustering(Some(two_clusters()));
    let annotation = Rc::new(
        AnnotationResult::new("partial")
            .with_value(1, 10.0)
            .with_value(5, 90.0),
    );
    let painter = BubblePainter::new(&ctx, annotation, sized_config().bind().expect("bound"))
        .expect("painter");
    let vis = Visualization::attach(&ctx, &StyleRegistry::shared(), projection(), painter, 1, 2)
        .expect("attach");

    let records: Vec<Option<RecordId>> = circles(&vis).iter().map(|c| c.record).collect();
    assert_eq!(records, vec![Some(RecordId::new(1)), Some(RecordId::new(5))]);
}

#[test]
fn selection_changes_rebuild_bubble_layer() {
    let ctx = VisualizerContext::new(Rc::new(database()));
    let painter = BubblePainter::new(
        &ctx,
        annotation(),
        sized_config().bind().expect("bound"),
    )
    .expect("painter");
    let vis = Visualization::attach(&ctx, &StyleRegistry::shared(), projection(), painter, 1, 2)
        .expect("attach");
    let generation = vis.layer().generation();
    assert_eq!(vis.layer().len(), 8);

    let report = ctx.set_selection(None).expect("selection");
    assert_eq!(report.delivered, 1);
    assert_eq!(report.redrawn, 1);
    assert!(report.is_clean());
    assert_eq!(vis.layer().generation(), generation + 1);
    assert_eq!(vis.layer().len(), 8);

    let report = ctx.request_redraw();
    assert_eq!(report.redrawn, 1);
    assert_eq!(vis.layer().generation(), generation + 2);
    assert_eq!(vis.layer().len(), 8);

    let report = ctx.notify(&ContextEvent::ClusteringChanged);
    assert_eq!(report.redrawn, 0);
    assert_eq!(vis.layer().generation(), generation + 2);
}

#[test]
fn label_clusters_drive_markers_and_styles_without_clustering() {
    let db = Rc::new(database());
    let ctx = VisualizerContext::new(Rc::clone(&db) as Rc<dyn RecordStore>);
    let palette = ColorPalette::from_hex(&["#112233", "#445566"]).expect("palette");
    let painter = BubblePainter::new(
        &ctx,
        annotation(),
        sized_config().bind().expect("bound"),
    )
    .expect("painter")
    .with_palette(palette);
    let fitted = AxisProjection::fit(db.as_ref(), Viewport::new(100.0, 100.0)).expect("fit");
    let styles = StyleRegistry::shared();
    let vis =
        Visualization::attach(&ctx, &styles, Rc::new(fitted), painter, 1, 2).expect("attach");

    let circles = circles(&vis);
    assert_eq!(circles.len(), 8);
    for id in 1..=3 {
        assert_eq!(circle_for(&circles, id).style.as_str(), "bubble1");
    }
    for id in 4..=8 {
        assert_eq!(circle_for(&circles, id).style.as_str(), "bubble2");
    }
    assert_abs_diff_eq!(circle_for(&circles, 1).radius, 5.5, epsilon = 1e-12);
    assert_abs_diff_eq!(circle_for(&circles, 1).center.x, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(circle_for(&circles, 8).center.x, 100.0, epsilon = 1e-9);

    let registry = styles.borrow();
    assert_eq!(registry.len(), 2);
    assert_eq!(
        registry.get("bubble1").and_then(|c| c.statement(FILL)),
        Some("#112233")
    );
    assert_eq!(
        registry.get("bubble2").and_then(|c| c.statement(FILL)),
        Some("#445566")
    );
}

#[test]
fn shared_registry_stays_deduplicated_across_instances() {
    let ctx = VisualizerContext::new(Rc::new(database()));
    ctx.set_clustering(Some(two_clusters()));
    let styles = StyleRegistry::shared();
    let mut instances = Vec::new();
    for (dimx, dimy) in [(1, 2), (2, 1)] {
        let painter = BubblePainter::new(
            &ctx,
            annotation(),
            sized_config().bind().expect("bound"),
        )
        .expect("painter");
        instances.push(
            Visualization::attach(&ctx, &styles, projection(), painter, dimx, dimy)
                .expect("attach"),
        );
    }

    assert_eq!(ctx.notifier().listener_count(), 2);
    let registry = styles.borrow();
    assert_eq!(registry.len(), 2);
    assert!(registry.conflicts().is_empty());
}

#[test]
fn conflicting_style_keeps_first_definition_and_still_renders() {
    let ctx = VisualizerContext::new(Rc::new(database()));
    ctx.set_clustering(Some(two_clusters()));
    let styles = StyleRegistry::shared();
    styles
        .borrow_mut()
        .register(StyleClass::new("bubble1").with(FILL, "#123456"));

    let painter = BubblePainter::new(
        &ctx,
        annotation(),
        sized_config().bind().expect("bound"),
    )
    .expect("painter");
    let vis = Visualization::attach(&ctx, &styles, projection(), painter, 1, 2)
        .expect("conflict does not abort attach");

    let registry = styles.borrow();
    assert_eq!(registry.conflicts().len(), 1);
    assert_eq!(registry.conflicts()[0].rejected.name(), "bubble1");
    assert_eq!(
        registry.get("bubble1").and_then(|c| c.statement(FILL)),
        Some("#123456")
    );
    assert_eq!(vis.layer().len(), 8);
}

#[test]
fn invalid_gamma_is_rejected_before_drawing() {
    for gamma in [0.0, -1.0, f64::NAN] {
        assert!(matches!(
            BubbleConfig::default().with_gamma(gamma).bind(),
            Err(OverlayError::InvalidConfig(_))
        ));
    }
}
