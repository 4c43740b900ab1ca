//! Rebuild behaviour of composites for every structure kind.
//!
//! Run with: cargo test --test builders

use hydroshape::builders::{BridgeShape, CulvertShape, PumpShape, WeirShape};
use hydroshape::canvas::DrawOp;
use hydroshape::structure::{Bridge, ControlDirection, Culvert, Profile, Pump, Weir, handle};
use hydroshape::editor::EditMode;
use hydroshape::types::{Meters, Offset, Px, ppx, pw};
use hydroshape::{
    AxisRange, CompositeShapeFeature, FrameContext, RecordingCanvas, ShapeEnum, ShapeError,
    ShapeFeature, ShapeOptions, StaticChart, StyleRegistry, ViewContext, Viewport,
};
use proptest::prelude::*;

/// 1 m = 10 px both ways, levels 0..10 visible
fn chart() -> StaticChart {
    StaticChart {
        x_axis: AxisRange::new(0.0, 10.0),
        y_axis: AxisRange::new(0.0, 10.0),
        viewport: Viewport::new(0.0, 0.0, 100.0, 100.0),
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn short_profiles() -> Vec<Profile> {
    vec![
        Profile::default(),
        Profile::new(vec![pw(0.0, 1.0)]),
        Profile::new(vec![pw(0.0, 1.0), pw(2.0, 1.0)]),
    ]
}

#[test]
fn rebuild_is_idempotent() {
    init_tracing();
    let chart = chart();
    let styles = StyleRegistry::standard();
    let options = ShapeOptions::default();
    let frame = FrameContext::new(&chart, &styles, &options);

    let mut composite = CompositeShapeFeature::new(
        WeirShape::new(handle(Weir::new("w", 5.0, 2.0, 3.0).with_gate(6.0))),
        ViewContext::side(false),
    );
    composite.rebuild(&frame).unwrap();
    let first = composite.children().to_vec();
    let first_bounds = composite.bounds(&frame).unwrap();

    composite.rebuild(&frame).unwrap();
    assert_eq!(composite.children(), first.as_slice());
    assert_eq!(composite.bounds(&frame).unwrap(), first_bounds);
}

#[test]
fn selection_survives_paint_and_reaches_every_child() {
    let chart = chart();
    let styles = StyleRegistry::standard();
    let options = ShapeOptions::default();
    let frame = FrameContext::new(&chart, &styles, &options);

    let mut composite = CompositeShapeFeature::new(
        BridgeShape::new(handle(Bridge::new("b", 2.0, 4.0, Profile::rectangle(2.0, 3.0)))),
        ViewContext::side(false),
    );
    composite.set_selected(true);

    let mut canvas = RecordingCanvas::new();
    composite.paint(&frame, &mut canvas).unwrap();

    assert!(composite.is_selected());
    assert!(composite.children().iter().all(|c| c.state().selected));
    let DrawOp::Rect { style, .. } = &canvas.ops[0] else {
        panic!("expected cross-section rect, got {}", canvas.ops[0]);
    };
    assert_eq!(*style, styles.bridge_cross_section.selected);
}

#[test]
fn short_bridge_profiles_produce_no_bands() {
    let chart = chart();
    let styles = StyleRegistry::standard();
    let options = ShapeOptions::default();
    let frame = FrameContext::new(&chart, &styles, &options);

    for profile in short_profiles() {
        let points = profile.len();
        let bridge = Bridge::new("b", 2.0, 4.0, profile).with_ground_layer(0.5);
        for view in [ViewContext::side(false), ViewContext::structure()] {
            let mut composite = CompositeShapeFeature::new(BridgeShape::new(handle(bridge.clone())), view);
            composite.rebuild(&frame).unwrap();
            assert!(composite.children().is_empty(), "{points} points in {view:?}");
        }
    }
}

#[test]
fn short_culvert_profiles_produce_no_tube() {
    let chart = chart();
    let styles = StyleRegistry::standard();
    let options = ShapeOptions::default();
    let frame = FrameContext::new(&chart, &styles, &options);

    for profile in short_profiles() {
        let culvert = Culvert::new("c", 2.0, 4.0, 1.0, 0.5, profile);
        let mut side = CompositeShapeFeature::new(CulvertShape::new(handle(culvert.clone())), ViewContext::side(false));
        side.rebuild(&frame).unwrap();
        // inlet and outlet markers only
        assert_eq!(side.children().len(), 2);
        assert!(side.children().iter().all(|c| matches!(c, ShapeEnum::Circle(_))));

        let mut across = CompositeShapeFeature::new(CulvertShape::new(handle(culvert)), ViewContext::structure());
        across.rebuild(&frame).unwrap();
        assert!(across.children().is_empty());
    }
}

#[test]
fn gate_above_view_top_paints_weir_band_only() {
    let chart = chart();
    let styles = StyleRegistry::standard();
    let options = ShapeOptions::default();
    let frame = FrameContext::new(&chart, &styles, &options);

    let mut composite = CompositeShapeFeature::new(
        WeirShape::new(handle(Weir::new("w", 5.0, 2.0, 3.0).with_gate(12.0))),
        ViewContext::side(false),
    );
    let mut canvas = RecordingCanvas::new();
    composite.paint(&frame, &mut canvas).unwrap();

    let fills: Vec<_> = canvas
        .ops
        .iter()
        .filter_map(|op| match op {
            DrawOp::Rect { style, .. } => Some(style.fill),
            _ => None,
        })
        .collect();
    assert_eq!(fills, vec![styles.weir.normal.fill]);
    assert!(!fills.contains(&styles.gate.normal.fill));
    assert!(!fills.contains(&styles.water.normal.fill));
    assert!(matches!(canvas.ops.last(), Some(DrawOp::Icon { .. })));
}

#[test]
fn gate_inside_view_paints_all_three_bands() {
    let chart = chart();
    let styles = StyleRegistry::standard();
    let options = ShapeOptions::default();
    let frame = FrameContext::new(&chart, &styles, &options);

    let mut composite = CompositeShapeFeature::new(
        WeirShape::new(handle(Weir::new("w", 5.0, 2.0, 3.0).with_gate(6.0))),
        ViewContext::side(false),
    );
    let mut canvas = RecordingCanvas::new();
    composite.paint(&frame, &mut canvas).unwrap();

    let fills: Vec<_> = canvas
        .ops
        .iter()
        .filter_map(|op| match op {
            DrawOp::Rect { style, .. } => Some(style.fill),
            _ => None,
        })
        .collect();
    assert_eq!(
        fills,
        vec![styles.weir.normal.fill, styles.gate.normal.fill, styles.water.normal.fill]
    );
}

#[test]
fn pump_delivery_side_for_every_input() {
    let chart = chart();
    let styles = StyleRegistry::standard();
    let options = ShapeOptions::default();
    let frame = FrameContext::new(&chart, &styles, &options);
    let transform = frame.transform().unwrap();
    let pump_x = transform.world_to_device_x(Meters(5.0));

    for (positive, reversed, expect_left) in [
        (true, false, false),
        (false, false, true),
        (true, true, true),
        (false, true, false),
    ] {
        let mut pump = Pump::new("p", 5.0, ControlDirection::Delivery).with_delivery_levels(3.0, 2.0);
        pump.direction_is_positive = positive;
        let mut composite = CompositeShapeFeature::new(PumpShape::new(handle(pump)), ViewContext::side(reversed));
        composite.rebuild(&frame).unwrap();

        // bar, start tick, stop tick, glyph
        assert_eq!(composite.children().len(), 4);
        let bar = composite.children()[0].bounds(&transform).unwrap();
        let is_left = bar.center().x < pump_x;
        assert_eq!(is_left, expect_left, "positive={positive} reversed={reversed}");
    }
}

#[test]
fn editing_is_visible_on_the_next_rebuild() {
    let chart = chart();
    let styles = StyleRegistry::standard();
    let options = ShapeOptions::default();
    let frame = FrameContext::new(&chart, &styles, &options);

    let weir = handle(Weir::new("w", 5.0, 2.0, 3.0));
    let mut composite = CompositeShapeFeature::new(WeirShape::new(weir.clone()), ViewContext::structure());
    let transform = frame.transform().unwrap();
    let editor = composite
        .editor_at(&frame, ppx(15.0, 90.0), EditMode::Move)
        .unwrap()
        .unwrap();
    // 10 px up is one meter
    editor.drag(Offset::new(Px(0.0), Px(-10.0)), &transform).unwrap();

    // children stay stale until the next rebuild
    let bounds = composite.children()[0].bounds(&transform).unwrap();
    assert_eq!(bounds.min.y.0, 80.0);

    composite.rebuild(&frame).unwrap();
    let bounds = composite.children()[0].bounds(&transform).unwrap();
    assert_eq!(bounds.min.y.0, 70.0);
    assert_eq!(weir.borrow().crest_level, Meters(3.0));
}

#[test]
fn busy_structure_fails_the_rebuild() {
    let chart = chart();
    let styles = StyleRegistry::standard();
    let options = ShapeOptions::default();
    let frame = FrameContext::new(&chart, &styles, &options);

    let weir = handle(Weir::new("w", 5.0, 2.0, 3.0));
    let mut composite = CompositeShapeFeature::new(WeirShape::new(weir.clone()), ViewContext::side(false));
    let _edit = weir.borrow_mut();
    assert_eq!(
        composite.rebuild(&frame).unwrap_err(),
        ShapeError::StructureBorrowed { kind: "weir" }
    );
    assert!(composite.children().is_empty());
}

#[test]
fn collapsed_axis_is_an_invalid_transform() {
    let chart = StaticChart {
        x_axis: AxisRange::new(3.0, 3.0),
        ..chart()
    };
    let styles = StyleRegistry::standard();
    let options = ShapeOptions::default();
    let frame = FrameContext::new(&chart, &styles, &options);

    let mut composite = CompositeShapeFeature::new(
        WeirShape::new(handle(Weir::new("w", 5.0, 2.0, 3.0))),
        ViewContext::side(false),
    );
    assert!(matches!(
        composite.rebuild(&frame),
        Err(ShapeError::InvalidTransform(_))
    ));
}

proptest! {
    #[test]
    fn bridge_deck_keeps_pixel_thickness_under_zoom(top in 5.0f64..1.0e4) {
        let chart = StaticChart {
            y_axis: AxisRange::new(0.0, top),
            ..chart()
        };
        let styles = StyleRegistry::standard();
        let options = ShapeOptions::default();
        let frame = FrameContext::new(&chart, &styles, &options);
        let transform = frame.transform().unwrap();

        let mut composite = CompositeShapeFeature::new(
            BridgeShape::new(handle(Bridge::new("b", 2.0, 4.0, Profile::rectangle(2.0, 3.0)))),
            ViewContext::side(false),
        );
        composite.rebuild(&frame).unwrap();
        let deck = composite.children()[1].bounds(&transform).unwrap();
        prop_assert!((deck.height().0 - 6.0).abs() < 1e-9);
    }
}
