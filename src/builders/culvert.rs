use crate::defaults::ShapeOptions;
use crate::editor::EditorBinding;
use crate::errors::ShapeError;
use crate::hover::{ArrowHead, HoverAnnotation, HoverPosition};
use crate::shapes::{CircleShape, PolygonShape, RectangleShape};
use crate::structure::{Culvert, StructureHandle};
use crate::style::{StyleRegistry, StyleSet};
use crate::transform::ChartTransform;
use crate::types::{Meters, Point};

use super::{BuildContext, BuiltShapes, StructureKind, StructureShapeBuilder, ViewKind, level_text, snapshot};

const KIND: StructureKind = StructureKind::Culvert;

#[derive(Debug, Clone)]
pub struct CulvertShape {
    pub(crate) structure: StructureHandle<Culvert>,
}

impl CulvertShape {
    pub fn new(structure: StructureHandle<Culvert>) -> Self {
        Self { structure }
    }
}

/// Gate band over the opening's width at the gate's lower edge, from that
/// edge up to the view top. `None` when the profile never reaches the edge.
pub fn culvert_gate_band(culvert: &Culvert, ctx: &BuildContext<'_>) -> Result<Option<RectangleShape>, ShapeError> {
    if !culvert.is_gated {
        return Err(ShapeError::NotGated {
            name: culvert.name.clone(),
        });
    }
    // profile levels are relative to the inlet
    let edge = culvert.gate_lower_edge_level;
    let Some((left, right)) = culvert.profile.span_at(edge - culvert.inlet_level) else {
        crate::log::debug!(culvert = culvert.name.as_str(), "gate edge outside profile, band omitted");
        return Ok(None);
    };
    let band = RectangleShape::new(
        culvert.offset_y + left,
        culvert.offset_y + right,
        edge,
        ctx.transform.view_top(),
        ctx.styles.gate,
    )
    .with_editor(EditorBinding::GateLowerEdge);
    Ok(Some(band))
}

fn build_side(culvert: &Culvert, ctx: &BuildContext<'_>) -> BuiltShapes {
    let styles = ctx.styles;
    let mut out = BuiltShapes::default();
    let start = culvert.chainage;
    let end = culvert.chainage + culvert.length;
    let reversed = ctx.view.axis_reversed;

    let (left_level, right_level) = if reversed {
        (culvert.outlet_level, culvert.inlet_level)
    } else {
        (culvert.inlet_level, culvert.outlet_level)
    };

    match culvert.profile.extent().filter(|_| culvert.profile.has_area()) {
        Some(extent) => {
            let h = extent.height();
            out.push(PolygonShape::new(
                vec![
                    Point::new(start, left_level),
                    Point::new(end, right_level),
                    Point::new(end, right_level + h),
                    Point::new(start, left_level + h),
                ],
                styles.culvert_tube,
            ));
        }
        None => {
            crate::log::debug!(culvert = culvert.name.as_str(), "profile too short, tube omitted");
        }
    }

    let (inlet_x, outlet_x) = if reversed { (end, start) } else { (start, end) };
    let (inlet_side, outlet_side) = if reversed {
        (HoverPosition::Right, HoverPosition::Left)
    } else {
        (HoverPosition::Left, HoverPosition::Right)
    };

    let radius = ctx.options.marker_radius;
    let inlet = out.push(CircleShape::marker(Point::new(inlet_x, culvert.inlet_level), radius, styles.inlet));
    let outlet = out.push(CircleShape::marker(Point::new(outlet_x, culvert.outlet_level), radius, styles.outlet));

    out.hover(
        HoverAnnotation::new(inlet, inlet_side, &styles.hover)
            .text(level_text("Inlet", culvert.inlet_level))
            .with_leader(ArrowHead::None),
    );
    out.hover(
        HoverAnnotation::new(outlet, outlet_side, &styles.hover)
            .text(level_text("Outlet", culvert.outlet_level))
            .with_leader(ArrowHead::None),
    );
    out
}

fn build_structure(culvert: &Culvert, ctx: &BuildContext<'_>) -> Result<BuiltShapes, ShapeError> {
    let styles = ctx.styles;
    let mut out = BuiltShapes::default();

    if culvert.profile.has_area() {
        let outline = culvert
            .profile
            .points
            .iter()
            .map(|p| Point::new(culvert.offset_y + p.x, culvert.inlet_level + p.y))
            .collect();
        let tube = out.push(PolygonShape::new(outline, styles.culvert_tube));
        out.hover(
            HoverAnnotation::new(tube, HoverPosition::Top, &styles.hover)
                .text(level_text("Inlet", culvert.inlet_level))
                .text(level_text("Outlet", culvert.outlet_level)),
        );
    } else {
        crate::log::debug!(culvert = culvert.name.as_str(), "profile too short, outline omitted");
    }

    if culvert.is_gated {
        if let Some(band) = culvert_gate_band(culvert, ctx)? {
            let gate = out.push(band);
            out.hover(
                HoverAnnotation::new(gate, HoverPosition::Bottom, &styles.hover)
                    .text(level_text("Gate", culvert.gate_lower_edge_level))
                    .with_leader(ArrowHead::Start),
            );
        }
    }
    Ok(out)
}

impl StructureShapeBuilder for CulvertShape {
    fn kind(&self) -> StructureKind {
        KIND
    }

    fn length(&self, view: ViewKind, _transform: &ChartTransform, _options: &ShapeOptions) -> Result<Meters, ShapeError> {
        let culvert = snapshot(&self.structure, KIND)?;
        Ok(match view {
            ViewKind::SideView => culvert.length,
            ViewKind::StructureView => culvert.profile.extent().map_or(Meters::ZERO, |e| e.width()),
        })
    }

    fn offset(&self, view: ViewKind) -> Result<Meters, ShapeError> {
        let culvert = snapshot(&self.structure, KIND)?;
        Ok(match view {
            ViewKind::SideView => culvert.chainage,
            ViewKind::StructureView => culvert.offset_y,
        })
    }

    fn set_offset_y(&self, offset: Meters) -> Result<(), ShapeError> {
        super::modify(&self.structure, KIND, |culvert| culvert.offset_y = offset)
    }

    fn style<'a>(&self, styles: &'a StyleRegistry) -> &'a StyleSet {
        &styles.culvert_tube
    }

    fn build(&self, ctx: &BuildContext<'_>) -> Result<BuiltShapes, ShapeError> {
        let culvert = snapshot(&self.structure, KIND)?;
        match ctx.view.kind {
            ViewKind::SideView => Ok(build_side(&culvert, ctx)),
            ViewKind::StructureView => build_structure(&culvert, ctx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::ViewContext;
    use crate::shapes::{Extent, ShapeEnum};
    use crate::structure::{Profile, handle};
    use crate::transform::{AxisRange, Viewport};
    use crate::types::{Px, pw};

    fn with_ctx<R>(view: ViewContext, f: impl FnOnce(&BuildContext<'_>) -> R) -> R {
        let styles = StyleRegistry::standard();
        let options = ShapeOptions::default();
        let ctx = BuildContext {
            transform: ChartTransform::try_new(
                AxisRange::new(0.0, 20.0),
                AxisRange::new(-2.0, 8.0),
                Viewport::new(0.0, 0.0, 200.0, 100.0),
            )
            .unwrap(),
            styles: &styles,
            options: &options,
            view,
        };
        f(&ctx)
    }

    fn culvert() -> Culvert {
        Culvert::new("c", 5.0, 10.0, 1.0, 0.5, Profile::rectangle(2.0, 1.5))
    }

    fn tube(built: &BuiltShapes) -> &PolygonShape {
        match &built.features[0] {
            ShapeEnum::Polygon(p) => p,
            other => panic!("expected tube, got {other:?}"),
        }
    }

    #[test]
    fn tube_runs_from_inlet_to_outlet() {
        let built = with_ctx(ViewContext::side(false), |ctx| build_side(&culvert(), ctx));
        assert_eq!(
            tube(&built).vertices,
            vec![pw(5.0, 1.0), pw(15.0, 0.5), pw(15.0, 2.0), pw(5.0, 2.5)]
        );
        let ShapeEnum::Circle(inlet) = &built.features[1] else {
            panic!("expected inlet marker");
        };
        assert_eq!(inlet.center, pw(5.0, 1.0));
        assert_eq!(inlet.radius_x, Extent::Pixels(Px(4.0)));
        assert_eq!(built.hovers[0].position, HoverPosition::Left);
    }

    #[test]
    fn reversed_axis_swaps_ends() {
        let built = with_ctx(ViewContext::side(true), |ctx| build_side(&culvert(), ctx));
        assert_eq!(
            tube(&built).vertices,
            vec![pw(5.0, 0.5), pw(15.0, 1.0), pw(15.0, 2.5), pw(5.0, 2.0)]
        );
        let ShapeEnum::Circle(inlet) = &built.features[1] else {
            panic!("expected inlet marker");
        };
        assert_eq!(inlet.center, pw(15.0, 1.0));
        assert_eq!(built.hovers[0].position, HoverPosition::Right);
    }

    #[test]
    fn gate_band_spans_profile_width() {
        let mut gated = culvert().with_gate(2.0);
        gated.offset_y = Meters(3.0);
        let band = with_ctx(ViewContext::structure(), |ctx| culvert_gate_band(&gated, ctx))
            .unwrap()
            .unwrap();
        assert_eq!(band.left, Meters(3.0));
        assert_eq!(band.width, Meters(2.0));
        assert_eq!(band.bottom, Meters(2.0));
        assert_eq!(band.top(), Meters(8.0));
        assert_eq!(band.state.editor, Some(EditorBinding::GateLowerEdge));
    }

    #[test]
    fn gate_band_narrows_with_sloped_walls() {
        let mut gated = Culvert::new("v", 5.0, 10.0, 0.0, 0.0, Profile::new(vec![pw(0.0, 2.0), pw(2.0, 0.0), pw(4.0, 2.0)]))
            .with_gate(1.0);
        gated.offset_y = Meters(1.0);
        let band = with_ctx(ViewContext::structure(), |ctx| culvert_gate_band(&gated, ctx))
            .unwrap()
            .unwrap();
        assert_eq!(band.left, Meters(2.0));
        assert_eq!(band.width, Meters(2.0));
        assert_eq!(band.bottom, Meters(1.0));
    }

    #[test]
    fn gate_above_the_opening_has_no_band() {
        let gated = culvert().with_gate(4.0);
        let band = with_ctx(ViewContext::structure(), |ctx| culvert_gate_band(&gated, ctx)).unwrap();
        assert_eq!(band, None);
    }

    #[test]
    fn gate_band_on_ungated_culvert_is_rejected() {
        let result = with_ctx(ViewContext::structure(), |ctx| culvert_gate_band(&culvert(), ctx));
        assert_eq!(result, Err(ShapeError::NotGated { name: "c".into() }));
    }

    #[test]
    fn structure_view_outline_sits_on_inlet_level() {
        let built = with_ctx(ViewContext::structure(), |ctx| build_structure(&culvert(), ctx)).unwrap();
        assert_eq!(built.features.len(), 1);
        assert_eq!(tube(&built).vertices[1], pw(0.0, 1.0));
    }
}
