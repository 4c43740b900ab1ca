use std::f64::consts::PI;

use crate::canvas::Icon;
use crate::defaults::ShapeOptions;
use crate::editor::EditorBinding;
use crate::errors::ShapeError;
use crate::hover::{ArrowHead, HoverAnnotation, HoverPosition};
use crate::shapes::{
    CircleShape, Extent, FixedRectangleShape, HAlign, IconShape, OutlineShape, PolygonShape,
    RectangleShape, VAlign,
};
use crate::structure::{CrestShape, StructureHandle, Weir, WeirFormula};
use crate::style::{StyleRegistry, StyleSet};
use crate::transform::ChartTransform;
use crate::types::{Meters, Point, PtW};

use super::{BuildContext, BuiltShapes, StructureKind, StructureShapeBuilder, ViewKind, level_text, snapshot};

const KIND: StructureKind = StructureKind::Weir;

#[derive(Debug, Clone)]
pub struct WeirShape {
    pub(crate) structure: StructureHandle<Weir>,
}

impl WeirShape {
    pub fn new(structure: StructureHandle<Weir>) -> Self {
        Self { structure }
    }
}

/// Weir body, gate and water of a gated weir, back to front.
///
/// `gate` and `water` are both `None` when the gate's lower edge lies above
/// the visible top.
#[derive(Debug, Clone, PartialEq)]
pub struct GatedWeirBands {
    pub weir: RectangleShape,
    pub gate: Option<RectangleShape>,
    pub water: Option<RectangleShape>,
}

/// Bands of a gated weir spanning `left..right`.
pub fn gated_weir_bands(
    weir: &Weir,
    left: Meters,
    right: Meters,
    ctx: &BuildContext<'_>,
) -> Result<GatedWeirBands, ShapeError> {
    let Some(lower_edge) = weir.formula.gate_lower_edge_level() else {
        return Err(ShapeError::NotGated {
            name: weir.name.clone(),
        });
    };
    let t = &ctx.transform;
    let crest = weir.crest_level;

    let body = RectangleShape::new(left, right, t.view_bottom(), crest, ctx.styles.weir)
        .with_editor(EditorBinding::CrestLevel);

    if t.view_top() - lower_edge < Meters::ZERO {
        crate::log::debug!(weir = weir.name.as_str(), "gate above view top, gate and water omitted");
        return Ok(GatedWeirBands {
            weir: body,
            gate: None,
            water: None,
        });
    }

    let gate = RectangleShape::new(left, right, lower_edge, t.view_top(), ctx.styles.gate)
        .with_editor(EditorBinding::GateLowerEdge);
    let water = RectangleShape::new(left, right, crest, lower_edge, ctx.styles.water);
    Ok(GatedWeirBands {
        weir: body,
        gate: Some(gate),
        water: Some(water),
    })
}

/// Closed outline of a round, triangular or broad crest in the side view.
fn crest_outline(weir: &Weir, left: Meters, right: Meters, ctx: &BuildContext<'_>) -> Option<OutlineShape> {
    let t = &ctx.transform;
    let crest = weir.crest_level;
    let bottom = t.view_bottom();
    if crest <= bottom {
        crate::log::debug!(weir = weir.name.as_str(), "crest below view bottom, body omitted");
        return None;
    }

    let arch = match weir.crest_shape {
        CrestShape::Broad => Meters::ZERO,
        _ => t.world_height_of_pixels(ctx.options.arch_height).min((crest - bottom) / 3.0),
    };
    let shoulder = crest - arch;

    let mut points = vec![Point::new(left, bottom), Point::new(left, shoulder)];
    match weir.crest_shape {
        CrestShape::Round => {
            let n = ctx.options.arch_segments.max(2);
            for i in 1..n {
                let f = i as f64 / n as f64;
                points.push(Point::new(
                    left + (right - left) * f,
                    shoulder + arch * (PI * f).sin(),
                ));
            }
        }
        CrestShape::Triangular => points.push(Point::new((left + right) / 2.0, crest)),
        _ => {}
    }
    points.push(Point::new(right, shoulder));
    points.push(Point::new(right, bottom));

    Some(OutlineShape::new(points, true, ctx.styles.weir))
}

/// Weir or gate glyph resting above the crest at `x`.
fn glyph(weir: &Weir, x: Meters, ctx: &BuildContext<'_>) -> IconShape {
    let o = ctx.options;
    let icon = if weir.formula.is_gated() { Icon::Gate } else { Icon::Weir };
    let top = weir.crest_level + ctx.transform.world_height_of_pixels(o.icon_gap + o.icon_size);
    IconShape::centered(icon, Point::new(x, top), o.icon_size, ctx.styles.icon)
        .aligned(HAlign::Center, VAlign::Top)
}

/// Crest label above the glyph `crest` and gate label below the gate band.
fn annotate(out: &mut BuiltShapes, weir: &Weir, crest: Option<usize>, gate: Option<usize>, styles: &StyleRegistry) {
    if let Some(crest) = crest {
        out.hover(
            HoverAnnotation::new(crest, HoverPosition::Top, &styles.hover)
                .text(level_text("Crest", weir.crest_level))
                .with_leader(ArrowHead::None),
        );
    }
    if let (Some(gate), Some(edge)) = (gate, weir.formula.gate_lower_edge_level()) {
        out.hover(
            HoverAnnotation::new(gate, HoverPosition::Bottom, &styles.hover)
                .text(level_text("Gate", edge))
                .with_leader(ArrowHead::Start),
        );
    }
}

/// Push the bands and return (body, gate) indices.
fn push_bands(out: &mut BuiltShapes, bands: GatedWeirBands) -> (usize, Option<usize>) {
    let body = out.push(bands.weir);
    let gate = match (bands.gate, bands.water) {
        (Some(gate), Some(water)) => {
            let gate = out.push(gate);
            out.push(water);
            Some(gate)
        }
        _ => None,
    };
    (body, gate)
}

fn build_side(weir: &Weir, ctx: &BuildContext<'_>) -> Result<BuiltShapes, ShapeError> {
    let t = &ctx.transform;
    let o = ctx.options;
    let mut out = BuiltShapes::default();
    let x = weir.chainage;
    let crest = weir.crest_level;

    if weir.is_pillar {
        out.push(IconShape::centered(Icon::Weir, Point::new(x, crest), o.icon_size, ctx.styles.icon));
        return Ok(out);
    }

    let half = t.world_width_of_pixels(o.weir_side_width) / 2.0;
    let (left, right) = (x - half, x + half);

    let (body, gate) = match weir.crest_shape {
        CrestShape::Sharp => {
            let plate = FixedRectangleShape::new(
                Point::new(x, crest),
                Extent::Pixels(o.sharp_weir_width),
                Extent::World(crest - t.view_bottom()),
                ctx.styles.weir,
            )
            .aligned(HAlign::Center, VAlign::Top);
            (Some(out.push(plate)), None)
        }
        CrestShape::Round | CrestShape::Triangular | CrestShape::Broad => {
            (crest_outline(weir, left, right, ctx).map(|s| out.push(s)), None)
        }
        CrestShape::Gated => {
            let (body, gate) = push_bands(&mut out, gated_weir_bands(weir, left, right, ctx)?);
            (Some(body), gate)
        }
    };

    let icon = out.push(glyph(weir, x, ctx));
    annotate(&mut out, weir, body.map(|_| icon), gate, ctx.styles);
    Ok(out)
}

/// Filled free-form crest down to the view bottom plus one drag handle per vertex.
fn free_form(out: &mut BuiltShapes, weir: &Weir, shape: &[PtW], ctx: &BuildContext<'_>) -> Result<Option<usize>, ShapeError> {
    if shape.len() < 2 {
        crate::log::debug!(weir = weir.name.as_str(), "free-form crest needs two points");
        return Ok(None);
    }
    let t = &ctx.transform;
    let shifted: Vec<PtW> = shape
        .iter()
        .map(|p| Point::new(weir.offset_y + p.x, p.y))
        .collect();

    let mut vertices = shifted.clone();
    if let (Some(first), Some(last)) = (shifted.first(), shifted.last()) {
        vertices.push(Point::new(last.x, t.view_bottom()));
        vertices.push(Point::new(first.x, t.view_bottom()));
    }
    let body = out.push(PolygonShape::new(vertices, ctx.styles.weir));

    let rx = Extent::World(t.world_width_of_pixels(ctx.options.marker_radius));
    let ry = Extent::World(t.world_height_of_pixels(ctx.options.marker_radius));
    for (i, p) in shifted.into_iter().enumerate() {
        let handle = CircleShape::new(p, rx, ry, ctx.styles.weir).with_editor(EditorBinding::CrestVertex(i))?;
        out.push(handle);
    }
    Ok(Some(body))
}

/// Horizontal room the weir takes in the structure view: the free-form
/// shape's own x-extent, otherwise the crest width.
fn structure_width(weir: &Weir) -> Meters {
    match &weir.formula {
        WeirFormula::FreeForm { shape } if shape.len() > 1 => {
            let (lo, hi) = shape
                .iter()
                .fold((shape[0].x, shape[0].x), |(lo, hi), p| (lo.min(p.x), hi.max(p.x)));
            hi - lo
        }
        WeirFormula::FreeForm { .. } => Meters::ZERO,
        _ => weir.crest_width,
    }
}

fn build_structure(weir: &Weir, ctx: &BuildContext<'_>) -> Result<BuiltShapes, ShapeError> {
    let mut out = BuiltShapes::default();
    let left = weir.offset_y;
    let right = left + weir.crest_width;
    let middle = (left + right) / 2.0;

    if weir.is_pillar {
        out.push(IconShape::centered(Icon::Weir, Point::new(middle, weir.crest_level), ctx.options.icon_size, ctx.styles.icon));
        return Ok(out);
    }

    let (body, gate) = match &weir.formula {
        WeirFormula::FreeForm { shape } => (free_form(&mut out, weir, shape, ctx)?, None),
        WeirFormula::Gated { .. } => {
            let (body, gate) = push_bands(&mut out, gated_weir_bands(weir, left, right, ctx)?);
            (Some(body), gate)
        }
        WeirFormula::Simple => {
            let rect = RectangleShape::new(left, right, ctx.transform.view_bottom(), weir.crest_level, ctx.styles.weir)
                .with_editor(EditorBinding::CrestLevel);
            (Some(out.push(rect)), None)
        }
    };

    let icon = out.push(glyph(weir, middle, ctx));
    annotate(&mut out, weir, body.map(|_| icon), gate, ctx.styles);
    Ok(out)
}

impl StructureShapeBuilder for WeirShape {
    fn kind(&self) -> StructureKind {
        KIND
    }

    fn length(&self, view: ViewKind, _transform: &ChartTransform, _options: &ShapeOptions) -> Result<Meters, ShapeError> {
        let weir = snapshot(&self.structure, KIND)?;
        Ok(match view {
            ViewKind::SideView => Meters::ZERO,
            ViewKind::StructureView => structure_width(&weir),
        })
    }

    fn offset(&self, view: ViewKind) -> Result<Meters, ShapeError> {
        let weir = snapshot(&self.structure, KIND)?;
        Ok(match view {
            ViewKind::SideView => weir.chainage,
            ViewKind::StructureView => weir.offset_y,
        })
    }

    fn set_offset_y(&self, offset: Meters) -> Result<(), ShapeError> {
        super::modify(&self.structure, KIND, |weir| weir.offset_y = offset)
    }

    fn style<'a>(&self, styles: &'a StyleRegistry) -> &'a StyleSet {
        &styles.weir
    }

    fn build(&self, ctx: &BuildContext<'_>) -> Result<BuiltShapes, ShapeError> {
        let weir = snapshot(&self.structure, KIND)?;
        match ctx.view.kind {
            ViewKind::SideView => build_side(&weir, ctx),
            ViewKind::StructureView => build_structure(&weir, ctx),
        }
    }
}
