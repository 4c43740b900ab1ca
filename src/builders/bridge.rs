use crate::canvas::Icon;
use crate::defaults::ShapeOptions;
use crate::errors::ShapeError;
use crate::hover::{HoverAnnotation, HoverPosition};
use crate::shapes::{Extent, FixedRectangleShape, HAlign, IconShape, RectangleShape, VAlign};
use crate::structure::{Bridge, StructureHandle};
use crate::style::{StyleRegistry, StyleSet};
use crate::transform::ChartTransform;
use crate::types::{Meters, Point};

use super::{BuildContext, BuiltShapes, StructureKind, StructureShapeBuilder, ViewKind, level_text, snapshot};

const KIND: StructureKind = StructureKind::Bridge;

#[derive(Debug, Clone)]
pub struct BridgeShape {
    pub(crate) structure: StructureHandle<Bridge>,
}

impl BridgeShape {
    pub fn new(structure: StructureHandle<Bridge>) -> Self {
        Self { structure }
    }
}

/// Horizontal span of the bridge in `view`.
fn span(bridge: &Bridge, view: ViewKind) -> (Meters, Meters) {
    match view {
        ViewKind::SideView => (bridge.chainage, bridge.chainage + bridge.length),
        ViewKind::StructureView => match bridge.profile.extent() {
            Some(e) => (bridge.offset_y + e.min_y, bridge.offset_y + e.max_y),
            None => (bridge.offset_y, bridge.offset_y),
        },
    }
}

/// Cross-section, optional ground layer and deck over `left..right`.
///
/// Both views share this; they only differ in what backs the horizontal span.
fn bands(out: &mut BuiltShapes, bridge: &Bridge, left: Meters, right: Meters, ctx: &BuildContext<'_>) {
    let Some(extent) = bridge.profile.extent().filter(|_| bridge.profile.has_area()) else {
        crate::log::debug!(
            bridge = bridge.name.as_str(),
            points = bridge.profile.len(),
            "profile too short, bands omitted"
        );
        return;
    };
    let t = &ctx.transform;
    let o = ctx.options;
    let styles = ctx.styles;

    let section = out.push(RectangleShape::new(
        left,
        right,
        extent.min_z,
        extent.max_z,
        styles.bridge_cross_section,
    ));

    if bridge.ground_layer_enabled {
        let thickness = bridge.ground_layer_thickness.max(o.min_ground_layer);
        out.push(RectangleShape::new(
            left,
            right,
            extent.min_z - thickness,
            extent.min_z,
            styles.ground_layer,
        ));
    }

    let overhang = t.world_width_of_pixels(o.surface_overhang);
    let deck_top = extent.max_z + t.world_height_of_pixels(o.surface_gap + o.surface_height);
    out.push(
        FixedRectangleShape::new(
            Point::new((left + right) / 2.0, deck_top),
            Extent::World(right - left + overhang * 2.0),
            Extent::Pixels(o.surface_height),
            styles.bridge_surface,
        )
        .aligned(HAlign::Center, VAlign::Top),
    );

    out.hover(
        HoverAnnotation::new(section, HoverPosition::Right, &styles.hover)
            .text(level_text("Top", extent.max_z))
            .text(level_text("Bottom", extent.min_z)),
    );
}

impl StructureShapeBuilder for BridgeShape {
    fn kind(&self) -> StructureKind {
        KIND
    }

    fn length(&self, view: ViewKind, _transform: &ChartTransform, _options: &ShapeOptions) -> Result<Meters, ShapeError> {
        let bridge = snapshot(&self.structure, KIND)?;
        let (left, right) = span(&bridge, view);
        Ok(right - left)
    }

    fn offset(&self, view: ViewKind) -> Result<Meters, ShapeError> {
        let bridge = snapshot(&self.structure, KIND)?;
        Ok(match view {
            ViewKind::SideView => bridge.chainage,
            ViewKind::StructureView => bridge.offset_y,
        })
    }

    fn set_offset_y(&self, offset: Meters) -> Result<(), ShapeError> {
        super::modify(&self.structure, KIND, |bridge| bridge.offset_y = offset)
    }

    fn style<'a>(&self, styles: &'a StyleRegistry) -> &'a StyleSet {
        &styles.bridge_cross_section
    }

    fn build(&self, ctx: &BuildContext<'_>) -> Result<BuiltShapes, ShapeError> {
        let bridge = snapshot(&self.structure, KIND)?;
        let mut out = BuiltShapes::default();
        let (left, right) = span(&bridge, ctx.view.kind);

        if bridge.is_pillar {
            let level = bridge.profile.extent().map_or(Meters::ZERO, |e| e.max_z);
            out.push(IconShape::centered(
                Icon::Bridge,
                Point::new((left + right) / 2.0, level),
                ctx.options.icon_size,
                ctx.styles.icon,
            ));
            return Ok(out);
        }

        bands(&mut out, &bridge, left, right, ctx);
        Ok(out)
    }
}
