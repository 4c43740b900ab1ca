//! Structure-view arrangement and axis fitting.
//!
//! Several structures at one location are drawn next to each other across
//! the conduit. Their cross-channel offsets are assigned here, and the world
//! rectangle they cover is used to fit the chart axes.

use crate::builders::{StructureKind, StructureShape, StructureShapeBuilder, ViewKind, snapshot};
use crate::defaults::ShapeOptions;
use crate::errors::ShapeError;
use crate::structure::{Profile, WeirFormula};
use crate::transform::{AxisRange, ChartTransform};
use crate::types::{BoxW, Meters, Point, pw};

/// Place `shapes` side by side, centred on the middle of `x_axis`.
///
/// Each structure's cross-channel offset is set to the running offset, which
/// then advances by the structure's own width. Returns the assigned offsets.
pub fn arrange_side_by_side(
    shapes: &[StructureShape],
    x_axis: AxisRange,
    transform: &ChartTransform,
    options: &ShapeOptions,
) -> Result<Vec<Meters>, ShapeError> {
    let widths = shapes
        .iter()
        .map(|s| s.length(ViewKind::StructureView, transform, options))
        .collect::<Result<Vec<_>, _>>()?;
    let total = widths.iter().fold(Meters::ZERO, |acc, w| acc + *w);

    let middle = x_axis.middle();
    let middle = if middle.is_finite() { middle } else { Meters::ZERO };

    let mut offset = middle - total / 2.0;
    let mut offsets = Vec::with_capacity(shapes.len());
    for (shape, width) in shapes.iter().zip(widths) {
        shape.set_offset_y(offset)?;
        offsets.push(offset);
        offset += width;
    }
    Ok(offsets)
}

/// Profile rectangle shifted by `dy`/`dz`; fewer than two points give an empty
/// rectangle at the origin.
fn profile_extent(profile: &Profile, dy: Meters, dz: Meters) -> BoxW {
    match profile.extent().filter(|_| profile.len() > 1) {
        Some(e) => BoxW::from_corners(
            Point::new(e.min_y + dy, e.min_z + dz),
            Point::new(e.max_y + dy, e.max_z + dz),
        ),
        None => BoxW::from_corners(pw(0.0, 0.0), pw(0.0, 0.0)),
    }
}

/// World rectangle a structure covers in the structure view.
pub fn world_extent(shape: &StructureShape, transform: &ChartTransform, options: &ShapeOptions) -> Result<BoxW, ShapeError> {
    Ok(match shape {
        StructureShape::Weir(s) => {
            let weir = snapshot(&s.structure, StructureKind::Weir)?;
            match &weir.formula {
                WeirFormula::FreeForm { shape } => {
                    let mut bb = BoxW::new();
                    for p in shape {
                        bb.expand_point(Point::new(weir.offset_y + p.x, p.y));
                    }
                    if shape.len() > 1 {
                        bb
                    } else {
                        BoxW::from_corners(pw(0.0, 0.0), pw(0.0, 0.0))
                    }
                }
                formula => {
                    let top = if formula.is_gated() {
                        weir.crest_level + options.gate_extent
                    } else {
                        weir.crest_level
                    };
                    BoxW::from_corners(
                        Point::new(weir.offset_y, weir.crest_level - options.gate_extent),
                        Point::new(weir.offset_y + weir.crest_width, top),
                    )
                }
            }
        }
        StructureShape::Bridge(s) => {
            let bridge = snapshot(&s.structure, StructureKind::Bridge)?;
            profile_extent(&bridge.profile, bridge.offset_y, Meters::ZERO)
        }
        StructureShape::Culvert(s) => {
            let culvert = snapshot(&s.structure, StructureKind::Culvert)?;
            profile_extent(&culvert.profile, culvert.offset_y, culvert.inlet_level)
        }
        StructureShape::Pump(s) => {
            let pump = snapshot(&s.structure, StructureKind::Pump)?;
            let levels = pump.levels();
            let low = levels.iter().copied().fold(levels[0], Meters::min);
            let high = levels.iter().copied().fold(levels[0], Meters::max);
            let width = transform.world_width_of_pixels(options.icon_size);
            BoxW::from_corners(
                Point::new(pump.offset_y, low),
                Point::new(pump.offset_y + width, high),
            )
        }
    })
}

/// Union of all structure extents, `None` for no structures.
pub fn structures_extent(
    shapes: &[StructureShape],
    transform: &ChartTransform,
    options: &ShapeOptions,
) -> Result<Option<BoxW>, ShapeError> {
    let mut union: Option<BoxW> = None;
    for shape in shapes {
        let bb = world_extent(shape, transform, options)?;
        match union.as_mut() {
            Some(u) => u.expand_box(&bb),
            None => union = Some(bb),
        }
    }
    Ok(union)
}

/// Axis ranges covering `extent`, each bound pushed outwards by `padding`
/// times its own absolute value.
pub fn padded_axes(extent: &BoxW, padding: f64) -> (AxisRange, AxisRange) {
    let pad = |v: Meters| v.abs() * padding;
    (
        AxisRange {
            min: extent.min.x - pad(extent.min.x),
            max: extent.max.x + pad(extent.max.x),
        },
        AxisRange {
            min: extent.min.y - pad(extent.min.y),
            max: extent.max.y + pad(extent.max.y),
        },
    )
}
