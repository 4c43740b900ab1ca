use crate::canvas::Icon;
use crate::defaults::ShapeOptions;
use crate::errors::ShapeError;
use crate::hover::{HoverAnnotation, HoverPosition};
use crate::shapes::{Extent, FixedRectangleShape, HAlign, IconShape, VAlign};
use crate::structure::{Pump, StructureHandle};
use crate::style::{StyleRegistry, StyleSet};
use crate::transform::ChartTransform;
use crate::types::{Meters, Point};

use super::{BuildContext, BuiltShapes, StructureKind, StructureShapeBuilder, ViewKind, level_text, snapshot};

const KIND: StructureKind = StructureKind::Pump;

#[derive(Debug, Clone)]
pub struct PumpShape {
    pub(crate) structure: StructureHandle<Pump>,
}

impl PumpShape {
    pub fn new(structure: StructureHandle<Pump>) -> Self {
        Self { structure }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Delivery is on the left exactly when the pumping direction and the axis
/// reversal agree.
pub fn delivery_is_left(direction_is_positive: bool, axis_reversed: bool) -> bool {
    direction_is_positive == axis_reversed
}

/// Sides on which control lines are drawn, `None` for an uncontrolled side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlSides {
    pub suction: Option<Side>,
    pub delivery: Option<Side>,
}

pub fn control_sides(pump: &Pump, axis_reversed: bool) -> ControlSides {
    let delivery = if delivery_is_left(pump.direction_is_positive, axis_reversed) {
        Side::Left
    } else {
        Side::Right
    };
    ControlSides {
        suction: pump
            .control_direction
            .controls_suction()
            .then_some(delivery.opposite()),
        delivery: pump.control_direction.controls_delivery().then_some(delivery),
    }
}

fn range_text(label: &str, start: Meters, stop: Meters) -> String {
    format!("{label} {:.2} / {:.2} m", start.0, stop.0)
}

/// Vertical bar between the start and stop levels with a tick at each.
fn control_line(out: &mut BuiltShapes, side: Side, start: Meters, stop: Meters, label: &str, pump: &Pump, ctx: &BuildContext<'_>) {
    let t = &ctx.transform;
    let o = ctx.options;
    let styles = ctx.styles;
    let dx = t.world_width_of_pixels(o.control_line_offset);
    let x = match side {
        Side::Left => pump.chainage - dx,
        Side::Right => pump.chainage + dx,
    };

    out.push(
        FixedRectangleShape::new(
            Point::new(x, start.max(stop)),
            Extent::Pixels(o.control_line_width),
            Extent::World((start - stop).abs()),
            styles.pump_control,
        )
        .aligned(HAlign::Center, VAlign::Top),
    );
    let start_tick = out.push(FixedRectangleShape::new(
        Point::new(x, start),
        Extent::Pixels(o.tick_length),
        Extent::Pixels(o.tick_thickness),
        styles.pump_start,
    ));
    out.push(FixedRectangleShape::new(
        Point::new(x, stop),
        Extent::Pixels(o.tick_length),
        Extent::Pixels(o.tick_thickness),
        styles.pump_stop,
    ));

    let position = match side {
        Side::Left => HoverPosition::Left,
        Side::Right => HoverPosition::Right,
    };
    out.hover(
        HoverAnnotation::new(start_tick, position, &styles.hover)
            .text(level_text(&format!("{label} start"), start))
            .text(level_text(&format!("{label} stop"), stop)),
    );
}

fn build_side(pump: &Pump, ctx: &BuildContext<'_>) -> BuiltShapes {
    let mut out = BuiltShapes::default();
    let sides = control_sides(pump, ctx.view.axis_reversed);

    if let Some(side) = sides.suction {
        control_line(&mut out, side, pump.start_suction, pump.stop_suction, "Suction", pump, ctx);
    }
    if let Some(side) = sides.delivery {
        control_line(&mut out, side, pump.start_delivery, pump.stop_delivery, "Delivery", pump, ctx);
    }

    out.push(IconShape::centered(
        Icon::Pump,
        Point::new(pump.chainage, pump.offset_z),
        ctx.options.icon_size,
        ctx.styles.icon,
    ));
    out
}

fn build_structure(pump: &Pump, ctx: &BuildContext<'_>) -> BuiltShapes {
    let mut out = BuiltShapes::default();
    let width = ctx.transform.world_width_of_pixels(ctx.options.icon_size);
    let icon = out.push(IconShape::centered(
        Icon::Pump,
        Point::new(pump.offset_y + width / 2.0, pump.offset_z),
        ctx.options.icon_size,
        ctx.styles.icon,
    ));

    let mut hover = HoverAnnotation::new(icon, HoverPosition::Top, &ctx.styles.hover);
    if pump.control_direction.controls_suction() {
        hover = hover.text(range_text("Suction", pump.start_suction, pump.stop_suction));
    }
    if pump.control_direction.controls_delivery() {
        hover = hover.text(range_text("Delivery", pump.start_delivery, pump.stop_delivery));
    }
    out.hover(hover);
    out
}

impl StructureShapeBuilder for PumpShape {
    fn kind(&self) -> StructureKind {
        KIND
    }

    fn length(&self, view: ViewKind, transform: &ChartTransform, options: &ShapeOptions) -> Result<Meters, ShapeError> {
        Ok(match view {
            ViewKind::SideView => Meters::ZERO,
            ViewKind::StructureView => transform.world_width_of_pixels(options.icon_size),
        })
    }

    fn offset(&self, view: ViewKind) -> Result<Meters, ShapeError> {
        let pump = snapshot(&self.structure, KIND)?;
        Ok(match view {
            ViewKind::SideView => pump.chainage,
            ViewKind::StructureView => pump.offset_y,
        })
    }

    fn set_offset_y(&self, offset: Meters) -> Result<(), ShapeError> {
        super::modify(&self.structure, KIND, |pump| pump.offset_y = offset)
    }

    fn style<'a>(&self, styles: &'a StyleRegistry) -> &'a StyleSet {
        &styles.pump_control
    }

    fn build(&self, ctx: &BuildContext<'_>) -> Result<BuiltShapes, ShapeError> {
        let pump = snapshot(&self.structure, KIND)?;
        Ok(match ctx.view.kind {
            ViewKind::SideView => build_side(&pump, ctx),
            ViewKind::StructureView => build_structure(&pump, ctx),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::ViewContext;
    use crate::shapes::{ShapeEnum, ShapeFeature};
    use crate::structure::ControlDirection;
    use crate::transform::{AxisRange, Viewport};

    fn build(pump: &Pump, view: ViewContext) -> BuiltShapes {
        let styles = StyleRegistry::standard();
        let options = ShapeOptions::default();
        let ctx = BuildContext {
            transform: ChartTransform::try_new(
                AxisRange::new(0.0, 10.0),
                AxisRange::new(0.0, 10.0),
                Viewport::new(0.0, 0.0, 100.0, 100.0),
            )
            .unwrap(),
            styles: &styles,
            options: &options,
            view,
        };
        match view.kind {
            ViewKind::SideView => build_side(pump, &ctx),
            ViewKind::StructureView => build_structure(pump, &ctx),
        }
    }

    fn pump(direction: ControlDirection) -> Pump {
        Pump::new("p", 5.0, direction)
            .with_suction_levels(1.2, 0.8)
            .with_delivery_levels(3.0, 2.5)
    }

    #[test]
    fn delivery_side_truth_table() {
        assert!(!delivery_is_left(true, false));
        assert!(delivery_is_left(false, false));
        assert!(delivery_is_left(true, true));
        assert!(!delivery_is_left(false, true));
    }

    #[test]
    fn single_direction_draws_one_line() {
        let suction = control_sides(&pump(ControlDirection::Suction), false);
        assert_eq!(suction.suction, Some(Side::Left));
        assert_eq!(suction.delivery, None);

        let delivery = control_sides(&pump(ControlDirection::Delivery), false);
        assert_eq!(delivery.delivery, Some(Side::Right));
        assert_eq!(delivery.suction, None);
    }

    #[test]
    fn both_directions_draw_bar_and_two_ticks_each() {
        let built = build(&pump(ControlDirection::Both), ViewContext::side(false));
        // 2 x (bar, start, stop) + icon
        assert_eq!(built.features.len(), 7);
        assert!(matches!(built.features[6], ShapeEnum::Icon(_)));
        assert_eq!(built.hovers.len(), 2);
    }

    #[test]
    fn stop_tick_uses_alert_palette() {
        let styles = StyleRegistry::standard();
        let built = build(&pump(ControlDirection::Suction), ViewContext::side(false));
        assert_eq!(built.features[1].state().styles, styles.pump_start);
        assert_eq!(built.features[2].state().styles, styles.pump_stop);
    }

    #[test]
    fn hover_shows_live_levels() {
        let built = build(&pump(ControlDirection::Suction), ViewContext::side(false));
        assert_eq!(
            built.hovers[0].lines,
            vec!["Suction start 1.20 m".to_string(), "Suction stop 0.80 m".to_string()]
        );
        assert_eq!(built.hovers[0].position, HoverPosition::Left);
    }

    #[test]
    fn structure_view_is_an_annotated_icon() {
        let built = build(&pump(ControlDirection::Both), ViewContext::structure());
        assert_eq!(built.features.len(), 1);
        assert_eq!(
            built.hovers[0].lines,
            vec!["Suction 1.20 / 0.80 m".to_string(), "Delivery 3.00 / 2.50 m".to_string()]
        );
    }
}
