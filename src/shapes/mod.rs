//! Shape features: paintable, hit-testable primitives.
//!
//! Geometry is stored in world units (or pixels for fixed-size extents) and
//! projected through the [`ChartTransform`] on every call, so a primitive's
//! device bounds always follow the current pan/zoom.

mod primitives;

pub use primitives::*;

use enum_dispatch::enum_dispatch;

use crate::builders::StructureShape;
use crate::canvas::Canvas;
use crate::editor::{self, EditMode, EditorBinding, ShapeEditor};
use crate::style::{PaintStyle, StyleSet, StyleSlot};
use crate::transform::ChartTransform;
use crate::types::{BoxPx, PtPx, Px};

/// Extent of one axis: world units scale with zoom, pixels do not.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Extent {
    World(crate::types::Meters),
    Pixels(Px),
}

impl Extent {
    pub fn is_pixels(self) -> bool {
        matches!(self, Extent::Pixels(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HAlign {
    Left,
    #[default]
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VAlign {
    Top,
    #[default]
    Center,
}

/// Interaction state and styles shared by every primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeState {
    pub styles: StyleSet,
    pub selected: bool,
    pub active: bool,
    pub enabled: bool,
    pub editor: Option<EditorBinding>,
}

impl ShapeState {
    pub fn new(styles: StyleSet) -> Self {
        Self {
            styles,
            selected: false,
            active: true,
            enabled: true,
            editor: None,
        }
    }

    pub fn slot(&self) -> StyleSlot {
        if !self.enabled {
            StyleSlot::Disabled
        } else if self.selected {
            StyleSlot::Selected
        } else {
            StyleSlot::Normal
        }
    }

    pub fn current_style(&self) -> &PaintStyle {
        self.styles.get(self.slot())
    }
}

/// Paint / hit-test contract of a single primitive.
#[enum_dispatch]
pub trait ShapeFeature {
    fn state(&self) -> &ShapeState;

    fn state_mut(&mut self) -> &mut ShapeState;

    /// Device bounds under the given transform, `None` when the geometry is degenerate
    fn bounds(&self, transform: &ChartTransform) -> Option<BoxPx>;

    /// Paint with an explicit style; degenerate geometry paints nothing
    fn paint_with(&self, transform: &ChartTransform, canvas: &mut dyn Canvas, style: &PaintStyle);

    /// Paint with the style slot matching the current state
    fn paint(&self, transform: &ChartTransform, canvas: &mut dyn Canvas) {
        let style = *self.state().current_style();
        self.paint_with(transform, canvas, &style);
    }

    fn contains(&self, transform: &ChartTransform, point: PtPx) -> bool {
        self.bounds(transform).is_some_and(|b| b.contains(point))
    }

    fn set_selected(&mut self, selected: bool) {
        self.state_mut().selected = selected;
    }

    fn set_active(&mut self, active: bool) {
        self.state_mut().active = active;
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.state_mut().enabled = enabled;
    }

    /// Editor for this primitive in `mode`, `None` when it is not editable there
    fn create_editor(&self, mode: EditMode, target: &StructureShape) -> Option<ShapeEditor> {
        let binding = self.state().editor?;
        editor::editor_for(binding, mode, target)
    }
}

/// All primitive kinds a builder can emit.
#[enum_dispatch(ShapeFeature)]
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeEnum {
    Rectangle(RectangleShape),
    FixedRectangle(FixedRectangleShape),
    Circle(CircleShape),
    Polygon(PolygonShape),
    Outline(OutlineShape),
    Icon(IconShape),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{Color, Stroke};

    #[test]
    fn slot_prefers_disabled_over_selected() {
        let mut state = ShapeState::new(StyleSet::from_fill(Color::GOLD, Stroke::new(Color::BLACK, 1.0)));
        assert_eq!(state.slot(), StyleSlot::Normal);
        state.selected = true;
        assert_eq!(state.slot(), StyleSlot::Selected);
        state.enabled = false;
        assert_eq!(state.slot(), StyleSlot::Disabled);
    }
}
