//! Concrete primitives.

use crate::canvas::{Canvas, Icon};
use crate::editor::EditorBinding;
use crate::errors::ShapeError;
use crate::style::{PaintStyle, StyleSet};
use crate::transform::ChartTransform;
use crate::types::{BoxPx, BoxW, Meters, Point, PtPx, PtW, Px, Size};

use super::{Extent, HAlign, ShapeFeature, ShapeState, VAlign};

/// Even-odd ray casting in device space.
fn polygon_contains(points: &[PtPx], p: PtPx) -> bool {
    if points.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (a, b) = (points[i], points[j]);
        if (a.y > p.y) != (b.y > p.y) {
            let cross_x = (b.x.0 - a.x.0) * (p.y.0 - a.y.0) / (b.y.0 - a.y.0) + a.x.0;
            if p.x.0 < cross_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Bounding box of device points, `None` when it has no area.
fn area_bounds(points: &[PtPx]) -> Option<BoxPx> {
    let mut bb = BoxPx::new();
    for p in points {
        bb.expand_point(*p);
    }
    (bb.width() > Px::ZERO && bb.height() > Px::ZERO).then_some(bb)
}

/// Device box of size `w` x `h` placed at `anchor` with the given alignment.
fn aligned_box(anchor: PtPx, w: Px, h: Px, h_align: HAlign, v_align: VAlign) -> Option<BoxPx> {
    if w <= Px::ZERO || h <= Px::ZERO {
        return None;
    }
    let left = match h_align {
        HAlign::Left => anchor.x,
        HAlign::Center => anchor.x - w / 2.0,
    };
    let top = match v_align {
        VAlign::Top => anchor.y,
        VAlign::Center => anchor.y - h / 2.0,
    };
    Some(BoxPx::from_origin_size(Point::new(left, top), Size::new(w, h)))
}

// ============================================================================
// Rectangle
// ============================================================================

/// World-unit rectangle from a bottom-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct RectangleShape {
    pub left: Meters,
    pub bottom: Meters,
    pub width: Meters,
    pub height: Meters,
    pub state: ShapeState,
}

impl RectangleShape {
    /// Rectangle spanning `left..right` horizontally and `bottom..top` vertically.
    ///
    /// Extents are kept as given; an inverted range makes the shape degenerate.
    pub fn new(left: Meters, right: Meters, bottom: Meters, top: Meters, styles: StyleSet) -> Self {
        Self {
            left,
            bottom,
            width: right - left,
            height: top - bottom,
            state: ShapeState::new(styles),
        }
    }

    pub fn with_editor(mut self, binding: EditorBinding) -> Self {
        self.state.editor = Some(binding);
        self
    }

    pub fn top(&self) -> Meters {
        self.bottom + self.height
    }
}

impl ShapeFeature for RectangleShape {
    fn state(&self) -> &ShapeState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ShapeState {
        &mut self.state
    }

    fn bounds(&self, transform: &ChartTransform) -> Option<BoxPx> {
        if self.width <= Meters::ZERO || self.height <= Meters::ZERO {
            return None;
        }
        let world = BoxW::from_corners(
            Point::new(self.left, self.bottom),
            Point::new(self.left + self.width, self.top()),
        );
        Some(transform.box_to_device(&world))
    }

    fn paint_with(&self, transform: &ChartTransform, canvas: &mut dyn Canvas, style: &PaintStyle) {
        if let Some(rect) = self.bounds(transform) {
            canvas.draw_rect(rect, style);
        }
    }
}

// ============================================================================
// Fixed rectangle
// ============================================================================

/// Rectangle with one or both extents in pixels, anchored at a world point.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedRectangleShape {
    pub anchor: PtW,
    pub width: Extent,
    pub height: Extent,
    pub h_align: HAlign,
    pub v_align: VAlign,
    pub state: ShapeState,
}

impl FixedRectangleShape {
    pub fn new(anchor: PtW, width: Extent, height: Extent, styles: StyleSet) -> Self {
        Self {
            anchor,
            width,
            height,
            h_align: HAlign::default(),
            v_align: VAlign::default(),
            state: ShapeState::new(styles),
        }
    }

    pub fn aligned(mut self, h_align: HAlign, v_align: VAlign) -> Self {
        self.h_align = h_align;
        self.v_align = v_align;
        self
    }

    /// Pixel extents cannot be dragged in world units.
    pub fn with_editor(mut self, binding: EditorBinding) -> Result<Self, ShapeError> {
        if self.width.is_pixels() || self.height.is_pixels() {
            return Err(ShapeError::EditorOnFixedSize);
        }
        self.state.editor = Some(binding);
        Ok(self)
    }

    fn device_width(&self, transform: &ChartTransform) -> Px {
        match self.width {
            Extent::Pixels(px) => px,
            Extent::World(m) => {
                transform.world_to_device_x(self.anchor.x + m) - transform.world_to_device_x(self.anchor.x)
            }
        }
    }

    fn device_height(&self, transform: &ChartTransform) -> Px {
        match self.height {
            Extent::Pixels(px) => px,
            Extent::World(m) => {
                transform.world_to_device_y(self.anchor.y) - transform.world_to_device_y(self.anchor.y + m)
            }
        }
    }
}

impl ShapeFeature for FixedRectangleShape {
    fn state(&self) -> &ShapeState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ShapeState {
        &mut self.state
    }

    fn bounds(&self, transform: &ChartTransform) -> Option<BoxPx> {
        aligned_box(
            transform.to_device(self.anchor),
            self.device_width(transform),
            self.device_height(transform),
            self.h_align,
            self.v_align,
        )
    }

    fn paint_with(&self, transform: &ChartTransform, canvas: &mut dyn Canvas, style: &PaintStyle) {
        if let Some(rect) = self.bounds(transform) {
            canvas.draw_rect(rect, style);
        }
    }
}

// ============================================================================
// Circle
// ============================================================================

/// Circle or ellipse around a world centre; radii may be pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleShape {
    pub center: PtW,
    pub radius_x: Extent,
    pub radius_y: Extent,
    pub state: ShapeState,
}

impl CircleShape {
    pub fn new(center: PtW, radius_x: Extent, radius_y: Extent, styles: StyleSet) -> Self {
        Self {
            center,
            radius_x,
            radius_y,
            state: ShapeState::new(styles),
        }
    }

    /// Pixel radii cannot be dragged in world units.
    pub fn with_editor(mut self, binding: EditorBinding) -> Result<Self, ShapeError> {
        if self.radius_x.is_pixels() || self.radius_y.is_pixels() {
            return Err(ShapeError::EditorOnFixedSize);
        }
        self.state.editor = Some(binding);
        Ok(self)
    }

    /// Circle with a fixed pixel radius.
    pub fn marker(center: PtW, radius: Px, styles: StyleSet) -> Self {
        Self {
            center,
            radius_x: Extent::Pixels(radius),
            radius_y: Extent::Pixels(radius),
            state: ShapeState::new(styles),
        }
    }

    fn device_radii(&self, transform: &ChartTransform) -> (Px, Px) {
        let rx = match self.radius_x {
            Extent::Pixels(px) => px,
            Extent::World(m) => Px(m.0 * (transform.world_to_device_x(Meters(1.0)) - transform.world_to_device_x(Meters::ZERO)).0),
        };
        let ry = match self.radius_y {
            Extent::Pixels(px) => px,
            Extent::World(m) => Px(m.0 * (transform.world_to_device_y(Meters::ZERO) - transform.world_to_device_y(Meters(1.0))).0),
        };
        (rx, ry)
    }
}

impl ShapeFeature for CircleShape {
    fn state(&self) -> &ShapeState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ShapeState {
        &mut self.state
    }

    fn bounds(&self, transform: &ChartTransform) -> Option<BoxPx> {
        let (rx, ry) = self.device_radii(transform);
        aligned_box(transform.to_device(self.center), rx * 2.0, ry * 2.0, HAlign::Center, VAlign::Center)
    }

    fn paint_with(&self, transform: &ChartTransform, canvas: &mut dyn Canvas, style: &PaintStyle) {
        let (rx, ry) = self.device_radii(transform);
        if rx <= Px::ZERO || ry <= Px::ZERO {
            return;
        }
        canvas.draw_ellipse(transform.to_device(self.center), rx, ry, style);
    }

    fn contains(&self, transform: &ChartTransform, point: PtPx) -> bool {
        let (rx, ry) = self.device_radii(transform);
        if rx <= Px::ZERO || ry <= Px::ZERO {
            return false;
        }
        let c = transform.to_device(self.center);
        let dx = (point.x - c.x).0 / rx.0;
        let dy = (point.y - c.y).0 / ry.0;
        dx * dx + dy * dy <= 1.0
    }
}

// ============================================================================
// Polygon
// ============================================================================

/// Filled world-unit polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonShape {
    pub vertices: Vec<PtW>,
    pub state: ShapeState,
}

impl PolygonShape {
    pub fn new(vertices: Vec<PtW>, styles: StyleSet) -> Self {
        Self {
            vertices,
            state: ShapeState::new(styles),
        }
    }

    pub fn with_editor(mut self, binding: EditorBinding) -> Self {
        self.state.editor = Some(binding);
        self
    }

    fn device_points(&self, transform: &ChartTransform) -> Vec<PtPx> {
        self.vertices.iter().map(|v| transform.to_device(*v)).collect()
    }
}

impl ShapeFeature for PolygonShape {
    fn state(&self) -> &ShapeState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ShapeState {
        &mut self.state
    }

    fn bounds(&self, transform: &ChartTransform) -> Option<BoxPx> {
        if self.vertices.len() < 3 {
            return None;
        }
        area_bounds(&self.device_points(transform))
    }

    fn paint_with(&self, transform: &ChartTransform, canvas: &mut dyn Canvas, style: &PaintStyle) {
        if self.bounds(transform).is_none() {
            return;
        }
        canvas.draw_polygon(&self.device_points(transform), style);
    }

    fn contains(&self, transform: &ChartTransform, point: PtPx) -> bool {
        self.bounds(transform).is_some() && polygon_contains(&self.device_points(transform), point)
    }
}

// ============================================================================
// Outline
// ============================================================================

/// Stroked polyline path, e.g. an arched weir crest.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineShape {
    pub points: Vec<PtW>,
    pub closed: bool,
    pub state: ShapeState,
}

impl OutlineShape {
    pub fn new(points: Vec<PtW>, closed: bool, styles: StyleSet) -> Self {
        Self {
            points,
            closed,
            state: ShapeState::new(styles),
        }
    }

    fn device_points(&self, transform: &ChartTransform) -> Vec<PtPx> {
        self.points.iter().map(|p| transform.to_device(*p)).collect()
    }
}

impl ShapeFeature for OutlineShape {
    fn state(&self) -> &ShapeState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ShapeState {
        &mut self.state
    }

    fn bounds(&self, transform: &ChartTransform) -> Option<BoxPx> {
        if self.points.len() < 2 {
            return None;
        }
        area_bounds(&self.device_points(transform))
    }

    fn paint_with(&self, transform: &ChartTransform, canvas: &mut dyn Canvas, style: &PaintStyle) {
        if self.bounds(transform).is_none() {
            return;
        }
        canvas.draw_path(&self.device_points(transform), self.closed, style);
    }

    fn contains(&self, transform: &ChartTransform, point: PtPx) -> bool {
        match self.bounds(transform) {
            None => false,
            Some(_) if self.closed => polygon_contains(&self.device_points(transform), point),
            Some(bb) => bb.contains(point),
        }
    }
}

// ============================================================================
// Icon
// ============================================================================

/// Fixed-size structure glyph.
#[derive(Debug, Clone, PartialEq)]
pub struct IconShape {
    pub icon: Icon,
    pub anchor: PtW,
    pub size: Size<Px>,
    pub h_align: HAlign,
    pub v_align: VAlign,
    pub state: ShapeState,
}

impl IconShape {
    /// Glyph centred on `anchor`.
    pub fn centered(icon: Icon, anchor: PtW, side: Px, styles: StyleSet) -> Self {
        Self {
            icon,
            anchor,
            size: Size::new(side, side),
            h_align: HAlign::Center,
            v_align: VAlign::Center,
            state: ShapeState::new(styles),
        }
    }

    pub fn aligned(mut self, h_align: HAlign, v_align: VAlign) -> Self {
        self.h_align = h_align;
        self.v_align = v_align;
        self
    }
}

impl ShapeFeature for IconShape {
    fn state(&self) -> &ShapeState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ShapeState {
        &mut self.state
    }

    fn bounds(&self, transform: &ChartTransform) -> Option<BoxPx> {
        aligned_box(
            transform.to_device(self.anchor),
            self.size.w,
            self.size.h,
            self.h_align,
            self.v_align,
        )
    }

    fn paint_with(&self, transform: &ChartTransform, canvas: &mut dyn Canvas, style: &PaintStyle) {
        let Some(rect) = self.bounds(transform) else {
            return;
        };
        if self.state.selected {
            canvas.draw_rect(rect, style);
        }
        canvas.draw_icon(self.icon, rect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawOp, RecordingCanvas};
    use crate::editor::EditorBinding;
    use crate::style::{Color, Stroke};
    use crate::transform::{AxisRange, Viewport};
    use crate::types::{ppx, pw};

    fn styles() -> StyleSet {
        StyleSet::from_fill(Color::GOLD, Stroke::new(Color::BLACK, 1.0))
    }

    /// 1 m = 10 px both ways, world origin at device (0, 100)
    fn transform() -> ChartTransform {
        ChartTransform::try_new(
            AxisRange::new(0.0, 10.0),
            AxisRange::new(0.0, 10.0),
            Viewport::new(0.0, 0.0, 100.0, 100.0),
        )
        .unwrap()
    }

    #[test]
    fn rectangle_projects_to_device() {
        let rect = RectangleShape::new(Meters(1.0), Meters(3.0), Meters(2.0), Meters(5.0), styles());
        let bb = rect.bounds(&transform()).unwrap();
        assert_eq!(bb.min, ppx(10.0, 50.0));
        assert_eq!(bb.max, ppx(30.0, 80.0));
        assert!(rect.contains(&transform(), ppx(20.0, 60.0)));
        assert!(!rect.contains(&transform(), ppx(40.0, 60.0)));
    }

    #[test]
    fn degenerate_rectangle_skips_paint_and_hit_test() {
        let rect = RectangleShape::new(Meters(1.0), Meters(3.0), Meters(5.0), Meters(2.0), styles());
        let mut canvas = RecordingCanvas::new();
        rect.paint(&transform(), &mut canvas);
        assert!(canvas.ops.is_empty());
        assert!(rect.bounds(&transform()).is_none());
        assert!(!rect.contains(&transform(), ppx(20.0, 60.0)));
    }

    #[test]
    fn fixed_rectangle_keeps_pixel_width_under_zoom() {
        let shape = FixedRectangleShape::new(
            pw(5.0, 4.0),
            Extent::Pixels(Px(4.0)),
            Extent::World(Meters(4.0)),
            styles(),
        )
        .aligned(HAlign::Center, VAlign::Top);

        let bb = shape.bounds(&transform()).unwrap();
        assert_eq!(bb.width(), Px(4.0));
        assert_eq!(bb.height(), Px(40.0));
        assert_eq!(bb.min, ppx(48.0, 60.0));

        let zoomed = ChartTransform::try_new(
            AxisRange::new(0.0, 5.0),
            AxisRange::new(0.0, 10.0),
            Viewport::new(0.0, 0.0, 100.0, 100.0),
        )
        .unwrap();
        assert_eq!(shape.bounds(&zoomed).unwrap().width(), Px(4.0));
    }

    #[test]
    fn fixed_rectangle_rejects_editor() {
        let shape = FixedRectangleShape::new(
            pw(0.0, 0.0),
            Extent::Pixels(Px(4.0)),
            Extent::World(Meters(1.0)),
            styles(),
        );
        assert_eq!(
            shape.with_editor(EditorBinding::CrestLevel).unwrap_err(),
            ShapeError::EditorOnFixedSize
        );

        let world = FixedRectangleShape::new(
            pw(0.0, 0.0),
            Extent::World(Meters(1.0)),
            Extent::World(Meters(1.0)),
            styles(),
        );
        assert!(world.with_editor(EditorBinding::CrestLevel).is_ok());
    }

    #[test]
    fn circle_marker_hit_test_is_round() {
        let marker = CircleShape::marker(pw(5.0, 5.0), Px(4.0), styles());
        let t = transform();
        assert!(marker.contains(&t, ppx(50.0, 50.0)));
        assert!(marker.contains(&t, ppx(53.0, 50.0)));
        // inside the bounding box corner, outside the circle
        assert!(!marker.contains(&t, ppx(53.5, 53.5)));
    }

    #[test]
    fn polygon_hit_test_follows_edges() {
        let triangle = PolygonShape::new(vec![pw(0.0, 0.0), pw(4.0, 0.0), pw(0.0, 4.0)], styles());
        let t = transform();
        assert!(triangle.contains(&t, ppx(5.0, 95.0)));
        assert!(!triangle.contains(&t, ppx(35.0, 65.0)));
    }

    #[test]
    fn collinear_polygon_is_degenerate() {
        let line = PolygonShape::new(vec![pw(0.0, 0.0), pw(1.0, 0.0), pw(2.0, 0.0)], styles());
        let mut canvas = RecordingCanvas::new();
        line.paint(&transform(), &mut canvas);
        assert!(canvas.ops.is_empty());
    }

    #[test]
    fn selected_icon_paints_highlight_first() {
        let mut icon = IconShape::centered(Icon::Pump, pw(5.0, 5.0), Px(16.0), styles());
        icon.set_selected(true);
        let mut canvas = RecordingCanvas::new();
        icon.paint(&transform(), &mut canvas);
        assert_eq!(canvas.ops.len(), 2);
        assert!(matches!(canvas.ops[0], DrawOp::Rect { .. }));
        assert!(matches!(canvas.ops[1], DrawOp::Icon { icon: Icon::Pump, .. }));
    }

    #[test]
    fn closed_outline_uses_polygon_hit_test() {
        let outline = OutlineShape::new(
            vec![pw(0.0, 0.0), pw(0.0, 2.0), pw(1.0, 3.0), pw(2.0, 2.0), pw(2.0, 0.0)],
            true,
            styles(),
        );
        let t = transform();
        assert!(outline.contains(&t, ppx(10.0, 75.0)));
        assert!(!outline.contains(&t, ppx(1.0, 71.0)));
    }
}
