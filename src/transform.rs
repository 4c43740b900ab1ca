//! World ↔ device coordinate conversion for the current chart viewport.
//!
//! The host chart owns pan/zoom. Every rebuild asks it for the current axis
//! extents through [`ChartView`] and derives a fresh [`ChartTransform`]; a
//! transform must never be kept across frames.

use crate::types::{
    BoxPx, BoxW, Meters, NumericError, Point, PtPx, PtW, Px, check_finite, check_positive,
};

/// Visible world range of one chart axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: Meters,
    pub max: Meters,
}

impl AxisRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min: Meters(min),
            max: Meters(max),
        }
    }

    pub fn span(&self) -> Meters {
        self.max - self.min
    }

    pub fn middle(&self) -> Meters {
        (self.min + self.max) / 2.0
    }
}

/// Plot area of the chart in device pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub left: Px,
    pub top: Px,
    pub width: Px,
    pub height: Px,
}

impl Viewport {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left: Px(left),
            top: Px(top),
            width: Px(width),
            height: Px(height),
        }
    }
}

/// What the host chart control exposes to shape rebuilding.
pub trait ChartView {
    /// Horizontal (bottom) axis extent in world units
    fn x_axis(&self) -> AxisRange;
    /// Vertical (left) axis extent in world units
    fn y_axis(&self) -> AxisRange;
    /// Plot area in device pixels
    fn viewport(&self) -> Viewport;
}

/// A fixed chart configuration, handy for hosts that snapshot their axes and for tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticChart {
    pub x_axis: AxisRange,
    pub y_axis: AxisRange,
    pub viewport: Viewport,
}

impl ChartView for StaticChart {
    fn x_axis(&self) -> AxisRange {
        self.x_axis
    }

    fn y_axis(&self) -> AxisRange {
        self.y_axis
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }
}

/// Stateless affine mapping between world and device coordinates.
///
/// Device y grows downwards, world y (level) grows upwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartTransform {
    x_axis: AxisRange,
    y_axis: AxisRange,
    viewport: Viewport,
}

impl ChartTransform {
    /// Build a transform, rejecting empty axes, empty viewports and non-finite values.
    pub fn try_new(
        x_axis: AxisRange,
        y_axis: AxisRange,
        viewport: Viewport,
    ) -> Result<Self, NumericError> {
        for v in [x_axis.min.0, x_axis.max.0, y_axis.min.0, y_axis.max.0] {
            check_finite(v)?;
        }
        check_finite(viewport.left.0)?;
        check_finite(viewport.top.0)?;
        check_positive(x_axis.span().0)?;
        check_positive(y_axis.span().0)?;
        check_positive(viewport.width.0)?;
        check_positive(viewport.height.0)?;
        Ok(Self {
            x_axis,
            y_axis,
            viewport,
        })
    }

    /// Query the chart for its current state.
    pub fn from_view(view: &dyn ChartView) -> Result<Self, NumericError> {
        Self::try_new(view.x_axis(), view.y_axis(), view.viewport())
    }

    pub fn x_axis(&self) -> AxisRange {
        self.x_axis
    }

    pub fn y_axis(&self) -> AxisRange {
        self.y_axis
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Lowest visible level
    pub fn view_bottom(&self) -> Meters {
        self.y_axis.min
    }

    /// Highest visible level
    pub fn view_top(&self) -> Meters {
        self.y_axis.max
    }

    fn px_per_meter_x(&self) -> f64 {
        self.viewport.width.0 / self.x_axis.span().0
    }

    fn px_per_meter_y(&self) -> f64 {
        self.viewport.height.0 / self.y_axis.span().0
    }

    pub fn world_to_device_x(&self, x: Meters) -> Px {
        Px(self.viewport.left.0 + (x - self.x_axis.min).0 * self.px_per_meter_x())
    }

    pub fn world_to_device_y(&self, y: Meters) -> Px {
        Px(self.viewport.top.0 + (self.y_axis.max - y).0 * self.px_per_meter_y())
    }

    pub fn device_to_world_x(&self, x: Px) -> Meters {
        Meters(self.x_axis.min.0 + (x - self.viewport.left).0 / self.px_per_meter_x())
    }

    pub fn device_to_world_y(&self, y: Px) -> Meters {
        Meters(self.y_axis.max.0 - (y - self.viewport.top).0 / self.px_per_meter_y())
    }

    /// World width covered by `n` horizontal pixels.
    pub fn world_width_of_pixels(&self, n: Px) -> Meters {
        Meters(n.0 / self.px_per_meter_x())
    }

    /// World height covered by `n` vertical pixels.
    pub fn world_height_of_pixels(&self, n: Px) -> Meters {
        Meters(n.0 / self.px_per_meter_y())
    }

    pub fn to_device(&self, p: PtW) -> PtPx {
        Point::new(self.world_to_device_x(p.x), self.world_to_device_y(p.y))
    }

    pub fn to_world(&self, p: PtPx) -> PtW {
        Point::new(self.device_to_world_x(p.x), self.device_to_world_y(p.y))
    }

    /// Device rectangle for a world rectangle (the y flip swaps top and bottom).
    pub fn box_to_device(&self, b: &BoxW) -> BoxPx {
        BoxPx::from_corners(self.to_device(b.min), self.to_device(b.max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn transform() -> ChartTransform {
        // 100 m x 10 m mapped onto 500 x 200 px, plot area offset by (20, 10)
        ChartTransform::try_new(
            AxisRange::new(0.0, 100.0),
            AxisRange::new(-5.0, 5.0),
            Viewport::new(20.0, 10.0, 500.0, 200.0),
        )
        .unwrap()
    }

    #[test]
    fn axis_corners_map_to_viewport_corners() {
        let t = transform();
        assert_eq!(t.world_to_device_x(Meters(0.0)), Px(20.0));
        assert_eq!(t.world_to_device_x(Meters(100.0)), Px(520.0));
        assert_eq!(t.world_to_device_y(Meters(5.0)), Px(10.0));
        assert_eq!(t.world_to_device_y(Meters(-5.0)), Px(210.0));
    }

    #[test]
    fn pixel_extents_convert_to_world() {
        let t = transform();
        assert_eq!(t.world_width_of_pixels(Px(5.0)), Meters(1.0));
        assert_eq!(t.world_height_of_pixels(Px(20.0)), Meters(1.0));
    }

    #[test]
    fn world_box_flips_into_device_box() {
        let t = transform();
        let b = t.box_to_device(&BoxW::from_corners(Point::new(Meters(10.0), Meters(-5.0)), Point::new(Meters(20.0), Meters(0.0))));
        assert_eq!(b.min, Point::new(Px(70.0), Px(110.0)));
        assert_eq!(b.max, Point::new(Px(120.0), Px(210.0)));
        assert_eq!(t.to_world(b.max), Point::new(Meters(20.0), Meters(-5.0)));
    }

    #[test]
    fn rejects_degenerate_configuration() {
        let vp = Viewport::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!(
            ChartTransform::try_new(AxisRange::new(1.0, 1.0), AxisRange::new(0.0, 1.0), vp),
            Err(NumericError::Zero)
        );
        assert_eq!(
            ChartTransform::try_new(AxisRange::new(0.0, 1.0), AxisRange::new(2.0, 1.0), vp),
            Err(NumericError::Negative)
        );
        assert_eq!(
            ChartTransform::try_new(
                AxisRange::new(0.0, f64::NAN),
                AxisRange::new(0.0, 1.0),
                vp
            ),
            Err(NumericError::NaN)
        );
        assert_eq!(
            ChartTransform::try_new(
                AxisRange::new(0.0, 1.0),
                AxisRange::new(0.0, 1.0),
                Viewport::new(0.0, 0.0, 0.0, 10.0)
            ),
            Err(NumericError::Zero)
        );
    }

    #[test]
    fn from_view_reads_current_state() {
        let chart = StaticChart {
            x_axis: AxisRange::new(0.0, 10.0),
            y_axis: AxisRange::new(0.0, 10.0),
            viewport: Viewport::new(0.0, 0.0, 100.0, 100.0),
        };
        let t = ChartTransform::from_view(&chart).unwrap();
        assert_eq!(t.view_top(), Meters(10.0));
        assert_eq!(t.view_bottom(), Meters(0.0));
    }

    proptest! {
        #[test]
        fn device_world_round_trip(v in -1.0e4f64..1.0e4) {
            let t = transform();
            let x = t.device_to_world_x(t.world_to_device_x(Meters(v)));
            let y = t.device_to_world_y(t.world_to_device_y(Meters(v)));
            prop_assert!((x.0 - v).abs() < 1e-9 * v.abs().max(1.0));
            prop_assert!((y.0 - v).abs() < 1e-9 * v.abs().max(1.0));
        }

        #[test]
        fn pixel_width_scales_linearly(n in 0.0f64..1.0e4, k in 0.0f64..100.0) {
            let t = transform();
            let one = t.world_width_of_pixels(Px(n)).0;
            let scaled = t.world_width_of_pixels(Px(n * k)).0;
            prop_assert!((scaled - one * k).abs() < 1e-9 * scaled.abs().max(1.0));
            let h_one = t.world_height_of_pixels(Px(n)).0;
            let h_scaled = t.world_height_of_pixels(Px(n * k)).0;
            prop_assert!((h_scaled - h_one * k).abs() < 1e-9 * h_scaled.abs().max(1.0));
        }
    }
}
