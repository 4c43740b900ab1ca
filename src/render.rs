//! One render pass over a set of composites.
//!
//! Shapes are painted first, in composite order, then every hover annotation
//! is placed against a single fresh [`UsedSpaceLedger`] that already holds
//! the glyphs of all composites.

use crate::canvas::Canvas;
use crate::composite::CompositeShapeFeature;
use crate::defaults::ShapeOptions;
use crate::errors::ShapeError;
use crate::hover::{HoverAnnotationLayer, Placement, UsedSpaceLedger};
use crate::style::StyleRegistry;
use crate::transform::{ChartTransform, ChartView};

/// Host chart, palettes and options for the current frame.
#[derive(Clone, Copy)]
pub struct FrameContext<'a> {
    pub chart: &'a dyn ChartView,
    pub styles: &'a StyleRegistry,
    pub options: &'a ShapeOptions,
}

impl<'a> FrameContext<'a> {
    pub fn new(chart: &'a dyn ChartView, styles: &'a StyleRegistry, options: &'a ShapeOptions) -> Self {
        Self {
            chart,
            styles,
            options,
        }
    }

    /// Transform for the chart's current pan/zoom.
    pub fn transform(&self) -> Result<ChartTransform, ShapeError> {
        Ok(ChartTransform::from_view(self.chart)?)
    }

    pub fn hover_layer(&self) -> HoverAnnotationLayer {
        HoverAnnotationLayer::new(self.options)
    }
}

/// What one call to [`render_frame`] drew.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameReport {
    pub shapes_painted: usize,
    pub hover_lines_placed: usize,
    pub hover_lines_skipped: usize,
}

/// Paint every composite, then place their hover annotations.
pub fn render_frame(
    frame: &FrameContext<'_>,
    composites: &mut [CompositeShapeFeature],
    canvas: &mut dyn Canvas,
) -> Result<FrameReport, ShapeError> {
    let mut report = FrameReport::default();
    for composite in composites.iter_mut() {
        composite.paint(frame, canvas)?;
        report.shapes_painted += composite.children().len();
    }

    let transform = frame.transform()?;
    let layer = frame.hover_layer();
    let mut ledger = UsedSpaceLedger::new();
    for composite in composites.iter() {
        composite.reserve_glyphs(&transform, &mut ledger);
    }
    let mut hovers = Placement::default();
    for composite in composites.iter() {
        hovers += composite.paint_hovers(&transform, &layer, &mut ledger, canvas);
    }
    report.hover_lines_placed = hovers.placed;
    report.hover_lines_skipped = hovers.skipped;

    crate::log::debug!(
        shapes = report.shapes_painted,
        placed = report.hover_lines_placed,
        skipped = report.hover_lines_skipped,
        "frame rendered"
    );
    Ok(report)
}
