//! Hover annotations: short text labels placed next to a shape without overlap.
//!
//! Placement is greedy per render pass. Every placed text box is appended to a
//! [`UsedSpaceLedger`]; a line whose box would intersect any earlier box is
//! dropped together with all following lines of the same annotation.

use glam::{DVec2, dvec2};

use crate::canvas::Canvas;
use crate::defaults::ShapeOptions;
use crate::style::{Color, HoverStyle, PaintStyle, Stroke};
use crate::text::FontMetrics;
use crate::types::{BoxPx, Point, PtPx, Px, Size};

/// Maximum number of text lines per annotation.
pub const MAX_LINES: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverPosition {
    Top,
    Bottom,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowHead {
    None,
    Start,
    End,
    Both,
}

/// Text overlay attached to one child of a composite.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverAnnotation {
    pub lines: Vec<String>,
    pub foreground: Color,
    pub background: Option<Color>,
    pub line: Stroke,
    pub position: HoverPosition,
    pub show_line: bool,
    pub arrow: ArrowHead,
    /// Index of the annotated child
    pub target: usize,
}

impl HoverAnnotation {
    pub fn new(target: usize, position: HoverPosition, style: &HoverStyle) -> Self {
        Self {
            lines: Vec::new(),
            foreground: style.foreground,
            background: style.background,
            line: style.line,
            position,
            show_line: false,
            arrow: ArrowHead::None,
            target,
        }
    }

    /// Append a text line; lines beyond [`MAX_LINES`] are ignored.
    pub fn text(mut self, line: impl Into<String>) -> Self {
        if self.lines.len() < MAX_LINES {
            self.lines.push(line.into());
        }
        self
    }

    pub fn with_leader(mut self, arrow: ArrowHead) -> Self {
        self.show_line = true;
        self.arrow = arrow;
        self
    }
}

/// Screen rectangles already taken by text during the current render pass.
#[derive(Debug, Clone, Default)]
pub struct UsedSpaceLedger {
    rects: Vec<BoxPx>,
}

impl UsedSpaceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.rects.clear();
    }

    pub fn push(&mut self, rect: BoxPx) {
        self.rects.push(rect);
    }

    pub fn intersects_any(&self, rect: &BoxPx) -> bool {
        self.rects.iter().any(|r| r.intersects(rect))
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    pub fn rects(&self) -> &[BoxPx] {
        &self.rects
    }
}

/// Outcome of placing one annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Placement {
    pub placed: usize,
    pub skipped: usize,
    pub leader_drawn: bool,
}

impl std::ops::AddAssign for Placement {
    fn add_assign(&mut self, rhs: Placement) {
        self.placed += rhs.placed;
        self.skipped += rhs.skipped;
        self.leader_drawn |= rhs.leader_drawn;
    }
}

/// Leader line between two device points, start to end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Leader {
    pub start: PtPx,
    pub end: PtPx,
    pub arrow: ArrowHead,
}

/// Lays out and paints hover annotations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverAnnotationLayer {
    pub gap: Px,
    pub padding: Px,
    pub arrow_length: Px,
    pub arrow_width: Px,
}

impl HoverAnnotationLayer {
    pub fn new(options: &ShapeOptions) -> Self {
        Self {
            gap: options.hover_gap,
            padding: options.hover_padding,
            arrow_length: options.arrow_length,
            arrow_width: options.arrow_width,
        }
    }

    /// Leader line along the side of `bounds` facing the text.
    ///
    /// Top and bottom leaders run left to right, left and right leaders run
    /// bottom to top. The span is trimmed by the font margin at both ends; a
    /// span shorter than two margins keeps its full length and loses its arrows.
    pub fn leader(&self, hover: &HoverAnnotation, bounds: BoxPx, font: &FontMetrics) -> Leader {
        let (start, end) = match hover.position {
            HoverPosition::Top => {
                let y = bounds.min.y - self.gap;
                (Point::new(bounds.min.x, y), Point::new(bounds.max.x, y))
            }
            HoverPosition::Bottom => {
                let y = bounds.max.y + self.gap;
                (Point::new(bounds.min.x, y), Point::new(bounds.max.x, y))
            }
            HoverPosition::Left => {
                let x = bounds.min.x - self.gap;
                (Point::new(x, bounds.max.y), Point::new(x, bounds.min.y))
            }
            HoverPosition::Right => {
                let x = bounds.max.x + self.gap;
                (Point::new(x, bounds.max.y), Point::new(x, bounds.min.y))
            }
        };

        let margin = font.margin().0;
        let (a, b) = (start.to_dvec2(), end.to_dvec2());
        let span = b - a;
        if span.length() < 2.0 * margin {
            return Leader {
                start,
                end,
                arrow: ArrowHead::None,
            };
        }
        let unit = span / span.length();
        Leader {
            start: PtPx::from_dvec2(a + unit * margin),
            end: PtPx::from_dvec2(b - unit * margin),
            arrow: hover.arrow,
        }
    }

    /// Candidate text box for every line, in placement order.
    pub fn candidate_rects(&self, hover: &HoverAnnotation, bounds: BoxPx, font: &FontMetrics) -> Vec<BoxPx> {
        let sizes: Vec<Size<Px>> = hover
            .lines
            .iter()
            .map(|line| {
                let m = font.measure(line);
                Size::new(m.w + self.padding * 2.0, m.h)
            })
            .collect();
        let block_height = font.line_height * sizes.len() as f64;
        let center = bounds.center();

        let mut cursor = match hover.position {
            HoverPosition::Top => bounds.min.y - self.gap - block_height,
            HoverPosition::Bottom => bounds.max.y + self.gap,
            HoverPosition::Left | HoverPosition::Right => center.y - block_height / 2.0,
        };

        let mut rects = Vec::with_capacity(sizes.len());
        for size in sizes {
            let left = match hover.position {
                HoverPosition::Top | HoverPosition::Bottom => center.x - size.w / 2.0,
                HoverPosition::Left => bounds.min.x - self.gap * 2.0 - size.w,
                HoverPosition::Right => bounds.max.x + self.gap * 2.0,
            };
            rects.push(BoxPx::from_origin_size(Point::new(left, cursor), size));
            cursor += font.line_height;
        }
        rects
    }

    /// Place and paint one annotation next to `bounds`.
    pub fn place(
        &self,
        hover: &HoverAnnotation,
        bounds: BoxPx,
        ledger: &mut UsedSpaceLedger,
        canvas: &mut dyn Canvas,
    ) -> Placement {
        let font = canvas.font_metrics();
        let rects = self.candidate_rects(hover, bounds, &font);

        let mut placed = 0;
        for (line, rect) in hover.lines.iter().zip(&rects) {
            if ledger.intersects_any(rect) {
                crate::log::debug!(
                    line = line.as_str(),
                    remaining = hover.lines.len() - placed,
                    "hover text collides, dropping remaining lines"
                );
                break;
            }
            ledger.push(*rect);
            crate::log::trace!(line = line.as_str(), "hover line placed");
            if let Some(background) = hover.background {
                canvas.draw_rect(
                    *rect,
                    &PaintStyle {
                        fill: Some(background),
                        stroke: None,
                    },
                );
            }
            let origin = Point::new(rect.min.x + self.padding, rect.min.y);
            canvas.draw_text(line, origin, hover.foreground);
            placed += 1;
        }

        let leader_drawn = placed > 0 && hover.show_line;
        if leader_drawn {
            let leader = self.leader(hover, bounds, &font);
            canvas.draw_line(leader.start, leader.end, &hover.line);
            let fill = PaintStyle {
                fill: Some(hover.line.color),
                stroke: None,
            };
            if matches!(leader.arrow, ArrowHead::Start | ArrowHead::Both) {
                self.paint_arrowhead(canvas, leader.end, leader.start, &fill);
            }
            if matches!(leader.arrow, ArrowHead::End | ArrowHead::Both) {
                self.paint_arrowhead(canvas, leader.start, leader.end, &fill);
            }
        }

        Placement {
            placed,
            skipped: hover.lines.len() - placed,
            leader_drawn,
        }
    }

    /// Filled triangle with its tip at `tip`, pointing away from `from`.
    fn paint_arrowhead(&self, canvas: &mut dyn Canvas, from: PtPx, tip: PtPx, style: &PaintStyle) {
        if let Some(points) = arrowhead(from.to_dvec2(), tip.to_dvec2(), self.arrow_length.0, self.arrow_width.0) {
            canvas.draw_polygon(&points, style);
        }
    }
}

/// Arrowhead triangle for the segment `start -> end`, tip first.
pub fn arrowhead(start: DVec2, end: DVec2, length: f64, width: f64) -> Option<[PtPx; 3]> {
    let delta = end - start;
    let len = delta.length();
    if len < 0.001 {
        return None;
    }
    let unit = delta / len;
    let perp = dvec2(-unit.y, unit.x);
    let base = end - unit * length;
    let half = width / 2.0;
    Some([
        PtPx::from_dvec2(end),
        PtPx::from_dvec2(base + perp * half),
        PtPx::from_dvec2(base - perp * half),
    ])
}
