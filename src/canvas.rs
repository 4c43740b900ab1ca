//! Drawing context supplied by the host chart.
//!
//! All coordinates handed to a [`Canvas`] are device pixels. [`RecordingCanvas`]
//! keeps every call as a [`DrawOp`], which is what hosts use to replay a frame
//! onto their own surface and what the tests assert against.

use std::fmt;

use crate::style::{Color, PaintStyle, Stroke};
use crate::text::FontMetrics;
use crate::types::{BoxPx, PtPx, Px};

/// Structure glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    Weir,
    Gate,
    Bridge,
    Culvert,
    Pump,
}

pub trait Canvas {
    fn draw_rect(&mut self, rect: BoxPx, style: &PaintStyle);
    fn draw_polygon(&mut self, points: &[PtPx], style: &PaintStyle);
    /// Open or closed polyline outline
    fn draw_path(&mut self, points: &[PtPx], closed: bool, style: &PaintStyle);
    fn draw_ellipse(&mut self, center: PtPx, rx: Px, ry: Px, style: &PaintStyle);
    fn draw_line(&mut self, from: PtPx, to: PtPx, stroke: &Stroke);
    fn draw_icon(&mut self, icon: Icon, rect: BoxPx);
    /// `origin` is the top-left corner of the text box
    fn draw_text(&mut self, text: &str, origin: PtPx, color: Color);
    fn font_metrics(&self) -> FontMetrics;
}

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Rect {
        rect: BoxPx,
        style: PaintStyle,
    },
    Polygon {
        points: Vec<PtPx>,
        style: PaintStyle,
    },
    Path {
        points: Vec<PtPx>,
        closed: bool,
        style: PaintStyle,
    },
    Ellipse {
        center: PtPx,
        rx: Px,
        ry: Px,
        style: PaintStyle,
    },
    Line {
        from: PtPx,
        to: PtPx,
        stroke: Stroke,
    },
    Icon {
        icon: Icon,
        rect: BoxPx,
    },
    Text {
        text: String,
        origin: PtPx,
        color: Color,
    },
}

impl DrawOp {
    pub fn is_text(&self) -> bool {
        matches!(self, DrawOp::Text { .. })
    }

    pub fn is_line(&self) -> bool {
        matches!(self, DrawOp::Line { .. })
    }
}

fn fmt_pt(f: &mut fmt::Formatter<'_>, p: &PtPx) -> fmt::Result {
    write!(f, "({},{})", p.x, p.y)
}

fn fmt_box(f: &mut fmt::Formatter<'_>, b: &BoxPx) -> fmt::Result {
    fmt_pt(f, &b.min)?;
    write!(f, "-")?;
    fmt_pt(f, &b.max)
}

/// Compact one-line form used in snapshot tests.
impl fmt::Display for DrawOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawOp::Rect { rect, .. } => {
                write!(f, "rect ")?;
                fmt_box(f, rect)
            }
            DrawOp::Polygon { points, .. } => {
                write!(f, "polygon")?;
                for p in points {
                    write!(f, " ")?;
                    fmt_pt(f, p)?;
                }
                Ok(())
            }
            DrawOp::Path { points, closed, .. } => {
                write!(f, "path")?;
                for p in points {
                    write!(f, " ")?;
                    fmt_pt(f, p)?;
                }
                if *closed {
                    write!(f, " z")?;
                }
                Ok(())
            }
            DrawOp::Ellipse { center, rx, ry, .. } => {
                write!(f, "ellipse ")?;
                fmt_pt(f, center)?;
                write!(f, " {}x{}", rx, ry)
            }
            DrawOp::Line { from, to, .. } => {
                write!(f, "line ")?;
                fmt_pt(f, from)?;
                write!(f, "->")?;
                fmt_pt(f, to)
            }
            DrawOp::Icon { icon, rect } => {
                write!(f, "icon {:?} ", icon)?;
                fmt_box(f, rect)
            }
            DrawOp::Text { text, origin, .. } => {
                write!(f, "text {:?} at ", text)?;
                fmt_pt(f, origin)
            }
        }
    }
}

/// Canvas that records calls instead of rasterizing them.
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    pub ops: Vec<DrawOp>,
    pub font: FontMetrics,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_font(font: FontMetrics) -> Self {
        Self {
            ops: Vec::new(),
            font,
        }
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// One line per recorded op.
    pub fn listing(&self) -> String {
        self.ops
            .iter()
            .map(|op| op.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Canvas for RecordingCanvas {
    fn draw_rect(&mut self, rect: BoxPx, style: &PaintStyle) {
        self.ops.push(DrawOp::Rect { rect, style: *style });
    }

    fn draw_polygon(&mut self, points: &[PtPx], style: &PaintStyle) {
        self.ops.push(DrawOp::Polygon {
            points: points.to_vec(),
            style: *style,
        });
    }

    fn draw_path(&mut self, points: &[PtPx], closed: bool, style: &PaintStyle) {
        self.ops.push(DrawOp::Path {
            points: points.to_vec(),
            closed,
            style: *style,
        });
    }

    fn draw_ellipse(&mut self, center: PtPx, rx: Px, ry: Px, style: &PaintStyle) {
        self.ops.push(DrawOp::Ellipse {
            center,
            rx,
            ry,
            style: *style,
        });
    }

    fn draw_line(&mut self, from: PtPx, to: PtPx, stroke: &Stroke) {
        self.ops.push(DrawOp::Line {
            from,
            to,
            stroke: *stroke,
        });
    }

    fn draw_icon(&mut self, icon: Icon, rect: BoxPx) {
        self.ops.push(DrawOp::Icon { icon, rect });
    }

    fn draw_text(&mut self, text: &str, origin: PtPx, color: Color) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            origin,
            color,
        });
    }

    fn font_metrics(&self) -> FontMetrics {
        self.font
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Color;
    use crate::types::ppx;

    #[test]
    fn records_calls_in_order() {
        let mut canvas = RecordingCanvas::new();
        let stroke = Stroke::new(Color::BLACK, 1.0);
        canvas.draw_line(ppx(0.0, 0.0), ppx(10.0, 0.0), &stroke);
        canvas.draw_text("hi", ppx(1.0, 2.0), Color::BLACK);

        assert_eq!(canvas.ops.len(), 2);
        assert!(canvas.ops[0].is_line());
        assert!(canvas.ops[1].is_text());
        assert_eq!(canvas.listing(), "line (0,0)->(10,0)\ntext \"hi\" at (1,2)");
    }
}
