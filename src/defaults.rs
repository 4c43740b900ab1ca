//! Default sizes and settings (pixels unless noted)

use crate::types::{Meters, Px};

/// Side of a structure glyph
pub const ICON_SIZE: f64 = 16.0;
/// Width of a sharp-crested weir plate in the side view
pub const SHARP_WEIR_WIDTH: f64 = 4.0;
/// Width of a round, triangular or broad weir body in the side view
pub const WEIR_SIDE_WIDTH: f64 = 16.0;
/// Upper bound for the crest arch height
pub const ARCH_HEIGHT: f64 = 5.0;
/// Samples used to approximate a round crest
pub const ARCH_SEGMENTS: usize = 8;
/// Gap between a structure's top and the glyph above it
pub const ICON_GAP: f64 = 4.0;
/// Thickness of the bridge deck band
pub const SURFACE_HEIGHT: f64 = 6.0;
/// Gap between profile top and the bridge deck
pub const SURFACE_GAP: f64 = 4.0;
/// Deck overhang beyond the bridge length, each side
pub const SURFACE_OVERHANG: f64 = 8.0;
/// Radius of culvert inlet/outlet markers
pub const MARKER_RADIUS: f64 = 4.0;
/// Width of a pump control bar
pub const CONTROL_LINE_WIDTH: f64 = 2.0;
/// Horizontal distance between a pump glyph centre and its control bars
pub const CONTROL_LINE_OFFSET: f64 = 12.0;
/// Length of the start/stop ticks on a control bar
pub const TICK_LENGTH: f64 = 10.0;
/// Thickness of the start/stop ticks
pub const TICK_THICKNESS: f64 = 2.0;
/// Distance between an annotated shape and its hover text
pub const HOVER_GAP: f64 = 4.0;
/// Inner padding of a hover background box
pub const HOVER_PADDING: f64 = 2.0;
pub const ARROW_LENGTH: f64 = 6.0;
pub const ARROW_WIDTH: f64 = 4.0;
pub const CHAR_WIDTH: f64 = 7.0;
pub const LINE_HEIGHT: f64 = 14.0;
/// Minimum ground-layer thickness in meters
pub const MIN_GROUND_LAYER: f64 = 0.1;
/// Extra height above a gated weir's crest included in its world extent (meters)
pub const GATE_EXTENT: f64 = 10.0;
/// Fraction of each bound added when fitting axes
pub const AXIS_PADDING: f64 = 0.1;

/// Builder and hover settings, defaulting to the constants above.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeOptions {
    pub icon_size: Px,
    pub sharp_weir_width: Px,
    pub weir_side_width: Px,
    pub arch_height: Px,
    pub arch_segments: usize,
    pub icon_gap: Px,
    pub surface_height: Px,
    pub surface_gap: Px,
    pub surface_overhang: Px,
    pub marker_radius: Px,
    pub control_line_width: Px,
    pub control_line_offset: Px,
    pub tick_length: Px,
    pub tick_thickness: Px,
    pub hover_gap: Px,
    pub hover_padding: Px,
    pub arrow_length: Px,
    pub arrow_width: Px,
    pub min_ground_layer: Meters,
    pub gate_extent: Meters,
    pub axis_padding: f64,
}

impl Default for ShapeOptions {
    fn default() -> Self {
        Self {
            icon_size: Px(ICON_SIZE),
            sharp_weir_width: Px(SHARP_WEIR_WIDTH),
            weir_side_width: Px(WEIR_SIDE_WIDTH),
            arch_height: Px(ARCH_HEIGHT),
            arch_segments: ARCH_SEGMENTS,
            icon_gap: Px(ICON_GAP),
            surface_height: Px(SURFACE_HEIGHT),
            surface_gap: Px(SURFACE_GAP),
            surface_overhang: Px(SURFACE_OVERHANG),
            marker_radius: Px(MARKER_RADIUS),
            control_line_width: Px(CONTROL_LINE_WIDTH),
            control_line_offset: Px(CONTROL_LINE_OFFSET),
            tick_length: Px(TICK_LENGTH),
            tick_thickness: Px(TICK_THICKNESS),
            hover_gap: Px(HOVER_GAP),
            hover_padding: Px(HOVER_PADDING),
            arrow_length: Px(ARROW_LENGTH),
            arrow_width: Px(ARROW_WIDTH),
            min_ground_layer: Meters(MIN_GROUND_LAYER),
            gate_extent: Meters(GATE_EXTENT),
            axis_padding: AXIS_PADDING,
        }
    }
}
