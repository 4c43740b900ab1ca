//! Paint styles and the per-structure-kind palettes.
//!
//! A [`StyleRegistry`] is built once by the host and handed to every rebuild
//! by reference. Nothing here is mutated after construction.

use crate::types::Px;

/// RGBA color, alpha 255 = opaque
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GRAY: Color = Color::rgb(128, 128, 128);
    pub const DARK_GRAY: Color = Color::rgb(169, 169, 169);
    pub const LIGHT_GRAY: Color = Color::rgb(211, 211, 211);
    pub const GOLD: Color = Color::rgb(255, 215, 0);
    pub const MAGENTA: Color = Color::rgb(255, 0, 255);
    pub const DARK_RED: Color = Color::rgb(139, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 128, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const STEEL_BLUE: Color = Color::rgb(70, 130, 180);
    pub const SADDLE_BROWN: Color = Color::rgb(139, 69, 19);
    pub const SANDY_BROWN: Color = Color::rgb(244, 164, 96);
}

/// Outline description
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: Px,
}

impl Stroke {
    pub const fn new(color: Color, width: f64) -> Self {
        Self {
            color,
            width: Px(width),
        }
    }
}

/// Fill + stroke used to paint one primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaintStyle {
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
}

impl PaintStyle {
    pub const fn filled(fill: Color, stroke: Stroke) -> Self {
        Self {
            fill: Some(fill),
            stroke: Some(stroke),
        }
    }

    pub const fn outline(stroke: Stroke) -> Self {
        Self {
            fill: None,
            stroke: Some(stroke),
        }
    }
}

/// Which of the three style slots a primitive paints with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleSlot {
    Normal,
    Selected,
    Disabled,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleSet {
    pub normal: PaintStyle,
    pub selected: PaintStyle,
    pub disabled: PaintStyle,
}

impl StyleSet {
    /// Normal fill as given, selection highlighted in magenta, disabled greyed out.
    pub const fn from_fill(fill: Color, stroke: Stroke) -> Self {
        Self {
            normal: PaintStyle::filled(fill, stroke),
            selected: PaintStyle::filled(Color::MAGENTA.with_alpha(150), stroke),
            disabled: PaintStyle::filled(
                Color::LIGHT_GRAY.with_alpha(100),
                Stroke::new(Color::GRAY, 1.0),
            ),
        }
    }

    pub fn get(&self, slot: StyleSlot) -> &PaintStyle {
        match slot {
            StyleSlot::Normal => &self.normal,
            StyleSlot::Selected => &self.selected,
            StyleSlot::Disabled => &self.disabled,
        }
    }
}

/// Colors and line used for hover annotations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverStyle {
    pub foreground: Color,
    pub background: Option<Color>,
    pub line: Stroke,
}

/// Immutable palettes for every structure kind.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleRegistry {
    pub weir: StyleSet,
    pub gate: StyleSet,
    pub water: StyleSet,
    pub bridge_surface: StyleSet,
    pub bridge_cross_section: StyleSet,
    pub ground_layer: StyleSet,
    pub culvert_tube: StyleSet,
    pub inlet: StyleSet,
    pub outlet: StyleSet,
    pub pump_control: StyleSet,
    pub pump_start: StyleSet,
    pub pump_stop: StyleSet,
    pub icon: StyleSet,
    pub hover: HoverStyle,
}

impl StyleRegistry {
    pub fn standard() -> Self {
        let black = Stroke::new(Color::BLACK, 1.0);
        Self {
            weir: StyleSet::from_fill(Color::GOLD.with_alpha(100), black),
            gate: StyleSet::from_fill(Color::DARK_GRAY.with_alpha(200), black),
            water: StyleSet::from_fill(Color::STEEL_BLUE.with_alpha(120), Stroke::new(Color::BLUE, 1.0)),
            bridge_surface: StyleSet::from_fill(Color::GRAY, black),
            bridge_cross_section: StyleSet::from_fill(Color::LIGHT_GRAY.with_alpha(100), black),
            ground_layer: StyleSet::from_fill(Color::SANDY_BROWN.with_alpha(150), Stroke::new(Color::SADDLE_BROWN, 1.0)),
            culvert_tube: StyleSet::from_fill(Color::GOLD.with_alpha(100), black),
            inlet: StyleSet::from_fill(Color::GREEN, black),
            outlet: StyleSet::from_fill(Color::BLUE, black),
            pump_control: StyleSet::from_fill(Color::BLACK, black),
            pump_start: StyleSet::from_fill(Color::GREEN, Stroke::new(Color::GREEN, 1.0)),
            pump_stop: StyleSet::from_fill(Color::RED, Stroke::new(Color::DARK_RED, 1.0)),
            icon: StyleSet::from_fill(Color::WHITE.with_alpha(0), Stroke::new(Color::BLACK, 0.0)),
            hover: HoverStyle {
                foreground: Color::BLACK,
                background: Some(Color::WHITE.with_alpha(200)),
                line: Stroke::new(Color::BLACK, 1.0),
            },
        }
    }
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_resolve_to_distinct_styles() {
        let set = StyleSet::from_fill(Color::GOLD, Stroke::new(Color::BLACK, 1.0));
        assert_eq!(set.get(StyleSlot::Normal).fill, Some(Color::GOLD));
        assert_eq!(set.get(StyleSlot::Selected).fill, Some(Color::MAGENTA.with_alpha(150)));
        assert_ne!(set.get(StyleSlot::Disabled), set.get(StyleSlot::Normal));
    }

    #[test]
    fn stop_tick_is_styled_apart_from_start_tick() {
        let styles = StyleRegistry::standard();
        assert_ne!(styles.pump_stop.normal, styles.pump_start.normal);
    }
}
