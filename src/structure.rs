//! Read-only snapshots of the hydraulic structures being drawn.
//!
//! The domain model is owned by the host. Shapes hold a shared
//! [`StructureHandle`] and take a shared borrow for the duration of one
//! rebuild. Editors and the structure-view layout are the only writers; the
//! dirty flag editors raise is left for the host to consume.

use std::cell::RefCell;
use std::rc::Rc;

use crate::types::{Meters, PtW};

/// Shared, single-threaded handle onto a live domain structure.
pub type StructureHandle<T> = Rc<RefCell<T>>;

pub fn handle<T>(structure: T) -> StructureHandle<T> {
    Rc::new(RefCell::new(structure))
}

/// Common bookkeeping every structure kind exposes.
pub trait Structure {
    fn name(&self) -> &str;
    fn is_dirty(&self) -> bool;
    /// Flag the structure as changed for the host to pick up.
    fn mark_dirty(&mut self);
    fn clear_dirty(&mut self);
}

macro_rules! impl_structure {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Structure for $ty {
                fn name(&self) -> &str {
                    &self.name
                }

                fn is_dirty(&self) -> bool {
                    self.dirty
                }

                fn mark_dirty(&mut self) {
                    self.dirty = true;
                }

                fn clear_dirty(&mut self) {
                    self.dirty = false;
                }
            }
        )*
    };
}

/// Cross-section profile: (cross-channel offset, level) pairs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Profile {
    pub points: Vec<PtW>,
}

/// Horizontal and vertical extent of a profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileExtent {
    pub min_y: Meters,
    pub max_y: Meters,
    pub min_z: Meters,
    pub max_z: Meters,
}

impl ProfileExtent {
    pub fn width(&self) -> Meters {
        self.max_y - self.min_y
    }

    pub fn height(&self) -> Meters {
        self.max_z - self.min_z
    }
}

impl Profile {
    pub fn new(points: Vec<PtW>) -> Self {
        Self { points }
    }

    /// Rectangular profile of the given width and height, bottom at level 0.
    pub fn rectangle(width: f64, height: f64) -> Self {
        use crate::types::pw;
        Self::new(vec![
            pw(0.0, height),
            pw(0.0, 0.0),
            pw(width, 0.0),
            pw(width, height),
        ])
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Enough points to describe an area (more than two).
    pub fn has_area(&self) -> bool {
        self.points.len() > 2
    }

    /// Min/max over all points, `None` for an empty profile.
    pub fn extent(&self) -> Option<ProfileExtent> {
        let first = self.points.first()?;
        let init = ProfileExtent {
            min_y: first.x,
            max_y: first.x,
            min_z: first.y,
            max_z: first.y,
        };
        Some(self.points.iter().fold(init, |e, p| ProfileExtent {
            min_y: e.min_y.min(p.x),
            max_y: e.max_y.max(p.x),
            min_z: e.min_z.min(p.y),
            max_z: e.max_z.max(p.y),
        }))
    }

    /// Leftmost and rightmost offsets where the profile polyline meets `level`,
    /// `None` when it never does.
    pub fn span_at(&self, level: Meters) -> Option<(Meters, Meters)> {
        let mut span: Option<(Meters, Meters)> = None;
        let mut include = |x: Meters| {
            span = Some(match span {
                Some((lo, hi)) => (lo.min(x), hi.max(x)),
                None => (x, x),
            });
        };
        for pair in self.points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if level < a.y.min(b.y) || level > a.y.max(b.y) {
                continue;
            }
            if a.y == b.y {
                include(a.x);
                include(b.x);
            } else {
                let f = (level - a.y).0 / (b.y - a.y).0;
                include(a.x + (b.x - a.x) * f);
            }
        }
        span
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrestShape {
    Sharp,
    Round,
    Triangular,
    Broad,
    Gated,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WeirFormula {
    /// Plain crest, no gate
    Simple,
    /// Gate hanging above the crest
    Gated { gate_lower_edge_level: Meters },
    /// Crest described point by point across the channel
    FreeForm { shape: Vec<PtW> },
}

impl WeirFormula {
    pub fn is_gated(&self) -> bool {
        matches!(self, WeirFormula::Gated { .. })
    }

    pub fn gate_lower_edge_level(&self) -> Option<Meters> {
        match self {
            WeirFormula::Gated {
                gate_lower_edge_level,
            } => Some(*gate_lower_edge_level),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Weir {
    pub name: String,
    /// Position along the conduit
    pub chainage: Meters,
    /// Position across the conduit (structure view)
    pub offset_y: Meters,
    pub crest_level: Meters,
    pub crest_width: Meters,
    pub crest_shape: CrestShape,
    pub formula: WeirFormula,
    /// Point structure drawn as a glyph only
    pub is_pillar: bool,
    pub dirty: bool,
}

impl Weir {
    pub fn new(name: impl Into<String>, chainage: f64, crest_level: f64, crest_width: f64) -> Self {
        Self {
            name: name.into(),
            chainage: Meters(chainage),
            offset_y: Meters::ZERO,
            crest_level: Meters(crest_level),
            crest_width: Meters(crest_width),
            crest_shape: CrestShape::Sharp,
            formula: WeirFormula::Simple,
            is_pillar: false,
            dirty: false,
        }
    }

    pub fn with_crest_shape(mut self, crest_shape: CrestShape) -> Self {
        self.crest_shape = crest_shape;
        self
    }

    /// Switch to a gated formula; the crest shape follows.
    pub fn with_gate(mut self, gate_lower_edge_level: f64) -> Self {
        self.formula = WeirFormula::Gated {
            gate_lower_edge_level: Meters(gate_lower_edge_level),
        };
        self.crest_shape = CrestShape::Gated;
        self
    }

    pub fn with_free_form(mut self, shape: Vec<PtW>) -> Self {
        self.formula = WeirFormula::FreeForm { shape };
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bridge {
    pub name: String,
    pub chainage: Meters,
    pub offset_y: Meters,
    pub length: Meters,
    pub profile: Profile,
    pub is_pillar: bool,
    pub ground_layer_enabled: bool,
    pub ground_layer_thickness: Meters,
    pub dirty: bool,
}

impl Bridge {
    pub fn new(name: impl Into<String>, chainage: f64, length: f64, profile: Profile) -> Self {
        Self {
            name: name.into(),
            chainage: Meters(chainage),
            offset_y: Meters::ZERO,
            length: Meters(length),
            profile,
            is_pillar: false,
            ground_layer_enabled: false,
            ground_layer_thickness: Meters::ZERO,
            dirty: false,
        }
    }

    pub fn with_ground_layer(mut self, thickness: f64) -> Self {
        self.ground_layer_enabled = true;
        self.ground_layer_thickness = Meters(thickness);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Culvert {
    pub name: String,
    pub chainage: Meters,
    pub offset_y: Meters,
    pub length: Meters,
    pub inlet_level: Meters,
    pub outlet_level: Meters,
    /// Profile relative to the culvert bottom
    pub profile: Profile,
    pub is_gated: bool,
    pub gate_lower_edge_level: Meters,
    pub dirty: bool,
}

impl Culvert {
    pub fn new(
        name: impl Into<String>,
        chainage: f64,
        length: f64,
        inlet_level: f64,
        outlet_level: f64,
        profile: Profile,
    ) -> Self {
        Self {
            name: name.into(),
            chainage: Meters(chainage),
            offset_y: Meters::ZERO,
            length: Meters(length),
            inlet_level: Meters(inlet_level),
            outlet_level: Meters(outlet_level),
            profile,
            is_gated: false,
            gate_lower_edge_level: Meters::ZERO,
            dirty: false,
        }
    }

    pub fn with_gate(mut self, gate_lower_edge_level: f64) -> Self {
        self.is_gated = true;
        self.gate_lower_edge_level = Meters(gate_lower_edge_level);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlDirection {
    Suction,
    Delivery,
    Both,
}

impl ControlDirection {
    pub fn controls_suction(self) -> bool {
        matches!(self, ControlDirection::Suction | ControlDirection::Both)
    }

    pub fn controls_delivery(self) -> bool {
        matches!(self, ControlDirection::Delivery | ControlDirection::Both)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pump {
    pub name: String,
    pub chainage: Meters,
    pub offset_y: Meters,
    /// Level the pump glyph is drawn at in the structure view
    pub offset_z: Meters,
    pub control_direction: ControlDirection,
    /// Pumping along the positive branch direction
    pub direction_is_positive: bool,
    pub start_suction: Meters,
    pub stop_suction: Meters,
    pub start_delivery: Meters,
    pub stop_delivery: Meters,
    pub dirty: bool,
}

impl Pump {
    pub fn new(name: impl Into<String>, chainage: f64, control_direction: ControlDirection) -> Self {
        Self {
            name: name.into(),
            chainage: Meters(chainage),
            offset_y: Meters::ZERO,
            offset_z: Meters::ZERO,
            control_direction,
            direction_is_positive: true,
            start_suction: Meters::ZERO,
            stop_suction: Meters::ZERO,
            start_delivery: Meters::ZERO,
            stop_delivery: Meters::ZERO,
            dirty: false,
        }
    }

    pub fn with_suction_levels(mut self, start: f64, stop: f64) -> Self {
        self.start_suction = Meters(start);
        self.stop_suction = Meters(stop);
        self
    }

    pub fn with_delivery_levels(mut self, start: f64, stop: f64) -> Self {
        self.start_delivery = Meters(start);
        self.stop_delivery = Meters(stop);
        self
    }

    /// Every control level, used for axis fitting.
    pub fn levels(&self) -> [Meters; 5] {
        [
            self.offset_z,
            self.start_suction,
            self.stop_suction,
            self.start_delivery,
            self.stop_delivery,
        ]
    }
}

impl_structure!(Weir, Bridge, Culvert, Pump);
