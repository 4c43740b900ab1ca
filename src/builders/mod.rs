//! Per-structure shape builders.
//!
//! A builder maps the current state of one domain structure and the current
//! chart transform onto an ordered list of primitives (back to front) plus the
//! hover annotations that describe them. Builders hold no geometry of their
//! own and are re-run before every paint and hit-test.

mod bridge;
mod culvert;
mod pump;
mod weir;

pub use bridge::BridgeShape;
pub use culvert::{CulvertShape, culvert_gate_band};
pub use pump::{ControlSides, PumpShape, Side, control_sides, delivery_is_left};
pub use weir::{GatedWeirBands, WeirShape, gated_weir_bands};

use std::cell::Ref;

use enum_dispatch::enum_dispatch;

use crate::defaults::ShapeOptions;
use crate::errors::ShapeError;
use crate::hover::HoverAnnotation;
use crate::shapes::ShapeEnum;
use crate::structure::StructureHandle;
use crate::style::{StyleRegistry, StyleSet};
use crate::transform::ChartTransform;
use crate::types::Meters;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureKind {
    Weir,
    Bridge,
    Culvert,
    Pump,
}

impl StructureKind {
    pub fn name(self) -> &'static str {
        match self {
            StructureKind::Weir => "weir",
            StructureKind::Bridge => "bridge",
            StructureKind::Culvert => "culvert",
            StructureKind::Pump => "pump",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewKind {
    /// Along the conduit, horizontal axis is chainage
    #[default]
    SideView,
    /// Across the conduit, horizontal axis is the cross-channel offset
    StructureView,
}

/// Which chart a composite is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewContext {
    pub kind: ViewKind,
    /// Horizontal axis runs against the flow direction
    pub axis_reversed: bool,
}

impl ViewContext {
    pub fn side(axis_reversed: bool) -> Self {
        Self {
            kind: ViewKind::SideView,
            axis_reversed,
        }
    }

    pub fn structure() -> Self {
        Self {
            kind: ViewKind::StructureView,
            axis_reversed: false,
        }
    }
}

/// Everything a builder reads besides the structure itself.
#[derive(Debug, Clone, Copy)]
pub struct BuildContext<'a> {
    pub transform: ChartTransform,
    pub styles: &'a StyleRegistry,
    pub options: &'a ShapeOptions,
    pub view: ViewContext,
}

/// Primitives and annotations produced by one build.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuiltShapes {
    pub features: Vec<ShapeEnum>,
    pub hovers: Vec<HoverAnnotation>,
}

impl BuiltShapes {
    /// Append a primitive and return its index for hover targeting.
    pub fn push(&mut self, feature: impl Into<ShapeEnum>) -> usize {
        self.features.push(feature.into());
        self.features.len() - 1
    }

    pub fn hover(&mut self, hover: HoverAnnotation) {
        self.hovers.push(hover);
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Capability set every structure kind provides to the composite.
#[enum_dispatch]
pub trait StructureShapeBuilder {
    fn kind(&self) -> StructureKind;

    /// Extent along the horizontal axis of `view`
    fn length(&self, view: ViewKind, transform: &ChartTransform, options: &ShapeOptions) -> Result<Meters, ShapeError>;

    /// Position on the horizontal axis of `view`
    fn offset(&self, view: ViewKind) -> Result<Meters, ShapeError>;

    /// Place the structure across the conduit (structure view)
    fn set_offset_y(&self, offset: Meters) -> Result<(), ShapeError>;

    /// Main palette of the structure kind
    fn style<'a>(&self, styles: &'a StyleRegistry) -> &'a StyleSet;

    fn build(&self, ctx: &BuildContext<'_>) -> Result<BuiltShapes, ShapeError>;
}

/// A structure of any kind, ready to be turned into shapes.
#[enum_dispatch(StructureShapeBuilder)]
#[derive(Debug, Clone)]
pub enum StructureShape {
    Weir(WeirShape),
    Bridge(BridgeShape),
    Culvert(CulvertShape),
    Pump(PumpShape),
}

/// Shared borrow of a structure for the duration of one build.
pub(crate) fn snapshot<T>(handle: &StructureHandle<T>, kind: StructureKind) -> Result<Ref<'_, T>, ShapeError> {
    handle.try_borrow().map_err(|_| ShapeError::StructureBorrowed { kind: kind.name() })
}

/// Exclusive borrow for layout updates.
pub(crate) fn modify<T>(
    handle: &StructureHandle<T>,
    kind: StructureKind,
    apply: impl FnOnce(&mut T),
) -> Result<(), ShapeError> {
    let mut structure = handle
        .try_borrow_mut()
        .map_err(|_| ShapeError::StructureBorrowed { kind: kind.name() })?;
    apply(&mut structure);
    Ok(())
}

/// Hover text for a level, e.g. `Crest 1.50 m`.
pub(crate) fn level_text(label: &str, level: Meters) -> String {
    format!("{label} {:.2} m", level.0)
}
