//! Schematic shapes for hydraulic structures in chart views.
//!
//! Weirs, bridges, culverts and pumps are turned into paintable, hit-testable
//! primitives for a side view (along the conduit) and a structure view
//! (across it). Geometry is re-derived from the live structures and the
//! chart's current transform before every paint and hit-test; hover
//! annotations are laid out afterwards without overlapping each other.

pub mod builders;
pub mod canvas;
pub mod composite;
pub mod defaults;
pub mod editor;
pub mod errors;
pub mod hover;
pub mod layout;
pub mod log;
pub mod render;
pub mod shapes;
pub mod structure;
pub mod style;
pub mod text;
pub mod transform;
pub mod types;

pub use builders::{StructureShape, StructureShapeBuilder, ViewContext, ViewKind};
pub use canvas::{Canvas, DrawOp, Icon, RecordingCanvas};
pub use composite::CompositeShapeFeature;
pub use defaults::ShapeOptions;
pub use errors::{EditError, ShapeError};
pub use render::{FrameContext, FrameReport, render_frame};
pub use shapes::{ShapeEnum, ShapeFeature};
pub use style::StyleRegistry;
pub use transform::{AxisRange, ChartTransform, ChartView, StaticChart, Viewport};
