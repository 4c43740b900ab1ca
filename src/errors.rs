//! Error types with diagnostic codes using miette
//!
//! Only precondition violations surface as errors. Degenerate geometry is
//! dropped silently and missing optional data yields `None`.

use miette::Diagnostic;
use thiserror::Error;

use crate::types::NumericError;

// ============================================================================
// Shape Errors
// ============================================================================

/// Errors raised while constructing or rebuilding shapes
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ShapeError {
    #[error("fixed-pixel shapes cannot carry an editor")]
    #[diagnostic(
        code(hydroshape::shape::editor_on_fixed_size),
        help("give the shape world-unit extents or drop the editor binding")
    )]
    EditorOnFixedSize,

    #[error("structure `{name}` has no gate")]
    #[diagnostic(code(hydroshape::shape::not_gated))]
    NotGated { name: String },

    #[error("{kind} is borrowed mutably elsewhere")]
    #[diagnostic(
        code(hydroshape::shape::structure_borrowed),
        help("finish the running edit before repainting")
    )]
    StructureBorrowed { kind: &'static str },

    #[error("invalid chart transform: {0}")]
    #[diagnostic(code(hydroshape::shape::invalid_transform))]
    InvalidTransform(#[from] NumericError),
}

// ============================================================================
// Edit Errors
// ============================================================================

/// Errors raised while applying an editor drag to the domain
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum EditError {
    #[error("{editor} editor cannot edit a {structure}")]
    #[diagnostic(code(hydroshape::edit::wrong_structure))]
    WrongStructure {
        editor: &'static str,
        structure: &'static str,
    },

    #[error("structure `{name}` has no gate")]
    #[diagnostic(code(hydroshape::edit::not_gated))]
    NotGated { name: String },

    #[error("crest vertex {index} out of range ({count} vertices)")]
    #[diagnostic(code(hydroshape::edit::vertex_out_of_range))]
    VertexOutOfRange { index: usize, count: usize },

    #[error("structure is borrowed elsewhere")]
    #[diagnostic(code(hydroshape::edit::structure_borrowed))]
    StructureBorrowed,

    #[error("invalid chart transform: {0}")]
    #[diagnostic(code(hydroshape::edit::invalid_transform))]
    InvalidTransform(#[from] NumericError),
}
