//! Interactive editing of structure parameters by dragging shapes.
//!
//! A primitive carries at most one [`EditorBinding`]; [`editor_for`] maps the
//! binding, the edit mode and the structure kind onto an editor, or `None`
//! when that combination is not editable.

use crate::builders::{StructureKind, StructureShape, StructureShapeBuilder};
use crate::errors::EditError;
use crate::structure::{Structure, WeirFormula};
use crate::transform::ChartTransform;
use crate::types::{Offset, Px};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    Select,
    Move,
    Reshape,
}

/// Which domain parameter a primitive drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorBinding {
    CrestLevel,
    GateLowerEdge,
    /// One vertex of a free-form crest
    CrestVertex(usize),
}

impl EditorBinding {
    pub fn name(self) -> &'static str {
        match self {
            EditorBinding::CrestLevel => "crest level",
            EditorBinding::GateLowerEdge => "gate lower edge",
            EditorBinding::CrestVertex(_) => "crest vertex",
        }
    }
}

/// Strategy table: binding x mode x structure kind.
fn supports(binding: EditorBinding, mode: EditMode, kind: StructureKind) -> bool {
    use EditorBinding::*;
    matches!(
        (binding, mode, kind),
        (CrestLevel, EditMode::Move, StructureKind::Weir)
            | (GateLowerEdge, EditMode::Move, StructureKind::Weir | StructureKind::Culvert)
            | (CrestVertex(_), EditMode::Reshape, StructureKind::Weir)
    )
}

/// Editor for `binding` on `target` in `mode`, `None` when not editable.
pub fn editor_for(binding: EditorBinding, mode: EditMode, target: &StructureShape) -> Option<ShapeEditor> {
    supports(binding, mode, target.kind()).then(|| ShapeEditor {
        binding,
        target: target.clone(),
    })
}

/// Applies pointer drags to the structure behind a shape.
#[derive(Clone)]
pub struct ShapeEditor {
    pub binding: EditorBinding,
    pub target: StructureShape,
}

impl std::fmt::Debug for ShapeEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShapeEditor")
            .field("binding", &self.binding)
            .field("target", &self.target.kind())
            .finish()
    }
}

impl ShapeEditor {
    /// Move the bound parameter by a device-space drag and mark the structure dirty.
    ///
    /// Device y grows downwards, so a drag down lowers a level.
    pub fn drag(&self, delta: Offset<Px>, transform: &ChartTransform) -> Result<(), EditError> {
        let dx = transform.world_width_of_pixels(delta.dx);
        let dz = -transform.world_height_of_pixels(delta.dy);
        for v in [dx.0, dz.0] {
            crate::types::check_finite(v)?;
        }

        match (&self.target, self.binding) {
            (StructureShape::Weir(shape), EditorBinding::CrestLevel) => {
                let mut weir = shape
                    .structure
                    .try_borrow_mut()
                    .map_err(|_| EditError::StructureBorrowed)?;
                weir.crest_level += dz;
                let crest = weir.crest_level;
                // the gate never hangs below the crest
                if let WeirFormula::Gated {
                    gate_lower_edge_level,
                } = &mut weir.formula
                {
                    *gate_lower_edge_level = gate_lower_edge_level.max(crest);
                }
                weir.mark_dirty();
            }
            (StructureShape::Weir(shape), EditorBinding::GateLowerEdge) => {
                let mut weir = shape
                    .structure
                    .try_borrow_mut()
                    .map_err(|_| EditError::StructureBorrowed)?;
                let crest = weir.crest_level;
                let WeirFormula::Gated {
                    gate_lower_edge_level,
                } = &mut weir.formula
                else {
                    return Err(EditError::NotGated {
                        name: weir.name.clone(),
                    });
                };
                *gate_lower_edge_level = (*gate_lower_edge_level + dz).max(crest);
                weir.mark_dirty();
            }
            (StructureShape::Weir(shape), EditorBinding::CrestVertex(index)) => {
                let mut weir = shape
                    .structure
                    .try_borrow_mut()
                    .map_err(|_| EditError::StructureBorrowed)?;
                let WeirFormula::FreeForm { shape: crest } = &mut weir.formula else {
                    return Err(EditError::VertexOutOfRange { index, count: 0 });
                };
                let count = crest.len();
                let vertex = crest
                    .get_mut(index)
                    .ok_or(EditError::VertexOutOfRange { index, count })?;
                vertex.x += dx;
                vertex.y += dz;
                weir.mark_dirty();
            }
            (StructureShape::Culvert(shape), EditorBinding::GateLowerEdge) => {
                let mut culvert = shape
                    .structure
                    .try_borrow_mut()
                    .map_err(|_| EditError::StructureBorrowed)?;
                if !culvert.is_gated {
                    return Err(EditError::NotGated {
                        name: culvert.name.clone(),
                    });
                }
                culvert.gate_lower_edge_level += dz;
                culvert.mark_dirty();
            }
            (other, binding) => {
                crate::log::warn!(
                    binding = binding.name(),
                    structure = other.kind().name(),
                    "editor bound to the wrong structure"
                );
                return Err(EditError::WrongStructure {
                    editor: binding.name(),
                    structure: other.kind().name(),
                });
            }
        }

        crate::log::debug!(binding = self.binding.name(), "drag applied");
        Ok(())
    }
}
