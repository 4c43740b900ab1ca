//! Composite shape feature: the rebuilt-on-use shape tree of one structure.
//!
//! Every entry point ([`paint`](CompositeShapeFeature::paint),
//! [`contains`](CompositeShapeFeature::contains),
//! [`bounds`](CompositeShapeFeature::bounds) and the editor lookups) first
//! rebuilds the children from the structure and the chart's current
//! transform. Selection, active and enabled flags live on the composite and
//! are re-applied to the fresh children after every rebuild.

use crate::builders::{BuildContext, StructureShape, StructureShapeBuilder, ViewContext};
use crate::canvas::Canvas;
use crate::editor::{EditMode, ShapeEditor};
use crate::errors::ShapeError;
use crate::hover::{HoverAnnotation, HoverAnnotationLayer, Placement, UsedSpaceLedger};
use crate::render::FrameContext;
use crate::shapes::{ShapeEnum, ShapeFeature};
use crate::transform::ChartTransform;
use crate::types::{BoxPx, PtPx};

#[derive(Debug, Clone)]
pub struct CompositeShapeFeature {
    structure: StructureShape,
    view: ViewContext,
    selected: bool,
    active: bool,
    enabled: bool,
    children: Vec<ShapeEnum>,
    hovers: Vec<HoverAnnotation>,
}

impl CompositeShapeFeature {
    pub fn new(structure: impl Into<StructureShape>, view: ViewContext) -> Self {
        Self {
            structure: structure.into(),
            view,
            selected: false,
            active: true,
            enabled: true,
            children: Vec::new(),
            hovers: Vec::new(),
        }
    }

    pub fn structure(&self) -> &StructureShape {
        &self.structure
    }

    pub fn view(&self) -> ViewContext {
        self.view
    }

    /// Children of the latest rebuild, back to front.
    pub fn children(&self) -> &[ShapeEnum] {
        &self.children
    }

    pub fn hovers(&self) -> &[HoverAnnotation] {
        &self.hovers
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
        for child in &mut self.children {
            child.set_selected(selected);
        }
    }

    /// Inactive composites still paint but never hit-test.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        for child in &mut self.children {
            child.set_active(active);
        }
    }

    /// Disabled composites paint with the disabled style slot.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        for child in &mut self.children {
            child.set_enabled(enabled);
        }
    }

    /// Regenerate children and hovers, keeping selection, active and enabled state.
    ///
    /// Returns the transform the children were built against.
    pub fn rebuild(&mut self, frame: &FrameContext<'_>) -> Result<ChartTransform, ShapeError> {
        let transform = frame.transform()?;
        let (selected, active, enabled) = (self.selected, self.active, self.enabled);

        self.children.clear();
        self.hovers.clear();

        let ctx = BuildContext {
            transform,
            styles: frame.styles,
            options: frame.options,
            view: self.view,
        };
        let built = self.structure.build(&ctx)?;
        self.children = built.features;
        self.hovers = built.hovers;

        self.set_selected(selected);
        self.set_active(active);
        self.set_enabled(enabled);

        crate::log::debug!(
            kind = self.structure.kind().name(),
            children = self.children.len(),
            hovers = self.hovers.len(),
            "rebuilt composite"
        );
        Ok(transform)
    }

    /// Rebuild, then paint children in order.
    pub fn paint(&mut self, frame: &FrameContext<'_>, canvas: &mut dyn Canvas) -> Result<(), ShapeError> {
        let transform = self.rebuild(frame)?;
        for child in &self.children {
            child.paint(&transform, canvas);
        }
        Ok(())
    }

    /// Rebuild, then report whether any child contains `point`.
    pub fn contains(&mut self, frame: &FrameContext<'_>, point: PtPx) -> Result<bool, ShapeError> {
        let transform = self.rebuild(frame)?;
        Ok(self.active && self.children.iter().any(|c| c.contains(&transform, point)))
    }

    /// Rebuild, then union the children's device bounds.
    pub fn bounds(&mut self, frame: &FrameContext<'_>) -> Result<Option<BoxPx>, ShapeError> {
        let transform = self.rebuild(frame)?;
        let mut union = BoxPx::new();
        for bounds in self.children.iter().filter_map(|c| c.bounds(&transform)) {
            union.expand_box(&bounds);
        }
        Ok((!union.is_empty()).then_some(union))
    }

    /// Editor of the first child editable in `mode`.
    pub fn create_editor(&mut self, frame: &FrameContext<'_>, mode: EditMode) -> Result<Option<ShapeEditor>, ShapeError> {
        self.rebuild(frame)?;
        Ok(self
            .children
            .iter()
            .find_map(|c| c.create_editor(mode, &self.structure)))
    }

    /// Editor of the topmost child under `point` that is editable in `mode`.
    pub fn editor_at(
        &mut self,
        frame: &FrameContext<'_>,
        point: PtPx,
        mode: EditMode,
    ) -> Result<Option<ShapeEditor>, ShapeError> {
        let transform = self.rebuild(frame)?;
        if !self.active {
            return Ok(None);
        }
        Ok(self
            .children
            .iter()
            .rev()
            .filter(|c| c.contains(&transform, point))
            .find_map(|c| c.create_editor(mode, &self.structure)))
    }

    /// Reserve the device bounds of every glyph so hover text never covers one.
    pub fn reserve_glyphs(&self, transform: &ChartTransform, ledger: &mut UsedSpaceLedger) {
        for child in &self.children {
            if let ShapeEnum::Icon(icon) = child {
                if let Some(bounds) = icon.bounds(transform) {
                    ledger.push(bounds);
                }
            }
        }
    }

    /// Place this composite's hovers against the children of the latest rebuild.
    ///
    /// Hovers whose target has no bounds count as skipped.
    pub fn paint_hovers(
        &self,
        transform: &ChartTransform,
        layer: &HoverAnnotationLayer,
        ledger: &mut UsedSpaceLedger,
        canvas: &mut dyn Canvas,
    ) -> Placement {
        let mut total = Placement::default();
        for hover in &self.hovers {
            match self.children.get(hover.target).and_then(|c| c.bounds(transform)) {
                Some(bounds) => total += layer.place(hover, bounds, ledger, canvas),
                None => total.skipped += hover.lines.len(),
            }
        }
        total
    }
}
