use crate::render::surface::{HoverBinding, ShapeId};

/// Position and content of the single floating tooltip.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tooltip {
    visible: bool,
    position: (f64, f64),
    content: String,
    anchor: Option<ShapeId>,
}

impl Tooltip {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn position(&self) -> (f64, f64) {
        self.position
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Shape the tooltip currently describes.
    pub fn anchor(&self) -> Option<ShapeId> {
        self.anchor
    }

    /// Show `hover` for shape `id` with the pointer at `pointer`.
    ///
    /// A tooltip that does not follow the pointer keeps the position it took
    /// when the pointer entered the shape.
    pub fn show(&mut self, id: ShapeId, hover: &HoverBinding, pointer: (f64, f64)) {
        let entering = !self.visible || self.anchor != Some(id);
        if entering || hover.follow_pointer {
            self.position = (pointer.0 + hover.offset.0, pointer.1 + hover.offset.1);
        }
        if entering {
            self.content.clone_from(&hover.content);
        }
        self.anchor = Some(id);
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.anchor = None;
    }
}
