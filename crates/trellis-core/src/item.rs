//! Item capability traits.
//!
//! Anything placed in a layout implements [`Measurable`] (report a preferred
//! and a minimum size) and [`Placeable`] (accept the geometry the layout
//! decided on). Layouts own their items as `Box<dyn Placeable>` and never
//! look past these two traits.

use crate::geometry::{Rect, Size};

/// Something with an intrinsic preferred and minimum size.
pub trait Measurable {
    /// Preferred size of the item.
    fn size_hint(&self) -> Size;

    /// Smallest acceptable size. Defaults to the size hint.
    fn minimum_size(&self) -> Size {
        self.size_hint()
    }
}

/// A measurable item that can be positioned by a layout.
pub trait Placeable: Measurable {
    /// Apply the geometry computed by the layout.
    fn set_geometry(&mut self, rect: Rect);

    /// The geometry last applied, or [`Rect::ZERO`] before any layout pass.
    fn geometry(&self) -> Rect;
}

/// A blank item with fixed measurements.
///
/// Fills a slot in a layout without any content of its own, and remembers
/// the geometry it was last given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpacerItem {
    hint: Size,
    minimum: Size,
    rect: Rect,
}

impl SpacerItem {
    /// Create a spacer whose hint and minimum are both `size`.
    pub fn new(size: Size) -> Self {
        Self { hint: size, minimum: size, rect: Rect::ZERO }
    }

    /// Create a spacer with distinct hint and minimum sizes.
    pub fn with_minimum(hint: Size, minimum: Size) -> Self {
        Self { hint, minimum, rect: Rect::ZERO }
    }
}

impl Measurable for SpacerItem {
    fn size_hint(&self) -> Size {
        self.hint
    }

    fn minimum_size(&self) -> Size {
        self.minimum
    }
}

impl Placeable for SpacerItem {
    fn set_geometry(&mut self, rect: Rect) {
        self.rect = rect;
    }

    fn geometry(&self) -> Rect {
        self.rect
    }
}
