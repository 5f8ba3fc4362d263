//! The host-facing layout contract.

use trellis_core::{LayoutError, Orientations, Rect, Size};

/// The contract a layout satisfies for its host's geometry passes.
///
/// The host calls [`set_geometry`](Layout::set_geometry) whenever the
/// container is resized; everything else is measurement the host uses to
/// decide how much space to offer. Item access (`add_item`, `item_at`,
/// `take_at`) is inherent on each engine because ownership signatures
/// differ between them.
pub trait Layout {
    /// Number of items in the layout.
    fn count(&self) -> usize;

    /// True if the layout holds no items.
    fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Preferred size of the layout as a whole.
    fn size_hint(&self) -> Size;

    /// Smallest size the layout can be given.
    fn minimum_size(&self) -> Size;

    /// Recompute item positions for a new container rectangle.
    fn set_geometry(&mut self, rect: Rect) -> Result<(), LayoutError>;

    /// Drop any cached geometry so the next pass recomputes from scratch.
    fn invalidate(&mut self);

    /// Gap between adjacent items, in pixels.
    fn spacing(&self) -> i32;

    /// Change the gap between adjacent items.
    ///
    /// Fails with [`LayoutError::SpacingManaged`] on layouts whose spacing
    /// is owned elsewhere.
    fn set_spacing(&mut self, spacing: i32) -> Result<(), LayoutError>;

    /// Directions in which the layout wants extra space.
    fn expanding_directions(&self) -> Orientations {
        Orientations::empty()
    }

    /// Whether [`height_for_width`](Layout::height_for_width) is meaningful.
    fn has_height_for_width(&self) -> bool {
        false
    }

    /// Height the layout needs when constrained to `width`.
    fn height_for_width(&self, _width: i32) -> i32 {
        0
    }
}
