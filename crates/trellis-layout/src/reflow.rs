//! Reflow layout: left-to-right with line wrapping.

use trellis_core::{ContentMargins, LayoutError, Measurable, Orientations, Placeable, Rect, Size};

use crate::traits::Layout;

/// Default gap between items, in pixels.
const DEFAULT_SPACING: i32 = 5;

/// A layout that arranges items based on available horizontal space.
///
/// Items flow left to right in insertion order; when the next item would
/// not fit in the remaining width, the cursor wraps to a new line. An item
/// that starts a line is never wrapped, even when it is wider than the
/// container, so oversized items overflow instead of producing an empty
/// line.
///
/// The layout only ever asks for extra horizontal space; its height is a
/// function of the width it is given, reported through
/// [`height_for_width`](Layout::height_for_width).
pub struct ReflowLayout {
    items: Vec<Box<dyn Placeable>>,
    spacing: i32,
    margins: ContentMargins,
}

impl ReflowLayout {
    /// Create an empty reflow layout with default spacing and no margins.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            spacing: DEFAULT_SPACING,
            margins: ContentMargins::default(),
        }
    }

    /// Set the gap between items.
    #[must_use]
    pub fn with_spacing(mut self, spacing: i32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Set the content margins.
    #[must_use]
    pub fn with_margins(mut self, margins: ContentMargins) -> Self {
        self.margins = margins;
        self
    }

    /// Content margins around the layout.
    pub fn margins(&self) -> ContentMargins {
        self.margins
    }

    /// Replace the content margins.
    pub fn set_margins(&mut self, margins: ContentMargins) {
        self.margins = margins;
    }

    /// Append an item at the end of the flow order.
    pub fn add_item(&mut self, item: Box<dyn Placeable>) {
        self.items.push(item);
    }

    /// Insert an item at `index` in the flow order.
    ///
    /// The index is clamped to the current item count.
    pub fn insert_item(&mut self, index: usize, item: Box<dyn Placeable>) {
        let index = index.min(self.items.len());
        self.items.insert(index, item);
    }

    /// The item at `index`, or `None` if out of range.
    pub fn item_at(&self, index: usize) -> Option<&dyn Placeable> {
        self.items.get(index).map(|item| item.as_ref())
    }

    /// Remove and return the item at `index`, or `None` if out of range.
    pub fn take_at(&mut self, index: usize) -> Option<Box<dyn Placeable>> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// Run the flow cursor over all items, reporting each placement.
    ///
    /// Walks the items in order keeping an `(x, y)` cursor and the height
    /// of the current line. When placing the next item would pass the right
    /// edge and the line already holds something, the cursor wraps.
    ///
    /// Returns the height consumed below `rect.y`.
    fn flow(&self, rect: Rect, mut on_place: impl FnMut(usize, Rect)) -> i32 {
        let mut x = rect.x;
        let mut y = rect.y;
        let mut line_height = 0;
        let spacing = self.spacing;

        for (index, item) in self.items.iter().enumerate() {
            let hint = item.size_hint();
            let mut next_x = x + hint.width + spacing;
            if next_x - spacing > rect.right() && line_height > 0 {
                x = rect.x;
                y += line_height + spacing;
                next_x = x + hint.width + spacing;
                line_height = 0;
            }

            on_place(index, Rect::from_size(x, y, hint));

            x = next_x;
            line_height = line_height.max(hint.height);
        }

        y + line_height - rect.y
    }
}

impl Default for ReflowLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl Layout for ReflowLayout {
    fn count(&self) -> usize {
        self.items.len()
    }

    fn size_hint(&self) -> Size {
        self.minimum_size()
    }

    /// A bounding size that fits the largest single item.
    ///
    /// This is deliberately an approximation: it ignores wrapping, since
    /// the true minimum height depends on a width the layout does not
    /// know yet. The top margin is counted twice, on both axes.
    fn minimum_size(&self) -> Size {
        let size = self
            .items
            .iter()
            .fold(Size::ZERO, |acc, item| acc.expanded_to(item.minimum_size()));
        size.grown_by(self.margins.top * 2, self.margins.top * 2)
    }

    fn set_geometry(&mut self, rect: Rect) -> Result<(), LayoutError> {
        let mut placements = Vec::with_capacity(self.items.len());
        self.flow(rect, |index, geometry| placements.push((index, geometry)));
        for (index, geometry) in placements {
            self.items[index].set_geometry(geometry);
        }
        Ok(())
    }

    fn invalidate(&mut self) {}

    fn spacing(&self) -> i32 {
        self.spacing
    }

    fn set_spacing(&mut self, spacing: i32) -> Result<(), LayoutError> {
        self.spacing = spacing;
        Ok(())
    }

    fn expanding_directions(&self) -> Orientations {
        Orientations::HORIZONTAL
    }

    fn has_height_for_width(&self) -> bool {
        true
    }

    fn height_for_width(&self, width: i32) -> i32 {
        self.flow(Rect::new(0, 0, width, 0), |_, _| {})
    }
}
