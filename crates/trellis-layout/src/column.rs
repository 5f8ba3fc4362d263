//! Column-aligned row layouts and their shared width manager.
//!
//! A [`ColumnManager`] owns column-width policy (fixed, stretch, nominal)
//! for any number of [`ColumnLayout`] rows. Rows register at construction
//! and publish their items' size hints into the manager's registry; the
//! manager computes one width per column over the published measurements,
//! so items in separate rows line up even though each row is an
//! independent layout driven separately by the host.
//!
//! The same effect is possible with a grid, but a grid forces every cell
//! into one contiguous parent. Independent rows sharing a manager keep
//! hierarchical composition and allow discontinuous rows to stay aligned.

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::{IndexMap, IndexSet};
use smallvec::SmallVec;
use trellis_core::{LayoutError, Measurable, Orientations, Placeable, Rect, Size};

use crate::traits::Layout;

/// Identifier of a row inside its manager's registry.
///
/// Handed out by the manager at registration; rows are never deregistered,
/// so the id stays valid for the manager's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowId(usize);

type RowHints = SmallVec<[Size; 8]>;

/// The state behind a [`ColumnManager`] handle.
#[derive(Debug, Default)]
struct ManagerState {
    spacing: i32,
    /// Fixed per-column overrides.
    column_widths: IndexMap<usize, i32>,
    /// Columns that absorb leftover horizontal space.
    stretch_columns: IndexSet<usize>,
    /// Size hints published by each registered row, in registration order.
    rows: Vec<RowHints>,
    /// Per-pass memo of computed widths. Stretch widths never land here.
    cached_widths: IndexMap<usize, i32>,
    invalidations: u64,
}

impl ManagerState {
    fn invalidate(&mut self) {
        self.cached_widths.clear();
        self.invalidations += 1;
    }

    /// The common column count across registered rows.
    fn column_count(&self) -> Result<usize, LayoutError> {
        let mut counts: Vec<usize> = Vec::new();
        for row in &self.rows {
            if !counts.contains(&row.len()) {
                counts.push(row.len());
            }
        }
        match counts.as_slice() {
            [] => Ok(0),
            [count] => Ok(*count),
            _ => Err(LayoutError::InconsistentColumnCount { counts }),
        }
    }

    /// Widest published hint at `column`, skipping rows without that
    /// column. Zero when no row has it.
    fn nominal_column_width(&self, column: usize) -> i32 {
        self.rows
            .iter()
            .filter_map(|row| row.get(column))
            .map(|hint| hint.width)
            .max()
            .unwrap_or(0)
    }

    /// Total width of all columns at nominal size, including spacing.
    fn summed_nominal_width(&self) -> Result<i32, LayoutError> {
        let count = self.column_count()?;
        let width: i32 = (0..count).map(|col| self.nominal_column_width(col)).sum();
        Ok(width + self.spacing * count as i32)
    }

    /// Leftover horizontal space shared by all stretch columns together.
    fn stretchable_width(&self, rect: Rect) -> Result<i32, LayoutError> {
        Ok((rect.width - self.summed_nominal_width()?).max(0))
    }
}

/// Computes, caches, and shares per-column widths across row layouts.
///
/// Cheap to clone: clones are handles onto the same shared state, which is
/// how rows keep a reference back to their manager. The manager must
/// outlive the rows it coordinates. All computation is synchronous and
/// single-threaded; the handle is deliberately not `Send`.
///
/// Column widths resolve in priority order: a fixed override set through
/// [`set_column_width`](Self::set_column_width) wins, then stretch columns
/// get their nominal width plus an even share of the leftover space, and
/// every other column gets its nominal width (the widest size hint any row
/// published for it). Non-stretch results are cached until the next
/// invalidation; stretch widths depend on the pass rectangle and are
/// recomputed every time.
#[derive(Debug, Clone)]
pub struct ColumnManager {
    state: Rc<RefCell<ManagerState>>,
}

impl Default for ColumnManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ColumnManager {
    /// Default gap between columns, in pixels.
    pub const DEFAULT_SPACING: i32 = 5;

    /// Create a manager with the default spacing.
    pub fn new() -> Self {
        Self::with_spacing(Self::DEFAULT_SPACING)
    }

    /// Create a manager with an explicit column spacing.
    pub fn with_spacing(spacing: i32) -> Self {
        Self {
            state: Rc::new(RefCell::new(ManagerState {
                spacing,
                ..ManagerState::default()
            })),
        }
    }

    /// Gap between columns.
    pub fn spacing(&self) -> i32 {
        self.state.borrow().spacing
    }

    /// Change the gap between columns. Invalidates the width cache.
    pub fn set_spacing(&self, spacing: i32) {
        let mut state = self.state.borrow_mut();
        state.spacing = spacing;
        state.invalidate();
    }

    /// Fix a column at an explicit width. Invalidates the width cache.
    pub fn set_column_width(&self, column: usize, width: i32) {
        let mut state = self.state.borrow_mut();
        state.column_widths.insert(column, width);
        state.invalidate();
    }

    /// Mark a column as absorbing leftover horizontal space.
    ///
    /// Leftover space is split evenly among all stretch columns.
    /// Invalidates the width cache.
    pub fn set_stretch_column(&self, column: usize) {
        let mut state = self.state.borrow_mut();
        state.stretch_columns.insert(column);
        state.invalidate();
    }

    /// Stop a column from stretching. Invalidates the width cache.
    pub fn clear_stretch_column(&self, column: usize) {
        let mut state = self.state.borrow_mut();
        state.stretch_columns.shift_remove(&column);
        state.invalidate();
    }

    /// The common column count across all registered rows.
    ///
    /// Fails with [`LayoutError::InconsistentColumnCount`] when rows
    /// disagree, which signals misaligned rows on the caller's side.
    /// A manager with no rows reports zero columns.
    pub fn column_count(&self) -> Result<usize, LayoutError> {
        self.state.borrow().column_count()
    }

    /// A column's width ignoring stretch and fixed overrides: the widest
    /// size hint any row published for it.
    pub fn nominal_column_width(&self, column: usize) -> i32 {
        self.state.borrow().nominal_column_width(column)
    }

    /// Total width of all columns at nominal size, plus spacing.
    pub fn summed_nominal_width(&self) -> Result<i32, LayoutError> {
        self.state.borrow().summed_nominal_width()
    }

    /// Leftover horizontal space available to stretch columns, as one
    /// shared pool; each stretch column takes an even share of it.
    pub fn stretchable_width(&self, rect: Rect) -> Result<i32, LayoutError> {
        self.state.borrow().stretchable_width(rect)
    }

    /// Resolve the actual width of a column for the given pass rectangle.
    pub fn column_width(&self, column: usize, rect: Rect) -> Result<i32, LayoutError> {
        let mut state = self.state.borrow_mut();

        if let Some(&width) = state.cached_widths.get(&column) {
            return Ok(width);
        }

        if let Some(&width) = state.column_widths.get(&column) {
            state.cached_widths.insert(column, width);
            return Ok(width);
        }

        if state.stretch_columns.contains(&column) {
            let share = state.stretchable_width(rect)? / state.stretch_columns.len() as i32;
            return Ok(state.nominal_column_width(column) + share);
        }

        let width = state.nominal_column_width(column);
        state.cached_widths.insert(column, width);
        Ok(width)
    }

    /// The x coordinate of a column's right edge:
    /// `rect.x + Σ_{i=0..=column} (width(i) + spacing) - spacing`.
    pub fn column_position(&self, column: usize, rect: Rect) -> Result<i32, LayoutError> {
        let spacing = self.spacing();
        let mut x = rect.x;
        for col in 0..=column {
            x += self.column_width(col, rect)? + spacing;
        }
        Ok(x - spacing)
    }

    /// Clear the per-pass width cache.
    pub fn invalidate(&self) {
        self.state.borrow_mut().invalidate();
    }

    /// Open a fresh geometry pass.
    ///
    /// Invalidates once; the first row whose rectangle actually changed
    /// calls this, and every row laid out afterwards in the same pass
    /// reuses the now-fresh cache so all rows observe identical widths.
    pub fn begin_pass(&self) {
        self.invalidate();
    }

    /// How many times the width cache has been invalidated.
    ///
    /// Lets hosts and tests observe that a repeated identical geometry
    /// pass did not trigger a redundant recompute.
    pub fn invalidation_count(&self) -> u64 {
        self.state.borrow().invalidations
    }

    /// Add a row to the registry and hand back its id.
    pub(crate) fn register(&self) -> RowId {
        let mut state = self.state.borrow_mut();
        state.rows.push(RowHints::new());
        RowId(state.rows.len() - 1)
    }

    /// Replace a row's published size hints.
    pub(crate) fn set_row_hints(&self, row: RowId, hints: RowHints) {
        let mut state = self.state.borrow_mut();
        state.rows[row.0] = hints;
        state.invalidate();
    }
}

/// A single row whose items align into columns shared with sibling rows.
///
/// Each row registers with its manager at construction. The host drives
/// each row independently through [`Layout::set_geometry`]; widths and
/// spacing always come from the manager, which is why
/// [`set_spacing`](Layout::set_spacing) on a row fails. It is up to the
/// caller to stack the rows vertically so the alignment is visible.
///
/// ```
/// use trellis_core::{Placeable, Rect, Size, SpacerItem};
/// use trellis_layout::{ColumnLayout, ColumnManager, Layout};
///
/// let manager = ColumnManager::new();
/// let mut labels = ColumnLayout::new(&manager);
/// labels.add_item(Box::new(SpacerItem::new(Size::new(40, 20))));
/// labels.add_item(Box::new(SpacerItem::new(Size::new(90, 20))));
///
/// labels.set_geometry(Rect::new(0, 0, 200, 20)).unwrap();
/// assert_eq!(labels.item_at(1).unwrap().geometry().x, 45);
/// ```
pub struct ColumnLayout {
    manager: ColumnManager,
    row: RowId,
    items: Vec<Box<dyn Placeable>>,
    /// Memo of the last applied rectangle; an identical re-issue of the
    /// same geometry is a no-op.
    last_rect: Option<Rect>,
}

impl ColumnLayout {
    /// Create an empty row registered with `manager`.
    pub fn new(manager: &ColumnManager) -> Self {
        Self {
            manager: manager.clone(),
            row: manager.register(),
            items: Vec::new(),
            last_rect: None,
        }
    }

    /// The manager coordinating this row.
    pub fn manager(&self) -> &ColumnManager {
        &self.manager
    }

    /// This row's id in the manager's registry.
    pub fn row_id(&self) -> RowId {
        self.row
    }

    /// Append an item as the next column.
    pub fn add_item(&mut self, item: Box<dyn Placeable>) {
        self.items.push(item);
        self.publish_hints();
    }

    /// Insert an item at a column index, clamped to the current count.
    pub fn insert_item(&mut self, index: usize, item: Box<dyn Placeable>) {
        let index = index.min(self.items.len());
        self.items.insert(index, item);
        self.publish_hints();
    }

    /// The item at `index`, or `None` if out of range.
    pub fn item_at(&self, index: usize) -> Option<&dyn Placeable> {
        self.items.get(index).map(|item| item.as_ref())
    }

    /// Remove and return the item at `index`, or `None` if out of range.
    pub fn take_at(&mut self, index: usize) -> Option<Box<dyn Placeable>> {
        if index < self.items.len() {
            let item = self.items.remove(index);
            self.publish_hints();
            Some(item)
        } else {
            None
        }
    }

    /// Push this row's current size hints into the manager's registry.
    fn publish_hints(&self) {
        let hints: RowHints = self.items.iter().map(|item| item.size_hint()).collect();
        self.manager.set_row_hints(self.row, hints);
    }
}

impl Layout for ColumnLayout {
    fn count(&self) -> usize {
        self.items.len()
    }

    fn size_hint(&self) -> Size {
        self.minimum_size()
    }

    /// Height of the tallest item; width of all columns at nominal size.
    ///
    /// When sibling rows disagree on column count the shared width is
    /// undefined, so this degrades to the row's own nominal sum.
    fn minimum_size(&self) -> Size {
        let height = self
            .items
            .iter()
            .map(|item| item.minimum_size().height)
            .max()
            .unwrap_or(0);
        let width = self.manager.summed_nominal_width().unwrap_or_else(|_| {
            let own: i32 = self.items.iter().map(|item| item.size_hint().width).sum();
            own + self.manager.spacing() * self.items.len() as i32
        });
        Size::new(width, height)
    }

    fn set_geometry(&mut self, rect: Rect) -> Result<(), LayoutError> {
        if self.last_rect == Some(rect) {
            return Ok(());
        }

        self.manager.begin_pass();

        let mut widths = Vec::with_capacity(self.items.len());
        for column in 0..self.items.len() {
            widths.push(self.manager.column_width(column, rect)?);
        }
        self.last_rect = Some(rect);

        let spacing = self.manager.spacing();
        let mut x = rect.x;
        for (item, &width) in self.items.iter_mut().zip(&widths) {
            // Items span the full row height; vertical stretch is implicit.
            item.set_geometry(Rect::new(x, rect.y, width, rect.height));
            x += width + spacing;
        }
        Ok(())
    }

    /// Forget the applied rectangle and republish this row's hints, so the
    /// next pass remeasures even if items changed size in place.
    fn invalidate(&mut self) {
        self.last_rect = None;
        self.publish_hints();
    }

    fn spacing(&self) -> i32 {
        self.manager.spacing()
    }

    fn set_spacing(&mut self, _spacing: i32) -> Result<(), LayoutError> {
        Err(LayoutError::SpacingManaged)
    }

    fn expanding_directions(&self) -> Orientations {
        Orientations::HORIZONTAL
    }
}

#[cfg(test)]
mod tests {
    use trellis_core::SpacerItem;

    use super::*;

    /// Two rows with item widths `[[30, 80], [50, 40]]`, all 20 tall.
    fn two_rows(manager: &ColumnManager) -> (ColumnLayout, ColumnLayout) {
        let mut row_one = ColumnLayout::new(manager);
        row_one.add_item(Box::new(SpacerItem::new(Size::new(30, 20))));
        row_one.add_item(Box::new(SpacerItem::new(Size::new(80, 20))));

        let mut row_two = ColumnLayout::new(manager);
        row_two.add_item(Box::new(SpacerItem::new(Size::new(50, 20))));
        row_two.add_item(Box::new(SpacerItem::new(Size::new(40, 20))));

        (row_one, row_two)
    }

    #[test]
    fn nominal_widths_take_widest_hint_per_column() {
        let manager = ColumnManager::new();
        let (_row_one, _row_two) = two_rows(&manager);

        assert_eq!(manager.column_count().unwrap(), 2);
        assert_eq!(manager.nominal_column_width(0), 50);
        assert_eq!(manager.nominal_column_width(1), 80);
        // 50 + 80 + 5 * 2 columns.
        assert_eq!(manager.summed_nominal_width().unwrap(), 140);
    }

    #[test]
    fn mismatched_rows_fail_column_count() {
        let manager = ColumnManager::new();
        let (_row_one, _row_two) = two_rows(&manager);

        let mut row_three = ColumnLayout::new(&manager);
        for _ in 0..3 {
            row_three.add_item(Box::new(SpacerItem::new(Size::new(10, 10))));
        }

        let err = manager.column_count().unwrap_err();
        assert_eq!(err, LayoutError::InconsistentColumnCount { counts: vec![2, 3] });
    }

    #[test]
    fn empty_manager_has_zero_columns() {
        let manager = ColumnManager::new();
        assert_eq!(manager.column_count().unwrap(), 0);
        assert_eq!(manager.summed_nominal_width().unwrap(), 0);
    }

    #[test]
    fn stretch_column_absorbs_leftover_space() {
        let manager = ColumnManager::new();
        let (_row_one, _row_two) = two_rows(&manager);
        manager.set_stretch_column(1);

        let rect = Rect::new(0, 0, 200, 20);
        assert_eq!(manager.stretchable_width(rect).unwrap(), 60);
        assert_eq!(manager.column_width(0, rect).unwrap(), 50);
        assert_eq!(manager.column_width(1, rect).unwrap(), 140);
    }

    #[test]
    fn stretch_splits_evenly_between_stretch_columns() {
        let manager = ColumnManager::new();
        let (_row_one, _row_two) = two_rows(&manager);
        manager.set_stretch_column(0);
        manager.set_stretch_column(1);

        let rect = Rect::new(0, 0, 200, 20);
        // Pool of 60 split two ways, integer division.
        assert_eq!(manager.column_width(0, rect).unwrap(), 80);
        assert_eq!(manager.column_width(1, rect).unwrap(), 110);
    }

    #[test]
    fn stretch_widths_are_never_cached() {
        let manager = ColumnManager::new();
        let (_row_one, _row_two) = two_rows(&manager);
        manager.set_stretch_column(1);

        let narrow = Rect::new(0, 0, 200, 20);
        assert_eq!(manager.column_width(0, narrow).unwrap(), 50);
        assert_eq!(manager.column_width(1, narrow).unwrap(), 140);

        // A wider rect changes the stretch width immediately, while the
        // cached nominal column is untouched.
        let wide = Rect::new(0, 0, 300, 20);
        assert_eq!(manager.column_width(0, wide).unwrap(), 50);
        assert_eq!(manager.column_width(1, wide).unwrap(), 240);
    }

    #[test]
    fn fixed_width_overrides_nominal() {
        let manager = ColumnManager::new();
        let (_row_one, _row_two) = two_rows(&manager);
        manager.set_column_width(0, 70);

        let rect = Rect::new(0, 0, 200, 20);
        assert_eq!(manager.column_width(0, rect).unwrap(), 70);
        // The summed nominal width ignores fixed overrides.
        assert_eq!(manager.summed_nominal_width().unwrap(), 140);
    }

    #[test]
    fn column_position_formula() {
        let manager = ColumnManager::new();
        let (_row_one, _row_two) = two_rows(&manager);

        let rect = Rect::new(10, 0, 200, 20);
        // rect.x + width(0) = 10 + 50.
        assert_eq!(manager.column_position(0, rect).unwrap(), 60);
        // rect.x + (50 + 5) + 80 = 145.
        assert_eq!(manager.column_position(1, rect).unwrap(), 145);
    }

    #[test]
    fn rows_place_items_into_aligned_columns() {
        let manager = ColumnManager::new();
        let (mut row_one, mut row_two) = two_rows(&manager);

        row_one.set_geometry(Rect::new(0, 0, 200, 20)).unwrap();
        row_two.set_geometry(Rect::new(0, 25, 200, 20)).unwrap();

        // Both rows use column widths [50, 80].
        assert_eq!(row_one.item_at(0).unwrap().geometry(), Rect::new(0, 0, 50, 20));
        assert_eq!(row_one.item_at(1).unwrap().geometry(), Rect::new(55, 0, 80, 20));
        assert_eq!(row_two.item_at(0).unwrap().geometry(), Rect::new(0, 25, 50, 20));
        assert_eq!(row_two.item_at(1).unwrap().geometry(), Rect::new(55, 25, 80, 20));
    }

    #[test]
    fn items_span_full_row_height() {
        let manager = ColumnManager::new();
        let (mut row_one, _row_two) = two_rows(&manager);

        row_one.set_geometry(Rect::new(0, 0, 200, 48)).unwrap();
        assert_eq!(row_one.item_at(0).unwrap().geometry().height, 48);
        assert_eq!(row_one.item_at(1).unwrap().geometry().height, 48);
    }

    #[test]
    fn identical_geometry_is_idempotent() {
        let manager = ColumnManager::new();
        let (mut row_one, _row_two) = two_rows(&manager);

        let rect = Rect::new(0, 0, 200, 20);
        row_one.set_geometry(rect).unwrap();
        let after_first = manager.invalidation_count();

        row_one.set_geometry(rect).unwrap();
        assert_eq!(manager.invalidation_count(), after_first);

        // A genuinely new rect opens a new pass.
        row_one.set_geometry(Rect::new(0, 0, 250, 20)).unwrap();
        assert_eq!(manager.invalidation_count(), after_first + 1);
    }

    #[test]
    fn invalidate_forces_recompute_on_same_rect() {
        let manager = ColumnManager::new();
        let (mut row_one, _row_two) = two_rows(&manager);

        let rect = Rect::new(0, 0, 200, 20);
        row_one.set_geometry(rect).unwrap();
        let after_first = manager.invalidation_count();

        row_one.invalidate();
        row_one.set_geometry(rect).unwrap();
        assert!(manager.invalidation_count() > after_first);
    }

    #[test]
    fn row_spacing_is_manager_owned() {
        let manager = ColumnManager::with_spacing(8);
        let (mut row_one, _row_two) = two_rows(&manager);

        assert_eq!(row_one.spacing(), 8);
        assert_eq!(row_one.set_spacing(3), Err(LayoutError::SpacingManaged));
        assert_eq!(row_one.set_spacing(0), Err(LayoutError::SpacingManaged));
        // The row still reports the manager's spacing afterwards.
        assert_eq!(row_one.spacing(), 8);
    }

    #[test]
    fn spacing_change_invalidates_the_cache() {
        let manager = ColumnManager::new();
        let (_row_one, _row_two) = two_rows(&manager);

        let rect = Rect::new(0, 0, 200, 20);
        assert_eq!(manager.column_width(0, rect).unwrap(), 50);

        let before = manager.invalidation_count();
        manager.set_spacing(10);
        assert_eq!(manager.invalidation_count(), before + 1);
        // Summed width now reflects the new spacing.
        assert_eq!(manager.summed_nominal_width().unwrap(), 150);
    }

    #[test]
    fn minimum_size_spans_all_columns() {
        let manager = ColumnManager::new();
        let (row_one, row_two) = two_rows(&manager);

        assert_eq!(row_one.minimum_size(), Size::new(140, 20));
        assert_eq!(row_two.minimum_size(), Size::new(140, 20));
        assert_eq!(row_one.size_hint(), row_one.minimum_size());
    }

    #[test]
    fn taking_an_item_republishes_hints() {
        let manager = ColumnManager::new();
        let (mut row_one, _row_two) = two_rows(&manager);

        let taken = row_one.take_at(1).unwrap();
        assert_eq!(taken.size_hint(), Size::new(80, 20));
        assert_eq!(row_one.count(), 1);

        // Rows now disagree: 1 column vs 2.
        assert!(manager.column_count().is_err());
        // Column 1's nominal width no longer sees the removed item.
        assert_eq!(manager.nominal_column_width(1), 40);
    }

    #[test]
    fn item_queries_tolerate_bad_indices() {
        let manager = ColumnManager::new();
        let (mut row_one, _row_two) = two_rows(&manager);

        assert!(row_one.item_at(5).is_none());
        assert!(row_one.take_at(5).is_none());
    }

    #[test]
    fn dropped_rows_keep_their_last_measurements() {
        let manager = ColumnManager::new();
        let (row_one, row_two) = two_rows(&manager);
        drop(row_two);

        // Rows are never deregistered; the dropped row's published hints
        // still participate in column widths.
        assert_eq!(manager.nominal_column_width(0), 50);
        drop(row_one);
        assert_eq!(manager.column_count().unwrap(), 2);
    }
}
