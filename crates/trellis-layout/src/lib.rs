//! Layout engines for Trellis.
//!
//! Two independent engines, each driven by a host through the [`Layout`]
//! trait during its resize pass:
//!
//! 1. **Reflow**: [`ReflowLayout`] arranges items left to right and wraps
//!    to a new line when the remaining width runs out, reporting the total
//!    height needed for a given width.
//! 2. **Columns**: [`ColumnLayout`] rows share a [`ColumnManager`] that
//!    negotiates one width per column across all registered rows, so items
//!    in separate rows line up into columns.
//!
//! # Example
//!
//! ```
//! use trellis_core::{Placeable, Rect, Size, SpacerItem};
//! use trellis_layout::{ColumnLayout, ColumnManager, Layout};
//!
//! let manager = ColumnManager::new();
//! let mut row_one = ColumnLayout::new(&manager);
//! let mut row_two = ColumnLayout::new(&manager);
//!
//! row_one.add_item(Box::new(SpacerItem::new(Size::new(30, 20))));
//! row_one.add_item(Box::new(SpacerItem::new(Size::new(80, 20))));
//! row_two.add_item(Box::new(SpacerItem::new(Size::new(50, 20))));
//! row_two.add_item(Box::new(SpacerItem::new(Size::new(40, 20))));
//!
//! row_one.set_geometry(Rect::new(0, 0, 200, 20)).unwrap();
//! row_two.set_geometry(Rect::new(0, 25, 200, 20)).unwrap();
//!
//! // Both rows use the widest hint per column: [50, 80].
//! assert_eq!(row_one.item_at(1).unwrap().geometry().x,
//!            row_two.item_at(1).unwrap().geometry().x);
//! ```

mod column;
mod reflow;
mod traits;

pub use column::{ColumnLayout, ColumnManager, RowId};
pub use reflow::ReflowLayout;
pub use traits::Layout;
