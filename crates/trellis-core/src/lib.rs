//! Core types for the Trellis layout engines.
//!
//! This crate holds the pieces shared by every layout engine: integer
//! geometry value types, the capability traits an item must implement to
//! participate in layout, and the error type surfaced to hosts.
//!
//! Coordinates are plain `i32` pixels. Layouts own their items as
//! `Box<dyn Placeable>` and insertion order is significant.

pub mod errors;
pub mod geometry;
pub mod item;

pub use errors::LayoutError;
pub use geometry::{ContentMargins, Orientations, Rect, Size};
pub use item::{Measurable, Placeable, SpacerItem};
