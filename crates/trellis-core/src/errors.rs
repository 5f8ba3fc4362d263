//! Error types for the Trellis layout engines.

use thiserror::Error;

/// Errors surfaced by layout operations.
///
/// Out-of-range item queries are not errors; they return `None`, since
/// hosts routinely probe indices during teardown.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// Rows registered with the same column manager disagree on how many
    /// columns they contain, so no common column count exists.
    #[error("column layouts disagree on column count: {counts:?}")]
    InconsistentColumnCount { counts: Vec<usize> },

    /// Spacing on a column-managed row is owned by the manager and cannot
    /// be set on the row itself.
    #[error("spacing is managed by the ColumnManager, set it there instead")]
    SpacingManaged,
}
