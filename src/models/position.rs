//! Slot position model.
//!
//! A position names one physical slot: `(plane, row, column)`. It is the
//! only key type used by slot lookups anywhere in the crate, so "which
//! slot" is never encoded as a formatted string.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A physical slot in the rack grid.
///
/// Row is the access-priority axis (row 1 = most accessible). Column is a
/// secondary slot index with no ordering significance.
///
/// Ordering is lexicographic over `(plane, row, column)`, which is the
/// scan order used when looking for free slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Position {
    /// Plane (partition of the slot grid).
    pub plane: u32,
    /// Row (1 = front).
    pub row: u32,
    /// Column within the row.
    pub column: u32,
}

impl Position {
    /// Marker for an item that could not be placed (`0-0-0`).
    pub const UNASSIGNED: Position = Position {
        plane: 0,
        row: 0,
        column: 0,
    };

    /// Creates a position.
    pub const fn new(plane: u32, row: u32, column: u32) -> Self {
        Self { plane, row, column }
    }

    /// Same position with a different row.
    pub fn with_row(self, row: u32) -> Self {
        Self { row, ..self }
    }

    /// Same position with a different column.
    pub fn with_column(self, column: u32) -> Self {
        Self { column, ..self }
    }

    /// Same position on a different plane.
    pub fn with_plane(self, plane: u32) -> Self {
        Self { plane, ..self }
    }

    /// Whether both positions are on the same plane and row.
    #[inline]
    pub fn same_row(&self, other: &Position) -> bool {
        self.plane == other.plane && self.row == other.row
    }

    /// Whether this is the `0-0-0` marker.
    pub fn is_unassigned(&self) -> bool {
        *self == Self::UNASSIGNED
    }

    /// Parses a `plane-column-row` location string.
    ///
    /// Missing or non-numeric components default to 0, so `"1-x"` yields
    /// `(1, 0, 0)`. This is the mapping-boundary convention for malformed
    /// catalog data.
    pub fn from_location(location: &str) -> Self {
        let mut parts = location
            .split('-')
            .map(|part| part.trim().parse::<u32>().unwrap_or(0));
        let plane = parts.next().unwrap_or(0);
        let column = parts.next().unwrap_or(0);
        let row = parts.next().unwrap_or(0);
        Self { plane, row, column }
    }

    /// Formats as a `plane-column-row` location string.
    pub fn to_location(&self) -> String {
        format!("{}-{}-{}", self.plane, self.column, self.row)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "plane {}, row {}, column {}",
            self.plane, self.row, self.column
        )
    }
}
