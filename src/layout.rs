//! Rack and plane layouts.
//!
//! A rack is a `rows × columns` grid, written `"(rows,columns)"`. A plane
//! stacks racks front to back, written `"R1xR2"`: the first rack supplies
//! rows `1..=r1`, the next rack continues at `r1 + 1`, and so on. Columns
//! start at 1 in every rack.
//!
//! The layout defines the valid slot set. [`RackLayout::normalize`] puts
//! every item on a valid, unshared slot before planning.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::warn;

use crate::error::{ArrangeError, Result};
use crate::models::{CatalogItem, Position};

/// Dimensions of one rack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RackSpec {
    pub rows: u32,
    pub columns: u32,
}

impl RackSpec {
    /// Creates a rack spec.
    pub fn new(rows: u32, columns: u32) -> Self {
        Self { rows, columns }
    }

    /// Parses `"(rows,columns)"`, e.g. `"(4, 30)"`.
    ///
    /// # Errors
    /// `ArrangeError::Layout` for any other shape or a zero dimension.
    pub fn parse(definition: &str) -> Result<Self> {
        let invalid = || ArrangeError::Layout(format!("invalid rack definition '{definition}'"));
        let inner = definition
            .trim()
            .strip_prefix('(')
            .and_then(|s| s.strip_suffix(')'))
            .ok_or_else(invalid)?;
        let (rows, columns) = inner.split_once(',').ok_or_else(invalid)?;
        let rows: u32 = rows.trim().parse().map_err(|_| invalid())?;
        let columns: u32 = columns.trim().parse().map_err(|_| invalid())?;
        if rows == 0 || columns == 0 {
            return Err(invalid());
        }
        Ok(Self { rows, columns })
    }

    /// Number of slots in the rack.
    pub fn slot_count(&self) -> usize {
        self.rows as usize * self.columns as usize
    }
}

/// Splits a plane definition such as `"R1xR2"` into rack ids.
pub fn parse_plane_definition(definition: &str) -> Vec<String> {
    definition
        .split('x')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

/// Valid slots of one plane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaneLayout {
    plane: u32,
    slots: Vec<Position>,
}

impl PlaneLayout {
    /// Stacks racks front to back into one plane.
    pub fn stack(plane: u32, racks: &[RackSpec]) -> Self {
        let mut slots = Vec::with_capacity(racks.iter().map(RackSpec::slot_count).sum());
        let mut row_base = 0;
        for rack in racks {
            for r in 1..=rack.rows {
                for c in 1..=rack.columns {
                    slots.push(Position::new(plane, row_base + r, c));
                }
            }
            row_base += rack.rows;
        }
        Self { plane, slots }
    }

    /// Plane number.
    pub fn plane(&self) -> u32 {
        self.plane
    }

    /// Slots in row-major order.
    pub fn slots(&self) -> &[Position] {
        &self.slots
    }

    /// Total rows (sum over stacked racks).
    pub fn row_count(&self) -> u32 {
        self.slots.iter().map(|s| s.row).max().unwrap_or(0)
    }
}

/// Valid slots across all planes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RackLayout {
    planes: BTreeMap<u32, PlaneLayout>,
    valid: HashSet<Position>,
}

/// Result of [`RackLayout::normalize`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Normalization {
    /// Final slot per input item.
    pub positions: Vec<Position>,
    /// Indices of items moved to a free slot.
    pub relocated: Vec<usize>,
    /// Indices of items left at [`Position::UNASSIGNED`] (no free slot).
    pub unplaced: Vec<usize>,
}

impl RackLayout {
    /// Empty layout (no valid slots).
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a plane.
    pub fn with_plane(mut self, layout: PlaneLayout) -> Self {
        if let Some(old) = self.planes.remove(&layout.plane) {
            for slot in old.slots {
                self.valid.remove(&slot);
            }
        }
        self.valid.extend(layout.slots.iter().copied());
        self.planes.insert(layout.plane, layout);
        self
    }

    /// Builds a layout from textual rack and plane definitions.
    ///
    /// Unknown rack ids in a plane definition are skipped with a warning.
    ///
    /// # Errors
    /// `ArrangeError::Layout` if a rack definition is malformed.
    pub fn from_definitions(
        racks: &BTreeMap<String, String>,
        planes: &BTreeMap<u32, String>,
    ) -> Result<Self> {
        let specs = racks
            .iter()
            .map(|(id, def)| RackSpec::parse(def).map(|spec| (id.as_str(), spec)))
            .collect::<Result<BTreeMap<_, _>>>()?;

        let mut layout = Self::new();
        for (&plane, definition) in planes {
            let mut stacked = Vec::new();
            for rack_id in parse_plane_definition(definition) {
                match specs.get(rack_id.as_str()) {
                    Some(spec) => stacked.push(*spec),
                    None => warn!(plane, rack = %rack_id, "no definition for rack; skipped"),
                }
            }
            layout = layout.with_plane(PlaneLayout::stack(plane, &stacked));
        }
        Ok(layout)
    }

    /// Whether the layout defines no planes.
    pub fn is_empty(&self) -> bool {
        self.planes.is_empty()
    }

    /// Layout of one plane.
    pub fn plane(&self, plane: u32) -> Option<&PlaneLayout> {
        self.planes.get(&plane)
    }

    /// Whether the slot exists in the layout.
    pub fn is_valid(&self, position: &Position) -> bool {
        self.valid.contains(position)
    }

    /// All slots ordered by plane, row, column.
    pub fn slots(&self) -> Vec<Position> {
        let mut slots: Vec<Position> = self.valid.iter().copied().collect();
        slots.sort();
        slots
    }

    /// Puts every item on a valid, unshared slot.
    ///
    /// Items on a valid slot keep it (first claimant wins on a shared
    /// slot). All others take the first free slot in plane, row, column
    /// order; when none is left they get [`Position::UNASSIGNED`].
    pub fn normalize(&self, items: &[CatalogItem]) -> Normalization {
        let mut taken: HashSet<Position> = HashSet::with_capacity(items.len());
        let mut positions = vec![Position::UNASSIGNED; items.len()];
        let mut pending = Vec::new();

        for (i, item) in items.iter().enumerate() {
            if self.is_valid(&item.position) && taken.insert(item.position) {
                positions[i] = item.position;
            } else {
                pending.push(i);
            }
        }

        let mut free = self.slots().into_iter().filter(|slot| !taken.contains(slot));
        let mut relocated = Vec::new();
        let mut unplaced = Vec::new();
        for i in pending {
            match free.next() {
                Some(slot) => {
                    positions[i] = slot;
                    relocated.push(i);
                }
                None => {
                    warn!(item = %items[i].id, "no free slot left; item left unassigned");
                    unplaced.push(i);
                }
            }
        }

        Normalization {
            positions,
            relocated,
            unplaced,
        }
    }
}
