//! Swap operation model.
//!
//! A swap exchanges the slots of two items. Swaps are produced by the plan
//! generator and consumed by writers and reports; they are never edited.

use serde::{Deserialize, Serialize};

use super::{CatalogItem, Position};

/// One side of a swap: an item and the slot it held when the swap was
/// emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapEndpoint {
    /// Item identifier.
    pub item_id: String,
    /// Item display name.
    pub name: String,
    /// Item house.
    pub house: String,
    /// Slot held by the item immediately before the swap.
    pub position: Position,
}

impl SwapEndpoint {
    /// Captures an item at the given (possibly simulated) position.
    pub fn of(item: &CatalogItem, position: Position) -> Self {
        Self {
            item_id: item.id.clone(),
            name: item.name.clone(),
            house: item.house.clone(),
            position,
        }
    }
}

/// Exchange of two items' slots.
///
/// After the swap, the `from` item sits at `to.position` and the `to`
/// item sits at `from.position`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapOp {
    pub from: SwapEndpoint,
    pub to: SwapEndpoint,
}

impl SwapOp {
    /// Creates a swap between two endpoints.
    pub fn new(from: SwapEndpoint, to: SwapEndpoint) -> Self {
        Self { from, to }
    }

    /// Whether the swap touches the given item.
    pub fn involves(&self, item_id: &str) -> bool {
        self.from.item_id == item_id || self.to.item_id == item_id
    }

    /// Whether both items stay in their row.
    pub fn is_row_preserving(&self) -> bool {
        self.from.position.same_row(&self.to.position)
    }
}
