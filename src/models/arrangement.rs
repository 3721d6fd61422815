//! Arrangement model.
//!
//! An arrangement is an ordered sequence of items on one plane. A current
//! and a target arrangement are paired by index: element `i` of both
//! denotes the same logical item at two different slots.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::ops::Deref;

use super::{CatalogItem, Position, SwapOp};
use crate::error::{ArrangeError, Result};

/// Ordered items, one per occupied slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Arrangement {
    items: Vec<CatalogItem>,
}

impl Arrangement {
    /// Wraps an item sequence.
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self { items }
    }

    /// Items on `plane`, in input order.
    pub fn for_plane(items: &[CatalogItem], plane: u32) -> Self {
        Self {
            items: items
                .iter()
                .filter(|item| item.position.plane == plane)
                .cloned()
                .collect(),
        }
    }

    /// The items.
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// Consumes the arrangement, returning its items.
    pub fn into_items(self) -> Vec<CatalogItem> {
        self.items
    }

    /// Slot of every item, in order.
    pub fn positions(&self) -> Vec<Position> {
        self.items.iter().map(|item| item.position).collect()
    }

    /// Slot of the item with the given id.
    pub fn position_of(&self, item_id: &str) -> Option<Position> {
        self.items
            .iter()
            .find(|item| item.id == item_id)
            .map(|item| item.position)
    }

    /// Number of items per row, keyed by row number (ascending).
    pub fn row_capacities(&self) -> BTreeMap<u32, usize> {
        let mut capacities = BTreeMap::new();
        for item in &self.items {
            *capacities.entry(item.position.row).or_insert(0) += 1;
        }
        capacities
    }

    /// Checks that no two items share a slot.
    ///
    /// # Errors
    /// `ArrangeError::DuplicatePosition` naming the first clash found.
    pub fn check_distinct(&self) -> Result<()> {
        check_distinct_positions(&self.items)
    }

    /// Applies a swap in place, exchanging the two items' positions.
    ///
    /// # Errors
    /// - `UnknownItem` if either side is not in the arrangement.
    /// - `StalePosition` if an item is not where the swap says it is.
    pub fn apply(&mut self, swap: &SwapOp) -> Result<()> {
        let from = self.locate(&swap.from.item_id, swap.from.position)?;
        let to = self.locate(&swap.to.item_id, swap.to.position)?;
        self.items[from].position = swap.to.position;
        self.items[to].position = swap.from.position;
        Ok(())
    }

    fn locate(&self, item_id: &str, expected: Position) -> Result<usize> {
        let index = self
            .items
            .iter()
            .position(|item| item.id == item_id)
            .ok_or_else(|| ArrangeError::UnknownItem(item_id.to_string()))?;
        let actual = self.items[index].position;
        if actual != expected {
            return Err(ArrangeError::StalePosition {
                item: item_id.to_string(),
                expected,
                actual,
            });
        }
        Ok(index)
    }
}

impl Deref for Arrangement {
    type Target = [CatalogItem];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl From<Vec<CatalogItem>> for Arrangement {
    fn from(items: Vec<CatalogItem>) -> Self {
        Self::new(items)
    }
}

/// Checks that the items occupy pairwise distinct slots.
pub(crate) fn check_distinct_positions(items: &[CatalogItem]) -> Result<()> {
    let mut seen: HashMap<Position, &str> = HashMap::with_capacity(items.len());
    for item in items {
        if let Some(first) = seen.insert(item.position, &item.id) {
            return Err(ArrangeError::DuplicatePosition {
                position: item.position,
                first: first.to_string(),
                second: item.id.clone(),
            });
        }
    }
    Ok(())
}
