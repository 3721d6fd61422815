//! Row-priority slot assignment.
//!
//! # Algorithm
//!
//! 1. Score every item; stable-sort descending (ties keep input order).
//! 2. Take the rows present on the plane and how many items each holds.
//! 3. Walk rows ascending (row 1 = most accessible) and fill each with the
//!    next `capacity[row]` best-scoring items.
//!
//! The row structure of the plane is preserved: the target uses exactly
//! the same rows and per-row counts as the current arrangement.
//!
//! Columns follow a [`ColumnPolicy`]. Carrying every item's column into
//! its new row can put two items on the same slot, so the default policy
//! redistributes the row's own columns instead.
//!
//! # Complexity
//! O(n log n) for the sort, O(n) for the fill.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;

use crate::error::{ArrangeError, Result};
use crate::models::{check_distinct_positions, Arrangement, CatalogItem, Position};
use crate::scoring::{Score, ScoringContext, SeasonalScorer};

/// How target columns are chosen inside a row bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnPolicy {
    /// Redistribute the row's existing columns. Items already in the row
    /// keep their column; freed columns go, ascending, to incoming items
    /// in score order. Always yields distinct slots.
    #[default]
    Reassign,
    /// Keep each item's original column. Collisions are reported as
    /// `ArrangeError::TargetCollision`.
    Preserve,
}

/// An item index paired with its score, in ranking order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankedItem {
    /// Index into the input slice.
    pub index: usize,
    /// Item score.
    pub score: Score,
}

/// Assigns the best-scoring items to the most accessible rows.
#[derive(Debug, Clone, Default)]
pub struct SlotAssigner {
    scorer: SeasonalScorer,
    column_policy: ColumnPolicy,
}

impl SlotAssigner {
    /// Assigner with the standard scorer and column reassignment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the scorer.
    pub fn with_scorer(mut self, scorer: SeasonalScorer) -> Self {
        self.scorer = scorer;
        self
    }

    /// Sets the column policy.
    pub fn with_column_policy(mut self, policy: ColumnPolicy) -> Self {
        self.column_policy = policy;
        self
    }

    /// The scorer in use.
    pub fn scorer(&self) -> &SeasonalScorer {
        &self.scorer
    }

    /// Scores and ranks items, best first. Ties keep input order.
    pub fn rank(&self, items: &[CatalogItem], context: &ScoringContext) -> Vec<RankedItem> {
        let mut ranked: Vec<RankedItem> = items
            .iter()
            .enumerate()
            .map(|(index, item)| RankedItem {
                index,
                score: self.scorer.score(item, context),
            })
            .collect();
        // `sort_by` is stable.
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked
    }

    /// Computes the target arrangement for items on one plane.
    ///
    /// The result is paired by index with `items`: element `i` is
    /// `items[i]` moved to its target slot.
    ///
    /// # Errors
    /// - `MixedPlanes` if the items are not all on one plane.
    /// - `DuplicatePosition` if two items currently share a slot.
    /// - `TargetCollision` under [`ColumnPolicy::Preserve`] when two
    ///   items land on the same slot.
    pub fn assign(&self, items: &[CatalogItem], context: &ScoringContext) -> Result<Arrangement> {
        let Some(first) = items.first() else {
            return Ok(Arrangement::default());
        };
        let plane = first.position.plane;
        if let Some(stray) = items.iter().find(|item| item.position.plane != plane) {
            return Err(ArrangeError::MixedPlanes {
                expected: plane,
                found: stray.position.plane,
                item: stray.id.clone(),
            });
        }
        check_distinct_positions(items)?;

        let ranked = self.rank(items, context);

        // Columns currently held in each row, ascending.
        let mut row_columns: BTreeMap<u32, BTreeSet<u32>> = BTreeMap::new();
        for item in items {
            row_columns
                .entry(item.position.row)
                .or_default()
                .insert(item.position.column);
        }

        let mut targets: Vec<Position> = items.iter().map(|item| item.position).collect();
        let mut cursor = ranked.iter();

        for (&row, columns) in &row_columns {
            let bucket: Vec<usize> = cursor
                .by_ref()
                .take(columns.len())
                .map(|r| r.index)
                .collect();
            debug!(row, capacity = columns.len(), "filling row");

            match self.column_policy {
                ColumnPolicy::Preserve => {
                    for &index in &bucket {
                        targets[index] = Position::new(plane, row, items[index].position.column);
                    }
                }
                ColumnPolicy::Reassign => {
                    let mut free = columns.clone();
                    // Residents of this row keep their column.
                    for &index in &bucket {
                        if items[index].position.row == row {
                            free.remove(&items[index].position.column);
                        }
                    }
                    let mut free = free.into_iter();
                    for &index in &bucket {
                        let current = items[index].position;
                        let column = if current.row == row {
                            current.column
                        } else {
                            // Sizes match: one free column per incoming item.
                            free.next().unwrap_or(current.column)
                        };
                        targets[index] = Position::new(plane, row, column);
                    }
                }
            }
        }

        let target = Arrangement::new(
            items
                .iter()
                .zip(&targets)
                .map(|(item, &position)| item.moved_to(position))
                .collect(),
        );

        if self.column_policy == ColumnPolicy::Preserve {
            check_target_bijective(&target)?;
        }
        Ok(target)
    }
}

fn check_target_bijective(target: &Arrangement) -> Result<()> {
    let mut seen: HashMap<Position, &str> = HashMap::with_capacity(target.len());
    for item in target.iter() {
        if let Some(first) = seen.insert(item.position, &item.id) {
            return Err(ArrangeError::TargetCollision {
                position: item.position,
                first: first.to_string(),
                second: item.id.clone(),
            });
        }
    }
    Ok(())
}

/// Computes the target arrangement with the standard scorer and column
/// reassignment.
pub fn compute_optimal_arrangement(
    items: &[CatalogItem],
    context: &ScoringContext,
) -> Result<Arrangement> {
    SlotAssigner::new().assign(items, context)
}
