//! Cycle structures of the current → target permutation.

use std::fmt;
use thiserror::Error;

use crate::models::Position;

/// A closed cycle of item indices.
///
/// Item `indices[k]` must move to the slot currently held by
/// `indices[k + 1]`; the last item moves to the slot of the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle {
    indices: Vec<usize>,
}

impl Cycle {
    pub(crate) fn new(indices: Vec<usize>) -> Self {
        Self { indices }
    }

    /// Item indices in walk order.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Number of items in the cycle.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Always false for a constructed cycle; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Whether the item is already in its target slot.
    pub fn is_fixed_point(&self) -> bool {
        self.indices.len() == 1
    }

    /// Swaps needed to resolve the cycle: `len - 1`.
    pub fn swap_count(&self) -> usize {
        self.indices.len().saturating_sub(1)
    }
}

/// Why a cycle walk could not close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakReason {
    /// No current item occupies the target slot.
    MissingTarget(Position),
    /// The walk reached an item already claimed by an earlier walk.
    MergedInto(usize),
}

impl fmt::Display for BreakReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BreakReason::MissingTarget(position) => {
                write!(f, "no current item at target {position}")
            }
            BreakReason::MergedInto(index) => {
                write!(f, "walk ran into item #{index} of another cycle")
            }
        }
    }
}

/// A cycle walk that did not return to its start.
///
/// Happens when the current and target slot sets differ (mismatched item
/// sets, or a target outside the plane). The walked items are excluded
/// from the swap count.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("broken cycle starting at item #{start} after {} items: {reason}", .walked.len())]
pub struct BrokenCycle {
    /// Index where the walk started.
    pub start: usize,
    /// Indices visited before the walk broke, in order.
    pub walked: Vec<usize>,
    /// What stopped the walk.
    pub reason: BreakReason,
}
