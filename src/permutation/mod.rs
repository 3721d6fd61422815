//! Permutation diff between a current and a target arrangement.
//!
//! # Algorithm
//!
//! The target arrangement induces a permutation of slots. Decomposing it
//! into disjoint cycles gives the minimum number of transpositions:
//!
//! ```text
//! minimum_swaps = Σ (len(cycle) - 1) = n - (number of cycles)
//! ```
//!
//! where fixed points count as cycles of length 1.
//!
//! 1. Index current slots: `Position → item index`.
//! 2. For each unvisited item, follow "who sits where I must go" until
//!    the walk returns to its start.
//! 3. Walks that cannot close are reported as [`BrokenCycle`]s and
//!    excluded from the count.
//!
//! # Complexity
//! O(n) expected (one hash lookup per item).
//!
//! # Reference
//! Knuth (1997), "The Art of Computer Programming", Vol. 1, §1.3.3
//! (cycle structure of permutations)

mod cycles;
mod equivalence;

pub use cycles::{BreakReason, BrokenCycle, Cycle};
pub use equivalence::SlotEquivalence;

use std::collections::HashMap;
use tracing::{debug, warn};

use crate::error::{ArrangeError, Result};
use crate::models::{CatalogItem, Position};

/// Cycle decomposition of a current → target permutation.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleDecomposition {
    cycles: Vec<std::result::Result<Cycle, BrokenCycle>>,
    current: Vec<Position>,
    targets: Vec<Position>,
}

impl CycleDecomposition {
    /// All walks in discovery order.
    pub fn cycles(&self) -> &[std::result::Result<Cycle, BrokenCycle>] {
        &self.cycles
    }

    /// Closed cycles, fixed points included.
    pub fn complete_cycles(&self) -> impl Iterator<Item = &Cycle> {
        self.cycles.iter().filter_map(|c| c.as_ref().ok())
    }

    /// Walks that did not close.
    pub fn broken(&self) -> impl Iterator<Item = &BrokenCycle> {
        self.cycles.iter().filter_map(|c| c.as_ref().err())
    }

    /// Whether every walk closed.
    pub fn is_complete(&self) -> bool {
        self.cycles.iter().all(|c| c.is_ok())
    }

    /// Minimum swaps over the complete cycles.
    pub fn minimum_swaps(&self) -> usize {
        self.complete_cycles().map(Cycle::swap_count).sum()
    }

    /// Number of closed cycles, fixed points included.
    pub fn cycle_count(&self) -> usize {
        self.complete_cycles().count()
    }

    /// Number of items already in their target slot.
    pub fn fixed_points(&self) -> usize {
        self.complete_cycles().filter(|c| c.is_fixed_point()).count()
    }

    /// Number of items compared.
    pub fn item_count(&self) -> usize {
        self.current.len()
    }

    /// Current slot per item.
    pub fn current(&self) -> &[Position] {
        &self.current
    }

    /// Target slot per item, after equivalence refinement.
    pub fn targets(&self) -> &[Position] {
        &self.targets
    }

    /// Fails on the first broken cycle.
    ///
    /// # Errors
    /// `ArrangeError::BrokenCycle` if any walk did not close.
    pub fn into_strict(self) -> Result<Self> {
        if let Some(broken) = self.broken().next() {
            return Err(ArrangeError::BrokenCycle(broken.clone()));
        }
        Ok(self)
    }
}

/// Compares current and target arrangements.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermutationDiffEngine {
    equivalence: SlotEquivalence,
}

impl PermutationDiffEngine {
    /// Engine comparing full positions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the slot equivalence.
    pub fn with_equivalence(mut self, equivalence: SlotEquivalence) -> Self {
        self.equivalence = equivalence;
        self
    }

    /// The slot equivalence in use.
    pub fn equivalence(&self) -> SlotEquivalence {
        self.equivalence
    }

    /// Decomposes the permutation from `current` to `optimal`.
    ///
    /// `current[i]` and `optimal[i]` must be the same item.
    ///
    /// # Errors
    /// `ArrangeError::LengthMismatch` if the sequences differ in length.
    pub fn decompose(
        &self,
        current: &[CatalogItem],
        optimal: &[CatalogItem],
    ) -> Result<CycleDecomposition> {
        if let Some((i, (a, b))) = current
            .iter()
            .zip(optimal)
            .enumerate()
            .find(|(_, (a, b))| a.id != b.id)
        {
            warn!(
                index = i,
                current = %a.id,
                target = %b.id,
                "arrangements are not paired by index"
            );
        }
        let current_slots: Vec<Position> = current.iter().map(|item| item.position).collect();
        let target_slots: Vec<Position> = optimal.iter().map(|item| item.position).collect();
        self.decompose_positions(&current_slots, &target_slots)
    }

    /// Decomposes a permutation given as paired slot sequences.
    ///
    /// # Errors
    /// `ArrangeError::LengthMismatch` if the sequences differ in length.
    pub fn decompose_positions(
        &self,
        current: &[Position],
        proposed: &[Position],
    ) -> Result<CycleDecomposition> {
        if current.len() != proposed.len() {
            return Err(ArrangeError::LengthMismatch {
                current: current.len(),
                target: proposed.len(),
            });
        }
        let targets = self.equivalence.refine_targets(current, proposed);
        let n = current.len();

        let mut occupant: HashMap<Position, usize> = HashMap::with_capacity(n);
        for (i, slot) in current.iter().enumerate() {
            if let Some(previous) = occupant.insert(*slot, i) {
                warn!(
                    slot = %slot,
                    previous,
                    index = i,
                    "duplicate current slot; later item wins the lookup"
                );
            }
        }

        let mut claimed = vec![false; n];
        let mut cycles = Vec::new();

        for start in 0..n {
            if claimed[start] {
                continue;
            }
            if current[start] == targets[start] {
                claimed[start] = true;
                cycles.push(Ok(Cycle::new(vec![start])));
                continue;
            }

            let mut walked = Vec::new();
            let mut cursor = start;
            let outcome = loop {
                claimed[cursor] = true;
                walked.push(cursor);
                match occupant.get(&targets[cursor]) {
                    None => break Err(BreakReason::MissingTarget(targets[cursor])),
                    Some(&next) if next == start => break Ok(()),
                    Some(&next) if claimed[next] => break Err(BreakReason::MergedInto(next)),
                    Some(&next) => cursor = next,
                }
            };

            match outcome {
                Ok(()) => cycles.push(Ok(Cycle::new(walked))),
                Err(reason) => {
                    let broken = BrokenCycle {
                        start,
                        walked,
                        reason,
                    };
                    warn!(
                        start,
                        length = broken.walked.len(),
                        reason = %reason,
                        "broken cycle excluded from swap count"
                    );
                    cycles.push(Err(broken));
                }
            }
        }

        let decomposition = CycleDecomposition {
            cycles,
            current: current.to_vec(),
            targets,
        };
        debug!(
            items = n,
            cycles = decomposition.cycle_count(),
            fixed = decomposition.fixed_points(),
            minimum_swaps = decomposition.minimum_swaps(),
            "permutation decomposed"
        );
        Ok(decomposition)
    }
}

/// Minimum swaps from `current` to `optimal` under full-position
/// equivalence.
///
/// Degenerate input never fails: broken cycles are left out of the count
/// and mismatched lengths yield 0, both with a logged warning.
pub fn minimum_swaps(current: &[CatalogItem], optimal: &[CatalogItem]) -> usize {
    match PermutationDiffEngine::new().decompose(current, optimal) {
        Ok(decomposition) => decomposition.minimum_swaps(),
        Err(err) => {
            warn!(%err, "cannot compare arrangements");
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    /// Items `item-i` at the given (row, column) slots on plane 1.
    fn items_at(slots: &[(u32, u32)]) -> Vec<CatalogItem> {
        slots
            .iter()
            .enumerate()
            .map(|(i, &(row, column))| CatalogItem::new(format!("item-{i}")).at(1, row, column))
            .collect()
    }

    fn diagonal(n: u32) -> Vec<(u32, u32)> {
        (1..=n).map(|k| (k, k)).collect()
    }

    #[test]
    fn test_simple_swap() {
        let current = items_at(&[(1, 1), (2, 2)]);
        let optimal = items_at(&[(2, 2), (1, 1)]);
        assert_eq!(minimum_swaps(&current, &optimal), 1);
    }

    #[test]
    fn test_cycle_of_three() {
        let current = items_at(&diagonal(3));
        let optimal = items_at(&[(3, 3), (1, 1), (2, 2)]);
        let d = PermutationDiffEngine::new().decompose(&current, &optimal).unwrap();
        assert_eq!(d.minimum_swaps(), 2);
        assert_eq!(d.cycle_count(), 1);
        assert_eq!(d.complete_cycles().next().unwrap().len(), 3);
    }

    #[test]
    fn test_two_independent_three_cycles() {
        let current = items_at(&diagonal(6));
        let optimal = items_at(&[(2, 2), (3, 3), (1, 1), (5, 5), (6, 6), (4, 4)]);
        assert_eq!(minimum_swaps(&current, &optimal), 4);
    }

    #[test]
    fn test_mixed_cycles_and_fixed_points() {
        let current = items_at(&diagonal(8));
        let optimal = items_at(&[
            (1, 1),
            (3, 3),
            (5, 5),
            (4, 4),
            (2, 2),
            (8, 8),
            (7, 7),
            (6, 6),
        ]);
        let d = PermutationDiffEngine::new().decompose(&current, &optimal).unwrap();
        // 1 -> 2 -> 4 -> 1 and 5 <-> 7; items 0, 3 and 6 stay.
        assert_eq!(d.fixed_points(), 3);
        assert_eq!(d.minimum_swaps(), 3);
        assert_eq!(d.cycle_count(), 5);
    }

    #[test]
    fn test_column_only_moves_full_position() {
        let current = items_at(&[(1, 1), (1, 2), (2, 1), (2, 2)]);
        let optimal = items_at(&[(1, 2), (1, 1), (2, 2), (2, 1)]);
        let d = PermutationDiffEngine::new().decompose(&current, &optimal).unwrap();
        assert_eq!(d.minimum_swaps(), 2);
    }

    #[test]
    fn test_column_only_moves_row_only() {
        let current = items_at(&[(1, 1), (1, 2), (2, 1), (2, 2)]);
        let optimal = items_at(&[(1, 2), (1, 1), (2, 2), (2, 1)]);
        let d = PermutationDiffEngine::new()
            .with_equivalence(SlotEquivalence::RowOnly)
            .decompose(&current, &optimal)
            .unwrap();
        assert_eq!(d.minimum_swaps(), 0);
        assert_eq!(d.fixed_points(), 4);
    }

    #[test]
    fn test_row_only_counts_row_changes() {
        // Rows swap between items 0 and 2; 1 and 3 shuffle columns only.
        let current = items_at(&[(1, 1), (1, 2), (2, 1), (2, 2)]);
        let optimal = items_at(&[(2, 2), (1, 1), (1, 2), (2, 1)]);
        let d = PermutationDiffEngine::new()
            .with_equivalence(SlotEquivalence::RowOnly)
            .decompose(&current, &optimal)
            .unwrap();
        assert_eq!(d.minimum_swaps(), 1);
        assert_eq!(d.targets()[0], current[2].position);
        assert_eq!(d.targets()[2], current[0].position);
    }

    #[test]
    fn test_row_only_separate_rotations() {
        // Rows 1 → 2 → 3 → 1, two items per row. Proposals chain all six
        // items into one cycle; two 3-cycles need one swap fewer.
        let slots = [(1, 1), (1, 2), (2, 1), (2, 2), (3, 1), (3, 2)];
        let current = items_at(&slots);
        let optimal = items_at(&[(2, 2), (2, 1), (3, 2), (3, 1), (1, 2), (1, 1)]);

        let full = PermutationDiffEngine::new().decompose(&current, &optimal).unwrap();
        assert_eq!(full.minimum_swaps(), 5);

        let d = PermutationDiffEngine::new()
            .with_equivalence(SlotEquivalence::RowOnly)
            .decompose(&current, &optimal)
            .unwrap();
        assert!(d.is_complete());
        assert_eq!(d.minimum_swaps(), 4);
        assert_eq!(d.cycle_count(), 2);
        for (target, wanted) in d.targets().iter().zip(&optimal) {
            assert_eq!(target.row, wanted.position.row);
        }
    }

    #[test]
    fn test_missing_target_is_broken() {
        let current = items_at(&[(1, 1), (2, 2), (3, 3)]);
        // Item 0 wants a slot no one holds.
        let optimal = items_at(&[(9, 9), (1, 1), (3, 3)]);
        let d = PermutationDiffEngine::new().decompose(&current, &optimal).unwrap();
        assert!(!d.is_complete());
        let broken: Vec<_> = d.broken().collect();
        assert_eq!(broken.len(), 2);
        assert_eq!(
            broken[0].reason,
            BreakReason::MissingTarget(Position::new(1, 9, 9))
        );
        assert_eq!(broken[0].walked, vec![0]);
        // Item 1 wants item 0's slot, already claimed by the broken walk.
        assert_eq!(broken[1].reason, BreakReason::MergedInto(0));
        assert_eq!(d.fixed_points(), 1);
        assert_eq!(d.minimum_swaps(), 0);
        assert!(matches!(
            d.into_strict(),
            Err(ArrangeError::BrokenCycle(_))
        ));
    }

    #[test]
    fn test_broken_cycle_excluded_other_cycles_counted() {
        let current = items_at(&[(1, 1), (2, 2), (3, 3), (4, 4)]);
        let optimal = items_at(&[(2, 2), (1, 1), (9, 9), (3, 3)]);
        let d = PermutationDiffEngine::new().decompose(&current, &optimal).unwrap();
        assert_eq!(d.minimum_swaps(), 1);
        // Item 2 has no target slot; item 3 then runs into item 2.
        assert_eq!(d.broken().count(), 2);
    }

    #[test]
    fn test_length_mismatch() {
        let current = items_at(&[(1, 1), (2, 2)]);
        let optimal = items_at(&[(1, 1)]);
        assert!(matches!(
            PermutationDiffEngine::new().decompose(&current, &optimal),
            Err(ArrangeError::LengthMismatch {
                current: 2,
                target: 1
            })
        ));
        assert_eq!(minimum_swaps(&current, &optimal), 0);
    }

    #[test]
    fn test_identity_and_empty() {
        let current = items_at(&diagonal(5));
        assert_eq!(minimum_swaps(&current, &current), 0);
        assert_eq!(minimum_swaps(&[], &[]), 0);
    }

    #[test]
    fn test_random_permutations_minimum_is_n_minus_cycles() {
        let mut rng = SmallRng::seed_from_u64(7);
        for n in [1usize, 2, 5, 13, 40] {
            let slots: Vec<Position> = (0..n as u32)
                .map(|k| Position::new(1, k / 8 + 1, k % 8 + 1))
                .collect();
            let mut perm: Vec<usize> = (0..n).collect();
            perm.shuffle(&mut rng);
            let targets: Vec<Position> = perm.iter().map(|&j| slots[j]).collect();

            // Count cycles of `perm` independently.
            let mut seen = vec![false; n];
            let mut cycles = 0;
            for i in 0..n {
                if !seen[i] {
                    cycles += 1;
                    let mut j = i;
                    while !seen[j] {
                        seen[j] = true;
                        j = perm[j];
                    }
                }
            }

            let d = PermutationDiffEngine::new()
                .decompose_positions(&slots, &targets)
                .unwrap();
            assert!(d.is_complete());
            assert_eq!(d.cycle_count(), cycles);
            assert_eq!(d.minimum_swaps(), n - cycles);
        }
    }
}
