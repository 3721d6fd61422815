//! Swap plan generation.
//!
//! Re-walks each complete cycle over a simulated slot index. Starting at
//! the cycle head, the moving item is swapped with whoever occupies its
//! target slot; the displaced item becomes the next mover. The walk ends
//! when the mover's target is the slot it already holds, after exactly
//! `len - 1` swaps.

use std::collections::HashMap;
use tracing::{debug, warn};

use crate::error::Result;
use crate::models::{CatalogItem, Position, SwapEndpoint, SwapOp};
use crate::permutation::{CycleDecomposition, PermutationDiffEngine, SlotEquivalence};

/// Emits ordered swaps realizing a cycle decomposition.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwapPlanGenerator {
    engine: PermutationDiffEngine,
}

impl SwapPlanGenerator {
    /// Generator comparing full positions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the slot equivalence used when decomposing.
    pub fn with_equivalence(mut self, equivalence: SlotEquivalence) -> Self {
        self.engine = self.engine.with_equivalence(equivalence);
        self
    }

    /// Decomposes and generates in one pass.
    ///
    /// # Errors
    /// `ArrangeError::LengthMismatch` if the sequences differ in length.
    pub fn generate(
        &self,
        current: &[CatalogItem],
        optimal: &[CatalogItem],
    ) -> Result<Vec<SwapOp>> {
        let decomposition = self.engine.decompose(current, optimal)?;
        Ok(self.generate_from(current, &decomposition))
    }

    /// Generates swaps for an existing decomposition of `current`.
    ///
    /// Broken cycles produce no swaps.
    pub fn generate_from(
        &self,
        current: &[CatalogItem],
        decomposition: &CycleDecomposition,
    ) -> Vec<SwapOp> {
        let targets = decomposition.targets();
        let mut simulated: Vec<Position> = decomposition.current().to_vec();
        let mut occupant: HashMap<Position, usize> = simulated
            .iter()
            .enumerate()
            .map(|(i, &slot)| (slot, i))
            .collect();

        let mut swaps = Vec::with_capacity(decomposition.minimum_swaps());
        for cycle in decomposition.complete_cycles() {
            if cycle.is_fixed_point() {
                continue;
            }
            let mut mover = cycle.indices()[0];
            // A closed cycle needs len - 1 swaps; the bound guards against
            // a corrupted index looping forever.
            for _ in 0..cycle.swap_count() {
                let Some(&other) = occupant.get(&targets[mover]) else {
                    break;
                };
                if other == mover {
                    break;
                }
                let from_slot = simulated[mover];
                let to_slot = simulated[other];
                swaps.push(SwapOp::new(
                    SwapEndpoint::of(&current[mover], from_slot),
                    SwapEndpoint::of(&current[other], to_slot),
                ));

                simulated[mover] = to_slot;
                simulated[other] = from_slot;
                occupant.insert(to_slot, mover);
                occupant.insert(from_slot, other);
                mover = other;
            }
        }

        let minimum = decomposition.minimum_swaps();
        if swaps.len() != minimum {
            warn!(
                generated = swaps.len(),
                minimum, "swap plan length differs from the cycle minimum"
            );
        } else {
            debug!(swaps = swaps.len(), "swap plan generated");
        }
        swaps
    }
}

/// Generates the swap plan from `current` to `optimal` under
/// full-position equivalence.
///
/// Mismatched lengths yield an empty plan and a logged warning.
pub fn generate_swap_plan(current: &[CatalogItem], optimal: &[CatalogItem]) -> Vec<SwapOp> {
    match SwapPlanGenerator::new().generate(current, optimal) {
        Ok(plan) => plan,
        Err(err) => {
            warn!(%err, "cannot generate swap plan");
            Vec::new()
        }
    }
}
