//! Swap plans: generation, validation and replay.
//!
//! A plan is an ordered list of [`SwapOp`]s. Each swap is recorded
//! against the state left by the previous ones, so a plan must be applied
//! in order.

mod generator;
mod validator;

pub use generator::{generate_swap_plan, SwapPlanGenerator};
pub use validator::{validate_swap_plan, PlanValidation};

use crate::error::Result;
use crate::models::{Arrangement, CatalogItem, SwapOp};

/// Replays a plan on a copy of `current`.
///
/// # Errors
/// `UnknownItem` or `StalePosition` if the plan does not fit `current`.
pub fn apply_swaps(current: &[CatalogItem], plan: &[SwapOp]) -> Result<Arrangement> {
    let mut arrangement = Arrangement::new(current.to_vec());
    for swap in plan {
        arrangement.apply(swap)?;
    }
    Ok(arrangement)
}
