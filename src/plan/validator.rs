//! Swap plan validation against the cycle minimum.

use serde::{Deserialize, Serialize};

use crate::models::SwapOp;

/// Outcome of comparing a plan's length to the theoretical minimum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanValidation {
    /// Whether the plan length equals the minimum.
    pub valid: bool,
    /// Human-readable verdict.
    pub message: String,
}

/// Compares `plan.len()` to `minimum`. Pure; logs nothing.
pub fn validate_swap_plan(plan: &[SwapOp], minimum: usize) -> PlanValidation {
    if plan.len() == minimum {
        PlanValidation {
            valid: true,
            message: format!("Swap plan is optimal: {minimum} swaps (minimum {minimum})"),
        }
    } else {
        PlanValidation {
            valid: false,
            message: format!(
                "Swap plan uses {} swaps but the minimum is {minimum}",
                plan.len()
            ),
        }
    }
}
