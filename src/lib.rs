//! Seasonal rearrangement of a slotted collection with minimum swaps.
//!
//! Items on a rack plane are scored against a season (and optionally a
//! time of day), the best-scoring items are assigned the most accessible
//! rows, and the move from the current to the target arrangement is
//! realized with the fewest possible pairwise swaps.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `CatalogItem`, `Position`, `Season`,
//!   `Arrangement`, `SwapOp`
//! - **`scoring`**: Rule-based seasonal scorer and keyword tables
//! - **`assigner`**: Row-priority target assignment
//! - **`permutation`**: Cycle decomposition and minimum swap count
//! - **`plan`**: Swap plan generation, validation and replay
//! - **`optimizer`**: End-to-end pipeline for one plane
//! - **`layout`**: Rack geometry and slot normalization
//! - **`catalog`**: Record mapping, repository trait, paced plan writer
//! - **`report`**: Text swap reports and seasonal summaries
//! - **`validation`**: Input integrity checks
//! - **`config`**: TOML configuration
//!
//! # Algorithm
//!
//! The current → target move is a permutation of slots. Decomposed into
//! cycles, a cycle of length L needs exactly L − 1 swaps, so the minimum
//! for n items in C cycles (fixed points included) is n − C.
//!
//! # Logging
//!
//! The crate emits `tracing` events and installs no subscriber.

pub mod assigner;
pub mod catalog;
pub mod config;
pub mod error;
pub mod layout;
pub mod models;
pub mod optimizer;
pub mod permutation;
pub mod plan;
pub mod report;
pub mod scoring;
pub mod validation;

pub use assigner::compute_optimal_arrangement;
pub use error::{ArrangeError, Result};
pub use permutation::minimum_swaps;
pub use plan::{generate_swap_plan, validate_swap_plan};
pub use scoring::score;
