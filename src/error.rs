//! Error types for arrangement planning.

use thiserror::Error;

use crate::models::Position;
use crate::permutation::BrokenCycle;

/// Main error type for arrangement operations.
#[derive(Debug, Error)]
pub enum ArrangeError {
    /// Current and target sequences are not paired one-to-one.
    #[error("current arrangement has {current} items but target has {target}")]
    LengthMismatch { current: usize, target: usize },

    /// Two items of one arrangement occupy the same slot.
    #[error("items '{first}' and '{second}' both occupy {position}")]
    DuplicatePosition {
        position: Position,
        first: String,
        second: String,
    },

    /// The assigner produced the same target slot for two items.
    #[error("items '{first}' and '{second}' were both assigned {position}")]
    TargetCollision {
        position: Position,
        first: String,
        second: String,
    },

    /// Items from more than one plane were passed where one plane is required.
    #[error("item '{item}' is on plane {found}, expected plane {expected}")]
    MixedPlanes {
        expected: u32,
        found: u32,
        item: String,
    },

    /// A cycle walk did not close (strict mode only).
    #[error(transparent)]
    BrokenCycle(#[from] BrokenCycle),

    /// An item id is not known to the catalog.
    #[error("unknown item '{0}'")]
    UnknownItem(String),

    /// A swap refers to a position the item no longer occupies.
    #[error("item '{item}' expected at {expected} but found at {actual}")]
    StalePosition {
        item: String,
        expected: Position,
        actual: Position,
    },

    /// Invalid rack or plane layout definition.
    #[error("layout error: {0}")]
    Layout(String),

    /// Failure reported by a catalog repository.
    #[error("catalog error: {0}")]
    Catalog(String),

    /// Configuration failure.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),
}

/// Result type alias for arrangement operations.
pub type Result<T> = std::result::Result<T, ArrangeError>;
