//! Seasonal scoring of catalog items.
//!
//! Provides additive scoring rules (season, notes, accords, wear time)
//! and a scorer that sums them into one integer desirability score.
//!
//! # Usage
//!
//! ```
//! use u_arrange::models::{CatalogItem, Season};
//! use u_arrange::scoring::{score, ScoringContext};
//!
//! let item = CatalogItem::new("p1")
//!     .with_season("Summer")
//!     .with_accord("Aquatic")
//!     .with_time("Day");
//! let context = ScoringContext::for_season(Season::Summer);
//! assert_eq!(score(&item, &context), 30 + 3 + 5);
//! ```

mod context;
mod preferences;
pub mod rules;

pub use context::ScoringContext;
pub use preferences::{SeasonKeywords, SeasonalPreferences};

use std::fmt::Debug;
use std::sync::Arc;

use crate::models::CatalogItem;

/// Score returned by a scoring rule.
///
/// **Higher score = more suitable** (placed in lower-numbered rows).
/// Scores are unnormalized and unbounded above.
pub type Score = i32;

/// A rule contributing an additive bonus to an item's score.
pub trait ScoringRule: Send + Sync + Debug {
    /// Rule name (e.g., "SEASON", "NOTES").
    fn name(&self) -> &'static str;

    /// Bonus awarded to the item in this context.
    fn evaluate(&self, item: &CatalogItem, context: &ScoringContext) -> Score;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// Additive composition of scoring rules.
#[derive(Clone)]
pub struct SeasonalScorer {
    rules: Vec<Arc<dyn ScoringRule>>,
}

impl SeasonalScorer {
    /// Creates a scorer with no rules (every item scores 0).
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// The standard rule set: season match, adjacent seasons, note and
    /// accord affinity, seasonal wear time, and explicit time of day.
    pub fn standard() -> Self {
        Self::new()
            .with_rule(rules::SeasonMatch)
            .with_rule(rules::AdjacentSeason)
            .with_rule(rules::NoteAffinity)
            .with_rule(rules::AccordAffinity)
            .with_rule(rules::SeasonalWearTime)
            .with_rule(rules::TimeOfDayMatch)
    }

    /// Adds a rule.
    pub fn with_rule<R: ScoringRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Total score of an item.
    pub fn score(&self, item: &CatalogItem, context: &ScoringContext) -> Score {
        self.rules
            .iter()
            .map(|rule| rule.evaluate(item, context))
            .sum()
    }

    /// Per-rule breakdown of an item's score.
    pub fn breakdown(
        &self,
        item: &CatalogItem,
        context: &ScoringContext,
    ) -> Vec<(&'static str, Score)> {
        self.rules
            .iter()
            .map(|rule| (rule.name(), rule.evaluate(item, context)))
            .collect()
    }
}

impl Default for SeasonalScorer {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for SeasonalScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeasonalScorer")
            .field(
                "rules",
                &self.rules.iter().map(|r| r.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Scores an item with the standard rule set.
pub fn score(item: &CatalogItem, context: &ScoringContext) -> Score {
    SeasonalScorer::standard().score(item, context)
}
