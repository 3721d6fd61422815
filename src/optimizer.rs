//! End-to-end arrangement pipeline.
//!
//! # Algorithm
//!
//! 1. Keep the items on the configured plane.
//! 2. Rank and assign target slots (row priority, column policy).
//! 3. Decompose current → target into cycles under the configured slot
//!    equivalence; strict mode rejects broken cycles.
//! 4. Generate the swap plan and check it against the cycle minimum.
//! 5. Summarize how well the collection suits the season.
//!
//! # Complexity
//! O(n log n) for ranking, O(n) for decomposition and plan generation.

use tracing::{info, warn};

use crate::assigner::{RankedItem, SlotAssigner};
use crate::config::ArrangeConfig;
use crate::error::Result;
use crate::models::{Arrangement, CatalogItem, SwapOp};
use crate::permutation::{CycleDecomposition, PermutationDiffEngine};
use crate::plan::{validate_swap_plan, PlanValidation, SwapPlanGenerator};
use crate::report::{SeasonalSummary, SwapReport};
use crate::scoring::{ScoringContext, SeasonalScorer};

/// Everything computed for one plane.
#[derive(Debug, Clone)]
pub struct OptimizationOutcome {
    /// Items on the plane, in input order.
    pub current: Vec<CatalogItem>,
    /// Target arrangement, paired by index with `current`.
    pub target: Arrangement,
    /// Items ranked best first.
    pub ranking: Vec<RankedItem>,
    /// Cycle structure of current → target.
    pub decomposition: CycleDecomposition,
    /// Ordered swaps.
    pub plan: Vec<SwapOp>,
    /// Plan length vs. minimum.
    pub validation: PlanValidation,
    /// Seasonal analysis.
    pub summary: SeasonalSummary,
    plane: u32,
}

impl OptimizationOutcome {
    /// Minimum number of swaps.
    pub fn minimum_swaps(&self) -> usize {
        self.decomposition.minimum_swaps()
    }

    /// Plane the outcome covers.
    pub fn plane(&self) -> u32 {
        self.plane
    }

    /// Report builder for this outcome's plane and season.
    pub fn report(&self, year: i32) -> SwapReport {
        SwapReport::new(self.summary.season, year).with_plane(self.plane)
    }
}

/// Runs the full pipeline from a catalog snapshot to a swap plan.
///
/// # Example
///
/// ```
/// use u_arrange::config::ArrangeConfig;
/// use u_arrange::models::{CatalogItem, Season};
/// use u_arrange::optimizer::ArrangementOptimizer;
/// use u_arrange::scoring::ScoringContext;
///
/// let items = vec![
///     CatalogItem::new("cold").with_season("Winter").at(1, 1, 1),
///     CatalogItem::new("warm").with_season("Summer").at(1, 2, 1),
/// ];
/// let outcome = ArrangementOptimizer::new(ArrangeConfig::default())
///     .optimize(&items, &ScoringContext::for_season(Season::Summer))
///     .unwrap();
/// assert_eq!(outcome.plan.len(), 1);
/// assert!(outcome.validation.valid);
/// ```
#[derive(Debug, Clone)]
pub struct ArrangementOptimizer {
    config: ArrangeConfig,
    scorer: SeasonalScorer,
}

impl ArrangementOptimizer {
    /// Creates an optimizer with the standard scorer.
    pub fn new(config: ArrangeConfig) -> Self {
        Self {
            config,
            scorer: SeasonalScorer::standard(),
        }
    }

    /// Replaces the scorer.
    pub fn with_scorer(mut self, scorer: SeasonalScorer) -> Self {
        self.scorer = scorer;
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &ArrangeConfig {
        &self.config
    }

    /// Computes target, plan and summary for the configured plane.
    ///
    /// Keyword overrides from the configuration replace the context's
    /// tables for the seasons they name.
    ///
    /// # Errors
    /// - `Config` if keyword overrides name an unknown season.
    /// - Assignment errors (`DuplicatePosition`, `TargetCollision`).
    /// - `BrokenCycle` in strict mode.
    pub fn optimize(
        &self,
        items: &[CatalogItem],
        context: &ScoringContext,
    ) -> Result<OptimizationOutcome> {
        let plane = self.config.plane;
        let context = if self.config.preferences.is_empty() {
            context.clone()
        } else {
            context.clone().with_preferences(self.config.preferences()?)
        };

        let current: Vec<CatalogItem> = items
            .iter()
            .filter(|item| item.position.plane == plane)
            .cloned()
            .collect();
        info!(
            plane,
            items = current.len(),
            excluded = items.len() - current.len(),
            season = %context.season,
            "optimizing arrangement"
        );

        let assigner = SlotAssigner::new()
            .with_scorer(self.scorer.clone())
            .with_column_policy(self.config.column_policy);
        let ranking = assigner.rank(&current, &context);
        let target = assigner.assign(&current, &context)?;

        let engine = PermutationDiffEngine::new().with_equivalence(self.config.equivalence);
        let mut decomposition = engine.decompose(&current, &target)?;
        if self.config.strict_cycles {
            decomposition = decomposition.into_strict()?;
        }

        let plan = SwapPlanGenerator::new().generate_from(&current, &decomposition);
        let validation = validate_swap_plan(&plan, decomposition.minimum_swaps());
        if validation.valid {
            info!(swaps = plan.len(), "{}", validation.message);
        } else {
            warn!(
                swaps = plan.len(),
                minimum = decomposition.minimum_swaps(),
                "{}",
                validation.message
            );
        }

        let summary = SeasonalSummary::from_ranking(
            &current,
            &ranking,
            context.season,
            self.config.suitable_threshold,
        );

        Ok(OptimizationOutcome {
            current,
            target,
            ranking,
            decomposition,
            plan,
            validation,
            summary,
            plane,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assigner::ColumnPolicy;
    use crate::error::ArrangeError;
    use crate::models::{Position, Season};
    use crate::permutation::SlotEquivalence;
    use crate::plan::apply_swaps;
    use crate::scoring::SeasonKeywords;

    fn shelf() -> Vec<CatalogItem> {
        vec![
            CatalogItem::new("a").with_season("Winter").at(1, 1, 1),
            CatalogItem::new("b").at(1, 1, 2),
            CatalogItem::new("c").with_season("Summer").at(1, 2, 1),
            CatalogItem::new("d")
                .with_season("Summer")
                .with_season("Spring")
                .at(1, 2, 2),
            CatalogItem::new("e").with_season("Summer").at(2, 1, 1),
        ]
    }

    fn summer() -> ScoringContext {
        ScoringContext::for_season(Season::Summer)
    }

    #[test]
    fn test_optimize_full_position() {
        let outcome = ArrangementOptimizer::new(ArrangeConfig::default())
            .optimize(&shelf(), &summer())
            .unwrap();

        assert_eq!(outcome.plane(), 1);
        assert_eq!(outcome.current.len(), 4);
        assert!(outcome.current.iter().all(|i| i.id != "e"));

        // d (45) and c (30) take the front row.
        let front: Vec<&str> = outcome
            .target
            .iter()
            .filter(|i| i.position.row == 1)
            .map(|i| i.id.as_str())
            .collect();
        assert_eq!(front, vec!["c", "d"]);

        // a → c's slot → b's slot → d's slot → a's slot: one 4-cycle.
        assert_eq!(outcome.minimum_swaps(), 3);
        assert_eq!(outcome.plan.len(), 3);
        assert!(outcome.validation.valid);

        let replayed = apply_swaps(&outcome.current, &outcome.plan).unwrap();
        assert_eq!(replayed.positions(), outcome.target.positions());
    }

    #[test]
    fn test_optimize_row_only() {
        let config = ArrangeConfig::default().with_equivalence(SlotEquivalence::RowOnly);
        let outcome = ArrangementOptimizer::new(config)
            .optimize(&shelf(), &summer())
            .unwrap();

        assert_eq!(outcome.plan.len(), outcome.minimum_swaps());
        assert!(outcome.validation.valid);
        let replayed = apply_swaps(&outcome.current, &outcome.plan).unwrap();
        for (item, target) in replayed.iter().zip(outcome.target.iter()) {
            assert_eq!(item.position.row, target.position.row);
        }
        // Two items swap rows pairwise: two 2-cycles.
        assert_eq!(outcome.minimum_swaps(), 2);
    }

    #[test]
    fn test_summary_and_report() {
        let outcome = ArrangementOptimizer::new(ArrangeConfig::default())
            .optimize(&shelf(), &summer())
            .unwrap();

        assert_eq!(outcome.summary.season, Season::Summer);
        assert_eq!(outcome.summary.suitable, 2);
        assert_eq!(outcome.summary.less_suitable, 2);
        assert_eq!(outcome.summary.top[0].item_id, "d");
        assert_eq!(outcome.summary.top[0].score, 45);

        let text = outcome.report(2026).render(&outcome.plan);
        assert!(text.contains("Summer 2026 - PLANE 1 ONLY"));
        assert!(text.contains("Total swaps needed: 3"));
    }

    #[test]
    fn test_other_plane() {
        let outcome = ArrangementOptimizer::new(ArrangeConfig::default().with_plane(2))
            .optimize(&shelf(), &summer())
            .unwrap();
        assert_eq!(outcome.current.len(), 1);
        assert!(outcome.plan.is_empty());
        assert!(outcome.validation.valid);
    }

    #[test]
    fn test_empty_plane() {
        let outcome = ArrangementOptimizer::new(ArrangeConfig::default().with_plane(3))
            .optimize(&shelf(), &summer())
            .unwrap();
        assert!(outcome.current.is_empty());
        assert!(outcome.plan.is_empty());
        assert_eq!(outcome.minimum_swaps(), 0);
    }

    #[test]
    fn test_preserve_policy_collision() {
        // a and b share column 1 in different rows; both rank into row 1.
        let items = vec![
            CatalogItem::new("a").with_season("Summer").at(1, 1, 1),
            CatalogItem::new("b").with_season("Summer").at(1, 2, 1),
            CatalogItem::new("c").at(1, 1, 2),
            CatalogItem::new("d").at(1, 2, 2),
        ];
        let config = ArrangeConfig::default()
            .with_column_policy(ColumnPolicy::Preserve)
            .with_strict_cycles(true);
        let err = ArrangementOptimizer::new(config)
            .optimize(&items, &summer())
            .unwrap_err();
        assert!(matches!(err, ArrangeError::TargetCollision { .. }));
    }

    #[test]
    fn test_keyword_overrides() {
        let mut config = ArrangeConfig::default();
        config.preferences.insert(
            "summer".into(),
            SeasonKeywords {
                notes: vec!["oud".into()],
                accords: Vec::new(),
            },
        );
        let items = vec![
            CatalogItem::new("plain").at(1, 1, 1),
            CatalogItem::new("oud").with_note("Oud").at(1, 2, 1),
        ];
        let outcome = ArrangementOptimizer::new(config)
            .optimize(&items, &summer())
            .unwrap();
        assert_eq!(outcome.ranking[0].index, 1);
        assert_eq!(outcome.target[1].position, Position::new(1, 1, 1));
        assert_eq!(outcome.plan.len(), 1);
    }

    #[test]
    fn test_bad_override_is_config_error() {
        let mut config = ArrangeConfig::default();
        config
            .preferences
            .insert("monsoon".into(), SeasonKeywords::default());
        let err = ArrangementOptimizer::new(config)
            .optimize(&shelf(), &summer())
            .unwrap_err();
        assert!(matches!(err, ArrangeError::Config(_)));
    }
}
