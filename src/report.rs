//! Human-readable swap reports and seasonal summaries.
//!
//! Swaps are grouped by destination row for reading, but each keeps its
//! execution step number: the plan must still be carried out in step
//! order, since later swaps assume earlier ones were done.

use rand::Rng;
use std::collections::BTreeMap;
use std::fmt;
use std::fmt::Write as _;

use crate::assigner::RankedItem;
use crate::models::{CatalogItem, Season, SwapOp};
use crate::scoring::Score;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Length of the random suffix of a plan version.
pub const VERSION_SUFFIX_LEN: usize = 6;

/// Number of entries in each end of a [`SeasonalSummary`].
pub const SUMMARY_EXTREMES: usize = 5;

/// Builds a plan version stamp: `"{timestamp}-{6 base36 chars}"`.
///
/// The timestamp is caller-supplied so reports stay reproducible in tests.
pub fn plan_version<R: Rng + ?Sized>(timestamp: &str, rng: &mut R) -> String {
    let suffix: String = (0..VERSION_SUFFIX_LEN)
        .map(|_| char::from(BASE36[rng.random_range(0..BASE36.len())]))
        .collect();
    format!("{timestamp}-{suffix}")
}

/// Formats a swap plan.
pub fn format_swap_plan(plan: &[SwapOp], season: Season, year: i32) -> String {
    SwapReport::new(season, year).render(plan)
}

/// Swap report builder.
#[derive(Debug, Clone)]
pub struct SwapReport {
    season: Season,
    year: i32,
    plane: Option<u32>,
    version: Option<String>,
}

impl SwapReport {
    /// Report for the given season and year.
    pub fn new(season: Season, year: i32) -> Self {
        Self {
            season,
            year,
            plane: None,
            version: None,
        }
    }

    /// Marks the report as covering a single plane.
    pub fn with_plane(mut self, plane: u32) -> Self {
        self.plane = Some(plane);
        self
    }

    /// Adds a version line at the top.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Renders the plan.
    pub fn render(&self, plan: &[SwapOp]) -> String {
        let mut out = String::new();
        self.write_to(&mut out, plan).ok();
        out
    }

    fn write_to(&self, out: &mut String, plan: &[SwapOp]) -> fmt::Result {
        if let Some(version) = &self.version {
            writeln!(out, "VERSION: {version}")?;
            writeln!(out)?;
        }

        write!(out, "Seasonal Swap Plan - {} {}", self.season, self.year)?;
        if let Some(plane) = self.plane {
            write!(out, " - PLANE {plane} ONLY")?;
        }
        writeln!(out)?;
        writeln!(out)?;
        writeln!(out, "Total swaps needed: {}", plan.len())?;
        writeln!(out)?;

        writeln!(out, "ROW PREFERENCE ORDER:")?;
        writeln!(out, "Row 1: Most preferred/accessible (front)")?;
        writeln!(out, "...")?;
        writeln!(out, "Higher rows: Less preferred/accessible (back)")?;
        writeln!(out)?;
        writeln!(out, "Steps are numbered in execution order; perform them in that order.")?;
        writeln!(out)?;

        writeln!(out, "SWAP PLAN:")?;
        writeln!(out)?;
        let mut by_row: BTreeMap<u32, Vec<(usize, &SwapOp)>> = BTreeMap::new();
        for (i, swap) in plan.iter().enumerate() {
            by_row.entry(swap.to.position.row).or_default().push((i + 1, swap));
        }
        for (row, swaps) in &by_row {
            writeln!(out, "ROW {row} SWAPS:")?;
            for (step, swap) in swaps {
                writeln!(
                    out,
                    "{step}. From: {} ({}) - Column {}, Row {}",
                    swap.from.name,
                    swap.from.house,
                    swap.from.position.column,
                    swap.from.position.row
                )?;
                writeln!(
                    out,
                    "   To: {} ({}) - Column {}, Row {}",
                    swap.to.name,
                    swap.to.house,
                    swap.to.position.column,
                    swap.to.position.row
                )?;
                writeln!(out)?;
            }
        }

        write!(
            out,
            "Notes: This plan uses the fewest possible swaps. The items best suited to {} \
             end up in the front rows; less suitable items move toward the back.",
            self.season
        )
    }
}

/// One item in a [`SeasonalSummary`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryEntry {
    pub item_id: String,
    pub name: String,
    pub house: String,
    pub score: Score,
}

/// Seasonal analysis of a ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonalSummary {
    pub season: Season,
    pub threshold: Score,
    /// Items scoring at or above the threshold.
    pub suitable: usize,
    /// Items scoring below the threshold.
    pub less_suitable: usize,
    /// Highest-ranked items, best first.
    pub top: Vec<SummaryEntry>,
    /// Lowest-ranked items, in ranking order.
    pub bottom: Vec<SummaryEntry>,
}

impl SeasonalSummary {
    /// Summarizes a ranking over `items` (as returned by the assigner).
    pub fn from_ranking(
        items: &[CatalogItem],
        ranking: &[RankedItem],
        season: Season,
        threshold: Score,
    ) -> Self {
        let entries: Vec<SummaryEntry> = ranking
            .iter()
            .filter_map(|ranked| {
                items.get(ranked.index).map(|item| SummaryEntry {
                    item_id: item.id.clone(),
                    name: item.name.clone(),
                    house: item.house.clone(),
                    score: ranked.score,
                })
            })
            .collect();
        let suitable = entries.iter().filter(|e| e.score >= threshold).count();
        let bottom_start = entries.len().saturating_sub(SUMMARY_EXTREMES);
        Self {
            season,
            threshold,
            suitable,
            less_suitable: entries.len() - suitable,
            top: entries.iter().take(SUMMARY_EXTREMES).cloned().collect(),
            bottom: entries[bottom_start..].to_vec(),
        }
    }
}

impl fmt::Display for SeasonalSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Seasonal Analysis:")?;
        writeln!(f, "{} items are suitable for {}", self.suitable, self.season)?;
        writeln!(f, "{} items are less suitable for {}", self.less_suitable, self.season)?;
        writeln!(f)?;
        writeln!(f, "Top {} Most Suitable:", self.top.len())?;
        for e in &self.top {
            writeln!(f, "{} ({}) - Score: {}", e.name, e.house, e.score)?;
        }
        writeln!(f)?;
        writeln!(f, "Bottom {} Least Suitable:", self.bottom.len())?;
        for e in &self.bottom {
            writeln!(f, "{} ({}) - Score: {}", e.name, e.house, e.score)?;
        }
        Ok(())
    }
}
