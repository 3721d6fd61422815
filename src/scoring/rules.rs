//! Built-in scoring rules.
//!
//! # Categories
//!
//! - **Season**: exact season match, adjacent seasons
//! - **Composition**: note affinity, accord affinity
//! - **Wear time**: day/night by season, explicit time of day
//!
//! # Score Convention
//! All rules return non-negative bonuses; **higher score = more suitable**.

use super::{Score, ScoringContext, ScoringRule};
use crate::models::{CatalogItem, Season};

// ======================== Season rules ========================

/// +30 when the item is tagged with the context season.
#[derive(Debug, Clone, Copy)]
pub struct SeasonMatch;

impl SeasonMatch {
    pub const BONUS: Score = 30;
}

impl ScoringRule for SeasonMatch {
    fn name(&self) -> &'static str {
        "SEASON"
    }

    fn evaluate(&self, item: &CatalogItem, context: &ScoringContext) -> Score {
        if item.has_season(context.season.as_str()) {
            Self::BONUS
        } else {
            0
        }
    }

    fn description(&self) -> &'static str {
        "Exact season match"
    }
}

/// +15 for every item season adjacent to the context season.
#[derive(Debug, Clone, Copy)]
pub struct AdjacentSeason;

impl AdjacentSeason {
    pub const BONUS: Score = 15;
}

impl ScoringRule for AdjacentSeason {
    fn name(&self) -> &'static str {
        "ADJACENT"
    }

    fn evaluate(&self, item: &CatalogItem, context: &ScoringContext) -> Score {
        let neighbors = context.season.adjacent();
        let hits = item
            .seasons
            .iter()
            .filter(|tag| neighbors.iter().any(|n| n.as_str() == tag.as_str()))
            .count();
        hits as Score * Self::BONUS
    }

    fn description(&self) -> &'static str {
        "Adjacent season match"
    }
}

// ======================== Composition rules ========================

/// +2 for every note (any category) matching a seasonal note keyword.
#[derive(Debug, Clone, Copy)]
pub struct NoteAffinity;

impl NoteAffinity {
    pub const BONUS: Score = 2;
}

impl ScoringRule for NoteAffinity {
    fn name(&self) -> &'static str {
        "NOTES"
    }

    fn evaluate(&self, item: &CatalogItem, context: &ScoringContext) -> Score {
        let keywords = context.preferences.keywords(context.season);
        let hits = item
            .all_notes()
            .filter(|note| keywords.matches_note(note))
            .count();
        hits as Score * Self::BONUS
    }

    fn description(&self) -> &'static str {
        "Seasonal note affinity"
    }
}

/// +3 for every accord matching a seasonal accord keyword.
#[derive(Debug, Clone, Copy)]
pub struct AccordAffinity;

impl AccordAffinity {
    pub const BONUS: Score = 3;
}

impl ScoringRule for AccordAffinity {
    fn name(&self) -> &'static str {
        "ACCORDS"
    }

    fn evaluate(&self, item: &CatalogItem, context: &ScoringContext) -> Score {
        let keywords = context.preferences.keywords(context.season);
        let hits = item
            .accords
            .iter()
            .filter(|accord| keywords.matches_accord(accord))
            .count();
        hits as Score * Self::BONUS
    }

    fn description(&self) -> &'static str {
        "Seasonal accord affinity"
    }
}

// ======================== Wear-time rules ========================

/// +5 for "Day" items in Spring/Summer and "Night" items in Fall/Winter.
#[derive(Debug, Clone, Copy)]
pub struct SeasonalWearTime;

impl SeasonalWearTime {
    pub const BONUS: Score = 5;
}

impl ScoringRule for SeasonalWearTime {
    fn name(&self) -> &'static str {
        "WEAR_TIME"
    }

    fn evaluate(&self, item: &CatalogItem, context: &ScoringContext) -> Score {
        let mut score = 0;
        if item.has_time("Day") && context.season.is_warm() {
            score += Self::BONUS;
        }
        if item.has_time("Night") && matches!(context.season, Season::Fall | Season::Winter) {
            score += Self::BONUS;
        }
        score
    }

    fn description(&self) -> &'static str {
        "Day wear in warm seasons, night wear in cold seasons"
    }
}

/// +5 when the item is tagged with the context's explicit time of day.
///
/// Contributes nothing when the context has no time of day.
#[derive(Debug, Clone, Copy)]
pub struct TimeOfDayMatch;

impl TimeOfDayMatch {
    pub const BONUS: Score = 5;
}

impl ScoringRule for TimeOfDayMatch {
    fn name(&self) -> &'static str {
        "TIME_OF_DAY"
    }

    fn evaluate(&self, item: &CatalogItem, context: &ScoringContext) -> Score {
        match context.time_of_day {
            Some(time) if item.has_time(time.as_str()) => Self::BONUS,
            _ => 0,
        }
    }

    fn description(&self) -> &'static str {
        "Explicit time-of-day match"
    }
}
