//! Scoring context for rule evaluation.

use std::sync::Arc;

use super::SeasonalPreferences;
use crate::models::{Season, TimeOfDay};

/// Context passed to scoring rules.
///
/// Holds the target season, an optional time of day, and the keyword
/// tables used by the note and accord rules.
#[derive(Debug, Clone)]
pub struct ScoringContext {
    /// Season the arrangement is optimized for.
    pub season: Season,
    /// Preferred wear time. `None` disables the time-of-day rule.
    pub time_of_day: Option<TimeOfDay>,
    /// Curated note/accord keywords per season.
    pub preferences: Arc<SeasonalPreferences>,
}

impl ScoringContext {
    /// Context for a season with the default keyword tables.
    pub fn for_season(season: Season) -> Self {
        Self {
            season,
            time_of_day: None,
            preferences: Arc::new(SeasonalPreferences::default()),
        }
    }

    /// Context for the season of a calendar month (1 = January).
    pub fn for_month(month: u32) -> Self {
        Self::for_season(Season::from_month(month))
    }

    /// Sets the preferred time of day.
    pub fn with_time_of_day(mut self, time_of_day: TimeOfDay) -> Self {
        self.time_of_day = Some(time_of_day);
        self
    }

    /// Replaces the keyword tables.
    pub fn with_preferences(mut self, preferences: SeasonalPreferences) -> Self {
        self.preferences = Arc::new(preferences);
        self
    }
}
