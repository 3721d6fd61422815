//! Season and time-of-day tags.
//!
//! Seasons form a fixed circular adjacency graph:
//! Spring ↔ Summer ↔ Fall ↔ Winter ↔ Spring.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the four seasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    /// All seasons in cycle order.
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Fall, Season::Winter];

    /// Canonical tag text (matches catalog season tags exactly).
    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
            Season::Winter => "Winter",
        }
    }

    /// The two neighbors on the season cycle.
    pub fn adjacent(&self) -> [Season; 2] {
        match self {
            Season::Spring => [Season::Summer, Season::Winter],
            Season::Summer => [Season::Spring, Season::Fall],
            Season::Fall => [Season::Summer, Season::Winter],
            Season::Winter => [Season::Fall, Season::Spring],
        }
    }

    /// Whether `other` neighbors this season.
    pub fn is_adjacent_to(&self, other: Season) -> bool {
        self.adjacent().contains(&other)
    }

    /// Whether daytime wear is favored (Spring, Summer).
    pub fn is_warm(&self) -> bool {
        matches!(self, Season::Spring | Season::Summer)
    }

    /// Northern-hemisphere season for a calendar month (1 = January).
    ///
    /// Months outside 1..=12 fall through to Winter.
    pub fn from_month(month: u32) -> Self {
        match month {
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            9..=11 => Season::Fall,
            _ => Season::Winter,
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Season {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "spring" => Ok(Season::Spring),
            "summer" => Ok(Season::Summer),
            "fall" | "autumn" => Ok(Season::Fall),
            "winter" => Ok(Season::Winter),
            other => Err(format!("unknown season '{other}'")),
        }
    }
}

/// Time-of-day wear tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeOfDay {
    Day,
    Night,
}

impl TimeOfDay {
    /// Canonical tag text.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::Day => "Day",
            TimeOfDay::Night => "Night",
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
