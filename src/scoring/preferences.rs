//! Curated seasonal keyword tables.
//!
//! Each season lists note keywords and accord keywords. A note or accord
//! matches when its lowercase text contains any keyword, lowercased.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::Season;

/// Note and accord keywords for one season.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeasonKeywords {
    /// Note keywords.
    #[serde(default)]
    pub notes: Vec<String>,
    /// Accord keywords.
    #[serde(default)]
    pub accords: Vec<String>,
}

impl SeasonKeywords {
    fn from_static(notes: &[&str], accords: &[&str]) -> Self {
        Self {
            notes: notes.iter().map(|s| s.to_string()).collect(),
            accords: accords.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Whether a note contains any note keyword (case-insensitive).
    pub fn matches_note(&self, note: &str) -> bool {
        contains_any(note, &self.notes)
    }

    /// Whether an accord contains any accord keyword (case-insensitive).
    pub fn matches_accord(&self, accord: &str) -> bool {
        contains_any(accord, &self.accords)
    }
}

fn contains_any(text: &str, keywords: &[String]) -> bool {
    let text = text.to_lowercase();
    keywords
        .iter()
        .any(|keyword| text.contains(&keyword.to_lowercase()))
}

/// Keyword tables for all four seasons.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonalPreferences {
    tables: HashMap<Season, SeasonKeywords>,
}

impl SeasonalPreferences {
    /// Keywords for a season (empty if the table was cleared).
    pub fn keywords(&self, season: Season) -> &SeasonKeywords {
        static EMPTY: SeasonKeywords = SeasonKeywords {
            notes: Vec::new(),
            accords: Vec::new(),
        };
        self.tables.get(&season).unwrap_or(&EMPTY)
    }

    /// Replaces one season's table.
    pub fn with_season(mut self, season: Season, keywords: SeasonKeywords) -> Self {
        self.tables.insert(season, keywords);
        self
    }
}

impl Default for SeasonalPreferences {
    fn default() -> Self {
        let mut tables = HashMap::new();
        tables.insert(
            Season::Spring,
            SeasonKeywords::from_static(
                &[
                    "Citrus",
                    "Bergamot",
                    "Lemon",
                    "Neroli",
                    "Orange Blossom",
                    "Petitgrain",
                    "Grapefruit",
                    "Lavender",
                    "Rose",
                    "Green Apple",
                    "Mint",
                    "Basil",
                    "Grass",
                    "Green Tea",
                    "Jasmine",
                ],
                &[
                    "Citrus", "Fresh", "Green", "Aromatic", "Floral", "Light", "Aquatic", "Clean",
                ],
            ),
        );
        tables.insert(
            Season::Summer,
            SeasonKeywords::from_static(
                &[
                    "Coconut",
                    "Tiare Flower",
                    "Sea Salt",
                    "Marine",
                    "Aquatic",
                    "Melon",
                    "Peach",
                    "Lime",
                    "Mint",
                    "Lemon",
                    "Basil",
                    "Bergamot",
                    "Neroli",
                    "Orange Blossom",
                    "Jasmine",
                ],
                &[
                    "Aquatic", "Marine", "Fruity", "Fresh", "Citrus", "Tropical", "Solar", "Light",
                ],
            ),
        );
        tables.insert(
            Season::Fall,
            SeasonKeywords::from_static(
                &[
                    "Apple",
                    "Cinnamon",
                    "Cardamom",
                    "Clove",
                    "Nutmeg",
                    "Cedar",
                    "Sandalwood",
                    "Patchouli",
                    "Amber",
                    "Vanilla",
                    "Benzoin",
                    "Tobacco",
                    "Leather",
                    "Fig",
                    "Plum",
                ],
                &[
                    "Spicy", "Woody", "Oriental", "Sweet", "Gourmand", "Warm", "Amber", "Earthy",
                ],
            ),
        );
        tables.insert(
            Season::Winter,
            SeasonKeywords::from_static(
                &[
                    "Vanilla",
                    "Tonka Bean",
                    "Amber",
                    "Benzoin",
                    "Incense",
                    "Oud",
                    "Frankincense",
                    "Myrrh",
                    "Leather",
                    "Tobacco",
                    "Cinnamon",
                    "Clove",
                    "Pine",
                    "Coffee",
                    "Chocolate",
                ],
                &[
                    "Warm", "Sweet", "Oriental", "Gourmand", "Spicy", "Resinous", "Woody",
                    "Balsamic",
                ],
            ),
        );
        Self { tables }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substring_match_is_case_insensitive() {
        let prefs = SeasonalPreferences::default();
        let spring = prefs.keywords(Season::Spring);
        assert!(spring.matches_note("Sicilian LEMON"));
        assert!(spring.matches_note("bergamot"));
        assert!(!spring.matches_note("Oud"));
        assert!(spring.matches_accord("fresh spicy"));
        assert!(!spring.matches_accord("Leather"));
    }

    #[test]
    fn test_override_season() {
        let prefs = SeasonalPreferences::default().with_season(
            Season::Winter,
            SeasonKeywords {
                notes: vec!["Snow".into()],
                accords: vec![],
            },
        );
        let winter = prefs.keywords(Season::Winter);
        assert!(winter.matches_note("Snowdrop"));
        assert!(!winter.matches_note("Vanilla"));
        assert!(!winter.matches_accord("Warm"));
        // Other seasons untouched.
        assert!(prefs.keywords(Season::Fall).matches_note("Vanilla"));
    }
}
