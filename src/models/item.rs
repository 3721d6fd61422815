//! Catalog item model.
//!
//! A catalog item is one bottle: identity, display metadata, its current
//! slot, and the tag sets used for scoring. Items are inputs; the core
//! never edits their tags, it only produces copies with new positions.

use serde::{Deserialize, Serialize};

use super::Position;

/// A catalog item occupying one slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Opaque identifier (catalog page id).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Owning house (brand).
    pub house: String,
    /// Current slot.
    pub position: Position,
    /// Season tags ("Spring", "Summer", ...).
    pub seasons: Vec<String>,
    /// Accord tags.
    pub accords: Vec<String>,
    /// General notes.
    pub notes: Vec<String>,
    /// Top notes.
    pub top_notes: Vec<String>,
    /// Middle (heart) notes.
    pub middle_notes: Vec<String>,
    /// Base notes.
    pub base_notes: Vec<String>,
    /// Time-of-day tags ("Day", "Night").
    pub time: Vec<String>,
}

impl CatalogItem {
    /// Creates an untagged item at the unassigned position.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            house: String::new(),
            position: Position::UNASSIGNED,
            seasons: Vec::new(),
            accords: Vec::new(),
            notes: Vec::new(),
            top_notes: Vec::new(),
            middle_notes: Vec::new(),
            base_notes: Vec::new(),
            time: Vec::new(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the house.
    pub fn with_house(mut self, house: impl Into<String>) -> Self {
        self.house = house.into();
        self
    }

    /// Sets the current position.
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Sets the current position from its components.
    pub fn at(self, plane: u32, row: u32, column: u32) -> Self {
        self.with_position(Position::new(plane, row, column))
    }

    /// Adds a season tag.
    pub fn with_season(mut self, season: impl Into<String>) -> Self {
        self.seasons.push(season.into());
        self
    }

    /// Adds an accord tag.
    pub fn with_accord(mut self, accord: impl Into<String>) -> Self {
        self.accords.push(accord.into());
        self
    }

    /// Adds a general note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Adds a top note.
    pub fn with_top_note(mut self, note: impl Into<String>) -> Self {
        self.top_notes.push(note.into());
        self
    }

    /// Adds a middle note.
    pub fn with_middle_note(mut self, note: impl Into<String>) -> Self {
        self.middle_notes.push(note.into());
        self
    }

    /// Adds a base note.
    pub fn with_base_note(mut self, note: impl Into<String>) -> Self {
        self.base_notes.push(note.into());
        self
    }

    /// Adds a time-of-day tag.
    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time.push(time.into());
        self
    }

    /// All notes across the four note categories.
    pub fn all_notes(&self) -> impl Iterator<Item = &str> {
        self.notes
            .iter()
            .chain(&self.top_notes)
            .chain(&self.middle_notes)
            .chain(&self.base_notes)
            .map(String::as_str)
    }

    /// Whether the item carries the given season tag (exact match).
    pub fn has_season(&self, season: &str) -> bool {
        self.seasons.iter().any(|s| s == season)
    }

    /// Whether the item carries the given time tag (exact match).
    pub fn has_time(&self, time: &str) -> bool {
        self.time.iter().any(|t| t == time)
    }

    /// A copy of this item placed at `position`.
    pub fn moved_to(&self, position: Position) -> Self {
        Self {
            position,
            ..self.clone()
        }
    }
}
