//! Optimizer configuration.
//!
//! Load planning settings from TOML to choose the plane, equivalence mode
//! and column policy, describe the rack layout, and override seasonal
//! keyword tables without code changes.
//!
//! ```
//! use u_arrange::config::ArrangeConfig;
//! use u_arrange::permutation::SlotEquivalence;
//!
//! let config = ArrangeConfig::from_toml_str(r#"
//!     plane = 2
//!     equivalence = "row_only"
//!
//!     [racks]
//!     R1 = "(4,30)"
//!
//!     [planes]
//!     2 = "R1"
//! "#).unwrap();
//!
//! assert_eq!(config.plane, 2);
//! assert_eq!(config.equivalence, SlotEquivalence::RowOnly);
//! assert_eq!(config.layout().unwrap().slots().len(), 120);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

use crate::assigner::ColumnPolicy;
use crate::layout::RackLayout;
use crate::models::Season;
use crate::permutation::SlotEquivalence;
use crate::scoring::{SeasonKeywords, SeasonalPreferences};

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Planning configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ArrangeConfig {
    /// Plane to optimize.
    #[serde(default = "default_plane")]
    pub plane: u32,

    /// When an item counts as already in place.
    #[serde(default)]
    pub equivalence: SlotEquivalence,

    /// How target columns are chosen.
    #[serde(default)]
    pub column_policy: ColumnPolicy,

    /// Fail on broken cycles instead of logging them.
    #[serde(default)]
    pub strict_cycles: bool,

    /// Minimum score for an item to count as suitable in summaries.
    #[serde(default = "default_suitable_threshold")]
    pub suitable_threshold: i32,

    /// Rack definitions by id, e.g. `R1 = "(4,30)"`.
    #[serde(default)]
    pub racks: BTreeMap<String, String>,

    /// Plane definitions by plane number, e.g. `1 = "R1xR2"`.
    #[serde(default)]
    pub planes: BTreeMap<String, String>,

    /// Keyword overrides by season name, e.g. `[preferences.Winter]`.
    #[serde(default)]
    pub preferences: BTreeMap<String, SeasonKeywords>,
}

fn default_plane() -> u32 {
    1
}

fn default_suitable_threshold() -> i32 {
    30
}

impl Default for ArrangeConfig {
    fn default() -> Self {
        Self {
            plane: default_plane(),
            equivalence: SlotEquivalence::default(),
            column_policy: ColumnPolicy::default(),
            strict_cycles: false,
            suitable_threshold: default_suitable_threshold(),
            racks: BTreeMap::new(),
            planes: BTreeMap::new(),
            preferences: BTreeMap::new(),
        }
    }
}

impl ArrangeConfig {
    /// Creates a default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist, contains invalid TOML, or
    /// fails [`validate`](Self::validate).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks semantic constraints serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.plane == 0 {
            return Err(ConfigError::Invalid("plane numbers start at 1".into()));
        }
        let planes = self.plane_definitions()?;
        if !planes.is_empty() && !planes.contains_key(&self.plane) {
            return Err(ConfigError::Invalid(format!(
                "plane {} has no layout definition",
                self.plane
            )));
        }
        self.layout()?;
        self.preferences()?;
        Ok(())
    }

    /// Sets the plane.
    pub fn with_plane(mut self, plane: u32) -> Self {
        self.plane = plane;
        self
    }

    /// Sets the slot equivalence.
    pub fn with_equivalence(mut self, equivalence: SlotEquivalence) -> Self {
        self.equivalence = equivalence;
        self
    }

    /// Sets the column policy.
    pub fn with_column_policy(mut self, policy: ColumnPolicy) -> Self {
        self.column_policy = policy;
        self
    }

    /// Enables or disables strict cycle handling.
    pub fn with_strict_cycles(mut self, strict: bool) -> Self {
        self.strict_cycles = strict;
        self
    }

    /// Adds a rack definition.
    pub fn with_rack(mut self, id: impl Into<String>, definition: impl Into<String>) -> Self {
        self.racks.insert(id.into(), definition.into());
        self
    }

    /// Adds a plane definition.
    pub fn with_plane_definition(mut self, plane: u32, definition: impl Into<String>) -> Self {
        self.planes.insert(plane.to_string(), definition.into());
        self
    }

    /// Plane definitions keyed by parsed plane number.
    fn plane_definitions(&self) -> Result<BTreeMap<u32, String>, ConfigError> {
        self.planes
            .iter()
            .map(|(key, definition)| {
                key.trim()
                    .parse::<u32>()
                    .map(|plane| (plane, definition.clone()))
                    .map_err(|_| ConfigError::Invalid(format!("plane key '{key}' is not a number")))
            })
            .collect()
    }

    /// Builds the rack layout (empty when no planes are defined).
    pub fn layout(&self) -> Result<RackLayout, ConfigError> {
        RackLayout::from_definitions(&self.racks, &self.plane_definitions()?)
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Default keyword tables with this configuration's overrides applied.
    pub fn preferences(&self) -> Result<SeasonalPreferences, ConfigError> {
        self.preferences
            .iter()
            .try_fold(SeasonalPreferences::default(), |prefs, (name, keywords)| {
                let season: Season = name.parse().map_err(ConfigError::Invalid)?;
                Ok(prefs.with_season(season, keywords.clone()))
            })
    }
}
