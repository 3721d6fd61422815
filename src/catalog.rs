//! Catalog service boundary.
//!
//! The planning core never talks to the catalog service. Callers fetch
//! items through a [`CatalogRepository`], plan in memory, and hand the
//! plan to a [`PlanWriter`] that applies swaps one at a time.
//!
//! Raw records are mapped to [`CatalogItem`]s here, and only here:
//! missing tag collections become empty, missing or non-numeric
//! coordinates become 0.

use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize, Serializer};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{ArrangeError, Result};
use crate::models::{Arrangement, CatalogItem, Position, SwapOp};

/// A coordinate as it arrives from the catalog.
///
/// Deserialization never fails: values that are not a number or text
/// land in `Other` and read as 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coordinate {
    Number(i64),
    Float(f64),
    Text(String),
    #[serde(serialize_with = "serialize_unknown")]
    Other(IgnoredAny),
}

impl Coordinate {
    /// Numeric value; negative, non-numeric or out-of-range values map to 0.
    /// Fractions are truncated.
    pub fn value(&self) -> u32 {
        match self {
            Coordinate::Number(n) => u32::try_from(*n).unwrap_or(0),
            Coordinate::Float(f) => truncate(*f),
            Coordinate::Text(s) => {
                let s = s.trim();
                s.parse()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().map(truncate))
                    .unwrap_or(0)
            }
            Coordinate::Other(_) => 0,
        }
    }
}

fn truncate(f: f64) -> u32 {
    if f.is_finite() && f >= 0.0 && f <= f64::from(u32::MAX) {
        f.trunc() as u32
    } else {
        0
    }
}

fn serialize_unknown<S: Serializer>(
    _: &IgnoredAny,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_none()
}

/// A catalog record before defaults are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CatalogRecord {
    pub id: String,
    pub name: Option<String>,
    pub house: Option<String>,
    /// `plane-column-row`; takes precedence over the numeric fields.
    pub location: Option<String>,
    pub plane: Option<Coordinate>,
    pub row: Option<Coordinate>,
    pub column: Option<Coordinate>,
    pub seasons: Option<Vec<String>>,
    pub accords: Option<Vec<String>>,
    pub notes: Option<Vec<String>>,
    pub top_notes: Option<Vec<String>>,
    pub middle_notes: Option<Vec<String>>,
    pub base_notes: Option<Vec<String>>,
    pub time: Option<Vec<String>>,
    /// Excluded from arrangement when set.
    pub ignore: bool,
}

impl CatalogRecord {
    /// Slot of the record after defaults.
    pub fn position(&self) -> Position {
        match self.location.as_deref() {
            Some(location) if !location.trim().is_empty() => Position::from_location(location),
            _ => Position::new(
                coordinate(&self.plane),
                coordinate(&self.row),
                coordinate(&self.column),
            ),
        }
    }

    /// Maps the record to an item, applying documented defaults.
    pub fn into_item(self) -> CatalogItem {
        let position = self.position();
        CatalogItem {
            id: self.id,
            name: self.name.unwrap_or_else(|| "(No name)".to_string()),
            house: self.house.unwrap_or_else(|| "Unknown House".to_string()),
            position,
            seasons: self.seasons.unwrap_or_default(),
            accords: self.accords.unwrap_or_default(),
            notes: self.notes.unwrap_or_default(),
            top_notes: self.top_notes.unwrap_or_default(),
            middle_notes: self.middle_notes.unwrap_or_default(),
            base_notes: self.base_notes.unwrap_or_default(),
            time: self.time.unwrap_or_default(),
        }
    }
}

fn coordinate(value: &Option<Coordinate>) -> u32 {
    value.as_ref().map(Coordinate::value).unwrap_or(0)
}

/// Maps records to items, dropping ignored ones.
pub fn map_records(records: impl IntoIterator<Item = CatalogRecord>) -> Vec<CatalogItem> {
    let mut ignored = 0usize;
    let items: Vec<CatalogItem> = records
        .into_iter()
        .filter(|record| {
            if record.ignore {
                ignored += 1;
            }
            !record.ignore
        })
        .map(CatalogRecord::into_item)
        .collect();
    debug!(items = items.len(), ignored, "catalog records mapped");
    items
}

/// Access to the external catalog.
pub trait CatalogRepository {
    /// All items that take part in arrangement.
    fn fetch_all(&self) -> Result<Vec<CatalogItem>>;

    /// Persists one swap.
    fn apply_swap(&mut self, swap: &SwapOp) -> Result<()>;
}

/// Catalog held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    items: Arrangement,
}

impl InMemoryCatalog {
    /// Catalog over the given items.
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self {
            items: Arrangement::new(items),
        }
    }

    /// Catalog from raw records (ignored records dropped).
    pub fn from_records(records: impl IntoIterator<Item = CatalogRecord>) -> Self {
        Self::new(map_records(records))
    }

    /// Current items.
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }
}

impl CatalogRepository for InMemoryCatalog {
    fn fetch_all(&self) -> Result<Vec<CatalogItem>> {
        Ok(self.items.to_vec())
    }

    fn apply_swap(&mut self, swap: &SwapOp) -> Result<()> {
        self.items.apply(swap)
    }
}

/// Outcome of writing a plan.
#[derive(Debug)]
pub struct WriteOutcome {
    /// Swaps applied before stopping.
    pub applied: usize,
    /// Error that stopped the write, if any.
    pub error: Option<ArrangeError>,
}

impl WriteOutcome {
    /// Whether every swap was applied.
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }
}

/// Applies a plan to a repository, in order, one swap at a time.
///
/// Swaps depend on the ones before them, so the first failure stops the
/// write. An optional pause between calls keeps rate-limited services
/// happy.
#[derive(Debug, Clone, Default)]
pub struct PlanWriter {
    pacing: Option<Duration>,
}

impl PlanWriter {
    /// Writer without pacing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pauses for `pause` between consecutive swaps.
    pub fn with_pacing(mut self, pause: Duration) -> Self {
        self.pacing = Some(pause);
        self
    }

    /// Writes the plan.
    pub fn write<R: CatalogRepository + ?Sized>(
        &self,
        repo: &mut R,
        plan: &[SwapOp],
    ) -> WriteOutcome {
        for (i, swap) in plan.iter().enumerate() {
            if i > 0 {
                if let Some(pause) = self.pacing {
                    std::thread::sleep(pause);
                }
            }
            if let Err(err) = repo.apply_swap(swap) {
                warn!(
                    step = i + 1,
                    from = %swap.from.item_id,
                    to = %swap.to.item_id,
                    %err,
                    "swap failed; stopping plan write"
                );
                return WriteOutcome {
                    applied: i,
                    error: Some(err),
                };
            }
            debug!(step = i + 1, from = %swap.from.item_id, to = %swap.to.item_id, "swap applied");
        }
        info!(applied = plan.len(), "swap plan written");
        WriteOutcome {
            applied: plan.len(),
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::generate_swap_plan;
    use std::time::Instant;

    #[test]
    fn test_record_defaults() {
        let record: CatalogRecord = serde_json::from_str(r#"{ "id": "p1" }"#).unwrap();
        let item = record.into_item();
        assert_eq!(item.name, "(No name)");
        assert_eq!(item.house, "Unknown House");
        assert_eq!(item.position, Position::UNASSIGNED);
        assert!(item.seasons.is_empty());
        assert!(item.time.is_empty());
    }

    #[test]
    fn test_record_from_json() {
        let json = r#"{
            "id": "p2",
            "name": "Aventus",
            "house": "Creed",
            "location": "1-30-3",
            "seasons": ["Spring", "Summer"],
            "topNotes": ["Pineapple", "Bergamot"],
            "baseNotes": ["Musk"],
            "time": ["Day"]
        }"#;
        let item: CatalogItem = serde_json::from_str::<CatalogRecord>(json).unwrap().into_item();
        assert_eq!(item.position, Position::new(1, 3, 30));
        assert_eq!(item.top_notes, vec!["Pineapple", "Bergamot"]);
        assert!(item.middle_notes.is_empty());
        assert!(item.has_time("Day"));
    }

    #[test]
    fn test_numeric_fields_and_malformed_values() {
        let json = r#"{ "id": "p3", "plane": 2, "row": "5", "column": "left" }"#;
        let record: CatalogRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.position(), Position::new(2, 5, 0));

        let negative: CatalogRecord = serde_json::from_str(r#"{ "id": "p4", "row": -3 }"#).unwrap();
        assert_eq!(negative.position(), Position::UNASSIGNED);

        let blank_location: CatalogRecord =
            serde_json::from_str(r#"{ "id": "p5", "location": " ", "row": 2 }"#).unwrap();
        assert_eq!(blank_location.position(), Position::new(0, 2, 0));
    }

    #[test]
    fn test_unexpected_coordinate_types_default() {
        let float: CatalogRecord =
            serde_json::from_str(r#"{ "id": "f", "row": 2.0, "column": 3 }"#).unwrap();
        assert_eq!(float.position(), Position::new(0, 2, 3));

        let fraction: CatalogRecord =
            serde_json::from_str(r#"{ "id": "g", "row": 4.7, "column": "5.0" }"#).unwrap();
        assert_eq!(fraction.position(), Position::new(0, 4, 5));

        let flag: CatalogRecord = serde_json::from_str(r#"{ "id": "h", "row": true }"#).unwrap();
        assert_eq!(flag.row, Some(Coordinate::Other(IgnoredAny)));
        assert_eq!(flag.position(), Position::UNASSIGNED);

        let json = r#"{ "id": "i", "plane": {}, "row": { "x": 1 }, "column": -2.5 }"#;
        let object: CatalogRecord = serde_json::from_str(json).unwrap();
        assert_eq!(object.position(), Position::UNASSIGNED);

        // One odd field does not reject the batch.
        let json = r#"[{ "id": "a", "row": 1 }, { "id": "b", "row": [1] }]"#;
        let batch: Vec<CatalogRecord> = serde_json::from_str(json).unwrap();
        let items = map_records(batch);
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].position, Position::UNASSIGNED);
    }

    #[test]
    fn test_ignored_records_dropped() {
        let records = vec![
            CatalogRecord {
                id: "keep".into(),
                ..Default::default()
            },
            CatalogRecord {
                id: "skip".into(),
                ignore: true,
                ..Default::default()
            },
        ];
        let catalog = InMemoryCatalog::from_records(records);
        let items = catalog.fetch_all().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "keep");
    }

    fn three_in_a_cycle() -> (Vec<CatalogItem>, Vec<CatalogItem>) {
        let current = vec![
            CatalogItem::new("a").at(1, 1, 1),
            CatalogItem::new("b").at(1, 2, 2),
            CatalogItem::new("c").at(1, 3, 3),
        ];
        let optimal = vec![
            current[0].moved_to(Position::new(1, 3, 3)),
            current[1].moved_to(Position::new(1, 1, 1)),
            current[2].moved_to(Position::new(1, 2, 2)),
        ];
        (current, optimal)
    }

    #[test]
    fn test_writer_applies_plan() {
        let (current, optimal) = three_in_a_cycle();
        let plan = generate_swap_plan(&current, &optimal);
        let mut catalog = InMemoryCatalog::new(current);

        let outcome = PlanWriter::new().write(&mut catalog, &plan);
        assert!(outcome.is_complete());
        assert_eq!(outcome.applied, 2);
        let stored: Vec<Position> = catalog.items().iter().map(|i| i.position).collect();
        let wanted: Vec<Position> = optimal.iter().map(|i| i.position).collect();
        assert_eq!(stored, wanted);
    }

    #[test]
    fn test_writer_stops_on_first_failure() {
        let (current, optimal) = three_in_a_cycle();
        let plan = generate_swap_plan(&current, &optimal);
        // Catalog moved on since planning: "b" is elsewhere.
        let mut drifted = current.clone();
        drifted[1].position = Position::new(1, 7, 7);
        let mut catalog = InMemoryCatalog::new(drifted);

        let outcome = PlanWriter::new().write(&mut catalog, &plan);
        assert!(!outcome.is_complete());
        assert_eq!(outcome.applied, 1);
        assert!(matches!(
            outcome.error,
            Some(ArrangeError::StalePosition { .. })
        ));
    }

    /// Repository whose service rejects every call after a quota.
    struct QuotaCatalog {
        inner: InMemoryCatalog,
        quota: usize,
    }

    impl CatalogRepository for QuotaCatalog {
        fn fetch_all(&self) -> Result<Vec<CatalogItem>> {
            self.inner.fetch_all()
        }

        fn apply_swap(&mut self, swap: &SwapOp) -> Result<()> {
            if self.quota == 0 {
                return Err(ArrangeError::Catalog("rate limit exceeded".into()));
            }
            self.quota -= 1;
            self.inner.apply_swap(swap)
        }
    }

    #[test]
    fn test_writer_reports_service_error() {
        let (current, optimal) = three_in_a_cycle();
        let plan = generate_swap_plan(&current, &optimal);
        let mut catalog = QuotaCatalog {
            inner: InMemoryCatalog::new(current),
            quota: 1,
        };

        let outcome = PlanWriter::new().write(&mut catalog, &plan);
        assert_eq!(outcome.applied, 1);
        let err = outcome.error.unwrap();
        assert_eq!(err.to_string(), "catalog error: rate limit exceeded");
    }

    #[test]
    fn test_writer_pacing() {
        let (current, optimal) = three_in_a_cycle();
        let plan = generate_swap_plan(&current, &optimal);
        let mut catalog = InMemoryCatalog::new(current);

        let start = Instant::now();
        let outcome = PlanWriter::new()
            .with_pacing(Duration::from_millis(20))
            .write(&mut catalog, &plan);
        assert!(outcome.is_complete());
        // One pause between two swaps.
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
