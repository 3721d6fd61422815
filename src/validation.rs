//! Input validation for arrangement problems.
//!
//! Checks structural integrity of arrangements before planning. Detects:
//! - Duplicate item IDs
//! - Two items on one slot
//! - Items spread over several planes
//! - Slots outside the rack layout
//! - Current/target pairs that are not a permutation of one slot set
//!
//! The planning functions tolerate most of these (degrading to broken
//! cycles and warnings); callers that want to fail fast validate first.

use std::collections::{HashMap, HashSet};

use crate::layout::RackLayout;
use crate::models::{CatalogItem, Position};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two items share the same ID.
    DuplicateId,
    /// Two items share the same slot.
    DuplicatePosition,
    /// Items belong to more than one plane.
    MixedPlanes,
    /// A slot does not exist in the rack layout.
    OutsideLayout,
    /// Current and target sequences differ in length.
    LengthMismatch,
    /// `current[i]` and `target[i]` are different items.
    PairingMismatch,
    /// A target slot is not one of the current slots.
    UnknownTargetSlot,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates one arrangement.
///
/// Checks:
/// 1. No duplicate item IDs
/// 2. No two items on the same slot
/// 3. All items on one plane
/// 4. Every slot exists in `layout` (when given)
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_arrangement(
    items: &[CatalogItem],
    layout: Option<&RackLayout>,
) -> ValidationResult {
    let mut errors = Vec::new();

    let mut ids = HashSet::new();
    for item in items {
        if !ids.insert(item.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate item ID: {}", item.id),
            ));
        }
    }

    let mut occupied: HashMap<Position, &str> = HashMap::new();
    for item in items {
        if let Some(first) = occupied.insert(item.position, &item.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicatePosition,
                format!(
                    "Items '{}' and '{}' both occupy {}",
                    first, item.id, item.position
                ),
            ));
        }
    }

    if let Some(first) = items.first() {
        let plane = first.position.plane;
        for item in items.iter().filter(|i| i.position.plane != plane) {
            errors.push(ValidationError::new(
                ValidationErrorKind::MixedPlanes,
                format!(
                    "Item '{}' is on plane {}, expected plane {}",
                    item.id, item.position.plane, plane
                ),
            ));
        }
    }

    if let Some(layout) = layout {
        for item in items.iter().filter(|i| !layout.is_valid(&i.position)) {
            errors.push(ValidationError::new(
                ValidationErrorKind::OutsideLayout,
                format!("Item '{}' is at {}, outside the rack layout", item.id, item.position),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a current/target pair.
///
/// Checks:
/// 1. Equal lengths
/// 2. `current[i].id == target[i].id` for every index
/// 3. No two targets on the same slot
/// 4. Every target slot is a current slot
///
/// Together these guarantee that every cycle walk closes.
pub fn validate_pair(current: &[CatalogItem], target: &[CatalogItem]) -> ValidationResult {
    let mut errors = Vec::new();

    if current.len() != target.len() {
        errors.push(ValidationError::new(
            ValidationErrorKind::LengthMismatch,
            format!(
                "Current arrangement has {} items, target has {}",
                current.len(),
                target.len()
            ),
        ));
    }

    for (i, (c, t)) in current.iter().zip(target).enumerate() {
        if c.id != t.id {
            errors.push(ValidationError::new(
                ValidationErrorKind::PairingMismatch,
                format!("Index {i} pairs '{}' with '{}'", c.id, t.id),
            ));
        }
    }

    let mut claimed: HashMap<Position, &str> = HashMap::new();
    for item in target {
        if let Some(first) = claimed.insert(item.position, &item.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicatePosition,
                format!(
                    "Items '{}' and '{}' both target {}",
                    first, item.id, item.position
                ),
            ));
        }
    }

    let current_slots: HashSet<Position> = current.iter().map(|item| item.position).collect();
    for item in target.iter().filter(|i| !current_slots.contains(&i.position)) {
        errors.push(ValidationError::new(
            ValidationErrorKind::UnknownTargetSlot,
            format!(
                "Item '{}' targets {}, which no current item occupies",
                item.id, item.position
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{PlaneLayout, RackSpec};

    fn sample() -> Vec<CatalogItem> {
        vec![
            CatalogItem::new("a").at(1, 1, 1),
            CatalogItem::new("b").at(1, 1, 2),
            CatalogItem::new("c").at(1, 2, 1),
        ]
    }

    fn layout() -> RackLayout {
        RackLayout::new().with_plane(PlaneLayout::stack(1, &[RackSpec::new(2, 2)]))
    }

    #[test]
    fn test_valid_arrangement() {
        assert!(validate_arrangement(&sample(), Some(&layout())).is_ok());
        assert!(validate_arrangement(&[], None).is_ok());
    }

    #[test]
    fn test_duplicate_id() {
        let mut items = sample();
        items.push(CatalogItem::new("a").at(1, 2, 2));
        let errors = validate_arrangement(&items, None).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId));
    }

    #[test]
    fn test_duplicate_position() {
        let mut items = sample();
        items.push(CatalogItem::new("d").at(1, 1, 1));
        let errors = validate_arrangement(&items, None).unwrap_err();
        assert!(errors.iter().any(|e| {
            e.kind == ValidationErrorKind::DuplicatePosition && e.message.contains("'d'")
        }));
    }

    #[test]
    fn test_mixed_planes() {
        let mut items = sample();
        items.push(CatalogItem::new("d").at(2, 1, 1));
        let errors = validate_arrangement(&items, None).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::MixedPlanes));
    }

    #[test]
    fn test_outside_layout() {
        let mut items = sample();
        items.push(CatalogItem::new("d").at(1, 3, 1));
        let errors = validate_arrangement(&items, Some(&layout())).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::OutsideLayout);
        // Without a layout the same input is fine.
        assert!(validate_arrangement(&items, None).is_ok());
    }

    #[test]
    fn test_valid_pair() {
        let current = sample();
        let target: Vec<CatalogItem> = vec![
            current[0].moved_to(current[2].position),
            current[1].clone(),
            current[2].moved_to(current[0].position),
        ];
        assert!(validate_pair(&current, &target).is_ok());
    }

    #[test]
    fn test_pair_errors() {
        let current = sample();
        let target = vec![
            current[1].clone(), // wrong item at index 0
            current[1].moved_to(current[0].position),
            current[2].moved_to(Position::new(1, 9, 9)), // unknown slot
        ];
        let errors = validate_pair(&current, &target).unwrap_err();
        let kinds: Vec<_> = errors.iter().map(|e| e.kind.clone()).collect();
        assert!(kinds.contains(&ValidationErrorKind::PairingMismatch));
        assert!(kinds.contains(&ValidationErrorKind::UnknownTargetSlot));
    }

    #[test]
    fn test_pair_collision_and_length() {
        let current = sample();
        let target = vec![current[0].clone(), current[1].moved_to(current[0].position)];
        let errors = validate_pair(&current, &target).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::LengthMismatch));
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicatePosition));
    }
}
