//! Slot equivalence: when does an item count as "already in place"?
//!
//! Under [`SlotEquivalence::FullPosition`] an item is in place only when
//! plane, row and column all match. Under [`SlotEquivalence::RowOnly`]
//! the row alone matters: moving a bottle sideways within its row buys
//! no accessibility, so it is not worth a swap.
//!
//! Row-only targets are refined onto concrete slots before cycle
//! decomposition so that the rest of the pipeline always works on a
//! full-position permutation.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::models::Position;

/// Equivalence relation used to decide whether an item has to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotEquivalence {
    /// Same `(plane, row, column)`.
    #[default]
    FullPosition,
    /// Same `(plane, row)`; column ignored. Slots are chosen greedily (see
    /// [`SlotEquivalence::refine_targets`]), so the swap count is an upper
    /// bound on the row-only optimum.
    RowOnly,
}

impl SlotEquivalence {
    /// Whether `a` and `b` are equivalent slots.
    pub fn equivalent(&self, a: &Position, b: &Position) -> bool {
        match self {
            SlotEquivalence::FullPosition => a == b,
            SlotEquivalence::RowOnly => a.same_row(b),
        }
    }

    /// Maps proposed targets onto concrete slots honoring this relation.
    ///
    /// Full-position targets are returned unchanged. Row-only refinement:
    /// 1. Items whose row is unchanged stay where they are.
    /// 2. Each remaining item needs a slot in its destination row; the
    ///    candidates are the slots vacated by items leaving that row.
    /// 3. Movers are grouped into row rotations, shortest first: a pair
    ///    moving between two rows in opposite directions takes each
    ///    other's slots, then three-row rotations, and so on. Each
    ///    rotation of k items becomes its own k-cycle.
    /// 4. Leftovers (rows whose inflow and outflow differ) take their
    ///    proposed slot if it was vacated, else the first vacated slot of
    ///    the destination row.
    ///
    /// Shortest-first grouping is greedy: it keeps independent rotations
    /// apart, but for tangled row patterns the resulting swap count is the
    /// minimum for the chosen slots and can exceed the row-only optimum.
    ///
    /// An item whose destination row has no vacated slot left keeps its
    /// proposed target, which surfaces later as a broken cycle.
    pub fn refine_targets(&self, current: &[Position], proposed: &[Position]) -> Vec<Position> {
        match self {
            SlotEquivalence::FullPosition => proposed.to_vec(),
            SlotEquivalence::RowOnly => refine_row_only(current, proposed),
        }
    }
}

type RowKey = (u32, u32);

fn row_key(p: &Position) -> RowKey {
    (p.plane, p.row)
}

fn refine_row_only(current: &[Position], proposed: &[Position]) -> Vec<Position> {
    let n = current.len().min(proposed.len());
    let mut refined: Vec<Position> = proposed.to_vec();
    let mut movers = Vec::new();
    for i in 0..n {
        if current[i].same_row(&proposed[i]) {
            refined[i] = current[i];
        } else {
            movers.push(i);
        }
    }
    if movers.is_empty() {
        return refined;
    }

    // Slots vacated per row, as mover indices (slot = current[index]).
    let mut vacated: BTreeMap<RowKey, Vec<usize>> = BTreeMap::new();
    for &i in &movers {
        vacated.entry(row_key(&current[i])).or_default().push(i);
    }
    let mut slot_taken = vec![false; n];
    let mut placed = vec![false; n];

    // Row cycles, shortest first: a rotation over k rows closed on its own
    // costs k - 1 swaps, while merging two rotations loses a cycle.
    for limit in 2..=movers.len() {
        for &a in &movers {
            if placed[a] {
                continue;
            }
            let Some(chain) = shortest_row_cycle(a, limit, current, proposed, &vacated, &placed)
            else {
                continue;
            };
            for (k, &mover) in chain.iter().enumerate() {
                let next = chain[(k + 1) % chain.len()];
                refined[mover] = current[next];
                slot_taken[next] = true;
                placed[mover] = true;
            }
        }
        if movers.iter().all(|&i| placed[i]) {
            return refined;
        }
    }

    // Proposed slot if it is a free vacated slot.
    let slot_owner: HashMap<Position, usize> = movers.iter().map(|&i| (current[i], i)).collect();
    for &a in &movers {
        if placed[a] {
            continue;
        }
        if let Some(&owner) = slot_owner.get(&proposed[a]) {
            if !slot_taken[owner] {
                refined[a] = current[owner];
                slot_taken[owner] = true;
                placed[a] = true;
            }
        }
    }

    // First free vacated slot of the destination row.
    for &a in &movers {
        if placed[a] {
            continue;
        }
        let to = row_key(&proposed[a]);
        let free = vacated
            .get(&to)
            .and_then(|slots| slots.iter().copied().find(|&b| !slot_taken[b]));
        if let Some(b) = free {
            refined[a] = current[b];
            slot_taken[b] = true;
            placed[a] = true;
        }
    }

    refined
}

/// Shortest chain of unplaced movers `[a, b1, .., bk]` such that each one
/// leaves the row the previous one enters and `bk` enters the row `a`
/// leaves. Breadth-first over rows, at most `limit` movers long.
fn shortest_row_cycle(
    a: usize,
    limit: usize,
    current: &[Position],
    proposed: &[Position],
    vacated: &BTreeMap<RowKey, Vec<usize>>,
    placed: &[bool],
) -> Option<Vec<usize>> {
    let home = row_key(&current[a]);
    let first = row_key(&proposed[a]);
    // Row reached -> mover whose move reached it.
    let mut via: HashMap<RowKey, usize> = HashMap::new();
    let mut seen: HashSet<RowKey> = HashSet::from([first]);
    let mut frontier = vec![first];

    for _ in 1..limit {
        let mut next_frontier = Vec::new();
        for row in frontier {
            let Some(leaving) = vacated.get(&row) else {
                continue;
            };
            for &b in leaving {
                if placed[b] || b == a {
                    continue;
                }
                let to = row_key(&proposed[b]);
                if to == home {
                    let mut chain = vec![b];
                    let mut at = row;
                    while at != first {
                        let Some(&prev) = via.get(&at) else {
                            return None;
                        };
                        chain.push(prev);
                        at = row_key(&current[prev]);
                    }
                    chain.push(a);
                    chain.reverse();
                    return Some(chain);
                }
                if seen.insert(to) {
                    via.insert(to, b);
                    next_frontier.push(to);
                }
            }
        }
        if next_frontier.is_empty() {
            break;
        }
        frontier = next_frontier;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(row: u32, column: u32) -> Position {
        Position::new(1, row, column)
    }

    #[test]
    fn test_equivalent() {
        assert!(SlotEquivalence::FullPosition.equivalent(&p(1, 1), &p(1, 1)));
        assert!(!SlotEquivalence::FullPosition.equivalent(&p(1, 1), &p(1, 2)));
        assert!(SlotEquivalence::RowOnly.equivalent(&p(1, 1), &p(1, 2)));
        assert!(!SlotEquivalence::RowOnly.equivalent(&p(1, 1), &p(2, 1)));
    }

    #[test]
    fn test_full_position_is_identity() {
        let current = vec![p(1, 1), p(2, 2)];
        let proposed = vec![p(2, 2), p(1, 1)];
        assert_eq!(
            SlotEquivalence::FullPosition.refine_targets(&current, &proposed),
            proposed
        );
    }

    #[test]
    fn test_row_only_same_row_stays() {
        let current = vec![p(1, 1), p(1, 2), p(2, 1), p(2, 2)];
        let proposed = vec![p(1, 2), p(1, 1), p(2, 2), p(2, 1)];
        assert_eq!(
            SlotEquivalence::RowOnly.refine_targets(&current, &proposed),
            current
        );
    }

    #[test]
    fn test_row_only_prefers_mutual_exchange() {
        // 0: row1→row2, 1: row2→row1, 2: row1→row2, 3: row2→row1,
        // with proposals that would chain all four into one cycle.
        let current = vec![p(1, 1), p(2, 1), p(1, 2), p(2, 2)];
        let proposed = vec![p(2, 2), p(1, 2), p(2, 1), p(1, 1)];
        let refined = SlotEquivalence::RowOnly.refine_targets(&current, &proposed);
        assert_eq!(refined[0], current[1]);
        assert_eq!(refined[1], current[0]);
        assert_eq!(refined[2], current[3]);
        assert_eq!(refined[3], current[2]);
    }

    #[test]
    fn test_row_only_keeps_rotations_apart() {
        // Rows 1 → 2 → 3 → 1 with two items each: two 3-row rotations.
        let current = vec![p(1, 1), p(1, 2), p(2, 1), p(2, 2), p(3, 1), p(3, 2)];
        let proposed = vec![p(2, 2), p(2, 1), p(3, 2), p(3, 1), p(1, 2), p(1, 1)];
        let refined = SlotEquivalence::RowOnly.refine_targets(&current, &proposed);
        assert_eq!(refined[0], current[2]);
        assert_eq!(refined[2], current[4]);
        assert_eq!(refined[4], current[0]);
        assert_eq!(refined[1], current[3]);
        assert_eq!(refined[3], current[5]);
        assert_eq!(refined[5], current[1]);
    }

    #[test]
    fn test_row_only_unbalanced_rows_fall_back() {
        // Row 2 receives two items but loses only one.
        let current = vec![p(1, 1), p(1, 2), p(2, 1)];
        let proposed = vec![p(2, 4), p(2, 5), p(1, 1)];
        let refined = SlotEquivalence::RowOnly.refine_targets(&current, &proposed);
        assert_eq!(refined[0], current[2]);
        assert_eq!(refined[2], current[0]);
        // No vacated slot left in row 2: proposal kept.
        assert_eq!(refined[1], p(2, 5));
    }

    #[test]
    fn test_row_only_three_rows_rotation() {
        let current = vec![p(1, 1), p(2, 1), p(3, 1)];
        let proposed = vec![p(2, 5), p(3, 5), p(1, 5)];
        let refined = SlotEquivalence::RowOnly.refine_targets(&current, &proposed);
        assert_eq!(refined, vec![p(2, 1), p(3, 1), p(1, 1)]);
    }
}
