//! A* pathfinding across the battle field
//!
//! Obstacles are the living units themselves: each query builds a transient
//! occupancy layer from the current rosters, with the attacker and target
//! carved out. Costs are integer (10 straight, 14 diagonal) with an octile
//! heuristic, so equal-cost ties are common; the frontier breaks them by a
//! total order (f, then h, then cell index) to keep results reproducible.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::battle::constants::{
    DIAGONAL_MOVE_COST, FIELD_HEIGHT, FIELD_WIDTH, OCTILE_DIAGONAL_FACTOR, STRAIGHT_MOVE_COST,
};
use crate::battle::grid::{FieldCoord, FieldGrid};
use crate::battle::units::Unit;
use crate::core::types::UnitId;

/// Node in the A* open set
#[derive(Debug, Clone, PartialEq, Eq)]
struct SearchNode {
    coord: FieldCoord,
    f_cost: u32, // g_cost + heuristic
    h_cost: u32,
}

impl Ord for SearchNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap. Ties fall through to h, then to the
        // cell index, so pop order never depends on insertion order.
        other
            .f_cost
            .cmp(&self.f_cost)
            .then_with(|| other.h_cost.cmp(&self.h_cost))
            .then_with(|| other.coord.cell_index().cmp(&self.coord.cell_index()))
    }
}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Octile distance between two cells, in movement-cost units.
///
/// Exact on an empty field, hence admissible with obstacles. The diagonal
/// factor equals `DIAGONAL_MOVE_COST - STRAIGHT_MOVE_COST`.
pub fn octile_distance(from: FieldCoord, to: FieldCoord) -> u32 {
    let dx = (from.x - to.x).unsigned_abs();
    let dy = (from.y - to.y).unsigned_abs();
    STRAIGHT_MOVE_COST * dx.max(dy) + OCTILE_DIAGONAL_FACTOR * dx.min(dy)
}

fn step_cost(from: FieldCoord, to: FieldCoord) -> u32 {
    if from.x != to.x && from.y != to.y {
        DIAGONAL_MOVE_COST
    } else {
        STRAIGHT_MOVE_COST
    }
}

/// Sum of step costs along a path (zero for empty or single-cell paths)
pub fn path_cost(path: &[FieldCoord]) -> u32 {
    path.windows(2).map(|pair| step_cost(pair[0], pair[1])).sum()
}

/// Cells blocked for this query: every living unit except the attacker and
/// the target. Never persisted; rebuilt from the rosters each call.
fn build_occupancy(all_units: &[&Unit], attacker_id: UnitId, target_id: UnitId) -> FieldGrid<bool> {
    let mut occupied = FieldGrid::filled(false);
    for unit in all_units {
        if !unit.is_alive() || unit.id == attacker_id || unit.id == target_id {
            continue;
        }
        occupied.set(unit.position, true);
    }
    occupied
}

/// Find the cheapest route from the attacker's cell to the target's cell.
///
/// Returns the full path including both endpoints, or an empty vector when
/// the target is dead, an endpoint lies off the field, or every route is
/// blocked. A shared cell yields the single-cell path. The function never
/// panics and never mutates its inputs.
pub fn find_path(attacker: &Unit, target: &Unit, all_units: &[&Unit]) -> Vec<FieldCoord> {
    let start = attacker.position;
    let goal = target.position;

    if !target.is_alive() || !start.in_bounds() || !goal.in_bounds() {
        return Vec::new();
    }
    if start == goal {
        return vec![start];
    }

    let occupied = build_occupancy(all_units, attacker.id, target.id);

    let mut open_set = BinaryHeap::new();
    let mut g_scores: FieldGrid<u32> = FieldGrid::filled(u32::MAX);
    let mut closed: FieldGrid<bool> = FieldGrid::filled(false);
    let mut came_from: FieldGrid<Option<FieldCoord>> = FieldGrid::filled(None);

    g_scores.set(start, 0);
    let h = octile_distance(start, goal);
    open_set.push(SearchNode {
        coord: start,
        f_cost: h,
        h_cost: h,
    });

    // Each cell re-enters the open set at most once per incoming edge, so
    // this cap never fires on well-formed input.
    let mut pop_budget = (FIELD_WIDTH * FIELD_HEIGHT) as usize * 8 + 1;

    while let Some(current) = open_set.pop() {
        if pop_budget == 0 {
            break;
        }
        pop_budget -= 1;

        if current.coord == goal {
            return reconstruct_path(&came_from, goal);
        }

        // Superseded entry for an already-expanded cell
        if closed.get(current.coord).copied().unwrap_or(false) {
            continue;
        }
        closed.set(current.coord, true);

        let current_g = g_scores.get(current.coord).copied().unwrap_or(u32::MAX);

        for neighbor in current.coord.neighbors() {
            if !neighbor.in_bounds() {
                continue;
            }
            if occupied.get(neighbor).copied().unwrap_or(false) {
                continue;
            }
            if closed.get(neighbor).copied().unwrap_or(false) {
                continue;
            }

            let tentative_g = current_g + step_cost(current.coord, neighbor);
            let neighbor_g = g_scores.get(neighbor).copied().unwrap_or(u32::MAX);

            if tentative_g < neighbor_g {
                came_from.set(neighbor, Some(current.coord));
                g_scores.set(neighbor, tentative_g);

                let h_cost = octile_distance(neighbor, goal);
                open_set.push(SearchNode {
                    coord: neighbor,
                    f_cost: tentative_g + h_cost,
                    h_cost,
                });
            }
        }
    }

    Vec::new() // No path found
}

/// Reconstruct path by walking the came-from layer back from the goal
fn reconstruct_path(came_from: &FieldGrid<Option<FieldCoord>>, goal: FieldCoord) -> Vec<FieldCoord> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(prev) = came_from.get(current).copied().flatten() {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}
