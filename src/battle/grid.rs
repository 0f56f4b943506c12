//! Square-cell coordinates and dense storage for the battle field
//!
//! The field is a fixed 27x21 grid. `x` is the column (0 at the left edge,
//! where the player roster deploys), `y` is the row.

use serde::{Deserialize, Serialize};

use crate::battle::constants::{FIELD_HEIGHT, FIELD_WIDTH};

/// Cell coordinate on the battle field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct FieldCoord {
    pub x: i32,
    pub y: i32,
}

impl FieldCoord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn in_bounds(&self) -> bool {
        self.x >= 0 && self.x < FIELD_WIDTH && self.y >= 0 && self.y < FIELD_HEIGHT
    }

    /// Row-major index into a field-sized array. Only meaningful in bounds.
    #[inline]
    pub fn cell_index(&self) -> usize {
        (self.y * FIELD_WIDTH + self.x) as usize
    }

    /// All 8 neighboring coordinates, orthogonals first then diagonals.
    ///
    /// The scan order is fixed; path search expands neighbors in this order,
    /// so reordering the array changes which of several equal-cost paths is
    /// produced.
    pub fn neighbors(&self) -> [FieldCoord; 8] {
        [
            FieldCoord::new(self.x, self.y + 1),
            FieldCoord::new(self.x + 1, self.y),
            FieldCoord::new(self.x, self.y - 1),
            FieldCoord::new(self.x - 1, self.y),
            FieldCoord::new(self.x + 1, self.y + 1),
            FieldCoord::new(self.x + 1, self.y - 1),
            FieldCoord::new(self.x - 1, self.y + 1),
            FieldCoord::new(self.x - 1, self.y - 1),
        ]
    }

    /// True when `other` is exactly one 8-directional step away
    pub fn is_adjacent(&self, other: &Self) -> bool {
        let dx = (self.x - other.x).abs();
        let dy = (self.y - other.y).abs();
        dx <= 1 && dy <= 1 && (dx, dy) != (0, 0)
    }
}

/// Dense field-sized layer of per-cell data
///
/// Backs the transient occupancy, cost and came-from layers built for each
/// path query. Row-major, matching `FieldCoord::cell_index`.
#[derive(Debug, Clone)]
pub struct FieldGrid<T: Clone> {
    data: Vec<T>,
}

impl<T: Clone> FieldGrid<T> {
    pub fn filled(value: T) -> Self {
        Self {
            data: vec![value; (FIELD_WIDTH * FIELD_HEIGHT) as usize],
        }
    }

    #[inline]
    pub fn get(&self, coord: FieldCoord) -> Option<&T> {
        if coord.in_bounds() {
            Some(&self.data[coord.cell_index()])
        } else {
            None
        }
    }

    #[inline]
    pub fn get_mut(&mut self, coord: FieldCoord) -> Option<&mut T> {
        if coord.in_bounds() {
            Some(&mut self.data[coord.cell_index()])
        } else {
            None
        }
    }

    #[inline]
    pub fn set(&mut self, coord: FieldCoord, value: T) {
        if coord.in_bounds() {
            self.data[coord.cell_index()] = value;
        }
    }
}
