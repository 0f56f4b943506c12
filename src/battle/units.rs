//! Combatants and rosters
//!
//! A `Unit` is a single combatant stamped from a catalog template. An `Army`
//! is one side's roster: membership is fixed for the battle, and fallen units
//! stay in the vec with zero health rather than being removed.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::battle::constants::FIELD_HEIGHT;
use crate::battle::grid::FieldCoord;
use crate::core::types::UnitId;

/// How a unit delivers damage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttackType {
    #[default]
    Melee,
    Ranged,
    Magic,
}

impl AttackType {
    /// Melee units need a clear route to their target; the others shoot over
    /// intervening lines.
    pub fn needs_route(&self) -> bool {
        matches!(self, AttackType::Melee)
    }
}

/// A single combatant on the field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub name: String,
    pub unit_type: String,
    pub attack_type: AttackType,
    pub position: FieldCoord,
    pub health: i32,
    pub base_attack: i32,
    pub cost: u32,
    pub attack_bonuses: AHashMap<String, f32>,
    pub defence_bonuses: AHashMap<String, f32>,
}

impl Unit {
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Apply damage, flooring health at zero. A unit at zero health is
    /// logically removed: it blocks nothing, targets nothing, takes no turns.
    pub fn take_damage(&mut self, amount: i32) {
        self.health = (self.health - amount.max(0)).max(0);
    }

    /// Attack multiplier against the given unit type (1.0 when none)
    pub fn attack_bonus_vs(&self, unit_type: &str) -> f32 {
        self.attack_bonuses.get(unit_type).copied().unwrap_or(1.0)
    }

    /// Defence multiplier against the given unit type (1.0 when none)
    pub fn defence_bonus_vs(&self, unit_type: &str) -> f32 {
        self.defence_bonuses.get(unit_type).copied().unwrap_or(1.0)
    }

    pub fn has_attack_bonus(&self) -> bool {
        !self.attack_bonuses.is_empty()
    }
}

/// One side's roster plus the points spent assembling it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Army {
    pub units: Vec<Unit>,
    pub points: u32,
}

impl Army {
    pub fn new(units: Vec<Unit>, points: u32) -> Self {
        Self { units, points }
    }

    pub fn has_alive_units(&self) -> bool {
        self.units.iter().any(|u| u.is_alive())
    }

    pub fn alive_count(&self) -> usize {
        self.units.iter().filter(|u| u.is_alive()).count()
    }

    pub fn get_unit(&self, unit_id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == unit_id)
    }

    pub fn get_unit_mut(&mut self, unit_id: UnitId) -> Option<&mut Unit> {
        self.units.iter_mut().find(|u| u.id == unit_id)
    }

    /// Group the roster by field row (index = `y`). Every row is present,
    /// possibly empty; dead units are included and filtered by the caller.
    /// Units at an out-of-bounds row are dropped rather than panicking.
    pub fn units_by_row(&self) -> Vec<Vec<&Unit>> {
        let mut rows: Vec<Vec<&Unit>> = vec![Vec::new(); FIELD_HEIGHT as usize];
        for unit in &self.units {
            if let Some(row) = rows.get_mut(unit.position.y as usize) {
                row.push(unit);
            }
        }
        rows
    }
}
