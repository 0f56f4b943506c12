//! Standard attack behavior
//!
//! `BasicTactics` is the stock `UnitTactics` implementation: pick the
//! opposing front line, close in on the nearest reachable target, strike
//! with type-bonus-scaled damage. The battle loop knows none of this; it is
//! one interchangeable strategy among any the host might plug in.

use crate::battle::behavior::UnitTactics;
use crate::battle::execution::BattleState;
use crate::battle::pathfinding::{find_path, octile_distance};
use crate::battle::targeting::select_front_units;
use crate::battle::units::Unit;
use crate::core::types::{Side, UnitId};

/// Front-line tactics shared by both rosters.
///
/// Target choice: the opposing army's front-line units, one per row. Melee
/// attackers need a clear route and take the candidate with the shortest
/// path (ties go to the earlier row); ranged and magic attackers skip the
/// route check and take the candidate nearest by octile distance. Damage is
/// `base attack x attack bonus / defence bonus`, rounded, never below 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicTactics;

struct Strike {
    target_id: UnitId,
    damage: i32,
    attacker_name: String,
    target_name: String,
}

impl BasicTactics {
    fn plan_strike(&self, actor: UnitId, state: &BattleState) -> Option<Strike> {
        let side = state.side_of(actor)?;
        let attacker = state.get_unit(actor)?;
        if !attacker.is_alive() {
            return None;
        }

        let defenders = state.army(side.opponent());
        let rows = defenders.units_by_row();
        // The enemy roster deploys on the high columns, so its units come at
        // the player's rows from the right.
        let attacker_on_right = side == Side::Enemy;
        let candidates = select_front_units(&rows, attacker_on_right);

        let target = if attacker.attack_type.needs_route() {
            let all: Vec<&Unit> = state.all_units().collect();
            let mut best: Option<(usize, &Unit)> = None;
            for candidate in candidates {
                let path = find_path(attacker, candidate, &all);
                if path.is_empty() {
                    continue;
                }
                if best.map_or(true, |(len, _)| path.len() < len) {
                    best = Some((path.len(), candidate));
                }
            }
            best.map(|(_, unit)| unit)?
        } else {
            candidates
                .into_iter()
                .enumerate()
                .min_by_key(|(index, c)| (octile_distance(attacker.position, c.position), *index))
                .map(|(_, unit)| unit)?
        };

        let attack_bonus = attacker.attack_bonus_vs(&target.unit_type);
        let defence_bonus = target.defence_bonus_vs(&attacker.unit_type);
        let damage = (attacker.base_attack as f32 * attack_bonus / defence_bonus).round() as i32;

        Some(Strike {
            target_id: target.id,
            damage: damage.max(1),
            attacker_name: attacker.name.clone(),
            target_name: target.name.clone(),
        })
    }
}

impl UnitTactics for BasicTactics {
    fn attack(&mut self, actor: UnitId, state: &mut BattleState) -> Option<UnitId> {
        let strike = self.plan_strike(actor, state)?;

        let target = state.get_unit_mut(strike.target_id)?;
        target.take_damage(strike.damage);
        tracing::debug!(
            "{} strikes {} for {}",
            strike.attacker_name,
            strike.target_name,
            strike.damage
        );
        Some(strike.target_id)
    }
}
