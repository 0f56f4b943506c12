//! Front-line target selection
//!
//! Given an army grouped into field rows, pick the combatant standing
//! nearest the approaching attacker in each row. Rows face each other along
//! the column axis: the player roster deploys at low columns, the enemy at
//! high columns.

use crate::battle::units::Unit;

/// Select each row's front-line combatant.
///
/// `attacker_on_right` tells which end of a row faces the attacker: true
/// scans from the highest column down, false from the lowest up. The first
/// living unit wins the row. Rows with no living unit contribute nothing,
/// and the output preserves the row order of the input. Inputs are never
/// mutated; ordering works on a per-row copy.
pub fn select_front_units<'a>(rows: &[Vec<&'a Unit>], attacker_on_right: bool) -> Vec<&'a Unit> {
    let mut front = Vec::new();

    for row in rows {
        if row.is_empty() {
            continue;
        }

        let mut by_column: Vec<&Unit> = row.clone();
        // Stable sort: units sharing a column keep their roster order
        by_column.sort_by_key(|u| u.position.x);

        let leader = if attacker_on_right {
            by_column.iter().rev().find(|u| u.is_alive())
        } else {
            by_column.iter().find(|u| u.is_alive())
        };

        if let Some(unit) = leader {
            front.push(*unit);
        }
    }

    front
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::grid::FieldCoord;
    use crate::battle::units::AttackType;
    use crate::core::types::UnitId;
    use ahash::AHashMap;

    fn unit_at(x: i32, y: i32, health: i32) -> Unit {
        Unit {
            id: UnitId::new(),
            name: "Pikeman 1".to_string(),
            unit_type: "Pikeman".to_string(),
            attack_type: AttackType::Melee,
            position: FieldCoord::new(x, y),
            health,
            base_attack: 10,
            cost: 10,
            attack_bonuses: AHashMap::new(),
            defence_bonuses: AHashMap::new(),
        }
    }

    #[test]
    fn test_rightmost_alive_wins_for_right_attacker() {
        let units = [unit_at(1, 0, 10), unit_at(3, 0, 10), unit_at(5, 0, 10)];
        let rows = vec![units.iter().collect::<Vec<_>>()];

        let front = select_front_units(&rows, true);

        assert_eq!(front.len(), 1);
        assert_eq!(front[0].position.x, 5);
    }

    #[test]
    fn test_leftmost_alive_wins_for_left_attacker() {
        let units = [unit_at(5, 0, 10), unit_at(1, 0, 10), unit_at(3, 0, 10)];
        let rows = vec![units.iter().collect::<Vec<_>>()];

        let front = select_front_units(&rows, false);

        assert_eq!(front[0].position.x, 1);
    }

    #[test]
    fn test_dead_front_rank_is_skipped() {
        // Columns 1, 3, 5 with only the middle unit alive: both approach
        // directions must settle on column 3.
        let units = [unit_at(1, 0, 0), unit_at(3, 0, 10), unit_at(5, 0, 0)];
        let rows = vec![units.iter().collect::<Vec<_>>()];

        let from_right = select_front_units(&rows, true);
        let from_left = select_front_units(&rows, false);

        assert_eq!(from_right.len(), 1);
        assert_eq!(from_right[0].position.x, 3);
        assert_eq!(from_left[0].position.x, 3);
    }

    #[test]
    fn test_empty_and_dead_rows_are_omitted() {
        let row0 = [unit_at(2, 0, 10)];
        let row2 = [unit_at(4, 2, 0), unit_at(6, 2, 0)];
        let row3 = [unit_at(1, 3, 10)];
        let rows = vec![
            row0.iter().collect::<Vec<_>>(),
            Vec::new(),
            row2.iter().collect::<Vec<_>>(),
            row3.iter().collect::<Vec<_>>(),
        ];

        let front = select_front_units(&rows, true);

        // One unit per surviving row, in row order
        assert_eq!(front.len(), 2);
        assert_eq!(front[0].position.y, 0);
        assert_eq!(front[1].position.y, 3);
    }

    #[test]
    fn test_at_most_one_per_row_and_never_dead() {
        let units = [
            unit_at(0, 0, 10),
            unit_at(1, 0, 10),
            unit_at(2, 0, 0),
            unit_at(3, 0, 10),
        ];
        let rows = vec![units.iter().collect::<Vec<_>>()];

        let front = select_front_units(&rows, true);

        assert_eq!(front.len(), 1);
        assert!(front[0].is_alive());
        assert_eq!(front[0].position.x, 3); // rightmost living, dead ignored
    }

    #[test]
    fn test_input_rows_unsorted_and_preserved() {
        let units = [unit_at(5, 0, 10), unit_at(1, 0, 10), unit_at(3, 0, 10)];
        let rows = vec![units.iter().collect::<Vec<_>>()];

        let _ = select_front_units(&rows, true);

        // The caller's row ordering is untouched
        assert_eq!(rows[0][0].position.x, 5);
        assert_eq!(rows[0][1].position.x, 1);
        assert_eq!(rows[0][2].position.x, 3);
    }

    #[test]
    fn test_no_living_units_yields_empty() {
        let units = [unit_at(1, 0, 0), unit_at(2, 0, 0)];
        let rows = vec![units.iter().collect::<Vec<_>>()];

        assert!(select_front_units(&rows, false).is_empty());
    }
}
