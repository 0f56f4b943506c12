//! Budgeted army assembly
//!
//! Builds a roster from the template catalog under a points budget: rank
//! templates by an efficiency score, then greedily fill from the top, at
//! most eleven copies of any template, placing units in a three-column
//! block anchored on the enemy side of the field.

use ordered_float::OrderedFloat;

use crate::battle::catalog::UnitTemplate;
use crate::battle::constants::{
    ATTACK_BONUS_MULTIPLIER, DEPLOY_COLUMNS, EFFICIENCY_ATTACK_WEIGHT, EFFICIENCY_HEALTH_WEIGHT,
    ENEMY_DEPLOY_X, ENEMY_DEPLOY_Y, FIELD_HEIGHT, MAX_COPIES_PER_TEMPLATE,
};
use crate::battle::grid::FieldCoord;
use crate::battle::units::Army;

/// Efficiency score: weighted attack and health per point spent, with a
/// flat multiplier when the template carries any attack bonus. Zero-cost
/// templates score zero; they can never be bought.
pub fn efficiency_score(template: &UnitTemplate) -> f32 {
    if template.cost == 0 {
        return 0.0;
    }
    let cost = template.cost as f32;
    let attack_ratio = template.base_attack as f32 / cost;
    let health_ratio = template.health as f32 / cost;
    let base = EFFICIENCY_ATTACK_WEIGHT * attack_ratio + EFFICIENCY_HEALTH_WEIGHT * health_ratio;

    if template.has_attack_bonus() {
        base * ATTACK_BONUS_MULTIPLIER
    } else {
        base
    }
}

/// Deployment slot for the 1-based unit ordinal: a block of
/// `DEPLOY_COLUMNS` columns growing downward from the anchor, with the row
/// clamped to the field. Ordinals past the bottom edge pile up on the last
/// row rather than leaving the field.
pub fn deploy_position(ordinal: usize, anchor_x: i32, anchor_y: i32) -> FieldCoord {
    let offset = ordinal.saturating_sub(1) as i32;
    let columns = DEPLOY_COLUMNS as i32;
    let x = anchor_x + offset % columns;
    let y = (anchor_y + offset / columns).clamp(0, FIELD_HEIGHT - 1);
    FieldCoord::new(x, y)
}

/// Assemble the enemy roster for the given points budget.
///
/// Templates are ranked by descending efficiency (ties keep catalog order)
/// and filled greedily: up to `MAX_COPIES_PER_TEMPLATE` copies while the
/// budget allows. Unit names carry the army-wide ordinal ("Knight 3"), and
/// the army's points record what was actually spent. An empty catalog or a
/// zero budget yields an empty army worth zero points.
pub fn muster_army(catalog: &[UnitTemplate], max_points: u32) -> Army {
    if catalog.is_empty() || max_points == 0 {
        return Army::default();
    }

    let mut ranked: Vec<&UnitTemplate> = catalog.iter().collect();
    ranked.sort_by_key(|t| std::cmp::Reverse(OrderedFloat(efficiency_score(t))));

    let mut units = Vec::new();
    let mut remaining = max_points;
    let mut spent = 0;

    for template in ranked {
        if template.cost == 0 {
            continue;
        }

        let affordable = remaining / template.cost;
        let count = affordable.min(MAX_COPIES_PER_TEMPLATE);

        for _ in 0..count {
            let ordinal = units.len() + 1;
            let position = deploy_position(ordinal, ENEMY_DEPLOY_X, ENEMY_DEPLOY_Y);
            units.push(template.spawn(ordinal, position));
            remaining -= template.cost;
            spent += template.cost;
        }

        if remaining == 0 {
            break;
        }
    }

    tracing::debug!("mustered {} units for {} points", units.len(), spent);
    Army::new(units, spent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::AHashMap;
    use crate::battle::units::AttackType;

    fn template(unit_type: &str, health: i32, attack: i32, cost: u32) -> UnitTemplate {
        UnitTemplate {
            unit_type: unit_type.to_string(),
            health,
            base_attack: attack,
            cost,
            attack_type: AttackType::Melee,
            attack_bonuses: AHashMap::new(),
            defence_bonuses: AHashMap::new(),
        }
    }

    #[test]
    fn test_efficiency_weights() {
        let t = template("A", 30, 30, 10);
        // 0.7 * 3.0 + 0.3 * 3.0
        assert!((efficiency_score(&t) - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_attack_bonus_multiplies_score() {
        let plain = template("A", 10, 10, 10);
        let mut bonused = template("B", 10, 10, 10);
        bonused.attack_bonuses.insert("Knight".to_string(), 1.5);
        assert!((efficiency_score(&bonused) / efficiency_score(&plain) - 1.2).abs() < 1e-6);
    }

    #[test]
    fn test_zero_cost_scores_zero() {
        assert_eq!(efficiency_score(&template("A", 100, 100, 0)), 0.0);
    }

    #[test]
    fn test_best_ratio_fills_first() {
        let catalog = vec![template("Weak", 5, 5, 10), template("Strong", 30, 30, 10)];

        let army = muster_army(&catalog, 50);

        assert_eq!(army.units.len(), 5);
        assert!(army.units.iter().all(|u| u.unit_type == "Strong"));
        assert_eq!(army.points, 50);
    }

    #[test]
    fn test_bonus_outranks_slightly_better_stats() {
        let plain = template("Plain", 10, 10, 10);
        let mut bonused = template("Bonused", 9, 9, 10);
        bonused.attack_bonuses.insert("Plain".to_string(), 1.5);
        // 0.9 * 1.2 = 1.08 beats 1.0
        let army = muster_army(&[plain, bonused], 20);

        assert_eq!(army.units.len(), 2);
        assert!(army.units.iter().all(|u| u.unit_type == "Bonused"));
    }

    #[test]
    fn test_copies_capped_per_template() {
        let catalog = vec![template("Only", 10, 10, 10)];

        let army = muster_army(&catalog, 100_000);

        assert_eq!(army.units.len(), 11);
        assert_eq!(army.points, 110);
    }

    #[test]
    fn test_unaffordable_template_skipped_for_cheaper() {
        let catalog = vec![
            template("Titan", 10_000, 10_000, 1_000),
            template("Militia", 10, 10, 10),
        ];

        let army = muster_army(&catalog, 100);

        assert_eq!(army.units.len(), 10);
        assert!(army.units.iter().all(|u| u.unit_type == "Militia"));
        assert_eq!(army.points, 100);
    }

    #[test]
    fn test_names_use_army_wide_ordinals() {
        // Equal scores keep catalog order: A fills, then B continues numbering
        let catalog = vec![template("A", 20, 20, 10), template("B", 10, 10, 5)];

        let army = muster_army(&catalog, 25);

        let names: Vec<&str> = army.units.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["A 1", "A 2", "B 3"]);
        assert_eq!(army.points, 25);
    }

    #[test]
    fn test_three_column_placement() {
        let catalog = vec![template("Only", 10, 10, 10)];

        let army = muster_army(&catalog, 70);

        let positions: Vec<(i32, i32)> = army
            .units
            .iter()
            .map(|u| (u.position.x, u.position.y))
            .collect();
        assert_eq!(
            positions,
            vec![
                (24, 10),
                (25, 10),
                (26, 10),
                (24, 11),
                (25, 11),
                (26, 11),
                (24, 12)
            ]
        );
    }

    #[test]
    fn test_deep_muster_clamps_to_bottom_row() {
        let catalog = vec![
            template("A", 10, 10, 1),
            template("B", 9, 9, 1),
            template("C", 8, 8, 1),
            template("D", 7, 7, 1),
        ];

        let army = muster_army(&catalog, 44);

        assert_eq!(army.units.len(), 44);
        assert!(army.units.iter().all(|u| u.position.in_bounds()));
        // Ordinal 44 would land on row 24; it is clamped to the last row
        assert_eq!(army.units.last().unwrap().position.y, FIELD_HEIGHT - 1);
    }

    #[test]
    fn test_empty_inputs_yield_empty_army() {
        assert!(muster_army(&[], 500).units.is_empty());

        let catalog = vec![template("A", 10, 10, 10)];
        let army = muster_army(&catalog, 0);
        assert!(army.units.is_empty());
        assert_eq!(army.points, 0);
    }

    #[test]
    fn test_zero_cost_template_never_fills() {
        let catalog = vec![template("Free", 100, 100, 0), template("Paid", 10, 10, 10)];

        let army = muster_army(&catalog, 30);

        assert_eq!(army.units.len(), 3);
        assert!(army.units.iter().all(|u| u.unit_type == "Paid"));
    }

    #[test]
    fn test_deploy_position_anchors() {
        assert_eq!(deploy_position(1, 0, 10), FieldCoord::new(0, 10));
        assert_eq!(deploy_position(4, 0, 10), FieldCoord::new(0, 11));
        assert_eq!(deploy_position(1, 24, 10), FieldCoord::new(24, 10));
    }
}
