//! Battle system constants - all tunable values in one place
//!
//! Movement costs and the heuristic factor are load-bearing: generated paths
//! depend on their exact values, so changing them changes battle results.

// Field dimensions (cells)
pub const FIELD_WIDTH: i32 = 27;
pub const FIELD_HEIGHT: i32 = 21;

// Movement costs (scaled x10 to stay in integers)
pub const STRAIGHT_MOVE_COST: u32 = 10;
pub const DIAGONAL_MOVE_COST: u32 = 14; // sqrt(2) * 10, rounded

// Octile heuristic: 10 * max(dx, dy) + 4 * min(dx, dy).
// The factor is the floor of (sqrt(2) - 1) * 10 and is kept deliberately
// coarse; it stays admissible and existing paths depend on it.
pub const OCTILE_DIAGONAL_FACTOR: u32 = 4;

// Real-time pacing defaults
pub const DELAY_BETWEEN_TURNS_MS: u64 = 10;
pub const DELAY_BETWEEN_ROUNDS_MS: u64 = 100;

// Muster policy
pub const DEPLOY_COLUMNS: usize = 3;
pub const ENEMY_DEPLOY_X: i32 = 24;
pub const ENEMY_DEPLOY_Y: i32 = 10;
pub const PLAYER_DEPLOY_X: i32 = 0;
pub const PLAYER_DEPLOY_Y: i32 = 10;
pub const MAX_COPIES_PER_TEMPLATE: u32 = 11;
pub const EFFICIENCY_ATTACK_WEIGHT: f32 = 0.7;
pub const EFFICIENCY_HEALTH_WEIGHT: f32 = 0.3;
pub const ATTACK_BONUS_MULTIPLIER: f32 = 1.2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_dimensions() {
        assert_eq!(FIELD_WIDTH, 27);
        assert_eq!(FIELD_HEIGHT, 21);
    }

    #[test]
    fn test_diagonal_cost_between_one_and_two_straights() {
        assert!(DIAGONAL_MOVE_COST > STRAIGHT_MOVE_COST);
        assert!(DIAGONAL_MOVE_COST < 2 * STRAIGHT_MOVE_COST);
    }

    #[test]
    fn test_heuristic_factor_admissible() {
        // True unobstructed cost is STRAIGHT * max + (DIAGONAL - STRAIGHT) * min,
        // so the estimate stays admissible only while the factor is at most
        // DIAGONAL - STRAIGHT.
        assert!(OCTILE_DIAGONAL_FACTOR <= DIAGONAL_MOVE_COST - STRAIGHT_MOVE_COST);
    }

    #[test]
    fn test_efficiency_weights_sum_to_one() {
        assert!((EFFICIENCY_ATTACK_WEIGHT + EFFICIENCY_HEALTH_WEIGHT - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_enemy_deployment_fits_field() {
        assert!(ENEMY_DEPLOY_X + DEPLOY_COLUMNS as i32 <= FIELD_WIDTH);
        assert!(ENEMY_DEPLOY_Y < FIELD_HEIGHT);
    }
}
