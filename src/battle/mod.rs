//! Battle system - deterministic grid combat between two armies
//!
//! Units fight on a fixed 27x21 field. Each round every living unit takes
//! one turn, ordered by attack then health; turns route melee units with
//! A* pathfinding, pick ranged targets by distance, and resolve damage
//! through per-type bonus tables. The whole loop is deterministic: the
//! same armies in the same state always produce the same battle.

pub mod behavior;
pub mod catalog;
pub mod constants;
pub mod execution;
pub mod grid;
pub mod muster;
pub mod pathfinding;
pub mod tactics;
pub mod targeting;
pub mod units;

// Re-exports for convenient access
pub use behavior::{
    AttackLog, CancelSignal, ImmediatePacing, PacingPolicy, RealtimePacing, UnitTactics,
};
pub use catalog::{load_catalog, parse_catalog, UnitTemplate};
pub use constants::*;
pub use execution::{
    check_battle_end, turn_order, BattleEvent, BattleEventLog, BattleEventType, BattleOutcome,
    BattlePhase, BattleRunner, BattleState,
};
pub use grid::{FieldCoord, FieldGrid};
pub use muster::{deploy_position, efficiency_score, muster_army};
pub use pathfinding::{find_path, octile_distance, path_cost};
pub use tactics::BasicTactics;
pub use targeting::select_front_units;
pub use units::{Army, AttackType, Unit};
