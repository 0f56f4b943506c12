//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for combatants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitId(pub Uuid);

impl UnitId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UnitId {
    fn default() -> Self {
        Self::new()
    }
}

/// Which roster a combatant fights for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    /// The roster this side fights against
    pub fn opponent(&self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}

/// Battle round counter
pub type Round = u32;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_id_unique() {
        let a = UnitId::new();
        let b = UnitId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_unit_id_hash() {
        use std::collections::HashMap;
        let id = UnitId::new();
        let mut map: HashMap<UnitId, &str> = HashMap::new();
        map.insert(id, "pikeman");
        assert_eq!(map.get(&id), Some(&"pikeman"));
    }

    #[test]
    fn test_side_opponent() {
        assert_eq!(Side::Player.opponent(), Side::Enemy);
        assert_eq!(Side::Enemy.opponent(), Side::Player);
    }
}
