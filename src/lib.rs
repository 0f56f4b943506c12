//! Warline - Deterministic Grid Auto-Battler

pub mod battle;
pub mod core;
