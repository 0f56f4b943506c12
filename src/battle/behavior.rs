//! Pluggable seams around the battle loop
//!
//! Architecture: the round loop owns ordering and liveness, everything else
//! is swappable:
//! - UnitTactics decides what an acting unit does
//! - AttackLog observes resolved attacks (absent by default)
//! - PacingPolicy spaces turns and rounds for presentation
//! - CancelSignal stops a running battle from another thread

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::battle::constants::{DELAY_BETWEEN_ROUNDS_MS, DELAY_BETWEEN_TURNS_MS};
use crate::battle::execution::BattleState;
use crate::battle::units::Unit;
use crate::core::types::UnitId;

/// Attack behavior invoked once per unit turn.
///
/// The implementation gets full mutable access to the battle state: it picks
/// a target, applies damage, and reports the target's id, or `None` when the
/// unit cannot act this turn. The loop never inspects how the choice was
/// made, so tactics are free to consult pathfinding and target selection or
/// to do something entirely different.
pub trait UnitTactics {
    fn attack(&mut self, actor: UnitId, state: &mut BattleState) -> Option<UnitId>;
}

/// Sink for resolved attacks, called after damage is applied
pub trait AttackLog {
    fn record(&mut self, attacker: &Unit, target: &Unit);
}

/// Controls the real-time spacing of the battle loop.
///
/// The loop calls these hooks between turns and between rounds; they run on
/// the battle thread, so a sleeping implementation stalls only the battle.
pub trait PacingPolicy {
    fn between_turns(&mut self);
    fn between_rounds(&mut self);
}

/// No delays. The default for tests and headless runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediatePacing;

impl PacingPolicy for ImmediatePacing {
    fn between_turns(&mut self) {}
    fn between_rounds(&mut self) {}
}

/// Wall-clock pacing for spectated battles
#[derive(Debug, Clone, Copy)]
pub struct RealtimePacing {
    pub turn_delay: Duration,
    pub round_delay: Duration,
}

impl Default for RealtimePacing {
    fn default() -> Self {
        Self {
            turn_delay: Duration::from_millis(DELAY_BETWEEN_TURNS_MS),
            round_delay: Duration::from_millis(DELAY_BETWEEN_ROUNDS_MS),
        }
    }
}

impl PacingPolicy for RealtimePacing {
    fn between_turns(&mut self) {
        thread::sleep(self.turn_delay);
    }

    fn between_rounds(&mut self) {
        thread::sleep(self.round_delay);
    }
}

/// Shared flag to stop a battle between turns or rounds.
///
/// Clones observe the same flag, so a host can keep one clone and hand the
/// runner another. Cancellation is cooperative: a turn already underway
/// finishes before the loop notices.
#[derive(Debug, Clone, Default)]
pub struct CancelSignal(Arc<AtomicBool>);

impl CancelSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_signal_shared_across_clones() {
        let signal = CancelSignal::new();
        let clone = signal.clone();
        assert!(!clone.is_cancelled());

        signal.cancel();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn test_cancel_signal_from_other_thread() {
        let signal = CancelSignal::new();
        let remote = signal.clone();
        let handle = thread::spawn(move || remote.cancel());
        handle.join().unwrap();
        assert!(signal.is_cancelled());
    }

    #[test]
    fn test_immediate_pacing_is_instant() {
        let mut pacing = ImmediatePacing;
        let start = std::time::Instant::now();
        for _ in 0..1000 {
            pacing.between_turns();
            pacing.between_rounds();
        }
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[test]
    fn test_realtime_pacing_defaults() {
        let pacing = RealtimePacing::default();
        assert_eq!(pacing.turn_delay, Duration::from_millis(10));
        assert_eq!(pacing.round_delay, Duration::from_millis(100));
    }
}
