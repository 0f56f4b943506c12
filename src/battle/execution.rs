//! Battle execution loop
//!
//! A battle is a sequence of rounds. Each round snapshots a priority order
//! over every living unit, lets each act once through the plugged-in
//! tactics, and ends the battle as soon as a side has no one left standing.

use serde::{Deserialize, Serialize};

use crate::battle::behavior::{AttackLog, CancelSignal, ImmediatePacing, PacingPolicy, UnitTactics};
use crate::battle::units::{Army, Unit};
use crate::core::types::{Round, Side, UnitId};

/// Battle phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BattlePhase {
    /// Between rounds; also the state of a battle that has not started yet
    #[default]
    RoundComplete,
    RoundInProgress,
    BattleOver,
}

/// Battle outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleOutcome {
    Undecided,
    PlayerVictory,
    EnemyVictory,
    Draw,
}

impl Default for BattleOutcome {
    fn default() -> Self {
        Self::Undecided
    }
}

/// Log entry for battle events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleEvent {
    pub round: Round,
    pub event_type: BattleEventType,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BattleEventType {
    RoundStarted,
    AttackResolved { attacker: UnitId, target: UnitId },
    UnitFell { unit_id: UnitId },
    BattleEnded { outcome: BattleOutcome },
}

/// Log of events from a single round
#[derive(Debug, Clone, Default)]
pub struct BattleEventLog {
    pub events: Vec<BattleEvent>,
}

impl BattleEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event_type: BattleEventType, description: String, round: Round) {
        self.events.push(BattleEvent {
            round,
            event_type,
            description,
        });
    }
}

/// Complete battle state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleState {
    pub player_army: Army,
    pub enemy_army: Army,

    pub round: Round,
    pub phase: BattlePhase,
    pub outcome: BattleOutcome,

    pub battle_log: Vec<BattleEvent>,
}

impl BattleState {
    pub fn new(player_army: Army, enemy_army: Army) -> Self {
        Self {
            player_army,
            enemy_army,
            round: 0,
            phase: BattlePhase::RoundComplete,
            outcome: BattleOutcome::Undecided,
            battle_log: Vec::new(),
        }
    }

    /// Is the battle finished?
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, BattlePhase::BattleOver)
    }

    pub fn army(&self, side: Side) -> &Army {
        match side {
            Side::Player => &self.player_army,
            Side::Enemy => &self.enemy_army,
        }
    }

    pub fn army_mut(&mut self, side: Side) -> &mut Army {
        match side {
            Side::Player => &mut self.player_army,
            Side::Enemy => &mut self.enemy_army,
        }
    }

    /// Get a unit from either army
    pub fn get_unit(&self, unit_id: UnitId) -> Option<&Unit> {
        self.player_army
            .get_unit(unit_id)
            .or_else(|| self.enemy_army.get_unit(unit_id))
    }

    /// Get a mutable unit from either army
    pub fn get_unit_mut(&mut self, unit_id: UnitId) -> Option<&mut Unit> {
        if self.player_army.get_unit(unit_id).is_some() {
            self.player_army.get_unit_mut(unit_id)
        } else {
            self.enemy_army.get_unit_mut(unit_id)
        }
    }

    /// Which roster the unit belongs to
    pub fn side_of(&self, unit_id: UnitId) -> Option<Side> {
        if self.player_army.get_unit(unit_id).is_some() {
            Some(Side::Player)
        } else if self.enemy_army.get_unit(unit_id).is_some() {
            Some(Side::Enemy)
        } else {
            None
        }
    }

    /// Every unit on the field, player roster first
    pub fn all_units(&self) -> impl Iterator<Item = &Unit> {
        self.player_army
            .units
            .iter()
            .chain(self.enemy_army.units.iter())
    }

    /// Log a battle event
    pub fn log_event(&mut self, event_type: BattleEventType, description: String) {
        self.battle_log.push(BattleEvent {
            round: self.round,
            event_type,
            description,
        });
    }

    /// End the battle with an outcome
    pub fn end_battle(&mut self, outcome: BattleOutcome) {
        self.phase = BattlePhase::BattleOver;
        self.outcome = outcome;
        self.log_event(
            BattleEventType::BattleEnded { outcome },
            format!("Battle ended: {:?}", outcome),
        );
    }
}

/// Snapshot the acting order for one round.
///
/// Every living unit participates, player roster first. The sort is by
/// descending base attack, then descending current health, then ascending
/// position in the combined collection. That last key makes the order total:
/// fully equal units act in roster order, every run. Keys are captured here,
/// so mid-round health changes never re-sort an ongoing round.
pub fn turn_order(player_army: &Army, enemy_army: &Army) -> Vec<UnitId> {
    let mut entries: Vec<(usize, i32, i32, UnitId)> = player_army
        .units
        .iter()
        .chain(enemy_army.units.iter())
        .filter(|u| u.is_alive())
        .enumerate()
        .map(|(index, u)| (index, u.base_attack, u.health, u.id))
        .collect();

    entries.sort_by(|a, b| {
        b.1.cmp(&a.1)
            .then_with(|| b.2.cmp(&a.2))
            .then_with(|| a.0.cmp(&b.0))
    });

    entries.into_iter().map(|(_, _, _, id)| id).collect()
}

/// Check if the battle should end
pub fn check_battle_end(state: &BattleState) -> Option<BattleOutcome> {
    let player_alive = state.player_army.has_alive_units();
    let enemy_alive = state.enemy_army.has_alive_units();

    match (player_alive, enemy_alive) {
        (true, true) => None,
        (true, false) => Some(BattleOutcome::PlayerVictory),
        (false, true) => Some(BattleOutcome::EnemyVictory),
        (false, false) => Some(BattleOutcome::Draw),
    }
}

/// Drives a battle to its outcome.
///
/// Owns the state plus the pluggable seams: tactics decide each unit's
/// action, an optional attack log observes resolved strikes, and a pacing
/// policy spaces turns and rounds. Hosts keep a `CancelSignal` clone to stop
/// a long battle; the loop checks it between turns and between rounds.
pub struct BattleRunner {
    state: BattleState,
    tactics: Box<dyn UnitTactics>,
    attack_log: Option<Box<dyn AttackLog>>,
    pacing: Box<dyn PacingPolicy>,
    cancel: CancelSignal,
}

impl BattleRunner {
    pub fn new(state: BattleState, tactics: Box<dyn UnitTactics>) -> Self {
        Self {
            state,
            tactics,
            attack_log: None,
            pacing: Box::new(ImmediatePacing),
            cancel: CancelSignal::new(),
        }
    }

    pub fn set_attack_log(&mut self, attack_log: Option<Box<dyn AttackLog>>) {
        self.attack_log = attack_log;
    }

    pub fn set_pacing(&mut self, pacing: Box<dyn PacingPolicy>) {
        self.pacing = pacing;
    }

    /// A clone of the runner's cancellation flag
    pub fn cancel_signal(&self) -> CancelSignal {
        self.cancel.clone()
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn into_state(self) -> BattleState {
        self.state
    }

    /// Run a single round and return its events.
    ///
    /// Dead units are re-checked at their turn: a unit killed earlier in the
    /// round loses its action. The round cuts off early once a side is wiped
    /// out; surviving units keep their unspent turns for nothing.
    pub fn run_round(&mut self) -> BattleEventLog {
        let mut events = BattleEventLog::new();

        if self.state.is_finished() {
            return events;
        }

        self.state.round += 1;
        self.state.phase = BattlePhase::RoundInProgress;
        tracing::debug!("round {} begins", self.state.round);
        self.log_round_event(
            &mut events,
            BattleEventType::RoundStarted,
            format!("Round {} begins", self.state.round),
        );

        let order = turn_order(&self.state.player_army, &self.state.enemy_army);

        for unit_id in order {
            if self.cancel.is_cancelled() {
                break;
            }

            let alive = self
                .state
                .get_unit(unit_id)
                .map(|u| u.is_alive())
                .unwrap_or(false);
            if !alive {
                continue;
            }

            if let Some(target_id) = self.tactics.attack(unit_id, &mut self.state) {
                self.record_attack(unit_id, target_id, &mut events);
            }

            if check_battle_end(&self.state).is_some() {
                break;
            }

            self.pacing.between_turns();
        }

        self.state.phase = BattlePhase::RoundComplete;

        if let Some(outcome) = check_battle_end(&self.state) {
            self.state.end_battle(outcome);
            events.push(
                BattleEventType::BattleEnded { outcome },
                format!("Battle ended: {:?}", outcome),
                self.state.round,
            );
        }

        events
    }

    /// Run rounds until the battle ends or the signal cancels it.
    ///
    /// Returns the final outcome; a cancelled battle reports `Undecided` and
    /// leaves the state between rounds, ready to resume.
    pub fn run_to_completion(&mut self) -> BattleOutcome {
        // An empty muster can decide the battle before any round is fought
        if !self.state.is_finished() {
            if let Some(outcome) = check_battle_end(&self.state) {
                self.state.end_battle(outcome);
            }
        }

        while !self.state.is_finished() {
            if self.cancel.is_cancelled() {
                tracing::debug!("battle cancelled after round {}", self.state.round);
                return BattleOutcome::Undecided;
            }

            self.run_round();

            if self.state.is_finished() {
                break;
            }
            self.pacing.between_rounds();
        }

        tracing::info!(
            "battle over after {} rounds: {:?}",
            self.state.round,
            self.state.outcome
        );
        self.state.outcome
    }

    fn record_attack(&mut self, attacker_id: UnitId, target_id: UnitId, events: &mut BattleEventLog) {
        let Some(attacker) = self.state.get_unit(attacker_id) else {
            return;
        };
        let Some(target) = self.state.get_unit(target_id) else {
            return;
        };

        let description = format!(
            "{} hits {} ({} health left)",
            attacker.name, target.name, target.health
        );
        let target_fell = !target.is_alive();
        let target_name = target.name.clone();

        if let Some(log) = self.attack_log.as_mut() {
            log.record(attacker, target);
        }

        self.log_round_event(
            events,
            BattleEventType::AttackResolved {
                attacker: attacker_id,
                target: target_id,
            },
            description,
        );

        if target_fell {
            self.log_round_event(
                events,
                BattleEventType::UnitFell { unit_id: target_id },
                format!("{} falls", target_name),
            );
        }
    }

    /// Push an event into the round log and the persistent battle log
    fn log_round_event(
        &mut self,
        events: &mut BattleEventLog,
        event_type: BattleEventType,
        description: String,
    ) {
        events.push(event_type.clone(), description.clone(), self.state.round);
        self.state.log_event(event_type, description);
    }
}
