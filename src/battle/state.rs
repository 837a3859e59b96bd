use crate::combatant::CombatEntity;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use schema::Effectiveness;
use serde::{Deserialize, Serialize};

/// One of the two participants. `First` is the player, `Second` the automated opponent.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    First,
    Second,
}

impl Side {
    pub fn index(self) -> usize {
        match self {
            Side::First => 0,
            Side::Second => 1,
        }
    }

    pub fn opponent(self) -> Side {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattlePhase {
    Idle,
    InProgress,
    FirstWon,
    SecondWon,
}

impl BattlePhase {
    pub fn won_by(side: Side) -> Self {
        match side {
            Side::First => BattlePhase::FirstWon,
            Side::Second => BattlePhase::SecondWon,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, BattlePhase::FirstWon | BattlePhase::SecondWon)
    }

    pub fn winner(self) -> Option<Side> {
        match self {
            BattlePhase::FirstWon => Some(Side::First),
            BattlePhase::SecondWon => Some(Side::Second),
            _ => None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    // Encounter Management
    EncounterStarted {
        first: String,
        second: String,
    },
    BattleBegan,

    // Move Resolution
    MoveUsed {
        side: Side,
        attacker: String,
        move_name: String,
    },
    MoveMissed {
        side: Side,
        attacker: String,
    },
    AttackTypeEffectiveness {
        effectiveness: Effectiveness,
    },
    DamageDealt {
        side: Side,
        target: String,
        damage: u16,
        remaining_hp: u16,
    },
    CreatureFainted {
        side: Side,
        name: String,
    },
    TurnPassed {
        side: Side,
        name: String,
    },

    // Battle End
    BattleEnded {
        winner: Side,
        winner_name: String,
    },
}

impl BattleEvent {
    /// Narration line for this event.
    /// Returns None for silent events that should not produce user-visible text.
    pub fn format(&self) -> Option<String> {
        match self {
            BattleEvent::EncounterStarted { first, second } => {
                Some(format!("{} vs {}!", first, second))
            }
            BattleEvent::BattleBegan => Some("Battle begins!".to_string()),
            BattleEvent::MoveUsed {
                attacker, move_name, ..
            } => Some(format!("{} used {}!", attacker, move_name)),
            BattleEvent::MoveMissed { attacker, .. } => {
                Some(format!("{}'s attack missed!", attacker))
            }
            BattleEvent::AttackTypeEffectiveness { effectiveness } => match effectiveness {
                Effectiveness::Super => Some("It's super effective!".to_string()),
                Effectiveness::Weak => Some("It's not very effective...".to_string()),
                Effectiveness::Immune => Some("It had no effect!".to_string()),
                Effectiveness::Normal => None,
            },
            BattleEvent::DamageDealt { .. } => {
                None // Silent - the HP bar shows it
            }
            BattleEvent::CreatureFainted { name, .. } => Some(format!("{} fainted!", name)),
            BattleEvent::TurnPassed { name, .. } => {
                Some(format!("{} has no moves left and can't act!", name))
            }
            BattleEvent::BattleEnded { winner_name, .. } => {
                Some(format!("{} wins!", winner_name))
            }
        }
    }
}

/// Event bus for collecting the events of a single command.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    /// Narration lines for the non-silent events, in order.
    pub fn narration(&self) -> impl Iterator<Item = String> + '_ {
        self.events.iter().filter_map(BattleEvent::format)
    }

    /// Emit every event at debug level.
    pub fn log_debug(&self) {
        for event in &self.events {
            tracing::debug!(?event, "battle event");
        }
    }

    /// Return true if the event bus contains no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Return the number of events in the bus.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl std::fmt::Display for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for event in &self.events {
            writeln!(f, "  {:?}", event)?;
        }
        Ok(())
    }
}

/// Source of every random draw the battle makes.
///
/// Live streams come from a seedable RNG. Test streams replay a fixed list
/// of unit values in `[0.0, 1.0]`, each mapped onto the range the caller asks for.
#[derive(Debug, Clone)]
pub struct TurnRng {
    source: RngSource,
}

#[derive(Debug, Clone)]
enum RngSource {
    Live(StdRng),
    #[cfg(test)]
    Scripted { outcomes: Vec<f64>, index: usize },
}

impl TurnRng {
    pub fn new_random() -> Self {
        Self {
            source: RngSource::Live(StdRng::from_os_rng()),
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            source: RngSource::Live(StdRng::seed_from_u64(seed)),
        }
    }

    #[cfg(test)]
    pub fn new_for_test(outcomes: Vec<f64>) -> Self {
        Self {
            source: RngSource::Scripted { outcomes, index: 0 },
        }
    }

    #[cfg(test)]
    fn next_scripted(outcomes: &[f64], index: &mut usize, reason: &str) -> f64 {
        let Some(outcome) = outcomes.get(*index).copied() else {
            panic!(
                "TurnRng exhausted! Tried to get a value for: '{}'. Need more random values.",
                reason
            );
        };
        *index += 1;
        outcome.clamp(0.0, 1.0)
    }

    /// Uniform roll in `[0, 100)` compared against a move's accuracy.
    pub fn hit_roll(&mut self) -> f64 {
        let roll = match &mut self.source {
            RngSource::Live(rng) => rng.random_range(0.0..100.0),
            #[cfg(test)]
            RngSource::Scripted { outcomes, index } => {
                Self::next_scripted(outcomes, index, "hit roll") * 100.0
            }
        };
        tracing::trace!(roll, "rng: hit roll");
        roll
    }

    /// Uniform damage spread in `[0.85, 1.00]`.
    pub fn damage_factor(&mut self) -> f64 {
        let factor = match &mut self.source {
            RngSource::Live(rng) => rng.random_range(0.85..=1.0),
            #[cfg(test)]
            RngSource::Scripted { outcomes, index } => {
                0.85 + 0.15 * Self::next_scripted(outcomes, index, "damage factor")
            }
        };
        tracing::trace!(factor, "rng: damage factor");
        factor
    }

    /// Uniformly pick an index below `len`. `len` must be non-zero.
    pub fn pick_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "pick_index needs a non-empty range");
        let last = len.saturating_sub(1);
        let picked = match &mut self.source {
            RngSource::Live(rng) => rng.random_range(0..=last),
            #[cfg(test)]
            RngSource::Scripted { outcomes, index } => {
                let unit = Self::next_scripted(outcomes, index, "pick index");
                ((unit * len as f64) as usize).min(last)
            }
        };
        tracing::trace!(picked, len, "rng: pick index");
        picked
    }

    /// Uniformly draw an identifier in `min..=max`.
    pub fn id_in_range(&mut self, min: u32, max: u32) -> u32 {
        let (min, max) = (min.min(max), min.max(max));
        let id = match &mut self.source {
            RngSource::Live(rng) => rng.random_range(min..=max),
            #[cfg(test)]
            RngSource::Scripted { outcomes, index } => {
                let unit = Self::next_scripted(outcomes, index, "opponent id");
                let span = f64::from(max - min) + 1.0;
                min + ((unit * span) as u32).min(max - min)
            }
        };
        tracing::trace!(id, "rng: opponent id");
        id
    }
}

/// Append-only narration of an encounter.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct BattleLog {
    lines: Vec<String>,
}

impl BattleLog {
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Append the narration of every non-silent event on the bus.
    pub fn record(&mut self, bus: &EventBus) {
        self.lines.extend(bus.narration());
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Lines appended after `cursor` lines had been consumed.
    pub fn since(&self, cursor: usize) -> &[String] {
        self.lines.get(cursor..).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// State of one encounter. Created idle, mutated only by the engine.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BattleSession {
    combatants: Option<[CombatEntity; 2]>,
    side_to_act: Side,
    phase: BattlePhase,
    log: BattleLog,
    turn_lock: bool,
    turn_number: u32,
}

impl Default for BattleSession {
    fn default() -> Self {
        Self::idle()
    }
}

impl BattleSession {
    pub fn idle() -> Self {
        Self {
            combatants: None,
            side_to_act: Side::First,
            phase: BattlePhase::Idle,
            log: BattleLog::default(),
            turn_lock: false,
            turn_number: 0,
        }
    }

    pub(crate) fn begin(first: CombatEntity, second: CombatEntity, side_to_act: Side) -> Self {
        let mut bus = EventBus::new();
        bus.push(BattleEvent::EncounterStarted {
            first: first.display_name.clone(),
            second: second.display_name.clone(),
        });
        bus.push(BattleEvent::BattleBegan);

        let mut log = BattleLog::default();
        log.record(&bus);

        Self {
            combatants: Some([first, second]),
            side_to_act,
            phase: BattlePhase::InProgress,
            log,
            turn_lock: false,
            turn_number: 1,
        }
    }

    pub fn side_to_act(&self) -> Side {
        self.side_to_act
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn log(&self) -> &BattleLog {
        &self.log
    }

    pub fn turn_lock(&self) -> bool {
        self.turn_lock
    }

    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    pub fn combatant(&self, side: Side) -> Option<&CombatEntity> {
        self.combatants
            .as_ref()
            .map(|combatants| &combatants[side.index()])
    }

    /// The acting combatant and its target, mutably.
    pub(crate) fn attacker_and_defender(
        &mut self,
        attacker: Side,
    ) -> Option<(&mut CombatEntity, &mut CombatEntity)> {
        let [first, second] = self.combatants.as_mut()?;
        match attacker {
            Side::First => Some((first, second)),
            Side::Second => Some((second, first)),
        }
    }

    #[cfg(test)]
    pub(crate) fn combatant_mut(&mut self, side: Side) -> Option<&mut CombatEntity> {
        self.combatants
            .as_mut()
            .map(|combatants| &mut combatants[side.index()])
    }

    pub(crate) fn set_turn_lock(&mut self, locked: bool) {
        self.turn_lock = locked;
    }

    pub(crate) fn record(&mut self, bus: &EventBus) {
        self.log.record(bus);
    }

    /// Hand the turn to the other side.
    pub(crate) fn advance_turn(&mut self) {
        self.side_to_act = self.side_to_act.opponent();
        self.turn_number += 1;
    }

    pub(crate) fn finish(&mut self, winner: Side) {
        self.phase = BattlePhase::won_by(winner);
    }
}
