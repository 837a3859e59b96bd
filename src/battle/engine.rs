use crate::battle::ai::{Behavior, RandomMoveAi};
use crate::battle::calculators::{resolve_move, MoveOutcome};
use crate::battle::state::{BattleEvent, BattlePhase, BattleSession, EventBus, Side, TurnRng};
use crate::combatant::{CombatEntity, CombatantBuilder};
use crate::config::BattleConfig;
use crate::errors::{BattleResult, SubmissionError, SubmissionResult};
use crate::move_data::MoveCatalog;
use crate::source::{derive_wild_opponent, CreatureSource};
use schema::CreatureRecord;
use std::borrow::Cow;

/// What a side did with its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnAction {
    UsedMove { index: usize },
    Passed,
}

/// Result of one accepted turn.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnReport {
    pub side: Side,
    pub action: TurnAction,
    /// `None` when the side passed.
    pub outcome: Option<MoveOutcome>,
    pub events: EventBus,
    /// Phase after the turn was applied.
    pub phase: BattlePhase,
}

/// Owns one battle session and the random stream that drives it.
///
/// The player controls `Side::First`; `Side::Second` is chosen by the
/// engine's `Behavior` whenever `trigger_automated_turn` is called.
pub struct BattleEngine {
    config: BattleConfig,
    catalog: Cow<'static, MoveCatalog>,
    session: BattleSession,
    rng: TurnRng,
    behavior: Box<dyn Behavior>,
}

impl BattleEngine {
    pub fn new(config: BattleConfig) -> BattleResult<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => TurnRng::from_seed(seed),
            None => TurnRng::new_random(),
        };
        Ok(Self {
            config,
            catalog: Cow::Borrowed(MoveCatalog::builtin()),
            session: BattleSession::idle(),
            rng,
            behavior: Box::new(RandomMoveAi::new()),
        })
    }

    pub fn with_catalog(mut self, catalog: MoveCatalog) -> Self {
        self.catalog = Cow::Owned(catalog);
        self
    }

    pub fn with_rng(mut self, rng: TurnRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn with_behavior(mut self, behavior: impl Behavior + 'static) -> Self {
        self.behavior = Box::new(behavior);
        self
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn catalog(&self) -> &MoveCatalog {
        &self.catalog
    }

    /// Read-only view of the current session for rendering.
    pub fn snapshot(&self) -> &BattleSession {
        &self.session
    }

    /// Discard the current session and return to `Idle`.
    pub fn reset(&mut self) {
        if self.session.phase() == BattlePhase::InProgress {
            tracing::info!(turn = self.session.turn_number(), "battle reset mid-encounter");
        }
        self.session = BattleSession::idle();
    }

    /// True when the automated side is due to act and nothing holds the lock.
    pub fn is_awaiting_automated_turn(&self) -> bool {
        self.session.phase() == BattlePhase::InProgress
            && self.session.side_to_act() == Side::Second
            && !self.session.turn_lock()
    }

    /// Held by the presentation layer while a turn is being shown.
    pub fn set_turn_lock(&mut self, locked: bool) {
        self.session.set_turn_lock(locked);
    }

    fn builder(&self) -> CombatantBuilder<'_> {
        CombatantBuilder::new(&self.catalog, self.config.level)
    }

    /// Start a battle against a wild copy of `record`.
    pub fn start_encounter(&mut self, record: &CreatureRecord) -> BattleResult<()> {
        let wild = &self.config.wild_opponent;
        let id = self.rng.id_in_range(wild.min_id, wild.max_id);
        let opponent = derive_wild_opponent(record, id, wild);
        self.start_encounter_against(record, &opponent)
    }

    /// Like `start_encounter`, but the drawn id is looked up in `source`
    /// first. The wild copy is only used when the source has no such record.
    pub fn start_encounter_from_source(
        &mut self,
        record: &CreatureRecord,
        source: &dyn CreatureSource,
    ) -> BattleResult<()> {
        let wild = &self.config.wild_opponent;
        let id = self.rng.id_in_range(wild.min_id, wild.max_id);
        let opponent = match source.by_id(id) {
            Some(found) => found,
            None => {
                tracing::debug!(id, "no source record for drawn id, using wild copy");
                derive_wild_opponent(record, id, wild)
            }
        };
        self.start_encounter_against(record, &opponent)
    }

    /// Start a battle between two explicit records.
    ///
    /// Both combatants are built before anything changes, so an invalid
    /// record leaves the current session as it was.
    pub fn start_encounter_against(
        &mut self,
        first: &CreatureRecord,
        second: &CreatureRecord,
    ) -> BattleResult<()> {
        let builder = self.builder();
        let first = builder.build(first)?;
        let second = builder.build(second)?;

        if self.session.phase() == BattlePhase::InProgress {
            tracing::warn!(
                turn = self.session.turn_number(),
                "abandoning battle in progress for a new encounter"
            );
        }

        let side_to_act = faster_side(&first, &second);
        tracing::info!(
            first = %first.display_name,
            second = %second.display_name,
            ?side_to_act,
            "encounter started"
        );
        self.session = BattleSession::begin(first, second, side_to_act);
        Ok(())
    }

    /// Player submits the move at `move_index`.
    pub fn submit_move(&mut self, move_index: usize) -> SubmissionResult<TurnReport> {
        self.submit_move_for(Side::First, move_index)
    }

    /// Submit a move on behalf of either side.
    pub fn submit_move_for(&mut self, side: Side, move_index: usize) -> SubmissionResult<TurnReport> {
        self.check_can_act(side)?;
        let acting = self.acting(side)?;
        let move_instance = acting
            .moves()
            .get(move_index)
            .ok_or(SubmissionError::InvalidMoveIndex(move_index))?;
        if !move_instance.is_usable() {
            return Err(SubmissionError::MoveDepleted(move_index));
        }
        self.execute(side, TurnAction::UsedMove { index: move_index })
    }

    /// Let the automated side take its turn.
    ///
    /// With no usable move left the side passes instead.
    pub fn trigger_automated_turn(&mut self) -> SubmissionResult<TurnReport> {
        let side = Side::Second;
        self.check_can_act(side)?;

        let (Some(acting), Some(opponent)) = (
            self.session.combatant(side),
            self.session.combatant(side.opponent()),
        ) else {
            return Err(SubmissionError::BattleNotInProgress {
                phase: self.session.phase(),
            });
        };
        let choice = self.behavior.choose_move(acting, opponent, &mut self.rng);
        match choice {
            Some(index) => self.submit_move_for(side, index),
            None => {
                tracing::debug!(?side, "no usable moves, passing");
                self.execute(side, TurnAction::Passed)
            }
        }
    }

    /// Player passes. Only allowed once every move is depleted.
    pub fn pass_turn(&mut self) -> SubmissionResult<TurnReport> {
        let side = Side::First;
        self.check_can_act(side)?;
        if self.acting(side)?.has_usable_moves() {
            return Err(SubmissionError::MovesStillUsable);
        }
        self.execute(side, TurnAction::Passed)
    }

    fn check_can_act(&self, side: Side) -> SubmissionResult<()> {
        let phase = self.session.phase();
        if phase != BattlePhase::InProgress {
            return Err(SubmissionError::BattleNotInProgress { phase });
        }
        if self.session.side_to_act() != side {
            return Err(SubmissionError::NotPlayersTurn { side });
        }
        if self.session.turn_lock() {
            return Err(SubmissionError::BattleLocked);
        }
        Ok(())
    }

    fn acting(&self, side: Side) -> SubmissionResult<&CombatEntity> {
        self.session
            .combatant(side)
            .ok_or(SubmissionError::BattleNotInProgress {
                phase: self.session.phase(),
            })
    }

    /// Apply an already validated action under the turn lock.
    fn execute(&mut self, side: Side, action: TurnAction) -> SubmissionResult<TurnReport> {
        let mut bus = EventBus::new();

        self.session.set_turn_lock(true);
        let result = self.apply(side, action, &mut bus);
        self.session.set_turn_lock(false);
        let outcome = result?;

        if outcome.is_some_and(|outcome| outcome.defender_fainted) {
            let winner_name = self
                .session
                .combatant(side)
                .map(|combatant| combatant.display_name.clone())
                .unwrap_or_default();
            bus.push(BattleEvent::BattleEnded {
                winner: side,
                winner_name,
            });
            self.session.finish(side);
            tracing::info!(winner = ?side, turn = self.session.turn_number(), "battle over");
        } else {
            self.session.advance_turn();
        }

        bus.log_debug();
        self.session.record(&bus);

        Ok(TurnReport {
            side,
            action,
            outcome,
            events: bus,
            phase: self.session.phase(),
        })
    }

    fn apply(
        &mut self,
        side: Side,
        action: TurnAction,
        bus: &mut EventBus,
    ) -> SubmissionResult<Option<MoveOutcome>> {
        let phase = self.session.phase();
        let (attacker, defender) = self
            .session
            .attacker_and_defender(side)
            .ok_or(SubmissionError::BattleNotInProgress { phase })?;

        match action {
            TurnAction::UsedMove { index } => {
                resolve_move(side, attacker, defender, index, &mut self.rng, bus).map(Some)
            }
            TurnAction::Passed => {
                bus.push(BattleEvent::TurnPassed {
                    side,
                    name: attacker.display_name.clone(),
                });
                Ok(None)
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn session_mut(&mut self) -> &mut BattleSession {
        &mut self.session
    }
}

/// The strictly faster combatant acts first; ties go to the first side.
fn faster_side(first: &CombatEntity, second: &CombatEntity) -> Side {
    if first.speed() >= second.speed() {
        Side::First
    } else {
        Side::Second
    }
}
