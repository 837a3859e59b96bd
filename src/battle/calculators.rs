use crate::battle::state::{BattleEvent, EventBus, Side, TurnRng};
use crate::battle::stats::{calculate_damage, move_hits};
use crate::combatant::CombatEntity;
use crate::errors::{SubmissionError, SubmissionResult};
use schema::Effectiveness;
use serde::{Deserialize, Serialize};

/// What happened when a move was resolved.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub hit: bool,
    pub damage: u16,
    /// Effectiveness of the move's element against the defender, hit or not.
    pub effectiveness: Effectiveness,
    pub defender_fainted: bool,
}

/// Resolve one move from `attacker` against `defender`.
///
/// Spends one use of the move whether it hits or not. An out-of-range index
/// or a depleted move is refused before anything changes.
///
/// Random draws, in order: the hit roll, then (on a hit) the damage factor.
pub fn resolve_move(
    side: Side,
    attacker: &mut CombatEntity,
    defender: &mut CombatEntity,
    move_index: usize,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) -> SubmissionResult<MoveOutcome> {
    let level = attacker.level;
    let attack = attacker.attack();
    let attacker_name = attacker.display_name.clone();

    let move_instance = attacker
        .move_mut(move_index)
        .ok_or(SubmissionError::InvalidMoveIndex(move_index))?;
    if !move_instance.use_move() {
        return Err(SubmissionError::MoveDepleted(move_index));
    }
    let template = move_instance.template.clone();

    bus.push(BattleEvent::MoveUsed {
        side,
        attacker: attacker_name.clone(),
        move_name: template.name.clone(),
    });

    let effectiveness = template.element.effectiveness_against(defender.types());

    if !move_hits(template.accuracy, rng) {
        bus.push(BattleEvent::MoveMissed {
            side,
            attacker: attacker_name,
        });
        return Ok(MoveOutcome {
            hit: false,
            damage: 0,
            effectiveness,
            defender_fainted: false,
        });
    }

    let random_factor = rng.damage_factor();
    let damage = calculate_damage(
        level,
        attack,
        defender.defense(),
        template.base_power,
        effectiveness,
        random_factor,
    );

    if effectiveness != Effectiveness::Normal {
        bus.push(BattleEvent::AttackTypeEffectiveness { effectiveness });
    }

    defender.take_damage(damage);
    bus.push(BattleEvent::DamageDealt {
        side: side.opponent(),
        target: defender.display_name.clone(),
        damage,
        remaining_hp: defender.current_hp(),
    });

    let defender_fainted = defender.is_fainted();
    if defender_fainted {
        bus.push(BattleEvent::CreatureFainted {
            side: side.opponent(),
            name: defender.display_name.clone(),
        });
    }

    Ok(MoveOutcome {
        hit: true,
        damage,
        effectiveness,
        defender_fainted,
    })
}
