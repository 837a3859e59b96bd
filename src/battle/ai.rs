//! A module for defining AI behaviors for battle opponents.

use crate::battle::state::TurnRng;
use crate::combatant::CombatEntity;

/// A trait for any system that can decide on a move for the automated side.
pub trait Behavior {
    /// Index of the move to use, or `None` when no move can be used.
    fn choose_move(
        &self,
        combatant: &CombatEntity,
        opponent: &CombatEntity,
        rng: &mut TurnRng,
    ) -> Option<usize>;
}

/// Picks uniformly among the moves that still have uses left.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomMoveAi;

impl RandomMoveAi {
    pub fn new() -> Self {
        Self
    }
}

impl Behavior for RandomMoveAi {
    fn choose_move(
        &self,
        combatant: &CombatEntity,
        _opponent: &CombatEntity,
        rng: &mut TurnRng,
    ) -> Option<usize> {
        let usable = combatant.usable_move_indices();
        if usable.is_empty() {
            return None;
        }
        Some(usable[rng.pick_index(usable.len())])
    }
}
