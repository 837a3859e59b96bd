use crate::errors::SourceRecordError;
use crate::move_data::{MoveCatalog, MoveInstance};
use schema::{CreatureRecord, ElementType};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Fallback base stats for records that omit a stat (or report zero).
pub const FALLBACK_BASE_HP: u16 = 45;
pub const FALLBACK_BASE_ATTACK: u16 = 49;
pub const FALLBACK_BASE_DEFENSE: u16 = 49;
pub const FALLBACK_BASE_SPEED: u16 = 45;

pub const MIN_MOVES: usize = 2;
pub const MAX_MOVES: usize = 4;

/// Hit points at the given level.
pub fn calculate_hp(base: u16, level: u8) -> u16 {
    let level = u32::from(level);
    let hp = (2 * u32::from(base) + 31) * level / 100 + level + 10;
    saturate(hp)
}

/// Attack, defense or speed at the given level.
pub fn calculate_stat(base: u16, level: u8) -> u16 {
    let level = u32::from(level);
    let stat = (2 * u32::from(base) + 31) * level / 100 + 5;
    saturate(stat)
}

fn saturate(value: u32) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

/// A battle-ready creature derived from a source record.
///
/// Stats, types and the composition of the move set are fixed at creation.
/// Only hit points and each move's remaining uses change during a battle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatEntity {
    pub source_id: u32,
    pub display_name: String,
    pub sprite_ref: String,
    pub level: u8,
    max_hp: u16,
    current_hp: u16,
    attack: u16,
    defense: u16,
    speed: u16,
    types: Vec<ElementType>,
    moves: Vec<MoveInstance>,
}

impl CombatEntity {
    pub fn max_hp(&self) -> u16 {
        self.max_hp
    }

    pub fn current_hp(&self) -> u16 {
        self.current_hp
    }

    pub fn attack(&self) -> u16 {
        self.attack
    }

    pub fn defense(&self) -> u16 {
        self.defense
    }

    pub fn speed(&self) -> u16 {
        self.speed
    }

    pub fn types(&self) -> &[ElementType] {
        &self.types
    }

    pub fn moves(&self) -> &[MoveInstance] {
        &self.moves
    }

    pub(crate) fn move_mut(&mut self, index: usize) -> Option<&mut MoveInstance> {
        self.moves.get_mut(index)
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    /// Indices of moves that still have uses left.
    pub fn usable_move_indices(&self) -> Vec<usize> {
        self.moves
            .iter()
            .enumerate()
            .filter(|(_, move_instance)| move_instance.is_usable())
            .map(|(index, _)| index)
            .collect()
    }

    pub fn has_usable_moves(&self) -> bool {
        self.moves.iter().any(MoveInstance::is_usable)
    }

    /// Apply damage, flooring HP at zero. Returns the HP actually removed.
    pub fn take_damage(&mut self, amount: u16) -> u16 {
        let dealt = amount.min(self.current_hp);
        self.current_hp -= dealt;
        dealt
    }

    /// Set current HP, clamped to `0..=max_hp`.
    pub fn set_hp(&mut self, hp: u16) {
        self.current_hp = hp.min(self.max_hp);
    }
}

/// Builds combatants from source records at a fixed level.
#[derive(Debug, Clone, Copy)]
pub struct CombatantBuilder<'a> {
    catalog: &'a MoveCatalog,
    level: u8,
}

impl<'a> CombatantBuilder<'a> {
    pub fn new(catalog: &'a MoveCatalog, level: u8) -> Self {
        Self { catalog, level }
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn build(&self, record: &CreatureRecord) -> Result<CombatEntity, SourceRecordError> {
        let source_id = match record.id {
            Some(id) if id > 0 => id,
            _ => return Err(SourceRecordError::MissingId),
        };
        let name = match record.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => return Err(SourceRecordError::MissingName { id: source_id }),
        };

        let base = |stat_name: &str, fallback: u16| {
            record
                .base_stat(stat_name)
                .filter(|value| *value > 0)
                .unwrap_or(fallback)
        };
        let max_hp = calculate_hp(base("hp", FALLBACK_BASE_HP), self.level);
        let attack = calculate_stat(base("attack", FALLBACK_BASE_ATTACK), self.level);
        let defense = calculate_stat(base("defense", FALLBACK_BASE_DEFENSE), self.level);
        let speed = calculate_stat(base("speed", FALLBACK_BASE_SPEED), self.level);

        let types = parse_types(record);
        let moves = self.derive_moves(name, &types);

        let entity = CombatEntity {
            source_id,
            display_name: capitalize(name),
            sprite_ref: record.sprite_ref().unwrap_or_default().to_string(),
            level: self.level,
            max_hp,
            current_hp: max_hp,
            attack,
            defense,
            speed,
            types,
            moves,
        };
        tracing::debug!(
            id = entity.source_id,
            name = %entity.display_name,
            hp = entity.max_hp,
            attack = entity.attack,
            defense = entity.defense,
            speed = entity.speed,
            moves = entity.moves.len(),
            "built combatant"
        );
        Ok(entity)
    }

    /// Default move, then one move per matching element rule, then signature
    /// moves, padded to two with the fallback and capped at four.
    fn derive_moves(&self, creature_name: &str, types: &[ElementType]) -> Vec<MoveInstance> {
        let rules = self.catalog.rules();

        let mut keys: Vec<&str> = vec![rules.default_move.as_str()];
        keys.extend(
            rules
                .type_moves
                .iter()
                .filter(|(element, _)| types.contains(element))
                .map(|(_, key)| key.as_str()),
        );
        keys.extend(
            rules
                .signature_moves
                .iter()
                .filter(|signature| signature.applies_to(creature_name))
                .map(|signature| signature.move_key.as_str()),
        );
        if keys.len() < MIN_MOVES {
            keys.push(rules.fallback_move.as_str());
        }
        keys.truncate(MAX_MOVES);

        // Catalog validation guarantees every rule key resolves.
        keys.into_iter()
            .filter_map(|key| self.catalog.instance(key))
            .collect()
    }
}

fn parse_types(record: &CreatureRecord) -> Vec<ElementType> {
    let mut types = Vec::new();
    for tag in record.type_tags() {
        match ElementType::from_str(tag) {
            Ok(element) if !types.contains(&element) => types.push(element),
            Ok(_) => {}
            Err(_) => tracing::warn!(tag, "skipping unknown type tag"),
        }
    }
    types
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
