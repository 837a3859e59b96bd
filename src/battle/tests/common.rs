use crate::battle::engine::BattleEngine;
use crate::battle::state::{Side, TurnRng};
use crate::config::BattleConfig;
use schema::CreatureRecord;

/// Creates a record with the four battle stats and the given type tags.
///
/// # Example
/// ```
/// let record = creature(25, "pikachu", [35, 55, 40, 90], &["electric"]);
/// ```
pub fn creature(id: u32, name: &str, stats: [u16; 4], types: &[&str]) -> CreatureRecord {
    let [hp, attack, defense, speed] = stats;
    types.iter().fold(
        CreatureRecord::new(id, name)
            .with_stat("hp", hp)
            .with_stat("attack", attack)
            .with_stat("defense", defense)
            .with_stat("speed", speed),
        |record, tag| record.with_type(tag),
    )
}

/// Level 50: hp 110, attack 75, defense 60, speed 110. Moves: Tackle, Thunder Shock.
pub fn pikachu() -> CreatureRecord {
    creature(25, "pikachu", [35, 55, 40, 90], &["electric"])
}

/// Level 50: hp 119, attack 68, defense 85, speed 63. Moves: Tackle, Water Gun.
pub fn squirtle() -> CreatureRecord {
    creature(7, "squirtle", [44, 48, 65, 43], &["water"])
}

/// Level 50: hp 115, attack 100, defense 120, speed 40. Moves: Tackle, Pound.
pub fn geodude() -> CreatureRecord {
    creature(74, "geodude", [40, 80, 100, 20], &["rock", "ground"])
}

/// Creates an engine with default config whose random stream replays `outcomes`.
pub fn create_test_engine(outcomes: Vec<f64>) -> BattleEngine {
    assert_ok(BattleEngine::new(BattleConfig::default())).with_rng(TurnRng::new_for_test(outcomes))
}

/// Creates an engine with a scripted stream and starts `first` against `second`.
pub fn create_test_battle(
    first: &CreatureRecord,
    second: &CreatureRecord,
    outcomes: Vec<f64>,
) -> BattleEngine {
    let mut engine = create_test_engine(outcomes);
    assert_ok(engine.start_encounter_against(first, second));
    engine
}

/// Set every move of one side to zero remaining uses.
pub fn deplete_moves(engine: &mut BattleEngine, side: Side) {
    let combatant = engine
        .session_mut()
        .combatant_mut(side)
        .expect("battle has combatants");
    for index in 0..combatant.moves().len() {
        if let Some(move_instance) = combatant.move_mut(index) {
            move_instance.remaining_uses = 0;
        }
    }
}

pub fn set_hp(engine: &mut BattleEngine, side: Side, hp: u16) {
    engine
        .session_mut()
        .combatant_mut(side)
        .expect("battle has combatants")
        .set_hp(hp);
}

pub fn hp(engine: &BattleEngine, side: Side) -> u16 {
    engine
        .snapshot()
        .combatant(side)
        .expect("battle has combatants")
        .current_hp()
}

pub fn log_lines(engine: &BattleEngine) -> Vec<&str> {
    engine
        .snapshot()
        .log()
        .lines()
        .iter()
        .map(String::as_str)
        .collect()
}

/// Helper function to assert that a Result is Ok and return the value.
/// Provides clear error messages in tests when functions unexpectedly fail.
pub fn assert_ok<T, E: std::fmt::Display>(result: Result<T, E>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("Expected Ok but got error: {}", err),
    }
}
