//! Creature Battle Engine
//!
//! A small turn-based battle system: two creatures built from public
//! creature records trade moves until one of them faints.

// --- MODULE DECLARATIONS ---
pub mod battle;
pub mod combatant;
pub mod config;
pub mod errors;
pub mod move_data;
pub mod source;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{CreatureRecord, Effectiveness, ElementType, MoveTemplate};

// --- From this crate's modules (`src/`) ---

// Engine command surface and observable state.
pub use battle::ai::{Behavior, RandomMoveAi};
pub use battle::calculators::MoveOutcome;
pub use battle::engine::{BattleEngine, TurnAction, TurnReport};
pub use battle::state::{BattleEvent, BattleLog, BattlePhase, BattleSession, Side, TurnRng};

// Combatants, moves and where they come from.
pub use combatant::{CombatEntity, CombatantBuilder};
pub use config::{BattleConfig, WildOpponentConfig};
pub use move_data::{MoveCatalog, MoveInstance};
pub use source::{CreatureSource, RecordRegistry};

// Crate-specific error and result types.
pub use errors::{
    BattleEngineError, BattleResult, CatalogError, ConfigError, SourceRecordError,
    SubmissionError, SubmissionResult,
};
