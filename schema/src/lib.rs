// Creature Battle Schema - Shared type definitions
// This crate contains the data shapes shared between the battle engine and
// whatever supplies it with creature records and move data.

// Re-export the main types
pub use creature_record::*;
pub use element_types::*;
pub use move_template::*;

pub mod creature_record;
pub mod element_types;
pub mod move_template;
