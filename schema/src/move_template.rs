use crate::ElementType;
use serde::{Deserialize, Serialize};

/// Static definition of a move, as stored in the move catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveTemplate {
    pub name: String,
    pub base_power: u16,
    /// Percent chance to hit, 0-100.
    pub accuracy: u8,
    pub element: ElementType,
    pub max_uses: u8,
    pub description: String,
}
