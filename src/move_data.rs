use crate::errors::{CatalogError, CatalogResult};
use schema::{ElementType, MoveTemplate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

const BUILTIN_CATALOG: &str = include_str!("../data/moves.ron");

// Built-in catalog, parsed once on first use.
static BUILTIN: LazyLock<MoveCatalog> = LazyLock::new(|| {
    MoveCatalog::from_ron_str(BUILTIN_CATALOG).expect("embedded move catalog is well-formed")
});

/// Rules that decide which catalog moves a new combatant starts with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovesetRules {
    /// Every combatant starts with this move.
    pub default_move: String,
    /// Checked in order; one move per element the creature has.
    pub type_moves: Vec<(ElementType, String)>,
    pub signature_moves: Vec<SignatureMove>,
    /// Appended when the other rules produced fewer than two moves.
    pub fallback_move: String,
}

/// A move granted to specific creatures by (lowercase) name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureMove {
    pub move_key: String,
    pub species: Vec<String>,
}

impl SignatureMove {
    pub fn applies_to(&self, creature_name: &str) -> bool {
        self.species
            .iter()
            .any(|name| name.eq_ignore_ascii_case(creature_name))
    }
}

/// Read-only move catalog keyed by move key (e.g. `"water-gun"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveCatalog {
    moves: HashMap<String, MoveTemplate>,
    rules: MovesetRules,
}

impl MoveCatalog {
    /// The catalog bundled with the crate.
    pub fn builtin() -> &'static MoveCatalog {
        &BUILTIN
    }

    pub fn from_ron_str(source: &str) -> CatalogResult<Self> {
        let catalog: MoveCatalog = ron::from_str(source)?;
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> CatalogResult<()> {
        for (key, template) in &self.moves {
            if template.accuracy > 100 {
                return Err(CatalogError::InvalidAccuracy {
                    key: key.clone(),
                    accuracy: template.accuracy,
                });
            }
            if template.max_uses == 0 {
                return Err(CatalogError::ZeroUses(key.clone()));
            }
        }

        let rules = &self.rules;
        let referenced = [&rules.default_move, &rules.fallback_move]
            .into_iter()
            .chain(rules.type_moves.iter().map(|(_, key)| key))
            .chain(rules.signature_moves.iter().map(|sig| &sig.move_key));
        for key in referenced {
            if !self.moves.contains_key(key) {
                return Err(CatalogError::UnknownMove(key.clone()));
            }
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&MoveTemplate> {
        self.moves.get(key)
    }

    pub fn rules(&self) -> &MovesetRules {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Fresh instance of a catalog move with full uses.
    pub fn instance(&self, key: &str) -> Option<MoveInstance> {
        self.get(key).cloned().map(MoveInstance::new)
    }
}

/// A move owned by one combatant, tracking its remaining uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveInstance {
    #[serde(flatten)]
    pub template: MoveTemplate,
    pub remaining_uses: u8,
}

impl MoveInstance {
    /// Create a new move instance with all uses available
    pub fn new(template: MoveTemplate) -> Self {
        let remaining_uses = template.max_uses;
        Self {
            template,
            remaining_uses,
        }
    }

    pub fn name(&self) -> &str {
        &self.template.name
    }

    pub fn max_uses(&self) -> u8 {
        self.template.max_uses
    }

    pub fn is_usable(&self) -> bool {
        self.remaining_uses > 0
    }

    /// Use the move (decrease remaining uses)
    pub fn use_move(&mut self) -> bool {
        if self.remaining_uses > 0 {
            self.remaining_uses -= 1;
            true
        } else {
            false
        }
    }
}
