//! Creature source provider contract and the local stand-ins for it.

use crate::config::WildOpponentConfig;
use schema::CreatureRecord;

/// Anything that can look up creature records by id or name.
pub trait CreatureSource {
    fn by_id(&self, id: u32) -> Option<CreatureRecord>;

    /// Case-insensitive name lookup.
    fn by_name(&self, name: &str) -> Option<CreatureRecord>;
}

/// In-memory record store, typically loaded from a JSON array of records.
#[derive(Debug, Clone, Default)]
pub struct RecordRegistry {
    records: Vec<CreatureRecord>,
}

impl RecordRegistry {
    pub fn new(records: Vec<CreatureRecord>) -> Self {
        Self { records }
    }

    pub fn from_json_str(source: &str) -> serde_json::Result<Self> {
        let records: Vec<CreatureRecord> = serde_json::from_str(source)?;
        Ok(Self::new(records))
    }

    pub fn insert(&mut self, record: CreatureRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[CreatureRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl CreatureSource for RecordRegistry {
    fn by_id(&self, id: u32) -> Option<CreatureRecord> {
        self.records
            .iter()
            .find(|record| record.id == Some(id))
            .cloned()
    }

    fn by_name(&self, name: &str) -> Option<CreatureRecord> {
        self.records
            .iter()
            .find(|record| {
                record
                    .name
                    .as_deref()
                    .is_some_and(|candidate| candidate.eq_ignore_ascii_case(name))
            })
            .cloned()
    }
}

/// A wild opponent: the player's record under a new identity.
///
/// Stats and types are copied unchanged; only the id, name and sprite differ.
pub fn derive_wild_opponent(
    record: &CreatureRecord,
    id: u32,
    wild: &WildOpponentConfig,
) -> CreatureRecord {
    let mut opponent = record.clone();
    opponent.id = Some(id);
    opponent.name = Some(format!("{}-{}", wild.name_prefix, id));
    opponent.sprites.front_default = Some(wild.sprite_url(id));
    opponent
}
