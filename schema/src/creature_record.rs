//! Raw creature records as delivered by the creature data source.
//!
//! The shape follows the public creature API's JSON: stats and types are
//! lists of small objects wrapping a named resource. Identity fields are
//! optional so a malformed record still parses and can be rejected by the
//! combatant builder with a useful error.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
}

impl NamedResource {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatEntry {
    pub base_stat: u16,
    pub stat: NamedResource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSlot {
    #[serde(default)]
    pub slot: Option<u8>,
    #[serde(rename = "type")]
    pub type_: NamedResource,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artwork {
    #[serde(default)]
    pub front_default: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherSprites {
    #[serde(default, rename = "official-artwork")]
    pub official_artwork: Option<Artwork>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprites {
    #[serde(default)]
    pub front_default: Option<String>,
    #[serde(default)]
    pub other: Option<OtherSprites>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureRecord {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub stats: Vec<StatEntry>,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub sprites: Sprites,
}

impl CreatureRecord {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_stat(mut self, stat_name: &str, base_stat: u16) -> Self {
        self.stats.push(StatEntry {
            base_stat,
            stat: NamedResource::new(stat_name),
        });
        self
    }

    pub fn with_type(mut self, type_name: &str) -> Self {
        let slot = u8::try_from(self.types.len() + 1).ok();
        self.types.push(TypeSlot {
            slot,
            type_: NamedResource::new(type_name),
        });
        self
    }

    pub fn with_sprite(mut self, url: impl Into<String>) -> Self {
        self.sprites.front_default = Some(url.into());
        self
    }

    /// Base value for the named stat, if the record lists it.
    pub fn base_stat(&self, stat_name: &str) -> Option<u16> {
        self.stats
            .iter()
            .find(|entry| entry.stat.name == stat_name)
            .map(|entry| entry.base_stat)
    }

    /// Type tags in slot order as they appear in the record.
    pub fn type_tags(&self) -> impl Iterator<Item = &str> {
        self.types.iter().map(|slot| slot.type_.name.as_str())
    }

    /// Preferred sprite: the default front sprite, then the official artwork.
    pub fn sprite_ref(&self) -> Option<&str> {
        self.sprites.front_default.as_deref().or_else(|| {
            self.sprites
                .other
                .as_ref()
                .and_then(|other| other.official_artwork.as_ref())
                .and_then(|artwork| artwork.front_default.as_deref())
        })
    }
}
