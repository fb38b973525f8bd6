//! Addon document schema.
//!
//! Every JSON file in an addon archive is a document of the form
//! `{ "type": <category>, "version": <string>, "data": <category data> }`.
//! The `data` shape is fixed per category; unknown properties are rejected
//! at every level.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Deserializer, Serialize, de};

use super::types::Category;

/// Name parts combined into generated names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NameParts {
    /// Prefixes.
    pub pre: Vec<String>,
    /// Stems.
    pub name: Vec<String>,
    /// Suffixes.
    pub sur: Vec<String>,
}

impl NameParts {
    /// Appends every part of `other`, keeping order and duplicates.
    pub fn extend_from(&mut self, other: &NameParts) {
        self.pre.extend(other.pre.iter().cloned());
        self.name.extend(other.name.iter().cloned());
        self.sur.extend(other.sur.iter().cloned());
    }
}

/// Data of a `locations` document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocationsData {
    /// Location name parts.
    pub names: NameParts,
    /// Free-text descriptions.
    pub descriptions: Vec<String>,
    /// Adjectives applied to locations.
    pub adjectives: Vec<String>,
}

/// A monster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Monster {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<u32>,
    /// Damage in dice notation, e.g. `1d6+1`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<String>,
}

/// A playable class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlayerClass {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Stat modifiers keyed by stat name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub stats: BTreeMap<String, i32>,
}

/// A playable race.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Race {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub stats: BTreeMap<String, i32>,
}

/// A weapon type (sword, bow, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WeaponType {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

/// A weapon referencing one of the weapon types by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Weapon {
    pub id: String,
    pub name: String,
    /// Id of the [`WeaponType`] this weapon belongs to.
    #[serde(rename = "type")]
    pub weapon_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonstersData {
    pub monsters: Vec<Monster>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassesData {
    pub classes: Vec<PlayerClass>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RacesData {
    pub races: Vec<Race>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WeaponsData {
    pub types: Vec<WeaponType>,
    pub weapons: Vec<Weapon>,
}

/// Entities stored by id in the seed store.
pub trait Entity {
    /// Current id.
    fn id(&self) -> &str;

    /// Replaces the id.
    fn set_id(&mut self, id: String);
}

macro_rules! impl_entity {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Entity for $ty {
                fn id(&self) -> &str {
                    &self.id
                }

                fn set_id(&mut self, id: String) {
                    self.id = id;
                }
            }
        )*
    };
}

impl_entity!(Monster, PlayerClass, Race, WeaponType, Weapon);

/// Category-specific payload of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddonContent {
    Classes(ClassesData),
    Locations(LocationsData),
    Monsters(MonstersData),
    Names(NameParts),
    Races(RacesData),
    Weapons(WeaponsData),
}

impl AddonContent {
    /// Returns the category tag of this payload.
    #[must_use]
    pub fn kind(&self) -> Category {
        match self {
            Self::Classes(_) => Category::Classes,
            Self::Locations(_) => Category::Locations,
            Self::Monsters(_) => Category::Monsters,
            Self::Names(_) => Category::Names,
            Self::Races(_) => Category::Races,
            Self::Weapons(_) => Category::Weapons,
        }
    }
}

/// Wire form of a document before the `data` payload is typed.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDocument {
    #[serde(rename = "type")]
    kind: Category,
    version: String,
    data: serde_json::Value,
}

/// A validated addon document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddonDocument {
    /// Document version string.
    pub version: String,
    /// Typed payload.
    pub content: AddonContent,
}

impl<'de> Deserialize<'de> for AddonDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawDocument::deserialize(deserializer)?;
        Self::from_raw(raw).map_err(de::Error::custom)
    }
}

impl AddonDocument {
    /// Types the `data` payload according to the document's tag.
    fn from_raw(raw: RawDocument) -> Result<Self, serde_json::Error> {
        let data = raw.data;
        let content = match raw.kind {
            Category::Classes => AddonContent::Classes(serde_json::from_value(data)?),
            Category::Locations => AddonContent::Locations(serde_json::from_value(data)?),
            Category::Monsters => AddonContent::Monsters(serde_json::from_value(data)?),
            Category::Names => AddonContent::Names(serde_json::from_value(data)?),
            Category::Races => AddonContent::Races(serde_json::from_value(data)?),
            Category::Weapons => AddonContent::Weapons(serde_json::from_value(data)?),
        };

        Ok(Self {
            version: raw.version,
            content,
        })
    }

    /// Parses a document from JSON text.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Returns the document's category.
    #[must_use]
    pub fn kind(&self) -> Category {
        self.content.kind()
    }

    /// Checks rules the type system cannot express.
    pub fn check_consistency(&self) -> Result<(), String> {
        if self.version.trim().is_empty() {
            return Err("version must not be empty".to_string());
        }

        match &self.content {
            AddonContent::Classes(data) => check_ids("classes", &data.classes),
            AddonContent::Monsters(data) => check_ids("monsters", &data.monsters),
            AddonContent::Races(data) => check_ids("races", &data.races),
            AddonContent::Weapons(data) => {
                check_ids("types", &data.types)?;
                check_ids("weapons", &data.weapons)?;

                let declared: HashSet<&str> = data.types.iter().map(|t| t.id.as_str()).collect();
                match data
                    .weapons
                    .iter()
                    .find(|w| !declared.contains(w.weapon_type.as_str()))
                {
                    Some(weapon) => Err(format!(
                        "weapon '{}' references undeclared type '{}'",
                        weapon.id, weapon.weapon_type
                    )),
                    None => Ok(()),
                }
            }
            AddonContent::Locations(_) | AddonContent::Names(_) => Ok(()),
        }
    }
}

/// Ids must be non-empty and free of `/`, which separates namespace segments.
fn check_ids<E: Entity>(field: &str, entities: &[E]) -> Result<(), String> {
    for (index, entity) in entities.iter().enumerate() {
        let id = entity.id();
        if id.is_empty() {
            return Err(format!("{}[{}]: id must not be empty", field, index));
        }
        if id.contains('/') {
            return Err(format!("{}[{}]: id '{}' must not contain '/'", field, index, id));
        }
    }
    Ok(())
}

/// Checks document text against the addon schema.
pub trait DocumentValidator: Send + Sync {
    /// Returns `Err` with a human-readable complaint when `text` does not conform.
    fn check(&self, text: &str) -> Result<(), String>;
}

/// Validator enforcing the typed schema in this module.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaValidator;

impl DocumentValidator for SchemaValidator {
    fn check(&self, text: &str) -> Result<(), String> {
        let document = AddonDocument::from_json(text).map_err(|e| e.to_string())?;
        document.check_consistency()
    }
}
