//! Game-data seed store.
//!
//! Folds loaded addon bundles into one store of game content. Entity ids are
//! rewritten to `owner/repo/folder/id` so that independently authored addons
//! cannot collide.
//!
//! Merging is append-only. A failed merge leaves whatever was merged before
//! the failure in place; callers wanting atomic loads merge into a fresh
//! store and swap it in on success (see [`crate::GameMaster`]).

mod names;

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use serde::Serialize;
use tracing::{debug, info};

use crate::addons::{
    AddonBundle, AddonContent, AddonDocument, AddonError, Entity, LocationsData, Monster,
    NameParts, Namespace, PlayerClass, Race, Weapon, WeaponType, WeaponsData,
};

pub use names::generate_name;

/// Weapon types and weapons keyed by namespaced id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WeaponSeeds {
    pub types: BTreeMap<String, WeaponType>,
    pub weapons: BTreeMap<String, Weapon>,
}

/// Aggregated game content from every loaded addon.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedStore {
    pub classes: BTreeMap<String, PlayerClass>,
    pub locations: LocationsData,
    pub monsters: BTreeMap<String, Monster>,
    pub names: NameParts,
    pub races: BTreeMap<String, Race>,
    pub weapons: WeaponSeeds,
}

impl SeedStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from a bundle.
    pub fn from_bundle(bundle: &AddonBundle) -> Result<Self, AddonError> {
        let mut store = Self::new();
        store.merge_bundle(bundle)?;
        Ok(store)
    }

    /// Merges every document of a bundle.
    pub fn merge_bundle(&mut self, bundle: &AddonBundle) -> Result<(), AddonError> {
        for (namespace, document) in bundle.documents() {
            self.merge_document(namespace, document)?;
        }

        info!(
            "[SEED] Seeded {} entities from {} addon(s)",
            self.entity_count(),
            bundle.addon_count()
        );
        Ok(())
    }

    /// Merges a single document found under `namespace`.
    pub fn merge_document(
        &mut self,
        namespace: Namespace<'_>,
        document: &AddonDocument,
    ) -> Result<(), AddonError> {
        debug!("[SEED] Merging {} from {}", document.kind(), namespace);

        match &document.content {
            AddonContent::Names(parts) => {
                self.names.extend_from(parts);
                Ok(())
            }
            AddonContent::Locations(data) => {
                self.merge_locations(data);
                Ok(())
            }
            AddonContent::Monsters(data) => insert_entities(&mut self.monsters, namespace, &data.monsters),
            AddonContent::Classes(data) => insert_entities(&mut self.classes, namespace, &data.classes),
            AddonContent::Races(data) => insert_entities(&mut self.races, namespace, &data.races),
            AddonContent::Weapons(data) => self.merge_weapons(namespace, data),
        }
    }

    fn merge_locations(&mut self, data: &LocationsData) {
        self.locations.names.extend_from(&data.names);
        self.locations
            .descriptions
            .extend(data.descriptions.iter().cloned());
        self.locations
            .adjectives
            .extend(data.adjectives.iter().cloned());
    }

    fn merge_weapons(&mut self, namespace: Namespace<'_>, data: &WeaponsData) -> Result<(), AddonError> {
        insert_entities(&mut self.weapons.types, namespace, &data.types)?;

        // Weapon type references follow their types into the namespace.
        let weapons: Vec<Weapon> = data
            .weapons
            .iter()
            .map(|weapon| Weapon {
                weapon_type: namespace.qualify(&weapon.weapon_type),
                ..weapon.clone()
            })
            .collect();
        insert_entities(&mut self.weapons.weapons, namespace, &weapons)
    }

    /// Total number of id-keyed entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.classes.len()
            + self.monsters.len()
            + self.races.len()
            + self.weapons.types.len()
            + self.weapons.weapons.len()
    }

    /// Returns true if nothing has been merged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Inserts entities under namespaced ids, rejecting collisions.
fn insert_entities<E: Entity + Clone>(
    target: &mut BTreeMap<String, E>,
    namespace: Namespace<'_>,
    entities: &[E],
) -> Result<(), AddonError> {
    for entity in entities {
        let id = namespace.qualify(entity.id());
        match target.entry(id) {
            Entry::Occupied(slot) => {
                return Err(AddonError::DuplicateEntity {
                    id: slot.key().clone(),
                });
            }
            Entry::Vacant(slot) => {
                let mut entity = entity.clone();
                entity.set_id(slot.key().clone());
                slot.insert(entity);
            }
        }
    }
    Ok(())
}
